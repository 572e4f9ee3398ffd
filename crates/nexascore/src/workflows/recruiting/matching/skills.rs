use serde::{Deserialize, Serialize};

use super::profile::{ResolvedCandidate, ResolvedPosting};
use super::{percent, Assessment};

/// Ceiling on the per-skill ratio, granting at most a 10% overqualification bonus.
pub(crate) const OVERQUALIFICATION_RATIO_CAP: f64 = 1.1;
const SKILL_POINTS: f64 = 100.0;

/// Parallel series describing required versus held levels, in posting order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillChart {
    pub labels: Vec<String>,
    pub required_levels: Vec<u8>,
    pub candidate_levels: Vec<u8>,
}

pub(crate) struct SkillAssessment {
    pub assessment: Assessment,
    pub chart: SkillChart,
}

pub(crate) fn assess_skills(
    posting: &ResolvedPosting<'_>,
    candidate: &ResolvedCandidate<'_>,
) -> SkillAssessment {
    let mut assessment = Assessment::default();
    let mut chart = SkillChart::default();

    if posting.desired_skills.is_empty() {
        assessment.score = 100;
        return SkillAssessment { assessment, chart };
    }

    let mut earned = 0.0;
    let possible = SKILL_POINTS * posting.desired_skills.len() as f64;

    for desired in &posting.desired_skills {
        let held = candidate.level_for(desired.skill_id);

        chart.labels.push(desired.name.to_string());
        chart.required_levels.push(desired.required_level);
        chart.candidate_levels.push(held.unwrap_or(0));

        let Some(actual) = held else {
            assessment
                .negatives
                .push(format!("{} (missing)", desired.name));
            continue;
        };

        let ratio = f64::from(actual) / f64::from(desired.required_level);
        let ratio = if actual > desired.required_level {
            assessment
                .positives
                .push(format!("{} (expertise exceeds requirement)", desired.name));
            ratio.min(OVERQUALIFICATION_RATIO_CAP)
        } else if actual == desired.required_level {
            assessment
                .positives
                .push(format!("{} (requirement met)", desired.name));
            ratio
        } else {
            assessment
                .negatives
                .push(format!("{} (below requirement)", desired.name));
            ratio
        };

        earned += ratio * SKILL_POINTS;
    }

    assessment.score = percent(earned / possible * 100.0);
    SkillAssessment { assessment, chart }
}
