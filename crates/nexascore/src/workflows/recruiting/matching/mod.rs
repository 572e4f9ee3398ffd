//! Weighted candidate-to-posting matching.
//!
//! Each candidate receives three 0-100 sub-scores (skills, experience, location) that
//! are blended by the posting's weights into a composite score. A posting may veto
//! candidates outside its target city. Results carry the rationale that produced them.

mod experience;
mod location;
mod profile;
mod skills;

pub use skills::SkillChart;

use serde::{Deserialize, Serialize};

use super::domain::{Candidate, CandidateId, Posting, PostingId};
use crate::config::MatchingConfig;
use experience::assess_experience;
use location::assess_location;
use profile::{ResolvedCandidate, ResolvedPosting};
use skills::assess_skills;

pub(crate) const DISQUALIFIED_CITY_MISMATCH: &str = "DISQUALIFIED (city mismatch)";

/// Score and rationale produced by one sub-score rule.
#[derive(Debug, Default)]
pub(crate) struct Assessment {
    pub score: u8,
    pub positives: Vec<String>,
    pub negatives: Vec<String>,
}

/// Rounds to the nearest integer and bounds the result to the 0-100 scale.
pub(crate) fn percent(value: f64) -> u8 {
    value.round().clamp(0.0, 100.0) as u8
}

/// Stateless engine ranking a candidate pool against one posting.
#[derive(Debug, Clone, Default)]
pub struct MatchingEngine {
    config: MatchingConfig,
}

impl MatchingEngine {
    pub fn new(config: MatchingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MatchingConfig {
        &self.config
    }

    /// Scores every candidate and orders the results by composite score, highest first.
    ///
    /// Equal scores keep the order in which candidates appear in `pool`.
    pub fn rank(&self, posting: &Posting, pool: &[Candidate]) -> Vec<CandidateMatchResult> {
        let resolved = ResolvedPosting::resolve(posting);
        let mut results: Vec<CandidateMatchResult> = pool
            .iter()
            .map(|candidate| evaluate(&resolved, candidate))
            .collect();

        results.sort_by(|left, right| right.composite_score.cmp(&left.composite_score));
        results
    }

    /// Scores a single candidate without ranking.
    pub fn evaluate(&self, posting: &Posting, candidate: &Candidate) -> CandidateMatchResult {
        evaluate(&ResolvedPosting::resolve(posting), candidate)
    }

    /// Number of results at or above the configured strong-match threshold.
    pub fn strong_matches(&self, results: &[CandidateMatchResult]) -> usize {
        results
            .iter()
            .filter(|result| result.composite_score >= self.config.strong_match_threshold)
            .count()
    }
}

fn evaluate(posting: &ResolvedPosting<'_>, candidate: &Candidate) -> CandidateMatchResult {
    let candidate = ResolvedCandidate::resolve(candidate);
    let params = &posting.parameters;

    let skills = assess_skills(posting, &candidate);
    let experience = assess_experience(candidate.experience_years, params.experience_target);
    let location = assess_location(candidate.city, posting.target_city);

    let weighted_sum = f64::from(skills.assessment.score) * f64::from(params.weight_skills)
        + f64::from(experience.score) * f64::from(params.weight_experience)
        + f64::from(location.assessment.score) * f64::from(params.weight_location);
    let weight_total = params.weight_total().max(1) as f64;
    let mut composite_score = percent(weighted_sum / weight_total);

    let mut positives = Vec::new();
    let mut negatives = Vec::new();

    if params.exclude_if_city_mismatch && !location.exact_match {
        composite_score = 0;
        negatives.push(DISQUALIFIED_CITY_MISMATCH.to_string());
    }

    for assessment in [&skills.assessment, &experience, &location.assessment] {
        positives.extend(assessment.positives.iter().cloned());
        negatives.extend(assessment.negatives.iter().cloned());
    }

    CandidateMatchResult {
        candidate_id: candidate.id,
        display_name: candidate.display_name.clone(),
        city: candidate.city_label(),
        skill_score: skills.assessment.score,
        experience_score: experience.score,
        location_score: location.assessment.score,
        location_match: location.exact_match,
        positives,
        negatives,
        composite_score,
        skill_chart: skills.chart,
    }
}

/// Per-candidate outcome with sub-scores, rationale, and chart series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateMatchResult {
    pub candidate_id: CandidateId,
    pub display_name: String,
    pub city: String,
    pub skill_score: u8,
    pub experience_score: u8,
    pub location_score: u8,
    pub location_match: bool,
    pub positives: Vec<String>,
    pub negatives: Vec<String>,
    pub composite_score: u8,
    pub skill_chart: SkillChart,
}

impl CandidateMatchResult {
    pub fn is_disqualified(&self) -> bool {
        self.negatives
            .first()
            .map(|reason| reason == DISQUALIFIED_CITY_MISMATCH)
            .unwrap_or(false)
    }
}

/// Ranking for one posting as handed to presentation and notification layers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchReport {
    pub posting_id: PostingId,
    pub posting_title: String,
    pub evaluated: usize,
    pub strong_matches: usize,
    pub results: Vec<CandidateMatchResult>,
}
