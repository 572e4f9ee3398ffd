use super::super::domain::ExperienceTarget;
use super::{percent, Assessment};

/// Open-ended upper bound for the senior band.
pub(crate) const OPEN_ENDED_YEARS: u32 = 99;
/// Score given to a junior-targeted candidate whose excess experience triggers the penalty.
pub(crate) const OVERQUALIFIED_SCORE: u8 = 55;
/// Years above the band's maximum at which the penalty applies.
pub(crate) const OVERQUALIFICATION_EXCESS_YEARS: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ExperienceBand {
    pub min: u32,
    pub max: u32,
    pub overqualification_penalty: bool,
}

/// Target bands. `NoPreference` has no band and uses the flat tiers below.
const EXPERIENCE_BANDS: &[(ExperienceTarget, ExperienceBand)] = &[
    (
        ExperienceTarget::Junior,
        ExperienceBand {
            min: 0,
            max: 2,
            overqualification_penalty: true,
        },
    ),
    (
        ExperienceTarget::MidLevel,
        ExperienceBand {
            min: 3,
            max: 5,
            overqualification_penalty: false,
        },
    ),
    (
        ExperienceTarget::Senior,
        ExperienceBand {
            min: 6,
            max: OPEN_ENDED_YEARS,
            overqualification_penalty: false,
        },
    ),
];

/// Flat tiers applied when the posting has no experience preference, highest first.
const NO_PREFERENCE_TIERS: &[(u32, u8)] = &[(5, 100), (2, 70)];
const NO_PREFERENCE_FLOOR: u8 = 40;

pub(crate) fn band_for(target: ExperienceTarget) -> Option<ExperienceBand> {
    EXPERIENCE_BANDS
        .iter()
        .find(|(candidate, _)| *candidate == target)
        .map(|(_, band)| *band)
}

pub(crate) fn assess_experience(years: u32, target: ExperienceTarget) -> Assessment {
    let mut assessment = Assessment::default();

    let Some(band) = band_for(target) else {
        assessment.score = NO_PREFERENCE_TIERS
            .iter()
            .find(|(threshold, _)| years >= *threshold)
            .map(|(_, score)| *score)
            .unwrap_or(NO_PREFERENCE_FLOOR);
        return assessment;
    };

    if years < band.min {
        let required = band.min.max(1);
        assessment.score = percent(f64::from(years) / f64::from(required) * 100.0);
        assessment.negatives.push(format!(
            "insufficient experience ({years} years / {} required)",
            band.min
        ));
    } else if years <= band.max {
        assessment.score = 100;
        assessment
            .positives
            .push(format!("ideal experience ({years} years)"));
    } else {
        let excess = years - band.max;
        if band.overqualification_penalty && excess >= OVERQUALIFICATION_EXCESS_YEARS {
            assessment.score = OVERQUALIFIED_SCORE;
            assessment
                .negatives
                .push(format!("overqualified for a junior role ({years} years)"));
        } else {
            assessment.score = 100;
            assessment
                .positives
                .push(format!("solid experience ({years} years)"));
        }
    }

    assessment
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_preference_uses_flat_tiers_without_rationale() {
        for (years, expected) in [(0, 40), (1, 40), (2, 70), (4, 70), (5, 100), (20, 100)] {
            let assessment = assess_experience(years, ExperienceTarget::NoPreference);
            assert_eq!(assessment.score, expected, "years={years}");
            assert!(assessment.positives.is_empty());
            assert!(assessment.negatives.is_empty());
        }
    }

    #[test]
    fn junior_band_penalises_large_excess_only() {
        for years in 0..=2 {
            assert_eq!(assess_experience(years, ExperienceTarget::Junior).score, 100);
        }
        assert_eq!(assess_experience(3, ExperienceTarget::Junior).score, 100);
        assert_eq!(assess_experience(4, ExperienceTarget::Junior).score, 100);

        let penalised = assess_experience(6, ExperienceTarget::Junior);
        assert_eq!(penalised.score, 55);
        assert_eq!(
            penalised.negatives,
            vec!["overqualified for a junior role (6 years)".to_string()]
        );
    }

    #[test]
    fn mid_level_band_scales_shortfall_and_never_penalises() {
        let short = assess_experience(1, ExperienceTarget::MidLevel);
        assert_eq!(short.score, 33);
        assert_eq!(
            short.negatives,
            vec!["insufficient experience (1 years / 3 required)".to_string()]
        );

        let ideal = assess_experience(4, ExperienceTarget::MidLevel);
        assert_eq!(ideal.score, 100);
        assert_eq!(ideal.positives, vec!["ideal experience (4 years)".to_string()]);

        let veteran = assess_experience(10, ExperienceTarget::MidLevel);
        assert_eq!(veteran.score, 100);
        assert_eq!(veteran.positives, vec!["solid experience (10 years)".to_string()]);
    }

    #[test]
    fn senior_band_rounds_partial_experience() {
        assert_eq!(assess_experience(0, ExperienceTarget::Senior).score, 0);
        assert_eq!(assess_experience(4, ExperienceTarget::Senior).score, 67);
        assert_eq!(assess_experience(6, ExperienceTarget::Senior).score, 100);
        assert_eq!(assess_experience(40, ExperienceTarget::Senior).score, 100);
    }

    #[test]
    fn band_table_covers_every_targeted_level() {
        assert!(band_for(ExperienceTarget::NoPreference).is_none());
        assert_eq!(band_for(ExperienceTarget::Senior).map(|band| band.max), Some(99));
    }
}
