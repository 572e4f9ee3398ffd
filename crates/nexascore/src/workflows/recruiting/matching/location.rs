use super::Assessment;

pub(crate) struct LocationAssessment {
    pub assessment: Assessment,
    pub exact_match: bool,
}

/// Compares cities case-insensitively after trimming.
///
/// A blank city on either side scores 0 and records no rationale.
pub(crate) fn assess_location(candidate_city: Option<&str>, target_city: &str) -> LocationAssessment {
    let mut assessment = Assessment::default();
    let candidate_city = candidate_city.map(str::trim).unwrap_or_default();
    let target_city = target_city.trim();

    if candidate_city.is_empty() || target_city.is_empty() {
        return LocationAssessment {
            assessment,
            exact_match: false,
        };
    }

    let exact_match = candidate_city.to_lowercase() == target_city.to_lowercase();
    if exact_match {
        assessment.score = 100;
        assessment.positives.push("ideal location".to_string());
    } else {
        assessment
            .negatives
            .push(format!("different city ({candidate_city})"));
    }

    LocationAssessment {
        assessment,
        exact_match,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_ignoring_case_and_padding() {
        let located = assess_location(Some("  LYON "), "lyon");
        assert!(located.exact_match);
        assert_eq!(located.assessment.score, 100);
        assert_eq!(located.assessment.positives, vec!["ideal location".to_string()]);
    }

    #[test]
    fn mismatch_names_the_candidate_city() {
        let located = assess_location(Some("Nantes"), "Lyon");
        assert!(!located.exact_match);
        assert_eq!(located.assessment.score, 0);
        assert_eq!(
            located.assessment.negatives,
            vec!["different city (Nantes)".to_string()]
        );
    }

    #[test]
    fn blank_cities_score_zero_without_rationale() {
        for (candidate, target) in [(None, "Lyon"), (Some("   "), "Lyon"), (Some("Lyon"), "")] {
            let located = assess_location(candidate, target);
            assert!(!located.exact_match);
            assert_eq!(located.assessment.score, 0);
            assert!(located.assessment.positives.is_empty());
            assert!(located.assessment.negatives.is_empty());
        }
    }
}
