//! Resolution of optional store fields into the concrete values scoring works with.

use std::collections::HashMap;

use super::super::domain::{Candidate, CandidateId, Posting, ScoringParameters, SkillId};

/// Required level assumed when a desired skill carries none. Also the floor, so the
/// skill ratio never divides by zero.
pub(crate) const DEFAULT_REQUIRED_LEVEL: u8 = 1;
pub(crate) const DEFAULT_ACQUIRED_LEVEL: u8 = 0;
pub(crate) const DEFAULT_EXPERIENCE_YEARS: u32 = 0;
pub(crate) const UNKNOWN_CITY: &str = "Unknown city";

pub(crate) fn required_level_or_default(level: Option<u8>) -> u8 {
    level
        .unwrap_or(DEFAULT_REQUIRED_LEVEL)
        .max(DEFAULT_REQUIRED_LEVEL)
}

pub(crate) fn acquired_level_or_default(level: Option<u8>) -> u8 {
    level.unwrap_or(DEFAULT_ACQUIRED_LEVEL)
}

pub(crate) fn experience_or_default(years: Option<u32>) -> u32 {
    years.unwrap_or(DEFAULT_EXPERIENCE_YEARS)
}

pub(crate) struct ResolvedDesiredSkill<'a> {
    pub skill_id: SkillId,
    pub name: &'a str,
    pub required_level: u8,
}

/// Posting view with every optional value defaulted.
pub(crate) struct ResolvedPosting<'a> {
    pub target_city: &'a str,
    pub desired_skills: Vec<ResolvedDesiredSkill<'a>>,
    pub parameters: ScoringParameters,
}

impl<'a> ResolvedPosting<'a> {
    pub fn resolve(posting: &'a Posting) -> Self {
        let desired_skills = posting
            .desired_skills
            .iter()
            .map(|desired| ResolvedDesiredSkill {
                skill_id: desired.skill.id,
                name: desired.skill.name.as_str(),
                required_level: required_level_or_default(desired.required_level),
            })
            .collect();

        Self {
            target_city: posting.target_city.as_str(),
            desired_skills,
            parameters: posting.scoring_or_default(),
        }
    }
}

/// Candidate view with defaulted levels and experience, skills indexed by id.
pub(crate) struct ResolvedCandidate<'a> {
    pub id: CandidateId,
    pub display_name: String,
    pub city: Option<&'a str>,
    pub experience_years: u32,
    levels: HashMap<SkillId, u8>,
}

impl<'a> ResolvedCandidate<'a> {
    pub fn resolve(candidate: &'a Candidate) -> Self {
        let mut levels = HashMap::with_capacity(candidate.skills.len());
        for acquired in &candidate.skills {
            // First row wins when a skill is listed twice.
            levels
                .entry(acquired.skill.id)
                .or_insert_with(|| acquired_level_or_default(acquired.level));
        }

        Self {
            id: candidate.id,
            display_name: candidate.display_name(),
            city: candidate.city.as_deref(),
            experience_years: experience_or_default(candidate.experience_years),
            levels,
        }
    }

    pub fn level_for(&self, skill_id: SkillId) -> Option<u8> {
        self.levels.get(&skill_id).copied()
    }

    pub fn city_label(&self) -> String {
        match self.city {
            Some(city) if !city.trim().is_empty() => city.to_string(),
            _ => UNKNOWN_CITY.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_level_defaults_and_floors_at_one() {
        assert_eq!(required_level_or_default(None), 1);
        assert_eq!(required_level_or_default(Some(0)), 1);
        assert_eq!(required_level_or_default(Some(4)), 4);
    }

    #[test]
    fn acquired_level_and_experience_default_to_zero() {
        assert_eq!(acquired_level_or_default(None), 0);
        assert_eq!(acquired_level_or_default(Some(3)), 3);
        assert_eq!(experience_or_default(None), 0);
        assert_eq!(experience_or_default(Some(7)), 7);
    }
}
