use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for skill catalog entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SkillId(pub u32);

/// Identifier wrapper for candidate profiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CandidateId(pub u32);

/// Identifier wrapper for job postings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PostingId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct JobRoleId(pub u32);

/// Immutable catalog entry shared by postings and candidates.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Skill {
    pub id: SkillId,
    pub name: String,
}

/// Skill a posting asks for, with the minimum level on a 1-5 scale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesiredSkill {
    pub skill: Skill,
    #[serde(default)]
    pub required_level: Option<u8>,
}

/// Skill a candidate holds, with a self-assessed level on a 1-5 scale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcquiredSkill {
    pub skill: Skill,
    #[serde(default)]
    pub level: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRole {
    pub id: JobRoleId,
    pub title: String,
}

/// Person profile as loaded from the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: CandidateId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub birth_date: NaiveDate,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub current_job_title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub experience_years: Option<u32>,
    #[serde(default)]
    pub skills: Vec<AcquiredSkill>,
}

impl Candidate {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Job opening with its desired skills and scoring configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Posting {
    pub id: PostingId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub target_city: String,
    #[serde(default)]
    pub target_postal_code: Option<String>,
    pub created_at: NaiveDateTime,
    pub job_role_id: JobRoleId,
    #[serde(default)]
    pub desired_skills: Vec<DesiredSkill>,
    #[serde(default)]
    pub scoring: Option<ScoringParameters>,
}

impl Posting {
    /// Scoring parameters attached to the posting, or the defaults when none were stored.
    pub fn scoring_or_default(&self) -> ScoringParameters {
        self.scoring.clone().unwrap_or_default()
    }
}

/// Recruiter input used to open a new posting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostingDraft {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub target_city: String,
    #[serde(default)]
    pub target_postal_code: Option<String>,
    pub job_role_id: JobRoleId,
    #[serde(default)]
    pub desired_skills: Vec<DesiredSkill>,
    #[serde(default)]
    pub scoring: Option<ScoringParameters>,
}

impl PostingDraft {
    pub fn into_posting(self, id: PostingId, created_at: NaiveDateTime) -> Posting {
        Posting {
            id,
            title: self.title,
            description: self.description,
            target_city: self.target_city,
            target_postal_code: self.target_postal_code,
            created_at,
            job_role_id: self.job_role_id,
            desired_skills: self.desired_skills,
            scoring: Some(self.scoring.unwrap_or_default()),
        }
    }
}

pub const DEFAULT_WEIGHT_SKILLS: u32 = 60;
pub const DEFAULT_WEIGHT_EXPERIENCE: u32 = 20;
pub const DEFAULT_WEIGHT_LOCATION: u32 = 20;
pub const MAX_WEIGHT: u32 = 100;

/// Weighting profile attached one-to-one to a posting.
///
/// Weights are not required to sum to 100; the engine normalises by their total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringParameters {
    pub weight_skills: u32,
    pub weight_experience: u32,
    pub weight_location: u32,
    pub exclude_if_city_mismatch: bool,
    pub experience_target: ExperienceTarget,
}

impl Default for ScoringParameters {
    fn default() -> Self {
        Self {
            weight_skills: DEFAULT_WEIGHT_SKILLS,
            weight_experience: DEFAULT_WEIGHT_EXPERIENCE,
            weight_location: DEFAULT_WEIGHT_LOCATION,
            exclude_if_city_mismatch: false,
            experience_target: ExperienceTarget::NoPreference,
        }
    }
}

impl ScoringParameters {
    pub fn validate(&self) -> Result<(), ScoringConfigError> {
        let weights = [
            ("weight_skills", self.weight_skills),
            ("weight_experience", self.weight_experience),
            ("weight_location", self.weight_location),
        ];

        for (field, value) in weights {
            if value > MAX_WEIGHT {
                return Err(ScoringConfigError::WeightOutOfRange { field, value });
            }
        }

        Ok(())
    }

    /// Sum of the three weights, widened so unvalidated parameters cannot overflow.
    pub fn weight_total(&self) -> u64 {
        u64::from(self.weight_skills)
            + u64::from(self.weight_experience)
            + u64::from(self.weight_location)
    }
}

/// Seniority a recruiter is targeting for a posting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceTarget {
    #[default]
    NoPreference,
    Junior,
    MidLevel,
    Senior,
}

impl ExperienceTarget {
    pub const fn label(self) -> &'static str {
        match self {
            ExperienceTarget::NoPreference => "no preference (more is better)",
            ExperienceTarget::Junior => "junior (0-2 years)",
            ExperienceTarget::MidLevel => "mid-level (3-5 years)",
            ExperienceTarget::Senior => "senior (6+ years)",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScoringConfigError {
    #[error("{field} must be between 0 and 100 (found {value})")]
    WeightOutOfRange { field: &'static str, value: u32 },
}
