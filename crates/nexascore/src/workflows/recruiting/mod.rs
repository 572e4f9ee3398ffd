//! Recruiting core: catalog entities, candidate matching, and the service facade that
//! wires them to storage and the notification feed.

pub mod catalog;
pub mod cv;
pub mod domain;
pub mod matching;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use catalog::SkillCatalog;
pub use cv::{CvMatch, DocumentScore, DocumentScorer, DocumentScorerError, ProcessDocumentScorer};
pub use domain::{
    AcquiredSkill, Candidate, CandidateId, DesiredSkill, ExperienceTarget, JobRole, JobRoleId,
    Posting, PostingDraft, PostingId, ScoringConfigError, ScoringParameters, Skill, SkillId,
};
pub use matching::{CandidateMatchResult, MatchReport, MatchingEngine, SkillChart};
pub use repository::{
    Notification, NotificationError, NotificationPublisher, RecruitingRepository,
    RepositoryError,
};
pub use router::recruiting_router;
pub use service::{RecruitingService, RecruitingServiceError};
