use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::config::MatchingConfig;
use crate::workflows::recruiting::cv::{DocumentScore, DocumentScorer, DocumentScorerError};
use crate::workflows::recruiting::domain::{
    AcquiredSkill, Candidate, CandidateId, DesiredSkill, ExperienceTarget, JobRoleId, Posting,
    PostingDraft, PostingId, ScoringParameters, Skill, SkillId,
};
use crate::workflows::recruiting::repository::{
    Notification, NotificationError, NotificationPublisher, RecruitingRepository, RepositoryError,
};
use crate::workflows::recruiting::{recruiting_router, RecruitingService};

pub(super) fn rust() -> Skill {
    Skill {
        id: SkillId(1),
        name: "Rust".to_string(),
    }
}

pub(super) fn postgres() -> Skill {
    Skill {
        id: SkillId(2),
        name: "PostgreSQL".to_string(),
    }
}

pub(super) fn draft() -> PostingDraft {
    PostingDraft {
        title: "Platform Engineer".to_string(),
        description: "Own the matching pipeline".to_string(),
        target_city: "Lyon".to_string(),
        target_postal_code: Some("69002".to_string()),
        job_role_id: JobRoleId(3),
        desired_skills: vec![
            DesiredSkill {
                skill: rust(),
                required_level: Some(4),
            },
            DesiredSkill {
                skill: postgres(),
                required_level: Some(2),
            },
        ],
        scoring: None,
    }
}

pub(super) fn senior_scoring() -> ScoringParameters {
    ScoringParameters {
        weight_skills: 50,
        weight_experience: 30,
        weight_location: 20,
        exclude_if_city_mismatch: false,
        experience_target: ExperienceTarget::Senior,
    }
}

pub(super) fn candidate(
    id: u32,
    last_name: &str,
    city: Option<&str>,
    experience_years: Option<u32>,
    levels: &[(Skill, u8)],
) -> Candidate {
    Candidate {
        id: CandidateId(id),
        first_name: "Sam".to_string(),
        last_name: last_name.to_string(),
        email: format!("{}@example.com", last_name.to_lowercase()),
        birth_date: NaiveDate::from_ymd_opt(1992, 5, 17).expect("valid date"),
        city: city.map(str::to_string),
        postal_code: None,
        phone: None,
        current_job_title: Some("Developer".to_string()),
        description: None,
        experience_years,
        skills: levels
            .iter()
            .map(|(skill, level)| AcquiredSkill {
                skill: skill.clone(),
                level: Some(*level),
            })
            .collect(),
    }
}

/// Pool ordered so that ranking has to reorder it.
pub(super) fn pool() -> Vec<Candidate> {
    vec![
        candidate(10, "Martin", Some("Paris"), Some(1), &[(rust(), 1)]),
        candidate(
            11,
            "Bernard",
            Some("Lyon"),
            Some(5),
            &[(rust(), 4), (postgres(), 2)],
        ),
        candidate(12, "Dubois", None, None, &[]),
        candidate(
            13,
            "Thomas",
            Some(" lyon "),
            Some(7),
            &[(rust(), 3), (postgres(), 2)],
        ),
    ]
}

pub(super) fn build_service() -> (
    RecruitingService<MemoryRepository, MemoryNotifications>,
    Arc<MemoryRepository>,
    Arc<MemoryNotifications>,
) {
    let repository = Arc::new(MemoryRepository::with_candidates(pool()));
    let notifications = Arc::new(MemoryNotifications::default());
    let service = RecruitingService::new(
        repository.clone(),
        notifications.clone(),
        MatchingConfig::default(),
    );
    (service, repository, notifications)
}

pub(super) fn router_with_service(
    service: RecruitingService<MemoryRepository, MemoryNotifications>,
) -> axum::Router {
    recruiting_router(Arc::new(service))
}

#[derive(Default)]
pub(super) struct MemoryRepository {
    postings: Mutex<BTreeMap<PostingId, Posting>>,
    candidates: Vec<Candidate>,
}

impl MemoryRepository {
    pub(super) fn with_candidates(candidates: Vec<Candidate>) -> Self {
        Self {
            postings: Mutex::new(BTreeMap::new()),
            candidates,
        }
    }
}

impl RecruitingRepository for MemoryRepository {
    fn insert_posting(&self, posting: Posting) -> Result<Posting, RepositoryError> {
        let mut guard = self.postings.lock().expect("repository mutex poisoned");
        if guard.contains_key(&posting.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(posting.id, posting.clone());
        Ok(posting)
    }

    fn update_posting(&self, posting: Posting) -> Result<(), RepositoryError> {
        let mut guard = self.postings.lock().expect("repository mutex poisoned");
        guard.insert(posting.id, posting);
        Ok(())
    }

    fn remove_posting(&self, id: PostingId) -> Result<Posting, RepositoryError> {
        let mut guard = self.postings.lock().expect("repository mutex poisoned");
        guard.remove(&id).ok_or(RepositoryError::NotFound)
    }

    fn fetch_posting(&self, id: PostingId) -> Result<Option<Posting>, RepositoryError> {
        let guard = self.postings.lock().expect("repository mutex poisoned");
        Ok(guard.get(&id).cloned())
    }

    fn postings(&self) -> Result<Vec<Posting>, RepositoryError> {
        let guard = self.postings.lock().expect("repository mutex poisoned");
        Ok(guard.values().cloned().collect())
    }

    fn candidates(&self) -> Result<Vec<Candidate>, RepositoryError> {
        Ok(self.candidates.clone())
    }
}

pub(super) struct UnavailableRepository;

impl RecruitingRepository for UnavailableRepository {
    fn insert_posting(&self, _posting: Posting) -> Result<Posting, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update_posting(&self, _posting: Posting) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn remove_posting(&self, _id: PostingId) -> Result<Posting, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch_posting(&self, _id: PostingId) -> Result<Option<Posting>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn postings(&self) -> Result<Vec<Posting>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn candidates(&self) -> Result<Vec<Candidate>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

#[derive(Default)]
pub(super) struct MemoryNotifications {
    events: Mutex<Vec<Notification>>,
}

impl MemoryNotifications {
    pub(super) fn events(&self) -> Vec<Notification> {
        self.events
            .lock()
            .expect("notification mutex poisoned")
            .clone()
    }
}

impl NotificationPublisher for MemoryNotifications {
    fn publish(&self, notification: Notification) -> Result<(), NotificationError> {
        self.events
            .lock()
            .expect("notification mutex poisoned")
            .push(notification);
        Ok(())
    }
}

/// Scores a document by how many reference words it shares with a fixed vocabulary.
pub(super) struct KeywordScorer {
    pub(super) vocabulary: Vec<&'static str>,
    pub(super) calls: Mutex<Vec<String>>,
}

impl KeywordScorer {
    pub(super) fn new(vocabulary: Vec<&'static str>) -> Self {
        Self {
            vocabulary,
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl DocumentScorer for KeywordScorer {
    fn score(
        &self,
        _document: &Path,
        reference_text: &str,
    ) -> Result<DocumentScore, DocumentScorerError> {
        self.calls
            .lock()
            .expect("scorer mutex poisoned")
            .push(reference_text.to_string());

        let matches: Vec<String> = self
            .vocabulary
            .iter()
            .filter(|word| reference_text.contains(*word))
            .map(|word| word.to_string())
            .collect();
        let score = 100.0 * matches.len() as f64 / self.vocabulary.len().max(1) as f64;

        Ok(DocumentScore {
            score,
            matches,
            message: "ok".to_string(),
        })
    }
}

/// Rejects every document after the first call.
pub(super) struct FlakyScorer {
    pub(super) calls: Mutex<usize>,
}

impl DocumentScorer for FlakyScorer {
    fn score(
        &self,
        _document: &Path,
        _reference_text: &str,
    ) -> Result<DocumentScore, DocumentScorerError> {
        let mut calls = self.calls.lock().expect("scorer mutex poisoned");
        *calls += 1;
        if *calls > 1 {
            return Err(DocumentScorerError::Rejected("unreadable pdf".to_string()));
        }
        Ok(DocumentScore {
            score: 42.0,
            matches: Vec::new(),
            message: "ok".to_string(),
        })
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
