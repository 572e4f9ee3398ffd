use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::domain::{Candidate, Posting, PostingId};

/// Storage abstraction over postings and the candidate pool.
pub trait RecruitingRepository: Send + Sync {
    fn insert_posting(&self, posting: Posting) -> Result<Posting, RepositoryError>;
    fn update_posting(&self, posting: Posting) -> Result<(), RepositoryError>;
    fn remove_posting(&self, id: PostingId) -> Result<Posting, RepositoryError>;
    fn fetch_posting(&self, id: PostingId) -> Result<Option<Posting>, RepositoryError>;
    fn postings(&self) -> Result<Vec<Posting>, RepositoryError>;
    fn candidates(&self) -> Result<Vec<Candidate>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Outbound hook for the notification feed.
pub trait NotificationPublisher: Send + Sync {
    fn publish(&self, notification: Notification) -> Result<(), NotificationError>;
}

/// Feed entry shown to recruiters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Assigned by the feed on publish; 0 until then.
    #[serde(default)]
    pub id: u64,
    pub title: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    pub icon: String,
    pub color: String,
    pub read: bool,
    pub created_at: NaiveDateTime,
}

impl Notification {
    pub fn new(
        title: impl Into<String>,
        message: impl Into<String>,
        icon: impl Into<String>,
        color: impl Into<String>,
        link: Option<String>,
    ) -> Self {
        Self {
            id: 0,
            title: title.into(),
            message: message.into(),
            link,
            icon: icon.into(),
            color: color.into(),
            read: false,
            created_at: Local::now().naive_local(),
        }
    }

    pub fn posting_opened(posting: &Posting) -> Self {
        Self::new(
            "New posting",
            format!("The position '{}' has been opened.", posting.title),
            "fas fa-briefcase",
            "text-primary",
            Some(posting_link(posting.id)),
        )
    }

    pub fn posting_closed(posting: &Posting) -> Self {
        Self::new(
            "Posting closed",
            format!("The position '{}' has been withdrawn.", posting.title),
            "fas fa-trash",
            "text-danger",
            None,
        )
    }

    pub fn matching_completed(posting: &Posting, strong_matches: usize) -> Self {
        let noun = if strong_matches == 1 { "match" } else { "matches" };
        Self::new(
            "Matching complete",
            format!(
                "{strong_matches} strong {noun} for '{}'.",
                posting.title
            ),
            "fas fa-chart-line",
            if strong_matches > 0 {
                "text-success"
            } else {
                "text-warning"
            },
            Some(posting_link(posting.id)),
        )
    }
}

fn posting_link(id: PostingId) -> String {
    format!("/postings/{}", id.0)
}

/// Notification dispatch error.
#[derive(Debug, thiserror::Error)]
pub enum NotificationError {
    #[error("notification transport unavailable: {0}")]
    Transport(String),
}
