use std::path::Path;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use chrono::Local;
use tracing::{debug, info, warn};

use super::cv::{reference_text, CvMatch, DocumentScorer, DocumentScorerError};
use super::domain::{Posting, PostingDraft, PostingId, ScoringConfigError, ScoringParameters};
use super::matching::{MatchReport, MatchingEngine};
use super::repository::{
    Notification, NotificationError, NotificationPublisher, RecruitingRepository, RepositoryError,
};
use crate::config::MatchingConfig;

static POSTING_SEQUENCE: AtomicU32 = AtomicU32::new(1);

fn next_posting_id() -> PostingId {
    PostingId(POSTING_SEQUENCE.fetch_add(1, Ordering::Relaxed))
}

/// Service composing the repository, notification feed, and matching engine.
pub struct RecruitingService<R, N> {
    repository: Arc<R>,
    notifications: Arc<N>,
    engine: Arc<MatchingEngine>,
    document_scorer: Option<Arc<dyn DocumentScorer>>,
}

impl<R, N> RecruitingService<R, N>
where
    R: RecruitingRepository + 'static,
    N: NotificationPublisher + 'static,
{
    pub fn new(repository: Arc<R>, notifications: Arc<N>, config: MatchingConfig) -> Self {
        Self {
            repository,
            notifications,
            engine: Arc::new(MatchingEngine::new(config)),
            document_scorer: None,
        }
    }

    pub fn with_document_scorer(mut self, scorer: Arc<dyn DocumentScorer>) -> Self {
        self.document_scorer = Some(scorer);
        self
    }

    pub fn engine(&self) -> &MatchingEngine {
        &self.engine
    }

    /// Open a posting; scoring parameters are materialized with defaults when omitted.
    pub fn open_posting(&self, draft: PostingDraft) -> Result<Posting, RecruitingServiceError> {
        if let Some(scoring) = &draft.scoring {
            scoring.validate()?;
        }

        let posting = draft.into_posting(next_posting_id(), Local::now().naive_local());
        let stored = self.repository.insert_posting(posting)?;

        self.notifications
            .publish(Notification::posting_opened(&stored))?;
        info!(posting_id = stored.id.0, title = %stored.title, "posting opened");

        Ok(stored)
    }

    /// Replace a posting's scoring parameters.
    pub fn configure_scoring(
        &self,
        posting_id: PostingId,
        parameters: ScoringParameters,
    ) -> Result<Posting, RecruitingServiceError> {
        parameters.validate()?;

        let mut posting = self
            .repository
            .fetch_posting(posting_id)?
            .ok_or(RepositoryError::NotFound)?;
        posting.scoring = Some(parameters);

        self.repository.update_posting(posting.clone())?;
        debug!(posting_id = posting_id.0, "scoring parameters updated");

        Ok(posting)
    }

    /// Withdraw a posting and announce it on the feed.
    pub fn close_posting(&self, posting_id: PostingId) -> Result<Posting, RecruitingServiceError> {
        let removed = self.repository.remove_posting(posting_id)?;
        self.notifications
            .publish(Notification::posting_closed(&removed))?;
        info!(posting_id = posting_id.0, title = %removed.title, "posting closed");
        Ok(removed)
    }

    /// Rank the whole candidate pool against a posting and publish a summary.
    ///
    /// The strong-match count covers the full ranking; `limit` only truncates the
    /// returned results and defaults to the configured top N.
    pub fn rank_candidates(
        &self,
        posting_id: PostingId,
        limit: Option<usize>,
    ) -> Result<MatchReport, RecruitingServiceError> {
        let posting = self
            .repository
            .fetch_posting(posting_id)?
            .ok_or(RepositoryError::NotFound)?;
        let pool = self.repository.candidates()?;

        let mut results = self.engine.rank(&posting, &pool);
        let strong_matches = self.engine.strong_matches(&results);
        let evaluated = results.len();
        results.truncate(limit.unwrap_or(self.engine.config().top_n));

        self.notifications
            .publish(Notification::matching_completed(&posting, strong_matches))?;
        info!(
            posting_id = posting_id.0,
            evaluated, strong_matches, "candidate ranking completed"
        );

        Ok(MatchReport {
            posting_id,
            posting_title: posting.title,
            evaluated,
            strong_matches,
            results,
        })
    }

    /// Score a CV document against every posting, best first.
    ///
    /// Any scorer failure aborts the run.
    pub fn score_cv(
        &self,
        document: &Path,
        limit: usize,
    ) -> Result<Vec<CvMatch>, RecruitingServiceError> {
        let scorer = self
            .document_scorer
            .as_ref()
            .ok_or(RecruitingServiceError::ScorerUnavailable)?;

        let postings = self.repository.postings()?;
        if postings.is_empty() {
            return Err(RecruitingServiceError::NoPostings);
        }

        let mut matches = Vec::with_capacity(postings.len());
        for posting in postings {
            let verdict = scorer
                .score(document, &reference_text(&posting))
                .map_err(|err| {
                    warn!(posting_id = posting.id.0, error = %err, "cv scoring failed");
                    err
                })?;

            matches.push(CvMatch {
                posting_id: posting.id,
                posting_title: posting.title,
                score: verdict.score,
                message: verdict.message,
                keywords: verdict.matches,
            });
        }

        matches.sort_by(|left, right| right.score.total_cmp(&left.score));
        matches.truncate(limit);
        Ok(matches)
    }

    /// Fetch a posting for API responses.
    pub fn posting(&self, posting_id: PostingId) -> Result<Posting, RecruitingServiceError> {
        let posting = self
            .repository
            .fetch_posting(posting_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(posting)
    }
}

/// Error raised by the recruiting service.
#[derive(Debug, thiserror::Error)]
pub enum RecruitingServiceError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Notification(#[from] NotificationError),
    #[error(transparent)]
    Scoring(#[from] ScoringConfigError),
    #[error(transparent)]
    DocumentScorer(#[from] DocumentScorerError),
    #[error("no postings available to compare against")]
    NoPostings,
    #[error("no document scorer configured")]
    ScorerUnavailable,
}
