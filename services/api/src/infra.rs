use metrics_exporter_prometheus::PrometheusHandle;
use nexascore::workflows::recruiting::{
    Candidate, Notification, NotificationError, NotificationPublisher, Posting, PostingId,
    RecruitingRepository, RepositoryError,
};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) notifications: Arc<InMemoryNotificationCenter>,
}

fn poisoned<T>(_: PoisonError<T>) -> RepositoryError {
    RepositoryError::Unavailable("repository mutex poisoned".to_string())
}

/// Process-local store for postings and a fixed candidate pool.
#[derive(Default, Clone)]
pub(crate) struct InMemoryRecruitingRepository {
    postings: Arc<Mutex<BTreeMap<PostingId, Posting>>>,
    candidates: Arc<Vec<Candidate>>,
}

impl InMemoryRecruitingRepository {
    pub(crate) fn with_candidates(candidates: Vec<Candidate>) -> Self {
        Self {
            postings: Arc::default(),
            candidates: Arc::new(candidates),
        }
    }
}

impl RecruitingRepository for InMemoryRecruitingRepository {
    fn insert_posting(&self, posting: Posting) -> Result<Posting, RepositoryError> {
        let mut guard = self.postings.lock().map_err(poisoned)?;
        if guard.contains_key(&posting.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(posting.id, posting.clone());
        Ok(posting)
    }

    fn update_posting(&self, posting: Posting) -> Result<(), RepositoryError> {
        let mut guard = self.postings.lock().map_err(poisoned)?;
        match guard.get_mut(&posting.id) {
            Some(slot) => {
                *slot = posting;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn remove_posting(&self, id: PostingId) -> Result<Posting, RepositoryError> {
        let mut guard = self.postings.lock().map_err(poisoned)?;
        guard.remove(&id).ok_or(RepositoryError::NotFound)
    }

    fn fetch_posting(&self, id: PostingId) -> Result<Option<Posting>, RepositoryError> {
        let guard = self.postings.lock().map_err(poisoned)?;
        Ok(guard.get(&id).cloned())
    }

    fn postings(&self) -> Result<Vec<Posting>, RepositoryError> {
        let guard = self.postings.lock().map_err(poisoned)?;
        Ok(guard.values().cloned().collect())
    }

    fn candidates(&self) -> Result<Vec<Candidate>, RepositoryError> {
        Ok(self.candidates.as_ref().clone())
    }
}

/// Notification feed kept in memory, oldest entry first.
#[derive(Default)]
pub(crate) struct InMemoryNotificationCenter {
    events: Mutex<Vec<Notification>>,
    next_id: AtomicU64,
}

impl InMemoryNotificationCenter {
    /// Entries newest first.
    pub(crate) fn list(&self) -> Vec<Notification> {
        let guard = self.events.lock().unwrap_or_else(PoisonError::into_inner);
        guard.iter().rev().cloned().collect()
    }

    pub(crate) fn unread(&self) -> usize {
        let guard = self.events.lock().unwrap_or_else(PoisonError::into_inner);
        guard.iter().filter(|event| !event.read).count()
    }

    /// Marks every entry read and returns how many changed.
    pub(crate) fn mark_all_read(&self) -> usize {
        let mut guard = self.events.lock().unwrap_or_else(PoisonError::into_inner);
        let mut marked = 0;
        for event in guard.iter_mut().filter(|event| !event.read) {
            event.read = true;
            marked += 1;
        }
        marked
    }

    /// Removes a single entry by id.
    pub(crate) fn remove(&self, id: u64) -> Option<Notification> {
        let mut guard = self.events.lock().unwrap_or_else(PoisonError::into_inner);
        let index = guard.iter().position(|event| event.id == id)?;
        Some(guard.remove(index))
    }

    /// Drops every entry and returns how many were removed.
    pub(crate) fn clear(&self) -> usize {
        let mut guard = self.events.lock().unwrap_or_else(PoisonError::into_inner);
        let cleared = guard.len();
        guard.clear();
        cleared
    }
}

impl NotificationPublisher for InMemoryNotificationCenter {
    fn publish(&self, mut notification: Notification) -> Result<(), NotificationError> {
        notification.id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        let mut guard = self
            .events
            .lock()
            .map_err(|_| NotificationError::Transport("notification mutex poisoned".to_string()))?;
        guard.push(notification);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notification(title: &str) -> Notification {
        Notification::new(title, "message", "fas fa-bell", "text-info", None)
    }

    #[test]
    fn notification_center_lists_newest_first() {
        let center = InMemoryNotificationCenter::default();
        center.publish(notification("first")).expect("published");
        center.publish(notification("second")).expect("published");

        let titles: Vec<String> = center.list().into_iter().map(|event| event.title).collect();
        assert_eq!(titles, vec!["second", "first"]);
        assert_eq!(center.unread(), 2);
    }

    #[test]
    fn mark_all_read_only_counts_unread_entries() {
        let center = InMemoryNotificationCenter::default();
        center.publish(notification("first")).expect("published");
        assert_eq!(center.mark_all_read(), 1);

        center.publish(notification("second")).expect("published");
        assert_eq!(center.mark_all_read(), 1);
        assert_eq!(center.unread(), 0);
        assert_eq!(center.clear(), 2);
        assert!(center.list().is_empty());
    }

    #[test]
    fn remove_deletes_only_the_matching_entry() {
        let center = InMemoryNotificationCenter::default();
        center.publish(notification("first")).expect("published");
        center.publish(notification("second")).expect("published");
        center.publish(notification("third")).expect("published");

        let ids: Vec<u64> = center.list().into_iter().map(|event| event.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);

        let removed = center.remove(2).expect("entry exists");
        assert_eq!(removed.title, "second");
        assert!(center.remove(2).is_none());

        let titles: Vec<String> = center.list().into_iter().map(|event| event.title).collect();
        assert_eq!(titles, vec!["third", "first"]);
        assert_eq!(center.unread(), 2);
    }

    #[test]
    fn update_requires_existing_posting() {
        let repository = InMemoryRecruitingRepository::default();
        let posting = crate::demo::seed_postings(&mut Default::default())
            .remove(0)
            .into_posting(PostingId(77), chrono::Local::now().naive_local());

        assert!(matches!(
            repository.update_posting(posting.clone()),
            Err(RepositoryError::NotFound)
        ));
        repository.insert_posting(posting.clone()).expect("inserted");
        assert!(matches!(
            repository.insert_posting(posting),
            Err(RepositoryError::Conflict)
        ));
    }
}
