//! In-memory implementation of LessonReleaseRepository.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::foundation::{CohortId, DomainError, ErrorCode, LessonId, Timestamp};
use crate::domain::schedule::LessonRelease;
use crate::ports::LessonReleaseRepository;

type ReleaseKey = (LessonId, CohortId);

#[derive(Debug, Default)]
pub struct InMemoryLessonReleaseRepository {
    releases: RwLock<HashMap<ReleaseKey, LessonRelease>>,
    corrupt: RwLock<HashSet<ReleaseKey>>,
    writes: AtomicUsize,
    unavailable: AtomicBool,
}

impl InMemoryLessonReleaseRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, lesson_id: &LessonId, cohort_id: &CohortId) -> Option<LessonRelease> {
        self.releases.read().await.get(&(*lesson_id, *cohort_id)).cloned()
    }

    // === Test Helpers ===

    /// Number of writes (`save` and effective `force_release`).
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Makes reads of the record fail as an undecodable release date.
    pub async fn mark_corrupt(&self, lesson_id: LessonId, cohort_id: CohortId) {
        self.corrupt.write().await.insert((lesson_id, cohort_id));
    }

    fn check_available(&self) -> Result<(), DomainError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(DomainError::store_unavailable("release schedule store is unavailable"));
        }
        Ok(())
    }
}

#[async_trait]
impl LessonReleaseRepository for InMemoryLessonReleaseRepository {
    async fn find(
        &self,
        lesson_id: &LessonId,
        cohort_id: &CohortId,
    ) -> Result<Option<LessonRelease>, DomainError> {
        self.check_available()?;
        let key = (*lesson_id, *cohort_id);
        if self.corrupt.read().await.contains(&key) {
            return Err(DomainError::malformed_date(
                "canonical_release_date",
                "stored release date is not decodable",
            )
            .with_detail("lesson_id", lesson_id.to_string()));
        }
        Ok(self.releases.read().await.get(&key).cloned())
    }

    async fn save(&self, release: &LessonRelease) -> Result<(), DomainError> {
        self.check_available()?;
        self.releases
            .write()
            .await
            .insert((release.lesson_id, release.cohort_id), release.clone());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn force_release(
        &self,
        lesson_id: &LessonId,
        cohort_id: &CohortId,
        released_at: Timestamp,
    ) -> Result<(), DomainError> {
        self.check_available()?;
        let mut releases = self.releases.write().await;
        let release = releases.get_mut(&(*lesson_id, *cohort_id)).ok_or_else(|| {
            DomainError::new(
                ErrorCode::LessonReleaseNotFound,
                format!("No release record for lesson {} in cohort {}", lesson_id, cohort_id),
            )
        })?;

        if release.force_release(released_at) {
            self.writes.fetch_add(1, Ordering::SeqCst);
        }
        Ok(())
    }
}
