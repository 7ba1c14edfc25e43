//! ReconcileCohortHandler - Command handler bringing stored status in line with dates.
//!
//! Compare-before-write: a cohort whose stored status is already correct
//! is not written, so running this twice performs at most one update.

use std::sync::Arc;

use tracing::info;

use crate::domain::cohort::{Cohort, CohortError, CohortLifecycleManager, Reconciliation};
use crate::domain::foundation::CohortId;
use crate::ports::CohortRepository;

#[derive(Debug, Clone)]
pub struct ReconcileCohortCommand {
    pub cohort_id: CohortId,
}

#[derive(Debug, Clone)]
pub struct ReconcileCohortResult {
    /// The cohort as it is stored after reconciliation.
    pub cohort: Cohort,
    pub outcome: Reconciliation,
}

pub struct ReconcileCohortHandler {
    repository: Arc<dyn CohortRepository>,
    lifecycle: Arc<CohortLifecycleManager>,
}

impl ReconcileCohortHandler {
    pub fn new(repository: Arc<dyn CohortRepository>, lifecycle: Arc<CohortLifecycleManager>) -> Self {
        Self {
            repository,
            lifecycle,
        }
    }

    pub async fn handle(&self, cmd: ReconcileCohortCommand) -> Result<ReconcileCohortResult, CohortError> {
        let cohort = self
            .repository
            .find_by_id(&cmd.cohort_id)
            .await?
            .ok_or(CohortError::NotFound(cmd.cohort_id))?;

        let (cohort, outcome) =
            reconcile_and_persist(self.repository.as_ref(), &self.lifecycle, cohort).await?;
        Ok(ReconcileCohortResult { cohort, outcome })
    }
}

/// Reconciles a loaded cohort and writes the status if it changed.
pub(super) async fn reconcile_and_persist(
    repository: &dyn CohortRepository,
    lifecycle: &CohortLifecycleManager,
    mut cohort: Cohort,
) -> Result<(Cohort, Reconciliation), CohortError> {
    let outcome = lifecycle.reconcile(&mut cohort)?;

    if let Reconciliation::Transitioned { from, to } = outcome {
        repository
            .update_status(&cohort.id, cohort.status, cohort.updated_at)
            .await?;
        info!(
            cohort_id = %cohort.id,
            from = %from,
            to = %to,
            "Cohort status reconciled"
        );
    }
    Ok((cohort, outcome))
}
