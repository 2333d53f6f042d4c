//! In-process repository with injectable failures and latency

use std::collections::{HashSet, VecDeque};
use std::time::Duration;

use parking_lot::{Mutex, RwLock};

use super::AssessmentRepository;
use crate::error::{BoardError, Result};
use crate::types::{Assessment, AssessmentId, AssessmentUpdate};

#[derive(Debug, Default)]
struct UpdateBehavior {
    failing: HashSet<AssessmentId>,
    delays: VecDeque<Duration>,
    default_delay: Option<Duration>,
    fetch_delay: Option<Duration>,
    fail_fetches: bool,
}

/// Repository backed by a vector in memory
#[derive(Debug, Default)]
pub struct MemoryRepository {
    records: RwLock<Vec<Assessment>>,
    behavior: Mutex<UpdateBehavior>,
    calls: Mutex<Vec<(AssessmentId, AssessmentUpdate)>>,
}

impl MemoryRepository {
    pub fn new(records: Vec<Assessment>) -> Self {
        Self {
            records: RwLock::new(records),
            ..Default::default()
        }
    }

    /// Make every update for `id` fail until [`clear_failures`](Self::clear_failures)
    pub fn fail_updates_for(&self, id: impl Into<AssessmentId>) {
        self.behavior.lock().failing.insert(id.into());
    }

    pub fn clear_failures(&self) {
        let mut behavior = self.behavior.lock();
        behavior.failing.clear();
        behavior.fail_fetches = false;
    }

    /// Make fetches fail
    pub fn fail_fetches(&self) {
        self.behavior.lock().fail_fetches = true;
    }

    /// Delay applied to the next update call only (queued, FIFO)
    pub fn push_update_delay(&self, delay: Duration) {
        self.behavior.lock().delays.push_back(delay);
    }

    /// Delay applied to every update call without a queued delay
    pub fn set_update_delay(&self, delay: Option<Duration>) {
        self.behavior.lock().default_delay = delay;
    }

    /// Delay every fetch; the records are read before the delay starts
    pub fn set_fetch_delay(&self, delay: Option<Duration>) {
        self.behavior.lock().fetch_delay = delay;
    }

    /// Every update call received so far, in call order
    pub fn update_calls(&self) -> Vec<(AssessmentId, AssessmentUpdate)> {
        self.calls.lock().clone()
    }

    /// Snapshot of a single stored record
    pub fn get(&self, id: &AssessmentId) -> Option<Assessment> {
        self.records.read().iter().find(|a| &a.id == id).cloned()
    }
}

#[async_trait::async_trait]
impl AssessmentRepository for MemoryRepository {
    async fn fetch_assessments(&self) -> Result<Vec<Assessment>> {
        let (fail, delay) = {
            let behavior = self.behavior.lock();
            (behavior.fail_fetches, behavior.fetch_delay)
        };
        if fail {
            return Err(BoardError::Other("assessment service unavailable".to_string()));
        }
        let snapshot = self.records.read().clone();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        Ok(snapshot)
    }

    async fn update_assessment(&self, id: &AssessmentId, update: AssessmentUpdate) -> Result<()> {
        self.calls.lock().push((id.clone(), update.clone()));

        let (delay, should_fail) = {
            let mut behavior = self.behavior.lock();
            let delay = behavior.delays.pop_front().or(behavior.default_delay);
            (delay, behavior.failing.contains(id))
        };

        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if should_fail {
            return Err(BoardError::UpdateRejected {
                id: id.to_string(),
                reason: "rejected by repository".to_string(),
            });
        }

        let mut records = self.records.write();
        let record = records
            .iter_mut()
            .find(|a| &a.id == id)
            .ok_or_else(|| BoardError::AssessmentNotFound(id.to_string()))?;
        update.apply_to(record);
        Ok(())
    }
}
