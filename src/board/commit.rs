//! Transition commit protocol
//!
//! A committed drop is shown in its destination column immediately by
//! recording an optimistic placement in the [`OptimisticOverlay`]. The
//! repository update runs afterwards; its outcome is reported through the
//! [`Notifier`] and never propagates as an error.
//!
//! Every placement carries a monotonic stamp. When two moves of the same
//! assessment overlap, only the response for the most recently issued move
//! is acted on; older responses are discarded as superseded.
//!
//! Settling also bumps a settle generation. A refresh reads the generation
//! before it fetches, and only placements settled before that point are
//! dropped when the fetched records arrive.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use dashmap::DashMap;
use futures::FutureExt;
use futures::future::BoxFuture;

use super::columns::column_for;
use super::drag::TransitionIntent;
use super::notify::{Notification, Notifier};
use crate::repository::AssessmentRepository;
use crate::types::{Assessment, AssessmentId, AssessmentStatus, AssessmentUpdate, StatusValue};

/// Lifecycle of an optimistic placement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementState {
    /// Update call outstanding
    InFlight,
    /// Update call finished (either way); dropped by the next refresh that
    /// started after it settled
    Settled,
}

/// A client-side status override
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub status: AssessmentStatus,
    pub stamp: u64,
    pub state: PlacementState,
    /// Settle generation at which the placement settled, 0 while in flight
    pub settled_at: u64,
}

/// Optimistic status overrides keyed by assessment
#[derive(Debug, Default)]
pub struct OptimisticOverlay {
    placements: DashMap<AssessmentId, Placement>,
    next_stamp: AtomicU64,
    settle_seq: AtomicU64,
    refetch_requested: AtomicBool,
}

impl OptimisticOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new in-flight placement and return its stamp
    pub fn place(&self, id: &AssessmentId, status: AssessmentStatus) -> u64 {
        let stamp = self.next_stamp.fetch_add(1, Ordering::SeqCst) + 1;
        self.placements.insert(
            id.clone(),
            Placement {
                status,
                stamp,
                state: PlacementState::InFlight,
                settled_at: 0,
            },
        );
        stamp
    }

    pub fn get(&self, id: &AssessmentId) -> Option<Placement> {
        self.placements.get(id).map(|p| *p)
    }

    /// Overridden status for an assessment, if any
    pub fn status_of(&self, id: &AssessmentId) -> Option<AssessmentStatus> {
        self.get(id).map(|p| p.status)
    }

    pub fn is_in_flight(&self, id: &AssessmentId) -> bool {
        self.get(id)
            .is_some_and(|p| p.state == PlacementState::InFlight)
    }

    /// Mark the placement settled if `stamp` is still the latest for `id`.
    ///
    /// Returns `false` when a newer placement has replaced it (or the entry is
    /// gone), meaning the caller's response is stale.
    pub fn settle_if_latest(&self, id: &AssessmentId, stamp: u64) -> bool {
        match self.placements.get_mut(id) {
            Some(mut placement) if placement.stamp == stamp => {
                placement.state = PlacementState::Settled;
                placement.settled_at = self.settle_seq.fetch_add(1, Ordering::SeqCst) + 1;
                true
            }
            _ => false,
        }
    }

    /// Current settle generation; read it before fetching and pass it to
    /// [`reconcile`](Self::reconcile)
    pub fn generation(&self) -> u64 {
        self.settle_seq.load(Ordering::SeqCst)
    }

    /// Records with every placement applied
    pub fn apply(&self, records: &[Assessment]) -> Vec<Assessment> {
        records
            .iter()
            .map(|record| match self.status_of(&record.id) {
                Some(status) => Assessment {
                    status: StatusValue::Known(status),
                    ..record.clone()
                },
                None => record.clone(),
            })
            .collect()
    }

    /// Drop placements that no longer need to override freshly fetched data.
    ///
    /// `since` is the [`generation`](Self::generation) read before the fetch
    /// started. Placements settled at or before it are removed so the fetched
    /// status shows through. Placements still in flight, or settled after
    /// it, may be newer than the fetched data and stay unless their record
    /// has disappeared. Returns the number of placements removed.
    pub fn reconcile(&self, fetched: &[Assessment], since: u64) -> usize {
        let before = self.placements.len();
        self.placements.retain(|id, placement| {
            let newer_than_fetch =
                placement.state == PlacementState::InFlight || placement.settled_at > since;
            newer_than_fetch && fetched.iter().any(|a| &a.id == id)
        });
        let removed = before - self.placements.len();
        if removed > 0 {
            tracing::debug!("reconciled {} optimistic placement(s)", removed);
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    pub fn request_refetch(&self) {
        self.refetch_requested.store(true, Ordering::SeqCst);
    }

    /// Whether a forced refetch was requested; clears the request
    pub fn take_refetch_request(&self) -> bool {
        self.refetch_requested.swap(false, Ordering::SeqCst)
    }
}

/// Result of one commit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    /// The repository accepted the update
    Confirmed,
    /// The repository rejected the update
    Rejected(String),
    /// The update did not finish within the timeout
    TimedOut,
    /// A newer move of the same assessment was issued before this one finished
    Superseded,
}

/// Future that completes when the repository call for a commit finishes
pub type PendingCommit = BoxFuture<'static, CommitOutcome>;

/// Applies transition intents optimistically and persists them
#[derive(Clone)]
pub struct TransitionCommitter {
    repository: Arc<dyn AssessmentRepository>,
    notifier: Arc<dyn Notifier>,
    overlay: Arc<OptimisticOverlay>,
    timeout: Option<Duration>,
}

impl TransitionCommitter {
    pub fn new(repository: Arc<dyn AssessmentRepository>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            repository,
            notifier,
            overlay: Arc::new(OptimisticOverlay::new()),
            timeout: None,
        }
    }

    /// Bound each update call; `None` waits indefinitely
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn overlay(&self) -> &Arc<OptimisticOverlay> {
        &self.overlay
    }

    /// Place the assessment in its destination column and start persisting.
    ///
    /// The placement is visible as soon as this returns; the returned future
    /// performs the update call and reports the outcome.
    pub fn commit(&self, intent: TransitionIntent) -> PendingCommit {
        let stamp = self.overlay.place(&intent.assessment_id, intent.to_status);
        tracing::debug!(
            "optimistically moved {} {} -> {} (stamp {})",
            intent.assessment_id,
            intent.from_status,
            intent.to_status,
            stamp
        );

        let repository = Arc::clone(&self.repository);
        let notifier = Arc::clone(&self.notifier);
        let overlay = Arc::clone(&self.overlay);
        let timeout = self.timeout;

        async move {
            let update = repository.update_assessment(
                &intent.assessment_id,
                AssessmentUpdate::status(intent.to_status),
            );
            let result = match timeout {
                Some(limit) => tokio::time::timeout(limit, update).await.ok(),
                None => Some(update.await),
            };

            if !overlay.settle_if_latest(&intent.assessment_id, stamp) {
                tracing::debug!(
                    "discarding stale response for {} (stamp {})",
                    intent.assessment_id,
                    stamp
                );
                return CommitOutcome::Superseded;
            }

            let destination = column_for(intent.to_status).title;
            match result {
                Some(Ok(())) => {
                    tracing::info!(
                        "moved {} from {} to {}",
                        intent.assessment_id,
                        intent.from_status,
                        intent.to_status
                    );
                    notifier.notify(Notification::success(
                        "Assessment updated",
                        format!("Moved to {destination}"),
                    ));
                    CommitOutcome::Confirmed
                }
                Some(Err(e)) => {
                    tracing::warn!(
                        "failed to move {} to {}: {}",
                        intent.assessment_id,
                        intent.to_status,
                        e
                    );
                    notifier.notify(Notification::error(
                        "Update failed",
                        format!("Could not move assessment to {destination}: {e}"),
                    ));
                    CommitOutcome::Rejected(e.to_string())
                }
                None => {
                    tracing::warn!(
                        "update for {} timed out after {:?}",
                        intent.assessment_id,
                        timeout
                    );
                    overlay.request_refetch();
                    notifier.notify(Notification::error(
                        "Update timed out",
                        format!("Moving assessment to {destination} did not complete"),
                    ));
                    CommitOutcome::TimedOut
                }
            }
        }
        .boxed()
    }
}
