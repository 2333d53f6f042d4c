//! Assessment Kanban board engine
//!
//! [`Board`] ties the pieces together: it holds the records loaded from the
//! repository, the search and filter inputs, the drag controller and the
//! transition committer, and derives the view model on demand.

pub mod columns;
pub mod commit;
pub mod detail;
pub mod drag;
pub mod filter;
pub mod model;
pub mod notify;
pub mod stats;

use std::sync::Arc;

use jiff::civil::DateTime;

pub use columns::{COLUMN_COUNT, COLUMNS, Column, ColumnBuckets, column_for, group_by_column};
pub use commit::{CommitOutcome, OptimisticOverlay, PendingCommit, TransitionCommitter};
pub use detail::AssessmentDetail;
pub use drag::{
    ColumnGeometry, DragController, DragPhase, DragSession, DropOutcome, Point, Rect,
    TransitionIntent, compute_drop_target, layout_columns,
};
pub use filter::{SelectedFilter, filter_assessments};
pub use model::{BoardViewModel, CardViewModel, ColumnViewModel, compute_board_view_model};
pub use notify::{Notification, NotificationVariant, Notifier, ToastQueue};
pub use stats::{BoardStats, ColumnStats};

use crate::config::BoardConfig;
use crate::error::{BoardError, Result};
use crate::repository::AssessmentRepository;
use crate::types::{Assessment, AssessmentId, AssessmentStatus};

type DetailHandler = Box<dyn Fn(&AssessmentDetail) + Send + Sync>;

/// What a release produced
pub struct DropResult {
    pub outcome: DropOutcome,
    /// Persistence of a moved card; await it (or spawn it) to learn the result
    pub commit: Option<PendingCommit>,
}

/// The board engine
pub struct Board {
    repository: Arc<dyn AssessmentRepository>,
    notifier: Arc<dyn Notifier>,
    committer: TransitionCommitter,
    drag: DragController,
    records: Vec<Assessment>,
    search_term: String,
    filter: SelectedFilter,
    detail_handler: Option<DetailHandler>,
}

impl Board {
    pub fn new(
        repository: Arc<dyn AssessmentRepository>,
        notifier: Arc<dyn Notifier>,
        config: &BoardConfig,
    ) -> Self {
        let committer = TransitionCommitter::new(Arc::clone(&repository), Arc::clone(&notifier))
            .with_timeout(config.commit_timeout());
        Self {
            repository,
            notifier,
            committer,
            drag: DragController::new(config.activation_distance),
            records: Vec::new(),
            search_term: String::new(),
            filter: SelectedFilter::All,
            detail_handler: None,
        }
    }

    /// Reload every record from the repository.
    ///
    /// On failure the previously loaded records stay in place and an error
    /// notification is raised.
    pub async fn refresh(&mut self) -> Result<()> {
        let generation = self.committer.overlay().generation();
        match self.repository.fetch_assessments().await {
            Ok(records) => {
                self.committer.overlay().reconcile(&records, generation);
                self.committer.overlay().take_refetch_request();
                tracing::debug!("loaded {} assessments", records.len());
                self.records = records;
                Ok(())
            }
            Err(e) => {
                tracing::warn!("failed to fetch assessments: {}", e);
                self.notifier.notify(Notification::error(
                    "Failed to load assessments",
                    e.to_string(),
                ));
                Err(e)
            }
        }
    }

    /// Whether a timed-out update asked for a refetch; clears the request
    pub fn needs_refetch(&self) -> bool {
        self.committer.overlay().take_refetch_request()
    }

    /// Records as last fetched, without optimistic placements
    pub fn assessments(&self) -> &[Assessment] {
        &self.records
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    pub fn filter(&self) -> &SelectedFilter {
        &self.filter
    }

    pub fn set_filter(&mut self, filter: impl Into<SelectedFilter>) {
        self.filter = filter.into();
    }

    pub fn committer(&self) -> &TransitionCommitter {
        &self.committer
    }

    pub fn overlay(&self) -> &OptimisticOverlay {
        self.committer.overlay()
    }

    /// Compute the board as it should be rendered right now
    pub fn view(&self, now: DateTime) -> BoardViewModel {
        compute_board_view_model(
            &self.records,
            &self.search_term,
            &self.filter,
            self.committer.overlay(),
            self.drag.session(),
            now,
        )
    }

    pub fn stats(&self, now: DateTime) -> BoardStats {
        self.view(now).stats
    }

    fn find(&self, id: &AssessmentId) -> Result<&Assessment> {
        self.records
            .iter()
            .find(|a| &a.id == id)
            .ok_or_else(|| BoardError::AssessmentNotFound(id.to_string()))
    }

    /// Column the assessment is currently shown in, optimistic placement included
    pub fn effective_status(&self, id: &AssessmentId) -> Result<AssessmentStatus> {
        let record = self.find(id)?;
        if let Some(status) = self.committer.overlay().status_of(id) {
            return Ok(status);
        }
        record
            .known_status()
            .ok_or_else(|| BoardError::InvalidStatus(record.status.to_string()))
    }

    pub fn drag_phase(&self) -> &DragPhase {
        self.drag.phase()
    }

    pub fn drag_session(&self) -> Option<&DragSession> {
        self.drag.session()
    }

    /// Pointer pressed on a card
    pub fn press(&mut self, id: &AssessmentId, point: Point) -> Result<()> {
        let origin = self.effective_status(id)?;
        self.drag.press(id.clone(), origin, point)
    }

    /// Keyboard pick-up of a card
    pub fn pick_up(&mut self, id: &AssessmentId, point: Point) -> Result<()> {
        let origin = self.effective_status(id)?;
        self.drag.pick_up(id.clone(), origin, point)
    }

    /// Pointer or focus moved over the rendered columns
    pub fn move_to(&mut self, point: Point, columns: &[ColumnGeometry]) -> Option<AssessmentStatus> {
        self.drag.move_to(point, columns)
    }

    /// Pointer released or keyboard drop.
    ///
    /// A drop on another column is committed at once; a click opens the
    /// detail view. The controller is idle again when this returns.
    pub fn release(&mut self) -> Result<DropResult> {
        let outcome = self.drag.release()?;
        let commit = outcome
            .intent()
            .cloned()
            .map(|intent| self.committer.commit(intent));
        self.drag.settle();

        if let DropOutcome::Click(id) = &outcome
            && let Err(e) = self.open_detail(id)
        {
            tracing::debug!("click on {} opened nothing: {}", id, e);
        }

        Ok(DropResult { outcome, commit })
    }

    /// Escape pressed
    pub fn cancel(&mut self) -> Option<DropOutcome> {
        let outcome = self.drag.cancel();
        self.drag.settle();
        outcome
    }

    /// Register the callback invoked when a card's detail is opened
    pub fn on_open_detail<F>(&mut self, handler: F)
    where
        F: Fn(&AssessmentDetail) + Send + Sync + 'static,
    {
        self.detail_handler = Some(Box::new(handler));
    }

    /// Open the detail view for an assessment
    pub fn open_detail(&self, id: &AssessmentId) -> Result<AssessmentDetail> {
        let record = self.find(id)?;
        let mut detail = AssessmentDetail::from(record);
        if let Ok(status) = self.effective_status(id) {
            detail.status = column_for(status).title.to_string();
        }
        if let Some(handler) = &self.detail_handler {
            handler(&detail);
        }
        Ok(detail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::columns::column_index;
    use crate::repository::MemoryRepository;
    use parking_lot::Mutex;

    fn now() -> DateTime {
        jiff::civil::date(2025, 5, 1).at(12, 0, 0, 0)
    }

    async fn board_with(records: Vec<Assessment>) -> (Board, Arc<MemoryRepository>, Arc<ToastQueue>) {
        let repo = Arc::new(MemoryRepository::new(records));
        let toasts = Arc::new(ToastQueue::new());
        let mut board = Board::new(repo.clone(), toasts.clone(), &BoardConfig::default());
        board.refresh().await.unwrap();
        (board, repo, toasts)
    }

    fn center(columns: &[ColumnGeometry], status: AssessmentStatus) -> Point {
        columns[column_index(status)].rect.center()
    }

    #[tokio::test]
    async fn test_keyboard_move_commits() {
        let (mut board, repo, toasts) =
            board_with(vec![Assessment::new("a-1", "SOC 2", AssessmentStatus::Draft)]).await;
        let columns = layout_columns(100.0, 400.0, 10.0);
        let id = AssessmentId::new("a-1");

        board
            .pick_up(&id, center(&columns, AssessmentStatus::Draft))
            .unwrap();
        board.move_to(center(&columns, AssessmentStatus::Sent), &columns);
        let result = board.release().unwrap();

        // Optimistically placed before the update finishes
        let vm = board.view(now());
        assert_eq!(vm.column_of(&id).map(|c| c.id), Some(AssessmentStatus::Sent));
        assert!(board.drag_phase() == &DragPhase::Idle);

        let outcome = result.commit.unwrap().await;
        assert_eq!(outcome, CommitOutcome::Confirmed);
        assert_eq!(
            repo.get(&id).unwrap().known_status(),
            Some(AssessmentStatus::Sent)
        );
        assert_eq!(toasts.latest().unwrap().description, "Moved to Sent");
    }

    #[tokio::test]
    async fn test_press_on_unknown_assessment_fails() {
        let (mut board, _, _) = board_with(vec![]).await;
        let err = board
            .press(&AssessmentId::new("missing"), Point::default())
            .unwrap_err();
        assert!(matches!(err, BoardError::AssessmentNotFound(_)));
    }

    #[tokio::test]
    async fn test_click_opens_detail() {
        let (mut board, _, _) =
            board_with(vec![Assessment::new("a-1", "SOC 2", AssessmentStatus::Completed)]).await;
        let opened = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&opened);
        board.on_open_detail(move |detail| sink.lock().push(detail.id.clone()));

        board
            .press(&AssessmentId::new("a-1"), Point::new(10.0, 10.0))
            .unwrap();
        let result = board.release().unwrap();

        assert!(matches!(result.outcome, DropOutcome::Click(_)));
        assert!(result.commit.is_none());
        assert_eq!(opened.lock().as_slice(), &[AssessmentId::new("a-1")]);
    }

    #[tokio::test]
    async fn test_refresh_failure_keeps_records() {
        let (mut board, repo, toasts) =
            board_with(vec![Assessment::new("a-1", "SOC 2", AssessmentStatus::Draft)]).await;
        repo.fail_fetches();

        assert!(board.refresh().await.is_err());
        assert_eq!(board.assessments().len(), 1);
        assert!(toasts.latest().unwrap().is_error());
    }

    #[tokio::test]
    async fn test_cancel_reverts_preview() {
        let (mut board, _, _) =
            board_with(vec![Assessment::new("a-1", "SOC 2", AssessmentStatus::Draft)]).await;
        let columns = layout_columns(100.0, 400.0, 10.0);
        let id = AssessmentId::new("a-1");

        board
            .pick_up(&id, center(&columns, AssessmentStatus::Draft))
            .unwrap();
        board.move_to(center(&columns, AssessmentStatus::Expired), &columns);
        assert_eq!(
            board.view(now()).column_of(&id).map(|c| c.id),
            Some(AssessmentStatus::Expired)
        );

        assert_eq!(board.cancel(), Some(DropOutcome::Cancelled(id.clone())));
        assert_eq!(
            board.view(now()).column_of(&id).map(|c| c.id),
            Some(AssessmentStatus::Draft)
        );
        assert!(board.overlay().is_empty());
    }
}
