//! Board view model
//!
//! Pure derivation of everything the board renders. Records pass through the
//! optimistic overlay and the drag preview first, then Filter → Group → Stats.

use jiff::civil::DateTime;

use super::columns::{COLUMNS, Column, group_by_column};
use super::commit::OptimisticOverlay;
use super::drag::DragSession;
use super::filter::{SelectedFilter, filter_assessments};
use super::stats::{BoardStats, ColumnStats};
use crate::types::{Assessment, AssessmentId, StatusValue};

/// Computed view of the whole board
#[derive(Debug, Clone)]
pub struct BoardViewModel {
    /// The seven columns in board order
    pub columns: Vec<ColumnViewModel>,
    pub stats: BoardStats,
    /// Records that passed search and filter
    pub total_filtered: usize,
    /// Filtered records whose status has no column
    pub unplaced: usize,
    /// Records loaded, before filtering
    pub total_all: usize,
    /// Card being dragged, if any
    pub active_assessment_id: Option<AssessmentId>,
}

impl BoardViewModel {
    /// Find the column a card is currently rendered in
    pub fn column_of(&self, id: &AssessmentId) -> Option<&'static Column> {
        self.columns
            .iter()
            .find(|c| c.cards.iter().any(|card| &card.assessment.id == id))
            .map(|c| c.column)
    }

    /// Cards placed in a column
    pub fn shown(&self) -> usize {
        self.stats.total()
    }

    pub fn card(&self, id: &AssessmentId) -> Option<&CardViewModel> {
        self.columns
            .iter()
            .flat_map(|c| c.cards.iter())
            .find(|card| &card.assessment.id == id)
    }
}

/// Computed view of one column
#[derive(Debug, Clone)]
pub struct ColumnViewModel {
    pub column: &'static Column,
    pub cards: Vec<CardViewModel>,
    pub stats: ColumnStats,
    /// The dragged card is currently over this column
    pub is_drop_target: bool,
}

/// Computed view of one card
#[derive(Debug, Clone)]
pub struct CardViewModel {
    pub assessment: Assessment,
    pub is_dragging: bool,
    /// Shown at an optimistic position whose update has not finished
    pub is_pending: bool,
}

/// Compute the board view model
pub fn compute_board_view_model(
    records: &[Assessment],
    search_term: &str,
    filter: &SelectedFilter,
    overlay: &OptimisticOverlay,
    session: Option<&DragSession>,
    now: DateTime,
) -> BoardViewModel {
    let mut effective = overlay.apply(records);

    // A card hovering over another column previews there until dropped
    if let Some(session) = session
        && let Some(over) = session.over
        && over != session.origin_column_id
        && let Some(dragged) = effective
            .iter_mut()
            .find(|a| a.id == session.active_assessment_id)
    {
        dragged.status = StatusValue::Known(over);
    }

    let filtered = filter_assessments(&effective, search_term, filter);
    let total_filtered = filtered.len();
    let buckets = group_by_column(filtered);
    let stats = BoardStats::compute(&buckets, now);
    let unplaced = total_filtered - stats.total();

    let active = session.map(|s| &s.active_assessment_id);
    let over = session.and_then(|s| s.over);

    let columns = COLUMNS
        .iter()
        .map(|column| ColumnViewModel {
            column,
            cards: buckets
                .get(column.id)
                .iter()
                .map(|assessment| CardViewModel {
                    assessment: (*assessment).clone(),
                    is_dragging: active == Some(&assessment.id),
                    is_pending: overlay.is_in_flight(&assessment.id),
                })
                .collect(),
            stats: stats.for_status(column.id),
            is_drop_target: over == Some(column.id),
        })
        .collect();

    BoardViewModel {
        columns,
        stats,
        total_filtered,
        unplaced,
        total_all: records.len(),
        active_assessment_id: active.cloned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::drag::Point;
    use crate::types::{AssessmentStatus, Priority};
    use jiff::civil::date;

    fn now() -> DateTime {
        date(2025, 3, 1).at(9, 0, 0, 0)
    }

    fn records() -> Vec<Assessment> {
        vec![
            Assessment {
                vendor_name: Some("Acme".to_string()),
                priority: Priority::Urgent,
                ..Assessment::new("a-1", "SOC 2", AssessmentStatus::Sent)
            },
            Assessment::new("a-2", "Pen test", AssessmentStatus::Draft),
            Assessment::new("a-3", "ISO 27001", AssessmentStatus::Sent),
        ]
    }

    fn session(id: &str, origin: AssessmentStatus, over: Option<AssessmentStatus>) -> DragSession {
        DragSession {
            active_assessment_id: AssessmentId::new(id),
            origin_column_id: origin,
            over,
            position: Point::default(),
        }
    }

    fn ids(vm: &BoardViewModel, status: AssessmentStatus) -> Vec<String> {
        vm.columns
            .iter()
            .find(|c| c.column.id == status)
            .map(|c| {
                c.cards
                    .iter()
                    .map(|card| card.assessment.id.to_string())
                    .collect()
            })
            .unwrap_or_default()
    }

    #[test]
    fn test_plain_view() {
        let overlay = OptimisticOverlay::new();
        let vm = compute_board_view_model(
            &records(),
            "",
            &SelectedFilter::All,
            &overlay,
            None,
            now(),
        );

        assert_eq!(vm.columns.len(), 7);
        assert_eq!(ids(&vm, AssessmentStatus::Sent), vec!["a-1", "a-3"]);
        assert_eq!(vm.total_filtered, 3);
        assert_eq!(vm.total_all, 3);
        assert_eq!(vm.shown(), vm.total_filtered);
        assert_eq!(vm.unplaced, 0);
        assert_eq!(vm.stats.for_status(AssessmentStatus::Sent).high_priority, 1);
        assert!(vm.columns.iter().all(|c| !c.is_drop_target));
    }

    #[test]
    fn test_search_narrows_columns() {
        let overlay = OptimisticOverlay::new();
        let vm = compute_board_view_model(
            &records(),
            "acme",
            &SelectedFilter::All,
            &overlay,
            None,
            now(),
        );
        assert_eq!(vm.total_filtered, 1);
        assert_eq!(ids(&vm, AssessmentStatus::Sent), vec!["a-1"]);
        assert!(ids(&vm, AssessmentStatus::Draft).is_empty());
    }

    #[test]
    fn test_drag_preview_moves_card() {
        let overlay = OptimisticOverlay::new();
        let drag = session("a-2", AssessmentStatus::Draft, Some(AssessmentStatus::Approved));
        let vm = compute_board_view_model(
            &records(),
            "",
            &SelectedFilter::All,
            &overlay,
            Some(&drag),
            now(),
        );

        assert_eq!(
            vm.column_of(&AssessmentId::new("a-2")).map(|c| c.id),
            Some(AssessmentStatus::Approved)
        );
        assert!(vm.card(&AssessmentId::new("a-2")).unwrap().is_dragging);
        let approved = &vm.columns[4];
        assert!(approved.is_drop_target);
        assert_eq!(approved.stats.total, 1);
    }

    #[test]
    fn test_drag_outside_keeps_origin() {
        let overlay = OptimisticOverlay::new();
        let drag = session("a-2", AssessmentStatus::Draft, None);
        let vm = compute_board_view_model(
            &records(),
            "",
            &SelectedFilter::All,
            &overlay,
            Some(&drag),
            now(),
        );
        assert_eq!(ids(&vm, AssessmentStatus::Draft), vec!["a-2"]);
    }

    #[test]
    fn test_overlay_placement_is_pending() {
        let overlay = OptimisticOverlay::new();
        overlay.place(&AssessmentId::new("a-3"), AssessmentStatus::Completed);
        let vm = compute_board_view_model(
            &records(),
            "",
            &SelectedFilter::All,
            &overlay,
            None,
            now(),
        );

        assert_eq!(ids(&vm, AssessmentStatus::Completed), vec!["a-3"]);
        assert_eq!(ids(&vm, AssessmentStatus::Sent), vec!["a-1"]);
        assert!(vm.card(&AssessmentId::new("a-3")).unwrap().is_pending);
        assert!(!vm.card(&AssessmentId::new("a-1")).unwrap().is_pending);
    }

    #[test]
    fn test_filter_applies_after_overlay() {
        let overlay = OptimisticOverlay::new();
        overlay.place(&AssessmentId::new("a-2"), AssessmentStatus::Sent);
        let vm = compute_board_view_model(
            &records(),
            "",
            &SelectedFilter::from("sent"),
            &overlay,
            None,
            now(),
        );
        assert_eq!(vm.total_filtered, 3);
    }

    #[test]
    fn test_unrecognized_status_counts_as_unplaced() {
        let overlay = OptimisticOverlay::new();
        let mut records = records();
        records.push(Assessment {
            status: StatusValue::Unknown("archived".to_string()),
            ..Assessment::new("a-4", "Legacy import", AssessmentStatus::Draft)
        });

        let vm = compute_board_view_model(
            &records,
            "",
            &SelectedFilter::All,
            &overlay,
            None,
            now(),
        );
        assert_eq!(vm.total_all, 4);
        assert_eq!(vm.total_filtered, 4);
        assert_eq!(vm.shown(), 3);
        assert_eq!(vm.unplaced, 1);
        assert!(vm.column_of(&AssessmentId::new("a-4")).is_none());
    }
}
