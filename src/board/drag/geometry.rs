//! Layout geometry and nearest-center drop target resolution
//!
//! Everything here is pure: the drag controller hands in a pointer (or
//! keyboard focus) position plus a snapshot of the rendered column and card
//! rectangles, and gets back the column the item would land in.

use crate::board::columns::COLUMNS;
use crate::types::{AssessmentId, AssessmentStatus};

/// A position in layout coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_squared(self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    pub fn distance(self, other: Point) -> f64 {
        self.distance_squared(other).sqrt()
    }
}

/// An axis-aligned rectangle (origin at top-left)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Edges are inclusive
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }

    /// Smallest rectangle covering both
    pub fn union(self, other: Rect) -> Rect {
        let left = self.x.min(other.x);
        let top = self.y.min(other.y);
        let right = (self.x + self.width).max(other.x + other.width);
        let bottom = (self.y + self.height).max(other.y + other.height);
        Rect::new(left, top, right - left, bottom - top)
    }
}

/// A rendered card within a column
#[derive(Debug, Clone, PartialEq)]
pub struct CardGeometry {
    pub id: AssessmentId,
    pub rect: Rect,
}

/// A rendered column container and its cards
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnGeometry {
    pub column: AssessmentStatus,
    pub rect: Rect,
    pub cards: Vec<CardGeometry>,
}

impl ColumnGeometry {
    pub fn new(column: AssessmentStatus, rect: Rect) -> Self {
        Self {
            column,
            rect,
            cards: Vec::new(),
        }
    }

    pub fn with_card(mut self, id: impl Into<AssessmentId>, rect: Rect) -> Self {
        self.cards.push(CardGeometry {
            id: id.into(),
            rect,
        });
        self
    }
}

/// What the dragged item is currently over
#[derive(Debug, Clone, PartialEq)]
pub enum DropTarget {
    Column(AssessmentStatus),
    Card {
        id: AssessmentId,
        column: AssessmentStatus,
    },
}

impl DropTarget {
    /// The column this target resolves to
    pub fn column(&self) -> AssessmentStatus {
        match self {
            DropTarget::Column(column) => *column,
            DropTarget::Card { column, .. } => *column,
        }
    }
}

/// Resolve the closest droppable to `position`.
///
/// Candidates are every column container plus the cards of the column that
/// contains the position. The candidate whose center is nearest wins; on a
/// tie the earlier candidate (columns first, in board order) is kept.
/// Positions outside the bounding box of all columns resolve to nothing.
pub fn resolve_drop_target(position: Point, columns: &[ColumnGeometry]) -> Option<DropTarget> {
    let bounds = columns.iter().map(|c| c.rect).reduce(Rect::union)?;
    if !bounds.contains(position) {
        return None;
    }

    let hovered = columns.iter().find(|c| c.rect.contains(position));

    let column_candidates = columns
        .iter()
        .map(|c| (c.rect.center(), DropTarget::Column(c.column)));
    let card_candidates = hovered.into_iter().flat_map(|c| {
        c.cards.iter().map(move |card| {
            (
                card.rect.center(),
                DropTarget::Card {
                    id: card.id.clone(),
                    column: c.column,
                },
            )
        })
    });

    let mut best: Option<(f64, DropTarget)> = None;
    for (center, target) in column_candidates.chain(card_candidates) {
        let distance = center.distance_squared(position);
        if best.as_ref().is_none_or(|(closest, _)| distance < *closest) {
            best = Some((distance, target));
        }
    }
    best.map(|(_, target)| target)
}

/// Column a drop at `position` would land in
pub fn compute_drop_target(position: Point, columns: &[ColumnGeometry]) -> Option<AssessmentStatus> {
    resolve_drop_target(position, columns).map(|target| target.column())
}

/// Lay the seven columns out side by side, left to right in board order
pub fn layout_columns(column_width: f64, column_height: f64, gap: f64) -> Vec<ColumnGeometry> {
    COLUMNS
        .iter()
        .enumerate()
        .map(|(i, column)| {
            let x = i as f64 * (column_width + gap);
            ColumnGeometry::new(column.id, Rect::new(x, 0.0, column_width, column_height))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board() -> Vec<ColumnGeometry> {
        vec![
            ColumnGeometry::new(AssessmentStatus::Draft, Rect::new(0.0, 0.0, 100.0, 400.0))
                .with_card("a-1", Rect::new(5.0, 10.0, 90.0, 40.0))
                .with_card("a-2", Rect::new(5.0, 60.0, 90.0, 40.0)),
            ColumnGeometry::new(AssessmentStatus::Sent, Rect::new(110.0, 0.0, 100.0, 400.0))
                .with_card("a-3", Rect::new(115.0, 10.0, 90.0, 40.0)),
            ColumnGeometry::new(
                AssessmentStatus::InProgress,
                Rect::new(220.0, 0.0, 100.0, 400.0),
            ),
        ]
    }

    #[test]
    fn test_rect_center_and_contains() {
        let rect = Rect::new(10.0, 20.0, 100.0, 50.0);
        assert_eq!(rect.center(), Point::new(60.0, 45.0));
        assert!(rect.contains(Point::new(10.0, 20.0)));
        assert!(rect.contains(Point::new(110.0, 70.0)));
        assert!(!rect.contains(Point::new(110.1, 70.0)));
    }

    #[test]
    fn test_rect_union() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(20.0, 5.0, 10.0, 10.0);
        assert_eq!(a.union(b), Rect::new(0.0, 0.0, 30.0, 15.0));
    }

    #[test]
    fn test_target_inside_column() {
        let columns = board();
        assert_eq!(
            compute_drop_target(Point::new(160.0, 300.0), &columns),
            Some(AssessmentStatus::Sent)
        );
        assert_eq!(
            compute_drop_target(Point::new(270.0, 20.0), &columns),
            Some(AssessmentStatus::InProgress)
        );
    }

    #[test]
    fn test_card_in_hovered_column_wins_over_far_column_center() {
        let columns = board();
        let target = resolve_drop_target(Point::new(50.0, 75.0), &columns);
        assert_eq!(
            target,
            Some(DropTarget::Card {
                id: AssessmentId::new("a-2"),
                column: AssessmentStatus::Draft,
            })
        );
    }

    #[test]
    fn test_cards_of_other_columns_are_not_candidates() {
        // Near a-3's center, but inside the Draft column
        let columns = vec![
            ColumnGeometry::new(AssessmentStatus::Draft, Rect::new(0.0, 0.0, 100.0, 1000.0)),
            ColumnGeometry::new(AssessmentStatus::Sent, Rect::new(100.0, 0.0, 100.0, 1000.0))
                .with_card("a-3", Rect::new(101.0, 0.0, 98.0, 20.0)),
        ];
        let target = resolve_drop_target(Point::new(99.0, 10.0), &columns);
        assert_eq!(target, Some(DropTarget::Column(AssessmentStatus::Draft)));
    }

    #[test]
    fn test_gap_between_columns_resolves_to_nearest() {
        let columns = board();
        // Gap between Draft (0..100) and Sent (110..210), closer to Sent's center
        assert_eq!(
            compute_drop_target(Point::new(108.0, 200.0), &columns),
            Some(AssessmentStatus::Sent)
        );
    }

    #[test]
    fn test_outside_board_is_none() {
        let columns = board();
        assert_eq!(compute_drop_target(Point::new(500.0, 10.0), &columns), None);
        assert_eq!(compute_drop_target(Point::new(50.0, -1.0), &columns), None);
    }

    #[test]
    fn test_no_columns_is_none() {
        assert_eq!(compute_drop_target(Point::new(0.0, 0.0), &[]), None);
    }

    #[test]
    fn test_is_deterministic() {
        let columns = board();
        let position = Point::new(150.0, 33.0);
        let first = resolve_drop_target(position, &columns);
        for _ in 0..10 {
            assert_eq!(resolve_drop_target(position, &columns), first);
        }
    }

    #[test]
    fn test_layout_columns() {
        let columns = layout_columns(100.0, 500.0, 10.0);
        assert_eq!(columns.len(), 7);
        assert_eq!(columns[2].column, AssessmentStatus::InProgress);
        assert_eq!(columns[2].rect, Rect::new(220.0, 0.0, 100.0, 500.0));
        assert_eq!(
            compute_drop_target(columns[6].rect.center(), &columns),
            Some(AssessmentStatus::Expired)
        );
    }
}
