//! Drag session state machine
//!
//! A card move goes `Idle → Dragging → Committing | Cancelled → Idle`.
//! Pointer drags pass through `Armed` first: the press is recorded but the
//! session only starts once the pointer has travelled the activation
//! distance, so a plain click never becomes a drag. Keyboard pick-up starts
//! the session immediately.
//!
//! At most one session exists at a time. The controller never performs I/O;
//! a successful drop yields a [`TransitionIntent`] for the committer.

mod geometry;

pub use geometry::{
    CardGeometry, ColumnGeometry, DropTarget, Point, Rect, compute_drop_target, layout_columns,
    resolve_drop_target,
};

use crate::error::{BoardError, Result};
use crate::types::{AssessmentId, AssessmentStatus};

/// A proposed status change produced by a completed drop
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionIntent {
    pub assessment_id: AssessmentId,
    pub from_status: AssessmentStatus,
    pub to_status: AssessmentStatus,
}

/// A pointer press that has not yet moved far enough to start a drag
#[derive(Debug, Clone, PartialEq)]
pub struct ArmedPress {
    pub assessment_id: AssessmentId,
    pub origin_column_id: AssessmentStatus,
    pub press_point: Point,
}

/// The in-progress move of one card
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    pub active_assessment_id: AssessmentId,
    pub origin_column_id: AssessmentStatus,
    /// Column currently under the pointer or focus
    pub over: Option<AssessmentStatus>,
    pub position: Point,
}

impl DragSession {
    /// The intent a drop right now would produce
    pub fn intent(&self) -> Option<TransitionIntent> {
        match self.over {
            Some(target) if target != self.origin_column_id => Some(TransitionIntent {
                assessment_id: self.active_assessment_id.clone(),
                from_status: self.origin_column_id,
                to_status: target,
            }),
            _ => None,
        }
    }
}

/// Controller phase
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DragPhase {
    #[default]
    Idle,
    Armed(ArmedPress),
    Dragging(DragSession),
    Committing(DragSession),
    Cancelled(DragSession),
}

impl DragPhase {
    pub fn name(&self) -> &'static str {
        match self {
            DragPhase::Idle => "idle",
            DragPhase::Armed(_) => "armed",
            DragPhase::Dragging(_) => "dragging",
            DragPhase::Committing(_) => "committing",
            DragPhase::Cancelled(_) => "cancelled",
        }
    }
}

/// How a drag ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    /// The press was released before the activation distance; treat as a click
    Click(AssessmentId),
    /// Dropped on a different column
    Moved(TransitionIntent),
    /// Dropped back on the origin column; nothing changes
    Unchanged(AssessmentId),
    /// Released outside every column, or cancelled explicitly
    Cancelled(AssessmentId),
}

impl DropOutcome {
    pub fn intent(&self) -> Option<&TransitionIntent> {
        match self {
            DropOutcome::Moved(intent) => Some(intent),
            _ => None,
        }
    }
}

/// The drag state machine
#[derive(Debug, Clone)]
pub struct DragController {
    phase: DragPhase,
    activation_distance: f64,
}

impl DragController {
    pub fn new(activation_distance: f64) -> Self {
        Self {
            phase: DragPhase::Idle,
            activation_distance,
        }
    }

    pub fn phase(&self) -> &DragPhase {
        &self.phase
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.phase, DragPhase::Idle)
    }

    /// The active session while dragging
    pub fn session(&self) -> Option<&DragSession> {
        match &self.phase {
            DragPhase::Dragging(session) => Some(session),
            _ => None,
        }
    }

    fn ensure_idle(&self) -> Result<()> {
        match &self.phase {
            DragPhase::Idle => Ok(()),
            DragPhase::Armed(press) => Err(BoardError::DragInProgress(
                press.assessment_id.to_string(),
            )),
            DragPhase::Dragging(session)
            | DragPhase::Committing(session)
            | DragPhase::Cancelled(session) => Err(BoardError::DragInProgress(
                session.active_assessment_id.to_string(),
            )),
        }
    }

    /// Pointer pressed on a card
    pub fn press(
        &mut self,
        assessment_id: AssessmentId,
        origin: AssessmentStatus,
        point: Point,
    ) -> Result<()> {
        self.ensure_idle()?;
        self.phase = DragPhase::Armed(ArmedPress {
            assessment_id,
            origin_column_id: origin,
            press_point: point,
        });
        Ok(())
    }

    /// Keyboard pick-up of the focused card; starts the session at once
    pub fn pick_up(
        &mut self,
        assessment_id: AssessmentId,
        origin: AssessmentStatus,
        point: Point,
    ) -> Result<()> {
        self.ensure_idle()?;
        tracing::debug!("picked up {} from {}", assessment_id, origin);
        self.phase = DragPhase::Dragging(DragSession {
            active_assessment_id: assessment_id,
            origin_column_id: origin,
            over: Some(origin),
            position: point,
        });
        Ok(())
    }

    /// Pointer or focus moved.
    ///
    /// Activates an armed press once it has travelled far enough, and
    /// recomputes the target column while dragging. Returns the column
    /// currently under the item.
    pub fn move_to(&mut self, point: Point, columns: &[ColumnGeometry]) -> Option<AssessmentStatus> {
        match &mut self.phase {
            DragPhase::Armed(press) => {
                if press.press_point.distance(point) < self.activation_distance {
                    return None;
                }
                let over = compute_drop_target(point, columns);
                let session = DragSession {
                    active_assessment_id: press.assessment_id.clone(),
                    origin_column_id: press.origin_column_id,
                    over,
                    position: point,
                };
                tracing::debug!(
                    "drag activated for {} from {}",
                    session.active_assessment_id,
                    session.origin_column_id
                );
                self.phase = DragPhase::Dragging(session);
                over
            }
            DragPhase::Dragging(session) => {
                let over = compute_drop_target(point, columns);
                if over != session.over {
                    tracing::debug!(
                        "{} now over {}",
                        session.active_assessment_id,
                        over.map(|s| s.as_str()).unwrap_or("nothing")
                    );
                }
                session.over = over;
                session.position = point;
                over
            }
            DragPhase::Idle | DragPhase::Committing(_) | DragPhase::Cancelled(_) => None,
        }
    }

    /// Pointer released, or keyboard drop
    pub fn release(&mut self) -> Result<DropOutcome> {
        match std::mem::take(&mut self.phase) {
            DragPhase::Armed(press) => Ok(DropOutcome::Click(press.assessment_id)),
            DragPhase::Dragging(session) => {
                let outcome = match (session.over, session.intent()) {
                    (None, _) => {
                        self.phase = DragPhase::Cancelled(session.clone());
                        DropOutcome::Cancelled(session.active_assessment_id)
                    }
                    (Some(_), Some(intent)) => {
                        self.phase = DragPhase::Committing(session);
                        DropOutcome::Moved(intent)
                    }
                    (Some(_), None) => {
                        self.phase = DragPhase::Committing(session.clone());
                        DropOutcome::Unchanged(session.active_assessment_id)
                    }
                };
                Ok(outcome)
            }
            other => {
                self.phase = other;
                Err(BoardError::NoActiveDrag)
            }
        }
    }

    /// Escape pressed: abandon the move. Returns the outcome if anything was active.
    pub fn cancel(&mut self) -> Option<DropOutcome> {
        match std::mem::take(&mut self.phase) {
            DragPhase::Armed(press) => Some(DropOutcome::Click(press.assessment_id)),
            DragPhase::Dragging(session) => {
                let id = session.active_assessment_id.clone();
                self.phase = DragPhase::Cancelled(session);
                Some(DropOutcome::Cancelled(id))
            }
            other => {
                self.phase = other;
                None
            }
        }
    }

    /// Return a finished drag to idle
    pub fn settle(&mut self) {
        if matches!(
            self.phase,
            DragPhase::Committing(_) | DragPhase::Cancelled(_)
        ) {
            self.phase = DragPhase::Idle;
        }
    }
}
