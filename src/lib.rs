#[macro_use]
mod macros;

pub mod board;
pub mod commands;
pub mod config;
pub mod error;
pub mod paths;
pub mod repository;
pub mod types;

pub use board::{
    Board, BoardStats, BoardViewModel, ColumnStats, CommitOutcome, DragPhase, DropOutcome,
    Notification, Notifier, SelectedFilter, ToastQueue, TransitionIntent, compute_drop_target,
    filter_assessments, group_by_column,
};
pub use config::BoardConfig;
pub use error::{BoardError, Result};
pub use repository::{AssessmentRepository, FileRepository, MemoryRepository};
pub use types::{
    Assessment, AssessmentId, AssessmentStatus, AssessmentUpdate, Priority, RiskLevel,
    StatusValue, VALID_PRIORITIES, VALID_RISK_LEVELS, VALID_STATUSES,
};
