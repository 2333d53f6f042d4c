use std::sync::Arc;

use owo_colors::OwoColorize;

use super::{format_notification, open_board};
use crate::board::{
    ColumnGeometry, CommitOutcome, DropOutcome, Point, ToastQueue, column_for,
    columns::column_index, layout_columns,
};
use crate::error::{BoardError, Result};
use crate::types::{AssessmentId, AssessmentStatus};

const COLUMN_WIDTH: f64 = 240.0;
const COLUMN_HEIGHT: f64 = 600.0;
const COLUMN_GAP: f64 = 16.0;

fn focus_point(columns: &[ColumnGeometry], status: AssessmentStatus) -> Point {
    columns[column_index(status)].rect.center()
}

/// Move an assessment to another column.
///
/// Goes through the same pick-up, move and drop sequence a keyboard user
/// would, then waits for the update to be persisted.
pub async fn cmd_move(id: &str, status: AssessmentStatus) -> Result<()> {
    let toasts = Arc::new(ToastQueue::new());
    let mut board = open_board(toasts.clone()).await?;
    let id = AssessmentId::new(id);

    let columns = layout_columns(COLUMN_WIDTH, COLUMN_HEIGHT, COLUMN_GAP);

    let origin = board.effective_status(&id)?;
    board.pick_up(&id, focus_point(&columns, origin))?;
    board.move_to(focus_point(&columns, status), &columns);
    let result = board.release()?;

    let outcome = match (&result.outcome, result.commit) {
        (DropOutcome::Moved(_), Some(commit)) => commit.await,
        (DropOutcome::Unchanged(_), _) => {
            println!(
                "{} is already in {}",
                id.cyan(),
                column_for(status).title.bold()
            );
            return Ok(());
        }
        _ => {
            return Err(BoardError::Other(format!("could not move {id}")));
        }
    };

    for notification in toasts.drain() {
        println!("{}", format_notification(&notification));
    }

    match outcome {
        CommitOutcome::Confirmed => Ok(()),
        CommitOutcome::Rejected(reason) => Err(BoardError::UpdateRejected {
            id: id.to_string(),
            reason,
        }),
        CommitOutcome::TimedOut => Err(BoardError::UpdateRejected {
            id: id.to_string(),
            reason: "update timed out".to_string(),
        }),
        CommitOutcome::Superseded => Ok(()),
    }
}
