use std::sync::Arc;

use super::{open_board, print_json};
use crate::board::ToastQueue;
use crate::error::Result;
use crate::types::AssessmentId;

/// Display a single assessment
pub async fn cmd_show(id: &str, output_json: bool) -> Result<()> {
    let toasts = Arc::new(ToastQueue::new());
    let board = open_board(toasts).await?;
    let detail = board.open_detail(&AssessmentId::new(id))?;

    if output_json {
        print_json(&serde_json::to_value(&detail)?)
    } else {
        println!("{detail}");
        Ok(())
    }
}
