mod board;
mod columns;
mod move_card;
mod show;

pub use board::cmd_board;
pub use columns::cmd_columns;
pub use move_card::cmd_move;
pub use show::cmd_show;

use std::sync::Arc;

use jiff::civil::DateTime;
use owo_colors::OwoColorize;

use crate::board::{Board, Notification, NotificationVariant, Notifier};
use crate::config::BoardConfig;
use crate::error::Result;
use crate::repository::FileRepository;

/// Print a JSON value to stdout
pub fn print_json(value: &serde_json::Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Load the configured data file into a board
pub(crate) async fn open_board(notifier: Arc<dyn Notifier>) -> Result<Board> {
    let config = BoardConfig::load()?;
    let repository = Arc::new(FileRepository::new(config.data_file()));
    let mut board = Board::new(repository, notifier, &config);
    board.refresh().await?;
    Ok(board)
}

/// Current local wall-clock time
pub(crate) fn now() -> DateTime {
    jiff::Zoned::now().datetime()
}

/// Format a notification for the terminal
pub fn format_notification(notification: &Notification) -> String {
    match notification.variant {
        NotificationVariant::Success => format!(
            "{} {}",
            notification.title.green().bold(),
            notification.description
        ),
        NotificationVariant::Error => format!(
            "{} {}",
            notification.title.red().bold(),
            notification.description
        ),
    }
}
