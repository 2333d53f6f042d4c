use std::sync::Arc;

use owo_colors::OwoColorize;
use serde_json::json;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::{now, open_board, print_json};
use crate::board::{BoardViewModel, ToastQueue};
use crate::error::Result;

/// A row in the board summary table
#[derive(Tabled)]
struct ColumnRow {
    #[tabled(rename = "Column")]
    title: String,
    #[tabled(rename = "Total")]
    total: usize,
    #[tabled(rename = "High priority")]
    high_priority: usize,
    #[tabled(rename = "Overdue")]
    overdue: usize,
    #[tabled(rename = "Assessments")]
    assessments: String,
}

/// Show per-column contents and stats
pub async fn cmd_board(search: Option<&str>, filter: Option<&str>, output_json: bool) -> Result<()> {
    let toasts = Arc::new(ToastQueue::new());
    let mut board = open_board(toasts).await?;
    if let Some(term) = search {
        board.set_search_term(term);
    }
    if let Some(filter) = filter {
        board.set_filter(filter);
    }

    let view = board.view(now());
    if output_json {
        return print_json(&board_json(&view));
    }

    let rows: Vec<ColumnRow> = view
        .columns
        .iter()
        .map(|column| ColumnRow {
            title: column.column.title.to_string(),
            total: column.stats.total,
            high_priority: column.stats.high_priority,
            overdue: column.stats.overdue,
            assessments: column
                .cards
                .iter()
                .map(|card| card.assessment.id.to_string())
                .collect::<Vec<_>>()
                .join(", "),
        })
        .collect();

    let table = Table::new(rows).with(Style::modern()).to_string();
    println!("{table}");
    println!(
        "{} of {} assessments shown ({} high priority, {} overdue)",
        view.shown().to_string().bold(),
        view.total_all,
        view.stats.high_priority(),
        view.stats.overdue()
    );
    if view.unplaced > 0 {
        println!(
            "{} matching assessment(s) have a status with no column",
            view.unplaced
        );
    }
    Ok(())
}

fn board_json(view: &BoardViewModel) -> serde_json::Value {
    let columns: Vec<_> = view
        .columns
        .iter()
        .map(|column| {
            json!({
                "id": column.column.id,
                "title": column.column.title,
                "stats": column.stats,
                "assessments": column
                    .cards
                    .iter()
                    .map(|card| json!({
                        "id": card.assessment.id,
                        "assessment_name": card.assessment.assessment_name,
                        "vendor_name": card.assessment.vendor_name,
                        "priority": card.assessment.priority,
                        "due_date": card.assessment.due_date,
                    }))
                    .collect::<Vec<_>>(),
            })
        })
        .collect();

    json!({
        "columns": columns,
        "shown": view.shown(),
        "unplaced": view.unplaced,
        "total_filtered": view.total_filtered,
        "total_all": view.total_all,
    })
}
