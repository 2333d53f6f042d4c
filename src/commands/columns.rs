use owo_colors::OwoColorize;
use serde_json::json;

use super::print_json;
use crate::board::COLUMNS;
use crate::error::Result;

/// List the board columns in order
pub fn cmd_columns(output_json: bool) -> Result<()> {
    if output_json {
        let columns: Vec<_> = COLUMNS
            .iter()
            .map(|c| json!({ "id": c.id, "title": c.title, "description": c.description }))
            .collect();
        return print_json(&json!(columns));
    }

    for column in &COLUMNS {
        println!(
            "{:12} {:12} {}",
            column.id.as_str().cyan(),
            column.title,
            column.description.dimmed()
        );
    }
    Ok(())
}
