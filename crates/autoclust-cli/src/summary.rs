//! Stage summary table printed after a command run.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};

use autoclust_cli::pipeline::{StageOutcome, StageStatus};

pub fn print_summary(outcomes: &[StageOutcome]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Stage"),
        header_cell("Status"),
        header_cell("Detail"),
    ]);
    apply_table_style(&mut table);
    for outcome in outcomes {
        table.add_row(vec![
            Cell::new(&outcome.name),
            status_cell(outcome.status),
            Cell::new(&outcome.detail),
        ]);
    }
    println!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label).add_attribute(Attribute::Bold)
}

fn status_cell(status: StageStatus) -> Cell {
    match status {
        StageStatus::Completed => Cell::new("ok").fg(Color::Green),
        StageStatus::Failed => Cell::new("failed").fg(Color::Red),
        StageStatus::Skipped => Cell::new("skipped").add_attribute(Attribute::Dim),
    }
}
