use crate::planner::{EntryStatus, PlanEntry, RenamePlan};
use comfy_table::{Cell, Color, ContentArrangement, Table};
use std::io::{self, IsTerminal};

/// Render the plan as a table, showing at most `limit` entries
pub fn render_table(plan: &RenamePlan, use_color: bool, limit: Option<usize>) -> String {
    let mut table = Table::new();

    if io::stdout().is_terminal() {
        table.set_content_arrangement(ContentArrangement::Dynamic);
    } else {
        table.set_content_arrangement(ContentArrangement::Disabled);
    }

    // Force styling even in non-TTY environments when colors are explicitly requested
    if use_color {
        table.enforce_styling();
        table.set_header(vec![
            Cell::new("#").fg(Color::Cyan),
            Cell::new("Current name").fg(Color::Cyan),
            Cell::new("New name").fg(Color::Cyan),
            Cell::new("Status").fg(Color::Cyan),
        ]);
    } else {
        table.set_header(vec!["#", "Current name", "New name", "Status"]);
    }

    let shown = limit.unwrap_or(plan.entries.len());
    for (position, entry) in plan.entries.iter().take(shown).enumerate() {
        let status = status_text(entry);
        let row = (position + 1).to_string();
        if use_color {
            let color = match entry.status {
                EntryStatus::Planned => Color::Green,
                EntryStatus::Unchanged => Color::DarkGrey,
                EntryStatus::Conflict => Color::Red,
            };
            table.add_row(vec![
                Cell::new(row),
                Cell::new(&entry.old_name),
                Cell::new(&entry.new_name).fg(Color::Magenta),
                Cell::new(status).fg(color),
            ]);
        } else {
            table.add_row(vec![row, entry.old_name.clone(), entry.new_name.clone(), status]);
        }
    }

    if plan.entries.len() > shown {
        let more = format!("... and {} more", plan.entries.len() - shown);
        table.add_row(vec![String::new(), more, String::new(), String::new()]);
    }

    let stats = plan.stats();
    let totals = format!(
        "{} to rename, {} unchanged, {} conflicts",
        stats.planned, stats.unchanged, stats.conflicts
    );
    if use_color {
        table.add_row(vec![
            Cell::new("─────").fg(Color::DarkGrey),
            Cell::new("─────────").fg(Color::DarkGrey),
            Cell::new("─────────").fg(Color::DarkGrey),
            Cell::new("─────────").fg(Color::DarkGrey),
        ]);
        table.add_row(vec![
            Cell::new("TOTALS").fg(Color::Cyan),
            Cell::new(format!("{} files", stats.total)).fg(Color::White),
            Cell::new(""),
            Cell::new(totals).fg(Color::Yellow),
        ]);
    } else {
        table.add_row(vec!["─────", "─────────", "─────────", "─────────"]);
        table.add_row(vec![
            "TOTALS".to_string(),
            format!("{} files", stats.total),
            String::new(),
            totals,
        ]);
    }

    table.to_string()
}

fn status_text(entry: &PlanEntry) -> String {
    match (&entry.status, &entry.conflict) {
        (EntryStatus::Planned, _) => "rename".to_string(),
        (EntryStatus::Unchanged, _) => "unchanged".to_string(),
        (EntryStatus::Conflict, Some(conflict)) => conflict.reason.clone(),
        (EntryStatus::Conflict, None) => "conflict".to_string(),
    }
}
