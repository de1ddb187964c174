use crate::planner::{EntryStatus, RenamePlan};
use nu_ansi_term::Color;
use std::fmt::Write;

/// Render the plan as a plain line-per-file summary
pub fn render_summary(plan: &RenamePlan, use_color: bool, limit: Option<usize>) -> String {
    let mut output = String::new();
    let stats = plan.stats();

    let _ = writeln!(output, "[RENAME PLAN]");
    let _ = writeln!(output, "Mode: {}", plan.mode);
    let _ = writeln!(output, "Files: {}", stats.total);
    let _ = writeln!(output, "Planned: {}", stats.planned);
    let _ = writeln!(output, "Unchanged: {}", stats.unchanged);
    let _ = writeln!(output, "Conflicts: {}", stats.conflicts);
    let _ = writeln!(output);

    let shown = limit.unwrap_or(plan.entries.len());
    for (position, entry) in plan.entries.iter().take(shown).enumerate() {
        let marker = match entry.status {
            EntryStatus::Planned => String::new(),
            EntryStatus::Unchanged => " (unchanged)".to_string(),
            EntryStatus::Conflict => format!(
                " (conflict: {})",
                entry
                    .conflict
                    .as_ref()
                    .map_or("unknown", |c| c.reason.as_str())
            ),
        };

        if use_color {
            let new_name = match entry.status {
                EntryStatus::Planned => Color::Green.paint(entry.new_name.as_str()),
                EntryStatus::Unchanged => Color::DarkGray.paint(entry.new_name.as_str()),
                EntryStatus::Conflict => Color::Red.paint(entry.new_name.as_str()),
            };
            let _ = writeln!(
                output,
                "{:3}. {} -> {}{}",
                position + 1,
                entry.old_name,
                new_name,
                Color::Yellow.paint(marker.as_str())
            );
        } else {
            let _ = writeln!(
                output,
                "{:3}. {} -> {}{}",
                position + 1,
                entry.old_name,
                entry.new_name,
                marker
            );
        }
    }

    if plan.entries.len() > shown {
        let _ = writeln!(output, "... and {} more file(s)", plan.entries.len() - shown);
    }

    output
}
