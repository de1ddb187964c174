use crate::error::PartialFailure;
use crate::executor::RenameReport;
use crate::listing::{format_size, FileRecord};
use crate::planner::{PlanStats, RenamePlan};
use comfy_table::{ContentArrangement, Table};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt::Write;
use std::path::PathBuf;

/// How many failures a rename summary lists before summarising the rest
const MAX_LISTED_FAILURES: usize = 3;

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Summary,
    Json,
}

/// Result of a list operation
#[derive(Debug, Serialize, Deserialize)]
pub struct ListResult {
    pub directory: PathBuf,
    pub files: Vec<FileRecord>,
    pub total_size: u64,
}

/// Result of a plan operation
#[derive(Debug, Serialize, Deserialize)]
pub struct PlanResult {
    pub directory: PathBuf,
    pub description: String,
    pub stats: PlanStats,
    pub executable: bool,
    pub plan: RenamePlan,
}

/// Result of a rename operation
#[derive(Debug, Serialize, Deserialize)]
pub struct RenameResult {
    pub directory: PathBuf,
    pub description: String,
    pub stats: PlanStats,
    pub dry_run: bool,
    pub cancelled: bool,
    pub report: RenameReport,
    /// The plan the batch was built from
    pub plan: RenamePlan,
    /// The directory listing after reconciliation with the applied renames
    pub files: Vec<FileRecord>,
}

impl RenameResult {
    /// The error to exit with when some renames of the batch failed
    pub fn failure(&self) -> Option<PartialFailure> {
        (!self.report.is_success()).then(|| PartialFailure {
            failed: self.report.failure_count,
            attempted: self.report.attempted(),
        })
    }
}

/// Result of a version command
#[derive(Debug, Serialize, Deserialize)]
pub struct VersionResult {
    pub name: String,
    pub version: String,
}

/// Trait for formatting output in different formats
pub trait OutputFormatter {
    fn format(&self, format: OutputFormat) -> String {
        match format {
            OutputFormat::Json => self.format_json(),
            OutputFormat::Summary => self.format_summary(),
        }
    }
    fn format_json(&self) -> String;
    fn format_summary(&self) -> String;
}

impl OutputFormatter for ListResult {
    fn format_json(&self) -> String {
        serde_json::to_string(&json!({
            "success": true,
            "operation": "list",
            "directory": self.directory,
            "total_size": self.total_size,
            "files": self.files,
        }))
        .unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Disabled);
        table.set_header(vec!["Name", "Size", "Modified"]);
        for record in &self.files {
            table.add_row(vec![
                record.name.clone(),
                format_size(record.size_bytes),
                record.modified_time.format("%Y-%m-%d %H:%M").to_string(),
            ]);
        }

        let mut output = String::new();
        let _ = writeln!(output, "{table}");
        let _ = writeln!(
            output,
            "{} file(s), {}",
            self.files.len(),
            format_size(self.total_size)
        );
        output
    }
}

impl OutputFormatter for PlanResult {
    fn format_json(&self) -> String {
        serde_json::to_string(&json!({
            "success": true,
            "operation": "plan",
            "directory": self.directory,
            "mode": self.description,
            "executable": self.executable,
            "summary": self.stats,
            "plan": self.plan,
        }))
        .unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        let mut output = String::new();
        let _ = writeln!(output, "Rename plan: {}", self.description);
        let _ = writeln!(
            output,
            "Files: {}, to rename: {}, unchanged: {}, conflicts: {}",
            self.stats.total, self.stats.planned, self.stats.unchanged, self.stats.conflicts
        );
        if !self.executable {
            output.push_str("Conflicts must be resolved before renaming.\n");
        }
        output
    }
}

impl OutputFormatter for RenameResult {
    fn format_json(&self) -> String {
        serde_json::to_string(&json!({
            "success": !self.cancelled && self.report.is_success(),
            "operation": "rename",
            "directory": self.directory,
            "mode": self.description,
            "dry_run": self.dry_run,
            "cancelled": self.cancelled,
            "summary": {
                "planned": self.stats.planned,
                "unchanged": self.stats.unchanged,
                "conflicts": self.stats.conflicts,
                "renamed": self.report.success_count,
                "failed": self.report.failure_count,
            },
            "applied": self.report.applied,
            "failures": self.report.failures,
        }))
        .unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        if self.cancelled {
            return "Operation cancelled.\n".to_string();
        }
        if self.dry_run {
            let mut output = format!(
                "Dry run: {} file(s) would be renamed\n",
                self.stats.planned
            );
            if self.stats.conflicts > 0 {
                let _ = writeln!(output, "{} file(s) have conflicts", self.stats.conflicts);
            }
            return output;
        }

        let mut output = String::new();
        if self.report.attempted() == 0 {
            output.push_str("Nothing to rename.\n");
        } else if self.report.is_success() {
            let _ = writeln!(output, "✓ Renamed {} file(s)", self.report.success_count);
        } else {
            let _ = writeln!(
                output,
                "Renamed: {}, Failed: {}",
                self.report.success_count, self.report.failure_count
            );
            output.push_str("First errors:\n");
            for failure in self.report.failures.iter().take(MAX_LISTED_FAILURES) {
                let _ = writeln!(output, "  {}: {}", failure.name, failure.reason);
            }
            if self.report.failures.len() > MAX_LISTED_FAILURES {
                let _ = writeln!(
                    output,
                    "... and {} more error(s)",
                    self.report.failures.len() - MAX_LISTED_FAILURES
                );
            }
        }

        if self.stats.conflicts > 0 {
            let _ = writeln!(
                output,
                "Skipped {} conflicting file(s)",
                self.stats.conflicts
            );
        }
        output
    }
}

impl OutputFormatter for VersionResult {
    fn format_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        format!("{} {}", self.name, self.version)
    }
}
