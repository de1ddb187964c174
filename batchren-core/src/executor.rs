use crate::error::RenameError;
use crate::planner::{PlanEntry, RenamePlan};
use serde::{Deserialize, Serialize};
use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

const MAX_TEMP_ATTEMPTS: u32 = 1000;

/// Options for executing a rename plan
#[derive(Debug, Clone, Default)]
pub struct ExecuteOptions {
    /// Append a line per rename to this file
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedRename {
    pub file_index: usize,
    pub old_name: String,
    pub new_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameFailure {
    pub name: String,
    pub reason: String,
}

/// Outcome of executing a plan, in plan order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameReport {
    pub applied: Vec<AppliedRename>,
    pub failures: Vec<RenameFailure>,
    pub success_count: usize,
    pub failure_count: usize,
}

impl RenameReport {
    pub fn is_success(&self) -> bool {
        self.failure_count == 0
    }

    pub fn attempted(&self) -> usize {
        self.success_count + self.failure_count
    }
}

/// Tracks an execution run and its optional log file
struct ExecuteState {
    report: RenameReport,
    log_file: Option<File>,
}

impl ExecuteState {
    fn new(log_file: Option<&Path>) -> Self {
        let log_file = log_file.and_then(|path| match open_log(path) {
            Ok(file) => Some(file),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "cannot open rename log");
                None
            },
        });

        Self {
            report: RenameReport::default(),
            log_file,
        }
    }

    fn log(&mut self, message: &str) {
        if let Some(ref mut file) = self.log_file {
            let written = writeln!(
                file,
                "[{}] {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                message
            )
            .and_then(|()| file.flush());
            if let Err(e) = written {
                warn!(error = %e, "cannot write rename log");
            }
        }
    }
}

fn open_log(path: &Path) -> std::io::Result<File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Apply the `Planned` entries of `plan`, one at a time, in plan order.
///
/// A failing entry is recorded and the run moves on to the next one; nothing
/// is rolled back. File records are not touched, callers reconcile them from
/// [`RenameReport::applied`].
pub fn execute_plan(plan: &RenamePlan, options: &ExecuteOptions) -> RenameReport {
    let mut state = ExecuteState::new(options.log_file.as_deref());
    state.log(&format!(
        "Starting batch: {} ({} planned)",
        plan.mode,
        plan.planned().count()
    ));

    for entry in plan.planned() {
        match rename_entry(entry) {
            Ok(()) => {
                info!(from = %entry.old_name, to = %entry.new_name, "renamed");
                state.log(&format!("Renamed {} -> {}", entry.old_name, entry.new_name));
                state.report.applied.push(AppliedRename {
                    file_index: entry.file_index,
                    old_name: entry.old_name.clone(),
                    new_name: entry.new_name.clone(),
                });
                state.report.success_count += 1;
            },
            Err(e) => {
                warn!(from = %entry.old_name, to = %entry.new_name, error = %e, "rename failed");
                state.log(&format!(
                    "Failed {} -> {}: {}",
                    entry.old_name, entry.new_name, e
                ));
                state.report.failures.push(RenameFailure {
                    name: entry.old_name.clone(),
                    reason: e.to_string(),
                });
                state.report.failure_count += 1;
            },
        }
    }

    let message = format!(
        "Finished batch: {} renamed, {} failed",
        state.report.success_count, state.report.failure_count
    );
    state.log(&message);
    state.report
}

fn is_case_only_change(old_name: &str, new_name: &str) -> bool {
    old_name != new_name && old_name.to_lowercase() == new_name.to_lowercase()
}

/// Whether `name` is present in `directory` with exactly this spelling
fn exact_name_exists(directory: &Path, name: &str) -> std::io::Result<bool> {
    for entry in fs::read_dir(directory)? {
        if entry?.file_name() == name {
            return Ok(true);
        }
    }
    Ok(false)
}

fn rename_entry(entry: &PlanEntry) -> Result<(), RenameError> {
    let from = entry.path.as_path();
    let to = entry.target_path();

    if is_case_only_change(&entry.old_name, &entry.new_name) {
        if exact_name_exists(parent_dir(from), &entry.new_name)? {
            return Err(RenameError::TargetExists {
                name: entry.new_name.clone(),
            });
        }

        // The new spelling is absent, so if it still resolves the
        // filesystem folds case and it names the source itself
        if to.symlink_metadata().is_ok() {
            return rename_via_temp(from, &to);
        }
    } else if to.symlink_metadata().is_ok() {
        // symlink_metadata also sees dangling links
        return Err(RenameError::TargetExists {
            name: entry.new_name.clone(),
        });
    }

    fs::rename(from, &to)?;
    Ok(())
}

fn parent_dir(path: &Path) -> &Path {
    path.parent().unwrap_or_else(|| Path::new("."))
}

/// A temporary path in `directory` that no entry occupies
fn free_temp_path(directory: &Path) -> std::io::Result<PathBuf> {
    let pid = std::process::id();
    for attempt in 0..MAX_TEMP_ATTEMPTS {
        let candidate = directory.join(format!(".batchren-{pid}-{attempt}.tmp"));
        if matches!(candidate.symlink_metadata(), Err(ref e) if e.kind() == ErrorKind::NotFound) {
            return Ok(candidate);
        }
    }
    Err(std::io::Error::new(
        ErrorKind::AlreadyExists,
        "no free temporary name for a case-only rename",
    ))
}

/// Two-step rename through a free temporary name, for case-only changes on
/// case-folding filesystems
fn rename_via_temp(from: &Path, to: &Path) -> Result<(), RenameError> {
    let temp = free_temp_path(parent_dir(from))?;
    debug!(from = %from.display(), temp = %temp.display(), "case-only rename via temporary name");
    fs::rename(from, &temp)?;

    if let Err(source) = fs::rename(&temp, to) {
        if let Err(restore) = fs::rename(&temp, from) {
            warn!(
                temp = %temp.display(),
                error = %restore,
                "cannot move file back after failed rename"
            );
            return Err(RenameError::Stranded { temp, source });
        }
        return Err(source.into());
    }
    Ok(())
}
