use crate::error::ConflictError;
use crate::executor::{execute_plan, ExecuteOptions, RenameReport};
use crate::listing::FileList;
use crate::operations::plan::{build_plan, PlanRequest};
use crate::output::RenameResult;
use crate::planner::RenamePlan;
use anyhow::Result;
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Debug, Clone, Default)]
pub struct RenameOptions {
    /// Rename the conflict-free entries of a plan that has conflicts
    pub skip_conflicts: bool,
    /// Stop after planning
    pub dry_run: bool,
    /// Append executed renames to this file
    pub log_file: Option<PathBuf>,
}

/// A listing and its plan, ready to be confirmed and executed
#[derive(Debug, Clone)]
pub struct PreparedRename {
    pub directory: PathBuf,
    pub list: FileList,
    pub plan: RenamePlan,
}

/// Plan the batch and check that it may run.
///
/// A plan with conflicts is refused with [`ConflictError`] unless
/// `skip_conflicts` or `dry_run` is set.
pub fn prepare_rename(request: &PlanRequest, options: &RenameOptions) -> Result<PreparedRename> {
    let (list, plan) = build_plan(request)?;

    if !plan.is_executable() {
        let count = plan.stats().conflicts;
        if !options.skip_conflicts && !options.dry_run {
            return Err(ConflictError { count }.into());
        }
        warn!(conflicts = count, "skipping conflicting files");
    }

    Ok(PreparedRename {
        directory: request.directory.clone(),
        list,
        plan,
    })
}

/// Run the plan and reconcile the listing with what was renamed.
///
/// Returns the reconciled listing and the report even when some renames
/// failed; failures are reported, not raised.
pub fn execute_prepared(
    prepared: PreparedRename,
    options: &RenameOptions,
) -> (FileList, RenamePlan, RenameReport) {
    let PreparedRename {
        mut list, plan, ..
    } = prepared;

    let report = execute_plan(
        &plan,
        &ExecuteOptions {
            log_file: options.log_file.clone(),
        },
    );
    list.reconcile(&report);
    info!(
        renamed = report.success_count,
        failed = report.failure_count,
        "rename batch finished"
    );
    (list, plan, report)
}

/// Rename operation - returns structured data.
///
/// `confirm` is called with the plan before anything is touched; returning
/// `false` cancels the batch. It is not called for dry runs or when there is
/// nothing to rename. A batch where some renames failed still returns the
/// result; see [`RenameResult::failure`].
pub fn rename_operation<F>(
    request: &PlanRequest,
    options: &RenameOptions,
    confirm: F,
) -> Result<RenameResult>
where
    F: FnOnce(&RenamePlan) -> Result<bool>,
{
    let prepared = prepare_rename(request, options)?;
    let description = prepared.plan.mode.to_string();
    let stats = prepared.plan.stats();

    let result = |report, list: FileList, plan, dry_run, cancelled| {
        RenameResult {
            directory: request.directory.clone(),
            description: description.clone(),
            stats,
            dry_run,
            cancelled,
            report,
            plan,
            files: list.records,
        }
    };

    if options.dry_run {
        return Ok(result(RenameReport::default(), prepared.list, prepared.plan, true, false));
    }
    if stats.planned == 0 {
        return Ok(result(RenameReport::default(), prepared.list, prepared.plan, false, false));
    }
    if !confirm(&prepared.plan)? {
        info!("rename cancelled");
        return Ok(result(RenameReport::default(), prepared.list, prepared.plan, false, true));
    }

    let (list, plan, report) = execute_prepared(prepared, options);
    Ok(result(report, list, plan, false, false))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::ListOptions;
    use crate::selection::SelectionSpec;
    use crate::transform::TransformMode;
    use std::fs;
    use tempfile::TempDir;

    fn request(dir: &TempDir, mode: TransformMode) -> PlanRequest {
        PlanRequest {
            directory: dir.path().to_path_buf(),
            mode,
            selection: SelectionSpec::default(),
            list_options: ListOptions::default(),
        }
    }

    fn suffix(text: &str) -> TransformMode {
        TransformMode::Suffix {
            suffix: text.to_string(),
        }
    }

    #[test]
    fn test_rename_operation_renames_and_reconciles() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("a.txt"), "a").unwrap();
        fs::write(temp_dir.path().join("b.txt"), "b").unwrap();

        let result = rename_operation(
            &request(&temp_dir, suffix("_v2")),
            &RenameOptions::default(),
            |_| Ok(true),
        )
        .unwrap();

        assert_eq!(result.report.success_count, 2);
        assert!(temp_dir.path().join("a_v2.txt").exists());
        assert!(temp_dir.path().join("b_v2.txt").exists());
        assert!(!temp_dir.path().join("a.txt").exists());
        let names: Vec<_> = result.files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["a_v2.txt", "b_v2.txt"]);
    }

    #[test]
    fn test_rename_operation_cancelled() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("a.txt"), "a").unwrap();

        let result = rename_operation(
            &request(&temp_dir, suffix("_v2")),
            &RenameOptions::default(),
            |_| Ok(false),
        )
        .unwrap();

        assert!(result.cancelled);
        assert!(temp_dir.path().join("a.txt").exists());
    }

    #[test]
    fn test_rename_operation_dry_run_skips_confirmation() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("a.txt"), "a").unwrap();

        let options = RenameOptions {
            dry_run: true,
            ..RenameOptions::default()
        };
        let result = rename_operation(&request(&temp_dir, suffix("_v2")), &options, |_| {
            panic!("dry run must not ask for confirmation")
        })
        .unwrap();

        assert!(result.dry_run);
        assert_eq!(result.stats.planned, 1);
        assert!(temp_dir.path().join("a.txt").exists());
    }

    #[test]
    fn test_rename_operation_refuses_conflicts() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("a.txt"), "a").unwrap();
        fs::write(temp_dir.path().join("b.txt"), "b").unwrap();
        fs::create_dir(temp_dir.path().join("a_v2.txt")).unwrap();

        let err = rename_operation(
            &request(&temp_dir, suffix("_v2")),
            &RenameOptions::default(),
            |_| Ok(true),
        )
        .unwrap_err();
        assert_eq!(err.downcast_ref::<ConflictError>(), Some(&ConflictError { count: 1 }));
        assert!(temp_dir.path().join("b.txt").exists());

        let options = RenameOptions {
            skip_conflicts: true,
            ..RenameOptions::default()
        };
        let result =
            rename_operation(&request(&temp_dir, suffix("_v2")), &options, |_| Ok(true)).unwrap();
        assert_eq!(result.report.success_count, 1);
        assert!(temp_dir.path().join("b_v2.txt").exists());
        assert!(temp_dir.path().join("a.txt").exists());
        assert!(temp_dir.path().join("a_v2.txt").is_dir());
    }

    #[test]
    fn test_rename_operation_nothing_to_do() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("a.txt"), "a").unwrap();

        let mode = TransformMode::Replace {
            old: "zzz".to_string(),
            new: "y".to_string(),
            case_sensitive: true,
        };
        let result = rename_operation(&request(&temp_dir, mode), &RenameOptions::default(), |_| {
            panic!("nothing to confirm")
        })
        .unwrap();
        assert_eq!(result.report.attempted(), 0);
        assert!(!result.cancelled);
    }
}
