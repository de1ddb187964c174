use crate::listing::{directory_entry_names, FileList, ListOptions};
use crate::output::PlanResult;
use crate::planner::{plan_renames, RenamePlan};
use crate::preview::{render_plan, Preview};
use crate::selection::SelectionSpec;
use crate::transform::TransformMode;
use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::info;

/// Everything needed to compute a rename plan for one directory
#[derive(Debug, Clone)]
pub struct PlanRequest {
    pub directory: PathBuf,
    pub mode: TransformMode,
    pub selection: SelectionSpec,
    pub list_options: ListOptions,
}

/// List the directory, apply the selection and compute the plan.
///
/// Parameters and selection are validated first; a validation error means
/// nothing was planned.
pub fn build_plan(request: &PlanRequest) -> Result<(FileList, RenamePlan)> {
    request.mode.validate()?;

    let mut list = FileList::load(&request.directory, &request.list_options)?;
    let order = list.apply_selection(&request.selection)?;
    let existing = directory_entry_names(&request.directory)
        .context("Failed to collect existing names")?;

    let plan = plan_renames(&list.records, &order, &request.mode, &existing);
    info!(
        directory = %request.directory.display(),
        mode = plan.mode.name(),
        selected = order.len(),
        "planned renames"
    );
    Ok((list, plan))
}

/// Plan operation - returns structured data and the rendered preview
pub fn plan_operation(
    request: &PlanRequest,
    preview: Preview,
    use_color: Option<bool>,
    limit: Option<usize>,
) -> Result<(PlanResult, Option<String>)> {
    let (_, plan) = build_plan(request)?;

    let preview_output = match preview {
        Preview::None => None,
        format => Some(render_plan(&plan, format, use_color, limit)),
    };

    let result = PlanResult {
        directory: request.directory.clone(),
        description: plan.mode.to_string(),
        stats: plan.stats(),
        executable: plan.is_executable(),
        plan,
    };
    Ok((result, preview_output))
}
