#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::option_if_let_else)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod config;
pub mod error;
pub mod executor;
pub mod listing;
pub mod operations;
pub mod output;
pub mod planner;
pub mod preview;
pub mod selection;
pub mod transform;

pub use config::Config;
pub use error::{ConflictError, PartialFailure, RenameError, ValidationError};
pub use executor::{execute_plan, AppliedRename, ExecuteOptions, RenameFailure, RenameReport};
pub use listing::{directory_entry_names, format_size, FileList, FileRecord, ListOptions};
pub use operations::{
    build_plan, execute_prepared, list_operation, plan_operation, prepare_rename,
    rename_operation, PlanRequest, PreparedRename, RenameOptions,
};
pub use output::{
    ListResult, OutputFormat, OutputFormatter, PlanResult, RenameResult, VersionResult,
};
pub use planner::{
    plan_renames, Conflict, ConflictKind, EntryStatus, PlanEntry, PlanStats, RenamePlan,
};
pub use preview::{render_plan, should_use_color, write_preview, Preview};
pub use selection::SelectionSpec;
pub use transform::{split_name, transform, NumberWidth, TransformMode};
