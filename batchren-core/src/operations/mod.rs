//! High-level operations that correspond to CLI commands
//!
//! These modules contain the core logic for each batchren operation,
//! separated from CLI concerns like argument parsing and output formatting.

pub mod list;
pub mod plan;
pub mod rename;

pub use list::list_operation;
pub use plan::{build_plan, plan_operation, PlanRequest};
pub use rename::{
    execute_prepared, prepare_rename, rename_operation, PreparedRename, RenameOptions,
};
