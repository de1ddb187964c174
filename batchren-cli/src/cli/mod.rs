pub mod args;
pub mod types;

pub use args::{Cli, Commands, ModeCommand, PreviewArgs};
pub use types::OutputFormat;
