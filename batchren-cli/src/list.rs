use anyhow::Result;
use batchren_core::{list_operation, ListOptions, OutputFormatter};
use std::path::Path;

use crate::OutputFormat;

pub fn handle_list(directory: &Path, include_hidden: bool, output: OutputFormat) -> Result<()> {
    let result = list_operation(directory, &ListOptions { include_hidden })?;

    match output {
        OutputFormat::Json => println!("{}", result.format_json()),
        OutputFormat::Summary => print!("{}", result.format_summary()),
    }
    Ok(())
}
