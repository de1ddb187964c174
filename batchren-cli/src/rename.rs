use anyhow::{Context, Result};
use batchren_core::{
    rename_operation, write_preview, OutputFormatter, PlanRequest, Preview, RenameOptions,
    RenamePlan,
};
use std::io::{self, BufRead, Write};

use crate::OutputFormat;

/// How the rename command presents itself
#[derive(Debug, Clone, Copy)]
pub struct RenameDisplay {
    pub preview: Option<Preview>,
    pub use_color: Option<bool>,
    pub limit: Option<usize>,
    pub output: OutputFormat,
    pub quiet: bool,
}

pub fn handle_rename(
    request: &PlanRequest,
    options: &RenameOptions,
    display: RenameDisplay,
    auto_approve: bool,
) -> Result<()> {
    let show_preview = |plan: &RenamePlan| -> Result<()> {
        match display.preview {
            Some(format) if display.output == OutputFormat::Summary && !display.quiet => {
                write_preview(plan, format, display.use_color, display.limit)?;
                if format != Preview::Json {
                    println!();
                }
                Ok(())
            },
            _ => Ok(()),
        }
    };

    let mut previewed = false;
    let result = rename_operation(request, options, |plan| {
        show_preview(plan)?;
        previewed = true;
        if auto_approve {
            return Ok(true);
        }
        let stdin = io::stdin();
        get_user_confirmation(&mut stdin.lock())
    })?;
    if !previewed {
        show_preview(&result.plan)?;
    }

    match display.output {
        OutputFormat::Json => println!("{}", result.format_json()),
        OutputFormat::Summary => {
            if !display.quiet {
                print!("{}", result.format_summary());
            }
        },
    }

    if let Some(failure) = result.failure() {
        return Err(failure.into());
    }
    Ok(())
}

/// Ask on stderr and read the answer; anything but `y`/`yes` declines
fn get_user_confirmation<R: BufRead>(reader: &mut R) -> Result<bool> {
    eprint!("Apply these changes? [y/N]: ");
    io::stderr().flush().context("Failed to flush stderr")?;

    let mut input = String::new();
    reader
        .read_line(&mut input)
        .context("Failed to read user input")?;
    let input = input.trim().to_lowercase();

    Ok(input == "y" || input == "yes")
}
