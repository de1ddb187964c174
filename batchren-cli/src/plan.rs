use anyhow::Result;
use batchren_core::{plan_operation, OutputFormatter, PlanRequest, Preview};

use crate::OutputFormat;

pub fn handle_plan(
    request: &PlanRequest,
    preview: Option<Preview>,
    use_color: Option<bool>,
    limit: Option<usize>,
    output: OutputFormat,
) -> Result<()> {
    let (result, preview_output) =
        plan_operation(request, preview.unwrap_or(Preview::None), use_color, limit)?;

    match output {
        OutputFormat::Json => println!("{}", result.format_json()),
        OutputFormat::Summary => {
            if let Some(preview) = preview_output {
                println!("{}", preview.trim_end());
            }
            print!("{}", result.format_summary());
        },
    }
    Ok(())
}
