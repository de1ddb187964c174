use anyhow::{Context, Result};
use batchren_core::{
    Config, ConflictError, ListOptions, OutputFormatter, PartialFailure, PlanRequest, Preview,
    RenameOptions, ValidationError, VersionResult,
};
use clap::{CommandFactory, Parser};
use std::path::{Path, PathBuf};
use std::process;
use std::str::FromStr;
use tracing_subscriber::EnvFilter;

mod cli;
mod list;
mod plan;
mod rename;

use cli::{Cli, Commands, OutputFormat, PreviewArgs};
use rename::RenameDisplay;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Handle -C directory flag
    if let Some(ref dir) = cli.directory {
        if let Err(e) = std::env::set_current_dir(dir)
            .with_context(|| format!("Failed to change to directory: {}", dir.display()))
        {
            eprintln!("Error: {e:#}");
            process::exit(2);
        }
    }

    // Load config to get defaults
    let config = Config::load().unwrap_or_else(|e| {
        tracing::warn!(error = %format!("{e:#}"), "ignoring unreadable config");
        Config::default()
    });
    let use_color = if cli.no_color {
        Some(false)
    } else {
        config.defaults.use_color
    };

    let result = run(cli.command, &config, use_color, cli.yes);

    match result {
        Ok(()) => process::exit(0),
        Err(e) => {
            eprintln!("Error: {e:#}");
            process::exit(exit_code(&e));
        },
    }
}

fn run(command: Commands, config: &Config, use_color: Option<bool>, yes: bool) -> Result<()> {
    let current_dir = std::env::current_dir().context("Failed to get current directory")?;

    match command {
        Commands::List { hidden, output } => list::handle_list(
            &current_dir,
            hidden || config.defaults.include_hidden,
            output,
        ),

        Commands::Plan {
            mode,
            preview,
            hidden,
        } => {
            let request = build_request(&current_dir, mode, hidden, config)?;
            let format = preview_format(&preview, config);
            plan::handle_plan(
                &request,
                format,
                use_color,
                preview_limit(&preview, config),
                preview.output,
            )
        },

        Commands::Rename {
            mode,
            preview,
            hidden,
            skip_conflicts,
            dry_run,
            log_file,
            quiet,
        } => {
            let request = build_request(&current_dir, mode, hidden, config)?;
            let options = RenameOptions {
                skip_conflicts,
                dry_run,
                log_file: log_file.or_else(|| config.defaults.log_file.clone()),
            };
            let display = RenameDisplay {
                preview: preview_format(&preview, config),
                use_color,
                limit: preview_limit(&preview, config),
                output: preview.output,
                quiet,
            };
            rename::handle_rename(&request, &options, display, yes)
        },

        Commands::Version { output } => handle_version(output),

        Commands::Completions { shell, out_dir } => {
            let mut cmd = Cli::command();
            match out_dir {
                Some(dir) => generate_completions(shell, &mut cmd, "batchren", &dir),
                None => {
                    clap_complete::generate(shell, &mut cmd, "batchren", &mut std::io::stdout());
                    Ok(())
                },
            }
        },
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = if verbose > 0 {
        EnvFilter::new(default_level)
    } else {
        EnvFilter::try_from_env("BATCHREN_LOG").unwrap_or_else(|_| EnvFilter::new(default_level))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn build_request(
    directory: &Path,
    mode: cli::ModeCommand,
    hidden: bool,
    config: &Config,
) -> Result<PlanRequest> {
    let (mode, selection) = mode.resolve(config)?;
    Ok(PlanRequest {
        directory: directory.to_path_buf(),
        mode,
        selection,
        list_options: ListOptions {
            include_hidden: hidden || config.defaults.include_hidden,
        },
    })
}

/// The preview to show, from the CLI or the config; JSON output has none
fn preview_format(args: &PreviewArgs, config: &Config) -> Option<Preview> {
    if args.output == OutputFormat::Json {
        return None;
    }
    Some(args.preview.map_or_else(
        || Preview::from_str(&config.defaults.preview_format).unwrap_or(Preview::Table),
        Into::into,
    ))
}

fn preview_limit(args: &PreviewArgs, config: &Config) -> Option<usize> {
    match args.limit.unwrap_or(config.defaults.preview_limit) {
        0 => None,
        limit => Some(limit),
    }
}

/// 1 for conflicts and failed renames, 2 for invalid input, 3 for anything else
fn exit_code(error: &anyhow::Error) -> i32 {
    if error.downcast_ref::<ConflictError>().is_some()
        || error.downcast_ref::<PartialFailure>().is_some()
    {
        1
    } else if error.downcast_ref::<ValidationError>().is_some() {
        2
    } else {
        3
    }
}

// Generate shell completions
pub fn generate_completions<G: clap_complete::Generator>(
    gen: G,
    cmd: &mut clap::Command,
    name: &str,
    out_dir: &Path,
) -> Result<()> {
    use clap_complete::generate_to;
    use std::fs;

    fs::create_dir_all(out_dir)?;
    let path: PathBuf = generate_to(gen, cmd, name, out_dir)?;
    println!("Generated completion file: {}", path.display());
    Ok(())
}

fn handle_version(output: OutputFormat) -> Result<()> {
    let version_result = VersionResult {
        name: "batchren".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    println!("{}", version_result.format(output.into()));
    Ok(())
}
