use anyhow::Result;
use batchren_core::{Config, NumberWidth, SelectionSpec, TransformMode};
use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use super::types::{OutputFormat, PreviewArg};

/// Rename a batch of files in one directory: replace, prefix, suffix, trim, number
#[derive(Parser, Debug)]
#[command(name = "batchren")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Run as if started in <path> instead of the current working directory
    #[arg(short = 'C', global = true, value_name = "PATH")]
    pub directory: Option<PathBuf>,

    /// Log more details to stderr (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Assume yes for all prompts
    #[arg(short = 'y', long = "yes", global = true, env = "BATCHREN_YES")]
    pub yes: bool,
}

/// Which files of the directory take part in the batch
#[derive(Args, Debug, Clone, Default)]
pub struct SelectionArgs {
    /// Files to rename, numbered in this order (defaults to every file)
    #[arg(value_name = "FILE")]
    pub files: Vec<String>,

    /// Select files whose name matches this glob (repeatable)
    #[arg(short = 'g', long = "glob", value_name = "PATTERN")]
    pub globs: Vec<String>,

    /// Select every file that the names and globs do not select
    #[arg(long)]
    pub invert: bool,
}

impl From<SelectionArgs> for SelectionSpec {
    fn from(args: SelectionArgs) -> Self {
        Self {
            files: args.files,
            globs: args.globs,
            invert: args.invert,
        }
    }
}

/// Preview arguments shared by plan and rename
#[derive(Args, Debug, Clone)]
pub struct PreviewArgs {
    /// Preview format (defaults from config if not specified)
    #[arg(long, value_enum, global = true)]
    pub preview: Option<PreviewArg>,

    /// Show at most this many files in the preview (0 shows all)
    #[arg(long, global = true, value_name = "N")]
    pub limit: Option<usize>,

    /// Output format for machine consumption
    #[arg(long, value_enum, global = true, default_value = "summary")]
    pub output: OutputFormat,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ModeCommand {
    /// Replace every occurrence of OLD with NEW
    Replace {
        /// Text to search for
        old: String,

        /// Replacement text (may be empty)
        new: String,

        /// Match OLD regardless of case
        #[arg(short = 'i', long)]
        ignore_case: bool,

        #[command(flatten)]
        selection: SelectionArgs,
    },

    /// Put TEXT in front of the name
    Prefix {
        text: String,

        #[command(flatten)]
        selection: SelectionArgs,
    },

    /// Put TEXT between the name and its extension
    Suffix {
        text: String,

        #[command(flatten)]
        selection: SelectionArgs,
    },

    /// Remove characters from the start of the name
    RemoveStart {
        /// Number of characters (defaults from config)
        #[arg(short = 'n', long)]
        count: Option<usize>,

        #[command(flatten)]
        selection: SelectionArgs,
    },

    /// Remove characters from the end of the name, before the extension
    RemoveEnd {
        /// Number of characters (defaults from config)
        #[arg(short = 'n', long)]
        count: Option<usize>,

        #[command(flatten)]
        selection: SelectionArgs,
    },

    /// Put a running number in front of each name, in selection order
    Number {
        /// First number
        #[arg(long)]
        start: Option<u64>,

        /// Increment between files
        #[arg(long)]
        step: Option<u64>,

        /// Minimum digits, zero padded (1-4)
        #[arg(long)]
        width: Option<u8>,

        /// Text between the number and the name
        #[arg(long)]
        separator: Option<String>,

        #[command(flatten)]
        selection: SelectionArgs,
    },
}

impl ModeCommand {
    /// Turn the parsed mode into a transformation and a selection, filling
    /// unset parameters from `config`
    pub fn resolve(self, config: &Config) -> Result<(TransformMode, SelectionSpec)> {
        let resolved = match self {
            Self::Replace {
                old,
                new,
                ignore_case,
                selection,
            } => (
                TransformMode::Replace {
                    old,
                    new,
                    case_sensitive: config.replace.case_sensitive && !ignore_case,
                },
                selection,
            ),
            Self::Prefix { text, selection } => (TransformMode::Prefix { prefix: text }, selection),
            Self::Suffix { text, selection } => (TransformMode::Suffix { suffix: text }, selection),
            Self::RemoveStart { count, selection } => (
                TransformMode::RemoveStart {
                    count: count.unwrap_or(config.remove.count),
                },
                selection,
            ),
            Self::RemoveEnd { count, selection } => (
                TransformMode::RemoveEnd {
                    count: count.unwrap_or(config.remove.count),
                },
                selection,
            ),
            Self::Number {
                start,
                step,
                width,
                separator,
                selection,
            } => {
                let width = match width {
                    Some(width) => NumberWidth::try_from(width)?,
                    None => config.numbering.width,
                };
                (
                    TransformMode::Numbering {
                        start: start.unwrap_or(config.numbering.start),
                        step: step.unwrap_or(config.numbering.step),
                        width,
                        separator: separator.unwrap_or_else(|| config.numbering.separator.clone()),
                    },
                    selection,
                )
            },
        };
        Ok((resolved.0, resolved.1.into()))
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the files of the directory
    List {
        /// Also list files whose name starts with a dot
        #[arg(long)]
        hidden: bool,

        /// Output format for machine consumption
        #[arg(long, value_enum, default_value = "summary")]
        output: OutputFormat,
    },

    /// Show what a transformation would do, without renaming anything
    Plan {
        #[command(subcommand)]
        mode: ModeCommand,

        #[command(flatten)]
        preview: PreviewArgs,

        /// Also plan files whose name starts with a dot
        #[arg(long, global = true)]
        hidden: bool,
    },

    /// Plan a transformation, confirm it and rename the files
    Rename {
        #[command(subcommand)]
        mode: ModeCommand,

        #[command(flatten)]
        preview: PreviewArgs,

        /// Also rename files whose name starts with a dot
        #[arg(long, global = true)]
        hidden: bool,

        /// Rename the files without conflicts and leave the others alone
        #[arg(long, global = true)]
        skip_conflicts: bool,

        /// Only show the plan, don't rename anything
        #[arg(long, global = true)]
        dry_run: bool,

        /// Append every rename to this file (defaults from config)
        #[arg(long, global = true, value_name = "PATH")]
        log_file: Option<PathBuf>,

        /// Suppress all output (alias for --preview none)
        #[arg(long, global = true)]
        quiet: bool,
    },

    /// Show version information
    Version {
        /// Output format for machine consumption
        #[arg(long, value_enum, default_value = "summary")]
        output: OutputFormat,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,

        /// Write the completion file into this directory instead of stdout
        #[arg(long, value_name = "DIR")]
        out_dir: Option<PathBuf>,
    },
}
