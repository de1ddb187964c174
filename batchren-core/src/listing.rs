use crate::error::ValidationError;
use crate::executor::RenameReport;
use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// One regular file of the listed directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Current base name, no path separators
    pub name: String,
    pub path: PathBuf,
    pub size_bytes: u64,
    pub modified_time: DateTime<Local>,
    pub selected: bool,
}

#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    /// Also list names starting with a dot
    pub include_hidden: bool,
}

/// The ordered file records of a single directory.
///
/// Records are identified by their index, which stays stable across renames.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileList {
    pub directory: PathBuf,
    pub records: Vec<FileRecord>,
}

impl FileList {
    /// List the regular files of `directory`, sorted by name.
    ///
    /// Subdirectories are never descended into. Names that are not valid
    /// UTF-8 are skipped with a warning since they cannot be transformed.
    pub fn load(directory: &Path, options: &ListOptions) -> Result<Self> {
        if !directory.is_dir() {
            return Err(ValidationError::NotADirectory(directory.to_path_buf()).into());
        }

        let mut records = Vec::new();
        for entry in WalkDir::new(directory)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry
                .with_context(|| format!("Failed to read directory {}", directory.display()))?;

            let Some(name) = entry.file_name().to_str() else {
                warn!(path = %entry.path().display(), "skipping file with non UTF-8 name");
                continue;
            };
            if !options.include_hidden && name.starts_with('.') {
                continue;
            }

            // Follows symlinks so that links to files are listed like files
            let Ok(metadata) = fs::metadata(entry.path()) else {
                debug!(name, "skipping entry without readable metadata");
                continue;
            };
            if !metadata.is_file() {
                continue;
            }

            let modified = metadata
                .modified()
                .with_context(|| format!("Failed to read modified time of {name}"))?;

            records.push(FileRecord {
                name: name.to_string(),
                path: entry.path().to_path_buf(),
                size_bytes: metadata.len(),
                modified_time: DateTime::<Local>::from(modified),
                selected: false,
            });
        }

        debug!(directory = %directory.display(), files = records.len(), "listed directory");

        Ok(Self {
            directory: directory.to_path_buf(),
            records,
        })
    }

    pub fn from_records(directory: impl Into<PathBuf>, records: Vec<FileRecord>) -> Self {
        Self {
            directory: directory.into(),
            records,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn total_size(&self) -> u64 {
        self.records.iter().map(|r| r.size_bytes).sum()
    }

    /// Bring the records in line with the renames that were applied.
    ///
    /// Entries are matched by index; the directory part of each path is kept.
    pub fn reconcile(&mut self, report: &RenameReport) {
        for applied in &report.applied {
            if let Some(record) = self.records.get_mut(applied.file_index) {
                record.path = record.path.with_file_name(&applied.new_name);
                record.name.clone_from(&applied.new_name);
            }
        }
    }
}

/// Every name present in `directory`, whatever its kind.
///
/// Used as the on-disk collision set: a rename onto a subdirectory name is as
/// much a conflict as a rename onto a file name.
pub fn directory_entry_names(directory: &Path) -> Result<HashSet<String>> {
    let mut names = HashSet::new();
    for entry in fs::read_dir(directory)
        .with_context(|| format!("Failed to read directory {}", directory.display()))?
    {
        let entry = entry?;
        names.insert(entry.file_name().to_string_lossy().into_owned());
    }
    Ok(names)
}

/// Format a byte count the way the file list shows it, e.g. `1.5 KB`
#[allow(clippy::cast_precision_loss)]
pub fn format_size(size_bytes: u64) -> String {
    let mut size = size_bytes as f64;
    for unit in ["B", "KB", "MB", "GB"] {
        if size < 1024.0 {
            return format!("{size:.1} {unit}");
        }
        size /= 1024.0;
    }
    format!("{size:.1} TB")
}
