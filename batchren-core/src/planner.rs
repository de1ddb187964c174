use crate::listing::FileRecord;
use crate::transform::{contains_separator, transform, TransformMode};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryStatus {
    /// The transformation leaves the name as it is
    Unchanged,
    /// The rename will be attempted
    Planned,
    /// The new name cannot be used
    Conflict,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictKind {
    /// Another selected file would get the same name
    DuplicateTarget,
    /// The new name is already taken in the directory
    ExistsOnDisk,
    /// Numbering is all-or-nothing and a duplicate elsewhere blocks the batch
    BatchRejected,
    /// The new name is not a usable file name
    InvalidName,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conflict {
    pub kind: ConflictKind,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanEntry {
    /// Index of the file in the listing it was selected from
    pub file_index: usize,
    pub path: PathBuf,
    pub old_name: String,
    pub new_name: String,
    pub status: EntryStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conflict: Option<Conflict>,
}

impl PlanEntry {
    /// Where the file ends up: same directory, new name
    pub fn target_path(&self) -> PathBuf {
        self.path.with_file_name(&self.new_name)
    }

    fn mark_conflict(&mut self, kind: ConflictKind, reason: String) {
        self.status = EntryStatus::Conflict;
        self.conflict = Some(Conflict { kind, reason });
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanStats {
    pub total: usize,
    pub planned: usize,
    pub unchanged: usize,
    pub conflicts: usize,
}

/// The computed, not yet applied, mapping from old to new names.
///
/// Entries follow the selection order. A plan is transient: it is recomputed
/// whenever the selection or the parameters change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenamePlan {
    pub mode: TransformMode,
    pub entries: Vec<PlanEntry>,
}

impl RenamePlan {
    pub fn stats(&self) -> PlanStats {
        let mut stats = PlanStats {
            total: self.entries.len(),
            ..PlanStats::default()
        };
        for entry in &self.entries {
            match entry.status {
                EntryStatus::Unchanged => stats.unchanged += 1,
                EntryStatus::Planned => stats.planned += 1,
                EntryStatus::Conflict => stats.conflicts += 1,
            }
        }
        stats
    }

    /// A plan with any conflict must not be executed as a whole
    pub fn is_executable(&self) -> bool {
        !self.has_conflicts()
    }

    pub fn has_conflicts(&self) -> bool {
        self.entries
            .iter()
            .any(|e| e.status == EntryStatus::Conflict)
    }

    pub fn planned(&self) -> impl Iterator<Item = &PlanEntry> {
        self.entries
            .iter()
            .filter(|e| e.status == EntryStatus::Planned)
    }

    pub fn conflicts(&self) -> impl Iterator<Item = &PlanEntry> {
        self.entries
            .iter()
            .filter(|e| e.status == EntryStatus::Conflict)
    }
}

/// Compute the rename plan for the selected records.
///
/// `selection` holds indices into `records` in selection order; the position
/// within it is the ordinal used by numbering. `existing_names` is every name
/// currently present in the directory.
///
/// # Panics
///
/// Panics if `selection` contains an index outside `records`.
pub fn plan_renames(
    records: &[FileRecord],
    selection: &[usize],
    mode: &TransformMode,
    existing_names: &HashSet<String>,
) -> RenamePlan {
    let mut entries: Vec<PlanEntry> = selection
        .iter()
        .enumerate()
        .map(|(ordinal, &file_index)| {
            let record = &records[file_index];
            let new_name = transform(&record.name, mode, ordinal);
            let status = if new_name == record.name {
                EntryStatus::Unchanged
            } else {
                EntryStatus::Planned
            };
            PlanEntry {
                file_index,
                path: record.path.clone(),
                old_name: record.name.clone(),
                new_name,
                status,
                conflict: None,
            }
        })
        .collect();

    // Names that stay in place are occupied targets too
    let kept: HashSet<String> = entries
        .iter()
        .filter(|e| e.status == EntryStatus::Unchanged)
        .map(|e| e.new_name.clone())
        .collect();

    let mut target_counts: HashMap<String, usize> = HashMap::new();
    for entry in entries.iter().filter(|e| e.status != EntryStatus::Unchanged) {
        *target_counts.entry(entry.new_name.clone()).or_insert(0) += 1;
    }

    let mut duplicates = 0;
    for entry in entries
        .iter_mut()
        .filter(|e| e.status != EntryStatus::Unchanged)
    {
        if let Some(reason) = invalid_name_reason(&entry.new_name) {
            entry.mark_conflict(ConflictKind::InvalidName, reason.to_string());
            continue;
        }

        let count = target_counts.get(&entry.new_name).copied().unwrap_or(0);
        if count > 1 || kept.contains(&entry.new_name) {
            duplicates += 1;
            let reason = format!("name '{}' would be used more than once", entry.new_name);
            entry.mark_conflict(ConflictKind::DuplicateTarget, reason);
            continue;
        }

        // The file's own current name differs from the target here, so any
        // hit is some other entry of the directory
        if existing_names.contains(&entry.new_name) {
            let reason = format!("file '{}' already exists", entry.new_name);
            entry.mark_conflict(ConflictKind::ExistsOnDisk, reason);
        }
    }

    if mode.is_numbering() && duplicates > 0 {
        for entry in entries
            .iter_mut()
            .filter(|e| e.status == EntryStatus::Planned)
        {
            let reason = format!(
                "numbering rejected: {duplicates} file(s) would get a duplicate name"
            );
            entry.mark_conflict(ConflictKind::BatchRejected, reason);
        }
    }

    let plan = RenamePlan {
        mode: mode.clone(),
        entries,
    };
    let stats = plan.stats();
    debug!(
        total = stats.total,
        planned = stats.planned,
        unchanged = stats.unchanged,
        conflicts = stats.conflicts,
        "computed rename plan"
    );
    plan
}

fn invalid_name_reason(name: &str) -> Option<&'static str> {
    if name.is_empty() {
        Some("new name is empty")
    } else if name == "." || name == ".." {
        Some("new name is reserved")
    } else if contains_separator(name) {
        Some("new name contains a path separator")
    } else {
        None
    }
}
