//! Choosing which files of a listing take part in a batch.
//!
//! The order of the selection matters: numbering assigns ordinals in the
//! order returned here, so every selection is handed on as an explicit
//! ordered list of record indices.

use crate::error::ValidationError;
use crate::listing::FileList;
use globset::{Glob, GlobSetBuilder};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// How the caller wants files to be selected
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionSpec {
    /// Explicit file names, selected in this order
    pub files: Vec<String>,
    /// Glob patterns matched against file names
    pub globs: Vec<String>,
    /// Invert the selection after applying files and globs
    pub invert: bool,
}

impl FileList {
    pub fn select_all(&mut self) {
        for record in &mut self.records {
            record.selected = true;
        }
    }

    pub fn deselect_all(&mut self) {
        for record in &mut self.records {
            record.selected = false;
        }
    }

    pub fn invert_selection(&mut self) {
        for record in &mut self.records {
            record.selected = !record.selected;
        }
    }

    /// Indices of the selected records, in listing order
    pub fn selected_indices(&self) -> Vec<usize> {
        self.records
            .iter()
            .enumerate()
            .filter(|(_, r)| r.selected)
            .map(|(i, _)| i)
            .collect()
    }

    /// Select every record whose name matches one of `patterns`.
    ///
    /// Returns the indices that matched, in listing order.
    pub fn select_matching(&mut self, patterns: &[String]) -> Result<Vec<usize>, ValidationError> {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let glob = Glob::new(pattern).map_err(|e| ValidationError::InvalidGlob {
                pattern: pattern.clone(),
                message: e.kind().to_string(),
            })?;
            builder.add(glob);
        }
        let set = builder
            .build()
            .map_err(|e| ValidationError::InvalidGlob {
                pattern: patterns.join(","),
                message: e.kind().to_string(),
            })?;

        let mut matched = Vec::new();
        for (index, record) in self.records.iter_mut().enumerate() {
            if set.is_match(&record.name) {
                record.selected = true;
                matched.push(index);
            }
        }
        Ok(matched)
    }

    /// Select records by name, keeping the order in which names are given.
    ///
    /// A name listed twice is selected once, at its first position.
    pub fn select_ordered(&mut self, names: &[String]) -> Result<Vec<usize>, ValidationError> {
        let mut order = Vec::with_capacity(names.len());
        let mut seen = HashSet::new();
        for name in names {
            let index = self
                .records
                .iter()
                .position(|r| &r.name == name)
                .ok_or_else(|| ValidationError::UnknownFile(name.clone()))?;
            if seen.insert(index) {
                self.records[index].selected = true;
                order.push(index);
            }
        }
        Ok(order)
    }

    /// Apply a [`SelectionSpec`] from scratch and return the ordered selection.
    ///
    /// Explicit names come first in the order given, followed by glob matches
    /// in listing order. With neither, every file is selected. Inverting
    /// falls back to listing order.
    pub fn apply_selection(&mut self, spec: &SelectionSpec) -> Result<Vec<usize>, ValidationError> {
        self.deselect_all();

        let mut order = if spec.files.is_empty() && spec.globs.is_empty() {
            self.select_all();
            self.selected_indices()
        } else {
            self.select_ordered(&spec.files)?
        };

        if !spec.globs.is_empty() {
            for index in self.select_matching(&spec.globs)? {
                if !order.contains(&index) {
                    order.push(index);
                }
            }
        }

        if spec.invert {
            self.invert_selection();
            order = self.selected_indices();
        }

        if order.is_empty() {
            return Err(ValidationError::NoSelection);
        }
        Ok(order)
    }
}
