//! Ordered list of animation files played in a cycle.

use std::path::PathBuf;

use crate::error::{PlayerError, Result};

/// Input files in the order the user gave them.
///
/// The stored order is never mutated; each cycle asks for its own (possibly shuffled) copy.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Playlist {
    files: Vec<PathBuf>,
}

impl Playlist {
    /// Build a playlist; rejects an empty file list.
    pub fn new(files: Vec<PathBuf>) -> Result<Self> {
        if files.is_empty() {
            return Err(PlayerError::NoInputs);
        }
        Ok(Self { files })
    }

    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Fail on the first path that does not exist.
    pub fn ensure_exists(&self) -> Result<()> {
        match self.files.iter().find(|p| !p.exists()) {
            Some(missing) => Err(PlayerError::MissingFile(missing.clone())),
            None => Ok(()),
        }
    }

    /// Play order for one cycle: input order, or a uniform permutation when `shuffle` is set.
    pub fn cycle_order(&self, shuffle: bool, rng: &mut fastrand::Rng) -> Vec<PathBuf> {
        let mut order = self.files.clone();
        if shuffle {
            rng.shuffle(&mut order);
        }
        order
    }
}

/// File names of `order`, for log lines.
pub fn display_names(order: &[PathBuf]) -> Vec<String> {
    order
        .iter()
        .map(|p| {
            p.file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| p.display().to_string())
        })
        .collect()
}
