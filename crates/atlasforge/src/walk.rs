//! Discovery of atlas configuration files in a project tree.

use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::ConfigFormat;
use crate::error::{PackError, PackResult};

/// Lazy breadth-first walk yielding every atlas configuration file below a
/// root directory.
///
/// Entries of each directory are visited in file name order, so the sequence
/// is the same from run to run. Directories are read only when the walk
/// reaches them. A directory that cannot be read yields one error and the
/// walk carries on with the rest of the tree.
#[derive(Debug)]
pub struct AtlasFiles {
    /// Directories still to be read.
    queue: VecDeque<PathBuf>,
    /// Sorted entries of the directory being visited.
    pending: VecDeque<(PathBuf, fs::FileType)>,
}

impl AtlasFiles {
    /// Walk the tree rooted at `root`.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            queue: VecDeque::from([root.as_ref().to_path_buf()]),
            pending: VecDeque::new(),
        }
    }

    fn read_sorted(dir: &Path) -> PackResult<VecDeque<(PathBuf, fs::FileType)>> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(dir).map_err(|e| PackError::io(dir, e))? {
            let entry = entry.map_err(|e| PackError::io(dir, e))?;
            let file_type = entry.file_type().map_err(|e| PackError::io(entry.path(), e))?;
            entries.push((entry.path(), file_type));
        }
        entries.sort_by(|(a, _), (b, _)| a.file_name().cmp(&b.file_name()));
        Ok(entries.into())
    }
}

impl Iterator for AtlasFiles {
    type Item = PackResult<PathBuf>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            while let Some((path, file_type)) = self.pending.pop_front() {
                if file_type.is_dir() {
                    self.queue.push_back(path);
                } else if ConfigFormat::from_path(&path).is_some() {
                    return Some(Ok(path));
                }
            }

            let dir = self.queue.pop_front()?;
            match Self::read_sorted(&dir) {
                Ok(entries) => self.pending = entries,
                Err(e) => return Some(Err(e)),
            }
        }
    }
}
