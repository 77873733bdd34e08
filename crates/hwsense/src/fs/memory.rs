//! In-memory filesystem adapter.

use super::{EntryKind, Filesystem};
use crate::pattern::Pattern;
use crate::{Error, Result};
use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
enum MemoryEntry {
    Directory,
    File(String),
    Unreadable,
    Special,
}

/// A [`Filesystem`] holding an in-memory tree of files.
///
/// Inserting a file also creates all of its ancestor directories.
#[derive(Debug, Clone, Default)]
pub struct MemoryFilesystem {
    entries: BTreeMap<PathBuf, MemoryEntry>,
}

impl MemoryFilesystem {
    /// Creates an empty in-memory filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a directory.
    pub fn dir(mut self, path: impl AsRef<Path>) -> Self {
        self.insert(path.as_ref(), MemoryEntry::Directory);
        self
    }

    /// Adds a regular file with the given contents.
    pub fn file(mut self, path: impl AsRef<Path>, contents: impl Into<String>) -> Self {
        self.insert(path.as_ref(), MemoryEntry::File(contents.into()));
        self
    }

    /// Adds a regular file whose reads always fail.
    pub fn unreadable(mut self, path: impl AsRef<Path>) -> Self {
        self.insert(path.as_ref(), MemoryEntry::Unreadable);
        self
    }

    /// Adds an entry that is neither a file nor a directory, like a symlink.
    pub fn special(mut self, path: impl AsRef<Path>) -> Self {
        self.insert(path.as_ref(), MemoryEntry::Special);
        self
    }

    fn insert(&mut self, path: &Path, entry: MemoryEntry) {
        for ancestor in path.ancestors().skip(1) {
            if ancestor.as_os_str().is_empty() {
                break;
            }
            self.entries
                .entry(ancestor.to_path_buf())
                .or_insert(MemoryEntry::Directory);
        }
        self.entries.insert(path.to_path_buf(), entry);
    }
}

impl MemoryEntry {
    fn kind(&self) -> EntryKind {
        match self {
            MemoryEntry::Directory => EntryKind::Directory,
            MemoryEntry::File(_) | MemoryEntry::Unreadable => EntryKind::File,
            MemoryEntry::Special => EntryKind::Other,
        }
    }
}

impl Filesystem for MemoryFilesystem {
    fn expand(&self, pattern: &str) -> Result<Vec<PathBuf>> {
        let pattern = Pattern::parse(pattern)?;
        Ok(self
            .entries
            .keys()
            .filter(|path| pattern.matches(path))
            .cloned()
            .collect())
    }

    fn walk(&self, root: &Path, visit: &mut dyn FnMut(&Path, EntryKind)) -> Result<()> {
        match self.entries.get(root) {
            Some(MemoryEntry::Directory) => {}
            Some(_) => {
                return Err(Error::Walk {
                    path: root.to_path_buf(),
                    source: io::Error::new(io::ErrorKind::Other, "not a directory"),
                })
            }
            None => {
                return Err(Error::Walk {
                    path: root.to_path_buf(),
                    source: io::Error::new(io::ErrorKind::NotFound, "no such directory"),
                })
            }
        }

        for (path, entry) in self.entries.range(root.to_path_buf()..) {
            if !path.starts_with(root) {
                break;
            }
            visit(path, entry.kind());
        }

        Ok(())
    }

    fn read_text(&self, path: &Path) -> Result<String> {
        let error = |kind: io::ErrorKind, message: &str| Error::Read {
            path: path.to_path_buf(),
            source: io::Error::new(kind, message.to_string()),
        };

        match self.entries.get(path) {
            Some(MemoryEntry::File(contents)) => Ok(contents.trim().to_string()),
            Some(MemoryEntry::Unreadable) => {
                Err(error(io::ErrorKind::PermissionDenied, "permission denied"))
            }
            Some(_) => Err(error(io::ErrorKind::Other, "not a regular file")),
            None => Err(error(io::ErrorKind::NotFound, "no such file")),
        }
    }
}
