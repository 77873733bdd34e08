//! Host filesystem adapter.

use super::{EntryKind, Filesystem};
use crate::pattern::{Component, Pattern};
use crate::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A [`Filesystem`] backed by the host's real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct HostFilesystem;

impl HostFilesystem {
    /// Creates a new host filesystem adapter.
    pub fn new() -> Self {
        Self
    }

    /// Returns the sorted names in `dir` that match a wildcard component.
    /// An unreadable directory has no matches.
    fn matching_names(dir: &Path, component: &Component) -> Vec<String> {
        let Ok(entries) = fs::read_dir(dir) else {
            return Vec::new();
        };

        let mut names: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| entry.file_name().into_string().ok())
            .filter(|name| component.matches(name))
            .collect();
        names.sort();
        names
    }

    fn walk_dir(dir: &Path, visit: &mut dyn FnMut(&Path, EntryKind)) {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                debug!("Skipping unreadable directory {}: {}", dir.display(), e);
                return;
            }
        };

        let mut entries: Vec<_> = entries.filter_map(|entry| entry.ok()).collect();
        entries.sort_by_key(|entry| entry.file_name());

        for entry in entries {
            let path = entry.path();
            let kind = match entry.file_type() {
                Ok(file_type) => entry_kind(&file_type),
                Err(_) => EntryKind::Other,
            };

            visit(&path, kind);
            if kind == EntryKind::Directory {
                Self::walk_dir(&path, visit);
            }
        }
    }
}

fn entry_kind(file_type: &fs::FileType) -> EntryKind {
    if file_type.is_dir() {
        EntryKind::Directory
    } else if file_type.is_file() {
        EntryKind::File
    } else {
        EntryKind::Other
    }
}

impl Filesystem for HostFilesystem {
    fn expand(&self, pattern: &str) -> Result<Vec<PathBuf>> {
        let pattern = Pattern::parse(pattern)?;

        let mut candidates = vec![PathBuf::from("/")];
        for component in pattern.components() {
            let mut next = Vec::new();
            for dir in &candidates {
                match component {
                    Component::Literal(name) => {
                        let path = dir.join(name);
                        if fs::symlink_metadata(&path).is_ok() {
                            next.push(path);
                        }
                    }
                    Component::Wildcard(_) => {
                        next.extend(
                            Self::matching_names(dir, component)
                                .into_iter()
                                .map(|name| dir.join(name)),
                        );
                    }
                }
            }
            candidates = next;
        }

        Ok(candidates)
    }

    fn walk(&self, root: &Path, visit: &mut dyn FnMut(&Path, EntryKind)) -> Result<()> {
        // The root itself may be a symlink, as every /sys/class/hwmon entry
        // is; entries below it are never followed.
        let metadata = fs::metadata(root).map_err(|source| Error::Walk {
            path: root.to_path_buf(),
            source,
        })?;

        let kind = entry_kind(&metadata.file_type());
        if kind == EntryKind::Directory {
            // Opening the root is the one failure that is reported.
            fs::read_dir(root).map_err(|source| Error::Walk {
                path: root.to_path_buf(),
                source,
            })?;
        }

        visit(root, kind);
        if kind == EntryKind::Directory {
            Self::walk_dir(root, visit);
        }

        Ok(())
    }

    fn read_text(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path)
            .map(|s| s.trim().to_string())
            .map_err(|source| Error::Read {
                path: path.to_path_buf(),
                source,
            })
    }
}
