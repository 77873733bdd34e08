//! Filesystem capability consumed by the scanner.
//!
//! The scanner only ever needs three operations: expand a wildcard pattern,
//! walk a directory tree and read a small text file. [`HostFilesystem`] backs
//! them with the real filesystem and [`MemoryFilesystem`] with an in-memory
//! tree for tests.

mod host;
mod memory;

pub use host::HostFilesystem;
pub use memory::MemoryFilesystem;

use crate::Result;
use std::path::{Path, PathBuf};

/// The kind of entry reported by [`Filesystem::walk`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// A directory.
    Directory,
    /// A regular file.
    File,
    /// Anything else: symlinks, device nodes, sockets.
    Other,
}

/// Read-only filesystem operations used during a scan.
pub trait Filesystem {
    /// Expands a wildcard pattern into the matching paths, in order.
    ///
    /// Fails only when the pattern itself is malformed.
    fn expand(&self, pattern: &str) -> Result<Vec<PathBuf>>;

    /// Visits `root` and every entry below it.
    ///
    /// Fails only when `root` cannot be opened.
    fn walk(&self, root: &Path, visit: &mut dyn FnMut(&Path, EntryKind)) -> Result<()>;

    /// Reads a whole file and trims surrounding whitespace.
    fn read_text(&self, path: &Path) -> Result<String>;
}

impl<F: Filesystem + ?Sized> Filesystem for &F {
    fn expand(&self, pattern: &str) -> Result<Vec<PathBuf>> {
        (**self).expand(pattern)
    }

    fn walk(&self, root: &Path, visit: &mut dyn FnMut(&Path, EntryKind)) -> Result<()> {
        (**self).walk(root, visit)
    }

    fn read_text(&self, path: &Path) -> Result<String> {
        (**self).read_text(path)
    }
}
