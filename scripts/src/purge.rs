//! Recursive removal of build output directories.
//!
//! Filesystem access goes through the [`Filesystem`] trait, so the traversal
//! can run against the real disk ([`OsFilesystem`]) or an in-memory tree.
//!
//! Symlinks are classified by the link itself and never followed: a link to a
//! directory is unlinked like a file, and its target is left untouched. This
//! holds for the purged path too, dangling or not.

use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::{debug, warn};

use crate::errors::ScriptError;

/// The kind of a directory entry, resolved once when its parent is listed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryKind {
    /// Anything that is not a directory, symlinks included
    File,
    /// A subdirectory
    Directory,
}

/// An immediate child of a listed directory
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DirEntry {
    /// The full path of the child
    pub path: PathBuf,
    /// Whether the child is a file or a subdirectory
    pub kind: EntryKind,
}

/// The result of purging a path
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PurgeOutcome {
    /// The path and everything under it were removed
    Removed,
    /// The path did not exist, nothing was touched
    NotFound,
}

/// The filesystem operations needed to purge a directory tree
pub trait Filesystem {
    /// Whether anything exists at the given path
    fn exists(&self, path: &Path) -> bool;

    /// Whether the path is itself a symlink, without following it
    fn is_symlink(&self, path: &Path) -> bool;

    /// List the immediate children of a directory
    fn list_children(&self, path: &Path) -> Result<Vec<DirEntry>, ScriptError>;

    /// Delete a single non-directory entry
    fn delete_file(&self, path: &Path) -> Result<(), ScriptError>;

    /// Remove a directory, which must already be empty
    fn remove_empty_dir(&self, path: &Path) -> Result<(), ScriptError>;
}

/// A [`Filesystem`] backed by `std::fs`
#[derive(Clone, Copy, Debug, Default)]
pub struct OsFilesystem;

impl Filesystem for OsFilesystem {
    fn exists(&self, path: &Path) -> bool {
        // Dangling symlinks still count as present
        fs::symlink_metadata(path).is_ok()
    }

    fn is_symlink(&self, path: &Path) -> bool {
        fs::symlink_metadata(path).is_ok_and(|meta| meta.file_type().is_symlink())
    }

    fn list_children(&self, path: &Path) -> Result<Vec<DirEntry>, ScriptError> {
        let read_dir_err =
            |e: std::io::Error| ScriptError::ReadDirectory(format!("{}: {}", path.display(), e));

        let mut children = Vec::new();
        for entry in fs::read_dir(path).map_err(read_dir_err)? {
            let entry = entry.map_err(read_dir_err)?;
            // `DirEntry::file_type` does not traverse symlinks
            let kind = if entry.file_type().map_err(read_dir_err)?.is_dir() {
                EntryKind::Directory
            } else {
                EntryKind::File
            };

            children.push(DirEntry {
                path: entry.path(),
                kind,
            });
        }

        // `read_dir` order is platform-dependent
        children.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(children)
    }

    fn delete_file(&self, path: &Path) -> Result<(), ScriptError> {
        fs::remove_file(path)
            .map_err(|e| ScriptError::RemoveFile(format!("{}: {}", path.display(), e)))
    }

    fn remove_empty_dir(&self, path: &Path) -> Result<(), ScriptError> {
        fs::remove_dir(path)
            .map_err(|e| ScriptError::RemoveDirectory(format!("{}: {}", path.display(), e)))
    }
}

/// Deletes everything under `path`, depth-first, and then `path` itself.
///
/// A missing `path` is not an error: a diagnostic is logged and
/// [`PurgeOutcome::NotFound`] is returned. Any I/O failure aborts the
/// traversal immediately and leaves the remaining tree in place.
pub fn purge_dir<F: Filesystem + ?Sized>(
    fs: &F,
    path: &Path,
) -> Result<PurgeOutcome, ScriptError> {
    if !fs.exists(path) {
        warn!("Directory path not found: {}", path.display());
        return Ok(PurgeOutcome::NotFound);
    }

    // `read_dir` would traverse the link into its target
    if fs.is_symlink(path) {
        fs.delete_file(path)?;
        debug!("Unlinked {}", path.display());
        return Ok(PurgeOutcome::Removed);
    }

    for child in fs.list_children(path)? {
        match child.kind {
            EntryKind::Directory => {
                purge_dir(fs, &child.path)?;
            }
            EntryKind::File => fs.delete_file(&child.path)?,
        }
    }

    fs.remove_empty_dir(path)?;
    debug!("Removed {}", path.display());

    Ok(PurgeOutcome::Removed)
}
