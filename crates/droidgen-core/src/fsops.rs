//! Filesystem primitives with the pipeline's two copy semantics
//!
//! `replace_tree` and `merge_tree` are deliberately separate operations with
//! different invariants. `replace_tree` resets the destination to an exact
//! copy of the source; `merge_tree` overlays source files onto whatever is
//! already at the destination, leaving unrelated files alone. Several plugin
//! trees are superimposed into one destination, so the overlay must never
//! delete what an earlier overlay put there.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use walkdir::WalkDir;

use crate::error::{Error, Result};

/// Read a file as UTF-8 text, mapping a missing file to `MissingResource`.
pub fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => Error::MissingResource(path.to_path_buf()),
        _ => Error::Io(e),
    })
}

/// Write text to a file, creating parent directories as needed.
pub fn write_text(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    Ok(())
}

/// Destructive tree copy: any pre-existing destination is deleted first.
///
/// Every generated project starts from an identical baseline regardless of
/// leftover state from earlier runs; running this twice against the same
/// destination is byte-identical to running it once.
pub fn replace_tree(src: &Path, dst: &Path) -> Result<()> {
    if !src.is_dir() {
        return Err(Error::MissingResource(src.to_path_buf()));
    }
    if dst.exists() {
        fs::remove_dir_all(dst)?;
    }
    copy_tree(src, dst)
}

fn copy_tree(src: &Path, dst: &Path) -> Result<()> {
    for entry in WalkDir::new(src) {
        let entry = entry.map_err(std::io::Error::from)?;
        let rel = entry
            .path()
            .strip_prefix(src)
            .expect("walkdir entries are rooted at src");
        let target = dst.join(rel);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}

/// Non-destructive overlay copy.
///
/// Recurses into matching subdirectories and, file by file, overwrites a
/// destination file only when a same-named source file exists. Destination
/// files with no counterpart in the source are left untouched.
pub fn merge_tree(src: &Path, dst: &Path) -> Result<()> {
    if !src.is_dir() {
        return Err(Error::MissingResource(src.to_path_buf()));
    }
    fs::create_dir_all(dst)?;
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let target = dst.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            merge_tree(&entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}

/// Copy one file, creating intermediate directories. A missing source is a
/// hard failure, never a silent skip.
pub fn copy_file_creating_dirs(src: &Path, dst: &Path) -> Result<()> {
    if !src.is_file() {
        return Err(Error::MissingResource(src.to_path_buf()));
    }
    if let Some(parent) = dst.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::copy(src, dst)?;
    Ok(())
}

/// Rename a directory or file; equal source and destination is a no-op, so
/// already-correct names survive repeated runs.
pub fn rename_if_different(src: &Path, dst: &Path) -> Result<()> {
    if src != dst {
        fs::rename(src, dst)?;
    }
    Ok(())
}
