//! Application source and asset aggregation

use std::path::Path;

use crate::error::{Error, Result};
use crate::fsops;

/// Copy every declared source pattern into the output sources root.
///
/// A pattern containing a wildcard is expanded against `app_root`; each match
/// keeps its path suffix relative to `app_root`. A literal pattern names one
/// file copied to the same relative location with parents created as needed.
/// A literal path that does not exist aborts the run.
pub fn copy_app_sources(app_root: &Path, patterns: &[String], dst_root: &Path) -> Result<()> {
    for pattern in patterns {
        if pattern.contains('*') {
            copy_glob_matches(app_root, pattern, dst_root)?;
        } else {
            fsops::copy_file_creating_dirs(&app_root.join(pattern), &dst_root.join(pattern))?;
        }
    }
    Ok(())
}

fn copy_glob_matches(app_root: &Path, pattern: &str, dst_root: &Path) -> Result<()> {
    let rooted = app_root.join(pattern);
    let rooted = rooted.to_string_lossy();
    let matches = glob::glob(&rooted).map_err(|source| Error::Pattern {
        pattern: pattern.to_string(),
        source,
    })?;

    for path in matches {
        let path = path.map_err(|e| Error::Io(e.into_error()))?;
        if !path.is_file() {
            continue;
        }
        let rel = path
            .strip_prefix(app_root)
            .expect("glob matches are rooted at the app root")
            .to_path_buf();
        fsops::copy_file_creating_dirs(&path, &dst_root.join(rel))?;
    }
    Ok(())
}

/// Copy the `default/raw` subtree of the declared asset root into the output
/// assets location.
pub fn copy_app_assets(app_root: &Path, assets_dir: &str, dst: &Path) -> Result<()> {
    let src = app_root.join(assets_dir).join("default/raw");
    fsops::replace_tree(&src, dst)
}
