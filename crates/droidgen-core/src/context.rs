//! Immutable path and environment context for one generation run

use std::env;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Environment variable naming the Android SDK root.
pub const ANDROID_HOME: &str = "ANDROID_HOME";
/// Environment variable naming the Android NDK root.
pub const ANDROID_NDK_HOME: &str = "ANDROID_NDK_HOME";
/// Optional override for the toolkit checkout location.
pub const TOOLKIT_DIR: &str = "TOOLKIT_DIR";

/// Every root directory and environment-derived path the pipeline touches.
///
/// Constructed once per run and passed by reference into every stage; nothing
/// reads the process environment after construction, so tests build one
/// directly with fake roots.
#[derive(Debug, Clone)]
pub struct ProjectContext {
    /// Android SDK root, recorded into the generated `local.properties`.
    pub sdk_home: PathBuf,
    /// Android NDK root, recorded into the generated `local.properties`.
    pub ndk_home: PathBuf,
    /// Toolkit checkout whose `src` and `3rd` trees are vendored into every
    /// generated project.
    pub toolkit_dir: PathBuf,
    /// Read-only template skeleton copied per run.
    pub template_dir: PathBuf,
    /// Parent of all generated project trees.
    pub build_dir: PathBuf,
    /// Root holding per-plugin descriptor and source directories.
    pub plugins_dir: PathBuf,
}

impl ProjectContext {
    /// Build a context from the process environment, rooted at `root`
    /// (normally the tool's working directory).
    ///
    /// Fails before any filesystem mutation when `ANDROID_HOME` or
    /// `ANDROID_NDK_HOME` is unset.
    pub fn from_env(root: &Path) -> Result<Self> {
        let sdk_home = require_env(ANDROID_HOME)?;
        let ndk_home = require_env(ANDROID_NDK_HOME)?;
        let toolkit_dir = env::var_os(TOOLKIT_DIR)
            .map(PathBuf::from)
            .unwrap_or_else(|| root.join("../toolkit"));

        Ok(Self {
            sdk_home,
            ndk_home,
            toolkit_dir,
            template_dir: root.join("android-project"),
            build_dir: root.join("build"),
            plugins_dir: root.join("plugins"),
        })
    }

    /// Destination project root for the given short application name.
    pub fn project_dir(&self, short_name: &str) -> PathBuf {
        self.build_dir.join(short_name)
    }
}

fn require_env(name: &'static str) -> Result<PathBuf> {
    env::var_os(name)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .ok_or(Error::Environment(name))
}
