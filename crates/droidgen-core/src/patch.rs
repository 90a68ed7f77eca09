//! Build descriptor, manifest and registration-source patching
//!
//! Every substitution is a literal replacement of a unique placeholder
//! token; the tokens are chosen never to collide with legitimate file
//! content (XML comments in the manifest, line comments in gradle/java).

use std::path::Path;

use crate::config::AppConfig;
use crate::error::Result;
use crate::plugins::PluginSet;
use crate::tokens::TokenMap;

/// Include-path block placeholder in the CMake build descriptor.
pub const TOKEN_INCLUDES: &str = "EXTRA_INCLUDES";
pub const TOKEN_CFLAGS: &str = "EXTRA_CFLAGS";
pub const TOKEN_DEFINES: &str = "EXTRA_DEFINES";
pub const TOKEN_CPPFLAGS: &str = "EXTRA_CPPFLAGS";

/// Manifest placeholders.
pub const TOKEN_PERMISSIONS: &str = "<!--EXTRA_PERMISSIONS-->";
pub const TOKEN_ACTIVITIES: &str = "<!--EXTRA_ACTIVITIES-->";
pub const TOKEN_THEME: &str = "APP_THEME";

/// Dependency placeholder in `app/build.gradle`.
pub const TOKEN_DEPENDENCIES: &str = "//EXTRA_DEPENDENCIES";
/// Registration placeholder in the generated `PluginRegistry.java`.
pub const TOKEN_REGISTRATIONS: &str = "//EXTRA_REGISTRATIONS";

const THEME_DEFAULT: &str = "@android:style/Theme.Black.NoTitleBar";
const THEME_FULLSCREEN: &str = "@android:style/Theme.Black.NoTitleBar.Fullscreen";

/// Substitute the include/flag placeholders in the CMake build descriptor.
///
/// The include block is always anchored by the vendored source and
/// third-party roots; config-declared include directories follow, one per
/// line.
pub fn patch_build_descriptor(path: &Path, config: &AppConfig) -> Result<()> {
    let mut includes = String::from("${APP_SOURCE_DIR}/toolkit/src\n  ${APP_SOURCE_DIR}/toolkit/3rd");
    for dir in &config.includes {
        includes.push_str("\n  ${APP_SOURCE_DIR}/");
        includes.push_str(dir);
    }

    let mut map = TokenMap::new();
    map.insert(TOKEN_INCLUDES, includes);
    map.insert(TOKEN_CFLAGS, config.cflags.clone());
    map.insert(TOKEN_DEFINES, config.defines.clone());
    map.insert(TOKEN_CPPFLAGS, config.cppflags.clone());
    debug_assert!(map.is_disjoint());
    map.apply_to_file(path)
}

/// Substitute the aggregated plugin fragments and the theme into the
/// manifest. The fullscreen feature flag selects the fullscreen theme.
pub fn patch_manifest(path: &Path, config: &AppConfig, set: &PluginSet) -> Result<()> {
    let theme = if config.has_feature("fullscreen") {
        THEME_FULLSCREEN
    } else {
        THEME_DEFAULT
    };

    let mut map = TokenMap::new();
    map.insert(TOKEN_PERMISSIONS, set.permissions_block());
    map.insert(TOKEN_ACTIVITIES, set.activities_block());
    map.insert(TOKEN_THEME, theme);
    debug_assert!(map.is_disjoint());
    map.apply_to_file(path)
}

/// Substitute the aggregated dependency lines into the gradle build file.
pub fn patch_dependencies(path: &Path, set: &PluginSet) -> Result<()> {
    let mut map = TokenMap::new();
    map.insert(TOKEN_DEPENDENCIES, set.dependencies_block());
    map.apply_to_file(path)
}

/// Substitute the generated registration statements into the plugin
/// registry source.
pub fn patch_registrations(path: &Path, set: &PluginSet) -> Result<()> {
    let mut map = TokenMap::new();
    map.insert(TOKEN_REGISTRATIONS, set.registration_source());
    map.apply_to_file(path)
}
