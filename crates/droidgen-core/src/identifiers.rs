//! Template identifier rewriting and package directory renaming

use std::path::Path;

use crate::config::AppId;
use crate::error::Result;
use crate::fsops;
use crate::tokens::TokenMap;

/// Full package identifier baked into the template skeleton.
pub const TEMPLATE_PACKAGE: &str = "org.example.apptemplate";
/// Short-name token, also the template's java package leaf directory.
pub const TEMPLATE_SHORT_NAME: &str = "apptemplate";
/// Display-name token used in resources and gradle project naming.
pub const TEMPLATE_DISPLAY_NAME: &str = "AppTemplate";

/// The fixed set of template files carrying identifier tokens: build
/// descriptors, manifest, resource strings and the entry-point sources.
const TEMPLATED_FILES: &[&str] = &[
    "app/build.gradle",
    "app/src/main/AndroidManifest.xml",
    "app/src/main/res/values/strings.xml",
    "app/src/main/cpp/CMakeLists.txt",
    "app/src/main/java/org/example/apptemplate/MainActivity.java",
    "app/src/main/java/org/example/apptemplate/PluginRegistry.java",
];

/// Replace every identifier token in the fixed file list.
///
/// Must run before `rename_package_dirs`, while the java sources still live
/// under the template package path.
pub fn rewrite_identifiers(project_dir: &Path, id: &AppId) -> Result<()> {
    let mut map = TokenMap::new();
    map.insert(TEMPLATE_PACKAGE, id.full());
    map.insert(TEMPLATE_SHORT_NAME, id.short_name.clone());
    map.insert(TEMPLATE_DISPLAY_NAME, id.short_name.clone());

    for rel in TEMPLATED_FILES {
        map.apply_to_file(&project_dir.join(rel))?;
    }
    Ok(())
}

/// Rename the three nested java package directories to the derived segments.
///
/// Innermost first: renaming an outer directory first would invalidate the
/// path used to locate the inner one. Segments that already match are no-ops.
pub fn rename_package_dirs(project_dir: &Path, id: &AppId) -> Result<()> {
    let java_root = project_dir.join("app/src/main/java");

    fsops::rename_if_different(
        &java_root.join("org/example").join(TEMPLATE_SHORT_NAME),
        &java_root.join("org/example").join(&id.short_name),
    )?;
    fsops::rename_if_different(
        &java_root.join("org/example"),
        &java_root.join("org").join(&id.vendor),
    )?;
    fsops::rename_if_different(&java_root.join("org"), &java_root.join(&id.organization))?;
    Ok(())
}

/// Path of the plugin registry source after identifier rewriting and package
/// directory renaming.
pub fn registry_path(project_dir: &Path, id: &AppId) -> std::path::PathBuf {
    project_dir
        .join("app/src/main/java")
        .join(&id.organization)
        .join(&id.vendor)
        .join(&id.short_name)
        .join("PluginRegistry.java")
}
