//! Plugin descriptor resolution and integration-fragment aggregation
//!
//! Each selected plugin lives under the plugins root as `<id>/plugin.json`
//! plus optional source trees. Descriptors contribute manifest permissions,
//! manifest activities, gradle dependencies and a handler registration; the
//! string collections are deduplicated and sorted so the generated fragments
//! never depend on the order plugins were declared in config.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::fsops;

/// Per-platform integration block of a plugin descriptor.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlatformBlock {
    /// Handler type constructed and registered for this plugin.
    #[serde(default)]
    pub class: Option<String>,
    /// Manifest permission entries, opaque lines.
    #[serde(default)]
    pub permissions: Vec<String>,
    /// Manifest activity entries, opaque lines.
    #[serde(default)]
    pub activities: Vec<String>,
    /// Build-dependency entries, opaque lines.
    #[serde(default)]
    pub dependencies: Vec<String>,
}

/// A plugin whose descriptor was found and parsed.
#[derive(Debug, Clone)]
pub struct ResolvedPlugin {
    /// Identifier used to locate the descriptor directory.
    pub id: String,
    /// Declared plugin name, registered lower-cased.
    pub name: String,
    /// Platform block for the platform being generated; empty when absent.
    pub block: PlatformBlock,
    /// The plugin's directory under the plugins root.
    pub root: PathBuf,
}

/// Resolve every selected plugin id against the plugins root.
///
/// An id with no `plugin.json` aborts the run, naming the plugin.
pub fn resolve(plugins_dir: &Path, ids: &[String], platform: &str) -> Result<Vec<ResolvedPlugin>> {
    ids.iter()
        .map(|id| resolve_one(plugins_dir, id, platform))
        .collect()
}

fn resolve_one(plugins_dir: &Path, id: &str, platform: &str) -> Result<ResolvedPlugin> {
    let root = plugins_dir.join(id);
    let descriptor_path = root.join("plugin.json");
    if !descriptor_path.is_file() {
        return Err(Error::PluginResolution(id.to_string()));
    }

    let text = fsops::read_text(&descriptor_path)?;
    let mut value: Value = serde_json::from_str(&text)
        .map_err(|e| Error::Config(format!("malformed descriptor for plugin `{id}`: {e}")))?;

    let name = value
        .get("name")
        .and_then(Value::as_str)
        .ok_or_else(|| Error::Config(format!("descriptor for plugin `{id}` has no `name`")))?
        .to_string();

    let block = match value.get_mut(platform) {
        Some(block) => serde_json::from_value(block.take()).map_err(|e| {
            Error::Config(format!("invalid `{platform}` block in plugin `{id}`: {e}"))
        })?,
        None => PlatformBlock::default(),
    };

    Ok(ResolvedPlugin {
        id: id.to_string(),
        name,
        block,
        root,
    })
}

/// Aggregated integration fragments across every selected plugin.
///
/// Permissions, activities and dependencies are kept in sorted sets;
/// registrations keep declaration order and carry a strictly increasing id.
#[derive(Debug, Default)]
pub struct PluginSet {
    permissions: BTreeSet<String>,
    activities: BTreeSet<String>,
    dependencies: BTreeSet<String>,
    registrations: Vec<(String, String)>,
}

impl PluginSet {
    pub fn aggregate(plugins: &[ResolvedPlugin]) -> Self {
        let mut set = Self::default();
        for plugin in plugins {
            set.permissions.extend(plugin.block.permissions.iter().cloned());
            set.activities.extend(plugin.block.activities.iter().cloned());
            set.dependencies
                .extend(plugin.block.dependencies.iter().cloned());
            if let Some(class) = &plugin.block.class {
                set.registrations.push((plugin.name.clone(), class.clone()));
            }
        }
        set
    }

    /// Permission entries for the manifest, one per line.
    pub fn permissions_block(&self) -> String {
        join_block(&self.permissions, "    ")
    }

    /// Activity entries for the manifest, one per line.
    pub fn activities_block(&self) -> String {
        join_block(&self.activities, "        ")
    }

    /// Dependency entries for the gradle build file, one per line.
    pub fn dependencies_block(&self) -> String {
        join_block(&self.dependencies, "    ")
    }

    /// One registration statement per handler, numbered from 1 in processing
    /// order, registering the lower-cased plugin name against a freshly
    /// constructed handler instance.
    pub fn registration_source(&self) -> String {
        self.registrations
            .iter()
            .enumerate()
            .map(|(i, (name, class))| {
                format!(
                    "registerPlugin({}, \"{}\", new {}());",
                    i + 1,
                    name.to_lowercase(),
                    class
                )
            })
            .collect::<Vec<_>>()
            .join("\n        ")
    }
}

fn join_block(items: &BTreeSet<String>, indent: &str) -> String {
    items
        .iter()
        .cloned()
        .collect::<Vec<_>>()
        .join(&format!("\n{indent}"))
}

/// Overlay the shared common layer and every selected plugin's source trees
/// into the generated project.
///
/// All copies here are merge-copies: several plugins superimpose their trees
/// (and the shared common layer) into the same destinations, so nothing may
/// be deleted between overlays.
pub fn copy_plugin_sources(
    plugins_dir: &Path,
    plugins: &[ResolvedPlugin],
    project_dir: &Path,
    platform: &str,
) -> Result<()> {
    if plugins.is_empty() {
        return Ok(());
    }

    let native_root = project_dir.join("app/src/main/cpp/plugins");
    let java_root = project_dir.join("app/src/main/java");

    fsops::merge_tree(&plugins_dir.join("common"), &native_root.join("common"))?;

    for plugin in plugins {
        fsops::merge_tree(&plugin.root.join("src"), &native_root.join(&plugin.id))?;

        let jni = plugin.root.join(platform).join("jni");
        if jni.is_dir() {
            fsops::merge_tree(&jni, &native_root.join(&plugin.id).join("jni"))?;
        }
        let java = plugin.root.join(platform).join("java");
        if java.is_dir() {
            fsops::merge_tree(&java, &java_root)?;
        }
    }
    Ok(())
}
