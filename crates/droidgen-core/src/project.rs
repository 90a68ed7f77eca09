//! The generation pipeline
//!
//! Stages run synchronously in a fixed total order; each stage's filesystem
//! preconditions are established by the stage before it. The first error is
//! terminal for the run — partially materialized output is left on disk and
//! replaced wholesale by the next run's template materialization.

use std::path::Path;

use colored::Colorize;

use crate::config::AppConfig;
use crate::context::ProjectContext;
use crate::error::Result;
use crate::plugins::PluginSet;
use crate::{fsops, identifiers, patch, plugins, sources};

/// Relative location of the vendored toolkit inside a generated project.
const TOOLKIT_DST: &str = "app/src/main/cpp/toolkit";
/// Relative location of aggregated application sources.
const APP_SOURCES_DST: &str = "app/src/main/cpp/app";
/// Relative location of aggregated raw assets.
const APP_ASSETS_DST: &str = "app/src/main/assets/assets/raw";
const BUILD_DESCRIPTOR: &str = "app/src/main/cpp/CMakeLists.txt";
const MANIFEST: &str = "app/src/main/AndroidManifest.xml";
const APP_GRADLE: &str = "app/build.gradle";

/// Generate one project tree from a validated config.
///
/// `app_root_src` is the directory holding the application's own sources and
/// assets, normally the config file's parent directory.
pub fn create_project(
    ctx: &ProjectContext,
    config: &AppConfig,
    app_root_src: &Path,
    platform: &str,
) -> Result<()> {
    let id = &config.app_id;
    let project_dir = ctx.project_dir(&id.short_name);

    stage("materializing template");
    fsops::replace_tree(&ctx.template_dir, &project_dir)?;

    stage("rewriting identifiers");
    identifiers::rewrite_identifiers(&project_dir, id)?;
    identifiers::rename_package_dirs(&project_dir, id)?;

    stage("writing local.properties");
    write_local_properties(ctx, &project_dir)?;

    stage("vendoring toolkit sources");
    let toolkit_dst = project_dir.join(TOOLKIT_DST);
    fsops::replace_tree(&ctx.toolkit_dir.join("src"), &toolkit_dst.join("src"))?;
    fsops::replace_tree(&ctx.toolkit_dir.join("3rd"), &toolkit_dst.join("3rd"))?;

    stage("aggregating app sources and assets");
    sources::copy_app_sources(
        app_root_src,
        &config.sources,
        &project_dir.join(APP_SOURCES_DST),
    )?;
    sources::copy_app_assets(app_root_src, &config.assets, &project_dir.join(APP_ASSETS_DST))?;

    stage("patching build descriptor");
    patch::patch_build_descriptor(&project_dir.join(BUILD_DESCRIPTOR), config)?;

    stage("resolving plugins");
    let resolved = plugins::resolve(&ctx.plugins_dir, &config.plugins, platform)?;
    plugins::copy_plugin_sources(&ctx.plugins_dir, &resolved, &project_dir, platform)?;

    let set = PluginSet::aggregate(&resolved);
    patch::patch_manifest(&project_dir.join(MANIFEST), config, &set)?;
    patch::patch_dependencies(&project_dir.join(APP_GRADLE), &set)?;
    patch::patch_registrations(&identifiers::registry_path(&project_dir, id), &set)?;

    report(&project_dir, &id.short_name);
    Ok(())
}

fn write_local_properties(ctx: &ProjectContext, project_dir: &Path) -> Result<()> {
    let content = format!(
        "sdk.dir={}\nndk.dir={}\n",
        ctx.sdk_home.display(),
        ctx.ndk_home.display()
    );
    fsops::write_text(&project_dir.join("local.properties"), &content)
}

fn stage(name: &str) {
    println!("  {} {}", "->".blue(), name);
}

fn report(project_dir: &Path, short_name: &str) {
    println!();
    println!(
        "{} project created at {}",
        "Done:".green().bold(),
        project_dir.display()
    );
    println!("  cd build/{short_name} && ./gradlew build");
}
