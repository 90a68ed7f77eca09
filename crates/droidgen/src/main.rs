use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use droidgen_core::{config, create_project, ProjectContext, DEFAULT_PLATFORM};

#[derive(Parser, Debug)]
#[command(name = "droidgen")]
#[command(about = "Generate a native Android project from a declarative app config")]
#[command(version)]
struct Args {
    /// Path to the application config document (JSON)
    config: PathBuf,

    /// Platform block folded over the top-level config
    #[arg(long, default_value = DEFAULT_PLATFORM)]
    platform: String,

    /// Root directory holding the template, plugins and build output
    /// (defaults to the current directory)
    #[arg(long)]
    root: Option<PathBuf>,
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {:#}", "Error:".red().bold(), err);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let args = Args::parse();

    let root = match args.root {
        Some(root) => root,
        None => std::env::current_dir().context("cannot determine working directory")?,
    };

    // Environment is checked before any file is touched.
    let ctx = ProjectContext::from_env(&root)?;

    let config_path = args
        .config
        .canonicalize()
        .with_context(|| format!("config not found: {}", args.config.display()))?;
    let app_root = config_path
        .parent()
        .unwrap_or(Path::new("."))
        .to_path_buf();

    let config = config::load_merged(&config_path, &args.platform)?;
    create_project(&ctx, &config, &app_root, &args.platform)?;
    Ok(())
}
