//! Droidgen Core - declarative Android project generation
//!
//! Turns a declarative application description (a JSON config naming the
//! application identifier, sources, assets, build flags and plugins) into a
//! ready-to-build native Android project tree: the template skeleton is
//! materialized, identifier placeholders are rewritten, toolkit and
//! application sources are vendored in, and plugin descriptors are
//! aggregated into deterministic manifest and build-file fragments.
//!
//! # Pipeline
//!
//! A strict synchronous order, each stage consuming only outputs of prior
//! stages:
//!
//! 1. Load the config, fold the platform block over the top level, validate.
//! 2. Materialize the template tree (destructive copy).
//! 3. Rewrite identifier tokens and rename the java package directories.
//! 4. Write environment-derived `local.properties`.
//! 5. Vendor the toolkit `src`/`3rd` trees.
//! 6. Aggregate application sources (literal or glob) and raw assets.
//! 7. Patch the CMake build descriptor.
//! 8. Resolve plugins, merge-copy their trees, patch manifest/gradle/registry.
//!
//! Validation failures and missing resources abort the run before (or at)
//! the offending stage; the next run's destructive materialization resets
//! any partial output.

pub mod config;
pub mod context;
pub mod error;
pub mod fsops;
pub mod identifiers;
pub mod patch;
pub mod plugins;
pub mod project;
pub mod sources;
pub mod tokens;

pub use config::{AppConfig, AppId};
pub use context::ProjectContext;
pub use error::{Error, Result};
pub use project::create_project;

/// Default platform block name folded over the top-level config.
pub const DEFAULT_PLATFORM: &str = "android";
