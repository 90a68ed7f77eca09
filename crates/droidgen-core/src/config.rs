//! Application config loading, platform merging and validation
//!
//! The config document is plain JSON. A nested object keyed by platform name
//! (e.g. `"android"`) is folded over the top level before validation, so a
//! single document can drive several platform generators while still letting
//! the platform block override any shared field.

use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::fsops;

/// The three derived segments of a reverse-domain application identifier.
///
/// Computed once from the validated `app_name` and never mutated; used for
/// both package-directory renaming and in-file identifier rewriting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppId {
    pub organization: String,
    pub vendor: String,
    pub short_name: String,
}

impl AppId {
    /// Parse `organization.vendor.shortname`; any other shape is rejected.
    pub fn parse(app_name: &str) -> Result<Self> {
        let items: Vec<&str> = app_name.split('.').collect();
        match items.as_slice() {
            [organization, vendor, short_name]
                if !organization.is_empty() && !vendor.is_empty() && !short_name.is_empty() =>
            {
                Ok(Self {
                    organization: organization.to_string(),
                    vendor: vendor.to_string(),
                    short_name: short_name.to_string(),
                })
            }
            _ => Err(Error::Config(format!(
                "invalid app name `{app_name}`: expected exactly 3 non-empty dot-separated segments"
            ))),
        }
    }

    /// Full reverse-domain identifier.
    pub fn full(&self) -> String {
        format!("{}.{}.{}", self.organization, self.vendor, self.short_name)
    }
}

/// Raw document shape after the platform merge. Unknown keys (including the
/// platform blocks themselves) are ignored.
#[derive(Debug, Deserialize)]
struct RawConfig {
    #[serde(default)]
    app_name: String,
    #[serde(default)]
    sources: Vec<String>,
    #[serde(default)]
    assets: String,
    #[serde(default)]
    includes: Vec<String>,
    #[serde(default)]
    cflags: String,
    #[serde(default)]
    defines: String,
    #[serde(default)]
    cppflags: String,
    #[serde(default)]
    plugins: Vec<String>,
    #[serde(default)]
    features: Vec<String>,
}

/// Validated application configuration after the platform block merge.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub app_id: AppId,
    /// Source path patterns, literal or glob. Never empty.
    pub sources: Vec<String>,
    /// Asset root containing a `default/raw` subtree.
    pub assets: String,
    /// Extra include directories for the build descriptor.
    pub includes: Vec<String>,
    pub cflags: String,
    pub defines: String,
    pub cppflags: String,
    /// Plugin identifiers resolved against the plugins root.
    pub plugins: Vec<String>,
    /// Feature flags, e.g. `fullscreen`.
    pub features: Vec<String>,
}

impl AppConfig {
    /// Validate a merged JSON document into a typed config.
    ///
    /// Validation runs before any filesystem mutation: no partial config is
    /// ever usable downstream.
    pub fn from_value(value: Value) -> Result<Self> {
        let raw: RawConfig = serde_json::from_value(value)
            .map_err(|e| Error::Config(format!("invalid config shape: {e}")))?;

        let app_id = AppId::parse(&raw.app_name)?;
        if raw.sources.is_empty() {
            return Err(Error::Config("no sources declared".into()));
        }

        Ok(Self {
            app_id,
            sources: raw.sources,
            assets: raw.assets,
            includes: raw.includes,
            cflags: raw.cflags,
            defines: raw.defines,
            cppflags: raw.cppflags,
            plugins: raw.plugins,
            features: raw.features,
        })
    }

    pub fn has_feature(&self, name: &str) -> bool {
        self.features.iter().any(|f| f == name)
    }
}

/// Load a JSON config document from disk.
pub fn load(path: &Path) -> Result<Value> {
    let text = fsops::read_text(path)?;
    serde_json::from_str(&text)
        .map_err(|e| Error::Config(format!("malformed JSON in {}: {e}", path.display())))
}

/// Fold the named platform block over the top-level mapping.
///
/// Shallow merge, not recursive: each entry of the block is copied into the
/// top level, overwriting any same-named entry. The block must exist.
pub fn merge_platform(value: &mut Value, platform: &str) -> Result<()> {
    let obj = value
        .as_object_mut()
        .ok_or_else(|| Error::Config("config root must be a JSON object".into()))?;

    let block = obj
        .get(platform)
        .cloned()
        .ok_or_else(|| Error::Config(format!("missing `{platform}` platform block")))?;
    let Value::Object(entries) = block else {
        return Err(Error::Config(format!(
            "`{platform}` platform block must be a JSON object"
        )));
    };

    for (key, val) in entries {
        obj.insert(key, val);
    }
    Ok(())
}

/// Load, merge and validate in one step.
pub fn load_merged(path: &Path, platform: &str) -> Result<AppConfig> {
    let mut value = load(path)?;
    merge_platform(&mut value, platform)?;
    AppConfig::from_value(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_app_id_accepts_three_segments() {
        let id = AppId::parse("com.acme.myapp").unwrap();
        assert_eq!(id.organization, "com");
        assert_eq!(id.vendor, "acme");
        assert_eq!(id.short_name, "myapp");
        assert_eq!(id.full(), "com.acme.myapp");
    }

    #[test]
    fn test_app_id_rejects_wrong_segment_counts() {
        assert!(AppId::parse("myapp").is_err());
        assert!(AppId::parse("acme.myapp").is_err());
        assert!(AppId::parse("com.acme.apps.myapp").is_err());
        assert!(AppId::parse("").is_err());
    }

    #[test]
    fn test_app_id_rejects_empty_segments() {
        assert!(AppId::parse("com.acme.").is_err());
        assert!(AppId::parse(".acme.myapp").is_err());
        assert!(AppId::parse("com..myapp").is_err());
    }

    #[test]
    fn test_platform_merge_override_wins_and_adds_keys() {
        let mut value = json!({"x": 1, "android": {"x": 2, "y": 3}});
        merge_platform(&mut value, "android").unwrap();
        assert_eq!(value["x"], 2);
        assert_eq!(value["y"], 3);
    }

    #[test]
    fn test_platform_merge_requires_block() {
        let mut value = json!({"app_name": "com.acme.myapp"});
        assert!(matches!(
            merge_platform(&mut value, "android"),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_config_rejects_empty_sources() {
        let value = json!({"app_name": "com.acme.myapp", "sources": []});
        assert!(matches!(
            AppConfig::from_value(value),
            Err(Error::Config(_))
        ));

        let value = json!({"app_name": "com.acme.myapp"});
        assert!(AppConfig::from_value(value).is_err());
    }

    #[test]
    fn test_config_optional_fields_default_empty() {
        let value = json!({
            "app_name": "com.acme.myapp",
            "sources": ["main.c"],
            "assets": "assets"
        });
        let config = AppConfig::from_value(value).unwrap();
        assert!(config.includes.is_empty());
        assert!(config.cflags.is_empty());
        assert!(config.defines.is_empty());
        assert!(config.cppflags.is_empty());
        assert!(config.plugins.is_empty());
        assert!(config.features.is_empty());
        assert!(!config.has_feature("fullscreen"));
    }

    #[test]
    fn test_config_platform_block_overrides_sources() {
        let mut value = json!({
            "app_name": "com.acme.myapp",
            "sources": ["desktop.c"],
            "assets": "assets",
            "android": {"sources": ["mobile.c"], "features": ["fullscreen"]}
        });
        merge_platform(&mut value, "android").unwrap();
        let config = AppConfig::from_value(value).unwrap();
        assert_eq!(config.sources, vec!["mobile.c".to_string()]);
        assert!(config.has_feature("fullscreen"));
    }
}
