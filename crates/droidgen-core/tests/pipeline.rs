//! End-to-end generation against the real in-repo template

use std::fs;
use std::path::{Path, PathBuf};

use droidgen_core::{config, create_project, AppConfig, ProjectContext};
use tempfile::TempDir;

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn template_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../android-project")
}

/// Fabricates a tool root (toolkit + plugins), an app root (config, sources,
/// assets) and a context wired to them.
struct Fixture {
    _tmp: TempDir,
    ctx: ProjectContext,
    app_root: PathBuf,
}

impl Fixture {
    fn new() -> Self {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();

        write(root, "toolkit/src/widget.c", "widget impl");
        write(root, "toolkit/3rd/stb/stb.h", "stb header");

        write(root, "app/main.c", "int main;");
        write(root, "app/src/ui/home.c", "home screen");
        write(root, "app/src/ui/home.h", "home header");
        write(root, "app/assets/default/raw/ui/home.bin", "ui blob");

        write(
            root,
            "plugins/camera/plugin.json",
            r#"{
                "name": "Camera",
                "android": {
                    "class": "CameraPlugin",
                    "permissions": [
                        "<uses-permission android:name=\"android.permission.CAMERA\" />",
                        "<uses-permission android:name=\"android.permission.INTERNET\" />"
                    ],
                    "dependencies": ["implementation 'androidx.camera:camera-core:1.2.0'"]
                }
            }"#,
        );
        write(root, "plugins/camera/src/camera.c", "camera impl");
        write(
            root,
            "plugins/camera/android/java/org/example/plugins/CameraPlugin.java",
            "class CameraPlugin {}",
        );
        write(
            root,
            "plugins/location/plugin.json",
            r#"{
                "name": "Location",
                "android": {
                    "class": "LocationPlugin",
                    "permissions": [
                        "<uses-permission android:name=\"android.permission.ACCESS_FINE_LOCATION\" />",
                        "<uses-permission android:name=\"android.permission.INTERNET\" />"
                    ]
                }
            }"#,
        );
        write(root, "plugins/location/src/location.c", "location impl");
        write(root, "plugins/common/plugin.h", "common plugin header");

        let ctx = ProjectContext {
            sdk_home: PathBuf::from("/opt/android-sdk"),
            ndk_home: PathBuf::from("/opt/android-ndk"),
            toolkit_dir: root.join("toolkit"),
            template_dir: template_dir(),
            build_dir: root.join("build"),
            plugins_dir: root.join("plugins"),
        };

        Self {
            app_root: root.join("app"),
            _tmp: tmp,
            ctx,
        }
    }

    fn generate(&self, config_json: &str) -> PathBuf {
        write(&self.app_root, "app.json", config_json);
        let config = config::load_merged(&self.app_root.join("app.json"), "android").unwrap();
        create_project(&self.ctx, &config, &self.app_root, "android").unwrap();
        self.ctx.build_dir.join(&config.app_id.short_name)
    }
}

fn read(project: &Path, rel: &str) -> String {
    fs::read_to_string(project.join(rel))
        .unwrap_or_else(|e| panic!("cannot read {rel}: {e}"))
}

#[test]
fn generates_project_without_plugins() {
    let fixture = Fixture::new();
    let project = fixture.generate(
        r#"{
            "app_name": "com.acme.myapp",
            "sources": ["main.c"],
            "assets": "assets",
            "android": {}
        }"#,
    );

    // Package identifier is rewritten everywhere; no template fragment survives.
    let manifest = read(&project, "app/src/main/AndroidManifest.xml");
    assert!(manifest.contains("com.acme.myapp"));
    assert!(!manifest.contains("apptemplate"));
    assert!(!manifest.contains("EXTRA_"));
    assert!(manifest.contains("@android:style/Theme.Black.NoTitleBar\""));

    let gradle = read(&project, "app/build.gradle");
    assert!(gradle.contains("applicationId \"com.acme.myapp\""));
    assert!(!gradle.contains("EXTRA_"));

    let strings = read(&project, "app/src/main/res/values/strings.xml");
    assert!(strings.contains(">myapp<"));

    // Java sources moved under the derived package path.
    let activity = read(&project, "app/src/main/java/com/acme/myapp/MainActivity.java");
    assert!(activity.contains("package com.acme.myapp;"));
    assert!(activity.contains("System.loadLibrary(\"myapp\")"));
    assert!(!project.join("app/src/main/java/org").exists());

    // Build descriptor has resolved anchors and no leftover tokens.
    let cmake = read(&project, "app/src/main/cpp/CMakeLists.txt");
    assert!(cmake.contains("${APP_SOURCE_DIR}/toolkit/src"));
    assert!(cmake.contains("add_library(myapp SHARED"));
    assert!(!cmake.contains("EXTRA_"));

    // Toolkit, app sources and assets are vendored in.
    assert!(project
        .join("app/src/main/cpp/toolkit/src/widget.c")
        .is_file());
    assert!(project
        .join("app/src/main/cpp/toolkit/3rd/stb/stb.h")
        .is_file());
    assert!(project.join("app/src/main/cpp/app/main.c").is_file());
    assert!(project
        .join("app/src/main/assets/assets/raw/ui/home.bin")
        .is_file());

    // Registry exists with its token blanked.
    let registry = read(&project, "app/src/main/java/com/acme/myapp/PluginRegistry.java");
    assert!(!registry.contains("EXTRA_"));
    assert!(!registry.contains("registerPlugin(1"));

    let props = read(&project, "local.properties");
    assert!(props.contains("sdk.dir=/opt/android-sdk"));
    assert!(props.contains("ndk.dir=/opt/android-ndk"));
}

#[test]
fn generates_project_with_plugins_and_globs() {
    let fixture = Fixture::new();
    let project = fixture.generate(
        r#"{
            "app_name": "com.acme.camdemo",
            "sources": ["main.c", "src/**/*.c"],
            "assets": "assets",
            "android": {
                "plugins": ["camera", "location"],
                "features": ["fullscreen"],
                "includes": ["vendor/inc"],
                "cflags": "-O2",
                "defines": "-DWITH_PLUGINS"
            }
        }"#,
    );

    // Glob matches keep their path suffix; non-matching files are skipped.
    assert!(project.join("app/src/main/cpp/app/src/ui/home.c").is_file());
    assert!(!project.join("app/src/main/cpp/app/src/ui/home.h").exists());

    // Shared permissions are deduplicated and sorted.
    let manifest = read(&project, "app/src/main/AndroidManifest.xml");
    assert_eq!(manifest.matches("android.permission.INTERNET").count(), 1);
    let camera_at = manifest.find("android.permission.CAMERA").unwrap();
    let fine_at = manifest.find("android.permission.ACCESS_FINE_LOCATION").unwrap();
    assert!(fine_at < camera_at);
    assert!(manifest.contains("Theme.Black.NoTitleBar.Fullscreen"));

    let gradle = read(&project, "app/build.gradle");
    assert!(gradle.contains("implementation 'androidx.camera:camera-core:1.2.0'"));
    assert!(!gradle.contains("EXTRA_"));

    // Registration statements are numbered in declaration order.
    let registry = read(&project, "app/src/main/java/com/acme/camdemo/PluginRegistry.java");
    assert!(registry.contains("registerPlugin(1, \"camera\", new CameraPlugin());"));
    assert!(registry.contains("registerPlugin(2, \"location\", new LocationPlugin());"));

    // Plugin trees are superimposed without clobbering each other.
    assert!(project
        .join("app/src/main/cpp/plugins/common/plugin.h")
        .is_file());
    assert!(project
        .join("app/src/main/cpp/plugins/camera/camera.c")
        .is_file());
    assert!(project
        .join("app/src/main/cpp/plugins/location/location.c")
        .is_file());
    assert!(project
        .join("app/src/main/java/org/example/plugins/CameraPlugin.java")
        .is_file());

    let cmake = read(&project, "app/src/main/cpp/CMakeLists.txt");
    assert!(cmake.contains("${APP_SOURCE_DIR}/vendor/inc"));
    assert!(cmake.contains("-O2"));
    assert!(cmake.contains("-DWITH_PLUGINS"));
}

#[test]
fn regeneration_resets_the_destination() {
    let fixture = Fixture::new();
    let config = r#"{
        "app_name": "com.acme.myapp",
        "sources": ["main.c"],
        "assets": "assets",
        "android": {}
    }"#;

    let project = fixture.generate(config);
    fs::write(project.join("stale.txt"), "left over").unwrap();

    fixture.generate(config);
    assert!(!project.join("stale.txt").exists());
    assert!(project.join("app/src/main/cpp/app/main.c").is_file());
}

#[test]
fn unknown_plugin_aborts_the_run() {
    let fixture = Fixture::new();
    write(
        &fixture.app_root,
        "app.json",
        r#"{
            "app_name": "com.acme.myapp",
            "sources": ["main.c"],
            "assets": "assets",
            "android": {"plugins": ["does-not-exist"]}
        }"#,
    );
    let config = config::load_merged(&fixture.app_root.join("app.json"), "android").unwrap();
    let err = create_project(&fixture.ctx, &config, &fixture.app_root, "android").unwrap_err();
    assert!(err.to_string().contains("does-not-exist"));
}

#[test]
fn validation_fails_before_any_filesystem_mutation() {
    let fixture = Fixture::new();
    write(
        &fixture.app_root,
        "app.json",
        r#"{"app_name": "not-reverse-domain", "sources": ["main.c"], "android": {}}"#,
    );
    assert!(config::load_merged(&fixture.app_root.join("app.json"), "android").is_err());
    assert!(!fixture.ctx.build_dir.exists());
}

#[test]
fn config_validation_rejects_bad_documents() {
    let fixture = Fixture::new();

    for (name, doc) in [
        ("two segments", r#"{"app_name": "acme.myapp", "sources": ["main.c"], "android": {}}"#),
        ("empty sources", r#"{"app_name": "com.acme.myapp", "sources": [], "android": {}}"#),
        ("missing platform block", r#"{"app_name": "com.acme.myapp", "sources": ["main.c"]}"#),
        ("malformed json", r#"{"app_name": "#),
    ] {
        write(&fixture.app_root, "bad.json", doc);
        let result = config::load_merged(&fixture.app_root.join("bad.json"), "android");
        assert!(result.is_err(), "expected rejection for {name}");
    }
}

#[test]
fn app_config_reads_all_fields() {
    let value: serde_json::Value = serde_json::from_str(
        r#"{
            "app_name": "com.acme.myapp",
            "sources": ["main.c"],
            "assets": "assets",
            "includes": ["inc"],
            "cflags": "-g",
            "defines": "-DX",
            "cppflags": "-std=c++17",
            "plugins": ["camera"],
            "features": ["fullscreen"]
        }"#,
    )
    .unwrap();
    let config = AppConfig::from_value(value).unwrap();
    assert_eq!(config.app_id.full(), "com.acme.myapp");
    assert_eq!(config.includes, vec!["inc".to_string()]);
    assert_eq!(config.plugins, vec!["camera".to_string()]);
    assert!(config.has_feature("fullscreen"));
}
