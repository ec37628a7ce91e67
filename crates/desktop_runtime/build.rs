use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

const CATALOG_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, Deserialize)]
struct CatalogFile {
    schema_version: u32,
    apps: Vec<CatalogApp>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CatalogApp {
    app_name: String,
    #[serde(default)]
    icon: Option<String>,
    #[serde(default)]
    custom_title_bar: bool,
    #[serde(default)]
    min_width: Option<i32>,
    #[serde(default)]
    min_height: Option<i32>,
    #[serde(default)]
    pinned: bool,
    #[serde(default)]
    launch_on_boot: bool,
}

fn validate(apps: &[CatalogApp], path: &str) {
    let mut seen = BTreeSet::new();
    for app in apps {
        let name = app.app_name.as_str();
        if name.trim().is_empty() || name.trim() != name {
            panic!("blank or padded app_name `{name}` in {path}");
        }
        if !seen.insert(name) {
            panic!("duplicate app_name `{name}` in {path}");
        }
        for (label, value) in [("min_width", app.min_width), ("min_height", app.min_height)] {
            if matches!(value, Some(value) if value <= 0) {
                panic!("app `{name}` in {path} declares non-positive {label}");
            }
        }
    }
}

fn main() {
    let crate_root = PathBuf::from(std::env::var("CARGO_MANIFEST_DIR").expect("manifest dir"));
    let path = crate_root.join("app_catalog.toml");
    let display = path.display().to_string();
    println!("cargo:rerun-if-changed={display}");

    let raw = fs::read_to_string(&path)
        .unwrap_or_else(|err| panic!("failed to read {display}: {err}"));
    let catalog: CatalogFile =
        toml::from_str(&raw).unwrap_or_else(|err| panic!("failed to parse {display}: {err}"));
    if catalog.schema_version != CATALOG_SCHEMA_VERSION {
        panic!(
            "catalog schema mismatch in {display}: expected {CATALOG_SCHEMA_VERSION} found {}",
            catalog.schema_version
        );
    }
    validate(&catalog.apps, &display);

    let json = serde_json::to_string_pretty(&catalog.apps).expect("serialize app catalog");
    let generated = format!(
        "/// Build-time generated application catalog JSON.\n\
pub const APP_CATALOG_JSON: &str = r##\"{}\"##;\n",
        json
    );

    let out_dir = PathBuf::from(std::env::var("OUT_DIR").expect("OUT_DIR"));
    let out_file = out_dir.join("app_catalog_generated.rs");
    fs::write(&out_file, generated)
        .unwrap_or_else(|err| panic!("failed to write {}: {err}", out_file.display()));
}
