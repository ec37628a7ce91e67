//! Build-time application catalog and app-name to view mapping.

mod placeholders;

use std::sync::OnceLock;

use desktop_app_contract::{AppDescriptor, AppModule};
use leptos::logging;
use serde::{Deserialize, Serialize};

include!(concat!(env!("OUT_DIR"), "/app_catalog_generated.rs"));

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// One `[[apps]]` entry from `app_catalog.toml`.
pub struct CatalogEntry {
    #[serde(flatten)]
    pub descriptor: AppDescriptor,
    /// Shown in the dock even when not running.
    #[serde(default)]
    pub pinned: bool,
    /// Opened once when the desktop finishes booting.
    #[serde(default)]
    pub launch_on_boot: bool,
}

fn parse_catalog(raw: &str) -> Vec<CatalogEntry> {
    match serde_json::from_str::<Vec<CatalogEntry>>(raw) {
        Ok(entries) => entries
            .into_iter()
            .filter(|entry| match entry.descriptor.validate() {
                Ok(()) => true,
                Err(err) => {
                    logging::warn!("skipping catalog entry: {err}");
                    false
                }
            })
            .collect(),
        Err(err) => {
            logging::warn!("app catalog is unreadable: {err}");
            Vec::new()
        }
    }
}

/// Every application known to the desktop, in catalog order.
pub fn app_catalog() -> &'static [CatalogEntry] {
    static CATALOG: OnceLock<Vec<CatalogEntry>> = OnceLock::new();
    CATALOG.get_or_init(|| parse_catalog(APP_CATALOG_JSON))
}

pub fn app_descriptor_by_name(app_name: &str) -> Option<AppDescriptor> {
    app_catalog()
        .iter()
        .find(|entry| entry.descriptor.app_name == app_name)
        .map(|entry| entry.descriptor.clone())
}

pub fn pinned_apps() -> Vec<AppDescriptor> {
    app_catalog()
        .iter()
        .filter(|entry| entry.pinned)
        .map(|entry| entry.descriptor.clone())
        .collect()
}

pub fn boot_apps() -> Vec<AppDescriptor> {
    app_catalog()
        .iter()
        .filter(|entry| entry.launch_on_boot)
        .map(|entry| entry.descriptor.clone())
        .collect()
}

/// View module for `app_name`. Names without a dedicated view get the generic placeholder.
pub fn app_module(app_name: &str) -> AppModule {
    match app_name {
        "Settings" => AppModule::new(placeholders::mount_settings_app),
        "Notepad" => AppModule::new(placeholders::mount_notepad_app),
        "Camera" => AppModule::new(placeholders::mount_camera_app),
        _ => AppModule::new(placeholders::mount_generic_app),
    }
}
