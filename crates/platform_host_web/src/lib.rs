//! Browser (`wasm32`) implementations of [`platform_host`] service contracts.
//!
//! Only preference storage is host-specific for the desktop: per-application window memory and
//! appearance preferences are written to `window.localStorage`. A compile-time strategy switch
//! (`desktop-host-stub`) swaps in a no-op store for hosts without browser storage.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

/// Compile-time host-strategy selection and the prefs adapter factory.
pub mod adapters;
pub mod storage;

pub use adapters::{
    host_strategy_name, prefs_store, selected_host_strategy, HostStrategy, PrefsStoreAdapter,
};
pub use storage::local_prefs::WebPrefsStore;
