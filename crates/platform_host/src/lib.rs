//! Host-agnostic persistence boundary shared by the desktop runtime and browser adapters.
//!
//! The desktop keeps per-application window memory and appearance preferences in a string-keyed
//! store of JSON documents. This crate defines that store contract ([`PrefsStore`]) plus in-memory
//! and no-op implementations; the browser `localStorage` adapter lives in `platform_host_web`.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod prefs;

pub use prefs::{
    load_pref_lenient, load_pref_with, save_pref_with, MemoryPrefsStore, NoopPrefsStore,
    PrefsStore, PrefsStoreFuture,
};
