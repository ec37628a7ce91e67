//! `localStorage`-backed preference store.
//!
//! Browser storage is synchronous; the [`PrefsStore`] impl wraps each call in a ready future so
//! the runtime can treat every host the same way.

use platform_host::{PrefsStore, PrefsStoreFuture};

/// Key prefix applied to every desktop preference written by this adapter.
pub const DEFAULT_KEY_PREFIX: &str = "desk.";

#[derive(Debug, Clone, Copy)]
/// Preference store backed by `window.localStorage`.
pub struct WebPrefsStore {
    prefix: &'static str,
}

impl Default for WebPrefsStore {
    fn default() -> Self {
        Self::with_prefix(DEFAULT_KEY_PREFIX)
    }
}

impl WebPrefsStore {
    /// Creates a store that prefixes every key with `prefix`.
    pub const fn with_prefix(prefix: &'static str) -> Self {
        Self { prefix }
    }

    /// Returns the storage key actually used for `key`.
    pub fn scoped_key(self, key: &str) -> String {
        format!("{}{}", self.prefix, key)
    }

    /// Reads the raw JSON text for `key`; missing storage or key yields `None`.
    pub fn read(self, key: &str) -> Option<String> {
        #[cfg(target_arch = "wasm32")]
        {
            let storage = local_storage()?;
            storage.get_item(&self.scoped_key(key)).ok().flatten()
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = key;
            None
        }
    }

    /// Writes the raw JSON text for `key`.
    ///
    /// # Errors
    ///
    /// Returns an error when localStorage is unavailable or rejects the write (quota, privacy
    /// mode).
    pub fn write(self, key: &str, raw_json: &str) -> Result<(), String> {
        #[cfg(target_arch = "wasm32")]
        {
            let storage = local_storage().ok_or_else(|| "localStorage unavailable".to_string())?;
            storage
                .set_item(&self.scoped_key(key), raw_json)
                .map_err(|err| format!("localStorage set_item failed: {err:?}"))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = (key, raw_json);
            Ok(())
        }
    }

    /// Removes `key` from localStorage.
    ///
    /// # Errors
    ///
    /// Returns an error when localStorage is unavailable or the removal fails.
    pub fn remove(self, key: &str) -> Result<(), String> {
        #[cfg(target_arch = "wasm32")]
        {
            let storage = local_storage().ok_or_else(|| "localStorage unavailable".to_string())?;
            storage
                .remove_item(&self.scoped_key(key))
                .map_err(|err| format!("localStorage remove_item failed: {err:?}"))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = key;
            Ok(())
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

impl PrefsStore for WebPrefsStore {
    fn load_pref<'a>(
        &'a self,
        key: &'a str,
    ) -> PrefsStoreFuture<'a, Result<Option<String>, String>> {
        let store = *self;
        Box::pin(async move { Ok(store.read(key)) })
    }

    fn save_pref<'a>(
        &'a self,
        key: &'a str,
        raw_json: &'a str,
    ) -> PrefsStoreFuture<'a, Result<(), String>> {
        let store = *self;
        Box::pin(async move { store.write(key, raw_json) })
    }

    fn delete_pref<'a>(&'a self, key: &'a str) -> PrefsStoreFuture<'a, Result<(), String>> {
        let store = *self;
        Box::pin(async move { store.remove(key) })
    }
}
