//! String-keyed JSON preference storage.
//!
//! Absence of a key is never an error: callers treat `Ok(None)` as "use the computed default".

use std::{cell::RefCell, collections::BTreeMap, future::Future, pin::Pin, rc::Rc};

use serde::{de::DeserializeOwned, Serialize};

/// Object-safe boxed future used by [`PrefsStore`] async methods.
pub type PrefsStoreFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Host service for preference documents (one JSON text value per key).
pub trait PrefsStore {
    /// Loads the raw JSON text stored under `key`.
    fn load_pref<'a>(
        &'a self,
        key: &'a str,
    ) -> PrefsStoreFuture<'a, Result<Option<String>, String>>;

    /// Replaces the raw JSON text stored under `key`.
    fn save_pref<'a>(
        &'a self,
        key: &'a str,
        raw_json: &'a str,
    ) -> PrefsStoreFuture<'a, Result<(), String>>;

    /// Removes `key`. Removing an absent key succeeds.
    fn delete_pref<'a>(&'a self, key: &'a str) -> PrefsStoreFuture<'a, Result<(), String>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// Store that never holds anything; used for hosts without durable storage.
pub struct NoopPrefsStore;

impl PrefsStore for NoopPrefsStore {
    fn load_pref<'a>(
        &'a self,
        _key: &'a str,
    ) -> PrefsStoreFuture<'a, Result<Option<String>, String>> {
        Box::pin(async { Ok(None) })
    }

    fn save_pref<'a>(
        &'a self,
        _key: &'a str,
        _raw_json: &'a str,
    ) -> PrefsStoreFuture<'a, Result<(), String>> {
        Box::pin(async { Ok(()) })
    }

    fn delete_pref<'a>(&'a self, _key: &'a str) -> PrefsStoreFuture<'a, Result<(), String>> {
        Box::pin(async { Ok(()) })
    }
}

#[derive(Debug, Clone, Default)]
/// Session-scoped store; clones share the same backing map.
pub struct MemoryPrefsStore {
    inner: Rc<RefCell<BTreeMap<String, String>>>,
}

impl MemoryPrefsStore {
    /// Creates a store seeded with raw JSON entries.
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let map = entries
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();
        Self {
            inner: Rc::new(RefCell::new(map)),
        }
    }

    /// Returns the stored keys in sorted order.
    pub fn keys(&self) -> Vec<String> {
        self.inner.borrow().keys().cloned().collect()
    }

    /// Returns the raw JSON currently stored under `key`.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.inner.borrow().get(key).cloned()
    }
}

impl PrefsStore for MemoryPrefsStore {
    fn load_pref<'a>(
        &'a self,
        key: &'a str,
    ) -> PrefsStoreFuture<'a, Result<Option<String>, String>> {
        Box::pin(async move { Ok(self.raw(key)) })
    }

    fn save_pref<'a>(
        &'a self,
        key: &'a str,
        raw_json: &'a str,
    ) -> PrefsStoreFuture<'a, Result<(), String>> {
        Box::pin(async move {
            self.inner
                .borrow_mut()
                .insert(key.to_string(), raw_json.to_string());
            Ok(())
        })
    }

    fn delete_pref<'a>(&'a self, key: &'a str) -> PrefsStoreFuture<'a, Result<(), String>> {
        Box::pin(async move {
            self.inner.borrow_mut().remove(key);
            Ok(())
        })
    }
}

/// Loads and deserializes a typed preference value.
///
/// # Errors
///
/// Returns an error when the store fails or the stored JSON does not match `T`.
pub async fn load_pref_with<S: PrefsStore + ?Sized, T: DeserializeOwned>(
    store: &S,
    key: &str,
) -> Result<Option<T>, String> {
    let Some(raw) = store.load_pref(key).await? else {
        return Ok(None);
    };
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|err| format!("pref `{key}` is not valid: {err}"))
}

/// Loads a typed preference value, treating malformed JSON the same as an absent key.
///
/// # Errors
///
/// Returns an error only when the underlying store fails.
pub async fn load_pref_lenient<S: PrefsStore + ?Sized, T: DeserializeOwned>(
    store: &S,
    key: &str,
) -> Result<Option<T>, String> {
    let Some(raw) = store.load_pref(key).await? else {
        return Ok(None);
    };
    Ok(serde_json::from_str(&raw).ok())
}

/// Serializes and saves a typed preference value.
///
/// # Errors
///
/// Returns an error when serialization or the store write fails.
pub async fn save_pref_with<S: PrefsStore + ?Sized, T: Serialize>(
    store: &S,
    key: &str,
    value: &T,
) -> Result<(), String> {
    let raw = serde_json::to_string(value).map_err(|err| err.to_string())?;
    store.save_pref(key, &raw).await
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use pretty_assertions::assert_eq;
    use serde::{Deserialize, Serialize};

    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Geometry {
        width: i32,
        height: i32,
    }

    #[test]
    fn memory_store_clones_share_entries() {
        let store = MemoryPrefsStore::default();
        let alias = store.clone();

        block_on(store.save_pref("desktop.k", "{\"a\":1}")).expect("save");
        assert_eq!(alias.raw("desktop.k"), Some("{\"a\":1}".to_string()));

        block_on(alias.delete_pref("desktop.k")).expect("delete");
        assert_eq!(block_on(store.load_pref("desktop.k")).expect("load"), None);
    }

    #[test]
    fn typed_helpers_write_json_text() {
        let store = MemoryPrefsStore::default();
        let store_obj: &dyn PrefsStore = &store;
        block_on(save_pref_with(
            store_obj,
            "geometry",
            &Geometry {
                width: 630,
                height: 512,
            },
        ))
        .expect("save typed");

        assert_eq!(
            store.raw("geometry").as_deref(),
            Some(r#"{"width":630,"height":512}"#)
        );
        let loaded: Option<Geometry> =
            block_on(load_pref_with(store_obj, "geometry")).expect("load typed");
        assert_eq!(
            loaded,
            Some(Geometry {
                width: 630,
                height: 512
            })
        );
    }

    #[test]
    fn strict_load_reports_malformed_json_but_lenient_load_ignores_it() {
        let store = MemoryPrefsStore::with_entries([("geometry", "{not json")]);

        let strict = block_on(load_pref_with::<_, Geometry>(&store, "geometry"));
        assert!(strict.is_err());

        let lenient = block_on(load_pref_lenient::<_, Geometry>(&store, "geometry"));
        assert_eq!(lenient, Ok(None));
    }

    #[test]
    fn noop_store_reports_absent_keys() {
        let store = NoopPrefsStore;
        block_on(store.save_pref("k", "{}")).expect("save");
        assert_eq!(block_on(store.load_pref("k")).expect("load"), None);
        assert_eq!(MemoryPrefsStore::default().keys(), Vec::<String>::new());
    }
}
