//! Desktop runtime persistence adapters for boot hydration and lightweight local preferences.

use std::collections::BTreeMap;

use platform_host::{load_pref_lenient, save_pref_with, PrefsStore};

use crate::{
    app_memory::AppMemory,
    model::{DesktopAppearance, DesktopState},
};

/// Preference key holding the per-app memory map.
pub const APP_MEMORY_KEY: &str = "desktop.app_memory.v1";
/// Preference key holding wallpaper/theme.
pub const APPEARANCE_KEY: &str = "desktop.appearance.v1";

/// Persisted values read once at boot. Absent or unreadable keys are `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BootSnapshot {
    pub app_memory: Option<BTreeMap<String, AppMemory>>,
    pub appearance: Option<DesktopAppearance>,
}

impl BootSnapshot {
    pub fn is_empty(&self) -> bool {
        self.app_memory.is_none() && self.appearance.is_none()
    }
}

/// Loads every persisted desktop preference.
///
/// Store failures are logged and treated as absent values so boot always proceeds.
pub async fn load_boot_snapshot(store: &dyn PrefsStore) -> BootSnapshot {
    let app_memory = match load_pref_lenient(store, APP_MEMORY_KEY).await {
        Ok(entries) => entries,
        Err(err) => {
            leptos::logging::warn!("app memory load failed: {err}");
            None
        }
    };
    let appearance = match load_pref_lenient(store, APPEARANCE_KEY).await {
        Ok(appearance) => appearance,
        Err(err) => {
            leptos::logging::warn!("appearance load failed: {err}");
            None
        }
    };
    BootSnapshot {
        app_memory,
        appearance,
    }
}

/// Persists the full per-app memory map.
pub async fn persist_app_memory(store: &dyn PrefsStore, state: &DesktopState) -> Result<(), String> {
    save_pref_with(store, APP_MEMORY_KEY, state.app_memory.entries()).await
}

/// Persists wallpaper/theme.
pub async fn persist_appearance(
    store: &dyn PrefsStore,
    appearance: &DesktopAppearance,
) -> Result<(), String> {
    save_pref_with(store, APPEARANCE_KEY, appearance).await
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use platform_host::{MemoryPrefsStore, PrefsStoreFuture};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::{Point, Size, ThemeMode, Viewport};

    struct FailingStore;

    impl PrefsStore for FailingStore {
        fn load_pref<'a>(
            &'a self,
            _key: &'a str,
        ) -> PrefsStoreFuture<'a, Result<Option<String>, String>> {
            Box::pin(async { Err("storage offline".to_string()) })
        }

        fn save_pref<'a>(
            &'a self,
            _key: &'a str,
            _raw_json: &'a str,
        ) -> PrefsStoreFuture<'a, Result<(), String>> {
            Box::pin(async { Err("storage offline".to_string()) })
        }

        fn delete_pref<'a>(&'a self, _key: &'a str) -> PrefsStoreFuture<'a, Result<(), String>> {
            Box::pin(async { Ok(()) })
        }
    }

    #[test]
    fn empty_store_yields_empty_snapshot() {
        let snapshot = block_on(load_boot_snapshot(&MemoryPrefsStore::default()));
        assert!(snapshot.is_empty());
    }

    #[test]
    fn app_memory_round_trips_through_store() {
        let store = MemoryPrefsStore::default();
        let mut state = DesktopState {
            viewport: Some(Viewport {
                width: 1000,
                height: 800,
            }),
            ..DesktopState::default()
        };
        state.app_memory.set("Notepad", state.viewport, |memory| AppMemory {
            last_position: Some(Point { x: 5, y: 6 }),
            ..memory
        });

        block_on(persist_app_memory(&store, &state)).expect("persist");
        assert_eq!(store.keys(), vec![APP_MEMORY_KEY.to_string()]);

        let snapshot = block_on(load_boot_snapshot(&store));
        let entries = snapshot.app_memory.expect("memory present");
        assert_eq!(
            entries.get("Notepad"),
            Some(&AppMemory {
                maximized: false,
                last_position: Some(Point { x: 5, y: 6 }),
                last_size: Size {
                    width: 630,
                    height: 512
                },
            })
        );
    }

    #[test]
    fn malformed_json_is_treated_as_absent() {
        let store = MemoryPrefsStore::with_entries([
            (APP_MEMORY_KEY, "[1,2"),
            (APPEARANCE_KEY, r#"{"theme":"dark"}"#),
        ]);
        let snapshot = block_on(load_boot_snapshot(&store));
        assert_eq!(snapshot.app_memory, None);
        assert_eq!(
            snapshot.appearance,
            Some(DesktopAppearance {
                wallpaper: None,
                theme: ThemeMode::Dark,
            })
        );
    }

    #[test]
    fn store_failures_degrade_to_defaults() {
        assert!(block_on(load_boot_snapshot(&FailingStore)).is_empty());
        assert!(block_on(persist_appearance(&FailingStore, &DesktopAppearance::default())).is_err());
    }
}
