//! Per-application remembered geometry, keyed by application name.
//!
//! Entries are created lazily the first time an application is looked up, using the viewport
//! known at that moment. Once created, an entry is only changed through [`AppMemoryStore::set`]
//! or boot hydration; it is never recomputed from a later viewport.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::model::{Point, Size, Viewport, WindowRect};

/// Default remembered width before the viewport cap is applied.
pub const DEFAULT_MEMORY_WIDTH: i32 = 630;
/// Default remembered height before the viewport cap is applied.
pub const DEFAULT_MEMORY_HEIGHT: i32 = 512;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppMemory {
    pub maximized: bool,
    /// `None` until the application has been placed against a measured viewport.
    pub last_position: Option<Point>,
    pub last_size: Size,
}

impl AppMemory {
    /// Computes the first-access default for `viewport`.
    pub fn default_for(viewport: Option<Viewport>) -> Self {
        let Some(viewport) = viewport else {
            return Self {
                maximized: false,
                last_position: None,
                last_size: Size {
                    width: DEFAULT_MEMORY_WIDTH,
                    height: DEFAULT_MEMORY_HEIGHT,
                },
            };
        };

        let last_size = Size {
            width: DEFAULT_MEMORY_WIDTH.min(viewport.width),
            height: DEFAULT_MEMORY_HEIGHT.min(viewport.height),
        };
        Self {
            maximized: false,
            last_position: Some(centered(viewport, last_size)),
            last_size,
        }
    }

    /// Floating rectangle this memory describes.
    ///
    /// An unplaced entry is centered in `viewport`, or put at the origin when the viewport is not
    /// measured yet.
    pub fn floating_rect(&self, viewport: Option<Viewport>) -> WindowRect {
        let position = self.last_position.unwrap_or_else(|| {
            viewport
                .map(|viewport| centered(viewport, self.last_size))
                .unwrap_or_default()
        });
        WindowRect::from_parts(position, self.last_size)
    }
}

fn centered(viewport: Viewport, size: Size) -> Point {
    Point {
        x: (viewport.width - size.width) / 2,
        y: (viewport.height - size.height) / 2,
    }
}

/// Lazily-defaulted map from application name to [`AppMemory`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppMemoryStore {
    entries: BTreeMap<String, AppMemory>,
    /// Keys written by this session; boot hydration must not overwrite them.
    written: BTreeSet<String>,
}

impl AppMemoryStore {
    pub fn contains(&self, app_name: &str) -> bool {
        self.entries.contains_key(app_name)
    }

    /// Returns the entry without creating it.
    pub fn peek(&self, app_name: &str) -> Option<&AppMemory> {
        self.entries.get(app_name)
    }

    /// Returns the entry for `app_name`, creating the default for `viewport` on first access.
    pub fn get(&mut self, app_name: &str, viewport: Option<Viewport>) -> AppMemory {
        *self
            .entries
            .entry(app_name.to_string())
            .or_insert_with(|| AppMemory::default_for(viewport))
    }

    /// Replaces the entry for `app_name` with `update(current)`.
    pub fn set<F>(&mut self, app_name: &str, viewport: Option<Viewport>, update: F) -> AppMemory
    where
        F: FnOnce(AppMemory) -> AppMemory,
    {
        let next = update(self.get(app_name, viewport));
        self.entries.insert(app_name.to_string(), next);
        self.written.insert(app_name.to_string());
        next
    }

    pub fn entries(&self) -> &BTreeMap<String, AppMemory> {
        &self.entries
    }

    /// Merges persisted entries, keeping anything this session already wrote.
    ///
    /// Returns the number of entries taken from `persisted`.
    pub fn hydrate(&mut self, persisted: BTreeMap<String, AppMemory>) -> usize {
        let mut applied = 0;
        for (app_name, memory) in persisted {
            if self.written.contains(&app_name) {
                continue;
            }
            self.entries.insert(app_name, memory);
            applied += 1;
        }
        applied
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn viewport(width: i32, height: i32) -> Option<Viewport> {
        Some(Viewport { width, height })
    }

    #[test]
    fn default_is_capped_to_viewport_and_centered() {
        let memory = AppMemory::default_for(viewport(1000, 800));
        assert_eq!(
            memory,
            AppMemory {
                maximized: false,
                last_position: Some(Point { x: 185, y: 144 }),
                last_size: Size {
                    width: 630,
                    height: 512
                },
            }
        );

        let small = AppMemory::default_for(viewport(400, 300));
        assert_eq!(
            small.last_size,
            Size {
                width: 400,
                height: 300
            }
        );
        assert_eq!(small.last_position, Some(Point { x: 0, y: 0 }));
    }

    #[test]
    fn unknown_viewport_leaves_position_unplaced() {
        let memory = AppMemory::default_for(None);
        assert_eq!(memory.last_position, None);
        assert_eq!(
            memory.floating_rect(None),
            WindowRect {
                x: 0,
                y: 0,
                w: 630,
                h: 512
            }
        );
        assert_eq!(
            memory.floating_rect(viewport(1030, 712)),
            WindowRect {
                x: 200,
                y: 100,
                w: 630,
                h: 512
            }
        );
    }

    #[test]
    fn default_is_computed_once_per_key() {
        let mut store = AppMemoryStore::default();
        assert!(!store.contains("Notepad"));

        let first = store.get("Notepad", viewport(1000, 800));
        let second = store.get("Notepad", viewport(300, 200));
        assert_eq!(first, second);
        assert!(store.contains("Notepad"));
        assert_eq!(store.peek("Camera"), None);
    }

    #[test]
    fn set_applies_updater_to_current_value() {
        let mut store = AppMemoryStore::default();
        let next = store.set("Paint", viewport(1000, 800), |memory| AppMemory {
            maximized: true,
            ..memory
        });
        assert!(next.maximized);
        assert_eq!(store.peek("Paint"), Some(&next));
    }

    #[test]
    fn hydrate_does_not_clobber_session_writes() {
        let mut store = AppMemoryStore::default();
        store.set("Paint", None, |memory| AppMemory {
            maximized: true,
            ..memory
        });
        store.get("Camera", None);

        let persisted: BTreeMap<_, _> = [
            ("Paint".to_string(), AppMemory::default_for(None)),
            (
                "Camera".to_string(),
                AppMemory {
                    maximized: true,
                    ..AppMemory::default_for(None)
                },
            ),
        ]
        .into_iter()
        .collect();

        assert_eq!(store.hydrate(persisted), 1);
        assert!(store.peek("Paint").is_some_and(|memory| memory.maximized));
        assert!(store.peek("Camera").is_some_and(|memory| memory.maximized));
    }

    #[test]
    fn serializes_with_camel_case_field_names() {
        let memory = AppMemory {
            maximized: false,
            last_position: None,
            last_size: Size {
                width: 10,
                height: 20,
            },
        };
        assert_eq!(
            serde_json::to_string(&memory).expect("serialize"),
            r#"{"maximized":false,"lastPosition":null,"lastSize":{"width":10,"height":20}}"#
        );
    }
}
