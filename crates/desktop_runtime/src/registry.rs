//! Ordered collection of open windows.
//!
//! Enumeration order is insertion order and never changes on focus; stacking is carried by each
//! record's `z_index`. Windows are addressed by [`WindowId`] only, so two windows of the same
//! application stay distinct.

use std::collections::BTreeMap;

use desktop_app_contract::AppDescriptor;

use crate::{
    app_memory::{AppMemory, AppMemoryStore},
    model::{Viewport, WindowId, WindowRecord, CASCADE_STEP},
    z_order::ZOrder,
};

#[derive(Debug, Clone, PartialEq)]
pub struct WindowRegistry {
    windows: Vec<WindowRecord>,
    next_window_id: u64,
}

impl Default for WindowRegistry {
    fn default() -> Self {
        Self {
            windows: Vec::new(),
            next_window_id: 1,
        }
    }
}

impl WindowRegistry {
    /// Opens a new window of `app` on top of the stack.
    ///
    /// The starting rectangle comes from the app's memory, offset by [`CASCADE_STEP`] for each
    /// instance of the same app already open. `maximized` is seeded from memory.
    pub fn open(
        &mut self,
        app: AppDescriptor,
        memory: &mut AppMemoryStore,
        z_order: &mut ZOrder,
        viewport: Option<Viewport>,
    ) -> WindowId {
        let remembered = memory.get(&app.app_name, viewport);
        let cascade = self.instances_of(&app.app_name).count() as i32 * CASCADE_STEP;

        let id = WindowId(self.next_window_id);
        self.next_window_id += 1;

        self.windows.push(WindowRecord {
            id,
            rect: remembered.floating_rect(viewport).offset(cascade, cascade),
            z_index: z_order.advance(),
            minimized: false,
            maximized: remembered.maximized,
            app,
        });
        id
    }

    /// Removes the window with `window_id`. Absent ids are ignored.
    pub fn close(&mut self, window_id: WindowId) -> Option<WindowRecord> {
        let index = self.windows.iter().position(|w| w.id == window_id)?;
        Some(self.windows.remove(index))
    }

    /// Flips `minimized`. Returns the new value, or `None` for an absent id.
    pub fn toggle_minimize(&mut self, window_id: WindowId) -> Option<bool> {
        let window = self.get_mut(window_id)?;
        window.minimized = !window.minimized;
        Some(window.minimized)
    }

    /// Flips `maximized` and records the new value in the app's memory so later opens inherit it.
    pub fn toggle_maximize(
        &mut self,
        window_id: WindowId,
        memory: &mut AppMemoryStore,
        viewport: Option<Viewport>,
    ) -> Option<bool> {
        let window = self.get_mut(window_id)?;
        window.maximized = !window.maximized;
        let maximized = window.maximized;
        memory.set(&window.app.app_name, viewport, |current| AppMemory {
            maximized,
            ..current
        });
        Some(maximized)
    }

    pub fn get(&self, window_id: WindowId) -> Option<&WindowRecord> {
        self.windows.iter().find(|w| w.id == window_id)
    }

    pub fn get_mut(&mut self, window_id: WindowId) -> Option<&mut WindowRecord> {
        self.windows.iter_mut().find(|w| w.id == window_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &WindowRecord> {
        self.windows.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut WindowRecord> {
        self.windows.iter_mut()
    }

    pub fn windows(&self) -> &[WindowRecord] {
        &self.windows
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    pub fn instances_of<'a>(
        &'a self,
        app_name: &'a str,
    ) -> impl Iterator<Item = &'a WindowRecord> + 'a {
        self.windows.iter().filter(move |w| w.app_name() == app_name)
    }

    /// Open windows grouped by application name, each group in insertion order.
    pub fn grouped_by_app(&self) -> BTreeMap<&str, Vec<&WindowRecord>> {
        let mut groups: BTreeMap<&str, Vec<&WindowRecord>> = BTreeMap::new();
        for window in &self.windows {
            groups.entry(window.app_name()).or_default().push(window);
        }
        groups
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::{Point, WindowRect};

    const VIEWPORT: Option<Viewport> = Some(Viewport {
        width: 1030,
        height: 712,
    });

    struct Fixture {
        registry: WindowRegistry,
        memory: AppMemoryStore,
        z_order: ZOrder,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                registry: WindowRegistry::default(),
                memory: AppMemoryStore::default(),
                z_order: ZOrder::default(),
            }
        }

        fn open(&mut self, app_name: &str) -> WindowId {
            self.registry.open(
                AppDescriptor::new(app_name),
                &mut self.memory,
                &mut self.z_order,
                VIEWPORT,
            )
        }
    }

    #[test]
    fn open_places_window_from_memory_on_top() {
        let mut fx = Fixture::new();
        let id = fx.open("Notepad");
        let window = fx.registry.get(id).expect("window");

        assert_eq!(
            window.rect,
            WindowRect {
                x: 200,
                y: 100,
                w: 630,
                h: 512
            }
        );
        assert_eq!(window.z_index, fx.z_order.current());
        assert!(!window.minimized);
        assert!(!window.maximized);
        assert!(fx.memory.contains("Notepad"));
    }

    #[test]
    fn additional_instances_cascade_from_remembered_position() {
        let mut fx = Fixture::new();
        fx.memory.set("Notepad", VIEWPORT, |memory| AppMemory {
            last_position: Some(Point { x: 40, y: 60 }),
            ..memory
        });

        let first = fx.open("Notepad");
        let second = fx.open("Notepad");
        let other_app = fx.open("Camera");
        let third = fx.open("Notepad");

        let position = |id| fx.registry.get(id).expect("window").rect.position();
        assert_eq!(position(first), Point { x: 40, y: 60 });
        assert_eq!(position(second), Point { x: 60, y: 80 });
        assert_eq!(position(third), Point { x: 80, y: 100 });
        assert_eq!(position(other_app), Point { x: 200, y: 100 });
    }

    #[test]
    fn open_inherits_remembered_maximized_flag() {
        let mut fx = Fixture::new();
        let first = fx.open("Paint");
        fx.registry
            .toggle_maximize(first, &mut fx.memory, VIEWPORT)
            .expect("present");

        let second = fx.open("Paint");
        assert!(fx.registry.get(second).expect("window").maximized);
        assert!(fx.memory.peek("Paint").expect("memory").maximized);
    }

    #[test]
    fn close_is_by_identity_and_idempotent() {
        let mut fx = Fixture::new();
        let a = fx.open("Notepad");
        let b = fx.open("Notepad");
        fx.registry.toggle_minimize(b);

        assert!(fx.registry.close(a).is_some());
        assert!(fx.registry.close(a).is_none());
        assert_eq!(fx.registry.len(), 1);

        let survivor = fx.registry.get(b).expect("b survives");
        assert!(survivor.minimized);
        assert_eq!(survivor.id, b);
    }

    #[test]
    fn ids_are_never_reused() {
        let mut fx = Fixture::new();
        let a = fx.open("Notepad");
        fx.registry.close(a);
        let b = fx.open("Notepad");
        assert_ne!(a, b);
    }

    #[test]
    fn toggles_on_absent_window_are_noops() {
        let mut fx = Fixture::new();
        assert_eq!(fx.registry.toggle_minimize(WindowId(99)), None);
        assert_eq!(
            fx.registry
                .toggle_maximize(WindowId(99), &mut fx.memory, VIEWPORT),
            None
        );
        assert!(fx.memory.entries().is_empty());
    }

    #[test]
    fn enumeration_keeps_insertion_order_and_groups_by_app() {
        let mut fx = Fixture::new();
        let a = fx.open("Notepad");
        let b = fx.open("Camera");
        let c = fx.open("Notepad");

        let order: Vec<_> = fx.registry.iter().map(|w| w.id).collect();
        assert_eq!(order, vec![a, b, c]);

        let groups = fx.registry.grouped_by_app();
        let notepads: Vec<_> = groups["Notepad"].iter().map(|w| w.id).collect();
        assert_eq!(notepads, vec![a, c]);
        assert_eq!(groups["Camera"].len(), 1);
    }
}
