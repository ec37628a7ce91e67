//! Global stacking counter.

use crate::model::{WindowRecord, INITIAL_Z_INDEX};

/// Monotonic z counter. The window whose `z_index` equals [`ZOrder::current`] is topmost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZOrder {
    counter: u32,
}

impl Default for ZOrder {
    fn default() -> Self {
        Self {
            counter: INITIAL_Z_INDEX,
        }
    }
}

impl ZOrder {
    pub fn current(&self) -> u32 {
        self.counter
    }

    /// Increments the counter and returns the new top value.
    pub fn advance(&mut self) -> u32 {
        self.counter += 1;
        self.counter
    }

    pub fn is_topmost(&self, window: &WindowRecord) -> bool {
        window.z_index == self.counter
    }

    /// Raises `window` to the top. Returns `false` when it already was topmost.
    pub fn focus(&mut self, window: &mut WindowRecord) -> bool {
        if self.is_topmost(window) {
            return false;
        }
        window.z_index = self.advance();
        true
    }
}

#[cfg(test)]
mod tests {
    use desktop_app_contract::AppDescriptor;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::{WindowId, WindowRect};

    fn window(id: u64, z_index: u32) -> WindowRecord {
        WindowRecord {
            id: WindowId(id),
            app: AppDescriptor::new("Notepad"),
            rect: WindowRect {
                x: 0,
                y: 0,
                w: 100,
                h: 100,
            },
            z_index,
            minimized: false,
            maximized: false,
        }
    }

    #[test]
    fn counter_starts_at_initial_index() {
        assert_eq!(ZOrder::default().current(), INITIAL_Z_INDEX);
    }

    #[test]
    fn focusing_topmost_window_does_not_grow_counter() {
        let mut z = ZOrder::default();
        let mut top = window(1, z.advance());

        assert!(!z.focus(&mut top));
        assert_eq!(z.current(), INITIAL_Z_INDEX + 1);
        assert!(z.is_topmost(&top));
    }

    #[test]
    fn focus_assigns_strictly_increasing_values() {
        let mut z = ZOrder::default();
        let mut a = window(1, z.advance());
        let mut b = window(2, z.advance());

        assert!(z.focus(&mut a));
        assert_eq!(a.z_index, INITIAL_Z_INDEX + 3);
        assert!(!z.is_topmost(&b));

        assert!(z.focus(&mut b));
        assert!(b.z_index > a.z_index);
        assert!(z.is_topmost(&b));
        assert!(!z.is_topmost(&a));
    }
}
