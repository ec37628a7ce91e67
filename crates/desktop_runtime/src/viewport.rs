//! Current viewport size plus an explicit listener list for windows that clamp on resize.
//!
//! Listeners are invoked synchronously from [`ViewportTracker::publish`], outside the reactive
//! graph, so a resize only re-renders the windows whose geometry actually changes.

use std::{cell::RefCell, fmt, rc::Rc};

use crate::{
    model::{Viewport, WindowId},
    reducer::DesktopAction,
};

/// Handle returned by [`ViewportTracker::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerId(u64);

type Listener = Rc<dyn Fn(Viewport, Option<Viewport>)>;

#[derive(Default)]
struct TrackerInner {
    current: Option<Viewport>,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener_id: u64,
}

/// Shared viewport tracker; clones observe the same state.
#[derive(Clone, Default)]
pub struct ViewportTracker {
    inner: Rc<RefCell<TrackerInner>>,
}

impl fmt::Debug for ViewportTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("ViewportTracker")
            .field("current", &inner.current)
            .field("listeners", &inner.listeners.len())
            .finish()
    }
}

impl ViewportTracker {
    pub fn current(&self) -> Option<Viewport> {
        self.inner.borrow().current
    }

    /// Records `viewport` and notifies listeners with `(new, previous)` when it changed.
    ///
    /// Returns the previous value. Listeners may subscribe or unsubscribe while being notified;
    /// such changes apply from the next publish.
    pub fn publish(&self, viewport: Viewport) -> Option<Viewport> {
        let (previous, listeners) = {
            let mut inner = self.inner.borrow_mut();
            let previous = inner.current.replace(viewport);
            if previous == Some(viewport) {
                return previous;
            }
            let listeners: Vec<Listener> = inner
                .listeners
                .iter()
                .map(|(_, listener)| Rc::clone(listener))
                .collect();
            (previous, listeners)
        };

        for listener in listeners {
            listener(viewport, previous);
        }
        previous
    }

    pub fn subscribe<F>(&self, listener: F) -> ListenerId
    where
        F: Fn(Viewport, Option<Viewport>) + 'static,
    {
        let mut inner = self.inner.borrow_mut();
        let id = ListenerId(inner.next_listener_id);
        inner.next_listener_id += 1;
        inner.listeners.push((id, Rc::new(listener)));
        id
    }

    /// Removes a listener. Returns `false` if it was already removed.
    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        let mut inner = self.inner.borrow_mut();
        let before = inner.listeners.len();
        inner.listeners.retain(|(listener_id, _)| *listener_id != id);
        inner.listeners.len() != before
    }

    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }
}

/// Asks for `window_id` to be clamped through `dispatch` on every viewport change.
///
/// The returned id must be unsubscribed when the window unmounts.
pub fn subscribe_viewport_clamp<F>(
    tracker: &ViewportTracker,
    window_id: WindowId,
    dispatch: F,
) -> ListenerId
where
    F: Fn(DesktopAction) + 'static,
{
    tracker.subscribe(move |_, _| dispatch(DesktopAction::ClampToViewport { window_id }))
}
