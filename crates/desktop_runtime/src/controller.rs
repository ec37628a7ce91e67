//! Per-window transitions: drag, resize, minimize, maximize, viewport clamping.
//!
//! A window is in exactly one [`WindowPhase`]. Floating geometry lives in
//! [`WindowRecord::rect`] and survives minimize and maximize untouched; the maximized rectangle is
//! derived from the viewport at render time. Drag and resize sessions only exist for floating
//! windows, and each session end commits the final rectangle to the app's memory.

use crate::{
    app_memory::{AppMemory, AppMemoryStore},
    geometry::{apply_resize_edge, ResizeEdge},
    model::{
        DesktopState, InteractionState, PointerPosition, Viewport, WindowId, WindowRecord,
        WindowRect,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowPhase {
    Floating,
    Minimized,
    Maximized,
}

impl WindowRecord {
    /// Minimized takes precedence: a minimized window keeps its `maximized` flag for restore.
    pub fn phase(&self) -> WindowPhase {
        if self.minimized {
            WindowPhase::Minimized
        } else if self.maximized {
            WindowPhase::Maximized
        } else {
            WindowPhase::Floating
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragSession {
    pub window_id: WindowId,
    pub pointer_start: PointerPosition,
    pub rect_start: WindowRect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeSession {
    pub window_id: WindowId,
    pub edge: ResizeEdge,
    /// Pointer position of the previous move event; deltas are measured from here.
    pub last_pointer: PointerPosition,
}

/// Raises `window_id` to the top. Returns `false` for an absent or already-topmost window.
pub fn focus(state: &mut DesktopState, window_id: WindowId) -> bool {
    let DesktopState {
        registry, z_order, ..
    } = state;
    registry
        .get_mut(window_id)
        .is_some_and(|window| z_order.focus(window))
}

/// Closes `window_id`. When it was topmost, the highest remaining window becomes topmost.
pub fn close(state: &mut DesktopState, window_id: WindowId) -> Option<WindowRecord> {
    let closed = state.registry.close(window_id)?;
    if state.z_order.is_topmost(&closed) {
        let DesktopState {
            registry, z_order, ..
        } = state;
        if let Some(next) = registry.iter_mut().max_by_key(|window| window.z_index) {
            z_order.focus(next);
        }
    }
    Some(closed)
}

pub fn begin_drag(
    state: &DesktopState,
    interaction: &mut InteractionState,
    window_id: WindowId,
    pointer: PointerPosition,
) -> bool {
    let Some(window) = state.window(window_id) else {
        return false;
    };
    if window.phase() != WindowPhase::Floating {
        return false;
    }
    interaction.resizing = None;
    interaction.dragging = Some(DragSession {
        window_id,
        pointer_start: pointer,
        rect_start: window.rect,
    });
    true
}

/// Moves the dragged window so it follows the pointer. Returns `true` when geometry changed.
pub fn update_drag(
    state: &mut DesktopState,
    interaction: &InteractionState,
    pointer: PointerPosition,
) -> bool {
    let Some(session) = interaction.dragging else {
        return false;
    };
    let Some(window) = state.registry.get_mut(session.window_id) else {
        return false;
    };
    let next = session.rect_start.offset(
        pointer.x - session.pointer_start.x,
        pointer.y - session.pointer_start.y,
    );
    if next == window.rect {
        return false;
    }
    window.rect = next;
    true
}

/// Ends the drag and commits the final rectangle. Returns the window whose memory was written.
pub fn end_drag(state: &mut DesktopState, interaction: &mut InteractionState) -> Option<WindowId> {
    let session = interaction.dragging.take()?;
    commit_geometry(state, session.window_id).then_some(session.window_id)
}

pub fn begin_resize(
    state: &DesktopState,
    interaction: &mut InteractionState,
    window_id: WindowId,
    edge: ResizeEdge,
    pointer: PointerPosition,
) -> bool {
    let Some(window) = state.window(window_id) else {
        return false;
    };
    if window.phase() != WindowPhase::Floating {
        return false;
    }
    interaction.dragging = None;
    interaction.resizing = Some(ResizeSession {
        window_id,
        edge,
        last_pointer: pointer,
    });
    true
}

/// Applies one resize step. Size and origin change together or not at all.
pub fn update_resize(
    state: &mut DesktopState,
    interaction: &mut InteractionState,
    pointer: PointerPosition,
) -> bool {
    let Some(session) = interaction.resizing.as_mut() else {
        return false;
    };
    let delta = PointerPosition {
        x: pointer.x - session.last_pointer.x,
        y: pointer.y - session.last_pointer.y,
    };
    session.last_pointer = pointer;

    let Some(window) = state.registry.get_mut(session.window_id) else {
        return false;
    };
    let next = apply_resize_edge(
        window.rect,
        session.edge,
        delta,
        pointer,
        window.app.effective_min_width(),
        window.app.effective_min_height(),
    );
    if next == window.rect {
        return false;
    }
    window.rect = next;
    true
}

pub fn end_resize(
    state: &mut DesktopState,
    interaction: &mut InteractionState,
) -> Option<WindowId> {
    let session = interaction.resizing.take()?;
    commit_geometry(state, session.window_id).then_some(session.window_id)
}

/// Writes the window's floating rectangle into its app's memory.
pub fn commit_geometry(state: &mut DesktopState, window_id: WindowId) -> bool {
    let Some(window) = state.registry.get(window_id) else {
        return false;
    };
    let rect = window.rect;
    state
        .app_memory
        .set(window.app_name(), state.viewport, |memory| AppMemory {
            last_position: Some(rect.position()),
            last_size: rect.size(),
            ..memory
        });
    true
}

/// Rectangle a window of `app_name` returns to when leaving maximized.
pub fn restore_rect_for(
    memory: &mut AppMemoryStore,
    app_name: &str,
    viewport: Option<Viewport>,
) -> WindowRect {
    memory.get(app_name, viewport).floating_rect(viewport)
}

/// Flips maximized.
///
/// Maximizing commits the floating rectangle first. Restoring re-derives the rectangle from the
/// app's memory rather than from any transient pre-maximize copy.
pub fn toggle_maximize(state: &mut DesktopState, window_id: WindowId) -> Option<bool> {
    let was_maximized = state.window(window_id)?.maximized;
    if !was_maximized {
        commit_geometry(state, window_id);
    }

    let viewport = state.viewport;
    let maximized = state
        .registry
        .toggle_maximize(window_id, &mut state.app_memory, viewport)?;

    if !maximized {
        let DesktopState {
            registry,
            app_memory,
            ..
        } = state;
        if let Some(window) = registry.get_mut(window_id) {
            window.rect = restore_rect_for(app_memory, window.app_name(), viewport);
        }
    }
    Some(maximized)
}

pub fn toggle_minimize(state: &mut DesktopState, window_id: WindowId) -> Option<bool> {
    state.registry.toggle_minimize(window_id)
}

/// Sets `minimized` explicitly. Returns `true` when the flag changed.
pub fn set_minimized(state: &mut DesktopState, window_id: WindowId, minimized: bool) -> bool {
    match state.registry.get_mut(window_id) {
        Some(window) if window.minimized != minimized => {
            window.minimized = minimized;
            true
        }
        _ => false,
    }
}

pub fn minimize(state: &mut DesktopState, window_id: WindowId) -> bool {
    set_minimized(state, window_id, true)
}

/// Pulls a non-maximized window back when it would rest below or right of `viewport`.
///
/// Each axis is only moved toward the origin: `x` becomes `width - w` when `x > width - w`.
pub fn clamp_to_viewport(window: &mut WindowRecord, viewport: Viewport) -> bool {
    if window.maximized {
        return false;
    }
    let max_x = viewport.width - window.rect.w;
    let max_y = viewport.height - window.rect.h;
    let mut changed = false;
    if window.rect.x > max_x {
        window.rect.x = max_x;
        changed = true;
    }
    if window.rect.y > max_y {
        window.rect.y = max_y;
        changed = true;
    }
    changed
}

/// Clamps `window_id` to the current viewport.
///
/// An active drag of that window is re-based by the same offset, so the next pointer move
/// continues from the clamped rectangle instead of undoing it.
pub fn clamp_window(
    state: &mut DesktopState,
    interaction: &mut InteractionState,
    window_id: WindowId,
) -> bool {
    let Some(viewport) = state.viewport else {
        return false;
    };
    let Some(window) = state.registry.get_mut(window_id) else {
        return false;
    };
    let before = window.rect;
    if !clamp_to_viewport(window, viewport) {
        return false;
    }
    if let Some(session) = interaction
        .dragging
        .as_mut()
        .filter(|session| session.window_id == window_id)
    {
        session.rect_start = session
            .rect_start
            .offset(window.rect.x - before.x, window.rect.y - before.y);
    }
    true
}

/// Rectangle to render: the full viewport while maximized, else the floating rectangle.
pub fn display_rect(window: &WindowRecord, viewport: Option<Viewport>) -> WindowRect {
    match (window.maximized, viewport) {
        (true, Some(viewport)) => WindowRect::fill(viewport),
        _ => window.rect,
    }
}
