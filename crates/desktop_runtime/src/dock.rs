//! Dock launcher policy.

use desktop_app_contract::AppDescriptor;

use crate::model::{DesktopState, WindowId};

/// What a primary tap on a dock icon should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DockTapOutcome {
    /// No window of the app is open.
    Open,
    /// The single open window is behind another window: raise it and unminimize it.
    Focus(WindowId),
    /// The single open window is already topmost: flip its minimized flag.
    ToggleMinimize(WindowId),
    /// Several windows are open; the dock does not pick one and opens another instance instead.
    OpenAnother,
}

/// Decides the tap outcome for `app_name` against the current registry.
///
/// Raising and minimizing are never folded into one tap: a window that is not topmost is raised
/// first, and only a tap on the topmost window minimizes it.
pub fn dock_tap(state: &DesktopState, app_name: &str) -> DockTapOutcome {
    let mut instances = state.registry.instances_of(app_name);
    let Some(first) = instances.next() else {
        return DockTapOutcome::Open;
    };
    if instances.next().is_some() {
        return DockTapOutcome::OpenAnother;
    }

    if state.z_order.is_topmost(first) {
        DockTapOutcome::ToggleMinimize(first.id)
    } else {
        DockTapOutcome::Focus(first.id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DockEntry {
    pub descriptor: AppDescriptor,
    pub pinned: bool,
    pub open_count: usize,
    /// One of the app's windows is topmost and visible.
    pub active: bool,
}

impl DockEntry {
    pub fn is_running(&self) -> bool {
        self.open_count > 0
    }
}

/// Pinned apps in catalog order, followed by unpinned apps that currently have windows.
pub fn dock_entries(pinned: &[AppDescriptor], state: &DesktopState) -> Vec<DockEntry> {
    let entry = |descriptor: &AppDescriptor, pinned: bool| {
        let mut open_count = 0;
        let mut active = false;
        for window in state.registry.instances_of(&descriptor.app_name) {
            open_count += 1;
            active |= !window.minimized && state.z_order.is_topmost(window);
        }
        DockEntry {
            descriptor: descriptor.clone(),
            pinned,
            open_count,
            active,
        }
    };

    let mut entries: Vec<DockEntry> = pinned.iter().map(|app| entry(app, true)).collect();
    for window in state.windows() {
        if entries
            .iter()
            .any(|existing| existing.descriptor.app_name == window.app_name())
        {
            continue;
        }
        entries.push(entry(&window.app, false));
    }
    entries
}
