//! Reducer actions, side-effect intents, and transition logic for the desktop runtime.

use std::collections::BTreeMap;

use desktop_app_contract::AppDescriptor;
use thiserror::Error;

use crate::{
    app_memory::AppMemory,
    controller,
    dock::{dock_tap, DockTapOutcome},
    geometry::ResizeEdge,
    model::{
        DesktopAppearance, DesktopState, InteractionState, PointerPosition, ThemeMode, Viewport,
        WindowId,
    },
};

#[derive(Debug, Clone, PartialEq)]
/// Actions accepted by [`reduce_desktop`] to mutate [`DesktopState`].
pub enum DesktopAction {
    /// Open a new window of the given application.
    OpenWindow(AppDescriptor),
    /// Close a window by id.
    CloseWindow {
        /// Window to close.
        window_id: WindowId,
    },
    /// Raise a window to the top of the stack.
    FocusWindow {
        /// Window to focus.
        window_id: WindowId,
    },
    /// Flip a window's minimized flag.
    ToggleMinimize {
        /// Window to minimize or unminimize.
        window_id: WindowId,
    },
    /// Flip a window's maximized flag.
    ToggleMaximize {
        /// Window to maximize or restore.
        window_id: WindowId,
    },
    /// Primary activation of a dock icon.
    DockTap {
        /// Application behind the icon.
        app: AppDescriptor,
    },
    /// Secondary (context) activation of a dock icon; always opens a new instance.
    DockOpenNew {
        /// Application behind the icon.
        app: AppDescriptor,
    },
    /// Begin dragging a window.
    BeginMove {
        /// Window being dragged.
        window_id: WindowId,
        /// Pointer position at drag start.
        pointer: PointerPosition,
    },
    /// Update an in-progress window drag.
    UpdateMove {
        /// Current pointer position.
        pointer: PointerPosition,
    },
    /// End the active window drag.
    EndMove,
    /// Begin resizing a window.
    BeginResize {
        /// Window being resized.
        window_id: WindowId,
        /// Edge or corner being dragged.
        edge: ResizeEdge,
        /// Pointer position at resize start.
        pointer: PointerPosition,
    },
    /// Update an in-progress window resize.
    UpdateResize {
        /// Current pointer position.
        pointer: PointerPosition,
    },
    /// End the active window resize.
    EndResize,
    /// Record a new viewport measurement.
    ViewportChanged {
        /// Measured viewport.
        viewport: Viewport,
    },
    /// Pull a window back inside the current viewport.
    ClampToViewport {
        /// Window to clamp.
        window_id: WindowId,
    },
    /// Set or clear the wallpaper token.
    SetWallpaper {
        /// New wallpaper, `None` for the plain background.
        wallpaper: Option<String>,
    },
    /// Set the theme mode.
    SetThemeMode {
        /// New theme mode.
        theme: ThemeMode,
    },
    /// Merge persisted per-app memory.
    HydrateAppMemory {
        /// Entries loaded from storage.
        entries: BTreeMap<String, AppMemory>,
    },
    /// Replace appearance with the persisted value.
    HydrateAppearance {
        /// Appearance loaded from storage.
        appearance: DesktopAppearance,
    },
    /// Mark boot hydration finished and open the boot-time applications.
    BootHydrationComplete {
        /// Applications to open once at startup.
        boot_apps: Vec<AppDescriptor>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Side-effect intents emitted by [`reduce_desktop`] for the runtime to execute.
pub enum RuntimeEffect {
    /// Persist the whole per-app memory map.
    PersistAppMemory,
    /// Persist wallpaper/theme.
    PersistAppearance,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Reducer errors for actions that can never succeed.
pub enum ReducerError {
    /// An open request carried descriptor metadata that fails validation.
    #[error("invalid app descriptor: {0}")]
    InvalidDescriptor(String),
}

/// Applies a [`DesktopAction`] to the desktop runtime state and collects resulting side effects.
///
/// Actions addressing a window that is no longer open are ignored and yield no effects.
///
/// # Errors
///
/// Returns [`ReducerError::InvalidDescriptor`] when an open request carries an invalid
/// [`AppDescriptor`].
pub fn reduce_desktop(
    state: &mut DesktopState,
    interaction: &mut InteractionState,
    action: DesktopAction,
) -> Result<Vec<RuntimeEffect>, ReducerError> {
    let mut effects = Vec::new();
    match action {
        DesktopAction::OpenWindow(app) | DesktopAction::DockOpenNew { app } => {
            open_window(state, app)?;
        }
        DesktopAction::CloseWindow { window_id } => {
            if controller::close(state, window_id).is_some() {
                cancel_interaction_for(interaction, window_id);
            }
        }
        DesktopAction::FocusWindow { window_id } => {
            controller::focus(state, window_id);
        }
        DesktopAction::ToggleMinimize { window_id } => {
            if controller::toggle_minimize(state, window_id) == Some(true) {
                cancel_interaction_for(interaction, window_id);
            }
        }
        DesktopAction::ToggleMaximize { window_id } => {
            if controller::toggle_maximize(state, window_id).is_some() {
                cancel_interaction_for(interaction, window_id);
                effects.push(RuntimeEffect::PersistAppMemory);
            }
        }
        DesktopAction::DockTap { app } => match dock_tap(state, &app.app_name) {
            DockTapOutcome::Open | DockTapOutcome::OpenAnother => {
                open_window(state, app)?;
            }
            DockTapOutcome::Focus(window_id) => {
                controller::focus(state, window_id);
                controller::set_minimized(state, window_id, false);
            }
            DockTapOutcome::ToggleMinimize(window_id) => {
                controller::toggle_minimize(state, window_id);
            }
        },
        DesktopAction::BeginMove { window_id, pointer } => {
            controller::focus(state, window_id);
            controller::begin_drag(state, interaction, window_id, pointer);
        }
        DesktopAction::UpdateMove { pointer } => {
            controller::update_drag(state, interaction, pointer);
        }
        DesktopAction::EndMove => {
            if controller::end_drag(state, interaction).is_some() {
                effects.push(RuntimeEffect::PersistAppMemory);
            }
        }
        DesktopAction::BeginResize {
            window_id,
            edge,
            pointer,
        } => {
            controller::focus(state, window_id);
            controller::begin_resize(state, interaction, window_id, edge, pointer);
        }
        DesktopAction::UpdateResize { pointer } => {
            controller::update_resize(state, interaction, pointer);
        }
        DesktopAction::EndResize => {
            if controller::end_resize(state, interaction).is_some() {
                effects.push(RuntimeEffect::PersistAppMemory);
            }
        }
        DesktopAction::ViewportChanged { viewport } => {
            state.viewport = Some(viewport);
        }
        DesktopAction::ClampToViewport { window_id } => {
            controller::clamp_window(state, interaction, window_id);
        }
        DesktopAction::SetWallpaper { wallpaper } => {
            if state.appearance.wallpaper != wallpaper {
                state.appearance.wallpaper = wallpaper;
                effects.push(RuntimeEffect::PersistAppearance);
            }
        }
        DesktopAction::SetThemeMode { theme } => {
            if state.appearance.theme != theme {
                state.appearance.theme = theme;
                effects.push(RuntimeEffect::PersistAppearance);
            }
        }
        DesktopAction::HydrateAppMemory { entries } => {
            state.app_memory.hydrate(entries);
        }
        DesktopAction::HydrateAppearance { appearance } => {
            state.appearance = appearance;
        }
        DesktopAction::BootHydrationComplete { boot_apps } => {
            if !state.boot_complete {
                state.boot_complete = true;
                for app in boot_apps {
                    if state.registry.instances_of(&app.app_name).next().is_none() {
                        open_window(state, app)?;
                    }
                }
            }
        }
    }

    Ok(effects)
}

fn open_window(state: &mut DesktopState, app: AppDescriptor) -> Result<WindowId, ReducerError> {
    app.validate().map_err(ReducerError::InvalidDescriptor)?;
    let DesktopState {
        registry,
        z_order,
        app_memory,
        viewport,
        ..
    } = state;
    let window_id = registry.open(app, app_memory, z_order, *viewport);
    // Remembered geometry may predate a viewport shrink.
    if let (Some(viewport), Some(window)) = (*viewport, registry.get_mut(window_id)) {
        controller::clamp_to_viewport(window, viewport);
    }
    Ok(window_id)
}

fn cancel_interaction_for(interaction: &mut InteractionState, window_id: WindowId) {
    if interaction.active_window_id() == Some(window_id) {
        *interaction = InteractionState::default();
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::WindowRect;

    const VIEWPORT: Viewport = Viewport {
        width: 1030,
        height: 712,
    };

    fn booted() -> (DesktopState, InteractionState) {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::ViewportChanged { viewport: VIEWPORT },
        )
        .expect("viewport");
        (state, interaction)
    }

    fn open(
        state: &mut DesktopState,
        interaction: &mut InteractionState,
        app_name: &str,
    ) -> WindowId {
        reduce_desktop(
            state,
            interaction,
            DesktopAction::OpenWindow(AppDescriptor::new(app_name)),
        )
        .expect("open");
        state.windows().last().expect("window").id
    }

    #[test]
    fn open_rejects_invalid_descriptor_without_touching_state() {
        let (mut state, mut interaction) = booted();
        let err = reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::OpenWindow(AppDescriptor::new("  ")),
        )
        .expect_err("blank name");
        assert!(matches!(err, ReducerError::InvalidDescriptor(_)));
        assert!(state.windows().is_empty());
        assert_eq!(state.z_order.current(), crate::model::INITIAL_Z_INDEX);
    }

    #[test]
    fn stale_window_actions_are_silent_noops() {
        let (mut state, mut interaction) = booted();
        let id = open(&mut state, &mut interaction, "Notepad");
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::CloseWindow { window_id: id },
        )
        .expect("close");
        let before = state.clone();

        for action in [
            DesktopAction::CloseWindow { window_id: id },
            DesktopAction::FocusWindow { window_id: id },
            DesktopAction::ToggleMinimize { window_id: id },
            DesktopAction::ToggleMaximize { window_id: id },
            DesktopAction::ClampToViewport { window_id: id },
            DesktopAction::BeginMove {
                window_id: id,
                pointer: PointerPosition { x: 0, y: 0 },
            },
        ] {
            let effects = reduce_desktop(&mut state, &mut interaction, action).expect("no error");
            assert_eq!(effects, Vec::new());
        }
        assert_eq!(state, before);
        assert!(!interaction.is_active());
    }

    #[test]
    fn drag_end_persists_app_memory() {
        let (mut state, mut interaction) = booted();
        let id = open(&mut state, &mut interaction, "Notepad");

        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::BeginMove {
                window_id: id,
                pointer: PointerPosition { x: 300, y: 110 },
            },
        )
        .expect("begin");
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::UpdateMove {
                pointer: PointerPosition { x: 310, y: 130 },
            },
        )
        .expect("update");
        let effects =
            reduce_desktop(&mut state, &mut interaction, DesktopAction::EndMove).expect("end");

        assert_eq!(effects, vec![RuntimeEffect::PersistAppMemory]);
        assert_eq!(
            state.window(id).expect("window").rect,
            WindowRect {
                x: 210,
                y: 120,
                w: 630,
                h: 512
            }
        );
    }

    #[test]
    fn end_without_session_emits_nothing() {
        let (mut state, mut interaction) = booted();
        assert_eq!(
            reduce_desktop(&mut state, &mut interaction, DesktopAction::EndMove).expect("end"),
            Vec::new()
        );
        assert_eq!(
            reduce_desktop(&mut state, &mut interaction, DesktopAction::EndResize).expect("end"),
            Vec::new()
        );
    }

    #[test]
    fn closing_dragged_window_ends_its_session() {
        let (mut state, mut interaction) = booted();
        let id = open(&mut state, &mut interaction, "Notepad");
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::BeginResize {
                window_id: id,
                edge: ResizeEdge::SouthEast,
                pointer: PointerPosition { x: 830, y: 612 },
            },
        )
        .expect("begin");
        assert!(interaction.is_active());

        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::CloseWindow { window_id: id },
        )
        .expect("close");
        assert!(!interaction.is_active());
    }

    #[test]
    fn dock_tap_cycles_single_instance() {
        let (mut state, mut interaction) = booted();
        let notepad = AppDescriptor::new("Notepad");
        let tap = |state: &mut DesktopState, interaction: &mut InteractionState| {
            reduce_desktop(
                state,
                interaction,
                DesktopAction::DockTap {
                    app: notepad.clone(),
                },
            )
            .expect("tap");
        };

        tap(&mut state, &mut interaction);
        assert_eq!(state.windows().len(), 1);
        let id = state.windows()[0].id;

        tap(&mut state, &mut interaction);
        assert!(state.window(id).expect("window").minimized);

        open(&mut state, &mut interaction, "Camera");
        tap(&mut state, &mut interaction);
        let window = state.window(id).expect("window");
        assert!(!window.minimized);
        assert_eq!(state.topmost_window_id(), Some(id));
    }

    #[test]
    fn dock_tap_after_closing_topmost_minimizes_remaining_window() {
        let (mut state, mut interaction) = booted();
        let notepad = open(&mut state, &mut interaction, "Notepad");
        let camera = open(&mut state, &mut interaction, "Camera");
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::CloseWindow { window_id: camera },
        )
        .expect("close");
        assert_eq!(state.topmost_window_id(), Some(notepad));

        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::DockTap {
                app: AppDescriptor::new("Notepad"),
            },
        )
        .expect("tap");
        assert!(state.window(notepad).expect("window").minimized);
    }

    #[test]
    fn reopening_after_viewport_shrink_keeps_window_reachable() {
        let (mut state, mut interaction) = booted();
        let id = open(&mut state, &mut interaction, "Notepad");
        let start = state.window(id).expect("window").rect;
        for action in [
            DesktopAction::BeginMove {
                window_id: id,
                pointer: PointerPosition { x: start.x, y: start.y },
            },
            DesktopAction::UpdateMove {
                pointer: PointerPosition {
                    x: 1000,
                    y: start.y,
                },
            },
            DesktopAction::EndMove,
            DesktopAction::CloseWindow { window_id: id },
            DesktopAction::ViewportChanged {
                viewport: Viewport {
                    width: 800,
                    height: 712,
                },
            },
        ] {
            reduce_desktop(&mut state, &mut interaction, action).expect("action");
        }

        let reopened = open(&mut state, &mut interaction, "Notepad");
        let rect = state.window(reopened).expect("window").rect;
        assert_eq!(rect.x, 800 - rect.w);
        assert_eq!(rect.y, start.y);
    }

    #[test]
    fn dock_context_action_always_opens() {
        let (mut state, mut interaction) = booted();
        for _ in 0..3 {
            reduce_desktop(
                &mut state,
                &mut interaction,
                DesktopAction::DockOpenNew {
                    app: AppDescriptor::new("Gallery"),
                },
            )
            .expect("open");
        }
        assert_eq!(state.registry.instances_of("Gallery").count(), 3);
    }

    #[test]
    fn appearance_changes_persist_only_when_different() {
        let (mut state, mut interaction) = booted();
        let effects = reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::SetThemeMode {
                theme: ThemeMode::Dark,
            },
        )
        .expect("theme");
        assert_eq!(effects, vec![RuntimeEffect::PersistAppearance]);

        let effects = reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::SetThemeMode {
                theme: ThemeMode::Dark,
            },
        )
        .expect("theme");
        assert_eq!(effects, Vec::new());
    }

    #[test]
    fn boot_apps_open_once() {
        let (mut state, mut interaction) = booted();
        let boot = DesktopAction::BootHydrationComplete {
            boot_apps: vec![AppDescriptor::new("Settings")],
        };
        reduce_desktop(&mut state, &mut interaction, boot.clone()).expect("boot");
        reduce_desktop(&mut state, &mut interaction, boot).expect("boot again");

        assert!(state.boot_complete);
        assert_eq!(state.registry.instances_of("Settings").count(), 1);
    }
}
