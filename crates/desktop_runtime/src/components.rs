//! Desktop shell UI composition and interaction surfaces.

mod dock;
mod window;

use leptos::*;

use self::{dock::Dock, window::DesktopWindow};

use crate::{
    model::{PointerPosition, WindowId},
    reducer::DesktopAction,
};

/// Height of the dock strip in CSS pixels. Windows may slide underneath it.
pub const DOCK_HEIGHT_PX: i32 = 64;

pub use crate::runtime_context::{use_desktop_runtime, DesktopProvider, DesktopRuntimeContext};

fn pointer_from_pointer_event(ev: &web_sys::PointerEvent) -> PointerPosition {
    PointerPosition {
        x: ev.client_x(),
        y: ev.client_y(),
    }
}

fn end_active_pointer_interaction(runtime: DesktopRuntimeContext) {
    let interaction = runtime.interaction.get_untracked();
    if interaction.dragging.is_some() {
        runtime.dispatch_action(DesktopAction::EndMove);
    }
    if interaction.resizing.is_some() {
        runtime.dispatch_action(DesktopAction::EndResize);
    }
}

fn window_dom_id(window_id: WindowId) -> String {
    format!("desktop-window-{}", window_id.0)
}

#[component]
/// Renders the desktop: wallpaper layer, open windows, and the dock.
pub fn DesktopShell() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let state = runtime.state;

    let on_pointer_move = move |ev: web_sys::PointerEvent| {
        let pointer = pointer_from_pointer_event(&ev);
        let interaction = runtime.interaction.get_untracked();

        if interaction.dragging.is_some() {
            runtime.dispatch_action(DesktopAction::UpdateMove { pointer });
        }
        if interaction.resizing.is_some() {
            runtime.dispatch_action(DesktopAction::UpdateResize { pointer });
        }
    };
    let on_pointer_end = move |_| end_active_pointer_interaction(runtime);

    view! {
        <div
            id="desktop-shell-root"
            class="desktop-shell"
            data-theme=move || state.get().appearance.theme.css_id()
            data-wallpaper=move || state.get().appearance.wallpaper.unwrap_or_default()
            data-booted=move || state.get().boot_complete.to_string()
            on:pointermove=on_pointer_move
            on:pointerup=on_pointer_end
            on:pointercancel=on_pointer_end
        >
            <div class="desktop-window-layer">
                <For
                    each=move || state.get().windows().to_vec()
                    key=|win| win.id.0
                    let:win
                >
                    <DesktopWindow window_id=win.id />
                </For>
            </div>
            <Dock />
        </div>
    }
}
