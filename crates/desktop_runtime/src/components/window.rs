use desktop_app_contract::{
    window_controls, window_title_bar_dom_id, AppMountContext, WindowCommand,
};
use leptos::*;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;

use super::*;
use crate::{
    apps,
    controller::{display_rect, WindowPhase},
    geometry::ResizeEdge,
    viewport::subscribe_viewport_clamp,
};

#[cfg(target_arch = "wasm32")]
fn try_set_pointer_capture(ev: &web_sys::PointerEvent) {
    if let Some(target) = ev.current_target() {
        if let Ok(element) = target.dyn_into::<web_sys::Element>() {
            let _ = element.set_pointer_capture(ev.pointer_id());
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn try_set_pointer_capture(_: &web_sys::PointerEvent) {}

fn is_primary_press(ev: &web_sys::PointerEvent) -> bool {
    if ev.pointer_type() == "mouse" {
        ev.button() == 0
    } else {
        ev.is_primary()
    }
}

fn window_command_action(window_id: WindowId, command: WindowCommand) -> DesktopAction {
    match command {
        WindowCommand::Close => DesktopAction::CloseWindow { window_id },
        WindowCommand::ToggleMinimize => DesktopAction::ToggleMinimize { window_id },
        WindowCommand::ToggleMaximize => DesktopAction::ToggleMaximize { window_id },
        WindowCommand::Focus => DesktopAction::FocusWindow { window_id },
        WindowCommand::BeginDrag { x, y } => DesktopAction::BeginMove {
            window_id,
            pointer: PointerPosition { x, y },
        },
    }
}

#[component]
pub(super) fn DesktopWindow(window_id: WindowId) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let state = runtime.state;
    let window = create_memo(move |_| state.get().window(window_id).cloned());
    let viewport = create_memo(move |_| state.get().viewport);

    // Clamp on viewport changes for as long as this window is mounted.
    let tracker = runtime.viewport.get_value();
    let listener = subscribe_viewport_clamp(&tracker, window_id, move |action| {
        runtime.dispatch_action(action);
    });
    on_cleanup(move || {
        tracker.unsubscribe(listener);
    });

    let Some(initial) = window.get_untracked() else {
        return ().into_view();
    };
    let descriptor = initial.app;

    let commands = Callback::new(move |command: WindowCommand| {
        runtime.dispatch_action(window_command_action(window_id, command));
    });
    let (handle, drag) = window_controls(commands);
    let body = apps::app_module(&descriptor.app_name).mount(AppMountContext {
        descriptor: descriptor.clone(),
        window_id: window_id.0,
        window: handle,
        drag,
    });

    let phase = move || window.get().map(|win| win.phase());
    let style = move || {
        window
            .get()
            .map(|win| {
                let rect = display_rect(&win, viewport.get());
                format!(
                    "left:{}px;top:{}px;width:{}px;height:{}px;z-index:{};",
                    rect.x, rect.y, rect.w, rect.h, win.z_index
                )
            })
            .unwrap_or_default()
    };
    let class = move || {
        let focused = window
            .get()
            .is_some_and(|win| state.with(|desktop| desktop.z_order.is_topmost(&win)));
        let phase_class = match phase() {
            Some(WindowPhase::Minimized) => " minimized",
            Some(WindowPhase::Maximized) => " maximized",
            _ => "",
        };
        format!(
            "desktop-window{}{}",
            if focused { " focused" } else { "" },
            phase_class
        )
    };
    let focus = move |_: web_sys::PointerEvent| {
        runtime.dispatch_action(DesktopAction::FocusWindow { window_id });
    };

    view! {
        <section
            id=window_dom_id(window_id)
            class=class
            style=style
            role="dialog"
            aria-label=descriptor.app_name.clone()
            on:pointerdown=focus
        >
            {(!descriptor.custom_title_bar).then(|| {
                view! {
                    <WindowTitleBar
                        window_id=window_id
                        title=descriptor.app_name.clone()
                        icon=descriptor.icon.clone()
                        maximized=Signal::derive(move || phase() == Some(WindowPhase::Maximized))
                    />
                }
            })}
            <div class="window-body">{body}</div>
            <Show when=move || phase() == Some(WindowPhase::Floating) fallback=|| ()>
                {ResizeEdge::ALL
                    .into_iter()
                    .map(|edge| view! { <WindowResizeHandle window_id=window_id edge=edge /> })
                    .collect_view()}
            </Show>
        </section>
    }
    .into_view()
}

#[component]
fn WindowTitleBar(
    window_id: WindowId,
    title: String,
    icon: Option<String>,
    #[prop(into)] maximized: Signal<bool>,
) -> impl IntoView {
    let runtime = use_desktop_runtime();

    let begin_move = move |ev: web_sys::PointerEvent| {
        if !is_primary_press(&ev) {
            return;
        }
        try_set_pointer_capture(&ev);
        ev.prevent_default();
        runtime.dispatch_action(DesktopAction::BeginMove {
            window_id,
            pointer: pointer_from_pointer_event(&ev),
        });
    };
    let titlebar_double_click = move |ev: web_sys::MouseEvent| {
        ev.prevent_default();
        ev.stop_propagation();
        runtime.dispatch_action(DesktopAction::ToggleMaximize { window_id });
    };
    let swallow_pointer = move |ev: web_sys::PointerEvent| ev.stop_propagation();

    view! {
        <header
            id=window_title_bar_dom_id(window_id.0)
            class="titlebar"
            on:pointerdown=begin_move
            on:dblclick=titlebar_double_click
        >
            <div class="titlebar-title">
                {icon.map(|icon| view! {
                    <span class="titlebar-app-icon" data-icon=icon aria-hidden="true"></span>
                })}
                <span>{title}</span>
            </div>
            <div class="titlebar-controls">
                <button
                    type="button"
                    aria-label="Minimize window"
                    on:pointerdown=swallow_pointer
                    on:click=move |_| {
                        runtime.dispatch_action(DesktopAction::ToggleMinimize { window_id });
                    }
                >
                    "_"
                </button>
                <button
                    type="button"
                    aria-label=move || if maximized.get() { "Restore window" } else { "Maximize window" }
                    on:pointerdown=swallow_pointer
                    on:click=move |_| {
                        runtime.dispatch_action(DesktopAction::ToggleMaximize { window_id });
                    }
                >
                    {move || if maximized.get() { "[]" } else { "[ ]" }}
                </button>
                <button
                    type="button"
                    aria-label="Close window"
                    on:pointerdown=swallow_pointer
                    on:click=move |_| {
                        runtime.dispatch_action(DesktopAction::CloseWindow { window_id });
                    }
                >
                    "x"
                </button>
            </div>
        </header>
    }
}

#[component]
fn WindowResizeHandle(window_id: WindowId, edge: ResizeEdge) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let class_name = format!("window-resize-handle {}", edge.css_class());

    let on_pointerdown = move |ev: web_sys::PointerEvent| {
        if !is_primary_press(&ev) {
            return;
        }
        try_set_pointer_capture(&ev);
        ev.prevent_default();
        ev.stop_propagation();
        runtime.dispatch_action(DesktopAction::FocusWindow { window_id });
        runtime.dispatch_action(DesktopAction::BeginResize {
            window_id,
            edge,
            pointer: pointer_from_pointer_event(&ev),
        });
    };

    view! {
        <div
            class=class_name
            aria-hidden="true"
            on:pointerdown=on_pointerdown
        />
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn app_commands_map_to_window_actions() {
        let id = WindowId(3);
        assert_eq!(
            window_command_action(id, WindowCommand::Close),
            DesktopAction::CloseWindow { window_id: id }
        );
        assert_eq!(
            window_command_action(id, WindowCommand::Focus),
            DesktopAction::FocusWindow { window_id: id }
        );
        assert_eq!(
            window_command_action(id, WindowCommand::BeginDrag { x: 4, y: 9 }),
            DesktopAction::BeginMove {
                window_id: id,
                pointer: PointerPosition { x: 4, y: 9 },
            }
        );
    }
}
