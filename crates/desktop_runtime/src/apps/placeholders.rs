//! Built-in placeholder app views. Real applications plug in through [`AppModule`] the same way.
//!
//! [`AppModule`]: desktop_app_contract::AppModule

use desktop_app_contract::{window_title_bar_dom_id, AppMountContext};
use leptos::*;

use crate::{
    apps::app_descriptor_by_name, model::ThemeMode, reducer::DesktopAction,
    runtime_context::use_desktop_runtime,
};

/// Mounts a generic placeholder showing the app identity.
pub(super) fn mount_generic_app(context: AppMountContext) -> View {
    let name = context.descriptor.app_name.clone();
    view! {
        <div class="app-shell app-placeholder">
            <p><strong>{name}</strong></p>
            <p>{format!("Window #{}", context.window_id)}</p>
        </div>
    }
    .into_view()
}

/// Mounts the scratch notepad. Text lives only as long as the window.
pub(super) fn mount_notepad_app(_: AppMountContext) -> View {
    let text = create_rw_signal(String::new());
    view! {
        <div class="app-shell app-notepad">
            <textarea
                class="app-notepad-text"
                spellcheck="false"
                prop:value=move || text.get()
                on:input=move |ev| text.set(event_target_value(&ev))
            ></textarea>
            <div class="app-statusbar">
                <span>{move || format!("{} chars", text.get().chars().count())}</span>
            </div>
        </div>
    }
    .into_view()
}

/// Mounts the appearance settings panel.
pub(super) fn mount_settings_app(_: AppMountContext) -> View {
    view! { <SettingsApp /> }.into_view()
}

/// Mounts the camera placeholder, which draws its own title bar.
pub(super) fn mount_camera_app(context: AppMountContext) -> View {
    view! { <CameraApp context=context /> }.into_view()
}

fn theme_from_id(raw: &str) -> ThemeMode {
    match raw {
        "light" => ThemeMode::Light,
        "dark" => ThemeMode::Dark,
        _ => ThemeMode::System,
    }
}

#[component]
fn SettingsApp() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let appearance = create_memo(move |_| runtime.state.get().appearance);

    view! {
        <div class="app-shell app-settings">
            <label>
                "Theme "
                <select
                    prop:value=move || appearance.get().theme.css_id()
                    on:change=move |ev| {
                        let theme = theme_from_id(&event_target_value(&ev));
                        runtime.dispatch_action(DesktopAction::SetThemeMode { theme });
                    }
                >
                    <option value="system">"System"</option>
                    <option value="light">"Light"</option>
                    <option value="dark">"Dark"</option>
                </select>
            </label>
            <label>
                "Wallpaper "
                <input
                    type="text"
                    placeholder="none"
                    prop:value=move || appearance.get().wallpaper.unwrap_or_default()
                    on:change=move |ev| {
                        let raw = event_target_value(&ev);
                        let wallpaper = (!raw.trim().is_empty()).then(|| raw.trim().to_string());
                        runtime.dispatch_action(DesktopAction::SetWallpaper { wallpaper });
                    }
                />
            </label>
            <button
                type="button"
                on:click=move |_| {
                    if let Some(about) = app_descriptor_by_name("About") {
                        runtime.dispatch_action(DesktopAction::OpenWindow(about));
                    }
                }
            >
                "About this desktop"
            </button>
        </div>
    }
}

#[component]
fn CameraApp(context: AppMountContext) -> impl IntoView {
    let AppMountContext {
        descriptor,
        window_id,
        window,
        drag,
    } = context;

    view! {
        <div class="app-shell app-camera" on:focusin=move |_| window.focus()>
            <div
                id=window_title_bar_dom_id(window_id)
                class="app-camera-titlebar"
                on:pointerdown=move |ev: web_sys::PointerEvent| {
                    if ev.button() != 0 {
                        return;
                    }
                    ev.prevent_default();
                    drag.start(ev.client_x(), ev.client_y());
                }
                on:dblclick=move |_| window.toggle_maximize()
            >
                <span>{descriptor.app_name}</span>
                <div class="app-camera-controls">
                    <button
                        type="button"
                        aria-label="Minimize"
                        on:pointerdown=move |ev: web_sys::PointerEvent| ev.stop_propagation()
                        on:click=move |_| window.toggle_minimize()
                    >
                        "_"
                    </button>
                    <button
                        type="button"
                        aria-label="Close"
                        on:pointerdown=move |ev: web_sys::PointerEvent| ev.stop_propagation()
                        on:click=move |_| window.close()
                    >
                        "x"
                    </button>
                </div>
            </div>
            <div class="app-camera-viewfinder" aria-label="Camera preview placeholder"></div>
        </div>
    }
}
