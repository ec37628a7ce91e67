use leptos::{ev, on_cleanup, window_event_listener};

use crate::{model::Viewport, reducer::DesktopAction, runtime_context::DesktopRuntimeContext};

pub(super) fn measure_viewport() -> Option<Viewport> {
    #[cfg(target_arch = "wasm32")]
    {
        let window = web_sys::window()?;
        let width = window.inner_width().ok()?.as_f64()? as i32;
        let height = window.inner_height().ok()?.as_f64()? as i32;
        Some(Viewport { width, height })
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        None
    }
}

/// Records a viewport in state first, then notifies window listeners so their clamp requests see
/// the new size.
fn publish_viewport(runtime: DesktopRuntimeContext, viewport: Viewport) {
    runtime.dispatch_action(DesktopAction::ViewportChanged { viewport });
    // Listeners dispatch; notify from a clone so no stored-value borrow is held meanwhile.
    runtime.viewport.get_value().publish(viewport);
}

pub(super) fn install_viewport_tracking(runtime: DesktopRuntimeContext) {
    if let Some(viewport) = measure_viewport() {
        publish_viewport(runtime, viewport);
    }

    let resize_listener = window_event_listener(ev::resize, move |_| {
        if let Some(viewport) = measure_viewport() {
            publish_viewport(runtime, viewport);
        }
    });
    on_cleanup(move || resize_listener.remove());
}
