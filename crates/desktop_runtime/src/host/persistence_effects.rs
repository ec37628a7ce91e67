use leptos::{logging, spawn_local, SignalGetUntracked};

use crate::{host::DesktopHostContext, persistence, runtime_context::DesktopRuntimeContext};

pub(super) fn persist_app_memory(host: DesktopHostContext, runtime: DesktopRuntimeContext) {
    let state = runtime.state.get_untracked();
    let prefs = host.prefs_store();
    spawn_local(async move {
        if let Err(err) = persistence::persist_app_memory(prefs.as_ref(), &state).await {
            logging::warn!("persist app memory failed: {err}");
        }
    });
}

pub(super) fn persist_appearance(host: DesktopHostContext, runtime: DesktopRuntimeContext) {
    let appearance = runtime.state.get_untracked().appearance;
    let prefs = host.prefs_store();
    spawn_local(async move {
        if let Err(err) = persistence::persist_appearance(prefs.as_ref(), &appearance).await {
            logging::warn!("persist appearance failed: {err}");
        }
    });
}
