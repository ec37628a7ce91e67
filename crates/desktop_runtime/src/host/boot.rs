use desktop_app_contract::AppDescriptor;
use leptos::{create_effect, logging, spawn_local, Callable, Callback};

use crate::{host::DesktopHostContext, persistence, reducer::DesktopAction};

pub(super) fn install_boot_hydration(
    host: DesktopHostContext,
    dispatch: Callback<DesktopAction>,
    boot_apps: Vec<AppDescriptor>,
) {
    create_effect(move |_| {
        let host = host.clone();
        let boot_apps = boot_apps.clone();
        spawn_local(async move {
            let prefs = host.prefs_store();
            let snapshot = persistence::load_boot_snapshot(prefs.as_ref()).await;
            if snapshot.is_empty() {
                logging::log!(
                    "desktop boot: no persisted preferences ({})",
                    host.host_strategy_name()
                );
            }

            if let Some(entries) = snapshot.app_memory {
                dispatch.call(DesktopAction::HydrateAppMemory { entries });
            }
            if let Some(appearance) = snapshot.appearance {
                dispatch.call(DesktopAction::HydrateAppearance { appearance });
            }

            dispatch.call(DesktopAction::BootHydrationComplete { boot_apps });
        });
    });
}
