use super::*;
use crate::{apps, dock::dock_entries};

#[component]
pub(super) fn Dock() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let state = runtime.state;
    let pinned = store_value(apps::pinned_apps());
    let entries = create_memo(move |_| {
        pinned.with_value(|pinned| state.with(|desktop| dock_entries(pinned, desktop)))
    });

    view! {
        <nav
            class="dock"
            aria-label="Dock"
            style=format!("height:{DOCK_HEIGHT_PX}px;")
        >
            <For
                each=move || entries.get()
                key=|entry| (entry.descriptor.app_name.clone(), entry.open_count, entry.active)
                let:entry
            >
                {{
                    let tap_app = entry.descriptor.clone();
                    let context_app = entry.descriptor.clone();
                    let label = entry.descriptor.app_name.clone();
                    let class = format!(
                        "dock-item{}{}",
                        if entry.is_running() { " running" } else { "" },
                        if entry.active { " active" } else { "" },
                    );
                    view! {
                        <button
                            type="button"
                            class=class
                            title=label.clone()
                            aria-label=label.clone()
                            data-icon=entry.descriptor.icon.clone().unwrap_or_default()
                            on:click=move |_| {
                                runtime.dispatch_action(DesktopAction::DockTap {
                                    app: tap_app.clone(),
                                });
                            }
                            on:contextmenu=move |ev| {
                                ev.prevent_default();
                                runtime.dispatch_action(DesktopAction::DockOpenNew {
                                    app: context_app.clone(),
                                });
                            }
                        >
                            <span class="dock-item-label">{label}</span>
                            <span class="dock-running-dots" aria-hidden="true">
                                {(0..entry.open_count.min(3))
                                    .map(|_| view! { <span class="dock-running-dot"></span> })
                                    .collect_view()}
                            </span>
                        </button>
                    }
                }}
            </For>
        </nav>
    }
}
