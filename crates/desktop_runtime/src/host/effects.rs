//! Runtime-effect dispatch for the desktop host boundary.

use crate::{
    host::{persistence_effects, DesktopHostContext},
    reducer::RuntimeEffect,
    runtime_context::DesktopRuntimeContext,
};

pub(super) fn run_runtime_effect(
    host: DesktopHostContext,
    runtime: DesktopRuntimeContext,
    effect: RuntimeEffect,
) {
    match effect {
        RuntimeEffect::PersistAppMemory => persistence_effects::persist_app_memory(host, runtime),
        RuntimeEffect::PersistAppearance => persistence_effects::persist_appearance(host, runtime),
    }
}
