//! Host-side runtime helpers for executing reducer effects and querying browser environment state.
//!
//! Reducer semantics stay pure; everything that touches storage, timers, or browser globals is
//! routed through [`DesktopHostContext`] so tests can swap the preference store.

mod boot;
mod effects;
mod host_ui;
mod persistence_effects;

use std::rc::Rc;

use desktop_app_contract::AppDescriptor;
use leptos::Callback;
use platform_host::PrefsStore;
use platform_host_web::{host_strategy_name, prefs_store};

use crate::{
    reducer::{DesktopAction, RuntimeEffect},
    runtime_context::DesktopRuntimeContext,
};

#[derive(Clone)]
/// Host service bundle for desktop runtime side effects.
pub struct DesktopHostContext {
    prefs: Rc<dyn PrefsStore>,
    host_strategy_name: &'static str,
}

impl Default for DesktopHostContext {
    fn default() -> Self {
        Self::with_prefs(Rc::new(prefs_store()))
    }
}

impl DesktopHostContext {
    /// Builds a host context around an explicit preference store.
    pub fn with_prefs(prefs: Rc<dyn PrefsStore>) -> Self {
        Self {
            prefs,
            host_strategy_name: host_strategy_name(),
        }
    }

    /// Returns the configured preference service.
    pub fn prefs_store(&self) -> Rc<dyn PrefsStore> {
        self.prefs.clone()
    }

    /// Returns the stable name of the selected host strategy.
    pub fn host_strategy_name(&self) -> &'static str {
        self.host_strategy_name
    }

    /// Loads persisted memory and appearance, then opens `boot_apps`.
    pub fn install_boot_hydration(
        &self,
        dispatch: Callback<DesktopAction>,
        boot_apps: Vec<AppDescriptor>,
    ) {
        boot::install_boot_hydration(self.clone(), dispatch, boot_apps);
    }

    /// Publishes the first viewport measurement and keeps tracking browser resizes.
    pub fn install_viewport_tracking(&self, runtime: DesktopRuntimeContext) {
        host_ui::install_viewport_tracking(runtime);
    }

    /// Executes a single [`RuntimeEffect`] emitted by the reducer.
    pub fn run_runtime_effect(&self, runtime: DesktopRuntimeContext, effect: RuntimeEffect) {
        effects::run_runtime_effect(self.clone(), runtime, effect);
    }
}
