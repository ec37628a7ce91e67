//! Window management core and Leptos runtime for the browser desktop.
//!
//! The pure core ([`geometry`], [`app_memory`], [`registry`], [`z_order`], [`viewport`],
//! [`controller`], [`dock`]) is driven exclusively through [`reduce_desktop`]. The UI layer
//! ([`components`]) dispatches [`DesktopAction`] values and the host layer executes the
//! [`RuntimeEffect`] values the reducer returns.

pub mod app_memory;
pub mod apps;
pub mod components;
pub mod controller;
pub mod dock;
mod effect_executor;
pub mod geometry;
pub mod host;
pub mod model;
pub mod persistence;
pub mod reducer;
pub mod registry;
mod runtime_context;
pub mod viewport;
pub mod z_order;

pub use app_memory::{AppMemory, AppMemoryStore, DEFAULT_MEMORY_HEIGHT, DEFAULT_MEMORY_WIDTH};
pub use components::{
    use_desktop_runtime, DesktopProvider, DesktopRuntimeContext, DesktopShell, DOCK_HEIGHT_PX,
};
pub use controller::WindowPhase;
pub use dock::{DockEntry, DockTapOutcome};
pub use geometry::ResizeEdge;
pub use host::DesktopHostContext;
pub use model::*;
pub use persistence::{load_boot_snapshot, persist_app_memory, persist_appearance, BootSnapshot};
pub use reducer::{reduce_desktop, DesktopAction, ReducerError, RuntimeEffect};
pub use viewport::{subscribe_viewport_clamp, ListenerId, ViewportTracker};
