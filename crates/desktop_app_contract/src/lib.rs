//! Shared contract types between the desktop window manager runtime and managed apps.
//!
//! An application kind is described by a static [`AppDescriptor`]. When the runtime mounts a
//! window for it, the app receives an [`AppMountContext`] carrying a [`WindowHandle`] (close,
//! minimize, maximize requests) and a [`DragHandle`] (lets apps with a custom title bar start a
//! window drag from their own chrome).

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

use leptos::{Callable, Callback, View};
use serde::{Deserialize, Serialize};

/// Stable identifier for a runtime-managed window.
pub type WindowRuntimeId = u64;

/// Minimum window width used when a descriptor does not declare one.
pub const DEFAULT_MIN_WINDOW_WIDTH: i32 = 196;
/// Minimum window height used when a descriptor does not declare one.
pub const DEFAULT_MIN_WINDOW_HEIGHT: i32 = 64;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// Static identity and metadata of an application kind.
///
/// Descriptors are defined at build time (see the runtime app catalog) and never created by user
/// interaction. `app_name` is the unique key used for per-application memory.
pub struct AppDescriptor {
    /// Unique application name.
    pub app_name: String,
    /// Optional icon token rendered by the dock and title bar.
    #[serde(default)]
    pub icon: Option<String>,
    /// Whether the app draws its own title bar (and drives drags via [`DragHandle`]).
    #[serde(default)]
    pub custom_title_bar: bool,
    /// Optional minimum window width in CSS pixels.
    #[serde(default)]
    pub min_width: Option<i32>,
    /// Optional minimum window height in CSS pixels.
    #[serde(default)]
    pub min_height: Option<i32>,
}

impl AppDescriptor {
    /// Creates a descriptor with no icon, the default title bar, and default minimum size.
    pub fn new(app_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
            icon: None,
            custom_title_bar: false,
            min_width: None,
            min_height: None,
        }
    }

    /// Sets the icon token.
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Sets the minimum window size.
    pub fn with_min_size(mut self, min_width: i32, min_height: i32) -> Self {
        self.min_width = Some(min_width);
        self.min_height = Some(min_height);
        self
    }

    /// Effective minimum width, falling back to [`DEFAULT_MIN_WINDOW_WIDTH`].
    pub fn effective_min_width(&self) -> i32 {
        self.min_width
            .filter(|value| *value > 0)
            .unwrap_or(DEFAULT_MIN_WINDOW_WIDTH)
    }

    /// Effective minimum height, falling back to [`DEFAULT_MIN_WINDOW_HEIGHT`].
    pub fn effective_min_height(&self) -> i32 {
        self.min_height
            .filter(|value| *value > 0)
            .unwrap_or(DEFAULT_MIN_WINDOW_HEIGHT)
    }

    /// Validates descriptor metadata.
    ///
    /// # Errors
    ///
    /// Returns a message when the name is blank or a declared minimum is not positive.
    pub fn validate(&self) -> Result<(), String> {
        if !is_valid_app_name(&self.app_name) {
            return Err(format!(
                "invalid app name `{}`; expected 1-64 visible characters",
                self.app_name
            ));
        }
        for (label, value) in [("min_width", self.min_width), ("min_height", self.min_height)] {
            if let Some(value) = value {
                if value <= 0 {
                    return Err(format!(
                        "app `{}` declares non-positive {label} {value}",
                        self.app_name
                    ));
                }
            }
        }
        Ok(())
    }
}

fn is_valid_app_name(raw: &str) -> bool {
    let trimmed = raw.trim();
    !trimmed.is_empty()
        && trimmed.len() == raw.len()
        && raw.chars().count() <= 64
        && !raw.chars().any(char::is_control)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// Window-control requests an app may send to the window manager.
pub enum WindowCommand {
    /// Close this window instance.
    Close,
    /// Flip the minimized flag.
    ToggleMinimize,
    /// Flip the maximized flag.
    ToggleMaximize,
    /// Bring this window to the front.
    Focus,
    /// Start dragging the window from a pointer position in client coordinates.
    BeginDrag {
        /// Pointer x coordinate.
        x: i32,
        /// Pointer y coordinate.
        y: i32,
    },
}

#[derive(Clone, Copy)]
/// Window lifecycle controls handed to a mounted app.
pub struct WindowHandle {
    sender: Callback<WindowCommand>,
}

impl WindowHandle {
    /// Requests that this window close.
    pub fn close(&self) {
        self.sender.call(WindowCommand::Close);
    }

    /// Requests a minimize toggle.
    pub fn toggle_minimize(&self) {
        self.sender.call(WindowCommand::ToggleMinimize);
    }

    /// Requests a maximize toggle.
    pub fn toggle_maximize(&self) {
        self.sender.call(WindowCommand::ToggleMaximize);
    }

    /// Requests that this window be raised to the top of the stack.
    pub fn focus(&self) {
        self.sender.call(WindowCommand::Focus);
    }
}

#[derive(Clone, Copy)]
/// Drag participation handle for apps that render their own title bar.
pub struct DragHandle {
    sender: Callback<WindowCommand>,
}

impl DragHandle {
    /// Starts a window drag at the given client-space pointer position.
    pub fn start(&self, x: i32, y: i32) {
        self.sender.call(WindowCommand::BeginDrag { x, y });
    }
}

/// Builds the window and drag handles for one window from a single command sender.
pub fn window_controls(sender: Callback<WindowCommand>) -> (WindowHandle, DragHandle) {
    (WindowHandle { sender }, DragHandle { sender })
}

#[derive(Clone)]
/// Runtime context passed to app mount functions.
pub struct AppMountContext {
    /// Descriptor of the application being mounted.
    pub descriptor: AppDescriptor,
    /// Stable runtime window id.
    pub window_id: WindowRuntimeId,
    /// Close/minimize/maximize controls.
    pub window: WindowHandle,
    /// Drag participation handle.
    pub drag: DragHandle,
}

/// Static app mount function used by the runtime registry.
pub type AppMountFn = fn(AppMountContext) -> View;

#[derive(Debug, Clone, Copy)]
/// Mounted app module descriptor used by the runtime app registry.
pub struct AppModule {
    mount_fn: AppMountFn,
}

impl AppModule {
    /// Creates a module from a mount function.
    pub const fn new(mount_fn: AppMountFn) -> Self {
        Self { mount_fn }
    }

    /// Mounts the app view with a runtime-provided context.
    pub fn mount(self, context: AppMountContext) -> View {
        (self.mount_fn)(context)
    }
}

/// Returns the DOM id for an app's primary title/drag region inside a window.
pub fn window_title_bar_dom_id(window_id: WindowRuntimeId) -> String {
    format!("window-{window_id}-titlebar")
}
