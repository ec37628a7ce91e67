//! Desktop state model shared by the reducer, the window-management core, and the UI layer.

use desktop_app_contract::AppDescriptor;
use serde::{Deserialize, Serialize};

use crate::{
    app_memory::AppMemoryStore,
    controller::{DragSession, ResizeSession},
    registry::WindowRegistry,
    z_order::ZOrder,
};

/// Starting value of the global z counter.
pub const INITIAL_Z_INDEX: u32 = 10;
/// Pixel offset applied per already-open instance when opening another window of the same app.
pub const CASCADE_STEP: i32 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WindowId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

/// Browser canvas available to windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: i32,
    pub height: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointerPosition {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowRect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl WindowRect {
    pub fn from_parts(position: Point, size: Size) -> Self {
        Self {
            x: position.x,
            y: position.y,
            w: size.width,
            h: size.height,
        }
    }

    pub fn position(self) -> Point {
        Point {
            x: self.x,
            y: self.y,
        }
    }

    pub fn size(self) -> Size {
        Size {
            width: self.w,
            height: self.h,
        }
    }

    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..self
        }
    }

    /// Rectangle covering the whole viewport.
    pub fn fill(viewport: Viewport) -> Self {
        Self {
            x: 0,
            y: 0,
            w: viewport.width,
            h: viewport.height,
        }
    }
}

/// One open window. Identity is [`WindowId`]; two windows of the same app are otherwise equal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowRecord {
    pub id: WindowId,
    pub app: AppDescriptor,
    /// Floating geometry. Kept while minimized or maximized.
    pub rect: WindowRect,
    pub z_index: u32,
    pub minimized: bool,
    pub maximized: bool,
}

impl WindowRecord {
    pub fn app_name(&self) -> &str {
        &self.app.app_name
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ThemeMode {
    #[default]
    System,
    Light,
    Dark,
}

impl ThemeMode {
    pub fn css_id(self) -> &'static str {
        match self {
            Self::System => "system",
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

/// Wallpaper/theme preference persisted next to per-app memory.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DesktopAppearance {
    #[serde(default)]
    pub wallpaper: Option<String>,
    #[serde(default)]
    pub theme: ThemeMode,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DesktopState {
    pub registry: WindowRegistry,
    pub z_order: ZOrder,
    pub app_memory: AppMemoryStore,
    /// `None` until the host measures the viewport for the first time.
    pub viewport: Option<Viewport>,
    pub appearance: DesktopAppearance,
    pub boot_complete: bool,
}

impl DesktopState {
    pub fn windows(&self) -> &[WindowRecord] {
        self.registry.windows()
    }

    pub fn window(&self, window_id: WindowId) -> Option<&WindowRecord> {
        self.registry.get(window_id)
    }

    /// Window whose z-index equals the global counter, if any.
    pub fn topmost_window_id(&self) -> Option<WindowId> {
        self.windows()
            .iter()
            .find(|window| self.z_order.is_topmost(window))
            .map(|window| window.id)
    }
}

/// Pointer interaction in progress. At most one of drag/resize is active at a time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InteractionState {
    pub dragging: Option<DragSession>,
    pub resizing: Option<ResizeSession>,
}

impl InteractionState {
    pub fn is_active(&self) -> bool {
        self.dragging.is_some() || self.resizing.is_some()
    }

    pub fn active_window_id(&self) -> Option<WindowId> {
        self.dragging
            .as_ref()
            .map(|session| session.window_id)
            .or_else(|| self.resizing.as_ref().map(|session| session.window_id))
    }
}
