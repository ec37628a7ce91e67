//! Resize math for window edges and corners.
//!
//! Every resize handle reduces to one or two calls of the primitives below, one per axis. A delta
//! is either applied whole or rejected whole; nothing is clamped. An edge only moves while the
//! pointer is still beyond that edge's current position, so a fast drag cannot leave the pointer
//! stranded inside the window.

use serde::{Deserialize, Serialize};

use crate::model::{PointerPosition, WindowRect};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResizeEdge {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl ResizeEdge {
    pub const ALL: [Self; 8] = [
        Self::North,
        Self::South,
        Self::East,
        Self::West,
        Self::NorthEast,
        Self::NorthWest,
        Self::SouthEast,
        Self::SouthWest,
    ];

    fn moves_left(self) -> bool {
        matches!(self, Self::West | Self::NorthWest | Self::SouthWest)
    }

    fn moves_right(self) -> bool {
        matches!(self, Self::East | Self::NorthEast | Self::SouthEast)
    }

    fn moves_top(self) -> bool {
        matches!(self, Self::North | Self::NorthEast | Self::NorthWest)
    }

    fn moves_bottom(self) -> bool {
        matches!(self, Self::South | Self::SouthEast | Self::SouthWest)
    }

    pub fn css_class(self) -> &'static str {
        match self {
            Self::North => "edge-n",
            Self::South => "edge-s",
            Self::East => "edge-e",
            Self::West => "edge-w",
            Self::NorthEast => "edge-ne",
            Self::NorthWest => "edge-nw",
            Self::SouthEast => "edge-se",
            Self::SouthWest => "edge-sw",
        }
    }
}

/// Result of moving an edge that also moves the window origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnchoredResize {
    pub size: i32,
    pub anchor: i32,
}

fn pointer_follows(delta: i32, edge: i32, pointer: i32) -> bool {
    (delta < 0 && pointer <= edge) || (delta > 0 && pointer >= edge)
}

/// Moves the free edge (right or bottom) of a dimension whose origin stays put.
///
/// `fixed_edge` is the origin coordinate on this axis. The delta applies only when the resulting
/// size stays above `min_size` and the pointer is on the far side of the current edge
/// (`fixed_edge + size`) in the direction of travel. Otherwise `size` is returned unchanged.
pub fn grow_or_shrink_free_edge(
    size: i32,
    min_size: i32,
    delta: i32,
    fixed_edge: i32,
    pointer: i32,
) -> i32 {
    if size + delta > min_size && pointer_follows(delta, fixed_edge + size, pointer) {
        size + delta
    } else {
        size
    }
}

/// Moves the anchored edge (left or top): the size shrinks by `delta` while the origin moves by
/// `delta`.
///
/// The guard compares the pointer against the current anchor itself, not `anchor + size`.
pub fn grow_or_shrink_anchored_edge(
    size: i32,
    min_size: i32,
    delta: i32,
    anchor: i32,
    pointer: i32,
) -> AnchoredResize {
    if size - delta > min_size && pointer_follows(delta, anchor, pointer) {
        AnchoredResize {
            size: size - delta,
            anchor: anchor + delta,
        }
    } else {
        AnchoredResize { size, anchor }
    }
}

/// Applies one pointer-move step for `edge`.
///
/// `delta` is the pointer movement since the previous event and `pointer` its absolute position.
/// Axes are independent, so a corner may move on one axis and reject on the other.
pub fn apply_resize_edge(
    rect: WindowRect,
    edge: ResizeEdge,
    delta: PointerPosition,
    pointer: PointerPosition,
    min_width: i32,
    min_height: i32,
) -> WindowRect {
    let mut next = rect;

    if edge.moves_top() {
        let step = grow_or_shrink_anchored_edge(next.h, min_height, delta.y, next.y, pointer.y);
        next.h = step.size;
        next.y = step.anchor;
    } else if edge.moves_bottom() {
        next.h = grow_or_shrink_free_edge(next.h, min_height, delta.y, next.y, pointer.y);
    }

    if edge.moves_left() {
        let step = grow_or_shrink_anchored_edge(next.w, min_width, delta.x, next.x, pointer.x);
        next.w = step.size;
        next.x = step.anchor;
    } else if edge.moves_right() {
        next.w = grow_or_shrink_free_edge(next.w, min_width, delta.x, next.x, pointer.x);
    }

    next
}
