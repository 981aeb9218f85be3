//! Input model: pointer position, drag tracking, and device kinds.
//!
//! Input callbacks write [`PointerState`] between frames; the frame callback
//! reads it once at the start of each update. Everything here is plain data
//! so engine cores can be driven from tests with synthetic pointer paths.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use web_sys::{MouseEvent, TouchEvent};

use crate::consts::{MOUSE_DRAG_SENSITIVITY, TOUCH_DRAG_SENSITIVITY};

/// A point in surface-local or client coordinates (CSS pixels).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Translate a client-space point into the space of a surface whose
    /// top-left corner sits at `origin`.
    #[must_use]
    pub fn relative_to(self, origin: Point) -> Self {
        Self { x: self.x - origin.x, y: self.y - origin.y }
    }

    #[must_use]
    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Which kind of device produced a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Mouse,
    Touch,
}

impl PointerKind {
    /// Drag sensitivity in radians per CSS pixel.
    #[must_use]
    pub fn drag_sensitivity(self) -> f32 {
        match self {
            Self::Mouse => MOUSE_DRAG_SENSITIVITY,
            Self::Touch => TOUCH_DRAG_SENSITIVITY,
        }
    }
}

/// Wheel / trackpad scroll delta.
#[derive(Debug, Clone, Copy, Default)]
pub struct WheelDelta {
    /// Horizontal scroll amount in pixels.
    pub dx: f64,
    /// Vertical scroll amount in pixels (positive = down).
    pub dy: f64,
}

/// Gesture tracked between pointer-down and pointer-up.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    /// No gesture in progress.
    #[default]
    Idle,
    /// A drag is active.
    Dragging {
        kind: PointerKind,
        /// Position at pointer-down.
        start: Point,
        /// Position at the previous move event, used for incremental deltas.
        last: Point,
    },
}

/// Most recent pointer position plus the active drag, if any.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerState {
    pub position: Point,
    pub drag: DragState,
}

impl PointerState {
    /// A pointer parked at `position` with no drag.
    #[must_use]
    pub fn parked(position: Point) -> Self {
        Self { position, drag: DragState::Idle }
    }

    /// Begin a drag at `at`.
    pub fn press(&mut self, at: Point, kind: PointerKind) {
        self.position = at;
        self.drag = DragState::Dragging { kind, start: at, last: at };
    }

    /// Record a move. Returns the delta since the previous move while dragging.
    pub fn move_to(&mut self, at: Point) -> Option<(PointerKind, f64, f64)> {
        self.position = at;
        match &mut self.drag {
            DragState::Idle => None,
            DragState::Dragging { kind, last, .. } => {
                let delta = (at.x - last.x, at.y - last.y);
                *last = at;
                Some((*kind, delta.0, delta.1))
            }
        }
    }

    /// End any active drag.
    pub fn release(&mut self) {
        self.drag = DragState::Idle;
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, DragState::Dragging { .. })
    }

    /// Where the active drag began.
    #[must_use]
    pub fn drag_start(&self) -> Option<Point> {
        match self.drag {
            DragState::Idle => None,
            DragState::Dragging { start, .. } => Some(start),
        }
    }
}

/// Client-space position of a mouse event.
#[must_use]
pub fn mouse_point(event: &MouseEvent) -> Point {
    Point::new(f64::from(event.client_x()), f64::from(event.client_y()))
}

/// Client-space position of the first active touch, if any.
#[must_use]
pub fn touch_point(event: &TouchEvent) -> Option<Point> {
    event
        .touches()
        .get(0)
        .map(|t| Point::new(f64::from(t.client_x()), f64::from(t.client_y())))
}

/// Distance between the first two active touches, for pinch gestures.
#[must_use]
pub fn touch_spread(event: &TouchEvent) -> Option<f64> {
    let touches = event.touches();
    let a = touches.get(0)?;
    let b = touches.get(1)?;
    let at = |t: web_sys::Touch| Point::new(f64::from(t.client_x()), f64::from(t.client_y()));
    Some(at(a).distance(at(b)))
}
