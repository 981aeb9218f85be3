//! Browser-free globe state: rotation, zoom, drag, and the load lifecycle.

#[cfg(test)]
#[path = "state_test.rs"]
mod state_test;

use super::GlobeConfig;
use super::geo::{FeatureCollection, Position};
use super::halftone::land_dots;
use super::projection::{Orthographic, geo_distance};
use crate::consts::{
    GLOBE_AUTO_ROTATE, GLOBE_DRAG_SENSITIVITY, GLOBE_INITIAL_ROTATION, GLOBE_MAX_ZOOM, GLOBE_MIN_ZOOM,
    GLOBE_RADIUS_DIVISOR, GLOBE_ZOOM_IN, GLOBE_ZOOM_OUT,
};
use crate::input::{Point, PointerKind, PointerState, WheelDelta};
use crate::lifecycle::{Lifecycle, Phase};

/// What the container should show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GlobeStatus {
    Loading,
    Ready,
    Failed(String),
}

pub struct GlobeCore {
    lifecycle: Lifecycle,
    rotation: [f64; 3],
    /// Rotation when the active drag began.
    drag_origin: [f64; 3],
    pointer: PointerState,
    auto_rotate: bool,
    /// Finger spread and scale when the active pinch began.
    pinch: Option<(f64, f64)>,
    base_radius: f64,
    scale: f64,
    width: f64,
    height: f64,
    dot_spacing: f64,
    marker: Position,
    fetch_requested: bool,
    land: Option<FeatureCollection>,
    dots: Vec<Position>,
    error: Option<String>,
}

impl GlobeCore {
    /// A globe on a `width × height` CSS-pixel surface, waiting for land data.
    #[must_use]
    pub fn new(config: &GlobeConfig, width: f64, height: f64) -> Self {
        let base_radius = width.min(height) / GLOBE_RADIUS_DIVISOR;
        let mut lifecycle = Lifecycle::new();
        lifecycle.mount(true);
        Self {
            lifecycle,
            rotation: GLOBE_INITIAL_ROTATION,
            drag_origin: GLOBE_INITIAL_ROTATION,
            pointer: PointerState::default(),
            auto_rotate: true,
            pinch: None,
            base_radius,
            scale: base_radius,
            width,
            height,
            dot_spacing: config.dot_spacing,
            marker: config.marker.position,
            fetch_requested: false,
            land: None,
            dots: Vec::new(),
            error: None,
        }
    }

    #[must_use]
    pub fn status(&self) -> GlobeStatus {
        match (self.lifecycle.phase(), &self.error) {
            (Phase::Failed, Some(message)) => GlobeStatus::Failed(message.clone()),
            (Phase::Failed, None) => GlobeStatus::Failed(String::new()),
            (Phase::ReadyIdle | Phase::Interacting, _) => GlobeStatus::Ready,
            _ => GlobeStatus::Loading,
        }
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.lifecycle.phase()
    }

    /// Claim the single land-data request. Returns `true` only the first time.
    pub fn begin_fetch(&mut self) -> bool {
        if self.fetch_requested || self.lifecycle.phase() != Phase::LoadingResources {
            return false;
        }
        self.fetch_requested = true;
        true
    }

    /// Accept land data and precompute the dot field. Returns `true` on the loading → ready transition.
    pub fn load(&mut self, land: FeatureCollection) -> bool {
        if !self.lifecycle.ready() {
            return false;
        }
        self.dots = land_dots(&land, self.dot_spacing);
        log::debug!("globe: {} land features, {} dots", land.features.len(), self.dots.len());
        self.land = Some(land);
        true
    }

    /// Enter the terminal failure state. Returns `true` exactly once.
    pub fn fail(&mut self, message: impl Into<String>) -> bool {
        if !self.lifecycle.fail() {
            return false;
        }
        self.error = Some(message.into());
        self.pointer.release();
        true
    }

    /// Per-frame auto rotation. Returns `true` if the globe should be redrawn.
    pub fn tick(&mut self) -> bool {
        if self.lifecycle.phase() == Phase::Failed {
            return false;
        }
        if self.auto_rotate && !self.pointer.is_dragging() {
            self.rotation[0] += GLOBE_AUTO_ROTATE;
        }
        true
    }

    /// Pointer-down on the globe: suspend auto rotation and anchor the drag.
    pub fn press(&mut self, at: Point, kind: PointerKind) {
        if self.lifecycle.phase() == Phase::Failed {
            return;
        }
        self.auto_rotate = false;
        self.drag_origin = self.rotation;
        self.pointer.press(at, kind);
        self.lifecycle.begin_interaction();
    }

    /// Rotate relative to the drag start. No-op without an active drag.
    pub fn drag_to(&mut self, at: Point) {
        let Some(start) = self.pointer.drag_start() else {
            return;
        };
        self.pointer.move_to(at);
        let dx = at.x - start.x;
        let dy = at.y - start.y;
        self.rotation[0] = self.drag_origin[0] + dx * GLOBE_DRAG_SENSITIVITY;
        self.rotation[1] = (self.drag_origin[1] - dy * GLOBE_DRAG_SENSITIVITY).clamp(-90.0, 90.0);
    }

    /// Second finger down: switch from dragging to pinch zoom.
    pub fn begin_pinch(&mut self, spread: f64) {
        if self.lifecycle.phase() == Phase::Failed || spread <= 0.0 {
            return;
        }
        self.auto_rotate = false;
        self.pointer.release();
        self.pinch = Some((spread, self.scale));
        self.lifecycle.begin_interaction();
    }

    /// Scale by the change in finger spread since the pinch began.
    pub fn pinch_to(&mut self, spread: f64) {
        let Some((start_spread, start_scale)) = self.pinch else {
            return;
        };
        self.scale = self.clamp_scale(start_scale * spread / start_spread);
    }

    #[must_use]
    pub fn is_pinching(&self) -> bool {
        self.pinch.is_some()
    }

    /// End the drag or pinch. Returns `true` if one was active; auto rotation
    /// resumes on [`GlobeCore::resume`] after the grace delay.
    pub fn release(&mut self) -> bool {
        let pinched = self.pinch.take().is_some();
        if !self.pointer.is_dragging() && !pinched {
            return false;
        }
        self.pointer.release();
        self.lifecycle.end_interaction();
        true
    }

    /// Re-enable auto rotation unless a new gesture started in the meantime.
    pub fn resume(&mut self) {
        if !self.pointer.is_dragging() && self.pinch.is_none() {
            self.auto_rotate = true;
        }
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.pointer.is_dragging()
    }

    #[must_use]
    pub fn is_auto_rotating(&self) -> bool {
        self.auto_rotate
    }

    /// Wheel zoom: scroll down zooms out, up zooms in, clamped around the base radius.
    pub fn wheel(&mut self, delta: WheelDelta) {
        let factor = if delta.dy > 0.0 { GLOBE_ZOOM_OUT } else { GLOBE_ZOOM_IN };
        self.scale = self.clamp_scale(self.scale * factor);
    }

    /// Fit a new surface size. The radius follows the smaller side and the
    /// current zoom factor is kept.
    pub fn resize(&mut self, width: f64, height: f64) {
        let zoom = self.zoom_factor();
        self.width = width;
        self.height = height;
        self.base_radius = width.min(height) / GLOBE_RADIUS_DIVISOR;
        self.scale = self.clamp_scale(self.base_radius * zoom);
    }

    fn clamp_scale(&self, scale: f64) -> f64 {
        scale.clamp(self.base_radius * GLOBE_MIN_ZOOM, self.base_radius * GLOBE_MAX_ZOOM)
    }

    #[must_use]
    pub fn rotation(&self) -> [f64; 3] {
        self.rotation
    }

    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    #[must_use]
    pub fn base_radius(&self) -> f64 {
        self.base_radius
    }

    /// Current scale relative to the base radius; line widths scale with it.
    #[must_use]
    pub fn zoom_factor(&self) -> f64 {
        if self.base_radius > 0.0 { self.scale / self.base_radius } else { 1.0 }
    }

    #[must_use]
    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    #[must_use]
    pub fn projection(&self) -> Orthographic {
        Orthographic::new(self.rotation, self.scale, (self.width / 2.0, self.height / 2.0))
    }

    #[must_use]
    pub fn land(&self) -> Option<&FeatureCollection> {
        self.land.as_ref()
    }

    #[must_use]
    pub fn dots(&self) -> &[Position] {
        &self.dots
    }

    #[must_use]
    pub fn marker(&self) -> Position {
        self.marker
    }

    /// Whether the marker is on the facing hemisphere.
    #[must_use]
    pub fn marker_visible(&self) -> bool {
        geo_distance(self.marker, self.projection().view_center()) < std::f64::consts::FRAC_PI_2
    }

    pub fn unmount(&mut self) {
        self.lifecycle.unmount();
    }
}
