//! Particle field: a drag-orbitable point cloud sampled from a torus knot.
//!
//! The surface renders a fixed number of warm-up frames while hidden and is
//! revealed once the pipeline is primed; readiness is signalled exactly once.

#[cfg(test)]
#[path = "field_test.rs"]
mod field_test;

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec3;
use wasm_bindgen::JsCast;
use web_sys::{HtmlCanvasElement, HtmlElement, MouseEvent, TouchEvent, WebGl2RenderingContext as GL};

use crate::camera::{Camera, model_matrix};
use crate::consts::{
    FIELD_COUNT_DESKTOP, FIELD_COUNT_MOBILE, FIELD_IDLE_SPIN, FIELD_KNOT_RADIAL_SEGMENTS, FIELD_KNOT_RADIUS,
    FIELD_KNOT_TUBE, FIELD_KNOT_TUBULAR_SEGMENTS, FIELD_MAX_DPR, FIELD_OPACITY, FIELD_POINT_SIZE_DESKTOP,
    FIELD_POINT_SIZE_MOBILE, FIELD_TINT, ORBIT_DAMPING, WARMUP_FRAMES,
};
use crate::frame_loop::FrameLoop;
use crate::input::{Point, PointerKind, PointerState, mouse_point, touch_point};
use crate::knot::TorusKnot;
use crate::lifecycle::{Lifecycle, MountError, Teardown};
use crate::listeners::ListenerSet;
use crate::orbit::OrbitState;
use crate::particles::ParticleSet;
use crate::points::{PointCloud, PointStyle};
use crate::surface::RenderSurface;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldConfig {
    pub particle_count: usize,
    pub point_size: f32,
    pub knot: TorusKnot,
    pub tint: [f32; 3],
    pub opacity: f32,
    pub idle_spin: f32,
    pub warmup_frames: u32,
    pub camera_position: Vec3,
    /// Touch input instead of mouse input.
    pub touch: bool,
}

impl FieldConfig {
    /// Compact devices get fewer, larger points and touch input.
    #[must_use]
    pub fn for_device(compact: bool) -> Self {
        Self {
            particle_count: if compact { FIELD_COUNT_MOBILE } else { FIELD_COUNT_DESKTOP },
            point_size: if compact { FIELD_POINT_SIZE_MOBILE } else { FIELD_POINT_SIZE_DESKTOP },
            touch: compact,
            ..Self::default()
        }
    }
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            particle_count: FIELD_COUNT_DESKTOP,
            point_size: FIELD_POINT_SIZE_DESKTOP,
            knot: TorusKnot::new(
                FIELD_KNOT_RADIUS,
                FIELD_KNOT_TUBE,
                FIELD_KNOT_TUBULAR_SEGMENTS,
                FIELD_KNOT_RADIAL_SEGMENTS,
            ),
            tint: FIELD_TINT,
            opacity: FIELD_OPACITY,
            idle_spin: FIELD_IDLE_SPIN,
            warmup_frames: WARMUP_FRAMES,
            camera_position: Vec3::new(0.2, 0.0, 4.5),
            touch: false,
        }
    }
}

/// Result of advancing the field one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldFrame {
    pub angle_x: f32,
    pub angle_y: f32,
    /// True on the single frame at which warm-up completes.
    pub revealed: bool,
}

/// Browser-free particle field state.
pub struct ParticleFieldCore {
    pub particles: ParticleSet,
    pub orbit: OrbitState,
    pub pointer: PointerState,
    pub lifecycle: Lifecycle,
    frames: u32,
    warmup_frames: u32,
    idle_spin: f32,
}

impl ParticleFieldCore {
    #[must_use]
    pub fn new(config: &FieldConfig) -> Self {
        let tint = config.tint;
        let particles = ParticleSet::sample(&config.knot.vertices(), config.particle_count, |_| tint);
        let mut lifecycle = Lifecycle::new();
        lifecycle.mount(true);
        Self {
            particles,
            orbit: OrbitState::default(),
            pointer: PointerState::default(),
            lifecycle,
            frames: 0,
            warmup_frames: config.warmup_frames,
            idle_spin: config.idle_spin,
        }
    }

    pub fn pointer_down(&mut self, at: Point, kind: PointerKind) {
        self.pointer.press(at, kind);
        self.lifecycle.begin_interaction();
    }

    pub fn pointer_move(&mut self, at: Point) {
        if let Some((kind, dx, dy)) = self.pointer.move_to(at) {
            self.orbit.drag(dx, dy, kind.drag_sensitivity());
        }
    }

    pub fn pointer_up(&mut self) {
        self.pointer.release();
        self.lifecycle.end_interaction();
    }

    /// Step the orbit and warm-up counter for a frame at `elapsed` seconds.
    pub fn advance(&mut self, elapsed: f32) -> FieldFrame {
        self.orbit.step(ORBIT_DAMPING);
        self.frames = self.frames.saturating_add(1);
        let revealed = self.frames >= self.warmup_frames && self.lifecycle.ready();
        let (angle_x, angle_y) = self.orbit.angles(elapsed, self.idle_spin);
        FieldFrame { angle_x, angle_y, revealed }
    }

    /// Whether warm-up has completed.
    #[must_use]
    pub fn is_revealed(&self) -> bool {
        self.lifecycle.is_live()
    }

    #[must_use]
    pub fn frames(&self) -> u32 {
        self.frames
    }
}

struct FieldState {
    core: ParticleFieldCore,
    gl: GL,
    cloud: PointCloud,
    camera: Camera,
    surface: RenderSurface,
    container: HtmlElement,
    start_ms: Option<f64>,
    on_ready: Option<Box<dyn FnOnce()>>,
}

impl FieldState {
    fn resize(&mut self) {
        match self.surface.fit_to(&self.container) {
            Ok(size) => {
                self.camera.set_aspect(size.aspect());
                self.gl.viewport(0, 0, size.pixel_width() as i32, size.pixel_height() as i32);
            }
            Err(err) => log::warn!("particle field: resize failed: {err:?}"),
        }
    }

    fn frame(&mut self, timestamp: f64) -> Option<Box<dyn FnOnce()>> {
        let start = *self.start_ms.get_or_insert(timestamp);
        let elapsed = ((timestamp - start) / 1000.0) as f32;
        let frame = self.core.advance(elapsed);

        let model_view = self.camera.view() * model_matrix(frame.angle_x, frame.angle_y);
        self.cloud.draw(&self.gl, model_view, self.camera.projection(), self.surface.size().pixel_height());

        if !frame.revealed {
            return None;
        }
        if let Err(err) = reveal(self.surface.canvas()) {
            log::warn!("particle field: reveal failed: {err:?}");
        }
        log::debug!("particle field: warm-up complete after {} frames", self.core.frames());
        self.on_ready.take()
    }

    fn release(&mut self) {
        self.cloud.delete(&self.gl);
        self.surface.canvas().remove();
        self.core.lifecycle.unmount();
    }
}

fn reveal(canvas: &HtmlCanvasElement) -> Result<(), wasm_bindgen::JsValue> {
    let style = canvas.style();
    style.set_property("visibility", "visible")?;
    style.set_property("transition", "opacity 0.3s ease-out")?;
    style.set_property("opacity", "1")
}

/// Mounted particle field.
pub struct ParticleFieldEngine {
    state: Rc<RefCell<FieldState>>,
    frame_loop: FrameLoop,
    listeners: ListenerSet,
    torn_down: bool,
}

impl ParticleFieldEngine {
    /// Mount into `container`, calling `on_ready` once warm-up completes.
    /// Returns `None` (container left empty) if rendering resources are unavailable.
    pub fn mount(container: &HtmlElement, config: FieldConfig, on_ready: impl FnOnce() + 'static) -> Option<Self> {
        match Self::try_mount(container, config, Box::new(on_ready)) {
            Ok(engine) => Some(engine),
            Err(err) => {
                log::warn!("particle field: not mounted: {err}");
                None
            }
        }
    }

    fn try_mount(container: &HtmlElement, config: FieldConfig, on_ready: Box<dyn FnOnce()>) -> Result<Self, MountError> {
        let canvas = create_hidden_canvas()?;
        let mut surface = RenderSurface::new(canvas, FIELD_MAX_DPR);
        let gl = surface.context_webgl2()?;
        surface.fit_to(container)?;
        container.append_child(surface.canvas())?;

        let core = ParticleFieldCore::new(&config);
        let style = PointStyle { size: config.point_size, opacity: config.opacity, additive: false };
        let cloud = match PointCloud::new(&gl, &core.particles, style) {
            Ok(cloud) => cloud,
            Err(err) => {
                surface.canvas().remove();
                return Err(err.into());
            }
        };

        let mut camera = Camera::new(75.0, config.camera_position);
        camera.set_aspect(surface.size().aspect());
        let size = surface.size();
        gl.viewport(0, 0, size.pixel_width() as i32, size.pixel_height() as i32);

        let state = Rc::new(RefCell::new(FieldState {
            core,
            gl,
            cloud,
            camera,
            surface,
            container: container.clone(),
            start_ms: None,
            on_ready: Some(on_ready),
        }));

        let mut listeners = ListenerSet::new();
        if let Err(err) = register_input(&mut listeners, &state, container, config.touch) {
            listeners.clear();
            state.borrow_mut().release();
            return Err(err.into());
        }

        let frame_state = Rc::clone(&state);
        let frame_loop = match FrameLoop::start(move |timestamp| {
            let ready = frame_state.borrow_mut().frame(timestamp);
            // Runs outside the borrow so the callback may tear this engine down.
            if let Some(ready) = ready {
                ready();
            }
        }) {
            Ok(frame_loop) => frame_loop,
            Err(err) => {
                listeners.clear();
                state.borrow_mut().release();
                return Err(err.into());
            }
        };

        log::debug!("particle field: mounted {} particles", config.particle_count);
        Ok(Self { state, frame_loop, listeners, torn_down: false })
    }

    /// Frames executed so far.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frame_loop.frames()
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl Teardown for ParticleFieldEngine {
    fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;
        self.frame_loop.stop();
        self.listeners.clear();
        self.state.borrow_mut().release();
    }
}

impl Drop for ParticleFieldEngine {
    fn drop(&mut self) {
        self.teardown();
    }
}

fn create_hidden_canvas() -> Result<HtmlCanvasElement, MountError> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or(MountError::NoDocument)?;
    let canvas = document
        .create_element("canvas")?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| MountError::Js("created element is not a canvas".into()))?;
    let style = canvas.style();
    style.set_property("opacity", "0")?;
    style.set_property("visibility", "hidden")?;
    style.set_property("display", "block")?;
    Ok(canvas)
}

fn register_input(
    listeners: &mut ListenerSet,
    state: &Rc<RefCell<FieldState>>,
    container: &HtmlElement,
    touch: bool,
) -> Result<(), wasm_bindgen::JsValue> {
    if touch {
        let s = Rc::clone(state);
        listeners.add_active(container, "touchstart", move |event: TouchEvent| {
            if let Some(at) = touch_point(&event) {
                event.prevent_default();
                s.borrow_mut().core.pointer_down(at, PointerKind::Touch);
            }
        })?;
        let s = Rc::clone(state);
        listeners.add_active(container, "touchmove", move |event: TouchEvent| {
            let mut state = s.borrow_mut();
            if !state.core.pointer.is_dragging() {
                return;
            }
            if let Some(at) = touch_point(&event) {
                event.prevent_default();
                state.core.pointer_move(at);
            }
        })?;
        let s = Rc::clone(state);
        listeners.add(container, "touchend", move |_: TouchEvent| s.borrow_mut().core.pointer_up())?;
    } else {
        let s = Rc::clone(state);
        listeners.add(container, "mousedown", move |event: MouseEvent| {
            s.borrow_mut().core.pointer_down(mouse_point(&event), PointerKind::Mouse);
        })?;
        let s = Rc::clone(state);
        listeners.add(container, "mousemove", move |event: MouseEvent| {
            s.borrow_mut().core.pointer_move(mouse_point(&event));
        })?;
        let s = Rc::clone(state);
        listeners.add(container, "mouseup", move |_: MouseEvent| s.borrow_mut().core.pointer_up())?;
        let s = Rc::clone(state);
        listeners.add(container, "mouseleave", move |_: MouseEvent| s.borrow_mut().core.pointer_up())?;
    }

    let window = web_sys::window().ok_or("no window")?;
    let s = Rc::clone(state);
    listeners.add(&window, "resize", move |_: web_sys::Event| s.borrow_mut().resize())?;
    Ok(())
}
