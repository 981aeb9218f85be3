//! Woven light: a dense knot of points pushed around by the pointer.
//!
//! Each particle carries a rest position and a velocity. Per frame the pointer
//! repels particles inside the interaction radius, a weak spring pulls every
//! particle back to rest, velocity decays, and positions integrate by explicit
//! Euler. Stable for the default constants; there is no adaptive timestep.

#[cfg(test)]
#[path = "woven_test.rs"]
mod woven_test;

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec3;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use wasm_bindgen::JsCast;
use web_sys::{HtmlCanvasElement, HtmlElement, MouseEvent, WebGl2RenderingContext as GL};

use crate::camera::{Camera, client_to_ndc, model_matrix};
use crate::consts::{
    ORBIT_DAMPING, SHADER_MAX_DPR, WOVEN_COUNT, WOVEN_DAMPING, WOVEN_IDLE_SPIN, WOVEN_INTERACTION_RADIUS,
    WOVEN_KNOT_RADIAL_SEGMENTS, WOVEN_KNOT_RADIUS, WOVEN_KNOT_TUBE, WOVEN_KNOT_TUBULAR_SEGMENTS, WOVEN_LIGHTNESS_DARK,
    WOVEN_LIGHTNESS_LIGHT, WOVEN_POINT_SIZE, WOVEN_POINTER_SPAN, WOVEN_REPULSION, WOVEN_RETURN, WOVEN_SATURATION,
};
use crate::frame_loop::FrameLoop;
use crate::input::{Point, PointerKind, PointerState, mouse_point};
use crate::knot::TorusKnot;
use crate::lifecycle::{Lifecycle, MountError, Teardown};
use crate::listeners::ListenerSet;
use crate::orbit::OrbitState;
use crate::particles::{ParticleSet, hsl_to_rgb};
use crate::points::{PointCloud, PointStyle};
use crate::surface::{RenderSurface, window_size};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WovenConfig {
    pub particle_count: usize,
    pub point_size: f32,
    pub knot: TorusKnot,
    pub interaction_radius: f32,
    pub repulsion: f32,
    pub return_strength: f32,
    pub damping: f32,
    /// Scale from NDC to particle space.
    pub pointer_span: f32,
    pub idle_spin: f32,
    /// Color seed; `None` draws one from the browser at mount.
    pub seed: Option<u64>,
}

impl Default for WovenConfig {
    fn default() -> Self {
        Self {
            particle_count: WOVEN_COUNT,
            point_size: WOVEN_POINT_SIZE,
            knot: TorusKnot::new(
                WOVEN_KNOT_RADIUS,
                WOVEN_KNOT_TUBE,
                WOVEN_KNOT_TUBULAR_SEGMENTS,
                WOVEN_KNOT_RADIAL_SEGMENTS,
            ),
            interaction_radius: WOVEN_INTERACTION_RADIUS,
            repulsion: WOVEN_REPULSION,
            return_strength: WOVEN_RETURN,
            damping: WOVEN_DAMPING,
            pointer_span: WOVEN_POINTER_SPAN,
            idle_spin: WOVEN_IDLE_SPIN,
            seed: None,
        }
    }
}

/// Blend and opacity for the current color scheme.
#[must_use]
pub fn woven_style(config: &WovenConfig, dark: bool) -> PointStyle {
    PointStyle {
        size: config.point_size,
        opacity: if dark { 1.0 } else { 0.8 },
        additive: !dark,
    }
}

pub struct WovenCore {
    pub particles: ParticleSet,
    pub orbit: OrbitState,
    pub pointer: PointerState,
    /// Pointer in particle space.
    mouse: Vec3,
    radius: f32,
    repulsion: f32,
    return_strength: f32,
    damping: f32,
    span: f32,
    idle_spin: f32,
}

impl WovenCore {
    /// Sample the knot and give each particle a random hue drawn from `seed`.
    #[must_use]
    pub fn new(config: &WovenConfig, dark: bool, seed: u64) -> Self {
        let lightness = if dark { WOVEN_LIGHTNESS_DARK } else { WOVEN_LIGHTNESS_LIGHT };
        let mut rng = SmallRng::seed_from_u64(seed);
        let particles = ParticleSet::sample(&config.knot.vertices(), config.particle_count, |_| {
            hsl_to_rgb(rng.random::<f32>(), WOVEN_SATURATION, lightness)
        });
        Self {
            particles,
            orbit: OrbitState::default(),
            pointer: PointerState::default(),
            mouse: Vec3::ZERO,
            radius: config.interaction_radius,
            repulsion: config.repulsion,
            return_strength: config.return_strength,
            damping: config.damping,
            span: config.pointer_span,
            idle_spin: config.idle_spin,
        }
    }

    /// Place the pointer from normalized device coordinates.
    pub fn set_pointer_ndc(&mut self, x: f32, y: f32) {
        self.mouse = Vec3::new(x * self.span, y * self.span, 0.0);
    }

    /// Place the pointer from a client position over a surface whose top-left
    /// corner sits at `origin` in the viewport.
    pub fn track_pointer(&mut self, client: Point, origin: Point, width: f64, height: f64) {
        let local = client.relative_to(origin);
        let (x, y) = client_to_ndc(local.x, local.y, width, height);
        self.set_pointer_ndc(x, y);
    }

    #[must_use]
    pub fn mouse(&self) -> Vec3 {
        self.mouse
    }

    /// One physics step over every particle.
    pub fn step(&mut self) {
        let mouse = self.mouse;
        let (positions, velocities, rest) = self.particles.dynamics_mut();
        for ((pos, vel), home) in positions
            .chunks_exact_mut(3)
            .zip(velocities.chunks_exact_mut(3))
            .zip(rest.chunks_exact(3))
        {
            let p = Vec3::new(pos[0], pos[1], pos[2]);
            let mut v = Vec3::new(vel[0], vel[1], vel[2]);

            let dist = p.distance(mouse);
            if dist < self.radius {
                let force = (self.radius - dist) * self.repulsion;
                v += (p - mouse).normalize_or_zero() * force;
            }
            v += (Vec3::new(home[0], home[1], home[2]) - p) * self.return_strength;
            v *= self.damping;

            let p = p + v;
            pos.copy_from_slice(&p.to_array());
            vel.copy_from_slice(&v.to_array());
        }
    }

    /// Physics, orbit damping, and the displayed `(x, y)` angles at `elapsed` seconds.
    pub fn advance(&mut self, elapsed: f32) -> (f32, f32) {
        self.step();
        self.orbit.step(ORBIT_DAMPING);
        self.orbit.angles(elapsed, self.idle_spin)
    }
}

struct WovenState {
    core: WovenCore,
    lifecycle: Lifecycle,
    gl: GL,
    cloud: PointCloud,
    camera: Camera,
    surface: RenderSurface,
    start_ms: Option<f64>,
}

impl WovenState {
    fn resize(&mut self) {
        let (w, h) = window_size();
        match self.surface.resize(w, h) {
            Ok(size) => {
                self.camera.set_aspect(size.aspect());
                self.gl.viewport(0, 0, size.pixel_width() as i32, size.pixel_height() as i32);
            }
            Err(err) => log::warn!("woven light: resize failed: {err:?}"),
        }
    }

    fn pointer_moved(&mut self, event: &MouseEvent) {
        let at = mouse_point(event);
        let rect = self.surface.canvas().get_bounding_client_rect();
        let size = self.surface.size();
        self.core.track_pointer(at, Point::new(rect.left(), rect.top()), size.css_width, size.css_height);
        if let Some((kind, dx, dy)) = self.core.pointer.move_to(at) {
            self.core.orbit.drag(dx, dy, kind.drag_sensitivity());
        }
    }

    fn frame(&mut self, timestamp: f64) {
        let start = *self.start_ms.get_or_insert(timestamp);
        let (angle_x, angle_y) = self.core.advance(((timestamp - start) / 1000.0) as f32);
        self.cloud.update_positions(&self.gl, self.core.particles.positions());
        let model_view = self.camera.view() * model_matrix(angle_x, angle_y);
        self.cloud.draw(&self.gl, model_view, self.camera.projection(), self.surface.size().pixel_height());
    }

    fn release(&mut self) {
        self.cloud.delete(&self.gl);
        self.surface.canvas().remove();
        self.lifecycle.unmount();
    }
}

/// Mounted woven-light canvas, sized to the window.
pub struct WovenEngine {
    state: Rc<RefCell<WovenState>>,
    frame_loop: FrameLoop,
    listeners: ListenerSet,
    torn_down: bool,
}

impl WovenEngine {
    /// Mount into `container`. Returns `None` if WebGL2 or the DOM is unavailable.
    pub fn mount(container: &HtmlElement, config: WovenConfig) -> Option<Self> {
        match Self::try_mount(container, config) {
            Ok(engine) => Some(engine),
            Err(err) => {
                log::warn!("woven light: not mounted: {err}");
                None
            }
        }
    }

    fn try_mount(container: &HtmlElement, config: WovenConfig) -> Result<Self, MountError> {
        let window = web_sys::window().ok_or(MountError::NoDocument)?;
        let document = window.document().ok_or(MountError::NoDocument)?;
        let canvas = document
            .create_element("canvas")?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| MountError::Js("created element is not a canvas".into()))?;
        canvas.style().set_property("display", "block")?;

        let mut surface = RenderSurface::new(canvas, SHADER_MAX_DPR);
        let gl = surface.context_webgl2()?;
        let (w, h) = window_size();
        let size = surface.resize(w, h)?;

        let dark = prefers_dark(&window);
        let seed = config.seed.unwrap_or_else(browser_seed);
        let core = WovenCore::new(&config, dark, seed);
        let cloud = PointCloud::new(&gl, &core.particles, woven_style(&config, dark))?;
        if let Err(err) = container.append_child(surface.canvas()) {
            cloud.delete(&gl);
            return Err(err.into());
        }

        let mut camera = Camera::default();
        camera.set_aspect(size.aspect());
        gl.viewport(0, 0, size.pixel_width() as i32, size.pixel_height() as i32);

        let mut lifecycle = Lifecycle::new();
        lifecycle.mount(false);
        let state = Rc::new(RefCell::new(WovenState {
            core,
            lifecycle,
            gl,
            cloud,
            camera,
            surface,
            start_ms: None,
        }));

        let mut listeners = ListenerSet::new();
        if let Err(err) = register_input(&mut listeners, &state, container, &window) {
            listeners.clear();
            state.borrow_mut().release();
            return Err(err.into());
        }

        let frame_state = Rc::clone(&state);
        let frame_loop = match FrameLoop::start(move |timestamp| frame_state.borrow_mut().frame(timestamp)) {
            Ok(frame_loop) => frame_loop,
            Err(err) => {
                listeners.clear();
                state.borrow_mut().release();
                return Err(err.into());
            }
        };

        log::debug!("woven light: mounted {} particles (dark: {dark})", config.particle_count);
        Ok(Self { state, frame_loop, listeners, torn_down: false })
    }

    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frame_loop.frames()
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl Teardown for WovenEngine {
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

impl Drop for WovenEngine {
    fn drop(&mut self) {
        self.teardown();
    }
}

fn prefers_dark(window: &web_sys::Window) -> bool {
    matches!(window.match_media("(prefers-color-scheme: dark)"), Ok(Some(query)) if query.matches())
}

fn browser_seed() -> u64 {
    (js_sys::Math::random() * u64::MAX as f64) as u64
}

fn register_input(
    listeners: &mut ListenerSet,
    state: &Rc<RefCell<WovenState>>,
    container: &HtmlElement,
    window: &web_sys::Window,
) -> Result<(), wasm_bindgen::JsValue> {
    let s = Rc::clone(state);
    listeners.add(window, "mousemove", move |event: MouseEvent| s.borrow_mut().pointer_moved(&event))?;
    let s = Rc::clone(state);
    listeners.add(container, "mousedown", move |event: MouseEvent| {
        let mut state = s.borrow_mut();
        state.core.pointer.press(mouse_point(&event), PointerKind::Mouse);
        state.lifecycle.begin_interaction();
    })?;
    let s = Rc::clone(state);
    listeners.add(window, "mouseup", move |_: MouseEvent| {
        let mut state = s.borrow_mut();
        state.core.pointer.release();
        state.lifecycle.end_interaction();
    })?;
    let s = Rc::clone(state);
    listeners.add(window, "resize", move |_: web_sys::Event| s.borrow_mut().resize())?;
    Ok(())
}
