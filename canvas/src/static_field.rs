//! Ambient static field: diamond motes swirling around the pointer on a 2D canvas.
//!
//! Inside the magnetic radius a mote is pulled toward the pointer and pushed
//! along the tangent, so motes orbit instead of collapsing onto it. Frames are
//! cleared with a translucent fill, which leaves short motion trails.

#[cfg(test)]
#[path = "static_field_test.rs"]
mod static_field_test;

use std::cell::RefCell;
use std::f64::consts::TAU;
use std::rc::Rc;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlElement, MouseEvent, TouchEvent};

use crate::consts::{
    ACCENT_PROBABILITY, ACCENT_RGB, CHARCOAL_RGB, GLOW_DECAY, GLOW_GAIN, GLOW_THRESHOLD, MAGNETIC_RADIUS,
    MAX_MOTE_ALPHA, POINTER_PARKED, PULL_STRENGTH, STATIC_COUNT, STATIC_DAMPING, STATIC_JITTER, STATIC_MAX_DPR,
    TRAIL_FILL, VORTEX_GAIN, VORTEX_STRENGTH, WRAP_MARGIN,
};
use crate::frame_loop::FrameLoop;
use crate::input::{Point, mouse_point, touch_point};
use crate::lifecycle::{Lifecycle, MountError, Teardown};
use crate::listeners::ListenerSet;
use crate::surface::{RenderSurface, window_size};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StaticFieldConfig {
    pub count: usize,
    pub magnetic_radius: f64,
    pub pull: f64,
    /// Tangential strength, already multiplied by its gain.
    pub vortex: f64,
    pub damping: f64,
    /// Full width of the per-frame velocity jitter.
    pub jitter: f64,
    pub accent_probability: f64,
    pub wrap_margin: f64,
    pub seed: Option<u64>,
}

impl Default for StaticFieldConfig {
    fn default() -> Self {
        Self {
            count: STATIC_COUNT,
            magnetic_radius: MAGNETIC_RADIUS,
            pull: PULL_STRENGTH,
            vortex: VORTEX_STRENGTH * VORTEX_GAIN,
            damping: STATIC_DAMPING,
            jitter: STATIC_JITTER,
            accent_probability: ACCENT_PROBABILITY,
            wrap_margin: WRAP_MARGIN,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tint {
    Accent,
    Charcoal,
}

impl Tint {
    /// `r, g, b` for an `rgba(...)` style string.
    #[must_use]
    pub fn rgb(self) -> &'static str {
        match self {
            Self::Accent => ACCENT_RGB,
            Self::Charcoal => CHARCOAL_RGB,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mote {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub size: f64,
    pub alpha: f64,
    pub tint: Tint,
    pub rotation: f64,
    pub rotation_speed: f64,
    /// Proximity glow, `0` when far from the pointer.
    pub glow: f64,
}

impl Mote {
    /// Fill alpha including the glow boost.
    #[must_use]
    pub fn fill_alpha(&self) -> f64 {
        (self.alpha + self.glow * 0.5).min(MAX_MOTE_ALPHA)
    }

    /// Whether the shadow pass runs for this mote.
    #[must_use]
    pub fn glows(&self) -> bool {
        self.glow > GLOW_THRESHOLD
    }
}

pub struct StaticFieldCore {
    motes: Vec<Mote>,
    width: f64,
    height: f64,
    pointer: Point,
    rng: SmallRng,
    config: StaticFieldConfig,
}

impl StaticFieldCore {
    #[must_use]
    pub fn new(config: StaticFieldConfig, width: f64, height: f64, seed: u64) -> Self {
        let mut core = Self {
            motes: Vec::with_capacity(config.count),
            width,
            height,
            pointer: Point::new(POINTER_PARKED, POINTER_PARKED),
            rng: SmallRng::seed_from_u64(seed),
            config,
        };
        core.respawn(width, height);
        core
    }

    /// Re-seed every mote over a `width × height` surface.
    pub fn respawn(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
        let count = self.config.count;
        self.motes.clear();
        for _ in 0..count {
            let mote = self.spawn();
            self.motes.push(mote);
        }
    }

    fn spawn(&mut self) -> Mote {
        let rng = &mut self.rng;
        let x = rng.random::<f64>() * self.width;
        let y = rng.random::<f64>() * self.height;
        let size = rng.random::<f64>() * 1.5 + 0.5;
        let vx = (rng.random::<f64>() - 0.5) * 0.2;
        let vy = (rng.random::<f64>() - 0.5) * 0.2;
        let tint = if rng.random::<f64>() < self.config.accent_probability { Tint::Accent } else { Tint::Charcoal };
        let alpha = rng.random::<f64>() * 0.4 + 0.15;
        let rotation = rng.random::<f64>() * TAU;
        let rotation_speed = (rng.random::<f64>() - 0.5) * 0.04;
        Mote { x, y, vx, vy, size, alpha, tint, rotation, rotation_speed, glow: 0.0 }
    }

    #[must_use]
    pub fn motes(&self) -> &[Mote] {
        &self.motes
    }

    #[must_use]
    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    pub fn set_pointer(&mut self, at: Point) {
        self.pointer = at;
    }

    #[must_use]
    pub fn pointer(&self) -> Point {
        self.pointer
    }

    /// Advance every mote one frame.
    pub fn step(&mut self) {
        let c = self.config;
        let (pointer, width, height) = (self.pointer, self.width, self.height);
        for mote in &mut self.motes {
            let dx = pointer.x - mote.x;
            let dy = pointer.y - mote.y;
            let dist = dx.hypot(dy);

            if dist < c.magnetic_radius && dist > 0.0 {
                let force = (c.magnetic_radius - dist) / c.magnetic_radius;
                let (nx, ny) = (dx / dist, dy / dist);
                mote.vx += nx * force * c.pull;
                mote.vy += ny * force * c.pull;
                mote.vx += ny * force * c.vortex;
                mote.vy -= nx * force * c.vortex;
                mote.glow = force * GLOW_GAIN;
            } else {
                mote.glow *= GLOW_DECAY;
            }

            mote.x += mote.vx;
            mote.y += mote.vy;
            mote.vx *= c.damping;
            mote.vy *= c.damping;
            mote.vx += (self.rng.random::<f64>() - 0.5) * c.jitter;
            mote.vy += (self.rng.random::<f64>() - 0.5) * c.jitter;
            mote.rotation += mote.rotation_speed;

            wrap(&mut mote.x, width, c.wrap_margin);
            wrap(&mut mote.y, height, c.wrap_margin);
        }
    }
}

/// Re-enter from the opposite side once past `margin` beyond an edge.
fn wrap(v: &mut f64, extent: f64, margin: f64) {
    if *v < -margin {
        *v = extent + margin;
    }
    if *v > extent + margin {
        *v = -margin;
    }
}

/// Draw one frame: translucent trail fill, then every mote.
///
/// # Errors
///
/// Returns `Err` if a canvas transform call fails.
pub fn draw(ctx: &CanvasRenderingContext2d, core: &StaticFieldCore) -> Result<(), JsValue> {
    let (width, height) = core.size();
    ctx.set_fill_style_str(TRAIL_FILL);
    ctx.fill_rect(0.0, 0.0, width, height);
    ctx.set_shadow_blur(0.0);

    for mote in core.motes() {
        ctx.save();
        ctx.translate(mote.x, mote.y)?;
        ctx.rotate(mote.rotation)?;
        ctx.set_fill_style_str(&format!("rgba({}, {})", mote.tint.rgb(), mote.fill_alpha()));
        if mote.glows() {
            ctx.set_shadow_blur(6.0);
            ctx.set_shadow_color(&format!("rgba({ACCENT_RGB}, {})", mote.glow * 0.5));
        }
        ctx.begin_path();
        ctx.move_to(0.0, -mote.size * 2.0);
        ctx.line_to(mote.size, 0.0);
        ctx.line_to(0.0, mote.size * 2.0);
        ctx.line_to(-mote.size, 0.0);
        ctx.close_path();
        ctx.fill();
        ctx.restore();
    }
    Ok(())
}

struct StaticState {
    core: StaticFieldCore,
    lifecycle: Lifecycle,
    surface: RenderSurface,
    ctx: CanvasRenderingContext2d,
    draw_failed: bool,
}

impl StaticState {
    fn resize(&mut self) {
        let (w, h) = window_size();
        if let Err(err) = self.surface.resize(w, h) {
            log::warn!("static field: resize failed: {err:?}");
        }
        self.core.respawn(w, h);
    }

    fn frame(&mut self) {
        self.core.step();
        let dpr = self.surface.size().dpr;
        let drawn = self.ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0).and_then(|()| draw(&self.ctx, &self.core));
        if let Err(err) = drawn {
            if !self.draw_failed {
                log::warn!("static field: draw failed: {err:?}");
                self.draw_failed = true;
            }
        }
    }

    fn release(&mut self) {
        self.surface.canvas().remove();
        self.lifecycle.unmount();
    }
}

/// Mounted ambient field, sized to the window in CSS pixels.
pub struct StaticFieldEngine {
    state: Rc<RefCell<StaticState>>,
    frame_loop: FrameLoop,
    listeners: ListenerSet,
    torn_down: bool,
}

impl StaticFieldEngine {
    pub fn mount(container: &HtmlElement, config: StaticFieldConfig) -> Option<Self> {
        match Self::try_mount(container, config) {
            Ok(engine) => Some(engine),
            Err(err) => {
                log::warn!("static field: not mounted: {err}");
                None
            }
        }
    }

    fn try_mount(container: &HtmlElement, config: StaticFieldConfig) -> Result<Self, MountError> {
        let window = web_sys::window().ok_or(MountError::NoDocument)?;
        let document = window.document().ok_or(MountError::NoDocument)?;
        let canvas = document
            .create_element("canvas")?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| MountError::Js("created element is not a canvas".into()))?;
        let style = canvas.style();
        style.set_property("position", "absolute")?;
        style.set_property("inset", "0")?;
        style.set_property("display", "block")?;

        let mut surface = RenderSurface::new(canvas, STATIC_MAX_DPR);
        let ctx = surface.context_2d()?;
        let (w, h) = window_size();
        surface.resize(w, h)?;
        container.append_child(surface.canvas())?;

        let seed = config.seed.unwrap_or_else(|| (js_sys::Math::random() * u64::MAX as f64) as u64);
        let mut lifecycle = Lifecycle::new();
        lifecycle.mount(false);
        let state = Rc::new(RefCell::new(StaticState {
            core: StaticFieldCore::new(config, w, h, seed),
            lifecycle,
            surface,
            ctx,
            draw_failed: false,
        }));

        let mut listeners = ListenerSet::new();
        if let Err(err) = register_input(&mut listeners, &state, &window) {
            listeners.clear();
            state.borrow_mut().release();
            return Err(err.into());
        }

        let frame_state = Rc::clone(&state);
        let frame_loop = match FrameLoop::start(move |_| frame_state.borrow_mut().frame()) {
            Ok(frame_loop) => frame_loop,
            Err(err) => {
                listeners.clear();
                state.borrow_mut().release();
                return Err(err.into());
            }
        };

        log::debug!("static field: mounted {} motes", config.count);
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

impl Teardown for StaticFieldEngine {
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

impl Drop for StaticFieldEngine {
    fn drop(&mut self) {
        self.teardown();
    }
}

fn register_input(
    listeners: &mut ListenerSet,
    state: &Rc<RefCell<StaticState>>,
    window: &web_sys::Window,
) -> Result<(), JsValue> {
    let s = Rc::clone(state);
    listeners.add(window, "mousemove", move |event: MouseEvent| s.borrow_mut().core.set_pointer(mouse_point(&event)))?;
    let s = Rc::clone(state);
    listeners.add(window, "touchmove", move |event: TouchEvent| {
        if let Some(at) = touch_point(&event) {
            s.borrow_mut().core.set_pointer(at);
        }
    })?;
    let s = Rc::clone(state);
    listeners.add(window, "resize", move |_: web_sys::Event| s.borrow_mut().resize())?;
    Ok(())
}
