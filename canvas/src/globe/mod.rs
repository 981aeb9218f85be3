//! Orthographic globe engine: land outlines and a halftone dot field on a 2D canvas.
//!
//! | Module | Role |
//! |--------|------|
//! | [`geo`] | GeoJSON model and point-in-polygon |
//! | [`halftone`] | Land dot grid |
//! | [`projection`] | Rotated orthographic projection |
//! | [`state`] | Browser-free [`GlobeCore`] |
//! | [`render`] | Canvas drawing |
//! | [`fetch`] | Land data download |
//!
//! The land dataset is requested once on mount. A failed request leaves the
//! engine in [`GlobeStatus::Failed`] with rendering halted and the canvas
//! hidden; there is no retry. The surface follows window resizes.


pub mod fetch;
pub mod geo;
pub mod halftone;
pub mod projection;
pub mod render;
pub mod state;

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use gloo_timers::callback::Timeout;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlElement, MouseEvent, TouchEvent, WheelEvent};

pub use geo::Position;
pub use state::{GlobeCore, GlobeStatus};

use crate::consts::{
    DOT_SPACING, GLOBE_MAX_DPR, GLOBE_RESUME_GRACE_MS, GLOBE_WINDOW_MARGIN_X, GLOBE_WINDOW_MARGIN_Y, LAND_DATA_URL,
};
use crate::frame_loop::FrameLoop;
use crate::input::{PointerKind, WheelDelta, mouse_point, touch_point, touch_spread};
use crate::lifecycle::{MountError, Teardown};
use crate::listeners::ListenerSet;
use crate::surface::{RenderSurface, window_size};

/// A labelled location highlighted on the globe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker {
    pub label: &'static str,
    pub position: Position,
}

impl Default for Marker {
    fn default() -> Self {
        Self { label: "Belgium", position: Position::new(4.4699, 50.5039) }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlobeConfig {
    /// Requested surface width in CSS pixels.
    pub width: f64,
    /// Requested surface height in CSS pixels.
    pub height: f64,
    pub marker: Marker,
    pub data_url: &'static str,
    pub dot_spacing: f64,
}

impl Default for GlobeConfig {
    fn default() -> Self {
        Self { width: 800.0, height: 600.0, marker: Marker::default(), data_url: LAND_DATA_URL, dot_spacing: DOT_SPACING }
    }
}

impl GlobeConfig {
    /// The requested size, shrunk to fit inside the window margins.
    #[must_use]
    pub fn surface_size(&self, window_width: f64, window_height: f64) -> (f64, f64) {
        let width = self.width.min(window_width - GLOBE_WINDOW_MARGIN_X).max(0.0);
        let height = self.height.min(window_height - GLOBE_WINDOW_MARGIN_Y).max(0.0);
        (width, height)
    }
}

type StatusSink = Rc<RefCell<Box<dyn FnMut(GlobeStatus)>>>;

struct GlobeState {
    core: GlobeCore,
    surface: RenderSurface,
    ctx: CanvasRenderingContext2d,
    config: GlobeConfig,
    /// Pending auto-rotate resume; dropping it cancels the timer.
    resume: Option<Timeout>,
    draw_failed: bool,
}

impl GlobeState {
    fn frame(&mut self) {
        if !self.core.tick() {
            return;
        }
        if let Err(err) = render::draw(&self.ctx, &self.core, self.surface.size().dpr, self.config.marker.label) {
            if !self.draw_failed {
                log::warn!("globe: draw failed: {err:?}");
                self.draw_failed = true;
            }
        }
    }

    fn resize(&mut self) {
        let (win_w, win_h) = window_size();
        let (width, height) = self.config.surface_size(win_w, win_h);
        match self.surface.resize(width, height) {
            Ok(_) => self.core.resize(width, height),
            Err(err) => log::warn!("globe: resize failed: {err:?}"),
        }
    }

    /// Record the fetch failure. Returns `true` on the transition, after
    /// which the canvas is hidden so only the error overlay remains.
    fn fail(&mut self, message: String) -> bool {
        if !self.core.fail(message) {
            return false;
        }
        if let Err(err) = self.surface.canvas().style().set_property("display", "none") {
            log::warn!("globe: could not hide canvas: {err:?}");
        }
        true
    }

    /// End a drag and schedule auto rotation to resume after the grace delay.
    fn release(state: &Rc<RefCell<Self>>) {
        let mut s = state.borrow_mut();
        if !s.core.release() {
            return;
        }
        let weak = Rc::downgrade(state);
        s.resume = Some(Timeout::new(GLOBE_RESUME_GRACE_MS, move || {
            if let Some(state) = weak.upgrade() {
                state.borrow_mut().core.resume();
            }
        }));
    }

    fn release_resources(&mut self) {
        self.resume = None;
        self.surface.canvas().remove();
        self.core.unmount();
    }
}

/// Mounted globe.
pub struct GlobeEngine {
    state: Rc<RefCell<GlobeState>>,
    frame_loop: FrameLoop,
    listeners: ListenerSet,
    torn_down: bool,
}

impl GlobeEngine {
    /// Create the canvas inside `container`, start rendering, and request the
    /// land data. `on_status` is called on the transition to ready or failed.
    pub fn mount(
        container: &HtmlElement,
        config: GlobeConfig,
        on_status: impl FnMut(GlobeStatus) + 'static,
    ) -> Option<Self> {
        match Self::try_mount(container, config, Rc::new(RefCell::new(Box::new(on_status)))) {
            Ok(engine) => Some(engine),
            Err(err) => {
                log::warn!("globe: not mounted: {err}");
                None
            }
        }
    }

    fn try_mount(container: &HtmlElement, config: GlobeConfig, sink: StatusSink) -> Result<Self, MountError> {
        let window = web_sys::window().ok_or(MountError::NoDocument)?;
        let document = window.document().ok_or(MountError::NoDocument)?;
        let canvas = document
            .create_element("canvas")?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| MountError::Js("created element is not a canvas".into()))?;
        canvas.style().set_property("display", "block")?;

        let mut surface = RenderSurface::new(canvas, GLOBE_MAX_DPR);
        let ctx = surface.context_2d()?;
        let (win_w, win_h) = window_size();
        let (width, height) = config.surface_size(win_w, win_h);
        surface.resize(width, height)?;
        container.append_child(surface.canvas())?;

        let canvas = surface.canvas().clone();
        let state = Rc::new(RefCell::new(GlobeState {
            core: GlobeCore::new(&config, width, height),
            surface,
            ctx,
            config,
            resume: None,
            draw_failed: false,
        }));

        let mut listeners = ListenerSet::new();
        if let Err(err) = register_input(&mut listeners, &state, &canvas, &window, &document) {
            listeners.clear();
            state.borrow_mut().release_resources();
            return Err(err.into());
        }

        let frame_state = Rc::clone(&state);
        let frame_loop = match FrameLoop::start(move |_| frame_state.borrow_mut().frame()) {
            Ok(frame_loop) => frame_loop,
            Err(err) => {
                listeners.clear();
                state.borrow_mut().release_resources();
                return Err(err.into());
            }
        };

        if state.borrow_mut().core.begin_fetch() {
            spawn_fetch(Rc::downgrade(&state), sink, config.data_url);
        }

        log::debug!("globe: mounted {width}x{height}");
        Ok(Self { state, frame_loop, listeners, torn_down: false })
    }

    #[must_use]
    pub fn status(&self) -> GlobeStatus {
        self.state.borrow().core.status()
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

impl Teardown for GlobeEngine {
    fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;
        self.frame_loop.stop();
        self.listeners.clear();
        self.state.borrow_mut().release_resources();
    }
}

impl Drop for GlobeEngine {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// Run the land download. The result is dropped if the engine has gone away.
fn spawn_fetch(state: Weak<RefCell<GlobeState>>, sink: StatusSink, url: &'static str) {
    wasm_bindgen_futures::spawn_local(async move {
        let result = fetch::fetch_land(url).await;
        let Some(state) = state.upgrade() else {
            return;
        };
        let status = {
            let mut s = state.borrow_mut();
            match result {
                Ok(land) => s.core.load(land).then_some(GlobeStatus::Ready),
                Err(err) => {
                    log::error!("globe: failed to load land data: {err}");
                    s.fail(err.to_string()).then(|| s.core.status())
                }
            }
        };
        if let Some(status) = status {
            let mut notify = sink.borrow_mut();
            (*notify)(status);
        }
    });
}

fn register_input(
    listeners: &mut ListenerSet,
    state: &Rc<RefCell<GlobeState>>,
    canvas: &HtmlCanvasElement,
    window: &web_sys::Window,
    document: &web_sys::Document,
) -> Result<(), JsValue> {
    let s = Rc::clone(state);
    listeners.add(canvas, "mousedown", move |event: MouseEvent| {
        s.borrow_mut().core.press(mouse_point(&event), PointerKind::Mouse);
    })?;
    let s = Rc::clone(state);
    listeners.add_active(canvas, "touchstart", move |event: TouchEvent| {
        let mut st = s.borrow_mut();
        if let Some(spread) = touch_spread(&event) {
            event.prevent_default();
            st.core.begin_pinch(spread);
        } else if let Some(at) = touch_point(&event) {
            event.prevent_default();
            st.core.press(at, PointerKind::Touch);
        }
    })?;
    let s = Rc::clone(state);
    listeners.add_active(canvas, "wheel", move |event: WheelEvent| {
        event.prevent_default();
        s.borrow_mut().core.wheel(WheelDelta { dx: event.delta_x(), dy: event.delta_y() });
    })?;

    let s = Rc::clone(state);
    listeners.add(document, "mousemove", move |event: MouseEvent| {
        let mut st = s.borrow_mut();
        if st.core.is_dragging() {
            st.core.drag_to(mouse_point(&event));
        }
    })?;
    let s = Rc::clone(state);
    listeners.add_active(document, "touchmove", move |event: TouchEvent| {
        let mut st = s.borrow_mut();
        if st.core.is_pinching() {
            if let Some(spread) = touch_spread(&event) {
                event.prevent_default();
                st.core.pinch_to(spread);
            }
        } else if st.core.is_dragging() {
            if let Some(at) = touch_point(&event) {
                event.prevent_default();
                st.core.drag_to(at);
            }
        }
    })?;
    let s = Rc::clone(state);
    listeners.add(document, "mouseup", move |_: MouseEvent| GlobeState::release(&s))?;
    let s = Rc::clone(state);
    listeners.add(document, "touchend", move |_: TouchEvent| GlobeState::release(&s))?;
    let s = Rc::clone(state);
    listeners.add(window, "resize", move |_: web_sys::Event| s.borrow_mut().resize())?;
    Ok(())
}
