//! Neon wireframe polyhedra drawn entirely in a fragment program.
//!
//! A fullscreen quad runs `wireframe.frag`, which rotates and projects the
//! current shape's vertices per pixel and sums a glow for each edge. Clicking
//! the container cycles the shape. While the surface is off-screen the frame
//! loop keeps running but does no GL work.

#[cfg(test)]
#[path = "wireframe_test.rs"]
mod wireframe_test;

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{
    HtmlCanvasElement, HtmlElement, MouseEvent, TouchEvent, WebGl2RenderingContext as GL, WebGlBuffer,
    WebGlUniformLocation, WebGlVertexArrayObject,
};

use crate::consts::{SHADER_MAX_DPR, WIREFRAME_CLEAR, WIREFRAME_POINTER_DAMPING};
use crate::frame_loop::FrameLoop;
use crate::gl::{GlError, Program, create_buffer};
use crate::input::{Point, mouse_point, touch_point};
use crate::lifecycle::{Lifecycle, MountError, Teardown};
use crate::listeners::ListenerSet;
use crate::shapes::{Shape, ShapeFrame};
use crate::surface::RenderSurface;

const VERTEX_SRC: &str = include_str!("shaders/fullscreen.vert");
const FRAGMENT_SRC: &str = include_str!("shaders/wireframe.frag");

const QUAD: [f32; 8] = [-1.0, -1.0, 1.0, -1.0, -1.0, 1.0, 1.0, 1.0];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WireframeConfig {
    pub initial_shape: Shape,
    /// Pointer smoothing rate per second.
    pub pointer_damping: f64,
    pub max_dpr: f64,
    pub clear: [f32; 4],
}

impl Default for WireframeConfig {
    fn default() -> Self {
        Self {
            initial_shape: Shape::Cube,
            pointer_damping: WIREFRAME_POINTER_DAMPING,
            max_dpr: SHADER_MAX_DPR,
            clear: WIREFRAME_CLEAR,
        }
    }
}

/// Everything the fragment program needs for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct WireframeFrame {
    /// Seconds since mount.
    pub time: f32,
    /// Smoothed pointer in surface CSS pixels.
    pub mouse: Point,
    pub shape: ShapeFrame,
}

pub struct WireframeCore {
    shape: Shape,
    pointer: Point,
    damped: Point,
    visible: bool,
    damping: f64,
    start_ms: Option<f64>,
    last_ms: Option<f64>,
}

impl WireframeCore {
    #[must_use]
    pub fn new(config: &WireframeConfig) -> Self {
        Self {
            shape: config.initial_shape,
            pointer: Point::default(),
            damped: Point::default(),
            visible: false,
            damping: config.pointer_damping,
            start_ms: None,
            last_ms: None,
        }
    }

    #[must_use]
    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Advance to the next palette shape.
    pub fn click(&mut self) -> Shape {
        self.shape = self.shape.next();
        self.shape
    }

    /// Raw pointer position relative to the surface.
    pub fn set_pointer(&mut self, at: Point) {
        self.pointer = at;
    }

    #[must_use]
    pub fn damped_pointer(&self) -> Point {
        self.damped
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Step pointer smoothing for a frame at `now_ms`. `None` while hidden.
    pub fn advance(&mut self, now_ms: f64) -> Option<WireframeFrame> {
        let start = *self.start_ms.get_or_insert(now_ms);
        if !self.visible {
            return None;
        }
        let dt = self.last_ms.map_or(0.0, |last| (now_ms - last).max(0.0) / 1000.0);
        self.last_ms = Some(now_ms);

        // A long hidden stretch would otherwise overshoot.
        let k = (self.damping * dt).min(1.0);
        self.damped.x += (self.pointer.x - self.damped.x) * k;
        self.damped.y += (self.pointer.y - self.damped.y) * k;

        let time = ((now_ms - start) / 1000.0) as f32;
        Some(WireframeFrame { time, mouse: self.damped, shape: self.shape.frame(time) })
    }
}

struct Uniforms {
    mouse: Option<WebGlUniformLocation>,
    resolution: Option<WebGlUniformLocation>,
    pixel_ratio: Option<WebGlUniformLocation>,
    time: Option<WebGlUniformLocation>,
    vertices: Option<WebGlUniformLocation>,
    edges: Option<WebGlUniformLocation>,
    edge_count: Option<WebGlUniformLocation>,
}

struct QuadPass {
    program: Program,
    vao: WebGlVertexArrayObject,
    buffer: WebGlBuffer,
    uniforms: Uniforms,
}

impl QuadPass {
    fn new(gl: &GL) -> Result<Self, GlError> {
        let program = Program::build(gl, VERTEX_SRC, FRAGMENT_SRC)?;
        let Some(vao) = gl.create_vertex_array() else {
            program.delete(gl);
            return Err(GlError::Create("vertex array"));
        };
        gl.bind_vertex_array(Some(&vao));
        let buffer = match create_buffer(gl, &QUAD, GL::STATIC_DRAW) {
            Ok(buffer) => buffer,
            Err(err) => {
                gl.delete_vertex_array(Some(&vao));
                program.delete(gl);
                return Err(err);
            }
        };
        gl.enable_vertex_attrib_array(0);
        gl.vertex_attrib_pointer_with_i32(0, 2, GL::FLOAT, false, 0, 0);
        gl.bind_vertex_array(None);

        let uniforms = Uniforms {
            mouse: program.uniform(gl, "u_mouse"),
            resolution: program.uniform(gl, "u_resolution"),
            pixel_ratio: program.uniform(gl, "u_pixel_ratio"),
            time: program.uniform(gl, "u_time"),
            vertices: program.uniform(gl, "u_vertices"),
            edges: program.uniform(gl, "u_edges"),
            edge_count: program.uniform(gl, "u_edge_count"),
        };
        Ok(Self { program, vao, buffer, uniforms })
    }

    fn draw(&self, gl: &GL, frame: &WireframeFrame, width: u32, height: u32, dpr: f64, clear: [f32; 4]) {
        gl.clear_color(clear[0], clear[1], clear[2], clear[3]);
        gl.clear(GL::COLOR_BUFFER_BIT);

        let u = &self.uniforms;
        gl.use_program(Some(&self.program.program));
        gl.uniform2f(u.mouse.as_ref(), frame.mouse.x as f32, frame.mouse.y as f32);
        gl.uniform2f(u.resolution.as_ref(), width as f32, height as f32);
        gl.uniform1f(u.pixel_ratio.as_ref(), dpr as f32);
        gl.uniform1f(u.time.as_ref(), frame.time);
        gl.uniform3fv_with_f32_array(u.vertices.as_ref(), &frame.shape.vertex_uniforms());
        gl.uniform3fv_with_f32_array(u.edges.as_ref(), &frame.shape.edge_uniforms());
        gl.uniform1i(u.edge_count.as_ref(), frame.shape.edge_count() as i32);

        gl.bind_vertex_array(Some(&self.vao));
        gl.draw_arrays(GL::TRIANGLE_STRIP, 0, 4);
        gl.bind_vertex_array(None);
    }

    fn delete(&self, gl: &GL) {
        gl.delete_buffer(Some(&self.buffer));
        gl.delete_vertex_array(Some(&self.vao));
        self.program.delete(gl);
    }
}

struct WireframeState {
    core: WireframeCore,
    lifecycle: Lifecycle,
    gl: GL,
    pass: QuadPass,
    surface: RenderSurface,
    container: HtmlElement,
    clear: [f32; 4],
}

impl WireframeState {
    fn resize(&mut self) {
        match self.surface.fit_to(&self.container) {
            Ok(size) => self.gl.viewport(0, 0, size.pixel_width() as i32, size.pixel_height() as i32),
            Err(err) => log::warn!("wireframe: resize failed: {err:?}"),
        }
    }

    fn track(&mut self, client: Point) {
        let rect = self.surface.canvas().get_bounding_client_rect();
        self.core.set_pointer(client.relative_to(Point::new(rect.left(), rect.top())));
    }

    fn frame(&mut self, timestamp: f64) {
        let Some(frame) = self.core.advance(timestamp) else {
            return;
        };
        let size = self.surface.size();
        self.pass.draw(&self.gl, &frame, size.pixel_width(), size.pixel_height(), size.dpr, self.clear);
    }

    fn release(&mut self) {
        self.pass.delete(&self.gl);
        self.surface.canvas().remove();
        self.lifecycle.unmount();
    }
}

/// Mounted wireframe shader surface.
pub struct WireframeEngine {
    state: Rc<RefCell<WireframeState>>,
    frame_loop: FrameLoop,
    listeners: ListenerSet,
    torn_down: bool,
}

impl WireframeEngine {
    /// Mount into `container`; `on_shape` is told the new shape after each click.
    pub fn mount(
        container: &HtmlElement,
        config: WireframeConfig,
        on_shape: impl FnMut(Shape) + 'static,
    ) -> Option<Self> {
        match Self::try_mount(container, config, Box::new(on_shape)) {
            Ok(engine) => Some(engine),
            Err(err) => {
                log::warn!("wireframe: not mounted: {err}");
                None
            }
        }
    }

    fn try_mount(
        container: &HtmlElement,
        config: WireframeConfig,
        on_shape: Box<dyn FnMut(Shape)>,
    ) -> Result<Self, MountError> {
        let window = web_sys::window().ok_or(MountError::NoDocument)?;
        let document = window.document().ok_or(MountError::NoDocument)?;
        let canvas = document
            .create_element("canvas")?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| MountError::Js("created element is not a canvas".into()))?;
        canvas.style().set_property("display", "block")?;

        let mut surface = RenderSurface::new(canvas, config.max_dpr);
        let gl = surface.context_webgl2()?;
        let size = surface.fit_to(container)?;
        let pass = QuadPass::new(&gl)?;
        container.append_child(surface.canvas())?;
        gl.viewport(0, 0, size.pixel_width() as i32, size.pixel_height() as i32);

        let mut lifecycle = Lifecycle::new();
        lifecycle.mount(false);
        let state = Rc::new(RefCell::new(WireframeState {
            core: WireframeCore::new(&config),
            lifecycle,
            gl,
            pass,
            surface,
            container: container.clone(),
            clear: config.clear,
        }));

        let mut listeners = ListenerSet::new();
        if let Err(err) = register_input(&mut listeners, &state, container, &window, on_shape) {
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

        log::debug!("wireframe: mounted with {:?}", config.initial_shape);
        Ok(Self { state, frame_loop, listeners, torn_down: false })
    }

    /// Feed the viewport-intersection signal. Hidden surfaces skip GL work.
    pub fn set_visible(&self, visible: bool) {
        self.state.borrow_mut().core.set_visible(visible);
    }

    #[must_use]
    pub fn shape(&self) -> Shape {
        self.state.borrow().core.shape()
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

impl Teardown for WireframeEngine {
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

impl Drop for WireframeEngine {
    fn drop(&mut self) {
        self.teardown();
    }
}

fn register_input(
    listeners: &mut ListenerSet,
    state: &Rc<RefCell<WireframeState>>,
    container: &HtmlElement,
    window: &web_sys::Window,
    mut on_shape: Box<dyn FnMut(Shape)>,
) -> Result<(), wasm_bindgen::JsValue> {
    let s = Rc::clone(state);
    listeners.add(container, "click", move |_: MouseEvent| {
        let shape = s.borrow_mut().core.click();
        on_shape(shape);
    })?;
    let s = Rc::clone(state);
    listeners.add(window, "mousemove", move |event: MouseEvent| s.borrow_mut().track(mouse_point(&event)))?;
    let s = Rc::clone(state);
    listeners.add(window, "touchmove", move |event: TouchEvent| {
        if let Some(at) = touch_point(&event) {
            s.borrow_mut().track(at);
        }
    })?;
    let s = Rc::clone(state);
    listeners.add(window, "resize", move |_: web_sys::Event| s.borrow_mut().resize())?;
    Ok(())
}
