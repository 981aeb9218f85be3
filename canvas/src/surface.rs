//! Render surface sizing: CSS box, capped device-pixel ratio, backing store.
//!
//! Every engine draws into a canvas sized to its container in device pixels.
//! The ratio is capped per engine to bound fill-rate on high-DPI displays.

#[cfg(test)]
#[path = "surface_test.rs"]
mod surface_test;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, Element, HtmlCanvasElement, WebGl2RenderingContext};

/// Failure to obtain a drawing context.
#[derive(Debug, thiserror::Error)]
pub enum SurfaceError {
    #[error("{0} context is not available")]
    Unavailable(&'static str),
    #[error("context request failed: {0}")]
    Js(String),
}

impl From<JsValue> for SurfaceError {
    fn from(value: JsValue) -> Self {
        Self::Js(format!("{value:?}"))
    }
}

/// Clamp a reported device-pixel ratio into `(0, max]`, treating garbage as 1.
#[must_use]
pub fn capped_dpr(raw: f64, max: f64) -> f64 {
    if !raw.is_finite() || raw <= 0.0 {
        return 1.0;
    }
    raw.min(max)
}

/// A surface's layout box and the pixel ratio applied to it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceSize {
    pub css_width: f64,
    pub css_height: f64,
    pub dpr: f64,
}

impl Default for SurfaceSize {
    fn default() -> Self {
        Self { css_width: 0.0, css_height: 0.0, dpr: 1.0 }
    }
}

impl SurfaceSize {
    #[must_use]
    pub fn new(css_width: f64, css_height: f64, raw_dpr: f64, max_dpr: f64) -> Self {
        Self {
            css_width: css_width.max(0.0),
            css_height: css_height.max(0.0),
            dpr: capped_dpr(raw_dpr, max_dpr),
        }
    }

    /// Backing-store width in device pixels (at least 1).
    #[must_use]
    pub fn pixel_width(&self) -> u32 {
        (self.css_width * self.dpr).round().max(1.0) as u32
    }

    /// Backing-store height in device pixels (at least 1).
    #[must_use]
    pub fn pixel_height(&self) -> u32 {
        (self.css_height * self.dpr).round().max(1.0) as u32
    }

    /// Width over height, falling back to 1 for a degenerate box.
    #[must_use]
    pub fn aspect(&self) -> f64 {
        if self.css_height <= 0.0 { 1.0 } else { self.css_width / self.css_height }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.css_width <= 0.0 || self.css_height <= 0.0
    }
}

/// An owned canvas plus its current size.
pub struct RenderSurface {
    canvas: HtmlCanvasElement,
    size: SurfaceSize,
    max_dpr: f64,
}

impl RenderSurface {
    #[must_use]
    pub fn new(canvas: HtmlCanvasElement, max_dpr: f64) -> Self {
        Self { canvas, size: SurfaceSize::default(), max_dpr }
    }

    #[must_use]
    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    #[must_use]
    pub fn size(&self) -> SurfaceSize {
        self.size
    }

    /// Resize the backing store to `css_width × css_height` at the current device ratio.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the canvas style cannot be updated.
    pub fn resize(&mut self, css_width: f64, css_height: f64) -> Result<SurfaceSize, JsValue> {
        let size = SurfaceSize::new(css_width, css_height, device_pixel_ratio(), self.max_dpr);
        self.canvas.set_width(size.pixel_width());
        self.canvas.set_height(size.pixel_height());
        let style = self.canvas.style();
        style.set_property("width", &format!("{css_width}px"))?;
        style.set_property("height", &format!("{css_height}px"))?;
        self.size = size;
        Ok(size)
    }

    /// Resize to the layout box of `container`.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the canvas style cannot be updated.
    pub fn fit_to(&mut self, container: &Element) -> Result<SurfaceSize, JsValue> {
        let (w, h) = element_size(container);
        self.resize(w, h)
    }

    /// Acquire the 2D raster context.
    ///
    /// # Errors
    ///
    /// Returns [`SurfaceError::Unavailable`] when the browser refuses a 2D context.
    pub fn context_2d(&self) -> Result<CanvasRenderingContext2d, SurfaceError> {
        self.canvas
            .get_context("2d")?
            .ok_or(SurfaceError::Unavailable("2d"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| SurfaceError::Unavailable("2d"))
    }

    /// Acquire a WebGL2 context with antialiasing and a transparent backbuffer.
    ///
    /// # Errors
    ///
    /// Returns [`SurfaceError::Unavailable`] when WebGL2 is unsupported or exhausted.
    pub fn context_webgl2(&self) -> Result<WebGl2RenderingContext, SurfaceError> {
        let options = js_sys::Object::new();
        js_sys::Reflect::set(&options, &"antialias".into(), &JsValue::TRUE)?;
        js_sys::Reflect::set(&options, &"alpha".into(), &JsValue::TRUE)?;
        js_sys::Reflect::set(&options, &"premultipliedAlpha".into(), &JsValue::FALSE)?;
        self.canvas
            .get_context_with_context_options("webgl2", &options)?
            .ok_or(SurfaceError::Unavailable("webgl2"))?
            .dyn_into::<WebGl2RenderingContext>()
            .map_err(|_| SurfaceError::Unavailable("webgl2"))
    }
}

/// The window's reported device-pixel ratio, or 1 outside a browser window.
#[must_use]
pub fn device_pixel_ratio() -> f64 {
    web_sys::window().map_or(1.0, |w| w.device_pixel_ratio())
}

/// Inner window size in CSS pixels.
#[must_use]
pub fn window_size() -> (f64, f64) {
    let Some(window) = web_sys::window() else {
        return (0.0, 0.0);
    };
    let w = window.inner_width().map_or(0.0, |v| v.as_f64().unwrap_or(0.0));
    let h = window.inner_height().map_or(0.0, |v| v.as_f64().unwrap_or(0.0));
    (w, h)
}

/// Layout size of an element in CSS pixels.
#[must_use]
pub fn element_size(element: &Element) -> (f64, f64) {
    (f64::from(element.client_width()), f64::from(element.client_height()))
}

/// Whether the compact (mobile) variant should be used for a viewport.
#[must_use]
pub fn is_compact(has_touch: bool, viewport_width: f64) -> bool {
    has_touch || viewport_width < crate::consts::MOBILE_BREAKPOINT_PX
}

/// Detect touch support and viewport width, then classify.
#[must_use]
pub fn detect_compact() -> bool {
    let Some(window) = web_sys::window() else {
        return false;
    };
    let has_touch = js_sys::Reflect::has(&window, &"ontouchstart".into()).unwrap_or(false);
    is_compact(has_touch, window_size().0)
}
