//! Shared numeric constants for the canvas crate.
//!
//! These values are aesthetic calibration. They are kept at their tuned
//! literals; none of them is derived from another.

// ── Surface ─────────────────────────────────────────────────────

/// Device-pixel-ratio cap for the particle field.
pub const FIELD_MAX_DPR: f64 = 1.5;

/// Device-pixel-ratio cap for the woven light and wireframe engines.
pub const SHADER_MAX_DPR: f64 = 2.0;

/// Device-pixel-ratio cap for the ambient field, which draws in CSS pixels.
pub const STATIC_MAX_DPR: f64 = 1.0;

/// Viewport width below which the compact (mobile) variant is used.
pub const MOBILE_BREAKPOINT_PX: f64 = 768.0;

// ── Orbit ───────────────────────────────────────────────────────

/// Fraction of the remaining distance covered by the displayed rotation each frame.
pub const ORBIT_DAMPING: f32 = 0.05;

/// Drag sensitivity for mouse input, radians per CSS pixel.
pub const MOUSE_DRAG_SENSITIVITY: f32 = 0.005;

/// Drag sensitivity for touch input, radians per CSS pixel.
pub const TOUCH_DRAG_SENSITIVITY: f32 = 0.008;

// ── Particle field ──────────────────────────────────────────────

pub const FIELD_KNOT_RADIUS: f32 = 1.3;
pub const FIELD_KNOT_TUBE: f32 = 0.45;
pub const FIELD_KNOT_TUBULAR_SEGMENTS: usize = 80;
pub const FIELD_KNOT_RADIAL_SEGMENTS: usize = 12;

pub const FIELD_COUNT_MOBILE: usize = 1500;
pub const FIELD_COUNT_DESKTOP: usize = 2500;
pub const FIELD_POINT_SIZE_MOBILE: f32 = 0.045;
pub const FIELD_POINT_SIZE_DESKTOP: f32 = 0.038;
pub const FIELD_OPACITY: f32 = 0.9;
pub const FIELD_TINT: [f32; 3] = [0.6, 0.2, 0.9];

/// Idle spin rate about the Y axis, radians per second.
pub const FIELD_IDLE_SPIN: f32 = 0.03;

/// Frames rendered invisibly before the surface is revealed (~250 ms at 60 fps).
pub const WARMUP_FRAMES: u32 = 15;

// ── Woven light ─────────────────────────────────────────────────

pub const WOVEN_KNOT_RADIUS: f32 = 1.5;
pub const WOVEN_KNOT_TUBE: f32 = 0.5;
pub const WOVEN_KNOT_TUBULAR_SEGMENTS: usize = 200;
pub const WOVEN_KNOT_RADIAL_SEGMENTS: usize = 32;
pub const WOVEN_COUNT: usize = 50_000;
pub const WOVEN_POINT_SIZE: f32 = 0.02;

/// Scale from normalized device coordinates into particle space.
pub const WOVEN_POINTER_SPAN: f32 = 3.0;
pub const WOVEN_INTERACTION_RADIUS: f32 = 1.5;
pub const WOVEN_REPULSION: f32 = 0.01;
pub const WOVEN_RETURN: f32 = 0.001;
pub const WOVEN_DAMPING: f32 = 0.95;
pub const WOVEN_IDLE_SPIN: f32 = 0.05;
pub const WOVEN_SATURATION: f32 = 0.8;
pub const WOVEN_LIGHTNESS_DARK: f32 = 0.5;
pub const WOVEN_LIGHTNESS_LIGHT: f32 = 0.7;

// ── Wireframe shader ────────────────────────────────────────────

/// Pointer smoothing rate, per second.
pub const WIREFRAME_POINTER_DAMPING: f64 = 8.0;

/// Morph clock rate relative to elapsed seconds.
pub const MORPH_RATE: f32 = 0.5;

/// Background clear color, #0a0a0b.
pub const WIREFRAME_CLEAR: [f32; 4] = [0.039, 0.039, 0.043, 1.0];

/// Upper bound on vertices uploaded for any palette shape.
pub const MAX_SHAPE_VERTICES: usize = 12;

/// Upper bound on edges uploaded for any palette shape.
pub const MAX_SHAPE_EDGES: usize = 32;

// ── Ambient static field ────────────────────────────────────────

pub const STATIC_COUNT: usize = 400;
pub const MAGNETIC_RADIUS: f64 = 250.0;
pub const VORTEX_STRENGTH: f64 = 0.06;
pub const VORTEX_GAIN: f64 = 8.0;
pub const PULL_STRENGTH: f64 = 0.1;
pub const STATIC_DAMPING: f64 = 0.96;
pub const STATIC_JITTER: f64 = 0.03;
pub const GLOW_GAIN: f64 = 0.6;
pub const GLOW_DECAY: f64 = 0.9;

/// Glow level above which a particle gets the shadow pass.
pub const GLOW_THRESHOLD: f64 = 0.4;
pub const WRAP_MARGIN: f64 = 20.0;
pub const ACCENT_PROBABILITY: f64 = 0.35;
pub const MAX_MOTE_ALPHA: f64 = 0.85;
pub const TRAIL_FILL: &str = "rgba(10, 10, 11, 0.12)";
pub const ACCENT_RGB: &str = "168, 85, 247";
pub const CHARCOAL_RGB: &str = "70, 70, 80";

/// Pointer position before any input arrives; far enough off-surface to exert no force.
pub const POINTER_PARKED: f64 = -1000.0;

// ── Globe ───────────────────────────────────────────────────────

pub const LAND_DATA_URL: &str =
    "https://raw.githubusercontent.com/martynafford/natural-earth-geojson/refs/heads/master/110m/physical/ne_110m_land.json";

/// Base radius is `min(width, height) / GLOBE_RADIUS_DIVISOR`.
pub const GLOBE_RADIUS_DIVISOR: f64 = 2.2;
pub const GLOBE_MIN_ZOOM: f64 = 0.5;
pub const GLOBE_MAX_ZOOM: f64 = 2.5;
pub const GLOBE_ZOOM_OUT: f64 = 0.95;
pub const GLOBE_ZOOM_IN: f64 = 1.05;

/// Longitude advance per tick while auto-rotating, degrees.
pub const GLOBE_AUTO_ROTATE: f64 = 0.15;

/// Degrees of rotation per CSS pixel of drag.
pub const GLOBE_DRAG_SENSITIVITY: f64 = 0.5;

/// Delay before auto-rotation resumes after a drag ends, milliseconds.
pub const GLOBE_RESUME_GRACE_MS: u32 = 10;
pub const GLOBE_INITIAL_ROTATION: [f64; 3] = [-4.5, -50.0, 0.0];

/// Margins subtracted from the window when sizing the globe surface.
pub const GLOBE_WINDOW_MARGIN_X: f64 = 40.0;
pub const GLOBE_WINDOW_MARGIN_Y: f64 = 100.0;

pub const DOT_SPACING: f64 = 14.0;

/// Converts dot spacing into a geographic step in degrees.
pub const DOT_STEP_PER_SPACING: f64 = 0.08;

/// Graticule line spacing, degrees.
pub const GRATICULE_STEP: usize = 10;

/// Sampling step along graticule lines, degrees.
pub const GRATICULE_SAMPLE: f64 = 2.5;

// Globe palette and marker geometry, in CSS pixels before zoom scaling.
pub const GLOBE_OCEAN: &str = "#0a0a0b";
pub const GLOBE_RIM: &str = "#3f3f46";
pub const GLOBE_GRATICULE: &str = "#27272a";
pub const GLOBE_LAND_OUTLINE: &str = "#52525b";
pub const GLOBE_DOT: &str = "#3f3f46";
pub const GLOBE_DOT_RADIUS: f64 = 1.2;
pub const MARKER_COLOR: &str = "#a855f7";
pub const MARKER_LABEL_COLOR: &str = "#e9d5ff";
/// `(radius, alpha)` for the concentric marker rings, outermost first.
pub const MARKER_RINGS: [(f64, f64); 3] = [(20.0, 0.15), (12.0, 0.3), (6.0, 0.5)];
pub const MARKER_CORE_RADIUS: f64 = 4.0;
pub const MARKER_GLOW_BLUR: f64 = 20.0;
pub const MARKER_LABEL_OFFSET: f64 = 28.0;
pub const MARKER_UNDERLINE_OFFSET: f64 = 24.0;
pub const MARKER_FONT_SIZE: f64 = 14.0;
pub const MARKER_LABEL_BLUR: f64 = 15.0;
pub const MARKER_FONT_FAMILY: &str = "Inter, sans-serif";
/// The globe renders at the full device-pixel ratio.
pub const GLOBE_MAX_DPR: f64 = f64::INFINITY;
