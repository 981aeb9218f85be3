//! Interactive canvas backgrounds for the portfolio site.
//!
//! Compiled to WebAssembly. Each engine mounts into a host-supplied container
//! element, owns its canvas, context, listeners and frame loop, and releases
//! all of them on [`lifecycle::Teardown::teardown`]. Simulation and view state
//! live in browser-free `*Core` types so they can be tested natively.
//!
//! ## Engines
//!
//! | Module | Engine | Surface |
//! |--------|--------|---------|
//! | [`field`] | Torus-knot particle field with drag orbit and warm-up reveal | WebGL2 |
//! | [`woven`] | 50k-point knot that repels from the pointer | WebGL2 |
//! | [`wireframe`] | Full-screen ray-marched wireframe solids | WebGL2 |
//! | [`static_field`] | Diamond motes swirling around the pointer | 2D |
//! | [`globe`] | Orthographic halftone globe with a marker | 2D |
//!
//! ## Shared plumbing
//!
//! | Module | Role |
//! |--------|------|
//! | [`lifecycle`] | Phase state machine, [`lifecycle::InitGuard`], mount errors |
//! | [`surface`] | Canvas sizing and device-pixel-ratio caps |
//! | [`input`] | Pointer and drag state |
//! | [`orbit`] | Damped drag rotation with idle spin |
//! | [`frame_loop`] | Cancellable `requestAnimationFrame` loop |
//! | [`listeners`] | Owned DOM listeners |
//! | [`knot`], [`particles`] | Torus-knot sampling and particle buffers |
//! | [`gl`], [`camera`], [`points`] | WebGL2 helpers and the point-cloud renderer |
//! | [`shapes`] | Wireframe solids and the morph shape |
//! | [`consts`] | Tuned constants |

pub mod camera;
pub mod consts;
pub mod field;
pub mod frame_loop;
pub mod gl;
pub mod globe;
pub mod input;
pub mod knot;
pub mod lifecycle;
pub mod listeners;
pub mod orbit;
pub mod particles;
pub mod points;
pub mod shapes;
pub mod static_field;
pub mod surface;
pub mod wireframe;
pub mod woven;
