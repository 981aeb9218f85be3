//! # folio
//!
//! Leptos (CSR) shell for the portfolio page. Each section hosts one of the
//! `canvas` engines: the component supplies a sized container, mounts the
//! engine once per component instance, and tears it down on unmount.

pub mod app;
pub mod components;
pub mod util;

/// WASM entry point: install logging and the panic hook, then mount the app.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let level = if cfg!(debug_assertions) { log::Level::Debug } else { log::Level::Info };
    if let Err(err) = console_log::init_with_level(level) {
        web_sys::console::warn_1(&format!("logger already installed: {err}").into());
    }
    log::info!("folio: starting");
    leptos::mount::mount_to_body(app::App);
}
