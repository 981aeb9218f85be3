//! Browser mount/teardown tests. Run with `wasm-pack test --headless --chrome canvas`.
#![cfg(target_arch = "wasm32")]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use canvas::field::{FieldConfig, ParticleFieldEngine};
use canvas::globe::{GlobeConfig, GlobeEngine, GlobeStatus};
use canvas::lifecycle::{InitGuard, Teardown};
use canvas::static_field::{StaticFieldConfig, StaticFieldEngine};
use canvas::wireframe::{WireframeConfig, WireframeEngine};
use canvas::woven::{WovenConfig, WovenEngine};
use gloo_timers::future::TimeoutFuture;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{HtmlCanvasElement, HtmlElement};

wasm_bindgen_test_configure!(run_in_browser);

fn container() -> HtmlElement {
    let document = web_sys::window().and_then(|w| w.document()).unwrap();
    let div = document.create_element("div").unwrap().dyn_into::<HtmlElement>().unwrap();
    div.style().set_property("width", "320px").unwrap();
    div.style().set_property("height", "240px").unwrap();
    div.style().set_property("position", "relative").unwrap();
    document.body().unwrap().append_child(&div).unwrap();
    div
}

#[wasm_bindgen_test]
async fn static_field_stops_on_teardown() {
    let host = container();
    let mut engine = StaticFieldEngine::mount(&host, StaticFieldConfig { seed: Some(1), ..Default::default() }).unwrap();
    assert!(engine.listener_count() > 0);
    assert_eq!(host.child_element_count(), 1);

    // Backing store in CSS pixels: the ratio cap is 1.
    let canvas = host.first_element_child().unwrap().dyn_into::<HtmlCanvasElement>().unwrap();
    let inner_width = web_sys::window().unwrap().inner_width().unwrap().as_f64().unwrap();
    assert!(canvas.width() > 0);
    assert!(f64::from(canvas.width()) <= inner_width.round());
    assert!(canvas.style().get_property_value("width").unwrap().ends_with("px"));

    TimeoutFuture::new(100).await;
    assert!(engine.frames() > 0);

    engine.teardown();
    let frozen = engine.frames();
    assert_eq!(engine.listener_count(), 0);
    assert_eq!(host.child_element_count(), 0);
    TimeoutFuture::new(100).await;
    assert_eq!(engine.frames(), frozen);

    engine.teardown();
    assert_eq!(engine.frames(), frozen);
}

/// Nothing listens here, so the request is refused without touching the network.
const UNREACHABLE: &str = "http://127.0.0.1:9/land.json";

fn offline_globe() -> GlobeConfig {
    GlobeConfig { width: 300.0, height: 200.0, data_url: UNREACHABLE, ..GlobeConfig::default() }
}

#[wasm_bindgen_test]
async fn globe_stops_on_teardown() {
    let host = container();
    let statuses = Rc::new(Cell::new(0));
    let seen = Rc::clone(&statuses);
    let mut engine = GlobeEngine::mount(&host, offline_globe(), move |_| seen.set(seen.get() + 1)).unwrap();
    assert!(engine.listener_count() > 0);

    // Torn down before the request can settle.
    engine.teardown();
    let frozen = engine.frames();
    assert_eq!(engine.listener_count(), 0);
    assert_eq!(host.child_element_count(), 0);

    TimeoutFuture::new(300).await;
    assert_eq!(engine.frames(), frozen);
    assert_eq!(statuses.get(), 0);
}

#[wasm_bindgen_test]
async fn globe_fetch_failure_is_reported_once() {
    let host = container();
    let statuses = Rc::new(RefCell::new(Vec::new()));
    let seen = Rc::clone(&statuses);
    let engine = GlobeEngine::mount(&host, offline_globe(), move |s| seen.borrow_mut().push(s)).unwrap();

    for _ in 0..50 {
        if !statuses.borrow().is_empty() {
            break;
        }
        TimeoutFuture::new(20).await;
    }
    TimeoutFuture::new(100).await;

    let reported = statuses.borrow().clone();
    assert_eq!(reported.len(), 1);
    assert!(matches!(reported[0], GlobeStatus::Failed(_)));
    assert!(matches!(engine.status(), GlobeStatus::Failed(_)));

    // The error overlay replaces the globe.
    let canvas = host.first_element_child().unwrap().dyn_into::<HtmlElement>().unwrap();
    assert_eq!(canvas.style().get_property_value("display").unwrap(), "none");
}

#[wasm_bindgen_test]
async fn webgl_engines_release_everything() {
    let host = container();

    // WebGL2 may be missing in a headless runner; mount then yields None.
    if let Some(mut engine) = ParticleFieldEngine::mount(&host, FieldConfig::default(), || {}) {
        TimeoutFuture::new(50).await;
        engine.teardown();
        let frozen = engine.frames();
        assert_eq!(engine.listener_count(), 0);
        TimeoutFuture::new(100).await;
        assert_eq!(engine.frames(), frozen);
    }
    if let Some(mut engine) = WovenEngine::mount(&host, WovenConfig { particle_count: 500, seed: Some(3), ..Default::default() }) {
        TimeoutFuture::new(50).await;
        engine.teardown();
        let frozen = engine.frames();
        assert_eq!(engine.listener_count(), 0);
        TimeoutFuture::new(100).await;
        assert_eq!(engine.frames(), frozen);
    }
    if let Some(mut engine) = WireframeEngine::mount(&host, WireframeConfig::default(), |_| {}) {
        engine.set_visible(true);
        TimeoutFuture::new(50).await;
        engine.teardown();
        let frozen = engine.frames();
        assert_eq!(engine.listener_count(), 0);
        TimeoutFuture::new(100).await;
        assert_eq!(engine.frames(), frozen);
    }
    assert_eq!(host.child_element_count(), 0);
}

#[wasm_bindgen_test]
fn init_guard_mounts_once_per_instance() {
    let host = container();
    let mut guard = InitGuard::new();
    let config = StaticFieldConfig { seed: Some(5), ..Default::default() };
    assert!(guard.init(|| StaticFieldEngine::mount(&host, config)));
    assert!(!guard.init(|| StaticFieldEngine::mount(&host, config)));
    assert_eq!(host.child_element_count(), 1);

    // A second container gets its own guard and its own engine.
    let other = container();
    let mut other_guard = InitGuard::new();
    assert!(other_guard.init(|| StaticFieldEngine::mount(&other, config)));
    assert_eq!(other.child_element_count(), 1);

    assert!(guard.release());
    assert_eq!(host.child_element_count(), 0);
    assert_eq!(other.child_element_count(), 1);
    drop(other_guard);
    assert_eq!(other.child_element_count(), 0);
}
