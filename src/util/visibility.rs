//! Viewport visibility via `IntersectionObserver`.

#[cfg(test)]
#[path = "visibility_test.rs"]
mod visibility_test;

/// Fraction of the element that must be on screen to count as visible.
pub const VISIBILITY_THRESHOLD: f64 = 0.1;

/// Collapses observer callbacks into visibility changes.
#[derive(Debug, Clone, Copy, Default)]
pub struct VisibilityLatch {
    last: Option<bool>,
}

impl VisibilityLatch {
    /// Record the first entry of an observer batch. Returns the new state if it changed.
    pub fn update(&mut self, entries: impl IntoIterator<Item = bool>) -> Option<bool> {
        let visible = entries.into_iter().next()?;
        if self.last == Some(visible) {
            return None;
        }
        self.last = Some(visible);
        Some(visible)
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.last.unwrap_or(false)
    }
}

#[cfg(feature = "csr")]
pub use observer::VisibilityObserver;

#[cfg(feature = "csr")]
mod observer {
    use std::cell::Cell;

    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::{JsCast, JsValue};
    use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

    use super::{VISIBILITY_THRESHOLD, VisibilityLatch};

    /// Observes one element; disconnects on drop.
    pub struct VisibilityObserver {
        observer: IntersectionObserver,
        _callback: Closure<dyn FnMut(js_sys::Array)>,
    }

    impl VisibilityObserver {
        /// Call `on_change` whenever `target` crosses the visibility threshold.
        ///
        /// # Errors
        ///
        /// Returns `Err` if the browser has no `IntersectionObserver`.
        pub fn observe(target: &Element, mut on_change: impl FnMut(bool) + 'static) -> Result<Self, JsValue> {
            let latch = Cell::new(VisibilityLatch::default());
            let callback = Closure::<dyn FnMut(js_sys::Array)>::new(move |entries: js_sys::Array| {
                let states = entries
                    .iter()
                    .filter_map(|e| e.dyn_ref::<IntersectionObserverEntry>().map(IntersectionObserverEntry::is_intersecting));
                let mut current = latch.get();
                if let Some(visible) = current.update(states) {
                    on_change(visible);
                }
                latch.set(current);
            });
            let options = IntersectionObserverInit::new();
            options.set_threshold(&JsValue::from_f64(VISIBILITY_THRESHOLD));
            let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
            observer.observe(target);
            Ok(Self { observer, _callback: callback })
        }
    }

    impl Drop for VisibilityObserver {
        fn drop(&mut self) {
            self.observer.disconnect();
        }
    }
}
