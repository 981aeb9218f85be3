//! `requestAnimationFrame` loop with synchronous cancellation.
//!
//! The callback closure holds only a weak reference to the loop state, so
//! dropping the [`FrameLoop`] frees everything. After [`FrameLoop::stop`] the
//! pending frame is cancelled and no callback body runs again, even if the
//! browser had already queued one.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};

struct LoopInner {
    running: Cell<bool>,
    frames: Cell<u64>,
    handle: Cell<Option<i32>>,
    callback: RefCell<Option<Closure<dyn FnMut(f64)>>>,
}

impl LoopInner {
    fn schedule(&self) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        let callback = self.callback.borrow();
        let Some(callback) = callback.as_ref() else {
            return Err("frame callback missing".into());
        };
        let handle = window.request_animation_frame(callback.as_ref().unchecked_ref())?;
        self.handle.set(Some(handle));
        Ok(())
    }
}

/// A running per-frame loop.
pub struct FrameLoop {
    inner: Rc<LoopInner>,
}

impl FrameLoop {
    /// Start calling `tick` once per display refresh with the frame timestamp (ms).
    ///
    /// # Errors
    ///
    /// Returns `Err` if there is no window or the first frame cannot be requested.
    pub fn start(mut tick: impl FnMut(f64) + 'static) -> Result<Self, JsValue> {
        let inner = Rc::new(LoopInner {
            running: Cell::new(true),
            frames: Cell::new(0),
            handle: Cell::new(None),
            callback: RefCell::new(None),
        });

        let weak = Rc::downgrade(&inner);
        let callback = Closure::wrap(Box::new(move |timestamp: f64| {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            inner.handle.set(None);
            if !inner.running.get() {
                return;
            }
            inner.frames.set(inner.frames.get() + 1);
            tick(timestamp);
            if inner.running.get() {
                if let Err(err) = inner.schedule() {
                    log::warn!("frame loop: reschedule failed: {err:?}");
                    inner.running.set(false);
                }
            }
        }) as Box<dyn FnMut(f64)>);
        *inner.callback.borrow_mut() = Some(callback);

        inner.schedule()?;
        Ok(Self { inner })
    }

    /// Cancel the pending frame and stop rescheduling. Idempotent.
    pub fn stop(&self) {
        if !self.inner.running.replace(false) {
            return;
        }
        if let Some(handle) = self.inner.handle.take() {
            if let Some(window) = web_sys::window() {
                if let Err(err) = window.cancel_animation_frame(handle) {
                    log::warn!("frame loop: cancel failed: {err:?}");
                }
            }
        }
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.inner.running.get()
    }

    /// Number of frame callbacks that ran their body.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.inner.frames.get()
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.stop();
    }
}
