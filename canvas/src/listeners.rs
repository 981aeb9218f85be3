//! Owned DOM event listeners.
//!
//! Every listener an engine registers goes through a [`ListenerSet`], which
//! keeps the closure alive and removes it from its target on [`ListenerSet::clear`]
//! or drop. Nothing is `forget()`-ed, so remounting never stacks handlers.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{AddEventListenerOptions, Event, EventTarget};

struct Listener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

#[derive(Default)]
pub struct ListenerSet {
    listeners: Vec<Listener>,
}

impl ListenerSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for `event` on `target`. Events that are not an `E` are ignored.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the browser rejects the registration.
    pub fn add<E>(&mut self, target: &EventTarget, event: &'static str, handler: impl FnMut(E) + 'static) -> Result<(), JsValue>
    where
        E: JsCast + 'static,
    {
        let callback = Self::wrap(handler);
        target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
        self.listeners.push(Listener { target: target.clone(), event, callback });
        Ok(())
    }

    /// Like [`ListenerSet::add`], but non-passive so the handler may call `preventDefault`.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the browser rejects the registration.
    pub fn add_active<E>(
        &mut self,
        target: &EventTarget,
        event: &'static str,
        handler: impl FnMut(E) + 'static,
    ) -> Result<(), JsValue>
    where
        E: JsCast + 'static,
    {
        let callback = Self::wrap(handler);
        let options = AddEventListenerOptions::new();
        options.set_passive(false);
        target.add_event_listener_with_callback_and_add_event_listener_options(
            event,
            callback.as_ref().unchecked_ref(),
            &options,
        )?;
        self.listeners.push(Listener { target: target.clone(), event, callback });
        Ok(())
    }

    fn wrap<E>(mut handler: impl FnMut(E) + 'static) -> Closure<dyn FnMut(Event)>
    where
        E: JsCast + 'static,
    {
        Closure::wrap(Box::new(move |event: Event| {
            if let Ok(event) = event.dyn_into::<E>() {
                handler(event);
            }
        }) as Box<dyn FnMut(Event)>)
    }

    /// Number of listeners currently registered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Remove every listener from its target.
    pub fn clear(&mut self) {
        for listener in self.listeners.drain(..) {
            if let Err(err) = listener
                .target
                .remove_event_listener_with_callback(listener.event, listener.callback.as_ref().unchecked_ref())
            {
                log::warn!("listeners: failed to remove {}: {err:?}", listener.event);
            }
        }
    }
}

impl Drop for ListenerSet {
    fn drop(&mut self) {
        self.clear();
    }
}
