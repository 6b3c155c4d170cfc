//! Scoped DOM event listener registration.
//!
//! Every listener the viewer installs goes through a [`ListenerBag`] so
//! activation and deactivation stay symmetric: `detach_all` removes exactly
//! what was attached, on every exit path. Dropping a bag detaches too, so a
//! failed activation cannot strand listeners.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

struct Binding {
    target: web::EventTarget,
    event: &'static str,
    // keeps the closure alive while the listener is registered
    closure: Closure<dyn FnMut(web::Event)>,
}

#[derive(Default)]
pub struct ListenerBag {
    bindings: Vec<Binding>,
}

impl ListenerBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for `event` on `target` and remember the binding.
    pub fn attach(
        &mut self,
        target: &web::EventTarget,
        event: &'static str,
        handler: impl FnMut(web::Event) + 'static,
    ) {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::Event)>);
        match target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref()) {
            Ok(()) => self.bindings.push(Binding {
                target: target.clone(),
                event,
                closure,
            }),
            Err(e) => log::error!("[listeners] failed to attach '{}': {:?}", event, e),
        }
    }

    /// Remove every listener this bag attached, in attach order.
    pub fn detach_all(&mut self) {
        for b in self.bindings.drain(..) {
            _ = b
                .target
                .remove_event_listener_with_callback(b.event, b.closure.as_ref().unchecked_ref());
        }
    }
}

impl Drop for ListenerBag {
    fn drop(&mut self) {
        self.detach_all();
    }
}
