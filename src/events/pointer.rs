//! Pointer wiring: raw platform pointer events → orientation model.
//!
//! `pointerdown` on the canvas begins a drag and installs document-level
//! move/up/cancel listeners so the drag keeps tracking outside the canvas
//! bounds. The drag-scoped listeners live in their own bag; the handlers
//! only flag completion and the frame tick purges the bag, because a
//! listener cannot drop its own closure while it is executing.

use crate::dom;
use crate::listeners::ListenerBag;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::core::OrientationState;

#[derive(Clone)]
pub struct PointerWiring {
    pub canvas: web::HtmlCanvasElement,
    pub orientation: Rc<RefCell<OrientationState>>,
    /// Listeners installed at drag start, removed when the drag ends.
    pub drag_bag: Rc<RefCell<ListenerBag>>,
    /// Set by pointerup/cancel; the frame tick purges `drag_bag` on it.
    pub drag_done: Rc<Cell<bool>>,
}

/// Install the canvas-level pointerdown handler into the session bag.
pub fn wire_pointer_handlers(w: &PointerWiring, bag: &mut ListenerBag) {
    let w = w.clone();
    bag.attach(&w.canvas.clone().into(), "pointerdown", move |ev| {
        let ev: web::PointerEvent = ev.unchecked_into();
        w.orientation
            .borrow_mut()
            .begin_drag(ev.client_x() as f32, ev.client_y() as f32);
        install_drag_listeners(&w);
        ev.prevent_default();
    });
}

/// Purge drag-scoped listeners once their drag has finished. Called from
/// the frame tick, never from inside one of the listeners themselves.
pub fn purge_finished_drag(w: &PointerWiring) {
    if w.drag_done.take() {
        w.drag_bag.borrow_mut().detach_all();
    }
}

fn install_drag_listeners(w: &PointerWiring) {
    let Some(document) = dom::window_document() else {
        return;
    };
    let target: web::EventTarget = document.into();
    let mut bag = w.drag_bag.borrow_mut();
    // a pointerdown mid-drag restarts the drag; replace the old listeners
    bag.detach_all();
    w.drag_done.set(false);

    {
        let orientation = w.orientation.clone();
        bag.attach(&target, "pointermove", move |ev| {
            let ev: web::PointerEvent = ev.unchecked_into();
            orientation
                .borrow_mut()
                .update_drag(ev.client_x() as f32, ev.client_y() as f32);
        });
    }
    for event in ["pointerup", "pointercancel"] {
        let orientation = w.orientation.clone();
        let drag_done = w.drag_done.clone();
        bag.attach(&target, event, move |_ev| {
            orientation.borrow_mut().end_drag();
            drag_done.set(true);
        });
    }
}
