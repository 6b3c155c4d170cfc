#![cfg(target_arch = "wasm32")]
//! Interactive panoramic museum viewer.
//!
//! The host page loads this module, which wires the enter/exit controls and
//! owns the session slot. All heavy resources (GPU, markers, listeners) are
//! allocated per session behind the explicit enter gesture and released on
//! exit — see [`session`].

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

mod constants;
pub mod core;
mod dom;
mod events;
mod frame;
mod listeners;
mod narration;
mod overlay;
mod render;
mod session;

use crate::constants::*;
use crate::core::Hotspot;

// Hotspot configuration is authored externally and bundled with the page.
static HOTSPOT_CONFIG: &str = include_str!("../assets/hotspots.json");

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("museum-web starting");

    if let Err(e) = init() {
        log::error!("init error: {:?}", e);
    }
    Ok(())
}

fn init() -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;

    // Configuration is validated exactly once, before anything renders
    let hotspots: Rc<[Hotspot]> = crate::core::parse_hotspots(HOTSPOT_CONFIG)?.into();
    log::info!("[config] {} hotspots loaded", hotspots.len());

    let slot: session::SessionSlot = Rc::new(RefCell::new(None));
    // guards the async span of activation against repeated enter gestures
    let entering = Rc::new(Cell::new(false));

    // The enter gesture gates every allocation; re-enter shares the path
    for btn_id in [ENTER_BTN_ID, REENTER_BTN_ID] {
        let slot_enter = slot.clone();
        let hotspots_enter = hotspots.clone();
        let entering_enter = entering.clone();
        dom::add_click_listener(&document, btn_id, move || {
            enter(
                slot_enter.clone(),
                hotspots_enter.clone(),
                entering_enter.clone(),
            );
        });
    }

    // Exit releases everything and restores the enter overlay
    let slot_exit = slot.clone();
    dom::add_click_listener(&document, EXIT_BTN_ID, move || {
        session::deactivate(&slot_exit);
        if let Some(d) = dom::window_document() {
            overlay::show_enter(&d);
        }
    });

    Ok(())
}

fn enter(slot: session::SessionSlot, hotspots: Rc<[Hotspot]>, entering: Rc<Cell<bool>>) {
    if entering.replace(true) {
        log::warn!("[gesture] enter already in progress; ignoring extra click");
        return;
    }
    spawn_local(async move {
        if let Some(d) = dom::window_document() {
            overlay::hide_enter(&d);
            overlay::hide_lost(&d);
        }
        log::info!("[gesture] entering the experience");
        if let Err(e) = session::activate(&slot, hotspots).await {
            log::error!("[session] activation failed: {:?}", e);
            // safe even after a partial activation
            session::deactivate(&slot);
            if let Some(d) = dom::window_document() {
                overlay::show_lost(&d);
            }
        }
        entering.set(false);
    });
}
