//! The viewer session: every GPU, DOM and listener resource for one
//! activation, created by [`activate`] and fully released by [`deactivate`].
//!
//! One session per viewer instance. Activating while a session is live is a
//! defensive rejection; deactivating without one is a no-op. Repeated
//! activate/deactivate cycles must leave no growing residue of listeners,
//! markers or GPU objects.

use crate::constants::*;
use crate::core::{ActiveSelection, Hotspot, OrientationState};
use crate::dom;
use crate::events::pointer::{wire_pointer_handlers, PointerWiring};
use crate::frame::{FrameContext, MarkerSync, RafLoop};
use crate::listeners::ListenerBag;
use crate::narration::Narrator;
use crate::overlay;
use crate::render::GpuState;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

/// The host page's handle to the (at most one) live session.
pub type SessionSlot = Rc<RefCell<Option<ViewerSession>>>;

pub struct ViewerSession {
    canvas: web::HtmlCanvasElement,
    ctx: Rc<RefCell<FrameContext>>,
    raf: RafLoop,
    bag: ListenerBag,
    pointer: PointerWiring,
    narrator: Narrator,
    selection: Rc<RefCell<ActiveSelection>>,
}

/// Build the whole experience inside the mount element and start the frame
/// loop. Rejected (with a warning) while another session is live.
pub async fn activate(slot: &SessionSlot, hotspots: Rc<[Hotspot]>) -> anyhow::Result<()> {
    if slot.borrow().is_some() {
        log::warn!("[session] activate ignored; a session is already live");
        return Ok(());
    }

    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;
    let mount = dom::html_element_by_id(&document, MOUNT_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", MOUNT_ID))?;
    let markers_layer = dom::html_element_by_id(&document, MARKERS_LAYER_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", MARKERS_LAYER_ID))?;

    // The render surface is allocated only now, behind the enter gesture
    let canvas: web::HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(|e| anyhow::anyhow!("{:?}", e))?
        .dyn_into()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    mount
        .append_child(&canvas)
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    dom::sync_canvas_backing_size(&canvas);

    let orientation = Rc::new(RefCell::new(OrientationState::default()));
    let selection = Rc::new(RefCell::new(ActiveSelection::default()));
    let narrator = Narrator::new();
    let mut bag = ListenerBag::new();

    // keep backing store (and with it camera aspect) in step with the viewport
    {
        let canvas_resize = canvas.clone();
        bag.attach(&window.clone().into(), "resize", move |_| {
            dom::sync_canvas_backing_size(&canvas_resize);
        });
    }

    let pointer = PointerWiring {
        canvas: canvas.clone(),
        orientation: orientation.clone(),
        drag_bag: Rc::new(RefCell::new(ListenerBag::new())),
        drag_done: Rc::new(Cell::new(false)),
    };
    wire_pointer_handlers(&pointer, &mut bag);

    // One DOM marker per hotspot; clicking selects and opens the panel.
    let mut markers = Vec::with_capacity(hotspots.len());
    for (i, hotspot) in hotspots.iter().enumerate() {
        let Some(el) = dom::create_marker_element(&document, hotspot) else {
            log::warn!("[session] could not build marker for '{}'", hotspot.id);
            continue;
        };
        _ = markers_layer.append_child(&el);
        let selection_click = selection.clone();
        let narrator_click = narrator.clone();
        let document_click = document.clone();
        let hotspot_click = hotspot.clone();
        bag.attach(&el.clone().into(), "click", move |_| {
            // a new selection supersedes any narration in flight
            narrator_click.cancel();
            selection_click.borrow_mut().select(i);
            overlay::open_panel(&document_click, &hotspot_click);
        });
        markers.push(MarkerSync {
            hotspot_index: i,
            el,
            visible: false,
        });
    }

    // Panel controls: narration is an explicit user action.
    if let Some(speak_btn) = document.get_element_by_id(SPEAK_BTN_ID) {
        let selection_speak = selection.clone();
        let narrator_speak = narrator.clone();
        let hotspots_speak = hotspots.clone();
        bag.attach(&speak_btn.into(), "click", move |_| {
            if let Some(i) = selection_speak.borrow().selected() {
                if let Some(hotspot) = hotspots_speak.get(i) {
                    narrator_speak.request(hotspot);
                }
            }
        });
    }
    if let Some(close_btn) = document.get_element_by_id(CLOSE_PANEL_ID) {
        let selection_close = selection.clone();
        let narrator_close = narrator.clone();
        let document_close = document.clone();
        bag.attach(&close_btn.into(), "click", move |_| {
            narrator_close.cancel();
            selection_close.borrow_mut().close();
            overlay::close_panel(&document_close);
        });
    }

    // GPU setup; a missing adapter degrades to overlay-only operation
    let mut gpu = match GpuState::new(&canvas, hotspots.len()).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("[render] WebGPU init error: {:?}", e);
            None
        }
    };
    // Panorama texture is best-effort: failures keep the plain backdrop
    if let Some(gpu) = &mut gpu {
        match fetch_rgba_image(PANORAMA_TEXTURE_URL).await {
            Ok((rgba, w, h)) => gpu.install_panorama(&rgba, w, h),
            Err(e) => log::warn!("[render] panorama texture unavailable: {:?}", e),
        }
    }

    let ctx = Rc::new(RefCell::new(FrameContext::new(
        hotspots.clone(),
        orientation,
        selection.clone(),
        pointer.clone(),
        canvas.clone(),
        gpu,
        markers,
    )));

    // Fatal render errors tear the session down and ask the user to re-enter
    let slot_fatal = slot.clone();
    let on_fatal: Rc<dyn Fn()> = Rc::new(move || {
        deactivate(&slot_fatal);
        if let Some(document) = dom::window_document() {
            overlay::show_lost(&document);
        }
    });
    let raf = RafLoop::start(ctx.clone(), on_fatal);

    log::info!("[session] activated with {} hotspots", hotspots.len());
    *slot.borrow_mut() = Some(ViewerSession {
        canvas,
        ctx,
        raf,
        bag,
        pointer,
        narrator,
        selection,
    });
    Ok(())
}

/// Tear down the live session, if any. Safe to call repeatedly.
pub fn deactivate(slot: &SessionSlot) {
    let Some(session) = slot.borrow_mut().take() else {
        return;
    };
    session.teardown();
}

impl ViewerSession {
    fn teardown(mut self) {
        // the frame loop stops before anything it touches is disposed
        self.raf.cancel();
        self.narrator.cancel();
        self.bag.detach_all();
        self.pointer.drag_bag.borrow_mut().detach_all();

        {
            let mut ctx = self.ctx.borrow_mut();
            for marker in ctx.markers.drain(..) {
                marker.el.remove();
            }
            ctx.gpu = None;
        }
        self.canvas.remove();
        self.selection.borrow_mut().close();
        if let Some(document) = dom::window_document() {
            overlay::close_panel(&document);
        }
        log::info!("[session] deactivated");
    }
}

async fn fetch_rgba_image(url: &str) -> anyhow::Result<(Vec<u8>, u32, u32)> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let resp: web::Response = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|e| anyhow::anyhow!("fetch error: {:?}", e))?
        .dyn_into()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    if !resp.ok() {
        anyhow::bail!("texture request returned {}", resp.status());
    }
    let buf = JsFuture::from(
        resp.array_buffer()
            .map_err(|e| anyhow::anyhow!("{:?}", e))?,
    )
    .await
    .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    let bytes = js_sys::Uint8Array::new(&buf).to_vec();
    let img = image::load_from_memory(&bytes)?.to_rgba8();
    let (w, h) = img.dimensions();
    Ok((img.into_raw(), w, h))
}
