//! Per-frame tick and the display-synchronized loop.
//!
//! Within one frame the order is fixed: orientation advance → camera update
//! → render → overlay projection. The session context is threaded into the
//! tick explicitly; the closure captures nothing but the shared handles.

use crate::constants::*;
use crate::core::{project_to_screen, ActiveSelection, Hotspot, OrbitCamera, OrientationState};
use crate::dom;
use crate::events::pointer::{self, PointerWiring};
use crate::render::{GpuState, MarkerInstance};
use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;
use glam::Vec3;

/// One DOM marker kept in lockstep with its 3D anchor.
pub struct MarkerSync {
    pub hotspot_index: usize,
    pub el: web::HtmlElement,
    pub visible: bool,
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    Continue,
    /// Render surface is gone for good; the session must be torn down.
    Fatal,
}

pub struct FrameContext {
    pub hotspots: Rc<[Hotspot]>,
    pub orientation: Rc<RefCell<OrientationState>>,
    pub selection: Rc<RefCell<ActiveSelection>>,
    pub pointer: PointerWiring,
    pub canvas: web::HtmlCanvasElement,
    pub camera: OrbitCamera,
    pub gpu: Option<GpuState>,
    pub markers: Vec<MarkerSync>,
    pub last_instant: Instant,
    surface_retried: bool,
}

impl FrameContext {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        hotspots: Rc<[Hotspot]>,
        orientation: Rc<RefCell<OrientationState>>,
        selection: Rc<RefCell<ActiveSelection>>,
        pointer: PointerWiring,
        canvas: web::HtmlCanvasElement,
        gpu: Option<GpuState>,
        markers: Vec<MarkerSync>,
    ) -> Self {
        let camera = OrbitCamera::new(canvas.width() as f32 / canvas.height().max(1) as f32);
        Self {
            hotspots,
            orientation,
            selection,
            pointer,
            canvas,
            camera,
            gpu,
            markers,
            last_instant: Instant::now(),
            surface_retried: false,
        }
    }

    pub fn frame(&mut self) -> FrameOutcome {
        let now = Instant::now();
        let dt = now - self.last_instant;
        self.last_instant = now;

        // drag listeners whose drag finished last tick
        pointer::purge_finished_drag(&self.pointer);

        // 1. orientation
        self.orientation.borrow_mut().advance_idle(dt);
        let (yaw, pitch) = {
            let o = self.orientation.borrow();
            (o.yaw_deg, o.pitch_deg)
        };

        // 2. camera follows the canvas backing size
        let w = self.canvas.width();
        let h = self.canvas.height();
        self.camera.set_aspect(w as f32 / h.max(1) as f32);
        let view = self.camera.view_matrix(yaw, pitch);
        let view_proj = self.camera.projection_matrix() * view;
        // world-space camera basis for billboarding
        let cam_right = Vec3::new(view.x_axis.x, view.y_axis.x, view.z_axis.x);
        let cam_up = Vec3::new(view.x_axis.y, view.y_axis.y, view.z_axis.y);

        // 3. render
        if let Some(gpu) = &mut self.gpu {
            gpu.resize_if_needed(w, h);
            let selected = self.selection.borrow().selected();
            let instances: Vec<MarkerInstance> = self
                .hotspots
                .iter()
                .enumerate()
                .map(|(i, hs)| MarkerInstance {
                    pos: hs.position.to_array(),
                    scale: MARKER_WORLD_SCALE,
                    color: [MARKER_COLOR[0], MARKER_COLOR[1], MARKER_COLOR[2], 1.0],
                    glow: if selected == Some(i) {
                        MARKER_SELECTED_GLOW
                    } else {
                        0.0
                    },
                })
                .collect();
            match gpu.render(view_proj, cam_right, cam_up, &instances) {
                Ok(()) => self.surface_retried = false,
                Err(wgpu::SurfaceError::Timeout) => {
                    log::warn!("[render] frame acquire timed out; skipping frame");
                }
                Err(wgpu::SurfaceError::Lost) | Err(wgpu::SurfaceError::Outdated) => {
                    if self.surface_retried {
                        log::error!("[render] surface lost twice; session is unrecoverable");
                        return FrameOutcome::Fatal;
                    }
                    log::warn!("[render] surface lost; reconfiguring once");
                    gpu.reconfigure_surface();
                    self.surface_retried = true;
                }
                Err(e) => {
                    log::error!("[render] fatal error: {:?}", e);
                    return FrameOutcome::Fatal;
                }
            }
        }

        // 4. overlay projection, in CSS pixel space
        let (css_w, css_h) = dom::css_size(&self.canvas);
        for marker in &mut self.markers {
            let Some(hotspot) = self.hotspots.get(marker.hotspot_index) else {
                continue;
            };
            match project_to_screen(view_proj, hotspot.position, css_w, css_h) {
                Some(p) => {
                    if !marker.visible {
                        dom::set_marker_visible(&marker.el, true);
                        marker.visible = true;
                    }
                    dom::place_marker(&marker.el, p.x, p.y);
                }
                None => {
                    if marker.visible {
                        dom::set_marker_visible(&marker.el, false);
                        marker.visible = false;
                    }
                }
            }
        }

        FrameOutcome::Continue
    }
}

/// Cancellable requestAnimationFrame loop. Ticks stop scheduling the moment
/// `cancel` runs, so no tick can fire against disposed resources.
pub struct RafLoop {
    raf_id: Rc<Cell<Option<i32>>>,
    _tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
}

impl RafLoop {
    pub fn start(ctx: Rc<RefCell<FrameContext>>, on_fatal: Rc<dyn Fn()>) -> Self {
        let raf_id: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
        let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
        let tick_clone = tick.clone();
        let raf_for_tick = raf_id.clone();
        *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            // a tick is running, so the scheduled id has been consumed
            raf_for_tick.set(None);
            let outcome = ctx.borrow_mut().frame();
            match outcome {
                FrameOutcome::Continue => {
                    if let Some(w) = web::window() {
                        if let Ok(id) = w.request_animation_frame(
                            tick_clone.borrow().as_ref().unwrap().as_ref().unchecked_ref(),
                        ) {
                            raf_for_tick.set(Some(id));
                        }
                    }
                }
                FrameOutcome::Fatal => {
                    // defer teardown; the session may drop this very closure
                    let on_fatal = on_fatal.clone();
                    spawn_local(async move {
                        on_fatal();
                    });
                }
            }
        }) as Box<dyn FnMut()>));
        if let Some(w) = web::window() {
            if let Ok(id) =
                w.request_animation_frame(tick.borrow().as_ref().unwrap().as_ref().unchecked_ref())
            {
                raf_id.set(Some(id));
            }
        }
        Self {
            raf_id,
            _tick: tick,
        }
    }

    /// Stop the loop; any pending frame callback is cancelled.
    pub fn cancel(&self) {
        if let Some(id) = self.raf_id.take() {
            if let Some(w) = web::window() {
                _ = w.cancel_animation_frame(id);
            }
        }
    }
}

impl Drop for RafLoop {
    fn drop(&mut self) {
        self.cancel();
    }
}
