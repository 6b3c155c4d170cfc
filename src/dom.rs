use crate::core::Hotspot;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

#[inline]
pub fn html_element_by_id(document: &web::Document, id: &str) -> Option<web::HtmlElement> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<web::HtmlElement>().ok())
}

/// Page-lifetime click wiring for the enter/exit controls. Session-scoped
/// listeners go through [`crate::listeners::ListenerBag`] instead.
pub fn add_click_listener(document: &web::Document, element_id: &str, mut handler: impl FnMut() + 'static) {
    if let Some(el) = document.get_element_by_id(element_id) {
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
        _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

/// Keep the canvas backing store at CSS size * devicePixelRatio.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio();
        let rect = canvas.get_bounding_client_rect();
        let w_px = (rect.width() * dpr) as u32;
        let h_px = (rect.height() * dpr) as u32;
        canvas.set_width(w_px.max(1));
        canvas.set_height(h_px.max(1));
    }
}

/// CSS-pixel size of the canvas; the coordinate space markers live in.
#[inline]
pub fn css_size(canvas: &web::HtmlCanvasElement) -> (f32, f32) {
    let rect = canvas.get_bounding_client_rect();
    (rect.width().max(1.0) as f32, rect.height().max(1.0) as f32)
}

/// Build the DOM marker for one hotspot. Hidden until the first projection
/// pass decides visibility; click wiring is the session's job.
pub fn create_marker_element(
    document: &web::Document,
    hotspot: &Hotspot,
) -> Option<web::HtmlElement> {
    let el = document
        .create_element("div")
        .ok()?
        .dyn_into::<web::HtmlElement>()
        .ok()?;
    el.set_class_name("artifact-marker");
    _ = el.set_attribute("data-hotspot-id", &hotspot.id);
    if let Some(icon) = &hotspot.icon {
        el.set_inner_html(&format!("<i class=\"{}\"></i>", icon));
    }
    _ = el.style().set_property("display", "none");
    Some(el)
}

#[inline]
pub fn place_marker(el: &web::HtmlElement, x: f32, y: f32) {
    let style = el.style();
    _ = style.set_property("left", &format!("{x:.1}px"));
    _ = style.set_property("top", &format!("{y:.1}px"));
}

#[inline]
pub fn set_marker_visible(el: &web::HtmlElement, visible: bool) {
    _ = el
        .style()
        .set_property("display", if visible { "flex" } else { "none" });
}

#[inline]
pub fn set_text_content(document: &web::Document, id: &str, text: &str) {
    if let Some(el) = document.get_element_by_id(id) {
        el.set_text_content(Some(text));
    }
}
