use crate::constants::*;
use crate::core::Hotspot;
use web_sys as web;

fn show_el(document: &web::Document, id: &str) {
    if let Some(el) = document.get_element_by_id(id) {
        _ = el.class_list().remove_1("hidden");
        // fallback for environments without CSS classes
        _ = el.set_attribute("style", "");
    }
}

fn hide_el(document: &web::Document, id: &str) {
    if let Some(el) = document.get_element_by_id(id) {
        _ = el.class_list().add_1("hidden");
        // fallback
        _ = el.set_attribute("style", "display:none");
    }
}

#[inline]
pub fn show_enter(document: &web::Document) {
    show_el(document, ENTER_OVERLAY_ID);
}

#[inline]
pub fn hide_enter(document: &web::Document) {
    hide_el(document, ENTER_OVERLAY_ID);
}

/// Fatal-session affordance: "experience unavailable, please re-enter".
#[inline]
pub fn show_lost(document: &web::Document) {
    show_el(document, LOST_OVERLAY_ID);
}

#[inline]
pub fn hide_lost(document: &web::Document) {
    hide_el(document, LOST_OVERLAY_ID);
}

/// Fill and reveal the info panel for the selected hotspot.
pub fn open_panel(document: &web::Document, hotspot: &Hotspot) {
    crate::dom::set_text_content(document, ARTIFACT_TITLE_ID, &hotspot.title);
    crate::dom::set_text_content(document, ARTIFACT_DESC_ID, &hotspot.description);
    if let Some(el) = document.get_element_by_id(INFO_PANEL_ID) {
        _ = el.class_list().add_1("visible");
    }
    set_speak_busy(document, false);
}

pub fn close_panel(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(INFO_PANEL_ID) {
        _ = el.class_list().remove_1("visible");
    }
    set_speak_busy(document, false);
}

/// Reflect a pending/playing narration on the speak button.
pub fn set_speak_busy(document: &web::Document, busy: bool) {
    if let Some(el) = document.get_element_by_id(SPEAK_BTN_ID) {
        let cl = el.class_list();
        if busy {
            _ = cl.add_1("busy");
        } else {
            _ = cl.remove_1("busy");
        }
    }
}
