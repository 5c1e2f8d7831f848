//! Moves keyboard focus to a form control by its DOM id.
use contracts::shared::focus::FieldId;
use gloo_timers::future::TimeoutFuture;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, HtmlInputElement};

/// Focus the control bound to `field`. A missing element is ignored.
pub fn focus_field(field: FieldId) {
    focus_dom_id(&field.dom_id());
}

pub fn focus_dom_id(id: &str) {
    let Some(element) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(id))
    else {
        log::debug!("focus target '{}' not mounted", id);
        return;
    };
    if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
        let _ = input.focus();
        input.select();
    } else if let Some(el) = element.dyn_ref::<HtmlElement>() {
        let _ = el.focus();
    }
}

/// Focus after the next render, for targets created by the same event
/// (new rows, generated lines).
pub fn focus_field_deferred(field: FieldId) {
    spawn_local(async move {
        TimeoutFuture::new(0).await;
        focus_field(field);
    });
}
