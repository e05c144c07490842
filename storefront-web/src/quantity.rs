//! Submit quantity edits when the shopper finishes typing.
use std::rc::Rc;

use storefront_core::{Key, QuantityEdit};
use wasm_bindgen::prelude::*;
use web_sys::{Element, HtmlInputElement};

use crate::dom;

/// Data attribute recording the value a quantity field was rendered with.
pub const ORIGINAL_VALUE_ATTRIBUTE: &str = "data-orig-value";

/// Wire blur and Enter submission on every matching quantity input.
///
/// # Errors
/// Returns an error if a listener cannot be registered.
pub fn attach(scope: &Element, selector: &str) -> Result<usize, JsValue> {
    let inputs: Vec<HtmlInputElement> = dom::query_all(scope, selector);
    for input in &inputs {
        let edit = Rc::new(QuantityEdit::new(input.value()));
        let _ = input.set_attribute(ORIGINAL_VALUE_ATTRIBUTE, edit.original());

        let blur_input = input.clone();
        let blur_edit = Rc::clone(&edit);
        dom::listen(input, "blur", move |_| {
            if blur_edit.should_submit_on_blur(&blur_input.value()) {
                submit_owner(&blur_input);
            }
        })?;

        let key_input = input.clone();
        dom::listen(input, "keydown", move |event| {
            let is_enter = dom::event_key(&event).is_some_and(|k| Key::from_key_value(&k) == Key::Enter);
            if is_enter {
                event.prevent_default();
                submit_owner(&key_input);
            }
        })?;
    }
    Ok(inputs.len())
}

/// Submit the form that owns `input`, preferring `requestSubmit` so submit
/// listeners and validation run. Returns whether a submission was started.
pub fn submit_owner(input: &HtmlInputElement) -> bool {
    let Some(form) = input.form() else {
        return false;
    };
    match form.request_submit() {
        Ok(()) => true,
        Err(err) => {
            log::debug!("requestSubmit failed, falling back: {}", dom::js_error_message(&err));
            form.submit().is_ok()
        }
    }
}
