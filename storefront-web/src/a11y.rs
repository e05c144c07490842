// Accessibility helpers

use web_sys::{Element, HtmlElement};

/// Make a non-interactive element reachable with Tab.
///
/// Leaves an existing `tabindex` (including `-1`) untouched.
pub fn make_keyboard_operable(element: &Element) {
    if !element.has_attribute("tabindex") {
        let _ = element.set_attribute("tabindex", "0");
    }
}

/// Mirror a disclosure's state into `aria-expanded` for assistive technology.
pub fn set_expanded(control: &Element, expanded: bool) {
    let _ = control.set_attribute("aria-expanded", if expanded { "true" } else { "false" });
}

/// Mark a container as a modal dialog.
pub fn mark_modal_dialog(element: &Element) {
    let _ = element.set_attribute("role", "dialog");
    let _ = element.set_attribute("aria-modal", "true");
}

/// Move keyboard focus, ignoring elements that refuse it.
pub fn focus(element: &HtmlElement) {
    let _ = element.focus();
}
