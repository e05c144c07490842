#![forbid(unsafe_code)]
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

pub mod a11y;
pub mod app;
pub mod category_dropdown;
pub mod config;
pub mod dom;
pub mod lightbox;
pub mod logger;
pub mod quantity;
pub mod selection_tracker;
pub mod storage;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    crate::logger::init(crate::logger::default_level());
    if let Err(err) = crate::app::boot() {
        crate::dom::console_error(&format!(
            "storefront boot failed: {}",
            crate::dom::js_error_message(&err)
        ));
    }
}
