//! Composition root: mounts the three widgets once per page.
use std::rc::Rc;

use once_cell::unsync::OnceCell;
use storefront_core::StorefrontConfig;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element};

use crate::category_dropdown::CategoryDropdown;
use crate::config::load_config;
use crate::dom;
use crate::lightbox::Lightbox;
use crate::selection_tracker::SelectionTracker;
use crate::storage::WebSessionStorage;

/// Page-lifetime widget instances. Each widget mounts independently, so one
/// failing leaves the others working.
pub struct Storefront {
    pub config: StorefrontConfig,
    pub tracker: Option<Rc<SelectionTracker<WebSessionStorage>>>,
    pub lightbox: Option<Lightbox>,
    pub dropdown: Option<CategoryDropdown>,
}

thread_local! {
    static STOREFRONT: OnceCell<Storefront> = const { OnceCell::new() };
}

fn report(widget: &str, err: &JsValue) {
    log::warn!("{widget} not mounted: {}", dom::js_error_message(err));
}

impl Storefront {
    /// Mount every widget against `scope` using `config`.
    #[must_use]
    pub fn mount(document: &Document, scope: &Element, config: StorefrontConfig) -> Self {
        let tracker = Rc::new(SelectionTracker::new(
            document.clone(),
            scope.clone(),
            config.selection.clone(),
            WebSessionStorage,
        ));
        let tracker = match Rc::clone(&tracker).mount() {
            Ok(()) => Some(tracker),
            Err(err) => {
                report("selection tracker", &err);
                None
            }
        };

        let lightbox = Lightbox::create(document, config.lightbox.clone())
            .and_then(|lightbox| lightbox.attach_images(scope).map(|_| lightbox));
        let lightbox = match lightbox {
            Ok(lightbox) => Some(lightbox),
            Err(err) => {
                report("lightbox", &err);
                None
            }
        };

        let dropdown = CategoryDropdown::new(scope, config.dropdown.clone());
        let dropdown = match dropdown.mount(document, scope) {
            Ok(_) => Some(dropdown),
            Err(err) => {
                report("category dropdown", &err);
                None
            }
        };

        Self {
            config,
            tracker,
            lightbox,
            dropdown,
        }
    }
}

fn mount_page() {
    let Some(document) = dom::document() else {
        return;
    };
    let Some(scope) = document.document_element() else {
        return;
    };
    STOREFRONT.with(|cell| {
        if cell.get().is_some() {
            log::debug!("storefront already mounted");
            return;
        }
        let config = load_config(&document);
        let _ = cell.set(Storefront::mount(&document, &scope, config));
    });
}

/// Mount once the server-rendered DOM is parsed.
///
/// # Errors
/// Returns an error if the `DOMContentLoaded` listener cannot be registered.
pub fn boot() -> Result<(), JsValue> {
    let Some(document) = dom::document() else {
        return Err(JsValue::from_str("document unavailable"));
    };
    if document.ready_state() == "loading" {
        dom::listen(&document, "DOMContentLoaded", |_| mount_page())?;
    } else {
        mount_page();
    }
    Ok(())
}
