//! Accessible single-image lightbox for product photos.
//!
//! One overlay is built per page and reused: each open replaces its image,
//! each close empties it so the full-size picture is not kept off-screen.
use std::cell::RefCell;
use std::rc::{Rc, Weak};

use storefront_core::lightbox::key_action;
use storefront_core::{Key, LightboxConfig, LightboxImage, LightboxKeyAction, LightboxState};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Event, HtmlElement, HtmlImageElement};

use crate::{a11y, dom};

struct LightboxInner {
    document: Document,
    config: LightboxConfig,
    overlay: HtmlElement,
    content: HtmlElement,
    close_button: HtmlElement,
    state: RefCell<LightboxState>,
    key_listener: Closure<dyn FnMut(Event)>,
}

#[derive(Clone)]
pub struct Lightbox {
    inner: Rc<LightboxInner>,
}

fn create_html(document: &Document, tag: &str, class: &str) -> Result<HtmlElement, JsValue> {
    let element = document.create_element(tag)?;
    element.set_class_name(class);
    element.dyn_into::<HtmlElement>().map_err(JsValue::from)
}

impl Lightbox {
    /// Build the overlay and append it to `<body>`.
    ///
    /// # Errors
    /// Returns an error if the document has no body or the overlay cannot be built.
    pub fn create(document: &Document, config: LightboxConfig) -> Result<Self, JsValue> {
        let body = document
            .body()
            .ok_or_else(|| JsValue::from_str("document has no body"))?;

        let overlay = create_html(document, "div", &config.overlay_class)?;
        a11y::mark_modal_dialog(&overlay);

        let close_button = create_html(document, "button", &config.close_class)?;
        close_button.set_attribute("type", "button")?;
        close_button.set_attribute("aria-label", &config.close_label)?;
        close_button.set_text_content(Some("\u{00d7}"));

        let content = create_html(document, "div", &config.content_class)?;
        content.set_attribute("tabindex", "0")?;

        overlay.append_child(&close_button)?;
        overlay.append_child(&content)?;
        body.append_child(&overlay)?;

        let inner = Rc::new_cyclic(|weak: &Weak<LightboxInner>| {
            let weak = weak.clone();
            let key_listener = Closure::<dyn FnMut(Event)>::wrap(Box::new(move |event: Event| {
                let Some(inner) = weak.upgrade() else {
                    return;
                };
                let key = dom::event_key(&event).map_or(Key::Other, |k| Key::from_key_value(&k));
                if key_action(key) == LightboxKeyAction::Close {
                    Self { inner }.close();
                }
            }));
            LightboxInner {
                document: document.clone(),
                config,
                overlay,
                content,
                close_button,
                state: RefCell::new(LightboxState::Closed),
                key_listener,
            }
        });

        let lightbox = Self { inner };
        lightbox.attach_dismissal()?;
        Ok(lightbox)
    }

    fn attach_dismissal(&self) -> Result<(), JsValue> {
        let backdrop = self.clone();
        let overlay_el: Element = self.inner.overlay.clone().unchecked_into();
        dom::listen(&self.inner.overlay, "click", move |event| {
            if dom::event_element(&event).is_some_and(|target| target == overlay_el) {
                backdrop.close();
            }
        })?;

        let button = self.clone();
        dom::listen(&self.inner.close_button, "click", move |_| button.close())?;
        Ok(())
    }

    #[must_use]
    pub fn overlay(&self) -> &HtmlElement {
        &self.inner.overlay
    }

    #[must_use]
    pub fn content(&self) -> &HtmlElement {
        &self.inner.content
    }

    #[must_use]
    pub fn close_button(&self) -> &HtmlElement {
        &self.inner.close_button
    }

    #[must_use]
    pub fn state(&self) -> LightboxState {
        self.inner.state.borrow().clone()
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.inner.state.borrow().is_open()
    }

    /// Show `source_url` enlarged. `alt_text` defaults to empty.
    pub fn open(&self, source_url: &str, alt_text: Option<&str>) {
        self.show(LightboxImage::new(source_url, alt_text));
    }

    pub fn show(&self, image: LightboxImage) {
        let inner = &self.inner;
        inner.content.set_inner_html("");
        match inner.document.create_element("img") {
            Ok(img) => {
                let _ = img.set_attribute("src", &image.src);
                let _ = img.set_attribute("alt", &image.alt);
                let _ = inner.content.append_child(&img);
            }
            Err(err) => log::warn!("lightbox image not created: {}", dom::js_error_message(&err)),
        }
        let _ = inner.overlay.class_list().add_1(&inner.config.open_class);
        let was_open = inner.state.borrow().is_open();
        inner.state.borrow_mut().open(image);
        a11y::focus(&inner.close_button);
        if !was_open {
            let _ = inner.document.add_event_listener_with_callback(
                "keydown",
                inner.key_listener.as_ref().unchecked_ref(),
            );
        }
    }

    pub fn close(&self) {
        let inner = &self.inner;
        let _ = inner.overlay.class_list().remove_1(&inner.config.open_class);
        inner.content.set_inner_html("");
        inner.state.borrow_mut().close();
        let _ = inner.document.remove_event_listener_with_callback(
            "keydown",
            inner.key_listener.as_ref().unchecked_ref(),
        );
    }

    /// Make every product image in `scope` open the lightbox by click or
    /// Enter/Space. Returns the number of images wired.
    ///
    /// # Errors
    /// Returns an error if a listener cannot be registered.
    pub fn attach_images(&self, scope: &Element) -> Result<usize, JsValue> {
        let images: Vec<HtmlImageElement> = dom::query_all(scope, &self.inner.config.image_selector);
        for img in &images {
            let _ = img.style().set_property("will-change", "transform");
            a11y::make_keyboard_operable(img);

            let lightbox = self.clone();
            let clicked = img.clone();
            dom::listen(img, "click", move |_| lightbox.open_thumbnail(&clicked))?;

            let lightbox = self.clone();
            let focused = img.clone();
            dom::listen(img, "keydown", move |event| {
                let key = dom::event_key(&event).map_or(Key::Other, |k| Key::from_key_value(&k));
                if key.is_activation() {
                    event.prevent_default();
                    lightbox.open_thumbnail(&focused);
                }
            })?;
        }
        Ok(images.len())
    }

    /// Open on a thumbnail, preferring its full-resolution attribute.
    pub fn open_thumbnail(&self, img: &HtmlImageElement) {
        let full = img.get_attribute(&self.inner.config.full_attribute);
        let alt = img.get_attribute("alt");
        self.show(LightboxImage::from_thumbnail(
            full.as_deref(),
            &img.src(),
            alt.as_deref(),
        ));
    }
}
