#![cfg(target_arch = "wasm32")]

use storefront_core::LightboxConfig;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{Element, HtmlElement, HtmlImageElement, KeyboardEvent, KeyboardEventInit};

use storefront_web::dom;
use storefront_web::lightbox::Lightbox;

wasm_bindgen_test::wasm_bindgen_test_configure!(run_in_browser);

fn fixture(tag: &str) -> Element {
    let doc = dom::document().expect("document");
    if let Some(old) = doc.get_element_by_id(tag) {
        old.remove();
    }
    let root = doc.create_element("div").expect("create fixture root");
    root.set_id(tag);
    root.set_inner_html(
        r#"<img class="product-detail-image" id="full" src="/media/thumb/x.png" data-full="/media/full/x.png" alt="Widget">
           <img class="product-detail-image" id="plain" src="/media/thumb/y.png">
           <img class="product-detail-image" id="ordered" src="/media/thumb/z.png" tabindex="3">"#,
    );
    doc.body()
        .expect("document body")
        .append_child(&root)
        .expect("append fixture");
    root
}

fn mount(tag: &str) -> (Lightbox, Element) {
    let doc = dom::document().expect("document");
    let root = fixture(tag);
    let lightbox = Lightbox::create(&doc, LightboxConfig::default()).expect("create lightbox");
    let wired = lightbox.attach_images(&root).expect("attach images");
    assert_eq!(wired, 3);
    (lightbox, root)
}

fn image(root: &Element, id: &str) -> HtmlImageElement {
    root.query_selector(&format!("#{id}"))
        .expect("query image")
        .expect("image exists")
        .dyn_into()
        .expect("img element")
}

fn key(target: &web_sys::EventTarget, value: &str) -> bool {
    let init = KeyboardEventInit::new();
    init.set_key(value);
    init.set_bubbles(true);
    init.set_cancelable(true);
    let event = KeyboardEvent::new_with_keyboard_event_init_dict("keydown", &init).unwrap();
    target.dispatch_event(&event).unwrap()
}

fn shown_image(lightbox: &Lightbox) -> Option<Element> {
    lightbox.content().query_selector("img").ok().flatten()
}

#[wasm_bindgen_test]
fn overlay_is_an_accessible_dialog_in_body() {
    let (lightbox, _root) = mount("lb-structure");
    let overlay = lightbox.overlay();
    assert_eq!(overlay.get_attribute("role").as_deref(), Some("dialog"));
    assert_eq!(overlay.get_attribute("aria-modal").as_deref(), Some("true"));
    assert_eq!(
        lightbox.close_button().get_attribute("aria-label").as_deref(),
        Some("Close image")
    );
    let body = dom::document().unwrap().body().unwrap();
    let node: &web_sys::Node = overlay;
    assert!(body.contains(Some(node)));
    assert!(!lightbox.is_open());
}

#[wasm_bindgen_test]
fn click_opens_full_resolution_image_and_escape_closes() {
    let (lightbox, root) = mount("lb-open");
    image(&root, "full").click();

    assert!(lightbox.is_open());
    assert!(lightbox.overlay().class_list().contains("open"));
    let shown = shown_image(&lightbox).expect("image shown");
    assert_eq!(shown.get_attribute("src").as_deref(), Some("/media/full/x.png"));
    assert_eq!(shown.get_attribute("alt").as_deref(), Some("Widget"));

    let active = dom::document().unwrap().active_element();
    let close: &Element = lightbox.close_button();
    assert_eq!(active.as_ref(), Some(close));

    key(&dom::document().unwrap(), "Escape");
    assert!(!lightbox.is_open());
    assert!(!lightbox.overlay().class_list().contains("open"));
    assert_eq!(lightbox.content().inner_html(), "");
}

#[wasm_bindgen_test]
fn thumbnail_source_and_empty_alt_without_full_attribute() {
    let (lightbox, root) = mount("lb-plain");
    let thumb = image(&root, "plain");
    thumb.click();
    let shown = shown_image(&lightbox).expect("image shown");
    assert_eq!(shown.get_attribute("src"), Some(thumb.src()));
    assert_eq!(shown.get_attribute("alt").as_deref(), Some(""));
    lightbox.close();
}

#[wasm_bindgen_test]
fn backdrop_and_close_button_dismiss_but_content_does_not() {
    let (lightbox, root) = mount("lb-dismiss");
    image(&root, "full").click();
    lightbox.content().click();
    assert!(lightbox.is_open(), "clicks inside the content keep it open");

    lightbox.overlay().click();
    assert!(!lightbox.is_open());

    image(&root, "full").click();
    lightbox.close_button().click();
    assert!(!lightbox.is_open());
    assert!(shown_image(&lightbox).is_none());
}

#[wasm_bindgen_test]
fn images_are_keyboard_operable() {
    let (lightbox, root) = mount("lb-keyboard");
    assert_eq!(image(&root, "full").get_attribute("tabindex").as_deref(), Some("0"));
    assert_eq!(image(&root, "ordered").get_attribute("tabindex").as_deref(), Some("3"));

    let thumb = image(&root, "plain");
    let not_cancelled = key(&thumb, " ");
    assert!(!not_cancelled, "Space default must be suppressed");
    assert!(lightbox.is_open());

    key(&dom::document().unwrap(), "ArrowRight");
    assert!(lightbox.is_open(), "arrow keys do not navigate or close");
    lightbox.close();

    key(&image(&root, "full"), "Enter");
    assert!(lightbox.is_open());
    lightbox.close();
}

#[wasm_bindgen_test]
fn reopening_replaces_previous_image() {
    let (lightbox, _root) = mount("lb-replace");
    lightbox.open("/a.png", Some("A"));
    lightbox.open("/b.png", None);
    let imgs = lightbox.content().query_selector_all("img").unwrap();
    assert_eq!(imgs.length(), 1);
    let shown = shown_image(&lightbox).unwrap();
    assert_eq!(shown.get_attribute("src").as_deref(), Some("/b.png"));
    let html: &HtmlElement = lightbox.content();
    assert_eq!(html.child_element_count(), 1);
    lightbox.close();
}
