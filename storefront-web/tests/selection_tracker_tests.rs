#![cfg(target_arch = "wasm32")]

use std::cell::Cell;
use std::rc::Rc;

use gloo::timers::future::TimeoutFuture;
use storefront_core::{MemoryStorage, SelectAllHook, SelectionConfig, SelectionStorage};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_test::*;
use web_sys::{CustomEvent, Element, Event, HtmlElement, HtmlInputElement, KeyboardEvent, KeyboardEventInit};

use storefront_web::dom;
use storefront_web::selection_tracker::SelectionTracker;
use storefront_web::storage::WebSessionStorage;

wasm_bindgen_test::wasm_bindgen_test_configure!(run_in_browser);

fn fixture(tag: &str) -> Element {
    let doc = dom::document().expect("document");
    if let Some(old) = doc.get_element_by_id(tag) {
        old.remove();
    }
    let root = doc.create_element("div").expect("create fixture root");
    root.set_id(tag);
    root.set_inner_html(&format!(
        r#"<div class="container">
            <input type="checkbox" name="selected_items" form="{tag}-checkout" value="1" data-line-total="10.50">
            <input type="checkbox" name="selected_items" form="{tag}-checkout" value="2" data-line-total="$1,234.56">
            <div class="card-body">
                <input type="checkbox" name="selected_items" form="{tag}-checkout" value="3">
                <div class="text-end small">Line: $2,000.00</div>
            </div>
            <input type="checkbox" name="selected_items" form="{tag}-checkout" value="4" data-line-total="n/a">
            <span id="{tag}-subtotal">?</span>
            <span id="{tag}-subtotal-aria">?</span>
            <div id="{tag}-set-1" class="d-none"></div>
            <div id="{tag}-set-2"></div>
            <button type="button" id="{tag}-select-all" onclick="void 'selected_items'">Select all</button>
            <button type="button" id="{tag}-other" onclick="void 0">Other</button>
            <form id="{tag}-remove" action="/cart/remove"><input name="quantity" value="2"></form>
        </div>
        <form id="{tag}-checkout" action="/checkout"></form>"#
    ));
    doc.body()
        .expect("document body")
        .append_child(&root)
        .expect("append fixture");
    root
}

fn config(tag: &str) -> SelectionConfig {
    SelectionConfig {
        input_selector: format!(r#"input[name="selected_items"][form="{tag}-checkout"]"#),
        subtotal_id: format!("{tag}-subtotal"),
        subtotal_aria_id: format!("{tag}-subtotal-aria"),
        recommendation_prefix: format!("{tag}-set-"),
        checkout_form_id: format!("{tag}-checkout"),
        storage_key: format!("{tag}-selected"),
        global_updater: String::new(),
        ..SelectionConfig::default()
    }
}

fn mount(
    tag: &str,
    cfg: SelectionConfig,
    storage: Rc<MemoryStorage>,
) -> Rc<SelectionTracker<Rc<MemoryStorage>>> {
    let doc = dom::document().expect("document");
    let tracker = Rc::new(SelectionTracker::new(doc, fixture(tag), cfg, storage));
    Rc::clone(&tracker).mount().expect("mount tracker");
    tracker
}

fn input(tag: &str, value: &str) -> HtmlInputElement {
    dom::document()
        .expect("document")
        .query_selector(&format!(r#"#{tag} input[name="selected_items"][value="{value}"]"#))
        .expect("query input")
        .expect("input exists")
        .dyn_into()
        .expect("checkbox input")
}

fn text(id: &str) -> String {
    dom::document()
        .expect("document")
        .get_element_by_id(id)
        .and_then(|el| el.text_content())
        .unwrap_or_default()
}

fn hidden(id: &str) -> bool {
    dom::document()
        .expect("document")
        .get_element_by_id(id)
        .expect("panel exists")
        .class_list()
        .contains("d-none")
}

fn click_box(tag: &str, value: &str) {
    let cb = input(tag, value);
    cb.set_checked(!cb.checked());
    cb.dispatch_event(&Event::new("change").unwrap()).unwrap();
}

fn submit(id: &str) {
    dom::document()
        .expect("document")
        .get_element_by_id(id)
        .expect("form exists")
        .dispatch_event(&Event::new("submit").unwrap())
        .unwrap();
}

async fn sleep(ms: u32) {
    TimeoutFuture::new(ms).await;
}

#[wasm_bindgen_test]
fn initial_pass_renders_zero_and_hides_panels() {
    let tag = "sel-initial";
    mount(tag, config(tag), Rc::new(MemoryStorage::new()));
    assert_eq!(text(&format!("{tag}-subtotal")), "0.00");
    assert_eq!(text(&format!("{tag}-subtotal-aria")), "$0.00");
    assert!(hidden(&format!("{tag}-set-1")));
    assert!(hidden(&format!("{tag}-set-2")));
}

#[wasm_bindgen_test]
fn change_updates_subtotal_panels_and_storage() {
    let tag = "sel-change";
    let storage = Rc::new(MemoryStorage::new());
    mount(tag, config(tag), Rc::clone(&storage));

    click_box(tag, "1");
    click_box(tag, "2");
    assert_eq!(text(&format!("{tag}-subtotal")), "1245.06");
    assert_eq!(text(&format!("{tag}-subtotal-aria")), "$1245.06");
    assert!(!hidden(&format!("{tag}-set-1")));
    assert!(!hidden(&format!("{tag}-set-2")));
    assert_eq!(storage.raw(&format!("{tag}-selected")).as_deref(), Some(r#"["1","2"]"#));

    click_box(tag, "2");
    assert_eq!(text(&format!("{tag}-subtotal")), "10.50");
    assert!(hidden(&format!("{tag}-set-2")));
    assert_eq!(storage.raw(&format!("{tag}-selected")).as_deref(), Some(r#"["1"]"#));
}

#[wasm_bindgen_test]
fn missing_attribute_falls_back_to_displayed_total() {
    let tag = "sel-backfill";
    mount(tag, config(tag), Rc::new(MemoryStorage::new()));
    assert_eq!(
        input(tag, "3").get_attribute("data-line-total").as_deref(),
        Some("2000.00")
    );
    click_box(tag, "3");
    click_box(tag, "4");
    assert_eq!(text(&format!("{tag}-subtotal")), "2000.00");
}

#[wasm_bindgen_test]
fn stored_selection_is_restored_on_mount() {
    let tag = "sel-restore";
    let storage = Rc::new(MemoryStorage::new());
    storage.insert_raw(&format!("{tag}-selected"), r#"["2","99"]"#);
    mount(tag, config(tag), storage);
    assert!(input(tag, "2").checked());
    assert!(!input(tag, "1").checked());
    assert_eq!(text(&format!("{tag}-subtotal")), "1234.56");
    assert!(!hidden(&format!("{tag}-set-2")));
}

#[wasm_bindgen_test]
fn malformed_or_unavailable_storage_restores_nothing() {
    let tag = "sel-malformed";
    let storage = Rc::new(MemoryStorage::new());
    storage.insert_raw(&format!("{tag}-selected"), "{oops");
    mount(tag, config(tag), Rc::clone(&storage));
    assert_eq!(text(&format!("{tag}-subtotal")), "0.00");

    let tag = "sel-unavailable";
    let storage = Rc::new(MemoryStorage::new());
    storage.set_unavailable(true);
    mount(tag, config(tag), Rc::clone(&storage));
    click_box(tag, "1");
    assert_eq!(text(&format!("{tag}-subtotal")), "10.50");
    assert_eq!(storage.raw(&format!("{tag}-selected")), None);
}

#[wasm_bindgen_test]
fn checkout_submit_clears_and_other_forms_persist() {
    let tag = "sel-forms";
    let storage = Rc::new(MemoryStorage::new());
    mount(tag, config(tag), Rc::clone(&storage));
    let key = format!("{tag}-selected");

    // checked without a change event, as a server-side re-render would leave it
    input(tag, "2").set_checked(true);
    submit(&format!("{tag}-remove"));
    assert_eq!(storage.raw(&key).as_deref(), Some(r#"["2"]"#));

    submit(&format!("{tag}-checkout"));
    assert_eq!(storage.raw(&key), None);
}

#[wasm_bindgen_test]
async fn select_all_controls_refresh_after_delay() {
    let tag = "sel-select-all";
    let storage = Rc::new(MemoryStorage::new());
    mount(tag, config(tag), Rc::clone(&storage));

    input(tag, "1").set_checked(true);
    input(tag, "2").set_checked(true);
    let doc = dom::document().expect("document");
    let other: HtmlElement = doc
        .get_element_by_id(&format!("{tag}-other"))
        .expect("other button")
        .dyn_into()
        .expect("html element");
    other.click();
    sleep(50).await;
    assert_eq!(text(&format!("{tag}-subtotal")), "0.00");

    let select_all: HtmlElement = doc
        .get_element_by_id(&format!("{tag}-select-all"))
        .expect("select-all button")
        .dyn_into()
        .expect("html element");
    select_all.click();
    sleep(50).await;
    assert_eq!(text(&format!("{tag}-subtotal")), "1245.06");
    assert_eq!(
        storage.raw(&format!("{tag}-selected")).as_deref(),
        Some(r#"["1","2"]"#)
    );
}

#[wasm_bindgen_test]
fn explicit_event_hook_refreshes_immediately() {
    let tag = "sel-event";
    let mut cfg = config(tag);
    cfg.select_all_hook = SelectAllHook::Event;
    cfg.selection_event = format!("{tag}:changed");
    mount(tag, cfg, Rc::new(MemoryStorage::new()));

    input(tag, "1").set_checked(true);
    let event = CustomEvent::new(&format!("{tag}:changed")).unwrap();
    dom::document().expect("document").dispatch_event(&event).unwrap();
    assert_eq!(text(&format!("{tag}-subtotal")), "10.50");
}

#[wasm_bindgen_test]
fn global_updater_is_exposed_on_window() {
    let tag = "sel-global";
    let mut cfg = config(tag);
    cfg.global_updater = String::from("sfTestUpdateSubtotal");
    mount(tag, cfg, Rc::new(MemoryStorage::new()));

    input(tag, "2").set_checked(true);
    let win = dom::window().expect("window");
    let updater: js_sys::Function = js_sys::Reflect::get(&win, &JsValue::from_str("sfTestUpdateSubtotal"))
        .expect("reflect get")
        .dyn_into()
        .expect("function");
    updater.call0(&JsValue::NULL).expect("call updater");
    assert_eq!(text(&format!("{tag}-subtotal")), "1234.56");
}

#[wasm_bindgen_test]
fn quantity_inputs_submit_on_blur_change_and_enter() {
    let tag = "sel-quantity";
    mount(tag, config(tag), Rc::new(MemoryStorage::new()));
    let doc = dom::document().expect("document");
    let form = doc
        .get_element_by_id(&format!("{tag}-remove"))
        .expect("quantity form");
    let submissions = Rc::new(Cell::new(0));
    let counter = Rc::clone(&submissions);
    dom::listen(&form, "submit", move |event| {
        event.prevent_default();
        counter.set(counter.get() + 1);
    })
    .expect("listen submit");

    let qty: HtmlInputElement = doc
        .query_selector(&format!(r#"#{tag}-remove input[name="quantity"]"#))
        .unwrap()
        .expect("quantity input")
        .dyn_into()
        .unwrap();
    assert_eq!(qty.get_attribute("data-orig-value").as_deref(), Some("2"));

    qty.dispatch_event(&Event::new("blur").unwrap()).unwrap();
    assert_eq!(submissions.get(), 0, "unchanged value must not submit");

    qty.set_value("3");
    qty.dispatch_event(&Event::new("blur").unwrap()).unwrap();
    assert_eq!(submissions.get(), 1);

    let init = KeyboardEventInit::new();
    init.set_key("Enter");
    init.set_cancelable(true);
    let enter = KeyboardEvent::new_with_keyboard_event_init_dict("keydown", &init).unwrap();
    let not_cancelled = qty.dispatch_event(&enter).unwrap();
    assert!(!not_cancelled, "Enter default must be suppressed");
    assert_eq!(submissions.get(), 2);
}

#[wasm_bindgen_test]
fn session_storage_backend_round_trips() {
    let storage = WebSessionStorage;
    storage.write("sel-session-key", r#"["5"]"#).expect("write");
    assert_eq!(
        storage.read("sel-session-key").expect("read").as_deref(),
        Some(r#"["5"]"#)
    );
    storage.remove("sel-session-key").expect("remove");
    assert_eq!(storage.read("sel-session-key").expect("read"), None);
}
