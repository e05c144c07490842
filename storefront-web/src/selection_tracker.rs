//! Cart line selection: live subtotal, "complete the set" panels and the
//! session-storage mirror that survives reloads and back-navigation.
use std::rc::Rc;

use gloo::timers::callback::Timeout;
use storefront_core::{
    AmountExtractor, CartLine, CartSelection, SelectionConfig, SelectionStorage, SelectionStore,
    SubtotalText, recommendation_panel_id,
};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlFormElement, HtmlInputElement};

use crate::{dom, quantity};

pub struct SelectionTracker<S> {
    document: Document,
    scope: Element,
    config: SelectionConfig,
    store: SelectionStore<S>,
    /// `None` when no pattern can be built for the configured symbol.
    amounts: Option<AmountExtractor>,
}

impl<S: SelectionStorage + 'static> SelectionTracker<S> {
    pub fn new(document: Document, scope: Element, config: SelectionConfig, storage: S) -> Self {
        let store = SelectionStore::new(storage, config.storage_key.clone());
        let amounts = AmountExtractor::for_symbol(&config.currency_symbol)
            .inspect_err(|err| log::warn!("line total fallback disabled: {err}"))
            .ok();
        Self {
            document,
            scope,
            config,
            store,
            amounts,
        }
    }

    #[must_use]
    pub fn config(&self) -> &SelectionConfig {
        &self.config
    }

    #[must_use]
    pub fn store(&self) -> &SelectionStore<S> {
        &self.store
    }

    /// Selection checkboxes in document order.
    #[must_use]
    pub fn inputs(&self) -> Vec<HtmlInputElement> {
        dom::query_all(&self.scope, &self.config.input_selector)
    }

    /// Read the current checkbox state into the core model.
    #[must_use]
    pub fn snapshot(&self) -> CartSelection {
        self.inputs()
            .iter()
            .map(|input| {
                let raw = input.get_attribute(&self.config.line_total_attribute);
                CartLine::from_raw(input.value(), raw.as_deref(), input.checked())
            })
            .collect()
    }

    pub fn recompute_subtotal(&self) {
        let text = SubtotalText::new(self.snapshot().subtotal(), &self.config.currency_symbol);
        if let Some(display) = self.document.get_element_by_id(&self.config.subtotal_id) {
            display.set_text_content(Some(&text.amount));
        }
        if let Some(aria) = self.document.get_element_by_id(&self.config.subtotal_aria_id) {
            aria.set_text_content(Some(&text.accessible));
        }
    }

    pub fn sync_recommendation_visibility(&self) {
        let cart = self.snapshot();
        for (id, visible) in cart.recommendation_visibility() {
            let panel_id = recommendation_panel_id(&self.config.recommendation_prefix, id);
            let Some(panel) = self.document.get_element_by_id(&panel_id) else {
                continue;
            };
            let classes = panel.class_list();
            let _ = if visible {
                classes.remove_1(&self.config.hidden_class)
            } else {
                classes.add_1(&self.config.hidden_class)
            };
        }
    }

    /// Check every input whose value was persisted. Returns how many were restored.
    pub fn restore_selections(&self) -> usize {
        let saved = self.store.load();
        if saved.is_empty() {
            return 0;
        }
        let mut restored = 0;
        for input in self.inputs() {
            if saved.contains(&input.value()) {
                input.set_checked(true);
                restored += 1;
            }
        }
        restored
    }

    pub fn persist_selections(&self) {
        self.store.save(&self.snapshot().checked_ids());
    }

    pub fn clear_selections(&self) {
        self.store.clear();
    }

    /// Recompute, resync and persist: the reaction to any selection change.
    pub fn refresh(&self) {
        self.recompute_subtotal();
        self.sync_recommendation_visibility();
        self.persist_selections();
    }

    /// Fill a missing line-total attribute from the amount displayed on the
    /// line, so later recomputations can read it directly.
    pub fn backfill_line_totals(&self) -> usize {
        let cfg = &self.config;
        let Some(amounts) = &self.amounts else {
            return 0;
        };
        let mut filled = 0;
        for input in self.inputs() {
            let present = input
                .get_attribute(&cfg.line_total_attribute)
                .is_some_and(|v| !v.is_empty());
            if present {
                continue;
            }
            let amount = dom::closest(&input, &cfg.line_container_selector)
                .and_then(|line| dom::query_one::<Element>(&line, &cfg.line_text_selector))
                .and_then(|label| label.text_content())
                .and_then(|text| amounts.extract(&text));
            if let Some(amount) = amount
                && input
                    .set_attribute(&cfg.line_total_attribute, &amount)
                    .is_ok()
            {
                filled += 1;
            }
        }
        filled
    }

    /// Restore persisted picks and wire every trigger.
    ///
    /// # Errors
    /// Returns an error if a listener cannot be registered.
    pub fn mount(self: Rc<Self>) -> Result<(), JsValue> {
        let restored = self.restore_selections();
        let backfilled = self.backfill_line_totals();

        for input in self.inputs() {
            let tracker = Rc::clone(&self);
            dom::listen(&input, "change", move |_| tracker.refresh())?;
        }

        let select_all = if self.config.select_all_hook.sniffs() {
            self.attach_select_all_controls()?
        } else {
            0
        };
        if self.config.select_all_hook.listens() && !self.config.selection_event.is_empty() {
            let tracker = Rc::clone(&self);
            dom::listen(&self.document, &self.config.selection_event, move |_| {
                tracker.refresh();
            })?;
        }

        self.attach_form_hooks()?;
        let quantities = quantity::attach(&self.scope, &self.config.quantity_selector)?;
        self.expose_global_updater();

        self.recompute_subtotal();
        self.sync_recommendation_visibility();
        log::info!(
            "selection tracker mounted: {} inputs, {restored} restored, {backfilled} backfilled, {select_all} select-all controls, {quantities} quantity inputs",
            self.inputs().len()
        );
        Ok(())
    }

    /// Re-read the checkboxes shortly after any control whose inline handler
    /// touches the selection inputs, once that handler has run.
    fn attach_select_all_controls(self: &Rc<Self>) -> Result<usize, JsValue> {
        let delay = self.config.select_all_delay_ms;
        let mut attached = 0;
        for control in dom::query_all::<Element>(&self.scope, &self.config.select_all_selector) {
            let inline = control.get_attribute("onclick").unwrap_or_default();
            if !inline.contains(&self.config.select_all_marker) {
                continue;
            }
            let tracker = Rc::clone(self);
            dom::listen(&control, "click", move |_| {
                let tracker = Rc::clone(&tracker);
                Timeout::new(delay, move || tracker.refresh()).forget();
            })?;
            attached += 1;
        }
        Ok(attached)
    }

    fn attach_form_hooks(self: &Rc<Self>) -> Result<(), JsValue> {
        let checkout_id = self.config.checkout_form_id.as_str();
        for form in dom::query_all::<HtmlFormElement>(&self.scope, &self.config.cart_form_selector) {
            if form.id() == checkout_id {
                continue;
            }
            let tracker = Rc::clone(self);
            dom::listen(&form, "submit", move |_| tracker.persist_selections())?;
        }
        if let Some(checkout) = dom::by_id::<HtmlFormElement>(&self.document, checkout_id) {
            let tracker = Rc::clone(self);
            dom::listen(&checkout, "submit", move |_| tracker.clear_selections())?;
        }
        Ok(())
    }

    /// Publish the subtotal updater on `window` for inline markup calls.
    fn expose_global_updater(self: &Rc<Self>) {
        let name = self.config.global_updater.as_str();
        if name.is_empty() {
            return;
        }
        let Some(win) = dom::window() else {
            return;
        };
        let tracker = Rc::clone(self);
        let updater = Closure::<dyn FnMut()>::wrap(Box::new(move || tracker.recompute_subtotal()));
        match js_sys::Reflect::set(&win, &JsValue::from_str(name), updater.as_ref()) {
            Ok(_) => updater.forget(),
            Err(err) => log::debug!("global {name} not exposed: {}", dom::js_error_message(&err)),
        }
    }
}
