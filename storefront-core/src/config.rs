//! DOM contract and tuning for the storefront widgets.
//!
//! Every field has a default matching the server templates, so a page only
//! needs to supply the values it changes.
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, StorefrontError};
use crate::selection::DEFAULT_STORAGE_KEY;

/// Upper bound for the select-all settle delay.
pub const MAX_SELECT_ALL_DELAY_MS: u32 = 1000;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorefrontConfig {
    pub selection: SelectionConfig,
    pub lightbox: LightboxConfig,
    pub dropdown: DropdownConfig,
}

impl StorefrontConfig {
    /// Parse a (possibly partial) JSON override and validate it.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the result fails [`Self::validate`].
    pub fn from_json(json: &str) -> Result<Self, StorefrontError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    ///
    /// Returns the first empty required field or an out-of-range delay.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let s = &self.selection;
        let required = [
            ("selection.storage_key", s.storage_key.as_str()),
            ("selection.input_selector", s.input_selector.as_str()),
            ("selection.checkout_form_id", s.checkout_form_id.as_str()),
            ("lightbox.image_selector", self.lightbox.image_selector.as_str()),
            ("dropdown.entry_selector", self.dropdown.entry_selector.as_str()),
            ("dropdown.toggle_selector", self.dropdown.toggle_selector.as_str()),
        ];
        if let Some((field, _)) = required.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(ConfigError::EmptyField { field: *field });
        }
        if s.select_all_delay_ms > MAX_SELECT_ALL_DELAY_MS {
            return Err(ConfigError::DelayTooLong {
                delay_ms: s.select_all_delay_ms,
                max_ms: MAX_SELECT_ALL_DELAY_MS,
            });
        }
        Ok(())
    }
}

/// How "select all / clear all" controls are noticed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectAllHook {
    /// Match buttons whose inline `onclick` mentions the selection input name.
    Sniff,
    /// Only react to the explicit selection-changed event.
    Event,
    /// Both of the above.
    #[default]
    Both,
}

impl SelectAllHook {
    #[must_use]
    pub const fn sniffs(self) -> bool {
        matches!(self, Self::Sniff | Self::Both)
    }

    #[must_use]
    pub const fn listens(self) -> bool {
        matches!(self, Self::Event | Self::Both)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    pub input_selector: String,
    pub line_total_attribute: String,
    /// Ancestor searched for a displayed total when the attribute is missing.
    pub line_container_selector: String,
    pub line_text_selector: String,
    pub currency_symbol: String,
    pub subtotal_id: String,
    pub subtotal_aria_id: String,
    pub recommendation_prefix: String,
    pub hidden_class: String,
    pub checkout_form_id: String,
    pub cart_form_selector: String,
    pub quantity_selector: String,
    pub storage_key: String,
    pub select_all_selector: String,
    /// Substring looked for in a select-all control's inline handler.
    pub select_all_marker: String,
    pub select_all_hook: SelectAllHook,
    pub select_all_delay_ms: u32,
    pub selection_event: String,
    /// Name of the global function inline markup may call; empty disables it.
    pub global_updater: String,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            input_selector: String::from(r#"input[name="selected_items"][form="checkout-form"]"#),
            line_total_attribute: String::from("data-line-total"),
            line_container_selector: String::from(".card-body"),
            line_text_selector: String::from(".text-end.small"),
            currency_symbol: String::from("$"),
            subtotal_id: String::from("selected-subtotal"),
            subtotal_aria_id: String::from("selected-subtotal-aria"),
            recommendation_prefix: String::from("complete-set-"),
            hidden_class: String::from("d-none"),
            checkout_form_id: String::from("checkout-form"),
            cart_form_selector: String::from(".container form"),
            quantity_selector: String::from(r#"input[name="quantity"]"#),
            storage_key: String::from(DEFAULT_STORAGE_KEY),
            select_all_selector: String::from("button[onclick]"),
            select_all_marker: String::from("selected_items"),
            select_all_hook: SelectAllHook::default(),
            select_all_delay_ms: 10,
            selection_event: String::from("storefront:selection-changed"),
            global_updater: String::from("updateSelectedSubtotal"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightboxConfig {
    pub image_selector: String,
    pub full_attribute: String,
    pub overlay_class: String,
    pub close_class: String,
    pub content_class: String,
    pub open_class: String,
    pub close_label: String,
}

impl Default for LightboxConfig {
    fn default() -> Self {
        Self {
            image_selector: String::from(".product-detail-image"),
            full_attribute: String::from("data-full"),
            overlay_class: String::from("lightbox-overlay"),
            close_class: String::from("lightbox-close"),
            content_class: String::from("lightbox-content"),
            open_class: String::from("open"),
            close_label: String::from("Close image"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DropdownConfig {
    pub entry_selector: String,
    /// Matched among the entry's direct children only.
    pub toggle_selector: String,
    pub panel_selector: String,
    pub open_class: String,
    pub menu_selector: String,
    pub host_selector: String,
    pub host_close_event: String,
}

impl Default for DropdownConfig {
    fn default() -> Self {
        Self {
            entry_selector: String::from(".dropdown-category.has-children"),
            toggle_selector: String::from(".category-toggle"),
            panel_selector: String::from(".subcategory-panel"),
            open_class: String::from("open"),
            menu_selector: String::from(".dropdown-menu"),
            host_selector: String::from(".dropdown"),
            host_close_event: String::from("hide.bs.dropdown"),
        }
    }
}
