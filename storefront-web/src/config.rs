use storefront_core::StorefrontConfig;
use web_sys::Document;

/// Id of the optional inline JSON block overriding the default DOM contract.
pub const CONFIG_ELEMENT_ID: &str = "storefront-config";

/// Read the page's config override, falling back to defaults when it is
/// absent or invalid.
#[must_use]
pub fn load_config(document: &Document) -> StorefrontConfig {
    let Some(text) = document
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|el| el.text_content())
        .filter(|text| !text.trim().is_empty())
    else {
        return StorefrontConfig::default();
    };
    StorefrontConfig::from_json(&text).unwrap_or_else(|err| {
        log::warn!("ignoring #{CONFIG_ELEMENT_ID}: {err}");
        StorefrontConfig::default()
    })
}
