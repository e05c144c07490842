//! Line-item selection set and its session-storage mirror.
use serde::Serialize;
use serde_json::Value;

use crate::error::StorefrontError;
use crate::storage::SelectionStorage;

/// Storage key the cart page has always used for its selection mirror.
pub const DEFAULT_STORAGE_KEY: &str = "auroramart_cart_selected";

/// Ordered set of selected line-item identifiers.
///
/// Insertion order is kept so the persisted mirror follows document order;
/// duplicates collapse to their first occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Selection {
    ids: Vec<String>,
}

impl Selection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `id`, returning `false` if it was already selected.
    pub fn insert(&mut self, id: impl Into<String>) -> bool {
        let id = id.into();
        if self.contains(&id) {
            return false;
        }
        self.ids.push(id);
        true
    }

    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.ids.len();
        self.ids.retain(|existing| existing != id);
        self.ids.len() != before
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|existing| existing == id)
    }

    #[must_use]
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    /// Serialize as a JSON array of strings.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Decode stored text, failing open.
    ///
    /// Absent text, invalid JSON and non-array JSON all yield an empty
    /// selection. Elements are converted the way JavaScript's `String()`
    /// would, so `null` becomes `"null"` and `1e2` becomes `"100"`.
    #[must_use]
    pub fn decode(raw: Option<&str>) -> Self {
        let Some(raw) = raw.filter(|text| !text.is_empty()) else {
            return Self::new();
        };
        match serde_json::from_str::<Value>(raw) {
            Ok(Value::Array(items)) => items.iter().map(js_string).collect(),
            Ok(_) => Self::new(),
            Err(err) => {
                log::debug!("ignoring malformed stored selection: {err}");
                Self::new()
            }
        }
    }
}

fn js_string(value: &Value) -> String {
    match value {
        Value::Null => String::from("null"),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.as_f64().map_or_else(|| number.to_string(), js_number),
        Value::String(text) => text.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| if item.is_null() { String::new() } else { js_string(item) })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => String::from("[object Object]"),
    }
}

/// Number-to-text as JavaScript prints it: shortest round-trip digits,
/// exponent form outside `[1e-6, 1e21)`.
fn js_number(value: f64) -> String {
    if value == 0.0 {
        return String::from("0");
    }
    let magnitude = value.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return value.to_string();
    }
    let text = format!("{value:e}");
    match text.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{mantissa}e+{exponent}")
        }
        _ => text,
    }
}

impl<S: Into<String>> FromIterator<S> for Selection {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut selection = Self::new();
        for id in iter {
            selection.insert(id);
        }
        selection
    }
}

impl<'a> IntoIterator for &'a Selection {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.ids.iter()
    }
}

/// Selection persistence over a [`SelectionStorage`] backend.
///
/// The `try_*` methods report failures; the plain methods are best-effort
/// and swallow them after logging.
#[derive(Debug)]
pub struct SelectionStore<S> {
    storage: S,
    key: String,
}

impl<S: SelectionStorage> SelectionStore<S> {
    pub fn new(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Read the persisted selection.
    ///
    /// # Errors
    ///
    /// Returns an error only when the backend cannot be read; malformed content
    /// decodes to an empty selection.
    pub fn try_load(&self) -> Result<Selection, StorefrontError> {
        let raw = self
            .storage
            .read(&self.key)
            .map_err(|e| StorefrontError::Storage(e.to_string()))?;
        Ok(Selection::decode(raw.as_deref()))
    }

    /// Read the persisted selection, treating an unreadable backend as empty.
    #[must_use]
    pub fn load(&self) -> Selection {
        self.try_load().unwrap_or_else(|err| {
            log::debug!("selection restore skipped: {err}");
            Selection::new()
        })
    }

    /// Persist `selection`.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding fails or the backend refuses the write.
    pub fn try_save(&self, selection: &Selection) -> Result<(), StorefrontError> {
        let text = selection.encode()?;
        self.storage
            .write(&self.key, &text)
            .map_err(|e| StorefrontError::Storage(e.to_string()))
    }

    pub fn save(&self, selection: &Selection) {
        if let Err(err) = self.try_save(selection) {
            log::debug!("selection persist skipped: {err}");
        }
    }

    /// Remove the persisted selection.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    pub fn try_clear(&self) -> Result<(), StorefrontError> {
        self.storage
            .remove(&self.key)
            .map_err(|e| StorefrontError::Storage(e.to_string()))
    }

    pub fn clear(&self) {
        if let Err(err) = self.try_clear() {
            log::debug!("selection clear skipped: {err}");
        }
    }
}
