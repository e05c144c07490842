//! Cart line selection, subtotal and recommendation visibility.
use crate::money::{Money, parse_amount};
use crate::selection::Selection;

/// A single cart row as seen by the selection widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    pub id: String,
    pub line_total: Money,
    pub checked: bool,
}

impl CartLine {
    pub fn new(id: impl Into<String>, line_total: Money, checked: bool) -> Self {
        Self {
            id: id.into(),
            line_total,
            checked,
        }
    }

    /// Build a line from the raw attribute text, coercing bad totals to zero.
    pub fn from_raw(id: impl Into<String>, raw_total: Option<&str>, checked: bool) -> Self {
        Self::new(id, raw_total.map_or(Money::ZERO, parse_amount), checked)
    }
}

/// Snapshot of every selectable cart line, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CartSelection {
    lines: Vec<CartLine>,
}

impl CartSelection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, line: CartLine) {
        self.lines.push(line);
    }

    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Set the checked flag on every line carrying `id`.
    /// Returns whether any line matched.
    pub fn set_checked(&mut self, id: &str, checked: bool) -> bool {
        let mut matched = false;
        for line in self.lines.iter_mut().filter(|line| line.id == id) {
            line.checked = checked;
            matched = true;
        }
        matched
    }

    pub fn set_all(&mut self, checked: bool) {
        for line in &mut self.lines {
            line.checked = checked;
        }
    }

    /// Sum of the line totals of every checked line.
    #[must_use]
    pub fn subtotal(&self) -> Money {
        self.lines
            .iter()
            .filter(|line| line.checked)
            .map(|line| line.line_total)
            .sum()
    }

    /// Identifiers of checked lines, in document order.
    #[must_use]
    pub fn checked_ids(&self) -> Selection {
        self.lines
            .iter()
            .filter(|line| line.checked)
            .map(|line| line.id.clone())
            .collect()
    }

    /// Check every line whose id is in `saved`. Lines outside the set keep
    /// their current state. Returns the number of lines checked.
    pub fn restore(&mut self, saved: &Selection) -> usize {
        let mut restored = 0;
        for line in self.lines.iter_mut().filter(|line| saved.contains(&line.id)) {
            line.checked = true;
            restored += 1;
        }
        restored
    }

    /// Whether each line's "complete the set" panel should be visible.
    pub fn recommendation_visibility(&self) -> impl Iterator<Item = (&str, bool)> {
        self.lines
            .iter()
            .map(|line| (line.id.as_str(), line.checked))
    }
}

impl FromIterator<CartLine> for CartSelection {
    fn from_iter<I: IntoIterator<Item = CartLine>>(iter: I) -> Self {
        Self {
            lines: iter.into_iter().collect(),
        }
    }
}

/// Rendered subtotal for the numeric display and its accessible twin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtotalText {
    pub amount: String,
    pub accessible: String,
}

impl SubtotalText {
    #[must_use]
    pub fn new(total: Money, symbol: &str) -> Self {
        Self {
            amount: total.amount_text(),
            accessible: total.currency_text(symbol),
        }
    }
}

/// Element id of the recommendation panel paired with a selection value.
#[must_use]
pub fn recommendation_panel_id(prefix: &str, value: &str) -> String {
    format!("{prefix}{value}")
}

/// Tracks a quantity field's value as rendered, so blur only submits real edits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuantityEdit {
    original: String,
}

impl QuantityEdit {
    pub fn new(original: impl Into<String>) -> Self {
        Self {
            original: original.into(),
        }
    }

    #[must_use]
    pub fn original(&self) -> &str {
        &self.original
    }

    #[must_use]
    pub fn should_submit_on_blur(&self, current: &str) -> bool {
        current != self.original
    }
}
