//! Shipping Times
//!
//! Aggregates the shipping-time labels of every product in the cart into a
//! single display line.
//!
//! Each unique label is classified by concatenating every ASCII digit it
//! contains. Labels with at least one digit are *numeric* and summarised as a
//! `"{min} - {max} days"` range; labels without digits are *textual* and listed
//! verbatim after the numeric summary. Digit groups are concatenated, not read
//! as a range, so `"2-3 days"` classifies as the number 23.

use smallvec::SmallVec;

use crate::{checkout::CheckoutContext, metadata::ShippingMeta};

/// A classified shipping-time label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeLabel<'a> {
    /// The label contained digits; their concatenation as an integer.
    Numeric(i64),

    /// The label contained no digits.
    Textual(&'a str),
}

impl<'a> TimeLabel<'a> {
    /// Classify a trimmed, non-empty label.
    ///
    /// Digit sequences too large for an `i64` saturate at `i64::MAX`.
    pub fn classify(label: &'a str) -> Self {
        let mut digits = label.chars().filter_map(|c| c.to_digit(10)).peekable();

        if digits.peek().is_none() {
            return TimeLabel::Textual(label);
        }

        let value = digits.fold(0_i64, |value, digit| {
            value
                .saturating_mul(10)
                .saturating_add(i64::from(digit))
        });

        TimeLabel::Numeric(value)
    }
}

/// The deduplicated shipping-time labels collected from one cart, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimeLabels<'a> {
    labels: SmallVec<[&'a str; 8]>,
}

impl<'a> TimeLabels<'a> {
    /// Create an empty label set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect the labels of every product in the cart.
    ///
    /// Products without a label, or with a blank one, are skipped.
    pub fn from_cart(ctx: &CheckoutContext<'a>) -> Self {
        let store = ctx.store();

        ctx.cart()
            .iter()
            .filter_map(|line| store.shipping_time(line.product()))
            .collect()
    }

    /// Add a label, trimming it first. Blank and already-present labels are ignored.
    pub fn push(&mut self, label: &'a str) {
        let label = label.trim();

        if !label.is_empty() && !self.labels.contains(&label) {
            self.labels.push(label);
        }
    }

    /// Iterate over the labels.
    pub fn iter(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.labels.iter().copied()
    }

    /// Number of unique labels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Check if no labels were collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Format the labels into one display line.
    ///
    /// Returns `None` when there are no labels.
    pub fn display(&self) -> Option<String> {
        format_shipping_times(self.iter())
    }
}

impl<'a> FromIterator<&'a str> for TimeLabels<'a> {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut labels = TimeLabels::new();

        for label in iter {
            labels.push(label);
        }

        labels
    }
}

/// Format unique, trimmed, non-empty labels into one display line.
///
/// - only numeric labels: `"5 days"` or `"5 - 10 days"`;
/// - numeric and textual: the numeric summary followed by each textual label, comma separated;
/// - only textual: the textual labels, comma separated, in input order.
///
/// Returns `None` for empty input.
pub fn format_shipping_times<'a>(labels: impl IntoIterator<Item = &'a str>) -> Option<String> {
    let mut range: Option<(i64, i64)> = None;
    let mut textual: SmallVec<[&str; 8]> = SmallVec::new();

    for label in labels {
        match TimeLabel::classify(label) {
            TimeLabel::Numeric(value) => {
                range = Some(range.map_or((value, value), |(lo, hi)| {
                    (lo.min(value), hi.max(value))
                }));
            }
            TimeLabel::Textual(text) => textual.push(text),
        }
    }

    let summary = range.map(|(lo, hi)| {
        if lo == hi {
            format!("{lo} days")
        } else {
            format!("{lo} - {hi} days")
        }
    });

    let mut parts: SmallVec<[&str; 9]> = SmallVec::new();

    parts.extend(summary.as_deref());
    parts.extend(textual.iter().copied());

    (!parts.is_empty()).then(|| parts.join(", "))
}
