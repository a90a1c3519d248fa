//! Shipping Rates

use rusty_money::{Money, iso::Currency};
use smallvec::SmallVec;

/// A priced shipping option offered to the buyer at checkout.
#[derive(Debug, Clone, PartialEq)]
pub struct ShippingRate {
    id: String,
    method_id: &'static str,
    label: String,
    cost: Money<'static, Currency>,
}

impl ShippingRate {
    /// Create a new rate for the given shipping method.
    pub fn new(
        id: impl Into<String>,
        method_id: &'static str,
        label: impl Into<String>,
        cost: Money<'static, Currency>,
    ) -> Self {
        Self {
            id: id.into(),
            method_id,
            label: label.into(),
            cost,
        }
    }

    /// Rate identifier, unique within a [`RateSet`].
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Identifier of the shipping method that produced this rate.
    pub fn method_id(&self) -> &'static str {
        self.method_id
    }

    /// Label shown at checkout.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Cost of the rate.
    pub fn cost(&self) -> &Money<'static, Currency> {
        &self.cost
    }
}

/// Candidate shipping rates for one package, in the order they were added.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RateSet {
    rates: SmallVec<[ShippingRate; 4]>,
}

impl RateSet {
    /// Create a new, empty rate set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a rate, replacing any existing rate with the same id in place.
    pub fn insert(&mut self, rate: ShippingRate) {
        if let Some(existing) = self.rates.iter_mut().find(|r| r.id == rate.id) {
            *existing = rate;
        } else {
            self.rates.push(rate);
        }
    }

    /// Add every rate from another set.
    pub fn extend(&mut self, other: RateSet) {
        for rate in other.rates {
            self.insert(rate);
        }
    }

    /// Get a rate by id.
    pub fn get(&self, id: &str) -> Option<&ShippingRate> {
        self.rates.iter().find(|rate| rate.id == id)
    }

    /// Keep only the rates for which `keep` returns true.
    pub fn retain(&mut self, mut keep: impl FnMut(&ShippingRate) -> bool) {
        self.rates.retain(|rate| keep(rate));
    }

    /// Remove every rate produced by the given shipping method, returning how many were removed.
    pub fn remove_method(&mut self, method_id: &str) -> usize {
        let before = self.rates.len();

        self.retain(|rate| rate.method_id != method_id);

        before - self.rates.len()
    }

    /// Iterate over the rates.
    pub fn iter(&self) -> impl Iterator<Item = &ShippingRate> {
        self.rates.iter()
    }

    /// Number of rates in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    /// Check if the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

impl FromIterator<ShippingRate> for RateSet {
    fn from_iter<I: IntoIterator<Item = ShippingRate>>(iter: I) -> Self {
        let mut set = RateSet::new();

        for rate in iter {
            set.insert(rate);
        }

        set
    }
}
