//! Shipping Methods

use std::fmt;

use thiserror::Error;

use crate::{checkout::CheckoutContext, products::ProductKey, rates::RateSet};

pub mod custom;

/// Shipping method errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ShippingError {
    /// The running cost total no longer fits in a decimal.
    #[error("shipping cost overflowed while adding product {product:?}")]
    CostOverflow {
        /// Product whose line overflowed the total
        product: ProductKey,
    },
}

/// A shipping method that can price a package at checkout.
pub trait ShippingMethod: fmt::Debug {
    /// Unique method identifier.
    fn id(&self) -> &'static str;

    /// Label shown to the buyer next to the rate.
    fn title(&self) -> &str;

    /// Name shown in the shipping settings.
    fn method_title(&self) -> &str;

    /// Description shown in the shipping settings.
    fn method_description(&self) -> &str;

    /// Whether the method takes part in rate collection.
    fn is_enabled(&self) -> bool {
        true
    }

    /// Compute the rates this method offers for the current package.
    ///
    /// # Errors
    ///
    /// Returns a [`ShippingError`] if the rates cannot be computed.
    fn calculate_shipping(&self, ctx: &CheckoutContext<'_>) -> Result<RateSet, ShippingError>;
}

/// Registered shipping methods, in registration order.
#[derive(Debug, Default)]
pub struct ShippingMethods {
    methods: Vec<Box<dyn ShippingMethod>>,
}

impl ShippingMethods {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a method.
    ///
    /// Returns `false` and keeps the existing registration if a method with the
    /// same id is already registered.
    pub fn register(&mut self, method: Box<dyn ShippingMethod>) -> bool {
        if self.contains(method.id()) {
            return false;
        }

        self.methods.push(method);

        true
    }

    /// Whether a method with the given id is registered.
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Get a registered method by id.
    pub fn get(&self, id: &str) -> Option<&dyn ShippingMethod> {
        self.methods
            .iter()
            .find(|method| method.id() == id)
            .map(Box::as_ref)
    }

    /// Iterate over enabled methods.
    pub fn enabled(&self) -> impl Iterator<Item = &dyn ShippingMethod> {
        self.methods
            .iter()
            .map(Box::as_ref)
            .filter(|method| method.is_enabled())
    }

    /// Number of registered methods.
    #[must_use]
    pub fn len(&self) -> usize {
        self.methods.len()
    }

    /// Check if no methods are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct StubMethod {
        id: &'static str,
        title: &'static str,
        enabled: bool,
    }

    impl ShippingMethod for StubMethod {
        fn id(&self) -> &'static str {
            self.id
        }

        fn title(&self) -> &str {
            self.title
        }

        fn method_title(&self) -> &str {
            self.title
        }

        fn method_description(&self) -> &'static str {
            ""
        }

        fn is_enabled(&self) -> bool {
            self.enabled
        }

        fn calculate_shipping(&self, _ctx: &CheckoutContext<'_>) -> Result<RateSet, ShippingError> {
            Ok(RateSet::new())
        }
    }

    fn stub(id: &'static str, title: &'static str, enabled: bool) -> Box<dyn ShippingMethod> {
        Box::new(StubMethod { id, title, enabled })
    }

    #[test]
    fn register_adds_new_method() {
        let mut methods = ShippingMethods::new();

        assert!(methods.register(stub("flat_rate", "Flat rate", true)));
        assert!(methods.contains("flat_rate"));
        assert_eq!(methods.len(), 1);
    }

    #[test]
    fn register_keeps_first_method_for_duplicate_id() {
        let mut methods = ShippingMethods::new();

        methods.register(stub("flat_rate", "First", true));
        let registered = methods.register(stub("flat_rate", "Second", true));

        assert!(!registered);
        assert_eq!(methods.len(), 1);
        assert_eq!(methods.get("flat_rate").map(ShippingMethod::title), Some("First"));
    }

    #[test]
    fn enabled_skips_disabled_methods() {
        let mut methods = ShippingMethods::new();

        methods.register(stub("flat_rate", "Flat rate", true));
        methods.register(stub("local_pickup", "Pickup", false));

        let ids: Vec<&str> = methods.enabled().map(ShippingMethod::id).collect();

        assert_eq!(ids, vec!["flat_rate"]);
    }

    #[test]
    fn empty_registry() {
        let methods = ShippingMethods::new();

        assert!(methods.is_empty());
        assert!(methods.get("flat_rate").is_none());
    }
}
