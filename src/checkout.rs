//! Checkout
//!
//! One request-scoped evaluation of the extension points: every enabled shipping
//! method computes its rates, the rate filters run over the result, and the rows
//! for one totals position are collected.

use rusty_money::iso::Currency;
use tracing::debug;

use crate::{
    cart::Cart,
    display::TotalsRow,
    extensions::{Extensions, TotalsPosition},
    metadata::MetadataStore,
    rates::RateSet,
    shipping::ShippingError,
};

/// Host state for one checkout request: the materialised cart, the product
/// metadata store and the store currency.
#[derive(Debug, Clone, Copy)]
pub struct CheckoutContext<'a> {
    cart: &'a Cart,
    store: &'a dyn MetadataStore,
    currency: &'static Currency,
}

impl<'a> CheckoutContext<'a> {
    /// Create a new context.
    pub fn new(cart: &'a Cart, store: &'a dyn MetadataStore, currency: &'static Currency) -> Self {
        Self {
            cart,
            store,
            currency,
        }
    }

    /// The cart being checked out.
    pub fn cart(&self) -> &'a Cart {
        self.cart
    }

    /// The product metadata store.
    pub fn store(&self) -> &'a dyn MetadataStore {
        self.store
    }

    /// The checkout currency.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }
}

/// Outcome of one checkout evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutReview {
    /// Rates offered to the buyer, after filtering.
    pub rates: RateSet,

    /// Rows inserted before the order total.
    pub rows: Vec<TotalsRow>,
}

/// Collect the rates of every enabled shipping method, then run the rate filters.
///
/// # Errors
///
/// Returns the first [`ShippingError`] raised by a shipping method.
pub fn package_rates(
    extensions: &Extensions,
    ctx: &CheckoutContext<'_>,
) -> Result<RateSet, ShippingError> {
    let mut rates = RateSet::new();

    for method in extensions.shipping_methods().enabled() {
        rates.extend(method.calculate_shipping(ctx)?);
    }

    let candidates = rates.len();
    let rates = extensions.filter_rates(rates, ctx);

    debug!(candidates, offered = rates.len(), "collected package rates");

    Ok(rates)
}

/// Evaluate the checkout for one totals position.
///
/// # Errors
///
/// Returns the first [`ShippingError`] raised by a shipping method.
pub fn evaluate(
    extensions: &Extensions,
    ctx: &CheckoutContext<'_>,
    position: TotalsPosition,
) -> Result<CheckoutReview, ShippingError> {
    let rates = package_rates(extensions, ctx)?;
    let rows = extensions.totals_rows(position, ctx);

    Ok(CheckoutReview { rates, rows })
}
