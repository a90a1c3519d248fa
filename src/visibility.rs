//! Rate Visibility
//!
//! Hides the custom shipping rate when nothing in the cart carries a custom
//! shipping price. Rates from other shipping methods are never touched.

use tracing::debug;

use crate::{
    checkout::CheckoutContext, extensions::RateFilter, metadata::ShippingMeta, rates::RateSet,
    shipping::custom::METHOD_ID,
};

/// Whether any cart line's product has a non-empty, numeric shipping price.
///
/// A price stored as exactly `"0"` is empty here, while `"0.00"` is not.
pub fn has_custom_shipping(ctx: &CheckoutContext<'_>) -> bool {
    ctx.cart()
        .iter()
        .any(|line| ctx.store().has_custom_shipping_price(line.product()))
}

/// Remove every rate produced by `method_id` unless the cart has custom shipping.
///
/// Applying the filter to an already-filtered set is a no-op.
pub fn hide_unless_custom_shipping(
    mut rates: RateSet,
    ctx: &CheckoutContext<'_>,
    method_id: &str,
) -> RateSet {
    if has_custom_shipping(ctx) {
        return rates;
    }

    let removed = rates.remove_method(method_id);

    if removed > 0 {
        debug!(removed, method_id, "no custom shipping in cart, hiding rates");
    }

    rates
}

/// [`RateFilter`] that hides the custom shipping rate for carts without custom shipping.
#[derive(Debug, Clone, Copy, Default)]
pub struct CustomShippingVisibility;

impl RateFilter for CustomShippingVisibility {
    fn filter(&self, rates: RateSet, ctx: &CheckoutContext<'_>) -> RateSet {
        hide_unless_custom_shipping(rates, ctx, METHOD_ID)
    }
}
