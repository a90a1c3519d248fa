//! Per-product custom shipping method.

use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use tracing::{debug, trace};

use crate::{
    checkout::CheckoutContext,
    metadata::ShippingMeta,
    rates::{RateSet, ShippingRate},
    shipping::{ShippingError, ShippingMethod},
};

/// Method identifier; also used as the id of the rate this method produces.
pub const METHOD_ID: &str = "custom_shipping";

/// Checkout label of the rate.
pub const RATE_LABEL: &str = "Shipping";

const METHOD_TITLE: &str = "Custom Shipping";
const METHOD_DESCRIPTION: &str = "Uses per-product custom shipping price.";

/// Shipping method that charges each product's configured shipping price per unit.
#[derive(Debug, Clone, Copy, Default)]
pub struct CustomShippingMethod;

impl CustomShippingMethod {
    /// Create the method.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl ShippingMethod for CustomShippingMethod {
    fn id(&self) -> &'static str {
        METHOD_ID
    }

    fn title(&self) -> &str {
        RATE_LABEL
    }

    fn method_title(&self) -> &str {
        METHOD_TITLE
    }

    fn method_description(&self) -> &str {
        METHOD_DESCRIPTION
    }

    fn calculate_shipping(&self, ctx: &CheckoutContext<'_>) -> Result<RateSet, ShippingError> {
        let cost = shipping_cost(ctx)?;

        debug!(%cost, lines = ctx.cart().len(), "calculated custom shipping");

        Ok([ShippingRate::new(METHOD_ID, METHOD_ID, RATE_LABEL, cost)]
            .into_iter()
            .collect())
    }
}

/// Sum `price * quantity` over every cart line whose product has a numeric shipping price.
///
/// Lines without a usable price contribute nothing. An empty cart costs zero.
///
/// # Errors
///
/// Returns [`ShippingError::CostOverflow`] if the total no longer fits in a decimal.
pub fn shipping_cost(ctx: &CheckoutContext<'_>) -> Result<Money<'static, Currency>, ShippingError> {
    let total = ctx.cart().iter().try_fold(Decimal::ZERO, |total, line| {
        let Some(price) = ctx.store().shipping_price(line.product()) else {
            trace!(product = ?line.product(), "no custom shipping price, skipping line");
            return Ok(total);
        };

        price
            .checked_mul(Decimal::from(line.quantity()))
            .and_then(|line_cost| total.checked_add(line_cost))
            .ok_or(ShippingError::CostOverflow {
                product: line.product(),
            })
    })?;

    Ok(Money::from_decimal(total, ctx.currency()))
}
