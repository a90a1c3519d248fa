//! Order Totals Rows
//!
//! Extra rows rendered into the cart totals and order review tables, between
//! the shipping line and the order total.

use askama::Template;

use crate::{checkout::CheckoutContext, extensions::TotalsRowHook, times::TimeLabels};

/// Label of the shipping time row.
pub const SHIPPING_DAYS_LABEL: &str = "Shipping Days";

const SHIPPING_DAYS_CLASS: &str = "shipping-time";

/// A two-cell row in the order totals table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TotalsRow {
    /// CSS class of the row
    pub class: &'static str,

    /// Label cell
    pub label: String,

    /// Value cell
    pub value: String,
}

impl TotalsRow {
    /// Render the row as an HTML table row. Label and value are escaped.
    ///
    /// # Errors
    ///
    /// Returns an [`askama::Error`] if the template fails to render.
    pub fn to_html(&self) -> Result<String, askama::Error> {
        TotalsRowTemplate {
            class: self.class,
            label: &self.label,
            value: &self.value,
        }
        .render()
    }
}

#[derive(Template)]
#[template(path = "totals_row.html")]
struct TotalsRowTemplate<'a> {
    class: &'a str,
    label: &'a str,
    value: &'a str,
}

/// Build the "Shipping Days" row for the current cart.
///
/// Returns `None` when no product in the cart has a shipping time label.
pub fn shipping_days_row(ctx: &CheckoutContext<'_>) -> Option<TotalsRow> {
    let value = TimeLabels::from_cart(ctx).display()?;

    Some(TotalsRow {
        class: SHIPPING_DAYS_CLASS,
        label: SHIPPING_DAYS_LABEL.to_string(),
        value,
    })
}

/// [`TotalsRowHook`] emitting the aggregated shipping time of the cart.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShippingDaysRow;

impl TotalsRowHook for ShippingDaysRow {
    fn row(&self, ctx: &CheckoutContext<'_>) -> Option<TotalsRow> {
        shipping_days_row(ctx)
    }
}
