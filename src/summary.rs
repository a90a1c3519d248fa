//! Checkout Summary
//!
//! Plain-text rendering of a checkout evaluation: one row per cart line with
//! its custom shipping settings, followed by the offered rates and the totals
//! rows.

use std::io;

use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use slotmap::SlotMap;
use tabled::{
    builder::Builder,
    settings::{
        Alignment, Style,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    checkout::{CheckoutContext, CheckoutReview},
    metadata::ShippingMeta,
    products::{Product, ProductKey},
};

/// Errors that can occur when writing a summary.
#[derive(Debug, Error)]
pub enum SummaryError {
    /// Error finding a product in the product catalogue.
    #[error("Missing product")]
    MissingProduct(ProductKey),

    /// IO error
    #[error("IO error")]
    IO,
}

/// Write the checkout summary.
///
/// # Errors
///
/// Returns an error if a cart product is missing from the catalogue or the
/// output cannot be written.
pub fn write_to(
    mut out: impl io::Write,
    ctx: &CheckoutContext<'_>,
    products: &SlotMap<ProductKey, Product>,
    review: &CheckoutReview,
) -> Result<(), SummaryError> {
    write_lines_table(&mut out, ctx, products)?;
    write_rates(&mut out, review)?;
    write_rows(&mut out, review)?;

    writeln!(out).map_err(|_err| SummaryError::IO)
}

fn write_lines_table(
    out: &mut impl io::Write,
    ctx: &CheckoutContext<'_>,
    products: &SlotMap<ProductKey, Product>,
) -> Result<(), SummaryError> {
    let mut builder = Builder::default();

    builder.push_record(["", "Product", "Qty", "Shipping", "Line Shipping", "Shipping Time"]);

    for (idx, line) in ctx.cart().iter().enumerate() {
        let product = products
            .get(line.product())
            .ok_or(SummaryError::MissingProduct(line.product()))?;

        let info = ctx.store().shipping_info(line.product());

        let (unit, line_total) = match info.price {
            Some(price) => (
                Money::from_decimal(price, ctx.currency()).to_string(),
                line_shipping_cell(price, line.quantity(), ctx.currency()),
            ),
            None => ("-".to_string(), "-".to_string()),
        };

        builder.push_record([
            format!("#{:<3}", idx + 1),
            product.name.clone(),
            line.quantity().to_string(),
            unit,
            line_total,
            info.time_label.unwrap_or_default(),
        ]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Rows::first(), Alignment::center());
    table.modify(Columns::new(2..5), Alignment::right());

    writeln!(out, "\n{table}").map_err(|_err| SummaryError::IO)
}

/// Line shipping cost, or `-` when it does not fit in a decimal.
fn line_shipping_cell(price: Decimal, quantity: u32, currency: &'static Currency) -> String {
    price.checked_mul(Decimal::from(quantity)).map_or_else(
        || "-".to_string(),
        |total| Money::from_decimal(total, currency).to_string(),
    )
}

fn write_rates(out: &mut impl io::Write, review: &CheckoutReview) -> Result<(), SummaryError> {
    writeln!(out, "\n Shipping rates:").map_err(|_err| SummaryError::IO)?;

    if review.rates.is_empty() {
        return writeln!(out, "   (none)").map_err(|_err| SummaryError::IO);
    }

    for rate in review.rates.iter() {
        writeln!(out, "   {} [{}]: {}", rate.label(), rate.id(), rate.cost())
            .map_err(|_err| SummaryError::IO)?;
    }

    Ok(())
}

fn write_rows(out: &mut impl io::Write, review: &CheckoutReview) -> Result<(), SummaryError> {
    for row in &review.rows {
        writeln!(out, " {}: {}", row.label, row.value).map_err(|_err| SummaryError::IO)?;
    }

    Ok(())
}
