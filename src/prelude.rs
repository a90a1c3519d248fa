//! Custom shipping prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    admin::{ProductFormSubmission, render_shipping_fields, save_shipping_fields},
    cart::{Cart, CartError, CartLine},
    checkout::{CheckoutContext, CheckoutReview, evaluate, package_rates},
    display::{SHIPPING_DAYS_LABEL, TotalsRow, shipping_days_row},
    extensions::{
        Extensions, ProductPanelHook, ProductSaveHook, RateFilter, TotalsPosition, TotalsRowHook,
    },
    metadata::{
        InMemoryMetadataStore, MetadataStore, PRICE_META_KEY, ProductShippingInfo, ShippingMeta,
        TIME_META_KEY,
    },
    plugin::install,
    products::{Product, ProductKey},
    rates::{RateSet, ShippingRate},
    shipping::{
        ShippingError, ShippingMethod, ShippingMethods,
        custom::{CustomShippingMethod, shipping_cost},
    },
    times::{TimeLabel, TimeLabels, format_shipping_times},
    visibility::{has_custom_shipping, hide_unless_custom_shipping},
};
