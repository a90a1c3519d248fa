//! Installation of the custom shipping handlers into a host's [`Extensions`].

use tracing::{debug, info};

use crate::{
    admin::{ShippingFieldsPanel, ShippingFieldsSaver},
    display::ShippingDaysRow,
    extensions::{DEFAULT_PRIORITY, Extensions, TotalsPosition},
    shipping::custom::{CustomShippingMethod, METHOD_ID},
    visibility::CustomShippingVisibility,
};

/// Priority of the visibility filter, so that it sees the rates left by other filters.
pub const VISIBILITY_FILTER_PRIORITY: i32 = 9999;

/// Register the custom shipping method and its hooks.
///
/// Installing into a registry that already has the method is a no-op; returns
/// whether anything was installed.
pub fn install(extensions: &mut Extensions) -> bool {
    if !extensions
        .shipping_methods_mut()
        .register(Box::new(CustomShippingMethod::new()))
    {
        debug!(method = METHOD_ID, "custom shipping already installed");
        return false;
    }

    extensions.add_product_panel(DEFAULT_PRIORITY, Box::new(ShippingFieldsPanel));
    extensions.add_product_saver(DEFAULT_PRIORITY, Box::new(ShippingFieldsSaver));
    extensions.add_rate_filter(
        VISIBILITY_FILTER_PRIORITY,
        Box::new(CustomShippingVisibility),
    );

    for position in [
        TotalsPosition::ReviewOrderBeforeOrderTotal,
        TotalsPosition::CartTotalsBeforeOrderTotal,
    ] {
        extensions.add_totals_row(position, DEFAULT_PRIORITY, Box::new(ShippingDaysRow));
    }

    info!(method = METHOD_ID, "installed custom shipping");

    true
}
