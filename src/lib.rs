//! Custom Shipping
//!
//! Per-product shipping costs and shipping-time labels for a commerce
//! checkout. Store owners give each product an optional flat shipping price
//! and a free-text shipping time; at checkout the custom rate is the sum of
//! price times quantity over the cart, and is only offered when some product
//! in the cart carries a price. The shipping times of the cart are merged into
//! a single "Shipping Days" row in the order totals.

pub mod admin;
pub mod cart;
pub mod checkout;
pub mod display;
pub mod extensions;
pub mod fixtures;
pub mod metadata;
pub mod plugin;
pub mod prelude;
pub mod products;
pub mod rates;
pub mod sanitize;
pub mod shipping;
pub mod summary;
pub mod times;
pub mod visibility;
