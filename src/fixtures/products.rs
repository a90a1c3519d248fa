//! Product Fixtures

use rustc_hash::FxHashMap;
use serde::Deserialize;

use crate::{
    admin::ProductFormSubmission,
    metadata::{PRICE_META_KEY, TIME_META_KEY},
    products::Product,
};

/// Wrapper for products in YAML
#[derive(Debug, Deserialize)]
pub struct ProductsFixture {
    /// Map of product key -> product fixture
    pub products: FxHashMap<String, ProductFixture>,
}

/// Product Fixture
///
/// Shipping values are kept as raw strings, exactly as they would be posted
/// from the product edit form.
#[derive(Debug, Deserialize)]
pub struct ProductFixture {
    /// Product name
    pub name: String,

    /// Custom shipping price (e.g., "2.50")
    #[serde(default)]
    pub shipping_price: Option<String>,

    /// Custom shipping time (e.g., "2-3 days")
    #[serde(default)]
    pub shipping_time: Option<String>,
}

impl ProductFixture {
    /// Split the fixture into the catalogue product and its form submission.
    pub fn into_parts(self) -> (Product, ProductFormSubmission) {
        let mut submission = ProductFormSubmission::new();

        if let Some(price) = self.shipping_price {
            submission = submission.with_field(PRICE_META_KEY, price);
        }

        if let Some(time) = self.shipping_time {
            submission = submission.with_field(TIME_META_KEY, time);
        }

        (Product::new(self.name), submission)
    }
}
