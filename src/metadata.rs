//! Product Metadata
//!
//! The host platform owns per-product key/value metadata. Values are stored as
//! raw strings exactly as submitted; the typed accessors in [`ShippingMeta`]
//! re-validate them on every read, so invalid or absent values behave as absent.

use std::{fmt, str::FromStr};

use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use slotmap::SecondaryMap;
use tracing::trace;

use crate::products::ProductKey;

/// Metadata key holding a product's custom shipping price.
pub const PRICE_META_KEY: &str = "_custom_shipping_price";

/// Metadata key holding a product's custom shipping time label.
pub const TIME_META_KEY: &str = "_custom_shipping_time";

/// Host-provided per-product key/value persistence.
pub trait MetadataStore: fmt::Debug {
    /// Get the raw value stored for a product under `key`.
    fn get(&self, product: ProductKey, key: &str) -> Option<&str>;

    /// Store a raw value for a product under `key`, replacing any previous value.
    fn set(&mut self, product: ProductKey, key: &str, value: String);

    /// Remove the value stored for a product under `key`.
    fn unset(&mut self, product: ProductKey, key: &str);
}

/// In-memory [`MetadataStore`].
#[derive(Debug, Default, Clone)]
pub struct InMemoryMetadataStore {
    values: SecondaryMap<ProductKey, FxHashMap<String, String>>,
}

impl InMemoryMetadataStore {
    /// Create a new, empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl MetadataStore for InMemoryMetadataStore {
    fn get(&self, product: ProductKey, key: &str) -> Option<&str> {
        self.values
            .get(product)
            .and_then(|meta| meta.get(key))
            .map(String::as_str)
    }

    fn set(&mut self, product: ProductKey, key: &str, value: String) {
        if let Some(meta) = self.values.get_mut(product) {
            meta.insert(key.to_string(), value);
            return;
        }

        let mut meta = FxHashMap::default();
        meta.insert(key.to_string(), value);

        self.values.insert(product, meta);
    }

    fn unset(&mut self, product: ProductKey, key: &str) {
        if let Some(meta) = self.values.get_mut(product) {
            meta.remove(key);
        }
    }
}

/// Typed view of a product's shipping metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductShippingInfo {
    /// Non-negative shipping price, if one is set and numeric.
    pub price: Option<Decimal>,

    /// Trimmed, non-blank shipping time label, if one is set.
    pub time_label: Option<String>,
}

/// Typed shipping accessors over any [`MetadataStore`].
pub trait ShippingMeta {
    /// Custom shipping price for a product.
    ///
    /// Returns `None` when the value is missing, blank, non-numeric or negative.
    fn shipping_price(&self, product: ProductKey) -> Option<Decimal>;

    /// Custom shipping time label for a product, trimmed.
    ///
    /// Returns `None` when the value is missing or blank.
    fn shipping_time(&self, product: ProductKey) -> Option<&str>;

    /// Whether the product carries custom shipping.
    ///
    /// The stored price must be numeric and non-empty, where a raw value of
    /// exactly `"0"` counts as empty. Such a product still contributes zero to
    /// the shipping cost.
    fn has_custom_shipping_price(&self, product: ProductKey) -> bool;

    /// Both shipping fields for a product.
    fn shipping_info(&self, product: ProductKey) -> ProductShippingInfo {
        ProductShippingInfo {
            price: self.shipping_price(product),
            time_label: self.shipping_time(product).map(ToString::to_string),
        }
    }
}

impl<S: MetadataStore + ?Sized> ShippingMeta for S {
    fn shipping_price(&self, product: ProductKey) -> Option<Decimal> {
        let raw = self.get(product, PRICE_META_KEY)?;
        let price = parse_price(raw);

        if price.is_none() && !raw.trim().is_empty() {
            trace!(?product, raw, "ignoring non-numeric shipping price");
        }

        price
    }

    fn shipping_time(&self, product: ProductKey) -> Option<&str> {
        let raw = self.get(product, TIME_META_KEY)?;

        if is_empty_value(raw) {
            return None;
        }

        let label = raw.trim();

        (!label.is_empty()).then_some(label)
    }

    fn has_custom_shipping_price(&self, product: ProductKey) -> bool {
        self.get(product, PRICE_META_KEY)
            .is_some_and(|raw| !is_empty_value(raw) && parse_price(raw).is_some())
    }
}

/// Whether a raw stored value counts as empty: no characters, or exactly `"0"`.
pub fn is_empty_value(raw: &str) -> bool {
    raw.is_empty() || raw == "0"
}

/// Parse a stored shipping price.
///
/// Accepts plain decimals (`"4.50"`, `" 12 "`) and scientific notation (`"1e2"`).
/// Blank, non-numeric and negative values yield `None`.
pub fn parse_price(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim();

    if trimmed.is_empty() || trimmed.contains('_') {
        return None;
    }

    let value = Decimal::from_str(trimmed)
        .or_else(|_err| Decimal::from_scientific(trimmed))
        .ok()?;

    (!value.is_sign_negative() || value.is_zero()).then_some(value.normalize())
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use slotmap::SlotMap;

    use crate::products::Product;

    use super::*;

    fn product_key() -> ProductKey {
        let mut products = SlotMap::<ProductKey, Product>::with_key();

        products.insert(Product::new("Widget"))
    }

    #[test]
    fn get_returns_none_for_unknown_product() {
        let store = InMemoryMetadataStore::new();

        assert_eq!(store.get(product_key(), PRICE_META_KEY), None);
    }

    #[test]
    fn set_then_get_round_trips_raw_value() {
        let mut store = InMemoryMetadataStore::new();
        let product = product_key();

        store.set(product, PRICE_META_KEY, "4.50".to_string());
        store.set(product, TIME_META_KEY, "2-3 days".to_string());

        assert_eq!(store.get(product, PRICE_META_KEY), Some("4.50"));
        assert_eq!(store.get(product, TIME_META_KEY), Some("2-3 days"));
    }

    #[test]
    fn set_replaces_previous_value() {
        let mut store = InMemoryMetadataStore::new();
        let product = product_key();

        store.set(product, PRICE_META_KEY, "1".to_string());
        store.set(product, PRICE_META_KEY, "2".to_string());

        assert_eq!(store.get(product, PRICE_META_KEY), Some("2"));
    }

    #[test]
    fn unset_removes_only_that_key() {
        let mut store = InMemoryMetadataStore::new();
        let product = product_key();

        store.set(product, PRICE_META_KEY, "1".to_string());
        store.set(product, TIME_META_KEY, "5".to_string());
        store.unset(product, PRICE_META_KEY);

        assert_eq!(store.get(product, PRICE_META_KEY), None);
        assert_eq!(store.get(product, TIME_META_KEY), Some("5"));
    }

    #[test]
    fn parse_price_accepts_plain_decimals() {
        assert_eq!(parse_price("4.50"), Some(Decimal::new(45, 1)));
        assert_eq!(parse_price(" 12 "), Some(Decimal::new(12, 0)));
        assert_eq!(parse_price("0"), Some(Decimal::ZERO));
    }

    #[test]
    fn parse_price_accepts_scientific_notation() {
        assert_eq!(parse_price("1e2"), Some(Decimal::new(100, 0)));
    }

    #[test]
    fn parse_price_rejects_invalid_values() {
        assert_eq!(parse_price(""), None);
        assert_eq!(parse_price("   "), None);
        assert_eq!(parse_price("free"), None);
        assert_eq!(parse_price("5 GBP"), None);
        assert_eq!(parse_price("1_000"), None);
        assert_eq!(parse_price("-2"), None);
    }

    #[test]
    fn shipping_price_ignores_non_numeric_values() {
        let mut store = InMemoryMetadataStore::new();
        let product = product_key();

        store.set(product, PRICE_META_KEY, "call us".to_string());

        assert_eq!(store.shipping_price(product), None);
    }

    #[test]
    fn shipping_time_is_trimmed_and_blank_is_absent() {
        let mut store = InMemoryMetadataStore::new();
        let product = product_key();

        store.set(product, TIME_META_KEY, "  Express  ".to_string());
        assert_eq!(store.shipping_time(product), Some("Express"));

        store.set(product, TIME_META_KEY, "   ".to_string());
        assert_eq!(store.shipping_time(product), None);
    }

    #[test]
    fn shipping_info_combines_both_fields() {
        let mut store = InMemoryMetadataStore::new();
        let product = product_key();

        store.set(product, PRICE_META_KEY, "3.25".to_string());
        store.set(product, TIME_META_KEY, "5 days".to_string());

        let info = store.shipping_info(product);

        assert_eq!(info.price, Some(Decimal::new(325, 2)));
        assert_eq!(info.time_label.as_deref(), Some("5 days"));
        assert!(store.has_custom_shipping_price(product));
    }

    #[test]
    fn shipping_info_defaults_to_no_custom_shipping() {
        let store = InMemoryMetadataStore::new();

        let product = product_key();

        assert_eq!(store.shipping_info(product), ProductShippingInfo::default());
        assert!(!store.has_custom_shipping_price(product));
    }

    #[test]
    fn bare_zero_price_is_empty_but_still_numeric() {
        let mut store = InMemoryMetadataStore::new();
        let product = product_key();

        store.set(product, PRICE_META_KEY, "0".to_string());

        assert_eq!(store.shipping_price(product), Some(Decimal::ZERO));
        assert!(!store.has_custom_shipping_price(product));

        store.set(product, PRICE_META_KEY, "0.00".to_string());

        assert!(store.has_custom_shipping_price(product));
    }

    #[test]
    fn bare_zero_time_label_is_absent() {
        let mut store = InMemoryMetadataStore::new();
        let product = product_key();

        store.set(product, TIME_META_KEY, "0".to_string());
        assert_eq!(store.shipping_time(product), None);

        store.set(product, TIME_META_KEY, "0 days".to_string());
        assert_eq!(store.shipping_time(product), Some("0 days"));
    }

    #[test]
    fn is_empty_value_matches_only_blank_and_bare_zero() {
        assert!(is_empty_value(""));
        assert!(is_empty_value("0"));
        assert!(!is_empty_value("0.0"));
        assert!(!is_empty_value(" 0"));
        assert!(!is_empty_value("00"));
    }
}
