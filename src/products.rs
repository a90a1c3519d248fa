//! Products

use slotmap::new_key_type;

new_key_type! {
    /// Product Key
    pub struct ProductKey;
}

/// Product catalogue entry.
///
/// Shipping settings are not stored on the product itself; they live in the
/// host's [`MetadataStore`](crate::metadata::MetadataStore) keyed by [`ProductKey`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    /// Product name
    pub name: String,
}

impl Product {
    /// Create a new product with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}
