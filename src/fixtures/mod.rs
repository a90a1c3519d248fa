//! Fixtures
//!
//! YAML fixture sets describing a catalogue with custom shipping settings
//! (`products/<set>.yml`) and a cart (`carts/<set>.yml`).

use std::{fs, path::PathBuf};

use rustc_hash::FxHashMap;
use slotmap::SlotMap;
use thiserror::Error;
use tracing::debug;

use crate::{
    admin::save_shipping_fields,
    cart::{Cart, CartError, CartLine},
    fixtures::{carts::CartFixture, products::ProductsFixture},
    metadata::InMemoryMetadataStore,
    products::{Product, ProductKey},
};

pub mod carts;
pub mod products;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Product not found
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Cart construction error
    #[error("Failed to create cart: {0}")]
    Cart(#[from] CartError),
}

/// Fixture
#[derive(Debug)]
pub struct Fixture {
    /// Base path for fixture files
    base_path: PathBuf,

    /// Product catalogue
    products: SlotMap<ProductKey, Product>,

    /// String key -> `SlotMap` key mappings for lookups
    product_keys: FxHashMap<String, ProductKey>,

    /// Product metadata, as saved through the product edit form
    store: InMemoryMetadataStore,

    /// Cart built from the loaded cart lines
    cart: Cart,
}

impl Fixture {
    /// Create a new empty fixture with default base path
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a new empty fixture with custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            products: SlotMap::with_key(),
            product_keys: FxHashMap::default(),
            store: InMemoryMetadataStore::new(),
            cart: Cart::new(),
        }
    }

    /// Load products from a YAML fixture file.
    ///
    /// Each product's shipping values are saved through the product edit form
    /// handling, so they are sanitised exactly as an admin submission would be.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_products(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("products").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: ProductsFixture = serde_norway::from_str(&contents)?;

        for (key, product_fixture) in fixture.products {
            let (product, submission) = product_fixture.into_parts();
            let product_key = self.products.insert(product);

            save_shipping_fields(&mut self.store, product_key, &submission);

            self.product_keys.insert(key, product_key);
        }

        debug!(set = name, products = self.products.len(), "loaded product fixtures");

        Ok(self)
    }

    /// Load cart lines from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, if referenced
    /// products don't exist or a line has a zero quantity.
    pub fn load_cart(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("carts").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: CartFixture = serde_norway::from_str(&contents)?;

        for line in fixture.lines {
            let product_key = self.product_key(&line.product)?;

            self.cart
                .add_line(CartLine::new(product_key, line.quantity))?;
        }

        debug!(set = name, lines = self.cart.len(), "loaded cart fixture");

        Ok(self)
    }

    /// Load a complete fixture set (products and cart with the same name)
    ///
    /// # Errors
    ///
    /// Returns an error if any of the fixture files cannot be loaded.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        Self::from_set_in("./fixtures", name)
    }

    /// Load a complete fixture set from a custom base path
    ///
    /// # Errors
    ///
    /// Returns an error if any of the fixture files cannot be loaded.
    pub fn from_set_in(base_path: impl Into<PathBuf>, name: &str) -> Result<Self, FixtureError> {
        let mut fixture = Self::with_base_path(base_path);

        fixture.load_products(name)?.load_cart(name)?;

        Ok(fixture)
    }

    /// Get a product by its string key
    ///
    /// # Errors
    ///
    /// Returns an error if the product is not found.
    pub fn product(&self, key: &str) -> Result<&Product, FixtureError> {
        let product_key = self.product_key(key)?;

        self.products
            .get(product_key)
            .ok_or_else(|| FixtureError::ProductNotFound(key.to_string()))
    }

    /// Get a product key by its string key
    ///
    /// # Errors
    ///
    /// Returns an error if the product is not found.
    pub fn product_key(&self, key: &str) -> Result<ProductKey, FixtureError> {
        self.product_keys
            .get(key)
            .copied()
            .ok_or_else(|| FixtureError::ProductNotFound(key.to_string()))
    }

    /// Get the product catalogue
    pub fn products(&self) -> &SlotMap<ProductKey, Product> {
        &self.products
    }

    /// Get the metadata store
    pub fn store(&self) -> &InMemoryMetadataStore {
        &self.store
    }

    /// Get the metadata store, mutably
    pub fn store_mut(&mut self) -> &mut InMemoryMetadataStore {
        &mut self.store
    }

    /// Get the cart
    pub fn cart(&self) -> &Cart {
        &self.cart
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::{fs, path::Path};

    use testresult::TestResult;

    use crate::metadata::{MetadataStore, PRICE_META_KEY, ShippingMeta, TIME_META_KEY};

    use super::*;

    fn write_fixture(base: &Path, category: &str, name: &str, contents: &str) -> TestResult {
        let dir = base.join(category);

        fs::create_dir_all(&dir)?;
        fs::write(dir.join(format!("{name}.yml")), contents)?;

        Ok(())
    }

    const PRODUCTS: &str = r#"
products:
  mug:
    name: Enamel Mug
    shipping_price: " 2.50 "
    shipping_time: "3 days"
  card:
    name: Greeting Card
"#;

    #[test]
    fn load_products_saves_sanitised_shipping_fields() -> TestResult {
        let dir = tempfile::tempdir()?;
        write_fixture(dir.path(), "products", "shop", PRODUCTS)?;

        let mut fixture = Fixture::with_base_path(dir.path());
        fixture.load_products("shop")?;

        let mug = fixture.product_key("mug")?;
        let card = fixture.product_key("card")?;

        assert_eq!(fixture.product("mug")?.name, "Enamel Mug");
        assert_eq!(fixture.store().get(mug, PRICE_META_KEY), Some("2.50"));
        assert_eq!(fixture.store().shipping_time(mug), Some("3 days"));
        assert_eq!(fixture.store().get(card, PRICE_META_KEY), None);
        assert_eq!(fixture.store().get(card, TIME_META_KEY), None);
        assert_eq!(fixture.products().len(), 2);

        Ok(())
    }

    #[test]
    fn from_set_in_loads_products_and_cart() -> TestResult {
        let dir = tempfile::tempdir()?;
        write_fixture(dir.path(), "products", "shop", PRODUCTS)?;
        write_fixture(
            dir.path(),
            "carts",
            "shop",
            "lines:\n  - product: mug\n    quantity: 2\n  - product: card\n",
        )?;

        let fixture = Fixture::from_set_in(dir.path(), "shop")?;

        assert_eq!(fixture.cart().len(), 2);
        assert_eq!(fixture.cart().get_line(0)?.quantity(), 2);
        assert_eq!(fixture.cart().get_line(0)?.product(), fixture.product_key("mug")?);

        Ok(())
    }

    #[test]
    fn load_cart_errors_on_unknown_product() -> TestResult {
        let dir = tempfile::tempdir()?;
        write_fixture(dir.path(), "products", "shop", PRODUCTS)?;
        write_fixture(dir.path(), "carts", "shop", "lines:\n  - product: lamp\n")?;

        let result = Fixture::from_set_in(dir.path(), "shop");

        assert!(
            matches!(result, Err(FixtureError::ProductNotFound(ref key)) if key == "lamp"),
            "expected ProductNotFound, got {result:?}"
        );

        Ok(())
    }

    #[test]
    fn load_cart_errors_on_zero_quantity() -> TestResult {
        let dir = tempfile::tempdir()?;
        write_fixture(dir.path(), "products", "shop", PRODUCTS)?;
        write_fixture(
            dir.path(),
            "carts",
            "shop",
            "lines:\n  - product: mug\n    quantity: 0\n",
        )?;

        let result = Fixture::from_set_in(dir.path(), "shop");

        assert!(
            matches!(result, Err(FixtureError::Cart(CartError::ZeroQuantity(0)))),
            "expected ZeroQuantity, got {result:?}"
        );

        Ok(())
    }

    #[test]
    fn missing_file_is_io_error() {
        let result = Fixture::from_set_in("./does-not-exist", "shop");

        assert!(matches!(result, Err(FixtureError::Io(_))), "got {result:?}");
    }

    #[test]
    fn bundled_mixed_set_loads() -> TestResult {
        let fixture = Fixture::from_set("mixed")?;

        assert!(!fixture.cart().is_empty());
        assert!(fixture.store().shipping_price(fixture.product_key("mug")?).is_some());

        Ok(())
    }
}
