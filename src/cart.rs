//! Cart

use thiserror::Error;

use crate::products::ProductKey;

/// Errors related to cart construction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    /// A line was given a zero quantity (line index).
    #[error("Cart line {0} has a quantity of zero")]
    ZeroQuantity(usize),

    /// A line was not found in the cart.
    #[error("Cart line {0} not found")]
    LineNotFound(usize),
}

/// One product-plus-quantity entry in a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartLine {
    product: ProductKey,
    quantity: u32,
}

impl CartLine {
    /// Create a new cart line.
    ///
    /// The quantity is validated when the line is added to a [`Cart`].
    pub fn new(product: ProductKey, quantity: u32) -> Self {
        Self { product, quantity }
    }

    /// Returns the product of the line
    pub fn product(&self) -> ProductKey {
        self.product
    }

    /// Returns the quantity of the line
    pub fn quantity(&self) -> u32 {
        self.quantity
    }
}

/// Cart
///
/// A materialised snapshot of the host's active cart. It is read-only for the
/// duration of one checkout evaluation.
#[derive(Debug, Clone, Default)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create a new, empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new cart with the given lines.
    ///
    /// # Errors
    ///
    /// Returns a `CartError::ZeroQuantity` if any line has a quantity of zero.
    pub fn with_lines(lines: impl Into<Vec<CartLine>>) -> Result<Self, CartError> {
        let lines = lines.into();

        lines.iter().enumerate().try_for_each(|(i, line)| {
            if line.quantity == 0 {
                Err(CartError::ZeroQuantity(i))
            } else {
                Ok(())
            }
        })?;

        Ok(Cart { lines })
    }

    /// Add a line to the cart.
    ///
    /// # Errors
    ///
    /// Returns a `CartError::ZeroQuantity` if the line has a quantity of zero.
    pub fn add_line(&mut self, line: CartLine) -> Result<(), CartError> {
        if line.quantity == 0 {
            return Err(CartError::ZeroQuantity(self.lines.len()));
        }

        self.lines.push(line);

        Ok(())
    }

    /// Get a line from the cart.
    ///
    /// # Errors
    ///
    /// Returns a `CartError::LineNotFound` if the line is not found.
    pub fn get_line(&self, line: usize) -> Result<&CartLine, CartError> {
        self.lines.get(line).ok_or(CartError::LineNotFound(line))
    }

    /// Iterate over the lines in the cart.
    pub fn iter(&self) -> impl Iterator<Item = &CartLine> {
        self.lines.iter()
    }

    /// Get the number of lines in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the cart is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use slotmap::SlotMap;
    use testresult::TestResult;

    use crate::products::Product;

    use super::*;

    fn test_lines() -> [CartLine; 3] {
        let mut products = SlotMap::<ProductKey, Product>::with_key();

        [
            CartLine::new(products.insert(Product::new("Mug")), 1),
            CartLine::new(products.insert(Product::new("Poster")), 2),
            CartLine::new(products.insert(Product::new("Print")), 3),
        ]
    }

    #[test]
    fn with_lines_zero_quantity_errors() {
        let lines = [
            CartLine::new(ProductKey::default(), 1),
            CartLine::new(ProductKey::default(), 0),
        ];

        let result = Cart::with_lines(lines);

        assert_eq!(result.err(), Some(CartError::ZeroQuantity(1)));
    }

    #[test]
    fn with_lines_positive_quantities_succeeds() -> TestResult {
        let cart = Cart::with_lines(test_lines())?;

        assert_eq!(cart.len(), 3);

        Ok(())
    }

    #[test]
    fn add_line_rejects_zero_quantity() {
        let mut cart = Cart::new();

        let result = cart.add_line(CartLine::new(ProductKey::default(), 0));

        assert_eq!(result, Err(CartError::ZeroQuantity(0)));
        assert!(cart.is_empty());
    }

    #[test]
    fn add_line_appends() -> TestResult {
        let mut cart = Cart::new();

        cart.add_line(CartLine::new(ProductKey::default(), 4))?;

        assert_eq!(cart.get_line(0)?.quantity(), 4);

        Ok(())
    }

    #[test]
    fn is_empty() -> TestResult {
        let empty_cart = Cart::with_lines([])?;
        let non_empty_cart = Cart::with_lines(test_lines())?;

        assert!(empty_cart.is_empty());
        assert!(!non_empty_cart.is_empty());

        Ok(())
    }

    #[test]
    fn iter_returns_lines_in_order() -> TestResult {
        let cart = Cart::with_lines(test_lines())?;

        let quantities: Vec<u32> = cart.iter().map(CartLine::quantity).collect();

        assert_eq!(quantities, vec![1, 2, 3]);

        Ok(())
    }

    #[test]
    fn get_line_missing_returns_error() {
        let cart = Cart::new();

        let err = cart.get_line(0).err();

        assert!(matches!(err, Some(CartError::LineNotFound(0))));
    }
}
