//! Cart Fixtures

use serde::Deserialize;

/// Wrapper for cart lines in YAML
#[derive(Debug, Deserialize)]
pub struct CartFixture {
    /// Cart lines, in order
    pub lines: Vec<CartLineFixture>,
}

/// Cart Line Fixture
#[derive(Debug, Deserialize)]
pub struct CartLineFixture {
    /// Product key reference
    pub product: String,

    /// Quantity
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn quantity_defaults_to_one() -> TestResult {
        let fixture: CartFixture = serde_norway::from_str(
            r"
lines:
  - product: mug
    quantity: 3
  - product: card
",
        )?;

        let quantities: Vec<u32> = fixture.lines.iter().map(|line| line.quantity).collect();

        assert_eq!(quantities, vec![3, 1]);

        Ok(())
    }
}
