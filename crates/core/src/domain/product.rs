use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub i64);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ProductId {
    type Err = ParseIntError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        value.parse::<i64>().map(Self)
    }
}

/// Catalog item. Values are never mutated once stored.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(rename = "desc")]
    pub description: String,
    #[serde(rename = "img")]
    pub image: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

impl Product {
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        description: impl Into<String>,
        image: impl Into<String>,
        price: Decimal,
    ) -> Result<Self, DomainError> {
        let product = Self {
            id,
            name: name.into(),
            description: description.into(),
            image: image.into(),
            price,
        };
        product.ensure_valid()?;
        Ok(product)
    }

    /// Fields are public, so stores re-check this on anything handed to them.
    pub fn ensure_valid(&self) -> Result<(), DomainError> {
        if self.price < Decimal::ZERO {
            return Err(DomainError::InvariantViolation(format!(
                "product {} has a negative price ({})",
                self.id, self.price
            )));
        }
        Ok(())
    }

    pub fn formatted_price(&self) -> String {
        format!("€{:.2}", self.price)
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {} - {} ({})", self.id, self.name, self.description, self.formatted_price())
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use serde_json::json;

    use super::{Product, ProductId};
    use crate::errors::DomainError;

    fn plushie() -> Product {
        Product::new(
            ProductId(1),
            "Gopher plushie",
            "A small purple plushie",
            "",
            Decimal::new(1299, 2),
        )
        .expect("valid product")
    }

    #[test]
    fn rejects_negative_price() {
        let error = Product::new(ProductId(3), "Broken", "", "", Decimal::new(-1, 2))
            .expect_err("negative price should fail");

        assert!(matches!(error, DomainError::InvariantViolation(_)));
    }

    #[test]
    fn struct_literals_with_negative_prices_fail_validation() {
        let mut product = plushie();
        assert!(product.ensure_valid().is_ok());

        product.price = Decimal::new(-500, 2);
        assert!(matches!(product.ensure_valid(), Err(DomainError::InvariantViolation(_))));
    }

    #[test]
    fn accepts_free_products() {
        let product =
            Product::new(ProductId(4), "Sticker", "", "", Decimal::ZERO).expect("zero price");
        assert_eq!(product.formatted_price(), "€0.00");
    }

    #[test]
    fn display_includes_id_name_and_euro_price() {
        assert_eq!(plushie().to_string(), "[1] Gopher plushie - A small purple plushie (€12.99)");

        let whole = Product::new(ProductId(2), "Elephant", "blue", "", Decimal::new(20, 0))
            .expect("valid product");
        assert_eq!(whole.formatted_price(), "€20.00");
    }

    #[test]
    fn serializes_with_short_field_names_and_numeric_price() {
        let value = serde_json::to_value(plushie()).expect("serialize product");

        assert_eq!(
            value,
            json!({
                "id": 1,
                "name": "Gopher plushie",
                "desc": "A small purple plushie",
                "img": "",
                "price": 12.99
            })
        );
    }

    #[test]
    fn product_id_parses_from_path_segments() {
        assert_eq!("42".parse::<ProductId>().expect("numeric id"), ProductId(42));
        assert!("abc".parse::<ProductId>().is_err());
    }

    #[test]
    fn product_id_rejects_surrounding_whitespace() {
        for raw in [" 42", "42 ", " 42 ", ""] {
            assert!(raw.parse::<ProductId>().is_err(), "`{raw}` should not parse");
        }
    }
}
