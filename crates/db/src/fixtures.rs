use rust_decimal::Decimal;
use webshop_core::domain::product::{Product, ProductId};
use webshop_core::errors::DomainError;

/// Sample catalog loaded into the in-memory product store at startup.
pub fn sample_products() -> Result<Vec<Product>, DomainError> {
    Ok(vec![
        Product::new(
            ProductId(1),
            "Gopher plushie",
            "A small purple Gophier plushie, perfect for kids and adults alike.",
            "",
            Decimal::new(1299, 2),
        )?,
        Product::new(
            ProductId(2),
            "PHP Elephant plushie",
            "An elephant with the PHP logo, available in blue and pink",
            "",
            Decimal::new(20, 0),
        )?,
    ])
}

pub fn sample_product_ids() -> Result<Vec<ProductId>, DomainError> {
    Ok(sample_products()?.into_iter().map(|product| product.id).collect())
}
