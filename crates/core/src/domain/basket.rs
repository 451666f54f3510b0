use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::product::ProductId;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub i64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One line of a basket. The product id is not checked against the catalog
/// and the quantity is taken as given.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasketItem {
    #[serde(rename = "ProductID")]
    pub product_id: ProductId,
    #[serde(rename = "Quantity")]
    pub quantity: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Basket {
    #[serde(rename = "UserID")]
    pub user_id: UserId,
    #[serde(rename = "Items")]
    pub items: Vec<BasketItem>,
}

impl Basket {
    pub fn empty(user_id: UserId) -> Self {
        Self { user_id, items: Vec::new() }
    }

    /// Appends a new line, even when the product is already in the basket.
    pub fn push_item(&mut self, product_id: ProductId, quantity: i64) {
        self.items.push(BasketItem { product_id, quantity });
    }

    /// Drops the first line for `product_id`. Returns whether a line was removed.
    pub fn remove_first(&mut self, product_id: ProductId) -> bool {
        match self.items.iter().position(|item| item.product_id == product_id) {
            Some(index) => {
                self.items.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{Basket, BasketItem, UserId};
    use crate::domain::product::ProductId;

    #[test]
    fn push_item_keeps_duplicate_products_as_separate_lines() {
        let mut basket = Basket::empty(UserId(5));
        basket.push_item(ProductId(1), 2);
        basket.push_item(ProductId(1), 4);

        assert_eq!(
            basket.items,
            vec![
                BasketItem { product_id: ProductId(1), quantity: 2 },
                BasketItem { product_id: ProductId(1), quantity: 4 },
            ]
        );
    }

    #[test]
    fn remove_first_only_drops_the_earliest_match() {
        let mut basket = Basket::empty(UserId(5));
        basket.push_item(ProductId(2), 1);
        basket.push_item(ProductId(1), 2);
        basket.push_item(ProductId(1), 4);

        assert!(basket.remove_first(ProductId(1)));
        assert_eq!(
            basket.items,
            vec![
                BasketItem { product_id: ProductId(2), quantity: 1 },
                BasketItem { product_id: ProductId(1), quantity: 4 },
            ]
        );
    }

    #[test]
    fn remove_first_reports_missing_products() {
        let mut basket = Basket::empty(UserId(5));
        basket.push_item(ProductId(2), 1);

        assert!(!basket.remove_first(ProductId(9)));
        assert_eq!(basket.items.len(), 1);
    }

    #[test]
    fn serializes_with_capitalised_field_names() {
        let mut basket = Basket::empty(UserId(1));
        basket.push_item(ProductId(2), -3);

        let value = serde_json::to_value(&basket).expect("serialize basket");
        assert_eq!(value, json!({ "UserID": 1, "Items": [{ "ProductID": 2, "Quantity": -3 }] }));
    }
}
