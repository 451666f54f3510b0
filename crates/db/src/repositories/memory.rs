use std::collections::HashMap;

use tokio::sync::RwLock;
use tracing::debug;

use webshop_core::domain::basket::{Basket, UserId};
use webshop_core::domain::product::{Product, ProductId};
use webshop_core::errors::DomainError;

use super::{BasketRepository, ProductRepository, RepositoryError};
use crate::fixtures;

pub struct InMemoryProductRepository {
    products: RwLock<HashMap<ProductId, Product>>,
}

impl InMemoryProductRepository {
    /// Fails on the first product that breaks a domain invariant.
    pub fn new(products: impl IntoIterator<Item = Product>) -> Result<Self, RepositoryError> {
        let products = products
            .into_iter()
            .map(|product| product.ensure_valid().map(|()| (product.id, product)))
            .collect::<Result<HashMap<_, _>, _>>()?;
        Ok(Self { products: RwLock::new(products) })
    }

    /// Repository preloaded with the sample catalog.
    pub fn seeded() -> Result<Self, RepositoryError> {
        Self::new(fixtures::sample_products()?)
    }

    pub async fn product_count(&self) -> usize {
        self.products.read().await.len()
    }
}

#[async_trait::async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn get_all(&self) -> Result<Vec<Product>, RepositoryError> {
        let products = self.products.read().await;
        Ok(products.values().cloned().collect())
    }

    async fn get_by_id(&self, id: ProductId) -> Result<Product, RepositoryError> {
        let products = self.products.read().await;
        products.get(&id).cloned().ok_or(RepositoryError::Domain(DomainError::ProductNotFound(id)))
    }
}

#[derive(Default)]
pub struct InMemoryBasketRepository {
    baskets: RwLock<HashMap<UserId, Basket>>,
}

#[async_trait::async_trait]
impl BasketRepository for InMemoryBasketRepository {
    async fn get_basket(&self, user_id: UserId) -> Result<Basket, RepositoryError> {
        let mut baskets = self.baskets.write().await;
        let basket = baskets.entry(user_id).or_insert_with(|| Basket::empty(user_id));
        Ok(basket.clone())
    }

    async fn add_item(
        &self,
        user_id: UserId,
        product_id: ProductId,
        quantity: i64,
    ) -> Result<(), RepositoryError> {
        let mut baskets = self.baskets.write().await;
        let basket = baskets.get_mut(&user_id).ok_or(DomainError::BasketNotFound(user_id))?;
        basket.push_item(product_id, quantity);
        Ok(())
    }

    async fn remove_item(
        &self,
        user_id: UserId,
        product_id: ProductId,
        _quantity: i64,
    ) -> Result<(), RepositoryError> {
        let mut baskets = self.baskets.write().await;
        let basket = baskets.get_mut(&user_id).ok_or(DomainError::BasketNotFound(user_id))?;
        if !basket.remove_first(product_id) {
            debug!(
                event_name = "storage.basket.remove_missing",
                user_id = user_id.0,
                product_id = product_id.0,
                "product not in basket; nothing removed"
            );
        }
        Ok(())
    }
}
