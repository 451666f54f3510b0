use std::sync::Arc;

use async_trait::async_trait;

use webshop_core::domain::basket::{Basket, UserId};
use webshop_core::domain::product::ProductId;

use super::BasketService;
use crate::repositories::{BasketRepository, RepositoryError};

pub struct DelegatingBasketService {
    repository: Arc<dyn BasketRepository>,
}

impl DelegatingBasketService {
    pub fn new(repository: Arc<dyn BasketRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl BasketService for DelegatingBasketService {
    async fn get_basket(&self, user_id: UserId) -> Result<Basket, RepositoryError> {
        self.repository.get_basket(user_id).await
    }

    async fn add_to_basket(
        &self,
        user_id: UserId,
        product_id: ProductId,
        quantity: i64,
    ) -> Result<(), RepositoryError> {
        self.repository.add_item(user_id, product_id, quantity).await
    }

    async fn remove_from_basket(
        &self,
        user_id: UserId,
        product_id: ProductId,
        quantity: i64,
    ) -> Result<(), RepositoryError> {
        self.repository.remove_item(user_id, product_id, quantity).await
    }
}
