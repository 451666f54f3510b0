//! Service layer between the HTTP handlers and the repositories.
//!
//! Every call is forwarded unchanged; handlers only see the traits below so
//! the storage behind them can be swapped.

use async_trait::async_trait;

use webshop_core::domain::basket::{Basket, UserId};
use webshop_core::domain::product::{Product, ProductId};

use crate::repositories::RepositoryError;

pub mod basket;
pub mod product;

pub use basket::DelegatingBasketService;
pub use product::DelegatingProductService;

#[async_trait]
pub trait ProductService: Send + Sync {
    async fn list_products(&self) -> Result<Vec<Product>, RepositoryError>;
    async fn show_product(&self, id: ProductId) -> Result<Product, RepositoryError>;
}

#[async_trait]
pub trait BasketService: Send + Sync {
    async fn get_basket(&self, user_id: UserId) -> Result<Basket, RepositoryError>;
    async fn add_to_basket(
        &self,
        user_id: UserId,
        product_id: ProductId,
        quantity: i64,
    ) -> Result<(), RepositoryError>;
    async fn remove_from_basket(
        &self,
        user_id: UserId,
        product_id: ProductId,
        quantity: i64,
    ) -> Result<(), RepositoryError>;
}
