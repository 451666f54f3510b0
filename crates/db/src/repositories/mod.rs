use async_trait::async_trait;
use thiserror::Error;

use webshop_core::domain::basket::{Basket, UserId};
use webshop_core::domain::product::{Product, ProductId};
use webshop_core::errors::{ApplicationError, DomainError};

pub mod memory;

pub use memory::{InMemoryBasketRepository, InMemoryProductRepository};

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum RepositoryError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl RepositoryError {
    pub fn is_product_not_found(&self) -> bool {
        matches!(self, Self::Domain(DomainError::ProductNotFound(_)))
    }
}

impl From<RepositoryError> for ApplicationError {
    fn from(value: RepositoryError) -> Self {
        match value {
            RepositoryError::Domain(error) => Self::Domain(error),
            RepositoryError::Unavailable(message) => Self::Storage(message),
        }
    }
}

#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Every stored product. Ordering is not part of the contract.
    async fn get_all(&self) -> Result<Vec<Product>, RepositoryError>;
    async fn get_by_id(&self, id: ProductId) -> Result<Product, RepositoryError>;
}

#[async_trait]
pub trait BasketRepository: Send + Sync {
    /// Returns the user's basket, creating and storing an empty one on first access.
    async fn get_basket(&self, user_id: UserId) -> Result<Basket, RepositoryError>;

    /// Appends a line. Fails with `BasketNotFound` until `get_basket` has run for the user.
    async fn add_item(
        &self,
        user_id: UserId,
        product_id: ProductId,
        quantity: i64,
    ) -> Result<(), RepositoryError>;

    /// Drops the first line for `product_id` whatever `quantity` says.
    /// A product that is not in the basket is not an error.
    async fn remove_item(
        &self,
        user_id: UserId,
        product_id: ProductId,
        quantity: i64,
    ) -> Result<(), RepositoryError>;
}
