use std::sync::Arc;

use async_trait::async_trait;

use webshop_core::domain::product::{Product, ProductId};

use super::ProductService;
use crate::repositories::{ProductRepository, RepositoryError};

pub struct DelegatingProductService {
    repository: Arc<dyn ProductRepository>,
}

impl DelegatingProductService {
    pub fn new(repository: Arc<dyn ProductRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl ProductService for DelegatingProductService {
    async fn list_products(&self) -> Result<Vec<Product>, RepositoryError> {
        self.repository.get_all().await
    }

    async fn show_product(&self, id: ProductId) -> Result<Product, RepositoryError> {
        self.repository.get_by_id(id).await
    }
}
