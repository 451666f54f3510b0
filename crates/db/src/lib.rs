pub mod fixtures;
pub mod repositories;
pub mod services;

pub use repositories::{
    BasketRepository, InMemoryBasketRepository, InMemoryProductRepository, ProductRepository,
    RepositoryError,
};
pub use services::{BasketService, DelegatingBasketService, DelegatingProductService, ProductService};
