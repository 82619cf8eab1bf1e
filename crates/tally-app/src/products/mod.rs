//! # Product Handlers
//!
//! Catalog commands and queries. Every handler answers with
//! [`ProductResult`] or a page of them.

pub mod create;
pub mod get;
pub mod list;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tally_core::{Money, Product, Rating};
use uuid::Uuid;

pub use create::{CreateProductCommand, CreateProductHandler};
pub use get::{GetProductHandler, GetProductQuery};
pub use list::{ListProductsHandler, ListProductsQuery, ProductPage};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductResult {
    pub id: Uuid,
    pub title: String,
    pub price: Money,
    pub description: String,
    pub category: String,
    pub image: String,
    pub rating: Rating,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<&Product> for ProductResult {
    fn from(product: &Product) -> Self {
        ProductResult {
            id: product.id,
            title: product.title.clone(),
            price: product.price,
            description: product.description.clone(),
            category: product.category.clone(),
            image: product.image.clone(),
            rating: product.rating,
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}
