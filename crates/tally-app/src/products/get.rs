//! # Get Product

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use super::ProductResult;
use crate::error::{AppError, AppResult};
use crate::repository::ProductRepository;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetProductQuery {
    pub id: Uuid,
}

pub struct GetProductHandler {
    products: Arc<dyn ProductRepository>,
}

impl GetProductHandler {
    pub fn new(products: Arc<dyn ProductRepository>) -> Self {
        GetProductHandler { products }
    }

    pub async fn handle(&self, query: GetProductQuery) -> AppResult<ProductResult> {
        debug!(id = %query.id, "get_product query");

        self.products
            .get_by_id(query.id)
            .await?
            .map(|product| ProductResult::from(&product))
            .ok_or_else(|| AppError::not_found("Product", query.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use tally_core::{Money, Product};

    use crate::error::ErrorCode;
    use crate::repository::InMemoryProductRepository;

    #[tokio::test]
    async fn test_get_product() {
        let repo = Arc::new(InMemoryProductRepository::new());
        let product = repo
            .create(Product::new(
                "Green Tea",
                Money::new(dec!(4.20)),
                "",
                "tea",
                "https://cdn.example.com/tea.png",
            ))
            .await
            .unwrap();
        let handler = GetProductHandler::new(repo);

        let found = handler.handle(GetProductQuery { id: product.id }).await.unwrap();
        assert_eq!(found.title, "Green Tea");

        let err = handler
            .handle(GetProductQuery { id: Uuid::new_v4() })
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::NotFound);
    }
}
