//! # Create Product

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tally_core::validation::validate_product;
use tally_core::{Money, Product, Rating};
use tracing::{debug, info, warn};

use super::ProductResult;
use crate::error::AppResult;
use crate::repository::ProductRepository;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductCommand {
    pub title: String,
    pub price: Money,
    #[serde(default)]
    pub description: String,
    pub category: String,
    pub image: String,
    #[serde(default)]
    pub rating: Rating,
}

impl From<CreateProductCommand> for Product {
    fn from(command: CreateProductCommand) -> Self {
        let mut product = Product::new(
            command.title,
            command.price,
            command.description,
            command.category,
            command.image,
        );
        product.rating = command.rating;
        product
    }
}

pub struct CreateProductHandler {
    products: Arc<dyn ProductRepository>,
}

impl CreateProductHandler {
    pub fn new(products: Arc<dyn ProductRepository>) -> Self {
        CreateProductHandler { products }
    }

    pub async fn handle(&self, command: CreateProductCommand) -> AppResult<ProductResult> {
        debug!(title = %command.title, "create_product command");

        let product = Product::from(command);
        let report = validate_product(&product);
        if !report.is_valid() {
            warn!(violations = report.violations().len(), "Create product rejected");
            return Err(report.into());
        }

        let product = self.products.create(product).await?;
        info!(product_id = %product.id, price = %product.price, "Product created");

        Ok(ProductResult::from(&product))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    use crate::error::AppError;
    use crate::repository::InMemoryProductRepository;

    fn command() -> CreateProductCommand {
        CreateProductCommand {
            title: "Espresso Beans".to_string(),
            price: Money::new(dec!(12.99)),
            description: "Dark roast, 1kg".to_string(),
            category: "coffee".to_string(),
            image: "https://cdn.example.com/beans.png".to_string(),
            rating: Rating {
                rate: dec!(4.5),
                count: 120,
            },
        }
    }

    #[tokio::test]
    async fn test_create_product() {
        let repo = Arc::new(InMemoryProductRepository::new());
        let handler = CreateProductHandler::new(repo.clone());

        let result = handler.handle(command()).await.unwrap();

        assert_eq!(result.title, "Espresso Beans");
        assert_eq!(result.rating.count, 120);
        assert!(repo.get_by_id(result.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_invalid_product_is_rejected() {
        let handler = CreateProductHandler::new(Arc::new(InMemoryProductRepository::new()));
        let mut cmd = command();
        cmd.title = "ab".to_string();
        cmd.price = Money::zero();
        cmd.image = "beans.png".to_string();
        cmd.rating.rate = dec!(7);

        let err = handler.handle(cmd).await.unwrap_err();
        let AppError::Validation(report) = err else {
            panic!("expected validation error");
        };

        for path in ["title", "price", "image", "rating.rate"] {
            assert!(report.has_violation_at(path), "missing violation at {}", path);
        }
        assert!(!report.has_violation_at("category"));
    }
}
