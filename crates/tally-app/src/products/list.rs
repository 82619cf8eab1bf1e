//! # List Products

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tally_core::validation::validate_page;
use tracing::debug;

use super::ProductResult;
use crate::error::AppResult;
use crate::repository::{ProductOrder, ProductRepository};
use crate::sales::list::total_pages;

fn first_page() -> u32 {
    1
}

/// Paged catalog listing, optionally ordered by `"<field> [asc|desc]"`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListProductsQuery {
    #[serde(default = "first_page")]
    pub page: u32,
    #[serde(default)]
    pub size: Option<u32>,
    #[serde(default)]
    pub order: Option<String>,
}

impl Default for ListProductsQuery {
    fn default() -> Self {
        ListProductsQuery {
            page: first_page(),
            size: None,
            order: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPage {
    pub items: Vec<ProductResult>,
    pub total_count: u64,
    pub page: u32,
    pub size: u32,
    pub total_pages: u32,
}

pub struct ListProductsHandler {
    products: Arc<dyn ProductRepository>,
    default_page_size: u32,
    max_page_size: u32,
}

impl ListProductsHandler {
    pub fn new(
        products: Arc<dyn ProductRepository>,
        default_page_size: u32,
        max_page_size: u32,
    ) -> Self {
        ListProductsHandler {
            products,
            default_page_size,
            max_page_size,
        }
    }

    pub async fn handle(&self, query: ListProductsQuery) -> AppResult<ProductPage> {
        let size = query.size.unwrap_or(self.default_page_size);
        debug!(page = query.page, size, order = ?query.order, "list_products query");

        let mut report = validate_page(query.page, size, self.max_page_size, "size");
        let order = match query.order.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => match raw.parse::<ProductOrder>() {
                Ok(order) => Some(order),
                Err(err) => {
                    report.push("order", err);
                    None
                }
            },
        };
        report.into_result()?;

        let found = self.products.list(query.page, size, order).await?;

        Ok(ProductPage {
            items: found.items.iter().map(ProductResult::from).collect(),
            total_count: found.total_count,
            page: query.page,
            size,
            total_pages: total_pages(found.total_count, size),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use tally_core::{Money, Product};

    use crate::error::AppError;
    use crate::repository::InMemoryProductRepository;

    async fn seeded() -> Arc<InMemoryProductRepository> {
        let repo = Arc::new(InMemoryProductRepository::new());
        for (title, price, category) in [
            ("Oolong", dec!(8), "tea"),
            ("Arabica", dec!(15), "coffee"),
            ("Matcha", dec!(22), "tea"),
        ] {
            repo.create(Product::new(
                title,
                Money::new(price),
                "",
                category,
                "https://cdn.example.com/p.png",
            ))
            .await
            .unwrap();
        }
        repo
    }

    #[tokio::test]
    async fn test_default_query_is_first_page() {
        let query = ListProductsQuery::default();
        assert_eq!(query.page, 1);

        let handler = ListProductsHandler::new(seeded().await, 10, 100);
        let page = handler.handle(query).await.unwrap();
        assert_eq!(page.page, 1);
        assert_eq!(page.items.len(), 3);
    }

    #[tokio::test]
    async fn test_list_ordered_by_price_desc() {
        let handler = ListProductsHandler::new(seeded().await, 10, 100);

        let page = handler
            .handle(ListProductsQuery {
                page: 1,
                size: Some(2),
                order: Some("price desc".to_string()),
            })
            .await
            .unwrap();

        let titles: Vec<_> = page.items.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["Matcha", "Arabica"]);
        assert_eq!(page.total_count, 3);
        assert_eq!(page.total_pages, 2);
    }

    #[tokio::test]
    async fn test_unknown_order_field_is_violation() {
        let handler = ListProductsHandler::new(seeded().await, 10, 100);

        let err = handler
            .handle(ListProductsQuery {
                page: 1,
                size: None,
                order: Some("rating desc".to_string()),
            })
            .await
            .unwrap_err();

        let AppError::Validation(report) = err else {
            panic!("expected validation error");
        };
        assert!(report.has_violation_at("order"));
    }

    #[tokio::test]
    async fn test_size_above_max_is_violation() {
        let handler = ListProductsHandler::new(seeded().await, 10, 20);

        let err = handler
            .handle(ListProductsQuery {
                page: 1,
                size: Some(21),
                order: None,
            })
            .await
            .unwrap_err();

        let AppError::Validation(report) = err else {
            panic!("expected validation error");
        };
        assert!(report.has_violation_at("size"));
    }
}
