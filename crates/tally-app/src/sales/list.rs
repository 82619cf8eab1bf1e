//! # List Sales

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tally_core::validation::validate_page;
use tracing::debug;

use super::get::GetSaleResult;
use crate::error::AppResult;
use crate::repository::SaleRepository;

fn first_page() -> u32 {
    1
}

/// Paged sale listing. `page_size` falls back to the configured default.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetSalesQuery {
    /// Customer substring; empty matches everything.
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default = "first_page")]
    pub page: u32,
    #[serde(default)]
    pub page_size: Option<u32>,
}

impl Default for GetSalesQuery {
    fn default() -> Self {
        GetSalesQuery {
            search: None,
            page: first_page(),
            page_size: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetSalesResult {
    pub items: Vec<GetSaleResult>,
    pub total_count: u64,
    pub page: u32,
    pub page_size: u32,
    pub total_pages: u32,
}

pub(crate) fn total_pages(total_count: u64, page_size: u32) -> u32 {
    if page_size == 0 {
        return 0;
    }
    let pages = total_count.div_ceil(u64::from(page_size));
    u32::try_from(pages).unwrap_or(u32::MAX)
}

pub struct GetSalesHandler {
    sales: Arc<dyn SaleRepository>,
    default_page_size: u32,
    max_page_size: u32,
}

impl GetSalesHandler {
    pub fn new(sales: Arc<dyn SaleRepository>, default_page_size: u32, max_page_size: u32) -> Self {
        GetSalesHandler {
            sales,
            default_page_size,
            max_page_size,
        }
    }

    pub async fn handle(&self, query: GetSalesQuery) -> AppResult<GetSalesResult> {
        let page_size = query.page_size.unwrap_or(self.default_page_size);
        debug!(
            search = ?query.search,
            page = query.page,
            page_size,
            "get_sales query"
        );

        validate_page(query.page, page_size, self.max_page_size, "pageSize").into_result()?;

        let found = self
            .sales
            .get_paged(query.search.as_deref(), query.page, page_size)
            .await?;

        Ok(GetSalesResult {
            items: found.items.iter().map(GetSaleResult::from).collect(),
            total_count: found.total_count,
            page: query.page,
            page_size,
            total_pages: total_pages(found.total_count, page_size),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tally_core::Sale;

    use crate::error::AppError;
    use crate::repository::InMemorySaleRepository;

    async fn seeded(count: usize) -> Arc<InMemorySaleRepository> {
        let repo = Arc::new(InMemorySaleRepository::new());
        for i in 0..count {
            let customer = if i < 3 { "Acme Corp" } else { "Globex" };
            repo.create(Sale::new(format!("S-{:03}", i), customer, "Downtown"))
                .await
                .unwrap();
        }
        repo
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0, 10), 0);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
        assert_eq!(total_pages(25, 4), 7);
    }

    #[tokio::test]
    async fn test_default_query_is_first_page() {
        let query = GetSalesQuery::default();
        assert_eq!(query.page, 1);

        let handler = GetSalesHandler::new(seeded(3).await, 10, 100);
        let result = handler.handle(query).await.unwrap();
        assert_eq!(result.page, 1);
        assert_eq!(result.items.len(), 3);
    }

    #[tokio::test]
    async fn test_paging_arithmetic() {
        let handler = GetSalesHandler::new(seeded(12).await, 10, 100);

        let first = handler.handle(GetSalesQuery { page: 1, ..Default::default() }).await.unwrap();
        assert_eq!(first.items.len(), 10);
        assert_eq!(first.total_count, 12);
        assert_eq!(first.page_size, 10);
        assert_eq!(first.total_pages, 2);
        assert_eq!(first.items[0].sale_number, "S-000");

        let second = handler.handle(GetSalesQuery { page: 2, ..Default::default() }).await.unwrap();
        assert_eq!(second.items.len(), 2);
        assert_eq!(second.items[1].sale_number, "S-011");

        let beyond = handler.handle(GetSalesQuery { page: 5, ..Default::default() }).await.unwrap();
        assert!(beyond.items.is_empty());
        assert_eq!(beyond.total_count, 12);
    }

    #[tokio::test]
    async fn test_search_by_customer() {
        let handler = GetSalesHandler::new(seeded(6).await, 10, 100);

        let result = handler
            .handle(GetSalesQuery {
                search: Some("Acme".to_string()),
                page: 1,
                page_size: Some(2),
            })
            .await
            .unwrap();

        assert_eq!(result.total_count, 3);
        assert_eq!(result.total_pages, 2);
        assert!(result.items.iter().all(|s| s.customer == "Acme Corp"));
    }

    #[tokio::test]
    async fn test_invalid_paging_is_rejected() {
        let handler = GetSalesHandler::new(seeded(1).await, 10, 50);

        let err = handler
            .handle(GetSalesQuery {
                page: 0,
                page_size: Some(51),
                ..Default::default()
            })
            .await
            .unwrap_err();

        let AppError::Validation(report) = err else {
            panic!("expected validation error");
        };
        assert!(report.has_violation_at("page"));
        assert!(report.has_violation_at("pageSize"));
    }

    #[test]
    fn test_query_defaults_from_json() {
        let query: GetSalesQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.page, 1);
        assert!(query.page_size.is_none());
        assert!(query.search.is_none());
    }
}
