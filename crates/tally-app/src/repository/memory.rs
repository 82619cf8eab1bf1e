//! # In-Memory Repositories
//!
//! Process-local storage behind the repository traits. Used by the `tally`
//! binary and by handler tests.
//!
//! Records are kept in a `Vec` so listings come back in insertion order.

use std::cmp::Ordering;
use std::sync::Arc;

use async_trait::async_trait;
use tally_core::{Product, Sale};
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use super::{
    page_offset, Page, ProductOrder, ProductRepository, ProductSortField, RepoResult,
    RepositoryError, SaleRepository,
};

// =============================================================================
// Sales
// =============================================================================

#[derive(Debug, Clone, Default)]
pub struct InMemorySaleRepository {
    sales: Arc<RwLock<Vec<Sale>>>,
}

impl InMemorySaleRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SaleRepository for InMemorySaleRepository {
    async fn create(&self, sale: Sale) -> RepoResult<Sale> {
        let mut sales = self.sales.write().await;

        // Checked under the write lock so two creates cannot both win.
        if sales.iter().any(|s| s.sale_number == sale.sale_number) {
            return Err(RepositoryError::duplicate("sale number", &sale.sale_number));
        }

        debug!(id = %sale.id, sale_number = %sale.sale_number, "Storing sale");
        sales.push(sale.clone());
        Ok(sale)
    }

    async fn get_by_id(&self, id: Uuid) -> RepoResult<Option<Sale>> {
        let sales = self.sales.read().await;
        Ok(sales.iter().find(|s| s.id == id).cloned())
    }

    async fn get_by_sale_number(&self, sale_number: &str) -> RepoResult<Option<Sale>> {
        let sales = self.sales.read().await;
        Ok(sales.iter().find(|s| s.sale_number == sale_number).cloned())
    }

    async fn get_paged(
        &self,
        search: Option<&str>,
        page: u32,
        page_size: u32,
    ) -> RepoResult<Page<Sale>> {
        let sales = self.sales.read().await;
        let needle = search.map(str::trim).filter(|s| !s.is_empty());

        let matching: Vec<&Sale> = sales
            .iter()
            .filter(|s| needle.map_or(true, |n| s.customer.contains(n)))
            .collect();

        let total_count = matching.len() as u64;
        let items = matching
            .into_iter()
            .skip(page_offset(page, page_size))
            .take(page_size as usize)
            .cloned()
            .collect();

        Ok(Page { items, total_count })
    }
}

// =============================================================================
// Products
// =============================================================================

#[derive(Debug, Clone, Default)]
pub struct InMemoryProductRepository {
    products: Arc<RwLock<Vec<Product>>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn compare_products(a: &Product, b: &Product, field: ProductSortField) -> Ordering {
    match field {
        ProductSortField::Title => a.title.cmp(&b.title),
        ProductSortField::Price => a.price.cmp(&b.price),
        ProductSortField::Category => a.category.cmp(&b.category),
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn create(&self, product: Product) -> RepoResult<Product> {
        let mut products = self.products.write().await;
        debug!(id = %product.id, title = %product.title, "Storing product");
        products.push(product.clone());
        Ok(product)
    }

    async fn get_by_id(&self, id: Uuid) -> RepoResult<Option<Product>> {
        let products = self.products.read().await;
        Ok(products.iter().find(|p| p.id == id).cloned())
    }

    async fn list(
        &self,
        page: u32,
        size: u32,
        order: Option<ProductOrder>,
    ) -> RepoResult<Page<Product>> {
        let products = self.products.read().await;
        let mut sorted: Vec<&Product> = products.iter().collect();

        if let Some(order) = order {
            // Stable sort: ties keep insertion order.
            sorted.sort_by(|a, b| {
                let ord = compare_products(a, b, order.field);
                if order.descending {
                    ord.reverse()
                } else {
                    ord
                }
            });
        }

        let total_count = sorted.len() as u64;
        let items = sorted
            .into_iter()
            .skip(page_offset(page, size))
            .take(size as usize)
            .cloned()
            .collect();

        Ok(Page { items, total_count })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
