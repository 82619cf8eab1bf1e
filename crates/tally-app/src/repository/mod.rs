//! # Repository Module
//!
//! Storage seams for sales and products.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  Handler                                                               │
//! │       │                                                                 │
//! │       │  sales.get_paged(Some("jane"), 1, 10)                          │
//! │       ▼                                                                 │
//! │  Arc<dyn SaleRepository>                                               │
//! │  ├── create(&self, sale)                                               │
//! │  ├── get_by_id(&self, id)                                              │
//! │  ├── get_by_sale_number(&self, number)                                 │
//! │  └── get_paged(&self, search, page, page_size)                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  InMemorySaleRepository (memory.rs) or any other backend               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`SaleRepository`] - Sale aggregates
//! - [`ProductRepository`] - Catalog products

pub mod memory;

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use tally_core::{Product, Sale, ValidationError};
use thiserror::Error;
use uuid::Uuid;

pub use memory::{InMemoryProductRepository, InMemorySaleRepository};

// =============================================================================
// Errors
// =============================================================================

/// Repository operation errors.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Unique key violation.
    ///
    /// ## When This Occurs
    /// - Storing a sale whose sale number is already taken
    #[error("Duplicate {field}: '{value}' already exists")]
    Duplicate { field: String, value: String },

    /// Backend failure.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl RepositoryError {
    pub fn duplicate(field: impl Into<String>, value: impl Into<String>) -> Self {
        RepositoryError::Duplicate {
            field: field.into(),
            value: value.into(),
        }
    }
}

pub type RepoResult<T> = Result<T, RepositoryError>;

// =============================================================================
// Paging & Ordering
// =============================================================================

/// One page of results plus the size of the whole filtered set.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_count: u64,
}

/// Zero-based offset of a 1-based page.
pub(crate) fn page_offset(page: u32, page_size: u32) -> usize {
    (page.saturating_sub(1) as usize).saturating_mul(page_size as usize)
}

/// Product fields a listing can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductSortField {
    Title,
    Price,
    Category,
}

impl fmt::Display for ProductSortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProductSortField::Title => write!(f, "title"),
            ProductSortField::Price => write!(f, "price"),
            ProductSortField::Category => write!(f, "category"),
        }
    }
}

/// Product ordering parsed from `"<field> [asc|desc]"`.
///
/// ```rust
/// use tally_app::repository::{ProductOrder, ProductSortField};
///
/// let order: ProductOrder = "price desc".parse().unwrap();
/// assert_eq!(order.field, ProductSortField::Price);
/// assert!(order.descending);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProductOrder {
    pub field: ProductSortField,
    pub descending: bool,
}

impl FromStr for ProductOrder {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();

        let field = match parts.next().map(str::to_lowercase).as_deref() {
            Some("title") => ProductSortField::Title,
            Some("price") => ProductSortField::Price,
            Some("category") => ProductSortField::Category,
            _ => {
                return Err(ValidationError::NotAllowed {
                    field: "Order field".to_string(),
                    allowed: vec![
                        "title".to_string(),
                        "price".to_string(),
                        "category".to_string(),
                    ],
                })
            }
        };

        let descending = match parts.next().map(str::to_lowercase).as_deref() {
            None | Some("asc") => false,
            Some("desc") => true,
            Some(_) => {
                return Err(ValidationError::NotAllowed {
                    field: "Order direction".to_string(),
                    allowed: vec!["asc".to_string(), "desc".to_string()],
                })
            }
        };

        if parts.next().is_some() {
            return Err(ValidationError::InvalidFormat {
                field: "Order".to_string(),
                reason: "expected \"<field> [asc|desc]\"".to_string(),
            });
        }

        Ok(ProductOrder { field, descending })
    }
}

// =============================================================================
// Traits
// =============================================================================

/// Storage for sale aggregates.
#[async_trait]
pub trait SaleRepository: Send + Sync {
    /// Stores a new sale. Fails with [`RepositoryError::Duplicate`] when the
    /// sale number is taken.
    async fn create(&self, sale: Sale) -> RepoResult<Sale>;

    async fn get_by_id(&self, id: Uuid) -> RepoResult<Option<Sale>>;

    async fn get_by_sale_number(&self, sale_number: &str) -> RepoResult<Option<Sale>>;

    /// Sales whose customer contains `search`, in insertion order.
    async fn get_paged(
        &self,
        search: Option<&str>,
        page: u32,
        page_size: u32,
    ) -> RepoResult<Page<Sale>>;
}

/// Storage for catalog products.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn create(&self, product: Product) -> RepoResult<Product>;

    async fn get_by_id(&self, id: Uuid) -> RepoResult<Option<Product>>;

    async fn list(
        &self,
        page: u32,
        size: u32,
        order: Option<ProductOrder>,
    ) -> RepoResult<Page<Product>>;
}
