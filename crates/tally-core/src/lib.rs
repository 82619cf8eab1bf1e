//! # tally-core: Pure Business Logic for Tally
//!
//! This crate is the **heart** of Tally. It contains the sale pricing rules,
//! the domain types and the validators as pure functions with zero I/O
//! dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Tally Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              tally-app (command / query handlers)               │   │
//! │  │    create_sale, get_sale, get_sales, create_product, ...       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ plain data                             │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ tally-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  pricing  │  │ validation│  │   │
//! │  │   │  Product  │  │   Money   │  │  tiers    │  │  reports  │  │   │
//! │  │   │   Sale    │  │  Decimal  │  │  totals   │  │ violations│  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Sale, SaleItem, Product, Rating)
//! - [`money`] - Money type backed by an exact decimal
//! - [`pricing`] - Tiered quantity discounts and sale totals
//! - [`specification`] - Active-sale predicate
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Example Usage
//!
//! ```rust
//! use rust_decimal::Decimal;
//! use tally_core::{pricing, Money, Sale, SaleItem};
//! use uuid::Uuid;
//!
//! let mut sale = Sale::new("S-0001", "Jane Doe", "Downtown");
//! sale.push_item(SaleItem::new(Uuid::new_v4(), 5, Money::new(Decimal::new(1000, 2))));
//!
//! pricing::apply_discounts_atomic(&mut sale).unwrap();
//!
//! // 5 units at $10.00 fall in the 10% tier: $50.00 - $5.00
//! assert_eq!(sale.total_amount, Money::new(Decimal::new(4500, 2)));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod pricing;
pub mod specification;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{PricingError, ValidationError};
pub use money::Money;
pub use pricing::{DiscountTier, PricingPolicy};
pub use specification::{ActiveSaleSpecification, Specification};
pub use types::*;
pub use validation::{ValidationReport, Violation};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum quantity of a single product within one sale.
///
/// ## Business Reason
/// Bulk orders above this limit are not sold through the standard
/// discount tiers. Exceeding it is a hard failure, never clamped.
pub const MAX_ITEM_QUANTITY: i32 = 20;

/// Maximum length of a sale number.
pub const MAX_SALE_NUMBER_LEN: usize = 50;

/// Maximum length of customer and branch names.
pub const MAX_PARTY_NAME_LEN: usize = 100;
