//! # Validation Module
//!
//! Input validation utilities for Tally.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Field validators (this module)                               │
//! │  ├── validate_sale_number, validate_quantity, ...                      │
//! │  └── Return a single ValidationError                                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Entity validators (this module)                              │
//! │  ├── validate_sale, validate_sale_item, validate_product               │
//! │  └── Collect every failure into a ValidationReport                     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Pricing engine                                               │
//! │  └── validate_quantities guards the discount pass                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Reports are plain values: validators are composed by calling one from
//! another and nesting the result under a path prefix.
//!
//! ## Usage
//! ```rust
//! use tally_core::validation::{validate_quantity, validate_sale_number};
//!
//! assert!(validate_sale_number("S-0001").is_ok());
//! assert!(validate_quantity(21).is_err());
//! ```

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{Product, Rating, Sale, SaleItem};
use crate::{MAX_ITEM_QUANTITY, MAX_PARTY_NAME_LEN, MAX_SALE_NUMBER_LEN};

/// Result type for single field validation.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Violations & Reports
// =============================================================================

/// One failed rule: where it failed and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Field path, e.g. `customer` or `items[0].quantity`.
    pub path: String,
    pub message: String,
}

impl Violation {
    pub fn new(path: impl Into<String>, error: &ValidationError) -> Self {
        Violation {
            path: path.into(),
            message: error.to_string(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Ordered list of violations produced by an entity validator.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationReport {
    violations: Vec<Violation>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the error of `result`, if any, under `path`.
    pub fn check(&mut self, path: &str, result: ValidationResult<()>) -> &mut Self {
        if let Err(error) = result {
            self.violations.push(Violation::new(path, &error));
        }
        self
    }

    /// Records a violation unconditionally.
    pub fn push(&mut self, path: &str, error: ValidationError) -> &mut Self {
        self.violations.push(Violation::new(path, &error));
        self
    }

    /// Appends another report with every path prefixed, e.g. `items[2]`.
    pub fn nest(&mut self, prefix: &str, other: ValidationReport) -> &mut Self {
        self.violations
            .extend(other.violations.into_iter().map(|v| Violation {
                path: format!("{}.{}", prefix, v.path),
                message: v.message,
            }));
        self
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// `true` if any violation sits exactly at `path`.
    pub fn has_violation_at(&self, path: &str) -> bool {
        self.violations.iter().any(|v| v.path == path)
    }

    /// `Ok(())` when empty, otherwise the report itself as the error.
    pub fn into_result(self) -> Result<(), ValidationReport> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined: Vec<String> = self.violations.iter().map(|v| v.to_string()).collect();
        write!(f, "{}", joined.join("; "))
    }
}

// =============================================================================
// String Validators
// =============================================================================

fn validate_text(field: &str, value: &str, min: usize, max: usize) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    let len = value.chars().count();
    if len < min {
        return Err(ValidationError::TooShort {
            field: field.to_string(),
            min,
        });
    }

    if len > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(())
}

/// Validates a sale number.
///
/// ## Rules
/// - Must not be empty
/// - At most 50 characters
pub fn validate_sale_number(value: &str) -> ValidationResult<()> {
    validate_text("Sale number", value, 1, MAX_SALE_NUMBER_LEN)
}

/// Validates a customer or branch name (1 to 100 characters).
pub fn validate_party_name(field: &str, value: &str) -> ValidationResult<()> {
    validate_text(field, value, 1, MAX_PARTY_NAME_LEN)
}

/// Validates a product title (3 to 100 characters).
pub fn validate_product_title(value: &str) -> ValidationResult<()> {
    validate_text("Product title", value, 3, 100)
}

/// Validates a product category (required, at most 50 characters).
pub fn validate_product_category(value: &str) -> ValidationResult<()> {
    validate_text("Product category", value, 1, 50)
}

/// Validates a product description (optional, at most 500 characters).
pub fn validate_product_description(value: &str) -> ValidationResult<()> {
    if value.chars().count() > 500 {
        return Err(ValidationError::TooLong {
            field: "Product description".to_string(),
            max: 500,
        });
    }
    Ok(())
}

/// Validates a product image reference.
///
/// ## Rules
/// - Must not be empty
/// - Must parse as an absolute URL
///
/// ## Example
/// ```rust
/// use tally_core::validation::validate_image_url;
///
/// assert!(validate_image_url("https://cdn.example.com/a.png").is_ok());
/// assert!(validate_image_url("a.png").is_err());
/// ```
pub fn validate_image_url(value: &str) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: "Product image URL".to_string(),
        });
    }

    url::Url::parse(value).map_err(|_| ValidationError::InvalidFormat {
        field: "Product image".to_string(),
        reason: "must be a valid URL".to_string(),
    })?;

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates an item quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_ITEM_QUANTITY (20)
pub fn validate_quantity(qty: i32) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "Quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "Quantity".to_string(),
            min: "1".to_string(),
            max: MAX_ITEM_QUANTITY.to_string(),
        });
    }

    Ok(())
}

/// Validates that a price is strictly positive.
pub fn validate_price(field: &str, amount: Money) -> ValidationResult<()> {
    if !amount.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Validates that an amount is zero or more.
pub fn validate_non_negative(field: &str, amount: Money) -> ValidationResult<()> {
    if amount.is_negative() {
        return Err(ValidationError::Negative {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Validates a product rating (`rate` in `0..=5`, `count` >= 0).
pub fn validate_rating(rating: &Rating) -> ValidationReport {
    let mut report = ValidationReport::new();

    if rating.rate < Decimal::ZERO || rating.rate > Decimal::from(5) {
        report.push(
            "rate",
            ValidationError::OutOfRange {
                field: "Product rating".to_string(),
                min: "0".to_string(),
                max: "5".to_string(),
            },
        );
    }

    if rating.count < 0 {
        report.push(
            "count",
            ValidationError::Negative {
                field: "Product rating count".to_string(),
            },
        );
    }

    report
}

/// Validates pagination parameters.
///
/// ## Rules
/// - `page` starts at 1
/// - `page_size` between 1 and `max_page_size`, reported under `size_path`
pub fn validate_page(
    page: u32,
    page_size: u32,
    max_page_size: u32,
    size_path: &str,
) -> ValidationReport {
    let mut report = ValidationReport::new();

    if page == 0 {
        report.push(
            "page",
            ValidationError::MustBePositive {
                field: "Page".to_string(),
            },
        );
    }

    if page_size == 0 || page_size > max_page_size {
        report.push(
            size_path,
            ValidationError::OutOfRange {
                field: "Page size".to_string(),
                min: "1".to_string(),
                max: max_page_size.to_string(),
            },
        );
    }

    report
}

// =============================================================================
// Identity & Time Validators
// =============================================================================

/// Validates that an id is set (not the nil UUID).
pub fn validate_id(field: &str, id: Uuid) -> ValidationResult<()> {
    if id.is_nil() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Validates that a sale date is not after `now`.
pub fn validate_sale_date(date: DateTime<Utc>, now: DateTime<Utc>) -> ValidationResult<()> {
    if date > now {
        return Err(ValidationError::InFuture {
            field: "Sale date".to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Entity Validators
// =============================================================================

/// Validates one sale item.
///
/// The discount rule is checked against the item as it stands: it must be
/// non-negative and never above `unit_price × quantity`.
pub fn validate_sale_item(item: &SaleItem) -> ValidationReport {
    let mut report = ValidationReport::new();

    report
        .check("saleId", validate_id("Sale id", item.sale_id))
        .check("productRef", validate_id("Product id", item.product_ref))
        .check("quantity", validate_quantity(item.quantity))
        .check("unitPrice", validate_price("Unit price", item.unit_price))
        .check("discount", validate_non_negative("Discount", item.discount));

    match item.gross_amount() {
        Some(gross) if item.discount > gross => {
            report.push(
                "discount",
                ValidationError::OutOfRange {
                    field: "Discount".to_string(),
                    min: "0".to_string(),
                    max: gross.amount().to_string(),
                },
            );
        }
        Some(_) => {}
        None => {
            report.push(
                "unitPrice",
                ValidationError::InvalidFormat {
                    field: "Unit price".to_string(),
                    reason: "line amount is outside the supported range".to_string(),
                },
            );
        }
    }

    report
}

/// Validates a whole sale, including every item under `items[i]`.
pub fn validate_sale(sale: &Sale, now: DateTime<Utc>) -> ValidationReport {
    let mut report = ValidationReport::new();

    report
        .check("saleNumber", validate_sale_number(&sale.sale_number))
        .check("date", validate_sale_date(sale.date, now))
        .check("customer", validate_party_name("Customer", &sale.customer))
        .check("branch", validate_party_name("Branch", &sale.branch))
        .check(
            "totalAmount",
            validate_non_negative("Total amount", sale.total_amount),
        );

    if sale.items.is_empty() {
        report.push(
            "items",
            ValidationError::Required {
                field: "At least one sale item".to_string(),
            },
        );
    }

    for (index, item) in sale.items.iter().enumerate() {
        report.nest(&format!("items[{}]", index), validate_sale_item(item));
    }

    report
}

/// Validates a catalog product.
pub fn validate_product(product: &Product) -> ValidationReport {
    let mut report = ValidationReport::new();

    report
        .check("title", validate_product_title(&product.title))
        .check("price", validate_price("Product price", product.price))
        .check(
            "description",
            validate_product_description(&product.description),
        )
        .check("category", validate_product_category(&product.category))
        .check("image", validate_image_url(&product.image))
        .nest("rating", validate_rating(&product.rating));

    report
}

// =============================================================================
// Unit Tests
// =============================================================================
