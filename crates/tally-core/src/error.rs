//! # Error Types
//!
//! Domain-specific error types for tally-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  tally-core errors (this file)                                         │
//! │  ├── PricingError     - Quantity and amount failures in the engine     │
//! │  ├── ValidationError  - Single field validation failures               │
//! │  └── ValidationReport - Every violation of an entity (validation.rs)   │
//! │                                                                         │
//! │  tally-app errors (separate crate)                                     │
//! │  └── AppError         - What handler callers see                       │
//! │                                                                         │
//! │  Flow: PricingError / ValidationReport → AppError → ApiError           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;
use uuid::Uuid;

use crate::MAX_ITEM_QUANTITY;

// =============================================================================
// Pricing Error
// =============================================================================

/// Failures raised by the pricing engine.
///
/// Every variant carries the offending item's position in the sale and its
/// product reference so the caller can point at the exact line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PricingError {
    /// Quantity is zero or negative.
    #[error("Item {index} ({product_ref}): quantity must be greater than zero, got {quantity}")]
    InvalidQuantity {
        index: usize,
        product_ref: Uuid,
        quantity: i32,
    },

    /// Quantity is above [`MAX_ITEM_QUANTITY`].
    ///
    /// ## User Workflow
    /// ```text
    /// Create sale (item qty: 21)
    ///      │
    ///      ▼
    /// validate_quantities / apply_discounts
    ///      │
    ///      ▼
    /// QuantityLimitExceeded { index: 0, quantity: 21, .. }
    ///      │
    ///      ▼
    /// Request rejected: "Cannot sell more than 20 items of the same product"
    /// ```
    #[error(
        "Item {index} ({product_ref}): cannot sell more than {max} items of the same product, got {quantity}",
        max = MAX_ITEM_QUANTITY
    )]
    QuantityLimitExceeded {
        index: usize,
        product_ref: Uuid,
        quantity: i32,
    },

    /// A line or sale amount does not fit in the decimal range.
    #[error("Item {index} ({product_ref}): amount is outside the supported range")]
    AmountOverflow { index: usize, product_ref: Uuid },
}

impl PricingError {
    /// Index of the offending item within the sale.
    pub fn index(&self) -> usize {
        match self {
            PricingError::InvalidQuantity { index, .. }
            | PricingError::QuantityLimitExceeded { index, .. }
            | PricingError::AmountOverflow { index, .. } => *index,
        }
    }

    /// Product reference of the offending item.
    pub fn product_ref(&self) -> Uuid {
        match self {
            PricingError::InvalidQuantity { product_ref, .. }
            | PricingError::QuantityLimitExceeded { product_ref, .. }
            | PricingError::AmountOverflow { product_ref, .. } => *product_ref,
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Single field validation errors.
///
/// Each variant renders into the message of a
/// [`Violation`](crate::validation::Violation).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Field value is too long.
    #[error("{field} cannot be longer than {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: String, max: String },

    /// Value must be positive.
    #[error("{field} must be greater than zero")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} cannot be negative")]
    Negative { field: String },

    /// Invalid format (e.g., invalid URL).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Timestamp lies in the future.
    #[error("{field} cannot be in the future")]
    InFuture { field: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pricing_error_messages() {
        let err = PricingError::QuantityLimitExceeded {
            index: 2,
            product_ref: Uuid::nil(),
            quantity: 21,
        };
        assert_eq!(
            err.to_string(),
            "Item 2 (00000000-0000-0000-0000-000000000000): cannot sell more than 20 items of the same product, got 21"
        );

        let err = PricingError::InvalidQuantity {
            index: 0,
            product_ref: Uuid::nil(),
            quantity: 0,
        };
        assert!(err.to_string().contains("quantity must be greater than zero"));
    }

    #[test]
    fn test_pricing_error_accessors() {
        let product = Uuid::new_v4();
        let err = PricingError::InvalidQuantity {
            index: 4,
            product_ref: product,
            quantity: -1,
        };
        assert_eq!(err.index(), 4);
        assert_eq!(err.product_ref(), product);
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "customer".to_string(),
        };
        assert_eq!(err.to_string(), "customer is required");

        let err = ValidationError::TooLong {
            field: "branch".to_string(),
            max: 100,
        };
        assert_eq!(err.to_string(), "branch cannot be longer than 100 characters");
    }
}
