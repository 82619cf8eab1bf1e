//! # Pricing Module
//!
//! Tiered quantity discounts, per-item totals and sale aggregation.
//!
//! ## Discount Tiers
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  quantity        rate on (unit_price × quantity)                        │
//! │  ─────────────   ───────────────────────────────                        │
//! │  1 – 3           0%                                                     │
//! │  4 – 9           10%                                                    │
//! │  10 – 20         20%                                                    │
//! │  > 20            QuantityLimitExceeded (hard stop)                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Pricing Flow
//! ```text
//! Sale (items with quantity + unit_price)
//!      │
//!      ▼
//! validate_quantities ──► InvalidQuantity / QuantityLimitExceeded
//!      │
//!      ▼
//! apply_discounts
//!      ├── per item: discount = unit_price × quantity × rate
//!      │             total    = unit_price × quantity − discount
//!      └── sale.total_amount = Σ item.total_amount (cancelled included)
//! ```
//!
//! Multiplication order is always `unit_price × quantity × rate`. The tier
//! rates are exact in decimal arithmetic, so no rounding is applied.
//!
//! ## Usage
//! ```rust
//! use rust_decimal_macros::dec;
//! use tally_core::{pricing, Money, Sale, SaleItem};
//! use uuid::Uuid;
//!
//! let mut sale = Sale::new("S-0006", "Jane Doe", "Downtown");
//! sale.push_item(SaleItem::new(Uuid::new_v4(), 2, Money::new(dec!(10))));
//! sale.push_item(SaleItem::new(Uuid::new_v4(), 5, Money::new(dec!(20))));
//!
//! pricing::validate_quantities(&sale).unwrap();
//! pricing::apply_discounts(&mut sale).unwrap();
//!
//! assert_eq!(sale.total_amount, Money::new(dec!(110)));
//! ```

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{PricingError, ValidationError};
use crate::money::Money;
use crate::types::{Sale, SaleItem};
use crate::MAX_ITEM_QUANTITY;

// =============================================================================
// Discount Tier
// =============================================================================

/// Quantity bracket that determines an item's discount rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscountTier {
    /// Up to 3 units: no discount.
    None,
    /// 4 to 9 units: 10%.
    Standard,
    /// 10 to 20 units: 20%.
    Bulk,
}

impl DiscountTier {
    /// Resolves the tier for a quantity.
    ///
    /// Quantities of zero or less resolve to [`DiscountTier::None`]; rejecting
    /// them is the job of [`validate_quantities`].
    pub fn for_quantity(quantity: i32) -> Result<Self, QuantityAboveLimit> {
        match quantity {
            q if q > MAX_ITEM_QUANTITY => Err(QuantityAboveLimit(q)),
            10..=MAX_ITEM_QUANTITY => Ok(DiscountTier::Bulk),
            4..=9 => Ok(DiscountTier::Standard),
            _ => Ok(DiscountTier::None),
        }
    }

    /// Fractional discount rate of the tier.
    pub fn rate(&self) -> Decimal {
        match self {
            DiscountTier::None => Decimal::ZERO,
            DiscountTier::Standard => Decimal::new(10, 2),
            DiscountTier::Bulk => Decimal::new(20, 2),
        }
    }
}

/// Raised by [`DiscountTier::for_quantity`] when no tier covers the quantity.
///
/// It has no item context; the engine turns it into
/// [`PricingError::QuantityLimitExceeded`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuantityAboveLimit(pub i32);

// =============================================================================
// Pricing Policy
// =============================================================================

/// How the application runs the discount pass when a quantity is out of range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PricingPolicy {
    /// Validate every item first; on failure nothing is mutated.
    #[default]
    Atomic,
    /// Price items in order and stop at the first item above the limit,
    /// leaving earlier items priced and later items untouched.
    Partial,
}

impl PricingPolicy {
    /// Runs the discount pass under this policy.
    pub fn apply(&self, sale: &mut Sale) -> Result<(), PricingError> {
        match self {
            PricingPolicy::Atomic => apply_discounts_atomic(sale),
            PricingPolicy::Partial => apply_discounts(sale),
        }
    }
}

impl fmt::Display for PricingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PricingPolicy::Atomic => write!(f, "atomic"),
            PricingPolicy::Partial => write!(f, "partial"),
        }
    }
}

impl FromStr for PricingPolicy {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "atomic" | "all_or_nothing" => Ok(PricingPolicy::Atomic),
            "partial" => Ok(PricingPolicy::Partial),
            _ => Err(ValidationError::NotAllowed {
                field: "pricing policy".to_string(),
                allowed: vec!["atomic".to_string(), "partial".to_string()],
            }),
        }
    }
}

// =============================================================================
// Validation
// =============================================================================

fn check_quantity(index: usize, item: &SaleItem) -> Result<(), PricingError> {
    if item.quantity <= 0 {
        return Err(PricingError::InvalidQuantity {
            index,
            product_ref: item.product_ref,
            quantity: item.quantity,
        });
    }

    if item.quantity > MAX_ITEM_QUANTITY {
        return Err(PricingError::QuantityLimitExceeded {
            index,
            product_ref: item.product_ref,
            quantity: item.quantity,
        });
    }

    Ok(())
}

/// Checks that every item quantity lies in `1..=MAX_ITEM_QUANTITY`.
///
/// Fails on the first offending item. Does not mutate the sale.
pub fn validate_quantities(sale: &Sale) -> Result<(), PricingError> {
    sale.items
        .iter()
        .enumerate()
        .try_for_each(|(index, item)| check_quantity(index, item))
}

/// Collects every quantity violation in item order.
pub fn quantity_violations(sale: &Sale) -> Vec<PricingError> {
    sale.items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| check_quantity(index, item).err())
        .collect()
}

// =============================================================================
// Discount Application
// =============================================================================

/// Computes discount and total for one item in place.
///
/// `index` is only used for the error context. On error the item is left
/// unchanged.
pub fn price_item(index: usize, item: &mut SaleItem) -> Result<DiscountTier, PricingError> {
    let tier = DiscountTier::for_quantity(item.quantity).map_err(|QuantityAboveLimit(quantity)| {
        PricingError::QuantityLimitExceeded {
            index,
            product_ref: item.product_ref,
            quantity,
        }
    })?;

    let overflow = || PricingError::AmountOverflow {
        index,
        product_ref: item.product_ref,
    };
    let gross = item.gross_amount().ok_or_else(overflow)?;
    let discount = gross.apply_rate(tier.rate()).ok_or_else(overflow)?;

    item.discount = discount;
    item.total_amount = gross - discount;

    Ok(tier)
}

/// Recomputes `sale.total_amount` from the current item totals.
///
/// Cancelled items are included. If the sum overflows, the error names the
/// item at which it did and the total is left unchanged.
pub fn recalculate_total(sale: &mut Sale) -> Result<(), PricingError> {
    let mut total = Money::zero();
    for (index, item) in sale.items.iter().enumerate() {
        total = total
            .checked_add(item.total_amount)
            .ok_or(PricingError::AmountOverflow {
                index,
                product_ref: item.product_ref,
            })?;
    }

    sale.total_amount = total;
    Ok(())
}

/// Applies tier discounts to every item, then aggregates the sale total.
///
/// ## Partial Mutation
/// An item above the quantity limit aborts the pass immediately. Items
/// before it keep their new discount and total, items after it are
/// untouched, and `sale.total_amount` is not updated. Use
/// [`apply_discounts_atomic`] for all-or-nothing behaviour.
pub fn apply_discounts(sale: &mut Sale) -> Result<(), PricingError> {
    for (index, item) in sale.items.iter_mut().enumerate() {
        price_item(index, item)?;
    }

    recalculate_total(sale)
}

/// Validates all quantities, then applies discounts.
///
/// On any error, including amount overflow, the sale is left exactly as it was.
pub fn apply_discounts_atomic(sale: &mut Sale) -> Result<(), PricingError> {
    validate_quantities(sale)?;

    let mut priced = sale.clone();
    apply_discounts(&mut priced)?;
    *sale = priced;
    Ok(())
}

/// Returns `true` iff the sale has not been cancelled.
#[inline]
pub fn active_predicate(sale: &Sale) -> bool {
    sale.is_active()
}

// =============================================================================
// Unit Tests
// =============================================================================
