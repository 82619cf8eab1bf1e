//! # Domain Types
//!
//! Core domain types used throughout Tally.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      Sale       │   │    SaleItem     │   │    Product      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │──►│  product_ref    │   │  id (UUID)      │       │
//! │  │  sale_number    │   │  quantity       │   │  title          │       │
//! │  │  customer       │   │  unit_price     │   │  price          │       │
//! │  │  branch         │   │  discount  (*)  │   │  category       │       │
//! │  │  total_amount(*)│   │  total_amount(*)│   │  rating         │       │
//! │  │  cancelled      │   │  cancelled      │   └─────────────────┘       │
//! │  └─────────────────┘   └─────────────────┘                              │
//! │                                                                         │
//! │  (*) derived by the pricing engine, never trusted from input            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::money::Money;

// =============================================================================
// Sale Item
// =============================================================================

/// A single product line within a sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleItem {
    pub id: Uuid,
    /// Owning sale. Set when the item is pushed onto a [`Sale`].
    pub sale_id: Uuid,
    /// Product being sold.
    pub product_ref: Uuid,
    /// Units sold. Valid range is `1..=MAX_ITEM_QUANTITY`.
    pub quantity: i32,
    /// Price of one unit at the time of sale.
    pub unit_price: Money,
    /// Discount on the line, derived from the quantity tier.
    pub discount: Money,
    /// `unit_price * quantity - discount`, derived.
    pub total_amount: Money,
    pub cancelled: bool,
}

impl SaleItem {
    /// Creates an unpriced item. Discount and total start at zero.
    pub fn new(product_ref: Uuid, quantity: i32, unit_price: Money) -> Self {
        SaleItem {
            id: Uuid::new_v4(),
            sale_id: Uuid::nil(),
            product_ref,
            quantity,
            unit_price,
            discount: Money::zero(),
            total_amount: Money::zero(),
            cancelled: false,
        }
    }

    /// Line amount before any discount (`unit_price × quantity`), or `None`
    /// when it does not fit in the decimal range.
    #[inline]
    pub fn gross_amount(&self) -> Option<Money> {
        self.unit_price.multiply_quantity(self.quantity)
    }

    /// Marks the item as cancelled. Pricing is unaffected.
    pub fn cancel(&mut self) {
        self.cancelled = true;
    }
}

// =============================================================================
// Sale
// =============================================================================

/// An order aggregate containing line items and a cancellation flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: Uuid,
    /// Business identifier, unique across sales.
    pub sale_number: String,
    /// When the sale happened.
    pub date: DateTime<Utc>,
    pub customer: String,
    pub branch: String,
    pub items: Vec<SaleItem>,
    /// Sum of item totals at the last discount pass.
    pub total_amount: Money,
    pub cancelled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Sale {
    /// Creates an empty sale dated now.
    pub fn new(
        sale_number: impl Into<String>,
        customer: impl Into<String>,
        branch: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Sale {
            id: Uuid::new_v4(),
            sale_number: sale_number.into(),
            date: now,
            customer: customer.into(),
            branch: branch.into(),
            items: Vec::new(),
            total_amount: Money::zero(),
            cancelled: false,
            created_at: now,
            updated_at: None,
        }
    }

    /// Appends an item, linking it to this sale.
    ///
    /// The sale total is NOT recomputed here; run the pricing engine.
    pub fn push_item(&mut self, mut item: SaleItem) {
        item.sale_id = self.id;
        self.items.push(item);
    }

    /// An active sale is one that has not been cancelled.
    #[inline]
    pub fn is_active(&self) -> bool {
        !self.cancelled
    }

    /// Cancels the whole sale.
    pub fn cancel(&mut self) {
        self.cancelled = true;
        self.updated_at = Some(Utc::now());
    }

    /// Number of item lines.
    #[inline]
    pub fn item_count(&self) -> usize {
        self.items.len()
    }
}

// =============================================================================
// Product
// =============================================================================

/// Customer rating summary for a product.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rating {
    /// Average rate, `0..=5`.
    pub rate: Decimal,
    /// Number of ratings received.
    pub count: i32,
}

/// A product in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    pub title: String,
    pub price: Money,
    pub description: String,
    pub category: String,
    /// Absolute URL of the product image.
    pub image: String,
    pub rating: Rating,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Product {
    /// Creates a product with a fresh id and no rating.
    pub fn new(
        title: impl Into<String>,
        price: Money,
        description: impl Into<String>,
        category: impl Into<String>,
        image: impl Into<String>,
    ) -> Self {
        Product {
            id: Uuid::new_v4(),
            title: title.into(),
            price,
            description: description.into(),
            category: category.into(),
            image: image.into(),
            rating: Rating::default(),
            created_at: Utc::now(),
            updated_at: None,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_push_item_links_sale() {
        let mut sale = Sale::new("S-1", "Jane", "Downtown");
        sale.push_item(SaleItem::new(Uuid::new_v4(), 2, Money::new(dec!(10))));

        assert_eq!(sale.item_count(), 1);
        assert_eq!(sale.items[0].sale_id, sale.id);
        assert!(sale.total_amount.is_zero());
    }

    #[test]
    fn test_gross_amount() {
        let item = SaleItem::new(Uuid::new_v4(), 3, Money::new(dec!(2.50)));
        assert_eq!(item.gross_amount(), Some(Money::new(dec!(7.50))));
    }

    #[test]
    fn test_cancel_sale() {
        let mut sale = Sale::new("S-2", "Jane", "Downtown");
        assert!(sale.is_active());
        assert!(sale.updated_at.is_none());

        sale.cancel();
        assert!(!sale.is_active());
        assert!(sale.updated_at.is_some());
    }

    #[test]
    fn test_sale_item_wire_shape() {
        let item = SaleItem::new(Uuid::nil(), 1, Money::new(dec!(50.00)));
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["productRef"], "00000000-0000-0000-0000-000000000000");
        assert_eq!(json["unitPrice"], "50.00");
        assert_eq!(json["totalAmount"], "0");
    }
}
