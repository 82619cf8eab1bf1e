//! # Get Sale

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tally_core::validation::validate_id;
use tally_core::{Money, Sale, SaleItem, ValidationReport};
use tracing::debug;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::repository::SaleRepository;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetSaleQuery {
    pub id: Uuid,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleItemResult {
    pub id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    pub unit_price: Money,
    pub discount: Money,
    pub total_amount: Money,
    pub cancelled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetSaleResult {
    pub id: Uuid,
    pub sale_number: String,
    pub date: DateTime<Utc>,
    pub customer: String,
    pub branch: String,
    pub total_amount: Money,
    pub cancelled: bool,
    pub items: Vec<SaleItemResult>,
}

impl From<&SaleItem> for SaleItemResult {
    fn from(item: &SaleItem) -> Self {
        SaleItemResult {
            id: item.id,
            product_id: item.product_ref,
            quantity: item.quantity,
            unit_price: item.unit_price,
            discount: item.discount,
            total_amount: item.total_amount,
            cancelled: item.cancelled,
        }
    }
}

impl From<&Sale> for GetSaleResult {
    fn from(sale: &Sale) -> Self {
        GetSaleResult {
            id: sale.id,
            sale_number: sale.sale_number.clone(),
            date: sale.date,
            customer: sale.customer.clone(),
            branch: sale.branch.clone(),
            total_amount: sale.total_amount,
            cancelled: sale.cancelled,
            items: sale.items.iter().map(SaleItemResult::from).collect(),
        }
    }
}

pub struct GetSaleHandler {
    sales: Arc<dyn SaleRepository>,
}

impl GetSaleHandler {
    pub fn new(sales: Arc<dyn SaleRepository>) -> Self {
        GetSaleHandler { sales }
    }

    pub async fn handle(&self, query: GetSaleQuery) -> AppResult<GetSaleResult> {
        debug!(id = %query.id, "get_sale query");

        let mut report = ValidationReport::new();
        report.check("id", validate_id("Sale id", query.id));
        report.into_result()?;

        let sale = self
            .sales
            .get_by_id(query.id)
            .await?
            .ok_or_else(|| AppError::not_found("Sale", query.id))?;

        Ok(GetSaleResult::from(&sale))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use tally_core::pricing;

    use crate::error::ErrorCode;
    use crate::repository::InMemorySaleRepository;

    #[tokio::test]
    async fn test_get_existing_sale() {
        let repo = Arc::new(InMemorySaleRepository::new());
        let mut sale = Sale::new("S-1", "Jane", "Downtown");
        sale.push_item(SaleItem::new(Uuid::new_v4(), 5, Money::new(dec!(10))));
        pricing::apply_discounts_atomic(&mut sale).unwrap();
        let sale = repo.create(sale).await.unwrap();

        let result = GetSaleHandler::new(repo)
            .handle(GetSaleQuery { id: sale.id })
            .await
            .unwrap();

        assert_eq!(result.sale_number, "S-1");
        assert_eq!(result.total_amount, Money::new(dec!(45)));
        assert_eq!(result.items[0].discount, Money::new(dec!(5)));
        assert!(!result.cancelled);
    }

    #[tokio::test]
    async fn test_get_missing_sale_is_not_found() {
        let handler = GetSaleHandler::new(Arc::new(InMemorySaleRepository::new()));

        let err = handler
            .handle(GetSaleQuery { id: Uuid::new_v4() })
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::NotFound);

        let err = handler
            .handle(GetSaleQuery { id: Uuid::nil() })
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::ValidationError);
    }
}
