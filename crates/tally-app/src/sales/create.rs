//! # Create Sale

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tally_core::validation::{
    validate_id, validate_party_name, validate_price, validate_quantity, validate_sale,
    validate_sale_date, validate_sale_number,
};
use tally_core::{Money, PricingPolicy, Sale, SaleItem, ValidationError, ValidationReport};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::repository::{RepositoryError, SaleRepository};

// =============================================================================
// DTOs
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSaleItemCommand {
    pub product_id: Uuid,
    pub quantity: i32,
    pub unit_price: Money,
}

/// Request to record a new sale. `date` defaults to now when omitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSaleCommand {
    pub sale_number: String,
    #[serde(default = "Utc::now")]
    pub date: DateTime<Utc>,
    pub customer: String,
    pub branch: String,
    #[serde(default)]
    pub items: Vec<CreateSaleItemCommand>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSaleItemResult {
    pub product_id: Uuid,
    pub quantity: i32,
    pub unit_price: Money,
    pub discount: Money,
    pub total_amount: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSaleResult {
    pub id: Uuid,
    pub sale_number: String,
    pub total_amount: Money,
    pub items: Vec<CreateSaleItemResult>,
}

impl From<CreateSaleCommand> for Sale {
    fn from(command: CreateSaleCommand) -> Self {
        let mut sale = Sale::new(command.sale_number, command.customer, command.branch);
        sale.date = command.date;

        for item in command.items {
            sale.push_item(SaleItem::new(item.product_id, item.quantity, item.unit_price));
        }

        sale
    }
}

impl From<&SaleItem> for CreateSaleItemResult {
    fn from(item: &SaleItem) -> Self {
        CreateSaleItemResult {
            product_id: item.product_ref,
            quantity: item.quantity,
            unit_price: item.unit_price,
            discount: item.discount,
            total_amount: item.total_amount,
        }
    }
}

impl From<&Sale> for CreateSaleResult {
    fn from(sale: &Sale) -> Self {
        CreateSaleResult {
            id: sale.id,
            sale_number: sale.sale_number.clone(),
            total_amount: sale.total_amount,
            items: sale.items.iter().map(CreateSaleItemResult::from).collect(),
        }
    }
}

// =============================================================================
// Validation
// =============================================================================

/// Validates a create-sale command against the clock reading `now`.
///
/// Every violation is collected; item failures are reported under
/// `items[i].<field>`. Under [`PricingPolicy::Partial`] item quantities are
/// not checked here: the pricing engine reports the first one out of range.
pub fn validate_create_sale(
    command: &CreateSaleCommand,
    now: DateTime<Utc>,
    policy: PricingPolicy,
) -> ValidationReport {
    let mut report = ValidationReport::new();

    report
        .check("saleNumber", validate_sale_number(&command.sale_number))
        .check("date", validate_sale_date(command.date, now))
        .check("customer", validate_party_name("Customer", &command.customer))
        .check("branch", validate_party_name("Branch", &command.branch));

    if command.items.is_empty() {
        report.push(
            "items",
            ValidationError::Required {
                field: "At least one sale item".to_string(),
            },
        );
    }

    for (index, item) in command.items.iter().enumerate() {
        let mut item_report = ValidationReport::new();
        item_report.check("productId", validate_id("Product id", item.product_id));
        if policy == PricingPolicy::Atomic {
            item_report.check("quantity", validate_quantity(item.quantity));
        }
        item_report.check("unitPrice", validate_price("Unit price", item.unit_price));
        report.nest(&format!("items[{}]", index), item_report);
    }

    report
}

fn sale_number_taken(sale_number: &str) -> AppError {
    AppError::Conflict(format!("Sale with number {} already exists", sale_number))
}

// =============================================================================
// Handler
// =============================================================================

/// Validates, prices and stores a new sale.
///
/// ## Flow
/// ```text
/// CreateSaleCommand
///      │ validate_create_sale   ──► Validation (quantities too, if Atomic)
///      │ sale number lookup     ──► Conflict
///      ▼
/// Sale ──► PricingPolicy::apply ──► Pricing (Partial: first bad quantity;
///      │                                     either: amount overflow)
///      │ validate_sale          ──► Validation
///      ▼
/// SaleRepository::create ──► CreateSaleResult
/// ```
pub struct CreateSaleHandler {
    sales: Arc<dyn SaleRepository>,
    policy: PricingPolicy,
}

impl CreateSaleHandler {
    pub fn new(sales: Arc<dyn SaleRepository>, policy: PricingPolicy) -> Self {
        CreateSaleHandler { sales, policy }
    }

    pub async fn handle(&self, command: CreateSaleCommand) -> AppResult<CreateSaleResult> {
        debug!(
            sale_number = %command.sale_number,
            items = command.items.len(),
            "create_sale command"
        );

        let now = Utc::now();
        let report = validate_create_sale(&command, now, self.policy);
        if !report.is_valid() {
            warn!(violations = report.violations().len(), "Create sale rejected");
            return Err(report.into());
        }

        if self
            .sales
            .get_by_sale_number(&command.sale_number)
            .await?
            .is_some()
        {
            warn!(sale_number = %command.sale_number, "Duplicate sale number");
            return Err(sale_number_taken(&command.sale_number));
        }

        let mut sale = Sale::from(command);
        if let Err(err) = self.policy.apply(&mut sale) {
            warn!(index = err.index(), policy = %self.policy, error = %err, "Pricing rejected sale");
            return Err(err.into());
        }
        validate_sale(&sale, now).into_result()?;

        let sale = match self.sales.create(sale).await {
            Ok(sale) => sale,
            Err(RepositoryError::Duplicate { value, .. }) => return Err(sale_number_taken(&value)),
            Err(err) => return Err(err.into()),
        };

        info!(
            sale_id = %sale.id,
            total = %sale.total_amount,
            items = sale.items.len(),
            policy = %self.policy,
            "Sale created"
        );

        Ok(CreateSaleResult::from(&sale))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use rust_decimal_macros::dec;

    use tally_core::PricingError;

    use crate::error::ErrorCode;
    use crate::repository::InMemorySaleRepository;

    fn item(quantity: i32, unit_price: Money) -> CreateSaleItemCommand {
        CreateSaleItemCommand {
            product_id: Uuid::new_v4(),
            quantity,
            unit_price,
        }
    }

    fn command(sale_number: &str, items: Vec<CreateSaleItemCommand>) -> CreateSaleCommand {
        CreateSaleCommand {
            sale_number: sale_number.to_string(),
            date: Utc::now() - Duration::minutes(5),
            customer: "Jane Doe".to_string(),
            branch: "Downtown".to_string(),
            items,
        }
    }

    fn handler() -> (CreateSaleHandler, Arc<InMemorySaleRepository>) {
        handler_with(PricingPolicy::Atomic)
    }

    fn handler_with(policy: PricingPolicy) -> (CreateSaleHandler, Arc<InMemorySaleRepository>) {
        let repo = Arc::new(InMemorySaleRepository::new());
        (CreateSaleHandler::new(repo.clone(), policy), repo)
    }

    #[tokio::test]
    async fn test_create_sale_prices_items() {
        let (handler, repo) = handler();

        let result = handler
            .handle(command(
                "S-0001",
                vec![
                    item(2, Money::new(dec!(10.00))),
                    item(5, Money::new(dec!(20.00))),
                ],
            ))
            .await
            .unwrap();

        assert_eq!(result.total_amount, Money::new(dec!(110.00)));
        assert_eq!(result.items[0].discount, Money::zero());
        assert_eq!(result.items[1].discount, Money::new(dec!(10.00)));
        assert_eq!(result.items[1].total_amount, Money::new(dec!(90.00)));

        let stored = repo.get_by_id(result.id).await.unwrap().unwrap();
        assert_eq!(stored.total_amount, result.total_amount);
        assert!(stored.items.iter().all(|i| i.sale_id == stored.id));
    }

    #[tokio::test]
    async fn test_create_sale_bulk_tier() {
        let (handler, _) = handler();

        let result = handler
            .handle(command("S-0002", vec![item(15, Money::new(dec!(20.00)))]))
            .await
            .unwrap();

        assert_eq!(result.items[0].discount, Money::new(dec!(60.00)));
        assert_eq!(result.total_amount, Money::new(dec!(240.00)));
    }

    #[tokio::test]
    async fn test_duplicate_sale_number_is_conflict() {
        let (handler, _) = handler();
        handler
            .handle(command("S-0003", vec![item(1, Money::new(dec!(50)))]))
            .await
            .unwrap();

        let err = handler
            .handle(command("S-0003", vec![item(1, Money::new(dec!(50)))]))
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::Conflict);
        assert_eq!(err.to_string(), "Sale with number S-0003 already exists");
    }

    #[tokio::test]
    async fn test_quantity_above_limit_is_rejected() {
        let (handler, repo) = handler();

        let err = handler
            .handle(command("S-0004", vec![item(21, Money::new(dec!(10)))]))
            .await
            .unwrap_err();

        match err {
            AppError::Validation(report) => {
                assert!(report.has_violation_at("items[0].quantity"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
        assert!(repo.get_by_sale_number("S-0004").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_invalid_command_reports_every_field() {
        let (handler, _) = handler();
        let mut cmd = command("", vec![item(0, Money::zero())]);
        cmd.customer = String::new();
        cmd.date = Utc::now() + Duration::days(1);
        cmd.items[0].product_id = Uuid::nil();

        let err = handler.handle(cmd).await.unwrap_err();
        let AppError::Validation(report) = err else {
            panic!("expected validation error");
        };

        for path in [
            "saleNumber",
            "date",
            "customer",
            "items[0].productId",
            "items[0].quantity",
            "items[0].unitPrice",
        ] {
            assert!(report.has_violation_at(path), "missing violation at {}", path);
        }
        assert!(!report.has_violation_at("branch"));
    }

    #[tokio::test]
    async fn test_partial_policy_reports_first_oversized_item() {
        let cmd = command(
            "S-0005",
            vec![
                item(5, Money::new(dec!(10))),
                item(21, Money::new(dec!(10))),
                item(30, Money::new(dec!(10))),
            ],
        );

        let (atomic, _) = handler_with(PricingPolicy::Atomic);
        let AppError::Validation(report) = atomic.handle(cmd.clone()).await.unwrap_err() else {
            panic!("expected validation error under atomic policy");
        };
        assert!(report.has_violation_at("items[1].quantity"));
        assert!(report.has_violation_at("items[2].quantity"));

        let (partial, repo) = handler_with(PricingPolicy::Partial);
        let err = partial.handle(cmd).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::BusinessLogic);
        assert!(matches!(
            err,
            AppError::Pricing(PricingError::QuantityLimitExceeded { index: 1, quantity: 21, .. })
        ));
        assert!(repo.get_by_sale_number("S-0005").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_partial_policy_still_rejects_zero_quantity() {
        let (handler, _) = handler_with(PricingPolicy::Partial);

        let err = handler
            .handle(command("S-0006", vec![item(0, Money::new(dec!(10)))]))
            .await
            .unwrap_err();

        let AppError::Validation(report) = err else {
            panic!("expected validation error");
        };
        assert!(report.has_violation_at("items[0].quantity"));
    }

    #[tokio::test]
    async fn test_amount_overflow_is_business_error() {
        let (handler, repo) = handler();
        let huge = Money::new(dec!(5000000000000000000000000000));

        let err = handler
            .handle(command("S-0007", vec![item(20, huge)]))
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::BusinessLogic);
        assert!(matches!(
            err,
            AppError::Pricing(PricingError::AmountOverflow { index: 0, .. })
        ));
        assert!(repo.get_by_sale_number("S-0007").await.unwrap().is_none());
    }

    #[test]
    fn test_empty_items_is_a_violation() {
        let report = validate_create_sale(&command("S-1", vec![]), Utc::now(), PricingPolicy::Atomic);
        assert!(report.has_violation_at("items"));
    }

    #[test]
    fn test_command_wire_shape() {
        let json = serde_json::json!({
            "saleNumber": "S-9",
            "customer": "Jane",
            "branch": "Downtown",
            "items": [
                { "productId": Uuid::new_v4(), "quantity": 4, "unitPrice": "12.50" }
            ]
        });

        let cmd: CreateSaleCommand = serde_json::from_value(json).unwrap();
        assert_eq!(cmd.items[0].unit_price, Money::new(dec!(12.50)));
        assert!(cmd.date <= Utc::now());
    }
}
