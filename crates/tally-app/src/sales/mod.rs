//! # Sale Handlers
//!
//! Commands and queries over sale aggregates.
//!
//! - [`CreateSaleHandler`] - validate, price and store a sale
//! - [`GetSaleHandler`] - fetch one sale by id
//! - [`GetSalesHandler`] - paged, customer-filtered listing

pub mod create;
pub mod get;
pub mod list;

pub use create::{
    validate_create_sale, CreateSaleCommand, CreateSaleHandler, CreateSaleItemCommand,
    CreateSaleItemResult, CreateSaleResult,
};
pub use get::{GetSaleHandler, GetSaleQuery, GetSaleResult, SaleItemResult};
pub use list::{GetSalesHandler, GetSalesQuery, GetSalesResult};
