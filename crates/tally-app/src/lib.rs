//! # tally-app: Command and Query Handlers for Tally
//!
//! Orchestration on top of [`tally_core`]: request validation, the pricing
//! pass, storage through repository traits, and DTO conversion.
//!
//! ## Request Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Create Sale                                     │
//! │                                                                         │
//! │  CreateSaleCommand (JSON)                                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  validate_create_sale ──► ValidationReport ──► AppError::Validation    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Sale::from(command) ──► PricingPolicy::apply (tally-core)             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Arc<dyn SaleRepository>::create                                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CreateSaleResult (JSON)                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`sales`] - Create, get and list sales
//! - [`products`] - Create, get and list catalog products
//! - [`repository`] - Storage traits and in-memory implementations
//! - [`config`] - Environment-driven configuration
//! - [`telemetry`] - `tracing` subscriber setup
//! - [`error`] - Handler errors and the serialized error envelope

pub mod config;
pub mod error;
pub mod products;
pub mod repository;
pub mod sales;
pub mod telemetry;

pub use config::{AppConfig, ConfigError};
pub use error::{ApiError, AppError, AppResult, ErrorCode};
