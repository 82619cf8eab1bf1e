//! # Specifications
//!
//! Reusable boolean filters over domain types.

use crate::types::Sale;

/// A predicate over `T` that can be passed around as a value.
pub trait Specification<T> {
    /// Returns `true` when `candidate` satisfies the specification.
    fn is_satisfied_by(&self, candidate: &T) -> bool;
}

/// Satisfied by sales that have not been cancelled.
#[derive(Debug, Clone, Copy, Default)]
pub struct ActiveSaleSpecification;

impl Specification<Sale> for ActiveSaleSpecification {
    fn is_satisfied_by(&self, sale: &Sale) -> bool {
        sale.is_active()
    }
}
