//! Store-independent catalog logic: filtering, rating and discount
//! aggregation, and pre-save validation.

pub mod filter;
pub mod pricing;
pub mod validation;

pub use filter::ProductFilter;
pub use validation::{FieldViolation, WriteMode};
