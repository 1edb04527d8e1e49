//! Service layer providing business-oriented customer operations on top of models.
//! - Separates business logic from data access through `CustomerRepository`.
//! - Reuses entity definitions in the `models` crate.
//! - Provides clear error types and documented interfaces.

pub mod customer;
#[cfg(test)]
pub mod test_support;
