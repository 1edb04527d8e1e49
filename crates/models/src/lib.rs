//! Persistence models for the customer service.
//! - SeaORM entity definitions and query helpers.
//! - Connection setup driven by `configs::DatabaseConfig`.

pub mod errors;
pub mod db;
pub mod customer;

#[cfg(test)]
mod tests;
