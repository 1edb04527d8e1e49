//! Customer module: three-layer architecture (domain, repository, service).
//!
//! Business rules live in [`service::CustomerService`]; persistence sits behind
//! the [`repository::CustomerRepository`] trait.

pub mod domain;
pub mod errors;
pub mod repository;
pub mod service;
pub mod repo;

pub use domain::Customer;
pub use errors::CustomerError;
pub use service::CustomerService;
