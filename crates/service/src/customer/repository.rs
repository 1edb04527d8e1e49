use async_trait::async_trait;

use super::domain::Customer;
use super::errors::CustomerError;

/// Repository abstraction for customer persistence.
///
/// Sequences come back ordered by ascending `customer_id`.
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Customer>, CustomerError>;
    async fn find_by_id(&self, customer_id: &str) -> Result<Option<Customer>, CustomerError>;
    /// Insert, or overwrite the record stored under the same id.
    async fn save(&self, customer: Customer) -> Result<Customer, CustomerError>;
    /// First exact match by name, lowest id wins.
    async fn find_by_name(&self, name: &str) -> Result<Option<Customer>, CustomerError>;
    async fn find_all_by_active(&self, active: bool) -> Result<Vec<Customer>, CustomerError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockCustomerRepository {
        customers: Mutex<BTreeMap<String, Customer>>, // key: customer_id
        saves: AtomicUsize,
    }

    impl MockCustomerRepository {
        /// Number of `save` calls so far.
        pub fn save_count(&self) -> usize {
            self.saves.load(Ordering::SeqCst)
        }

        /// Number of stored records, active or not.
        pub fn len(&self) -> usize {
            self.customers.lock().unwrap().len()
        }

        pub fn is_empty(&self) -> bool {
            self.len() == 0
        }
    }

    #[async_trait]
    impl CustomerRepository for MockCustomerRepository {
        async fn find_all(&self) -> Result<Vec<Customer>, CustomerError> {
            let customers = self.customers.lock().unwrap();
            Ok(customers.values().cloned().collect())
        }

        async fn find_by_id(&self, customer_id: &str) -> Result<Option<Customer>, CustomerError> {
            let customers = self.customers.lock().unwrap();
            Ok(customers.get(customer_id).cloned())
        }

        async fn save(&self, customer: Customer) -> Result<Customer, CustomerError> {
            self.saves.fetch_add(1, Ordering::SeqCst);
            let mut customers = self.customers.lock().unwrap();
            customers.insert(customer.customer_id.clone(), customer.clone());
            Ok(customer)
        }

        async fn find_by_name(&self, name: &str) -> Result<Option<Customer>, CustomerError> {
            let customers = self.customers.lock().unwrap();
            Ok(customers.values().find(|c| c.name == name).cloned())
        }

        async fn find_all_by_active(&self, active: bool) -> Result<Vec<Customer>, CustomerError> {
            let customers = self.customers.lock().unwrap();
            Ok(customers.values().filter(|c| c.active == active).cloned().collect())
        }
    }
}
