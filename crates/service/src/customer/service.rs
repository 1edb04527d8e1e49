use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, instrument};

use super::domain::Customer;
use super::errors::CustomerError;
use super::repository::CustomerRepository;

/// Customer business service independent of web framework and storage.
pub struct CustomerService<R: CustomerRepository> {
    repo: Arc<R>,
}

impl<R: CustomerRepository> CustomerService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    /// Every stored customer, soft-deleted ones included.
    #[instrument(skip(self))]
    pub async fn get_all_customers(&self) -> Result<Vec<Customer>, CustomerError> {
        let customers = self.repo.find_all().await?;
        debug!(count = customers.len(), "customers_listed");
        Ok(customers)
    }

    #[instrument(skip(self))]
    pub async fn get_customer_by_id(&self, customer_id: &str) -> Result<Option<Customer>, CustomerError> {
        self.repo.find_by_id(customer_id).await
    }

    /// Persist the record as given, inserting or overwriting.
    #[instrument(skip(self, customer), fields(customer_id = %customer.customer_id))]
    pub async fn save_customer(&self, customer: Customer) -> Result<Customer, CustomerError> {
        let saved = self.repo.save(customer).await?;
        info!(customer_id = %saved.customer_id, "customer_saved");
        Ok(saved)
    }

    /// Copy `name`, `email`, `contact` and `address` onto the stored record.
    ///
    /// Returns [`CustomerError::NotFound`] without writing anything when no
    /// record exists under `customer.customer_id`.
    ///
    /// # Examples
    /// ```
    /// use service::customer::{Customer, CustomerError, CustomerService};
    /// use service::customer::repository::mock::MockCustomerRepository;
    /// use std::sync::Arc;
    /// let svc = CustomerService::new(Arc::new(MockCustomerRepository::default()));
    /// let missing = Customer::new("c9", "Ann", "ann@example.com", "555", "1 Main St");
    /// let err = tokio_test::block_on(svc.update_customer(missing)).unwrap_err();
    /// assert!(matches!(err, CustomerError::NotFound(_)));
    /// ```
    #[instrument(skip(self, customer), fields(customer_id = %customer.customer_id))]
    pub async fn update_customer(&self, customer: Customer) -> Result<Customer, CustomerError> {
        let mut existing = match self.repo.find_by_id(&customer.customer_id).await? {
            Some(c) => c,
            None => {
                debug!("update target missing");
                return Err(CustomerError::not_found(&customer.customer_id));
            }
        };
        existing.apply_details(&customer);
        let updated = self.repo.save(existing).await?;
        info!(customer_id = %updated.customer_id, "customer_updated");
        Ok(updated)
    }

    /// Soft delete: mark the customer inactive. A missing id is a no-op.
    ///
    /// # Examples
    /// ```
    /// use service::customer::{Customer, CustomerService};
    /// use service::customer::repository::mock::MockCustomerRepository;
    /// use std::sync::Arc;
    /// let svc = CustomerService::new(Arc::new(MockCustomerRepository::default()));
    /// tokio_test::block_on(async {
    ///     svc.add_new_customer(Customer::new("c1", "Ann", "ann@example.com", "555", "1 Main St")).await.unwrap();
    ///     svc.delete_customer("c1").await.unwrap();
    ///     let c = svc.get_customer_by_id("c1").await.unwrap().unwrap();
    ///     assert!(!c.active);
    /// });
    /// ```
    #[instrument(skip(self))]
    pub async fn delete_customer(&self, customer_id: &str) -> Result<(), CustomerError> {
        let Some(mut existing) = self.repo.find_by_id(customer_id).await? else {
            debug!("delete target missing; nothing to do");
            return Ok(());
        };
        existing.active = false;
        self.repo.save(existing).await?;
        info!(customer_id, "customer_soft_deleted");
        Ok(())
    }

    /// Stamp `added` with the current time and persist. Existing ids are overwritten.
    #[instrument(skip(self, customer), fields(customer_id = %customer.customer_id))]
    pub async fn add_new_customer(&self, mut customer: Customer) -> Result<Customer, CustomerError> {
        customer.added = Some(Utc::now());
        let saved = self.repo.save(customer).await?;
        info!(customer_id = %saved.customer_id, "customer_added");
        Ok(saved)
    }

    /// Exact name match; the lowest id wins when several customers share the name.
    #[instrument(skip(self))]
    pub async fn get_customer_by_name(&self, name: &str) -> Result<Option<Customer>, CustomerError> {
        self.repo.find_by_name(name).await
    }

    #[instrument(skip(self))]
    pub async fn find_customers_by_active(&self) -> Result<Vec<Customer>, CustomerError> {
        self.repo.find_all_by_active(true).await
    }
}
