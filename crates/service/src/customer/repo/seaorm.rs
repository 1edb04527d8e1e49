use sea_orm::DatabaseConnection;

use crate::customer::domain::Customer;
use crate::customer::errors::CustomerError;
use crate::customer::repository::CustomerRepository;

/// SeaORM-backed repository implementation.
pub struct SeaOrmCustomerRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmCustomerRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait::async_trait]
impl CustomerRepository for SeaOrmCustomerRepository {
    async fn find_all(&self) -> Result<Vec<Customer>, CustomerError> {
        let rows = models::customer::list(&self.db).await?;
        Ok(rows.into_iter().map(Customer::from).collect())
    }

    async fn find_by_id(&self, customer_id: &str) -> Result<Option<Customer>, CustomerError> {
        Ok(models::customer::get(&self.db, customer_id).await?.map(Customer::from))
    }

    async fn save(&self, customer: Customer) -> Result<Customer, CustomerError> {
        let saved = models::customer::upsert(&self.db, customer.into()).await?;
        Ok(saved.into())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Customer>, CustomerError> {
        Ok(models::customer::find_by_name(&self.db, name).await?.map(Customer::from))
    }

    async fn find_all_by_active(&self, active: bool) -> Result<Vec<Customer>, CustomerError> {
        let rows = models::customer::list_by_active(&self.db, active).await?;
        Ok(rows.into_iter().map(Customer::from).collect())
    }
}
