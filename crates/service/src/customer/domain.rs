use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Domain customer (business view)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub customer_id: String,
    pub name: String,
    pub email: String,
    pub contact: String,
    pub address: String,
    /// `false` marks a soft-deleted record.
    pub active: bool,
    /// Set once when the customer is added.
    pub added: Option<DateTime<Utc>>,
}

impl Customer {
    /// Active customer with no `added` timestamp yet.
    pub fn new(
        customer_id: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
        contact: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self {
            customer_id: customer_id.into(),
            name: name.into(),
            email: email.into(),
            contact: contact.into(),
            address: address.into(),
            active: true,
            added: None,
        }
    }

    /// Copy the descriptive fields from `other`, keeping id, `active` and `added`.
    pub fn apply_details(&mut self, other: &Customer) {
        self.name.clone_from(&other.name);
        self.email.clone_from(&other.email);
        self.contact.clone_from(&other.contact);
        self.address.clone_from(&other.address);
    }
}

impl From<models::customer::Model> for Customer {
    fn from(m: models::customer::Model) -> Self {
        Self {
            customer_id: m.customer_id,
            name: m.name,
            email: m.email,
            contact: m.contact,
            address: m.address,
            active: m.active,
            added: m.added.map(|t| t.with_timezone(&Utc)),
        }
    }
}

impl From<Customer> for models::customer::Model {
    fn from(c: Customer) -> Self {
        Self {
            customer_id: c.customer_id,
            name: c.name,
            email: c.email,
            contact: c.contact,
            address: c.address,
            active: c.active,
            added: c.added.map(Into::into),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_details_leaves_identity_and_lifecycle_alone() {
        let added = Some(Utc::now());
        let mut stored = Customer { active: false, added, ..Customer::new("c1", "Ann", "a@x.io", "1", "Old St") };
        let input = Customer { active: true, added: None, ..Customer::new("other", "Bea", "b@x.io", "2", "New St") };

        stored.apply_details(&input);

        assert_eq!(stored.customer_id, "c1");
        assert_eq!(stored.name, "Bea");
        assert_eq!(stored.email, "b@x.io");
        assert_eq!(stored.contact, "2");
        assert_eq!(stored.address, "New St");
        assert!(!stored.active);
        assert_eq!(stored.added, added);
    }

    #[test]
    fn model_conversion_keeps_timestamp_instant() {
        let c = Customer { added: Some(Utc::now()), ..Customer::new("c1", "Ann", "a@x.io", "1", "St") };
        let back = Customer::from(models::customer::Model::from(c.clone()));
        assert_eq!(back, c);
    }
}
