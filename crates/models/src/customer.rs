use sea_orm::{entity::prelude::*, sea_query::OnConflict, DatabaseConnection, QueryOrder, Set};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "customer")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub customer_id: String,
    pub name: String,
    pub email: String,
    pub contact: String,
    pub address: String,
    pub active: bool,
    pub added: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// All customers ordered by id.
pub async fn list(db: &DatabaseConnection) -> Result<Vec<Model>, ModelError> {
    Ok(Entity::find().order_by_asc(Column::CustomerId).all(db).await?)
}

pub async fn get(db: &DatabaseConnection, customer_id: &str) -> Result<Option<Model>, ModelError> {
    Ok(Entity::find_by_id(customer_id.to_string()).one(db).await?)
}

/// First customer with exactly this name, lowest id wins when names collide.
pub async fn find_by_name(db: &DatabaseConnection, name: &str) -> Result<Option<Model>, ModelError> {
    Ok(Entity::find()
        .filter(Column::Name.eq(name))
        .order_by_asc(Column::CustomerId)
        .one(db)
        .await?)
}

pub async fn list_by_active(db: &DatabaseConnection, active: bool) -> Result<Vec<Model>, ModelError> {
    Ok(Entity::find()
        .filter(Column::Active.eq(active))
        .order_by_asc(Column::CustomerId)
        .all(db)
        .await?)
}

/// Insert the row, or overwrite every column when the id already exists.
///
/// Runs as one `INSERT .. ON CONFLICT DO UPDATE` so concurrent saves of a new id both succeed.
pub async fn upsert(db: &DatabaseConnection, model: Model) -> Result<Model, ModelError> {
    let customer_id = model.customer_id.clone();
    let am = ActiveModel {
        customer_id: Set(model.customer_id),
        name: Set(model.name),
        email: Set(model.email),
        contact: Set(model.contact),
        address: Set(model.address),
        active: Set(model.active),
        added: Set(model.added),
    };
    Entity::insert(am)
        .on_conflict(
            OnConflict::column(Column::CustomerId)
                .update_columns([
                    Column::Name,
                    Column::Email,
                    Column::Contact,
                    Column::Address,
                    Column::Active,
                    Column::Added,
                ])
                .to_owned(),
        )
        .exec_without_returning(db)
        .await?;
    get(db, &customer_id)
        .await?
        .ok_or_else(|| ModelError::Db(format!("customer {} missing after upsert", customer_id)))
}
