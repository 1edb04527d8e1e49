#![cfg(test)]
use configs::DatabaseConfig;
use sea_orm::DatabaseConnection;
use models::db::{connect_with_config, create_tables};

/// Fresh in-memory SQLite database with the customer table in place.
///
/// The pool holds one connection so all queries hit the same database.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    let cfg = DatabaseConfig {
        url: "sqlite::memory:".into(),
        max_connections: 1,
        min_connections: 1,
        ..Default::default()
    };
    let db = connect_with_config(&cfg).await?;
    create_tables(&db).await?;
    Ok(db)
}
