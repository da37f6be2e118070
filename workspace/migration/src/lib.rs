pub use sea_orm_migration::prelude::*;

mod m20230813_000001_create_users_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20230813_000001_create_users_table::Migration)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{ConnectionTrait, Database, DbBackend, Statement};

    #[tokio::test]
    async fn test_up_and_down() {
        let db = Database::connect("sqlite::memory:").await.unwrap();

        Migrator::up(&db, None).await.expect("Migrations failed.");
        let manager = SchemaManager::new(&db);
        assert!(manager.has_table("users").await.unwrap());

        // Second run is a no-op
        Migrator::up(&db, None).await.unwrap();

        db.execute(Statement::from_string(
            DbBackend::Sqlite,
            "INSERT INTO users (username, password) VALUES ('a', 'x')".to_string(),
        ))
        .await
        .unwrap();
        let duplicate = db
            .execute(Statement::from_string(
                DbBackend::Sqlite,
                "INSERT INTO users (username, password) VALUES ('a', 'y')".to_string(),
            ))
            .await;
        assert!(duplicate.is_err(), "username must be unique");

        Migrator::down(&db, None).await.unwrap();
        assert!(!manager.has_table("users").await.unwrap());
    }
}
