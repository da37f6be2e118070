//! SeaORM entity modules. The dashboard persists nothing but its users;
//! academic data is read from flat files.

pub mod user;

pub mod prelude {
    //! A prelude module for easy importing of all entities.
    pub use super::user::Entity as User;
}

#[cfg(test)]
mod test {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{
        ActiveModelTrait, ColumnTrait, Database, DatabaseConnection, DbErr, EntityTrait,
        QueryFilter, Set,
    };

    use super::*;
    use prelude::*;

    async fn setup_db() -> Result<DatabaseConnection, DbErr> {
        let db = Database::connect("sqlite::memory:").await?;
        Migrator::up(&db, None).await.expect("Migrations failed.");
        Ok(db)
    }

    #[tokio::test]
    async fn test_user_roundtrip() -> Result<(), DbErr> {
        let db = setup_db().await?;

        let created = user::ActiveModel {
            username: Set("jbetley".to_string()),
            password: Set("$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".to_string()),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        let found = User::find()
            .filter(user::Column::Username.eq("jbetley"))
            .one(&db)
            .await?
            .expect("user should exist");

        assert_eq!(found.id, created.id);
        assert!(found.password.starts_with("$argon2"));
        assert_eq!(user::Entity::find_by_username("jbetley").one(&db).await?, Some(found));

        Ok(())
    }

    #[tokio::test]
    async fn test_username_is_unique() -> Result<(), DbErr> {
        let db = setup_db().await?;

        user::ActiveModel {
            username: Set("admin".to_string()),
            password: Set("hash-one".to_string()),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        let duplicate = user::ActiveModel {
            username: Set("admin".to_string()),
            password: Set("hash-two".to_string()),
            ..Default::default()
        }
        .insert(&db)
        .await;

        assert!(duplicate.is_err());
        assert_eq!(User::find().all(&db).await?.len(), 1);
        Ok(())
    }
}
