use sea_orm::{ActiveModelTrait, ConnectionTrait, DatabaseConnection, EntityTrait, Set, TransactionTrait};
use tracing::debug;

use crate::errors::ServiceError;
use crate::user::domain::{NewUser, User};
use crate::user::repository::UserRepository;
use models::user;

/// SeaORM-backed repository. Every mutation runs in its own transaction;
/// dropping the transaction on an early return rolls it back.
#[derive(Clone)]
pub struct SeaOrmUserRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmUserRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

async fn find_existing<C: ConnectionTrait>(conn: &C, id: i32) -> Result<user::Model, ServiceError> {
    user::Entity::find_by_id(id)
        .one(conn)
        .await?
        .ok_or_else(|| ServiceError::user_not_found(id))
}

#[async_trait::async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn save(&self, new_user: NewUser) -> Result<User, ServiceError> {
        let txn = self.db.begin().await?;
        let created = user::new_record(&new_user.name, &new_user.email).insert(&txn).await?;
        txn.commit().await?;
        debug!(user_id = created.id, "repo: saved user");
        Ok(created.into())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<User>, ServiceError> {
        debug!(user_id = id, "repo: fetching user");
        let found = user::Entity::find_by_id(id).one(&self.db).await?;
        Ok(found.map(User::from))
    }

    async fn update(&self, changed: User) -> Result<User, ServiceError> {
        let txn = self.db.begin().await?;
        let mut am: user::ActiveModel = find_existing(&txn, changed.id).await?.into();
        am.name = Set(changed.name);
        am.email = Set(changed.email);
        let updated = am.update(&txn).await?;
        txn.commit().await?;
        debug!(user_id = updated.id, "repo: updated user");
        Ok(updated.into())
    }

    async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        let txn = self.db.begin().await?;
        let existing = find_existing(&txn, id).await?;
        user::Entity::delete_by_id(existing.id).exec(&txn).await?;
        txn.commit().await?;
        debug!(user_id = id, "repo: deleted user");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;

    fn new_user(name: &str, email: &str) -> NewUser {
        NewUser { name: name.into(), email: email.into() }
    }

    #[tokio::test]
    async fn save_assigns_id_and_timestamp() -> Result<(), anyhow::Error> {
        let repo = SeaOrmUserRepository::new(get_db().await?);
        let a = repo.save(new_user("Anna", "anna@test.ru")).await?;
        let b = repo.save(new_user("Boris", "boris@test.ru")).await?;
        assert!(a.id > 0);
        assert_ne!(a.id, b.id);
        assert!(a.created_at <= b.created_at);

        let found = repo.find_by_id(a.id).await?.unwrap();
        assert_eq!(found, a);
        Ok(())
    }

    #[tokio::test]
    async fn update_keeps_id_and_created_at() -> Result<(), anyhow::Error> {
        let repo = SeaOrmUserRepository::new(get_db().await?);
        let saved = repo.save(new_user("Anna", "anna@test.ru")).await?;

        let changed = User { name: "Anna K".into(), email: "annak@test.ru".into(), ..saved.clone() };
        let updated = repo.update(changed).await?;
        assert_eq!(updated.id, saved.id);
        assert_eq!(updated.created_at, saved.created_at);
        assert_eq!(updated.name, "Anna K");
        assert_eq!(repo.find_by_id(saved.id).await?.unwrap(), updated);
        Ok(())
    }

    #[tokio::test]
    async fn update_and_delete_missing_row_is_not_found() -> Result<(), anyhow::Error> {
        let repo = SeaOrmUserRepository::new(get_db().await?);
        let ghost = User { id: 999, name: "X".into(), email: "x@y.z".into(), created_at: chrono::Utc::now().into() };

        assert!(matches!(repo.update(ghost).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(repo.delete(999).await, Err(ServiceError::NotFound(_))));
        assert!(repo.find_by_id(999).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn delete_removes_row() -> Result<(), anyhow::Error> {
        let repo = SeaOrmUserRepository::new(get_db().await?);
        let saved = repo.save(new_user("Anna", "anna@test.ru")).await?;
        repo.delete(saved.id).await?;
        assert!(repo.find_by_id(saved.id).await?.is_none());
        assert!(matches!(repo.delete(saved.id).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn closed_connection_surfaces_storage_error() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let repo = SeaOrmUserRepository::new(db.clone());
        db.close().await?;
        assert!(matches!(repo.find_by_id(1).await, Err(ServiceError::Storage(_))));
        assert!(matches!(repo.save(new_user("A", "a@b.c")).await, Err(ServiceError::Storage(_))));
        Ok(())
    }
}
