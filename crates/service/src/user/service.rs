use std::sync::Arc;

use tracing::{info, instrument};

use super::domain::User;
use super::repository::UserRepository;
use super::validator::{validate, ValidationPolicy};
use crate::errors::ServiceError;

/// User business service independent of web framework
pub struct UserService<R: UserRepository> {
    repo: Arc<R>,
    policy: ValidationPolicy,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repo: Arc<R>, policy: ValidationPolicy) -> Self { Self { repo, policy } }

    /// Validate and store a new user.
    ///
    /// # Examples
    /// ```
    /// use service::user::{UserService, repository::mock::MockUserRepository, validator::ValidationPolicy};
    /// use std::sync::Arc;
    /// let svc = UserService::new(Arc::new(MockUserRepository::default()), ValidationPolicy::default());
    /// let user = tokio_test::block_on(svc.create(Some("Ivan"), Some("ivan@test.ru"))).unwrap();
    /// assert_eq!(user.name, "Ivan");
    /// assert!(tokio_test::block_on(svc.create(Some(""), Some("ivan@test.ru"))).is_err());
    /// ```
    #[instrument(skip(self))]
    pub async fn create(&self, name: Option<&str>, email: Option<&str>) -> Result<User, ServiceError> {
        let new_user = validate(name, email, self.policy)?;
        let user = self.repo.save(new_user).await?;
        info!(user_id = user.id, "user_created");
        Ok(user)
    }

    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: i32) -> Result<User, ServiceError> {
        let user = self.existing(id).await?;
        info!(user_id = id, "user_fetched");
        Ok(user)
    }

    async fn existing(&self, id: i32) -> Result<User, ServiceError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::user_not_found(id))
    }

    /// Overwrite name and email; id and creation time are kept.
    #[instrument(skip(self))]
    pub async fn update(&self, id: i32, name: Option<&str>, email: Option<&str>) -> Result<User, ServiceError> {
        let input = validate(name, email, self.policy)?;
        let mut user = self.existing(id).await?;
        user.name = input.name;
        user.email = input.email;
        let updated = self.repo.update(user).await?;
        info!(user_id = id, "user_updated");
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete_by_id(&self, id: i32) -> Result<(), ServiceError> {
        let user = self.existing(id).await?;
        self.repo.delete(user.id).await?;
        info!(user_id = id, "user_deleted");
        Ok(())
    }
}
