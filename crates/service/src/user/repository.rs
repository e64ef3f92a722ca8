use async_trait::async_trait;

use super::domain::{NewUser, User};
use crate::errors::ServiceError;

/// Persistence adapter for user records.
///
/// `update` and `delete` must fail with [`ServiceError::NotFound`] when the
/// target row is gone; they never succeed silently.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn save(&self, user: NewUser) -> Result<User, ServiceError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, ServiceError>;
    async fn update(&self, user: User) -> Result<User, ServiceError>;
    async fn delete(&self, id: i32) -> Result<(), ServiceError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex;

    use chrono::Utc;

    #[derive(Default)]
    struct Table {
        last_id: i32,
        rows: BTreeMap<i32, User>,
    }

    #[derive(Default)]
    pub struct MockUserRepository {
        table: Mutex<Table>,
        failing: AtomicBool,
    }

    impl MockUserRepository {
        /// Make every following call fail with a storage error.
        pub fn set_failing(&self, failing: bool) {
            self.failing.store(failing, Ordering::SeqCst);
        }

        pub fn len(&self) -> usize {
            self.table.lock().unwrap().rows.len()
        }

        pub fn is_empty(&self) -> bool { self.len() == 0 }

        fn check(&self) -> Result<(), ServiceError> {
            if self.failing.load(Ordering::SeqCst) {
                return Err(ServiceError::Storage("mock storage unavailable".into()));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl UserRepository for MockUserRepository {
        async fn save(&self, user: NewUser) -> Result<User, ServiceError> {
            self.check()?;
            let mut table = self.table.lock().unwrap();
            table.last_id += 1;
            let stored = User { id: table.last_id, name: user.name, email: user.email, created_at: Utc::now().into() };
            table.rows.insert(stored.id, stored.clone());
            Ok(stored)
        }

        async fn find_by_id(&self, id: i32) -> Result<Option<User>, ServiceError> {
            self.check()?;
            Ok(self.table.lock().unwrap().rows.get(&id).cloned())
        }

        async fn update(&self, user: User) -> Result<User, ServiceError> {
            self.check()?;
            let mut table = self.table.lock().unwrap();
            let row = table.rows.get_mut(&user.id).ok_or_else(|| ServiceError::user_not_found(user.id))?;
            row.name = user.name;
            row.email = user.email;
            Ok(row.clone())
        }

        async fn delete(&self, id: i32) -> Result<(), ServiceError> {
            self.check()?;
            let mut table = self.table.lock().unwrap();
            table.rows.remove(&id).map(|_| ()).ok_or_else(|| ServiceError::user_not_found(id))
        }
    }
}
