use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error("storage error: {0}")]
    Storage(String),
}

impl ServiceError {
    pub fn user_not_found(id: i32) -> Self { Self::NotFound(format!("User with id {} not found", id)) }

    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            ServiceError::Validation(_) => 1001,
            ServiceError::NotFound(_) => 1003,
            ServiceError::Storage(_) => 1200,
        }
    }
}

impl From<sea_orm::DbErr> for ServiceError {
    fn from(e: sea_orm::DbErr) -> Self { Self::Storage(e.to_string()) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_the_id() {
        assert_eq!(ServiceError::user_not_found(999).to_string(), "User with id 999 not found");
    }

    #[test]
    fn db_errors_become_storage() {
        let e: ServiceError = sea_orm::DbErr::Custom("boom".into()).into();
        assert!(matches!(e, ServiceError::Storage(_)));
        assert_eq!(e.code(), 1200);
    }
}
