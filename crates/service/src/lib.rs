//! Service layer for the user registry.
//! - Validates input before anything reaches storage.
//! - Hides persistence behind the `UserRepository` trait.
//! - Translates absent records into `ServiceError::NotFound`.

pub mod errors;
pub mod user;
#[cfg(test)]
pub mod test_support;

pub use errors::ServiceError;
pub use user::UserService;
