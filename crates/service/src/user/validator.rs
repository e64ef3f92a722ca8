use super::domain::NewUser;
use crate::errors::ServiceError;

/// Knobs for [`validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationPolicy {
    /// Treat a whitespace-only email as missing.
    pub reject_blank_email: bool,
}

impl Default for ValidationPolicy {
    fn default() -> Self { Self { reject_blank_email: true } }
}

impl From<&configs::ValidationConfig> for ValidationPolicy {
    fn from(cfg: &configs::ValidationConfig) -> Self {
        Self { reject_blank_email: cfg.reject_blank_email }
    }
}

/// Check required fields. Absent and empty values are rejected; a blank email
/// is rejected only when the policy says so.
pub fn validate(name: Option<&str>, email: Option<&str>, policy: ValidationPolicy) -> Result<NewUser, ServiceError> {
    match (name, email) {
        (Some(n), Some(e))
            if !n.is_empty() && !e.is_empty() && !(policy.reject_blank_email && e.trim().is_empty()) =>
        {
            Ok(NewUser { name: n.to_string(), email: e.to_string() })
        }
        _ => Err(ServiceError::Validation(format!(
            "Invalid user name={}, email={}",
            name.unwrap_or_default(),
            email.unwrap_or_default()
        ))),
    }
}
