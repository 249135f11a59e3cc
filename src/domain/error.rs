use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("required route parameter `{name}` is missing")]
    MissingParameter { name: &'static str },
}

impl DomainError {
    pub fn missing_parameter(name: &'static str) -> Self {
        Self::MissingParameter { name }
    }
}

/// Fail fast when a route parameter the handler cannot work without is absent or blank.
pub fn require_param<'a>(
    value: Option<&'a str>,
    name: &'static str,
) -> Result<&'a str, DomainError> {
    match value {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(DomainError::missing_parameter(name)),
    }
}
