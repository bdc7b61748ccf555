use uuid::Uuid;

use crate::domain::errors::DomainError;

/// Parse an identifier crossing the HTTP boundary into the store's native format.
pub fn parse_identifier(field: &str, raw: &str) -> Result<Uuid, DomainError> {
    Uuid::parse_str(raw.trim())
        .map_err(|_| DomainError::InvalidIdentifier(format!("{} '{}' is not a valid id", field, raw)))
}
