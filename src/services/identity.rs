use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// Maps an external streaming-account ID to the internal user ID that keys
/// the imported rows
pub trait IdentityResolver: Send + Sync {
    fn resolve(&self, external_id: &str) -> AppResult<Uuid>;
}

/// Derives the internal ID as a UUIDv5 of the account ID in the DNS
/// namespace, the same derivation the import jobs use when writing rows
#[derive(Debug, Clone, Copy, Default)]
pub struct NamespacedIdentityResolver;

impl IdentityResolver for NamespacedIdentityResolver {
    fn resolve(&self, external_id: &str) -> AppResult<Uuid> {
        let external_id = external_id.trim();
        if external_id.is_empty() {
            return Err(AppError::InvalidInput(
                "Account ID must not be empty".to_string(),
            ));
        }

        Ok(Uuid::new_v5(&Uuid::NAMESPACE_DNS, external_id.as_bytes()))
    }
}
