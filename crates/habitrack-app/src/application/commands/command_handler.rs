use async_trait::async_trait;

use habitrack_domain::shared::DomainError;

/// Marker for command messages
pub trait Command: Send + Sync {}

#[async_trait]
pub trait CommandHandler<C: Command>: Send + Sync {
    type Result;

    async fn handle(&self, command: C) -> Result<Self::Result, DomainError>;
}
