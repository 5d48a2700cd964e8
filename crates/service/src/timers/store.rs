use crate::errors::ServiceError;
use async_trait::async_trait;

/// Trait abstraction for the label → timestamp mapping.
/// Implementations must persist every mutation before returning.
#[async_trait]
pub trait TimerStore: Send + Sync {
    async fn get(&self, label: &str) -> Option<i64>;
    /// Upsert; last write wins.
    async fn record(&self, label: String, timestamp: i64) -> Result<(), ServiceError>;
    /// Clear every label. Memory is cleared even if persisting fails.
    async fn reset(&self) -> Result<(), ServiceError>;
    async fn len(&self) -> usize;
}
