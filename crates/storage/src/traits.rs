use async_trait::async_trait;
use callboard_core::CallRecord;

use crate::error::StoreError;

/// The retrieval contract for call collections.
///
/// A `CallSource` hands out the full collection or a single record by id.
/// Sources are read-only: nothing in callboard writes records back.
///
/// ## Thread Safety
///
/// Implementations must be `Send + Sync + 'static` to be shared as axum
/// application state across request handlers.
#[async_trait]
pub trait CallSource: Send + Sync + 'static {
    /// Every call in the collection, in source order.
    async fn list_calls(&self) -> Result<Vec<CallRecord>, StoreError>;

    /// The call with the given id.
    ///
    /// Returns `Err(StoreError::NotFound)` if no call has that id.
    async fn get_call(&self, id: &str) -> Result<CallRecord, StoreError>;
}
