use async_trait::async_trait;
use tokio::sync::broadcast;

use crate::{FlowState, Result};

/// Fixed key of the persistence slot holding the serialized flow record.
pub const STATE_KEY: &str = "quote.wizard.state";

/// Core trait for flow store implementations.
///
/// A flow store holds one [`FlowState`] record per browsing session and
/// notifies all subscribers of every write. Implementations must be
/// thread-safe (Send + Sync).
#[async_trait]
pub trait FlowStore: Send + Sync {
    /// Reads the persisted record.
    ///
    /// A missing or malformed record degrades silently to
    /// `FlowState::default()`; this operation never fails. The
    /// transitioning flag is session-local and always loads as `false`.
    async fn load(&self) -> FlowState;

    /// Persists the record and broadcasts the change.
    ///
    /// The transitioning flag is stripped from the persisted form, but the
    /// state is broadcast exactly as given, so live subscribers observe
    /// the flag while the durable slot never carries it.
    async fn save(&self, state: &FlowState) -> Result<()>;

    /// Removes the persisted record and broadcasts an empty state.
    async fn clear(&self) -> Result<()>;

    /// Subscribes to state changes.
    ///
    /// Every `save` and `clear` publishes exactly once, in call order.
    fn subscribe(&self) -> broadcast::Receiver<FlowState>;
}
