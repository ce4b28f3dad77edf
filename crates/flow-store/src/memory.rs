use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{RwLock, broadcast};

use crate::{FlowState, FlowStore, Result, STATE_KEY};

/// Broadcast buffer depth; a lagging subscriber only ever needs the most
/// recent record, so a small buffer is sufficient.
const CHANGE_BUFFER: usize = 32;

/// In-memory session store.
///
/// Models a per-session key-value slot (the session-storage analog) with a
/// broadcast channel for cross-instance change notification. Cloning the
/// store shares the underlying slot and channel.
#[derive(Clone)]
pub struct InMemorySessionStore {
    slots: Arc<RwLock<HashMap<String, String>>>,
    changes: broadcast::Sender<FlowState>,
}

impl InMemorySessionStore {
    /// Creates a new empty session store.
    pub fn new() -> Self {
        let (changes, _) = broadcast::channel(CHANGE_BUFFER);
        Self {
            slots: Arc::new(RwLock::new(HashMap::new())),
            changes,
        }
    }

    /// Returns the raw serialized record, if one is persisted.
    pub async fn raw_record(&self) -> Option<String> {
        self.slots.read().await.get(STATE_KEY).cloned()
    }

    /// Overwrites the raw slot contents, bypassing serialization.
    ///
    /// Test hook for simulating records written by older or foreign code.
    pub async fn put_raw_record(&self, raw: impl Into<String>) {
        self.slots.write().await.insert(STATE_KEY.to_string(), raw.into());
    }

    /// Returns the number of live change subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.changes.receiver_count()
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FlowStore for InMemorySessionStore {
    async fn load(&self) -> FlowState {
        let slots = self.slots.read().await;
        match slots.get(STATE_KEY) {
            Some(raw) => serde_json::from_str(raw).unwrap_or_else(|err| {
                tracing::debug!(%err, "malformed flow record, recovering to empty state");
                FlowState::default()
            }),
            None => FlowState::default(),
        }
    }

    async fn save(&self, state: &FlowState) -> Result<()> {
        // `is_transitioning` is #[serde(skip)], so the persisted form is
        // already stripped of it.
        let raw = serde_json::to_string(state)?;
        self.slots.write().await.insert(STATE_KEY.to_string(), raw);

        // Send fails only when nobody is subscribed, which is fine.
        let _ = self.changes.send(state.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        self.slots.write().await.remove(STATE_KEY);
        let _ = self.changes.send(FlowState::default());
        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<FlowState> {
        self.changes.subscribe()
    }
}
