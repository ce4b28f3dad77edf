//! Session-scoped persistence for in-progress wizard flows.
//!
//! A [`FlowStore`] holds the single [`FlowState`] record for one browsing
//! session and broadcasts every write to all subscribed controller
//! instances, so independently mounted consumers observe the same state
//! without threading it through by hand.

pub mod error;
pub mod memory;
pub mod state;
pub mod store;

pub use error::{Result, StoreError};
pub use memory::InMemorySessionStore;
pub use state::{FieldMap, FlowState};
pub use store::{FlowStore, STATE_KEY};
