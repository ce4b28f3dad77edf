mod types;

pub use types::SessionId;
