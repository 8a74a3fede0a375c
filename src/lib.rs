pub mod account;
pub mod ai;
pub mod config;
pub mod connect;
pub mod error;
pub mod pages;
pub mod state;

// Re-export commonly used types
pub use account::{AuthUser, ProfileSync, SyncOutcome};
pub use ai::GenerativeModel;
pub use config::Config;
pub use connect::{DataConnect, DataConnectOptions};
pub use error::{MarqueeError, Result};
pub use state::{FileStateStore, MemoryStateStore, StateStore};
