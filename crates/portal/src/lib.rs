//! `portal` - Content store and admin console for a community state portal
//!
//! Typed collections (people, news, role requests, construction projects,
//! city news, photo albums, army units) and scalar settings persisted in a
//! flat string key-value namespace, seeded with defaults on first use. Page
//! view models render the stored content as text; an administrator session
//! gates every edit.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod session;
pub mod shell;
pub mod storage;
pub mod store;
pub mod views;

pub use config::Config;
pub use error::{Error, Result};
pub use logging::init_logging;
pub use session::{AuthProvider, Credentials, FixedCredentials, SessionGate};
pub use shell::Route;
pub use storage::{KeyValueBackend, MemoryBackend, Storage, StorageStats};
pub use store::{PortalStore, Setting, StoreStats};
pub use views::Portal;
