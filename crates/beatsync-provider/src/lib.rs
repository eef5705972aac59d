//! HTTP clients for the remote generation providers.
//!
//! This crate provides:
//! - A script-generation client (chat-completion wire format)
//! - A video-generation client (text-to-video submit + status wire format)
//! - Normalized provider status types and the provider error taxonomy
//!
//! Both providers are opaque upstream services; base URLs are configurable so
//! tests can point the clients at a local mock server.

pub mod config;
pub mod error;
pub mod script;
pub mod types;
pub mod video;

pub use config::ProviderConfig;
pub use error::{ProviderError, ProviderResult};
pub use script::ScriptClient;
pub use types::ProviderStatus;
pub use video::{RunwayClient, VideoGeneration};
