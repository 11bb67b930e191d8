//! # LitLens Core
//!
//! Domain types, traits, and error definitions for the LitLens research
//! assistant. This crate has **zero framework dependencies**: it defines the
//! domain model that every other crate implements against.
//!
//! ## Layout
//!
//! - [`provider`]: the hosted chat-model abstraction
//! - [`tool`]: callable tools offered to the model (arXiv search)
//! - [`message`]: the message values exchanged with a model
//! - [`session`]: append-only per-session chat history
//! - [`error`]: the error taxonomy shared by all crates

pub mod error;
pub mod message;
pub mod provider;
pub mod session;
pub mod tool;

// Re-export key types at crate root for ergonomics
pub use error::{Error, Result};
pub use message::{Message, MessageToolCall, Role};
pub use provider::{
    Provider, ProviderFactory, ProviderRequest, ProviderResponse, ToolDefinition, Usage,
};
pub use session::{ChatHistory, HistoryEntry};
pub use tool::{Tool, ToolCall, ToolRegistry, ToolResult};
