//! Hosted chat-model clients for LitLens.
//!
//! All providers implement the `litlens_core::Provider` trait. Providers are
//! bound to one user's API key, so callers go through a
//! `litlens_core::ProviderFactory` after validating the key with [`ApiKey`].

pub mod credential;
pub mod openai_compat;

pub use credential::ApiKey;
pub use openai_compat::{OpenAiCompatFactory, OpenAiCompatProvider};
