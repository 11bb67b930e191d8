//! The LitLens research agent.
//!
//! Two user actions are supported, each a short pipeline run to completion:
//!
//! 1. **Chat**: extract uploaded PDFs into tagged context, then ask the
//!    answer agent and the citation agent concurrently
//! 2. **Compare**: one comparison-agent call for two paper identifiers
//!
//! Every agent call is single-shot (system instructions + one user query).
//! The model may call the `arxiv_search` tool; tool rounds are bounded.

pub mod client;
pub mod lab;
pub mod prompt;

#[cfg(test)]
mod test_helpers;

pub use client::{AgentProfile, AgentProfiles, ResearchAgent};
pub use lab::{ChatTurn, ComparisonResult, ResearchLab};
