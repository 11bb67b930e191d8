//! Tools offered to the LitLens model.
//!
//! The model can search arXiv while it answers; the agent runs the search
//! locally and feeds results back into the same call.

pub mod arxiv;

use std::sync::Arc;

use litlens_core::tool::ToolRegistry;

pub use arxiv::{ArxivPaper, ArxivSearchTool};

/// Create the registry every LitLens agent profile is given.
pub fn research_registry(arxiv: ArxivSearchTool) -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    registry.register(Arc::new(arxiv));
    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_offers_arxiv_search() {
        let registry = research_registry(ArxivSearchTool::default());
        assert_eq!(registry.len(), 1);
        assert!(registry.get("arxiv_search").is_some());
    }
}
