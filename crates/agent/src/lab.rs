//! The chat and comparison flows.
//!
//! A [`ResearchLab`] owns everything that is shared across requests (tool
//! registry, profiles, page extractor) and builds a fresh provider per call
//! from the caller's API key.

use std::sync::Arc;

use litlens_config::AppConfig;
use litlens_core::error::Error;
use litlens_core::provider::{Provider, ProviderFactory};
use litlens_core::tool::ToolRegistry;
use litlens_documents::{
    ContextExtractor, DEFAULT_MAX_CHARS, ExtractedContext, PageExtractor, PdfPageExtractor,
    SkippedDocument, UploadedDocument,
};
use litlens_providers::{ApiKey, OpenAiCompatFactory};
use litlens_tools::{ArxivSearchTool, research_registry};
use serde::Serialize;
use tracing::{debug, info};

use crate::client::{AgentProfile, AgentProfiles, DEFAULT_MAX_TOOL_ROUNDS, ResearchAgent};
use crate::prompt;

/// Result of one chat submission.
#[derive(Debug, Clone, Serialize)]
pub struct ChatTurn {
    pub answer: String,
    pub references: String,
    /// Uploaded files that could not be read
    pub skipped_documents: Vec<SkippedDocument>,
}

/// Result of one comparison. Never stored.
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonResult {
    pub paper_a: String,
    pub paper_b: String,
    pub content: String,
}

pub struct ResearchLab {
    factory: Arc<dyn ProviderFactory>,
    tools: Arc<ToolRegistry>,
    profiles: AgentProfiles,
    extractor: Arc<dyn PageExtractor>,
    max_chars: usize,
    max_tool_rounds: u32,
}

impl ResearchLab {
    pub fn new(factory: Arc<dyn ProviderFactory>, tools: Arc<ToolRegistry>) -> Self {
        Self {
            factory,
            tools,
            profiles: AgentProfiles::default(),
            extractor: Arc::new(PdfPageExtractor),
            max_chars: DEFAULT_MAX_CHARS,
            max_tool_rounds: DEFAULT_MAX_TOOL_ROUNDS,
        }
    }

    /// Wire up the production provider, arXiv tool, and PDF extractor.
    pub fn from_config(config: &AppConfig) -> Self {
        let factory = OpenAiCompatFactory::new(
            config.provider.base_url.clone(),
            std::time::Duration::from_secs(config.provider.timeout_secs),
        );
        let arxiv = ArxivSearchTool::new(config.arxiv.base_url.clone(), config.arxiv.max_results);

        Self::new(Arc::new(factory), Arc::new(research_registry(arxiv)))
            .with_profiles(AgentProfiles::from_config(&config.agents))
            .with_max_chars(config.extraction.max_chars)
            .with_max_tool_rounds(config.max_tool_rounds)
    }

    pub fn with_profiles(mut self, profiles: AgentProfiles) -> Self {
        self.profiles = profiles;
        self
    }

    pub fn with_extractor(mut self, extractor: Arc<dyn PageExtractor>) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn with_max_chars(mut self, max_chars: usize) -> Self {
        self.max_chars = max_chars;
        self
    }

    pub fn with_max_tool_rounds(mut self, max: u32) -> Self {
        self.max_tool_rounds = max;
        self
    }

    pub fn profiles(&self) -> &AgentProfiles {
        &self.profiles
    }

    /// Answer `query` from the uploaded documents and arXiv, plus a reference list.
    ///
    /// The key is checked before anything else runs. Documents are only
    /// parsed when some were uploaded. The answer and reference calls run
    /// concurrently; if either fails the whole turn fails.
    pub async fn chat(
        &self,
        query: &str,
        documents: Vec<UploadedDocument>,
        api_key: Option<&str>,
    ) -> litlens_core::Result<ChatTurn> {
        let query = query.trim();
        if query.is_empty() {
            return Err(Error::InvalidInput("Please enter a question.".into()));
        }
        let key = ApiKey::parse(api_key)?;

        let context = self.extract(documents).await?;
        info!(
            documents = context.documents_read,
            skipped = context.skipped.len(),
            chars = context.char_len(),
            truncated = context.truncated,
            "PDF context ready"
        );

        let provider = self.factory.build(key.expose());
        let answer_agent = self.agent(
            provider.clone(),
            &self.profiles.answer,
            prompt::answer_instructions(&context.text),
        );
        let citation_agent = self.agent(
            provider,
            &self.profiles.citation,
            prompt::CITATION_INSTRUCTIONS,
        );
        let citation_query = prompt::citation_query(query);

        let (answer, references) =
            tokio::join!(answer_agent.run(query), citation_agent.run(&citation_query));

        Ok(ChatTurn {
            answer: answer?,
            references: references?,
            skipped_documents: context.skipped,
        })
    }

    /// Compare two papers identified by name or arXiv id.
    pub async fn compare(
        &self,
        paper_a: &str,
        paper_b: &str,
        api_key: Option<&str>,
    ) -> litlens_core::Result<ComparisonResult> {
        let key = ApiKey::parse(api_key)?;

        let (paper_a, paper_b) = (paper_a.trim(), paper_b.trim());
        if paper_a.is_empty() || paper_b.is_empty() {
            return Err(Error::InvalidInput(
                "Please enter both papers to compare.".into(),
            ));
        }

        info!(paper_a, paper_b, "Comparing papers");
        let agent = self.agent(
            self.factory.build(key.expose()),
            &self.profiles.comparison,
            prompt::COMPARISON_INSTRUCTIONS,
        );
        let content = agent.run(&prompt::comparison_query(paper_a, paper_b)).await?;

        Ok(ComparisonResult {
            paper_a: paper_a.to_string(),
            paper_b: paper_b.to_string(),
            content,
        })
    }

    /// Build the tagged PDF context off the async runtime.
    pub async fn extract(
        &self,
        documents: Vec<UploadedDocument>,
    ) -> litlens_core::Result<ExtractedContext> {
        if documents.is_empty() {
            return Ok(ExtractedContext::default());
        }

        debug!(count = documents.len(), "Extracting uploaded documents");
        let extractor =
            ContextExtractor::new(self.extractor.clone()).with_max_chars(self.max_chars);

        tokio::task::spawn_blocking(move || extractor.extract(&documents))
            .await
            .map_err(|e| Error::Internal(format!("PDF extraction task failed: {e}")))
    }

    fn agent(
        &self,
        provider: Arc<dyn Provider>,
        profile: &AgentProfile,
        instructions: impl Into<String>,
    ) -> ResearchAgent {
        ResearchAgent::new(provider, self.tools.clone(), profile.clone(), instructions)
            .with_max_tool_rounds(self.max_tool_rounds)
    }
}
