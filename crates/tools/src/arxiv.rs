//! arXiv search tool: queries the public arXiv Atom API.
//!
//! The model calls this mid-answer; results are numbered `[arXiv-n]` so the
//! model can cite them inline with the same tags.

use std::time::Duration;

use async_trait::async_trait;
use litlens_core::error::ToolError;
use litlens_core::tool::{Tool, ToolResult};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use serde::Serialize;
use tracing::debug;

const TOOL_NAME: &str = "arxiv_search";

pub struct ArxivSearchTool {
    base_url: String,
    max_results: u32,
    client: reqwest::Client,
}

impl ArxivSearchTool {
    pub fn new(base_url: impl Into<String>, max_results: u32) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_default();
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            max_results: max_results.max(1),
            client,
        }
    }

    fn failed(reason: impl Into<String>) -> ToolError {
        ToolError::ExecutionFailed {
            tool_name: TOOL_NAME.into(),
            reason: reason.into(),
        }
    }
}

impl Default for ArxivSearchTool {
    fn default() -> Self {
        Self::new("https://export.arxiv.org/api", 5)
    }
}

#[async_trait]
impl Tool for ArxivSearchTool {
    fn name(&self) -> &str {
        TOOL_NAME
    }

    fn description(&self) -> &str {
        "Search arXiv for research papers. Returns numbered results ([arXiv-1], [arXiv-2], ...) \
         with title, authors, publication year, abstract, and link."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "Search terms: a paper title, topic, author, or arXiv id"
                },
                "max_results": {
                    "type": "integer",
                    "description": format!("Number of papers to return (default and maximum {})", self.max_results),
                }
            },
            "required": ["query"]
        })
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<ToolResult, ToolError> {
        let query = arguments["query"]
            .as_str()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .ok_or_else(|| ToolError::InvalidArguments("Missing 'query' argument".into()))?;

        let limit = arguments["max_results"]
            .as_u64()
            .map(|n| n.clamp(1, u64::from(self.max_results)) as u32)
            .unwrap_or(self.max_results);

        debug!(query, limit, "Searching arXiv");

        let url = format!("{}/query", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("search_query", format!("all:{query}")),
                ("start", "0".to_string()),
                ("max_results", limit.to_string()),
            ])
            .send()
            .await
            .map_err(|e| Self::failed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::failed(format!(
                "arXiv returned HTTP {}",
                response.status().as_u16()
            )));
        }

        let body = response.text().await.map_err(|e| Self::failed(e.to_string()))?;
        let papers = parse_feed(&body).map_err(Self::failed)?;

        let output = if papers.is_empty() {
            format!("No arXiv papers found for '{query}'.")
        } else {
            format_papers(&papers)
        };

        Ok(ToolResult {
            call_id: String::new(),
            success: true,
            output,
            data: serde_json::to_value(&papers).ok(),
        })
    }
}

/// One search hit.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ArxivPaper {
    pub id: String,
    pub title: String,
    pub summary: String,
    pub authors: Vec<String>,
    pub published: String,
    pub link: String,
    pub pdf_link: Option<String>,
}

impl ArxivPaper {
    /// Four-digit year from the `published` timestamp.
    pub fn year(&self) -> Option<&str> {
        self.published.get(..4)
    }
}

/// Render papers in the `[arXiv-n] Title (Year) – link` shape.
pub fn format_papers(papers: &[ArxivPaper]) -> String {
    let mut out = String::new();
    for (i, paper) in papers.iter().enumerate() {
        out.push_str(&format!(
            "[arXiv-{}] {} ({}) – {}\n",
            i + 1,
            paper.title,
            paper.year().unwrap_or("n.d."),
            paper.link
        ));
        if !paper.authors.is_empty() {
            out.push_str(&format!("Authors: {}\n", paper.authors.join(", ")));
        }
        out.push_str(&format!("Abstract: {}\n\n", paper.summary));
    }
    out.trim_end().to_string()
}

#[derive(Clone, Copy, PartialEq)]
enum Field {
    None,
    Id,
    Title,
    Summary,
    Published,
    AuthorName,
}

/// Parse an arXiv Atom feed into papers, in feed order.
pub fn parse_feed(xml: &str) -> Result<Vec<ArxivPaper>, String> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut papers = Vec::new();
    let mut current: Option<ArxivPaper> = None;
    let mut field = Field::None;
    let mut in_author = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name = e.local_name();
                match name.as_ref() {
                    b"entry" => current = Some(ArxivPaper::default()),
                    b"author" if current.is_some() => in_author = true,
                    b"link" => {
                        if let Some(paper) = current.as_mut() {
                            apply_link(paper, &e);
                        }
                    }
                    tag if current.is_some() => {
                        field = match tag {
                            b"id" => Field::Id,
                            b"title" => Field::Title,
                            b"summary" => Field::Summary,
                            b"published" => Field::Published,
                            b"name" if in_author => Field::AuthorName,
                            _ => Field::None,
                        };
                        if field == Field::AuthorName {
                            if let Some(paper) = current.as_mut() {
                                paper.authors.push(String::new());
                            }
                        }
                    }
                    _ => {}
                }
            }
            Ok(Event::Empty(e)) => {
                if e.local_name().as_ref() == b"link" {
                    if let Some(paper) = current.as_mut() {
                        apply_link(paper, &e);
                    }
                }
            }
            Ok(Event::Text(t)) => {
                if let Some(paper) = current.as_mut() {
                    let text = t.unescape().map_err(|e| e.to_string())?;
                    append_field(paper, field, &text);
                }
            }
            Ok(Event::CData(t)) => {
                if let Some(paper) = current.as_mut() {
                    let text = String::from_utf8_lossy(&t.into_inner()).into_owned();
                    append_field(paper, field, &text);
                }
            }
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"entry" => {
                    if let Some(mut paper) = current.take() {
                        if paper.link.is_empty() {
                            paper.link = paper.id.clone();
                        }
                        papers.push(paper);
                    }
                    field = Field::None;
                    in_author = false;
                }
                b"author" => in_author = false,
                _ => field = Field::None,
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(format!(
                    "malformed arXiv feed at byte {}: {e}",
                    reader.buffer_position()
                ));
            }
            _ => {}
        }
    }

    Ok(papers)
}

fn append_field(paper: &mut ArxivPaper, field: Field, text: &str) {
    let target = match field {
        Field::Id => &mut paper.id,
        Field::Title => &mut paper.title,
        Field::Summary => &mut paper.summary,
        Field::Published => &mut paper.published,
        Field::AuthorName => match paper.authors.last_mut() {
            Some(name) => name,
            None => return,
        },
        Field::None => return,
    };
    // Titles and abstracts are hard-wrapped in the feed.
    let normalized = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if !target.is_empty() && !normalized.is_empty() {
        target.push(' ');
    }
    target.push_str(&normalized);
}

fn apply_link(paper: &mut ArxivPaper, e: &BytesStart<'_>) {
    let mut href = None;
    let mut rel = None;
    let mut title = None;
    for attr in e.attributes().flatten() {
        let value = match attr.unescape_value() {
            Ok(v) => v.into_owned(),
            Err(_) => continue,
        };
        match attr.key.local_name().as_ref() {
            b"href" => href = Some(value),
            b"rel" => rel = Some(value),
            b"title" => title = Some(value),
            _ => {}
        }
    }
    let Some(href) = href else { return };
    if title.as_deref() == Some("pdf") {
        paper.pdf_link = Some(href);
    } else if rel.as_deref().is_none_or(|r| r == "alternate") {
        paper.link = href;
    }
}
