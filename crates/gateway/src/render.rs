//! Server-side HTML for the LitLens page.
//!
//! Model output is Markdown and goes through [`markdown`], which escapes any
//! raw HTML the model emits. Everything typed by the user goes through
//! `html_escape` before it is written into the page.

use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};
use litlens_agent::ComparisonResult;
use litlens_core::error::Error;
use litlens_documents::SkippedDocument;
use pulldown_cmark::{CowStr, Event, Options, Parser, Tag, html};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Chat,
    Compare,
}

impl Tab {
    pub fn from_query(value: Option<&str>) -> Self {
        match value {
            Some("compare") => Tab::Compare,
            _ => Tab::Chat,
        }
    }

    fn form_id(self) -> &'static str {
        match self {
            Tab::Chat => "chat-form",
            Tab::Compare => "compare-form",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Alert {
    /// The user has to fix something; nothing was sent.
    Warning(String),
    /// The action failed upstream.
    Error(String),
}

impl From<&Error> for Alert {
    fn from(err: &Error) -> Self {
        if err.is_user_warning() {
            Alert::Warning(err.to_string())
        } else {
            Alert::Error(err.to_string())
        }
    }
}

/// Everything one page render needs.
#[derive(Debug, Default)]
pub struct PageView {
    pub tab: Tab,
    /// Session history, oldest first
    pub history: Vec<String>,
    pub key_remembered: bool,
    /// Reference list from the latest chat turn
    pub references: Option<String>,
    pub skipped: Vec<SkippedDocument>,
    pub comparison: Option<ComparisonResult>,
    pub paper_a: String,
    pub paper_b: String,
    pub alert: Option<Alert>,
}

/// Render Markdown to HTML with raw HTML escaped and unsafe links neutralised.
pub fn markdown(source: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let events = Parser::new_ext(source, options).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        Event::Start(Tag::Link {
            link_type,
            dest_url,
            title,
            id,
        }) if !is_safe_url(&dest_url) => Event::Start(Tag::Link {
            link_type,
            dest_url: CowStr::Borrowed("#"),
            title,
            id,
        }),
        other => other,
    });

    let mut out = String::with_capacity(source.len() * 3 / 2);
    html::push_html(&mut out, events);
    out
}

fn is_safe_url(url: &str) -> bool {
    let url = url.trim().to_ascii_lowercase();
    match url.split_once(':') {
        Some((scheme, _)) if !scheme.contains('/') => {
            matches!(scheme, "http" | "https" | "mailto")
        }
        _ => true,
    }
}

pub fn render_page(view: &PageView) -> String {
    let mut page = String::with_capacity(8 * 1024);
    page.push_str(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n\
         <meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>LitLens · AI Research Paper Labs</title>\n\
         <link rel=\"stylesheet\" href=\"/static/style.css\">\n\
         </head>\n<body>\n",
    );

    render_sidebar(&mut page, view);

    page.push_str("<main>\n<h1>🔍 LitLens</h1>\n");
    page.push_str(
        "<p class=\"caption\">AI Research Paper Labs · search, upload, compare, \
         and review academic literature with AI</p>\n",
    );
    render_tabs(&mut page, view.tab);

    if let Some(alert) = &view.alert {
        render_alert(&mut page, alert);
    }

    match view.tab {
        Tab::Chat => render_chat(&mut page, view),
        Tab::Compare => render_compare(&mut page, view),
    }

    page.push_str("</main>\n</body>\n</html>\n");
    page
}

fn render_sidebar(page: &mut String, view: &PageView) {
    let form = view.tab.form_id();
    let key_placeholder = if view.key_remembered {
        "Key saved for this session"
    } else {
        "sk-..."
    };

    page.push_str("<aside class=\"sidebar\">\n");
    page.push_str("<h2>🔍 LitLens</h2>\n<h3>AI Research Paper Labs</h3>\n");
    page.push_str("<p><em>Focus your research. Cite with clarity.</em></p>\n<hr>\n");
    page.push_str(&format!(
        "<label for=\"api_key\">🔐 OpenAI API Key</label>\n\
         <input type=\"password\" id=\"api_key\" name=\"api_key\" form=\"{form}\" \
         autocomplete=\"off\" placeholder=\"{key_placeholder}\">\n<hr>\n"
    ));

    if view.tab == Tab::Chat {
        page.push_str(
            "<h4>📄 Upload PDFs</h4>\n\
             <label for=\"pdfs\">Upload research papers</label>\n\
             <input type=\"file\" id=\"pdfs\" name=\"pdfs\" form=\"chat-form\" \
             accept=\"application/pdf,.pdf\" multiple>\n<hr>\n",
        );
    }

    page.push_str(
        "<p><strong>LitLens Labs Features</strong></p>\n<ul>\n\
         <li>Chat with arXiv papers</li>\n\
         <li>Upload and analyze PDFs</li>\n\
         <li>Inline citations</li>\n\
         <li>Side-by-side paper comparison</li>\n\
         </ul>\n</aside>\n",
    );
}

fn render_tabs(page: &mut String, active: Tab) {
    let class = |tab: Tab| if tab == active { "tab active" } else { "tab" };
    page.push_str(&format!(
        "<nav class=\"tabs\">\n\
         <a class=\"{}\" href=\"/?tab=chat\">💬 Chat &amp; Review</a>\n\
         <a class=\"{}\" href=\"/?tab=compare\">⚖️ Paper Comparison</a>\n\
         </nav>\n",
        class(Tab::Chat),
        class(Tab::Compare),
    ));
}

fn render_alert(page: &mut String, alert: &Alert) {
    let (class, message) = match alert {
        Alert::Warning(m) => ("alert warning", m),
        Alert::Error(m) => ("alert error", m),
    };
    page.push_str(&format!(
        "<div class=\"{class}\" role=\"alert\">{}</div>\n",
        text(message)
    ));
}

fn render_chat(page: &mut String, view: &PageView) {
    page.push_str("<section class=\"panel\" id=\"chat\">\n");

    for answer in &view.history {
        page.push_str(&format!(
            "<div class='chat agent'>{}</div>\n",
            markdown(answer)
        ));
    }

    if !view.skipped.is_empty() {
        page.push_str("<div class=\"alert notice\">Some PDFs could not be read and were skipped:<ul>\n");
        for doc in &view.skipped {
            page.push_str(&format!(
                "<li>[PDF-{}] {}: {}</li>\n",
                doc.position,
                text(&doc.filename),
                text(&doc.reason)
            ));
        }
        page.push_str("</ul></div>\n");
    }

    if let Some(references) = &view.references {
        page.push_str("<h3>📑 References</h3>\n");
        page.push_str(&format!(
            "<div class='citation'>{}</div>\n",
            markdown(references)
        ));
    }

    page.push_str(
        "<form id=\"chat-form\" class=\"ask\" method=\"post\" action=\"/chat\" \
         enctype=\"multipart/form-data\">\n\
         <input type=\"text\" name=\"query\" required \
         placeholder=\"Ask LitLens about a research topic or uploaded PDFs...\">\n\
         <button type=\"submit\">Ask</button>\n\
         </form>\n</section>\n",
    );
}

fn render_compare(page: &mut String, view: &PageView) {
    page.push_str("<section class=\"panel\" id=\"compare\">\n");
    page.push_str("<h3>⚖️ Compare Two Papers with LitLens Labs</h3>\n");
    page.push_str(&format!(
        "<form id=\"compare-form\" method=\"post\" action=\"/compare\">\n\
         <div class=\"columns\">\n\
         <label>Paper A (title / arXiv link / topic)\
         <input type=\"text\" name=\"paper_a\" value=\"{}\"></label>\n\
         <label>Paper B (title / arXiv link / topic)\
         <input type=\"text\" name=\"paper_b\" value=\"{}\"></label>\n\
         </div>\n\
         <button type=\"submit\">Compare Papers</button>\n\
         </form>\n",
        attr(&view.paper_a),
        attr(&view.paper_b),
    ));

    if let Some(result) = &view.comparison {
        page.push_str(&format!(
            "<div class='compare-box'>{}</div>\n",
            markdown(&result.content)
        ));
    }

    page.push_str("</section>\n");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markdown_renders_structure() {
        let html = markdown("## Methodology\n\n- point [PDF-1]\n\n**bold**");
        assert!(html.contains("<h2>Methodology</h2>"));
        assert!(html.contains("<li>point [PDF-1]</li>"));
        assert!(html.contains("<strong>bold</strong>"));
    }

    #[test]
    fn markdown_escapes_raw_html() {
        let html = markdown("before <script>alert(1)</script> after\n\n<div onclick=x>block</div>");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<div onclick"));
    }

    #[test]
    fn markdown_neutralises_script_links() {
        let html = markdown("[click](javascript:alert(1)) and [paper](https://arxiv.org/abs/1706.03762)");
        assert!(!html.contains("javascript:"));
        assert!(html.contains("href=\"#\""));
        assert!(html.contains("href=\"https://arxiv.org/abs/1706.03762\""));
    }

    #[test]
    fn page_has_branding_and_tabs() {
        let html = render_page(&PageView::default());
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("LitLens"));
        assert!(html.contains("AI Research Paper Labs"));
        assert!(html.contains("Focus your research. Cite with clarity."));
        assert!(html.contains("type=\"password\""));
        assert!(html.contains("Chat &amp; Review"));
        assert!(html.contains("Paper Comparison"));
        assert!(html.contains("class=\"tab active\" href=\"/?tab=chat\""));
        assert!(html.contains("action=\"/chat\""));
    }

    #[test]
    fn history_renders_in_order_as_agent_blocks() {
        let view = PageView {
            history: vec!["first answer".into(), "second answer".into()],
            references: Some("[arXiv-1] Attention (2017)".into()),
            ..Default::default()
        };
        let html = render_page(&view);
        let first = html.find("first answer").unwrap();
        let second = html.find("second answer").unwrap();
        assert!(first < second);
        assert_eq!(html.matches("<div class='chat agent'>").count(), 2);
        assert!(html.contains("References"));
        assert!(html.contains("<div class='citation'>"));
    }

    #[test]
    fn user_text_is_escaped() {
        let view = PageView {
            tab: Tab::Compare,
            paper_a: "\"><script>".into(),
            skipped: vec![SkippedDocument {
                position: 1,
                filename: "<b>.pdf".into(),
                reason: "bad".into(),
            }],
            ..Default::default()
        };
        let html = render_page(&view);
        assert!(!html.contains("\"><script>"));
        assert!(html.contains("&quot;&gt;&lt;script&gt;") || html.contains("&quot;>&lt;script>"));
    }

    #[test]
    fn skipped_documents_are_listed() {
        let view = PageView {
            skipped: vec![SkippedDocument {
                position: 2,
                filename: "<b>scan.pdf".into(),
                reason: "not a PDF".into(),
            }],
            ..Default::default()
        };
        let html = render_page(&view);
        assert!(html.contains("could not be read"));
        assert!(html.contains("[PDF-2] &lt;b&gt;scan.pdf: not a PDF"));
    }

    #[test]
    fn compare_tab_shows_result_box() {
        let view = PageView {
            tab: Tab::Compare,
            comparison: Some(ComparisonResult {
                paper_a: "BERT".into(),
                paper_b: "GPT-3".into(),
                content: "## Results".into(),
            }),
            paper_a: "BERT".into(),
            paper_b: "GPT-3".into(),
            ..Default::default()
        };
        let html = render_page(&view);
        assert!(html.contains("<div class='compare-box'><h2>Results</h2>"));
        assert!(html.contains("value=\"BERT\""));
        assert!(html.contains("form=\"compare-form\""));
        assert!(!html.contains("action=\"/chat\""));
    }

    #[test]
    fn alerts_by_kind() {
        let warning = Alert::from(&Error::MissingCredential);
        assert_eq!(
            warning,
            Alert::Warning("Please enter your OpenAI API key.".into())
        );

        let view = PageView {
            alert: Some(warning),
            ..Default::default()
        };
        assert!(render_page(&view).contains("<div class=\"alert warning\" role=\"alert\">Please enter your OpenAI API key.</div>"));

        let err = Error::Internal("boom".into());
        assert!(matches!(Alert::from(&err), Alert::Error(_)));
    }

    #[test]
    fn tab_from_query() {
        assert_eq!(Tab::from_query(Some("compare")), Tab::Compare);
        assert_eq!(Tab::from_query(Some("chat")), Tab::Chat);
        assert_eq!(Tab::from_query(None), Tab::Chat);
    }
}
