//! Instruction and query templates.
//!
//! Every string handed to the model is built here. The citation query is
//! derived from the user's raw question, never from the answer, so the two
//! calls have no data dependency.

/// Rules block appended to the answer instructions.
const ANSWER_RULES: &str = "\
When answering:
- Use inline citations like [PDF-1], [arXiv-1]
- Prefer PDFs over arXiv if both are relevant
- Use the arxiv_search tool to find papers the uploaded PDFs do not cover
- Be concise, technical, and structured";

/// Instructions for the reference-list call.
pub const CITATION_INSTRUCTIONS: &str = "\
List all referenced papers clearly.

Format:
[PDF-1] Uploaded paper
[arXiv-1] Title (Year) – link";

/// Instructions for the comparison call.
pub const COMPARISON_INSTRUCTIONS: &str = "\
Compare two research papers.

Structure:
- Problem Statement
- Methodology
- Results
- Strengths
- Weaknesses
- When to use which";

/// Build the answer instructions around the extracted PDF context.
pub fn answer_instructions(pdf_context: &str) -> String {
    format!(
        "You are LitLens, an AI research assistant.\n\n\
         Use the following uploaded PDF content when relevant:\n\
         {pdf_context}\n\n\
         {ANSWER_RULES}"
    )
}

pub fn citation_query(query: &str) -> String {
    format!("Provide references for: {query}")
}

pub fn comparison_query(paper_a: &str, paper_b: &str) -> String {
    format!("Compare {paper_a} vs {paper_b}")
}
