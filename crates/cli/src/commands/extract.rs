//! `litlens extract`: print the tagged PDF context without calling a model.

use std::path::PathBuf;

use litlens_documents::{ContextExtractor, PdfPageExtractor};

pub async fn run(
    files: Vec<PathBuf>,
    max_chars: Option<usize>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::load_config()?;
    let max_chars = max_chars.unwrap_or(config.extraction.max_chars);
    if max_chars == 0 {
        return Err("--max-chars must be greater than 0".into());
    }

    let documents = super::ask::read_documents(&files).await?;
    let extractor = ContextExtractor::new(PdfPageExtractor).with_max_chars(max_chars);
    let context = tokio::task::spawn_blocking(move || extractor.extract(&documents)).await?;

    println!("{}", context.text);

    eprintln!();
    eprintln!(
        "   {} of {} document(s) read, {} characters{}",
        context.documents_read,
        files.len(),
        context.char_len(),
        if context.truncated { " (truncated)" } else { "" }
    );
    for doc in &context.skipped {
        eprintln!("   ⚠️  Skipped [PDF-{}] {}: {}", doc.position, doc.filename, doc.reason);
    }

    Ok(())
}
