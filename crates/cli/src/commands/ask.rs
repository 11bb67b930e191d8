//! `litlens ask`: one chat turn from the terminal.

use std::path::{Path, PathBuf};

use litlens_agent::ResearchLab;
use litlens_core::error::Error;
use litlens_documents::UploadedDocument;
use tracing::debug;

pub async fn run(query: String, pdfs: Vec<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::load_config()?;
    let documents = read_documents(&pdfs).await?;
    let lab = ResearchLab::from_config(&config);

    let turn = match lab.chat(&query, documents, config.api_key.as_deref()).await {
        Ok(turn) => turn,
        Err(Error::MissingCredential) => return Err(super::missing_key_help()),
        Err(e) => return Err(e.into()),
    };

    for doc in &turn.skipped_documents {
        eprintln!("   ⚠️  Skipped [PDF-{}] {}: {}", doc.position, doc.filename, doc.reason);
    }

    println!("{}", turn.answer);
    println!();
    println!("📑 References");
    println!("{}", turn.references);

    Ok(())
}

/// Read files into uploads, keeping argument order.
pub(crate) async fn read_documents(
    paths: &[PathBuf],
) -> Result<Vec<UploadedDocument>, Box<dyn std::error::Error>> {
    let mut documents = Vec::with_capacity(paths.len());
    for path in paths {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
        debug!(path = %path.display(), bytes = bytes.len(), "Read PDF");
        documents.push(UploadedDocument::new(display_name(path), bytes));
    }
    Ok(documents)
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reads_files_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.pdf");
        let b = dir.path().join("b.pdf");
        std::fs::write(&a, b"%PDF-a").unwrap();
        std::fs::write(&b, b"%PDF-b").unwrap();

        let docs = read_documents(&[b.clone(), a.clone()]).await.unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].filename, "b.pdf");
        assert_eq!(docs[0].bytes, b"%PDF-b");
        assert_eq!(docs[1].filename, "a.pdf");
    }

    #[tokio::test]
    async fn missing_file_names_the_path() {
        let err = read_documents(&[PathBuf::from("/definitely/not/here.pdf")])
            .await
            .unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.pdf"));
    }
}
