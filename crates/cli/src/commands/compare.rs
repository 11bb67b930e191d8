//! `litlens compare`: compare two papers.

use litlens_agent::ResearchLab;
use litlens_core::error::Error;

pub async fn run(paper_a: String, paper_b: String) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::load_config()?;
    let lab = ResearchLab::from_config(&config);

    match lab.compare(&paper_a, &paper_b, config.api_key.as_deref()).await {
        Ok(result) => {
            println!("⚖️  {} vs {}", result.paper_a, result.paper_b);
            println!();
            println!("{}", result.content);
            Ok(())
        }
        Err(Error::MissingCredential) => Err(super::missing_key_help()),
        Err(e) => Err(e.into()),
    }
}
