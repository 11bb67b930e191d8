//! `litlens serve`: start the web UI.

pub async fn run(port_override: Option<u16>) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = super::load_config()?;

    if let Some(port) = port_override {
        config.gateway.port = port;
    }

    println!("🔍 LitLens · AI Research Paper Labs");
    println!("   Open:      http://{}:{}", config.gateway.host, config.gateway.port);
    println!(
        "   Model:     {} (answer) / {} (citation) / {} (comparison)",
        config.agents.answer.model, config.agents.citation.model, config.agents.comparison.model
    );
    println!(
        "   Server key: {}",
        if config.has_api_key() { "configured" } else { "none, users enter their own" }
    );

    litlens_gateway::start(config).await?;

    Ok(())
}
