pub mod ask;
pub mod compare;
pub mod config_cmd;
pub mod extract;
pub mod serve;

use litlens_config::AppConfig;

pub(crate) fn load_config() -> Result<AppConfig, Box<dyn std::error::Error>> {
    Ok(AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?)
}

/// Print setup help when no key is available. Returns the error to bubble up.
pub(crate) fn missing_key_help() -> Box<dyn std::error::Error> {
    eprintln!();
    eprintln!("  ERROR: No API key configured!");
    eprintln!();
    eprintln!("  Set one of these environment variables:");
    eprintln!("    LITLENS_API_KEY = 'sk-...'");
    eprintln!("    OPENAI_API_KEY  = 'sk-...'");
    eprintln!();
    eprintln!("  Or add it to your config file:");
    eprintln!("    {}", AppConfig::config_dir().join("config.toml").display());
    eprintln!();
    "No API key found. See above for setup instructions.".into()
}
