//! `litlens config`: show the effective configuration.

use litlens_config::AppConfig;

pub fn run(path_only: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config_path = AppConfig::config_dir().join("config.toml");
    if path_only {
        println!("{}", config_path.display());
        return Ok(());
    }

    let config = super::load_config()?;
    println!("# {}", config_path.display());
    println!("{}", toml::to_string_pretty(&redacted(config))?);
    Ok(())
}

fn redacted(mut config: AppConfig) -> AppConfig {
    if config.api_key.is_some() {
        config.api_key = Some("[REDACTED]".into());
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_path_is_valid() {
        let path = AppConfig::config_dir().join("config.toml");
        assert!(path.to_str().unwrap().contains("config.toml"));
    }

    #[test]
    fn key_never_printed() {
        let config = AppConfig {
            api_key: Some("sk-live-secret".into()),
            ..AppConfig::default()
        };
        let printed = toml::to_string_pretty(&redacted(config)).unwrap();
        assert!(!printed.contains("sk-live-secret"));
        assert!(printed.contains("[REDACTED]"));
        assert!(printed.contains("[agents.answer]"));
    }
}
