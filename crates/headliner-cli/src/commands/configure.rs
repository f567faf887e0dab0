use anyhow::Result;

use headliner_core::AppConfig;

pub fn run(config: &AppConfig, api_key: Option<String>, country: Option<String>) -> Result<()> {
    if api_key.is_none() && country.is_none() {
        println!("Config file: {}", AppConfig::config_path().display());
        println!("Database:    {}", config.database_path().display());
        println!("Country:     {}", config.news.country);
        println!(
            "API key:     {}",
            if config.news.api_key.is_some() { "set" } else { "not set" }
        );
        return Ok(());
    }

    let mut updated = config.clone();
    if let Some(key) = api_key {
        updated.news.api_key = Some(key);
    }
    if let Some(country) = country {
        updated.news.country = country.to_lowercase();
    }
    updated.save()?;

    println!("Saved configuration to {}", AppConfig::config_path().display());
    Ok(())
}
