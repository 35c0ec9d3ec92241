//! Show or persist the effective configuration.

use clipframe_common::config::{config_file_path, AppConfig};

pub fn run(config: &AppConfig, save: bool) -> anyhow::Result<()> {
    println!("Config file: {}", config_file_path().display());
    println!("{}", serde_json::to_string_pretty(config)?);

    if save {
        let path = config.save()?;
        println!("Saved: {}", path.display());
    }

    Ok(())
}
