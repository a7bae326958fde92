use anyhow::Result;

use coverdeck_core::AppConfig;

/// Show the effective configuration, optionally writing the default file
pub fn run(config: &AppConfig, init: bool) -> Result<()> {
    if init {
        let path = AppConfig::config_path();
        if path.exists() {
            println!("Config already exists at {}", path.display());
        } else {
            config.save()?;
            println!("Wrote default config to {}", path.display());
        }
        return Ok(());
    }

    println!("{}", toml::to_string_pretty(config)?);
    Ok(())
}
