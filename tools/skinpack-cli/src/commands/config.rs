//! Show or initialize the configuration file.

use skinpack_common::config::AppConfig;

pub fn run(config: &AppConfig, init: bool) -> anyhow::Result<()> {
    let path = AppConfig::path();

    if init {
        let written = config.save()?;
        println!("Config written: {}", written.display());
        return Ok(());
    }

    println!("Config file: {}", path.display());
    if !path.exists() {
        println!("  (not present, using defaults; run `skinpack config --init` to create it)");
    }
    println!();
    println!("{}", serde_json::to_string_pretty(config)?);

    Ok(())
}
