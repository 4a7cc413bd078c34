use std::{fs, fs::File, io::Write, path::Path};

use anyhow::{Context, Result};
use config::{Config, Environment};
use log::{info, trace};

use super::defaults::LiskConfig;

pub fn get_default_config() -> &'static str {
    include_str!("../../config/config.toml")
}

/// Loads the configuration file, creating it from the embedded default when missing.
///
/// Sources, later ones winning: the file, `LISK_`-prefixed environment variables
/// (`LISK_CLIENT__TESTNET=true`), and `cli_testnet` when given.
pub fn load_configuration(path: &Path, cli_testnet: Option<bool>) -> Result<Config> {
    if !path.exists() {
        let sources = get_default_config();
        write_config_to(path, sources).context("Could not create default config")?;
        info!(path:% = path.display(); "Created new configuration file");
    }

    let filename = path.to_str().context("Invalid config file path")?;

    let cfg = Config::builder()
        .add_source(config::File::with_name(filename))
        .add_source(Environment::with_prefix("LISK").prefix_separator("_").separator("__"))
        .build()
        .context("Could not build initial config")?;

    let Some(testnet) = cli_testnet else {
        return Ok(cfg);
    };

    let value = testnet.to_string();
    trace!("Set override: (client.testnet, {value})");
    Config::builder()
        .add_source(cfg)
        .set_override("client.testnet", value)
        .context("Could not override config property")?
        .build()
        .context("Could not build final config")
}

pub fn load_lisk_config(path: &Path, cli_testnet: Option<bool>) -> Result<LiskConfig> {
    let cfg = load_configuration(path, cli_testnet)?;
    cfg.try_deserialize::<LiskConfig>()
        .context("Invalid client configuration")
}

pub fn write_config_to(path: &Path, source: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("Failed to create parent directories")?;
    };

    let mut file = File::create(path).context("Failed to create config file")?;
    file.write_all(source.as_bytes())
        .context("Failed to write config content")?;
    file.write_all(b"\n").context("Failed to write newline")?;
    Ok(())
}
