pub mod structured_console_encoder;

use std::path::Path;
use std::sync::OnceLock;

use log::{debug, info};
use log4rs::{
    Config,
    config::{Deserializers, RawConfig},
};

use crate::log::structured_console_encoder::StructuredConsoleEncoderDeserializer;

/// Key-value keys whose values never reach the log unmasked.
pub const SECRET_KEYS: &[&str] = &["secret", "second_secret", "passphrase", "private_key"];

/// Initializes logging
pub fn init_logging() {
    let mut deserializers = Deserializers::default();
    deserializers.insert("structured_console", StructuredConsoleEncoderDeserializer);

    let config_path = "log4rs.yml";
    let path = Path::new(config_path);

    if path.exists() {
        match log4rs::init_file(path, deserializers) {
            Ok(_) => {
                info!(
                    path = config_path;
                    "Logging initialized from external configuration"
                );
                return;
            },
            Err(e) => {
                panic!("Failed to load external log4rs.yml: {}", e);
            },
        }
    }

    let yaml_content = include_str!("../../resources/default_log4rs.yml");
    let raw_config: RawConfig =
        serde_yaml::from_str(yaml_content).expect("Embedded logging configuration is invalid YAML");

    let (appenders, errors) = raw_config.appenders_lossy(&deserializers);
    if !errors.is_empty() {
        panic!("Errors parsing embedded appenders: {:?}", errors);
    }

    let config = Config::builder()
        .appenders(appenders)
        .loggers(raw_config.loggers())
        .build(raw_config.root())
        .expect("Failed to build logging config");

    log4rs::init_config(config).expect("Failed to initialize logging from embedded config");

    debug!("Logging initialized from embedded defaults (no external log4rs.yml found)");
}

fn reveal_secrets() -> bool {
    static REVEAL_SECRETS_CACHE: OnceLock<bool> = OnceLock::new();

    *REVEAL_SECRETS_CACHE.get_or_init(|| {
        std::env::var("REVEAL_SECRETS")
            .map(|v| {
                let val = v.to_lowercase();
                val == "true" || val == "1"
            })
            .unwrap_or(false)
    })
}

pub fn is_secret_key(key: &str) -> bool {
    SECRET_KEYS.iter().any(|k| k.eq_ignore_ascii_case(key))
}

/// Fully redacts a passphrase or private key.
/// If REVEAL_SECRETS is true, returns the original string.
pub fn redact_secret(s: &str) -> String {
    if reveal_secrets() {
        return s.to_string();
    }

    "<REDACTED>".to_string()
}

/// Masks an identifier down to its ends. Not for secrets, see [`redact_secret`].
/// If REVEAL_SECRETS is true, returns the original string.
pub fn mask_string(s: &str) -> String {
    if reveal_secrets() {
        return s.to_string();
    }

    if s.len() <= 12 || !s.is_ascii() {
        return "***".to_string();
    }

    format!("{}...{}", &s[0..6], &s[s.len() - 6..])
}
