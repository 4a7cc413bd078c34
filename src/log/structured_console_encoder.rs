use log::Record;
use log::kv::{self, Key, VisitSource};
use log4rs::encode::pattern::PatternEncoder;
use log4rs::encode::{Color, Encode, Style, Write};
use serde::Deserialize;

use super::{is_secret_key, redact_secret};

const DEFAULT_PATTERN: &str = "{d} {l} {t} {m}";

#[derive(Debug, Deserialize)]
pub struct StructuredConsoleEncoderConfig {
    pub pattern: Option<String>,
}

/// Pattern encoder followed by the record's `key=value` pairs.
///
/// Values under a secret key are redacted before they reach the writer.
#[derive(Debug)]
pub struct StructuredConsoleEncoder {
    message: PatternEncoder,
}

impl StructuredConsoleEncoder {
    pub fn new(pattern: &str) -> Self {
        Self {
            message: PatternEncoder::new(pattern),
        }
    }
}

impl Encode for StructuredConsoleEncoder {
    fn encode(&self, w: &mut dyn Write, record: &Record) -> anyhow::Result<()> {
        self.message.encode(w, record)?;

        let mut fields = FieldCollector::default();
        if let Err(e) = record.key_values().visit(&mut fields) {
            fields.pairs.push(("kv_error".to_string(), e.to_string()));
        }

        for (key, value) in &fields.pairs {
            w.set_style(Style::new().text(Color::Cyan))?;
            write!(w, " {key}=")?;
            w.set_style(&Style::default())?;
            write!(w, "{value}")?;
        }

        w.write_all(b"\n")?;
        Ok(())
    }
}

fn render_value(key: &str, value: &kv::Value<'_>) -> String {
    let rendered = value.to_string();
    if is_secret_key(key) { redact_secret(&rendered) } else { rendered }
}

/// Rendered `key=value` pairs of one record.
#[derive(Default)]
struct FieldCollector {
    pairs: Vec<(String, String)>,
}

impl<'kvs> VisitSource<'kvs> for FieldCollector {
    fn visit_pair(&mut self, key: Key<'kvs>, value: kv::Value<'kvs>) -> Result<(), kv::Error> {
        self.pairs
            .push((key.as_str().to_string(), render_value(key.as_str(), &value)));
        Ok(())
    }
}

pub struct StructuredConsoleEncoderDeserializer;

impl log4rs::config::Deserialize for StructuredConsoleEncoderDeserializer {
    type Trait = dyn Encode;
    type Config = StructuredConsoleEncoderConfig;

    fn deserialize(
        &self,
        config: StructuredConsoleEncoderConfig,
        _: &log4rs::config::Deserializers,
    ) -> anyhow::Result<Box<dyn Encode>> {
        let pattern = config.pattern.as_deref().unwrap_or(DEFAULT_PATTERN);
        Ok(Box::new(StructuredConsoleEncoder::new(pattern)))
    }
}
