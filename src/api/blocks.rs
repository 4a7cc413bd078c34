use reqwest::Method;
use serde_json::{Value, json};

use super::params;
use crate::http::Transport;
use crate::session::Session;

impl<T: Transport> Session<T> {
    pub async fn list_blocks(&self, amount: u32) -> Value {
        self.send_request(Method::GET, "blocks", params([("limit", json!(amount))]))
            .await
    }

    /// Blocks forged by the delegate owning `public_key`.
    pub async fn list_forged_blocks(&self, public_key: &str) -> Value {
        self.send_request(Method::GET, "blocks", params([("generatorPublicKey", json!(public_key))]))
            .await
    }

    pub async fn get_block(&self, height: u64) -> Value {
        self.send_request(Method::GET, "blocks", params([("height", json!(height))]))
            .await
    }
}
