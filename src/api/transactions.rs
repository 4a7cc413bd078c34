use log::info;
use reqwest::Method;
use serde_json::{Value, json};

use super::params;
use crate::http::Transport;
use crate::log::mask_string;
use crate::session::Session;

pub const DEFAULT_TRANSACTION_LIMIT: u32 = 20;

impl<T: Transport> Session<T> {
    /// Transactions sent or received by `address`, newest first.
    pub async fn list_transactions(&self, address: &str, limit: Option<u32>, offset: Option<u32>) -> Value {
        self.send_request(
            Method::GET,
            "transactions",
            params([
                ("senderId", json!(address)),
                ("recipientId", json!(address)),
                ("limit", json!(limit.unwrap_or(DEFAULT_TRANSACTION_LIMIT))),
                ("offset", json!(offset.unwrap_or(0))),
                ("orderBy", json!("timestamp:desc")),
            ]),
        )
        .await
    }

    pub async fn get_transaction(&self, id: &str) -> Value {
        self.send_request(Method::GET, "transactions/get", params([("id", json!(id))]))
            .await
    }

    /// Asks the node to sign and relay a transfer of `amount` beddows.
    ///
    /// The passphrases travel in the request body; they are never logged.
    pub async fn send_lsk(&self, recipient: &str, amount: u64, secret: &str, second_secret: Option<&str>) -> Value {
        info!(
            recipient = &*mask_string(recipient),
            amount = amount,
            second_signature = second_secret.is_some();
            "Submitting transfer"
        );

        let mut body = params([
            ("recipientId", json!(recipient)),
            ("amount", json!(amount)),
            ("secret", json!(secret)),
        ])
        .unwrap_or_default();
        if let Some(second_secret) = second_secret {
            body.insert("secondSecret".to_string(), json!(second_secret));
        }

        self.send_request(Method::POST, "transactions", Some(body)).await
    }

    pub async fn list_multisignature_transactions(&self) -> Value {
        self.send_request(Method::GET, "transactions/multisignatures", None)
            .await
    }

    pub async fn get_multisignature_transaction(&self, id: &str) -> Value {
        self.send_request(Method::GET, "transactions/multisignatures/get", params([("id", json!(id))]))
            .await
    }

    /// Relays a transaction signed elsewhere through the peer route.
    pub async fn broadcast_signed_transaction(&self, transaction: Value) -> Value {
        info!(
            id = transaction.get("id").and_then(Value::as_str).unwrap_or("-");
            "Broadcasting signed transaction"
        );
        self.send_peer_request(Method::POST, "transactions", json!({ "transaction": transaction }))
            .await
    }
}
