use reqwest::Method;
use serde_json::{Value, json};

use super::params;
use crate::http::Transport;
use crate::session::Session;

/// Number of active forging delegates; standby delegates rank after them.
pub const ACTIVE_DELEGATES: u32 = 101;

impl<T: Transport> Session<T> {
    pub async fn list_active_delegates(&self, limit: u32) -> Value {
        self.send_request(Method::GET, "delegates/", params([("limit", json!(limit))]))
            .await
    }

    pub async fn list_standby_delegates(&self, limit: u32) -> Value {
        self.send_request(
            Method::GET,
            "delegates/",
            params([
                ("limit", json!(limit)),
                ("orderBy", json!("rate:asc")),
                ("offset", json!(ACTIVE_DELEGATES)),
            ]),
        )
        .await
    }

    pub async fn search_delegate_by_username(&self, username: &str) -> Value {
        self.send_request(Method::GET, "delegates/search/", params([("q", json!(username))]))
            .await
    }

    pub async fn list_voters(&self, public_key: &str) -> Value {
        self.send_request(Method::GET, "delegates/voters", params([("publicKey", json!(public_key))]))
            .await
    }
}

#[cfg(test)]
mod tests {
    use crate::test_utils::{ScriptedTransport, local_session, ok_body};

    #[tokio::test]
    async fn test_standby_delegates_skip_active_ones() {
        let session = local_session(ScriptedTransport::replying(ok_body()));

        session.list_standby_delegates(20).await;

        assert_eq!(
            session.transport().last_request().url,
            "http://localhost:7000/api/delegates/?limit=20&orderBy=rate:asc&offset=101"
        );
    }

    #[tokio::test]
    async fn test_delegate_lookups() {
        let session = local_session(ScriptedTransport::new(vec![Ok(ok_body()), Ok(ok_body()), Ok(ok_body())]));

        session.list_active_delegates(5).await;
        session.search_delegate_by_username("genesis 1").await;
        session.list_voters("abc").await;

        let urls: Vec<String> = session.transport().requests().into_iter().map(|r| r.url).collect();
        assert_eq!(
            urls,
            vec![
                "http://localhost:7000/api/delegates/?limit=5",
                "http://localhost:7000/api/delegates/search/?q=genesis%201",
                "http://localhost:7000/api/delegates/voters?publicKey=abc",
            ]
        );
    }
}
