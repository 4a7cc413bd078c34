use std::collections::VecDeque;
use std::sync::Mutex;

use reqwest::StatusCode;
use serde_json::{Value, json};

use crate::http::{HttpError, RequestDescriptor, Transport};
use crate::session::{PeerDirectory, Session, SessionOptions};

/// Transport answering from a fixed script and recording every request it sees.
///
/// Once the script runs dry every further request fails like an unreachable peer.
#[derive(Default)]
pub struct ScriptedTransport {
    responses: Mutex<VecDeque<Result<Value, HttpError>>>,
    requests: Mutex<Vec<RequestDescriptor>>,
}

impl ScriptedTransport {
    pub fn new(responses: Vec<Result<Value, HttpError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(vec![]),
        }
    }

    pub fn replying(body: Value) -> Self {
        Self::new(vec![Ok(body)])
    }

    pub fn requests(&self) -> Vec<RequestDescriptor> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> RequestDescriptor {
        self.requests().pop().expect("no request was sent")
    }
}

impl Transport for ScriptedTransport {
    async fn send(&self, request: &RequestDescriptor) -> Result<Value, HttpError> {
        self.requests.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(unreachable_peer()))
    }
}

pub fn unreachable_peer() -> HttpError {
    HttpError::ServerError {
        status: StatusCode::SERVICE_UNAVAILABLE,
        body: "unavailable".to_string(),
    }
}

pub fn ok_body() -> Value {
    json!({ "success": true })
}

/// A session pinned to `localhost:7000` on mainnet.
pub fn local_session(transport: ScriptedTransport) -> Session<ScriptedTransport> {
    let options = SessionOptions {
        node: Some("localhost".to_string()),
        ssl: false,
        testnet: false,
        random_peer: None,
        port: Some("7000".to_string()),
        nethash: None,
        banned_peers: vec![],
        directory: PeerDirectory::uniform(vec!["localhost".to_string()]),
    };
    Session::new(transport, options).unwrap()
}
