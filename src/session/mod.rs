//! Peer selection, failover and request dispatch against a node's HTTP API.
//!
//! A [`Session`] is the long-lived client handle. It owns the transport, the three peer
//! pools and the mutable selection state, and exposes the dispatcher through
//! [`Session::send_request`].
//!
//! # Architecture
//!
//! - [`query`] - parameter trimming and query-string encoding
//! - [`network`] - mainnet / testnet / custom network identity
//! - [`peers`] - peer pools and the banned set
//! - [`state`] - node selection and the flag switches, applied atomically
//! - [`request`] - request descriptors for the current peer
//! - [`dispatcher`] - clock-skew retry and peer failover
//!
//! # Concurrency
//!
//! Concurrent requests share one [`SessionState`] behind a [`RwLock`]. Each selection or
//! ban runs under the write lock; the lock is never held while a request is in flight
//! or while waiting out the failover delay.
//!
//! # Example
//!
//! ```rust,no_run
//! use lisk_client::config::LiskConfig;
//! use lisk_client::session::Session;
//! use reqwest::Method;
//!
//! # async fn example() -> Result<(), anyhow::Error> {
//! let session = Session::from_config(&LiskConfig::default())?;
//! let height = session.send_request(Method::GET, "blocks/getHeight", None).await;
//! println!("{height}");
//! # Ok(())
//! # }
//! ```

pub mod dispatcher;
mod error;
pub mod network;
pub mod peers;
pub mod query;
pub mod request;
pub mod state;

use std::time::Duration;

use log::info;
use tokio::sync::RwLock;

pub use dispatcher::{DEFAULT_FAILOVER_DELAY, EXHAUSTED_MESSAGE};
pub use error::SessionError;
pub use network::{Network, NetworkIdentity};
pub use peers::{PeerDirectory, PeerPool};
pub use query::Params;
pub use state::{SessionOptions, SessionState};

use crate::config::LiskConfig;
use crate::http::{HttpTransport, PeerListing, Transport};

pub struct Session<T = HttpTransport> {
    transport: T,
    state: RwLock<SessionState>,
    failover_delay: Duration,
}

impl Session<HttpTransport> {
    /// Builds a session with the `reqwest` transport from loaded configuration.
    pub fn from_config(config: &LiskConfig) -> Result<Self, SessionError> {
        let transport = HttpTransport::with_config(
            config.client.transport_retries,
            Duration::from_secs(config.client.request_timeout_secs),
        )?;
        let session = Self::new(transport, config.session_options())?
            .with_failover_delay(Duration::from_millis(config.client.failover_delay_ms));
        Ok(session)
    }

    pub async fn last_request_latency(&self) -> Option<Duration> {
        self.transport.get_latency().await
    }
}

impl<T: Transport> Session<T> {
    pub fn new(transport: T, options: SessionOptions) -> Result<Self, SessionError> {
        let state = SessionState::new(options)?;
        info!(
            peer = state.current_peer(),
            network:% = state.identity().network(),
            ssl = state.ssl(),
            random_peer = state.random_peer();
            "Session created"
        );
        Ok(Self {
            transport,
            state: RwLock::new(state),
            failover_delay: DEFAULT_FAILOVER_DELAY,
        })
    }

    pub fn with_failover_delay(mut self, delay: Duration) -> Self {
        self.failover_delay = delay;
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Picks a peer without making it the active one.
    pub async fn select_node(&self) -> String {
        self.state.read().await.select_node()
    }

    /// Pins `node`, or re-selects from the active pool when `None`. Returns the active peer.
    pub async fn set_node(&self, node: Option<String>) -> String {
        self.state.write().await.set_node(node)
    }

    pub async fn set_testnet(&self, testnet: bool) {
        self.state.write().await.set_testnet(testnet);
    }

    pub async fn set_ssl(&self, ssl: bool) {
        self.state.write().await.set_ssl(ssl);
    }

    pub async fn current_peer(&self) -> String {
        self.state.read().await.current_peer().to_string()
    }

    pub async fn network_identity(&self) -> NetworkIdentity {
        self.state.read().await.identity().clone()
    }

    pub async fn banned_peers(&self) -> Vec<String> {
        self.state.read().await.directory().banned().map(str::to_string).collect()
    }

    pub async fn list_peers(&self) -> PeerListing {
        self.state.read().await.directory().listing()
    }
}
