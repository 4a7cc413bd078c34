//! Mutable per-session state: flags, current peer, bans and network identity.
//!
//! All selection and ban operations live here so that the [`Session`](super::Session)
//! can apply each of them atomically under a single lock.

use log::{debug, info};
use rand::seq::SliceRandom;

use super::error::SessionError;
use super::network::{Network, NetworkIdentity, resolve};
use super::peers::{PeerDirectory, PeerPool};
use super::request::RequestTarget;

pub const MAINNET_PORT: u16 = 8000;
pub const TESTNET_PORT: u16 = 7000;
pub const SSL_PORT: u16 = 443;

pub fn default_port(testnet: bool, ssl: bool) -> u16 {
    if testnet {
        TESTNET_PORT
    } else if ssl {
        SSL_PORT
    } else {
        MAINNET_PORT
    }
}

/// Everything a session is created from, already merged from configuration and overrides.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub node: Option<String>,
    pub ssl: bool,
    pub testnet: bool,
    /// Defaults to `true` exactly when no explicit node is given.
    pub random_peer: Option<bool>,
    /// `None` picks the network default, `Some("")` dials the scheme default.
    pub port: Option<String>,
    pub nethash: Option<String>,
    pub banned_peers: Vec<String>,
    pub directory: PeerDirectory,
}

#[derive(Debug, Clone)]
pub struct SessionState {
    current_peer: String,
    port: Option<u16>,
    ssl: bool,
    testnet: bool,
    random_peer: bool,
    explicit_node: Option<String>,
    explicit_hash: Option<String>,
    identity: NetworkIdentity,
    directory: PeerDirectory,
}

fn parse_port(raw: Option<&str>, testnet: bool, ssl: bool) -> Result<Option<u16>, SessionError> {
    match raw.map(str::trim) {
        None => Ok(Some(default_port(testnet, ssl))),
        Some("") => Ok(None),
        Some(port) => port
            .parse::<u16>()
            .map(Some)
            .map_err(|_| SessionError::InvalidPort(port.to_string())),
    }
}

impl SessionState {
    pub fn new(options: SessionOptions) -> Result<Self, SessionError> {
        let explicit_node = options.node.filter(|n| !n.trim().is_empty());
        let explicit_hash = options.nethash.filter(|h| !h.trim().is_empty());
        let port = parse_port(options.port.as_deref(), options.testnet, options.ssl)?;

        let pool = PeerPool::for_flags(options.ssl, options.testnet);
        if explicit_node.is_none() && options.directory.pool(pool).is_empty() {
            return Err(SessionError::NoPeers(format!("{:?}", pool).to_lowercase()));
        }

        let mut state = Self {
            current_peer: String::new(),
            port,
            ssl: options.ssl,
            testnet: options.testnet,
            random_peer: options.random_peer.unwrap_or(explicit_node.is_none()),
            identity: resolve(options.testnet, explicit_hash.as_deref()),
            explicit_node,
            explicit_hash,
            directory: options.directory.with_banned(options.banned_peers),
        };
        state.current_peer = state.select_node();
        Ok(state)
    }

    pub fn current_peer(&self) -> &str {
        &self.current_peer
    }

    pub fn port(&self) -> Option<u16> {
        self.port
    }

    pub fn ssl(&self) -> bool {
        self.ssl
    }

    pub fn testnet(&self) -> bool {
        self.testnet
    }

    pub fn random_peer(&self) -> bool {
        self.random_peer
    }

    pub fn identity(&self) -> &NetworkIdentity {
        &self.identity
    }

    pub fn directory(&self) -> &PeerDirectory {
        &self.directory
    }

    pub fn active_pool(&self) -> PeerPool {
        PeerPool::for_flags(self.ssl, self.testnet)
    }

    pub fn target(&self) -> RequestTarget {
        RequestTarget {
            host: self.current_peer.clone(),
            port: self.port,
            ssl: self.ssl,
            identity: self.identity.clone(),
        }
    }

    /// The explicit node when one is pinned, otherwise a random usable peer of the active pool.
    ///
    /// When every peer of the pool is banned an arbitrary pool member is returned; callers
    /// check exhaustion through [`may_redial`](Self::may_redial) first.
    pub fn select_node(&self) -> String {
        if let Some(node) = &self.explicit_node {
            return node.clone();
        }

        let mut rng = rand::thread_rng();
        let pool = self.active_pool();
        let available = self.directory.available(pool);
        available
            .choose(&mut rng)
            .map(|host| host.to_string())
            .or_else(|| self.directory.pool(pool).choose(&mut rng).cloned())
            .unwrap_or_else(|| self.current_peer.clone())
    }

    /// Pins `node` as the explicit node, or re-selects when `None`.
    pub fn set_node(&mut self, node: Option<String>) -> String {
        if let Some(node) = node.filter(|n| !n.trim().is_empty()) {
            self.explicit_node = Some(node);
        }
        self.current_peer = self.select_node();
        debug!(peer = &*self.current_peer; "Active peer set");
        self.current_peer.clone()
    }

    /// Switches between testnet and mainnet.
    ///
    /// Every call clears the bans, resets the port and re-selects. Asserting the value
    /// already held switches testnet off.
    pub fn set_testnet(&mut self, testnet: bool) {
        self.testnet = if self.testnet != testnet { testnet } else { false };
        self.directory.clear_bans();
        self.port = Some(default_port(self.testnet, self.ssl));
        self.identity = resolve(self.testnet, self.explicit_hash.as_deref());
        self.current_peer = self.select_node();
        info!(
            testnet = self.testnet,
            peer = &*self.current_peer;
            "Network switched"
        );
    }

    /// Every call clears the bans and re-selects from the matching pool.
    pub fn set_ssl(&mut self, ssl: bool) {
        self.ssl = ssl;
        self.directory.clear_bans();
        self.current_peer = self.select_node();
        info!(
            ssl = self.ssl,
            peer = &*self.current_peer;
            "SSL setting changed"
        );
    }

    pub fn ban(&mut self, host: &str) -> bool {
        self.directory.ban(host)
    }

    /// Decides whether a failed request may be re-sent to another peer.
    ///
    /// Requires random peer selection, a known network when a hash is pinned, a selector
    /// that can move away from a pinned node, and at least one usable peer in the active
    /// pool. A pinned mainnet or testnet hash first aligns the testnet flag with it.
    pub fn may_redial(&mut self) -> bool {
        if !self.random_peer {
            return false;
        }

        if let Some(hash) = self.explicit_hash.clone() {
            match Network::from_hash(&hash) {
                Network::Custom(_) => return false,
                network => {
                    if network.is_testnet() != self.testnet {
                        self.set_testnet(network.is_testnet());
                    }
                },
            }
        }

        if let Some(node) = &self.explicit_node {
            if self.directory.is_banned(node) {
                return false;
            }
        }

        !self.directory.all_banned(self.active_pool())
    }
}
