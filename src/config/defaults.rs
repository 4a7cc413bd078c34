use serde::{Deserialize, Serialize};

use crate::cli::NodeArgs;
use crate::http::{DEFAULT_MAX_RETRIES, DEFAULT_TIMEOUT_SECS};
use crate::session::{PeerDirectory, SessionOptions};

const DEFAULT_FAILOVER_DELAY_MS: u64 = 1000;

const MAINNET_PEERS: &[&str] = &[
    "hub21.lisk.io",
    "hub22.lisk.io",
    "hub23.lisk.io",
    "hub24.lisk.io",
    "hub25.lisk.io",
    "hub26.lisk.io",
    "hub27.lisk.io",
    "hub28.lisk.io",
    "hub31.lisk.io",
    "hub32.lisk.io",
    "hub33.lisk.io",
    "hub34.lisk.io",
    "hub35.lisk.io",
    "hub36.lisk.io",
    "hub37.lisk.io",
    "hub38.lisk.io",
];

const TESTNET_PEERS: &[&str] = &["testnet.lisk.io"];

fn to_strings(peers: &[&str]) -> Vec<String> {
    peers.iter().map(|p| p.to_string()).collect()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ClientConfig {
    pub node: Option<String>,
    pub ssl: bool,
    pub testnet: bool,
    pub random_peer: Option<bool>,
    pub port: Option<String>,
    pub nethash: Option<String>,
    pub banned_peers: Vec<String>,
    /// Replaces all three peer pools when set.
    pub peers: Option<Vec<String>>,
    pub failover_delay_ms: u64,
    pub request_timeout_secs: u64,
    pub transport_retries: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            node: None,
            ssl: false,
            testnet: false,
            random_peer: None,
            port: None,
            nethash: None,
            banned_peers: vec![],
            peers: None,
            failover_delay_ms: DEFAULT_FAILOVER_DELAY_MS,
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            transport_retries: DEFAULT_MAX_RETRIES,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PeersConfig {
    pub mainnet: Vec<String>,
    /// Falls back to the mainnet list.
    pub ssl: Option<Vec<String>>,
    pub testnet: Vec<String>,
}

impl Default for PeersConfig {
    fn default() -> Self {
        Self {
            mainnet: to_strings(MAINNET_PEERS),
            ssl: None,
            testnet: to_strings(TESTNET_PEERS),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct LiskConfig {
    pub client: ClientConfig,
    pub peers: PeersConfig,
}

impl LiskConfig {
    pub fn directory(&self) -> PeerDirectory {
        match &self.client.peers {
            Some(peers) => PeerDirectory::uniform(peers.clone()),
            None => PeerDirectory::new(
                self.peers.mainnet.clone(),
                self.peers.ssl.clone().unwrap_or_else(|| self.peers.mainnet.clone()),
                self.peers.testnet.clone(),
            ),
        }
    }

    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            node: self.client.node.clone(),
            ssl: self.client.ssl,
            testnet: self.client.testnet,
            random_peer: self.client.random_peer,
            port: self.client.port.clone(),
            nethash: self.client.nethash.clone(),
            banned_peers: self.client.banned_peers.clone(),
            directory: self.directory(),
        }
    }

    pub fn apply_node(&mut self, args: &NodeArgs) {
        if let Some(node) = &args.node {
            self.client.node = Some(node.clone());
        }
        if args.ssl {
            self.client.ssl = true;
        }
        if let Some(port) = &args.port {
            self.client.port = Some(port.clone());
        }
        if let Some(random_peer) = args.random_peer {
            self.client.random_peer = Some(random_peer);
        }
        if let Some(nethash) = &args.nethash {
            self.client.nethash = Some(nethash.clone());
        }
        if !args.peers.is_empty() {
            self.client.peers = Some(args.peers.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::PeerPool;

    #[test]
    fn test_default_pools() {
        let directory = LiskConfig::default().directory();

        assert_eq!(directory.pool(PeerPool::Default).len(), MAINNET_PEERS.len());
        assert_eq!(directory.pool(PeerPool::Ssl), directory.pool(PeerPool::Default));
        assert_eq!(directory.pool(PeerPool::Testnet), ["testnet.lisk.io".to_string()]);
    }

    #[test]
    fn test_caller_peers_replace_all_pools() {
        let mut config = LiskConfig::default();
        config.client.peers = Some(vec!["10.0.0.1".to_string()]);

        let directory = config.directory();

        for pool in [PeerPool::Default, PeerPool::Ssl, PeerPool::Testnet] {
            assert_eq!(directory.pool(pool), ["10.0.0.1".to_string()]);
        }
    }

    #[test]
    fn test_apply_node_args() {
        let mut config = LiskConfig::default();
        let args = NodeArgs {
            node: Some("localhost".to_string()),
            ssl: true,
            port: Some("4000".to_string()),
            random_peer: Some(false),
            nethash: None,
            peers: vec![],
        };

        config.apply_node(&args);

        let options = config.session_options();
        assert_eq!(options.node.as_deref(), Some("localhost"));
        assert!(options.ssl);
        assert_eq!(options.port.as_deref(), Some("4000"));
        assert_eq!(options.random_peer, Some(false));
        assert_eq!(options.nethash, None);
    }
}
