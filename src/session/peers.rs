use std::collections::BTreeSet;

use crate::http::{PeerDescriptor, PeerListing};

/// Which of the three configured pools a lookup refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeerPool {
    Default,
    Ssl,
    Testnet,
}

impl PeerPool {
    /// The pool in effect for the given flags. Testnet takes precedence over ssl.
    pub fn for_flags(ssl: bool, testnet: bool) -> Self {
        if testnet {
            PeerPool::Testnet
        } else if ssl {
            PeerPool::Ssl
        } else {
            PeerPool::Default
        }
    }
}

/// The three peer pools plus the hosts banned for the rest of the session.
#[derive(Debug, Clone)]
pub struct PeerDirectory {
    default_peers: Vec<String>,
    ssl_peers: Vec<String>,
    testnet_peers: Vec<String>,
    banned: BTreeSet<String>,
}

impl PeerDirectory {
    pub fn new(default_peers: Vec<String>, ssl_peers: Vec<String>, testnet_peers: Vec<String>) -> Self {
        Self {
            default_peers,
            ssl_peers,
            testnet_peers,
            banned: BTreeSet::new(),
        }
    }

    /// One caller-supplied list standing in for all three pools.
    pub fn uniform(peers: Vec<String>) -> Self {
        Self::new(peers.clone(), peers.clone(), peers)
    }

    pub fn with_banned<I: IntoIterator<Item = String>>(mut self, banned: I) -> Self {
        self.banned.extend(banned);
        self
    }

    pub fn pool(&self, pool: PeerPool) -> &[String] {
        match pool {
            PeerPool::Default => &self.default_peers,
            PeerPool::Ssl => &self.ssl_peers,
            PeerPool::Testnet => &self.testnet_peers,
        }
    }

    pub fn is_peer_available(&self, host: &str) -> bool {
        !self.banned.contains(host)
    }

    pub fn is_banned(&self, host: &str) -> bool {
        self.banned.contains(host)
    }

    /// Every host of `pool` is banned. An empty pool counts as exhausted.
    pub fn all_banned(&self, pool: PeerPool) -> bool {
        self.pool(pool).iter().all(|host| self.banned.contains(host))
    }

    /// Returns `true` if the host was not banned before.
    pub fn ban(&mut self, host: &str) -> bool {
        self.banned.insert(host.to_string())
    }

    pub fn clear_bans(&mut self) {
        self.banned.clear();
    }

    pub fn banned(&self) -> impl Iterator<Item = &str> {
        self.banned.iter().map(String::as_str)
    }

    /// Hosts of `pool` that are still usable.
    pub fn available(&self, pool: PeerPool) -> Vec<&str> {
        self.pool(pool)
            .iter()
            .filter(|host| self.is_peer_available(host))
            .map(String::as_str)
            .collect()
    }

    pub fn listing(&self) -> PeerListing {
        PeerListing {
            official: self
                .default_peers
                .iter()
                .map(|node| PeerDescriptor {
                    node: node.clone(),
                    ssl: None,
                    testnet: None,
                })
                .collect(),
            ssl: self
                .ssl_peers
                .iter()
                .map(|node| PeerDescriptor {
                    node: node.clone(),
                    ssl: Some(true),
                    testnet: None,
                })
                .collect(),
            testnet: self
                .testnet_peers
                .iter()
                .map(|node| PeerDescriptor {
                    node: node.clone(),
                    ssl: None,
                    testnet: Some(true),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directory() -> PeerDirectory {
        PeerDirectory::new(
            vec!["localhost".to_string(), "external".to_string()],
            vec!["localhost".to_string(), "external".to_string()],
            vec!["localhost".to_string(), "testnet".to_string()],
        )
    }

    #[test]
    fn test_ban_is_idempotent() {
        let mut peers = directory();

        assert!(peers.ban("external"));
        assert!(!peers.ban("external"));
        assert!(!peers.is_peer_available("external"));
        assert_eq!(peers.banned().collect::<Vec<_>>(), vec!["external"]);
    }

    #[test]
    fn test_all_banned_per_pool() {
        let mut peers = directory();
        assert!(!peers.all_banned(PeerPool::Default));

        peers.ban("localhost");
        peers.ban("external");

        assert!(peers.all_banned(PeerPool::Default));
        assert!(peers.all_banned(PeerPool::Ssl));
        assert!(!peers.all_banned(PeerPool::Testnet));

        peers.ban("testnet");
        assert!(peers.all_banned(PeerPool::Testnet));
    }

    #[test]
    fn test_clear_bans_restores_availability() {
        let mut peers = directory().with_banned(vec!["localhost".to_string()]);
        assert!(!peers.is_peer_available("localhost"));

        peers.clear_bans();

        assert!(peers.is_peer_available("localhost"));
        assert_eq!(peers.available(PeerPool::Default), vec!["localhost", "external"]);
    }

    #[test]
    fn test_pool_for_flags() {
        assert_eq!(PeerPool::for_flags(false, false), PeerPool::Default);
        assert_eq!(PeerPool::for_flags(true, false), PeerPool::Ssl);
        assert_eq!(PeerPool::for_flags(true, true), PeerPool::Testnet);
    }

    #[test]
    fn test_listing_marks_pools() {
        let listing = PeerDirectory::uniform(vec!["a".to_string()]).listing();

        assert_eq!(listing.official[0], PeerDescriptor { node: "a".to_string(), ssl: None, testnet: None });
        assert_eq!(listing.ssl[0].ssl, Some(true));
        assert_eq!(listing.testnet[0].testnet, Some(true));
    }
}
