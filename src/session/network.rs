//! Network identity: the `nethash`/`version` pair every request carries.
//!
//! Nodes reject requests whose identity headers do not match their own network,
//! so the identity doubles as the handshake that keeps a mainnet client off a
//! testnet node and vice versa.

use std::fmt::Display;

pub const MAINNET_NETHASH: &str = "ed14889723f24ecc54871d058d98ce91ff2f973192075c0155ba2b7b70ad2511";
pub const TESTNET_NETHASH: &str = "da3ed6a45429278bac2666961289ca17ad86595d33b31037615d4b8e8f158bba";

pub const PROTOCOL_VERSION: &str = "1.0.0";
pub const MIN_VERSION: &str = ">=0.5.0";

/// Version sent when the caller pins a hash of its own; no version negotiation happens.
pub const CUSTOM_NETWORK_VERSION: &str = "0.0.0a";

const OS_HEADER: &str = "lisk-client-rs";

/// The networks the client knows how to find peers for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Network {
    Mainnet,
    Testnet,
    Custom(String),
}

impl Network {
    pub fn from_hash(hash: &str) -> Self {
        match hash {
            MAINNET_NETHASH => Network::Mainnet,
            TESTNET_NETHASH => Network::Testnet,
            other => Network::Custom(other.to_string()),
        }
    }

    pub fn is_testnet(&self) -> bool {
        matches!(self, Network::Testnet)
    }
}

impl Display for Network {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Network::Mainnet => write!(f, "mainnet"),
            Network::Testnet => write!(f, "testnet"),
            Network::Custom(hash) => write!(f, "custom({hash})"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkIdentity {
    pub hash: String,
    pub version: String,
}

impl NetworkIdentity {
    pub fn network(&self) -> Network {
        Network::from_hash(&self.hash)
    }

    /// Headers identifying the target network, plus the port the client dials when one is set.
    pub fn headers(&self, port: Option<u16>) -> Vec<(String, String)> {
        let mut headers = vec![
            ("nethash".to_string(), self.hash.clone()),
            ("broadhash".to_string(), self.hash.clone()),
            ("version".to_string(), self.version.clone()),
            ("minVersion".to_string(), MIN_VERSION.to_string()),
            ("os".to_string(), OS_HEADER.to_string()),
        ];
        if let Some(port) = port {
            headers.push(("port".to_string(), port.to_string()));
        }
        headers
    }
}

/// Picks the identity for a session.
///
/// A non-empty `explicit_hash` wins over the testnet flag and forces
/// [`CUSTOM_NETWORK_VERSION`].
pub fn resolve(testnet: bool, explicit_hash: Option<&str>) -> NetworkIdentity {
    let hash = if testnet { TESTNET_NETHASH } else { MAINNET_NETHASH };
    match explicit_hash.map(str::trim).filter(|h| !h.is_empty()) {
        Some(explicit) => NetworkIdentity {
            hash: explicit.to_string(),
            version: CUSTOM_NETWORK_VERSION.to_string(),
        },
        None => NetworkIdentity {
            hash: hash.to_string(),
            version: PROTOCOL_VERSION.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_known_networks() {
        let mainnet = resolve(false, None);
        assert_eq!(mainnet.hash, MAINNET_NETHASH);
        assert_eq!(mainnet.version, PROTOCOL_VERSION);

        let testnet = resolve(true, None);
        assert_eq!(testnet.hash, TESTNET_NETHASH);
        assert_eq!(testnet.network(), Network::Testnet);
    }

    #[test]
    fn test_explicit_hash_overrides_flag_and_version() {
        for testnet in [false, true] {
            let identity = resolve(testnet, Some("123"));
            assert_eq!(identity.hash, "123");
            assert_eq!(identity.version, CUSTOM_NETWORK_VERSION);
            assert_eq!(identity.network(), Network::Custom("123".to_string()));
        }
    }

    #[test]
    fn test_empty_explicit_hash_is_ignored() {
        assert_eq!(resolve(true, Some("")), resolve(true, None));
        assert_eq!(resolve(false, Some("  ")), resolve(false, None));
    }

    #[test]
    fn test_resolve_is_idempotent() {
        assert_eq!(resolve(false, Some(TESTNET_NETHASH)), resolve(false, Some(TESTNET_NETHASH)));
    }

    #[test]
    fn test_headers_include_port_only_when_set() {
        let identity = resolve(false, None);

        let without_port = identity.headers(None);
        assert!(without_port.iter().all(|(k, _)| k != "port"));
        assert!(without_port.contains(&("nethash".to_string(), MAINNET_NETHASH.to_string())));

        let with_port = identity.headers(Some(8000));
        assert!(with_port.contains(&("port".to_string(), "8000".to_string())));
    }
}
