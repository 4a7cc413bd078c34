// Copyright 2025 The Tari Project
// SPDX-License-Identifier: BSD-3-Clause

use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Everything the transport needs to put one request on the wire.
///
/// Built fresh for every attempt by the request builder and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl RequestDescriptor {
    /// Host part of the URL, used to attribute failures to a peer.
    pub fn host(&self) -> Option<String> {
        url::Url::parse(&self.url)
            .ok()
            .and_then(|url| url.host_str().map(str::to_string))
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// A peer as reported by [`Session::list_peers`](crate::session::Session::list_peers).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeerDescriptor {
    pub node: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssl: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub testnet: Option<bool>,
}

/// Read-only projection of the three configured peer pools.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeerListing {
    pub official: Vec<PeerDescriptor>,
    pub ssl: Vec<PeerDescriptor>,
    pub testnet: Vec<PeerDescriptor>,
}

/// Keys derived from a secret passphrase, hex encoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountKeys {
    pub public_key: String,
    pub private_key: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountAddress {
    pub address: String,
    pub public_key: String,
}
