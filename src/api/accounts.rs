//! Account lookups and local key derivation.

use log::debug;
use reqwest::Method;
use serde_json::{Value, json};

use super::params;
use crate::crypto::{CryptoError, KeyDeriver};
use crate::http::{AccountAddress, AccountKeys, Transport};
use crate::log::mask_string;
use crate::session::Session;

/// Derives the account address and public key for `secret` without contacting a node.
pub fn get_address_from_secret(deriver: &impl KeyDeriver, secret: &str) -> Result<AccountAddress, CryptoError> {
    let keys = deriver.derive_keys(secret);
    let address = deriver.derive_address(&keys.public_key)?;
    Ok(AccountAddress {
        address,
        public_key: keys.public_key,
    })
}

pub fn generate_account(deriver: &impl KeyDeriver, secret: &str) -> AccountKeys {
    deriver.derive_keys(secret)
}

impl<T: Transport> Session<T> {
    pub async fn get_account(&self, address: &str) -> Value {
        debug!(address = &*mask_string(address); "Requesting account");
        self.send_request(Method::GET, "accounts", params([("address", json!(address))]))
            .await
    }

    /// Delegates the account has voted for.
    pub async fn list_votes(&self, address: &str) -> Value {
        self.send_request(Method::GET, "accounts/delegates", params([("address", json!(address))]))
            .await
    }
}
