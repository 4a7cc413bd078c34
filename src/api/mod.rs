//! Query methods of the node API.
//!
//! Each method shapes its parameters and hands them to
//! [`Session::send_request`](crate::session::Session::send_request); peer selection,
//! clock-skew retries and failover all happen there.
//!
//! # Endpoint Overview
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/api/accounts` | Account by address |
//! | GET | `/api/accounts/delegates` | Votes cast by an account |
//! | GET | `/api/blocks` | Recent, forged, or single blocks |
//! | GET | `/api/delegates/` | Active and standby delegates |
//! | GET | `/api/delegates/search/` | Delegate search by username |
//! | GET | `/api/delegates/voters` | Voters of a delegate |
//! | GET | `/api/transactions` | Transactions of an account |
//! | GET | `/api/transactions/get` | Transaction by id |
//! | POST | `/api/transactions` | Transfer signed by the node |
//! | GET | `/api/transactions/multisignatures` | Pending multisignature transactions |
//! | GET | `/api/transactions/multisignatures/get` | Multisignature transaction by id |
//! | POST | `/peer/transactions` | Broadcast of a locally signed transaction |

pub mod accounts;
pub mod blocks;
pub mod delegates;
pub mod transactions;

use serde_json::Value;

use crate::session::Params;

pub(crate) fn params<const N: usize>(pairs: [(&str, Value); N]) -> Option<Params> {
    Some(pairs.into_iter().map(|(key, value)| (key.to_string(), value)).collect())
}
