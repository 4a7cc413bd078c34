//! HTTP transport for talking to a single node peer.
//!
//! This module owns the *transport capability* of the client: given a fully
//! built [`RequestDescriptor`], put it on the wire and return the decoded JSON
//! body, or an [`HttpError`]. It knows nothing about peers, bans or retries;
//! those decisions live in [`crate::session`].
//!
//! # Architecture
//!
//! - [`Transport`] - the seam the session dispatcher sends through
//! - [`HttpTransport`] - `reqwest` implementation with transient-retry middleware
//!   and latency tracking
//! - [`HttpError`] - error types for one request against one peer
//! - Descriptor and listing types ([`RequestDescriptor`], [`PeerDescriptor`],
//!   [`PeerListing`], [`AccountKeys`], [`AccountAddress`])
//!
//! # Example
//!
//! ```rust,no_run
//! use lisk_client::http::{HttpTransport, RequestDescriptor, Transport};
//!
//! # async fn example() -> Result<(), anyhow::Error> {
//! let transport = HttpTransport::new()?;
//! let request = RequestDescriptor {
//!     method: reqwest::Method::GET,
//!     url: "http://localhost:7000/api/blocks/getHeight".to_string(),
//!     headers: vec![],
//!     body: None,
//! };
//! let body = transport.send(&request).await?;
//! println!("{body}");
//! # Ok(())
//! # }
//! ```

mod error;
mod http_client;
mod types;

pub use error::HttpError;
pub use http_client::{DEFAULT_MAX_RETRIES, DEFAULT_TIMEOUT_SECS, HttpTransport, Transport};
pub use types::{AccountAddress, AccountKeys, PeerDescriptor, PeerListing, RequestDescriptor};
