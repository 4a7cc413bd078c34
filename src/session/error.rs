use thiserror::Error;

/// Errors raised while assembling a [`Session`](super::Session).
///
/// Once a session exists, dispatching never fails with an error: every outcome is
/// reported through the response value.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("No peers configured for the {0} pool and no explicit node given")]
    NoPeers(String),
    #[error("Invalid port '{0}'")]
    InvalidPort(String),
    #[error("Could not build HTTP transport: {0}")]
    Transport(#[from] anyhow::Error),
}
