pub mod api;
pub mod cli;
pub mod config;
pub mod crypto;
pub mod http;
pub mod log;
pub mod session;

#[cfg(test)]
mod test_utils;

pub use crate::config::LiskConfig;
pub use crate::http::HttpTransport;
pub use crate::session::Session;
