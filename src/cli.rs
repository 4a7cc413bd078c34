use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "lisk-client")]
#[command(about = "Lisk node API client", long_about = None)]
pub struct Cli {
    #[arg(
        short,
        long,
        help = "Path to the configuration file",
        default_value = "config/lisk-client.toml"
    )]
    pub config: PathBuf,
    #[arg(
        long,
        num_args = 0..=1,
        default_missing_value = "true",
        help = "Use the testnet instead of the mainnet"
    )]
    pub testnet: Option<bool>,
    #[command(flatten)]
    pub node: NodeArgs,
    #[command(subcommand)]
    pub command: Commands,
}

/// Connection overrides applied on top of the configuration file.
#[derive(Args, Debug, Clone, Default)]
pub struct NodeArgs {
    #[arg(long, help = "Talk to this node only")]
    pub node: Option<String>,
    #[arg(long, help = "Connect over https")]
    pub ssl: bool,
    #[arg(long, help = "Port to dial. An empty value uses the scheme default")]
    pub port: Option<String>,
    #[arg(long, help = "Fail over to another peer when a request fails")]
    pub random_peer: Option<bool>,
    #[arg(long, help = "Network hash of a custom network")]
    pub nethash: Option<String>,
    #[arg(long = "peer", help = "Peer to use instead of the built-in lists. May be repeated")]
    pub peers: Vec<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the configured peers and the network identity
    Peers,
    /// Send a raw request to an API resource
    Request {
        #[arg(short, long, default_value = "GET", help = "HTTP method")]
        method: String,
        #[arg(help = "Resource below /api, e.g. blocks/getHeight")]
        resource: String,
        #[arg(help = "Parameters as key=value pairs")]
        params: Vec<String>,
    },
    /// Show an account
    Account {
        #[arg(help = "Account address")]
        address: String,
    },
    /// Derive the address belonging to a passphrase, without contacting a node
    Address {
        #[arg(short, long, help = "Account passphrase")]
        secret: String,
    },
    /// List the most recent blocks
    Blocks {
        #[arg(short, long, default_value_t = 10, help = "Number of blocks")]
        limit: u32,
    },
    /// Show the block at a height
    Block {
        #[arg(help = "Block height")]
        height: u64,
    },
    /// List blocks forged by a delegate
    ForgedBlocks {
        #[arg(help = "Public key of the delegate")]
        public_key: String,
    },
    /// List transactions of an account
    Transactions {
        #[arg(help = "Account address")]
        address: String,
        #[arg(short, long, help = "Maximum number of transactions")]
        limit: Option<u32>,
        #[arg(short, long, help = "Number of transactions to skip")]
        offset: Option<u32>,
    },
    /// Show a transaction
    Transaction {
        #[arg(help = "Transaction id")]
        id: String,
    },
    /// Transfer LSK, signed by the node
    Send {
        #[arg(help = "Recipient address")]
        recipient: String,
        #[arg(help = "Amount in beddows")]
        amount: u64,
        #[arg(short, long, help = "Account passphrase")]
        secret: String,
        #[arg(long, help = "Second passphrase, when the account has one")]
        second_secret: Option<String>,
    },
    /// Broadcast a transaction signed elsewhere
    Broadcast {
        #[arg(help = "Transaction as JSON")]
        transaction: String,
    },
    /// List delegates
    Delegates {
        #[arg(short, long, default_value_t = 101, help = "Number of delegates")]
        limit: u32,
        #[arg(long, help = "List standby delegates instead of active ones")]
        standby: bool,
    },
    /// Search delegates by username
    SearchDelegate {
        #[arg(help = "Username or part of it")]
        username: String,
    },
    /// List the delegates an account voted for
    Votes {
        #[arg(help = "Account address")]
        address: String,
    },
    /// List the voters of a delegate
    Voters {
        #[arg(help = "Public key of the delegate")]
        public_key: String,
    },
    /// List pending multisignature transactions, or show one
    Multisignatures {
        #[arg(help = "Transaction id")]
        id: Option<String>,
    },
}

/// Splits `key=value` arguments. A pair without `=` is an error.
pub fn parse_params(pairs: &[String]) -> Result<Vec<(String, String)>, anyhow::Error> {
    pairs
        .iter()
        .map(|pair| {
            pair.split_once('=')
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .ok_or_else(|| anyhow::anyhow!("Invalid parameter '{pair}', expected key=value"))
        })
        .collect()
}
