use clap::Parser;
use log::info;
use reqwest::Method;
use serde::Serialize;
use serde_json::{Value, json};

use lisk_client::api::accounts::get_address_from_secret;
use lisk_client::cli::{Cli, Commands, parse_params};
use lisk_client::config::load_lisk_config;
use lisk_client::crypto::Ed25519KeyDeriver;
use lisk_client::log::init_logging;
use lisk_client::session::{Params, Session};

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    init_logging();

    let cli = Cli::parse();

    let mut config = load_lisk_config(&cli.config, cli.testnet)?;
    config.apply_node(&cli.node);

    let session = Session::from_config(&config)?;

    let result = match cli.command {
        Commands::Peers => {
            let identity = session.network_identity().await;
            json!({
                "current": session.current_peer().await,
                "network": identity.network().to_string(),
                "nethash": identity.hash,
                "peers": session.list_peers().await,
            })
        },
        Commands::Request {
            method,
            resource,
            params,
        } => {
            let method = Method::from_bytes(method.to_uppercase().as_bytes())?;
            let params = parse_params(&params)?
                .into_iter()
                .map(|(key, value)| (key, Value::String(value)))
                .collect::<Params>();
            session.send_request(method, &resource, Some(params)).await
        },
        Commands::Account { address } => session.get_account(&address).await,
        Commands::Address { secret } => serde_json::to_value(get_address_from_secret(&Ed25519KeyDeriver, &secret)?)?,
        Commands::Blocks { limit } => session.list_blocks(limit).await,
        Commands::Block { height } => session.get_block(height).await,
        Commands::ForgedBlocks { public_key } => session.list_forged_blocks(&public_key).await,
        Commands::Transactions { address, limit, offset } => {
            session.list_transactions(&address, limit, offset).await
        },
        Commands::Transaction { id } => session.get_transaction(&id).await,
        Commands::Send {
            recipient,
            amount,
            secret,
            second_secret,
        } => {
            session
                .send_lsk(&recipient, amount, &secret, second_secret.as_deref())
                .await
        },
        Commands::Broadcast { transaction } => {
            let transaction: Value = serde_json::from_str(&transaction)?;
            session.broadcast_signed_transaction(transaction).await
        },
        Commands::Delegates { limit, standby: false } => session.list_active_delegates(limit).await,
        Commands::Delegates { limit, standby: true } => session.list_standby_delegates(limit).await,
        Commands::SearchDelegate { username } => session.search_delegate_by_username(&username).await,
        Commands::Votes { address } => session.list_votes(&address).await,
        Commands::Voters { public_key } => session.list_voters(&public_key).await,
        Commands::Multisignatures { id: None } => session.list_multisignature_transactions().await,
        Commands::Multisignatures { id: Some(id) } => session.get_multisignature_transaction(&id).await,
    };

    if let Some(latency) = session.last_request_latency().await {
        info!(latency_ms = latency.as_millis() as u64; "Last request latency");
    }

    print_json(&result)
}

fn print_json<T: Serialize>(value: &T) -> Result<(), anyhow::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
