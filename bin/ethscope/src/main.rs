//! Entrypoint.

use std::{net::SocketAddr, sync::Arc};

use api::ApiState;
use clap::Parser;
use config::Opts;
use dotenvy::dotenv;
use provider::{AlchemyClient, ChainDataApi};
use snapshot::{Loader, shared_state};
use tracing::info;
use tracing_subscriber::filter::EnvFilter;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    dotenv().ok();
    let opts = Opts::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    info!("🔎 ethscope starting...");

    let network = opts.provider.network;
    let client: Arc<dyn ChainDataApi> = Arc::new(AlchemyClient::new(
        network.rpc_url(&opts.provider.api_key)?,
        network.nft_api_url(&opts.provider.api_key)?,
    ));

    let view = shared_state();
    let loader = Loader::new(
        Arc::clone(&client),
        view.clone(),
        opts.nft.contract_address,
        opts.nft.token_id.clone(),
    );
    // one-shot initial load; failures surface as errored view-state slots
    tokio::spawn(async move { loader.run().await });

    let state = ApiState::new(view, client);
    let addr: SocketAddr = format!("{}:{}", opts.api.host, opts.api.port).parse()?;
    api::run(addr, state, opts.api.allowed_origins).await
}
