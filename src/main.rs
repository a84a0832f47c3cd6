// src/main.rs
use std::path::Path;
use std::sync::Arc;

use env_logger::Env;
use log::{error, info};

use roost::config::Config;
use roost::poller::Poller;
use roost::storage::memory::ServerDirectory;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));
    dotenv::dotenv().ok();

    let config_path =
        std::env::var("ROOST_CONFIG").unwrap_or_else(|_| "config.json".to_string());
    info!("reading config file from {:?}", config_path);
    let config = match Config::load(Path::new(&config_path)) {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };

    info!(
        "polling {} master servers every {}s",
        config.master_servers.len(),
        config.refresh_interval_secs
    );

    let directory = Arc::new(ServerDirectory::new());
    let poller = Poller::new(
        Arc::clone(&directory),
        config.master_servers.clone(),
        config.refresh_interval(),
    );
    tokio::spawn(poller.run());

    tokio::signal::ctrl_c().await?;
    info!("interrupt received, exiting");
    Ok(())
}
