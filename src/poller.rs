// src/poller.rs
use std::sync::Arc;
use std::time::Duration;

use log::{debug, warn};

use crate::models::server::MasterServerSpec;
use crate::query::{info, master};
use crate::storage::memory::ServerDirectory;

/// Refreshes the server directory: one full pass immediately, then another
/// on every interval tick for the life of the process.
pub struct Poller {
    directory: Arc<ServerDirectory>,
    master_servers: Vec<MasterServerSpec>,
    interval: Duration,
}

impl Poller {
    pub fn new(
        directory: Arc<ServerDirectory>,
        master_servers: Vec<MasterServerSpec>,
        interval: Duration,
    ) -> Self {
        Self {
            directory,
            master_servers,
            interval,
        }
    }

    /// Runs forever. The first tick fires immediately, so the cache starts
    /// filling as soon as the daemon is up. There is no overlap guard: a
    /// refresh only spawns its query tasks and returns, and a slow cycle's
    /// stragglers may still be appending when the next cycle re-initializes
    /// the map. That is safe — every map touch goes through the directory's
    /// lock — just not ordered.
    pub async fn run(self) {
        let mut ticker = tokio::time::interval(self.interval);
        loop {
            ticker.tick().await;
            self.refresh();
        }
    }

    /// One refresh cycle. Phase one seeds an empty entry for every
    /// configured game, so readers can tell "configured, nothing alive"
    /// from "not configured". Phase two fans out: one task per master
    /// server, then one task per address it reported, with no cap on
    /// in-flight queries.
    pub fn refresh(&self) {
        for m in &self.master_servers {
            self.directory.init_game(&m.game_id);
        }

        for m in &self.master_servers {
            let directory = Arc::clone(&self.directory);
            let master = m.clone();
            tokio::spawn(async move {
                query_master(directory, master).await;
            });
        }
    }
}

async fn query_master(directory: Arc<ServerDirectory>, master: MasterServerSpec) {
    let servers = master::discover(&master.endpoint, &master.game_id, master.protocol).await;

    for server in servers {
        let directory = Arc::clone(&directory);
        let game_id = master.game_id.clone();
        tokio::spawn(async move {
            query_single_server(directory, game_id, server.to_string()).await;
        });
    }
}

async fn query_single_server(directory: Arc<ServerDirectory>, game_id: String, address: String) {
    let info = match info::query_status(&address).await {
        Ok(info) => info,
        Err(e) if e.is_auth_failure() => {
            warn!("rejected reply from {}: {}", address, e);
            return;
        }
        Err(e) => {
            debug!("no usable reply from {}: {}", address, e);
            return;
        }
    };

    // masters sometimes hand back servers registered under another game
    match info.get("gamename") {
        Some(name) if name.eq_ignore_ascii_case(&game_id) => {}
        _ => return,
    }

    directory.append_record(&game_id, info);
}
