// src/query/master.rs
use std::net::Ipv4Addr;

use byteorder::{BigEndian, ByteOrder};
use log::{info, warn};

use crate::models::server::ServerAddress;
use crate::query::transport;

/// Asks a master server for every registered server of a game.
///
/// A master that is down or times out just yields an empty list — one dead
/// registry must not take down the whole refresh cycle.
pub async fn discover(endpoint: &str, game_id: &str, protocol: i32) -> Vec<ServerAddress> {
    let request = format!("getservers {} {} full empty", game_id, protocol);
    let response = match transport::send(endpoint, &request, true).await {
        Ok(response) => response,
        Err(e) => {
            warn!(
                "couldn't get response from master server {} ({}): {}",
                endpoint, game_id, e
            );
            return Vec::new();
        }
    };

    let servers = parse_servers(&response);
    info!(
        "master server {:?} ({}) responded with {} servers",
        endpoint,
        game_id,
        servers.len()
    );
    servers
}

/// Decodes a `getserversResponse` payload: `\`-separated chunks where each
/// interior 6-byte chunk is an IPv4 address followed by a big-endian port.
/// The first chunk (packet header) and the last (terminator marker) never
/// hold an address; anything that isn't exactly 6 bytes is a partial or
/// malformed entry and gets skipped.
pub fn parse_servers(response: &[u8]) -> Vec<ServerAddress> {
    let chunks: Vec<&[u8]> = response.split(|&b| b == b'\\').collect();
    let mut servers = Vec::new();

    if chunks.len() < 2 {
        return servers;
    }
    for chunk in &chunks[1..chunks.len() - 1] {
        if chunk.len() != 6 {
            continue;
        }
        servers.push(ServerAddress {
            ip: Ipv4Addr::new(chunk[0], chunk[1], chunk[2], chunk[3]),
            port: BigEndian::read_u16(&chunk[4..6]),
        });
    }
    servers
}
