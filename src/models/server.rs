// src/models/server.rs
use std::collections::HashMap;
use std::fmt;
use std::net::Ipv4Addr;

use serde::Deserialize;

/// One configured master server: which game it registers, the protocol
/// number advertised in discovery requests, and where to reach it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MasterServerSpec {
    pub game_id: String,
    pub protocol: i32,
    pub endpoint: String,
}

/// An IPv4 endpoint decoded from one 6-byte master-server response chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerAddress {
    pub ip: Ipv4Addr,
    pub port: u16,
}

impl fmt::Display for ServerAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.ip, self.port)
    }
}

/// Status attributes as reported by a game server. The key set is chosen by
/// the remote server (`hostname`, `mapname`, `clients`, ...), so this stays
/// an open string map rather than a fixed struct. The `ip` key is the one
/// exception: it is filled in locally with the address that was queried.
pub type GameServerRecord = HashMap<String, String>;
