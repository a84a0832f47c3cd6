// src/report.rs
//! Read-side helpers over directory snapshots. Pure functions; nothing in
//! here touches the network or the directory lock.

use crate::models::server::GameServerRecord;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct GameStats {
    pub servers: usize,
    pub players: i32,
    pub bots: i32,
}

/// Sums player and bot counts across a game's records. Servers reporting
/// nonsense are left out of all three totals: counts must parse as
/// integers, bots can't exceed clients, and both must sit in 0..=18.
pub fn aggregate(servers: &[GameServerRecord]) -> GameStats {
    let mut stats = GameStats::default();
    for s in servers {
        let clients: i32 = match s.get("clients").and_then(|v| v.parse().ok()) {
            Some(c) => c,
            None => continue,
        };
        let bots: i32 = match s.get("bots").and_then(|v| v.parse().ok()) {
            Some(b) => b,
            None => continue,
        };
        if bots > clients || !(0..=18).contains(&clients) || !(0..=18).contains(&bots) {
            continue;
        }
        stats.players += clients - bots;
        stats.bots += bots;
        stats.servers += 1;
    }
    stats
}

/// Keeps the records whose hostname contains `needle`, case-insensitively.
/// Records without a hostname never match.
pub fn filter_by_hostname(servers: &[GameServerRecord], needle: &str) -> Vec<GameServerRecord> {
    let needle = needle.to_lowercase();
    servers
        .iter()
        .filter(|s| {
            s.get("hostname")
                .map(|h| h.to_lowercase().contains(&needle))
                .unwrap_or(false)
        })
        .cloned()
        .collect()
}
