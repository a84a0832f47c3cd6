// src/storage/memory.rs
use std::collections::HashMap;

use parking_lot::Mutex;

use crate::models::server::GameServerRecord;

/// In-memory directory of game id -> status records for the servers that
/// answered during the most recent refresh cycle.
///
/// The map is guarded by a single mutex and never handed out directly;
/// every operation locks only for the duration of one map mutation or copy,
/// never across network I/O. Readers always get a defensive copy, so a
/// refresh running concurrently can never expose a half-written entry.
#[derive(Default)]
pub struct ServerDirectory {
    games: Mutex<HashMap<String, Vec<GameServerRecord>>>,
}

impl ServerDirectory {
    pub fn new() -> Self {
        Self {
            games: Mutex::new(HashMap::new()),
        }
    }

    /// Resets the entry for a game to an empty list. Called for every
    /// configured game at the start of a refresh cycle, so a configured game
    /// is always present in the directory even before (or without) any
    /// server answering.
    pub fn init_game(&self, game_id: &str) {
        self.games.lock().insert(game_id.to_string(), Vec::new());
    }

    /// Appends one record to a game's list. The entry is created on demand:
    /// an overlapping refresh cycle may have re-initialized the map between
    /// this record's query starting and finishing.
    pub fn append_record(&self, game_id: &str, record: GameServerRecord) {
        self.games
            .lock()
            .entry(game_id.to_string())
            .or_default()
            .push(record);
    }

    /// Copy of one game's records. `None` means the game was never
    /// configured; `Some` with an empty list means it is configured but had
    /// no responsive servers.
    pub fn get(&self, game_id: &str) -> Option<Vec<GameServerRecord>> {
        self.games.lock().get(game_id).cloned()
    }

    /// Copy of the whole directory.
    pub fn get_all(&self) -> HashMap<String, Vec<GameServerRecord>> {
        self.games.lock().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    fn record(pairs: &[(&str, &str)]) -> GameServerRecord {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn configured_game_is_present_but_empty() {
        let dir = ServerDirectory::new();
        dir.init_game("cod2");

        assert_eq!(dir.get("cod2"), Some(Vec::new()));
        assert_eq!(dir.get("quake3"), None);
    }

    #[test]
    fn init_replaces_previous_cycle() {
        let dir = ServerDirectory::new();
        dir.init_game("cod2");
        dir.append_record("cod2", record(&[("hostname", "a")]));

        dir.init_game("cod2");
        assert_eq!(dir.get("cod2"), Some(Vec::new()));
    }

    #[test]
    fn append_creates_entry_when_missing() {
        let dir = ServerDirectory::new();
        dir.append_record("cod2", record(&[("hostname", "a")]));

        assert_eq!(dir.get("cod2").map(|s| s.len()), Some(1));
    }

    #[test]
    fn get_all_copies_every_game() {
        let dir = ServerDirectory::new();
        dir.init_game("cod2");
        dir.init_game("quake3");
        dir.append_record("quake3", record(&[("hostname", "q3dm17")]));

        let all = dir.get_all();
        assert_eq!(all.len(), 2);
        assert_eq!(all["cod2"].len(), 0);
        assert_eq!(all["quake3"].len(), 1);
    }

    #[test]
    fn concurrent_appends_lose_no_records() {
        let dir = Arc::new(ServerDirectory::new());
        dir.init_game("cod2");

        let mut handles = Vec::new();
        for cycle in 0..2 {
            let dir = Arc::clone(&dir);
            handles.push(thread::spawn(move || {
                for i in 0..100 {
                    let hostname = format!("server-{}-{}", cycle, i);
                    dir.append_record(
                        "cod2",
                        record(&[("hostname", &hostname), ("mapname", "mp_toujane")]),
                    );
                }
            }));
        }
        for h in handles {
            h.join().unwrap();
        }

        let servers = dir.get("cod2").unwrap();
        assert_eq!(servers.len(), 200);
        // every record went in whole
        for s in &servers {
            assert!(s.contains_key("hostname"));
            assert_eq!(s["mapname"], "mp_toujane");
        }
    }
}
