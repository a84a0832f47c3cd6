// src/query/info.rs
use std::fmt::Write;

use lazy_static::lazy_static;
use log::debug;
use rand::Rng;
use regex::Regex;

use crate::models::server::GameServerRecord;
use crate::query::{transport, QueryError};

lazy_static! {
    // engine color escapes, e.g. "^1" in "My ^1Server"
    static ref COLOR_CODES: Regex = Regex::new(r"\^[\d:;]").unwrap();
}

/// Queries one game server for its status attributes.
///
/// Sends `getinfo` with a random hex nonce and only trusts a reply that
/// echoes the same nonce back in its `challenge` field; anything else is a
/// stale or forged answer and is dropped.
pub async fn query_status(address: &str) -> Result<GameServerRecord, QueryError> {
    let nonce: [u8; 4] = rand::thread_rng().gen();
    let mut challenge = String::with_capacity(8);
    for byte in nonce {
        write!(&mut challenge, "{:02x}", byte).unwrap();
    }

    let message = format!("getinfo {}", challenge);
    let response = transport::send(address, &message, false).await?;

    let mut info = parse_info(&response, &challenge)?;

    // the server doesn't know which address we reached it on
    info.insert("ip".to_string(), address.to_string());

    debug!("got server response from server {}", address);
    Ok(info)
}

/// Decodes an `infoResponse` payload into a record and validates its
/// challenge echo. The payload is `\`-separated; the first chunk is the
/// packet header and the rest alternate key, value, key, value.
pub fn parse_info(response: &[u8], challenge: &str) -> Result<GameServerRecord, QueryError> {
    let chunks: Vec<&[u8]> = response.split(|&b| b == b'\\').skip(1).collect();
    if chunks.len() % 2 != 0 {
        return Err(QueryError::MalformedResponse(
            "key/value length not even".to_string(),
        ));
    }

    let mut info = GameServerRecord::new();
    for pair in chunks.chunks_exact(2) {
        info.insert(
            String::from_utf8_lossy(pair[0]).into_owned(),
            String::from_utf8_lossy(pair[1]).into_owned(),
        );
    }

    match info.get("challenge") {
        None => return Err(QueryError::ChallengeAbsent),
        Some(echoed) if echoed != challenge => return Err(QueryError::ChallengeMismatch),
        Some(_) => {}
    }

    if let Some(hostname) = info.get("hostname") {
        let stripped = COLOR_CODES.replace_all(hostname, "").into_owned();
        info.insert("hostname".to_string(), stripped);
    }

    Ok(info)
}
