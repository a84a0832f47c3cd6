// src/query/mod.rs
pub mod info;
pub mod master;
pub mod transport;

use std::fmt;
use std::io;

/// Why a single server's status query produced no record. Every variant is
/// contained at the task that queried that server; none of them abort a
/// refresh cycle.
#[derive(Debug)]
pub enum QueryError {
    /// Socket-level failure: unreachable, refused, timed out.
    Transport(io::Error),
    /// Reply did not frame into key/value pairs.
    MalformedResponse(String),
    /// Reply carried no challenge at all.
    ChallengeAbsent,
    /// Reply echoed a challenge other than the one we sent. Either a stale
    /// answer or someone forging responses.
    ChallengeMismatch,
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport(e) => write!(f, "couldn't get response from game server: {}", e),
            Self::MalformedResponse(reason) => write!(f, "malformed server response: {}", reason),
            Self::ChallengeAbsent => write!(f, "serverinfo challenge absent"),
            Self::ChallengeMismatch => write!(f, "serverinfo challenge mismatch"),
        }
    }
}

impl std::error::Error for QueryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Transport(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for QueryError {
    fn from(e: io::Error) -> Self {
        Self::Transport(e)
    }
}

impl QueryError {
    /// Challenge failures get logged louder than plain dead servers, since
    /// they can indicate a hostile responder rather than an offline one.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, Self::ChallengeAbsent | Self::ChallengeMismatch)
    }
}
