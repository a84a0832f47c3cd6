// src/query/transport.rs
use std::io;
use std::time::Duration;

use tokio::net::UdpSocket;
use tokio::time::timeout;

/// Out-of-band marker the engine expects in front of every connectionless
/// packet.
const OOB_PREFIX: [u8; 4] = [0xFF, 0xFF, 0xFF, 0xFF];

/// One datagram per read; replies larger than this get truncated by the OS.
const MAX_DATAGRAM: usize = 8192;

const IO_TIMEOUT: Duration = Duration::from_secs(5);

/// Sends one connectionless command and returns the raw reply bytes.
///
/// A fresh socket is bound for every call; there is no pooling. Connect and
/// the first read are bounded by a 5 second timeout. With
/// `wait_for_terminator` set, subsequent datagrams are appended until the
/// accumulated reply contains `EOF` or `EOT` — master servers chunk their
/// address lists across datagrams and mark the last one. Those continuation
/// reads carry no deadline: a master that stops sending mid-list without a
/// terminator hangs this call, and the caller's task along with it.
pub async fn send(
    address: &str,
    message: &str,
    wait_for_terminator: bool,
) -> io::Result<Vec<u8>> {
    let socket = UdpSocket::bind("0.0.0.0:0").await?;
    timeout(IO_TIMEOUT, socket.connect(address))
        .await
        .map_err(|_| io::Error::new(io::ErrorKind::TimedOut, "connect timed out"))??;

    let mut packet = Vec::with_capacity(OOB_PREFIX.len() + message.len());
    packet.extend_from_slice(&OOB_PREFIX);
    packet.extend_from_slice(message.as_bytes());
    socket.send(&packet).await?;

    let mut buf = vec![0u8; MAX_DATAGRAM];
    let read = timeout(IO_TIMEOUT, socket.recv(&mut buf))
        .await
        .map_err(|_| io::Error::new(io::ErrorKind::TimedOut, "read timed out"))??;
    let mut response = buf[..read].to_vec();

    if wait_for_terminator {
        while !has_terminator(&response) {
            let read = socket.recv(&mut buf).await?;
            response.extend_from_slice(&buf[..read]);
        }
    }

    Ok(response)
}

fn has_terminator(response: &[u8]) -> bool {
    response
        .windows(3)
        .any(|w| w == b"EOF" || w == b"EOT")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminator_detected_anywhere_in_accumulated_bytes() {
        assert!(has_terminator(b"getserversResponse\\EOT"));
        assert!(has_terminator(b"chunk EOF trailing"));
        assert!(!has_terminator(b"getserversResponse\\"));
        assert!(!has_terminator(b"EO"));
        assert!(!has_terminator(b""));
    }
}
