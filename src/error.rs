//! Unified error type.

use std::fmt;
use std::net::SocketAddr;

/// The error type returned by weave's fallible operations.
///
/// Application-level errors (404, 422, etc.) are expressed as HTTP
/// [`Response`](crate::Response) values, not as `Error`s — and middleware
/// composition never fails at all. What remains is infrastructure: the
/// listen socket.
#[derive(Debug)]
pub enum Error {
    /// Binding the listen socket failed (port taken, permission denied, ...).
    Bind { addr: SocketAddr, source: std::io::Error },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bind { addr, source } => write!(f, "failed to bind {addr}: {source}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Bind { source, .. } => Some(source),
        }
    }
}
