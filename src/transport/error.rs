// ABOUTME: Error taxonomy for the WebSocket transport: DNS, TCP, TLS, WS-handshake and I/O.

use thiserror::Error;

/// Everything that can go wrong establishing or using a WebSocket session.
///
/// Surfaces exclusively through the next pending callback in the session's
/// lifecycle (`on_connect` during handshake; `on_send`/`on_message`/
/// `on_close` afterward); never returned synchronously from the public API.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("DNS resolution failed: {0}")]
    ResolveError(#[source] std::io::Error),

    #[error("TCP connect failed: {0}")]
    ConnectError(#[source] std::io::Error),

    #[error("TLS handshake failed: {0}")]
    TlsError(#[source] std::io::Error),

    #[error("WebSocket upgrade handshake failed: {0}")]
    HandshakeError(String),

    #[error("read failed: {0}")]
    ReadError(#[source] std::io::Error),

    #[error("write failed: {0}")]
    WriteError(#[source] std::io::Error),

    #[error("close failed: {0}")]
    CloseError(#[source] std::io::Error),

    #[error("operation aborted")]
    OperationAborted,
}
