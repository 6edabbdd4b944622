// ABOUTME: Callback type aliases for the async, non-blocking WebSocketClient surface.

use crate::transport::error::TransportError;

/// Fired exactly once, when a `connect()` resolves to `Open` or `Failed`.
pub type OnConnect = Box<dyn FnOnce(Option<TransportError>) + Send>;

/// Fired once per inbound text message for the lifetime of a session; also
/// fires once with `Err` if the session fails while a message handler is
/// registered.
pub type OnMessage = Box<dyn FnMut(Result<String, TransportError>) + Send>;

/// Fired exactly once per `send()` call that was actually attempted.
pub type OnSend = Box<dyn FnOnce(Result<usize, TransportError>) + Send>;

/// Fired exactly once, when a `close()` completes or the session fails.
pub type OnClose = Box<dyn FnOnce(Option<TransportError>) + Send>;

/// Fired exactly once if the session leaves `Open` on its own (a
/// remote-initiated close or an aborted read), rather than through a
/// caller-initiated `close()`. Same shape as `OnClose`; registered at
/// `connect()` time instead of armed per-call.
pub type OnDisconnect = OnClose;
