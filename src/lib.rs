//! A STOMP-over-secure-WebSocket feed client and an in-memory transport
//! network model fed by it: [`transport`] carries bytes, [`stomp`] frames
//! them, [`loader`] turns a parsed frame body into a [`network::TransportNetwork`].

pub mod loader;
pub mod network;
pub mod stomp;
pub mod transport;


pub use loader::{load_network, LoaderError};
pub use network::{NetworkError, TransportNetwork};
pub use stomp::{Command, Frame, HeaderName, StompError};
pub use transport::{RealTransportIo, TransportError, TransportIo, WebSocketClient};

/// Error returned by most functions.
///
/// When writing a real application, one might want to consider a specialized
/// error handling crate or defining an error type as an `enum` of causes.
/// However, for our example, using a boxed `std::error::Error` is sufficient.
pub type Error = Box<dyn std::error::Error + Send + Sync>;

/// A specialized `Result` type for top-level operations.
pub type Result<T> = std::result::Result<T, Error>;
