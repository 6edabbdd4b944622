// ABOUTME: STOMP 1.2 frame codec: parse/validate/serialize a textual frame, zero-copy.

mod command;
mod error;
mod frame;
mod header;

pub use command::Command;
pub use error::StompError;
pub use frame::Frame;
pub use header::HeaderName;
