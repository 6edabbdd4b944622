// ABOUTME: The closed set of STOMP 1.2 frame commands.
// ABOUTME: Wire tokens are matched byte-for-byte; unknown tokens are InvalidCommand.

use std::fmt;

/// A STOMP 1.2 command token, as it appears on the first line of a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Abort,
    Ack,
    Begin,
    Commit,
    Connect,
    Connected,
    Disconnect,
    Error,
    Message,
    Nack,
    Receipt,
    Send,
    Stomp,
    Subscribe,
    Unsubscribe,
}

impl Command {
    pub const ALL: [Command; 15] = [
        Command::Abort,
        Command::Ack,
        Command::Begin,
        Command::Commit,
        Command::Connect,
        Command::Connected,
        Command::Disconnect,
        Command::Error,
        Command::Message,
        Command::Nack,
        Command::Receipt,
        Command::Send,
        Command::Stomp,
        Command::Subscribe,
        Command::Unsubscribe,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Command::Abort => "ABORT",
            Command::Ack => "ACK",
            Command::Begin => "BEGIN",
            Command::Commit => "COMMIT",
            Command::Connect => "CONNECT",
            Command::Connected => "CONNECTED",
            Command::Disconnect => "DISCONNECT",
            Command::Error => "ERROR",
            Command::Message => "MESSAGE",
            Command::Nack => "NACK",
            Command::Receipt => "RECEIPT",
            Command::Send => "SEND",
            Command::Stomp => "STOMP",
            Command::Subscribe => "SUBSCRIBE",
            Command::Unsubscribe => "UNSUBSCRIBE",
        }
    }

    pub fn from_bytes(token: &[u8]) -> Option<Command> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().as_bytes() == token)
    }

    /// Headers required to be present for this command, per the validation matrix.
    pub fn required_headers(&self) -> &'static [super::HeaderName] {
        use super::HeaderName::*;
        match self {
            Command::Connect | Command::Stomp => &[AcceptVersion, Host],
            Command::Connected => &[Version],
            Command::Send => &[Destination],
            Command::Subscribe => &[Destination, Id],
            Command::Unsubscribe => &[Id],
            Command::Ack | Command::Nack => &[Id],
            Command::Begin | Command::Commit | Command::Abort => &[Transaction],
            Command::Message => &[Destination, MessageId, Subscription],
            Command::Error | Command::Receipt | Command::Disconnect => &[],
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
