// ABOUTME: The closed set of STOMP 1.2 header names this implementation understands.
// ABOUTME: A header key outside this set is InvalidHeaderKey.

use std::fmt;

/// A STOMP 1.2 header name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeaderName {
    AcceptVersion,
    Ack,
    ContentLength,
    ContentType,
    Destination,
    HeartBeat,
    Host,
    Id,
    Login,
    Message,
    MessageId,
    Passcode,
    Receipt,
    ReceiptId,
    Session,
    Subscription,
    Transaction,
    Server,
    Version,
}

impl HeaderName {
    pub const ALL: [HeaderName; 19] = [
        HeaderName::AcceptVersion,
        HeaderName::Ack,
        HeaderName::ContentLength,
        HeaderName::ContentType,
        HeaderName::Destination,
        HeaderName::HeartBeat,
        HeaderName::Host,
        HeaderName::Id,
        HeaderName::Login,
        HeaderName::Message,
        HeaderName::MessageId,
        HeaderName::Passcode,
        HeaderName::Receipt,
        HeaderName::ReceiptId,
        HeaderName::Session,
        HeaderName::Subscription,
        HeaderName::Transaction,
        HeaderName::Server,
        HeaderName::Version,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HeaderName::AcceptVersion => "accept-version",
            HeaderName::Ack => "ack",
            HeaderName::ContentLength => "content-length",
            HeaderName::ContentType => "content-type",
            HeaderName::Destination => "destination",
            HeaderName::HeartBeat => "heart-beat",
            HeaderName::Host => "host",
            HeaderName::Id => "id",
            HeaderName::Login => "login",
            HeaderName::Message => "message",
            HeaderName::MessageId => "message-id",
            HeaderName::Passcode => "passcode",
            HeaderName::Receipt => "receipt",
            HeaderName::ReceiptId => "receipt-id",
            HeaderName::Session => "session",
            HeaderName::Subscription => "subscription",
            HeaderName::Transaction => "transaction",
            HeaderName::Server => "server",
            HeaderName::Version => "version",
        }
    }

    pub fn from_bytes(key: &[u8]) -> Option<HeaderName> {
        Self::ALL.into_iter().find(|h| h.as_str().as_bytes() == key)
    }
}

impl fmt::Display for HeaderName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
