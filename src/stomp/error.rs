// ABOUTME: Error taxonomy for STOMP frame parsing and header validation.
// ABOUTME: Parsing and validation share this single error kind (one kind per frame outcome).

use thiserror::Error;

/// Everything that can go wrong turning a byte buffer into a validated [`super::Frame`].
///
/// Parsing is total: every input yields either a frame or exactly one of these.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StompError {
    #[error("no LF found before end of buffer while reading the command line")]
    MissingEolAfterCommand,

    #[error("command token is not a recognized STOMP command")]
    InvalidCommand,

    #[error("header line has no ':' separator before its LF")]
    InvalidHeaderFormat,

    #[error("no LF found after a header value")]
    MissingEolAfterHeaderValue,

    #[error("header key is empty")]
    InvalidEmptyKeyHeader,

    #[error("header value is empty")]
    InvalidEmptyValueHeader,

    #[error("header key is not in the recognized header set")]
    InvalidHeaderKey,

    #[error("reached end of buffer before the blank line terminating the headers")]
    MissingBlankLineAfterHeaders,

    #[error("no NUL byte found to terminate the body")]
    MissingNullAtEndOfBody,

    #[error("bytes found after the terminating NUL")]
    JunkAfterBody,

    #[error("content-length value is not a non-negative decimal integer")]
    InvalidContentLengthValueType,

    #[error("content-length value does not match the observed body length")]
    ContentLengthMismatch,

    #[error("a required header for this command is missing")]
    MissingRequiredHeaders,

    #[error("content-length header is invalid")]
    InvalidContentLen,
}
