// ABOUTME: Zero-copy STOMP 1.2 frame parser, validator and serializer.
// ABOUTME: All header and body values are Bytes slices sharing the refcount of the input buffer.

use bytes::{Bytes, BytesMut};

use super::{Command, HeaderName, StompError};

/// A single parsed and validated STOMP frame: `(command, headers, body)`.
///
/// Constructed either by [`Frame::parse`] or directly via [`Frame::new`] (for
/// building a frame to hand to [`Frame::serialize`]). Once built, a `Frame`
/// is immutable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    command: Command,
    headers: Vec<(HeaderName, Bytes)>,
    body: Bytes,
}

impl Frame {
    /// Build a frame directly, bypassing the wire parser.
    ///
    /// Headers are kept in the order given; `header_lookup` returns the
    /// first match, matching `parse`'s first-occurrence-wins rule.
    pub fn new(command: Command, headers: Vec<(HeaderName, Bytes)>, body: Bytes) -> Frame {
        Frame {
            command,
            headers,
            body,
        }
    }

    pub fn command(&self) -> Command {
        self.command
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// O(1) for all practical purposes: linear scan over a 19-entry closed
    /// header set, first occurrence wins.
    pub fn header(&self, name: HeaderName) -> Option<&Bytes> {
        self.headers
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value)
    }

    pub fn iter_headers(&self) -> impl Iterator<Item = (&HeaderName, &Bytes)> {
        self.headers.iter().map(|(k, v)| (k, v))
    }

    /// Parse and validate one frame out of `buf`.
    ///
    /// `buf` becomes the single owned allocation backing every header value
    /// and the body; they are returned as ref-counted `Bytes` slices into it.
    pub fn parse(buf: impl Into<Bytes>) -> Result<Frame, StompError> {
        let buf: Bytes = buf.into();
        let frame = parse_structural(&buf)?;
        validate(&frame)?;
        Ok(frame)
    }

    /// Structural inverse of `parse`: command line, headers in stored order,
    /// blank line, body, trailing NUL. Does not synthesize a `content-length`
    /// header that wasn't already present, so that `parse(serialize(f))`
    /// round-trips `f` exactly.
    pub fn serialize(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(
            self.command.as_str().len() + self.body.len() + 32 * self.headers.len() + 2,
        );
        buf.extend_from_slice(self.command.as_str().as_bytes());
        buf.extend_from_slice(b"\n");
        for (key, value) in &self.headers {
            buf.extend_from_slice(key.as_str().as_bytes());
            buf.extend_from_slice(b":");
            buf.extend_from_slice(value);
            buf.extend_from_slice(b"\n");
        }
        buf.extend_from_slice(b"\n");
        buf.extend_from_slice(&self.body);
        buf.extend_from_slice(&[0]);
        buf.freeze()
    }
}

fn find_from(buf: &[u8], from: usize, needle: u8) -> Option<usize> {
    buf[from..].iter().position(|&b| b == needle).map(|rel| from + rel)
}

fn parse_structural(buf: &Bytes) -> Result<Frame, StompError> {
    // 1. command line
    let command_lf = find_from(buf, 0, b'\n').ok_or(StompError::MissingEolAfterCommand)?;
    let command = Command::from_bytes(&buf[..command_lf]).ok_or(StompError::InvalidCommand)?;
    let mut cursor = command_lf + 1;

    // 2. headers
    let mut headers: Vec<(HeaderName, Bytes)> = Vec::new();
    loop {
        if cursor >= buf.len() {
            return Err(StompError::MissingBlankLineAfterHeaders);
        }
        if buf[cursor] == b'\n' {
            cursor += 1;
            break;
        }

        let line_lf = find_from(buf, cursor, b'\n').ok_or(StompError::MissingEolAfterHeaderValue)?;
        let colon = find_from(&buf[cursor..line_lf], 0, b':').map(|rel| cursor + rel);
        let colon = match colon {
            Some(c) => c,
            None => return Err(StompError::InvalidHeaderFormat),
        };

        let key = &buf[cursor..colon];
        let value_range = colon + 1..line_lf;

        if key.is_empty() {
            return Err(StompError::InvalidEmptyKeyHeader);
        }
        if value_range.is_empty() {
            return Err(StompError::InvalidEmptyValueHeader);
        }
        let name = HeaderName::from_bytes(key).ok_or(StompError::InvalidHeaderKey)?;

        if !headers.iter().any(|(k, _)| *k == name) {
            headers.push((name, buf.slice(value_range)));
        }

        cursor = line_lf + 1;
    }

    // 3/4. body
    let declared_content_length = match headers
        .iter()
        .find(|(k, _)| *k == HeaderName::ContentLength)
    {
        Some((_, value)) => {
            let text =
                std::str::from_utf8(value).map_err(|_| StompError::InvalidContentLengthValueType)?;
            let len = text
                .parse::<usize>()
                .map_err(|_| StompError::InvalidContentLengthValueType)?;
            Some(len)
        }
        None => None,
    };

    let body_end = match declared_content_length {
        Some(declared) => {
            let nul_pos = cursor.checked_add(declared).ok_or(StompError::ContentLengthMismatch)?;
            if nul_pos >= buf.len() || buf[nul_pos] != 0 {
                return Err(StompError::ContentLengthMismatch);
            }
            nul_pos
        }
        None => find_from(buf, cursor, 0).ok_or(StompError::MissingNullAtEndOfBody)?,
    };

    let body = buf.slice(cursor..body_end);
    let after_nul = body_end + 1;
    if after_nul != buf.len() {
        return Err(StompError::JunkAfterBody);
    }

    Ok(Frame {
        command,
        headers,
        body,
    })
}

fn validate(frame: &Frame) -> Result<(), StompError> {
    for required in frame.command.required_headers() {
        if frame.header(*required).is_none() {
            return Err(StompError::MissingRequiredHeaders);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &'static str) -> Result<Frame, StompError> {
        Frame::parse(Bytes::from_static(input.as_bytes()))
    }

    #[test]
    fn well_formed_connect() {
        let frame = parse("CONNECT\naccept-version:42\nhost:host.com\n\nFrame body\0").unwrap();
        assert_eq!(frame.command(), Command::Connect);
        assert_eq!(frame.body().as_ref(), b"Frame body");
    }

    #[test]
    fn invalid_command() {
        let err = parse("CONNECTO\naccept-version:42\nhost:host.com\n\nFrame body\0").unwrap_err();
        assert_eq!(err, StompError::InvalidCommand);
    }

    #[test]
    fn invalid_header_key() {
        let err =
            parse("CONNECT\naccept-versioning:42\nhost:host.com\n\nFrame body\0").unwrap_err();
        assert_eq!(err, StompError::InvalidHeaderKey);
    }

    #[test]
    fn content_length_mismatch() {
        let err = parse(
            "CONNECT\naccept-version:42\nhost:host.com\ncontent-length:10\n\nFrame body11\0",
        )
        .unwrap_err();
        assert_eq!(err, StompError::ContentLengthMismatch);
    }

    #[test]
    fn junk_after_body() {
        let err = parse("CONNECT\naccept-version:42\nhost:host.com\n\nFrame body\0abc").unwrap_err();
        assert_eq!(err, StompError::JunkAfterBody);
    }

    #[test]
    fn missing_eol_after_command() {
        let err = parse("CONNECT").unwrap_err();
        assert_eq!(err, StompError::MissingEolAfterCommand);
    }

    #[test]
    fn missing_required_headers() {
        let err = parse("CONNECT\nhost:host.com\n\nbody\0").unwrap_err();
        assert_eq!(err, StompError::MissingRequiredHeaders);
    }

    #[test]
    fn duplicate_header_first_wins() {
        let frame = parse(
            "SEND\ndestination:/queue/a\ndestination:/queue/b\n\n\0",
        )
        .unwrap();
        assert_eq!(
            frame.header(HeaderName::Destination).unwrap().as_ref(),
            b"/queue/a"
        );
    }

    #[test]
    fn content_length_permits_embedded_nul() {
        let frame = parse("SEND\ndestination:/q\ncontent-length:3\n\na\0b\0").unwrap();
        assert_eq!(frame.body().as_ref(), b"a\0b");
    }

    #[test]
    fn empty_header_key_rejected() {
        let err = parse("CONNECT\n:value\n\nbody\0").unwrap_err();
        assert_eq!(err, StompError::InvalidEmptyKeyHeader);
    }

    #[test]
    fn empty_header_value_rejected() {
        let err = parse("CONNECT\nhost:\n\nbody\0").unwrap_err();
        assert_eq!(err, StompError::InvalidEmptyValueHeader);
    }

    #[test]
    fn round_trip_preserves_command_headers_and_body() {
        let original = Frame::new(
            Command::Message,
            vec![
                (HeaderName::Destination, Bytes::from_static(b"/topic/a")),
                (HeaderName::MessageId, Bytes::from_static(b"42")),
                (HeaderName::Subscription, Bytes::from_static(b"0")),
            ],
            Bytes::from_static(b"payload"),
        );
        let bytes = original.serialize();
        let parsed = Frame::parse(bytes).unwrap();
        assert_eq!(parsed.command(), original.command());
        assert_eq!(parsed.body(), original.body());
        for (name, value) in original.iter_headers() {
            assert_eq!(parsed.header(*name), Some(value));
        }
    }

    #[test]
    fn serialize_does_not_synthesize_content_length() {
        let frame = Frame::new(Command::Send, vec![
            (HeaderName::Destination, Bytes::from_static(b"/q")),
        ], Bytes::from_static(b"hi"));
        let bytes = frame.serialize();
        assert!(!bytes.windows(14).any(|w| w == b"content-length"));
    }
}
