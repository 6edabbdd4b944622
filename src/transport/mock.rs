// ABOUTME: In-memory TransportIo double, backed by a duplex pipe instead of a real socket.
// ABOUTME: Used only by transport unit tests; carries no WebSocket framing of its own.

use tokio::io::{AsyncReadExt, AsyncWriteExt, DuplexStream};
use tokio::sync::Mutex;

use crate::transport::error::TransportError;
use crate::transport::io::{TransportIo, WsConnection};

const BUFFER_SIZE: usize = 4096;

/// A `TransportIo` whose `resolve`/`connect` are no-ops and whose `handshake`
/// immediately hands over one end of an in-memory duplex pipe, the other end
/// of which is returned to the test for driving the "remote" side directly.
pub struct DuplexTransportIo {
    stream: Mutex<Option<DuplexStream>>,
}

impl DuplexTransportIo {
    pub fn pair() -> (DuplexTransportIo, DuplexStream) {
        let (local, remote) = tokio::io::duplex(BUFFER_SIZE);
        (
            DuplexTransportIo {
                stream: Mutex::new(Some(local)),
            },
            remote,
        )
    }
}

impl TransportIo for DuplexTransportIo {
    type Addr = ();
    type RawSocket = ();
    type Connection = DuplexConnection;

    async fn resolve(&self, _host: &str, _port: u16) -> Result<(), TransportError> {
        Ok(())
    }

    async fn connect(&self, _addr: ()) -> Result<(), TransportError> {
        Ok(())
    }

    async fn handshake(&self, _socket: (), _host: &str, _path: &str) -> Result<DuplexConnection, TransportError> {
        let stream = self
            .stream
            .lock()
            .await
            .take()
            .expect("DuplexTransportIo::handshake called more than once");
        Ok(DuplexConnection { stream })
    }
}

pub struct DuplexConnection {
    stream: DuplexStream,
}

impl WsConnection for DuplexConnection {
    async fn read(&mut self) -> Result<String, TransportError> {
        let mut buf = vec![0u8; BUFFER_SIZE];
        let n = self
            .stream
            .read(&mut buf)
            .await
            .map_err(TransportError::ReadError)?;
        if n == 0 {
            return Err(TransportError::OperationAborted);
        }
        Ok(String::from_utf8_lossy(&buf[..n]).into_owned())
    }

    async fn write(&mut self, text: &str) -> Result<usize, TransportError> {
        self.stream
            .write_all(text.as_bytes())
            .await
            .map_err(TransportError::WriteError)?;
        Ok(text.len())
    }

    async fn close(&mut self) -> Result<(), TransportError> {
        self.stream.shutdown().await.map_err(TransportError::CloseError)
    }
}
