// ABOUTME: WebSocketClient: a single-strand actor reached only through its command
// ABOUTME: channel, carrying the Idle->...->Open->Closing->Closed/Failed state machine.

use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::transport::callbacks::{OnClose, OnConnect, OnDisconnect, OnMessage, OnSend};
use crate::transport::error::TransportError;
use crate::transport::io::{TransportIo, WsConnection};

/// Where a session currently sits in its lifecycle.
///
/// `Failed` is terminal and reached from any of the handshake or open states;
/// the error that caused it is delivered to the relevant callback rather than
/// carried on the state value itself, since nothing outside the strand ever
/// inspects this enum directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Resolving,
    Connecting,
    Handshaking,
    Open,
    Closing,
    Closed,
    Failed,
}

enum Command {
    Connect {
        on_connect: Option<OnConnect>,
        on_message: Option<OnMessage>,
        on_disconnect: Option<OnDisconnect>,
    },
    Send {
        text: String,
        on_send: Option<OnSend>,
    },
    Close {
        on_close: Option<OnClose>,
    },
}

/// A handle to a WebSocket session running on its own `tokio::task`.
///
/// All operations are fire-and-forget: they hand a command to the strand
/// and return immediately, with results delivered later through the
/// caller-supplied callback. Cloning a handle is cheap and all clones share
/// the same underlying strand.
#[derive(Clone)]
pub struct WebSocketClient {
    commands: mpsc::UnboundedSender<Command>,
}

impl WebSocketClient {
    /// Spawns the strand and returns a handle to it. `host` is used both for
    /// DNS resolution and TLS SNI / WebSocket `Host:`; `path` is the resource
    /// path of the feed endpoint (e.g. `/network/v1/stomp`).
    pub fn spawn<T: TransportIo>(io: T, host: impl Into<String>, port: u16, path: impl Into<String>) -> WebSocketClient {
        let (tx, rx) = mpsc::unbounded_channel();
        let strand = Strand {
            io,
            host: host.into(),
            port,
            path: path.into(),
            state: SessionState::Idle,
            commands: rx,
        };
        tokio::spawn(strand.run());
        WebSocketClient { commands: tx }
    }

    /// Requests a connection. `on_connect` fires exactly once with `None` on
    /// success or `Some(error)` on failure. `on_message` is installed as the
    /// handler for every subsequent inbound frame and fires until the
    /// session closes or fails. `on_disconnect` fires exactly once if the
    /// session leaves `Open` on its own (remote-initiated close or aborted
    /// read) rather than through a caller-initiated `close()`.
    pub fn connect(&self, on_connect: Option<OnConnect>, on_message: Option<OnMessage>, on_disconnect: Option<OnDisconnect>) {
        let _ = self.commands.send(Command::Connect {
            on_connect,
            on_message,
            on_disconnect,
        });
    }

    /// Requests that `text` be written to the socket. No-op (logged) if the
    /// session is not currently `Open`.
    pub fn send(&self, text: impl Into<String>, on_send: Option<OnSend>) {
        let _ = self.commands.send(Command::Send {
            text: text.into(),
            on_send,
        });
    }

    /// Requests a graceful close. `on_close` fires exactly once.
    pub fn close(&self, on_close: Option<OnClose>) {
        let _ = self.commands.send(Command::Close { on_close });
    }
}

struct Strand<T: TransportIo> {
    io: T,
    host: String,
    port: u16,
    path: String,
    state: SessionState,
    commands: mpsc::UnboundedReceiver<Command>,
}

impl<T: TransportIo> Strand<T> {
    async fn run(mut self) {
        let mut connection: Option<T::Connection> = None;
        let mut on_message: Option<OnMessage> = None;
        let mut on_disconnect: Option<OnDisconnect> = None;
        let mut channel_closed = false;

        loop {
            if channel_closed && self.state != SessionState::Open {
                break;
            }

            tokio::select! {
                cmd = self.commands.recv(), if !channel_closed => {
                    match cmd {
                        None => {
                            channel_closed = true;
                        }
                        Some(Command::Connect { on_connect, on_message: handler, on_disconnect: disconnect_handler }) => {
                            on_message = handler;
                            on_disconnect = disconnect_handler;
                            self.do_connect(&mut connection, on_connect).await;
                        }
                        Some(Command::Send { text, on_send }) => {
                            self.do_send(connection.as_mut(), &text, on_send).await;
                        }
                        Some(Command::Close { on_close }) => {
                            self.do_close(&mut connection, on_close).await;
                        }
                    }
                }

                read_result = read_from(connection.as_mut()), if self.state == SessionState::Open && connection.is_some() => {
                    match read_result {
                        Ok(text) => {
                            if let Some(cb) = on_message.as_mut() {
                                cb(Ok(text));
                            }
                        }
                        Err(e) => {
                            warn!(error = %e, "session failed while reading");
                            self.state = SessionState::Failed;
                            let is_disconnect = matches!(e, TransportError::OperationAborted);
                            if let Some(cb) = on_message.as_mut() {
                                cb(Err(e));
                            }
                            if is_disconnect {
                                if let Some(cb) = on_disconnect.take() {
                                    cb(Some(TransportError::OperationAborted));
                                }
                            }
                        }
                    }
                }
            }
        }

        debug!(host = %self.host, "strand exiting");
    }

    async fn do_connect(&mut self, connection: &mut Option<T::Connection>, on_connect: Option<OnConnect>) {
        self.state = SessionState::Resolving;
        let addr = match self.io.resolve(&self.host, self.port).await {
            Ok(addr) => addr,
            Err(e) => return self.fail_connect(on_connect, e),
        };

        self.state = SessionState::Connecting;
        let socket = match self.io.connect(addr).await {
            Ok(socket) => socket,
            Err(e) => return self.fail_connect(on_connect, e),
        };

        self.state = SessionState::Handshaking;
        match self.io.handshake(socket, &self.host, &self.path).await {
            Ok(conn) => {
                *connection = Some(conn);
                self.state = SessionState::Open;
                if let Some(cb) = on_connect {
                    cb(None);
                }
            }
            Err(e) => self.fail_connect(on_connect, e),
        }
    }

    fn fail_connect(&mut self, on_connect: Option<OnConnect>, error: TransportError) {
        warn!(error = %error, "connect failed");
        self.state = SessionState::Failed;
        if let Some(cb) = on_connect {
            cb(Some(error));
        }
    }

    async fn do_send(&mut self, connection: Option<&mut T::Connection>, text: &str, on_send: Option<OnSend>) {
        if self.state != SessionState::Open {
            warn!(state = ?self.state, "send() while not Open, ignoring");
            return;
        }

        let Some(conn) = connection else {
            warn!("send() with no open connection, ignoring");
            return;
        };

        match conn.write(text).await {
            Ok(n) => {
                if let Some(cb) = on_send {
                    cb(Ok(n));
                }
            }
            Err(e) => {
                warn!(error = %e, "write failed");
                self.state = SessionState::Failed;
                if let Some(cb) = on_send {
                    cb(Err(e));
                }
            }
        }
    }

    async fn do_close(&mut self, connection: &mut Option<T::Connection>, on_close: Option<OnClose>) {
        self.state = SessionState::Closing;
        match connection.as_mut() {
            Some(conn) => match conn.close().await {
                Ok(()) => {
                    self.state = SessionState::Closed;
                    if let Some(cb) = on_close {
                        cb(None);
                    }
                }
                Err(e) => {
                    self.state = SessionState::Failed;
                    if let Some(cb) = on_close {
                        cb(Some(e));
                    }
                }
            },
            None => {
                self.state = SessionState::Closed;
                if let Some(cb) = on_close {
                    cb(None);
                }
            }
        }
        *connection = None;
    }
}

async fn read_from<C: WsConnection>(connection: Option<&mut C>) -> Result<String, TransportError> {
    match connection {
        Some(conn) => conn.read().await,
        None => std::future::pending().await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::mock::DuplexTransportIo;
    use std::sync::{Arc, Mutex};
    use tokio::time::{timeout, Duration};

    fn oneshot_flag() -> (Arc<Mutex<Option<Option<TransportError>>>>, Arc<Mutex<Option<Option<TransportError>>>>) {
        let flag = Arc::new(Mutex::new(None));
        (flag.clone(), flag)
    }

    #[tokio::test]
    async fn connect_then_close_fires_callbacks_exactly_once() {
        let (io, _peer) = DuplexTransportIo::pair();
        let client = WebSocketClient::spawn(io, "example.invalid", 443, "/feed");

        let (connected, connected_check) = oneshot_flag();
        client.connect(
            Some(Box::new(move |err| {
                *connected.lock().unwrap() = Some(err);
            })),
            None,
            None,
        );

        timeout(Duration::from_millis(200), async {
            loop {
                if connected_check.lock().unwrap().is_some() {
                    break;
                }
                tokio::task::yield_now().await;
            }
        })
        .await
        .expect("connect callback did not fire");

        assert!(connected_check.lock().unwrap().as_ref().unwrap().is_none());

        let (closed, closed_check) = oneshot_flag();
        client.close(Some(Box::new(move |err| {
            *closed.lock().unwrap() = Some(err);
        })));

        timeout(Duration::from_millis(200), async {
            loop {
                if closed_check.lock().unwrap().is_some() {
                    break;
                }
                tokio::task::yield_now().await;
            }
        })
        .await
        .expect("close callback did not fire");

        assert!(closed_check.lock().unwrap().as_ref().unwrap().is_none());
    }

    #[tokio::test]
    async fn remote_close_fires_on_disconnect_not_on_close() {
        let (io, peer) = DuplexTransportIo::pair();
        let client = WebSocketClient::spawn(io, "example.invalid", 443, "/feed");

        let (connected, connected_check) = oneshot_flag();
        let (disconnected, disconnected_check) = oneshot_flag();
        client.connect(
            Some(Box::new(move |err| {
                *connected.lock().unwrap() = Some(err);
            })),
            None,
            Some(Box::new(move |err| {
                *disconnected.lock().unwrap() = Some(err);
            })),
        );

        timeout(Duration::from_millis(200), async {
            loop {
                if connected_check.lock().unwrap().is_some() {
                    break;
                }
                tokio::task::yield_now().await;
            }
        })
        .await
        .expect("connect callback did not fire");

        drop(peer);

        timeout(Duration::from_millis(200), async {
            loop {
                if disconnected_check.lock().unwrap().is_some() {
                    break;
                }
                tokio::task::yield_now().await;
            }
        })
        .await
        .expect("on_disconnect did not fire after remote close");

        assert!(disconnected_check.lock().unwrap().as_ref().unwrap().is_some());
    }

    #[tokio::test]
    async fn send_before_connect_is_a_no_op() {
        let (io, _peer) = DuplexTransportIo::pair();
        let client = WebSocketClient::spawn(io, "example.invalid", 443, "/feed");

        let fired = Arc::new(Mutex::new(false));
        let fired_clone = fired.clone();
        client.send("hello", Some(Box::new(move |_| *fired_clone.lock().unwrap() = true)));

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(!*fired.lock().unwrap(), "on_send must not fire for a no-op send");
    }
}
