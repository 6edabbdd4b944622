// ABOUTME: Connects to a STOMP-over-secure-WebSocket feed, subscribes to a
// ABOUTME: destination, and prints every inbound frame body to stdout.

use std::error::Error;

use argh::FromArgs;
use bytes::Bytes;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;
use transit_monitor::stomp::{Command, Frame, HeaderName};
use transit_monitor::transport::{RealTransportIo, WebSocketClient};

/// Subscribe to a STOMP feed over a secure WebSocket and print inbound frames
#[derive(FromArgs)]
struct CliArgs {
    /// whether or not to enable debugging
    #[argh(switch, short = 'd')]
    debugging: bool,

    /// feed hostname (default: localhost)
    #[argh(option)]
    host: Option<String>,

    /// feed port (default: 443)
    #[argh(option, short = 'p')]
    port: Option<u16>,

    /// WebSocket resource path (default: /feed)
    #[argh(option)]
    path: Option<String>,

    /// STOMP destination to subscribe to (default: /topic/network-layout)
    #[argh(option)]
    destination: Option<String>,

    /// path to a PEM file of CA certificates to trust
    #[argh(option)]
    ca_cert: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli_args: CliArgs = argh::from_env();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(if cli_args.debugging { Level::DEBUG } else { Level::INFO })
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let host = cli_args.host.unwrap_or_else(|| "localhost".to_owned());
    let port = cli_args.port.unwrap_or(443);
    let path = cli_args.path.unwrap_or_else(|| "/feed".to_owned());
    let destination = cli_args.destination.unwrap_or_else(|| "/topic/network-layout".to_owned());

    info!("Connecting to wss://{host}:{port}{path}");

    let io = RealTransportIo::new(std::path::Path::new(&cli_args.ca_cert))?;
    let client = WebSocketClient::spawn(io, host.clone(), port, path);

    let (ready_tx, ready_rx) = tokio::sync::oneshot::channel();
    let subscribe_destination = destination.clone();
    client.connect(
        Some(Box::new(move |err| {
            let _ = ready_tx.send(err);
        })),
        Some(Box::new(move |frame| match frame {
            Ok(text) => match Frame::parse(Bytes::from(text.into_bytes())) {
                Ok(frame) if frame.command() == Command::Message => {
                    println!("{}", String::from_utf8_lossy(frame.body()));
                }
                Ok(frame) => info!(command = %frame.command(), "ignoring non-MESSAGE frame"),
                Err(e) => error!(error = %e, "malformed STOMP frame on feed"),
            },
            Err(e) => error!(error = %e, "feed read failed"),
        })),
        Some(Box::new(|err| {
            error!(?err, "feed disconnected unexpectedly");
        })),
    );

    if let Some(err) = ready_rx.await? {
        error!(error = %err, "connect failed");
        return Err(Box::new(err));
    }
    info!("Connected, subscribing to {subscribe_destination}");

    let subscribe_frame = Frame::new(
        Command::Subscribe,
        vec![
            (HeaderName::Destination, Bytes::from(subscribe_destination)),
            (HeaderName::Id, Bytes::from_static(b"0")),
        ],
        Bytes::new(),
    );
    client.send(String::from_utf8_lossy(&subscribe_frame.serialize()).into_owned(), None);

    tokio::signal::ctrl_c().await?;
    info!("Shutting down");

    let (closed_tx, closed_rx) = tokio::sync::oneshot::channel();
    client.close(Some(Box::new(move |err| {
        let _ = closed_tx.send(err);
    })));
    let _ = closed_rx.await;

    Ok(())
}
