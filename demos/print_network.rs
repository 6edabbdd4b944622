// ABOUTME: Loads a network-layout JSON document from disk and prints a summary:
// ABOUTME: station/line/route counts and the travel time along one route.

use std::error::Error;
use std::fs;

use argh::FromArgs;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;
use transit_monitor::load_network;

/// Load a network-layout document and print a summary of what it describes
#[derive(FromArgs)]
struct CliArgs {
    /// whether or not to enable debugging
    #[argh(switch, short = 'd')]
    debugging: bool,

    /// path to the network-layout JSON document
    #[argh(positional)]
    layout_path: String,

    /// print the travel time between these two stations on the named
    /// line/route, formatted as "line_id/route_id/from/to"
    #[argh(option)]
    travel_time: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli_args: CliArgs = argh::from_env();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(if cli_args.debugging { Level::DEBUG } else { Level::INFO })
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let raw = fs::read_to_string(&cli_args.layout_path)?;
    let document: serde_json::Value = serde_json::from_str(&raw)?;

    info!("Loading network layout from {}", cli_args.layout_path);
    let network = load_network(document)?;

    println!("all edges positive travel time: {}", network.all_edges_have_positive_travel_time());

    if let Some(query) = cli_args.travel_time {
        let parts: Vec<&str> = query.split('/').collect();
        let [line_id, route_id, from, to] = parts[..] else {
            return Err("--travel-time expects line_id/route_id/from/to".into());
        };
        let seconds = network.travel_time(line_id, route_id, from, to);
        println!("travel time {from} -> {to} on {route_id}: {seconds}");
    }

    Ok(())
}
