// ABOUTME: Converts a declarative network-layout document (already-parsed JSON) into a
// ABOUTME: populated TransportNetwork: stations, then lines with routes, then travel times.

mod error;

use serde::Deserialize;
use serde_json::Value;

pub use error::LoaderError;

use crate::network::{Line, Route, Station, TransportNetwork};

#[derive(Debug, Deserialize)]
struct Document {
    #[serde(default)]
    stations: Vec<StationDoc>,
    #[serde(default)]
    lines: Vec<LineDoc>,
    #[serde(default)]
    travel_times: Vec<TravelTimeDoc>,
}

#[derive(Debug, Deserialize)]
struct StationDoc {
    station_id: String,
    name: String,
}

#[derive(Debug, Deserialize)]
struct RouteDoc {
    route_id: String,
    direction: String,
    line_id: String,
    start_station_id: String,
    end_station_id: String,
    route_stops: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct LineDoc {
    line_id: String,
    name: String,
    routes: Vec<RouteDoc>,
}

#[derive(Debug, Deserialize)]
struct TravelTimeDoc {
    #[allow(dead_code)]
    line_id: String,
    #[allow(dead_code)]
    route_id: String,
    start_station_id: String,
    end_station_id: String,
    travel_time: u32,
}

/// Populate a fresh [`TransportNetwork`] from a parsed JSON document tree.
///
/// On any failure the network built so far is dropped rather than returned;
/// the caller is expected to discard it rather than rely on partial state.
pub fn load_network(document: Value) -> Result<TransportNetwork, LoaderError> {
    let document: Document =
        serde_json::from_value(document).map_err(|e| LoaderError::MalformedDocument(e.to_string()))?;

    let mut network = TransportNetwork::new();

    for station in document.stations {
        network.add_station(Station {
            id: station.station_id,
            name: station.name,
        })?;
    }

    for line in document.lines {
        let routes = line
            .routes
            .into_iter()
            .map(|r| Route {
                id: r.route_id,
                direction: r.direction,
                line_id: r.line_id,
                start_station_id: r.start_station_id,
                end_station_id: r.end_station_id,
                stops: r.route_stops,
            })
            .collect();
        network.add_line(Line {
            id: line.line_id,
            name: line.name,
            routes,
        })?;
    }

    for travel_time in document.travel_times {
        network.set_travel_time(
            &travel_time.start_station_id,
            &travel_time.end_station_id,
            travel_time.travel_time,
        )?;
    }

    if let Some((from, to)) = network.first_non_positive_edge() {
        return Err(LoaderError::NonPositiveTravelTime(from, to));
    }

    Ok(network)
}
