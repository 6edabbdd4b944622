// ABOUTME: Error taxonomy for mutating and querying the in-memory transport network graph.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NetworkError {
    #[error("station '{0}' is already part of the network")]
    DuplicateStation(String),

    #[error("line '{0}' is already part of the network")]
    DuplicateLine(String),

    #[error("route '{0}' is already part of its line")]
    DuplicateRoute(String),

    #[error("station '{0}' is not part of the network")]
    UnknownStation(String),

    #[error("stations '{0}' and '{1}' are not adjacent on any route")]
    NotAdjacent(String, String),
}
