// ABOUTME: Errors raised while turning a network-layout document into TransportNetwork calls.

use crate::network::NetworkError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("document field '{0}' is missing or has the wrong type")]
    MalformedDocument(String),

    #[error(transparent)]
    Network(#[from] NetworkError),

    #[error("after loading, edge {0} -> {1} has a non-positive travel time")]
    NonPositiveTravelTime(String, String),
}
