use std::fmt;
use thiserror::Error;

use crate::coordinate::Axis;

/// Which end of the trip a query was meant to resolve.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Endpoint {
    Start,
    Destination,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Start => write!(f, "start"),
            Endpoint::Destination => write!(f, "destination"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CorridorError {
    // Per-row and non-fatal: the row is skipped and counted.
    #[error("could not parse {axis} coordinate {raw:?}: {reason}")]
    MalformedCoordinate {
        axis: Axis,
        raw: String,
        reason: String,
    },

    #[error("no place matches {query:?}")]
    PlaceNotFound { query: String },

    // Fatal for the query: nothing is classified without both endpoints.
    #[error("{endpoint} not found in dataset: no place name or address contains {query:?}")]
    RouteEndpointNotFound { endpoint: Endpoint, query: String },

    #[error("near-destination radius must be a finite, non-negative number of km, got {0}")]
    InvalidRadius(f64),
}

pub type Result<T> = std::result::Result<T, CorridorError>;
