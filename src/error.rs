use std::fmt;

use thiserror::Error;

use crate::grid::Position;

/// Convenient result alias for the pathfinder library.
pub type Result<T> = std::result::Result<T, Error>;

/// Which end of the search a rejected position was supplied for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Start,
    Goal,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Start => f.write_str("start"),
            Endpoint::Goal => f.write_str("goal"),
        }
    }
}

/// Why an endpoint was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointFault {
    OutOfBounds,
    Obstacle,
}

impl fmt::Display for EndpointFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EndpointFault::OutOfBounds => f.write_str("lies outside the grid"),
            EndpointFault::Obstacle => f.write_str("is an obstacle"),
        }
    }
}

/// Top-level library error type.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// Raised when a grid is built with a non-positive side length.
    #[error("grid size must be positive, got {size}")]
    InvalidSize { size: usize },

    /// Raised when the start or goal cannot take part in a search.
    #[error("{role} {position} {reason}")]
    InvalidEndpoint {
        role: Endpoint,
        position: Position,
        reason: EndpointFault,
    },

    /// Raised when configuration names a cell the grid does not have.
    #[error("coordinate {position} is outside a {size}x{size} grid")]
    CoordinateOutOfBounds { position: Position, size: usize },

    /// Raised when configuration places an obstacle on the start or goal.
    #[error("obstacle at {position} overlaps the start or goal")]
    ObstacleOnEndpoint { position: Position },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_errors_name_the_role_and_reason() {
        let err = Error::InvalidEndpoint {
            role: Endpoint::Goal,
            position: Position::new(3, 4),
            reason: EndpointFault::Obstacle,
        };
        assert_eq!(err.to_string(), "goal (3, 4) is an obstacle");
    }

    #[test]
    fn size_error_reports_value() {
        let err = Error::InvalidSize { size: 0 };
        assert!(err.to_string().contains("got 0"));
    }
}
