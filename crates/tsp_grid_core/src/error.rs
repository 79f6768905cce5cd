use thiserror::Error as ThisError;

use crate::point::Point;

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("invalid data: {0}")]
    InvalidData(String),
    #[error("invalid coordinate: expected 2 components, got {len}")]
    InvalidCoordinate { len: usize },
    #[error("points must form a 2-dimensional collection, got {dims} components per row")]
    InputShape { dims: usize },
    #[error("point {x},{y} lies outside every lattice cell")]
    UnassignedPoint { x: f64, y: f64 },
    #[error("no lattice cell has any members")]
    EmptyLattice,
    #[error("no tour available yet; navigation has not run")]
    NoResult,
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn invalid_data(message: impl Into<String>) -> Self {
        Self::InvalidData(message.into())
    }

    pub fn unassigned(point: &Point) -> Self {
        Self::UnassignedPoint {
            x: point.x,
            y: point.y,
        }
    }
}
