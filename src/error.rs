//! Error type for tour optimization requests.

/// Reasons an optimization request is rejected before any generation runs.
///
/// Every failure is detected up front; a run that returns `Err` has produced
/// no partial result.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TourError {
    #[error("InsufficientPoints: at least 2 points are required, got {count}")]
    InsufficientPoints { count: usize },
    #[error("InvalidParameter: {field} {reason}")]
    InvalidParameter { field: &'static str, reason: String },
    #[error("InvalidCoordinate: point {id} has lon={lon}, lat={lat}")]
    InvalidCoordinate { id: String, lon: f64, lat: f64 },
    #[error("DuplicatePoint: id {id} appears more than once")]
    DuplicatePoint { id: String },
}

impl TourError {
    pub(crate) fn invalid_parameter(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            field,
            reason: reason.into(),
        }
    }

    /// Name of the offending parameter, if this is a parameter error.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::InvalidParameter { field, .. } => Some(field),
            _ => None,
        }
    }
}
