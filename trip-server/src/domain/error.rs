//! Domain error types.
//!
//! These errors represent a trip request that cannot be sent to the
//! engine. They are raised before any subprocess work starts.

/// Validation failures for an incoming trip request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Start or end city missing or blank
    #[error("{field} is required")]
    MissingCity { field: &'static str },

    /// An intermediate stop has a blank city
    #[error("stop {} has no city", .index + 1)]
    EmptyStop { index: usize },

    /// Declared stop count disagrees with the stops supplied
    #[error("numStops is {declared} but {actual} stops were supplied")]
    StopCountMismatch { declared: usize, actual: usize },

    /// A stop's transport mode is not Flight, Train, Bus or Car
    #[error("stop {} has invalid transport mode {mode:?}", .index + 1)]
    InvalidMode { index: usize, mode: String },
}
