//! Trip request types.

use std::fmt;
use std::str::FromStr;

use super::error::ValidationError;

/// How a traveller arrives at a stop.
///
/// Parsing is case-insensitive; `Display` always yields the canonical
/// capitalised form the engine's prompt lists (`Flight/Train/Bus/Car`).
///
/// # Examples
///
/// ```
/// use trip_server::domain::TransportMode;
///
/// let mode: TransportMode = "TRAIN".parse().unwrap();
/// assert_eq!(mode, TransportMode::Train);
/// assert_eq!(mode.to_string(), "Train");
///
/// assert!("Boat".parse::<TransportMode>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransportMode {
    Flight,
    Train,
    Bus,
    Car,
}

impl TransportMode {
    /// All modes, in the order the engine lists them.
    pub const ALL: [TransportMode; 4] = [
        TransportMode::Flight,
        TransportMode::Train,
        TransportMode::Bus,
        TransportMode::Car,
    ];

    /// Canonical name as written to the engine.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransportMode::Flight => "Flight",
            TransportMode::Train => "Train",
            TransportMode::Bus => "Bus",
            TransportMode::Car => "Car",
        }
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a transport mode is not one of the four known modes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid transport mode: {0:?}")]
pub struct InvalidMode(pub String);

impl FromStr for TransportMode {
    type Err = InvalidMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        TransportMode::ALL
            .into_iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| InvalidMode(s.to_string()))
    }
}

/// An intermediate waypoint and the mode used to arrive at it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stop {
    pub city: String,
    pub mode: TransportMode,
}

impl Stop {
    pub fn new(city: impl Into<String>, mode: TransportMode) -> Self {
        Self {
            city: city.into(),
            mode,
        }
    }
}

/// A validated trip request.
///
/// Start and end cities are non-empty after trimming. Stops are kept in
/// travel order and may be empty (a direct route).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripRequest {
    start_city: String,
    stops: Vec<Stop>,
    end_city: String,
}

impl TripRequest {
    /// Build a request, trimming every city name.
    pub fn new(
        start_city: &str,
        stops: Vec<Stop>,
        end_city: &str,
    ) -> Result<Self, ValidationError> {
        let start_city = start_city.trim();
        let end_city = end_city.trim();

        if start_city.is_empty() {
            return Err(ValidationError::MissingCity { field: "startCity" });
        }
        if end_city.is_empty() {
            return Err(ValidationError::MissingCity { field: "endCity" });
        }

        let stops = stops
            .into_iter()
            .enumerate()
            .map(|(index, stop)| {
                let city = stop.city.trim();
                if city.is_empty() {
                    Err(ValidationError::EmptyStop { index })
                } else {
                    Ok(Stop::new(city, stop.mode))
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            start_city: start_city.to_string(),
            stops,
            end_city: end_city.to_string(),
        })
    }

    pub fn start_city(&self) -> &str {
        &self.start_city
    }

    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    pub fn end_city(&self) -> &str {
        &self.end_city
    }

    /// Mode of the leg arriving at the end city.
    ///
    /// The protocol has no separate field for it: the last stop's mode is
    /// reused. A direct trip has no final-leg mode.
    pub fn final_leg_mode(&self) -> Option<TransportMode> {
        self.stops.last().map(|s| s.mode)
    }
}
