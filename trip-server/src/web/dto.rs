//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::cities::City;
use crate::domain::{Stop, TransportMode, TripPlan, TripRequest, ValidationError};

/// Request to plan a trip.
///
/// Missing cities deserialize as empty strings so they are reported as
/// validation errors rather than malformed JSON.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanTripRequest {
    /// Starting city
    #[serde(default)]
    pub start_city: String,

    /// Declared number of stops; must equal `stops.len()` when present
    pub num_stops: Option<usize>,

    /// Intermediate stops in travel order
    #[serde(default)]
    pub stops: Vec<StopRequest>,

    /// Destination city
    #[serde(default)]
    pub end_city: String,
}

/// An intermediate stop in a trip request.
#[derive(Debug, Deserialize)]
pub struct StopRequest {
    /// Stop city
    #[serde(default)]
    pub city: String,

    /// Mode used to reach this stop (Flight, Train, Bus or Car)
    #[serde(default)]
    pub mode: String,
}

impl PlanTripRequest {
    /// Validate and convert into a domain request.
    pub fn into_trip_request(self) -> Result<TripRequest, ValidationError> {
        if let Some(declared) = self.num_stops
            && declared != self.stops.len()
        {
            return Err(ValidationError::StopCountMismatch {
                declared,
                actual: self.stops.len(),
            });
        }

        let stops = self
            .stops
            .into_iter()
            .enumerate()
            .map(|(index, stop)| {
                let mode = stop
                    .mode
                    .parse::<TransportMode>()
                    .map_err(|_| ValidationError::InvalidMode {
                        index,
                        mode: stop.mode.clone(),
                    })?;
                Ok(Stop::new(stop.city, mode))
            })
            .collect::<Result<Vec<_>, ValidationError>>()?;

        TripRequest::new(&self.start_city, stops, &self.end_city)
    }
}

/// Response for a planned trip.
#[derive(Debug, Serialize)]
pub struct PlanTripResponse {
    /// Raw engine output, verbatim
    pub output: String,

    /// Decoded itinerary
    pub plan: TripPlan,
}

/// Request to search cities for autocomplete.
#[derive(Debug, Deserialize)]
pub struct CitySearchRequest {
    /// Search query
    #[serde(default)]
    pub q: String,

    /// Maximum number of results (default 10, max 50)
    pub limit: Option<usize>,
}

/// A city in search results.
#[derive(Debug, Serialize)]
pub struct CitySearchResult {
    pub country: String,
    pub city: String,
    /// "city, country", as shown in the suggestion list
    pub label: String,
}

impl From<City> for CitySearchResult {
    fn from(city: City) -> Self {
        Self {
            label: city.label(),
            country: city.country,
            city: city.name,
        }
    }
}

/// Response for city search.
#[derive(Debug, Serialize)]
pub struct CitySearchResponse {
    pub cities: Vec<CitySearchResult>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}
