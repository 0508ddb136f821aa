//! Trip plan types decoded from engine output.

use serde::Serialize;

/// One leg of an itinerary.
///
/// All fields are display strings exactly as the engine printed them
/// (trimmed). Distance, time and cost carry whatever unit markers the
/// engine emits and are never parsed as numbers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TravelSegment {
    pub from: String,
    pub to: String,
    pub mode: String,
    pub distance: String,
    pub time: String,
    pub cost: String,
}

/// Aggregate figures for the whole itinerary.
///
/// Each field is empty when the engine output had no usable totals line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub distance: String,
    pub time: String,
    pub cost: String,
}

impl Totals {
    /// Whether no totals were recovered.
    pub fn is_unknown(&self) -> bool {
        self.distance.is_empty() && self.time.is_empty() && self.cost.is_empty()
    }
}

/// A decoded itinerary. No segments means no route was found.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TripPlan {
    pub segments: Vec<TravelSegment>,
    pub totals: Totals,
}

impl TripPlan {
    pub fn is_no_route(&self) -> bool {
        self.segments.is_empty()
    }
}
