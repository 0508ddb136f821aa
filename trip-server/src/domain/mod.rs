//! Domain types for the trip planner.
//!
//! `TripRequest` is validated at construction, so code that receives one
//! can hand it to the engine without further checks. `TripPlan` is the
//! structured form of the engine's text reply.

mod error;
mod plan;
mod trip;

pub use error::ValidationError;
pub use plan::{Totals, TravelSegment, TripPlan};
pub use trip::{InvalidMode, Stop, TransportMode, TripRequest};
