//! Request/response exchange with the engine.

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::{TripPlan, TripRequest};
use crate::engine::{EngineError, TripEngine, encode_request, parse_output};

/// Result of a successful engine call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedTrip {
    /// Raw engine stdout, verbatim.
    pub output: String,
    /// The decoded itinerary. Empty segments means no route.
    pub plan: TripPlan,
}

/// Plans trips by encoding, invoking the engine and decoding its reply.
///
/// Cheap to clone; every call is independent.
#[derive(Clone)]
pub struct Planner {
    engine: Arc<dyn TripEngine>,
}

impl Planner {
    pub fn new(engine: Arc<dyn TripEngine>) -> Self {
        Self { engine }
    }

    /// Plan a trip.
    ///
    /// Engine failures are returned before any decoding happens. A successful
    /// run always yields a plan, possibly with no segments.
    pub async fn plan(&self, request: &TripRequest) -> Result<PlannedTrip, EngineError> {
        let payload = encode_request(request);
        debug!(
            start = request.start_city(),
            end = request.end_city(),
            stops = request.stops().len(),
            "planning trip"
        );

        let output = self.engine.run(&payload).await?;
        let plan = parse_output(&output);

        info!(
            start = request.start_city(),
            end = request.end_city(),
            segments = plan.segments.len(),
            "trip planned"
        );

        Ok(PlannedTrip { output, plan })
    }
}
