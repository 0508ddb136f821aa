//! Askama templates and view models for the web frontend.

use askama::Template;

use crate::domain::{Totals, TravelSegment, TripPlan};

/// Message shown when the engine finds no itinerary.
pub const NO_ROUTE_MESSAGE: &str = "No route found between the specified cities.";

/// Characters of unit marker the engine leaves at the start of each time field.
const TIME_PREFIX_CHARS: usize = 2;

/// Characters of unit marker the engine leaves at the start of each cost field.
const COST_PREFIX_CHARS: usize = 3;

// ============================================================================
// Page Templates (extend base.html)
// ============================================================================

/// Home page with the trip form.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub modes: Vec<&'static str>,
}

// ============================================================================
// Fragment Templates (AJAX responses, no base.html)
// ============================================================================

/// Itinerary table and totals.
#[derive(Template)]
#[template(path = "trip_results.html")]
pub struct TripResultsTemplate {
    pub itinerary: ItineraryView,
}

/// Error message fragment.
#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub title: String,
    pub message: String,
}

// ============================================================================
// View Models (for templates)
// ============================================================================

/// Icon shown beside a transport mode (Font Awesome names).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeIcon {
    Plane,
    Train,
    Bus,
    Car,
    /// Any mode the presenter does not recognise
    Route,
}

impl ModeIcon {
    /// Pick the icon for a mode, ignoring case.
    pub fn for_mode(mode: &str) -> Self {
        match mode.to_lowercase().as_str() {
            "flight" => ModeIcon::Plane,
            "train" => ModeIcon::Train,
            "bus" => ModeIcon::Bus,
            "car" => ModeIcon::Car,
            _ => ModeIcon::Route,
        }
    }

    /// CSS classes for the `<i>` element.
    pub fn css_class(&self) -> &'static str {
        match self {
            ModeIcon::Plane => "fas fa-plane",
            ModeIcon::Train => "fas fa-train",
            ModeIcon::Bus => "fas fa-bus",
            ModeIcon::Car => "fas fa-car",
            ModeIcon::Route => "fas fa-route",
        }
    }
}

/// What to render for a planned trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TripPlanView {
    /// The engine found nothing; show [`NO_ROUTE_MESSAGE`] instead of a table.
    NoRoute,
    Itinerary(ItineraryView),
}

impl TripPlanView {
    /// Create from a decoded plan.
    pub fn from_plan(plan: &TripPlan) -> Self {
        if plan.segments.is_empty() {
            return TripPlanView::NoRoute;
        }

        TripPlanView::Itinerary(ItineraryView {
            segments: plan.segments.iter().map(SegmentView::from_segment).collect(),
            totals: TotalsView::from_totals(&plan.totals),
        })
    }
}

/// Itinerary view model: one row per segment plus a summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItineraryView {
    pub segments: Vec<SegmentView>,
    pub totals: TotalsView,
}

/// Segment row view model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentView {
    pub from: String,
    pub to: String,
    pub mode: String,
    pub icon: ModeIcon,
    pub distance: String,
    pub time: String,
    pub cost: String,
}

impl SegmentView {
    /// Create from a decoded segment.
    ///
    /// Time and cost lose a fixed-width leading unit marker; nothing checks
    /// that the marker is actually there.
    pub fn from_segment(segment: &TravelSegment) -> Self {
        Self {
            from: segment.from.clone(),
            to: segment.to.clone(),
            mode: segment.mode.clone(),
            icon: ModeIcon::for_mode(&segment.mode),
            distance: segment.distance.clone(),
            time: skip_chars(&segment.time, TIME_PREFIX_CHARS),
            cost: skip_chars(&segment.cost, COST_PREFIX_CHARS),
        }
    }
}

/// Totals summary view model, rendered verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TotalsView {
    pub distance: String,
    pub time: String,
    pub cost: String,
}

impl TotalsView {
    pub fn from_totals(totals: &Totals) -> Self {
        Self {
            distance: totals.distance.clone(),
            time: totals.time.clone(),
            cost: totals.cost.clone(),
        }
    }
}

fn skip_chars(s: &str, n: usize) -> String {
    s.chars().skip(n).collect()
}
