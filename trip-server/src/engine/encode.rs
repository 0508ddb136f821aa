//! Encoding a trip request into the engine's input payload.

use crate::domain::TripRequest;

/// Encode a request as the line-oriented payload the engine reads from stdin.
///
/// Layout, one value per line, every line newline-terminated:
///
/// ```text
/// <start city>
/// <stop count>
/// <stop city>      } repeated per stop
/// <stop mode>      }
/// <end city>
/// <final-leg mode>   only when there is at least one stop
/// ```
///
/// The final-leg mode is the last stop's mode. City names are written as
/// given and must not contain newlines.
pub fn encode_request(request: &TripRequest) -> String {
    let mut payload = String::new();

    push_line(&mut payload, request.start_city());
    push_line(&mut payload, &request.stops().len().to_string());
    for stop in request.stops() {
        push_line(&mut payload, &stop.city);
        push_line(&mut payload, stop.mode.as_str());
    }
    push_line(&mut payload, request.end_city());
    if let Some(mode) = request.final_leg_mode() {
        push_line(&mut payload, mode.as_str());
    }

    payload
}

fn push_line(payload: &mut String, line: &str) {
    payload.push_str(line);
    payload.push('\n');
}
