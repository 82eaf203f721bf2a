//! Flight Route

use axum::{extract::State, Json};
use serde::Serialize;

use crate::SharedState;

/// Map waypoint handed to the rendering collaborator as-is
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Waypoint {
    pub lat: f64,
    pub lon: f64,
    pub altitude_ft: f64,
}

const fn wp(lat: f64, lon: f64, altitude_ft: f64) -> Waypoint {
    Waypoint { lat, lon, altitude_ft }
}

/// Planned path, Rajkot to Delhi
static FLIGHT_PATH: [Waypoint; 9] = [
    wp(23.0, 72.6, 0.0),
    wp(23.5, 73.1, 5_000.0),
    wp(24.0, 74.0, 15_000.0),
    wp(24.5, 75.0, 25_000.0),
    wp(25.0, 75.5, 32_000.0),
    wp(26.0, 76.0, 35_000.0),
    wp(27.0, 76.5, 35_000.0),
    wp(28.0, 77.0, 30_000.0),
    wp(28.5, 77.2, 10_000.0),
];

#[derive(Debug, Serialize)]
pub struct FlightResponse {
    pub flight_id: String,
    pub route: String,
    pub path: &'static [Waypoint],
}

/// Get flight identity and map path
pub async fn get_flight(State(state): State<SharedState>) -> Json<FlightResponse> {
    let state = state.read().await;
    Json(FlightResponse {
        flight_id: state.settings.flight_id.clone(),
        route: state.settings.route.clone(),
        path: &FLIGHT_PATH,
    })
}
