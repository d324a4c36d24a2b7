use serde::{Deserialize, Serialize};

/// A WGS84 geographic coordinate
///
/// Immutable value type. Construction through `new` validates ranges and
/// rejects NaN; everything downstream (distance, containment, the session)
/// assumes any `Coordinate` it receives is already valid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees, [-90, 90]
    pub lat: f64,
    /// Longitude in degrees, [-180, 180]
    pub lon: f64,
}

impl Coordinate {
    /// Create a coordinate from latitude/longitude degrees
    ///
    /// # Returns
    /// * `Some(Coordinate)` if lat ∈ [-90, 90] and lon ∈ [-180, 180]
    /// * `None` for out-of-range or NaN input
    pub fn new(lat: f64, lon: f64) -> Option<Self> {
        if (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lon) {
            Some(Self { lat, lon })
        } else {
            None
        }
    }
}
