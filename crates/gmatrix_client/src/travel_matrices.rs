use serde::Serialize;

/// TravelMatrices holds the travel distance and time matrices.
/// Stored as flat row-major vectors, one row per origin.
/// Pairs without a route hold `f64::INFINITY` (written as `null` in JSON).
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct TravelMatrices {
    /// Meters
    pub distances: Vec<f64>,
    /// Seconds
    pub times: Vec<f64>,
}

