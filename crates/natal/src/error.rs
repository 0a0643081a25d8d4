use crate::ephemeris::EphemerisError;
use thiserror::Error;

/// Errors that can occur while computing a chart
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChartError {
    #[error("Invalid time input: {0}")]
    InvalidTimeInput(String),
    #[error("Invalid location: latitude {lat}, longitude {lon}")]
    InvalidLocation { lat: f64, lon: f64 },
    #[error(transparent)]
    Ephemeris(#[from] EphemerisError),
    #[error("Malformed house cusps {cusps:?}: longitude {longitude} falls in no house")]
    MalformedCusps { longitude: f64, cusps: [f64; 12] },
}
