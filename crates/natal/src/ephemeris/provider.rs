use crate::ephemeris::types::{Body, EclipticPosition, GeoLocation, HouseCusps, HouseMethod};
use crate::time::JulianDay;
use thiserror::Error;

/// Errors that can occur during ephemeris calculations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EphemerisError {
    #[error("Ephemeris file not found at path: {path}. {message}")]
    FileNotFound { path: String, message: String },
    #[error("Failed to calculate position for {body} at JD {jd}: {message}")]
    CalculationFailed {
        body: Body,
        jd: f64,
        message: String,
    },
    #[error("House calculation failed: {message}")]
    HouseCalculationFailed { message: String },
    #[error("No position available for {body}")]
    UnknownBody { body: Body },
}

/// Capability interface over an ephemeris back-end.
///
/// Implementations answer blocking queries and must tolerate being shared
/// between threads; a back-end with global state serializes internally.
pub trait EphemerisProvider: Send + Sync {
    /// Ecliptic position of `body` at `jd` (UT).
    fn position(&self, jd: JulianDay, body: Body) -> Result<EclipticPosition, EphemerisError>;

    /// House cusps and angles for an observer at `location`.
    fn houses(
        &self,
        jd: JulianDay,
        location: GeoLocation,
        method: HouseMethod,
    ) -> Result<HouseCusps, EphemerisError>;
}
