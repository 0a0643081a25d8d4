use crate::ephemeris::{EphemerisProvider, GeoLocation, HouseMethod};
use crate::error::ChartError;
use crate::time::JulianDay;
use crate::zodiac::normalize_degrees;
use serde::{Deserialize, Serialize};

/// House system positions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HousePositions {
    pub method: HouseMethod,
    pub ascendant: f64,
    pub midheaven: f64,
    /// Cusps of houses 1..12; cusp 12 wraps back to cusp 1.
    pub cusps: [f64; 12],
}

impl HousePositions {
    pub fn descendant(&self) -> f64 {
        normalize_degrees(self.ascendant + 180.0)
    }

    pub fn imum_coeli(&self) -> f64 {
        normalize_degrees(self.midheaven + 180.0)
    }

    /// Cusp of house `number` (1..=12).
    pub fn cusp(&self, number: u8) -> Option<f64> {
        match number {
            1..=12 => Some(self.cusps[number as usize - 1]),
            _ => None,
        }
    }
}

/// Placidus cusps and angles for an observer.
pub fn compute_houses<P: EphemerisProvider + ?Sized>(
    provider: &P,
    jd: JulianDay,
    location: GeoLocation,
) -> Result<HousePositions, ChartError> {
    if !location.is_valid() {
        return Err(ChartError::InvalidLocation {
            lat: location.lat,
            lon: location.lon,
        });
    }

    let method = HouseMethod::Placidus;
    let raw = provider.houses(jd, location, method)?;

    Ok(HousePositions {
        method,
        ascendant: normalize_degrees(raw.ascendant),
        midheaven: normalize_degrees(raw.midheaven),
        cusps: raw.cusps.map(normalize_degrees),
    })
}
