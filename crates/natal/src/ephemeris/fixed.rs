//! Table-backed provider with preset answers.
//!
//! Returns the same longitudes and houses for every time and location, which
//! makes chart assembly reproducible without ephemeris data files.

use crate::ephemeris::provider::{EphemerisError, EphemerisProvider};
use crate::ephemeris::types::{Body, EclipticPosition, GeoLocation, HouseCusps, HouseMethod};
use crate::time::JulianDay;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default)]
pub struct FixedEphemeris {
    longitudes: BTreeMap<Body, f64>,
    houses: Option<HouseCusps>,
    house_failure: Option<String>,
}

impl FixedEphemeris {
    pub fn new() -> Self {
        Self::default()
    }

    /// Evenly spaced houses starting at 0° Aries, ascendant 0°, midheaven 270°.
    pub fn with_equal_houses(self) -> Self {
        let mut cusps = [0.0; 12];
        for (i, cusp) in cusps.iter_mut().enumerate() {
            *cusp = i as f64 * 30.0;
        }
        self.with_houses(HouseCusps {
            cusps,
            ascendant: 0.0,
            midheaven: 270.0,
        })
    }

    pub fn with_longitude(mut self, body: Body, lon: f64) -> Self {
        self.longitudes.insert(body, lon);
        self
    }

    /// Set longitudes for bodies in chart order; extra values are ignored.
    pub fn with_longitudes(mut self, lons: &[f64]) -> Self {
        for (body, lon) in Body::ALL.iter().zip(lons) {
            self.longitudes.insert(*body, *lon);
        }
        self
    }

    pub fn with_houses(mut self, houses: HouseCusps) -> Self {
        self.houses = Some(houses);
        self
    }

    /// Make every house query fail with `message`.
    pub fn failing_houses(mut self, message: impl Into<String>) -> Self {
        self.house_failure = Some(message.into());
        self
    }
}

impl EphemerisProvider for FixedEphemeris {
    fn position(&self, _jd: JulianDay, body: Body) -> Result<EclipticPosition, EphemerisError> {
        let lon = self
            .longitudes
            .get(&body)
            .copied()
            .ok_or(EphemerisError::UnknownBody { body })?;
        Ok(EclipticPosition {
            lon,
            lat: 0.0,
            distance: 1.0,
            speed_lon: 0.0,
        })
    }

    fn houses(
        &self,
        _jd: JulianDay,
        _location: GeoLocation,
        method: HouseMethod,
    ) -> Result<HouseCusps, EphemerisError> {
        if let Some(message) = &self.house_failure {
            return Err(EphemerisError::HouseCalculationFailed {
                message: message.clone(),
            });
        }
        self.houses
            .ok_or_else(|| EphemerisError::HouseCalculationFailed {
                message: format!("no {} houses configured", method.name()),
            })
    }
}
