use crate::ephemeris::{Body, EphemerisError, EphemerisProvider};
use crate::time::JulianDay;
use crate::zodiac::normalize_degrees;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Body -> ecliptic longitude in [0, 360), iterated in chart order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BodyPositions(BTreeMap<Body, f64>);

impl BodyPositions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a longitude, reduced modulo 360.
    pub fn insert(&mut self, body: Body, lon: f64) {
        self.0.insert(body, normalize_degrees(lon));
    }

    pub fn get(&self, body: Body) -> Option<f64> {
        self.0.get(&body).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Body, f64)> + '_ {
        self.0.iter().map(|(body, lon)| (*body, *lon))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(Body, f64)> for BodyPositions {
    fn from_iter<I: IntoIterator<Item = (Body, f64)>>(iter: I) -> Self {
        let mut positions = BodyPositions::new();
        for (body, lon) in iter {
            positions.insert(body, lon);
        }
        positions
    }
}

impl<'de> Deserialize<'de> for BodyPositions {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<Body, f64>::deserialize(deserializer)?;
        Ok(raw.into_iter().collect())
    }
}

/// Longitudes of all ten chart bodies at `jd`.
///
/// The first provider failure aborts the whole query.
pub fn compute_positions<P: EphemerisProvider + ?Sized>(
    provider: &P,
    jd: JulianDay,
) -> Result<BodyPositions, EphemerisError> {
    let mut positions = BodyPositions::new();
    for body in Body::ALL {
        let position = provider.position(jd, body)?;
        log::trace!("{} at JD {}: {:.4}", body, jd, position.lon);
        positions.insert(body, position.lon);
    }
    Ok(positions)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialized_longitudes_are_reduced() {
        let positions: BodyPositions =
            serde_json::from_str(r#"{"sun": 370.0, "moon": -30.0, "mars": 120.5}"#).unwrap();
        assert_eq!(positions.get(Body::Sun), Some(10.0));
        assert_eq!(positions.get(Body::Moon), Some(330.0));
        assert_eq!(positions.get(Body::Mars), Some(120.5));
    }

    #[test]
    fn iterates_in_chart_order() {
        let positions: BodyPositions = [(Body::Pluto, 1.0), (Body::Sun, 2.0), (Body::Venus, 3.0)]
            .into_iter()
            .collect();
        let order: Vec<Body> = positions.iter().map(|(body, _)| body).collect();
        assert_eq!(order, vec![Body::Sun, Body::Venus, Body::Pluto]);
    }
}
