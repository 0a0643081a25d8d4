//! Zodiac sign and house lookup for ecliptic longitudes.

use crate::error::ChartError;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZodiacSign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

const SIGN_ORDER: [ZodiacSign; 12] = [
    ZodiacSign::Aries,
    ZodiacSign::Taurus,
    ZodiacSign::Gemini,
    ZodiacSign::Cancer,
    ZodiacSign::Leo,
    ZodiacSign::Virgo,
    ZodiacSign::Libra,
    ZodiacSign::Scorpio,
    ZodiacSign::Sagittarius,
    ZodiacSign::Capricorn,
    ZodiacSign::Aquarius,
    ZodiacSign::Pisces,
];

impl ZodiacSign {
    /// Sign for an index; wraps modulo 12.
    pub fn from_index(index: usize) -> Self {
        SIGN_ORDER[index % 12]
    }

    pub fn from_longitude(longitude: f64) -> Self {
        Self::from_index(sign_of(longitude))
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            ZodiacSign::Aries => "Aries",
            ZodiacSign::Taurus => "Taurus",
            ZodiacSign::Gemini => "Gemini",
            ZodiacSign::Cancer => "Cancer",
            ZodiacSign::Leo => "Leo",
            ZodiacSign::Virgo => "Virgo",
            ZodiacSign::Libra => "Libra",
            ZodiacSign::Scorpio => "Scorpio",
            ZodiacSign::Sagittarius => "Sagittarius",
            ZodiacSign::Capricorn => "Capricorn",
            ZodiacSign::Aquarius => "Aquarius",
            ZodiacSign::Pisces => "Pisces",
        }
    }
}

impl fmt::Display for ZodiacSign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Normalize an angle to [0, 360) degrees.
pub fn normalize_degrees(deg: f64) -> f64 {
    let r = deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if r >= 360.0 { 0.0 } else { r }
}

/// Sign index 0..=11 (Aries = 0). Periodic in 360°.
pub fn sign_of(longitude: f64) -> usize {
    (longitude / 30.0).floor().rem_euclid(12.0) as usize
}

/// Degrees past the start of the sign, in [0, 30).
pub fn degree_in_sign(longitude: f64) -> f64 {
    normalize_degrees(longitude) % 30.0
}

/// House number 1..=12 for `longitude` given cusps of houses 1..12.
///
/// A cusp pair whose start is not below its end is taken to wrap through 0°.
/// `None` means the cusps do not cover the longitude, which only happens with
/// malformed cusp data.
pub fn house_of(longitude: f64, cusps: &[f64; 12]) -> Option<u8> {
    for i in 0..12 {
        let start = cusps[i];
        let end = cusps[(i + 1) % 12];
        let inside = if start < end {
            start <= longitude && longitude < end
        } else {
            longitude >= start || longitude < end
        };
        if inside {
            return Some(i as u8 + 1);
        }
    }
    None
}

/// Sign and house of a longitude.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub sign: ZodiacSign,
    pub degree_in_sign: f64,
    pub house: u8,
}

pub fn annotate(longitude: f64, cusps: &[f64; 12]) -> Result<Placement, ChartError> {
    let house = house_of(longitude, cusps).ok_or(ChartError::MalformedCusps {
        longitude,
        cusps: *cusps,
    })?;
    Ok(Placement {
        sign: ZodiacSign::from_longitude(longitude),
        degree_in_sign: degree_in_sign(longitude),
        house,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_wraps_both_ways() {
        assert_eq!(normalize_degrees(360.0), 0.0);
        assert!((normalize_degrees(-10.0) - 350.0).abs() < 1e-12);
        assert!((normalize_degrees(730.0) - 10.0).abs() < 1e-12);
    }

    #[test]
    fn degree_in_sign_is_below_thirty() {
        assert!((degree_in_sign(45.5) - 15.5).abs() < 1e-12);
        assert!((degree_in_sign(-0.5) - 29.5).abs() < 1e-12);
    }

    #[test]
    fn sign_names_follow_index() {
        assert_eq!(ZodiacSign::from_index(0), ZodiacSign::Aries);
        assert_eq!(ZodiacSign::from_index(11).name(), "Pisces");
        assert_eq!(ZodiacSign::Leo.index(), 4);
    }
}
