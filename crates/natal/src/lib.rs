//! Natal chart computation: birth time normalization, planetary longitudes,
//! Placidus houses, sign/house placement and major aspects.

pub mod aspects;
pub mod chart;
pub mod ephemeris;
pub mod error;
pub mod houses;
pub mod positions;
pub mod time;
pub mod zodiac;

pub use aspects::{Aspect, AspectCalculator, AspectKind, AspectSettings};
pub use chart::{BirthData, BodyPlacement, Chart, ChartAssembler, ChartRecord};
pub use ephemeris::{Body, EphemerisError, EphemerisProvider, FixedEphemeris, GeoLocation, SwissEphemerisAdapter};
pub use error::ChartError;
pub use houses::{compute_houses, HousePositions};
pub use positions::{compute_positions, BodyPositions};
pub use time::{normalize_time, CivilDate, CivilTime, JulianDay, StandardizedTime, UtcOffset};
pub use zodiac::{annotate, house_of, sign_of, Placement, ZodiacSign};
