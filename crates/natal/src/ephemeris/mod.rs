pub mod adapter;
pub mod fixed;
pub mod provider;
pub mod types;

pub use adapter::SwissEphemerisAdapter;
pub use fixed::FixedEphemeris;
pub use provider::{EphemerisError, EphemerisProvider};
pub use types::{Body, EclipticPosition, GeoLocation, HouseCusps, HouseMethod};
