use crate::ephemeris::provider::{EphemerisError, EphemerisProvider};
use crate::ephemeris::types::{Body, EclipticPosition, GeoLocation, HouseCusps, HouseMethod};
use crate::time::{JulianDay, J2000};
use std::env;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use swisseph::swe::{calc_ut, houses_ex, set_ephe_path};

/// Default data directory when neither config nor environment names one.
pub const DEFAULT_EPHEMERIS_PATH: &str = "/usr/local/share/swisseph";

/// Environment variable consulted when no explicit path is given.
pub const EPHEMERIS_PATH_ENV: &str = "SWISS_EPHEMERIS_PATH";

// Swiss Ephemeris planet IDs
const PLANET_IDS: &[(Body, u32)] = &[
    (Body::Sun, 0),
    (Body::Moon, 1),
    (Body::Mercury, 2),
    (Body::Venus, 3),
    (Body::Mars, 4),
    (Body::Jupiter, 5),
    (Body::Saturn, 6),
    (Body::Uranus, 7),
    (Body::Neptune, 8),
    (Body::Pluto, 9),
];

// FLG_SWIEPH: use Swiss Ephemeris files
const FLG_SWIEPH: i32 = 2;

// The C library keeps global state (file handles, caches), so every call
// into it goes through this lock.
static SWISS_LOCK: Mutex<()> = Mutex::new(());

fn swiss_guard() -> MutexGuard<'static, ()> {
    SWISS_LOCK
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Swiss Ephemeris adapter implementation.
///
/// The data path is process-wide in the C library: the most recently
/// constructed adapter's path is the one in effect.
#[derive(Debug)]
pub struct SwissEphemerisAdapter {
    ephemeris_path: PathBuf,
}

impl SwissEphemerisAdapter {
    /// Create a new adapter with optional ephemeris path
    pub fn new(ephemeris_path: Option<PathBuf>) -> Result<Self, EphemerisError> {
        let path = ephemeris_path.unwrap_or_else(|| {
            env::var(EPHEMERIS_PATH_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_EPHEMERIS_PATH))
        });

        if !path.exists() {
            return Err(EphemerisError::FileNotFound {
                path: path.display().to_string(),
                message: "Ephemeris path does not exist. Please ensure Swiss Ephemeris data files are installed.".to_string(),
            });
        }

        {
            let _guard = swiss_guard();
            set_ephe_path(&path.to_string_lossy());
        }
        log::debug!("Swiss Ephemeris data path: {}", path.display());

        Ok(Self {
            ephemeris_path: path,
        })
    }

    pub fn ephemeris_path(&self) -> &Path {
        &self.ephemeris_path
    }
}

impl EphemerisProvider for SwissEphemerisAdapter {
    fn position(&self, jd: JulianDay, body: Body) -> Result<EclipticPosition, EphemerisError> {
        let planet_code = PLANET_IDS
            .iter()
            .find(|(id, _)| *id == body)
            .map(|(_, code)| *code)
            .ok_or(EphemerisError::UnknownBody { body })?;

        let result = {
            let _guard = swiss_guard();
            calc_ut(jd.value(), planet_code, FLG_SWIEPH as u32)
        }
        .map_err(|e| EphemerisError::CalculationFailed {
            body,
            jd: jd.value(),
            message: format!("Swiss Ephemeris error: {}", e),
        })?;

        let out = result.out;
        if !out[0].is_finite() {
            return Err(EphemerisError::CalculationFailed {
                body,
                jd: jd.value(),
                message: "non-finite longitude".to_string(),
            });
        }

        Ok(EclipticPosition {
            lon: out[0],
            lat: out[1],
            distance: out[2],
            speed_lon: out[3],
        })
    }

    fn houses(
        &self,
        jd: JulianDay,
        location: GeoLocation,
        method: HouseMethod,
    ) -> Result<HouseCusps, EphemerisError> {
        // Swiss Ephemeris quietly falls back to Porphyry inside the polar
        // circles; report it instead.
        let polar_limit = 90.0 - mean_obliquity(jd);
        if method == HouseMethod::Placidus && location.lat.abs() >= polar_limit {
            return Err(EphemerisError::HouseCalculationFailed {
                message: format!(
                    "{} houses are undefined at latitude {:.4} (polar limit {:.4})",
                    method.name(),
                    location.lat,
                    polar_limit
                ),
            });
        }

        let (c, a) = {
            let _guard = swiss_guard();
            houses_ex(
                jd.value(),
                FLG_SWIEPH,
                location.lat,
                location.lon,
                method.code() as i32,
            )
        };

        use swisseph::{AscMc, Cusp};
        let cusps = Cusp::from_array(c);
        let ascmc = AscMc::from_array(a);

        let cusp_values = [
            cusps.first, cusps.second, cusps.third, cusps.fourth,
            cusps.fifth, cusps.sixth, cusps.seventh, cusps.eighth,
            cusps.ninth, cusps.tenth, cusps.eleventh, cusps.twelfth,
        ];

        if cusp_values.iter().any(|c| !c.is_finite())
            || !ascmc.ascendant.is_finite()
            || !ascmc.mc.is_finite()
        {
            return Err(EphemerisError::HouseCalculationFailed {
                message: format!(
                    "non-finite cusps for lat {} lon {} at JD {}",
                    location.lat,
                    location.lon,
                    jd.value()
                ),
            });
        }

        Ok(HouseCusps {
            cusps: cusp_values,
            ascendant: ascmc.ascendant,
            midheaven: ascmc.mc,
        })
    }
}

/// Mean obliquity of the ecliptic in degrees (IAU 1976 polynomial).
pub fn mean_obliquity(jd: JulianDay) -> f64 {
    let t = (jd.value() - J2000) / 36_525.0;
    23.439_291_111 - 0.013_004_167 * t - 1.639e-7 * t * t + 5.036e-7 * t * t * t
}
