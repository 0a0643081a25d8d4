use anyhow::Context;
use natal::{AspectSettings, Body, UtcOffset};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Relative locations tried for the config file, in order.
pub const CONFIG_PATHS: [&str; 2] = ["configs/natal.toml", "../../configs/natal.toml"];

/// Process-wide settings, loaded once at startup.
#[derive(Debug, Clone)]
pub struct NatalSettings {
    /// Swiss Ephemeris data directory; `None` defers to the adapter's lookup
    pub ephemeris_path: Option<PathBuf>,
    pub aspects: AspectSettings,
    pub default_utc_offset: UtcOffset,
}

impl Default for NatalSettings {
    fn default() -> Self {
        Self {
            ephemeris_path: None,
            aspects: AspectSettings::default(),
            default_utc_offset: UtcOffset::utc(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct EphemerisToml {
    #[serde(default)]
    path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct AspectsToml {
    #[serde(default)]
    default_orb: Option<f64>,
    #[serde(default)]
    cross_sign_conjunction_factor: Option<f64>,
    #[serde(default)]
    cross_sign_factor: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RootConfigToml {
    #[serde(default)]
    default_utc_offset: Option<String>,
    #[serde(default)]
    ephemeris: EphemerisToml,
    #[serde(default)]
    aspects: AspectsToml,
    #[serde(default)]
    orbs: BTreeMap<String, f64>,
}

/// Try the common relative paths for `configs/natal.toml`.
pub fn read_config_toml_text() -> Option<(PathBuf, String)> {
    for p in &CONFIG_PATHS {
        if let Ok(c) = fs::read_to_string(p) {
            return Some((PathBuf::from(p), c));
        }
    }
    None
}

fn check_degrees(name: &str, value: f64) -> anyhow::Result<f64> {
    if !value.is_finite() || value < 0.0 {
        anyhow::bail!("{} must be a non-negative number of degrees, got {}", name, value);
    }
    Ok(value)
}

fn check_factor(name: &str, value: f64) -> anyhow::Result<f64> {
    if !value.is_finite() || value <= 0.0 || value > 1.0 {
        anyhow::bail!("aspects.{} must be in (0, 1], got {}", name, value);
    }
    Ok(value)
}

/// Parse settings from TOML text. Absent keys keep their defaults.
pub fn parse_settings(text: &str) -> anyhow::Result<NatalSettings> {
    let root: RootConfigToml = toml::from_str(text)
        .map_err(|e| anyhow::anyhow!("Failed to parse natal config: {e}"))?;
    let RootConfigToml {
        default_utc_offset,
        ephemeris,
        aspects,
        orbs,
    } = root;

    let mut settings = NatalSettings {
        ephemeris_path: ephemeris.path,
        ..NatalSettings::default()
    };

    if let Some(offset) = default_utc_offset {
        settings.default_utc_offset = offset
            .parse()
            .with_context(|| format!("default_utc_offset {:?}", offset))?;
    }

    if let Some(orb) = aspects.default_orb {
        settings.aspects.default_orb = check_degrees("aspects.default_orb", orb)?;
    }
    if let Some(factor) = aspects.cross_sign_conjunction_factor {
        settings.aspects.cross_sign_conjunction_factor =
            check_factor("cross_sign_conjunction_factor", factor)?;
    }
    if let Some(factor) = aspects.cross_sign_factor {
        settings.aspects.cross_sign_factor = check_factor("cross_sign_factor", factor)?;
    }

    for (name, orb) in orbs {
        let body: Body = name
            .parse()
            .map_err(|e| anyhow::anyhow!("[orbs] {e}"))?;
        let orb = check_degrees(&format!("orbs.{}", name), orb)?;
        settings.aspects.body_orbs.insert(body, orb);
    }

    Ok(settings)
}

/// Load settings from `path`, or from the first of [`CONFIG_PATHS`] that
/// exists. No config file at all means defaults; an explicit path that
/// cannot be read is an error.
pub fn load_settings(path: Option<&Path>) -> anyhow::Result<NatalSettings> {
    let (source, text) = match path {
        Some(p) => {
            let text = fs::read_to_string(p)
                .with_context(|| format!("Failed to read config: {}", p.display()))?;
            (p.to_path_buf(), text)
        }
        None => match read_config_toml_text() {
            Some(found) => found,
            None => {
                log::debug!("No config found in {:?}; using defaults", CONFIG_PATHS);
                return Ok(NatalSettings::default());
            }
        },
    };

    log::info!("Loading config from {}", source.display());
    parse_settings(&text).with_context(|| format!("Invalid config: {}", source.display()))
}
