use crate::ephemeris::Body;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Major aspect kinds, in the order they are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AspectKind {
    Conjunction,
    Sextile,
    Square,
    Trine,
    Opposition,
}

impl AspectKind {
    pub const ALL: [AspectKind; 5] = [
        AspectKind::Conjunction,
        AspectKind::Sextile,
        AspectKind::Square,
        AspectKind::Trine,
        AspectKind::Opposition,
    ];

    /// Exact angle for this aspect (0, 60, 90, 120, 180)
    pub fn angle(self) -> f64 {
        match self {
            AspectKind::Conjunction => 0.0,
            AspectKind::Sextile => 60.0,
            AspectKind::Square => 90.0,
            AspectKind::Trine => 120.0,
            AspectKind::Opposition => 180.0,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            AspectKind::Conjunction => "conjunction",
            AspectKind::Sextile => "sextile",
            AspectKind::Square => "square",
            AspectKind::Trine => "trine",
            AspectKind::Opposition => "opposition",
        }
    }
}

impl fmt::Display for AspectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An aspect between two bodies of the same chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aspect {
    pub from: Body,
    pub to: Body,
    pub kind: AspectKind,
    /// Shortest-arc separation of the two longitudes, 0..=180
    pub separation: f64,
    /// Deviation from the exact angle
    pub orb: f64,
    /// Largest deviation this pair was allowed
    pub allowed_orb: f64,
}

impl fmt::Display for Aspect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} ({:.2}°, orb {:.2}° of allowed {:.1}°)",
            self.from, self.kind, self.to, self.separation, self.orb, self.allowed_orb
        )
    }
}

/// Settings for aspect calculations.
///
/// Built once and shared read-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AspectSettings {
    /// Orb allowance per body
    pub body_orbs: HashMap<Body, f64>,
    /// Allowance for bodies missing from `body_orbs`
    pub default_orb: f64,
    /// Multiplier for conjunctions spanning two signs
    pub cross_sign_conjunction_factor: f64,
    /// Multiplier for every other aspect spanning two signs
    pub cross_sign_factor: f64,
}

impl Default for AspectSettings {
    fn default() -> Self {
        Self {
            body_orbs: HashMap::from([
                (Body::Sun, 10.0),
                (Body::Moon, 9.0),
                (Body::Jupiter, 7.0),
            ]),
            default_orb: 5.0,
            cross_sign_conjunction_factor: 0.5,
            cross_sign_factor: 0.7,
        }
    }
}

impl AspectSettings {
    pub fn orb_for(&self, body: Body) -> f64 {
        self.body_orbs.get(&body).copied().unwrap_or(self.default_orb)
    }

    pub fn with_orb(mut self, body: Body, orb: f64) -> Self {
        self.body_orbs.insert(body, orb);
        self
    }
}
