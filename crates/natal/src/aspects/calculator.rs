use crate::aspects::types::{Aspect, AspectKind, AspectSettings};
use crate::ephemeris::Body;
use crate::positions::BodyPositions;
use crate::zodiac::sign_of;

/// Shortest-arc distance between two longitudes, in [0, 180].
pub fn angular_separation(lon1: f64, lon2: f64) -> f64 {
    let raw_diff = (lon1 - lon2).abs() % 360.0;
    if raw_diff > 180.0 {
        360.0 - raw_diff
    } else {
        raw_diff
    }
}

/// Aspect calculator
#[derive(Debug, Clone, Default)]
pub struct AspectCalculator {
    settings: AspectSettings,
}

impl AspectCalculator {
    pub fn new(settings: AspectSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &AspectSettings {
        &self.settings
    }

    /// Aspects between every pair of bodies.
    ///
    /// Pairs are visited in chart order (first body ascending, then second),
    /// and each pair's aspects follow `AspectKind::ALL`.
    pub fn compute_aspects(&self, positions: &BodyPositions) -> Vec<Aspect> {
        let bodies: Vec<(Body, f64)> = positions.iter().collect();

        let mut aspects = Vec::new();
        for i in 0..bodies.len() {
            for j in (i + 1)..bodies.len() {
                let (body1, lon1) = bodies[i];
                let (body2, lon2) = bodies[j];
                aspects.extend(self.calculate_aspects(body1, lon1, body2, lon2));
            }
        }
        aspects
    }

    /// Every aspect kind the two longitudes form within their allowed orb.
    pub fn calculate_aspects(&self, body1: Body, lon1: f64, body2: Body, lon2: f64) -> Vec<Aspect> {
        let separation = angular_separation(lon1, lon2);
        let same_sign = sign_of(lon1) == sign_of(lon2);

        AspectKind::ALL
            .iter()
            .filter_map(|&kind| {
                let orb = (separation - kind.angle()).abs();
                let allowed_orb = self.allowed_orb(kind, body1, body2, same_sign);
                (orb <= allowed_orb).then_some(Aspect {
                    from: body1,
                    to: body2,
                    kind,
                    separation,
                    orb,
                    allowed_orb,
                })
            })
            .collect()
    }

    /// Larger of the two body allowances, reduced when the bodies sit in
    /// different signs.
    pub fn allowed_orb(&self, kind: AspectKind, body1: Body, body2: Body, same_sign: bool) -> f64 {
        let base = self.settings.orb_for(body1).max(self.settings.orb_for(body2));
        if same_sign {
            base
        } else if kind == AspectKind::Conjunction {
            base * self.settings.cross_sign_conjunction_factor
        } else {
            base * self.settings.cross_sign_factor
        }
    }
}
