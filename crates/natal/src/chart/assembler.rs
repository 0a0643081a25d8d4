use crate::aspects::{Aspect, AspectCalculator, AspectSettings};
use crate::ephemeris::{Body, EphemerisError, EphemerisProvider, GeoLocation};
use crate::error::ChartError;
use crate::houses::{compute_houses, HousePositions};
use crate::positions::{compute_positions, BodyPositions};
use crate::time::{normalize_time, CivilDate, CivilTime, StandardizedTime, UtcOffset};
use crate::zodiac::{annotate, ZodiacSign};
use serde::{Deserialize, Serialize};

/// Who and where a chart is for, as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BirthData {
    pub name: String,
    pub date: CivilDate,
    pub time: CivilTime,
    pub utc_offset: UtcOffset,
    pub location: GeoLocation,
    /// Free-form place label (city name); not used in calculations
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place: Option<String>,
}

/// A body's longitude with its sign and house.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyPlacement {
    pub body: Body,
    pub longitude: f64,
    pub sign: ZodiacSign,
    pub degree_in_sign: f64,
    pub house: u8,
}

/// A computed natal chart. Read-only once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chart {
    subject: BirthData,
    time: StandardizedTime,
    placements: Vec<BodyPlacement>,
    houses: HousePositions,
    aspects: Vec<Aspect>,
}

impl Chart {
    /// Assemble a chart from already computed positions and houses.
    ///
    /// Every chart body must be present in `positions`.
    pub fn from_parts(
        subject: BirthData,
        time: StandardizedTime,
        positions: &BodyPositions,
        houses: HousePositions,
        calculator: &AspectCalculator,
    ) -> Result<Self, ChartError> {
        let mut placements = Vec::with_capacity(Body::ALL.len());
        for body in Body::ALL {
            let longitude = positions
                .get(body)
                .ok_or(EphemerisError::UnknownBody { body })?;
            let placement = annotate(longitude, &houses.cusps)?;
            placements.push(BodyPlacement {
                body,
                longitude,
                sign: placement.sign,
                degree_in_sign: placement.degree_in_sign,
                house: placement.house,
            });
        }

        let aspects = calculator.compute_aspects(positions);

        Ok(Self {
            subject,
            time,
            placements,
            houses,
            aspects,
        })
    }

    pub fn subject(&self) -> &BirthData {
        &self.subject
    }

    pub fn time(&self) -> &StandardizedTime {
        &self.time
    }

    /// Placements in chart order, one per body.
    pub fn placements(&self) -> &[BodyPlacement] {
        &self.placements
    }

    pub fn placement(&self, body: Body) -> Option<&BodyPlacement> {
        self.placements.iter().find(|p| p.body == body)
    }

    pub fn houses(&self) -> &HousePositions {
        &self.houses
    }

    pub fn aspects(&self) -> &[Aspect] {
        &self.aspects
    }

    /// Longitudes of the placements, for re-deriving aspects.
    pub fn positions(&self) -> BodyPositions {
        self.placements
            .iter()
            .map(|p| (p.body, p.longitude))
            .collect()
    }
}

/// Runs the whole pipeline against one ephemeris provider.
pub struct ChartAssembler<P> {
    provider: P,
    calculator: AspectCalculator,
}

impl<P: EphemerisProvider> ChartAssembler<P> {
    pub fn new(provider: P) -> Self {
        Self::with_settings(provider, AspectSettings::default())
    }

    pub fn with_settings(provider: P, settings: AspectSettings) -> Self {
        Self {
            provider,
            calculator: AspectCalculator::new(settings),
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn calculator(&self) -> &AspectCalculator {
        &self.calculator
    }

    /// Compute the natal chart for `subject`. Fails as a whole if any step does.
    pub fn assemble(&self, subject: &BirthData) -> Result<Chart, ChartError> {
        let time = normalize_time(subject.date, subject.time, subject.utc_offset)?;
        log::debug!(
            "Chart for {}: local {:02}.{:02}.{:04} {:02}:{:02} {} -> {} (JD {})",
            subject.name,
            subject.date.day,
            subject.date.month,
            subject.date.year,
            subject.time.hour,
            subject.time.minute,
            subject.utc_offset,
            time.utc.to_rfc3339(),
            time.julian_day
        );

        let houses = compute_houses(&self.provider, time.julian_day, subject.location)?;
        let positions = compute_positions(&self.provider, time.julian_day)?;

        let chart = Chart::from_parts(
            subject.clone(),
            time,
            &positions,
            houses,
            &self.calculator,
        )?;
        log::debug!(
            "Chart for {}: asc {:.2}, mc {:.2}, {} aspects",
            subject.name,
            chart.houses.ascendant,
            chart.houses.midheaven,
            chart.aspects.len()
        );
        Ok(chart)
    }
}
