//! Flat JSON view of a chart for storage and downstream interpretation.
//!
//! Bodies are keyed by display name in chart order and aspects are rendered
//! as human-readable strings, e.g.
//! `Sun sextile Moon (60.00°, orb 0.00° of allowed 7.0°)`.

use crate::chart::assembler::Chart;
use crate::zodiac::ZodiacSign;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanetRecord {
    pub degree: f64,
    pub sign: ZodiacSign,
    pub house: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HousesRecord {
    pub asc: f64,
    pub mc: f64,
    pub cusps: [f64; 12],
}

/// Body name -> record, serialized in insertion order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlanetsRecord(pub Vec<(String, PlanetRecord)>);

impl Serialize for PlanetsRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, planet) in &self.0 {
            map.serialize_entry(name, planet)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartRecord {
    pub name: String,
    /// `DD.MM.YYYY`, local
    pub birth_date: String,
    /// `HH:MM`, local
    pub birth_time: String,
    pub utc_offset: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub place: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub utc_time: String,
    pub julian_day: f64,
    pub planets: PlanetsRecord,
    pub houses: HousesRecord,
    pub aspects: Vec<String>,
}

impl From<&Chart> for ChartRecord {
    fn from(chart: &Chart) -> Self {
        let subject = chart.subject();
        let houses = chart.houses();

        let planets = chart
            .placements()
            .iter()
            .map(|p| {
                (
                    p.body.name().to_string(),
                    PlanetRecord {
                        degree: p.longitude,
                        sign: p.sign,
                        house: p.house,
                    },
                )
            })
            .collect();

        Self {
            name: subject.name.clone(),
            birth_date: format!(
                "{:02}.{:02}.{:04}",
                subject.date.day, subject.date.month, subject.date.year
            ),
            birth_time: format!("{:02}:{:02}", subject.time.hour, subject.time.minute),
            utc_offset: subject.utc_offset.to_string(),
            place: subject.place.clone(),
            latitude: subject.location.lat,
            longitude: subject.location.lon,
            utc_time: chart.time().utc.to_rfc3339(),
            julian_day: chart.time().julian_day.value(),
            planets: PlanetsRecord(planets),
            houses: HousesRecord {
                asc: houses.ascendant,
                mc: houses.midheaven,
                cusps: houses.cusps,
            },
            aspects: chart.aspects().iter().map(|a| a.to_string()).collect(),
        }
    }
}

impl ChartRecord {
    pub fn to_json(&self, pretty: bool) -> serde_json::Result<String> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }
}
