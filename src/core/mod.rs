pub mod constants;
pub mod traits;

use serde::{Deserialize, Serialize};
use std::fmt;

/// The nine bodies tracked by the engine. Rahu and Ketu are the lunar
/// nodes; Ketu always sits 180° from Rahu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Planet {
    Sun,
    Moon,
    Mars,
    Mercury,
    Jupiter,
    Venus,
    Saturn,
    Rahu,
    Ketu,
}

impl Planet {
    pub const ALL: [Planet; 9] = [
        Planet::Sun,
        Planet::Moon,
        Planet::Mars,
        Planet::Mercury,
        Planet::Jupiter,
        Planet::Venus,
        Planet::Saturn,
        Planet::Rahu,
        Planet::Ketu,
    ];

    /// The seven classical planets, used by shape-based (Nabhasa) scans.
    pub const CLASSICAL: [Planet; 7] = [
        Planet::Sun,
        Planet::Moon,
        Planet::Mars,
        Planet::Mercury,
        Planet::Jupiter,
        Planet::Venus,
        Planet::Saturn,
    ];

    pub fn is_node(self) -> bool {
        matches!(self, Planet::Rahu | Planet::Ketu)
    }

    pub fn is_natural_benefic(self) -> bool {
        constants::NATURAL_BENEFICS.contains(&self)
    }

    pub fn is_natural_malefic(self) -> bool {
        constants::NATURAL_MALEFICS.contains(&self)
    }
}

impl fmt::Display for Planet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Planet::Sun => "Sun",
            Planet::Moon => "Moon",
            Planet::Mars => "Mars",
            Planet::Mercury => "Mercury",
            Planet::Jupiter => "Jupiter",
            Planet::Venus => "Venus",
            Planet::Saturn => "Saturn",
            Planet::Rahu => "Rahu",
            Planet::Ketu => "Ketu",
        };
        write!(f, "{name}")
    }
}

/// Sign quality groups used by the Ashraya shape yogas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignQuality {
    Movable,
    Fixed,
    Dual,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
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

impl ZodiacSign {
    pub const ALL: [ZodiacSign; 12] = [
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

    pub fn from_index(index: usize) -> ZodiacSign {
        Self::ALL[index % 12]
    }

    pub fn from_longitude(longitude: f64) -> ZodiacSign {
        let normalized = longitude.rem_euclid(360.0);
        Self::from_index((normalized / 30.0) as usize)
    }

    /// Zero-based position in the zodiac (Aries = 0).
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn ruler(self) -> Planet {
        constants::SIGN_RULERS[self.index()]
    }

    pub fn opposite(self) -> ZodiacSign {
        Self::from_index(self.index() + 6)
    }

    /// One-based sign number; odd signs (Aries, Gemini, ...) are masculine.
    pub fn number(self) -> u8 {
        self.index() as u8 + 1
    }

    pub fn quality(self) -> SignQuality {
        match self.index() % 3 {
            0 => SignQuality::Movable,
            1 => SignQuality::Fixed,
            _ => SignQuality::Dual,
        }
    }
}

impl fmt::Display for ZodiacSign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
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
        };
        write!(f, "{name}")
    }
}

/// A single body's placement. The sign is always derived from the
/// longitude and the house is resolved once from the cusps at chart
/// construction, so the three can never disagree.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanetPosition {
    pub planet: Planet,
    pub longitude: f64,
    pub speed: f64,
    pub house: u8,
}

impl PlanetPosition {
    pub fn sign(&self) -> ZodiacSign {
        ZodiacSign::from_longitude(self.longitude)
    }

    pub fn is_retrograde(&self) -> bool {
        self.speed < 0.0
    }

    /// Degrees traversed within the occupied sign, 0–30.
    pub fn degree_in_sign(&self) -> f64 {
        self.longitude.rem_euclid(360.0) % 30.0
    }
}

/// Immutable snapshot of a birth or event chart. One per analysis;
/// every evaluator reads the same instance.
#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub ascendant: f64,
    pub house_cusps: [f64; 12],
    positions: Vec<PlanetPosition>,
}

impl Chart {
    /// Builds a chart from raw (planet, longitude, speed) triples,
    /// resolving each body's house from the cusps.
    pub fn new(ascendant: f64, house_cusps: [f64; 12], bodies: &[(Planet, f64, f64)]) -> Chart {
        let degenerate = has_degenerate_cusps(&house_cusps);
        if degenerate {
            log::warn!("degenerate house cusps; falling back to 30-degree houses");
        }
        let positions = bodies
            .iter()
            .map(|&(planet, longitude, speed)| PlanetPosition {
                planet,
                longitude: longitude.rem_euclid(360.0),
                speed,
                house: resolve_house(longitude, &house_cusps, degenerate),
            })
            .collect();
        Chart {
            ascendant: ascendant.rem_euclid(360.0),
            house_cusps,
            positions,
        }
    }

    /// Whole-sign convenience constructor: houses coincide with signs
    /// counted from the ascendant sign. Bodies get direct motion.
    pub fn whole_sign(ascendant: f64, bodies: &[(Planet, f64)]) -> Chart {
        let with_motion: Vec<(Planet, f64, f64)> =
            bodies.iter().map(|&(p, lon)| (p, lon, 1.0)).collect();
        Self::whole_sign_with_motion(ascendant, &with_motion)
    }

    pub fn whole_sign_with_motion(ascendant: f64, bodies: &[(Planet, f64, f64)]) -> Chart {
        let sign_start = (ascendant.rem_euclid(360.0) / 30.0).floor() * 30.0;
        let mut cusps = [0.0; 12];
        for (i, cusp) in cusps.iter_mut().enumerate() {
            *cusp = (sign_start + 30.0 * i as f64).rem_euclid(360.0);
        }
        Self::new(ascendant, cusps, bodies)
    }

    pub fn positions(&self) -> &[PlanetPosition] {
        &self.positions
    }

    /// Looks up one body; a missing body is a skip condition for the
    /// referencing rule, never an error.
    pub fn position(&self, planet: Planet) -> Option<&PlanetPosition> {
        self.positions.iter().find(|p| p.planet == planet)
    }

    pub fn ascendant_sign(&self) -> ZodiacSign {
        ZodiacSign::from_longitude(self.ascendant)
    }

    /// All bodies occupying the given house.
    pub fn occupants(&self, house: u8) -> Vec<&PlanetPosition> {
        self.positions.iter().filter(|p| p.house == house).collect()
    }
}

const MIN_HOUSE_SPAN: f64 = 1e-6;

fn has_degenerate_cusps(cusps: &[f64; 12]) -> bool {
    (0..12).any(|i| {
        let span = (cusps[(i + 1) % 12] - cusps[i]).rem_euclid(360.0);
        span < MIN_HOUSE_SPAN
    })
}

fn resolve_house(longitude: f64, cusps: &[f64; 12], degenerate: bool) -> u8 {
    let lon = longitude.rem_euclid(360.0);
    if degenerate {
        // Tolerated degraded mode: equal 30-degree spans from the first cusp.
        let offset = (lon - cusps[0]).rem_euclid(360.0);
        return (offset / 30.0) as u8 + 1;
    }
    for i in 0..12 {
        let start = cusps[i];
        let span = (cusps[(i + 1) % 12] - start).rem_euclid(360.0);
        let offset = (lon - start).rem_euclid(360.0);
        if offset < span {
            return i as u8 + 1;
        }
    }
    // Unreachable for well-formed cusps; treat as first house rather than fail.
    1
}

/// Closed taxonomy of pattern families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum YogaCategory {
    Authority,
    Wealth,
    HouseLordPlacement,
    AscendantBased,
    ShapeBased,
    ExchangeBased,
    Renunciation,
    Negative,
    CompositeRare,
}

impl YogaCategory {
    pub const ALL: [YogaCategory; 9] = [
        YogaCategory::Authority,
        YogaCategory::Wealth,
        YogaCategory::HouseLordPlacement,
        YogaCategory::AscendantBased,
        YogaCategory::ShapeBased,
        YogaCategory::ExchangeBased,
        YogaCategory::Renunciation,
        YogaCategory::Negative,
        YogaCategory::CompositeRare,
    ];
}

impl fmt::Display for YogaCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            YogaCategory::Authority => "Authority/Power",
            YogaCategory::Wealth => "Wealth",
            YogaCategory::HouseLordPlacement => "House Lord Placement",
            YogaCategory::AscendantBased => "Ascendant Based",
            YogaCategory::ShapeBased => "Shape Based",
            YogaCategory::ExchangeBased => "Exchange Based",
            YogaCategory::Renunciation => "Renunciation",
            YogaCategory::Negative => "Negative/Affliction",
            YogaCategory::CompositeRare => "Rare Composite",
        };
        write!(f, "{name}")
    }
}

/// Ordinal strength band, always derived from the percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StrengthBand {
    Weak,
    Moderate,
    Strong,
    VeryStrong,
    ExtremelyStrong,
}

impl StrengthBand {
    pub fn from_percentage(percentage: f64) -> StrengthBand {
        match percentage {
            p if p >= 90.0 => StrengthBand::ExtremelyStrong,
            p if p >= 80.0 => StrengthBand::VeryStrong,
            p if p >= 60.0 => StrengthBand::Strong,
            p if p >= 40.0 => StrengthBand::Moderate,
            _ => StrengthBand::Weak,
        }
    }
}

impl fmt::Display for StrengthBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StrengthBand::Weak => "Weak",
            StrengthBand::Moderate => "Moderate",
            StrengthBand::Strong => "Strong",
            StrengthBand::VeryStrong => "Very Strong",
            StrengthBand::ExtremelyStrong => "Extremely Strong",
        };
        write!(f, "{name}")
    }
}

pub const CLEAN_YOGA_NOTE: &str = "No afflictions - yoga operates at full strength";

/// One detected configuration. Created by exactly one evaluator call,
/// immutable afterwards; overlapping detections stay distinct records.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Yoga {
    pub name: String,
    pub category: YogaCategory,
    pub planets: Vec<Planet>,
    pub houses: Vec<u8>,
    pub description: String,
    pub effects: String,
    pub strength: StrengthBand,
    pub strength_percentage: f64,
    pub is_auspicious: bool,
    pub activation: String,
    pub cancellation_factors: Vec<String>,
}

impl Yoga {
    /// Starts a record with the strength clamped to [10, 100], the band
    /// derived from it, and a default clean cancellation entry.
    pub fn new(
        name: impl Into<String>,
        category: YogaCategory,
        strength_percentage: f64,
        is_auspicious: bool,
    ) -> Yoga {
        let clamped = strength_percentage.clamp(10.0, 100.0);
        Yoga {
            name: name.into(),
            category,
            planets: Vec::new(),
            houses: Vec::new(),
            description: String::new(),
            effects: String::new(),
            strength: StrengthBand::from_percentage(clamped),
            strength_percentage: clamped,
            is_auspicious,
            activation: String::new(),
            cancellation_factors: vec![CLEAN_YOGA_NOTE.to_string()],
        }
    }

    pub fn planets(mut self, planets: Vec<Planet>) -> Yoga {
        self.planets = planets;
        self
    }

    pub fn houses(mut self, houses: Vec<u8>) -> Yoga {
        self.houses = houses;
        self
    }

    pub fn describe(mut self, description: impl Into<String>, effects: impl Into<String>) -> Yoga {
        self.description = description.into();
        self.effects = effects.into();
        self
    }

    pub fn activation(mut self, activation: impl Into<String>) -> Yoga {
        self.activation = activation.into();
        self
    }

    /// Replaces the default clean note; an empty list keeps the default
    /// so the cancellation rationale is never absent.
    pub fn cancellations(mut self, factors: Vec<String>) -> Yoga {
        if !factors.is_empty() {
            self.cancellation_factors = factors;
        }
        self
    }
}

/// Flat result set for one chart. Backed by a persistent vector so
/// downstream consumers can share and re-sort cheaply.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResults {
    pub yogas: im::Vector<Yoga>,
}

impl AnalysisResults {
    pub fn new(yogas: Vec<Yoga>) -> AnalysisResults {
        AnalysisResults {
            yogas: yogas.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.yogas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.yogas.is_empty()
    }

    pub fn auspicious_count(&self) -> usize {
        self.yogas.iter().filter(|y| y.is_auspicious).count()
    }

    pub fn in_category(&self, category: YogaCategory) -> impl Iterator<Item = &Yoga> {
        self.yogas.iter().filter(move |y| y.category == category)
    }

    /// Strength-descending order with a name tie-break, so presentation
    /// order is stable regardless of evaluation order.
    pub fn sorted_by_strength(&self) -> Vec<Yoga> {
        let mut sorted: Vec<Yoga> = self.yogas.iter().cloned().collect();
        sorted.sort_by(|a, b| {
            b.strength_percentage
                .partial_cmp(&a.strength_percentage)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.name.cmp(&b.name))
        });
        sorted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_from_longitude_wraps() {
        assert_eq!(ZodiacSign::from_longitude(0.0), ZodiacSign::Aries);
        assert_eq!(ZodiacSign::from_longitude(359.9), ZodiacSign::Pisces);
        assert_eq!(ZodiacSign::from_longitude(365.0), ZodiacSign::Aries);
        assert_eq!(ZodiacSign::from_longitude(-5.0), ZodiacSign::Pisces);
    }

    #[test]
    fn sign_opposite_is_six_away() {
        assert_eq!(ZodiacSign::Aries.opposite(), ZodiacSign::Libra);
        assert_eq!(ZodiacSign::Capricorn.opposite(), ZodiacSign::Cancer);
    }

    #[test]
    fn whole_sign_houses_follow_ascendant() {
        let chart = Chart::whole_sign(
            275.0,
            &[(Planet::Mars, 298.0), (Planet::Sun, 95.0), (Planet::Moon, 280.0)],
        );
        assert_eq!(chart.ascendant_sign(), ZodiacSign::Capricorn);
        assert_eq!(chart.position(Planet::Mars).map(|p| p.house), Some(1));
        assert_eq!(chart.position(Planet::Sun).map(|p| p.house), Some(7));
        assert_eq!(chart.position(Planet::Moon).map(|p| p.house), Some(1));
    }

    #[test]
    fn degenerate_cusps_fall_back_to_equal_houses() {
        let cusps = [10.0; 12];
        let chart = Chart::new(10.0, cusps, &[(Planet::Jupiter, 100.0, 0.1)]);
        assert_eq!(chart.position(Planet::Jupiter).map(|p| p.house), Some(4));
    }

    #[test]
    fn band_thresholds() {
        assert_eq!(StrengthBand::from_percentage(39.9), StrengthBand::Weak);
        assert_eq!(StrengthBand::from_percentage(40.0), StrengthBand::Moderate);
        assert_eq!(StrengthBand::from_percentage(59.9), StrengthBand::Moderate);
        assert_eq!(StrengthBand::from_percentage(60.0), StrengthBand::Strong);
        assert_eq!(StrengthBand::from_percentage(79.9), StrengthBand::Strong);
        assert_eq!(StrengthBand::from_percentage(80.0), StrengthBand::VeryStrong);
        assert_eq!(StrengthBand::from_percentage(90.0), StrengthBand::ExtremelyStrong);
    }

    #[test]
    fn yoga_constructor_clamps_and_defaults_cancellations() {
        let yoga = Yoga::new("Test", YogaCategory::Wealth, 140.0, true);
        assert_eq!(yoga.strength_percentage, 100.0);
        assert_eq!(yoga.strength, StrengthBand::ExtremelyStrong);
        assert_eq!(yoga.cancellation_factors, vec![CLEAN_YOGA_NOTE.to_string()]);

        let floored = Yoga::new("Test", YogaCategory::Wealth, -5.0, false);
        assert_eq!(floored.strength_percentage, 10.0);

        let kept = Yoga::new("Test", YogaCategory::Wealth, 50.0, true).cancellations(vec![]);
        assert_eq!(kept.cancellation_factors.len(), 1);
    }
}
