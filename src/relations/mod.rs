//! Pure chart-relative relationship functions shared by every
//! evaluator. All evaluators must get identical answers for lordship,
//! geometry, dignity, aspects, and strength, so these are the single
//! source of truth for those judgments.

pub mod aspects;
pub mod dignity;
pub mod strength;

use crate::core::constants::KENDRA_HOUSES;
use crate::core::{Chart, Planet, PlanetPosition, ZodiacSign};

/// House lordship map for an ascendant sign: entry `n-1` is the lord of
/// house `n` (the ruler of the sign `n-1` positions past the ascendant
/// sign).
pub fn house_lords(ascendant_sign: ZodiacSign) -> [Planet; 12] {
    let mut lords = [Planet::Sun; 12];
    for (offset, lord) in lords.iter_mut().enumerate() {
        *lord = ZodiacSign::from_index(ascendant_sign.index() + offset).ruler();
    }
    lords
}

/// Lord of a specific house (1-12) for the chart's ascendant.
pub fn house_lord(chart: &Chart, house: u8) -> Planet {
    house_lords(chart.ascendant_sign())[(house - 1) as usize]
}

/// The lord of a house together with its placement, when the lord is
/// present in the chart.
pub fn lord_position<'a>(chart: &'a Chart, house: u8) -> Option<&'a PlanetPosition> {
    chart.position(house_lord(chart, house))
}

/// House position of a target sign counted from a reference sign,
/// 1-12 where 1 means the same sign.
pub fn house_from(target: ZodiacSign, reference: ZodiacSign) -> u8 {
    let diff = target.number() as i8 - reference.number() as i8;
    if diff >= 0 {
        (diff + 1) as u8
    } else {
        (diff + 13) as u8
    }
}

pub fn is_in_kendra_from(pos: &PlanetPosition, reference: &PlanetPosition) -> bool {
    KENDRA_HOUSES.contains(&house_from(pos.sign(), reference.sign()))
}

/// Absolute circular separation of two longitudes, 0-180.
pub fn circular_distance(a: f64, b: f64) -> f64 {
    let distance = (a - b).abs() % 360.0;
    if distance > 180.0 {
        360.0 - distance
    } else {
        distance
    }
}

/// The ruler of the sign a planet occupies, located in the chart.
pub fn dispositor<'a>(chart: &'a Chart, pos: &PlanetPosition) -> Option<&'a PlanetPosition> {
    chart.position(pos.sign().ruler())
}

/// Sun in houses 7-12 sits above the horizon.
pub fn is_day_birth(chart: &Chart) -> bool {
    chart
        .position(Planet::Sun)
        .map(|sun| sun.house >= 7)
        .unwrap_or(true)
}

/// Paksha bala: 0.0 at new moon, 1.0 at full moon. Below 0.5 the Moon
/// is waning or too close to the Sun to lend support.
pub fn moon_phase_strength(chart: &Chart) -> f64 {
    let (Some(moon), Some(sun)) = (chart.position(Planet::Moon), chart.position(Planet::Sun))
    else {
        return 0.5;
    };
    let elongation = (moon.longitude - sun.longitude).rem_euclid(360.0);
    if elongation <= 180.0 {
        elongation / 180.0
    } else {
        (360.0 - elongation) / 180.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn aries_ascendant_lords() {
        let lords = house_lords(ZodiacSign::Aries);
        assert_eq!(lords[0], Planet::Mars);
        assert_eq!(lords[3], Planet::Moon);
        assert_eq!(lords[4], Planet::Sun);
        assert_eq!(lords[9], Planet::Saturn);
        assert_eq!(lords[11], Planet::Jupiter);
    }

    #[test]
    fn capricorn_ascendant_lords() {
        let lords = house_lords(ZodiacSign::Capricorn);
        assert_eq!(lords[0], Planet::Saturn);
        assert_eq!(lords[3], Planet::Mars); // 4th house is Aries
        assert_eq!(lords[9], Planet::Venus); // 10th house is Libra
        assert_eq!(lords[10], Planet::Mars); // 11th house is Scorpio
    }

    #[test]
    fn house_from_counts_forward() {
        assert_eq!(house_from(ZodiacSign::Aries, ZodiacSign::Aries), 1);
        assert_eq!(house_from(ZodiacSign::Cancer, ZodiacSign::Aries), 4);
        assert_eq!(house_from(ZodiacSign::Aries, ZodiacSign::Cancer), 10);
        assert_eq!(house_from(ZodiacSign::Pisces, ZodiacSign::Aries), 12);
    }

    #[test]
    fn circular_distance_wraps() {
        assert_eq!(circular_distance(10.0, 350.0), 20.0);
        assert_eq!(circular_distance(0.0, 180.0), 180.0);
        assert_eq!(circular_distance(5.0, 5.0), 0.0);
    }

    #[test]
    fn moon_phase_peaks_at_opposition() {
        let full = Chart::whole_sign(0.0, &[(Planet::Sun, 10.0), (Planet::Moon, 190.0)]);
        assert!((moon_phase_strength(&full) - 1.0).abs() < 1e-9);
        let new = Chart::whole_sign(0.0, &[(Planet::Sun, 10.0), (Planet::Moon, 12.0)]);
        assert!(moon_phase_strength(&new) < 0.02);
    }
}
