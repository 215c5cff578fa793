//! Conjunction, drishti (sign-based aspect), exchange, and hemming
//! predicates.

use crate::core::constants::{CONJUNCTION_ORB, NATURAL_BENEFICS, NATURAL_MALEFICS};
use crate::core::{Chart, Planet, PlanetPosition};
use crate::relations::{circular_distance, house_from};

/// Conjunction under the default orb.
pub fn are_conjunct(a: &PlanetPosition, b: &PlanetPosition) -> bool {
    are_conjunct_within(a, b, CONJUNCTION_ORB)
}

pub fn are_conjunct_within(a: &PlanetPosition, b: &PlanetPosition, orb: f64) -> bool {
    circular_distance(a.longitude, b.longitude) <= orb
}

/// Sign-based drishti. Every planet casts the 7th-house aspect; Mars
/// additionally casts 4th and 8th, Jupiter 5th and 9th, Saturn 3rd and
/// 10th, and the nodes 5th and 9th. The special aspects are always in
/// addition to the universal 7th, never instead of it.
pub fn is_aspecting(from: &PlanetPosition, to: &PlanetPosition) -> bool {
    let distance = house_from(to.sign(), from.sign());
    if distance == 7 {
        return true;
    }
    match from.planet {
        Planet::Mars => distance == 4 || distance == 8,
        Planet::Jupiter | Planet::Rahu | Planet::Ketu => distance == 5 || distance == 9,
        Planet::Saturn => distance == 3 || distance == 10,
        _ => false,
    }
}

/// Near-exact degree opposition, the strongest mutual aspect.
pub fn are_mutually_aspecting(a: &PlanetPosition, b: &PlanetPosition) -> bool {
    let separation = circular_distance(a.longitude, b.longitude);
    (170.0..=190.0).contains(&separation)
}

/// Parivartana: each planet occupies a sign owned by the other.
/// Symmetric by construction.
pub fn are_in_exchange(a: &PlanetPosition, b: &PlanetPosition) -> bool {
    a.sign().ruler() == b.planet && b.sign().ruler() == a.planet
}

/// Whether the named planet aspects the position, if present in the chart.
pub fn aspected_by(chart: &Chart, pos: &PlanetPosition, planet: Planet) -> bool {
    chart
        .position(planet)
        .is_some_and(|p| p.planet != pos.planet && is_aspecting(p, pos))
}

/// Papakartari: malefics occupy both houses adjacent to the position's
/// house, hemming it in.
pub fn is_hemmed_by_malefics(chart: &Chart, pos: &PlanetPosition) -> bool {
    house_hemmed_by_malefics(chart, pos.house)
}

pub fn house_hemmed_by_malefics(chart: &Chart, house: u8) -> bool {
    let prev = if house == 1 { 12 } else { house - 1 };
    let next = if house == 12 { 1 } else { house + 1 };
    let malefic_in = |h: u8| {
        chart
            .positions()
            .iter()
            .any(|p| p.house == h && NATURAL_MALEFICS.contains(&p.planet))
    };
    malefic_in(prev) && malefic_in(next)
}

/// Subhakartari counterpart: benefics on both sides of a house.
pub fn house_hemmed_by_benefics(chart: &Chart, house: u8) -> bool {
    let prev = if house == 1 { 12 } else { house - 1 };
    let next = if house == 12 { 1 } else { house + 1 };
    let benefic_in = |h: u8| {
        chart
            .positions()
            .iter()
            .any(|p| p.house == h && NATURAL_BENEFICS.contains(&p.planet))
    };
    benefic_in(prev) && benefic_in(next)
}

/// Conjunction, near-exact opposition, or mutual sign aspect: the
/// "connected" test used by lord-link yogas.
pub fn are_connected(a: &PlanetPosition, b: &PlanetPosition) -> bool {
    are_conjunct(a, b)
        || are_mutually_aspecting(a, b)
        || (is_aspecting(a, b) && is_aspecting(b, a))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Chart;

    fn pair(p1: Planet, lon1: f64, p2: Planet, lon2: f64) -> Chart {
        Chart::whole_sign(0.0, &[(p1, lon1), (p2, lon2)])
    }

    #[test]
    fn conjunction_respects_orb_and_wrap() {
        let chart = pair(Planet::Sun, 358.0, Planet::Moon, 5.0);
        let sun = chart.position(Planet::Sun).unwrap();
        let moon = chart.position(Planet::Moon).unwrap();
        assert!(are_conjunct(sun, moon));
        assert!(!are_conjunct_within(sun, moon, 5.0));
    }

    #[test]
    fn universal_seventh_aspect() {
        let chart = pair(Planet::Venus, 10.0, Planet::Moon, 190.0);
        let venus = chart.position(Planet::Venus).unwrap();
        let moon = chart.position(Planet::Moon).unwrap();
        assert!(is_aspecting(venus, moon));
        assert!(is_aspecting(moon, venus));
    }

    #[test]
    fn special_aspects_are_additive() {
        // Saturn in Aries aspects Gemini (3rd), Libra (7th), Capricorn (10th).
        let chart = Chart::whole_sign(
            0.0,
            &[
                (Planet::Saturn, 10.0),
                (Planet::Moon, 75.0),
                (Planet::Sun, 190.0),
                (Planet::Mars, 280.0),
                (Planet::Venus, 40.0),
            ],
        );
        let saturn = chart.position(Planet::Saturn).unwrap();
        assert!(is_aspecting(saturn, chart.position(Planet::Moon).unwrap()));
        assert!(is_aspecting(saturn, chart.position(Planet::Sun).unwrap()));
        assert!(is_aspecting(saturn, chart.position(Planet::Mars).unwrap()));
        assert!(!is_aspecting(saturn, chart.position(Planet::Venus).unwrap()));
    }

    #[test]
    fn exchange_is_symmetric() {
        // Mars in Taurus, Venus in Aries.
        let chart = pair(Planet::Mars, 40.0, Planet::Venus, 10.0);
        let mars = chart.position(Planet::Mars).unwrap();
        let venus = chart.position(Planet::Venus).unwrap();
        assert!(are_in_exchange(mars, venus));
        assert!(are_in_exchange(venus, mars));
    }

    #[test]
    fn hemming_requires_both_sides() {
        // Jupiter in house 2; Saturn in 1, Mars in 3.
        let chart = Chart::whole_sign(
            0.0,
            &[
                (Planet::Jupiter, 40.0),
                (Planet::Saturn, 10.0),
                (Planet::Mars, 70.0),
            ],
        );
        let jupiter = chart.position(Planet::Jupiter).unwrap();
        assert!(is_hemmed_by_malefics(&chart, jupiter));

        let open = Chart::whole_sign(0.0, &[(Planet::Jupiter, 40.0), (Planet::Saturn, 10.0)]);
        assert!(!is_hemmed_by_malefics(
            &open,
            open.position(Planet::Jupiter).unwrap()
        ));
    }
}
