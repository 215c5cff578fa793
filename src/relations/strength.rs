//! The single scoring path every evaluator goes through. Two unrelated
//! evaluators detecting the same kind of configuration must score it
//! identically, so no rule module hand-rolls its own arithmetic.

use crate::core::constants::{
    benefic_aspect_weight, combustion_orb, malefic_aspect_weight, DUSTHANA_HOUSES,
    NATURAL_BENEFICS, NATURAL_MALEFICS,
};
use crate::core::{Chart, Planet, PlanetPosition};
use crate::relations::dignity::{
    has_dig_bala, has_neecha_bhanga, is_debilitated, is_exalted, is_in_enemy_sign,
    is_in_friend_sign, is_in_own_sign,
};
use crate::relations::{aspects, circular_distance, moon_phase_strength};

pub const MIN_STRENGTH: f64 = 10.0;
pub const MAX_STRENGTH: f64 = 100.0;

/// Combustion factor: 1.0 outside the planet's orb of the Sun, 0.2
/// within 3 degrees, linear in between. The Sun and the nodes never
/// combust.
pub fn combustion_factor(chart: &Chart, pos: &PlanetPosition) -> f64 {
    if pos.planet == Planet::Sun || pos.planet.is_node() {
        return 1.0;
    }
    let Some(sun) = chart.position(Planet::Sun) else {
        return 1.0;
    };
    let distance = circular_distance(pos.longitude, sun.longitude);
    let orb = combustion_orb(pos.planet, pos.is_retrograde());
    if distance >= orb {
        return 1.0;
    }
    if distance <= 3.0 {
        return 0.2;
    }
    let depth = 1.0 - distance / orb;
    1.0 - depth * 0.6
}

/// Malefic affliction: each malefic aspecting the position subtracts
/// its weight, capped at 0.6 total.
pub fn affliction_factor(chart: &Chart, pos: &PlanetPosition) -> f64 {
    let mut total = 0.0;
    for malefic in NATURAL_MALEFICS {
        if malefic == pos.planet {
            continue;
        }
        if let Some(mpos) = chart.position(malefic) {
            if aspects::is_aspecting(mpos, pos) {
                total += malefic_aspect_weight(malefic);
            }
        }
    }
    1.0 - total.min(0.6)
}

/// Benefic support: aspects from benefics add up to +0.3. A waning
/// Moon and a combust Mercury are too weak to lend support.
pub fn benefic_boost(chart: &Chart, pos: &PlanetPosition) -> f64 {
    let mut total = 0.0;
    for benefic in NATURAL_BENEFICS {
        if benefic == pos.planet {
            continue;
        }
        let Some(bpos) = chart.position(benefic) else {
            continue;
        };
        if benefic == Planet::Moon && moon_phase_strength(chart) < 0.5 {
            continue;
        }
        if benefic == Planet::Mercury && combustion_factor(chart, bpos) < 0.6 {
            continue;
        }
        if aspects::is_aspecting(bpos, pos) {
            total += benefic_aspect_weight(benefic);
        }
    }
    1.0 + total.min(0.3)
}

/// Net cancellation factor over the participating positions, with the
/// human-readable reasons that were folded in. Clamped to [0.1, 1.5].
pub fn cancellation_factor(chart: &Chart, positions: &[&PlanetPosition]) -> (f64, Vec<String>) {
    let mut net = 1.0;
    let mut reasons = Vec::new();

    for pos in positions {
        let combustion = combustion_factor(chart, pos);
        if combustion < 0.9 {
            net *= combustion;
            if combustion < 0.5 {
                reasons.push(format!("{} is deeply combust", pos.planet));
            } else if combustion < 0.8 {
                reasons.push(format!("{} is combust", pos.planet));
            }
        }

        if aspects::is_hemmed_by_malefics(chart, pos) {
            net *= 0.7;
            reasons.push(format!("{} hemmed between malefics", pos.planet));
        }

        let affliction = affliction_factor(chart, pos);
        if affliction < 0.9 {
            net *= affliction;
            if affliction < 0.7 {
                reasons.push(format!("{} severely afflicted by malefics", pos.planet));
            }
        }

        if is_debilitated(pos) && !has_neecha_bhanga(chart, pos) {
            net *= 0.5;
            reasons.push(format!("{} debilitated without cancellation", pos.planet));
        }

        if is_in_enemy_sign(pos) {
            net *= 0.85;
            reasons.push(format!("{} in enemy sign", pos.planet));
        }

        let boost = benefic_boost(chart, pos);
        if boost > 1.0 {
            net *= boost;
        }
    }

    (net.clamp(0.1, 1.5), reasons)
}

fn placement_score(pos: &PlanetPosition) -> f64 {
    let mut score = 0.0;
    if is_exalted(pos) {
        score += 15.0;
    }
    if is_in_own_sign(pos) {
        score += 12.0;
    }
    if is_in_friend_sign(pos) {
        score += 6.0;
    }
    if matches!(pos.house, 1 | 4 | 5 | 7 | 9 | 10) {
        score += 8.0;
    }
    if matches!(pos.house, 2 | 11) {
        score += 4.0;
    }
    if is_debilitated(pos) {
        score -= 15.0;
    }
    if DUSTHANA_HOUSES.contains(&pos.house) {
        score -= 10.0;
    }
    if pos.is_retrograde() {
        score += match pos.planet {
            Planet::Jupiter | Planet::Venus | Planet::Mercury => 5.0,
            Planet::Saturn => 3.0,
            Planet::Mars => -2.0,
            _ => 0.0,
        };
    }
    if has_dig_bala(pos) {
        score += 7.0;
    }
    score
}

/// Composite strength of a configuration: base 50 plus per-participant
/// placement modifiers, scaled by the net cancellation factor.
pub fn yoga_strength(chart: &Chart, positions: &[&PlanetPosition]) -> f64 {
    yoga_strength_with_reasons(chart, positions).0
}

pub fn yoga_strength_with_reasons(
    chart: &Chart,
    positions: &[&PlanetPosition],
) -> (f64, Vec<String>) {
    let base: f64 = 50.0 + positions.iter().map(|p| placement_score(p)).sum::<f64>();
    let (factor, reasons) = cancellation_factor(chart, positions);
    ((base * factor).clamp(MIN_STRENGTH, MAX_STRENGTH), reasons)
}

/// Same modifiers applied over an evaluator-supplied base value, for
/// families whose catalog entries carry fixed base strengths.
pub fn scaled_strength(chart: &Chart, positions: &[&PlanetPosition], base: f64) -> (f64, Vec<String>) {
    let (factor, reasons) = cancellation_factor(chart, positions);
    ((base * factor).clamp(MIN_STRENGTH, MAX_STRENGTH), reasons)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Chart;

    #[test]
    fn combustion_tiers() {
        let deep = Chart::whole_sign(0.0, &[(Planet::Sun, 100.0), (Planet::Mercury, 102.0)]);
        let merc = deep.position(Planet::Mercury).unwrap();
        assert!((combustion_factor(&deep, merc) - 0.2).abs() < 1e-9);

        let partial = Chart::whole_sign(0.0, &[(Planet::Sun, 100.0), (Planet::Mercury, 107.0)]);
        let merc = partial.position(Planet::Mercury).unwrap();
        let factor = combustion_factor(&partial, merc);
        assert!(factor > 0.2 && factor < 1.0);

        let free = Chart::whole_sign(0.0, &[(Planet::Sun, 100.0), (Planet::Mercury, 130.0)]);
        let merc = free.position(Planet::Mercury).unwrap();
        assert_eq!(combustion_factor(&free, merc), 1.0);
    }

    #[test]
    fn nodes_never_combust() {
        let chart = Chart::whole_sign(0.0, &[(Planet::Sun, 100.0), (Planet::Rahu, 101.0)]);
        assert_eq!(
            combustion_factor(&chart, chart.position(Planet::Rahu).unwrap()),
            1.0
        );
    }

    #[test]
    fn combustion_lowers_composite_strength() {
        // Venus in Gemini house 3: dignity-neutral for Venus.
        let burnt = Chart::whole_sign(0.0, &[(Planet::Venus, 75.0), (Planet::Sun, 78.0)]);
        let clean = Chart::whole_sign(0.0, &[(Planet::Venus, 75.0), (Planet::Sun, 135.0)]);
        let burnt_strength = yoga_strength(&burnt, &[burnt.position(Planet::Venus).unwrap()]);
        let clean_strength = yoga_strength(&clean, &[clean.position(Planet::Venus).unwrap()]);
        assert!(burnt_strength < clean_strength);
    }

    #[test]
    fn strength_is_always_bounded() {
        let chart = Chart::whole_sign(
            275.0,
            &[
                (Planet::Mars, 298.0),
                (Planet::Jupiter, 95.0),
                (Planet::Venus, 355.0),
            ],
        );
        let positions: Vec<_> = chart.positions().iter().collect();
        let strength = yoga_strength(&chart, &positions);
        assert!((MIN_STRENGTH..=MAX_STRENGTH).contains(&strength));
    }

    #[test]
    fn debilitation_without_bhanga_halves_factor() {
        // Gemini lagna; Venus debilitated in Virgo (house 4 would be a
        // kendra, so use Leo lagna: Virgo is house 2), dispositor and
        // supports away from kendras.
        let chart = Chart::whole_sign(
            125.0,
            &[
                (Planet::Venus, 160.0),
                (Planet::Mercury, 185.0),
                (Planet::Moon, 215.0),
                (Planet::Jupiter, 250.0),
            ],
        );
        let venus = chart.position(Planet::Venus).unwrap();
        assert!(is_debilitated(venus));
        let (factor, reasons) = cancellation_factor(&chart, &[venus]);
        assert!(factor < 1.0);
        assert!(reasons.iter().any(|r| r.contains("debilitated")));
    }
}
