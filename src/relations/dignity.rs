//! Sign-based dignity judgments and debilitation cancellation.

use crate::core::constants::{
    self, debilitation_sign, exaltation_sign, natural_enemies, natural_friends, own_signs,
    KENDRA_HOUSES,
};
use crate::core::{Chart, Planet, PlanetPosition};
use crate::relations::is_in_kendra_from;

pub fn is_exalted(pos: &PlanetPosition) -> bool {
    pos.sign() == exaltation_sign(pos.planet)
}

pub fn is_debilitated(pos: &PlanetPosition) -> bool {
    pos.sign() == debilitation_sign(pos.planet)
}

pub fn is_in_own_sign(pos: &PlanetPosition) -> bool {
    own_signs(pos.planet).contains(&pos.sign())
}

/// Exalted or in own sign: the dignity bar used by most named yogas.
pub fn is_dignified(pos: &PlanetPosition) -> bool {
    is_exalted(pos) || is_in_own_sign(pos)
}

pub fn is_in_friend_sign(pos: &PlanetPosition) -> bool {
    natural_friends(pos.planet).contains(&pos.sign().ruler())
}

pub fn is_in_enemy_sign(pos: &PlanetPosition) -> bool {
    natural_enemies(pos.planet).contains(&pos.sign().ruler())
}

pub fn has_dig_bala(pos: &PlanetPosition) -> bool {
    constants::dig_bala_house(pos.planet) == Some(pos.house)
}

/// Neecha bhanga: cancellation of debilitation, per Phaladeepika.
/// Any one of five supporting placements waives the affliction:
/// the planet itself in a kendra from the lagna or from the Moon, its
/// dispositor or the lord of its exaltation sign in a kendra from
/// either, or the planet that would be exalted in the occupied sign in
/// a kendra from either.
pub fn has_neecha_bhanga(chart: &Chart, pos: &PlanetPosition) -> bool {
    let moon = chart.position(Planet::Moon);
    let in_kendra = |candidate: &PlanetPosition| {
        KENDRA_HOUSES.contains(&candidate.house)
            || moon.is_some_and(|m| is_in_kendra_from(candidate, m))
    };

    if KENDRA_HOUSES.contains(&pos.house) {
        return true;
    }
    if let Some(lord) = chart.position(pos.sign().ruler()) {
        if in_kendra(lord) {
            return true;
        }
    }
    if let Some(exalt_lord) = chart.position(exaltation_sign(pos.planet).ruler()) {
        if in_kendra(exalt_lord) {
            return true;
        }
    }
    let exalted_here = Planet::ALL
        .iter()
        .find(|&&p| exaltation_sign(p) == pos.sign())
        .and_then(|&p| chart.position(p));
    if let Some(counterpart) = exalted_here {
        if in_kendra(counterpart) {
            return true;
        }
    }
    moon.is_some_and(|m| is_in_kendra_from(pos, m))
}

/// Describes which bhanga rule applies, for cancellation narrative.
pub fn neecha_bhanga_reason(chart: &Chart, pos: &PlanetPosition) -> Option<String> {
    if !is_debilitated(pos) || !has_neecha_bhanga(chart, pos) {
        return None;
    }
    if KENDRA_HOUSES.contains(&pos.house) {
        return Some(format!("{} holds a kendra despite debilitation", pos.planet));
    }
    if let Some(lord) = chart.position(pos.sign().ruler()) {
        if KENDRA_HOUSES.contains(&lord.house) {
            return Some(format!(
                "Dispositor {} in a kendra cancels the debilitation",
                lord.planet
            ));
        }
    }
    Some(format!(
        "Supporting placements cancel {}'s debilitation",
        pos.planet
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Chart;

    fn solo(planet: Planet, longitude: f64) -> Chart {
        Chart::whole_sign(0.0, &[(planet, longitude)])
    }

    #[test]
    fn exaltation_and_debilitation() {
        let mars = solo(Planet::Mars, 298.0);
        assert!(is_exalted(mars.position(Planet::Mars).unwrap()));
        let mars_fallen = solo(Planet::Mars, 100.0);
        assert!(is_debilitated(mars_fallen.position(Planet::Mars).unwrap()));
    }

    #[test]
    fn own_sign_detection() {
        let saturn = solo(Planet::Saturn, 305.0); // Aquarius
        assert!(is_in_own_sign(saturn.position(Planet::Saturn).unwrap()));
        assert!(is_dignified(saturn.position(Planet::Saturn).unwrap()));
    }

    #[test]
    fn friend_and_enemy_signs() {
        // Moon in Leo: Sun is the Moon's friend.
        let moon = solo(Planet::Moon, 130.0);
        assert!(is_in_friend_sign(moon.position(Planet::Moon).unwrap()));
        // Venus in Cancer: Moon is Venus's enemy.
        let venus = solo(Planet::Venus, 100.0);
        assert!(is_in_enemy_sign(venus.position(Planet::Venus).unwrap()));
    }

    #[test]
    fn debilitated_planet_in_kendra_has_bhanga() {
        // Aries ascendant, Mars in Cancer sits in house 4.
        let chart = Chart::whole_sign(5.0, &[(Planet::Mars, 100.0)]);
        let mars = chart.position(Planet::Mars).unwrap();
        assert!(is_debilitated(mars));
        assert!(has_neecha_bhanga(&chart, mars));
    }

    #[test]
    fn debilitated_without_support_has_no_bhanga() {
        // Aries ascendant, Venus debilitated in Virgo (house 6); its
        // dispositor Mercury and the Pisces lord Jupiter kept out of
        // kendras from both the lagna and the Moon.
        let chart = Chart::whole_sign(
            0.0,
            &[
                (Planet::Venus, 160.0),
                (Planet::Mercury, 70.0),
                (Planet::Moon, 130.0),
                (Planet::Jupiter, 165.0),
            ],
        );
        let venus = chart.position(Planet::Venus).unwrap();
        assert!(is_debilitated(venus));
        assert!(!has_neecha_bhanga(&chart, venus));
    }

    #[test]
    fn dig_bala_houses() {
        let chart = Chart::whole_sign(0.0, &[(Planet::Jupiter, 15.0), (Planet::Sun, 285.0)]);
        assert!(has_dig_bala(chart.position(Planet::Jupiter).unwrap()));
        assert!(has_dig_bala(chart.position(Planet::Sun).unwrap()));
    }
}
