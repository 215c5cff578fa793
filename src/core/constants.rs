//! Fixed astrological reference tables and centralized orb thresholds.
//!
//! Dignity tables follow Brihat Parasara Hora Shastra; combustion orbs
//! follow Saravali. Orb values used to drift across rule modules; they
//! are defined once here and nowhere else.

use crate::core::{Planet, ZodiacSign};

/// Ruling planet of each sign, Aries first.
pub const SIGN_RULERS: [Planet; 12] = [
    Planet::Mars,    // Aries
    Planet::Venus,   // Taurus
    Planet::Mercury, // Gemini
    Planet::Moon,    // Cancer
    Planet::Sun,     // Leo
    Planet::Mercury, // Virgo
    Planet::Venus,   // Libra
    Planet::Mars,    // Scorpio
    Planet::Jupiter, // Sagittarius
    Planet::Saturn,  // Capricorn
    Planet::Saturn,  // Aquarius
    Planet::Jupiter, // Pisces
];

pub fn exaltation_sign(planet: Planet) -> ZodiacSign {
    match planet {
        Planet::Sun => ZodiacSign::Aries,
        Planet::Moon => ZodiacSign::Taurus,
        Planet::Mars => ZodiacSign::Capricorn,
        Planet::Mercury => ZodiacSign::Virgo,
        Planet::Jupiter => ZodiacSign::Cancer,
        Planet::Venus => ZodiacSign::Pisces,
        Planet::Saturn => ZodiacSign::Libra,
        Planet::Rahu => ZodiacSign::Taurus,
        Planet::Ketu => ZodiacSign::Scorpio,
    }
}

/// Debilitation is always the sign opposite exaltation.
pub fn debilitation_sign(planet: Planet) -> ZodiacSign {
    exaltation_sign(planet).opposite()
}

pub fn own_signs(planet: Planet) -> &'static [ZodiacSign] {
    match planet {
        Planet::Sun => &[ZodiacSign::Leo],
        Planet::Moon => &[ZodiacSign::Cancer],
        Planet::Mars => &[ZodiacSign::Aries, ZodiacSign::Scorpio],
        Planet::Mercury => &[ZodiacSign::Gemini, ZodiacSign::Virgo],
        Planet::Jupiter => &[ZodiacSign::Sagittarius, ZodiacSign::Pisces],
        Planet::Venus => &[ZodiacSign::Taurus, ZodiacSign::Libra],
        Planet::Saturn => &[ZodiacSign::Capricorn, ZodiacSign::Aquarius],
        Planet::Rahu | Planet::Ketu => &[],
    }
}

pub fn natural_friends(planet: Planet) -> &'static [Planet] {
    match planet {
        Planet::Sun => &[Planet::Moon, Planet::Mars, Planet::Jupiter],
        Planet::Moon => &[Planet::Sun, Planet::Mercury],
        Planet::Mars => &[Planet::Sun, Planet::Moon, Planet::Jupiter],
        Planet::Mercury => &[Planet::Sun, Planet::Venus],
        Planet::Jupiter => &[Planet::Sun, Planet::Moon, Planet::Mars],
        Planet::Venus => &[Planet::Mercury, Planet::Saturn],
        Planet::Saturn => &[Planet::Mercury, Planet::Venus],
        Planet::Rahu | Planet::Ketu => &[],
    }
}

pub fn natural_enemies(planet: Planet) -> &'static [Planet] {
    match planet {
        Planet::Sun => &[Planet::Saturn, Planet::Venus],
        Planet::Moon => &[],
        Planet::Mars => &[Planet::Mercury],
        Planet::Mercury => &[Planet::Moon],
        Planet::Jupiter => &[Planet::Mercury, Planet::Venus],
        Planet::Venus => &[Planet::Sun, Planet::Moon],
        Planet::Saturn => &[Planet::Sun, Planet::Moon, Planet::Mars],
        Planet::Rahu | Planet::Ketu => &[Planet::Sun, Planet::Moon],
    }
}

pub const NATURAL_BENEFICS: [Planet; 4] =
    [Planet::Jupiter, Planet::Venus, Planet::Mercury, Planet::Moon];

pub const NATURAL_MALEFICS: [Planet; 5] = [
    Planet::Saturn,
    Planet::Mars,
    Planet::Rahu,
    Planet::Ketu,
    Planet::Sun,
];

pub const KENDRA_HOUSES: [u8; 4] = [1, 4, 7, 10];
pub const TRIKONA_HOUSES: [u8; 3] = [1, 5, 9];
pub const DUSTHANA_HOUSES: [u8; 3] = [6, 8, 12];
pub const UPACHAYA_HOUSES: [u8; 4] = [3, 6, 10, 11];
/// Wealth-accumulation houses (artha plus the 11th of gains).
pub const ARTHA_HOUSES: [u8; 4] = [2, 6, 10, 11];

/// Default conjunction orb in degrees.
pub const CONJUNCTION_ORB: f64 = 10.0;
/// Wider orb for luminary-node eclipse combinations and Moon-centric checks.
pub const WIDE_CONJUNCTION_ORB: f64 = 12.0;

/// Combustion orb around the Sun; retrograde Mercury and Venus combust
/// at tighter orbs.
pub fn combustion_orb(planet: Planet, retrograde: bool) -> f64 {
    match planet {
        Planet::Moon => 12.0,
        Planet::Mars => 17.0,
        Planet::Mercury => {
            if retrograde {
                12.0
            } else {
                14.0
            }
        }
        Planet::Jupiter => 11.0,
        Planet::Venus => {
            if retrograde {
                8.0
            } else {
                10.0
            }
        }
        Planet::Saturn => 15.0,
        _ => 0.0,
    }
}

/// Weight a malefic's aspect contributes to the affliction total.
pub fn malefic_aspect_weight(planet: Planet) -> f64 {
    match planet {
        Planet::Saturn => 0.25,
        Planet::Mars => 0.20,
        Planet::Rahu => 0.18,
        Planet::Ketu => 0.12,
        Planet::Sun => 0.08,
        _ => 0.0,
    }
}

/// Weight a benefic's aspect contributes to the support boost.
pub fn benefic_aspect_weight(planet: Planet) -> f64 {
    match planet {
        Planet::Jupiter => 0.15,
        Planet::Venus => 0.10,
        Planet::Mercury => 0.08,
        Planet::Moon => 0.05,
        _ => 0.0,
    }
}

/// Directional-strength (dig bala) house for each planet.
pub fn dig_bala_house(planet: Planet) -> Option<u8> {
    match planet {
        Planet::Sun | Planet::Mars => Some(10),
        Planet::Jupiter | Planet::Mercury => Some(1),
        Planet::Moon | Planet::Venus => Some(4),
        Planet::Saturn => Some(7),
        Planet::Rahu | Planet::Ketu => None,
    }
}

/// Short English signification used in generated narrative text.
pub fn house_signification(house: u8) -> &'static str {
    match house {
        1 => "self-effort and personality",
        2 => "family wealth and speech",
        3 => "courage and communication",
        4 => "property and domestic comfort",
        5 => "speculation and creative ventures",
        6 => "service and defeating competition",
        7 => "partnership and business",
        8 => "inheritance and unexpected gains",
        9 => "fortune and higher pursuits",
        10 => "career and public recognition",
        11 => "gains and social networks",
        12 => "foreign connections and spiritual pursuits",
        _ => "various activities",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_sign_ruler_rules_its_sign() {
        for sign in ZodiacSign::ALL {
            assert!(own_signs(sign.ruler()).contains(&sign));
        }
    }

    #[test]
    fn debilitation_opposes_exaltation() {
        for planet in Planet::ALL {
            assert_eq!(
                debilitation_sign(planet),
                exaltation_sign(planet).opposite()
            );
        }
    }

    #[test]
    fn nodes_have_no_combustion_orb() {
        assert_eq!(combustion_orb(Planet::Rahu, false), 0.0);
        assert_eq!(combustion_orb(Planet::Sun, false), 0.0);
        assert_eq!(combustion_orb(Planet::Venus, true), 8.0);
        assert_eq!(combustion_orb(Planet::Mercury, false), 14.0);
    }
}
