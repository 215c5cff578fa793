//! Afflictive combinations: Sakata, Daridra, nodal conjunctions,
//! eclipse yogas, Kala Sarpa and malefic hemming of the Moon.
//!
//! Base strengths here encode severity directly, so these patterns do
//! not pass through the placement-scaling pipeline; mitigating factors
//! are reported through the cancellation list instead.

use crate::core::constants::{
    CONJUNCTION_ORB, DUSTHANA_HOUSES, KENDRA_HOUSES, WIDE_CONJUNCTION_ORB,
};
use crate::core::traits::YogaEvaluator;
use crate::core::{Chart, Planet, Yoga, YogaCategory};
use crate::relations::aspects::{are_conjunct_within, aspected_by};
use crate::relations::dignity::is_dignified;
use crate::relations::{circular_distance, house_from, lord_position};

const KALA_SARPA_NAMES: [&str; 12] = [
    "Ananta", "Kulik", "Vasuki", "Shankhpal", "Padma", "Maha Padma", "Takshak", "Karkotak",
    "Shankhachur", "Ghatak", "Vishdhar", "Sheshnag",
];

pub struct NegativeEvaluator;

impl YogaEvaluator for NegativeEvaluator {
    fn name(&self) -> &'static str {
        "negative"
    }

    fn category(&self) -> YogaCategory {
        YogaCategory::Negative
    }

    fn evaluate(&self, chart: &Chart) -> Vec<Yoga> {
        let mut yogas = Vec::new();
        self.sakata_yoga(chart, &mut yogas);
        self.daridra_yoga(chart, &mut yogas);
        self.nodal_conjunctions(chart, &mut yogas);
        self.grahan_yogas(chart, &mut yogas);
        self.kala_sarpa(chart, &mut yogas);
        self.moon_papakartari(chart, &mut yogas);
        yogas
    }
}

impl NegativeEvaluator {
    /// Moon in the 6th, 8th or 12th counted from Jupiter. A kendra
    /// placement from the lagna breaks the wheel.
    fn sakata_yoga(&self, chart: &Chart, yogas: &mut Vec<Yoga>) {
        let (Some(moon), Some(jupiter)) =
            (chart.position(Planet::Moon), chart.position(Planet::Jupiter))
        else {
            return;
        };
        let from_jupiter = house_from(moon.sign(), jupiter.sign());
        if !matches!(from_jupiter, 6 | 8 | 12) {
            return;
        }
        if KENDRA_HOUSES.contains(&moon.house) {
            yogas.push(
                Yoga::new("Sakata Bhanga Yoga", YogaCategory::Negative, 55.0, true)
                    .planets(vec![Planet::Moon, Planet::Jupiter])
                    .houses(vec![moon.house])
                    .describe(
                        "Moon falls in a dusthana from Jupiter but holds a kendra",
                        "The cart's wheel is braced; fluctuating fortunes stabilize",
                    )
                    .activation("Moon-Jupiter periods")
                    .cancellations(vec![
                        "Moon in a kendra from the lagna breaks the Sakata effect".to_string()
                    ]),
            );
        } else {
            yogas.push(
                Yoga::new("Sakata Yoga", YogaCategory::Negative, 60.0, false)
                    .planets(vec![Planet::Moon, Planet::Jupiter])
                    .houses(vec![moon.house])
                    .describe(
                        format!("Moon in house {from_jupiter} from Jupiter"),
                        "Fortunes rise and fall like a cartwheel; periodic setbacks",
                    )
                    .activation("Moon-Jupiter periods")
                    .cancellations(vec![
                        "Mitigated when the Moon gains strength by transit or dasha".to_string(),
                    ]),
            );
        }
    }

    /// The gains lord sunk in a dusthana.
    fn daridra_yoga(&self, chart: &Chart, yogas: &mut Vec<Yoga>) {
        let Some(l11) = lord_position(chart, 11) else {
            return;
        };
        if !DUSTHANA_HOUSES.contains(&l11.house) {
            return;
        }
        let severity = match l11.house {
            8 => 70.0,
            12 => 60.0,
            _ => 50.0,
        };
        let mut mitigants = Vec::new();
        if is_dignified(l11) {
            mitigants.push("The 11th lord holds dignity, softening losses".to_string());
        }
        if aspected_by(chart, l11, Planet::Jupiter) {
            mitigants.push("Jupiter's aspect on the 11th lord protects income".to_string());
        }
        if mitigants.is_empty() {
            mitigants.push("Remedial measures recommended during its dasha".to_string());
        }
        yogas.push(
            Yoga::new("Daridra Yoga", YogaCategory::Negative, severity, false)
                .planets(vec![l11.planet])
                .houses(vec![l11.house])
                .describe(
                    format!("The 11th lord placed in house {}", l11.house),
                    "Income obstructed; gains leak through hidden channels",
                )
                .activation(format!("{} Dasha", l11.planet))
                .cancellations(mitigants),
        );
    }

    fn nodal_conjunctions(&self, chart: &Chart, yogas: &mut Vec<Yoga>) {
        let Some(rahu) = chart.position(Planet::Rahu) else {
            return;
        };

        if let Some(jupiter) = chart.position(Planet::Jupiter) {
            if are_conjunct_within(jupiter, rahu, CONJUNCTION_ORB) {
                let mut severity = 65.0;
                let mut mitigants = Vec::new();
                if is_dignified(jupiter) {
                    severity -= 20.0;
                    mitigants.push("Jupiter's dignity restrains the chandal effect".to_string());
                }
                if matches!(jupiter.house, 1 | 5 | 9 | 11) {
                    severity -= 10.0;
                    mitigants.push("Favorable house placement eases the affliction".to_string());
                }
                if mitigants.is_empty() {
                    mitigants.push("Strongest during Jupiter-Rahu periods".to_string());
                }
                yogas.push(
                    Yoga::new("Guru Chandal Yoga", YogaCategory::Negative, severity, false)
                        .planets(vec![Planet::Jupiter, Planet::Rahu])
                        .houses(vec![jupiter.house])
                        .describe(
                            "Jupiter conjunct Rahu",
                            "Wisdom shadowed by obsession; unorthodox counsel misleads",
                        )
                        .activation("Jupiter-Rahu periods")
                        .cancellations(mitigants),
                );
            }
        }

        if let Some(mars) = chart.position(Planet::Mars) {
            if are_conjunct_within(mars, rahu, CONJUNCTION_ORB) {
                let mut severity = 70.0;
                let mut mitigants = Vec::new();
                if is_dignified(mars) {
                    severity -= 15.0;
                    mitigants.push("Dignified Mars channels the heat constructively".to_string());
                }
                if matches!(mars.house, 3 | 6 | 10 | 11) {
                    severity -= 10.0;
                    mitigants.push("Upachaya placement turns aggression into drive".to_string());
                }
                if mitigants.is_empty() {
                    mitigants.push("Anger management matters in Mars-Rahu periods".to_string());
                }
                yogas.push(
                    Yoga::new("Angarak Yoga", YogaCategory::Negative, severity, false)
                        .planets(vec![Planet::Mars, Planet::Rahu])
                        .houses(vec![mars.house])
                        .describe(
                            "Mars conjunct Rahu",
                            "Amplified aggression; accidents and disputes when unchecked",
                        )
                        .activation("Mars-Rahu periods")
                        .cancellations(mitigants),
                );
            }
        }

        if let Some(saturn) = chart.position(Planet::Saturn) {
            if are_conjunct_within(saturn, rahu, CONJUNCTION_ORB) {
                let mut severity = 65.0;
                let mut mitigants = Vec::new();
                if is_dignified(saturn) {
                    severity -= 20.0;
                    mitigants.push("Saturn's dignity grounds the nodal shadow".to_string());
                }
                if aspected_by(chart, saturn, Planet::Jupiter) {
                    severity -= 15.0;
                    mitigants.push("Jupiter's aspect lifts the ancestral burden".to_string());
                }
                if mitigants.is_empty() {
                    mitigants.push("Ancestral remedies indicated".to_string());
                }
                yogas.push(
                    Yoga::new("Shrapit Yoga", YogaCategory::Negative, severity, false)
                        .planets(vec![Planet::Saturn, Planet::Rahu])
                        .houses(vec![saturn.house])
                        .describe(
                            "Saturn conjunct Rahu",
                            "Inherited karmic weight; delays that teach patience",
                        )
                        .activation("Saturn-Rahu periods")
                        .cancellations(mitigants),
                );
            }
        }
    }

    /// Luminary-node conjunctions, graded by exactness.
    fn grahan_yogas(&self, chart: &Chart, yogas: &mut Vec<Yoga>) {
        let luminaries = [(Planet::Sun, "Surya"), (Planet::Moon, "Chandra")];
        let nodes = [Planet::Rahu, Planet::Ketu];
        for (luminary, prefix) in luminaries {
            let Some(lum) = chart.position(luminary) else {
                continue;
            };
            for node in nodes {
                let Some(node_pos) = chart.position(node) else {
                    continue;
                };
                let distance = circular_distance(lum.longitude, node_pos.longitude);
                if distance > WIDE_CONJUNCTION_ORB {
                    continue;
                }
                let severity = if distance <= 3.0 {
                    75.0
                } else if distance <= 6.0 {
                    65.0
                } else if distance <= 9.0 {
                    55.0
                } else {
                    45.0
                };
                yogas.push(
                    Yoga::new(
                        format!("{prefix} Grahan Yoga"),
                        YogaCategory::Negative,
                        severity,
                        false,
                    )
                    .planets(vec![luminary, node])
                    .houses(vec![lum.house])
                    .describe(
                        format!("{luminary} within {distance:.1}\u{b0} of {node}"),
                        "The luminary eclipsed; clarity and vitality periodically dim",
                    )
                    .activation(format!("{node} Dasha and eclipse seasons"))
                    .cancellations(vec![format!(
                        "Severity eases as the orb widens from {node}"
                    )]),
                );
            }
        }
    }

    /// All classical planets caught on one side of the nodal axis.
    fn kala_sarpa(&self, chart: &Chart, yogas: &mut Vec<Yoga>) {
        let (Some(rahu), Some(ketu)) =
            (chart.position(Planet::Rahu), chart.position(Planet::Ketu))
        else {
            return;
        };
        let classical: Vec<_> = Planet::CLASSICAL
            .iter()
            .filter_map(|&p| chart.position(p))
            .collect();
        if classical.len() < 7 {
            return;
        }

        let in_arc = |start: f64, end: f64, x: f64| -> bool {
            let span = (end - start).rem_euclid(360.0);
            (x - start).rem_euclid(360.0) < span
        };

        for (start, end) in [
            (rahu.longitude, ketu.longitude),
            (ketu.longitude, rahu.longitude),
        ] {
            let outside: Vec<_> = classical
                .iter()
                .filter(|p| !in_arc(start, end, p.longitude))
                .collect();
            let name_prefix = KALA_SARPA_NAMES[(rahu.house as usize - 1) % 12];
            match outside.len() {
                0 => {
                    yogas.push(
                        Yoga::new(
                            format!("{name_prefix} Kala Sarpa Yoga"),
                            YogaCategory::Negative,
                            75.0,
                            false,
                        )
                        .planets(vec![Planet::Rahu, Planet::Ketu])
                        .houses(vec![rahu.house, ketu.house])
                        .describe(
                            "All seven classical planets hemmed within the nodal axis",
                            "Fated intensity; sudden rises and falls until the serpent releases",
                        )
                        .activation("Rahu and Ketu periods")
                        .cancellations(vec![
                            "Effects taper after the first Rahu return".to_string()
                        ]),
                    );
                    return;
                }
                1 => {
                    let breaker = outside[0].planet;
                    yogas.push(
                        Yoga::new(
                            format!("Partial {name_prefix} Kala Sarpa Yoga"),
                            YogaCategory::Negative,
                            45.0,
                            false,
                        )
                        .planets(vec![Planet::Rahu, Planet::Ketu, breaker])
                        .houses(vec![rahu.house, ketu.house])
                        .describe(
                            format!("Six planets hemmed by the nodes; {breaker} stands outside"),
                            "A loosened serpent; pressure felt but escapable",
                        )
                        .activation("Rahu and Ketu periods")
                        .cancellations(vec![format!(
                            "{breaker} outside the axis breaks the full pattern"
                        )]),
                    );
                    return;
                }
                _ => {}
            }
        }
    }

    /// Malefics on both sides of the Moon with no benefic relief.
    fn moon_papakartari(&self, chart: &Chart, yogas: &mut Vec<Yoga>) {
        let Some(moon) = chart.position(Planet::Moon) else {
            return;
        };
        let flank = |offset: i16| -> u8 {
            let h = (i16::from(moon.house) - 1 + offset).rem_euclid(12);
            h as u8 + 1
        };
        let is_malefic_in = |house: u8| {
            chart
                .occupants(house)
                .iter()
                .any(|p| p.planet.is_natural_malefic())
        };
        let is_benefic_in = |house: u8| {
            chart
                .occupants(house)
                .iter()
                .any(|p| p.planet.is_natural_benefic())
        };
        let before = flank(-1);
        let after = flank(1);
        if is_malefic_in(before)
            && is_malefic_in(after)
            && !is_benefic_in(before)
            && !is_benefic_in(after)
        {
            yogas.push(
                Yoga::new("Chandra Papakartari Yoga", YogaCategory::Negative, 60.0, false)
                    .planets(vec![Planet::Moon])
                    .houses(vec![before, moon.house, after])
                    .describe(
                        "The Moon hemmed between malefics",
                        "Emotional siege; the mind pressed from both sides",
                    )
                    .activation("Moon Dasha")
                    .cancellations(vec![
                        "A benefic aspect on the Moon relieves the hemming".to_string()
                    ]),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seven_planets_in_arc() -> Vec<(Planet, f64)> {
        vec![
            (Planet::Sun, 20.0),
            (Planet::Moon, 45.0),
            (Planet::Mars, 70.0),
            (Planet::Mercury, 95.0),
            (Planet::Jupiter, 120.0),
            (Planet::Venus, 150.0),
            (Planet::Saturn, 170.0),
        ]
    }

    #[test]
    fn full_kala_sarpa_detected() {
        let mut bodies = seven_planets_in_arc();
        bodies.push((Planet::Rahu, 10.0));
        bodies.push((Planet::Ketu, 190.0));
        let chart = Chart::whole_sign(5.0, &bodies);
        let yogas = NegativeEvaluator.evaluate(&chart);
        let ks = yogas
            .iter()
            .find(|y| y.name.contains("Kala Sarpa"))
            .unwrap();
        assert_eq!(ks.strength_percentage, 75.0);
        // Rahu in Aries house 1 takes the Ananta name.
        assert!(ks.name.starts_with("Ananta"));
    }

    #[test]
    fn partial_kala_sarpa_names_the_breaker() {
        let mut bodies = seven_planets_in_arc();
        // Saturn escapes the axis.
        bodies[6] = (Planet::Saturn, 250.0);
        bodies.push((Planet::Rahu, 10.0));
        bodies.push((Planet::Ketu, 190.0));
        let chart = Chart::whole_sign(5.0, &bodies);
        let yogas = NegativeEvaluator.evaluate(&chart);
        let ks = yogas
            .iter()
            .find(|y| y.name.contains("Kala Sarpa"))
            .unwrap();
        assert_eq!(ks.strength_percentage, 45.0);
        assert!(ks.planets.contains(&Planet::Saturn));
    }

    #[test]
    fn grahan_severity_tiers_by_orb() {
        // Aries lagna, Sun and Rahu two degrees apart.
        let chart = Chart::whole_sign(5.0, &[(Planet::Sun, 100.0), (Planet::Rahu, 102.0)]);
        let yogas = NegativeEvaluator.evaluate(&chart);
        let grahan = yogas
            .iter()
            .find(|y| y.name == "Surya Grahan Yoga")
            .unwrap();
        assert_eq!(grahan.strength_percentage, 75.0);

        let wide = Chart::whole_sign(5.0, &[(Planet::Sun, 100.0), (Planet::Rahu, 111.0)]);
        let yogas = NegativeEvaluator.evaluate(&wide);
        let grahan = yogas
            .iter()
            .find(|y| y.name == "Surya Grahan Yoga")
            .unwrap();
        assert_eq!(grahan.strength_percentage, 45.0);
    }

    #[test]
    fn sakata_breaks_in_kendra() {
        // Aries lagna: Jupiter in Leo (house 5), Moon in Capricorn
        // (house 10): sixth from Jupiter but angular from the lagna.
        let chart = Chart::whole_sign(5.0, &[(Planet::Jupiter, 130.0), (Planet::Moon, 280.0)]);
        let yogas = NegativeEvaluator.evaluate(&chart);
        assert!(yogas.iter().any(|y| y.name == "Sakata Bhanga Yoga"));
        assert!(!yogas.iter().any(|y| y.name == "Sakata Yoga"));
    }

    #[test]
    fn daridra_for_gains_lord_in_dusthana() {
        // Aries lagna: 11th lord Saturn in Scorpio (house 8).
        let chart = Chart::whole_sign(5.0, &[(Planet::Saturn, 220.0)]);
        let yogas = NegativeEvaluator.evaluate(&chart);
        let daridra = yogas.iter().find(|y| y.name == "Daridra Yoga").unwrap();
        assert_eq!(daridra.strength_percentage, 70.0);
        assert!(!daridra.is_auspicious);
        assert!(!daridra.cancellation_factors.is_empty());
    }
}
