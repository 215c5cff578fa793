//! Nabhasa (shape and count) yogas over the seven classical planets:
//! occupation-count classes, geometric figures, and the sign-quality
//! (ashraya) trio. These describe the whole chart rather than any one
//! placement, so their strengths are fixed catalog values.

use std::collections::BTreeSet;

use lazy_static::lazy_static;

use crate::core::traits::YogaEvaluator;
use crate::core::{Chart, Planet, PlanetPosition, SignQuality, Yoga, YogaCategory};

lazy_static! {
    /// Sankhya class per count of distinct occupied houses (1-7).
    static ref SANKHYA_CLASSES: [(&'static str, &'static str); 7] = [
        ("Gola", "All planets in one house; a single-pointed, fated life"),
        ("Yuga", "Two houses hold everything; dualities dominate the path"),
        ("Shoola", "Three-house concentration; sharp, piercing focus"),
        ("Kedara", "Four fields of activity; agrarian patience and utility"),
        ("Pasa", "Five houses bound together; many ties, many obligations"),
        ("Damini", "Six-house spread; charitable, widely connected life"),
        ("Vallaki", "Seven houses sounded; versatile, musical breadth"),
    ];
}

pub struct NabhasaEvaluator;

impl YogaEvaluator for NabhasaEvaluator {
    fn name(&self) -> &'static str {
        "nabhasa"
    }

    fn category(&self) -> YogaCategory {
        YogaCategory::ShapeBased
    }

    fn evaluate(&self, chart: &Chart) -> Vec<Yoga> {
        let classical: Vec<&PlanetPosition> = Planet::CLASSICAL
            .iter()
            .filter_map(|&p| chart.position(p))
            .collect();
        if classical.is_empty() {
            return Vec::new();
        }
        let occupied: BTreeSet<u8> = classical.iter().map(|p| p.house).collect();

        let mut yogas = Vec::new();
        self.sankhya(&classical, &occupied, &mut yogas);
        self.yava(&classical, &mut yogas);
        self.shringataka(&classical, &occupied, &mut yogas);
        self.gada(&classical, &mut yogas);
        self.shakata(&classical, &occupied, &mut yogas);
        self.consecutive_shapes(&classical, &occupied, &mut yogas);
        self.ashraya(&classical, &mut yogas);
        yogas
    }
}

impl NabhasaEvaluator {
    fn participants(positions: &[&PlanetPosition]) -> Vec<Planet> {
        positions.iter().map(|p| p.planet).collect()
    }

    fn sankhya(
        &self,
        classical: &[&PlanetPosition],
        occupied: &BTreeSet<u8>,
        yogas: &mut Vec<Yoga>,
    ) {
        let count = occupied.len();
        let (name, effects) = SANKHYA_CLASSES[count - 1];
        let strength = 50.0 + (12 - count) as f64 * 3.0;
        // Gola's single house decides its character; the broader
        // distributions are counted favorable.
        let auspicious = if count == 1 {
            occupied
                .first()
                .map(|&h| matches!(h, 1 | 2 | 5 | 9 | 10 | 11))
                .unwrap_or(false)
        } else {
            true
        };
        yogas.push(
            Yoga::new(
                format!("Sankhya {name} Yoga"),
                YogaCategory::ShapeBased,
                strength,
                auspicious,
            )
            .planets(Self::participants(classical))
            .houses(occupied.iter().copied().collect())
            .describe(
                format!("The seven classical planets occupy {count} distinct houses"),
                effects,
            )
            .activation("Operates throughout life"),
        );
    }

    fn yava(&self, classical: &[&PlanetPosition], yogas: &mut Vec<Yoga>) {
        if classical.len() < 5 {
            return;
        }
        let early = classical.iter().filter(|p| p.house <= 3).count();
        let late = classical.iter().filter(|p| p.house >= 10).count();
        let middle = classical.len() - early - late;
        if early >= 2 && late >= 2 && middle < early + late {
            yogas.push(
                Yoga::new("Yava Yoga", YogaCategory::ShapeBased, 55.0, true)
                    .planets(Self::participants(classical))
                    .houses(
                        classical
                            .iter()
                            .map(|p| p.house)
                            .collect::<BTreeSet<_>>()
                            .into_iter()
                            .collect(),
                    )
                    .describe(
                        "Planets massed at both ends of the chart like a barley grain",
                        "A life strong at its beginning and end; middle years demand patience",
                    )
                    .activation("Operates throughout life"),
            );
        }
    }

    fn shringataka(
        &self,
        classical: &[&PlanetPosition],
        occupied: &BTreeSet<u8>,
        yogas: &mut Vec<Yoga>,
    ) {
        if classical.len() >= 3 && occupied.iter().all(|h| matches!(h, 1 | 5 | 9)) {
            yogas.push(
                Yoga::new("Shringataka Yoga", YogaCategory::ShapeBased, 75.0, true)
                    .planets(Self::participants(classical))
                    .houses(occupied.iter().copied().collect())
                    .describe(
                        "All planets gathered on the trine triangle",
                        "Fortune concentrated; dharma, creativity and self reinforce each other",
                    )
                    .activation("Operates throughout life"),
            );
        }

        let in_moksha = classical
            .iter()
            .filter(|p| matches!(p.house, 4 | 8 | 12))
            .count();
        if in_moksha >= 3 {
            yogas.push(
                Yoga::new("Moksha Trikona Bharita Yoga", YogaCategory::ShapeBased, 45.0, false)
                    .planets(
                        classical
                            .iter()
                            .filter(|p| matches!(p.house, 4 | 8 | 12))
                            .map(|p| p.planet)
                            .collect(),
                    )
                    .houses(vec![4, 8, 12])
                    .describe(
                        "Heavy occupation of the liberation triangle",
                        "Worldly traction slips; the inner life outweighs the outer",
                    )
                    .activation("Operates throughout life")
                    .cancellations(vec![
                        "Strong benefics among the occupants can mitigate".to_string()
                    ]),
            );
        }
    }

    fn gada(&self, classical: &[&PlanetPosition], yogas: &mut Vec<Yoga>) {
        const PAIRS: [(u8, u8); 4] = [(1, 4), (4, 7), (7, 10), (10, 1)];
        for (a, b) in PAIRS {
            let in_pair = classical
                .iter()
                .filter(|p| p.house == a || p.house == b)
                .count();
            let both_occupied = classical.iter().any(|p| p.house == a)
                && classical.iter().any(|p| p.house == b);
            if in_pair >= 4 && both_occupied {
                yogas.push(
                    Yoga::new("Gada Yoga", YogaCategory::ShapeBased, 70.0, true)
                        .planets(
                            classical
                                .iter()
                                .filter(|p| p.house == a || p.house == b)
                                .map(|p| p.planet)
                                .collect(),
                        )
                        .houses(vec![a, b])
                        .describe(
                            format!("Planets massed on adjacent kendras {a} and {b}"),
                            "The mace: concentrated power swung at one aim; wealth and rites",
                        )
                        .activation("Operates throughout life"),
                );
                return;
            }
        }
    }

    fn shakata(
        &self,
        classical: &[&PlanetPosition],
        occupied: &BTreeSet<u8>,
        yogas: &mut Vec<Yoga>,
    ) {
        if occupied.len() == 2 && occupied.contains(&1) && occupied.contains(&7) {
            yogas.push(
                Yoga::new("Shakata Yoga", YogaCategory::ShapeBased, 50.0, false)
                    .planets(Self::participants(classical))
                    .houses(vec![1, 7])
                    .describe(
                        "All planets on the 1-7 axle like a cart's two wheels",
                        "Fortunes rise and fall in cycles; stability must be built deliberately",
                    )
                    .activation("Operates throughout life")
                    .cancellations(vec!["Jupiter's aspect on the axis can stabilize".to_string()]),
            );
        }
    }

    fn consecutive_shapes(
        &self,
        classical: &[&PlanetPosition],
        occupied: &BTreeSet<u8>,
        yogas: &mut Vec<Yoga>,
    ) {
        let runs = is_consecutive_run(occupied);
        if occupied.len() == 3 && runs {
            yogas.push(
                Yoga::new("Shoola Yoga", YogaCategory::ShapeBased, 55.0, true)
                    .planets(Self::participants(classical))
                    .houses(occupied.iter().copied().collect())
                    .describe(
                        "Three consecutive houses form a spear",
                        "Piercing determination; success through pointed, sustained effort",
                    )
                    .activation("Operates throughout life"),
            );
        }
        if occupied.len() == 7 && runs {
            yogas.push(
                Yoga::new("Veena Yoga", YogaCategory::ShapeBased, 70.0, true)
                    .planets(Self::participants(classical))
                    .houses(occupied.iter().copied().collect())
                    .describe(
                        "Seven consecutive houses strung like a lute",
                        "Many-sided accomplishment; a life played across the full range",
                    )
                    .activation("Operates throughout life"),
            );
        }
    }

    fn ashraya(&self, classical: &[&PlanetPosition], yogas: &mut Vec<Yoga>) {
        let qualities: BTreeSet<u8> = classical
            .iter()
            .map(|p| p.sign().quality() as u8)
            .collect();
        if qualities.len() != 1 {
            return;
        }
        let quality = classical[0].sign().quality();
        let (name, effects) = match quality {
            SignQuality::Movable => (
                "Rajju Yoga",
                "Restless momentum; fortune found in movement and travel",
            ),
            SignQuality::Fixed => (
                "Musala Yoga",
                "Unbending persistence; wealth and honor accrue to the steadfast",
            ),
            SignQuality::Dual => (
                "Nala Yoga",
                "Adaptable intellect; resourceful but scattered between aims",
            ),
        };
        yogas.push(
            Yoga::new(name, YogaCategory::ShapeBased, 55.0, true)
                .planets(Self::participants(classical))
                .houses(
                    classical
                        .iter()
                        .map(|p| p.house)
                        .collect::<BTreeSet<_>>()
                        .into_iter()
                        .collect(),
                )
                .describe(
                    "All classical planets share one sign quality",
                    effects,
                )
                .activation("Operates throughout life"),
        );
    }
}

/// Whether the occupied houses form one unbroken circular run.
fn is_consecutive_run(occupied: &BTreeSet<u8>) -> bool {
    let n = occupied.len();
    if n == 0 || n == 12 {
        return n == 12;
    }
    occupied.iter().any(|&start| {
        (0..n as u8).all(|offset| occupied.contains(&((start - 1 + offset) % 12 + 1)))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Chart;

    fn classical_at(longitudes: [f64; 7]) -> Chart {
        let bodies: Vec<(Planet, f64)> = Planet::CLASSICAL
            .iter()
            .copied()
            .zip(longitudes)
            .collect();
        Chart::whole_sign(5.0, &bodies)
    }

    #[test]
    fn sankhya_count_classes() {
        // All seven in Taurus: Gola in house 2, a money house.
        let gola = classical_at([40.0, 41.0, 42.0, 43.0, 44.0, 45.0, 46.0]);
        let yogas = NabhasaEvaluator.evaluate(&gola);
        let sankhya = yogas.iter().find(|y| y.name == "Sankhya Gola Yoga").unwrap();
        assert!(sankhya.is_auspicious);
        assert_eq!(sankhya.strength_percentage, 83.0);
    }

    #[test]
    fn shakata_axis() {
        // Sun+Moon+Mars in Aries (house 1), rest in Libra (house 7).
        let chart = classical_at([10.0, 12.0, 14.0, 190.0, 192.0, 194.0, 196.0]);
        let yogas = NabhasaEvaluator.evaluate(&chart);
        let shakata = yogas.iter().find(|y| y.name == "Shakata Yoga").unwrap();
        assert!(!shakata.is_auspicious);
        assert!(!shakata.cancellation_factors.is_empty());
    }

    #[test]
    fn veena_needs_seven_consecutive() {
        let spread = classical_at([10.0, 40.0, 70.0, 100.0, 130.0, 160.0, 190.0]);
        let yogas = NabhasaEvaluator.evaluate(&spread);
        assert!(yogas.iter().any(|y| y.name == "Veena Yoga"));

        let gapped = classical_at([10.0, 40.0, 70.0, 100.0, 130.0, 160.0, 220.0]);
        let yogas = NabhasaEvaluator.evaluate(&gapped);
        assert!(!yogas.iter().any(|y| y.name == "Veena Yoga"));
    }

    #[test]
    fn consecutive_run_wraps() {
        let wrap: BTreeSet<u8> = [11, 12, 1].into_iter().collect();
        assert!(is_consecutive_run(&wrap));
        let broken: BTreeSet<u8> = [11, 1, 3].into_iter().collect();
        assert!(!is_consecutive_run(&broken));
    }

    #[test]
    fn rajju_all_movable() {
        // Aries, Cancer, Libra, Capricorn are the movable signs.
        let chart = classical_at([10.0, 100.0, 190.0, 280.0, 12.0, 102.0, 192.0]);
        let yogas = NabhasaEvaluator.evaluate(&chart);
        assert!(yogas.iter().any(|y| y.name == "Rajju Yoga"));
    }
}
