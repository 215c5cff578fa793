//! Composite and rare combinations: the Lakshmi group of computed
//! yogas plus the throne, drum and ocean configurations.

use crate::core::constants::{KENDRA_HOUSES, UPACHAYA_HOUSES};
use crate::core::traits::YogaEvaluator;
use crate::core::{Chart, Planet, Yoga, YogaCategory};
use crate::relations::aspects::{are_conjunct, are_connected};
use crate::relations::dignity::{is_dignified, is_exalted, is_in_own_sign};
use crate::relations::strength::{scaled_strength, yoga_strength_with_reasons};
use crate::relations::{dispositor, house_from, lord_position};

pub struct AdvancedEvaluator;

impl YogaEvaluator for AdvancedEvaluator {
    fn name(&self) -> &'static str {
        "advanced"
    }

    fn category(&self) -> YogaCategory {
        YogaCategory::CompositeRare
    }

    fn evaluate(&self, chart: &Chart) -> Vec<Yoga> {
        let mut yogas = Vec::new();
        self.lakshmi_group(chart, &mut yogas);
        self.throne_yogas(chart, &mut yogas);
        self.distribution_yogas(chart, &mut yogas);
        self.luminaries_pairs(chart, &mut yogas);
        yogas
    }
}

impl AdvancedEvaluator {
    /// The five computed composites: strength follows the planetary
    /// placements rather than a fixed classical grade.
    fn lakshmi_group(&self, chart: &Chart, yogas: &mut Vec<Yoga>) {
        // Lakshmi: dignified lagna lord with a dignified angular 9th lord.
        if let (Some(l1), Some(l9)) = (lord_position(chart, 1), lord_position(chart, 9)) {
            if is_dignified(l1) && KENDRA_HOUSES.contains(&l9.house) && is_dignified(l9) {
                let (strength, reasons) = yoga_strength_with_reasons(chart, &[l1, l9]);
                yogas.push(
                    Yoga::new("Lakshmi Yoga", YogaCategory::Wealth, strength, true)
                        .planets(vec![l1.planet, l9.planet])
                        .houses(vec![l1.house, l9.house])
                        .describe(
                            "Strong lagna lord with the 9th lord dignified in a kendra",
                            "The goddess of fortune resides; beauty, virtue and abundance",
                        )
                        .activation("9th lord Dasha")
                        .cancellations(reasons),
                );
            }
        }

        // Gouri: the fortune lord angular or trine from the Moon, dignified.
        if let (Some(moon), Some(l9)) =
            (chart.position(Planet::Moon), lord_position(chart, 9))
        {
            let from_moon = house_from(l9.sign(), moon.sign());
            if matches!(from_moon, 1 | 4 | 5 | 7 | 9 | 10) && is_dignified(l9) {
                let (strength, reasons) = yoga_strength_with_reasons(chart, &[l9]);
                yogas.push(
                    Yoga::new("Gouri Yoga", YogaCategory::CompositeRare, strength, true)
                        .planets(vec![l9.planet])
                        .houses(vec![l9.house])
                        .describe(
                            "The 9th lord dignified in a kendra or trikona from the Moon",
                            "Grace and respectability; an honored family line",
                        )
                        .activation(format!("{} Dasha", l9.planet))
                        .cancellations(reasons),
                );
            }
        }

        // Bharathi: lords of 2, 5 and 9 all angular while Jupiter is dignified.
        if let (Some(l2), Some(l5), Some(l9), Some(jupiter)) = (
            lord_position(chart, 2),
            lord_position(chart, 5),
            lord_position(chart, 9),
            chart.position(Planet::Jupiter),
        ) {
            let all_angular = [l2, l5, l9]
                .iter()
                .all(|l| KENDRA_HOUSES.contains(&l.house));
            if all_angular && is_dignified(jupiter) {
                let (strength, reasons) =
                    yoga_strength_with_reasons(chart, &[l2, l5, l9, jupiter]);
                yogas.push(
                    Yoga::new("Bharathi Yoga", YogaCategory::CompositeRare, strength, true)
                        .planets(vec![l2.planet, l5.planet, l9.planet, Planet::Jupiter])
                        .houses(vec![l2.house, l5.house, l9.house])
                        .describe(
                            "Lords of speech, intellect and fortune angular under strong Jupiter",
                            "Eloquence and scholarship; fame through learning and voice",
                        )
                        .activation("Jupiter or Mercury periods")
                        .cancellations(reasons),
                );
            }
        }

        // Chapa: the 4-10 exchange drawn like a bow by a strong lagna lord.
        if let (Some(l1), Some(l4), Some(l10)) = (
            lord_position(chart, 1),
            lord_position(chart, 4),
            lord_position(chart, 10),
        ) {
            let exchange =
                l4.planet != l10.planet && l4.house == 10 && l10.house == 4;
            if exchange && is_dignified(l1) {
                let (strength, reasons) = yoga_strength_with_reasons(chart, &[l1, l4, l10]);
                yogas.push(
                    Yoga::new("Chapa Yoga", YogaCategory::Authority, strength, true)
                        .planets(vec![l1.planet, l4.planet, l10.planet])
                        .houses(vec![4, 10])
                        .describe(
                            "Lords of the 4th and 10th exchange while the lagna lord is strong",
                            "The drawn bow; aim, land and office aligned under one will",
                        )
                        .activation("4th or 10th lord Dasha")
                        .cancellations(reasons),
                );
            }
        }

        // Shrinatha: the 7th lord in the 10th with karma and fortune lords joined.
        if let (Some(l7), Some(l9), Some(l10)) = (
            lord_position(chart, 7),
            lord_position(chart, 9),
            lord_position(chart, 10),
        ) {
            if l7.house == 10 && l9.planet != l10.planet && are_conjunct(l10, l9) {
                let (strength, reasons) = yoga_strength_with_reasons(chart, &[l7, l9, l10]);
                yogas.push(
                    Yoga::new("Shrinatha Yoga", YogaCategory::CompositeRare, strength, true)
                        .planets(vec![l7.planet, l9.planet, l10.planet])
                        .houses(vec![10, l10.house])
                        .describe(
                            "7th lord in the 10th while the 9th and 10th lords conjoin",
                            "Vishnu's favor; partnership, fortune and career interlocked",
                        )
                        .activation("Periods of the conjoined lords")
                        .cancellations(reasons),
                );
            }
        }
    }

    fn throne_yogas(&self, chart: &Chart, yogas: &mut Vec<Yoga>) {
        // Simhasana: benefics tucked into houses 2, 6, 8 and 12.
        let benefics_hidden: Vec<_> = chart
            .positions()
            .iter()
            .filter(|p| p.planet.is_natural_benefic() && matches!(p.house, 2 | 6 | 8 | 12))
            .collect();
        if benefics_hidden.len() >= 3 {
            let (strength, reasons) = scaled_strength(chart, &benefics_hidden, 85.0);
            yogas.push(
                Yoga::new("Simhasana Yoga", YogaCategory::CompositeRare, strength, true)
                    .planets(benefics_hidden.iter().map(|p| p.planet).collect())
                    .houses(benefics_hidden.iter().map(|p| p.house).collect())
                    .describe(
                        format!(
                            "{} benefics in houses 2, 6, 8 and 12",
                            benefics_hidden.len()
                        ),
                        "Entitled to the throne; quiet support raises the native to rule",
                    )
                    .activation("Benefic planet dashas")
                    .cancellations(reasons),
            );
        }

        // Bheri: Venus and Jupiter angular with a well-placed fortune lord.
        if let (Some(venus), Some(jupiter)) = (
            chart.position(Planet::Venus),
            chart.position(Planet::Jupiter),
        ) {
            let both_angular = KENDRA_HOUSES.contains(&venus.house)
                && KENDRA_HOUSES.contains(&jupiter.house);
            let l9_strong = lord_position(chart, 9).map(|l9| {
                is_exalted(l9) || is_in_own_sign(l9) || matches!(l9.house, 1 | 4 | 5 | 7 | 9 | 10)
            });
            if both_angular && l9_strong == Some(true) {
                let (strength, reasons) = scaled_strength(chart, &[venus, jupiter], 85.0);
                yogas.push(
                    Yoga::new("Bheri Yoga", YogaCategory::CompositeRare, strength, true)
                        .planets(vec![Planet::Venus, Planet::Jupiter])
                        .houses(vec![venus.house, jupiter.house])
                        .describe(
                            "Venus and Jupiter in kendras with a strong 9th lord",
                            "Royal drums announce the native; authority carried with grace",
                        )
                        .activation("Jupiter and Venus dashas")
                        .cancellations(reasons),
                );
            }
        }

        // Kahala: Jupiter on an inner angle.
        if let Some(jupiter) = chart.position(Planet::Jupiter) {
            if matches!(jupiter.house, 1 | 4 | 10) {
                let (strength, reasons) = scaled_strength(chart, &[jupiter], 75.0);
                yogas.push(
                    Yoga::new("Kahala Yoga", YogaCategory::CompositeRare, strength, true)
                        .planets(vec![Planet::Jupiter])
                        .houses(vec![jupiter.house])
                        .describe(
                            format!("Jupiter in house {}", jupiter.house),
                            "Bold, well-supported leadership; courage backed by wisdom",
                        )
                        .activation("Jupiter Dasha")
                        .cancellations(reasons),
                );
            }
        }

        // Parijata: the lagna lord well placed and its dispositor likewise.
        if let Some(l1) = lord_position(chart, 1) {
            if matches!(l1.house, 1 | 4 | 5 | 7 | 9 | 10) {
                if let Some(disp) = dispositor(chart, l1) {
                    if matches!(disp.house, 1 | 4 | 5 | 7 | 9 | 10) {
                        let (strength, reasons) = scaled_strength(chart, &[l1, disp], 80.0);
                        yogas.push(
                            Yoga::new(
                                "Parijata Yoga",
                                YogaCategory::CompositeRare,
                                strength,
                                true,
                            )
                            .planets(vec![l1.planet, disp.planet])
                            .houses(vec![l1.house, disp.house])
                            .describe(
                                "Lagna lord and its dispositor both in favorable houses",
                                "The celestial tree blooms late but fully; rising comfort and rank",
                            )
                            .activation("Middle and later life")
                            .cancellations(reasons),
                        );
                    }
                }
            }
        }
    }

    fn distribution_yogas(&self, chart: &Chart, yogas: &mut Vec<Yoga>) {
        // Mridanga: nearly all planets gathered in kendras and trikonas.
        let in_power_houses: Vec<_> = chart
            .positions()
            .iter()
            .filter(|p| matches!(p.house, 1 | 4 | 5 | 7 | 9 | 10))
            .collect();
        let elsewhere = chart.positions().len() - in_power_houses.len();
        if in_power_houses.len() >= 7 && elsewhere <= 2 {
            let (strength, reasons) = scaled_strength(chart, &in_power_houses, 90.0);
            yogas.push(
                Yoga::new("Mridanga Yoga", YogaCategory::CompositeRare, strength, true)
                    .planets(in_power_houses.iter().map(|p| p.planet).collect())
                    .houses(vec![1, 4, 5, 7, 9, 10])
                    .describe(
                        "Planets concentrated in kendras and trikonas",
                        "The drum of fame; celebrated in many domains at once",
                    )
                    .activation("Lifelong, peaking in benefic dashas")
                    .cancellations(reasons),
            );
        }

        // Chatussagara: every kendra occupied.
        let kendra_planets: Vec<_> = chart
            .positions()
            .iter()
            .filter(|p| KENDRA_HOUSES.contains(&p.house))
            .collect();
        let occupied: std::collections::BTreeSet<u8> =
            kendra_planets.iter().map(|p| p.house).collect();
        if occupied.len() == 4 {
            let benefic_count = kendra_planets
                .iter()
                .filter(|p| p.planet.is_natural_benefic())
                .count();
            let base = 80.0 + benefic_count as f64 * 3.0;
            let (strength, reasons) = scaled_strength(chart, &kendra_planets, base);
            yogas.push(
                Yoga::new(
                    "Chatussagara Yoga",
                    YogaCategory::CompositeRare,
                    strength,
                    true,
                )
                .planets(kendra_planets.iter().map(|p| p.planet).collect())
                .houses(KENDRA_HOUSES.to_vec())
                .describe(
                    "All four kendras occupied",
                    "Sovereignty like the four oceans; support from every quarter",
                )
                .activation("Continuous throughout life")
                .cancellations(reasons),
            );
        }

        // Vasumati: benefics climbing the upachayas.
        let benefics_upachaya: Vec<_> = chart
            .positions()
            .iter()
            .filter(|p| p.planet.is_natural_benefic() && UPACHAYA_HOUSES.contains(&p.house))
            .collect();
        if benefics_upachaya.len() >= 3 {
            let (strength, reasons) = scaled_strength(chart, &benefics_upachaya, 85.0);
            yogas.push(
                Yoga::new("Vasumati Yoga", YogaCategory::Wealth, strength, true)
                    .planets(benefics_upachaya.iter().map(|p| p.planet).collect())
                    .houses(benefics_upachaya.iter().map(|p| p.house).collect())
                    .describe(
                        "Three or more benefics in upachaya houses",
                        "Wealth that grows with time; independence from patronage",
                    )
                    .activation("Benefic dashas after early struggles")
                    .cancellations(reasons),
            );
        }

        // Chakra: seven planets on one parity of houses.
        let odd = chart
            .positions()
            .iter()
            .filter(|p| p.house % 2 == 1)
            .count();
        let even = chart.positions().len() - odd;
        if odd >= 7 || even >= 7 {
            let parity = if odd >= 7 { "odd" } else { "even" };
            yogas.push(
                Yoga::new("Chakra Yoga", YogaCategory::CompositeRare, 85.0, true)
                    .planets(chart.positions().iter().map(|p| p.planet).collect())
                    .describe(
                        format!("Seven or more planets in {parity} houses"),
                        "The wheel of empire; cyclic, self-renewing authority",
                    )
                    .activation("Continuous throughout life"),
            );
        }
    }

    fn luminaries_pairs(&self, chart: &Chart, yogas: &mut Vec<Yoga>) {
        // Sun with Jupiter: the king and the minister.
        if let (Some(sun), Some(jupiter)) =
            (chart.position(Planet::Sun), chart.position(Planet::Jupiter))
        {
            if are_connected(sun, jupiter) {
                let (strength, reasons) = scaled_strength(chart, &[sun, jupiter], 85.0);
                yogas.push(
                    Yoga::new(
                        "Surya-Guru Raja Yoga",
                        YogaCategory::CompositeRare,
                        strength,
                        true,
                    )
                    .planets(vec![Planet::Sun, Planet::Jupiter])
                    .houses(vec![sun.house, jupiter.house])
                    .describe(
                        "Sun and Jupiter conjunct or in mutual aspect",
                        "King and minister united; wise, ethical governance",
                    )
                    .activation("Sun and Jupiter dashas")
                    .cancellations(reasons),
                );
            }
        }

        // Moon with Venus in good houses: the queen's combination.
        if let (Some(moon), Some(venus)) =
            (chart.position(Planet::Moon), chart.position(Planet::Venus))
        {
            let good = |h: u8| matches!(h, 1 | 2 | 4 | 5 | 7 | 9 | 10 | 11);
            if good(moon.house) && good(venus.house) && are_connected(moon, venus) {
                let (strength, reasons) = scaled_strength(chart, &[moon, venus], 80.0);
                yogas.push(
                    Yoga::new(
                        "Chandra-Shukra Rajeshwari Yoga",
                        YogaCategory::CompositeRare,
                        strength,
                        true,
                    )
                    .planets(vec![Planet::Moon, Planet::Venus])
                    .houses(vec![moon.house, venus.house])
                    .describe(
                        "Moon and Venus linked from favorable houses",
                        "Refined prosperity; luxury, artistry and popular affection",
                    )
                    .activation("Moon and Venus dashas")
                    .cancellations(reasons),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lakshmi_requires_dignity_on_both_lords() {
        // Taurus lagna: lagna lord Venus in Pisces (exalted, house 11),
        // 9th lord Saturn in Aquarius (own sign, house 10 kendra).
        let chart = Chart::whole_sign(35.0, &[(Planet::Venus, 340.0), (Planet::Saturn, 320.0)]);
        let yogas = AdvancedEvaluator.evaluate(&chart);
        assert!(yogas.iter().any(|y| y.name == "Lakshmi Yoga"));

        // Saturn slips to Scorpio: still angular but stripped of dignity.
        let weak = Chart::whole_sign(35.0, &[(Planet::Venus, 340.0), (Planet::Saturn, 220.0)]);
        let yogas = AdvancedEvaluator.evaluate(&weak);
        assert!(!yogas.iter().any(|y| y.name == "Lakshmi Yoga"));
    }

    #[test]
    fn chatussagara_needs_all_four_kendras() {
        let full = Chart::whole_sign(
            5.0,
            &[
                (Planet::Sun, 10.0),
                (Planet::Mars, 100.0),
                (Planet::Jupiter, 190.0),
                (Planet::Saturn, 280.0),
            ],
        );
        let yogas = AdvancedEvaluator.evaluate(&full);
        assert!(yogas.iter().any(|y| y.name == "Chatussagara Yoga"));

        let gap = Chart::whole_sign(
            5.0,
            &[
                (Planet::Sun, 10.0),
                (Planet::Mars, 100.0),
                (Planet::Jupiter, 190.0),
            ],
        );
        let yogas = AdvancedEvaluator.evaluate(&gap);
        assert!(!yogas.iter().any(|y| y.name == "Chatussagara Yoga"));
    }

    #[test]
    fn chapa_needs_exchange_and_strong_lagna_lord() {
        // Aries lagna: Mars in Aries (own sign), Moon in Capricorn
        // (house 10), Saturn in Cancer (house 4): the 4-10 exchange.
        let chart = Chart::whole_sign(
            5.0,
            &[
                (Planet::Mars, 10.0),
                (Planet::Moon, 275.0),
                (Planet::Saturn, 100.0),
            ],
        );
        let yogas = AdvancedEvaluator.evaluate(&chart);
        let chapa = yogas.iter().find(|y| y.name == "Chapa Yoga").unwrap();
        assert_eq!(chapa.category, YogaCategory::Authority);
    }

    #[test]
    fn surya_guru_on_conjunction() {
        let chart = Chart::whole_sign(5.0, &[(Planet::Sun, 100.0), (Planet::Jupiter, 104.0)]);
        let yogas = AdvancedEvaluator.evaluate(&chart);
        assert!(yogas.iter().any(|y| y.name == "Surya-Guru Raja Yoga"));
    }
}
