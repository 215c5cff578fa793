//! Authority and power combinations: kendra-trikona lordship links,
//! their named special cases, debilitation-reversal raja yogas, and
//! directional-strength raja yogas.

use crate::core::constants::{KENDRA_HOUSES, TRIKONA_HOUSES, WIDE_CONJUNCTION_ORB};
use crate::core::traits::YogaEvaluator;
use crate::core::{Chart, Planet, SignQuality, Yoga, YogaCategory};
use crate::relations::dignity::{
    is_debilitated, is_dignified, is_exalted, neecha_bhanga_reason,
};
use crate::relations::strength::{scaled_strength, yoga_strength_with_reasons};
use crate::relations::{aspects, house_lords, is_in_kendra_from, lord_position};

pub struct RajaEvaluator;

impl YogaEvaluator for RajaEvaluator {
    fn name(&self) -> &'static str {
        "raja"
    }

    fn category(&self) -> YogaCategory {
        YogaCategory::Authority
    }

    fn evaluate(&self, chart: &Chart) -> Vec<Yoga> {
        let mut yogas = Vec::new();
        let kendra_trikona_hits = self.kendra_trikona_links(chart, &mut yogas);
        if kendra_trikona_hits >= 3 {
            yogas.push(self.bahudha_raja(kendra_trikona_hits));
        }
        self.dharma_karmadhipati(chart, &mut yogas);
        self.pancha_dashama(chart, &mut yogas);
        self.maha_parivartana(chart, &mut yogas);
        self.neecha_bhanga_raja(chart, &mut yogas);
        self.maha_raja(chart, &mut yogas);
        self.pushkala(chart, &mut yogas);
        self.dig_bala_raja(chart, &mut yogas);
        self.akhanda_samrajya(chart, &mut yogas);
        yogas
    }
}

impl RajaEvaluator {
    /// Every (kendra lord, trikona lord) pair, tested for conjunction,
    /// mutual aspect, and exchange. Returns the number of links found.
    fn kendra_trikona_links(&self, chart: &Chart, yogas: &mut Vec<Yoga>) -> usize {
        let lords = house_lords(chart.ascendant_sign());
        let mut hits = 0;
        for &kendra in &KENDRA_HOUSES {
            for &trikona in &TRIKONA_HOUSES {
                let kendra_lord = lords[(kendra - 1) as usize];
                let trikona_lord = lords[(trikona - 1) as usize];
                if kendra_lord == trikona_lord {
                    continue;
                }
                let (Some(kpos), Some(tpos)) =
                    (chart.position(kendra_lord), chart.position(trikona_lord))
                else {
                    continue;
                };

                let (link, multiplier) = if aspects::are_in_exchange(kpos, tpos) {
                    ("exchange", 1.2)
                } else if aspects::are_conjunct(kpos, tpos) {
                    ("conjunction", 1.0)
                } else if aspects::are_mutually_aspecting(kpos, tpos)
                    || (aspects::is_aspecting(kpos, tpos) && aspects::is_aspecting(tpos, kpos))
                {
                    ("mutual aspect", 0.8)
                } else {
                    continue;
                };

                hits += 1;
                let (base, reasons) = yoga_strength_with_reasons(chart, &[kpos, tpos]);
                let strength = base * multiplier;
                yogas.push(
                    Yoga::new("Kendra-Trikona Raja Yoga", YogaCategory::Authority, strength, true)
                        .planets(vec![kendra_lord, trikona_lord])
                        .houses(vec![kendra, trikona])
                        .describe(
                            format!(
                                "Lords of houses {kendra} and {trikona} joined by {link}"
                            ),
                            "Rise to authority, leadership, recognition and lasting status",
                        )
                        .activation(format!("{kendra_lord} or {trikona_lord} periods"))
                        .cancellations(reasons),
                );
            }
        }
        hits
    }

    fn bahudha_raja(&self, hits: usize) -> Yoga {
        let strength = (70.0 + hits as f64 * 8.0).min(98.0);
        Yoga::new("Bahudha Raja Yoga", YogaCategory::Authority, strength, true)
            .describe(
                format!("{hits} simultaneous kendra-trikona lordship links"),
                "Multiple reinforcing power combinations; exceptional rise in life",
            )
            .activation("Periods of any participating lord")
    }

    /// Lords of the 9th and 10th swapping or occupying each other's
    /// houses: the strongest base in the catalog.
    fn dharma_karmadhipati(&self, chart: &Chart, yogas: &mut Vec<Yoga>) {
        let (Some(lord9), Some(lord10)) = (lord_position(chart, 9), lord_position(chart, 10))
        else {
            return;
        };
        if lord9.planet == lord10.planet {
            return;
        }
        let swapped = lord9.house == 10 && lord10.house == 9;
        let placed = lord9.house == 10 || lord10.house == 9;
        if !placed {
            return;
        }
        let base = if swapped { 95.0 } else { 85.0 };
        let (strength, reasons) = scaled_strength(chart, &[lord9, lord10], base);
        yogas.push(
            Yoga::new("Dharma-Karmadhipati Yoga", YogaCategory::Authority, strength, true)
                .planets(vec![lord9.planet, lord10.planet])
                .houses(vec![9, 10])
                .describe(
                    "Lords of fortune (9th) and career (10th) interlinked by placement",
                    "Righteous authority; career blessed by fortune, high achievement",
                )
                .activation(format!("{} or {} periods", lord9.planet, lord10.planet))
                .cancellations(reasons),
        );
    }

    fn pancha_dashama(&self, chart: &Chart, yogas: &mut Vec<Yoga>) {
        let (Some(lord5), Some(lord10)) = (lord_position(chart, 5), lord_position(chart, 10))
        else {
            return;
        };
        if lord5.planet == lord10.planet {
            return;
        }
        let swapped = lord5.house == 10 && lord10.house == 5;
        let placed = lord5.house == 10 || lord10.house == 5;
        if !placed {
            return;
        }
        let base = if swapped { 90.0 } else { 80.0 };
        let (strength, reasons) = scaled_strength(chart, &[lord5, lord10], base);
        yogas.push(
            Yoga::new("Pancha-Dashama Yoga", YogaCategory::Authority, strength, true)
                .planets(vec![lord5.planet, lord10.planet])
                .houses(vec![5, 10])
                .describe(
                    "Lords of the 5th and 10th houses in each other's domains",
                    "Intelligence applied to career; merit recognized by authority",
                )
                .activation(format!("{} or {} periods", lord5.planet, lord10.planet))
                .cancellations(reasons),
        );
    }

    fn maha_parivartana(&self, chart: &Chart, yogas: &mut Vec<Yoga>) {
        let (Some(lord1), Some(lord10)) = (lord_position(chart, 1), lord_position(chart, 10))
        else {
            return;
        };
        if lord1.planet == lord10.planet || lord1.house != 10 || lord10.house != 1 {
            return;
        }
        let (strength, reasons) = scaled_strength(chart, &[lord1, lord10], 95.0);
        yogas.push(
            Yoga::new("Maha Parivartana Yoga", YogaCategory::Authority, strength, true)
                .planets(vec![lord1.planet, lord10.planet])
                .houses(vec![1, 10])
                .describe(
                    "Lagna lord in the 10th while the 10th lord holds the lagna",
                    "Identity fused with career; commanding public position",
                )
                .activation(format!("{} or {} periods", lord1.planet, lord10.planet))
                .cancellations(reasons),
        );
    }

    /// A cancelled debilitation turns into a raja yoga of its own.
    fn neecha_bhanga_raja(&self, chart: &Chart, yogas: &mut Vec<Yoga>) {
        for pos in chart.positions() {
            if !is_debilitated(pos) {
                continue;
            }
            let Some(bhanga) = neecha_bhanga_reason(chart, pos) else {
                continue;
            };
            let (strength, mut reasons) = yoga_strength_with_reasons(chart, &[pos]);
            reasons.push(bhanga);
            yogas.push(
                Yoga::new(
                    "Neecha Bhanga Raja Yoga",
                    YogaCategory::Authority,
                    strength,
                    true,
                )
                .planets(vec![pos.planet])
                .houses(vec![pos.house])
                .describe(
                    format!("{}'s debilitation is cancelled and reversed", pos.planet),
                    "Dramatic rise after early struggle; strength born from adversity",
                )
                .activation(format!("{} Dasha", pos.planet))
                .cancellations(reasons),
            );
        }
    }

    fn maha_raja(&self, chart: &Chart, yogas: &mut Vec<Yoga>) {
        let (Some(moon), Some(jupiter), Some(venus)) = (
            chart.position(Planet::Moon),
            chart.position(Planet::Jupiter),
            chart.position(Planet::Venus),
        ) else {
            return;
        };
        if !is_in_kendra_from(jupiter, moon) || !is_in_kendra_from(venus, moon) {
            return;
        }
        let (strength, reasons) = yoga_strength_with_reasons(chart, &[jupiter, venus, moon]);
        yogas.push(
            Yoga::new("Maha Raja Yoga", YogaCategory::Authority, strength, true)
                .planets(vec![Planet::Jupiter, Planet::Venus, Planet::Moon])
                .houses(vec![jupiter.house, venus.house, moon.house])
                .describe(
                    "Both great benefics hold kendras counted from the Moon",
                    "Sustained prosperity and protection; dignified public life",
                )
                .activation("Jupiter or Venus periods")
                .cancellations(reasons),
        );
    }

    fn pushkala(&self, chart: &Chart, yogas: &mut Vec<Yoga>) {
        let Some(moon) = chart.position(Planet::Moon) else {
            return;
        };
        let Some(lagnesh) = lord_position(chart, 1) else {
            return;
        };
        if !KENDRA_HOUSES.contains(&moon.house) {
            return;
        }
        if !aspects::are_conjunct_within(lagnesh, moon, WIDE_CONJUNCTION_ORB) {
            return;
        }
        let Some(dispositor) = crate::relations::dispositor(chart, moon) else {
            return;
        };
        if !KENDRA_HOUSES.contains(&dispositor.house) || !is_dignified(dispositor) {
            return;
        }
        let (strength, reasons) =
            yoga_strength_with_reasons(chart, &[moon, lagnesh, dispositor]);
        yogas.push(
            Yoga::new("Pushkala Yoga", YogaCategory::Authority, strength, true)
                .planets(vec![Planet::Moon, lagnesh.planet, dispositor.planet])
                .houses(vec![moon.house, dispositor.house])
                .describe(
                    "Angular Moon joined by the lagna lord, its dispositor strong in a kendra",
                    "Widely honored, eloquent, wealthy; supported by powerful patrons",
                )
                .activation("Moon Dasha")
                .cancellations(reasons),
        );
    }

    /// Directional-strength seats that amount to raja yogas on their own.
    fn dig_bala_raja(&self, chart: &Chart, yogas: &mut Vec<Yoga>) {
        let seats: [(Planet, u8, &str, &str); 4] = [
            (
                Planet::Sun,
                10,
                "Surya Digbala Raja Yoga",
                "Commanding career; natural seat of kingly authority",
            ),
            (
                Planet::Jupiter,
                1,
                "Guru Digbala Raja Yoga",
                "Wisdom shapes the personality; respected counsel and fortune",
            ),
            (
                Planet::Mars,
                10,
                "Kuja Digbala Raja Yoga",
                "Courageous leadership in profession; success through decisive action",
            ),
            (
                Planet::Saturn,
                7,
                "Shani Digbala Raja Yoga",
                "Enduring authority built through discipline and alliances",
            ),
        ];
        for (planet, house, name, effects) in seats {
            let Some(pos) = chart.position(planet) else {
                continue;
            };
            if pos.house != house {
                continue;
            }
            // Saturn's seat only counts when dignified; the others are
            // elevated further by exaltation.
            if planet == Planet::Saturn && !is_dignified(pos) {
                continue;
            }
            let base = if is_exalted(pos) { 95.0 } else { 85.0 };
            let (strength, reasons) = scaled_strength(chart, &[pos], base);
            yogas.push(
                Yoga::new(name, YogaCategory::Authority, strength, true)
                    .planets(vec![planet])
                    .houses(vec![house])
                    .describe(
                        format!("{planet} holds its directional-strength house {house}"),
                        effects,
                    )
                    .activation(format!("{planet} Dasha"))
                    .cancellations(reasons),
            );
        }
    }

    fn akhanda_samrajya(&self, chart: &Chart, yogas: &mut Vec<Yoga>) {
        if chart.ascendant_sign().quality() != SignQuality::Fixed {
            return;
        }
        let lords = house_lords(chart.ascendant_sign());
        let jupiter_rules_gain = [2u8, 5, 11]
            .iter()
            .any(|&h| lords[(h - 1) as usize] == Planet::Jupiter);
        if !jupiter_rules_gain {
            return;
        }
        let Some(moon) = chart.position(Planet::Moon) else {
            return;
        };
        let anchor = [2u8, 9, 11].iter().find_map(|&h| {
            let pos = lord_position(chart, h)?;
            is_in_kendra_from(pos, moon).then_some((h, pos))
        });
        let Some((house, anchor_pos)) = anchor else {
            return;
        };
        let (strength, reasons) = scaled_strength(chart, &[anchor_pos, moon], 80.0);
        yogas.push(
            Yoga::new("Akhanda Samrajya Yoga", YogaCategory::Authority, strength, true)
                .planets(vec![anchor_pos.planet, Planet::Moon])
                .houses(vec![house, moon.house])
                .describe(
                    "Fixed lagna with Jupiter ruling a gain house and a wealth lord angular from the Moon",
                    "Unbroken dominion; stable rulership over one's domain",
                )
                .activation(format!("{} Dasha", anchor_pos.planet))
                .cancellations(reasons),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Chart;

    #[test]
    fn dharma_karmadhipati_detected() {
        // Aries lagna: lord 9 = Jupiter, lord 10 = Saturn. Jupiter in
        // Capricorn (house 10), Saturn in Sagittarius (house 9).
        let chart = Chart::whole_sign(
            5.0,
            &[(Planet::Jupiter, 275.0), (Planet::Saturn, 250.0)],
        );
        let yogas = RajaEvaluator.evaluate(&chart);
        let dk = yogas
            .iter()
            .find(|y| y.name == "Dharma-Karmadhipati Yoga")
            .unwrap();
        assert!(dk.is_auspicious);
        assert_eq!(dk.houses, vec![9, 10]);
    }

    #[test]
    fn kendra_trikona_conjunction_found() {
        // Aries lagna: lord 4 = Moon, lord 9 = Jupiter, conjunct in Cancer.
        let chart = Chart::whole_sign(
            5.0,
            &[(Planet::Moon, 96.0), (Planet::Jupiter, 100.0)],
        );
        let yogas = RajaEvaluator.evaluate(&chart);
        assert!(yogas.iter().any(|y| y.name == "Kendra-Trikona Raja Yoga"));
    }

    #[test]
    fn neecha_bhanga_raja_needs_cancellation() {
        // Aries lagna, Mars debilitated in Cancer = house 4 (kendra): bhanga.
        let chart = Chart::whole_sign(5.0, &[(Planet::Mars, 100.0)]);
        let yogas = RajaEvaluator.evaluate(&chart);
        let nb = yogas
            .iter()
            .find(|y| y.name == "Neecha Bhanga Raja Yoga")
            .unwrap();
        assert!(nb
            .cancellation_factors
            .iter()
            .any(|r| r.contains("kendra")));
    }

    #[test]
    fn no_links_no_bahudha() {
        let chart = Chart::whole_sign(5.0, &[(Planet::Sun, 130.0)]);
        let yogas = RajaEvaluator.evaluate(&chart);
        assert!(!yogas.iter().any(|y| y.name == "Bahudha Raja Yoga"));
    }
}
