//! Parivartana (mutual sign exchange) yogas. All 66 unordered house
//! pairs are scanned once, so each exchange emits exactly one pattern;
//! tiers follow the classical Maha / Khala / Dainya division.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::core::constants::{DUSTHANA_HOUSES, KENDRA_HOUSES, TRIKONA_HOUSES};
use crate::core::traits::YogaEvaluator;
use crate::core::{Chart, PlanetPosition, Yoga, YogaCategory};
use crate::relations::lord_position;
use crate::relations::strength::scaled_strength;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExchangeTier {
    /// Both houses favorable.
    Maha,
    /// The 3rd house involved: gains through grit, some mischief.
    Khala,
    /// A dusthana involved: hardship before relief.
    Dainya,
}

struct ExchangeNarrative {
    name: &'static str,
    effects: &'static str,
}

static EXCHANGE_NARRATIVES: Lazy<HashMap<(u8, u8), ExchangeNarrative>> = Lazy::new(|| {
    let mut narratives = HashMap::new();
    let mut add = |pair: (u8, u8), name: &'static str, effects: &'static str| {
        narratives.insert(pair, ExchangeNarrative { name, effects });
    };
    add((1, 2), "Deha-Dhana Parivartana", "Self and wealth interwoven; earning power rises with confidence");
    add((1, 3), "Deha-Parakrama Parivartana", "Identity forged through courage; bold self-expression");
    add((1, 4), "Deha-Sukha Parivartana", "Self rooted in home; property and mother shape the path");
    add((1, 5), "Deha-Putra Parivartana", "Creative identity; intelligence and children central");
    add((1, 6), "Deha-Ripu Parivartana", "Health battles temper the self; service refines character");
    add((1, 7), "Deha-Kalatra Parivartana", "Identity completed in partnership; fortunes tied to the spouse");
    add((1, 8), "Deha-Randhra Parivartana", "A transformative life; the self remade through crises");
    add((1, 9), "Deha-Bhagya Parivartana", "The self carried by fortune; dharma expressed personally");
    add((1, 10), "Deha-Karma Parivartana", "Person and profession fused; public identity");
    add((1, 11), "Deha-Labha Parivartana", "Gains through personality; networks form around the native");
    add((1, 12), "Deha-Vyaya Parivartana", "Self spent for distant aims; foreign lands and retreat call");
    add((2, 3), "Dhana-Parakrama Parivartana", "Wealth through daring; speech and skill monetized");
    add((2, 4), "Dhana-Sukha Parivartana", "Family wealth in property; comfortable holdings");
    add((2, 5), "Dhana-Putra Parivartana", "Wealth through speculation and creative works");
    add((2, 6), "Dhana-Ripu Parivartana", "Earnings through service under strain; debts recycle");
    add((2, 7), "Dhana-Kalatra Parivartana", "Wealth through marriage and trade partnerships");
    add((2, 8), "Dhana-Randhra Parivartana", "Family wealth disrupted; inheritance entangled");
    add((2, 9), "Dhana-Bhagya Parivartana", "Fortune funds the family; wealth blessed by dharma");
    add((2, 10), "Dhana-Karma Parivartana", "Career built to earn; profession feeds savings");
    add((2, 11), "Dhana-Labha Parivartana", "The classic money exchange; income and assets compound");
    add((2, 12), "Dhana-Vyaya Parivartana", "Wealth drains abroad; savings spent on distant causes");
    add((3, 4), "Parakrama-Sukha Parivartana", "Courage wins property; restless domestic life");
    add((3, 5), "Parakrama-Putra Parivartana", "Bold creativity; performing talent");
    add((3, 6), "Parakrama-Ripu Parivartana", "Grit against rivals; competitive victories hard won");
    add((3, 7), "Parakrama-Kalatra Parivartana", "Daring partnerships; the spouse met through ventures");
    add((3, 8), "Parakrama-Randhra Parivartana", "Courage tested by crisis; risky undertakings");
    add((3, 9), "Parakrama-Bhagya Parivartana", "Fortune favors the brave; luck through initiative");
    add((3, 10), "Parakrama-Karma Parivartana", "Self-made career; enterprise becomes profession");
    add((3, 11), "Parakrama-Labha Parivartana", "Gains through hustle; profitable side ventures");
    add((3, 12), "Parakrama-Vyaya Parivartana", "Effort leaks away; courage spent on hidden battles");
    add((4, 5), "Sukha-Putra Parivartana", "Happy home and gifted children; learning in comfort");
    add((4, 6), "Sukha-Ripu Parivartana", "Domestic peace disturbed by obligations and health");
    add((4, 7), "Sukha-Kalatra Parivartana", "Partner and home exchanged; marriage shapes residence");
    add((4, 8), "Sukha-Randhra Parivartana", "Property entangled in inheritance; upheavals at home");
    add((4, 9), "Sukha-Bhagya Parivartana", "Fortunate homeland; property blessed by fortune");
    add((4, 10), "Sukha-Karma Parivartana", "Home and career traded; work rooted in land and public");
    add((4, 11), "Sukha-Labha Parivartana", "Gains through property; a prosperous household");
    add((4, 12), "Sukha-Vyaya Parivartana", "Home abroad; comfort found far from origins");
    add((5, 6), "Putra-Ripu Parivartana", "Creative work under strain; children bring obligations");
    add((5, 7), "Putra-Kalatra Parivartana", "Romance and marriage intertwined; artistic partnership");
    add((5, 8), "Putra-Randhra Parivartana", "Intelligence drawn to the occult; speculative risk");
    add((5, 9), "Putra-Bhagya Parivartana", "The trine exchange; merit and fortune multiply");
    add((5, 10), "Putra-Karma Parivartana", "Creative authority; intellect recognized professionally");
    add((5, 11), "Putra-Labha Parivartana", "Speculative gains; creative work pays");
    add((5, 12), "Putra-Vyaya Parivartana", "Imagination turned inward; children distant");
    add((6, 7), "Ripu-Kalatra Parivartana", "Partnership strained by service and disputes");
    add((6, 8), "Ripu-Randhra Parivartana", "Dusthana reversal; enemies and crises undo each other");
    add((6, 9), "Ripu-Bhagya Parivartana", "Fortune delayed by obligations; service becomes dharma");
    add((6, 10), "Ripu-Karma Parivartana", "Career in service fields; competitive workplaces");
    add((6, 11), "Ripu-Labha Parivartana", "Gains through service and persistence");
    add((6, 12), "Ripu-Vyaya Parivartana", "Dusthana reversal; losses and foes dissolve together");
    add((7, 8), "Kalatra-Randhra Parivartana", "Marriage transformed by crises; joint resources entangled");
    add((7, 9), "Kalatra-Bhagya Parivartana", "A fortunate match; partner brings luck");
    add((7, 10), "Kalatra-Karma Parivartana", "Business with the partner; public dealings prosper");
    add((7, 11), "Kalatra-Labha Parivartana", "Gains through alliances; profitable associations");
    add((7, 12), "Kalatra-Vyaya Parivartana", "Partner from afar; union draws the native abroad");
    add((8, 9), "Randhra-Bhagya Parivartana", "Fortune interrupted; faith rebuilt after upheaval");
    add((8, 10), "Randhra-Karma Parivartana", "Career in others' resources; professional upheavals");
    add((8, 11), "Randhra-Labha Parivartana", "Sudden gains and sudden reversals; windfalls");
    add((8, 12), "Randhra-Vyaya Parivartana", "Dusthana reversal; the hardest houses disarm each other");
    add((9, 10), "Dharma-Karmadhipati Parivartana", "The supreme exchange; fortune and career crown each other");
    add((9, 11), "Bhagya-Labha Parivartana", "Fortune flows into gains; patrons and prosperity");
    add((9, 12), "Bhagya-Vyaya Parivartana", "Fortune spent on faith; pilgrimage and distant blessings");
    add((10, 11), "Karma-Labha Parivartana", "Career yields rising income; ambition rewarded");
    add((10, 12), "Karma-Vyaya Parivartana", "Work abroad or behind the scenes; quiet influence");
    add((11, 12), "Labha-Vyaya Parivartana", "Gains and losses trade places; generous accumulation");
    narratives
});

struct FoundExchange {
    houses: (u8, u8),
    tier: ExchangeTier,
    authority: bool,
}

pub struct ParivartanaEvaluator;

impl YogaEvaluator for ParivartanaEvaluator {
    fn name(&self) -> &'static str {
        "parivartana"
    }

    fn category(&self) -> YogaCategory {
        YogaCategory::ExchangeBased
    }

    fn evaluate(&self, chart: &Chart) -> Vec<Yoga> {
        let mut yogas = Vec::new();
        let mut found = Vec::new();

        for h1 in 1..=11u8 {
            for h2 in (h1 + 1)..=12u8 {
                let (Some(l1), Some(l2)) = (lord_position(chart, h1), lord_position(chart, h2))
                else {
                    continue;
                };
                if l1.planet == l2.planet {
                    continue;
                }
                if l1.house != h2 || l2.house != h1 {
                    continue;
                }
                let exchange = classify(h1, h2);
                yogas.push(self.build_yoga(chart, &exchange, l1, l2));
                found.push(exchange);
            }
        }

        if found.len() >= 2 {
            yogas.push(self.aggregate(&found));
        }
        yogas
    }
}

fn classify(h1: u8, h2: u8) -> FoundExchange {
    let dusthana = DUSTHANA_HOUSES.contains(&h1) || DUSTHANA_HOUSES.contains(&h2);
    let tier = if dusthana {
        ExchangeTier::Dainya
    } else if h1 == 3 || h2 == 3 {
        ExchangeTier::Khala
    } else {
        ExchangeTier::Maha
    };
    let kendra = |h: u8| KENDRA_HOUSES.contains(&h);
    let trikona = |h: u8| TRIKONA_HOUSES.contains(&h);
    // Angular and trine lords trading places is a power combination;
    // so is the 9-10 pair in either direction.
    let authority = tier == ExchangeTier::Maha
        && ((kendra(h1) && trikona(h2))
            || (trikona(h1) && kendra(h2))
            || (kendra(h1) && kendra(h2))
            || (h1, h2) == (9, 10));
    FoundExchange {
        houses: (h1, h2),
        tier,
        authority,
    }
}

impl ParivartanaEvaluator {
    fn build_yoga(
        &self,
        chart: &Chart,
        exchange: &FoundExchange,
        l1: &PlanetPosition,
        l2: &PlanetPosition,
    ) -> Yoga {
        let (h1, h2) = exchange.houses;
        let wealth_pair = matches!(h1, 1 | 2 | 5 | 9 | 11) && matches!(h2, 1 | 2 | 5 | 9 | 11);
        let (base, category, auspicious) = match exchange.tier {
            ExchangeTier::Maha if exchange.authority => (90.0, YogaCategory::Authority, true),
            ExchangeTier::Maha if wealth_pair => (85.0, YogaCategory::Wealth, true),
            ExchangeTier::Maha => (80.0, YogaCategory::ExchangeBased, true),
            ExchangeTier::Khala => (65.0, YogaCategory::ExchangeBased, false),
            ExchangeTier::Dainya => (40.0, YogaCategory::Negative, false),
        };
        static FALLBACK: ExchangeNarrative = ExchangeNarrative {
            name: "Parivartana Yoga",
            effects: "The exchanged lords pool their significations",
        };
        let narrative = EXCHANGE_NARRATIVES.get(&(h1, h2)).unwrap_or(&FALLBACK);
        let (strength, mut reasons) = scaled_strength(chart, &[l1, l2], base);
        if exchange.tier == ExchangeTier::Dainya {
            reasons.push("Dusthana lord involved; results improve after struggle".to_string());
        }
        Yoga::new(narrative.name, category, strength, auspicious)
            .planets(vec![l1.planet, l2.planet])
            .houses(vec![h1, h2])
            .describe(
                format!("Lords of houses {h1} and {h2} occupy each other's houses"),
                narrative.effects,
            )
            .activation(format!("{} or {} periods", l1.planet, l2.planet))
            .cancellations(reasons)
    }

    fn aggregate(&self, found: &[FoundExchange]) -> Yoga {
        let strength = if found.iter().any(|e| e.authority) {
            95.0
        } else if found.iter().any(|e| e.tier == ExchangeTier::Maha) {
            80.0
        } else {
            70.0
        };
        let houses: Vec<u8> = found
            .iter()
            .flat_map(|e| [e.houses.0, e.houses.1])
            .collect();
        Yoga::new(
            "Bahudha Parivartana Yoga",
            YogaCategory::ExchangeBased,
            strength,
            true,
        )
        .houses(houses)
        .describe(
            format!("{} simultaneous lord exchanges", found.len()),
            "Interlocking exchanges knit the chart's houses into one engine",
        )
        .activation("Periods of any exchanging lord")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Planet;

    #[test]
    fn four_ten_exchange_emits_once_as_authority() {
        // Aries lagna: 4th lord Moon in Capricorn (house 10), 10th lord
        // Saturn in Cancer (house 4).
        let chart = Chart::whole_sign(5.0, &[(Planet::Moon, 275.0), (Planet::Saturn, 100.0)]);
        let yogas = ParivartanaEvaluator.evaluate(&chart);
        let exchanges: Vec<_> = yogas
            .iter()
            .filter(|y| y.houses == vec![4, 10])
            .collect();
        assert_eq!(exchanges.len(), 1);
        assert_eq!(exchanges[0].category, YogaCategory::Authority);
    }

    #[test]
    fn dainya_exchange_is_negative() {
        // Aries lagna: 2nd lord Venus in Virgo (house 6), 6th lord
        // Mercury in Taurus (house 2).
        let chart = Chart::whole_sign(5.0, &[(Planet::Venus, 160.0), (Planet::Mercury, 40.0)]);
        let yogas = ParivartanaEvaluator.evaluate(&chart);
        let dainya = yogas
            .iter()
            .find(|y| y.name == "Dhana-Ripu Parivartana")
            .unwrap();
        assert_eq!(dainya.category, YogaCategory::Negative);
        assert!(!dainya.is_auspicious);
        assert!(dainya
            .cancellation_factors
            .iter()
            .any(|r| r.contains("Dusthana")));
    }

    #[test]
    fn narrative_table_covers_all_pairs() {
        for h1 in 1..=11u8 {
            for h2 in (h1 + 1)..=12u8 {
                assert!(
                    EXCHANGE_NARRATIVES.contains_key(&(h1, h2)),
                    "missing narrative for ({h1},{h2})"
                );
            }
        }
        assert_eq!(EXCHANGE_NARRATIVES.len(), 66);
    }

    #[test]
    fn no_exchange_no_emission() {
        let chart = Chart::whole_sign(5.0, &[(Planet::Moon, 100.0), (Planet::Saturn, 280.0)]);
        assert!(ParivartanaEvaluator.evaluate(&chart).is_empty());
    }
}
