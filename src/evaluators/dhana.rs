//! Wealth (dhana) combinations: lordship links between the money
//! houses, dignified wealth lords, gain-house occupations, enterprise
//! and property yogas, and the rare great-wealth combinations.

use crate::core::constants::{ARTHA_HOUSES, KENDRA_HOUSES};
use crate::core::traits::YogaEvaluator;
use crate::core::{Chart, Planet, PlanetPosition, Yoga, YogaCategory, ZodiacSign};
use crate::relations::dignity::{is_dignified, is_exalted};
use crate::relations::strength::scaled_strength;
use crate::relations::{aspects, house_from, lord_position};

/// Houses whose occupation is favorable for income flows.
const GOOD_MONEY_HOUSES: [u8; 7] = [1, 2, 4, 5, 9, 10, 11];

pub struct DhanaEvaluator;

impl YogaEvaluator for DhanaEvaluator {
    fn name(&self) -> &'static str {
        "dhana"
    }

    fn category(&self) -> YogaCategory {
        YogaCategory::Wealth
    }

    fn evaluate(&self, chart: &Chart) -> Vec<Yoga> {
        let mut yogas = Vec::new();
        self.lord_link_yogas(chart, &mut yogas);
        self.lakshmi_yogas(chart, &mut yogas);
        self.chandra_mangala(chart, &mut yogas);
        self.second_house_yogas(chart, &mut yogas);
        self.eleventh_house_yogas(chart, &mut yogas);
        self.planetary_wealth_yogas(chart, &mut yogas);
        self.hidden_wealth_yogas(chart, &mut yogas);
        self.enterprise_yogas(chart, &mut yogas);
        self.property_yogas(chart, &mut yogas);
        self.aggregate_yogas(chart, &mut yogas);
        self.rare_wealth_yogas(chart, &mut yogas);
        yogas
    }
}

impl DhanaEvaluator {
    fn push_pair_link(
        &self,
        chart: &Chart,
        yogas: &mut Vec<Yoga>,
        h1: u8,
        h2: u8,
        name: &str,
        effects: &str,
        base_conjunct: f64,
        base_aspect: f64,
    ) -> bool {
        let (Some(a), Some(b)) = (lord_position(chart, h1), lord_position(chart, h2)) else {
            return false;
        };
        if a.planet == b.planet {
            return false;
        }
        let base = if aspects::are_conjunct(a, b) {
            base_conjunct
        } else if aspects::are_connected(a, b) {
            base_aspect
        } else {
            return false;
        };
        let (strength, reasons) = scaled_strength(chart, &[a, b], base);
        yogas.push(
            Yoga::new(name, YogaCategory::Wealth, strength, true)
                .planets(vec![a.planet, b.planet])
                .houses(vec![h1, h2])
                .describe(
                    format!("Lords of houses {h1} and {h2} linked by association"),
                    effects,
                )
                .activation(format!("{} or {} periods", a.planet, b.planet))
                .cancellations(reasons),
        );
        true
    }

    fn lord_link_yogas(&self, chart: &Chart, yogas: &mut Vec<Yoga>) {
        self.push_pair_link(
            chart,
            yogas,
            2,
            11,
            "Dhana-Labha Yoga",
            "Steady accumulation; earnings and savings reinforce each other",
            85.0,
            75.0,
        );
        self.push_pair_link(
            chart,
            yogas,
            5,
            9,
            "Trikona Dhana Yoga",
            "Fortune through merit and past credit; windfalls and patronage",
            90.0,
            80.0,
        );

        // Lagna-Dhana: the self joined to stored wealth.
        if let (Some(l1), Some(l2)) = (lord_position(chart, 1), lord_position(chart, 2)) {
            if l1.planet != l2.planet {
                let linked = aspects::are_conjunct(l1, l2)
                    || (l1.house == 2 && l2.house == 1);
                if linked {
                    let (strength, reasons) = scaled_strength(chart, &[l1, l2], 80.0);
                    yogas.push(
                        Yoga::new("Lagna-Dhana Yoga", YogaCategory::Wealth, strength, true)
                            .planets(vec![l1.planet, l2.planet])
                            .houses(vec![1, 2])
                            .describe(
                                "Lagna lord and 2nd lord joined or in each other's houses",
                                "Wealth through personal initiative; self-made prosperity",
                            )
                            .activation(format!("{} or {} periods", l1.planet, l2.planet))
                            .cancellations(reasons),
                    );
                }
            }
        }

        // Bahudha Dhana: three or more links among the wealth-lord circle.
        let circle: Vec<&PlanetPosition> = [1u8, 2, 5, 9, 11]
            .iter()
            .filter_map(|&h| lord_position(chart, h))
            .collect();
        let mut connections = 0;
        for i in 0..circle.len() {
            for j in (i + 1)..circle.len() {
                if circle[i].planet == circle[j].planet {
                    continue;
                }
                if aspects::are_connected(circle[i], circle[j]) {
                    connections += 1;
                }
            }
        }
        if connections >= 3 {
            let positions: Vec<&PlanetPosition> = circle.clone();
            let (strength, reasons) = scaled_strength(chart, &positions, 90.0);
            yogas.push(
                Yoga::new("Bahudha Dhana Yoga", YogaCategory::Wealth, strength, true)
                    .planets(circle.iter().map(|p| p.planet).collect())
                    .houses(vec![1, 2, 5, 9, 11])
                    .describe(
                        format!("{connections} links among the wealth-house lords"),
                        "Multiple independent income streams; compounding fortune",
                    )
                    .activation("Periods of any wealth lord")
                    .cancellations(reasons),
            );
        }
    }

    fn lakshmi_yogas(&self, chart: &Chart, yogas: &mut Vec<Yoga>) {
        // Maha Lakshmi: dignified 9th lord angular or trinal, lagna lord
        // likewise placed.
        if let (Some(l9), Some(l1)) = (lord_position(chart, 9), lord_position(chart, 1)) {
            let good = |h: u8| KENDRA_HOUSES.contains(&h) || matches!(h, 5 | 9);
            if is_dignified(l9) && good(l9.house) && good(l1.house) {
                let (strength, reasons) = scaled_strength(chart, &[l9, l1], 95.0);
                yogas.push(
                    Yoga::new("Maha Lakshmi Yoga", YogaCategory::Wealth, strength, true)
                        .planets(vec![l9.planet, l1.planet])
                        .houses(vec![l9.house, l1.house])
                        .describe(
                            "Dignified fortune lord and well-placed lagna lord",
                            "Abundant and protected wealth; grace of Lakshmi",
                        )
                        .activation(format!("{} Dasha", l9.planet))
                        .cancellations(reasons),
                );
            }
        }

        // Shukra Lakshmi: dignified Venus in a kendra or trikona.
        if let Some(venus) = chart.position(Planet::Venus) {
            if is_dignified(venus)
                && (KENDRA_HOUSES.contains(&venus.house) || matches!(venus.house, 5 | 9))
            {
                let (strength, reasons) = scaled_strength(chart, &[venus], 85.0);
                yogas.push(
                    Yoga::new("Shukra Lakshmi Yoga", YogaCategory::Wealth, strength, true)
                        .planets(vec![Planet::Venus])
                        .houses(vec![venus.house])
                        .describe(
                            "Venus strong in sign and angular or trinal in house",
                            "Luxuries, vehicles, refined comforts; wealth through the arts",
                        )
                        .activation("Venus Dasha")
                        .cancellations(reasons),
                );
            }
        }
    }

    fn chandra_mangala(&self, chart: &Chart, yogas: &mut Vec<Yoga>) {
        let (Some(moon), Some(mars)) = (chart.position(Planet::Moon), chart.position(Planet::Mars))
        else {
            return;
        };
        if !aspects::are_conjunct(moon, mars) {
            return;
        }
        let favorable = GOOD_MONEY_HOUSES.contains(&moon.house);
        let base = if favorable { 80.0 } else { 65.0 };
        let (strength, reasons) = scaled_strength(chart, &[moon, mars], base);
        yogas.push(
            Yoga::new("Chandra-Mangala Yoga", YogaCategory::Wealth, strength, favorable)
                .planets(vec![Planet::Moon, Planet::Mars])
                .houses(vec![moon.house])
                .describe(
                    "Moon and Mars conjoined",
                    "Earning drive and liquidity; money made energetically, spent the same way",
                )
                .activation("Moon or Mars periods")
                .cancellations(reasons),
        );
    }

    fn second_house_yogas(&self, chart: &Chart, yogas: &mut Vec<Yoga>) {
        // Benefics occupying the house of stored wealth.
        let benefics_in_second: Vec<&PlanetPosition> = chart
            .occupants(2)
            .into_iter()
            .filter(|p| p.planet.is_natural_benefic())
            .collect();
        if !benefics_in_second.is_empty() {
            let with_jupiter = benefics_in_second
                .iter()
                .any(|p| p.planet == Planet::Jupiter);
            let base = if with_jupiter { 85.0 } else { 75.0 };
            let (strength, reasons) = scaled_strength(chart, &benefics_in_second, base);
            yogas.push(
                Yoga::new("Shubha Dhana Bhava Yoga", YogaCategory::Wealth, strength, true)
                    .planets(benefics_in_second.iter().map(|p| p.planet).collect())
                    .houses(vec![2])
                    .describe(
                        "Natural benefics occupy the 2nd house",
                        "Savings grow smoothly; family wealth and pleasant speech",
                    )
                    .activation("Periods of the occupying benefics")
                    .cancellations(reasons),
            );
        }

        // Uccha Dhanesh: dignified 2nd lord.
        if let Some(l2) = lord_position(chart, 2) {
            if is_dignified(l2) {
                let (strength, reasons) = scaled_strength(chart, &[l2], 80.0);
                yogas.push(
                    Yoga::new("Uccha Dhanesh Yoga", YogaCategory::Wealth, strength, true)
                        .planets(vec![l2.planet])
                        .houses(vec![2, l2.house])
                        .describe(
                            "2nd lord exalted or in own sign",
                            "Reliable accumulation; wealth preserved across setbacks",
                        )
                        .activation(format!("{} Dasha", l2.planet))
                        .cancellations(reasons),
                );
            }
        }

        // Direct 2nd/11th placement swap.
        if let (Some(l2), Some(l11)) = (lord_position(chart, 2), lord_position(chart, 11)) {
            if l2.planet != l11.planet && (l2.house == 11 || l11.house == 2) {
                let (strength, reasons) = scaled_strength(chart, &[l2, l11], 80.0);
                yogas.push(
                    Yoga::new("Dhana-Labha Sthana Yoga", YogaCategory::Wealth, strength, true)
                        .planets(vec![l2.planet, l11.planet])
                        .houses(vec![2, 11])
                        .describe(
                            "2nd lord in the 11th or 11th lord in the 2nd",
                            "Income feeds savings directly; gains convert to assets",
                        )
                        .activation(format!("{} or {} periods", l2.planet, l11.planet))
                        .cancellations(reasons),
                );
            }
        }
    }

    fn eleventh_house_yogas(&self, chart: &Chart, yogas: &mut Vec<Yoga>) {
        // Bahudha Labha: a crowded house of gains.
        let occupants = chart.occupants(11);
        if occupants.len() >= 3 {
            let benefics = occupants
                .iter()
                .filter(|p| p.planet.is_natural_benefic())
                .count();
            let base =
                (70.0 + benefics as f64 * 5.0 + occupants.len() as f64 * 2.0).min(95.0);
            let auspicious = benefics * 2 >= occupants.len();
            let (strength, reasons) = scaled_strength(chart, &occupants, base);
            yogas.push(
                Yoga::new("Bahudha Labha Yoga", YogaCategory::Wealth, strength, auspicious)
                    .planets(occupants.iter().map(|p| p.planet).collect())
                    .houses(vec![11])
                    .describe(
                        format!("{} planets gathered in the 11th house", occupants.len()),
                        "Many channels of gain; wide networks bring opportunity",
                    )
                    .activation("Periods of the 11th-house occupants")
                    .cancellations(reasons),
            );
        }

        // Guru Labha: Jupiter seated in the gains house.
        if let Some(jupiter) = chart.position(Planet::Jupiter) {
            if jupiter.house == 11 {
                let (strength, reasons) = scaled_strength(chart, &[jupiter], 80.0);
                yogas.push(
                    Yoga::new("Guru Labha Yoga", YogaCategory::Wealth, strength, true)
                        .planets(vec![Planet::Jupiter])
                        .houses(vec![11])
                        .describe(
                            "Jupiter occupies the 11th house",
                            "Gains through wisdom, teaching and honest counsel",
                        )
                        .activation("Jupiter Dasha")
                        .cancellations(reasons),
                );
            }
        }

        // Labhesha Bala: the gains lord well placed.
        if let Some(l11) = lord_position(chart, 11) {
            if matches!(l11.house, 1 | 2 | 5 | 9 | 10 | 11) {
                let base = if is_dignified(l11) { 85.0 } else { 75.0 };
                let (strength, reasons) = scaled_strength(chart, &[l11], base);
                yogas.push(
                    Yoga::new("Labhesha Bala Yoga", YogaCategory::Wealth, strength, true)
                        .planets(vec![l11.planet])
                        .houses(vec![11, l11.house])
                        .describe(
                            "11th lord placed in a house favorable to income",
                            "Earnings rise steadily; desires find fulfillment",
                        )
                        .activation(format!("{} Dasha", l11.planet))
                        .cancellations(reasons),
                );
            }
        }
    }

    fn planetary_wealth_yogas(&self, chart: &Chart, yogas: &mut Vec<Yoga>) {
        if let Some(mercury) = chart.position(Planet::Mercury) {
            if is_dignified(mercury) && matches!(mercury.house, 2 | 10 | 11) {
                let (strength, reasons) = scaled_strength(chart, &[mercury], 80.0);
                yogas.push(
                    Yoga::new("Budha Dhana Yoga", YogaCategory::Wealth, strength, true)
                        .planets(vec![Planet::Mercury])
                        .houses(vec![mercury.house])
                        .describe(
                            "Dignified Mercury in a commerce house",
                            "Wealth through trade, analysis, writing and negotiation",
                        )
                        .activation("Mercury Dasha")
                        .cancellations(reasons),
                );
            }
        }

        if let Some(sun) = chart.position(Planet::Sun) {
            if is_dignified(sun) && matches!(sun.house, 10 | 11) {
                let (strength, reasons) = scaled_strength(chart, &[sun], 75.0);
                yogas.push(
                    Yoga::new("Surya Dhana Yoga", YogaCategory::Wealth, strength, true)
                        .planets(vec![Planet::Sun])
                        .houses(vec![sun.house])
                        .describe(
                            "Strong Sun in the career or gains house",
                            "Income through government, authority or one's own name",
                        )
                        .activation("Sun Dasha")
                        .cancellations(reasons),
                );
            }
        }

        if let Some(saturn) = chart.position(Planet::Saturn) {
            let qualifies =
                saturn.house == 11 || (is_dignified(saturn) && matches!(saturn.house, 2 | 10));
            if qualifies {
                let (strength, reasons) = scaled_strength(chart, &[saturn], 75.0);
                yogas.push(
                    Yoga::new("Shani Dhana Yoga", YogaCategory::Wealth, strength, true)
                        .planets(vec![Planet::Saturn])
                        .houses(vec![saturn.house])
                        .describe(
                            "Saturn placed for slow, durable accumulation",
                            "Wealth built late but lasting; gains through labor and land",
                        )
                        .activation("Saturn Dasha")
                        .cancellations(reasons),
                );
            }
        }

        if let Some(rahu) = chart.position(Planet::Rahu) {
            if matches!(rahu.house, 2 | 11) {
                let guided = aspects::aspected_by(chart, rahu, Planet::Jupiter);
                let base = if guided { 75.0 } else { 60.0 };
                let (strength, reasons) = scaled_strength(chart, &[rahu], base);
                yogas.push(
                    Yoga::new("Rahu Dhana Yoga", YogaCategory::Wealth, strength, guided)
                        .planets(vec![Planet::Rahu])
                        .houses(vec![rahu.house])
                        .describe(
                            "Rahu occupies a money house",
                            "Sudden and unconventional gains; foreign or speculative sources",
                        )
                        .activation("Rahu Dasha")
                        .cancellations(reasons),
                );
            }
        }
    }

    fn hidden_wealth_yogas(&self, chart: &Chart, yogas: &mut Vec<Yoga>) {
        // Guptha Dhana: 8th-house occupants protected by Jupiter's aspect.
        for pos in chart.occupants(8) {
            if aspects::aspected_by(chart, pos, Planet::Jupiter) {
                let (strength, reasons) = scaled_strength(chart, &[pos], 70.0);
                yogas.push(
                    Yoga::new("Guptha Dhana Yoga", YogaCategory::Wealth, strength, true)
                        .planets(vec![pos.planet, Planet::Jupiter])
                        .houses(vec![8])
                        .describe(
                            format!("{} in the 8th house under Jupiter's aspect", pos.planet),
                            "Inheritance, insurance and hidden assets surface favorably",
                        )
                        .activation(format!("{} Dasha", pos.planet))
                        .cancellations(reasons),
                );
            }
        }

        // Ashtamesh Dhana: the 8th lord redirected into wealth houses.
        if let Some(l8) = lord_position(chart, 8) {
            if matches!(l8.house, 1 | 2 | 5 | 9 | 11) {
                let base = if is_dignified(l8) { 80.0 } else { 70.0 };
                let (strength, reasons) = scaled_strength(chart, &[l8], base);
                yogas.push(
                    Yoga::new("Ashtamesh Dhana Yoga", YogaCategory::Wealth, strength, true)
                        .planets(vec![l8.planet])
                        .houses(vec![8, l8.house])
                        .describe(
                            "8th lord placed in a wealth house",
                            "Gains through inheritance, settlements or others' resources",
                        )
                        .activation(format!("{} Dasha", l8.planet))
                        .cancellations(reasons),
                );
            }
        }
    }

    fn enterprise_yogas(&self, chart: &Chart, yogas: &mut Vec<Yoga>) {
        self.push_pair_link(
            chart,
            yogas,
            3,
            10,
            "Parakrama-Karma Yoga",
            "Career advanced by personal courage; self-starting enterprise",
            75.0,
            75.0,
        );

        if let Some(l7) = lord_position(chart, 7) {
            if matches!(l7.house, 1 | 2 | 5 | 9 | 10 | 11) {
                let (strength, reasons) = scaled_strength(chart, &[l7], 70.0);
                yogas.push(
                    Yoga::new("Vyapara Yoga", YogaCategory::Wealth, strength, true)
                        .planets(vec![l7.planet])
                        .houses(vec![7, l7.house])
                        .describe(
                            "7th lord placed in a house of gain",
                            "Profit through partnership, trade and public dealings",
                        )
                        .activation(format!("{} Dasha", l7.planet))
                        .cancellations(reasons),
                );
            }
        }

        if let (Some(mercury), Some(saturn)) =
            (chart.position(Planet::Mercury), chart.position(Planet::Saturn))
        {
            if aspects::are_conjunct(mercury, saturn) {
                let base = if matches!(mercury.house, 2 | 3 | 6 | 10 | 11) {
                    75.0
                } else {
                    60.0
                };
                let (strength, reasons) = scaled_strength(chart, &[mercury, saturn], base);
                yogas.push(
                    Yoga::new("Budha-Shani Vyapara Yoga", YogaCategory::Wealth, strength, true)
                        .planets(vec![Planet::Mercury, Planet::Saturn])
                        .houses(vec![mercury.house])
                        .describe(
                            "Mercury and Saturn conjoined",
                            "Methodical business sense; wealth from patient commerce",
                        )
                        .activation("Mercury or Saturn periods")
                        .cancellations(reasons),
                );
            }
        }
    }

    fn property_yogas(&self, chart: &Chart, yogas: &mut Vec<Yoga>) {
        if let Some(l4) = lord_position(chart, 4) {
            if matches!(l4.house, 1 | 2 | 4 | 5 | 9 | 10 | 11) {
                let base = if is_dignified(l4) { 85.0 } else { 75.0 };
                let (strength, reasons) = scaled_strength(chart, &[l4], base);
                yogas.push(
                    Yoga::new("Bhumi Yoga", YogaCategory::Wealth, strength, true)
                        .planets(vec![l4.planet])
                        .houses(vec![4, l4.house])
                        .describe(
                            "4th lord well placed for holdings",
                            "Land, homes and vehicles accumulate; domestic comfort",
                        )
                        .activation(format!("{} Dasha", l4.planet))
                        .cancellations(reasons),
                );
            }
        }

        if let Some(mars) = chart.position(Planet::Mars) {
            if mars.house == 4 {
                let dignified = is_dignified(mars);
                let base = if dignified { 80.0 } else { 65.0 };
                let (strength, reasons) = scaled_strength(chart, &[mars], base);
                yogas.push(
                    Yoga::new("Kuja Bhumi Yoga", YogaCategory::Wealth, strength, dignified)
                        .planets(vec![Planet::Mars])
                        .houses(vec![4])
                        .describe(
                            "Mars in the 4th house",
                            "Property through bold acquisition; real estate dealings",
                        )
                        .activation("Mars Dasha")
                        .cancellations(reasons),
                );
            }
        }

        if let (Some(l4), Some(l10)) = (lord_position(chart, 4), lord_position(chart, 10)) {
            if l4.planet != l10.planet
                && (aspects::are_in_exchange(l4, l10) || aspects::are_conjunct(l4, l10))
            {
                let (strength, reasons) = scaled_strength(chart, &[l4, l10], 80.0);
                yogas.push(
                    Yoga::new("Griha-Karma Yoga", YogaCategory::Wealth, strength, true)
                        .planets(vec![l4.planet, l10.planet])
                        .houses(vec![4, 10])
                        .describe(
                            "Lords of home and career joined",
                            "Career funds property; workplace tied to homeland",
                        )
                        .activation(format!("{} or {} periods", l4.planet, l10.planet))
                        .cancellations(reasons),
                );
            }
        }
    }

    fn aggregate_yogas(&self, chart: &Chart, yogas: &mut Vec<Yoga>) {
        // Bahu Artha: heavy occupation of the accumulation houses.
        let in_artha: Vec<&PlanetPosition> = chart
            .positions()
            .iter()
            .filter(|p| ARTHA_HOUSES.contains(&p.house))
            .collect();
        if in_artha.len() >= 5 {
            let benefics = in_artha
                .iter()
                .filter(|p| p.planet.is_natural_benefic())
                .count();
            let base =
                (70.0 + benefics as f64 * 3.0 + in_artha.len() as f64 * 2.0).min(95.0);
            let (strength, reasons) = scaled_strength(chart, &in_artha, base);
            yogas.push(
                Yoga::new("Bahu Artha Yoga", YogaCategory::Wealth, strength, true)
                    .planets(in_artha.iter().map(|p| p.planet).collect())
                    .houses(ARTHA_HOUSES.to_vec())
                    .describe(
                        format!("{} planets occupy the artha houses", in_artha.len()),
                        "Life oriented around material achievement; steady accumulation",
                    )
                    .activation("Periods of the artha-house occupants")
                    .cancellations(reasons),
            );
        }

        // Tridha Dhana: the three money lords simultaneously well placed.
        if let (Some(l2), Some(l9), Some(l11)) = (
            lord_position(chart, 2),
            lord_position(chart, 9),
            lord_position(chart, 11),
        ) {
            let well = |p: &PlanetPosition| matches!(p.house, 1 | 2 | 4 | 5 | 9 | 10 | 11);
            if well(l2) && well(l9) && well(l11) {
                let (strength, reasons) = scaled_strength(chart, &[l2, l9, l11], 85.0);
                yogas.push(
                    Yoga::new("Tridha Dhana Yoga", YogaCategory::Wealth, strength, true)
                        .planets(vec![l2.planet, l9.planet, l11.planet])
                        .houses(vec![2, 9, 11])
                        .describe(
                            "Lords of the 2nd, 9th and 11th all favorably housed",
                            "Earning, saving and fortune aligned; broad prosperity",
                        )
                        .activation("Periods of the three money lords")
                        .cancellations(reasons),
                );
            }
        }
    }

    fn rare_wealth_yogas(&self, chart: &Chart, yogas: &mut Vec<Yoga>) {
        // Mahalakshmi: dignified Venus blessed by Jupiter.
        if let Some(venus) = chart.position(Planet::Venus) {
            if is_dignified(venus) && aspects::aspected_by(chart, venus, Planet::Jupiter) {
                let (strength, reasons) = scaled_strength(chart, &[venus], 95.0);
                yogas.push(
                    Yoga::new("Mahalakshmi Yoga", YogaCategory::Wealth, strength, true)
                        .planets(vec![Planet::Venus, Planet::Jupiter])
                        .houses(vec![venus.house])
                        .describe(
                            "Dignified Venus under Jupiter's aspect",
                            "Exceptional fortune and grace; wealth flows with ease",
                        )
                        .activation("Venus Dasha")
                        .cancellations(reasons),
                );
            }
        }

        // Chandika: exalted Moon crowning the 10th.
        if let Some(moon) = chart.position(Planet::Moon) {
            if is_exalted(moon) && moon.house == 10 {
                let (strength, reasons) = scaled_strength(chart, &[moon], 90.0);
                yogas.push(
                    Yoga::new("Chandika Yoga", YogaCategory::Wealth, strength, true)
                        .planets(vec![Planet::Moon])
                        .houses(vec![10])
                        .describe(
                            "Exalted Moon in the 10th house",
                            "Public fortune; wealth through popularity and reputation",
                        )
                        .activation("Moon Dasha")
                        .cancellations(reasons),
                );
            }
        }

        // Kubera: the three benefic advisers all angular.
        if let (Some(mercury), Some(jupiter), Some(venus)) = (
            chart.position(Planet::Mercury),
            chart.position(Planet::Jupiter),
            chart.position(Planet::Venus),
        ) {
            if [mercury, jupiter, venus]
                .iter()
                .all(|p| KENDRA_HOUSES.contains(&p.house))
            {
                let (strength, reasons) =
                    scaled_strength(chart, &[mercury, jupiter, venus], 95.0);
                yogas.push(
                    Yoga::new("Kubera Yoga", YogaCategory::Wealth, strength, true)
                        .planets(vec![Planet::Mercury, Planet::Jupiter, Planet::Venus])
                        .houses(vec![mercury.house, jupiter.house, venus.house])
                        .describe(
                            "Mercury, Jupiter and Venus all hold kendras",
                            "Treasurer's fortune; wealth guarded and multiplied wisely",
                        )
                        .activation("Mercury, Jupiter or Venus periods")
                        .cancellations(reasons),
                );
            }
        }

        // Indu Lagna: lord of the 9th counted from the Moon, dignified.
        if let Some(moon) = chart.position(Planet::Moon) {
            let ninth_from_moon = ZodiacSign::from_index(moon.sign().index() + 8);
            if let Some(indu_lord) = chart.position(ninth_from_moon.ruler()) {
                if is_dignified(indu_lord) {
                    let (strength, reasons) = scaled_strength(chart, &[indu_lord], 80.0);
                    yogas.push(
                        Yoga::new("Indu Lagna Dhana Yoga", YogaCategory::Wealth, strength, true)
                            .planets(vec![indu_lord.planet, Planet::Moon])
                            .houses(vec![
                                indu_lord.house,
                                house_from(ninth_from_moon, chart.ascendant_sign()),
                            ])
                            .describe(
                                "Lord of the wealth ascendant (9th from the Moon) dignified",
                                "Lunar wealth ascendant empowered; prosperity of the mind's house",
                            )
                            .activation(format!("{} Dasha", indu_lord.planet))
                            .cancellations(reasons),
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Chart;

    #[test]
    fn dhana_labha_link() {
        // Aries lagna: 2nd lord Venus, 11th lord Saturn, conjunct in Taurus.
        let chart = Chart::whole_sign(5.0, &[(Planet::Venus, 40.0), (Planet::Saturn, 45.0)]);
        let yogas = DhanaEvaluator.evaluate(&chart);
        assert!(yogas.iter().any(|y| y.name == "Dhana-Labha Yoga"));
    }

    #[test]
    fn chandra_mangala_house_sensitivity() {
        // Conjunction in house 2 (Taurus, Aries lagna): favorable.
        let good = Chart::whole_sign(5.0, &[(Planet::Moon, 42.0), (Planet::Mars, 45.0)]);
        let yoga = DhanaEvaluator
            .evaluate(&good)
            .into_iter()
            .find(|y| y.name == "Chandra-Mangala Yoga")
            .unwrap();
        assert!(yoga.is_auspicious);

        // Conjunction in house 8 (Scorpio): drive without retention.
        let hard = Chart::whole_sign(5.0, &[(Planet::Moon, 222.0), (Planet::Mars, 225.0)]);
        let yoga = DhanaEvaluator
            .evaluate(&hard)
            .into_iter()
            .find(|y| y.name == "Chandra-Mangala Yoga")
            .unwrap();
        assert!(!yoga.is_auspicious);
    }

    #[test]
    fn kubera_requires_all_three_angular() {
        let chart = Chart::whole_sign(
            5.0,
            &[
                (Planet::Mercury, 10.0),
                (Planet::Jupiter, 100.0),
                (Planet::Venus, 190.0),
            ],
        );
        let yogas = DhanaEvaluator.evaluate(&chart);
        assert!(yogas.iter().any(|y| y.name == "Kubera Yoga"));

        let broken = Chart::whole_sign(
            5.0,
            &[
                (Planet::Mercury, 10.0),
                (Planet::Jupiter, 100.0),
                (Planet::Venus, 220.0),
            ],
        );
        let yogas = DhanaEvaluator.evaluate(&broken);
        assert!(!yogas.iter().any(|y| y.name == "Kubera Yoga"));
    }

    #[test]
    fn bahudha_labha_crowded_gains_house() {
        // Aries lagna, Aquarius is house 11.
        let chart = Chart::whole_sign(
            5.0,
            &[
                (Planet::Jupiter, 310.0),
                (Planet::Venus, 315.0),
                (Planet::Saturn, 320.0),
            ],
        );
        let yoga = DhanaEvaluator
            .evaluate(&chart)
            .into_iter()
            .find(|y| y.name == "Bahudha Labha Yoga")
            .unwrap();
        assert!(yoga.is_auspicious);
        assert_eq!(yoga.houses, vec![11]);
    }
}
