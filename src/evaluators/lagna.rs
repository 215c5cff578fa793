//! Ascendant-based combinations: the lagna lord's placement through
//! all twelve houses, hemming of the lagna, benefic/malefic
//! concentrations around it, and the yogakaraka checks specific to
//! each rising sign.

use crate::core::constants::{DUSTHANA_HOUSES, KENDRA_HOUSES, TRIKONA_HOUSES};
use crate::core::traits::YogaEvaluator;
use crate::core::{Chart, Planet, PlanetPosition, Yoga, YogaCategory, ZodiacSign};
use crate::relations::dignity::{is_dignified, is_exalted, has_neecha_bhanga, is_debilitated};
use crate::relations::strength::scaled_strength;
use crate::relations::{aspects, house_from, house_lords, lord_position};

pub struct LagnaEvaluator;

impl YogaEvaluator for LagnaEvaluator {
    fn name(&self) -> &'static str {
        "lagna"
    }

    fn category(&self) -> YogaCategory {
        YogaCategory::AscendantBased
    }

    fn evaluate(&self, chart: &Chart) -> Vec<Yoga> {
        let mut yogas = Vec::new();
        self.lagnesh_placement(chart, &mut yogas);
        self.lagnesh_dignity(chart, &mut yogas);
        self.adhi_yogas(chart, &mut yogas);
        self.kartari_yogas(chart, &mut yogas);
        self.sign_specific_yogas(chart, &mut yogas);
        self.lagna_occupation_yogas(chart, &mut yogas);
        self.trikona_lord_links(chart, &mut yogas);
        self.upachaya_malefics(chart, &mut yogas);
        self.kendradhipati_dosha(chart, &mut yogas);
        yogas
    }
}

struct PlacementBranch {
    base_dignified: f64,
    base_plain: f64,
    category: YogaCategory,
    effects: &'static str,
}

fn placement_branch(house: u8) -> PlacementBranch {
    match house {
        1 => PlacementBranch {
            base_dignified: 90.0,
            base_plain: 70.0,
            category: YogaCategory::AscendantBased,
            effects: "Strong constitution and self-made identity; life on one's own terms",
        },
        2 => PlacementBranch {
            base_dignified: 80.0,
            base_plain: 70.0,
            category: YogaCategory::Wealth,
            effects: "The self invested in earning; family and wealth central themes",
        },
        3 => PlacementBranch {
            base_dignified: 65.0,
            base_plain: 65.0,
            category: YogaCategory::AscendantBased,
            effects: "Courage and initiative define the path; gains through siblings and media",
        },
        4 => PlacementBranch {
            base_dignified: 80.0,
            base_plain: 70.0,
            category: YogaCategory::AscendantBased,
            effects: "Rooted happiness; property, vehicles and domestic stability",
        },
        5 => PlacementBranch {
            base_dignified: 85.0,
            base_plain: 75.0,
            category: YogaCategory::AscendantBased,
            effects: "Intelligence and creativity mark the native; fortunate children",
        },
        6 => PlacementBranch {
            base_dignified: 50.0,
            base_plain: 40.0,
            category: YogaCategory::AscendantBased,
            effects: "Health and rivals demand attention; service fields reward effort",
        },
        7 => PlacementBranch {
            base_dignified: 70.0,
            base_plain: 70.0,
            category: YogaCategory::AscendantBased,
            effects: "Partnership shapes destiny; success in dealings with others",
        },
        8 => PlacementBranch {
            base_dignified: 55.0,
            base_plain: 35.0,
            category: YogaCategory::AscendantBased,
            effects: "Transformative life; research aptitude but vitality needs care",
        },
        9 => PlacementBranch {
            base_dignified: 90.0,
            base_plain: 80.0,
            category: YogaCategory::Authority,
            effects: "Fortune favors the native; dharma, teachers and long journeys bless",
        },
        10 => PlacementBranch {
            base_dignified: 90.0,
            base_plain: 80.0,
            category: YogaCategory::Authority,
            effects: "Career embodies the self; recognition and professional eminence",
        },
        11 => PlacementBranch {
            base_dignified: 80.0,
            base_plain: 80.0,
            category: YogaCategory::Wealth,
            effects: "Gains flow to the native; wide networks and fulfilled ambitions",
        },
        _ => PlacementBranch {
            base_dignified: 55.0,
            base_plain: 40.0,
            category: YogaCategory::AscendantBased,
            effects: "Expenses and distant lands pull; spiritual growth through release",
        },
    }
}

impl LagnaEvaluator {
    /// One fixed branch per placement house of the ascendant lord.
    fn lagnesh_placement(&self, chart: &Chart, yogas: &mut Vec<Yoga>) {
        let Some(lagnesh) = lord_position(chart, 1) else {
            return;
        };
        let house = lagnesh.house;
        let branch = placement_branch(house);
        let dignified = is_dignified(lagnesh);
        let mitigated =
            dignified || aspects::aspected_by(chart, lagnesh, Planet::Jupiter);
        let base = if dignified {
            branch.base_dignified
        } else {
            branch.base_plain
        };
        // The difficult houses stay inauspicious unless mitigated.
        let auspicious = if DUSTHANA_HOUSES.contains(&house) {
            mitigated
        } else {
            true
        };
        let (strength, reasons) = scaled_strength(chart, &[lagnesh], base);
        yogas.push(
            Yoga::new(
                format!("Lagnesha in House {house}"),
                branch.category,
                strength,
                auspicious,
            )
            .planets(vec![lagnesh.planet])
            .houses(vec![1, house])
            .describe(
                format!("Ascendant lord {} occupies house {house}", lagnesh.planet),
                branch.effects,
            )
            .activation(format!("{} Dasha", lagnesh.planet))
            .cancellations(reasons),
        );
    }

    fn lagnesh_dignity(&self, chart: &Chart, yogas: &mut Vec<Yoga>) {
        let Some(lagnesh) = lord_position(chart, 1) else {
            return;
        };
        if is_exalted(lagnesh) {
            let (strength, reasons) = scaled_strength(chart, &[lagnesh], 90.0);
            yogas.push(
                Yoga::new("Uccha Lagnesh Yoga", YogaCategory::AscendantBased, strength, true)
                    .planets(vec![lagnesh.planet])
                    .houses(vec![1, lagnesh.house])
                    .describe(
                        "Ascendant lord exalted",
                        "Radiant vitality and self-assurance; obstacles yield readily",
                    )
                    .activation(format!("{} Dasha", lagnesh.planet))
                    .cancellations(reasons),
            );
        } else if is_debilitated(lagnesh) && !has_neecha_bhanga(chart, lagnesh) {
            let (strength, reasons) = scaled_strength(chart, &[lagnesh], 35.0);
            yogas.push(
                Yoga::new("Neecha Lagnesh Yoga", YogaCategory::AscendantBased, strength, false)
                    .planets(vec![lagnesh.planet])
                    .houses(vec![1, lagnesh.house])
                    .describe(
                        "Ascendant lord debilitated without cancellation",
                        "Self-doubt and health sensitivity; progress requires persistence",
                    )
                    .activation(format!("{} Dasha", lagnesh.planet))
                    .cancellations(reasons),
            );
        }
    }

    fn adhi_yogas(&self, chart: &Chart, yogas: &mut Vec<Yoga>) {
        // Lagna Adhi: benefics concentrated in the kendras.
        let benefics_in_kendra: Vec<&PlanetPosition> = chart
            .positions()
            .iter()
            .filter(|p| p.planet.is_natural_benefic() && KENDRA_HOUSES.contains(&p.house))
            .collect();
        if benefics_in_kendra.len() >= 3 {
            let base = 75.0 + (benefics_in_kendra.len() as f64 - 3.0) * 5.0;
            let (strength, reasons) = scaled_strength(chart, &benefics_in_kendra, base);
            yogas.push(
                Yoga::new("Lagna Adhi Yoga", YogaCategory::AscendantBased, strength, true)
                    .planets(benefics_in_kendra.iter().map(|p| p.planet).collect())
                    .houses(benefics_in_kendra.iter().map(|p| p.house).collect())
                    .describe(
                        "Three or more benefics hold the kendras",
                        "Protected, prosperous and well-regarded; leadership with grace",
                    )
                    .activation("Periods of the angular benefics")
                    .cancellations(reasons),
            );
        }

        // Chandra Adhi: benefics in the 6th, 7th and 8th from the Moon.
        if let Some(moon) = chart.position(Planet::Moon) {
            let around_moon: Vec<&PlanetPosition> = chart
                .positions()
                .iter()
                .filter(|p| {
                    p.planet != Planet::Moon
                        && p.planet.is_natural_benefic()
                        && matches!(house_from(p.sign(), moon.sign()), 6 | 7 | 8)
                })
                .collect();
            if around_moon.len() >= 2 {
                let base = 70.0 + (around_moon.len() as f64 - 2.0) * 5.0;
                let (strength, reasons) = scaled_strength(chart, &around_moon, base);
                yogas.push(
                    Yoga::new("Chandra Adhi Yoga", YogaCategory::AscendantBased, strength, true)
                        .planets(around_moon.iter().map(|p| p.planet).collect())
                        .houses(around_moon.iter().map(|p| p.house).collect())
                        .describe(
                            "Benefics flank the Moon from its 6th, 7th and 8th",
                            "Emotional resilience; comfort and status through the mind's strength",
                        )
                        .activation("Moon Dasha")
                        .cancellations(reasons),
                );
            }
        }
    }

    fn kartari_yogas(&self, chart: &Chart, yogas: &mut Vec<Yoga>) {
        let benefic_in = |h: u8| {
            chart
                .occupants(h)
                .iter()
                .any(|p| p.planet.is_natural_benefic())
        };
        let malefic_in = |h: u8| {
            chart
                .occupants(h)
                .iter()
                .any(|p| p.planet.is_natural_malefic())
        };

        if benefic_in(12) && benefic_in(2) {
            let flank: Vec<&PlanetPosition> = chart
                .positions()
                .iter()
                .filter(|p| p.planet.is_natural_benefic() && matches!(p.house, 2 | 12))
                .collect();
            let (strength, reasons) = scaled_strength(chart, &flank, 75.0);
            yogas.push(
                Yoga::new("Subhakartari Yoga", YogaCategory::AscendantBased, strength, true)
                    .planets(flank.iter().map(|p| p.planet).collect())
                    .houses(vec![12, 1, 2])
                    .describe(
                        "Benefics hem the lagna from both sides",
                        "The personality is sheltered; support arrives when needed",
                    )
                    .activation("Periods of the flanking benefics")
                    .cancellations(reasons),
            );
        } else if malefic_in(12) && malefic_in(2) && !benefic_in(12) && !benefic_in(2) {
            let flank: Vec<&PlanetPosition> = chart
                .positions()
                .iter()
                .filter(|p| p.planet.is_natural_malefic() && matches!(p.house, 2 | 12))
                .collect();
            let (strength, reasons) = scaled_strength(chart, &flank, 45.0);
            yogas.push(
                Yoga::new(
                    "Papakartari Lagna Yoga",
                    YogaCategory::AscendantBased,
                    strength,
                    false,
                )
                .planets(flank.iter().map(|p| p.planet).collect())
                .houses(vec![12, 1, 2])
                .describe(
                    "Malefics hem the lagna with no benefic relief",
                    "The personality squeezed by pressures on either side; guarded progress",
                )
                .activation("Periods of the hemming malefics")
                .cancellations(reasons),
            );
        }
    }

    /// Each rising sign carries one or two hard-coded yogakaraka checks.
    fn sign_specific_yogas(&self, chart: &Chart, yogas: &mut Vec<Yoga>) {
        let asc = chart.ascendant_sign();
        match asc {
            ZodiacSign::Aries => {
                self.conjunction_check(
                    chart, yogas, Planet::Mars, Planet::Jupiter, 80.0,
                    "Guru-Mangala Yoga",
                    "Righteous drive; energy guided by wisdom",
                );
                self.dignity_check(
                    chart, yogas, Planet::Sun, true, 85.0,
                    "Aries Aditya Yoga",
                    "Exalted Sun crowns the Aries native with natural command",
                );
            }
            ZodiacSign::Taurus => {
                self.karaka_in_kendra_trikona(
                    chart, yogas, Planet::Saturn, 85.0,
                    "Shasha Yogakaraka Yoga",
                    "Saturn, lord of trine and angle, grants durable authority",
                );
                if let Some(moon) = chart.position(Planet::Moon) {
                    if is_dignified(moon) && moon.house == 2 {
                        self.push_sign_yoga(
                            chart, yogas, &[moon], 75.0,
                            "Chandra Dhana-Sthana Yoga",
                            "Dignified Moon in the 2nd; wealth through public favor",
                        );
                    }
                }
            }
            ZodiacSign::Gemini => {
                self.conjunction_check(
                    chart, yogas, Planet::Venus, Planet::Saturn, 75.0,
                    "Shukra-Shani Yoga",
                    "Artful discipline; gains through craft and design",
                );
                self.dignity_check(
                    chart, yogas, Planet::Mercury, false, 85.0,
                    "Budha Lagnadhipati Yoga",
                    "Strong Mercury gives wit, commerce and adaptable intellect",
                );
            }
            ZodiacSign::Cancer => {
                self.karaka_in_kendra_trikona(
                    chart, yogas, Planet::Mars, 85.0,
                    "Kuja Yogakaraka Yoga",
                    "Mars as yogakaraka raises the Cancer native to command",
                );
                if let Some(jupiter) = chart.position(Planet::Jupiter) {
                    if jupiter.house == 9 {
                        self.push_sign_yoga(
                            chart, yogas, &[jupiter], 80.0,
                            "Guru Bhagya Yoga",
                            "Jupiter in the 9th; fortune through faith and teachers",
                        );
                    }
                }
            }
            ZodiacSign::Leo => {
                self.conjunction_check(
                    chart, yogas, Planet::Mars, Planet::Jupiter, 85.0,
                    "Guru-Mangala Yoga",
                    "Trine lords joined; courage consecrated to dharma",
                );
                self.dignity_check(
                    chart, yogas, Planet::Sun, false, 90.0,
                    "Simha Aditya Yoga",
                    "The Sun strong in its own kingdom; born leadership",
                );
            }
            ZodiacSign::Virgo => {
                self.karaka_in_kendra_trikona(
                    chart, yogas, Planet::Venus, 85.0,
                    "Shukra Yogakaraka Yoga",
                    "Venus bridging trine and angle; refinement brings position",
                );
                if let Some(mercury) = chart.position(Planet::Mercury) {
                    if is_exalted(mercury) {
                        self.push_sign_yoga(
                            chart, yogas, &[mercury], 95.0,
                            "Bhadra-Lagna Yoga",
                            "Exalted Mercury on its own ascendant; genius for detail",
                        );
                    }
                }
            }
            ZodiacSign::Libra => {
                self.karaka_in_kendra_trikona(
                    chart, yogas, Planet::Saturn, 85.0,
                    "Shani Yogakaraka Yoga",
                    "Saturn as yogakaraka; justice and patience rewarded with rank",
                );
                if let Some(moon) = chart.position(Planet::Moon) {
                    if moon.house == 10 {
                        self.push_sign_yoga(
                            chart, yogas, &[moon], 80.0,
                            "Chandra Karma Yoga",
                            "Moon in the 10th; career carried by public affection",
                        );
                    }
                }
            }
            ZodiacSign::Scorpio => {
                self.karaka_in_kendra_trikona(
                    chart, yogas, Planet::Jupiter, 85.0,
                    "Guru Kendra-Trikona Yoga",
                    "Jupiter strong for the Scorpio native; depth turned to wisdom",
                );
                if let Some(moon) = chart.position(Planet::Moon) {
                    if moon.house == 9 {
                        self.push_sign_yoga(
                            chart, yogas, &[moon], 80.0,
                            "Chandra Bhagya Yoga",
                            "Moon in the 9th; intuition aligned with fortune",
                        );
                    }
                }
            }
            ZodiacSign::Sagittarius => {
                self.karaka_in_kendra_trikona(
                    chart, yogas, Planet::Sun, 80.0,
                    "Surya Kendra-Trikona Yoga",
                    "The Sun placed to dignify the Sagittarius native's purpose",
                );
                if let Some(mercury) = chart.position(Planet::Mercury) {
                    if mercury.house == 10 {
                        self.push_sign_yoga(
                            chart, yogas, &[mercury], 85.0,
                            "Budha Karma Yoga",
                            "Mercury in the 10th; eloquence becomes profession",
                        );
                    }
                }
            }
            ZodiacSign::Capricorn => {
                self.karaka_in_kendra_trikona(
                    chart, yogas, Planet::Venus, 85.0,
                    "Shukra Yogakaraka Yoga",
                    "Venus as yogakaraka; diplomacy and taste carry the climb",
                );
                if let Some(mars) = chart.position(Planet::Mars) {
                    if is_exalted(mars) && mars.house == 1 {
                        self.push_sign_yoga(
                            chart, yogas, &[mars], 95.0,
                            "Makara Ruchaka-Lagna Yoga",
                            "Exalted Mars on the Capricorn ascendant; a commander's chart",
                        );
                    }
                }
            }
            ZodiacSign::Aquarius => {
                self.karaka_in_kendra_trikona(
                    chart, yogas, Planet::Venus, 85.0,
                    "Shukra Yogakaraka Yoga",
                    "Venus bridging angle and trine for the Aquarius native",
                );
                if let Some(mars) = chart.position(Planet::Mars) {
                    if mars.house == 10 {
                        self.push_sign_yoga(
                            chart, yogas, &[mars], 80.0,
                            "Kuja Karma Yoga",
                            "Mars in the 10th; engineering drive and executive force",
                        );
                    }
                }
            }
            ZodiacSign::Pisces => {
                self.karaka_in_kendra_trikona(
                    chart, yogas, Planet::Mars, 85.0,
                    "Kuja Kendra-Trikona Yoga",
                    "Mars placed to anchor the Pisces native's resolve",
                );
                if let Some(moon) = chart.position(Planet::Moon) {
                    if moon.house == 5 {
                        self.push_sign_yoga(
                            chart, yogas, &[moon], 80.0,
                            "Chandra Putra Yoga",
                            "Moon in the 5th; imagination flowers into creation",
                        );
                    }
                }
            }
        }
    }

    fn push_sign_yoga(
        &self,
        chart: &Chart,
        yogas: &mut Vec<Yoga>,
        positions: &[&PlanetPosition],
        base: f64,
        name: &str,
        effects: &str,
    ) {
        let (strength, reasons) = scaled_strength(chart, positions, base);
        yogas.push(
            Yoga::new(name, YogaCategory::AscendantBased, strength, true)
                .planets(positions.iter().map(|p| p.planet).collect())
                .houses(positions.iter().map(|p| p.house).collect())
                .describe(
                    format!("Special combination for the {} ascendant", chart.ascendant_sign()),
                    effects,
                )
                .activation(format!("{} Dasha", positions[0].planet))
                .cancellations(reasons),
        );
    }

    fn conjunction_check(
        &self,
        chart: &Chart,
        yogas: &mut Vec<Yoga>,
        a: Planet,
        b: Planet,
        base: f64,
        name: &str,
        effects: &str,
    ) {
        let (Some(pa), Some(pb)) = (chart.position(a), chart.position(b)) else {
            return;
        };
        if aspects::are_conjunct(pa, pb) {
            self.push_sign_yoga(chart, yogas, &[pa, pb], base, name, effects);
        }
    }

    fn dignity_check(
        &self,
        chart: &Chart,
        yogas: &mut Vec<Yoga>,
        planet: Planet,
        exalted_only: bool,
        base: f64,
        name: &str,
        effects: &str,
    ) {
        let Some(pos) = chart.position(planet) else {
            return;
        };
        let qualifies = if exalted_only {
            is_exalted(pos)
        } else {
            is_dignified(pos)
        };
        if qualifies {
            self.push_sign_yoga(chart, yogas, &[pos], base, name, effects);
        }
    }

    fn karaka_in_kendra_trikona(
        &self,
        chart: &Chart,
        yogas: &mut Vec<Yoga>,
        planet: Planet,
        base: f64,
        name: &str,
        effects: &str,
    ) {
        let Some(pos) = chart.position(planet) else {
            return;
        };
        if KENDRA_HOUSES.contains(&pos.house) || TRIKONA_HOUSES.contains(&pos.house) {
            self.push_sign_yoga(chart, yogas, &[pos], base, name, effects);
        }
    }

    fn lagna_occupation_yogas(&self, chart: &Chart, yogas: &mut Vec<Yoga>) {
        let occupants = chart.occupants(1);

        // Graha Sammelan: a crowded ascendant.
        if occupants.len() >= 3 {
            let benefics = occupants
                .iter()
                .filter(|p| p.planet.is_natural_benefic())
                .count();
            let (base, auspicious) = if benefics >= 2 {
                (70.0 + benefics as f64 * 5.0, true)
            } else {
                (50.0, false)
            };
            let (strength, reasons) = scaled_strength(chart, &occupants, base);
            yogas.push(
                Yoga::new("Graha Sammelan Yoga", YogaCategory::AscendantBased, strength, auspicious)
                    .planets(occupants.iter().map(|p| p.planet).collect())
                    .houses(vec![1])
                    .describe(
                        format!("{} planets gathered in the lagna", occupants.len()),
                        "A crowded personality; many talents pulling in many directions",
                    )
                    .activation("Periods of the lagna occupants")
                    .cancellations(reasons),
            );
        }

        // Jupiter or Mercury with directional strength in the lagna.
        for planet in [Planet::Jupiter, Planet::Mercury] {
            if let Some(pos) = chart.position(planet) {
                if pos.house == 1 {
                    let (strength, reasons) = scaled_strength(chart, &[pos], 80.0);
                    yogas.push(
                        Yoga::new(
                            "Lagna Digbala Yoga",
                            YogaCategory::AscendantBased,
                            strength,
                            true,
                        )
                        .planets(vec![planet])
                        .houses(vec![1])
                        .describe(
                            format!("{planet} holds the lagna with directional strength"),
                            "Presence and intelligence immediately visible to the world",
                        )
                        .activation(format!("{planet} Dasha"))
                        .cancellations(reasons),
                    );
                }
            }
        }

        // Shubha Lagna: benefics occupying the ascendant.
        let benefics_in_lagna: Vec<&PlanetPosition> = occupants
            .iter()
            .copied()
            .filter(|p| p.planet.is_natural_benefic())
            .collect();
        if !benefics_in_lagna.is_empty() {
            let with_jupiter = benefics_in_lagna
                .iter()
                .any(|p| p.planet == Planet::Jupiter);
            let base = if with_jupiter { 85.0 } else { 70.0 };
            let (strength, reasons) = scaled_strength(chart, &benefics_in_lagna, base);
            yogas.push(
                Yoga::new("Shubha Lagna Yoga", YogaCategory::AscendantBased, strength, true)
                    .planets(benefics_in_lagna.iter().map(|p| p.planet).collect())
                    .houses(vec![1])
                    .describe(
                        "Benefics grace the ascendant",
                        "Charm, health and goodwill open doors early in life",
                    )
                    .activation("Periods of the lagna benefics")
                    .cancellations(reasons),
            );
        }
    }

    fn trikona_lord_links(&self, chart: &Chart, yogas: &mut Vec<Yoga>) {
        let links: [(u8, f64, f64, &str, &str); 3] = [
            (
                5,
                80.0,
                70.0,
                "Lagnesh-Panchamesh Yoga",
                "The self joined to intelligence; creative authority",
            ),
            (
                9,
                85.0,
                75.0,
                "Lagnesh-Bhagyesh Yoga",
                "The self joined to fortune; luck follows initiative",
            ),
            (
                10,
                80.0,
                80.0,
                "Lagnesh-Karmesh Yoga",
                "The self joined to career; vocation expresses identity",
            ),
        ];
        let Some(lagnesh) = lord_position(chart, 1) else {
            return;
        };
        for (house, base_conj, base_aspect, name, effects) in links {
            let Some(other) = lord_position(chart, house) else {
                continue;
            };
            if other.planet == lagnesh.planet {
                continue;
            }
            let base = if aspects::are_conjunct(lagnesh, other) {
                base_conj
            } else if aspects::are_connected(lagnesh, other) {
                base_aspect
            } else {
                continue;
            };
            let (strength, reasons) = scaled_strength(chart, &[lagnesh, other], base);
            yogas.push(
                Yoga::new(name, YogaCategory::Authority, strength, true)
                    .planets(vec![lagnesh.planet, other.planet])
                    .houses(vec![1, house])
                    .describe(
                        format!("Lagna lord linked with the lord of house {house}"),
                        effects,
                    )
                    .activation(format!("{} or {} periods", lagnesh.planet, other.planet))
                    .cancellations(reasons),
            );
        }
    }

    fn upachaya_malefics(&self, chart: &Chart, yogas: &mut Vec<Yoga>) {
        // Malefics improve in the growth houses 3, 6 and 11.
        let placed: Vec<&PlanetPosition> = chart
            .positions()
            .iter()
            .filter(|p| p.planet.is_natural_malefic() && matches!(p.house, 3 | 6 | 11))
            .collect();
        if placed.len() >= 2 {
            let base = 70.0 + (placed.len() as f64 - 2.0) * 5.0;
            let (strength, reasons) = scaled_strength(chart, &placed, base);
            yogas.push(
                Yoga::new("Papa Upachaya Yoga", YogaCategory::AscendantBased, strength, true)
                    .planets(placed.iter().map(|p| p.planet).collect())
                    .houses(placed.iter().map(|p| p.house).collect())
                    .describe(
                        "Malefics seated in the growth houses",
                        "Aggression converted to competitive advantage; rivals subdued",
                    )
                    .activation("Periods of the upachaya malefics")
                    .cancellations(reasons),
            );
        }
    }

    fn kendradhipati_dosha(&self, chart: &Chart, yogas: &mut Vec<Yoga>) {
        // A benefic owning kendras loses its benefic charge; falling
        // into a dusthana turns the blemish concrete.
        let lords = house_lords(chart.ascendant_sign());
        for planet in [Planet::Jupiter, Planet::Venus] {
            let owns_kendra = KENDRA_HOUSES
                .iter()
                .any(|&h| lords[(h - 1) as usize] == planet);
            if !owns_kendra {
                continue;
            }
            let Some(pos) = chart.position(planet) else {
                continue;
            };
            if !DUSTHANA_HOUSES.contains(&pos.house) {
                continue;
            }
            let (strength, reasons) = scaled_strength(chart, &[pos], 50.0);
            yogas.push(
                Yoga::new("Kendradhipati Dosha", YogaCategory::AscendantBased, strength, false)
                    .planets(vec![planet])
                    .houses(vec![pos.house])
                    .describe(
                        format!("Benefic kendra lord {planet} relegated to a dusthana"),
                        "A natural helper obligated to hard houses; blessings arrive late",
                    )
                    .activation(format!("{planet} Dasha"))
                    .cancellations(reasons),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Chart;

    #[test]
    fn capricorn_exalted_mars_in_lagna_is_extremely_strong() {
        let chart = Chart::whole_sign(
            275.0,
            &[(Planet::Mars, 298.0), (Planet::Venus, 280.0)],
        );
        let yogas = LagnaEvaluator.evaluate(&chart);
        let ruchaka = yogas
            .iter()
            .find(|y| y.name == "Makara Ruchaka-Lagna Yoga")
            .unwrap();
        assert!(ruchaka.is_auspicious);
        assert!(ruchaka.strength_percentage >= 90.0);
    }

    #[test]
    fn lagnesh_placement_always_emits_when_lord_present() {
        for (asc, lord) in [(5.0, Planet::Mars), (35.0, Planet::Venus), (95.0, Planet::Moon)] {
            let chart = Chart::whole_sign(asc, &[(lord, asc + 40.0)]);
            let yogas = LagnaEvaluator.evaluate(&chart);
            assert!(
                yogas.iter().any(|y| y.name.starts_with("Lagnesha in House")),
                "no placement yoga for ascendant {asc}"
            );
        }
    }

    #[test]
    fn dusthana_lagnesh_needs_mitigation() {
        // Aries lagna, Mars in Virgo (house 6), no dignity, no Jupiter.
        let chart = Chart::whole_sign(5.0, &[(Planet::Mars, 160.0)]);
        let yogas = LagnaEvaluator.evaluate(&chart);
        let placement = yogas
            .iter()
            .find(|y| y.name == "Lagnesha in House 6")
            .unwrap();
        assert!(!placement.is_auspicious);
    }

    #[test]
    fn papakartari_hemming_detected() {
        // Aries lagna: Saturn in Pisces (house 12), Mars in Taurus (house 2).
        let chart = Chart::whole_sign(5.0, &[(Planet::Saturn, 340.0), (Planet::Mars, 40.0)]);
        let yogas = LagnaEvaluator.evaluate(&chart);
        assert!(yogas.iter().any(|y| y.name == "Papakartari Lagna Yoga"));
    }
}
