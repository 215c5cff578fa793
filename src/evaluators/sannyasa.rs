//! Sannyasa and moksha yogas: renunciation clusters, Saturn-Moon
//! contacts, Ketu placements, and twelfth-house emphasis.

use crate::core::traits::YogaEvaluator;
use crate::core::{Chart, Planet, PlanetPosition, Yoga, YogaCategory};
use crate::relations::aspects::{are_conjunct, are_connected, aspected_by};
use crate::relations::dignity::is_dignified;
use crate::relations::strength::scaled_strength;
use crate::relations::{dispositor, house_lord, lord_position};

pub struct SannyasaEvaluator;

impl YogaEvaluator for SannyasaEvaluator {
    fn name(&self) -> &'static str {
        "sannyasa"
    }

    fn category(&self) -> YogaCategory {
        YogaCategory::Renunciation
    }

    fn evaluate(&self, chart: &Chart) -> Vec<Yoga> {
        let mut yogas = Vec::new();
        self.cluster_yogas(chart, &mut yogas);
        self.moon_saturn_yogas(chart, &mut yogas);
        self.moksha_yogas(chart, &mut yogas);
        self.ketu_yogas(chart, &mut yogas);
        self.twelfth_house_yogas(chart, &mut yogas);
        self.jupiter_yogas(chart, &mut yogas);
        yogas
    }
}

impl SannyasaEvaluator {
    /// Four or more planets crowding one house; the ascetic clusters.
    fn cluster_yogas(&self, chart: &Chart, yogas: &mut Vec<Yoga>) {
        for house in 1..=12u8 {
            let occupants = chart.occupants(house);
            if occupants.len() >= 4 {
                let tenth_lord = house_lord(chart, 10);
                let with_karma_lord = occupants.iter().any(|p| p.planet == tenth_lord);
                let (name, base) = if with_karma_lord {
                    ("Sannyasa Yoga", 85.0)
                } else {
                    ("Pravrajya Yoga", 75.0)
                };
                let (strength, reasons) = scaled_strength(chart, &occupants, base);
                yogas.push(
                    Yoga::new(name, YogaCategory::Renunciation, strength, true)
                        .planets(occupants.iter().map(|p| p.planet).collect())
                        .houses(vec![house])
                        .describe(
                            format!("{} planets gathered in house {house}", occupants.len()),
                            "Worldly pursuits converge and exhaust; the spirit turns inward",
                        )
                        .activation("Period of the strongest planet in the cluster")
                        .cancellations(reasons),
                );
            }
        }

        self.tapasvi_yoga(chart, yogas);
    }

    /// Sun, Moon, Saturn and Mars sharing a single house: the austere
    /// combination. All four must be present and together.
    fn tapasvi_yoga(&self, chart: &Chart, yogas: &mut Vec<Yoga>) {
        let required = [Planet::Sun, Planet::Moon, Planet::Saturn, Planet::Mars];
        let positions: Vec<&PlanetPosition> = required
            .iter()
            .filter_map(|&p| chart.position(p))
            .collect();
        if positions.len() != 4 {
            return;
        }
        let house = positions[0].house;
        if !positions.iter().all(|p| p.house == house) {
            return;
        }
        let (strength, reasons) = scaled_strength(chart, &positions, 85.0);
        yogas.push(
            Yoga::new("Tapasvi Yoga", YogaCategory::Renunciation, strength, true)
                .planets(required.to_vec())
                .houses(vec![house])
                .describe(
                    "Sun, Moon, Saturn and Mars share one house",
                    "Severe austerity; discipline of body and mind through tapas",
                )
                .activation("Saturn or Ketu periods")
                .cancellations(reasons),
        );
    }

    fn moon_saturn_yogas(&self, chart: &Chart, yogas: &mut Vec<Yoga>) {
        let Some(moon) = chart.position(Planet::Moon) else {
            return;
        };
        let saturn = chart.position(Planet::Saturn);
        let conjunct = saturn.map(|s| are_conjunct(moon, s)).unwrap_or(false);
        let mars_aspects_moon = aspected_by(chart, moon, Planet::Mars);

        if conjunct {
            let pair = [moon, saturn.unwrap_or(moon)];
            if mars_aspects_moon {
                let (strength, reasons) = scaled_strength(chart, &pair, 75.0);
                yogas.push(
                    Yoga::new("Parivraja Yoga", YogaCategory::Renunciation, strength, true)
                        .planets(vec![Planet::Moon, Planet::Saturn, Planet::Mars])
                        .houses(vec![moon.house])
                        .describe(
                            "Saturn joins the Moon while Mars aspects it",
                            "The wandering mendicant; detachment forced then embraced",
                        )
                        .activation("Saturn Dasha")
                        .cancellations(reasons),
                );
            }
            let (strength, reasons) = scaled_strength(chart, &pair, 75.0);
            yogas.push(
                Yoga::new("Vairagya Yoga", YogaCategory::Renunciation, strength, true)
                    .planets(vec![Planet::Moon, Planet::Saturn])
                    .houses(vec![moon.house])
                    .describe(
                        "Saturn conjunct the Moon",
                        "Dispassion toward comforts; a sober, reflective mind",
                    )
                    .activation("Saturn or Moon periods")
                    .cancellations(reasons),
            );
        } else if aspected_by(chart, moon, Planet::Saturn) {
            let (strength, reasons) = scaled_strength(chart, &[moon], 60.0);
            yogas.push(
                Yoga::new(
                    "Shani Drishti Chandra Yoga",
                    YogaCategory::Renunciation,
                    strength,
                    true,
                )
                .planets(vec![Planet::Moon, Planet::Saturn])
                .houses(vec![moon.house])
                .describe(
                    "Saturn aspects the Moon from a distance",
                    "Gravity over the emotions; solitude sought periodically",
                )
                .activation("Saturn transit over the Moon")
                .cancellations(reasons),
            );
        }

        // Moon in the final drekkana under Saturn's gaze.
        if moon.degree_in_sign() >= 20.0 && aspected_by(chart, moon, Planet::Saturn) {
            let (strength, reasons) = scaled_strength(chart, &[moon], 65.0);
            yogas.push(
                Yoga::new(
                    "Chandra Pravrajya Yoga",
                    YogaCategory::Renunciation,
                    strength,
                    true,
                )
                .planets(vec![Planet::Moon])
                .houses(vec![moon.house])
                .describe(
                    "Moon in the last drekkana of its sign, aspected by Saturn",
                    "Late-life turn toward renunciation",
                )
                .activation("Moon Dasha, Saturn Antardasha")
                .cancellations(reasons),
            );
        }

        // The Moon's dispositor joined by Saturn and watched by Mars.
        if let Some(moon_lord) = dispositor(chart, moon) {
            if let Some(sat) = saturn {
                if moon_lord.planet != Planet::Saturn
                    && are_conjunct(moon_lord, sat)
                    && aspected_by(chart, moon_lord, Planet::Mars)
                {
                    let (strength, reasons) = scaled_strength(chart, &[moon_lord, sat], 60.0);
                    yogas.push(
                        Yoga::new(
                            "Rashi Pravrajya Yoga",
                            YogaCategory::Renunciation,
                            strength,
                            true,
                        )
                        .planets(vec![moon_lord.planet, Planet::Saturn, Planet::Mars])
                        .houses(vec![moon_lord.house])
                        .describe(
                            "The Moon-sign lord joins Saturn under Mars's aspect",
                            "Renunciation through the mind's ruler; gradual withdrawal",
                        )
                        .activation(format!("{} Dasha", moon_lord.planet))
                        .cancellations(reasons),
                    );
                }
            }
        }

        if matches!(
            moon.sign(),
            crate::core::ZodiacSign::Capricorn | crate::core::ZodiacSign::Aquarius
        ) {
            let (strength, reasons) = scaled_strength(chart, &[moon], 60.0);
            yogas.push(
                Yoga::new(
                    "Shani Rashi Chandra Yoga",
                    YogaCategory::Renunciation,
                    strength,
                    true,
                )
                .planets(vec![Planet::Moon])
                .houses(vec![moon.house])
                .describe(
                    "Moon placed in a sign of Saturn",
                    "An austere emotional nature; contentment in simplicity",
                )
                .activation("Moon Dasha")
                .cancellations(reasons),
            );
        }
    }

    fn moksha_yogas(&self, chart: &Chart, yogas: &mut Vec<Yoga>) {
        // Lords of the moksha trikona (4, 8, 12) mutually linked.
        if let (Some(l4), Some(l8), Some(l12)) = (
            lord_position(chart, 4),
            lord_position(chart, 8),
            lord_position(chart, 12),
        ) {
            if are_connected(l4, l8) && are_connected(l8, l12) && are_connected(l4, l12) {
                let (strength, reasons) = scaled_strength(chart, &[l4, l8, l12], 85.0);
                yogas.push(
                    Yoga::new(
                        "Moksha Trikona Yoga",
                        YogaCategory::Renunciation,
                        strength,
                        true,
                    )
                    .planets(vec![l4.planet, l8.planet, l12.planet])
                    .houses(vec![4, 8, 12])
                    .describe(
                        "Lords of the 4th, 8th and 12th houses mutually connected",
                        "The liberation triangle activated; deep spiritual capacity",
                    )
                    .activation("Periods of the moksha lords")
                    .cancellations(reasons),
                );
            }
        }

        // Jupiter in the 9th with the karma lord in a trine or lagna.
        if let Some(jupiter) = chart.position(Planet::Jupiter) {
            if jupiter.house == 9 {
                if let Some(l10) = lord_position(chart, 10) {
                    if matches!(l10.house, 1 | 5 | 9) {
                        let (strength, reasons) = scaled_strength(chart, &[jupiter, l10], 80.0);
                        yogas.push(
                            Yoga::new(
                                "Dharma Moksha Yoga",
                                YogaCategory::Renunciation,
                                strength,
                                true,
                            )
                            .planets(vec![Planet::Jupiter, l10.planet])
                            .houses(vec![9, l10.house])
                            .describe(
                                "Jupiter in the 9th while the 10th lord holds a trine",
                                "Work becomes worship; duty dissolves into dharma",
                            )
                            .activation("Jupiter Dasha")
                            .cancellations(reasons),
                        );
                    }
                }
            }
        }

        // Lords of fortune and loss trading energy.
        if let (Some(l9), Some(l12)) = (lord_position(chart, 9), lord_position(chart, 12)) {
            if l9.planet != l12.planet
                && ((l9.house == 12 && l12.house == 9) || are_conjunct(l9, l12))
            {
                let (strength, reasons) = scaled_strength(chart, &[l9, l12], 80.0);
                yogas.push(
                    Yoga::new(
                        "Bhagya Moksha Yoga",
                        YogaCategory::Renunciation,
                        strength,
                        true,
                    )
                    .planets(vec![l9.planet, l12.planet])
                    .houses(vec![9, 12])
                    .describe(
                        "Lords of the 9th and 12th exchange or conjoin",
                        "Fortune surrendered to the beyond; grace through letting go",
                    )
                    .activation("Periods of the 9th or 12th lord")
                    .cancellations(reasons),
                );
            }
        }

        if let Some(l12) = lord_position(chart, 12) {
            if l12.house == 9 {
                let (strength, reasons) = scaled_strength(chart, &[l12], 75.0);
                yogas.push(
                    Yoga::new(
                        "Vyayesh Bhagya Yoga",
                        YogaCategory::Renunciation,
                        strength,
                        true,
                    )
                    .planets(vec![l12.planet])
                    .houses(vec![9])
                    .describe(
                        "The 12th lord placed in the 9th house",
                        "Loss transmuted into pilgrimage; generous spiritual spending",
                    )
                    .activation(format!("{} Dasha", l12.planet))
                    .cancellations(reasons),
                );
            }
        }
    }

    fn ketu_yogas(&self, chart: &Chart, yogas: &mut Vec<Yoga>) {
        let Some(ketu) = chart.position(Planet::Ketu) else {
            return;
        };

        match ketu.house {
            12 => {
                let jupiter_watches = aspected_by(chart, ketu, Planet::Jupiter);
                let base = if jupiter_watches { 90.0 } else { 80.0 };
                let (strength, reasons) = scaled_strength(chart, &[ketu], base);
                yogas.push(
                    Yoga::new("Ketu Moksha Yoga", YogaCategory::Renunciation, strength, true)
                        .planets(vec![Planet::Ketu])
                        .houses(vec![12])
                        .describe(
                            "Ketu in the 12th house",
                            "The moksha karaka in the moksha house; final liberation sought",
                        )
                        .activation("Ketu Dasha")
                        .cancellations(reasons),
                );
            }
            9 => {
                let (strength, reasons) = scaled_strength(chart, &[ketu], 75.0);
                yogas.push(
                    Yoga::new("Dharma Ketu Yoga", YogaCategory::Renunciation, strength, true)
                        .planets(vec![Planet::Ketu])
                        .houses(vec![9])
                        .describe(
                            "Ketu in the 9th house",
                            "Unconventional dharma; faith beyond institutions",
                        )
                        .activation("Ketu Dasha")
                        .cancellations(reasons),
                );
            }
            4 => {
                let (strength, reasons) = scaled_strength(chart, &[ketu], 65.0);
                yogas.push(
                    Yoga::new(
                        "Griha Vairagya Yoga",
                        YogaCategory::Renunciation,
                        strength,
                        true,
                    )
                    .planets(vec![Planet::Ketu])
                    .houses(vec![4])
                    .describe(
                        "Ketu in the 4th house",
                        "Detachment from home comforts; inner rather than outer roots",
                    )
                    .activation("Ketu Dasha")
                    .cancellations(reasons),
                );
            }
            _ => {}
        }

        if let Some(moon) = chart.position(Planet::Moon) {
            if are_conjunct(ketu, moon) {
                let (strength, reasons) = scaled_strength(chart, &[moon], 75.0);
                yogas.push(
                    Yoga::new(
                        "Chandra Ketu Moksha Yoga",
                        YogaCategory::Renunciation,
                        strength,
                        true,
                    )
                    .planets(vec![Planet::Moon, Planet::Ketu])
                    .houses(vec![moon.house])
                    .describe(
                        "Ketu conjunct the Moon",
                        "The mind unhooked from outcomes; mystic temperament",
                    )
                    .activation("Ketu-Moon periods")
                    .cancellations(reasons),
                );
            }
        }

        if let Some(jupiter) = chart.position(Planet::Jupiter) {
            if are_conjunct(ketu, jupiter) {
                let base = if is_dignified(jupiter) { 85.0 } else { 65.0 };
                let (strength, reasons) = scaled_strength(chart, &[jupiter], base);
                yogas.push(
                    Yoga::new("Ganesha Yoga", YogaCategory::Renunciation, strength, true)
                        .planets(vec![Planet::Jupiter, Planet::Ketu])
                        .houses(vec![jupiter.house])
                        .describe(
                            "Jupiter conjunct Ketu",
                            "Wisdom wedded to detachment; obstacles removed through insight",
                        )
                        .activation("Jupiter-Ketu periods")
                        .cancellations(reasons),
                );
            }
        }
    }

    fn twelfth_house_yogas(&self, chart: &Chart, yogas: &mut Vec<Yoga>) {
        if let Some(jupiter) = chart.position(Planet::Jupiter) {
            if jupiter.house == 12 {
                let base = if is_dignified(jupiter) { 90.0 } else { 80.0 };
                let (strength, reasons) = scaled_strength(chart, &[jupiter], base);
                yogas.push(
                    Yoga::new("Guru Vyaya Yoga", YogaCategory::Renunciation, strength, true)
                        .planets(vec![Planet::Jupiter])
                        .houses(vec![12])
                        .describe(
                            "Jupiter in the 12th house",
                            "The guru in the house of release; charitable and contemplative",
                        )
                        .activation("Jupiter Dasha")
                        .cancellations(reasons),
                );
            }
        }

        if let Some(venus) = chart.position(Planet::Venus) {
            if venus.house == 12 {
                let (strength, reasons) = scaled_strength(chart, &[venus], 75.0);
                yogas.push(
                    Yoga::new(
                        "Shukra Vyaya Yoga",
                        YogaCategory::Renunciation,
                        strength,
                        true,
                    )
                    .planets(vec![Planet::Venus])
                    .houses(vec![12])
                    .describe(
                        "Venus in the 12th house",
                        "Pleasure refined into devotion; comforts of seclusion",
                    )
                    .activation("Venus Dasha")
                    .cancellations(reasons),
                );
            }
        }

        let twelfth = chart.occupants(12);
        if twelfth.len() >= 3 {
            let (strength, reasons) = scaled_strength(chart, &twelfth, 75.0);
            yogas.push(
                Yoga::new(
                    "Vyaya Sthana Yoga",
                    YogaCategory::Renunciation,
                    strength,
                    true,
                )
                .planets(twelfth.iter().map(|p| p.planet).collect())
                .houses(vec![12])
                .describe(
                    format!("{} planets occupy the 12th house", twelfth.len()),
                    "Life oriented toward release; expenditure on higher aims",
                )
                .activation("Periods of the 12th-house occupants")
                .cancellations(reasons),
            );
        }
    }

    fn jupiter_yogas(&self, chart: &Chart, yogas: &mut Vec<Yoga>) {
        let Some(jupiter) = chart.position(Planet::Jupiter) else {
            return;
        };
        if jupiter.house == 5 {
            let base = if is_dignified(jupiter) { 90.0 } else { 80.0 };
            let (strength, reasons) = scaled_strength(chart, &[jupiter], base);
            yogas.push(
                Yoga::new(
                    "Guru Mantra Yoga",
                    YogaCategory::Renunciation,
                    strength,
                    true,
                )
                .planets(vec![Planet::Jupiter])
                .houses(vec![5])
                .describe(
                    "Jupiter in the 5th house",
                    "Purva punya ripens; mantra, devotion and wise progeny",
                )
                .activation("Jupiter Dasha")
                .cancellations(reasons),
            );
        }
    }
}
