//! Viparita raja yogas: lords of the difficult houses placed in
//! difficult houses reverse their significations into gains.

use crate::core::constants::DUSTHANA_HOUSES;
use crate::core::traits::YogaEvaluator;
use crate::core::{Chart, Yoga, YogaCategory};
use crate::relations::dignity::is_dignified;
use crate::relations::lord_position;
use crate::relations::strength::scaled_strength;

pub struct ViparitaEvaluator;

impl YogaEvaluator for ViparitaEvaluator {
    fn name(&self) -> &'static str {
        "viparita"
    }

    fn category(&self) -> YogaCategory {
        YogaCategory::Authority
    }

    fn evaluate(&self, chart: &Chart) -> Vec<Yoga> {
        let variants: [(u8, &str, &str); 3] = [
            (
                6,
                "Harsha Yoga",
                "Victory over enemies, good health, happiness through adversity overcome",
            ),
            (
                8,
                "Sarala Yoga",
                "Fearless and long-lived; gains through crises others cannot weather",
            ),
            (
                12,
                "Vimala Yoga",
                "Frugal, independent and content; losses transform into liberation",
            ),
        ];

        let mut yogas = Vec::new();
        for (house, name, effects) in variants {
            let Some(lord) = lord_position(chart, house) else {
                continue;
            };
            if !DUSTHANA_HOUSES.contains(&lord.house) {
                continue;
            }
            let in_own = lord.house == house;
            let base = match (in_own, is_dignified(lord)) {
                (true, true) => 90.0,
                (true, false) => 75.0,
                (false, true) => 60.0,
                (false, false) => 45.0,
            };
            let (strength, reasons) = scaled_strength(chart, &[lord], base);
            yogas.push(
                Yoga::new(name, YogaCategory::Authority, strength, true)
                    .planets(vec![lord.planet])
                    .houses(vec![house, lord.house])
                    .describe(
                        format!(
                            "Lord of the {house}th placed in the {}th, reversing its harm",
                            lord.house
                        ),
                        effects,
                    )
                    .activation(format!("{} Dasha", lord.planet))
                    .cancellations(reasons),
            );
        }
        yogas
    }
}
