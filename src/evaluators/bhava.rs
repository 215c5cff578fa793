//! House-lord placement yogas: one pattern per house lord, classifying
//! its placement house and dignity. Twelve lords over twelve houses
//! give 144 possible combinations; an actual chart emits one per lord.

use crate::core::constants::{house_signification, DUSTHANA_HOUSES};
use crate::core::traits::YogaEvaluator;
use crate::core::{Chart, Yoga, YogaCategory};
use crate::relations::dignity::{
    is_debilitated, is_exalted, is_in_enemy_sign, is_in_friend_sign, is_in_own_sign,
};
use crate::relations::lord_position;
use crate::relations::strength::scaled_strength;

pub struct BhavaEvaluator;

impl YogaEvaluator for BhavaEvaluator {
    fn name(&self) -> &'static str {
        "bhava"
    }

    fn category(&self) -> YogaCategory {
        YogaCategory::HouseLordPlacement
    }

    fn evaluate(&self, chart: &Chart) -> Vec<Yoga> {
        (1..=12)
            .filter_map(|house| self.lord_placement(chart, house))
            .collect()
    }
}

impl BhavaEvaluator {
    fn lord_placement(&self, chart: &Chart, lord_house: u8) -> Option<Yoga> {
        let lord = lord_position(chart, lord_house)?;
        let placement = lord.house;

        let mut base = 50.0;
        let mut auspicious = true;

        if is_exalted(lord) {
            base += 30.0;
        } else if is_in_own_sign(lord) {
            base += 20.0;
        } else if is_in_friend_sign(lord) {
            base += 10.0;
        } else if is_in_enemy_sign(lord) {
            base -= 10.0;
            auspicious = false;
        } else if is_debilitated(lord) {
            base -= 20.0;
            auspicious = false;
        }

        if matches!(placement, 1 | 4 | 5 | 7 | 9 | 10) {
            base += 10.0;
        } else if DUSTHANA_HOUSES.contains(&placement) {
            if DUSTHANA_HOUSES.contains(&lord_house) {
                // A dusthana lord hiding in a dusthana reverses the harm.
                base += 10.0;
                auspicious = true;
            } else {
                base -= 15.0;
                auspicious = false;
            }
        }

        let (strength, reasons) = scaled_strength(chart, &[lord], base);
        let effects = if auspicious {
            format!(
                "Matters of {} prosper through {}",
                house_signification(lord_house),
                house_signification(placement)
            )
        } else {
            format!(
                "Matters of {} strained; effort required around {}",
                house_signification(lord_house),
                house_signification(placement)
            )
        };

        Some(
            Yoga::new(
                format!("Lord of {lord_house} in House {placement}"),
                YogaCategory::HouseLordPlacement,
                strength,
                auspicious,
            )
            .planets(vec![lord.planet])
            .houses(vec![placement])
            .describe(
                format!(
                    "Placement of the {lord_house}th house lord in the {placement}th house"
                ),
                effects,
            )
            .activation(format!("{} Dasha", lord.planet))
            .cancellations(reasons),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Planet, StrengthBand};

    #[test]
    fn one_pattern_per_present_lord() {
        // Aries lagna with all seven classical planets: every house
        // lord is present, so all twelve placements emit.
        let chart = Chart::whole_sign(
            5.0,
            &[
                (Planet::Sun, 130.0),
                (Planet::Moon, 100.0),
                (Planet::Mars, 10.0),
                (Planet::Mercury, 160.0),
                (Planet::Jupiter, 250.0),
                (Planet::Venus, 40.0),
                (Planet::Saturn, 280.0),
            ],
        );
        let yogas = BhavaEvaluator.evaluate(&chart);
        assert_eq!(yogas.len(), 12);
        for yoga in &yogas {
            assert!(yoga.strength_percentage >= 10.0 && yoga.strength_percentage <= 100.0);
            assert_eq!(
                yoga.strength,
                StrengthBand::from_percentage(yoga.strength_percentage)
            );
            assert!(!yoga.cancellation_factors.is_empty());
        }
    }

    #[test]
    fn dusthana_lord_in_dusthana_reverses() {
        // Aries lagna: 6th lord Mercury placed in Pisces (house 12).
        let chart = Chart::whole_sign(5.0, &[(Planet::Mercury, 340.0)]);
        let yogas = BhavaEvaluator.evaluate(&chart);
        let reversed = yogas
            .iter()
            .find(|y| y.name == "Lord of 6 in House 12")
            .unwrap();
        assert!(reversed.is_auspicious);
    }

    #[test]
    fn benefic_lord_in_dusthana_weakens() {
        // Aries lagna: 4th lord Moon in house 8 (Scorpio, also debilitated).
        let chart = Chart::whole_sign(5.0, &[(Planet::Moon, 220.0)]);
        let yogas = BhavaEvaluator.evaluate(&chart);
        let weak = yogas
            .iter()
            .find(|y| y.name == "Lord of 4 in House 8")
            .unwrap();
        assert!(!weak.is_auspicious);
        assert!(weak.strength_percentage < 50.0);
    }
}
