//! End-to-end scenarios run through the full evaluator pipeline.

use pretty_assertions::assert_eq;
use yogascan::core::YogaCategory;
use yogascan::{evaluate_chart, Chart, Planet};

/// Capricorn rising with exalted Mars on the lagna degree area must
/// surface the sign-specific Ruchaka pattern at top strength.
#[test]
fn capricorn_lagna_exalted_mars_scores_extremely_strong() {
    let chart = Chart::whole_sign(
        275.0,
        &[
            (Planet::Mars, 298.0),
            (Planet::Sun, 95.0),
            (Planet::Moon, 130.0),
        ],
    );
    let results = evaluate_chart(&chart);
    let ruchaka = results
        .yogas
        .iter()
        .find(|y| y.name == "Makara Ruchaka-Lagna Yoga")
        .expect("sign-specific Mars yoga missing");
    assert!(ruchaka.is_auspicious);
    assert!(
        ruchaka.strength_percentage >= 90.0,
        "expected top grade, got {}",
        ruchaka.strength_percentage
    );
}

/// A 4-10 lord exchange must produce exactly one exchange pattern for
/// that pair, categorized as an authority combination, with no mirror
/// duplicate for the reversed ordering.
#[test]
fn four_ten_exchange_is_single_and_authority() {
    let chart = Chart::whole_sign(5.0, &[(Planet::Moon, 275.0), (Planet::Saturn, 100.0)]);
    let results = evaluate_chart(&chart);
    let exchanges: Vec<_> = results
        .yogas
        .iter()
        .filter(|y| y.name.contains("Parivartana") && y.houses == vec![4, 10])
        .collect();
    assert_eq!(exchanges.len(), 1);
    assert_eq!(exchanges[0].category, YogaCategory::Authority);
    assert!(!results
        .yogas
        .iter()
        .any(|y| y.name.contains("Parivartana") && y.houses == vec![10, 4]));
}

#[test]
fn tapasvi_composite_requires_all_four_members() {
    let full: Vec<(Planet, f64)> = vec![
        (Planet::Sun, 2.0),
        (Planet::Moon, 19.0),
        (Planet::Saturn, 27.0),
        (Planet::Mars, 12.0),
    ];
    let chart = Chart::whole_sign(275.0, &full);
    let results = evaluate_chart(&chart);
    assert!(results.yogas.iter().any(|y| y.name == "Tapasvi Yoga"));

    for &removed in &[Planet::Sun, Planet::Moon, Planet::Saturn, Planet::Mars] {
        let bodies: Vec<(Planet, f64)> = full
            .iter()
            .copied()
            .filter(|(p, _)| *p != removed)
            .collect();
        let chart = Chart::whole_sign(275.0, &bodies);
        let results = evaluate_chart(&chart);
        assert!(
            !results.yogas.iter().any(|y| y.name == "Tapasvi Yoga"),
            "composite should vanish without {removed}"
        );
    }
}

/// Combustion must measurably lower a pattern's score: the same Venus
/// placement scores lower when the Sun sits on top of it.
#[test]
fn combustion_lowers_strength() {
    let clear = Chart::whole_sign(5.0, &[(Planet::Venus, 340.0), (Planet::Sun, 100.0)]);
    let combust = Chart::whole_sign(5.0, &[(Planet::Venus, 340.0), (Planet::Sun, 344.0)]);

    let strength_of = |chart: &Chart| {
        evaluate_chart(chart)
            .yogas
            .iter()
            .find(|y| y.name == "Shukra Vyaya Yoga")
            .map(|y| y.strength_percentage)
            .expect("Venus-in-12th yoga missing")
    };

    let clear_strength = strength_of(&clear);
    let combust_strength = strength_of(&combust);
    assert!(
        combust_strength < clear_strength,
        "combust {combust_strength} should be below clear {clear_strength}"
    );
}

/// Every yoga from a fully populated chart carries at least one
/// cancellation-factor entry, whether an affliction or the clean note.
#[test]
fn cancellation_factors_never_empty() {
    let chart = Chart::whole_sign(
        95.0,
        &[
            (Planet::Sun, 12.0),
            (Planet::Moon, 48.0),
            (Planet::Mars, 271.0),
            (Planet::Mercury, 33.0),
            (Planet::Jupiter, 99.0),
            (Planet::Venus, 205.0),
            (Planet::Saturn, 188.0),
            (Planet::Rahu, 140.0),
            (Planet::Ketu, 320.0),
        ],
    );
    let results = evaluate_chart(&chart);
    assert!(!results.is_empty());
    for yoga in results.yogas.iter() {
        assert!(
            !yoga.cancellation_factors.is_empty(),
            "{} emitted without cancellation factors",
            yoga.name
        );
    }
}

/// Presentation order is stable: strength descending, names breaking ties.
#[test]
fn sorted_output_is_monotonic() {
    let chart = Chart::whole_sign(
        275.0,
        &[
            (Planet::Sun, 95.0),
            (Planet::Moon, 280.0),
            (Planet::Mars, 298.0),
            (Planet::Mercury, 100.0),
            (Planet::Jupiter, 190.0),
            (Planet::Venus, 40.0),
            (Planet::Saturn, 310.0),
        ],
    );
    let sorted = evaluate_chart(&chart).sorted_by_strength();
    for pair in sorted.windows(2) {
        assert!(pair[0].strength_percentage >= pair[1].strength_percentage);
        if pair[0].strength_percentage == pair[1].strength_percentage {
            assert!(pair[0].name <= pair[1].name);
        }
    }
}
