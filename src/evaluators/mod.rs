//! Pattern family evaluators and the fan-out pipeline.
//!
//! Each family is an independent unit registered into a fixed-order
//! list; adding a family never touches the existing ones. Evaluators
//! share the one immutable chart and never communicate, so the
//! pipeline fans out with rayon and concatenates.

pub mod advanced;
pub mod bhava;
pub mod dhana;
pub mod lagna;
pub mod nabhasa;
pub mod negative;
pub mod parivartana;
pub mod raja;
pub mod sannyasa;
pub mod viparita;

use rayon::prelude::*;

use crate::core::traits::YogaEvaluator;
use crate::core::{AnalysisResults, Chart, Yoga};

/// The fixed registry, one instance per family.
pub fn all_evaluators() -> Vec<Box<dyn YogaEvaluator>> {
    vec![
        Box::new(raja::RajaEvaluator),
        Box::new(viparita::ViparitaEvaluator),
        Box::new(dhana::DhanaEvaluator),
        Box::new(bhava::BhavaEvaluator),
        Box::new(lagna::LagnaEvaluator),
        Box::new(nabhasa::NabhasaEvaluator),
        Box::new(parivartana::ParivartanaEvaluator),
        Box::new(sannyasa::SannyasaEvaluator),
        Box::new(negative::NegativeEvaluator),
        Box::new(advanced::AdvancedEvaluator),
    ]
}

/// Runs every registered evaluator over the chart in parallel and
/// collects the flat detection list. Collection preserves registry
/// order, so repeated runs over the same chart are identical.
pub fn evaluate_chart(chart: &Chart) -> AnalysisResults {
    let evaluators = all_evaluators();
    let yogas: Vec<Yoga> = evaluators
        .par_iter()
        .flat_map(|evaluator| {
            let detections = evaluator.evaluate(chart);
            log::debug!("{}: {} detections", evaluator.name(), detections.len());
            detections
        })
        .collect();
    AnalysisResults::new(yogas)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Planet;

    fn sample_chart() -> Chart {
        Chart::whole_sign(
            275.0,
            &[
                (Planet::Sun, 95.0),
                (Planet::Moon, 190.0),
                (Planet::Mars, 298.0),
                (Planet::Mercury, 110.0),
                (Planet::Jupiter, 97.0),
                (Planet::Venus, 355.0),
                (Planet::Saturn, 186.0),
                (Planet::Rahu, 45.0),
                (Planet::Ketu, 225.0),
            ],
        )
    }

    #[test]
    fn pipeline_runs_every_family() {
        assert_eq!(all_evaluators().len(), 10);
        let results = evaluate_chart(&sample_chart());
        assert!(!results.is_empty());
    }

    #[test]
    fn pipeline_is_deterministic() {
        let chart = sample_chart();
        let first = evaluate_chart(&chart);
        let second = evaluate_chart(&chart);
        assert_eq!(first, second);
    }

    #[test]
    fn empty_chart_produces_no_planet_patterns() {
        // Missing planets short-circuit individual checks instead of failing.
        let chart = Chart::whole_sign(10.0, &[]);
        let results = evaluate_chart(&chart);
        for yoga in &results.yogas {
            assert!(yoga.planets.iter().all(|p| chart.position(*p).is_none()));
        }
    }
}
