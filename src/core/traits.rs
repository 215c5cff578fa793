//! Shared contract implemented by every pattern family.

use crate::core::{Chart, Yoga, YogaCategory};

/// One rule family. Implementations must be pure functions of the
/// chart: no I/O, no shared mutable state, no cross-evaluator
/// communication, so the pipeline can run them in any order or in
/// parallel and collect identical results.
pub trait YogaEvaluator: Send + Sync {
    /// Stable identifier used for logging and filtering.
    fn name(&self) -> &'static str;

    /// Primary family this evaluator scans for. Individual detections
    /// may carry a different category (an exchange can be an authority
    /// combination).
    fn category(&self) -> YogaCategory;

    fn evaluate(&self, chart: &Chart) -> Vec<Yoga>;
}
