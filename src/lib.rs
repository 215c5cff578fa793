// Export modules for library usage
pub mod cli;
pub mod core;
pub mod evaluators;
pub mod io;
pub mod relations;

// Re-export commonly used types
pub use crate::core::{
    AnalysisResults, Chart, Planet, PlanetPosition, StrengthBand, Yoga, YogaCategory, ZodiacSign,
};

pub use crate::core::traits::YogaEvaluator;

pub use crate::evaluators::{all_evaluators, evaluate_chart};

pub use crate::io::{load_chart, parse_chart, ChartError, ChartInput, OutputFormat};
