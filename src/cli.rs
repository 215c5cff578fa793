use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::core::YogaCategory;
use crate::io::OutputFormat;

#[derive(Parser)]
#[command(
    name = "yogascan",
    about = "Detect and score Vedic yogas in a sidereal chart",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a chart file and report the yogas found
    Analyze {
        /// Path to the chart JSON file
        path: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,

        /// Write output to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Keep only the N strongest yogas
        #[arg(long = "top", visible_alias = "head")]
        top: Option<usize>,

        /// Drop yogas below this strength percentage
        #[arg(long = "min-strength")]
        min_strength: Option<f64>,

        /// Keep only yogas of one category
        #[arg(long = "category", value_parser = parse_category)]
        category: Option<YogaCategory>,
    },
}

fn parse_category(value: &str) -> Result<YogaCategory, String> {
    let normalized = value.to_ascii_lowercase().replace(['-', '_', ' '], "");
    YogaCategory::ALL
        .iter()
        .copied()
        .find(|c| c.to_string().to_ascii_lowercase().replace(['-', '_', ' '], "") == normalized)
        .ok_or_else(|| {
            format!(
                "unknown category '{value}'; expected one of: {}",
                YogaCategory::ALL
                    .iter()
                    .map(|c| c.to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_parsing_is_forgiving() {
        assert_eq!(parse_category("authority"), Ok(YogaCategory::Authority));
        assert_eq!(
            parse_category("exchange-based"),
            Ok(YogaCategory::ExchangeBased)
        );
        assert!(parse_category("nonsense").is_err());
    }

    #[test]
    fn cli_parses_analyze_flags() {
        let cli = Cli::try_parse_from([
            "yogascan",
            "analyze",
            "chart.json",
            "--format",
            "json",
            "--top",
            "5",
            "--min-strength",
            "60",
        ])
        .unwrap();
        let Commands::Analyze {
            format,
            top,
            min_strength,
            ..
        } = cli.command;
        assert_eq!(format, OutputFormat::Json);
        assert_eq!(top, Some(5));
        assert_eq!(min_strength, Some(60.0));
    }
}
