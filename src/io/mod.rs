//! Chart input deserialization and result writers.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;

use colored::Colorize;
use serde::Deserialize;
use thiserror::Error;

use crate::core::{AnalysisResults, Chart, Planet, StrengthBand, Yoga};

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("missing field: {0}")]
    MissingField(&'static str),

    #[error("longitude {value} for {body} outside 0..360")]
    InvalidLongitude { body: String, value: f64 },

    #[error("expected 12 house cusps, found {0}")]
    InvalidCusps(usize),

    #[error("failed to parse chart JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to read chart file: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BodyInput {
    pub longitude: f64,
    #[serde(default = "default_speed")]
    pub speed: f64,
}

fn default_speed() -> f64 {
    1.0
}

/// Sidereal chart as produced by an ephemeris step: an ascendant
/// longitude, optional house cusps, and per-body longitudes. When
/// cusps are absent the whole-sign system is used; when Ketu is
/// absent it is derived opposite Rahu.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartInput {
    pub ascendant: f64,
    #[serde(default)]
    pub house_cusps: Option<Vec<f64>>,
    pub planets: BTreeMap<Planet, BodyInput>,
}

impl ChartInput {
    pub fn into_chart(mut self) -> Result<Chart, ChartError> {
        if !(0.0..360.0).contains(&self.ascendant) {
            return Err(ChartError::InvalidLongitude {
                body: "ascendant".to_string(),
                value: self.ascendant,
            });
        }
        for (planet, body) in &self.planets {
            if !(0.0..360.0).contains(&body.longitude) {
                return Err(ChartError::InvalidLongitude {
                    body: planet.to_string(),
                    value: body.longitude,
                });
            }
        }
        if self.planets.is_empty() {
            return Err(ChartError::MissingField("planets"));
        }

        if !self.planets.contains_key(&Planet::Ketu) {
            if let Some(rahu) = self.planets.get(&Planet::Rahu).copied() {
                self.planets.insert(
                    Planet::Ketu,
                    BodyInput {
                        longitude: (rahu.longitude + 180.0).rem_euclid(360.0),
                        speed: rahu.speed,
                    },
                );
            }
        }

        let bodies: Vec<(Planet, f64, f64)> = self
            .planets
            .iter()
            .map(|(&p, b)| (p, b.longitude, b.speed))
            .collect();

        match self.house_cusps {
            Some(cusps) => {
                let cusps: [f64; 12] = cusps
                    .as_slice()
                    .try_into()
                    .map_err(|_| ChartError::InvalidCusps(cusps.len()))?;
                Ok(Chart::new(self.ascendant, cusps, &bodies))
            }
            None => Ok(Chart::whole_sign_with_motion(self.ascendant, &bodies)),
        }
    }
}

pub fn parse_chart(json: &str) -> Result<Chart, ChartError> {
    let input: ChartInput = serde_json::from_str(json)?;
    input.into_chart()
}

pub fn load_chart(path: &Path) -> Result<Chart, ChartError> {
    let contents = std::fs::read_to_string(path)?;
    parse_chart(&contents)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
}

pub fn write_results<W: Write>(
    results: &AnalysisResults,
    yogas: &[Yoga],
    format: OutputFormat,
    writer: &mut W,
) -> Result<(), ChartError> {
    match format {
        OutputFormat::Json => write_json(yogas, writer),
        OutputFormat::Table => write_table(results, yogas, writer),
    }
}

fn write_json<W: Write>(yogas: &[Yoga], writer: &mut W) -> Result<(), ChartError> {
    serde_json::to_writer_pretty(&mut *writer, yogas)?;
    writeln!(writer)?;
    Ok(())
}

fn write_table<W: Write>(
    results: &AnalysisResults,
    yogas: &[Yoga],
    writer: &mut W,
) -> Result<(), ChartError> {
    writeln!(
        writer,
        "{}",
        format!(
            "{} yogas detected ({} auspicious)",
            results.len(),
            results.auspicious_count()
        )
        .bold()
    )?;
    writeln!(writer)?;
    writeln!(
        writer,
        "{:<42} {:<22} {:>8}  {:<18} {}",
        "NAME".bold(),
        "CATEGORY".bold(),
        "STRENGTH".bold(),
        "BAND".bold(),
        "NATURE".bold()
    )?;
    for yoga in yogas {
        let nature = if yoga.is_auspicious {
            "auspicious".green()
        } else {
            "inauspicious".red()
        };
        let band = band_label(yoga.strength);
        writeln!(
            writer,
            "{:<42} {:<22} {:>7.1}%  {:<18} {}",
            yoga.name,
            yoga.category.to_string(),
            yoga.strength_percentage,
            band,
            nature
        )?;
    }
    Ok(())
}

fn band_label(band: StrengthBand) -> colored::ColoredString {
    match band {
        StrengthBand::Weak => "weak".dimmed(),
        StrengthBand::Moderate => "moderate".normal(),
        StrengthBand::Strong => "strong".cyan(),
        StrengthBand::VeryStrong => "very strong".yellow(),
        StrengthBand::ExtremelyStrong => "extremely strong".bright_yellow().bold(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ZodiacSign;
    use indoc::indoc;

    const SAMPLE: &str = indoc! {r#"
        {
          "ascendant": 275.0,
          "planets": {
            "Sun": { "longitude": 95.0, "speed": 0.98 },
            "Moon": { "longitude": 280.0 },
            "Mars": { "longitude": 298.0 },
            "Rahu": { "longitude": 40.0, "speed": -0.05 }
          }
        }
    "#};

    #[test]
    fn parses_whole_sign_chart() {
        let chart = parse_chart(SAMPLE).unwrap();
        assert_eq!(chart.ascendant_sign(), ZodiacSign::Capricorn);
        assert_eq!(chart.position(Planet::Mars).map(|p| p.house), Some(1));
    }

    #[test]
    fn ketu_derived_opposite_rahu() {
        let chart = parse_chart(SAMPLE).unwrap();
        let ketu = chart.position(Planet::Ketu).unwrap();
        assert!((ketu.longitude - 220.0).abs() < 1e-9);
        assert!(ketu.is_retrograde());
    }

    #[test]
    fn rejects_out_of_range_longitude() {
        let json = r#"{"ascendant": 10.0, "planets": {"Sun": {"longitude": 400.0}}}"#;
        let err = parse_chart(json).unwrap_err();
        assert!(matches!(err, ChartError::InvalidLongitude { .. }));
    }

    #[test]
    fn rejects_short_cusp_list() {
        let json = r#"{
            "ascendant": 10.0,
            "houseCusps": [0.0, 30.0, 60.0],
            "planets": {"Sun": {"longitude": 100.0}}
        }"#;
        let err = parse_chart(json).unwrap_err();
        assert!(matches!(err, ChartError::InvalidCusps(3)));
    }

    #[test]
    fn rejects_empty_planet_map() {
        let json = r#"{"ascendant": 10.0, "planets": {}}"#;
        let err = parse_chart(json).unwrap_err();
        assert!(matches!(err, ChartError::MissingField("planets")));
    }
}
