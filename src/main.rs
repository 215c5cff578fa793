use std::fs::File;
use std::io::BufWriter;

use anyhow::{Context, Result};
use clap::Parser;
use yogascan::cli::{Cli, Commands};
use yogascan::io::{load_chart, write_results};

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            path,
            format,
            output,
            top,
            min_strength,
            category,
        } => {
            let chart = load_chart(&path)
                .with_context(|| format!("failed to load chart from {}", path.display()))?;
            let results = yogascan::evaluate_chart(&chart);

            let mut yogas = results.sorted_by_strength();
            if let Some(category) = category {
                yogas.retain(|y| y.category == category);
            }
            if let Some(min) = min_strength {
                yogas.retain(|y| y.strength_percentage >= min);
            }
            if let Some(top) = top {
                yogas.truncate(top);
            }

            match output {
                Some(out_path) => {
                    let file = File::create(&out_path).with_context(|| {
                        format!("failed to create output file {}", out_path.display())
                    })?;
                    let mut writer = BufWriter::new(file);
                    write_results(&results, &yogas, format, &mut writer)?;
                }
                None => {
                    let stdout = std::io::stdout();
                    let mut writer = stdout.lock();
                    write_results(&results, &yogas, format, &mut writer)?;
                }
            }
            Ok(())
        }
    }
}
