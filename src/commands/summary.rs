//! Per-step entropy aggregation
//!
//! Turns a batch of trajectories into the `model, step, mean, std` rows the
//! plotting stage reads. Steps are 1-based: step 1 is the prior entropy.
//! Targets whose walk already ended keep contributing their final entropy to
//! later steps, so every row averages the same number of targets.

use crate::oracle::Trajectory;
use serde::Serialize;
use std::io::Write;

/// Mean and population standard deviation of entropy at one step
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepSummary {
    pub model: String,
    pub step: usize,
    pub entropy_bits_mean: f64,
    pub entropy_bits_std: f64,
    pub samples: usize,
}

/// Aggregate entropy trajectories step by step
#[must_use]
pub fn summarize_trajectories(model: &str, trajectories: &[Trajectory]) -> Vec<StepSummary> {
    let series: Vec<Vec<f64>> = trajectories.iter().map(Trajectory::entropies).collect();
    let steps = series.iter().map(Vec::len).max().unwrap_or(0);

    (0..steps)
        .map(|step| {
            let values: Vec<f64> = series
                .iter()
                .filter_map(|entropies| entropies.get(step).or_else(|| entropies.last()))
                .copied()
                .collect();

            let n = values.len() as f64;
            let mean = values.iter().sum::<f64>() / n;
            let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;

            StepSummary {
                model: model.to_string(),
                step: step + 1,
                entropy_bits_mean: mean,
                entropy_bits_std: variance.sqrt(),
                samples: values.len(),
            }
        })
        .collect()
}

/// One CSV line; the sample count stays out of the plotting format
#[derive(Serialize)]
struct CsvRow<'a> {
    model: &'a str,
    step: usize,
    entropy_bits_mean: f64,
    entropy_bits_std: f64,
}

const CSV_HEADER: [&str; 4] = ["model", "step", "entropy_bits_mean", "entropy_bits_std"];

/// Write rows as CSV with the header `model,step,entropy_bits_mean,entropy_bits_std`
///
/// The header is written even when there are no rows.
///
/// # Errors
///
/// Propagates any write or serialization error.
pub fn write_summary_csv<W: Write>(writer: W, rows: &[StepSummary]) -> Result<(), csv::Error> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    wtr.write_record(CSV_HEADER)?;
    for row in rows {
        wtr.serialize(CsvRow {
            model: &row.model,
            step: row.step,
            entropy_bits_mean: row.entropy_bits_mean,
            entropy_bits_std: row.entropy_bits_std,
        })?;
    }
    wtr.flush()?;
    Ok(())
}

/// Rows as pretty-printed JSON
///
/// # Errors
///
/// Only fails on serializer errors, which plain rows do not produce.
pub fn summary_to_json(rows: &[StepSummary]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(rows)
}
