use serde::Serialize;
use thiserror::Error;

pub mod chart;
pub mod export;
pub mod html;
pub mod json;
pub mod text;

use crate::model::metrics::{Metric, MetricScores};
use crate::model::scores::RowFailure;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("chart rendering failed: {0}")]
    Chart(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricMeans {
    pub correctness: f64,
    pub compliance: f64,
    pub completeness: f64,
}

impl MetricMeans {
    pub fn get(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Correctness => self.correctness,
            Metric::Compliance => self.compliance,
            Metric::Completeness => self.completeness,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TimingStats {
    pub total_s: f64,
    pub mean_s: Option<f64>,
    pub max_s: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SummaryData {
    pub tool_name: String,
    pub tool_version: String,
    pub scorer: String,
    pub threshold_profile: String,
    pub threshold: f64,

    pub n_input_rows: usize,
    pub n_scored_rows: usize,
    pub n_result_rows: usize,
    pub n_failed_rows: usize,

    pub means: Option<MetricMeans>,
    pub falling_short_rows: usize,
    pub processing_time: TimingStats,

    pub failures: Vec<RowFailure>,
}

pub fn metric_means(scores: &[MetricScores]) -> Option<MetricMeans> {
    if scores.is_empty() {
        return None;
    }
    let n = scores.len() as f64;
    let mut sums = [0.0f64; 3];
    for s in scores {
        sums[0] += s.correctness;
        sums[1] += s.compliance;
        sums[2] += s.completeness;
    }
    Some(MetricMeans {
        correctness: sums[0] / n,
        compliance: sums[1] / n,
        completeness: sums[2] / n,
    })
}

pub fn falling_short(scores: &[MetricScores], threshold: f64) -> Vec<usize> {
    scores
        .iter()
        .enumerate()
        .filter(|(_, s)| s.below(threshold))
        .map(|(i, _)| i)
        .collect()
}

pub fn timing_stats(seconds: &[f64]) -> TimingStats {
    let total_s: f64 = seconds.iter().sum();
    let mean_s = if seconds.is_empty() {
        None
    } else {
        Some(total_s / seconds.len() as f64)
    };
    let max_s = seconds.iter().copied().reduce(f64::max);
    TimingStats {
        total_s,
        mean_s,
        max_s,
    }
}

pub fn format_f64_3(v: f64) -> String {
    format!("{:.3}", v)
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/mod.rs"]
mod tests;
