use serde::Serialize;
use thiserror::Error;

use crate::model::table::Table;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Metric {
    Correctness,
    Compliance,
    Completeness,
}

impl Metric {
    pub fn name(self) -> &'static str {
        match self {
            Metric::Correctness => "Correctness",
            Metric::Compliance => "Compliance",
            Metric::Completeness => "Completeness",
        }
    }
}

pub fn metric_order() -> &'static [Metric; 3] {
    &[Metric::Correctness, Metric::Compliance, Metric::Completeness]
}

#[derive(Debug, Error, PartialEq)]
pub enum MetricError {
    #[error("scorer output has no '{0}' column")]
    MissingColumn(&'static str),
    #[error("scorer output '{metric}' is not a finite number: {value:?}")]
    NotNumeric { metric: &'static str, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricScores {
    pub correctness: f64,
    pub compliance: f64,
    pub completeness: f64,
}

impl MetricScores {
    pub fn get(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Correctness => self.correctness,
            Metric::Compliance => self.compliance,
            Metric::Completeness => self.completeness,
        }
    }

    pub fn below(&self, threshold: f64) -> bool {
        metric_order().iter().any(|&m| self.get(m) < threshold)
    }

    pub fn from_row(table: &Table, row: usize) -> Result<Self, MetricError> {
        Ok(Self {
            correctness: parse_metric(table, row, Metric::Correctness)?,
            compliance: parse_metric(table, row, Metric::Compliance)?,
            completeness: parse_metric(table, row, Metric::Completeness)?,
        })
    }
}

pub fn parse_metric_rows(table: &Table) -> Result<Vec<MetricScores>, MetricError> {
    for &metric in metric_order() {
        if !table.has_column(metric.name()) {
            return Err(MetricError::MissingColumn(metric.name()));
        }
    }
    (0..table.n_rows())
        .map(|row| MetricScores::from_row(table, row))
        .collect()
}

fn parse_metric(table: &Table, row: usize, metric: Metric) -> Result<f64, MetricError> {
    let raw = table
        .cell(row, metric.name())
        .ok_or(MetricError::MissingColumn(metric.name()))?;
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(MetricError::NotNumeric {
            metric: metric.name(),
            value: raw.to_string(),
        }),
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/metrics.rs"]
mod tests;
