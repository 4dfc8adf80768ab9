pub mod diagnostics;
pub mod metrics;
pub mod scores;
pub mod table;
pub mod thresholds;
