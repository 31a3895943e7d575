pub mod difficulty;
pub mod inputs;
pub mod mistake;
pub mod timeline;

use std::fmt;

use thiserror::Error;

pub use inputs::CoercionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    EstimateDifficulty,
    PredictTimeline,
    ClassifyMistake,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::EstimateDifficulty => "Prediction",
            Self::PredictTimeline => "Timeline prediction",
            Self::ClassifyMistake => "Mistake classification",
        };
        f.write_str(label)
    }
}

/// The only error an operation reports: its inputs could not be coerced
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{operation} failed: {source}")]
pub struct ComputationFailed {
    pub operation: Operation,
    #[source]
    pub source: CoercionError,
}

impl ComputationFailed {
    pub fn new(operation: Operation, source: CoercionError) -> Self {
        Self { operation, source }
    }
}

pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
