//! Difficulty Estimator
//!
//! Scores a problem from the structure of its solution: a base difficulty plus
//! a fixed weighted contribution per feature, clamped into
//! [`DIFFICULTY_SCORE_MIN`, `DIFFICULTY_SCORE_MAX`].

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::sanitize::clamp_f64;
use crate::types::{
    CodeFeatureVector, DifficultyBreakdown, DifficultyCategory, DifficultyResult,
    DIFFICULTY_SCORE_MAX, DIFFICULTY_SCORE_MIN,
};

const BASE_DIFFICULTY: f64 = 0.3;
const LOOP_WEIGHT: f64 = 0.05;
const CONDITIONAL_WEIGHT: f64 = 0.04;
const NESTING_WEIGHT: f64 = 0.06;
const FUNCTION_WEIGHT: f64 = 0.03;
const COMPLEXITY_WEIGHT: f64 = 0.3;
const LINE_COUNT_WEIGHT: f64 = 0.1;
const TEXT_LENGTH_WEIGHT: f64 = 0.05;
const TEST_CASE_WEIGHT: f64 = 0.02;

const LINE_COUNT_SCALE: f64 = 100.0;
const TEXT_LENGTH_SCALE: f64 = 2000.0;
const TEST_CASE_SCALE: f64 = 10.0;

/// Hand-tuned coefficients of the difficulty sum
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DifficultyWeights {
    pub base: f64,
    pub loops: f64,
    pub conditionals: f64,
    pub nesting: f64,
    /// Applied per function beyond the first
    pub functions: f64,
    pub complexity: f64,
    /// Applied per 100 lines
    pub line_count: f64,
    /// Applied per 2000 characters of problem text
    pub text_length: f64,
    /// Applied per 10 test cases
    pub test_cases: f64,
}

impl Default for DifficultyWeights {
    fn default() -> Self {
        Self {
            base: BASE_DIFFICULTY,
            loops: LOOP_WEIGHT,
            conditionals: CONDITIONAL_WEIGHT,
            nesting: NESTING_WEIGHT,
            functions: FUNCTION_WEIGHT,
            complexity: COMPLEXITY_WEIGHT,
            line_count: LINE_COUNT_WEIGHT,
            text_length: TEXT_LENGTH_WEIGHT,
            test_cases: TEST_CASE_WEIGHT,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct DifficultyEstimator {
    weights: DifficultyWeights,
}

impl DifficultyEstimator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_weights(weights: DifficultyWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &DifficultyWeights {
        &self.weights
    }

    /// Weighted sum before the final clamp. Inputs are clamped first.
    pub fn raw_score(&self, features: &CodeFeatureVector) -> f64 {
        let f = features.sanitized();
        let w = &self.weights;

        w.base
            + f.loops as f64 * w.loops
            + f.conditionals as f64 * w.conditionals
            + f.max_nesting_depth as f64 * w.nesting
            + (f.function_count - 1) as f64 * w.functions
            + f.complexity_score * w.complexity
            + (f.line_count as f64 / LINE_COUNT_SCALE) * w.line_count
            + (f.problem_text_length as f64 / TEXT_LENGTH_SCALE) * w.text_length
            + (f.test_case_count as f64 / TEST_CASE_SCALE) * w.test_cases
    }

    pub fn estimate(&self, features: &CodeFeatureVector) -> DifficultyResult {
        let score = clamp_f64(
            self.raw_score(features),
            DIFFICULTY_SCORE_MIN,
            DIFFICULTY_SCORE_MAX,
        );

        DifficultyResult {
            score,
            category: DifficultyCategory::from_score(score),
            breakdown: self.breakdown(features),
        }
    }

    /// 批量估计，保持输入顺序
    pub fn estimate_batch(&self, batch: &[CodeFeatureVector]) -> Vec<DifficultyResult> {
        batch.par_iter().map(|features| self.estimate(features)).collect()
    }

    fn breakdown(&self, features: &CodeFeatureVector) -> DifficultyBreakdown {
        let f = features.sanitized();
        let w = &self.weights;

        DifficultyBreakdown {
            loops: f.loops as f64 * w.loops,
            conditionals: f.conditionals as f64 * w.conditionals,
            complexity: f.complexity_score * w.complexity,
            length: (f.problem_text_length as f64 / TEXT_LENGTH_SCALE) * w.text_length,
        }
    }
}

/// Estimate with the default coefficients
pub fn estimate_difficulty(features: &CodeFeatureVector) -> DifficultyResult {
    DifficultyEstimator::default().estimate(features)
}
