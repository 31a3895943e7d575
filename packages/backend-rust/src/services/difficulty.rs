use mentor_algo::{CodeFeatureVector, DifficultyEstimator, DifficultyResult};
use serde::Serialize;
use serde_json::Value;

use super::inputs::{batch_items, Args, CoercionError, Field};
use super::{round_to, ComputationFailed, Operation};

/// Fixed self-reported confidence of the difficulty estimate
const DIFFICULTY_CONFIDENCE: &str = "85%";

const LOOPS: Field = Field::new(0, &["loops"]);
const CONDITIONALS: Field = Field::new(1, &["conditionals"]);
const NESTING_DEPTH: Field = Field::new(2, &["nestingDepth", "maxNestingDepth", "nesting_depth", "max_nesting_depth"]);
const FUNCTION_COUNT: Field = Field::new(3, &["functionCount", "functions", "function_count"]);
const LINE_COUNT: Field = Field::new(4, &["lineCount", "line_count"]);
const COMPLEXITY_SCORE: Field = Field::new(5, &["complexityScore", "complexity", "complexity_score"]);
const PROBLEM_TEXT_LENGTH: Field = Field::new(6, &["problemTextLength", "textLength", "problem_text_length", "text_length"]);
const TEST_CASE_COUNT: Field = Field::new(7, &["testCaseCount", "testCases", "test_case_count", "test_cases"]);

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureBreakdownDto {
    pub loops_impact: String,
    pub conditionals_impact: String,
    pub complexity_impact: String,
    pub length_impact: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DifficultyReport {
    pub difficulty_score: f64,
    pub category: String,
    pub recommendation: String,
    pub confidence: String,
    pub feature_breakdown: FeatureBreakdownDto,
}

pub fn parse_features(body: &Value) -> Result<CodeFeatureVector, CoercionError> {
    let args = Args::new(body)?;
    Ok(CodeFeatureVector {
        loops: args.int(&LOOPS)?,
        conditionals: args.int(&CONDITIONALS)?,
        max_nesting_depth: args.int(&NESTING_DEPTH)?,
        function_count: args.int(&FUNCTION_COUNT)?,
        line_count: args.int(&LINE_COUNT)?,
        complexity_score: args.float(&COMPLEXITY_SCORE)?,
        problem_text_length: args.int(&PROBLEM_TEXT_LENGTH)?,
        test_case_count: args.int(&TEST_CASE_COUNT)?,
    })
}

pub fn format_difficulty(result: &DifficultyResult) -> DifficultyReport {
    let label = result.category.label();

    DifficultyReport {
        difficulty_score: round_to(result.score, 3),
        category: label.to_string(),
        recommendation: format!(
            "Estimated {:.0}% difficulty - {} level problem",
            result.score * 100.0,
            label.to_lowercase()
        ),
        confidence: DIFFICULTY_CONFIDENCE.to_string(),
        feature_breakdown: FeatureBreakdownDto {
            loops_impact: format!("{:.3}", result.breakdown.loops),
            conditionals_impact: format!("{:.3}", result.breakdown.conditionals),
            complexity_impact: format!("{:.3}", result.breakdown.complexity),
            length_impact: format!("{:.3}", result.breakdown.length),
        },
    }
}

pub fn estimate(body: &Value) -> Result<DifficultyReport, ComputationFailed> {
    let features =
        parse_features(body).map_err(|e| ComputationFailed::new(Operation::EstimateDifficulty, e))?;
    let result = DifficultyEstimator::new().estimate(&features);

    tracing::debug!(
        score = result.score,
        category = result.category.label(),
        "difficulty estimated"
    );

    Ok(format_difficulty(&result))
}

/// Coerces every item first, then scores the whole batch in parallel
pub fn estimate_batch(body: &Value) -> Result<Vec<DifficultyReport>, ComputationFailed> {
    let fail = |e| ComputationFailed::new(Operation::EstimateDifficulty, e);
    let features = batch_items(body)
        .map_err(fail)?
        .iter()
        .enumerate()
        .map(|(index, item)| {
            parse_features(item).map_err(|source| CoercionError::Item {
                index,
                source: Box::new(source),
            })
        })
        .collect::<Result<Vec<_>, _>>()
        .map_err(fail)?;

    let results = DifficultyEstimator::new().estimate_batch(&features);
    tracing::debug!(count = results.len(), "difficulty batch estimated");

    Ok(results.iter().map(format_difficulty).collect())
}
