use std::collections::BTreeMap;

use mentor_algo::{
    MistakeCategory, MistakeClassifier, MistakeInputs, MistakeResult, RiskLevel, RngSource,
};
use serde::Serialize;
use serde_json::Value;

use super::inputs::{Args, CoercionError, Field};
use super::{ComputationFailed, Operation};

const LOOPS: Field = Field::new(0, &["loops"]);
const CONDITIONALS: Field = Field::new(1, &["conditionals"]);
const NESTING_DEPTH: Field = Field::new(2, &["nestingDepth", "maxNestingDepth", "nesting_depth", "max_nesting_depth"]);
const LINE_COUNT: Field = Field::new(3, &["lineCount", "line_count"]);
const COMPLEXITY_SCORE: Field = Field::new(4, &["complexityScore", "complexity", "complexity_score"]);
const HAS_RECURSION: Field = Field::new(5, &["hasRecursion", "recursion", "has_recursion"]);
const FUNCTION_COUNT: Field = Field::new(6, &["functionCount", "functions", "function_count"]);
const PROBLEM_DIFFICULTY: Field = Field::new(7, &["problemDifficulty", "difficulty", "problem_difficulty"]);

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedAnalysis {
    pub complexity_concern: String,
    pub structure_concern: String,
    pub length_concern: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MistakeReport {
    pub predicted_mistake: String,
    pub category: MistakeCategory,
    pub confidence: String,
    pub suggestion: String,
    pub risk_level: String,
    pub probabilities: BTreeMap<MistakeCategory, f64>,
    pub detailed_analysis: DetailedAnalysis,
}

pub fn suggestion(category: MistakeCategory) -> &'static str {
    match category {
        MistakeCategory::SyntaxError => "Check for missing colons, brackets, or indentation issues",
        MistakeCategory::LogicError => "Review your algorithm logic and test with edge cases",
        MistakeCategory::OptimizationNeeded => {
            "Consider more efficient algorithms or data structures"
        }
        MistakeCategory::EdgeCaseMissed => {
            "Add checks for empty inputs, single elements, or boundary conditions"
        }
        MistakeCategory::ComplexityIssue => {
            "Simplify nested structures and reduce algorithmic complexity"
        }
        MistakeCategory::NoError => "Code looks good! Consider minor style improvements",
    }
}

fn concern(value: f64, high_above: f64, medium_above: f64) -> RiskLevel {
    if value > high_above {
        RiskLevel::High
    } else if value > medium_above {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

/// 基于截断后的输入评估三个维度
pub fn detailed_analysis(inputs: &MistakeInputs) -> DetailedAnalysis {
    let i = inputs.sanitized();
    DetailedAnalysis {
        complexity_concern: concern(i.complexity_score, 0.7, 0.4).label().to_string(),
        structure_concern: concern(i.max_nesting_depth as f64, 5.0, 3.0)
            .label()
            .to_string(),
        length_concern: concern(i.line_count as f64, 100.0, 50.0).label().to_string(),
    }
}

pub fn parse_mistake_inputs(body: &Value) -> Result<MistakeInputs, CoercionError> {
    let args = Args::new(body)?;
    Ok(MistakeInputs {
        loops: args.int(&LOOPS)?,
        conditionals: args.int(&CONDITIONALS)?,
        max_nesting_depth: args.int(&NESTING_DEPTH)?,
        line_count: args.int(&LINE_COUNT)?,
        complexity_score: args.float(&COMPLEXITY_SCORE)?,
        has_recursion: args.boolean(&HAS_RECURSION)?,
        function_count: args.int(&FUNCTION_COUNT)?,
        problem_difficulty: args.float(&PROBLEM_DIFFICULTY)?,
    })
}

pub fn format_mistake(inputs: &MistakeInputs, result: &MistakeResult) -> MistakeReport {
    let category = result.predicted_category;

    MistakeReport {
        predicted_mistake: category.title().to_string(),
        category,
        confidence: format!("{:.1}%", result.confidence * 100.0),
        suggestion: suggestion(category).to_string(),
        risk_level: result.risk_level.label().to_string(),
        probabilities: result.probability_distribution.clone(),
        detailed_analysis: detailed_analysis(inputs),
    }
}

pub fn classify(body: &Value, source: &RngSource) -> Result<MistakeReport, ComputationFailed> {
    let inputs = parse_mistake_inputs(body)
        .map_err(|e| ComputationFailed::new(Operation::ClassifyMistake, e))?;
    let mut rng = source.rng();
    let result = MistakeClassifier::new().classify(&inputs, &mut rng);

    tracing::debug!(
        category = result.predicted_category.as_str(),
        rule = result.rule_index,
        "mistake classified"
    );

    Ok(format_mistake(&inputs, &result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_edge_cases_report() {
        let body = json!({ "data": [1, 0, 1, 20, 0.3, false, 1, 0.7] });
        let report = classify(&body, &RngSource::Seeded(9)).unwrap();

        assert_eq!(report.predicted_mistake, "Edge Case Missed");
        assert_eq!(report.category, MistakeCategory::EdgeCaseMissed);
        assert_eq!(report.confidence, "75.0%");
        assert_eq!(report.risk_level, "Medium");
        assert_eq!(
            report.suggestion,
            "Add checks for empty inputs, single elements, or boundary conditions"
        );
        assert!((report.probabilities[&MistakeCategory::EdgeCaseMissed] - 0.6).abs() < 1e-9);
        assert_eq!(report.detailed_analysis.complexity_concern, "Low");
        assert_eq!(report.detailed_analysis.structure_concern, "Low");
        assert_eq!(report.detailed_analysis.length_concern, "Low");
    }

    #[test]
    fn test_named_body_with_string_bool() {
        let body = json!({
            "loops": 3,
            "conditionals": 4,
            "nestingDepth": 4,
            "lineCount": 120,
            "complexityScore": 0.9,
            "hasRecursion": "yes",
            "functionCount": 2,
            "problemDifficulty": 0.5
        });
        let report = classify(&body, &RngSource::Entropy).unwrap();

        assert_eq!(report.category, MistakeCategory::OptimizationNeeded);
        assert_eq!(report.confidence, "85.0%");
        assert_eq!(report.risk_level, "High");
        assert_eq!(report.detailed_analysis.complexity_concern, "High");
        assert_eq!(report.detailed_analysis.structure_concern, "Medium");
        assert_eq!(report.detailed_analysis.length_concern, "High");
    }

    #[test]
    fn test_concerns_use_clamped_inputs() {
        let inputs = MistakeInputs {
            complexity_score: 0.5,
            max_nesting_depth: 40,
            line_count: -10,
            ..MistakeInputs::default()
        };
        let analysis = detailed_analysis(&inputs);
        assert_eq!(analysis.complexity_concern, "Medium");
        assert_eq!(analysis.structure_concern, "High");
        assert_eq!(analysis.length_concern, "Low");
    }

    #[test]
    fn test_probabilities_serialize_with_snake_case_keys() {
        let body = json!({ "data": [1, 0, 1, 20, 0.3, 0, 1, 0.7] });
        let report = classify(&body, &RngSource::Seeded(1)).unwrap();
        let value = serde_json::to_value(&report).unwrap();

        assert_eq!(value["category"], "edge_case_missed");
        assert!(value["probabilities"]["edge_case_missed"].is_number());
        assert_eq!(value["probabilities"].as_object().unwrap().len(), 6);
        assert_eq!(value["detailedAnalysis"]["lengthConcern"], "Low");
    }

    #[test]
    fn test_infinite_complexity_clamps_to_upper_bound() {
        let body = json!({ "data": [1, 2, 1, 20, "inf", false, 1, "1e400"] });
        let report = classify(&body, &RngSource::Seeded(2)).unwrap();

        assert_eq!(report.category, MistakeCategory::OptimizationNeeded);
        assert_eq!(report.detailed_analysis.complexity_concern, "High");
    }

    #[test]
    fn test_unparsable_recursion_flag_fails() {
        let body = json!({ "data": [1, 0, 1, 20, 0.3, "maybe", 1, 0.7] });
        let err = classify(&body, &RngSource::Seeded(1)).unwrap_err();
        assert_eq!(err.operation, Operation::ClassifyMistake);
        assert!(err.to_string().starts_with("Mistake classification failed:"));
        assert!(err.to_string().contains("hasRecursion"));
    }

    #[test]
    fn test_every_category_has_suggestion() {
        for category in MistakeCategory::ALL {
            assert!(!suggestion(category).is_empty());
        }
    }
}
