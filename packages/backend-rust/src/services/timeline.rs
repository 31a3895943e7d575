use mentor_algo::{RngSource, TimelineInputs, TimelinePredictor, TimelineResult};
use serde::Serialize;
use serde_json::Value;

use super::inputs::{Args, CoercionError, Field};
use super::{round_to, ComputationFailed, Operation};

const STUDENT_SKILL: Field = Field::new(0, &["studentSkill", "student_skill"]);
const PROBLEM_DIFFICULTY: Field = Field::new(1, &["problemDifficulty", "problem_difficulty"]);
const PROBLEM_COMPLEXITY: Field = Field::new(2, &["problemComplexity", "problem_complexity"]);
const PROBLEM_LENGTH: Field = Field::new(3, &["problemLength", "problem_length"]);

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineFactorsDto {
    pub skill_gap_impact: String,
    pub complexity_multiplier: String,
    pub length_adjustment: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineReport {
    pub estimated_hours: f64,
    pub estimated_days: f64,
    pub learning_pace: String,
    pub recommendation: String,
    pub factors: TimelineFactorsDto,
}

pub fn parse_timeline_inputs(body: &Value) -> Result<TimelineInputs, CoercionError> {
    let args = Args::new(body)?;
    Ok(TimelineInputs {
        student_skill: args.float(&STUDENT_SKILL)?,
        problem_difficulty: args.float(&PROBLEM_DIFFICULTY)?,
        problem_complexity: args.float(&PROBLEM_COMPLEXITY)?,
        problem_length: args.int(&PROBLEM_LENGTH)?,
    })
}

/// The recommendation quotes the same rounded figures as the numeric fields
pub fn format_timeline(result: &TimelineResult) -> TimelineReport {
    let hours = round_to(result.hours, 1);
    let days = round_to(result.days, 1);

    TimelineReport {
        estimated_hours: hours,
        estimated_days: days,
        learning_pace: result.pace.label().to_string(),
        recommendation: format!(
            "Plan {hours:.1} hours ({days:.1} days) to master this concept"
        ),
        factors: TimelineFactorsDto {
            skill_gap_impact: format!("{:.1} hours", result.factors.skill_gap_hours),
            complexity_multiplier: format!("{:.2}x", result.factors.complexity_multiplier),
            length_adjustment: format!("{:.2}x", result.factors.length_multiplier),
        },
    }
}

/// Each call draws its jitter from a fresh generator built by `source`
pub fn predict(body: &Value, source: &RngSource) -> Result<TimelineReport, ComputationFailed> {
    let inputs = parse_timeline_inputs(body)
        .map_err(|e| ComputationFailed::new(Operation::PredictTimeline, e))?;
    let mut rng = source.rng();
    let result = TimelinePredictor::new().predict(&inputs, &mut rng);

    tracing::debug!(
        hours = result.hours,
        jitter = result.jitter,
        pace = result.pace.label(),
        "timeline predicted"
    );

    Ok(format_timeline(&result))
}
