//! Common Types and Constants
//!
//! Feature records, estimator results and the valid input ranges shared
//! across all estimator modules.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// ==================== Input Ranges ====================

/// Closed interval an input field is clamped into
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bounds<T> {
    pub lo: T,
    pub hi: T,
}

impl<T> Bounds<T> {
    pub const fn new(lo: T, hi: T) -> Self {
        Self { lo, hi }
    }
}

pub const LOOPS_BOUNDS: Bounds<i64> = Bounds::new(0, 10);
pub const CONDITIONALS_BOUNDS: Bounds<i64> = Bounds::new(0, 15);
pub const NESTING_DEPTH_BOUNDS: Bounds<i64> = Bounds::new(0, 10);
pub const FUNCTION_COUNT_BOUNDS: Bounds<i64> = Bounds::new(0, 5);
pub const LINE_COUNT_BOUNDS: Bounds<i64> = Bounds::new(1, 200);
pub const COMPLEXITY_SCORE_BOUNDS: Bounds<f64> = Bounds::new(0.0, 1.0);
pub const PROBLEM_TEXT_LENGTH_BOUNDS: Bounds<i64> = Bounds::new(50, 5000);
pub const TEST_CASE_COUNT_BOUNDS: Bounds<i64> = Bounds::new(1, 20);

pub const STUDENT_SKILL_BOUNDS: Bounds<f64> = Bounds::new(0.1, 1.0);
pub const PROBLEM_DIFFICULTY_BOUNDS: Bounds<f64> = Bounds::new(0.1, 1.0);
pub const PROBLEM_COMPLEXITY_BOUNDS: Bounds<f64> = Bounds::new(0.1, 1.0);
pub const PROBLEM_LENGTH_BOUNDS: Bounds<i64> = Bounds::new(100, 5000);

// ==================== Output Ranges ====================

/// Lowest difficulty score ever reported
pub const DIFFICULTY_SCORE_MIN: f64 = 0.1;

/// Highest difficulty score ever reported
pub const DIFFICULTY_SCORE_MAX: f64 = 0.9;

/// Scores below this are Easy
pub const EASY_THRESHOLD: f64 = 0.4;

/// Scores below this (and not Easy) are Medium
pub const MEDIUM_THRESHOLD: f64 = 0.7;

pub const TIMELINE_HOURS_MIN: f64 = 0.1;
pub const TIMELINE_HOURS_MAX: f64 = 50.0;

/// Study hours that make up one day of the timeline
pub const STUDY_HOURS_PER_DAY: f64 = 8.0;

pub const QUICK_PACE_HOURS: f64 = 2.0;
pub const MODERATE_PACE_HOURS: f64 = 8.0;

// ==================== Feature Records ====================

/// Structural summary of a solution and its problem statement
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeFeatureVector {
    /// for/while loops in the solution
    pub loops: i64,
    /// if/else statements
    pub conditionals: i64,
    /// Deepest nesting of control structures
    pub max_nesting_depth: i64,
    /// Function definitions
    pub function_count: i64,
    /// Lines in a typical solution
    pub line_count: i64,
    /// Overall algorithmic complexity rating [0, 1]
    pub complexity_score: f64,
    /// Character count of the problem statement
    pub problem_text_length: i64,
    /// Provided test cases
    pub test_case_count: i64,
}

/// Student and problem description for the timeline predictor
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineInputs {
    /// 0.1 = beginner, 1.0 = expert
    pub student_skill: f64,
    pub problem_difficulty: f64,
    pub problem_complexity: f64,
    /// Problem description length in characters
    pub problem_length: i64,
}

/// Code-structure subset used by the mistake classifier
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MistakeInputs {
    pub loops: i64,
    pub conditionals: i64,
    pub max_nesting_depth: i64,
    pub line_count: i64,
    pub complexity_score: f64,
    pub has_recursion: bool,
    pub function_count: i64,
    pub problem_difficulty: f64,
}

// ==================== Difficulty Types ====================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DifficultyCategory {
    Easy,
    Medium,
    Hard,
}

impl DifficultyCategory {
    pub fn from_score(score: f64) -> Self {
        if score < EASY_THRESHOLD {
            Self::Easy
        } else if score < MEDIUM_THRESHOLD {
            Self::Medium
        } else {
            Self::Hard
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        }
    }
}

/// Individual weighted contributions, reported for explainability only
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DifficultyBreakdown {
    pub loops: f64,
    pub conditionals: f64,
    pub complexity: f64,
    /// Contribution of the problem statement length
    pub length: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DifficultyResult {
    /// Difficulty score in [0.1, 0.9]
    pub score: f64,
    pub category: DifficultyCategory,
    pub breakdown: DifficultyBreakdown,
}

// ==================== Timeline Types ====================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LearningPace {
    Quick,
    Moderate,
    Extended,
}

impl LearningPace {
    pub fn from_hours(hours: f64) -> Self {
        if hours < QUICK_PACE_HOURS {
            Self::Quick
        } else if hours < MODERATE_PACE_HOURS {
            Self::Moderate
        } else {
            Self::Extended
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Quick => "Quick",
            Self::Moderate => "Moderate",
            Self::Extended => "Extended",
        }
    }
}

/// Factors behind a timeline estimate
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineFactors {
    /// Hours added by the gap between problem difficulty and student skill
    pub skill_gap_hours: f64,
    pub complexity_multiplier: f64,
    pub length_multiplier: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineResult {
    /// Expected hours in [0.1, 50.0]
    pub hours: f64,
    /// `hours / 8`
    pub days: f64,
    pub pace: LearningPace,
    pub factors: TimelineFactors,
    /// Random multiplier applied to the deterministic estimate, in [0.8, 1.2)
    pub jitter: f64,
}

// ==================== Mistake Types ====================

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MistakeCategory {
    SyntaxError,
    LogicError,
    OptimizationNeeded,
    EdgeCaseMissed,
    ComplexityIssue,
    NoError,
}

impl MistakeCategory {
    pub const ALL: [MistakeCategory; 6] = [
        MistakeCategory::SyntaxError,
        MistakeCategory::LogicError,
        MistakeCategory::OptimizationNeeded,
        MistakeCategory::EdgeCaseMissed,
        MistakeCategory::ComplexityIssue,
        MistakeCategory::NoError,
    ];

    /// snake_case key, identical to the serialized form
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SyntaxError => "syntax_error",
            Self::LogicError => "logic_error",
            Self::OptimizationNeeded => "optimization_needed",
            Self::EdgeCaseMissed => "edge_case_missed",
            Self::ComplexityIssue => "complexity_issue",
            Self::NoError => "no_error",
        }
    }

    /// Human-readable title, e.g. "Edge Case Missed"
    pub fn title(&self) -> &'static str {
        match self {
            Self::SyntaxError => "Syntax Error",
            Self::LogicError => "Logic Error",
            Self::OptimizationNeeded => "Optimization Needed",
            Self::EdgeCaseMissed => "Edge Case Missed",
            Self::ComplexityIssue => "Complexity Issue",
            Self::NoError => "No Error",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn from_confidence(confidence: f64) -> Self {
        if confidence > 0.8 {
            Self::High
        } else if confidence > 0.6 {
            Self::Medium
        } else {
            Self::Low
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MistakeResult {
    pub predicted_category: MistakeCategory,
    /// Self-reported certainty of the firing rule, not a calibrated probability
    pub confidence: f64,
    /// Normalized weights over every category, sums to 1.0
    pub probability_distribution: BTreeMap<MistakeCategory, f64>,
    pub risk_level: RiskLevel,
    /// Position of the decision rule that fired
    pub rule_index: usize,
}
