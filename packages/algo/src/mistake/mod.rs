//! Mistake Classifier
//!
//! Ordered decision table over code structure and problem difficulty. Rules
//! are evaluated in priority order and the first match wins; later rules are
//! never consulted, so the chance rule only draws from the generator when no
//! structural rule fired.
//!
//! | # | Condition | Category | Confidence |
//! |---|-----------|----------|------------|
//! | 0 | complexity > 0.8 | optimization_needed | 0.85 |
//! | 1 | nesting > 6 | complexity_issue | 0.80 |
//! | 2 | conditionals < 1 and difficulty > 0.6 | edge_case_missed | 0.75 |
//! | 3 | lines < 10 and difficulty > 0.4 | logic_error | 0.70 |
//! | 4 | 10% chance | syntax_error | 0.65 |
//! | 5 | always | no_error | 0.90 |

use std::collections::BTreeMap;
use std::fmt;

use rand::Rng;

use crate::types::{MistakeCategory, MistakeInputs, MistakeResult, RiskLevel};

/// Starting weight of every category before the winner is overwritten
pub const BASELINE_WEIGHT: f64 = 0.1;

/// Probability of the residual syntax error rule
pub const SYNTAX_ERROR_CHANCE: f64 = 0.1;

#[derive(Clone, Copy)]
pub enum RuleCondition {
    /// Pure predicate over the clamped inputs
    Deterministic(fn(&MistakeInputs) -> bool),
    /// Fires when a uniform draw falls below the probability
    Chance(f64),
    Always,
}

impl RuleCondition {
    pub fn holds<R: Rng + ?Sized>(&self, inputs: &MistakeInputs, rng: &mut R) -> bool {
        match self {
            Self::Deterministic(predicate) => predicate(inputs),
            Self::Chance(probability) => {
                let u: f64 = rng.gen();
                u < *probability
            }
            Self::Always => true,
        }
    }
}

impl fmt::Debug for RuleCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Deterministic(_) => f.write_str("Deterministic"),
            Self::Chance(p) => f.debug_tuple("Chance").field(p).finish(),
            Self::Always => f.write_str("Always"),
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct MistakeRule {
    pub condition: RuleCondition,
    pub category: MistakeCategory,
    pub confidence: f64,
}

fn needs_optimization(i: &MistakeInputs) -> bool {
    i.complexity_score > 0.8
}

fn too_deeply_nested(i: &MistakeInputs) -> bool {
    i.max_nesting_depth > 6
}

fn missing_branches(i: &MistakeInputs) -> bool {
    i.conditionals < 1 && i.problem_difficulty > 0.6
}

fn too_short(i: &MistakeInputs) -> bool {
    i.line_count < 10 && i.problem_difficulty > 0.4
}

/// 按优先级排列，最后一条必须是 Always
pub const MISTAKE_RULES: [MistakeRule; 6] = [
    MistakeRule {
        condition: RuleCondition::Deterministic(needs_optimization),
        category: MistakeCategory::OptimizationNeeded,
        confidence: 0.85,
    },
    MistakeRule {
        condition: RuleCondition::Deterministic(too_deeply_nested),
        category: MistakeCategory::ComplexityIssue,
        confidence: 0.80,
    },
    MistakeRule {
        condition: RuleCondition::Deterministic(missing_branches),
        category: MistakeCategory::EdgeCaseMissed,
        confidence: 0.75,
    },
    MistakeRule {
        condition: RuleCondition::Deterministic(too_short),
        category: MistakeCategory::LogicError,
        confidence: 0.70,
    },
    MistakeRule {
        condition: RuleCondition::Chance(SYNTAX_ERROR_CHANCE),
        category: MistakeCategory::SyntaxError,
        confidence: 0.65,
    },
    MistakeRule {
        condition: RuleCondition::Always,
        category: MistakeCategory::NoError,
        confidence: 0.90,
    },
];

/// Baseline weight for every category, the winner's confidence in its own
/// slot, renormalized to sum to 1.0.
pub fn probability_distribution(
    winner: MistakeCategory,
    confidence: f64,
) -> BTreeMap<MistakeCategory, f64> {
    let mut weights: BTreeMap<MistakeCategory, f64> = MistakeCategory::ALL
        .iter()
        .map(|&category| (category, BASELINE_WEIGHT))
        .collect();
    weights.insert(winner, confidence);

    let total: f64 = weights.values().sum();
    for weight in weights.values_mut() {
        *weight /= total;
    }
    weights
}

#[derive(Clone, Copy, Debug, Default)]
pub struct MistakeClassifier;

impl MistakeClassifier {
    pub fn new() -> Self {
        Self
    }

    pub fn rules(&self) -> &'static [MistakeRule] {
        &MISTAKE_RULES
    }

    /// Index of the first rule whose condition holds for the clamped inputs
    pub fn select_rule<R: Rng + ?Sized>(&self, inputs: &MistakeInputs, rng: &mut R) -> usize {
        let inputs = inputs.sanitized();
        let fallback = MISTAKE_RULES.len() - 1;

        MISTAKE_RULES
            .iter()
            .position(|rule| rule.condition.holds(&inputs, &mut *rng))
            .unwrap_or(fallback)
    }

    pub fn classify<R: Rng + ?Sized>(&self, inputs: &MistakeInputs, rng: &mut R) -> MistakeResult {
        let rule_index = self.select_rule(inputs, rng);
        let rule = &MISTAKE_RULES[rule_index];

        MistakeResult {
            predicted_category: rule.category,
            confidence: rule.confidence,
            probability_distribution: probability_distribution(rule.category, rule.confidence),
            risk_level: RiskLevel::from_confidence(rule.confidence),
            rule_index,
        }
    }
}

pub fn classify_mistake<R: Rng + ?Sized>(inputs: &MistakeInputs, rng: &mut R) -> MistakeResult {
    MistakeClassifier.classify(inputs, rng)
}
