//! Input Sanitization
//!
//! Saturating clamps that keep every estimator input inside its valid range.
//!
//! Functions:
//! - Generic and float-aware clamps
//! - Per-record sanitization for the three input records
//!
//! Out-of-range input is never an error here, it is silently normalized.

use crate::types::{
    Bounds, CodeFeatureVector, MistakeInputs, TimelineInputs, COMPLEXITY_SCORE_BOUNDS,
    CONDITIONALS_BOUNDS, FUNCTION_COUNT_BOUNDS, LINE_COUNT_BOUNDS, LOOPS_BOUNDS,
    NESTING_DEPTH_BOUNDS, PROBLEM_COMPLEXITY_BOUNDS, PROBLEM_DIFFICULTY_BOUNDS,
    PROBLEM_LENGTH_BOUNDS, PROBLEM_TEXT_LENGTH_BOUNDS, STUDENT_SKILL_BOUNDS,
    TEST_CASE_COUNT_BOUNDS,
};

/// 将值限制在 [lo, hi] 区间内: `max(lo, min(hi, value))`
pub fn clamp<T: PartialOrd>(value: T, lo: T, hi: T) -> T {
    if value > hi {
        hi
    } else if value < lo {
        lo
    } else {
        value
    }
}

/// 浮点版本，NaN 视为上界 (与 `max(lo, min(hi, NaN))` 一致)
pub fn clamp_f64(value: f64, lo: f64, hi: f64) -> f64 {
    if value.is_nan() {
        return hi;
    }
    clamp(value, lo, hi)
}

impl Bounds<i64> {
    pub fn apply(&self, value: i64) -> i64 {
        clamp(value, self.lo, self.hi)
    }

    pub fn contains(&self, value: i64) -> bool {
        value >= self.lo && value <= self.hi
    }
}

impl Bounds<f64> {
    pub fn apply(&self, value: f64) -> f64 {
        clamp_f64(value, self.lo, self.hi)
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.lo && value <= self.hi
    }
}

impl CodeFeatureVector {
    /// 返回所有字段都已限制在有效范围内的副本
    pub fn sanitized(&self) -> Self {
        Self {
            loops: LOOPS_BOUNDS.apply(self.loops),
            conditionals: CONDITIONALS_BOUNDS.apply(self.conditionals),
            max_nesting_depth: NESTING_DEPTH_BOUNDS.apply(self.max_nesting_depth),
            function_count: FUNCTION_COUNT_BOUNDS.apply(self.function_count),
            line_count: LINE_COUNT_BOUNDS.apply(self.line_count),
            complexity_score: COMPLEXITY_SCORE_BOUNDS.apply(self.complexity_score),
            problem_text_length: PROBLEM_TEXT_LENGTH_BOUNDS.apply(self.problem_text_length),
            test_case_count: TEST_CASE_COUNT_BOUNDS.apply(self.test_case_count),
        }
    }
}

impl TimelineInputs {
    pub fn sanitized(&self) -> Self {
        Self {
            student_skill: STUDENT_SKILL_BOUNDS.apply(self.student_skill),
            problem_difficulty: PROBLEM_DIFFICULTY_BOUNDS.apply(self.problem_difficulty),
            problem_complexity: PROBLEM_COMPLEXITY_BOUNDS.apply(self.problem_complexity),
            problem_length: PROBLEM_LENGTH_BOUNDS.apply(self.problem_length),
        }
    }
}

impl MistakeInputs {
    pub fn sanitized(&self) -> Self {
        Self {
            loops: LOOPS_BOUNDS.apply(self.loops),
            conditionals: CONDITIONALS_BOUNDS.apply(self.conditionals),
            max_nesting_depth: NESTING_DEPTH_BOUNDS.apply(self.max_nesting_depth),
            line_count: LINE_COUNT_BOUNDS.apply(self.line_count),
            complexity_score: COMPLEXITY_SCORE_BOUNDS.apply(self.complexity_score),
            has_recursion: self.has_recursion,
            function_count: FUNCTION_COUNT_BOUNDS.apply(self.function_count),
            problem_difficulty: PROBLEM_DIFFICULTY_BOUNDS.apply(self.problem_difficulty),
        }
    }
}
