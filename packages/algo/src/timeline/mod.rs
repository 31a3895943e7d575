//! Timeline Predictor
//!
//! Expected hours for a student to master a problem. The deterministic part
//! grows with the gap between problem difficulty and student skill and is
//! scaled by complexity and statement length. A bounded multiplicative jitter
//! drawn from the injected generator models realistic variance, so repeated
//! calls with identical inputs are not guaranteed to agree.

use rand::Rng;

use crate::sanitize::clamp_f64;
use crate::types::{
    LearningPace, TimelineFactors, TimelineInputs, TimelineResult, STUDY_HOURS_PER_DAY,
    TIMELINE_HOURS_MAX, TIMELINE_HOURS_MIN,
};

const BASE_HOURS: f64 = 0.5;
const HOURS_PER_DIFFICULTY_GAP: f64 = 8.0;
const COMPLEXITY_WEIGHT: f64 = 0.5;
const LENGTH_WEIGHT: f64 = 0.3;
const LENGTH_SCALE: f64 = 2000.0;

/// Lower end of the jitter multiplier
pub const JITTER_MIN: f64 = 0.8;
/// Width of the jitter interval, the upper end is `JITTER_MIN + JITTER_SPAN`
pub const JITTER_SPAN: f64 = 0.4;

impl TimelineFactors {
    /// Deterministic hours before jitter and clamping
    pub fn raw_hours(&self) -> f64 {
        (BASE_HOURS + self.skill_gap_hours) * self.complexity_multiplier * self.length_multiplier
    }
}

/// 抖动系数，均匀分布于 [0.8, 1.2)
pub fn sample_jitter<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    let u: f64 = rng.gen();
    JITTER_MIN + u * JITTER_SPAN
}

#[derive(Clone, Copy, Debug, Default)]
pub struct TimelinePredictor;

impl TimelinePredictor {
    pub fn new() -> Self {
        Self
    }

    pub fn factors(&self, inputs: &TimelineInputs) -> TimelineFactors {
        let i = inputs.sanitized();
        let difficulty_gap = (i.problem_difficulty - i.student_skill).max(0.0);

        TimelineFactors {
            skill_gap_hours: difficulty_gap * HOURS_PER_DIFFICULTY_GAP,
            complexity_multiplier: 1.0 + i.problem_complexity * COMPLEXITY_WEIGHT,
            length_multiplier: 1.0 + (i.problem_length as f64 / LENGTH_SCALE) * LENGTH_WEIGHT,
        }
    }

    /// Un-jittered estimate, clamped like a prediction
    pub fn expected_hours(&self, inputs: &TimelineInputs) -> f64 {
        clamp_f64(
            self.factors(inputs).raw_hours(),
            TIMELINE_HOURS_MIN,
            TIMELINE_HOURS_MAX,
        )
    }

    pub fn predict<R: Rng + ?Sized>(&self, inputs: &TimelineInputs, rng: &mut R) -> TimelineResult {
        let factors = self.factors(inputs);
        let jitter = sample_jitter(rng);
        let hours = clamp_f64(
            factors.raw_hours() * jitter,
            TIMELINE_HOURS_MIN,
            TIMELINE_HOURS_MAX,
        );

        TimelineResult {
            hours,
            days: hours / STUDY_HOURS_PER_DAY,
            pace: LearningPace::from_hours(hours),
            factors,
            jitter,
        }
    }
}

pub fn predict_timeline<R: Rng + ?Sized>(inputs: &TimelineInputs, rng: &mut R) -> TimelineResult {
    TimelinePredictor.predict(inputs, rng)
}
