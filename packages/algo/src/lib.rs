//! # mentor-algo - 编程练习评估核心算法库
//!
//! Three independent estimators over fixed-shape feature records:
//!
//! - **Difficulty Estimator** - weighted code-structure sum, score in [0.1, 0.9]
//! - **Timeline Predictor** - expected mastery hours with bounded random jitter
//! - **Mistake Classifier** - ordered decision table over likely mistake categories
//!
//! ## 设计理念
//!
//! - **无状态** - every call is independent, no shared mutable state and no I/O
//! - **显式随机源** - randomized estimators take the generator as an argument
//! - **输入钳制** - out-of-range inputs are clamped, never rejected
//!
//! ## 模块结构
//!
//! - [`sanitize`] - 输入钳制 (clamp utility, per-record sanitization)
//! - [`difficulty`] - 难度估计
//! - [`timeline`] - 学习时长预测
//! - [`mistake`] - 错误类型分类
//! - [`rng`] - 可注入的随机源
//! - [`types`] - 公共类型和常量
//!
//! ## 使用示例
//!
//! ```rust
//! use mentor_algo::{estimate_difficulty, classify_mistake, CodeFeatureVector, MistakeInputs, RngSource};
//!
//! let features = CodeFeatureVector {
//!     loops: 2,
//!     conditionals: 3,
//!     max_nesting_depth: 2,
//!     function_count: 1,
//!     line_count: 25,
//!     complexity_score: 0.4,
//!     problem_text_length: 800,
//!     test_case_count: 4,
//! };
//! let difficulty = estimate_difficulty(&features);
//! assert!(difficulty.score >= 0.1 && difficulty.score <= 0.9);
//!
//! let mut rng = RngSource::Seeded(42).rng();
//! let mistake = classify_mistake(&MistakeInputs::default(), &mut rng);
//! let total: f64 = mistake.probability_distribution.values().sum();
//! assert!((total - 1.0).abs() < 1e-9);
//! ```

// ============================================================================
// 模块声明
// ============================================================================

pub mod difficulty;
pub mod mistake;
pub mod rng;
pub mod sanitize;
pub mod timeline;
pub mod types;

// ============================================================================
// 重新导出
// ============================================================================

/// 重新导出所有公共类型
pub use types::*;

/// 重新导出钳制工具
pub use sanitize::{clamp, clamp_f64};

/// 重新导出难度估计
pub use difficulty::{estimate_difficulty, DifficultyEstimator, DifficultyWeights};

/// 重新导出学习时长预测
pub use timeline::{predict_timeline, TimelinePredictor};

/// 重新导出错误分类
pub use mistake::{classify_mistake, MistakeClassifier, MistakeRule, RuleCondition};

/// 重新导出随机源
pub use rng::{EstimatorRng, RngSource};
