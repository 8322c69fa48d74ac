use serde::{Deserialize, Serialize};

use crate::flags::models::LearningLoad;
use crate::profile::models::{DrainSeverity, GeneratorStrength, StrengthLevel};

/// Weight tables and classification thresholds for quadrant scoring.
///
/// Passed explicitly into the calculator and aggregator. `Default` carries the
/// canonical values; only the two thresholds are tunable from config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub expert: i32,
    pub proficient: i32,
    pub learning: i32,
    pub learning_penalty_high: i32,
    pub learning_penalty_moderate: i32,
    /// Credit for learning an energizing growth area in a healthy context.
    pub growth_bonus: i32,
    /// good-at iff strength score >= this
    pub good_at_threshold: i32,

    pub severe_drain: i32,
    pub moderate_drain: i32,
    pub mild_drain: i32,
    pub core_need_generator: i32,
    pub strong_generator: i32,
    pub moderate_generator: i32,
    pub coherence_penalty: i32,
    /// energizing iff energy score > this
    pub energizing_threshold: i32,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            expert: 2,
            proficient: 1,
            learning: 0,
            learning_penalty_high: 2,
            learning_penalty_moderate: 1,
            growth_bonus: 1,
            good_at_threshold: 2,
            severe_drain: -3,
            moderate_drain: -2,
            mild_drain: -1,
            core_need_generator: 3,
            strong_generator: 2,
            moderate_generator: 1,
            coherence_penalty: 2,
            energizing_threshold: 0,
        }
    }
}

impl ScoringWeights {
    pub fn with_thresholds(good_at_threshold: i32, energizing_threshold: i32) -> Self {
        Self {
            good_at_threshold,
            energizing_threshold,
            ..Self::default()
        }
    }

    pub fn strength_weight(&self, level: StrengthLevel) -> i32 {
        match level {
            StrengthLevel::Expert => self.expert,
            StrengthLevel::Proficient => self.proficient,
            StrengthLevel::Learning => self.learning,
        }
    }

    /// Positive amount subtracted from the strength score.
    pub fn learning_penalty(&self, load: LearningLoad) -> i32 {
        match load {
            LearningLoad::High => self.learning_penalty_high,
            LearningLoad::Moderate => self.learning_penalty_moderate,
            LearningLoad::Low | LearningLoad::None => 0,
        }
    }

    pub fn drain_weight(&self, severity: DrainSeverity) -> i32 {
        match severity {
            DrainSeverity::Severe => self.severe_drain,
            DrainSeverity::Moderate => self.moderate_drain,
            DrainSeverity::Mild => self.mild_drain,
        }
    }

    pub fn generator_weight(&self, strength: GeneratorStrength) -> i32 {
        match strength {
            GeneratorStrength::CoreNeed => self.core_need_generator,
            GeneratorStrength::Strong => self.strong_generator,
            GeneratorStrength::Moderate => self.moderate_generator,
        }
    }
}
