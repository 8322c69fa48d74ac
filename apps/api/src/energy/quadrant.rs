//! Quadrant Calculator: classifies one task into the energy matrix.
//!
//! Two orthogonal integer scores:
//! - strength score (skill fit): core strengths the task exercises, minus the
//!   learning load, plus a small growth credit. good-at iff ≥ threshold.
//! - energy score (energy fit): matched drains and generators from the
//!   profile, plus an ambient coherence penalty. energizing iff > threshold.
//!
//! The (good-at, energizing) pair selects the quadrant. Pure and deterministic.

use serde::{Deserialize, Serialize};

use crate::energy::weights::ScoringWeights;
use crate::flags::models::{
    CollaborationType, DecisionSpeed, LearningLoad, Level, Quadrant, TaskCharacteristics,
    TimezoneSpread,
};
use crate::profile::models::{DrainKind, DrainSeverity, GeneratorKind, Profile, StrengthKind};

/// Full scoring breakdown for one task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuadrantAssessment {
    pub strength_score: i32,
    pub energy_score: i32,
    pub good_at: bool,
    pub energizing: bool,
    pub quadrant: Quadrant,
}

pub fn calculate_quadrant(
    characteristics: &TaskCharacteristics,
    profile: &Profile,
    weights: &ScoringWeights,
) -> Quadrant {
    assess_task(characteristics, profile, weights).quadrant
}

pub fn assess_task(
    characteristics: &TaskCharacteristics,
    profile: &Profile,
    weights: &ScoringWeights,
) -> QuadrantAssessment {
    let strength_score = strength_score(characteristics, profile, weights);
    let energy_score = energy_score(characteristics, profile, weights);
    let good_at = strength_score >= weights.good_at_threshold;
    let energizing = energy_score > weights.energizing_threshold;

    QuadrantAssessment {
        strength_score,
        energy_score,
        good_at,
        energizing,
        quadrant: Quadrant::from_fit(good_at, energizing),
    }
}

fn strength_score(c: &TaskCharacteristics, profile: &Profile, weights: &ScoringWeights) -> i32 {
    let mut score: i32 = profile
        .core_strengths
        .iter()
        .filter(|s| exercises(c, s.kind()))
        .map(|s| weights.strength_weight(s.level))
        .sum();

    score -= weights.learning_penalty(c.learning_required);

    let learning_something = matches!(
        c.learning_required,
        LearningLoad::Moderate | LearningLoad::High
    );
    let healthy_context =
        c.progress_visibility == Level::High && c.conflict_exposure == Level::Low;
    if learning_something && healthy_context && profile.has_energizing_growth_area() {
        score += weights.growth_bonus;
    }

    score
}

fn energy_score(c: &TaskCharacteristics, profile: &Profile, weights: &ScoringWeights) -> i32 {
    let drains: i32 = profile
        .energy_drains
        .iter()
        .filter(|(name, _)| drain_matches(DrainKind::from_name(name), c))
        .map(|(_, drain)| weights.drain_weight(drain.severity))
        .sum();

    let generators: i32 = profile
        .energy_generators
        .iter()
        .filter(|(name, _)| generator_matches(GeneratorKind::from_name(name), c))
        .map(|(_, generator)| weights.generator_weight(generator.strength))
        .sum();

    let wide_and_synchronous =
        c.timezone_spread == TimezoneSpread::Wide && c.requires_sync_communication;
    let coherence: i32 = profile
        .organizational_coherence_needs
        .iter()
        .filter(|need| {
            need.is_uncertain_problem_space()
                && wide_and_synchronous
                && need.violation_impact == DrainSeverity::Severe
        })
        .map(|_| -weights.coherence_penalty)
        .sum();

    drains + generators + coherence
}

fn exercises(c: &TaskCharacteristics, kind: StrengthKind) -> bool {
    match kind {
        StrengthKind::SystemsThinking => c.uses_systems_thinking,
        StrengthKind::ToolBuilding => c.uses_tool_building,
        StrengthKind::GlueWork => c.uses_glue_work,
        StrengthKind::InfrastructureAutomation => c.uses_infrastructure_automation,
        StrengthKind::DecisionFrameworks => c.uses_decision_frameworks,
        StrengthKind::Unmapped => false,
    }
}

fn drain_matches(kind: DrainKind, c: &TaskCharacteristics) -> bool {
    match kind {
        DrainKind::Conflict => matches!(c.conflict_exposure, Level::High | Level::Moderate),
        DrainKind::Misalignment => c.alignment_clarity == Level::Low,
        DrainKind::AuthorityAmbiguity => {
            matches!(c.authority_ambiguity, Level::High | Level::Moderate)
        }
        DrainKind::Contextual => false,
    }
}

fn generator_matches(kind: GeneratorKind, c: &TaskCharacteristics) -> bool {
    match kind {
        GeneratorKind::VisibleProgress => c.progress_visibility == Level::High,
        GeneratorKind::AlignedCollaboration => {
            c.alignment_clarity == Level::High
                && matches!(
                    c.collaboration_type,
                    CollaborationType::Team | CollaborationType::Paired
                )
        }
        GeneratorKind::ToolBuilding => c.uses_tool_building,
        GeneratorKind::StructuredProcesses => {
            c.decision_speed == DecisionSpeed::Fast && c.autonomy_level == Level::High
        }
        GeneratorKind::Unmatched => false,
    }
}
