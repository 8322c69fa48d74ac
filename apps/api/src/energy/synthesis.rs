//! Synthesis Aggregator: rolls per-task quadrants up into a company-level
//! sustainability verdict.
//!
//! Percentages are summed as authored. They need not total 100 and overlapping
//! estimates are not corrected.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::energy::quadrant::calculate_quadrant;
use crate::energy::weights::ScoringWeights;
use crate::flags::models::{CompanyFlags, Quadrant, TaskImplication};
use crate::profile::models::Profile;

/// Key under `synthesis` owned by the aggregator.
pub const SYNTHESIS_KEY: &str = "energy_matrix_analysis";

/// Mutual time at or above this meets the green minimum.
pub const GREEN_MINIMUM_PCT: u32 = 60;
/// Burnout time above this exceeds the red maximum.
pub const RED_MAXIMUM_PCT: u32 = 20;
/// Sparingly + help_mentoring time above this exceeds the yellow maximum.
pub const YELLOW_MAXIMUM_PCT: u32 = 30;
/// Mutual time below this is LOW regardless of other buckets.
pub const MUTUAL_FLOOR_PCT: u32 = 40;
/// Sparingly + burnout time at or above this is reported as draining-dominated.
pub const DRAINING_DOMINANCE_PCT: u32 = 50;

// ────────────────────────────────────────────────────────────────────────────
// Output data models
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuadrantShare {
    pub percentage: u32,
    pub tasks_count: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyDistribution {
    pub mutual_green_flags: QuadrantShare,
    pub sparingly_yellow_flags: QuadrantShare,
    pub burnout_red_flags: QuadrantShare,
    pub help_mentoring_yellow_flags: QuadrantShare,
}

impl DailyDistribution {
    pub fn share(&self, quadrant: Quadrant) -> QuadrantShare {
        match quadrant {
            Quadrant::Mutual => self.mutual_green_flags,
            Quadrant::Sparingly => self.sparingly_yellow_flags,
            Quadrant::Burnout => self.burnout_red_flags,
            Quadrant::HelpMentoring => self.help_mentoring_yellow_flags,
        }
    }

    fn record(&mut self, quadrant: Quadrant, percentage: u32) {
        let share = match quadrant {
            Quadrant::Mutual => &mut self.mutual_green_flags,
            Quadrant::Sparingly => &mut self.sparingly_yellow_flags,
            Quadrant::Burnout => &mut self.burnout_red_flags,
            Quadrant::HelpMentoring => &mut self.help_mentoring_yellow_flags,
        };
        share.percentage = share.percentage.saturating_add(percentage);
        share.tasks_count += 1;
    }

    fn pct(&self, quadrant: Quadrant) -> u32 {
        self.share(quadrant).percentage
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThresholdAnalysis {
    pub meets_green_minimum: bool,
    pub exceeds_red_maximum: bool,
    pub exceeds_yellow_maximum: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Sustainability {
    High,
    Medium,
    Low,
}

impl Sustainability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sustainability::High => "HIGH",
            Sustainability::Medium => "MEDIUM",
            Sustainability::Low => "LOW",
        }
    }
}

/// The fragment stored at `synthesis.energy_matrix_analysis`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnergyMatrixAnalysis {
    pub profile_version_used: String,
    pub predicted_daily_distribution: DailyDistribution,
    pub threshold_analysis: ThresholdAnalysis,
    pub energy_sustainability: Sustainability,
    pub key_insights: Vec<String>,
    pub decision_factors: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Aggregation
// ────────────────────────────────────────────────────────────────────────────

/// Aggregates every task implication of a company into an energy verdict.
///
/// Tasks without a stored quadrant are classified inline. Tasks with neither a
/// quadrant nor characteristics cannot be placed and are left out.
pub fn generate_energy_synthesis(
    company: &CompanyFlags,
    profile: &Profile,
    weights: &ScoringWeights,
) -> EnergyMatrixAnalysis {
    let mut distribution = DailyDistribution::default();

    for task in company.task_implications() {
        if let Some(quadrant) = resolve_quadrant(task, profile, weights) {
            distribution.record(quadrant, task.time_estimate_pct.percentage());
        }
    }

    let threshold_analysis = evaluate_thresholds(&distribution);
    let energy_sustainability = rate_sustainability(&distribution, &threshold_analysis);
    let key_insights = build_key_insights(&distribution);
    let decision_factors = build_decision_factors(&distribution, &threshold_analysis);

    debug!(
        company = %company.company,
        mutual = distribution.pct(Quadrant::Mutual),
        burnout = distribution.pct(Quadrant::Burnout),
        rating = energy_sustainability.as_str(),
        "energy synthesis generated"
    );

    EnergyMatrixAnalysis {
        profile_version_used: profile.version.clone(),
        predicted_daily_distribution: distribution,
        threshold_analysis,
        energy_sustainability,
        key_insights,
        decision_factors,
    }
}

fn resolve_quadrant(
    task: &TaskImplication,
    profile: &Profile,
    weights: &ScoringWeights,
) -> Option<Quadrant> {
    match (task.energy_matrix_quadrant, &task.characteristics) {
        (Some(quadrant), _) => Some(quadrant),
        (None, Some(characteristics)) => {
            debug!(task = %task.task, "classifying unlabelled task during synthesis");
            Some(calculate_quadrant(characteristics, profile, weights))
        }
        (None, None) => {
            warn!(
                task = %task.task,
                "task implication has no quadrant and no characteristics; excluded from energy synthesis"
            );
            None
        }
    }
}

pub fn evaluate_thresholds(distribution: &DailyDistribution) -> ThresholdAnalysis {
    let mutual = distribution.pct(Quadrant::Mutual);
    let burnout = distribution.pct(Quadrant::Burnout);
    let yellow = distribution
        .pct(Quadrant::Sparingly)
        .saturating_add(distribution.pct(Quadrant::HelpMentoring));

    ThresholdAnalysis {
        meets_green_minimum: mutual >= GREEN_MINIMUM_PCT,
        exceeds_red_maximum: burnout > RED_MAXIMUM_PCT,
        exceeds_yellow_maximum: yellow > YELLOW_MAXIMUM_PCT,
    }
}

/// First match wins: red or a thin mutual share is LOW, a met green minimum is
/// HIGH unless yellow overflows, anything in between is MEDIUM.
pub fn rate_sustainability(
    distribution: &DailyDistribution,
    thresholds: &ThresholdAnalysis,
) -> Sustainability {
    if thresholds.exceeds_red_maximum || distribution.pct(Quadrant::Mutual) < MUTUAL_FLOOR_PCT {
        Sustainability::Low
    } else if thresholds.meets_green_minimum {
        if thresholds.exceeds_yellow_maximum {
            Sustainability::Medium
        } else {
            Sustainability::High
        }
    } else {
        Sustainability::Medium
    }
}

fn build_key_insights(distribution: &DailyDistribution) -> Vec<String> {
    let mutual = distribution.pct(Quadrant::Mutual);
    let burnout = distribution.pct(Quadrant::Burnout);
    let draining = distribution.pct(Quadrant::Sparingly).saturating_add(burnout);

    let mut insights = Vec::new();
    if draining >= DRAINING_DOMINANCE_PCT {
        insights.push(format!(
            "Draining quadrants dominate: sparingly and burnout work fill {draining}% of predicted time"
        ));
    }
    if burnout > RED_MAXIMUM_PCT {
        insights.push(format!(
            "Burnout quadrant exceeds threshold: {burnout}% predicted against a {RED_MAXIMUM_PCT}% maximum"
        ));
    }
    if mutual < GREEN_MINIMUM_PCT {
        insights.push(format!(
            "Insufficient mutual-quadrant time: {mutual}% predicted against a {GREEN_MINIMUM_PCT}% minimum"
        ));
    }
    insights
}

fn build_decision_factors(
    distribution: &DailyDistribution,
    thresholds: &ThresholdAnalysis,
) -> Vec<String> {
    let mut factors = Vec::new();
    if thresholds.exceeds_red_maximum {
        factors.push(format!(
            "REJECT: burnout work at {}% exceeds the {RED_MAXIMUM_PCT}% red maximum",
            distribution.pct(Quadrant::Burnout)
        ));
    }
    if !thresholds.meets_green_minimum {
        factors.push(format!(
            "RED: mutual work at {}% is below the {GREEN_MINIMUM_PCT}% green minimum",
            distribution.pct(Quadrant::Mutual)
        ));
    }
    factors
}
