use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::flags::time_estimate::TimeEstimate;

// ────────────────────────────────────────────────────────────────────────────
// Task characteristics
// ────────────────────────────────────────────────────────────────────────────

/// Three-step scale shared by most task axes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    Low,
    Moderate,
    High,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DecisionSpeed {
    Slow,
    Moderate,
    Fast,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LearningLoad {
    None,
    Low,
    Moderate,
    High,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CollaborationType {
    Solo,
    Paired,
    Team,
    CrossFunctional,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TimezoneSpread {
    Narrow,
    Moderate,
    Wide,
}

/// The shape of one unit of hypothetical work. Together with the profile this
/// is the only input to quadrant scoring.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TaskCharacteristics {
    pub conflict_exposure: Level,
    pub alignment_clarity: Level,
    pub authority_ambiguity: Level,
    pub progress_visibility: Level,
    pub autonomy_level: Level,
    pub decision_speed: DecisionSpeed,
    pub learning_required: LearningLoad,
    #[serde(default)]
    pub uses_systems_thinking: bool,
    #[serde(default)]
    pub uses_tool_building: bool,
    #[serde(default)]
    pub uses_glue_work: bool,
    #[serde(default)]
    pub uses_infrastructure_automation: bool,
    #[serde(default)]
    pub uses_decision_frameworks: bool,
    pub collaboration_type: CollaborationType,
    pub meeting_intensity: Level,
    #[serde(default)]
    pub requires_sync_communication: bool,
    pub timezone_spread: TimezoneSpread,
}

// ────────────────────────────────────────────────────────────────────────────
// Quadrant
// ────────────────────────────────────────────────────────────────────────────

/// Cross of (good-at vs not) × (energizing vs draining).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Quadrant {
    Mutual,
    Sparingly,
    HelpMentoring,
    Burnout,
}

impl Quadrant {
    pub fn from_fit(good_at: bool, energizing: bool) -> Self {
        match (good_at, energizing) {
            (true, true) => Quadrant::Mutual,
            (true, false) => Quadrant::Sparingly,
            (false, true) => Quadrant::HelpMentoring,
            (false, false) => Quadrant::Burnout,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Flags
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TaskImplication {
    pub task: String,
    #[serde(default)]
    pub time_estimate_pct: TimeEstimate,
    /// Absent when the extraction step could not characterise the task.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub characteristics: Option<TaskCharacteristics>,
    /// Written by the save pipeline. Any authored value is overwritten.
    #[serde(default)]
    pub energy_matrix_quadrant: Option<Quadrant>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Flag {
    pub text: String,
    #[serde(default)]
    pub impact: String,
    #[serde(default)]
    pub confidence: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub task_implications: Vec<TaskImplication>,
}

/// The five evaluation categories flags are grouped under.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MountainElement {
    /// Market and financial context.
    MountainRange,
    /// Strategic and technical alignment.
    ChosenPeak,
    /// Leadership and team trust.
    RopeTeamConfidence,
    /// Day-to-day work reality.
    DailyClimb,
    /// Career-narrative value.
    StoryWorthTelling,
}

impl MountainElement {
    pub const ALL: [MountainElement; 5] = [
        MountainElement::MountainRange,
        MountainElement::ChosenPeak,
        MountainElement::RopeTeamConfidence,
        MountainElement::DailyClimb,
        MountainElement::StoryWorthTelling,
    ];
}

/// Severity bucket: the first two are green, the last two red.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum FlagSeverity {
    CriticalMatch,
    StrongPositive,
    Dealbreaker,
    Concerning,
}

impl FlagSeverity {
    pub const ALL: [FlagSeverity; 4] = [
        FlagSeverity::CriticalMatch,
        FlagSeverity::StrongPositive,
        FlagSeverity::Dealbreaker,
        FlagSeverity::Concerning,
    ];

}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GreenBuckets {
    #[serde(default)]
    pub critical_matches: Vec<Flag>,
    #[serde(default)]
    pub strong_positives: Vec<Flag>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RedBuckets {
    #[serde(default)]
    pub dealbreakers: Vec<Flag>,
    #[serde(default)]
    pub concerning: Vec<Flag>,
}

/// One value per mountain element, laid out as named fields so the document
/// shape is fixed.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ByElement<T> {
    #[serde(default)]
    pub mountain_range: T,
    #[serde(default)]
    pub chosen_peak: T,
    #[serde(default)]
    pub rope_team_confidence: T,
    #[serde(default)]
    pub daily_climb: T,
    #[serde(default)]
    pub story_worth_telling: T,
}

impl<T> ByElement<T> {
    pub fn get(&self, element: MountainElement) -> &T {
        match element {
            MountainElement::MountainRange => &self.mountain_range,
            MountainElement::ChosenPeak => &self.chosen_peak,
            MountainElement::RopeTeamConfidence => &self.rope_team_confidence,
            MountainElement::DailyClimb => &self.daily_climb,
            MountainElement::StoryWorthTelling => &self.story_worth_telling,
        }
    }

    pub fn get_mut(&mut self, element: MountainElement) -> &mut T {
        match element {
            MountainElement::MountainRange => &mut self.mountain_range,
            MountainElement::ChosenPeak => &mut self.chosen_peak,
            MountainElement::RopeTeamConfidence => &mut self.rope_team_confidence,
            MountainElement::DailyClimb => &mut self.daily_climb,
            MountainElement::StoryWorthTelling => &mut self.story_worth_telling,
        }
    }
}

/// The full per-company evaluation record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompanyFlags {
    pub company: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub evaluation_date: Option<NaiveDate>,
    #[serde(default)]
    pub green_flags: ByElement<GreenBuckets>,
    #[serde(default)]
    pub red_flags: ByElement<RedBuckets>,
    #[serde(default)]
    pub missing_critical_data: Vec<String>,
    /// Free-form synthesis. `energy_matrix_analysis` inside it is regenerated
    /// on every save.
    #[serde(default)]
    pub synthesis: Map<String, Value>,
}

impl CompanyFlags {
    pub fn new(company: impl Into<String>) -> Self {
        Self {
            company: company.into(),
            role: None,
            evaluation_date: None,
            green_flags: ByElement::default(),
            red_flags: ByElement::default(),
            missing_critical_data: Vec::new(),
            synthesis: Map::new(),
        }
    }

    pub fn bucket(&self, element: MountainElement, severity: FlagSeverity) -> &Vec<Flag> {
        match severity {
            FlagSeverity::CriticalMatch => &self.green_flags.get(element).critical_matches,
            FlagSeverity::StrongPositive => &self.green_flags.get(element).strong_positives,
            FlagSeverity::Dealbreaker => &self.red_flags.get(element).dealbreakers,
            FlagSeverity::Concerning => &self.red_flags.get(element).concerning,
        }
    }

    pub fn bucket_mut(&mut self, element: MountainElement, severity: FlagSeverity) -> &mut Vec<Flag> {
        match severity {
            FlagSeverity::CriticalMatch => &mut self.green_flags.get_mut(element).critical_matches,
            FlagSeverity::StrongPositive => {
                &mut self.green_flags.get_mut(element).strong_positives
            }
            FlagSeverity::Dealbreaker => &mut self.red_flags.get_mut(element).dealbreakers,
            FlagSeverity::Concerning => &mut self.red_flags.get_mut(element).concerning,
        }
    }

    /// Every flag across all elements and severity buckets, in fixed order.
    pub fn flags(&self) -> impl Iterator<Item = &Flag> + '_ {
        MountainElement::ALL.into_iter().flat_map(move |element| {
            FlagSeverity::ALL
                .into_iter()
                .flat_map(move |severity| self.bucket(element, severity).iter())
        })
    }

    pub fn task_implications(&self) -> impl Iterator<Item = &TaskImplication> + '_ {
        self.flags().flat_map(|flag| flag.task_implications.iter())
    }

    pub fn for_each_task_mut(&mut self, mut f: impl FnMut(&mut TaskImplication)) {
        for element in MountainElement::ALL {
            for severity in FlagSeverity::ALL {
                for flag in self.bucket_mut(element, severity) {
                    flag.task_implications.iter_mut().for_each(&mut f);
                }
            }
        }
    }
}
