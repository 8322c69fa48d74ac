use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DrainSeverity {
    Severe,
    Moderate,
    Mild,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GeneratorStrength {
    CoreNeed,
    Strong,
    Moderate,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StrengthLevel {
    Expert,
    Proficient,
    Learning,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EnergyDrain {
    pub severity: DrainSeverity,
    #[serde(default)]
    pub trigger: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EnergyGenerator {
    pub strength: GeneratorStrength,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CoreStrength {
    pub name: String,
    pub level: StrengthLevel,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GrowthArea {
    pub name: String,
    #[serde(default)]
    pub current_level: String,
    #[serde(default)]
    pub energizing: bool,
    #[serde(default)]
    pub description: String,
}

/// An ambient organizational pattern the user needs to hold, e.g. a shared
/// understanding of an uncertain problem space.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CoherenceNeed {
    pub pattern: String,
    pub violation_impact: DrainSeverity,
    #[serde(default)]
    pub description: String,
}

impl CoherenceNeed {
    pub fn is_uncertain_problem_space(&self) -> bool {
        normalize_name(&self.pattern).contains("uncertain")
    }
}

/// The user-authored energy profile. Sole source of personalization for
/// quadrant scoring.
///
/// Maps are `BTreeMap` so that iteration (and therefore every derived score
/// and serialized document) is deterministic.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Profile {
    pub version: String,
    #[serde(default)]
    pub energy_drains: BTreeMap<String, EnergyDrain>,
    #[serde(default)]
    pub energy_generators: BTreeMap<String, EnergyGenerator>,
    #[serde(default)]
    pub core_strengths: Vec<CoreStrength>,
    #[serde(default)]
    pub growth_areas: Vec<GrowthArea>,
    #[serde(default)]
    pub organizational_coherence_needs: Vec<CoherenceNeed>,
}

impl Profile {
    pub fn has_energizing_growth_area(&self) -> bool {
        self.growth_areas.iter().any(|g| g.energizing)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Name → scoring rule mapping
// ────────────────────────────────────────────────────────────────────────────

/// Which task axis a named drain reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrainKind {
    Conflict,
    Misalignment,
    AuthorityAmbiguity,
    /// Financial or otherwise situational drains. Never matched by task shape.
    Contextual,
}

impl DrainKind {
    pub fn from_name(name: &str) -> Self {
        let name = normalize_name(name);
        if name.contains("conflict") {
            DrainKind::Conflict
        } else if name.contains("misalign") || name.contains("alignment") {
            DrainKind::Misalignment
        } else if name.contains("authority") {
            DrainKind::AuthorityAmbiguity
        } else {
            DrainKind::Contextual
        }
    }
}

/// Which task axes a named generator reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneratorKind {
    VisibleProgress,
    AlignedCollaboration,
    ToolBuilding,
    StructuredProcesses,
    Unmatched,
}

impl GeneratorKind {
    pub fn from_name(name: &str) -> Self {
        let name = normalize_name(name);
        if name.contains("progress") {
            GeneratorKind::VisibleProgress
        } else if name.contains("collaboration") {
            GeneratorKind::AlignedCollaboration
        } else if name.contains("tool") {
            GeneratorKind::ToolBuilding
        } else if name.contains("structure") {
            GeneratorKind::StructuredProcesses
        } else {
            GeneratorKind::Unmatched
        }
    }
}

/// Which `uses_*` task flag exercises a named core strength.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrengthKind {
    SystemsThinking,
    ToolBuilding,
    GlueWork,
    InfrastructureAutomation,
    DecisionFrameworks,
    Unmapped,
}

impl StrengthKind {
    pub fn from_name(name: &str) -> Self {
        let name = normalize_name(name);
        if name.contains("systems") {
            StrengthKind::SystemsThinking
        } else if name.contains("tool") {
            StrengthKind::ToolBuilding
        } else if name.contains("glue") {
            StrengthKind::GlueWork
        } else if name.contains("infrastructure") || name.contains("automation") {
            StrengthKind::InfrastructureAutomation
        } else if name.contains("decision") {
            StrengthKind::DecisionFrameworks
        } else {
            StrengthKind::Unmapped
        }
    }
}

impl CoreStrength {
    pub fn kind(&self) -> StrengthKind {
        StrengthKind::from_name(&self.name)
    }
}

/// Lowercases and folds spaces/hyphens to underscores: "Visible Progress" → "visible_progress".
fn normalize_name(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .chars()
        .map(|c| if c == ' ' || c == '-' { '_' } else { c })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_drain_kind_from_name() {
        assert_eq!(DrainKind::from_name("interpersonal_conflict"), DrainKind::Conflict);
        assert_eq!(DrainKind::from_name("Goal Misalignment"), DrainKind::Misalignment);
        assert_eq!(
            DrainKind::from_name("unclear-authority"),
            DrainKind::AuthorityAmbiguity
        );
        assert_eq!(DrainKind::from_name("financial_instability"), DrainKind::Contextual);
    }

    #[test]
    fn test_generator_kind_from_name() {
        assert_eq!(
            GeneratorKind::from_name("visible_progress"),
            GeneratorKind::VisibleProgress
        );
        assert_eq!(
            GeneratorKind::from_name("aligned_collaboration"),
            GeneratorKind::AlignedCollaboration
        );
        assert_eq!(GeneratorKind::from_name("tool_building"), GeneratorKind::ToolBuilding);
        assert_eq!(
            GeneratorKind::from_name("structured_processes"),
            GeneratorKind::StructuredProcesses
        );
        assert_eq!(GeneratorKind::from_name("free_snacks"), GeneratorKind::Unmatched);
    }

    #[test]
    fn test_strength_kind_from_name() {
        assert_eq!(StrengthKind::from_name("systems_thinking"), StrengthKind::SystemsThinking);
        assert_eq!(StrengthKind::from_name("Glue Work"), StrengthKind::GlueWork);
        assert_eq!(
            StrengthKind::from_name("infrastructure_automation"),
            StrengthKind::InfrastructureAutomation
        );
        assert_eq!(
            StrengthKind::from_name("decision_frameworks"),
            StrengthKind::DecisionFrameworks
        );
        assert_eq!(StrengthKind::from_name("public_speaking"), StrengthKind::Unmapped);
    }

    #[test]
    fn test_uncertain_problem_space_pattern() {
        let need = CoherenceNeed {
            pattern: "Uncertain Problem Space".to_string(),
            violation_impact: DrainSeverity::Severe,
            description: String::new(),
        };
        assert!(need.is_uncertain_problem_space());
    }

    #[test]
    fn test_profile_deserializes_with_defaults() {
        let profile: Profile = serde_json::from_value(json!({
            "version": "2.1",
            "energy_drains": {
                "interpersonal_conflict": {"severity": "severe", "trigger": "yelling"}
            },
            "core_strengths": [
                {"name": "systems_thinking", "level": "expert"}
            ]
        }))
        .unwrap();
        assert_eq!(profile.version, "2.1");
        assert_eq!(
            profile.energy_drains["interpersonal_conflict"].severity,
            DrainSeverity::Severe
        );
        assert!(profile.energy_generators.is_empty());
        assert!(!profile.has_energizing_growth_area());
    }

    #[test]
    fn test_unknown_severity_is_rejected() {
        let result: Result<Profile, _> = serde_json::from_value(json!({
            "version": "1",
            "energy_drains": {"conflict": {"severity": "catastrophic"}}
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_generator_strength_serde() {
        let s: GeneratorStrength = serde_json::from_str(r#""core_need""#).unwrap();
        assert_eq!(s, GeneratorStrength::CoreNeed);
    }
}
