use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::profile::models::{DrainKind, GeneratorKind, Profile, StrengthKind};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum IssueSeverity {
    /// Saving is refused.
    Blocking,
    /// Saved, but scoring will ignore or under-use the entry.
    Advisory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileIssue {
    pub field: String,
    pub message: String,
    pub severity: IssueSeverity,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileValidationResult {
    pub passed: bool,
    pub issues: Vec<ProfileIssue>,
}

/// Checks a profile for entries the quadrant calculator cannot use.
///
/// Enum values are already enforced by deserialization; this looks at names
/// and structure. Only a missing version blocks a save.
pub fn validate_profile(profile: &Profile) -> ProfileValidationResult {
    let mut issues = Vec::new();

    if profile.version.trim().is_empty() {
        issues.push(ProfileIssue {
            field: "version".to_string(),
            message: "Profile version is required; it is echoed into every energy synthesis"
                .to_string(),
            severity: IssueSeverity::Blocking,
        });
    }

    for name in profile.energy_drains.keys() {
        if DrainKind::from_name(name) == DrainKind::Contextual {
            issues.push(advisory(
                format!("energy_drains.{name}"),
                format!(
                    "Drain '{name}' is contextual: it never matches a task shape and will not affect scoring"
                ),
            ));
        }
    }

    for name in profile.energy_generators.keys() {
        if GeneratorKind::from_name(name) == GeneratorKind::Unmatched {
            issues.push(advisory(
                format!("energy_generators.{name}"),
                format!("Generator '{name}' has no matching rule and will not affect scoring"),
            ));
        }
    }

    let mut seen = HashSet::new();
    for (i, strength) in profile.core_strengths.iter().enumerate() {
        let key = strength.name.trim().to_lowercase();
        if !seen.insert(key) {
            issues.push(advisory(
                format!("core_strengths[{i}]"),
                format!(
                    "Core strength '{}' is listed twice and will be counted twice",
                    strength.name
                ),
            ));
        }
        if strength.kind() == StrengthKind::Unmapped {
            issues.push(advisory(
                format!("core_strengths[{i}]"),
                format!(
                    "Core strength '{}' is not exercised by any task flag and will not affect scoring",
                    strength.name
                ),
            ));
        }
    }

    if !profile.growth_areas.is_empty() && !profile.has_energizing_growth_area() {
        issues.push(advisory(
            "growth_areas".to_string(),
            "No growth area is marked energizing, so learning-heavy tasks never earn growth credit"
                .to_string(),
        ));
    }

    let passed = !issues
        .iter()
        .any(|issue| issue.severity == IssueSeverity::Blocking);

    ProfileValidationResult { passed, issues }
}

fn advisory(field: String, message: String) -> ProfileIssue {
    ProfileIssue {
        field,
        message,
        severity: IssueSeverity::Advisory,
    }
}
