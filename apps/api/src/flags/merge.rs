//! Merges newly extracted flags into an existing evaluation record.
//!
//! Duplicates are detected by exact text after normalisation (trim, case-fold,
//! whitespace collapse) within the same element and severity bucket.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::flags::models::{CompanyFlags, FlagSeverity, MountainElement};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeOutcome {
    pub flags_added: usize,
    pub duplicates_skipped: usize,
    pub missing_data_added: usize,
}

pub fn merge_flags(existing: &mut CompanyFlags, mut incoming: CompanyFlags) -> MergeOutcome {
    let mut outcome = MergeOutcome::default();

    for element in MountainElement::ALL {
        for severity in FlagSeverity::ALL {
            let new_flags = std::mem::take(incoming.bucket_mut(element, severity));
            if new_flags.is_empty() {
                continue;
            }
            let bucket = existing.bucket_mut(element, severity);
            let mut seen: HashSet<String> =
                bucket.iter().map(|f| normalize_text(&f.text)).collect();
            for flag in new_flags {
                if seen.insert(normalize_text(&flag.text)) {
                    bucket.push(flag);
                    outcome.flags_added += 1;
                } else {
                    outcome.duplicates_skipped += 1;
                }
            }
        }
    }

    let mut known: HashSet<String> = existing
        .missing_critical_data
        .iter()
        .map(|item| normalize_text(item))
        .collect();
    for item in incoming.missing_critical_data {
        if known.insert(normalize_text(&item)) {
            existing.missing_critical_data.push(item);
            outcome.missing_data_added += 1;
        }
    }

    if existing.role.is_none() {
        existing.role = incoming.role;
    }
    existing.evaluation_date = existing.evaluation_date.max(incoming.evaluation_date);

    outcome
}

fn normalize_text(text: &str) -> String {
    text.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}
