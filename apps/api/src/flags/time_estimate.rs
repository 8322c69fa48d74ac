//! Time estimates for task implications.
//!
//! Authors write these loosely ("30%", "20-30%", "~15 percent"), so parsing is
//! tolerant: every run of digits is an integer, one integer is the estimate,
//! two form a range whose truncated midpoint is the estimate, and no digits at
//! all means 0%. Values that are not text or a whole number (null, fractions,
//! negatives) never fail: numbers keep their integer part, clamped at 0, and
//! anything else is read as text. Parsing happens once, at deserialization.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "RawTimeEstimate", into = "String")]
pub struct TimeEstimate {
    pub low: u32,
    pub high: u32,
    /// The text as authored, kept so re-saving does not rewrite it.
    label: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTimeEstimate {
    Text(String),
    Number(u32),
    Other(Value),
}

impl From<RawTimeEstimate> for TimeEstimate {
    fn from(raw: RawTimeEstimate) -> Self {
        match raw {
            RawTimeEstimate::Text(text) => TimeEstimate::parse(&text),
            RawTimeEstimate::Number(pct) => TimeEstimate::exact(pct),
            RawTimeEstimate::Other(Value::Null) => TimeEstimate::default(),
            RawTimeEstimate::Other(Value::Number(n)) => {
                let pct = n.as_f64().unwrap_or(0.0).trunc().clamp(0.0, u32::MAX as f64);
                TimeEstimate::exact(pct as u32)
            }
            RawTimeEstimate::Other(other) => TimeEstimate::parse(&other.to_string()),
        }
    }
}

impl From<TimeEstimate> for String {
    fn from(estimate: TimeEstimate) -> Self {
        estimate.to_string()
    }
}

impl TimeEstimate {
    pub fn parse(text: &str) -> Self {
        let numbers = extract_integers(text);
        let (low, high) = match numbers.as_slice() {
            [] => (0, 0),
            [only] => (*only, *only),
            [a, b, ..] => ((*a).min(*b), (*a).max(*b)),
        };
        Self {
            low,
            high,
            label: text.trim().to_string(),
        }
    }

    pub fn exact(pct: u32) -> Self {
        Self {
            low: pct,
            high: pct,
            label: format!("{pct}%"),
        }
    }

    /// The share of working time this task is expected to take, in whole percent.
    pub fn percentage(&self) -> u32 {
        // u64 so that two large values cannot overflow before halving
        ((self.low as u64 + self.high as u64) / 2) as u32
    }
}

impl fmt::Display for TimeEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.label.is_empty() {
            f.write_str(&self.label)
        } else if self.low == self.high {
            write!(f, "{}%", self.low)
        } else {
            write!(f, "{}-{}%", self.low, self.high)
        }
    }
}

fn extract_integers(text: &str) -> Vec<u32> {
    let mut numbers = Vec::new();
    let mut current: Option<u32> = None;
    for c in text.chars() {
        match c.to_digit(10) {
            Some(d) => {
                let acc = current.unwrap_or(0);
                current = Some(acc.saturating_mul(10).saturating_add(d));
            }
            None => {
                if let Some(n) = current.take() {
                    numbers.push(n);
                }
            }
        }
    }
    if let Some(n) = current {
        numbers.push(n);
    }
    numbers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_percentage() {
        assert_eq!(TimeEstimate::parse("30%").percentage(), 30);
    }

    #[test]
    fn test_range_uses_midpoint() {
        assert_eq!(TimeEstimate::parse("20-30%").percentage(), 25);
    }

    #[test]
    fn test_range_midpoint_truncates() {
        assert_eq!(TimeEstimate::parse("15-20%").percentage(), 17);
    }

    #[test]
    fn test_no_digits_is_zero() {
        let estimate = TimeEstimate::parse("most of the week");
        assert_eq!(estimate.percentage(), 0);
        assert_eq!(estimate.low, 0);
        assert_eq!(estimate.high, 0);
    }

    #[test]
    fn test_loose_wording_is_tolerated() {
        assert_eq!(TimeEstimate::parse("~ 10 to 20 percent").percentage(), 15);
        assert_eq!(TimeEstimate::parse("roughly 40%/week").percentage(), 40);
    }

    #[test]
    fn test_reversed_range_is_normalized() {
        let estimate = TimeEstimate::parse("30-20%");
        assert_eq!((estimate.low, estimate.high), (20, 30));
        assert_eq!(estimate.percentage(), 25);
    }

    #[test]
    fn test_extra_numbers_after_range_are_ignored() {
        assert_eq!(TimeEstimate::parse("20-30% (was 50%)").percentage(), 25);
    }

    #[test]
    fn test_deserialize_from_string_and_number() {
        let from_text: TimeEstimate = serde_json::from_str(r#""20-30%""#).unwrap();
        assert_eq!(from_text.percentage(), 25);
        let from_number: TimeEstimate = serde_json::from_str("35").unwrap();
        assert_eq!(from_number.percentage(), 35);
    }

    #[test]
    fn test_deserialize_unreadable_values_as_whole_percent() {
        let parse = |raw: &str| serde_json::from_str::<TimeEstimate>(raw).unwrap().percentage();
        assert_eq!(parse("null"), 0);
        assert_eq!(parse("12.5"), 12);
        assert_eq!(parse("-5"), 0);
        assert_eq!(parse("true"), 0);
        assert_eq!(parse(r#"{"low": 10}"#), 10);
    }

    #[test]
    fn test_serialize_keeps_authored_label() {
        let estimate: TimeEstimate = serde_json::from_str(r#""about 20-30%""#).unwrap();
        assert_eq!(serde_json::to_string(&estimate).unwrap(), r#""about 20-30%""#);
    }

    #[test]
    fn test_constructed_labels() {
        assert_eq!(TimeEstimate::exact(30).to_string(), "30%");
        assert_eq!(TimeEstimate::default().to_string(), "0%");
    }
}
