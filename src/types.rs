use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

/// A date as it appeared in the payload, or an already-parsed calendar date.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DateValue {
    Text(String),
    Date(NaiveDate),
}

impl From<&str> for DateValue {
    fn from(value: &str) -> Self {
        DateValue::Text(value.to_string())
    }
}

impl From<NaiveDate> for DateValue {
    fn from(value: NaiveDate) -> Self {
        DateValue::Date(value)
    }
}

/// Canonical draw record. Every optional concept has exactly one field here,
/// whichever synonym the payload used.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawResult {
    pub contest_number: Option<i64>,
    pub draw_date: Option<DateValue>,
    pub winning_numbers: Vec<u32>,
    pub is_rolled_over: bool,
    pub draw_location_name: Option<String>,
    pub draw_location_region: Option<String>,
    pub next_contest_estimated_prize: Option<f64>,
    pub next_contest_accumulated_prize: Option<f64>,
    pub special_accumulated_prize: Option<f64>,
    pub zero_five_accumulated_prize: Option<f64>,
    pub total_collected: Option<f64>,
    pub zero_five_contest_number: Option<i64>,
    pub next_contest_date: Option<DateValue>,
    pub prize_tiers: Vec<PrizeTier>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrizeTier {
    pub description: Option<String>,
    pub range_code: Option<i64>,
    pub winner_count: Option<u64>,
    pub prize_amount: Option<f64>,
}

/// Number of drawn numbers a bet matched. Only the three prize-bearing
/// counts of the 6-number game exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum HitCount {
    Four,
    Five,
    Six,
}

impl HitCount {
    /// Top tier first, the order results are displayed in.
    pub const ALL: [HitCount; 3] = [HitCount::Six, HitCount::Five, HitCount::Four];

    pub fn value(self) -> i64 {
        match self {
            HitCount::Four => 4,
            HitCount::Five => 5,
            HitCount::Six => 6,
        }
    }

    /// Tier 1 is the 6-hit tier, tier 3 the 4-hit one.
    pub fn range_code(self) -> i64 {
        7 - self.value()
    }

    /// Phrase the upstream descriptions use, e.g. "5 acertos".
    pub fn phrase(self) -> String {
        format!("{} acertos", self.value())
    }
}

impl TryFrom<i64> for HitCount {
    type Error = anyhow::Error;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            4 => Ok(HitCount::Four),
            5 => Ok(HitCount::Five),
            6 => Ok(HitCount::Six),
            other => Err(anyhow::anyhow!(
                "Unsupported hit count {} (expected 4, 5 or 6)",
                other
            )),
        }
    }
}

impl fmt::Display for HitCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.phrase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_codes() {
        assert_eq!(HitCount::Six.range_code(), 1);
        assert_eq!(HitCount::Five.range_code(), 2);
        assert_eq!(HitCount::Four.range_code(), 3);
    }

    #[test]
    fn test_hit_count_try_from() {
        assert_eq!(HitCount::try_from(5).unwrap(), HitCount::Five);
        assert!(HitCount::try_from(3).is_err());
        assert!(HitCount::try_from(7).is_err());
    }

    #[test]
    fn test_draw_result_serializes_camel_case() {
        let result = DrawResult {
            contest_number: Some(2700),
            draw_date: Some(DateValue::from("2024-06-10")),
            ..Default::default()
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["contestNumber"], 2700);
        assert_eq!(json["drawDate"], "2024-06-10");
        assert_eq!(json["isRolledOver"], false);
        assert!(json["totalCollected"].is_null());
    }
}
