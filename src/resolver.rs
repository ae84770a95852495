use crate::types::{DrawResult, HitCount, PrizeTier};
use serde::Serialize;
use tracing::debug;

fn matches(tier: &PrizeTier, hit_count: HitCount) -> bool {
    let description = tier.description.as_deref().unwrap_or("").to_lowercase();
    description.contains(&hit_count.phrase()) || tier.range_code == Some(hit_count.range_code())
}

/// Finds the tier paying out for `hit_count`.
///
/// A tier matches when its description mentions "{n} acertos" or, failing
/// that, when its range code is `7 - n`. Tiers are scanned in order and the
/// first match is returned.
pub fn resolve_tier(tiers: &[PrizeTier], hit_count: HitCount) -> Option<&PrizeTier> {
    let found = tiers.iter().find(|tier| matches(tier, hit_count));
    if found.is_none() {
        debug!(%hit_count, tiers = tiers.len(), "no prize tier matched");
    }
    found
}

/// Display values for one hit-count. A missing tier reads as zero winners.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TierStats {
    pub hit_count: HitCount,
    pub winner_count: u64,
    pub prize_amount: f64,
    pub tier_found: bool,
}

impl TierStats {
    pub fn from_tier(hit_count: HitCount, tier: Option<&PrizeTier>) -> Self {
        Self {
            hit_count,
            winner_count: tier.and_then(|t| t.winner_count).unwrap_or(0),
            prize_amount: tier.and_then(|t| t.prize_amount).unwrap_or(0.0),
            tier_found: tier.is_some(),
        }
    }

    pub fn has_winners(&self) -> bool {
        self.winner_count > 0
    }
}

/// Stats for 6, 5 and 4 hits, in that order.
pub fn tier_stats(result: &DrawResult) -> Vec<TierStats> {
    HitCount::ALL
        .iter()
        .map(|&hit_count| {
            TierStats::from_tier(hit_count, resolve_tier(&result.prize_tiers, hit_count))
        })
        .collect()
}
