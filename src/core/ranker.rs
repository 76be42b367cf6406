//! Final ordering of spread candidates

use crate::core::spread::SpreadCandidate;

/// Number of spreads reported per scan unless configured otherwise
pub const DEFAULT_TOP_N: usize = 3;

/// Sort by risk/reward descending across all expiries and keep the first `top_n`
///
/// The sort is stable: candidates with equal risk/reward keep enumeration order.
pub fn rank_spreads(mut candidates: Vec<SpreadCandidate>, top_n: usize) -> Vec<SpreadCandidate> {
    candidates.sort_by(|a, b| b.risk_reward.total_cmp(&a.risk_reward));
    candidates.truncate(top_n);
    candidates
}
