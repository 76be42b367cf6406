//! Human-readable scan reports (Telegram Markdown)

use crate::core::spread::SpreadCandidate;

/// Sent when a scan finds nothing worth reporting
pub const NO_RESULTS_MESSAGE: &str = "🤷 No good spreads found at the moment.";

/// Sent when a scan fails; details stay in the logs
pub const SCAN_FAILED_MESSAGE: &str = "⚠️ Scan failed, will retry on the next cycle.";

/// Format one block per spread, separated by a rule line
pub fn format_spread_report(spreads: &[SpreadCandidate]) -> String {
    if spreads.is_empty() {
        return NO_RESULTS_MESSAGE.to_string();
    }

    let separator = format!("\n\n{}\n\n", "─".repeat(20));
    spreads
        .iter()
        .map(format_spread_block)
        .collect::<Vec<_>>()
        .join(&separator)
}

fn format_spread_block(s: &SpreadCandidate) -> String {
    format!(
        "💎 *{base} Bull Call Spread*\n\
         📅 Expiry: {expiry}\n\
         \n\
         🔹 Buy: {buy} Call\n\
         🔸 Sell: {sell} Call\n\
         \n\
         💸 Cost: ${cost:.2}\n\
         🎯 Max Profit: ${max_profit:.2}\n\
         ⚖️ Risk/Reward: 1:{rr:.2}\n\
         📊 EV: ${ev:.2}\n\
         🚀 Potential ROI: {roi:.0}%\n\
         \n\
         🎲 Prob. Buy ITM: ~{prob_buy:.0}%\n\
         🏁 Prob. Max Profit: ~{prob_max:.0}%",
        base = s.base_asset,
        expiry = s.expiry,
        buy = s.buy_strike,
        sell = s.sell_strike,
        cost = s.cost,
        max_profit = s.max_profit,
        rr = s.risk_reward,
        ev = s.expected_value,
        roi = s.roi_pct(),
        prob_buy = s.prob_buy_itm * 100.0,
        prob_max = s.prob_max_profit * 100.0,
    )
}
