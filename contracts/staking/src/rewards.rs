/// Basis-point denominator: a tier rate of 10 000 bps pays 100 % of the
/// staked amount per reward period.
pub const BPS_DENOMINATOR: i128 = 10_000;

/// Length of one reward period in seconds (30 days).
///
/// Tier rates are quoted per period but accrue every second, so a position
/// earns `rate_bps / BPS_DENOMINATOR / REWARD_PERIOD_SECS` of its stake per
/// second.
pub const REWARD_PERIOD_SECS: u64 = 2_592_000;

/// Default tier table: 10 %, 12.5 % and 16.67 % per reward period.
pub const DEFAULT_TIER_RATES_BPS: [u32; 3] = [1_000, 1_250, 1_667];

/// Upper bound accepted for a single tier rate (1 000 % per period).
pub const MAX_TIER_RATE_BPS: u32 = 100_000;

// ── Core reward engine ──────────────────────────────────────────────────────

/// Rewards earned by `staked` tokens at `rate_bps` over `elapsed` seconds.
///
/// ```text
/// reward = staked × rate_bps × elapsed / (BPS_DENOMINATOR × REWARD_PERIOD_SECS)
/// ```
///
/// The division truncates toward zero, so a position never earns more than
/// its exact pro-rata share. `staked` is split into whole multiples of the
/// denominator and a remainder before multiplying, which keeps the exact
/// result for any stake whose reward itself fits in `i128`. Only rewards
/// beyond that range saturate.
#[allow(clippy::arithmetic_side_effects)]
pub fn accrued(staked: i128, rate_bps: u32, elapsed: u64) -> i128 {
    if staked <= 0 || rate_bps == 0 || elapsed == 0 {
        return 0;
    }

    let denominator = BPS_DENOMINATOR * REWARD_PERIOD_SECS as i128;
    // u32 × u64 always fits in i128.
    let rate_time = (rate_bps as i128) * (elapsed as i128);

    let whole = (staked / denominator).saturating_mul(rate_time);
    let part = (staked % denominator).saturating_mul(rate_time) / denominator;

    whole.saturating_add(part)
}

/// Total rewards owed to a position: the settled balance plus the live
/// window that started at `accrual_start`.
///
/// A `now` earlier than `accrual_start` counts as zero elapsed time.
pub fn owed(staked: i128, rate_bps: u32, accrual_start: u64, now: u64, unclaimed: i128) -> i128 {
    let elapsed = now.saturating_sub(accrual_start);
    unclaimed.saturating_add(accrued(staked, rate_bps, elapsed))
}

// ── Unit tests ──────────────────────────────────────────────────────────────
// Pure math, no Soroban environment.
