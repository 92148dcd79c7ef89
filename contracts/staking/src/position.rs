use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

use crate::rewards;

// ── Storage keys ────────────────────────────────────────────────────────────

const POSITION: Symbol = symbol_short!("POS");

const TTL_THRESHOLD: u32 = 5_184_000;
const TTL_EXTEND_TO: u32 = 10_368_000;

// ── Types ───────────────────────────────────────────────────────────────────

/// A staker's deposit in one reward tier.
///
/// Rewards are not stored as a running total. The live window is
/// `[accrual_start, now)` at `rate_bps`; anything earned in earlier windows
/// was folded into `unclaimed` by [`StakePosition::settle`].
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct StakePosition {
    /// Staking-token base units held in custody for this position.
    pub staked: i128,
    /// Ledger timestamp at which the live accrual window began.
    pub accrual_start: u64,
    /// Tier rate captured when the live window began.
    pub rate_bps: u32,
    /// Rewards from closed windows that have not been paid out.
    pub unclaimed: i128,
}

impl StakePosition {
    /// Rewards owed at `now`, settled and live.
    pub fn rewards_at(&self, now: u64) -> i128 {
        rewards::owed(
            self.staked,
            self.rate_bps,
            self.accrual_start,
            now,
            self.unclaimed,
        )
    }

    /// Close the live window at `now` and open a new one at `rate_bps`.
    pub fn settle(&mut self, now: u64, rate_bps: u32) {
        self.unclaimed = self.rewards_at(now);
        self.accrual_start = now;
        self.rate_bps = rate_bps;
    }

    /// Seconds since the live window opened.
    pub fn staking_time(&self, now: u64) -> u64 {
        now.saturating_sub(self.accrual_start)
    }
}

// ── Storage helpers ─────────────────────────────────────────────────────────

fn position_key(staker: &Address, stake_type: u32) -> (Symbol, Address, u32) {
    (POSITION, staker.clone(), stake_type)
}

/// Load a position, returning `None` when the pair was never staked.
pub fn load(env: &Env, staker: &Address, stake_type: u32) -> Option<StakePosition> {
    let key = position_key(staker, stake_type);
    let position: Option<StakePosition> = env.storage().persistent().get(&key);
    if position.is_some() {
        env.storage()
            .persistent()
            .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
    }
    position
}

/// Persist a position. Empty positions are kept so the record survives a
/// full withdrawal and can be re-staked.
pub fn store(env: &Env, staker: &Address, stake_type: u32, position: &StakePosition) {
    let key = position_key(staker, stake_type);
    env.storage().persistent().set(&key, position);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}
