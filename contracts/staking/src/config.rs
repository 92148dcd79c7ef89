use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol, Vec};

use crate::{rewards, ContractError};

// ── Storage keys ────────────────────────────────────────────────────────────

const CONFIG: Symbol = symbol_short!("CONFIG");
const TIER_RATES: Symbol = symbol_short!("TIERS");

// ── Defaults ────────────────────────────────────────────────────────────────

/// Smallest deposit accepted by `stake`, in whole tokens.
pub const MIN_STAKE_TOKENS: i128 = 1_000;

/// Largest balance a single position may hold, in whole tokens.
pub const MAX_STAKE_TOKENS: i128 = 1_000_000;

// ── Types ───────────────────────────────────────────────────────────────────

/// Contract-wide configuration, written once by `initialize` and updated
/// only through the admin setters.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakingConfig {
    /// Token users deposit.
    pub stake_token: Address,
    /// Token rewards are paid in.
    pub reward_token: Address,
    /// Minimum deposit per `stake` call, in base units.
    pub min_stake: i128,
    /// Maximum position balance, in base units.
    pub max_stake: i128,
}

impl StakingConfig {
    /// Build a config whose limits are `MIN_STAKE_TOKENS`/`MAX_STAKE_TOKENS`
    /// whole tokens at the stake token's `decimals`.
    pub fn with_default_limits(
        stake_token: Address,
        reward_token: Address,
        decimals: u32,
    ) -> Result<Self, ContractError> {
        let unit = 10i128
            .checked_pow(decimals)
            .ok_or(ContractError::InvalidInput)?;
        let min_stake = MIN_STAKE_TOKENS
            .checked_mul(unit)
            .ok_or(ContractError::InvalidInput)?;
        let max_stake = MAX_STAKE_TOKENS
            .checked_mul(unit)
            .ok_or(ContractError::InvalidInput)?;

        Ok(Self {
            stake_token,
            reward_token,
            min_stake,
            max_stake,
        })
    }

    /// Check a deposit of `amount` into a position already holding `current`.
    pub fn check_deposit(&self, current: i128, amount: i128) -> Result<(), ContractError> {
        if amount < self.min_stake {
            return Err(ContractError::BelowMinimumStake);
        }
        if amount > self.max_stake || current.saturating_add(amount) > self.max_stake {
            return Err(ContractError::AboveMaximumStake);
        }
        Ok(())
    }
}

/// Both limits must be positive and ordered.
pub fn validate_limits(min_stake: i128, max_stake: i128) -> Result<(), ContractError> {
    if min_stake <= 0 || max_stake < min_stake {
        return Err(ContractError::InvalidInput);
    }
    Ok(())
}

// ── Storage helpers ─────────────────────────────────────────────────────────

pub fn load(env: &Env) -> Result<StakingConfig, ContractError> {
    env.storage()
        .instance()
        .get(&CONFIG)
        .ok_or(ContractError::NotInitialized)
}

pub fn store(env: &Env, config: &StakingConfig) {
    env.storage().instance().set(&CONFIG, config);
}

/// The full tier table, index = stake type.
pub fn tier_rates(env: &Env) -> Vec<u32> {
    env.storage()
        .instance()
        .get(&TIER_RATES)
        .unwrap_or_else(|| Vec::new(env))
}

/// Rate for `stake_type`, or `InvalidStakeType` if the tier does not exist.
pub fn tier_rate(env: &Env, stake_type: u32) -> Result<u32, ContractError> {
    tier_rates(env)
        .get(stake_type)
        .ok_or(ContractError::InvalidStakeType)
}

pub fn store_default_tiers(env: &Env) {
    let mut rates = Vec::new(env);
    for rate in rewards::DEFAULT_TIER_RATES_BPS {
        rates.push_back(rate);
    }
    env.storage().instance().set(&TIER_RATES, &rates);
}

/// Overwrite an existing tier, or append one when `stake_type` equals the
/// current table length.
pub fn set_tier_rate(env: &Env, stake_type: u32, rate_bps: u32) -> Result<(), ContractError> {
    if rate_bps > rewards::MAX_TIER_RATE_BPS {
        return Err(ContractError::InvalidInput);
    }

    let mut rates = tier_rates(env);
    if stake_type < rates.len() {
        rates.set(stake_type, rate_bps);
    } else if stake_type == rates.len() {
        rates.push_back(rate_bps);
    } else {
        return Err(ContractError::InvalidStakeType);
    }

    env.storage().instance().set(&TIER_RATES, &rates);
    Ok(())
}
