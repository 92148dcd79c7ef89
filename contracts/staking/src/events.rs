#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, Env};

// ── Event payloads ──────────────────────────────────────────────────────────

/// Fired once when the contract is bootstrapped.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub admin: Address,
    pub stake_token: Address,
    pub reward_token: Address,
    pub min_stake: i128,
    pub max_stake: i128,
    pub timestamp: u64,
}

/// Fired when a user deposits into a tier.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakedEvent {
    pub staker: Address,
    pub stake_type: u32,
    pub amount: i128,
    pub position_staked: i128,
    pub timestamp: u64,
}

/// Fired when a user withdraws part or all of a position.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UnstakedEvent {
    pub staker: Address,
    pub stake_type: u32,
    pub amount: i128,
    pub position_staked: i128,
    pub timestamp: u64,
}

/// Fired when accrued rewards are paid out.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardClaimedEvent {
    pub staker: Address,
    pub stake_type: u32,
    pub amount: i128,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakeLimitsSetEvent {
    pub min_stake: i128,
    pub max_stake: i128,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TierRateSetEvent {
    pub stake_type: u32,
    pub rate_bps: u32,
    pub timestamp: u64,
}

/// Fired when the admin role moves to a new address.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdminTransferredEvent {
    pub old_admin: Address,
    pub new_admin: Address,
    pub timestamp: u64,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_initialized(
    env: &Env,
    admin: Address,
    stake_token: Address,
    reward_token: Address,
    min_stake: i128,
    max_stake: i128,
) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent {
            admin,
            stake_token,
            reward_token,
            min_stake,
            max_stake,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_staked(
    env: &Env,
    staker: Address,
    stake_type: u32,
    amount: i128,
    position_staked: i128,
) {
    env.events().publish(
        (symbol_short!("STAKED"), staker.clone(), stake_type),
        StakedEvent {
            staker,
            stake_type,
            amount,
            position_staked,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_unstaked(
    env: &Env,
    staker: Address,
    stake_type: u32,
    amount: i128,
    position_staked: i128,
) {
    env.events().publish(
        (symbol_short!("UNSTAKED"), staker.clone(), stake_type),
        UnstakedEvent {
            staker,
            stake_type,
            amount,
            position_staked,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_reward_claimed(env: &Env, staker: Address, stake_type: u32, amount: i128) {
    env.events().publish(
        (symbol_short!("CLAIMED"), staker.clone(), stake_type),
        RewardClaimedEvent {
            staker,
            stake_type,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_stake_limits_set(env: &Env, min_stake: i128, max_stake: i128) {
    env.events().publish(
        (symbol_short!("LIMITS"),),
        StakeLimitsSetEvent {
            min_stake,
            max_stake,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_tier_rate_set(env: &Env, stake_type: u32, rate_bps: u32) {
    env.events().publish(
        (symbol_short!("TIER_RATE"), stake_type),
        TierRateSetEvent {
            stake_type,
            rate_bps,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_admin_transferred(env: &Env, old_admin: Address, new_admin: Address) {
    env.events().publish(
        (symbol_short!("ADMIN"),),
        AdminTransferredEvent {
            old_admin,
            new_admin,
            timestamp: env.ledger().timestamp(),
        },
    );
}
