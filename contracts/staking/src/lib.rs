#![no_std]

pub mod config;
pub mod events;
pub mod position;
pub mod rewards;

use soroban_sdk::{
    contract, contractimpl, contracttype, symbol_short, token, Address, Env, Symbol, Vec,
};

pub use config::StakingConfig;
pub use position::StakePosition;

// ── Storage key constants ────────────────────────────────────────────────────

const ADMIN: Symbol = symbol_short!("ADMIN");
const INITIALIZED: Symbol = symbol_short!("INIT");
const TOTAL_STAKED: Symbol = symbol_short!("TOT_STK");

// ── Contract errors ──────────────────────────────────────────────────────────

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    /// Non-positive amount or malformed configuration value.
    InvalidInput = 4,
    /// Deposit is smaller than the configured minimum stake.
    BelowMinimumStake = 5,
    /// Deposit, or the position balance after it, exceeds the maximum stake.
    AboveMaximumStake = 6,
    /// Withdrawal exceeds the position's staked balance.
    InsufficientBalance = 7,
    InvalidStakeType = 8,
    TokensIdentical = 9,
    /// The contract does not hold enough reward tokens for the payout.
    InsufficientRewardPool = 10,
}

// ── Public-facing types ──────────────────────────────────────────────────────

/// Snapshot of one position returned by `get_staking_info`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakingInfo {
    pub staked: i128,
    pub rewards: i128,
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct StakingContract;

#[contractimpl]
impl StakingContract {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Bootstrap the contract.
    ///
    /// * `stake_token`  – token users deposit.
    /// * `reward_token` – token rewards are paid in; the pool is funded by
    ///   plain transfers to the contract address.
    ///
    /// Stake limits default to 1 000 and 1 000 000 whole stake tokens,
    /// scaled by the stake token's `decimals()`. The tier table starts with
    /// three tiers (types 0, 1, 2).
    pub fn initialize(
        env: Env,
        admin: Address,
        stake_token: Address,
        reward_token: Address,
    ) -> Result<(), ContractError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::AlreadyInitialized);
        }
        if stake_token == reward_token {
            return Err(ContractError::TokensIdentical);
        }

        let decimals = token::Client::new(&env, &stake_token).decimals();
        let cfg = StakingConfig::with_default_limits(stake_token, reward_token, decimals)?;

        env.storage().instance().set(&ADMIN, &admin);
        env.storage().instance().set(&INITIALIZED, &true);
        config::store(&env, &cfg);
        config::store_default_tiers(&env);

        events::publish_initialized(
            &env,
            admin,
            cfg.stake_token,
            cfg.reward_token,
            cfg.min_stake,
            cfg.max_stake,
        );

        Ok(())
    }

    // ── Staking ─────────────────────────────────────────────────────────────

    /// Deposit `amount` stake tokens into tier `stake_type`.
    ///
    /// The live accrual window is settled first, so the new tokens only earn
    /// from now on and the position picks up the tier's current rate.
    pub fn stake(
        env: Env,
        staker: Address,
        amount: i128,
        stake_type: u32,
    ) -> Result<(), ContractError> {
        let cfg = Self::require_initialized(&env)?;
        staker.require_auth();

        let rate_bps = config::tier_rate(&env, stake_type)?;
        let mut pos = position::load(&env, &staker, stake_type).unwrap_or_default();
        cfg.check_deposit(pos.staked, amount)?;

        // 1. Close the running window.
        let now = env.ledger().timestamp();
        pos.settle(now, rate_bps);

        // 2. Pull tokens from the staker into custody.
        token::Client::new(&env, &cfg.stake_token).transfer(
            &staker,
            &env.current_contract_address(),
            &amount,
        );

        // 3. Grow the position and the global total.
        pos.staked = pos.staked.saturating_add(amount);
        position::store(&env, &staker, stake_type, &pos);
        Self::adjust_total_staked(&env, amount);

        events::publish_staked(&env, staker, stake_type, amount, pos.staked);

        Ok(())
    }

    /// Withdraw `amount` stake tokens from tier `stake_type`.
    ///
    /// Rewards earned so far stay on the position as unclaimed; the accrual
    /// window restarts on the reduced balance.
    pub fn unstake(
        env: Env,
        staker: Address,
        amount: i128,
        stake_type: u32,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();

        if amount <= 0 {
            return Err(ContractError::InvalidInput);
        }

        Self::withdraw(&env, &staker, stake_type, amount)
    }

    /// Withdraw the whole balance of tier `stake_type`, returning the amount.
    pub fn unstake_all(env: Env, staker: Address, stake_type: u32) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();

        let staked = position::load(&env, &staker, stake_type)
            .map(|p| p.staked)
            .unwrap_or(0);
        if staked <= 0 {
            return Err(ContractError::InsufficientBalance);
        }

        Self::withdraw(&env, &staker, stake_type, staked)?;
        Ok(staked)
    }

    // ── Rewards ─────────────────────────────────────────────────────────────

    /// Pay out everything tier `stake_type` has earned for `staker`.
    ///
    /// Returns 0 without touching the reward pool when nothing is owed.
    pub fn claim_rewards(
        env: Env,
        staker: Address,
        stake_type: u32,
    ) -> Result<i128, ContractError> {
        let cfg = Self::require_initialized(&env)?;
        staker.require_auth();

        let Some(mut pos) = position::load(&env, &staker, stake_type) else {
            return Ok(0);
        };

        let now = env.ledger().timestamp();
        let rate_bps = config::tier_rate(&env, stake_type)?;
        pos.settle(now, rate_bps);

        let owed = pos.unclaimed;
        if owed <= 0 {
            position::store(&env, &staker, stake_type, &pos);
            return Ok(0);
        }

        let reward_token = token::Client::new(&env, &cfg.reward_token);
        let contract = env.current_contract_address();
        if reward_token.balance(&contract) < owed {
            return Err(ContractError::InsufficientRewardPool);
        }

        // Clear before transfer (checks-effects-interactions).
        pos.unclaimed = 0;
        position::store(&env, &staker, stake_type, &pos);

        reward_token.transfer(&contract, &staker, &owed);

        events::publish_reward_claimed(&env, staker, stake_type, owed);

        Ok(owed)
    }

    // ── View functions ───────────────────────────────────────────────────────

    /// Staked balance and live rewards for one position.
    pub fn get_staking_info(env: Env, staker: Address, stake_type: u32) -> StakingInfo {
        let now = env.ledger().timestamp();
        let pos = position::load(&env, &staker, stake_type).unwrap_or_default();
        StakingInfo {
            staked: pos.staked,
            rewards: pos.rewards_at(now),
        }
    }

    /// Seconds since the position's accrual window opened; 0 if it never
    /// existed.
    pub fn get_staking_time(env: Env, staker: Address, stake_type: u32) -> u64 {
        position::load(&env, &staker, stake_type)
            .map(|p| p.staking_time(env.ledger().timestamp()))
            .unwrap_or(0)
    }

    /// Rewards owed to a position right now, settled and live.
    pub fn calculate_rewards(env: Env, staker: Address, stake_type: u32) -> i128 {
        position::load(&env, &staker, stake_type)
            .map(|p| p.rewards_at(env.ledger().timestamp()))
            .unwrap_or(0)
    }

    /// Sum of every position's staked balance.
    pub fn get_total_staked(env: Env) -> i128 {
        env.storage().instance().get(&TOTAL_STAKED).unwrap_or(0)
    }

    pub fn get_config(env: Env) -> Result<StakingConfig, ContractError> {
        config::load(&env)
    }

    /// Rate in basis points per reward period, indexed by stake type.
    pub fn get_tier_rates(env: Env) -> Vec<u32> {
        config::tier_rates(&env)
    }

    pub fn is_initialized(env: Env) -> bool {
        env.storage().instance().has(&INITIALIZED)
    }

    pub fn get_admin(env: Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&ADMIN)
            .ok_or(ContractError::NotInitialized)
    }

    // ── Admin functions ──────────────────────────────────────────────────────

    /// Replace the stake limits. Existing positions above a lowered maximum
    /// are left as they are but cannot grow.
    pub fn set_stake_limits(
        env: Env,
        caller: Address,
        min_stake: i128,
        max_stake: i128,
    ) -> Result<(), ContractError> {
        let mut cfg = Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_admin(&env, &caller)?;
        config::validate_limits(min_stake, max_stake)?;

        cfg.min_stake = min_stake;
        cfg.max_stake = max_stake;
        config::store(&env, &cfg);

        events::publish_stake_limits_set(&env, min_stake, max_stake);

        Ok(())
    }

    /// Set the rate of tier `stake_type`, or add a tier when `stake_type`
    /// equals the current number of tiers.
    ///
    /// Positions keep the rate captured at their last settlement until they
    /// are next staked, unstaked or claimed.
    pub fn set_tier_rate(
        env: Env,
        caller: Address,
        stake_type: u32,
        rate_bps: u32,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_admin(&env, &caller)?;

        config::set_tier_rate(&env, stake_type, rate_bps)?;

        events::publish_tier_rate_set(&env, stake_type, rate_bps);

        Ok(())
    }

    /// Hand the admin role to `new_admin`. Only the current admin can call
    /// this.
    pub fn transfer_admin(
        env: Env,
        caller: Address,
        new_admin: Address,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_admin(&env, &caller)?;

        env.storage().instance().set(&ADMIN, &new_admin);

        events::publish_admin_transferred(&env, caller, new_admin);

        Ok(())
    }

    // ── Internal helpers ─────────────────────────────────────────────────────

    /// Guard: revert if the contract is not yet initialized, otherwise hand
    /// back the stored configuration.
    fn require_initialized(env: &Env) -> Result<StakingConfig, ContractError> {
        if !env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::NotInitialized);
        }
        config::load(env)
    }

    /// Guard: revert if `caller` is not the stored admin.
    fn require_admin(env: &Env, caller: &Address) -> Result<(), ContractError> {
        let admin: Address = env
            .storage()
            .instance()
            .get(&ADMIN)
            .ok_or(ContractError::NotInitialized)?;
        if *caller != admin {
            return Err(ContractError::Unauthorized);
        }
        Ok(())
    }

    /// Shared body of `unstake` and `unstake_all`.
    fn withdraw(
        env: &Env,
        staker: &Address,
        stake_type: u32,
        amount: i128,
    ) -> Result<(), ContractError> {
        let cfg = config::load(env)?;

        let mut pos = position::load(env, staker, stake_type).unwrap_or_default();
        if pos.staked < amount {
            return Err(ContractError::InsufficientBalance);
        }

        // 1. Close the running window on the old balance.
        let now = env.ledger().timestamp();
        let rate_bps = config::tier_rate(env, stake_type)?;
        pos.settle(now, rate_bps);

        // 2. Shrink the position and the global total.
        pos.staked = pos.staked.saturating_sub(amount);
        position::store(env, staker, stake_type, &pos);
        Self::adjust_total_staked(env, amount.saturating_neg());

        // 3. Return tokens from custody.
        token::Client::new(env, &cfg.stake_token).transfer(
            &env.current_contract_address(),
            staker,
            &amount,
        );

        events::publish_unstaked(env, staker.clone(), stake_type, amount, pos.staked);

        Ok(())
    }

    fn adjust_total_staked(env: &Env, delta: i128) {
        let prev: i128 = env.storage().instance().get(&TOTAL_STAKED).unwrap_or(0);
        env.storage()
            .instance()
            .set(&TOTAL_STAKED, &prev.saturating_add(delta));
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────


#[cfg(test)]
mod test_admin;
