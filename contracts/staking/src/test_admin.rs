extern crate std;

use soroban_sdk::{
    symbol_short,
    testutils::{Address as _, Events, Ledger as _},
    token::StellarAssetClient,
    vec, Address, Env, IntoVal, TryFromVal, TryIntoVal, Val,
};

use crate::{events, ContractError, StakingContract, StakingContractClient};

const UNIT: i128 = 10_000_000;

// ── Test helpers ─────────────────────────────────────────────────────────────

fn setup() -> (Env, StakingContractClient<'static>, Address, Address) {
    let env = Env::default();
    env.mock_all_auths();

    let stake_token = env.register_stellar_asset_contract_v2(Address::generate(&env));
    let reward_token = env.register_stellar_asset_contract_v2(Address::generate(&env));

    let contract_id = env.register(StakingContract, ());
    let client = StakingContractClient::new(&env, &contract_id);

    let admin = Address::generate(&env);
    client.initialize(&admin, &stake_token.address(), &reward_token.address());

    (env, client, admin, stake_token.address())
}

/// Last event of the most recent invocation: (contract, topics, payload).
fn last_event(env: &Env) -> (Address, soroban_sdk::Vec<Val>, Val) {
    use soroban_sdk::xdr;
    let all = env.events().all();
    let events = all.events();
    assert!(!events.is_empty());
    let event = &events[events.len() - 1];
    let contract: Address = xdr::ScAddress::Contract(event.contract_id.clone().unwrap())
        .try_into_val(env)
        .unwrap();
    let xdr::ContractEventBody::V0(body) = &event.body;
    let mut topics = soroban_sdk::Vec::<Val>::new(env);
    for t in body.topics.iter() {
        topics.push_back(Val::try_from_val(env, t).unwrap());
    }
    let data = Val::try_from_val(env, &body.data).unwrap();
    (contract, topics, data)
}

// ── Stake limits ─────────────────────────────────────────────────────────────

#[test]
fn test_admin_sets_stake_limits() {
    let (env, client, admin, stake_token) = setup();

    client.set_stake_limits(&admin, &(10 * UNIT), &(100 * UNIT));

    let cfg = client.get_config();
    assert_eq!(cfg.min_stake, 10 * UNIT);
    assert_eq!(cfg.max_stake, 100 * UNIT);

    // New bounds apply to the next deposit.
    let staker = Address::generate(&env);
    StellarAssetClient::new(&env, &stake_token).mint(&staker, &(1_000 * UNIT));
    client.stake(&staker, &(10 * UNIT), &0);

    let result = client.try_stake(&staker, &(100 * UNIT), &0);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::AboveMaximumStake),
        _ => unreachable!("Expected AboveMaximumStake error"),
    }
}

#[test]
fn test_invalid_stake_limits_rejected() {
    let (_env, client, admin, _) = setup();

    for (min, max) in [(0, 100), (-1, 100), (100, 99)] {
        let result = client.try_set_stake_limits(&admin, &min, &max);
        match result {
            Err(Ok(e)) => assert_eq!(e, ContractError::InvalidInput),
            _ => unreachable!("Expected InvalidInput error"),
        }
    }
}

#[test]
fn test_non_admin_cannot_set_stake_limits() {
    let (env, client, _admin, _) = setup();
    let intruder = Address::generate(&env);

    let result = client.try_set_stake_limits(&intruder, &1, &2);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
}

// ── Tier rates ───────────────────────────────────────────────────────────────

#[test]
fn test_admin_updates_and_appends_tiers() {
    let (env, client, admin, _) = setup();

    client.set_tier_rate(&admin, &0, &2_000);
    client.set_tier_rate(&admin, &3, &3_000);

    assert_eq!(client.get_tier_rates(), vec![&env, 2_000u32, 1_250, 1_667, 3_000]);
}

#[test]
fn test_tier_gap_rejected() {
    let (_env, client, admin, _) = setup();

    let result = client.try_set_tier_rate(&admin, &5, &1_000);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::InvalidStakeType),
        _ => unreachable!("Expected InvalidStakeType error"),
    }
}

#[test]
fn test_excessive_tier_rate_rejected() {
    let (_env, client, admin, _) = setup();

    let too_high = crate::rewards::MAX_TIER_RATE_BPS + 1;
    let result = client.try_set_tier_rate(&admin, &0, &too_high);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::InvalidInput),
        _ => unreachable!("Expected InvalidInput error"),
    }
}

#[test]
fn test_non_admin_cannot_set_tier_rate() {
    let (env, client, _admin, _) = setup();
    let intruder = Address::generate(&env);

    let result = client.try_set_tier_rate(&intruder, &0, &9_999);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
}

#[test]
fn test_rate_change_reaches_position_at_next_settlement() {
    let (env, client, admin, stake_token) = setup();
    env.ledger().set_timestamp(0);

    let staker = Address::generate(&env);
    StellarAssetClient::new(&env, &stake_token).mint(&staker, &(2_000_000 * UNIT));
    client.stake(&staker, &(1_000_000 * UNIT), &0);

    // Doubling the tier rate does not rewrite the open window.
    client.set_tier_rate(&admin, &0, &2_000);
    env.ledger().set_timestamp(crate::rewards::REWARD_PERIOD_SECS);
    assert_eq!(client.calculate_rewards(&staker, &0), 100_000 * UNIT);

    // Any settlement picks up the new rate.
    client.unstake(&staker, &(1_000 * UNIT), &0);
    env.ledger().set_timestamp(2 * crate::rewards::REWARD_PERIOD_SECS);
    assert_eq!(client.calculate_rewards(&staker, &0), 100_000 * UNIT + 199_800 * UNIT);
}

// ── Admin transfer ───────────────────────────────────────────────────────────

#[test]
fn test_transfer_admin() {
    let (env, client, admin, _) = setup();
    let new_admin = Address::generate(&env);

    client.transfer_admin(&admin, &new_admin);
    assert_eq!(client.get_admin(), new_admin);

    // The old admin lost its rights.
    let result = client.try_set_tier_rate(&admin, &0, &1);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
    client.set_tier_rate(&new_admin, &0, &1);
}

#[test]
fn test_non_admin_cannot_transfer_admin() {
    let (env, client, _admin, _) = setup();
    let intruder = Address::generate(&env);

    let result = client.try_transfer_admin(&intruder, &intruder);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
}

// ── Events ───────────────────────────────────────────────────────────────────

#[test]
fn test_initialize_publishes_event() {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_timestamp(42);

    let stake_token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let reward_token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let contract_id = env.register(StakingContract, ());
    let client = StakingContractClient::new(&env, &contract_id);

    let admin = Address::generate(&env);
    client.initialize(&admin, &stake_token, &reward_token);

    let event = last_event(&env);
    assert_eq!(event.0, contract_id);
    assert_eq!(event.1, (symbol_short!("INIT"),).into_val(&env));
    let payload: events::InitializedEvent = event.2.try_into_val(&env).unwrap();
    assert_eq!(
        payload,
        events::InitializedEvent {
            admin,
            stake_token,
            reward_token,
            min_stake: 1_000 * UNIT,
            max_stake: 1_000_000 * UNIT,
            timestamp: 42,
        }
    );
}

#[test]
fn test_set_tier_rate_publishes_event() {
    let (env, client, admin, _) = setup();
    env.ledger().set_timestamp(7);

    client.set_tier_rate(&admin, &1, &1_500);

    let event = last_event(&env);
    assert_eq!(event.0, client.address);
    assert_eq!(event.1, (symbol_short!("TIER_RATE"), 1u32).into_val(&env));
    let payload: events::TierRateSetEvent = event.2.try_into_val(&env).unwrap();
    assert_eq!(
        payload,
        events::TierRateSetEvent {
            stake_type: 1,
            rate_bps: 1_500,
            timestamp: 7,
        }
    );
}

#[test]
fn test_set_stake_limits_publishes_event() {
    let (env, client, admin, _) = setup();

    client.set_stake_limits(&admin, &UNIT, &(2 * UNIT));

    let event = last_event(&env);
    assert_eq!(event.1, (symbol_short!("LIMITS"),).into_val(&env));
    let payload: events::StakeLimitsSetEvent = event.2.try_into_val(&env).unwrap();
    assert_eq!(payload.min_stake, UNIT);
    assert_eq!(payload.max_stake, 2 * UNIT);
}

#[test]
fn test_transfer_admin_publishes_event() {
    let (env, client, admin, _) = setup();
    let new_admin = Address::generate(&env);

    client.transfer_admin(&admin, &new_admin);

    let event = last_event(&env);
    assert_eq!(event.1, (symbol_short!("ADMIN"),).into_val(&env));
    let payload: events::AdminTransferredEvent = event.2.try_into_val(&env).unwrap();
    assert_eq!(payload.old_admin, admin);
    assert_eq!(payload.new_admin, new_admin);
}
