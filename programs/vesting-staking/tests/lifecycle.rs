use anchor_lang::prelude::Pubkey;
use vesting_staking::error::StakingError;
use vesting_staking::rewards;
use vesting_staking::state::{
    Ledger, ProgramPhase, VestingStrategy, SECONDS_PER_DAY, SECONDS_PER_HOUR,
};
use vesting_staking::vesting;

const START: i64 = 1_750_000_000;

fn fresh_ledger(operator: Pubkey) -> Ledger {
    Ledger {
        operator,
        stake_mint: Pubkey::new_unique(),
        vault: Pubkey::new_unique(),
        phase: ProgramPhase::NotStarted,
        reward_per_hour: 0,
        reward_pool: None,
        starting_timestamp: 0,
        total_value_locked: 0,
        strategies: Vec::new(),
        whitelist: Vec::new(),
        stakes: Vec::new(),
        bump: 254,
    }
}

fn start_program(ledger: &mut Ledger, reward_per_hour: u64, now: i64) {
    ledger.reward_per_hour = reward_per_hour;
    ledger.starting_timestamp = now;
    ledger.phase = ProgramPhase::Started;
}

fn tvl_matches_sum(ledger: &Ledger) -> bool {
    ledger.total_value_locked == ledger.stakes.iter().map(|s| s.amount).sum::<u64>()
}

#[test]
fn allocations_rewards_and_vesting_interact_over_a_program_run() {
    let operator = Pubkey::new_unique();
    let alice = Pubkey::new_unique();
    let bob = Pubkey::new_unique();

    let mut ledger = fresh_ledger(operator);
    let linear = ledger
        .add_strategy(VestingStrategy::from_days(30, 30, 0).unwrap())
        .unwrap();
    let stepped = ledger
        .add_strategy(VestingStrategy::from_days(30, 30, 1).unwrap())
        .unwrap();

    ledger.enroll(alice, 60, linear, START).unwrap();
    ledger.enroll(bob, 40, stepped, START).unwrap();
    assert!(tvl_matches_sum(&ledger));

    start_program(&mut ledger, 100, START);

    // Hour one: the pool splits 60/40.
    let hour_one = START + SECONDS_PER_HOUR + 1;
    assert_eq!(rewards::settle(&mut ledger, &alice, hour_one).unwrap(), (60, 1));
    assert_eq!(rewards::settle(&mut ledger, &bob, hour_one).unwrap(), (40, 1));

    // Day 31: Alice's linear stake releases its first 1/30.
    let day_31 = START + 30 * SECONDS_PER_DAY + 10;
    assert_eq!(vesting::withdraw(&mut ledger, &alice, day_31).unwrap(), 2);
    assert!(tvl_matches_sum(&ledger));

    // Bob's stepped stake has not reached its midpoint yet.
    assert_eq!(
        vesting::withdraw(&mut ledger, &bob, day_31).unwrap_err(),
        StakingError::NothingToRelease.into()
    );

    // Day 45: Bob's midpoint tranche unlocks half of his 40.
    let day_45 = START + 45 * SECONDS_PER_DAY;
    assert_eq!(vesting::withdraw(&mut ledger, &bob, day_45).unwrap(), 20);
    assert!(tvl_matches_sum(&ledger));

    // Reward rates now follow the reduced pool: Alice holds 58 of 78.
    let alice_claim = rewards::settle(&mut ledger, &alice, day_45).unwrap();
    let hours = alice_claim.1;
    assert_eq!(alice_claim.0, 58 * 100 * hours as u64 / 78);

    // Withdrawing everything leaves a zero-stake record that still claims
    // (and receives nothing) rather than erroring out of the program.
    let day_61 = START + 61 * SECONDS_PER_DAY;
    let drained = vesting::withdraw(&mut ledger, &alice, day_61).unwrap();
    assert_eq!(drained, 58);
    assert!(tvl_matches_sum(&ledger));
    let (amount, _) = rewards::settle(&mut ledger, &alice, day_61 + SECONDS_PER_HOUR).unwrap();
    assert_eq!(amount, 0);
}

#[test]
fn simultaneous_claims_never_exceed_the_hourly_pool() {
    let operator = Pubkey::new_unique();
    let mut ledger = fresh_ledger(operator);
    ledger
        .add_strategy(VestingStrategy::from_days(30, 30, 0).unwrap())
        .unwrap();

    let wallets: Vec<Pubkey> = (0..7).map(|_| Pubkey::new_unique()).collect();
    for (i, wallet) in wallets.iter().enumerate() {
        ledger.enroll(*wallet, 10 + i as u64 * 3, 1, START).unwrap();
    }
    start_program(&mut ledger, 1_000, START);

    let claim_time = START + 3 * SECONDS_PER_HOUR;
    let mut paid = 0u64;
    for wallet in &wallets {
        let (amount, hours) = rewards::settle(&mut ledger, wallet, claim_time).unwrap();
        assert_eq!(hours, 3);
        paid += amount;
    }
    assert!(paid <= 3 * 1_000);
}

#[test]
fn overwritten_allocations_reset_the_vesting_clock() {
    let operator = Pubkey::new_unique();
    let wallet = Pubkey::new_unique();
    let mut ledger = fresh_ledger(operator);
    ledger
        .add_strategy(VestingStrategy::from_days(30, 30, 0).unwrap())
        .unwrap();

    ledger.enroll(wallet, 30, 1, START).unwrap();

    // The operator re-allocates ten days in; the cliff restarts.
    let re_alloc = START + 10 * SECONDS_PER_DAY;
    ledger.enroll(wallet, 45, 1, re_alloc).unwrap();
    assert_eq!(ledger.total_value_locked, 45);

    let after_old_cliff = START + 31 * SECONDS_PER_DAY;
    assert_eq!(
        vesting::withdraw(&mut ledger, &wallet, after_old_cliff).unwrap_err(),
        StakingError::NotYetVested.into()
    );

    let after_new_cliff = re_alloc + 30 * SECONDS_PER_DAY;
    assert_eq!(vesting::withdraw(&mut ledger, &wallet, after_new_cliff).unwrap(), 1);
}
