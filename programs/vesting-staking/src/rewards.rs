use crate::error::StakingError;
use crate::state::{Ledger, SECONDS_PER_HOUR};
use anchor_lang::prelude::*;

/// Whole hours elapsed since the last reward checkpoint. The clock is
/// nondecreasing but two instructions may observe the same instant, so a
/// non-positive delta counts as zero hours.
pub fn whole_hours_since(last_checkpoint: i64, now: i64) -> i64 {
    if now <= last_checkpoint {
        return 0;
    }
    (now - last_checkpoint) / SECONDS_PER_HOUR
}

/// Advances the checkpoint by the claimed hours only, so the sub-hour
/// remainder keeps accruing toward the next claim.
pub fn advance_checkpoint(last_checkpoint: i64, hours: i64) -> Result<i64> {
    let claimed = hours
        .checked_mul(SECONDS_PER_HOUR)
        .ok_or(StakingError::Overflow)?;
    last_checkpoint
        .checked_add(claimed)
        .ok_or_else(|| StakingError::Overflow.into())
}

/// The caller's share of the hourly pool over `hours` whole hours,
/// proportional to its currently-locked stake:
/// `floor(stake_amount * reward_per_hour * hours / total_value_locked)`.
/// Summed over all claimants of the same window this never exceeds
/// `reward_per_hour * hours`; the floor may leave a remainder unpaid.
pub fn proportional_reward(
    stake_amount: u64,
    reward_per_hour: u64,
    hours: i64,
    total_value_locked: u64,
) -> Result<u64> {
    if total_value_locked == 0 {
        return Ok(0);
    }
    let payable = (stake_amount as u128)
        .checked_mul(reward_per_hour as u128)
        .ok_or(StakingError::Overflow)?
        .checked_mul(hours as u128)
        .ok_or(StakingError::Overflow)?
        / total_value_locked as u128;
    u64::try_from(payable).map_err(|_| StakingError::Overflow.into())
}

/// The claim operation: settles every whole hour accrued since `owner`'s
/// checkpoint against the pool composition at claim time. Returns the
/// amount the vault owes them and the hours settled.
pub fn settle(ledger: &mut Ledger, owner: &Pubkey, now: i64) -> Result<(u64, i64)> {
    let stake = *ledger.stake_of(owner).ok_or(StakingError::Forbidden)?;

    let hours = whole_hours_since(stake.last_reward_ts, now);
    require!(hours >= 1, StakingError::NothingToRelease);

    let payable = proportional_reward(
        stake.amount,
        ledger.reward_per_hour,
        hours,
        ledger.total_value_locked,
    )?;
    let checkpoint = advance_checkpoint(stake.last_reward_ts, hours)?;

    let record = ledger.stake_of_mut(owner).ok_or(StakingError::Forbidden)?;
    record.last_reward_ts = checkpoint;

    Ok((payable, hours))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{ProgramPhase, ReleaseKind, VestingStrategy, SECONDS_PER_DAY};

    #[test]
    fn hours_count_only_whole_hours() {
        assert_eq!(whole_hours_since(1_000, 1_000), 0);
        assert_eq!(whole_hours_since(1_000, 1_000 + 3_599), 0);
        assert_eq!(whole_hours_since(1_000, 1_000 + 3_600), 1);
        assert_eq!(whole_hours_since(1_000, 1_000 + 7_201), 2);
        // Same-instant re-read of a nondecreasing clock.
        assert_eq!(whole_hours_since(1_000, 999), 0);
    }

    #[test]
    fn checkpoint_keeps_the_sub_hour_remainder() {
        let start = 1_000;
        let now = start + 2 * 3_600 + 1_750;
        let hours = whole_hours_since(start, now);
        assert_eq!(hours, 2);

        let checkpoint = advance_checkpoint(start, hours).unwrap();
        assert_eq!(checkpoint, start + 2 * 3_600);
        // The 1750 leftover seconds stay on the meter.
        assert_eq!(whole_hours_since(checkpoint, now + 1_850), 1);
    }

    #[test]
    fn reward_splits_proportionally_to_locked_stake() {
        // Two stakes of 60 and 40 against an hourly pool of 100.
        assert_eq!(proportional_reward(60, 100, 1, 100).unwrap(), 60);
        assert_eq!(proportional_reward(40, 100, 1, 100).unwrap(), 40);
        // Two hours later the same split doubles.
        assert_eq!(proportional_reward(60, 100, 2, 100).unwrap(), 120);
    }

    #[test]
    fn floor_division_never_overpays_the_pool() {
        let stakes = [33u64, 33, 33];
        let tvl: u64 = stakes.iter().sum();
        let paid: u64 = stakes
            .iter()
            .map(|s| proportional_reward(*s, 100, 1, tvl).unwrap())
            .sum();
        assert!(paid <= 100);
        assert_eq!(paid, 99);
    }

    #[test]
    fn dust_stakes_floor_to_zero_without_failing() {
        assert_eq!(proportional_reward(1, 10, 1, 1_000).unwrap(), 0);
    }

    #[test]
    fn empty_pool_pays_nothing() {
        assert_eq!(proportional_reward(0, 100, 5, 0).unwrap(), 0);
    }

    #[test]
    fn wide_products_do_not_overflow() {
        let reward = proportional_reward(u64::MAX, u64::MAX, 1, u64::MAX).unwrap();
        assert_eq!(reward, u64::MAX);
    }

    const START: i64 = 1_700_000_000;

    fn ledger(reward_per_hour: u64) -> Ledger {
        Ledger {
            operator: Pubkey::new_unique(),
            stake_mint: Pubkey::new_unique(),
            vault: Pubkey::new_unique(),
            phase: ProgramPhase::Started,
            reward_per_hour,
            reward_pool: None,
            starting_timestamp: START,
            total_value_locked: 0,
            strategies: vec![VestingStrategy {
                cliff_seconds: 30 * SECONDS_PER_DAY,
                vesting_seconds: 30 * SECONDS_PER_DAY,
                kind: ReleaseKind::Linear,
            }],
            whitelist: Vec::new(),
            stakes: Vec::new(),
            bump: 255,
        }
    }

    #[test]
    fn claims_split_the_hourly_pool_by_locked_stake() {
        let first = Pubkey::new_unique();
        let second = Pubkey::new_unique();
        let mut ledger = ledger(100);
        ledger.enroll(first, 60, 1, START).unwrap();
        ledger.enroll(second, 40, 1, START).unwrap();

        let after_one_hour = START + 3_600 + 1;
        assert_eq!(settle(&mut ledger, &first, after_one_hour).unwrap(), (60, 1));
        assert_eq!(settle(&mut ledger, &second, after_one_hour).unwrap(), (40, 1));

        // Two more whole hours for the first claimer.
        let later = after_one_hour + 2 * 3_600 + 100;
        assert_eq!(settle(&mut ledger, &first, later).unwrap(), (120, 2));
    }

    #[test]
    fn claims_need_a_full_hour_on_the_meter() {
        let wallet = Pubkey::new_unique();
        let mut ledger = ledger(100);
        ledger.enroll(wallet, 60, 1, START).unwrap();

        assert_eq!(
            settle(&mut ledger, &wallet, START + 3_599).unwrap_err(),
            StakingError::NothingToRelease.into()
        );
        // The failed attempt must not have moved the checkpoint.
        assert_eq!(settle(&mut ledger, &wallet, START + 3_600).unwrap(), (60, 1));
    }

    #[test]
    fn claims_by_strangers_are_forbidden() {
        let wallet = Pubkey::new_unique();
        let mut ledger = ledger(100);
        ledger.enroll(wallet, 60, 1, START).unwrap();

        assert_eq!(
            settle(&mut ledger, &Pubkey::new_unique(), START + 7_200).unwrap_err(),
            StakingError::Forbidden.into()
        );
    }

    #[test]
    fn claim_rate_follows_pool_composition_at_claim_time() {
        let early = Pubkey::new_unique();
        let late = Pubkey::new_unique();
        let mut ledger = ledger(100);
        ledger.enroll(early, 60, 1, START).unwrap();

        // A second stake arrives before the first claim; the early staker
        // settles against the enlarged pool, not a snapshot.
        ledger.enroll(late, 60, 1, START + 1_800).unwrap();
        assert_eq!(
            settle(&mut ledger, &early, START + 3_600).unwrap(),
            (50, 1)
        );
    }
}
