use crate::error::StakingError;
use crate::state::{Ledger, ReleaseKind, StakeRecord, VestingStrategy, SECONDS_PER_DAY};
use anchor_lang::prelude::*;

/// Total amount a stake is entitled to have released by `now`, before
/// subtracting what was already withdrawn. Fails before the cliff;
/// afterwards the result grows with the strategy's release shape and
/// saturates at the original allocation.
pub fn releasable_to_date(
    strategy: &VestingStrategy,
    stake: &StakeRecord,
    now: i64,
) -> Result<u64> {
    let cliff_end = stake
        .start_time
        .checked_add(strategy.cliff_seconds)
        .ok_or(StakingError::Overflow)?;
    require!(now >= cliff_end, StakingError::NotYetVested);

    let original = stake.original_amount();
    let since_cliff = now - cliff_end;

    let vested = match strategy.kind {
        ReleaseKind::Linear => {
            // The day the cliff ends already counts as day one.
            let days_since_cliff = since_cliff / SECONDS_PER_DAY + 1;
            let vesting_days = strategy.vesting_seconds / SECONDS_PER_DAY;
            let share = (days_since_cliff as u128)
                .checked_mul(original as u128)
                .ok_or(StakingError::Overflow)?
                / vesting_days.max(1) as u128;
            share.min(original as u128) as u64
        }
        ReleaseKind::Stepped => {
            if since_cliff >= strategy.vesting_seconds {
                original
            } else if since_cliff >= strategy.vesting_seconds / 2 {
                ((original as u128) * 50 / 100) as u64
            } else {
                0
            }
        }
    };

    Ok(vested)
}

/// Amount payable by a withdrawal at `now`: the releasable-to-date total
/// minus everything already released. A zero delta fails, which is what
/// blocks a second withdrawal within the same release granularity.
pub fn newly_releasable(
    strategy: &VestingStrategy,
    stake: &StakeRecord,
    now: i64,
) -> Result<u64> {
    let total = releasable_to_date(strategy, stake, now)?;
    let fresh = total.saturating_sub(stake.released);
    require!(fresh > 0, StakingError::NothingToRelease);
    Ok(fresh)
}

/// The withdrawal operation: computes what `owner`'s strategy has newly
/// released at `now` and moves it out of the locked ledger state. The
/// caller still owes the returned amount to `owner` from the vault.
pub fn withdraw(ledger: &mut Ledger, owner: &Pubkey, now: i64) -> Result<u64> {
    let stake = *ledger.stake_of(owner).ok_or(StakingError::Forbidden)?;
    let strategy = *ledger.strategy(stake.strategy_id)?;
    let payable = newly_releasable(&strategy, &stake, now)?;

    let record = ledger.stake_of_mut(owner).ok_or(StakingError::Forbidden)?;
    record.amount = record
        .amount
        .checked_sub(payable)
        .ok_or(StakingError::Overflow)?;
    record.released = record
        .released
        .checked_add(payable)
        .ok_or(StakingError::Overflow)?;

    ledger.total_value_locked = ledger
        .total_value_locked
        .checked_sub(payable)
        .ok_or(StakingError::Overflow)?;

    Ok(payable)
}
