use crate::error::StakingError;
use anchor_lang::prelude::*;

pub const SECONDS_PER_DAY: i64 = 86_400;
pub const SECONDS_PER_HOUR: i64 = 3_600;

/// Hard cap on a single wallet's bulk-allocated stake.
pub const PER_WALLET_STAKE_CEILING: u64 = 49_999;

pub const MAX_STRATEGIES: usize = 8;
pub const MAX_WHITELIST: usize = 64;
pub const MAX_STAKEHOLDERS: usize = 64;

#[derive(
    AnchorSerialize, AnchorDeserialize, InitSpace, Clone, Copy, PartialEq, Eq, Debug, Default,
)]
pub enum ProgramPhase {
    #[default]
    NotStarted,
    Started,
}

#[derive(AnchorSerialize, AnchorDeserialize, InitSpace, Clone, Copy, PartialEq, Eq, Debug)]
pub enum ReleaseKind {
    /// Releases day by day over the vesting window after the cliff.
    Linear,
    /// Releases two 50% tranches, at the midpoint and the end of the window.
    Stepped,
}

impl ReleaseKind {
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(ReleaseKind::Linear),
            1 => Some(ReleaseKind::Stepped),
            _ => None,
        }
    }
}

/// Immutable once created. Identified by its 1-based position in the
/// ledger's strategy table.
#[derive(AnchorSerialize, AnchorDeserialize, InitSpace, Clone, Copy, Debug)]
pub struct VestingStrategy {
    pub cliff_seconds: i64,
    pub vesting_seconds: i64,
    pub kind: ReleaseKind,
}

impl VestingStrategy {
    /// Strategies are specified in whole days on the wire and stored in
    /// seconds. Zero-length cliffs or windows and unknown release kinds
    /// are rejected here, before anything reaches the table.
    pub fn from_days(cliff_days: u64, vesting_days: u64, kind_code: u8) -> Result<Self> {
        require!(
            cliff_days > 0 && vesting_days > 0,
            StakingError::InvalidParameter
        );
        let kind = ReleaseKind::from_code(kind_code).ok_or(StakingError::InvalidParameter)?;

        let cliff_seconds = i64::try_from(cliff_days)
            .ok()
            .and_then(|days| days.checked_mul(SECONDS_PER_DAY))
            .ok_or(StakingError::Overflow)?;
        let vesting_seconds = i64::try_from(vesting_days)
            .ok()
            .and_then(|days| days.checked_mul(SECONDS_PER_DAY))
            .ok_or(StakingError::Overflow)?;

        Ok(Self {
            cliff_seconds,
            vesting_seconds,
            kind,
        })
    }
}

/// One per enrolled wallet. `amount` only ever decreases through vesting
/// withdrawals (mirrored into `released`), so `amount + released` is the
/// original allocation.
#[derive(AnchorSerialize, AnchorDeserialize, InitSpace, Clone, Copy, Debug)]
pub struct StakeRecord {
    pub owner: Pubkey,
    pub amount: u64,
    pub released: u64,
    pub start_time: i64,
    pub strategy_id: u64,
    pub last_reward_ts: i64,
}

impl StakeRecord {
    pub fn original_amount(&self) -> u64 {
        self.amount.saturating_add(self.released)
    }
}

#[account]
#[derive(InitSpace)]
pub struct Ledger {
    pub operator: Pubkey,
    pub stake_mint: Pubkey,
    /// Token account holding all escrowed stake, owned by the
    /// vault_authority PDA.
    pub vault: Pubkey,
    pub phase: ProgramPhase,
    pub reward_per_hour: u64,
    pub reward_pool: Option<u64>,
    pub starting_timestamp: i64,
    pub total_value_locked: u64,
    #[max_len(MAX_STRATEGIES)]
    pub strategies: Vec<VestingStrategy>,
    #[max_len(MAX_WHITELIST)]
    pub whitelist: Vec<Pubkey>,
    #[max_len(MAX_STAKEHOLDERS)]
    pub stakes: Vec<StakeRecord>,
    pub bump: u8,
}

impl Ledger {
    pub fn strategy(&self, id: u64) -> Result<&VestingStrategy> {
        if id == 0 || id as usize > self.strategies.len() {
            return Err(StakingError::InvalidStrategy.into());
        }
        Ok(&self.strategies[id as usize - 1])
    }

    pub fn add_strategy(&mut self, strategy: VestingStrategy) -> Result<u64> {
        require!(
            self.strategies.len() < MAX_STRATEGIES,
            StakingError::LimitExceeded
        );
        self.strategies.push(strategy);
        Ok(self.strategy_count())
    }

    pub fn strategy_count(&self) -> u64 {
        self.strategies.len() as u64
    }

    pub fn is_whitelisted(&self, who: &Pubkey) -> bool {
        self.whitelist.contains(who)
    }

    pub fn add_to_whitelist(&mut self, who: Pubkey) -> Result<bool> {
        if self.whitelist.contains(&who) {
            return Ok(false);
        }
        require!(
            self.whitelist.len() < MAX_WHITELIST,
            StakingError::LimitExceeded
        );
        self.whitelist.push(who);
        Ok(true)
    }

    pub fn remove_from_whitelist(&mut self, who: &Pubkey) -> Result<()> {
        let idx = self
            .whitelist
            .iter()
            .position(|entry| entry == who)
            .ok_or(StakingError::NotFound)?;
        self.whitelist.remove(idx);
        Ok(())
    }

    pub fn stake_of(&self, who: &Pubkey) -> Option<&StakeRecord> {
        self.stakes.iter().find(|stake| stake.owner == *who)
    }

    pub fn stake_of_mut(&mut self, who: &Pubkey) -> Option<&mut StakeRecord> {
        self.stakes.iter_mut().find(|stake| stake.owner == *who)
    }

    /// Creates the wallet's stake record, or overwrites an existing one.
    /// Keeps `total_value_locked` equal to the sum of all locked amounts.
    pub fn enroll(&mut self, owner: Pubkey, amount: u64, strategy_id: u64, now: i64) -> Result<()> {
        self.strategy(strategy_id)?;

        let record = StakeRecord {
            owner,
            amount,
            released: 0,
            start_time: now,
            strategy_id,
            last_reward_ts: now,
        };

        match self.stakes.iter().position(|stake| stake.owner == owner) {
            Some(idx) => {
                let previous = self.stakes[idx].amount;
                self.total_value_locked = self
                    .total_value_locked
                    .checked_sub(previous)
                    .ok_or(StakingError::Overflow)?;
                self.stakes[idx] = record;
            }
            None => {
                require!(
                    self.stakes.len() < MAX_STAKEHOLDERS,
                    StakingError::LimitExceeded
                );
                self.stakes.push(record);
            }
        }

        self.total_value_locked = self
            .total_value_locked
            .checked_add(amount)
            .ok_or(StakingError::Overflow)?;
        Ok(())
    }

    /// Administrative override of a wallet's locked amount. Leaves
    /// `released` and `total_value_locked` untouched.
    pub fn edit_amount(&mut self, owner: &Pubkey, new_amount: u64) -> Result<()> {
        let stake = self.stake_of_mut(owner).ok_or(StakingError::NotFound)?;
        stake.amount = new_amount;
        Ok(())
    }
}
