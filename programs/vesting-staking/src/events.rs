use anchor_lang::prelude::*;

#[event]
pub struct StrategyCreated {
    pub id: u64,
    pub cliff_seconds: i64,
    pub vesting_seconds: i64,
    pub kind: u8,
}

#[event]
pub struct AllocationsInitialized {
    pub count: u64,
    pub total_value_locked: u64,
}

#[event]
pub struct ProgramStarted {
    pub reward_per_hour: u64,
    pub reward_pool: Option<u64>,
    pub starting_timestamp: i64,
}

#[event]
pub struct RewardIncreased {
    pub added: u64,
    pub reward_per_hour: u64,
    pub reward_pool: Option<u64>,
}

#[event]
pub struct WhitelistChanged {
    pub account: Pubkey,
    pub added: bool,
}

#[event]
pub struct StakeCreated {
    pub owner: Pubkey,
    pub amount: u64,
    pub strategy_id: u64,
    pub total_value_locked: u64,
}

#[event]
pub struct VestingReleased {
    pub owner: Pubkey,
    pub amount: u64,
    pub remaining: u64,
    pub released_total: u64,
    pub total_value_locked: u64,
}

#[event]
pub struct RewardPaid {
    pub owner: Pubkey,
    pub amount: u64,
    pub hours: u64,
}
