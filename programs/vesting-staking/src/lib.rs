/// # vesting staking - Allocation Vesting and Reward System
///
/// ## Business Process Flow
///
/// 1. Initial Setup:
///    - Operator initializes the program with the stake mint and the vault
///      token account that escrows all value
///    - Operator creates vesting strategies (cliff + vesting window, linear
///      or stepped release)
///    - Operator bulk-allocates stakes to participant wallets
///
/// 2. Program Start:
///    - Operator starts the program with an hourly reward rate (and an
///      optional reward pool)
///    - The start is a one-way transition; there is no stop or pause
///
/// 3. Self-Service Staking:
///    - Operator whitelists wallets allowed to enroll themselves
///    - A whitelisted wallet stakes tokens under a chosen strategy; the
///      tokens move into the program vault
///
/// 4. Vesting Withdrawals:
///    - Once a stake's cliff has elapsed, its owner withdraws whatever the
///      strategy has newly released (day by day for linear, two 50%
///      tranches for stepped)
///    - Withdrawn amounts leave the locked stake and the total value locked
///
/// 5. Reward Claims:
///    - Every whole hour, the hourly reward pool is claimable pro rata to
///      currently-locked stake
///    - Claims settle against the pool composition at claim time and
///      advance the claimer's checkpoint by the paid hours only
///
/// All state lives in a single ledger PDA; escrowed tokens sit in a vault
/// token account owned by a program PDA, so only these instructions can
/// move them. Every instruction validates, then mutates, then transfers;
/// any failure rolls the whole operation back.
pub mod account_structs;
pub mod error;
pub mod events;
mod guard;
pub mod processor;
pub mod rewards;
pub mod state;
pub mod vesting;

use account_structs::*;
use anchor_lang::prelude::*;

declare_id!("Ewq37mU1YESRcyzv62N6JAvux8izdx23sz8CavQMNtd6");

#[program]
pub mod vesting_staking {
    use super::*;

    /// Creates the ledger, records the operator, and adopts the vault
    /// token account under the program's vault authority PDA.
    pub fn initialize(ctx: Context<Initialize>) -> Result<()> {
        processor::initialize(ctx)
    }

    /// Registers an immutable vesting strategy:
    /// - cliff_days / vesting_days: both must be non-zero, stored in seconds
    /// - kind: 0 = linear daily release, 1 = stepped 50/50 release
    pub fn create_strategy(
        ctx: Context<CreateStrategy>,
        cliff_days: u64,
        vesting_days: u64,
        kind: u8,
    ) -> Result<()> {
        processor::create_strategy(ctx, cliff_days, vesting_days, kind)
    }

    /// Admits wallets to self-service staking.
    pub fn add_to_whitelist(ctx: Context<ModifyWhitelist>, accounts: Vec<Pubkey>) -> Result<()> {
        processor::add_to_whitelist(ctx, accounts)
    }

    /// Removes a wallet from the whitelist; fails if it was not a member.
    pub fn delete_from_whitelist(ctx: Context<ModifyWhitelist>, account: Pubkey) -> Result<()> {
        processor::delete_from_whitelist(ctx, account)
    }

    /// Operator bulk allocation. The three sequences are positional; a
    /// repeated wallet overwrites its previous record.
    pub fn init_allocations(
        ctx: Context<InitAllocations>,
        accounts: Vec<Pubkey>,
        amounts: Vec<u64>,
        strategy_ids: Vec<u64>,
    ) -> Result<()> {
        processor::init_allocations(ctx, accounts, amounts, strategy_ids)
    }

    /// One-way transition into the started phase; sets the hourly reward
    /// rate and the optional reward pool.
    pub fn start(
        ctx: Context<Start>,
        reward_per_hour: u64,
        reward_pool: Option<u64>,
    ) -> Result<()> {
        processor::start(ctx, reward_per_hour, reward_pool)
    }

    /// Tops up the reward pool when one was configured at start, otherwise
    /// raises the hourly rate.
    pub fn add_additional_reward(ctx: Context<AddAdditionalReward>, amount: u64) -> Result<()> {
        processor::add_additional_reward(ctx, amount)
    }

    /// Whitelisted self-service staking: escrows the caller's tokens in
    /// the vault and creates their stake record.
    pub fn stake(ctx: Context<Stake>, amount: u64, strategy_id: u64) -> Result<()> {
        processor::stake(ctx, amount, strategy_id)
    }

    /// Administrative override of a wallet's locked amount. Deliberately
    /// leaves released totals and the TVL aggregate alone.
    pub fn edit_amount_per_wallet(
        ctx: Context<EditAmountPerWallet>,
        wallet: Pubkey,
        new_amount: u64,
    ) -> Result<()> {
        processor::edit_amount_per_wallet(ctx, wallet, new_amount)
    }

    /// Withdraws whatever the caller's strategy has newly released since
    /// the previous withdrawal.
    pub fn vesting_withdraw(ctx: Context<VestingWithdraw>) -> Result<()> {
        processor::vesting_withdraw(ctx)
    }

    /// Claims the caller's pro-rata share of the hourly reward stream for
    /// every whole hour since their last claim.
    pub fn get_reward(ctx: Context<GetReward>) -> Result<()> {
        processor::get_reward(ctx)
    }
}
