use crate::account_structs::*;
use crate::error::*;
use crate::events::*;
use crate::guard;
use crate::rewards;
use crate::state::{ProgramPhase, VestingStrategy, PER_WALLET_STAKE_CEILING};
use crate::vesting;
use anchor_lang::prelude::*;
use anchor_spl::token::spl_token::instruction::AuthorityType;
use anchor_spl::token::{self, Transfer};

pub fn initialize(ctx: Context<Initialize>) -> Result<()> {
    let ledger = &mut ctx.accounts.ledger;
    ledger.operator = ctx.accounts.signer.key();
    ledger.stake_mint = ctx.accounts.stake_mint.key();
    ledger.vault = ctx.accounts.vault_token_account.key();
    ledger.phase = ProgramPhase::NotStarted;
    ledger.reward_per_hour = 0;
    ledger.reward_pool = None;
    ledger.starting_timestamp = 0;
    ledger.total_value_locked = 0;
    ledger.strategies = Vec::new();
    ledger.whitelist = Vec::new();
    ledger.stakes = Vec::new();
    ledger.bump = ctx.bumps.ledger;

    // The vault token account must end up owned by the vault_authority PDA
    // so that only this program can move escrowed tokens out of it. Only
    // hand it over when the signer still owns it.
    if ctx.accounts.vault_token_account.owner == ctx.accounts.signer.key() {
        token::set_authority(
            CpiContext::new(
                ctx.accounts.token_program.to_account_info(),
                token::SetAuthority {
                    account_or_mint: ctx.accounts.vault_token_account.to_account_info(),
                    current_authority: ctx.accounts.signer.to_account_info(),
                },
            ),
            AuthorityType::AccountOwner,
            Some(ctx.accounts.vault_authority.key()),
        )?;
    }
    Ok(())
}

pub fn create_strategy(
    ctx: Context<CreateStrategy>,
    cliff_days: u64,
    vesting_days: u64,
    kind: u8,
) -> Result<()> {
    guard::require_operator(&ctx.accounts.ledger, &ctx.accounts.signer.key())?;

    let strategy = VestingStrategy::from_days(cliff_days, vesting_days, kind)?;
    let id = ctx.accounts.ledger.add_strategy(strategy)?;

    emit!(StrategyCreated {
        id,
        cliff_seconds: strategy.cliff_seconds,
        vesting_seconds: strategy.vesting_seconds,
        kind,
    });

    Ok(())
}

pub fn add_to_whitelist(ctx: Context<ModifyWhitelist>, accounts: Vec<Pubkey>) -> Result<()> {
    guard::require_operator(&ctx.accounts.ledger, &ctx.accounts.signer.key())?;

    let ledger = &mut ctx.accounts.ledger;
    for account in accounts {
        if ledger.add_to_whitelist(account)? {
            emit!(WhitelistChanged {
                account,
                added: true,
            });
        }
    }
    Ok(())
}

pub fn delete_from_whitelist(ctx: Context<ModifyWhitelist>, account: Pubkey) -> Result<()> {
    guard::require_operator(&ctx.accounts.ledger, &ctx.accounts.signer.key())?;

    ctx.accounts.ledger.remove_from_whitelist(&account)?;
    emit!(WhitelistChanged {
        account,
        added: false,
    });
    Ok(())
}

pub fn init_allocations(
    ctx: Context<InitAllocations>,
    accounts: Vec<Pubkey>,
    amounts: Vec<u64>,
    strategy_ids: Vec<u64>,
) -> Result<()> {
    guard::require_operator(&ctx.accounts.ledger, &ctx.accounts.signer.key())?;
    require!(
        accounts.len() == amounts.len() && amounts.len() == strategy_ids.len(),
        StakingError::LengthMismatch
    );

    let now = Clock::get()?.unix_timestamp;
    let ledger = &mut ctx.accounts.ledger;

    // Validate the whole batch before touching any record.
    for (amount, strategy_id) in amounts.iter().zip(strategy_ids.iter()) {
        require!(
            *amount <= PER_WALLET_STAKE_CEILING,
            StakingError::LimitExceeded
        );
        ledger.strategy(*strategy_id)?;
    }

    for ((account, amount), strategy_id) in
        accounts.iter().zip(amounts.iter()).zip(strategy_ids.iter())
    {
        ledger.enroll(*account, *amount, *strategy_id, now)?;
    }

    emit!(AllocationsInitialized {
        count: accounts.len() as u64,
        total_value_locked: ledger.total_value_locked,
    });

    Ok(())
}

pub fn start(ctx: Context<Start>, reward_per_hour: u64, reward_pool: Option<u64>) -> Result<()> {
    guard::require_operator(&ctx.accounts.ledger, &ctx.accounts.signer.key())?;
    guard::require_not_started(&ctx.accounts.ledger)?;

    let now = Clock::get()?.unix_timestamp;
    let ledger = &mut ctx.accounts.ledger;
    ledger.reward_per_hour = reward_per_hour;
    ledger.reward_pool = reward_pool;
    ledger.starting_timestamp = now;
    ledger.phase = ProgramPhase::Started;

    msg!("Program started; reward per hour: {}", reward_per_hour);

    emit!(ProgramStarted {
        reward_per_hour,
        reward_pool,
        starting_timestamp: now,
    });

    Ok(())
}

pub fn add_additional_reward(ctx: Context<AddAdditionalReward>, amount: u64) -> Result<()> {
    guard::require_operator(&ctx.accounts.ledger, &ctx.accounts.signer.key())?;

    let ledger = &mut ctx.accounts.ledger;
    match ledger.reward_pool {
        Some(pool) => {
            ledger.reward_pool = Some(pool.checked_add(amount).ok_or(StakingError::Overflow)?);
        }
        None => {
            ledger.reward_per_hour = ledger
                .reward_per_hour
                .checked_add(amount)
                .ok_or(StakingError::Overflow)?;
        }
    }

    emit!(RewardIncreased {
        added: amount,
        reward_per_hour: ledger.reward_per_hour,
        reward_pool: ledger.reward_pool,
    });

    Ok(())
}

pub fn stake(ctx: Context<Stake>, amount: u64, strategy_id: u64) -> Result<()> {
    let signer = ctx.accounts.signer.key();
    guard::require_started(&ctx.accounts.ledger)?;
    guard::require_whitelisted(&ctx.accounts.ledger, &signer)?;
    require!(amount > 0, StakingError::InvalidParameter);
    ctx.accounts.ledger.strategy(strategy_id)?;

    let now = Clock::get()?.unix_timestamp;
    ctx.accounts.ledger.enroll(signer, amount, strategy_id, now)?;

    // Escrow the caller's tokens in the vault.
    token::transfer(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.user_token_account.to_account_info(),
                to: ctx.accounts.vault_token_account.to_account_info(),
                authority: ctx.accounts.signer.to_account_info(),
            },
        ),
        amount,
    )?;

    emit!(StakeCreated {
        owner: signer,
        amount,
        strategy_id,
        total_value_locked: ctx.accounts.ledger.total_value_locked,
    });

    Ok(())
}

pub fn edit_amount_per_wallet(
    ctx: Context<EditAmountPerWallet>,
    wallet: Pubkey,
    new_amount: u64,
) -> Result<()> {
    guard::require_operator(&ctx.accounts.ledger, &ctx.accounts.signer.key())?;

    ctx.accounts.ledger.edit_amount(&wallet, new_amount)?;
    msg!("Locked amount for {} set to {}", wallet, new_amount);
    Ok(())
}

pub fn vesting_withdraw(ctx: Context<VestingWithdraw>) -> Result<()> {
    let signer = ctx.accounts.signer.key();
    let now = Clock::get()?.unix_timestamp;

    let ledger = &mut ctx.accounts.ledger;
    let payable = vesting::withdraw(ledger, &signer, now)?;

    let record = *guard::require_stakeholder(ledger, &signer)?;
    let total_value_locked = ledger.total_value_locked;

    let seeds: &[&[u8]] = &[b"vault_authority", &[ctx.bumps.vault_authority]];
    let signer_seeds = &[&seeds[..]];
    token::transfer(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.vault_token_account.to_account_info(),
                to: ctx.accounts.user_token_account.to_account_info(),
                authority: ctx.accounts.vault_authority.to_account_info(),
            },
            signer_seeds,
        ),
        payable,
    )?;

    emit!(VestingReleased {
        owner: signer,
        amount: payable,
        remaining: record.amount,
        released_total: record.released,
        total_value_locked,
    });

    Ok(())
}

pub fn get_reward(ctx: Context<GetReward>) -> Result<()> {
    let signer = ctx.accounts.signer.key();
    let now = Clock::get()?.unix_timestamp;

    // The floor quotient may be zero for dust stakes; the claim still
    // settles and advances the checkpoint.
    let (payable, hours) = rewards::settle(&mut ctx.accounts.ledger, &signer, now)?;

    let seeds: &[&[u8]] = &[b"vault_authority", &[ctx.bumps.vault_authority]];
    let signer_seeds = &[&seeds[..]];
    token::transfer(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.vault_token_account.to_account_info(),
                to: ctx.accounts.user_token_account.to_account_info(),
                authority: ctx.accounts.vault_authority.to_account_info(),
            },
            signer_seeds,
        ),
        payable,
    )?;

    emit!(RewardPaid {
        owner: signer,
        amount: payable,
        hours: hours as u64,
    });

    Ok(())
}
