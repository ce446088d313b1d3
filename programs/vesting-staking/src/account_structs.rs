use crate::error::*;
use crate::state::*;
use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

#[derive(Accounts)]
pub struct Initialize<'info> {
    #[account(
        init,
        payer = signer,
        space = 8 + Ledger::INIT_SPACE,
        seeds = [b"ledger"],
        bump
    )]
    pub ledger: Account<'info, Ledger>,

    /// CHECK: PDA that owns the vault token account, validated by seeds.
    /// Holding the escrow under this authority is what keeps payouts
    /// program-gated: only instructions signing with these seeds can move
    /// tokens out of the vault.
    #[account(
        seeds = [b"vault_authority"],
        bump
    )]
    pub vault_authority: UncheckedAccount<'info>,

    /// The escrow account for all staked and reward tokens. May arrive
    /// still owned by the signer; initialize hands it to vault_authority.
    #[account(
        mut,
        constraint = vault_token_account.mint == stake_mint.key() @ StakingError::InvalidParameter,
        constraint = (vault_token_account.owner == signer.key()
            || vault_token_account.owner == vault_authority.key()) @ StakingError::InvalidParameter
    )]
    pub vault_token_account: Account<'info, TokenAccount>,

    pub stake_mint: Account<'info, Mint>,

    #[account(mut)]
    pub signer: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}

#[derive(Accounts)]
pub struct CreateStrategy<'info> {
    #[account(
        mut,
        seeds = [b"ledger"],
        bump = ledger.bump
    )]
    pub ledger: Account<'info, Ledger>,

    pub signer: Signer<'info>,
}

#[derive(Accounts)]
pub struct ModifyWhitelist<'info> {
    #[account(
        mut,
        seeds = [b"ledger"],
        bump = ledger.bump
    )]
    pub ledger: Account<'info, Ledger>,

    pub signer: Signer<'info>,
}

#[derive(Accounts)]
pub struct InitAllocations<'info> {
    #[account(
        mut,
        seeds = [b"ledger"],
        bump = ledger.bump
    )]
    pub ledger: Account<'info, Ledger>,

    pub signer: Signer<'info>,
}

#[derive(Accounts)]
pub struct Start<'info> {
    #[account(
        mut,
        seeds = [b"ledger"],
        bump = ledger.bump
    )]
    pub ledger: Account<'info, Ledger>,

    pub signer: Signer<'info>,
}

#[derive(Accounts)]
pub struct AddAdditionalReward<'info> {
    #[account(
        mut,
        seeds = [b"ledger"],
        bump = ledger.bump
    )]
    pub ledger: Account<'info, Ledger>,

    pub signer: Signer<'info>,
}

#[derive(Accounts)]
pub struct EditAmountPerWallet<'info> {
    #[account(
        mut,
        seeds = [b"ledger"],
        bump = ledger.bump
    )]
    pub ledger: Account<'info, Ledger>,

    pub signer: Signer<'info>,
}

#[derive(Accounts)]
pub struct Stake<'info> {
    #[account(
        mut,
        seeds = [b"ledger"],
        bump = ledger.bump
    )]
    pub ledger: Account<'info, Ledger>,

    #[account(
        mut,
        constraint = vault_token_account.key() == ledger.vault @ StakingError::InvalidParameter,
        constraint = vault_token_account.mint == ledger.stake_mint @ StakingError::InvalidParameter
    )]
    pub vault_token_account: Account<'info, TokenAccount>,

    #[account(
        mut,
        token::mint = ledger.stake_mint,
        constraint = user_token_account.owner == signer.key() @ StakingError::Forbidden
    )]
    pub user_token_account: Account<'info, TokenAccount>,

    pub signer: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

#[derive(Accounts)]
pub struct VestingWithdraw<'info> {
    #[account(
        mut,
        seeds = [b"ledger"],
        bump = ledger.bump
    )]
    pub ledger: Account<'info, Ledger>,

    #[account(
        mut,
        constraint = vault_token_account.key() == ledger.vault @ StakingError::InvalidParameter,
        constraint = vault_token_account.mint == ledger.stake_mint @ StakingError::InvalidParameter
    )]
    pub vault_token_account: Account<'info, TokenAccount>,

    /// CHECK: PDA vault authority, validated by seeds and by owning the
    /// vault token account.
    #[account(
        seeds = [b"vault_authority"],
        bump,
        constraint = vault_authority.key() == vault_token_account.owner @ StakingError::InvalidParameter
    )]
    pub vault_authority: UncheckedAccount<'info>,

    #[account(
        mut,
        token::mint = ledger.stake_mint,
        constraint = user_token_account.owner == signer.key() @ StakingError::Forbidden
    )]
    pub user_token_account: Account<'info, TokenAccount>,

    pub signer: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

#[derive(Accounts)]
pub struct GetReward<'info> {
    #[account(
        mut,
        seeds = [b"ledger"],
        bump = ledger.bump
    )]
    pub ledger: Account<'info, Ledger>,

    #[account(
        mut,
        constraint = vault_token_account.key() == ledger.vault @ StakingError::InvalidParameter,
        constraint = vault_token_account.mint == ledger.stake_mint @ StakingError::InvalidParameter
    )]
    pub vault_token_account: Account<'info, TokenAccount>,

    /// CHECK: PDA vault authority, validated by seeds and by owning the
    /// vault token account.
    #[account(
        seeds = [b"vault_authority"],
        bump,
        constraint = vault_authority.key() == vault_token_account.owner @ StakingError::InvalidParameter
    )]
    pub vault_authority: UncheckedAccount<'info>,

    #[account(
        mut,
        token::mint = ledger.stake_mint,
        constraint = user_token_account.owner == signer.key() @ StakingError::Forbidden
    )]
    pub user_token_account: Account<'info, TokenAccount>,

    pub signer: Signer<'info>,

    pub token_program: Program<'info, Token>,
}
