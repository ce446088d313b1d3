use crate::error::StakingError;
use crate::state::{Ledger, ProgramPhase, StakeRecord};
use anchor_lang::prelude::*;

/// The operator capability: the key recorded at initialization is the only
/// caller admitted to administrative instructions.
pub fn require_operator(ledger: &Ledger, signer: &Pubkey) -> Result<()> {
    require_keys_eq!(ledger.operator, *signer, StakingError::Forbidden);
    Ok(())
}

pub fn require_not_started(ledger: &Ledger) -> Result<()> {
    require!(
        ledger.phase == ProgramPhase::NotStarted,
        StakingError::InvalidState
    );
    Ok(())
}

pub fn require_started(ledger: &Ledger) -> Result<()> {
    require!(
        ledger.phase == ProgramPhase::Started,
        StakingError::InvalidState
    );
    Ok(())
}

pub fn require_whitelisted(ledger: &Ledger, who: &Pubkey) -> Result<()> {
    require!(ledger.is_whitelisted(who), StakingError::Forbidden);
    Ok(())
}

/// Resolves the caller's stake record; callers that never enrolled are
/// turned away rather than treated as zero-stake participants.
pub fn require_stakeholder<'a>(ledger: &'a Ledger, who: &Pubkey) -> Result<&'a StakeRecord> {
    ledger
        .stake_of(who)
        .ok_or_else(|| StakingError::Forbidden.into())
}
