use anchor_lang::prelude::*;

use crate::constants::{
    BPS_DENOMINATOR, MAX_NAME_LENGTH, MAX_SYMBOL_LENGTH, MAX_URI_LENGTH, MIN_CONTRIBUTION,
    MIN_SOFT_CAP,
};
use crate::errors::FairLaunchError;
use crate::state::{PresaleConfig, TokenConfig, TokenomicsConfig};

/// Validate token parameters
pub fn validate_token_config(cfg: &TokenConfig) -> Result<()> {
    require!(cfg.total_supply > 0, FairLaunchError::InvalidTokenConfig);

    require!(
        !cfg.name.is_empty() && cfg.name.len() <= MAX_NAME_LENGTH,
        FairLaunchError::InvalidTokenConfig
    );

    require!(
        !cfg.symbol.is_empty() && cfg.symbol.len() <= MAX_SYMBOL_LENGTH,
        FairLaunchError::InvalidTokenConfig
    );

    require!(
        cfg.uri.len() <= MAX_URI_LENGTH,
        FairLaunchError::InvalidTokenConfig
    );

    Ok(())
}

/// Validate window, contribution bounds and caps
pub fn validate_presale_config(cfg: &PresaleConfig, current_time: i64) -> Result<()> {
    require!(
        cfg.start_time > current_time && cfg.end_time > cfg.start_time,
        FairLaunchError::InvalidTimeConfig
    );

    require!(
        cfg.personal_cap_min >= MIN_CONTRIBUTION,
        FairLaunchError::InvalidContributionConfig
    );

    require!(
        cfg.personal_cap_min <= cfg.personal_cap_max,
        FairLaunchError::InvalidContributionConfig
    );

    require!(
        cfg.personal_cap_max <= cfg.hard_cap,
        FairLaunchError::InvalidContributionConfig
    );

    require!(
        cfg.overfunding_discount_bps > 0
            && (cfg.overfunding_discount_bps as u64) < BPS_DENOMINATOR,
        FairLaunchError::InvalidContributionConfig
    );

    require!(
        cfg.soft_cap >= MIN_SOFT_CAP && cfg.soft_cap <= cfg.hard_cap,
        FairLaunchError::InvalidLaunchConfig
    );

    Ok(())
}

/// Validate the supply split
pub fn validate_tokenomics_config(cfg: &TokenomicsConfig, total_supply: u64) -> Result<()> {
    require_keys_neq!(
        cfg.lp_recipient,
        Pubkey::default(),
        FairLaunchError::ZeroAddress
    );

    let total = cfg.amt_for_presale
        .checked_add(cfg.amt_for_lp)
        .ok_or(FairLaunchError::MathOverflow)?
        .checked_add(cfg.amt_for_airdrop)
        .ok_or(FairLaunchError::MathOverflow)?
        .checked_add(cfg.amt_for_free_claim)
        .ok_or(FairLaunchError::MathOverflow)?;

    require!(
        total == total_supply,
        FairLaunchError::InvalidTokenomicsConfig
    );

    require!(
        cfg.amt_for_presale > 0 && cfg.amt_for_lp > 0,
        FairLaunchError::InvalidTokenomicsConfig
    );

    if cfg.amt_for_airdrop > 0 {
        require!(
            cfg.airdrop_duration > 0,
            FairLaunchError::InvalidTokenomicsConfig
        );
    }

    if cfg.amt_for_free_claim > 0 {
        require!(
            cfg.free_claim_per_user > 0 && cfg.free_claim_per_user <= cfg.amt_for_free_claim,
            FairLaunchError::InvalidTokenomicsConfig
        );
    }

    Ok(())
}
