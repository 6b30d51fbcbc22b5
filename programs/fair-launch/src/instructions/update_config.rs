use anchor_lang::prelude::*;

use crate::constants::*;
use crate::errors::FairLaunchError;
use crate::events::{
    AirdropperUpdated, ExecutorUpdated, FeesConfigUpdated, PartnerSwapConfigUpdated,
    SignConfigUpdated, SupportedDexUpdated, SuspendConfigUpdated,
};
use crate::state::{DexKind, FeesConfig, GlobalConfig, PartnerSwapConfig, SignConfig, SuspendConfig};

/// Shared by every admin setter
#[derive(Accounts)]
pub struct UpdateConfig<'info> {
    #[account(mut)]
    pub admin: Signer<'info>,

    #[account(
        mut,
        seeds = [GLOBAL_CONFIG_SEED],
        bump = global_config.bump,
        constraint = global_config.admin == admin.key() @ FairLaunchError::Unauthorized,
    )]
    pub global_config: Box<Account<'info, GlobalConfig>>,
}

pub fn set_fees_config(ctx: Context<UpdateConfig>, fees: FeesConfig) -> Result<()> {
    fees.validate()?;

    let config = &mut ctx.accounts.global_config;
    let old = config.fees;
    config.fees = fees;

    emit!(FeesConfigUpdated { old, new: fees });

    msg!("Fees config updated, recipient: {}", fees.fee_recipient);

    Ok(())
}

pub fn set_sign_config(ctx: Context<UpdateConfig>, sign: SignConfig) -> Result<()> {
    sign.validate()?;

    let config = &mut ctx.accounts.global_config;
    let old = config.sign;
    config.sign = sign;

    emit!(SignConfigUpdated { old, new: sign });

    msg!("Sign config updated, issuer: {}", sign.issuer);

    Ok(())
}

pub fn set_suspend_config(ctx: Context<UpdateConfig>, suspend: SuspendConfig) -> Result<()> {
    let config = &mut ctx.accounts.global_config;
    let old = config.suspend;
    config.suspend = suspend;

    emit!(SuspendConfigUpdated { old, new: suspend });

    msg!("Suspend config updated");

    Ok(())
}

pub fn set_executor(ctx: Context<UpdateConfig>, executor: Pubkey) -> Result<()> {
    require_keys_neq!(executor, Pubkey::default(), FairLaunchError::ZeroAddress);

    let config = &mut ctx.accounts.global_config;
    let old = config.executor;
    config.executor = executor;

    emit!(ExecutorUpdated { old, new: executor });

    msg!("Executor updated: {}", executor);

    Ok(())
}

pub fn set_airdropper(ctx: Context<UpdateConfig>, airdropper: Pubkey) -> Result<()> {
    require_keys_neq!(airdropper, Pubkey::default(), FairLaunchError::ZeroAddress);

    let config = &mut ctx.accounts.global_config;
    let old = config.airdropper;
    config.airdropper = airdropper;

    emit!(AirdropperUpdated { old, new: airdropper });

    msg!("Airdropper updated: {}", airdropper);

    Ok(())
}

pub fn set_partner_swap_config(
    ctx: Context<UpdateConfig>,
    partner_swap: PartnerSwapConfig,
) -> Result<()> {
    partner_swap.validate()?;

    let config = &mut ctx.accounts.global_config;
    let old = config.partner_swap;
    config.partner_swap = partner_swap;

    emit!(PartnerSwapConfigUpdated { old, new: partner_swap });

    msg!("Partner swap config updated, pool: {}", partner_swap.pool);

    Ok(())
}

pub fn set_supported_dex(
    ctx: Context<UpdateConfig>,
    program: Pubkey,
    kind: DexKind,
    supported: bool,
) -> Result<()> {
    ctx.accounts
        .global_config
        .set_supported_dex(program, kind, supported)?;

    emit!(SupportedDexUpdated { program, kind, supported });

    msg!("Supported dex {}: {}", program, supported);

    Ok(())
}
