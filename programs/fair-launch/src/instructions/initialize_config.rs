use anchor_lang::prelude::*;

use crate::constants::*;
use crate::errors::FairLaunchError;
use crate::state::{GlobalConfig, SignConfig};

#[derive(AnchorSerialize, AnchorDeserialize)]
pub struct InitializeConfigParams {
    pub executor: Pubkey,
    pub issuer: Pubkey,
    pub sign_valid_duration: Option<i64>, // Use default 10 minutes if not provided
}

#[derive(Accounts)]
pub struct InitializeConfig<'info> {
    #[account(mut)]
    pub admin: Signer<'info>,

    #[account(
        init,
        payer = admin,
        space = GlobalConfig::SIZE,
        seeds = [GLOBAL_CONFIG_SEED],
        bump,
    )]
    pub global_config: Box<Account<'info, GlobalConfig>>,

    pub system_program: Program<'info, System>,
}

pub fn initialize_config(
    ctx: Context<InitializeConfig>,
    params: InitializeConfigParams,
) -> Result<()> {
    require_keys_neq!(params.executor, Pubkey::default(), FairLaunchError::ZeroAddress);

    let sign = SignConfig {
        issuer: params.issuer,
        valid_duration: params.sign_valid_duration.unwrap_or(DEFAULT_SIGN_VALID_DURATION),
    };
    sign.validate()?;

    let config = &mut ctx.accounts.global_config;
    config.initialize_defaults(
        ctx.accounts.admin.key(),
        params.executor,
        sign,
        ctx.bumps.global_config,
    );

    msg!("Global config initialized successfully");
    msg!("Admin: {}", config.admin);
    msg!("Executor: {}", config.executor);
    msg!("Issuer: {}", config.sign.issuer);

    Ok(())
}
