use anchor_lang::prelude::*;
use anchor_lang::solana_program::sysvar;

use crate::constants::*;
use crate::events::FreeClaimReserved;
use crate::state::{GlobalConfig, Participation, TokenLaunch};
use crate::utils::{authorize, ActionType};

#[derive(Accounts)]
pub struct ReserveFreeClaim<'info> {
    #[account(mut)]
    pub user: Signer<'info>,

    #[account(
        seeds = [GLOBAL_CONFIG_SEED],
        bump = global_config.bump,
    )]
    pub global_config: Box<Account<'info, GlobalConfig>>,

    #[account(
        mut,
        seeds = [TOKEN_LAUNCH_SEED, token_launch.creator.as_ref(), &token_launch.index.to_le_bytes()],
        bump = token_launch.bump,
    )]
    pub token_launch: Box<Account<'info, TokenLaunch>>,

    #[account(
        init_if_needed,
        payer = user,
        space = Participation::SIZE,
        seeds = [PARTICIPATION_SEED, token_launch.key().as_ref(), user.key().as_ref()],
        bump,
    )]
    pub participation: Box<Account<'info, Participation>>,

    /// CHECK: This is a system-provided instruction system variable
    #[account(address = sysvar::instructions::ID)]
    pub instructions_sysvar: UncheckedAccount<'info>,

    pub system_program: Program<'info, System>,
}

/// Take one slot of the free-claim pool for the caller
pub fn reserve_free_claim(
    ctx: Context<ReserveFreeClaim>,
    timestamp: i64,
    signature: [u8; 64],
) -> Result<()> {
    let global_config = &ctx.accounts.global_config;
    let token_launch = &mut ctx.accounts.token_launch;
    let participation = &mut ctx.accounts.participation;
    let user_key = ctx.accounts.user.key();
    let current_time = Clock::get()?.unix_timestamp;

    global_config.suspend.check_reserve()?;
    token_launch.check_presale_window(current_time)?;

    authorize(
        &ctx.accounts.instructions_sysvar.to_account_info(),
        &global_config.sign,
        &token_launch.token_mint,
        &user_key,
        &Pubkey::default(),
        timestamp,
        &signature,
        ActionType::Reserve,
        current_time,
    )?;

    participation.init_if_new(token_launch.key(), user_key, ctx.bumps.participation);
    participation.mark_reserved(current_time)?;
    token_launch.reserve_free_claim_slot()?;

    emit!(FreeClaimReserved {
        token: token_launch.token_mint,
        user: user_key,
        amount: token_launch.tokenomics.free_claim_per_user,
    });

    msg!(
        "Free claim reserved by {}, {} slots taken",
        user_key,
        token_launch.free_claim_reserved
    );

    Ok(())
}
