use anchor_lang::prelude::*;
use anchor_lang::solana_program::sysvar;
use anchor_spl::token::{self, Token, TokenAccount};

use crate::constants::*;
use crate::errors::FairLaunchError;
use crate::events::Participated;
use crate::state::{GlobalConfig, Participation, TokenLaunch};
use crate::utils::{authorize, calculate_invite_rewards, calculate_share_amount, ActionType};

#[derive(Accounts)]
#[instruction(timestamp: i64, signature: [u8; 64], inviter: Pubkey)]
pub struct Participate<'info> {
    #[account(mut)]
    pub user: Signer<'info>,

    /// Global configuration account
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

    /// Record of the recorded inviter, or of `inviter` on a first participation.
    /// Omitted when there is no inviter.
    #[account(
        init_if_needed,
        payer = user,
        space = Participation::SIZE,
        seeds = [
            PARTICIPATION_SEED,
            token_launch.key().as_ref(),
            participation.effective_inviter(&inviter).as_ref(),
        ],
        bump,
    )]
    pub inviter_participation: Option<Box<Account<'info, Participation>>>,

    /// Record of the inviter's own inviter, checked in the handler
    #[account(mut)]
    pub second_tier_participation: Option<Box<Account<'info, Participation>>>,

    /// Launch WSOL vault
    #[account(
        mut,
        address = token_launch.quote_vault @ FairLaunchError::InvalidQuoteVault,
    )]
    pub quote_vault: Box<Account<'info, TokenAccount>>,

    /// System variables account for Ed25519 signature verification
    /// CHECK: This is a system-provided instruction system variable
    #[account(address = sysvar::instructions::ID)]
    pub instructions_sysvar: UncheckedAccount<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

pub fn participate(
    ctx: Context<Participate>,
    timestamp: i64,
    signature: [u8; 64],
    inviter: Pubkey,
    eth_amount: u64,
) -> Result<()> {
    let global_config = &ctx.accounts.global_config;
    let token_launch = &mut ctx.accounts.token_launch;
    let user_key = ctx.accounts.user.key();
    let launch_key = token_launch.key();
    let clock = Clock::get()?;
    let current_time = clock.unix_timestamp;

    global_config.suspend.check_presale()?;
    token_launch.check_presale_window(current_time)?;

    authorize(
        &ctx.accounts.instructions_sysvar.to_account_info(),
        &global_config.sign,
        &token_launch.token_mint,
        &user_key,
        &inviter,
        timestamp,
        &signature,
        ActionType::Participate,
        current_time,
    )?;

    let participation = &mut ctx.accounts.participation;
    participation.init_if_new(launch_key, user_key, ctx.bumps.participation);
    let is_first_participation = !participation.has_participated();

    let chain = participation.resolve_invite_chain(
        &inviter,
        ctx.accounts.inviter_participation.as_deref().map(|record| &**record),
        ctx.accounts.second_tier_participation.as_deref().map(|record| &**record),
    )?;
    token_launch.check_contribution_amount(eth_amount)?;

    if let Some(record) = ctx.accounts.inviter_participation.as_deref_mut() {
        if record.user == Pubkey::default() {
            let (_, bump) = Pubkey::find_program_address(
                &[PARTICIPATION_SEED, launch_key.as_ref(), chain.inviter.as_ref()],
                &crate::ID,
            );
            record.init_if_new(launch_key, chain.inviter, bump);
        }
    }

    let share_amt = calculate_share_amount(
        token_launch.total_raised,
        eth_amount,
        token_launch.presale.hard_cap,
        token_launch.presale.overfunding_discount_bps,
    )?;

    let rewards = calculate_invite_rewards(
        eth_amount,
        chain.has_inviter(),
        chain.has_second_tier(),
        global_config.fees.direct_invite_fees_bps,
        global_config.fees.second_tier_invite_fees_bps,
    )?;

    // Update ledger
    participation.record_contribution(chain.inviter, eth_amount, share_amt, current_time)?;
    token_launch.record_contribution(eth_amount, share_amt, rewards.total()?)?;
    if is_first_participation {
        token_launch.participants_count = token_launch.participants_count
            .checked_add(1)
            .ok_or(FairLaunchError::MathOverflow)?;
    }

    participation.credit_invite_rewards(
        &chain,
        &rewards,
        ctx.accounts.inviter_participation.as_deref_mut().map(|record| &mut **record),
        ctx.accounts.second_tier_participation.as_deref_mut().map(|record| &mut **record),
    )?;

    // Transfer SOL to vault
    anchor_lang::system_program::transfer(
        CpiContext::new(
            ctx.accounts.system_program.to_account_info(),
            anchor_lang::system_program::Transfer {
                from: ctx.accounts.user.to_account_info(),
                to: ctx.accounts.quote_vault.to_account_info(),
            },
        ),
        eth_amount,
    )?;
    token::sync_native(CpiContext::new(
        ctx.accounts.token_program.to_account_info(),
        token::SyncNative {
            account: ctx.accounts.quote_vault.to_account_info(),
        },
    ))?;

    emit!(Participated {
        token: token_launch.token_mint,
        user: user_key,
        inviter: chain.inviter,
        eth_amount,
        share_amt,
        direct_reward: rewards.direct,
        second_tier_reward: rewards.second_tier,
        total_raised: token_launch.total_raised,
    });

    msg!("User {} contributed {} lamports, share {}", user_key, eth_amount, share_amt);

    Ok(())
}
