use anchor_lang::prelude::*;
use anchor_lang::solana_program::sysvar;
use anchor_spl::associated_token::AssociatedToken;
use anchor_spl::token::{self, CloseAccount, Mint, Token, TokenAccount, Transfer};

use crate::const_pda::const_authority::VAULT_BUMP;
use crate::constants::*;
use crate::errors::FairLaunchError;
use crate::events::Claimed;
use crate::state::{ClaimStatus, GlobalConfig, Participation, TokenLaunch};
use crate::utils::{authorize, ActionType};

#[derive(Accounts)]
pub struct Claims<'info> {
    #[account(mut)]
    pub user: Signer<'info>,

    #[account(
        seeds = [GLOBAL_CONFIG_SEED],
        bump = global_config.bump,
    )]
    pub global_config: Box<Account<'info, GlobalConfig>>,

    #[account(
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

    /// vault authority
    #[account(
        seeds = [VAULT_AUTHORITY.as_ref()],
        bump,
    )]
    pub vault_authority: SystemAccount<'info>,

    #[account(
        address = token_launch.token_mint @ FairLaunchError::InvalidTokenMint,
    )]
    pub token_mint: Box<Account<'info, Mint>>,

    /// Launch token vault
    #[account(
        mut,
        address = token_launch.token_vault @ FairLaunchError::InvalidTokenVault,
        token::authority = vault_authority,
    )]
    pub token_vault: Box<Account<'info, TokenAccount>>,

    /// Launch WSOL vault
    #[account(
        mut,
        address = token_launch.quote_vault @ FairLaunchError::InvalidQuoteVault,
        token::authority = vault_authority,
    )]
    pub quote_vault: Box<Account<'info, TokenAccount>>,

    /// CHECK: WSOL mint (verified by address)
    #[account(
        address = anchor_spl::token::spl_token::native_mint::ID
    )]
    pub wsol_mint: Box<Account<'info, Mint>>,

    /// User's token account to receive tokens
    #[account(
        init_if_needed,
        payer = user,
        associated_token::mint = token_mint,
        associated_token::authority = user,
    )]
    pub user_token_account: Box<Account<'info, TokenAccount>>,

    /// User's WSOL account to receive rewards and refunds
    #[account(
        init_if_needed,
        payer = user,
        associated_token::mint = wsol_mint,
        associated_token::authority = user,
    )]
    pub user_quote_account: Box<Account<'info, TokenAccount>>,

    /// CHECK: This is a system-provided instruction system variable
    #[account(address = sysvar::instructions::ID)]
    pub instructions_sysvar: UncheckedAccount<'info>,

    pub token_program: Program<'info, Token>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

/// Settle tokens, free claim, referral rewards and overfunding refund at once
pub fn claims(ctx: Context<Claims>, timestamp: i64, signature: [u8; 64]) -> Result<()> {
    let global_config = &ctx.accounts.global_config;
    let token_launch = &ctx.accounts.token_launch;
    let participation = &mut ctx.accounts.participation;
    let user_key = ctx.accounts.user.key();
    let current_time = Clock::get()?.unix_timestamp;

    authorize(
        &ctx.accounts.instructions_sysvar.to_account_info(),
        &global_config.sign,
        &token_launch.token_mint,
        &user_key,
        &Pubkey::default(),
        timestamp,
        &signature,
        ActionType::Claim,
        current_time,
    )?;

    global_config.suspend.check_claim()?;

    require!(token_launch.is_launched(), FairLaunchError::NotLaunched);
    require!(
        participation.claim_status == ClaimStatus::Unclaimed,
        FairLaunchError::AlreadyClaimed
    );

    participation.init_if_new(token_launch.key(), user_key, ctx.bumps.participation);
    let bundle = participation.entitlement(token_launch)?;
    require!(!bundle.is_empty(), FairLaunchError::ZeroAmount);

    participation.mark_claimed(current_time)?;

    msg!(
        "User claiming: {} tokens, {} free claim, {} invite reward, {} overfund refund",
        bundle.token_allocation,
        bundle.free_claim,
        bundle.invite_reward,
        bundle.overfund_refund
    );

    let signer_seeds: &[&[&[u8]]] = &[&[VAULT_AUTHORITY, &[VAULT_BUMP]]];

    let token_amount = bundle.token_amount()?;
    if token_amount > 0 {
        token::transfer(
            CpiContext::new_with_signer(
                ctx.accounts.token_program.to_account_info(),
                Transfer {
                    from: ctx.accounts.token_vault.to_account_info(),
                    to: ctx.accounts.user_token_account.to_account_info(),
                    authority: ctx.accounts.vault_authority.to_account_info(),
                },
                signer_seeds,
            ),
            token_amount,
        )?;
    }

    let quote_amount = bundle.quote_amount()?;
    if quote_amount > 0 {
        token::transfer(
            CpiContext::new_with_signer(
                ctx.accounts.token_program.to_account_info(),
                Transfer {
                    from: ctx.accounts.quote_vault.to_account_info(),
                    to: ctx.accounts.user_quote_account.to_account_info(),
                    authority: ctx.accounts.vault_authority.to_account_info(),
                },
                signer_seeds,
            ),
            quote_amount,
        )?;

        token::close_account(CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            CloseAccount {
                account: ctx.accounts.user_quote_account.to_account_info(),
                destination: ctx.accounts.user.to_account_info(),
                authority: ctx.accounts.user.to_account_info(),
            },
        ))?;
    }

    emit!(Claimed {
        token: token_launch.token_mint,
        user: user_key,
        token_allocation: bundle.token_allocation,
        free_claim: bundle.free_claim,
        invite_reward: bundle.invite_reward,
        overfund_refund: bundle.overfund_refund,
    });

    msg!("User rewards claimed successfully");

    Ok(())
}
