use anchor_lang::prelude::*;
use anchor_spl::token_interface::{TokenAccount, TokenInterface};
use cp_amm::state::Config;

use crate::const_pda::const_authority::{DAMM_POOL_AUTHORITY, VAULT_BUMP};
use crate::constants::*;
use crate::errors::FairLaunchError;
use crate::events::Launched;
use crate::state::{DexKind, GlobalConfig, TokenLaunch};
use crate::utils::{DammV2Adapter, DammV2PoolAccounts, DammV2SwapAccounts, DexAdapter};

#[derive(Accounts)]
pub struct Launch<'info> {
    #[account(
        mut,
        constraint = executor.key() == global_config.executor @ FairLaunchError::OnlyExecutor,
    )]
    pub executor: Signer<'info>,

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

    /// CHECK: vault authority
    #[account(
        mut,
        seeds = [VAULT_AUTHORITY.as_ref()],
        bump,
    )]
    pub vault_authority: SystemAccount<'info>,

    #[account(
        mut,
        address = token_launch.token_vault @ FairLaunchError::InvalidTokenVault,
        token::authority = vault_authority,
        token::token_program = token_program,
    )]
    pub token_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        mut,
        address = token_launch.quote_vault @ FairLaunchError::InvalidQuoteVault,
        token::authority = vault_authority,
        token::token_program = token_program,
    )]
    pub quote_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    /// CHECK: launched token mint
    #[account(
        mut,
        address = token_launch.token_mint @ FairLaunchError::InvalidTokenMint,
    )]
    pub token_mint: UncheckedAccount<'info>,

    /// CHECK: quote token mint
    #[account(
        mut,
        address = anchor_spl::token::spl_token::native_mint::ID @ FairLaunchError::InvalidQuoteMint,
    )]
    pub wsol_mint: UncheckedAccount<'info>,

    /// CHECK: allowlisted AMM program, checked in the handler
    pub amm_program: UncheckedAccount<'info>,

    /// CHECK: pool authority
    #[account(address = DAMM_POOL_AUTHORITY)]
    pub damm_pool_authority: UncheckedAccount<'info>,

    /// CHECK: damm event authority
    pub damm_event_authority: UncheckedAccount<'info>,

    // ===== New pool =====
    /// CHECK: pool config
    pub pool_config: AccountLoader<'info, Config>,

    /// CHECK: pool
    #[account(mut)]
    pub pool: UncheckedAccount<'info>,

    /// CHECK: position nft mint
    #[account(mut, signer)]
    pub position_nft_mint: UncheckedAccount<'info>,

    /// CHECK: position nft account
    #[account(mut)]
    pub position_nft_account: UncheckedAccount<'info>,

    /// CHECK:
    #[account(mut)]
    pub position: UncheckedAccount<'info>,

    /// CHECK: owner of the position nft
    #[account(
        address = token_launch.tokenomics.lp_recipient @ FairLaunchError::InvalidRecipient,
    )]
    pub lp_recipient: UncheckedAccount<'info>,

    /// CHECK:
    #[account(mut)]
    pub token_a_vault: UncheckedAccount<'info>,

    /// CHECK:
    #[account(mut)]
    pub token_b_vault: UncheckedAccount<'info>,

    // ===== Partner swap, only needed when a protocol fee is due =====
    /// CHECK: partner pool, checked against the config
    #[account(
        mut,
        address = global_config.partner_swap.pool @ FairLaunchError::InvalidParam,
    )]
    pub partner_pool: Option<UncheckedAccount<'info>>,

    /// CHECK:
    #[account(mut)]
    pub partner_token_a_vault: Option<UncheckedAccount<'info>>,

    /// CHECK:
    #[account(mut)]
    pub partner_token_b_vault: Option<UncheckedAccount<'info>>,

    /// CHECK:
    pub partner_token_a_mint: Option<UncheckedAccount<'info>>,

    /// CHECK:
    pub partner_token_b_mint: Option<UncheckedAccount<'info>>,

    pub partner_token_a_program: Option<Interface<'info, TokenInterface>>,

    pub partner_token_b_program: Option<Interface<'info, TokenInterface>>,

    /// Fee recipient's partner token account, checked in the handler
    #[account(mut)]
    pub fee_recipient_partner_account: Option<Box<InterfaceAccount<'info, TokenAccount>>>,

    pub token_program: Interface<'info, TokenInterface>,
    pub token_2022_program: Interface<'info, TokenInterface>,
    pub system_program: Program<'info, System>,
}

impl<'info> Launch<'info> {
    fn partner_swap_accounts(&self) -> Option<DammV2SwapAccounts<'info>> {
        Some(DammV2SwapAccounts {
            pool: self.partner_pool.as_ref()?.to_account_info(),
            input_token_account: self.quote_vault.to_account_info(),
            output_token_account: self.fee_recipient_partner_account.as_ref()?.to_account_info(),
            token_a_vault: self.partner_token_a_vault.as_ref()?.to_account_info(),
            token_b_vault: self.partner_token_b_vault.as_ref()?.to_account_info(),
            token_a_mint: self.partner_token_a_mint.as_ref()?.to_account_info(),
            token_b_mint: self.partner_token_b_mint.as_ref()?.to_account_info(),
            token_a_program: self.partner_token_a_program.as_ref()?.to_account_info(),
            token_b_program: self.partner_token_b_program.as_ref()?.to_account_info(),
        })
    }

    fn damm_v2_adapter(&self) -> Result<DammV2Adapter<'info>> {
        let config = self.pool_config.load()?;
        let (sqrt_min_price, sqrt_max_price) = (config.sqrt_min_price, config.sqrt_max_price);
        drop(config);

        Ok(DammV2Adapter {
            program: self.amm_program.to_account_info(),
            event_authority: self.damm_event_authority.to_account_info(),
            pool_authority: self.damm_pool_authority.to_account_info(),
            payer: self.vault_authority.to_account_info(),
            swap: self.partner_swap_accounts(),
            seed: Some(DammV2PoolAccounts {
                creator: self.lp_recipient.to_account_info(),
                position_nft_mint: self.position_nft_mint.to_account_info(),
                position_nft_account: self.position_nft_account.to_account_info(),
                config: self.pool_config.to_account_info(),
                sqrt_min_price,
                sqrt_max_price,
                pool: self.pool.to_account_info(),
                position: self.position.to_account_info(),
                token_a_mint: self.token_mint.to_account_info(),
                token_b_mint: self.wsol_mint.to_account_info(),
                token_a_vault: self.token_a_vault.to_account_info(),
                token_b_vault: self.token_b_vault.to_account_info(),
                payer_token_a: self.token_vault.to_account_info(),
                payer_token_b: self.quote_vault.to_account_info(),
                token_a_program: self.token_program.to_account_info(),
                token_b_program: self.token_program.to_account_info(),
                token_2022_program: self.token_2022_program.to_account_info(),
                system_program: self.system_program.to_account_info(),
            }),
        })
    }

    /// Keep enough lamports on the vault authority for the AMM accounts it pays for
    fn fund_vault_authority(&self) -> Result<()> {
        let balance = self.vault_authority.lamports();
        if balance >= LAUNCH_RENT_BUDGET {
            return Ok(());
        }

        anchor_lang::system_program::transfer(
            CpiContext::new(
                self.system_program.to_account_info(),
                anchor_lang::system_program::Transfer {
                    from: self.executor.to_account_info(),
                    to: self.vault_authority.to_account_info(),
                },
            ),
            LAUNCH_RENT_BUDGET - balance,
        )
    }

    pub fn launch(&mut self, min_partner_token_out: u64, sqrt_price: u128) -> Result<()> {
        let global_config = &self.global_config;
        let current_time = Clock::get()?.unix_timestamp;

        global_config.suspend.check_launch()?;
        self.token_launch.check_can_launch(current_time)?;
        let kind = global_config.dex_kind_of(&self.amm_program.key())?;

        let plan = self.token_launch.plan_launch(global_config.fees.launch_protocol_fees_bps)?;
        let lp_token_amount = self.token_launch.tokenomics.amt_for_lp;

        // Latch before any transfer
        self.token_launch.mark_launched(current_time)?;

        self.fund_vault_authority()?;

        let adapter = match kind {
            DexKind::DammV2 => self.damm_v2_adapter()?,
        };
        let signer_seeds: &[&[&[u8]]] = &[&[VAULT_AUTHORITY, &[VAULT_BUMP]]];

        let mut partner_token_out = 0;
        if plan.protocol_fee > 0 {
            let payout = self.fee_recipient_partner_account
                .as_ref()
                .ok_or(FairLaunchError::MissingDexAccount)?;
            self.global_config.partner_swap.check_payout_account(
                &payout.mint,
                &payout.owner,
                &self.global_config.fees.fee_recipient,
            )?;
            let before = payout.amount;

            adapter.swap_exact_quote_in(plan.protocol_fee, min_partner_token_out, signer_seeds)?;

            let payout = self.fee_recipient_partner_account
                .as_mut()
                .ok_or(FairLaunchError::MissingDexAccount)?;
            payout.reload()?;

            partner_token_out = payout.amount
                .checked_sub(before)
                .ok_or(FairLaunchError::MathOverflow)?;

            msg!("Protocol fee {} swapped for {} partner tokens", plan.protocol_fee, partner_token_out);
        }

        let token_before = self.token_vault.amount;
        let quote_before = self.quote_vault.amount;

        let liquidity = adapter.seed_liquidity(
            lp_token_amount,
            plan.liquidity_eth,
            sqrt_price,
            signer_seeds,
        )?;

        self.token_vault.reload()?;
        self.quote_vault.reload()?;

        let token_amount = token_before
            .checked_sub(self.token_vault.amount)
            .ok_or(FairLaunchError::MathOverflow)?;
        let eth_amount = quote_before
            .checked_sub(self.quote_vault.amount)
            .ok_or(FairLaunchError::MathOverflow)?;

        emit!(Launched {
            token: self.token_launch.token_mint,
            pool: self.pool.key(),
            liquidity,
            token_amount,
            eth_amount,
            protocol_fee: plan.protocol_fee,
            min_partner_token_out,
            partner_token_out,
        });

        msg!("Launched {} at {}", self.token_launch.token_mint, current_time);
        msg!("Pool: {}, liquidity: {}", self.pool.key(), liquidity);
        msg!("Seeded {} tokens and {} lamports", token_amount, eth_amount);

        Ok(())
    }
}
