use anchor_lang::prelude::*;
use anchor_spl::associated_token::AssociatedToken;
use anchor_spl::metadata::{create_metadata_accounts_v3, CreateMetadataAccountsV3, Metadata};
use anchor_spl::token::{self, Mint, Token, TokenAccount};
use anchor_spl::token_interface::{self, TokenInterface};
use mpl_token_metadata::types::DataV2;

use crate::const_pda::const_authority::{DAMM_POOL_AUTHORITY, VAULT_BUMP};
use crate::constants::*;
use crate::errors::FairLaunchError;
use crate::events::{AirdropFunded, LaunchCreated};
use crate::state::{
    DexKind, FeeRoute, GlobalConfig, LaunchState, PresaleConfig, TokenConfig, TokenLaunch,
    TokenomicsConfig,
};
use crate::utils::{
    validate_presale_config, validate_token_config, validate_tokenomics_config, DammV2Adapter,
    DammV2SwapAccounts, DexAdapter,
};

#[derive(AnchorSerialize, AnchorDeserialize)]
pub struct NewFairLaunchParams {
    pub token: TokenConfig,
    pub presale: PresaleConfig,
    pub tokenomics: TokenomicsConfig,
    /// Slippage floor when the creation fee is sold for the partner token
    pub min_partner_token_out: u64,
}

#[derive(Accounts)]
pub struct NewFairLaunch<'info> {
    #[account(mut)]
    pub creator: Signer<'info>,

    /// Global configuration account
    #[account(
        mut,
        seeds = [GLOBAL_CONFIG_SEED],
        bump = global_config.bump,
    )]
    pub global_config: Box<Account<'info, GlobalConfig>>,

    /// Token launch account
    #[account(
        init,
        payer = creator,
        space = TokenLaunch::SIZE,
        seeds = [TOKEN_LAUNCH_SEED, creator.key().as_ref(), &global_config.launch_count.to_le_bytes()],
        bump,
    )]
    pub token_launch: Box<Account<'info, TokenLaunch>>,

    /// vault authority
    #[account(
        mut,
        seeds = [VAULT_AUTHORITY.as_ref()],
        bump,
    )]
    pub vault_authority: SystemAccount<'info>,

    #[account(
        init,
        payer = creator,
        seeds = [TOKEN_MINT_SEED, token_launch.key().as_ref()],
        bump,
        mint::decimals = TOKEN_DECIMALS,
        mint::authority = token_launch.key(),
    )]
    pub token_mint: Box<Account<'info, Mint>>,

    /// Launch token vault
    #[account(
        init,
        payer = creator,
        seeds = [TOKEN_VAULT, vault_authority.key().as_ref(), token_mint.key().as_ref()],
        bump,
        token::mint = token_mint,
        token::authority = vault_authority,
    )]
    pub token_vault: Box<Account<'info, TokenAccount>>,

    /// CHECK: WSOL mint (verified by address)
    #[account(
        address = anchor_spl::token::spl_token::native_mint::ID
    )]
    pub wsol_mint: Box<Account<'info, Mint>>,

    /// Launch WSOL vault (raised capital)
    #[account(
        init,
        payer = creator,
        seeds = [QUOTE_VAULT, token_launch.key().as_ref()],
        bump,
        token::mint = wsol_mint,
        token::authority = vault_authority,
    )]
    pub quote_vault: Box<Account<'info, TokenAccount>>,

    /// CHECK: receives the creation fee, checked against the config
    #[account(
        mut,
        address = global_config.fees.fee_recipient @ FairLaunchError::InvalidRecipient,
        constraint = fee_recipient.key() != Pubkey::default() @ FairLaunchError::ZeroAddress,
    )]
    pub fee_recipient: UncheckedAccount<'info>,

    /// CHECK: airdrop distributor, checked against the config
    #[account(
        address = global_config.airdropper @ FairLaunchError::InvalidRecipient,
        constraint = airdropper.key() != Pubkey::default() @ FairLaunchError::ZeroAddress,
    )]
    pub airdropper: UncheckedAccount<'info>,

    #[account(
        init_if_needed,
        payer = creator,
        associated_token::mint = token_mint,
        associated_token::authority = airdropper,
    )]
    pub airdropper_token_account: Box<Account<'info, TokenAccount>>,

    /// Token metadata account
    /// CHECK: Validated by Metaplex program
    #[account(
        mut,
        seeds = [
            b"metadata",
            metadata_program.key().as_ref(),
            token_mint.key().as_ref(),
        ],
        seeds::program = metadata_program.key(),
        bump,
    )]
    pub metadata: UncheckedAccount<'info>,

    // ===== Partner swap, only needed when the creation fee is swapped =====
    /// CHECK: allowlisted AMM program, checked in the handler
    pub amm_program: Option<UncheckedAccount<'info>>,

    /// CHECK: pool authority
    #[account(address = DAMM_POOL_AUTHORITY)]
    pub damm_pool_authority: Option<UncheckedAccount<'info>>,

    /// CHECK: damm event authority
    pub damm_event_authority: Option<UncheckedAccount<'info>>,

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
    pub fee_recipient_partner_account:
        Option<Box<InterfaceAccount<'info, token_interface::TokenAccount>>>,

    pub token_program: Program<'info, Token>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub metadata_program: Program<'info, Metadata>,
    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}

impl<'info> NewFairLaunch<'info> {
    fn partner_swap_adapter(&self) -> Result<DammV2Adapter<'info>> {
        let program = self.amm_program.as_ref().ok_or(FairLaunchError::MissingDexAccount)?;
        let kind = self.global_config.dex_kind_of(&program.key())?;

        let swap = || -> Option<DammV2SwapAccounts<'info>> {
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
        };

        match kind {
            DexKind::DammV2 => Ok(DammV2Adapter {
                program: program.to_account_info(),
                event_authority: self.damm_event_authority
                    .as_ref()
                    .ok_or(FairLaunchError::MissingDexAccount)?
                    .to_account_info(),
                pool_authority: self.damm_pool_authority
                    .as_ref()
                    .ok_or(FairLaunchError::MissingDexAccount)?
                    .to_account_info(),
                payer: self.vault_authority.to_account_info(),
                swap: Some(swap().ok_or(FairLaunchError::MissingDexAccount)?),
                seed: None,
            }),
        }
    }

    /// Charge the creation fee. Returns the partner tokens the fee recipient received.
    fn pay_create_fees(&mut self, create_fees: u64, min_partner_token_out: u64) -> Result<u64> {
        match self.global_config.partner_swap.fee_route(create_fees) {
            FeeRoute::Skip => Ok(0),
            FeeRoute::Lamports => {
                anchor_lang::system_program::transfer(
                    CpiContext::new(
                        self.system_program.to_account_info(),
                        anchor_lang::system_program::Transfer {
                            from: self.creator.to_account_info(),
                            to: self.fee_recipient.to_account_info(),
                        },
                    ),
                    create_fees,
                )?;

                Ok(0)
            }
            FeeRoute::PartnerSwap => {
                let payout = self.fee_recipient_partner_account
                    .as_ref()
                    .ok_or(FairLaunchError::MissingDexAccount)?;
                self.global_config.partner_swap.check_payout_account(
                    &payout.mint,
                    &payout.owner,
                    &self.global_config.fees.fee_recipient,
                )?;
                let before = payout.amount;

                // Wrap the fee in the fresh quote vault, then sell it
                anchor_lang::system_program::transfer(
                    CpiContext::new(
                        self.system_program.to_account_info(),
                        anchor_lang::system_program::Transfer {
                            from: self.creator.to_account_info(),
                            to: self.quote_vault.to_account_info(),
                        },
                    ),
                    create_fees,
                )?;
                token::sync_native(CpiContext::new(
                    self.token_program.to_account_info(),
                    token::SyncNative {
                        account: self.quote_vault.to_account_info(),
                    },
                ))?;

                let signer_seeds: &[&[&[u8]]] = &[&[VAULT_AUTHORITY, &[VAULT_BUMP]]];
                self.partner_swap_adapter()?
                    .swap_exact_quote_in(create_fees, min_partner_token_out, signer_seeds)?;

                let payout = self.fee_recipient_partner_account
                    .as_mut()
                    .ok_or(FairLaunchError::MissingDexAccount)?;
                payout.reload()?;

                let received = payout.amount
                    .checked_sub(before)
                    .ok_or(FairLaunchError::MathOverflow)?;

                msg!("Creation fee {} swapped for {} partner tokens", create_fees, received);

                Ok(received)
            }
        }
    }
}

pub fn new_fair_launch(ctx: Context<NewFairLaunch>, params: NewFairLaunchParams) -> Result<()> {
    let clock = Clock::get()?;
    let NewFairLaunchParams {
        token: token_cfg,
        presale,
        tokenomics,
        min_partner_token_out,
    } = params;

    validate_token_config(&token_cfg)?;
    validate_presale_config(&presale, clock.unix_timestamp)?;
    validate_tokenomics_config(&tokenomics, token_cfg.total_supply)?;

    let create_fees = ctx.accounts.global_config.fees.create_fees;
    let partner_token_out = ctx.accounts.pay_create_fees(create_fees, min_partner_token_out)?;

    let global_config = &mut ctx.accounts.global_config;

    let token_launch = &mut ctx.accounts.token_launch;
    token_launch.creator = ctx.accounts.creator.key();
    token_launch.token_mint = ctx.accounts.token_mint.key();
    token_launch.token_vault = ctx.accounts.token_vault.key();
    token_launch.quote_vault = ctx.accounts.quote_vault.key();
    token_launch.index = global_config.launch_count;
    token_launch.bump = ctx.bumps.token_launch;
    token_launch.total_supply = token_cfg.total_supply;
    token_launch.presale = presale;
    token_launch.tokenomics = tokenomics;
    token_launch.launch_state = LaunchState::Presale;

    // The launch account is mint and metadata authority
    let creator_key = ctx.accounts.creator.key();
    let index_bytes = global_config.launch_count.to_le_bytes();
    let seeds = &[
        TOKEN_LAUNCH_SEED,
        creator_key.as_ref(),
        &index_bytes,
        &[token_launch.bump],
    ];
    let signer_seeds = &[&seeds[..]];

    token::mint_to(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            token::MintTo {
                mint: ctx.accounts.token_mint.to_account_info(),
                to: ctx.accounts.token_vault.to_account_info(),
                authority: token_launch.to_account_info(),
            },
            signer_seeds,
        ),
        token_cfg.total_supply,
    )?;

    let metadata_accounts = CreateMetadataAccountsV3 {
        metadata: ctx.accounts.metadata.to_account_info(),
        mint: ctx.accounts.token_mint.to_account_info(),
        mint_authority: token_launch.to_account_info(),
        payer: ctx.accounts.creator.to_account_info(),
        update_authority: token_launch.to_account_info(),
        system_program: ctx.accounts.system_program.to_account_info(),
        rent: ctx.accounts.rent.to_account_info(),
    };

    let data = DataV2 {
        name: token_cfg.name.clone(),
        symbol: token_cfg.symbol.clone(),
        uri: token_cfg.uri,
        seller_fee_basis_points: 0,
        creators: None,
        collection: None,
        uses: None,
    };

    create_metadata_accounts_v3(
        CpiContext::new_with_signer(
            ctx.accounts.metadata_program.to_account_info(),
            metadata_accounts,
            signer_seeds,
        ),
        data,
        false, // is_mutable
        true,  // update_authority_is_signer
        None,  // collection_details
    )?;

    // Supply is fixed from here on
    token::set_authority(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            token::SetAuthority {
                current_authority: token_launch.to_account_info(),
                account_or_mint: ctx.accounts.token_mint.to_account_info(),
            },
            signer_seeds,
        ),
        token::spl_token::instruction::AuthorityType::MintTokens,
        None,
    )?;

    if tokenomics.amt_for_airdrop > 0 {
        let vault_seeds: &[&[&[u8]]] = &[&[VAULT_AUTHORITY, &[VAULT_BUMP]]];

        token::transfer(
            CpiContext::new_with_signer(
                ctx.accounts.token_program.to_account_info(),
                token::Transfer {
                    from: ctx.accounts.token_vault.to_account_info(),
                    to: ctx.accounts.airdropper_token_account.to_account_info(),
                    authority: ctx.accounts.vault_authority.to_account_info(),
                },
                vault_seeds,
            ),
            tokenomics.amt_for_airdrop,
        )?;

        let release_end = presale.end_time
            .checked_add(tokenomics.airdrop_duration)
            .ok_or(FairLaunchError::MathOverflow)?;

        emit!(AirdropFunded {
            token: ctx.accounts.token_mint.key(),
            airdropper: ctx.accounts.airdropper.key(),
            amount: tokenomics.amt_for_airdrop,
            start_time: presale.end_time,
            end_time: release_end,
        });
    }

    global_config.launch_count = global_config.launch_count
        .checked_add(1)
        .ok_or(FairLaunchError::MathOverflow)?;

    emit!(LaunchCreated {
        token_launch: token_launch.key(),
        creator: creator_key,
        token: ctx.accounts.token_mint.key(),
        name: token_cfg.name,
        symbol: token_cfg.symbol,
        total_supply: token_cfg.total_supply,
        start_time: presale.start_time,
        end_time: presale.end_time,
        soft_cap: presale.soft_cap,
        hard_cap: presale.hard_cap,
        create_fees,
        min_partner_token_out,
        partner_token_out,
    });

    msg!("Fair launch created successfully");
    msg!("Token: {}", ctx.accounts.token_mint.key());
    msg!("Window: {} - {}", presale.start_time, presale.end_time);
    msg!("Soft cap: {} lamports, hard cap: {} lamports", presale.soft_cap, presale.hard_cap);

    Ok(())
}
