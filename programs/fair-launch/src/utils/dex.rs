use anchor_lang::prelude::*;

use crate::errors::FairLaunchError;
use crate::utils::pool_liquidity::get_liquidity_for_adding_liquidity;

/// What the launch needs from an AMM. Every call is signed by the vault
/// authority, which owns both vaults.
pub trait DexAdapter {
    /// Sell exactly `amount_in` WSOL into an existing pool.
    /// Slippage failures are the AMM's own errors.
    fn swap_exact_quote_in(
        &self,
        amount_in: u64,
        minimum_amount_out: u64,
        signer_seeds: &[&[&[u8]]],
    ) -> Result<()>;

    /// Open a pool seeded with `base_amount` tokens and `quote_amount` WSOL.
    /// Returns the liquidity requested from the AMM.
    fn seed_liquidity(
        &self,
        base_amount: u64,
        quote_amount: u64,
        sqrt_price: u128,
        signer_seeds: &[&[&[u8]]],
    ) -> Result<u128>;
}

/// Accounts of a DAMM v2 swap
pub struct DammV2SwapAccounts<'info> {
    pub pool: AccountInfo<'info>,
    pub input_token_account: AccountInfo<'info>,
    pub output_token_account: AccountInfo<'info>,
    pub token_a_vault: AccountInfo<'info>,
    pub token_b_vault: AccountInfo<'info>,
    pub token_a_mint: AccountInfo<'info>,
    pub token_b_mint: AccountInfo<'info>,
    pub token_a_program: AccountInfo<'info>,
    pub token_b_program: AccountInfo<'info>,
}

/// Accounts of a DAMM v2 pool creation, token A is the launched token
pub struct DammV2PoolAccounts<'info> {
    /// Owner of the position NFT
    pub creator: AccountInfo<'info>,
    pub position_nft_mint: AccountInfo<'info>,
    pub position_nft_account: AccountInfo<'info>,
    pub config: AccountInfo<'info>,
    pub sqrt_min_price: u128,
    pub sqrt_max_price: u128,
    pub pool: AccountInfo<'info>,
    pub position: AccountInfo<'info>,
    pub token_a_mint: AccountInfo<'info>,
    pub token_b_mint: AccountInfo<'info>,
    pub token_a_vault: AccountInfo<'info>,
    pub token_b_vault: AccountInfo<'info>,
    pub payer_token_a: AccountInfo<'info>,
    pub payer_token_b: AccountInfo<'info>,
    pub token_a_program: AccountInfo<'info>,
    pub token_b_program: AccountInfo<'info>,
    pub token_2022_program: AccountInfo<'info>,
    pub system_program: AccountInfo<'info>,
}

/// Meteora DAMM v2 (cp-amm) through CPI. Callers pass only the account
/// groups they need; a call without its group fails with `MissingDexAccount`.
pub struct DammV2Adapter<'info> {
    pub program: AccountInfo<'info>,
    pub event_authority: AccountInfo<'info>,
    pub pool_authority: AccountInfo<'info>,
    /// Vault authority, pays rent and signs transfers
    pub payer: AccountInfo<'info>,
    pub swap: Option<DammV2SwapAccounts<'info>>,
    pub seed: Option<DammV2PoolAccounts<'info>>,
}

impl<'info> DexAdapter for DammV2Adapter<'info> {
    fn swap_exact_quote_in(
        &self,
        amount_in: u64,
        minimum_amount_out: u64,
        signer_seeds: &[&[&[u8]]],
    ) -> Result<()> {
        let swap = self.swap.as_ref().ok_or(FairLaunchError::MissingDexAccount)?;

        cp_amm::cpi::swap(
            CpiContext::new_with_signer(
                self.program.clone(),
                cp_amm::cpi::accounts::SwapCtx {
                    pool_authority: self.pool_authority.clone(),
                    pool: swap.pool.clone(),
                    input_token_account: swap.input_token_account.clone(),
                    output_token_account: swap.output_token_account.clone(),
                    token_a_vault: swap.token_a_vault.clone(),
                    token_b_vault: swap.token_b_vault.clone(),
                    token_a_mint: swap.token_a_mint.clone(),
                    token_b_mint: swap.token_b_mint.clone(),
                    payer: self.payer.clone(),
                    token_a_program: swap.token_a_program.clone(),
                    token_b_program: swap.token_b_program.clone(),
                    referral_token_account: None,
                    event_authority: self.event_authority.clone(),
                    program: self.program.clone(),
                },
                signer_seeds,
            ),
            cp_amm::SwapParameters {
                amount_in,
                minimum_amount_out,
            },
        )
    }

    fn seed_liquidity(
        &self,
        base_amount: u64,
        quote_amount: u64,
        sqrt_price: u128,
        signer_seeds: &[&[&[u8]]],
    ) -> Result<u128> {
        let seed = self.seed.as_ref().ok_or(FairLaunchError::MissingDexAccount)?;

        let liquidity = get_liquidity_for_adding_liquidity(
            base_amount,
            quote_amount,
            sqrt_price,
            seed.sqrt_min_price,
            seed.sqrt_max_price,
        )?;

        cp_amm::cpi::initialize_pool(
            CpiContext::new_with_signer(
                self.program.clone(),
                cp_amm::cpi::accounts::InitializePoolCtx {
                    creator: seed.creator.clone(),
                    position_nft_mint: seed.position_nft_mint.clone(),
                    position_nft_account: seed.position_nft_account.clone(),
                    payer: self.payer.clone(),
                    config: seed.config.clone(),
                    pool_authority: self.pool_authority.clone(),
                    pool: seed.pool.clone(),
                    position: seed.position.clone(),
                    token_a_mint: seed.token_a_mint.clone(),
                    token_b_mint: seed.token_b_mint.clone(),
                    token_a_vault: seed.token_a_vault.clone(),
                    token_b_vault: seed.token_b_vault.clone(),
                    payer_token_a: seed.payer_token_a.clone(),
                    payer_token_b: seed.payer_token_b.clone(),
                    token_a_program: seed.token_a_program.clone(),
                    token_b_program: seed.token_b_program.clone(),
                    token_2022_program: seed.token_2022_program.clone(),
                    system_program: seed.system_program.clone(),
                    event_authority: self.event_authority.clone(),
                    program: self.program.clone(),
                },
                signer_seeds,
            ),
            cp_amm::InitializePoolParameters {
                liquidity,
                sqrt_price,
                activation_point: None,
            },
        )?;

        Ok(liquidity)
    }
}
