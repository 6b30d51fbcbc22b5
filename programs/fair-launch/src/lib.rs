#![allow(unexpected_cfgs)]
use anchor_lang::prelude::*;

mod const_pda;
pub mod constants;
pub mod errors;
pub mod events;
pub mod instructions;
pub mod state;
pub mod utils;

use instructions::*;
use state::{DexKind, FeesConfig, PartnerSwapConfig, SignConfig, SuspendConfig};

declare_id!("4ZqcH6ek3Vzda5CQF2PUDYsWqpqx4WXf1zsprWLKLWcC");

#[program]
pub mod fair_launch {
    use super::*;

    /// Initialize global configuration
    pub fn initialize_config(
        ctx: Context<InitializeConfig>,
        params: InitializeConfigParams,
    ) -> Result<()> {
        instructions::initialize_config(ctx, params)
    }

    pub fn set_fees_config(ctx: Context<UpdateConfig>, fees: FeesConfig) -> Result<()> {
        instructions::set_fees_config(ctx, fees)
    }

    pub fn set_sign_config(ctx: Context<UpdateConfig>, sign: SignConfig) -> Result<()> {
        instructions::set_sign_config(ctx, sign)
    }

    pub fn set_suspend_config(ctx: Context<UpdateConfig>, suspend: SuspendConfig) -> Result<()> {
        instructions::set_suspend_config(ctx, suspend)
    }

    pub fn set_executor(ctx: Context<UpdateConfig>, executor: Pubkey) -> Result<()> {
        instructions::set_executor(ctx, executor)
    }

    pub fn set_airdropper(ctx: Context<UpdateConfig>, airdropper: Pubkey) -> Result<()> {
        instructions::set_airdropper(ctx, airdropper)
    }

    pub fn set_partner_swap_config(
        ctx: Context<UpdateConfig>,
        partner_swap: PartnerSwapConfig,
    ) -> Result<()> {
        instructions::set_partner_swap_config(ctx, partner_swap)
    }

    /// Add or remove an AMM program from the launch allowlist
    pub fn set_supported_dex(
        ctx: Context<UpdateConfig>,
        program: Pubkey,
        kind: DexKind,
        supported: bool,
    ) -> Result<()> {
        instructions::set_supported_dex(ctx, program, kind, supported)
    }

    /// Create a token and open its presale
    pub fn new_fair_launch(ctx: Context<NewFairLaunch>, params: NewFairLaunchParams) -> Result<()> {
        instructions::new_fair_launch(ctx, params)
    }

    /// Contribute SOL to an open presale
    pub fn participate(
        ctx: Context<Participate>,
        timestamp: i64,
        signature: [u8; 64],
        inviter: Pubkey,
        eth_amount: u64,
    ) -> Result<()> {
        instructions::participate(ctx, timestamp, signature, inviter, eth_amount)
    }

    pub fn reserve_free_claim(
        ctx: Context<ReserveFreeClaim>,
        timestamp: i64,
        signature: [u8; 64],
    ) -> Result<()> {
        instructions::reserve_free_claim(ctx, timestamp, signature)
    }

    /// Seed AMM liquidity after a successful presale (executor only)
    pub fn launch(ctx: Context<Launch>, min_partner_token_out: u64, sqrt_price: u128) -> Result<()> {
        ctx.accounts.launch(min_partner_token_out, sqrt_price)
    }

    /// Settle a participant after launch
    pub fn claims(ctx: Context<Claims>, timestamp: i64, signature: [u8; 64]) -> Result<()> {
        instructions::claims(ctx, timestamp, signature)
    }

    /// Return contributions of a presale that missed its soft cap
    pub fn refund_for_launch_fail(
        ctx: Context<RefundForLaunchFail>,
        timestamp: i64,
        signature: [u8; 64],
    ) -> Result<()> {
        instructions::refund_for_launch_fail(ctx, timestamp, signature)
    }
}
