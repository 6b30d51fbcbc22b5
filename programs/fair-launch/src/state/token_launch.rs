use anchor_lang::prelude::*;

use crate::errors::FairLaunchError;
use crate::utils::allocation::apply_bps;

/// Immutable token parameters, only used at creation
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct TokenConfig {
    pub total_supply: u64,
    pub name: String,
    pub symbol: String,
    /// Metadata uri
    pub uri: String,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PresaleConfig {
    pub start_time: i64,
    pub end_time: i64,
    /// Per-call contribution floor (lamports)
    pub personal_cap_min: u64,
    /// Per-call contribution ceiling (lamports)
    pub personal_cap_max: u64,
    /// Minimum raise for the launch to happen
    pub soft_cap: u64,
    /// Raise above which contributions are discounted
    pub hard_cap: u64,
    /// Share kept for contributions above the hard cap (bps)
    pub overfunding_discount_bps: u16,
}

impl PresaleConfig {
    pub const SIZE: usize = 8 * 6 + 2;
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TokenomicsConfig {
    pub amt_for_presale: u64,
    pub amt_for_lp: u64,
    pub amt_for_airdrop: u64,
    pub amt_for_free_claim: u64,
    pub free_claim_per_user: u64,
    pub airdrop_duration: i64,
    /// Receives the liquidity position
    pub lp_recipient: Pubkey,
}

impl TokenomicsConfig {
    pub const SIZE: usize = 8 * 6 + 32;
}

#[derive(Debug, Clone, Copy, AnchorSerialize, AnchorDeserialize, PartialEq, Eq)]
pub enum LaunchState {
    Presale,  // Collecting contributions, or waiting for launch/refund
    Launched, // Liquidity seeded, claims open
}

impl Default for LaunchState {
    fn default() -> Self {
        LaunchState::Presale
    }
}

/// Capital split computed at launch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaunchPlan {
    /// Capital not owed back as overfunding refunds
    pub retained: u64,
    pub protocol_fee: u64,
    /// WSOL paired with the LP token allocation
    pub liquidity_eth: u64,
}

#[account]
#[derive(Default)]
pub struct TokenLaunch {
    /// Launch creator
    pub creator: Pubkey,

    pub token_mint: Pubkey,
    pub token_vault: Pubkey,
    pub quote_vault: Pubkey,

    pub index: u64,

    /// bump seed
    pub bump: u8,

    pub total_supply: u64,

    pub presale: PresaleConfig,

    pub tokenomics: TokenomicsConfig,

    // ===== Presale Ledger =====
    /// Lamports received, including overfunded capital
    pub total_raised: u64,

    /// Sum of every participant's discounted share
    pub total_share_amt: u64,

    /// Lamports owed to inviters
    pub total_for_invite: u64,

    /// Free-claim reservations taken
    pub free_claim_reserved: u64,

    pub participants_count: u32,

    // ===== Launch =====
    pub launch_state: LaunchState,

    pub launched_at: i64,

    /// Reserved space
    pub reserved: [u64; 4],
}

impl TokenLaunch {
    pub const SIZE: usize = 8 + // discriminator
        32 + // creator
        32 + // token_mint
        32 + // token_vault
        32 + // quote_vault
        8 + // index
        1 + // bump
        8 + // total_supply
        PresaleConfig::SIZE + // presale
        TokenomicsConfig::SIZE + // tokenomics
        8 + // total_raised
        8 + // total_share_amt
        8 + // total_for_invite
        8 + // free_claim_reserved
        4 + // participants_count
        1 + // launch_state
        8 + // launched_at
        8 * 4; // reserved

    pub fn is_launched(&self) -> bool {
        self.launch_state == LaunchState::Launched
    }

    /// Validate the presale window is open
    pub fn check_presale_window(&self, current_time: i64) -> Result<()> {
        require!(
            current_time >= self.presale.start_time,
            FairLaunchError::NotStarted
        );

        require!(
            current_time <= self.presale.end_time,
            FairLaunchError::Ended
        );

        Ok(())
    }

    pub fn check_presale_ended(&self, current_time: i64) -> Result<()> {
        require!(
            current_time > self.presale.end_time,
            FairLaunchError::NotEnded
        );

        Ok(())
    }

    pub fn soft_cap_reached(&self) -> bool {
        self.total_raised >= self.presale.soft_cap
    }

    /// Validate the per-call contribution bounds
    pub fn check_contribution_amount(&self, eth_amount: u64) -> Result<()> {
        require!(
            eth_amount >= self.presale.personal_cap_min,
            FairLaunchError::NotEnough
        );

        require!(
            eth_amount <= self.presale.personal_cap_max,
            FairLaunchError::ExceedsMaximum
        );

        Ok(())
    }

    /// Add a contribution to the ledger totals
    pub fn record_contribution(
        &mut self,
        eth_amount: u64,
        share_amt: u64,
        invite_amount: u64,
    ) -> Result<()> {
        self.total_raised = self.total_raised
            .checked_add(eth_amount)
            .ok_or(FairLaunchError::MathOverflow)?;

        self.total_share_amt = self.total_share_amt
            .checked_add(share_amt)
            .ok_or(FairLaunchError::MathOverflow)?;

        self.total_for_invite = self.total_for_invite
            .checked_add(invite_amount)
            .ok_or(FairLaunchError::MathOverflow)?;

        Ok(())
    }

    /// Take one free-claim slot. Exhaustion reports `Ended`, same as a closed window.
    pub fn reserve_free_claim_slot(&mut self) -> Result<()> {
        require!(self.tokenomics.free_claim_per_user > 0, FairLaunchError::Ended);

        let reserved = self.free_claim_reserved
            .checked_add(1)
            .ok_or(FairLaunchError::MathOverflow)?;

        let required = reserved
            .checked_mul(self.tokenomics.free_claim_per_user)
            .ok_or(FairLaunchError::MathOverflow)?;

        require!(
            required <= self.tokenomics.amt_for_free_claim,
            FairLaunchError::Ended
        );

        self.free_claim_reserved = reserved;

        Ok(())
    }

    /// Validate a launch can happen now
    pub fn check_can_launch(&self, current_time: i64) -> Result<()> {
        self.check_presale_ended(current_time)?;

        require!(self.soft_cap_reached(), FairLaunchError::NotEnough);

        require!(!self.is_launched(), FairLaunchError::AlreadyLaunched);

        Ok(())
    }

    /// Validate refunds are open. Decided on raised capital, not on the launch state.
    pub fn check_refundable(&self, current_time: i64) -> Result<()> {
        self.check_presale_ended(current_time)?;

        require!(!self.soft_cap_reached(), FairLaunchError::AlreadyLaunched);

        Ok(())
    }

    /// Split raised capital into protocol fee and liquidity. The fee is taken
    /// on everything raised, while the overfunded part stays in the vault for
    /// claim-time refunds and never reaches the pool.
    pub fn plan_launch(&self, launch_protocol_fees_bps: u16) -> Result<LaunchPlan> {
        let retained = self.total_share_amt;
        let protocol_fee = apply_bps(self.total_raised, launch_protocol_fees_bps)?;

        let liquidity_eth = retained
            .checked_sub(protocol_fee)
            .and_then(|rest| rest.checked_sub(self.total_for_invite))
            .ok_or(FairLaunchError::InsufficientLiquidity)?;

        require!(liquidity_eth > 0, FairLaunchError::InsufficientLiquidity);

        Ok(LaunchPlan {
            retained,
            protocol_fee,
            liquidity_eth,
        })
    }

    /// One-shot transition to launched
    pub fn mark_launched(&mut self, current_time: i64) -> Result<()> {
        require!(!self.is_launched(), FairLaunchError::AlreadyLaunched);

        self.launch_state = LaunchState::Launched;
        self.launched_at = current_time;

        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use anchor_lang::solana_program::native_token::LAMPORTS_PER_SOL;

    pub const START: i64 = 1_700_000_000;
    pub const END: i64 = START + 1_000;

    pub fn sample_launch() -> TokenLaunch {
        TokenLaunch {
            token_mint: Pubkey::new_unique(),
            total_supply: 10_000_000_000,
            presale: PresaleConfig {
                start_time: START,
                end_time: END,
                personal_cap_min: LAMPORTS_PER_SOL / 10,
                personal_cap_max: 100 * LAMPORTS_PER_SOL,
                soft_cap: LAMPORTS_PER_SOL,
                hard_cap: 100 * LAMPORTS_PER_SOL,
                overfunding_discount_bps: 5_000,
            },
            tokenomics: TokenomicsConfig {
                amt_for_presale: 3_000_000_000,
                amt_for_lp: 4_000_000_000,
                amt_for_airdrop: 2_500_000_000,
                amt_for_free_claim: 500_000_000,
                free_claim_per_user: 300_000_000,
                airdrop_duration: 1_000,
                lp_recipient: Pubkey::new_unique(),
            },
            ..Default::default()
        }
    }

    #[test]
    fn presale_window_bounds() {
        let launch = sample_launch();

        assert_eq!(
            launch.check_presale_window(START - 1).unwrap_err(),
            FairLaunchError::NotStarted.into()
        );
        assert!(launch.check_presale_window(START).is_ok());
        assert!(launch.check_presale_window(END).is_ok());
        assert_eq!(
            launch.check_presale_window(END + 1).unwrap_err(),
            FairLaunchError::Ended.into()
        );
    }

    #[test]
    fn contribution_bounds_are_per_call() {
        let launch = sample_launch();

        assert_eq!(
            launch.check_contribution_amount(LAMPORTS_PER_SOL / 100).unwrap_err(),
            FairLaunchError::NotEnough.into()
        );
        assert_eq!(
            launch.check_contribution_amount(101 * LAMPORTS_PER_SOL).unwrap_err(),
            FairLaunchError::ExceedsMaximum.into()
        );
        assert!(launch.check_contribution_amount(100 * LAMPORTS_PER_SOL).is_ok());
    }

    #[test]
    fn free_claim_pool_exhaustion_reports_ended() {
        let mut launch = sample_launch();

        launch.reserve_free_claim_slot().unwrap();
        assert_eq!(launch.free_claim_reserved, 1);

        // 2 * 300M > 500M
        assert_eq!(
            launch.reserve_free_claim_slot().unwrap_err(),
            FairLaunchError::Ended.into()
        );
        assert_eq!(launch.free_claim_reserved, 1);
    }

    #[test]
    fn empty_free_claim_pool_rejects_reservations() {
        let mut launch = sample_launch();
        launch.tokenomics.amt_for_free_claim = 0;

        assert_eq!(
            launch.reserve_free_claim_slot().unwrap_err(),
            FairLaunchError::Ended.into()
        );
    }

    #[test]
    fn zero_size_free_claim_rejects_reservations() {
        let mut launch = sample_launch();
        launch.tokenomics.amt_for_free_claim = 0;
        launch.tokenomics.free_claim_per_user = 0;

        assert_eq!(
            launch.reserve_free_claim_slot().unwrap_err(),
            FairLaunchError::Ended.into()
        );
        assert_eq!(launch.free_claim_reserved, 0);
    }

    #[test]
    fn launch_requires_window_closed_and_soft_cap() {
        let mut launch = sample_launch();
        launch.record_contribution(LAMPORTS_PER_SOL * 9 / 10, LAMPORTS_PER_SOL * 9 / 10, 0).unwrap();

        assert_eq!(
            launch.check_can_launch(END).unwrap_err(),
            FairLaunchError::NotEnded.into()
        );
        assert_eq!(
            launch.check_can_launch(END + 1).unwrap_err(),
            FairLaunchError::NotEnough.into()
        );

        launch.record_contribution(LAMPORTS_PER_SOL, LAMPORTS_PER_SOL, 0).unwrap();
        assert!(launch.check_can_launch(END + 1).is_ok());
    }

    #[test]
    fn launch_latch_is_one_shot() {
        let mut launch = sample_launch();
        launch.record_contribution(2 * LAMPORTS_PER_SOL, 2 * LAMPORTS_PER_SOL, 0).unwrap();

        launch.mark_launched(END + 1).unwrap();
        assert!(launch.is_launched());
        assert_eq!(launch.launched_at, END + 1);

        assert_eq!(
            launch.check_can_launch(END + 2).unwrap_err(),
            FairLaunchError::AlreadyLaunched.into()
        );
        assert_eq!(
            launch.mark_launched(END + 2).unwrap_err(),
            FairLaunchError::AlreadyLaunched.into()
        );
        assert_eq!(launch.launched_at, END + 1);
    }

    #[test]
    fn refund_closed_once_soft_cap_met_even_without_launch() {
        let mut launch = sample_launch();
        launch.presale.soft_cap = 2 * LAMPORTS_PER_SOL;
        launch.record_contribution(LAMPORTS_PER_SOL, LAMPORTS_PER_SOL, 0).unwrap();

        assert_eq!(
            launch.check_refundable(END).unwrap_err(),
            FairLaunchError::NotEnded.into()
        );
        assert!(launch.check_refundable(END + 1).is_ok());

        launch.record_contribution(LAMPORTS_PER_SOL, LAMPORTS_PER_SOL, 0).unwrap();
        assert!(!launch.is_launched());
        assert_eq!(
            launch.check_refundable(END + 1).unwrap_err(),
            FairLaunchError::AlreadyLaunched.into()
        );
    }

    #[test]
    fn launch_plan_deducts_fee_and_referral_pool() {
        let mut launch = sample_launch();
        // 2 SOL raised, 0.04 SOL owed to inviters
        launch
            .record_contribution(2 * LAMPORTS_PER_SOL, 2 * LAMPORTS_PER_SOL, LAMPORTS_PER_SOL / 25)
            .unwrap();

        let plan = launch.plan_launch(500).unwrap();
        assert_eq!(plan.retained, 2 * LAMPORTS_PER_SOL);
        assert_eq!(plan.protocol_fee, LAMPORTS_PER_SOL / 10);
        assert_eq!(plan.liquidity_eth, 1_860_000_000);
    }

    #[test]
    fn launch_plan_keeps_overfunded_capital_for_refunds() {
        let mut launch = sample_launch();
        launch.record_contribution(150 * LAMPORTS_PER_SOL, 125 * LAMPORTS_PER_SOL, 0).unwrap();

        let plan = launch.plan_launch(0).unwrap();
        assert_eq!(plan.retained, 125 * LAMPORTS_PER_SOL);
        assert_eq!(plan.liquidity_eth, 125 * LAMPORTS_PER_SOL);
        assert_eq!(launch.total_raised - plan.retained, 25 * LAMPORTS_PER_SOL);
    }

    #[test]
    fn protocol_fee_is_charged_on_total_raised() {
        let mut launch = sample_launch();
        launch
            .record_contribution(150 * LAMPORTS_PER_SOL, 125 * LAMPORTS_PER_SOL, 3 * LAMPORTS_PER_SOL)
            .unwrap();

        let plan = launch.plan_launch(500).unwrap();
        assert_eq!(plan.protocol_fee, 7_500_000_000);
        assert_eq!(plan.liquidity_eth, 114_500_000_000);

        // Fee, pool, referral pool and overfunding refunds drain the vault exactly
        let overfund_refunds = launch.total_raised - launch.total_share_amt;
        assert_eq!(
            plan.protocol_fee + plan.liquidity_eth + launch.total_for_invite + overfund_refunds,
            launch.total_raised
        );
    }

    #[test]
    fn launch_plan_rejects_insolvent_split() {
        let mut launch = sample_launch();
        launch.record_contribution(LAMPORTS_PER_SOL, LAMPORTS_PER_SOL, LAMPORTS_PER_SOL).unwrap();

        assert_eq!(
            launch.plan_launch(500).unwrap_err(),
            FairLaunchError::InsufficientLiquidity.into()
        );
    }
}
