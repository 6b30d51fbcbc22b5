use anchor_lang::prelude::*;

use crate::constants::{MAX_INVITE_FEES_BPS, MAX_PROTOCOL_FEES_BPS, MAX_SUPPORTED_DEXES};
use crate::errors::FairLaunchError;

/// Fees charged at creation, during participation (referrals) and at launch
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FeesConfig {
    /// Receiver of creation fees and the swapped protocol fee
    pub fee_recipient: Pubkey,
    /// Flat creation fee in lamports
    pub create_fees: u64,
    /// Direct inviter reward (bps of the contribution)
    pub direct_invite_fees_bps: u16,
    /// Inviter's inviter reward (bps of the contribution)
    pub second_tier_invite_fees_bps: u16,
    /// Protocol fee taken from retained capital at launch (bps)
    pub launch_protocol_fees_bps: u16,
}

impl FeesConfig {
    pub const SIZE: usize = 32 + 8 + 2 + 2 + 2;

    pub fn validate(&self) -> Result<()> {
        require_keys_neq!(
            self.fee_recipient,
            Pubkey::default(),
            FairLaunchError::ZeroAddress
        );

        let invite_total = self
            .direct_invite_fees_bps
            .checked_add(self.second_tier_invite_fees_bps)
            .ok_or(FairLaunchError::MathOverflow)?;

        require!(
            invite_total <= MAX_INVITE_FEES_BPS,
            FairLaunchError::InvalidParam
        );

        require!(
            self.launch_protocol_fees_bps <= MAX_PROTOCOL_FEES_BPS,
            FairLaunchError::InvalidParam
        );

        Ok(())
    }
}

/// Off-chain authorization issuer
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SignConfig {
    /// Ed25519 public key of the issuer service
    pub issuer: Pubkey,
    /// Seconds a signature stays valid after its timestamp
    pub valid_duration: i64,
}

impl SignConfig {
    pub const SIZE: usize = 32 + 8;

    pub fn validate(&self) -> Result<()> {
        require!(
            self.issuer != Pubkey::default() && self.valid_duration > 0,
            FairLaunchError::InvalidParam
        );

        Ok(())
    }
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SuspendConfig {
    pub all: bool,
    pub presale: bool,
    pub claim: bool,
    pub refund: bool,
    pub reserve: bool,
}

impl SuspendConfig {
    pub const SIZE: usize = 5;

    pub fn check_presale(&self) -> Result<()> {
        require!(!self.all && !self.presale, FairLaunchError::Suspend);
        Ok(())
    }

    pub fn check_claim(&self) -> Result<()> {
        require!(!self.all && !self.claim, FairLaunchError::Suspend);
        Ok(())
    }

    pub fn check_refund(&self) -> Result<()> {
        require!(!self.all && !self.refund, FairLaunchError::Suspend);
        Ok(())
    }

    /// Reservations happen inside the presale, so the presale switch applies too
    pub fn check_reserve(&self) -> Result<()> {
        require!(
            !self.all && !self.presale && !self.reserve,
            FairLaunchError::Suspend
        );
        Ok(())
    }

    pub fn check_launch(&self) -> Result<()> {
        require!(!self.all, FairLaunchError::Suspend);
        Ok(())
    }
}

/// Partner token bought with the creation and launch protocol fees
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PartnerSwapConfig {
    pub partner_mint: Pubkey,
    /// AMM pool pairing the partner token with WSOL
    pub pool: Pubkey,
}

/// How a lamport fee reaches the fee recipient
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeeRoute {
    /// Nothing to pay
    Skip,
    /// Paid in lamports
    Lamports,
    /// Sold for the partner token
    PartnerSwap,
}

impl PartnerSwapConfig {
    pub const SIZE: usize = 32 + 32;

    pub fn is_configured(&self) -> bool {
        self.partner_mint != Pubkey::default() && self.pool != Pubkey::default()
    }

    pub fn validate(&self) -> Result<()> {
        require!(self.is_configured(), FairLaunchError::ZeroAddress);

        Ok(())
    }

    pub fn fee_route(&self, fee: u64) -> FeeRoute {
        if fee == 0 {
            FeeRoute::Skip
        } else if self.is_configured() {
            FeeRoute::PartnerSwap
        } else {
            FeeRoute::Lamports
        }
    }

    /// Swap output must land in the fee recipient's partner token account
    pub fn check_payout_account(
        &self,
        mint: &Pubkey,
        owner: &Pubkey,
        fee_recipient: &Pubkey,
    ) -> Result<()> {
        self.validate()?;

        require!(
            *mint == self.partner_mint && owner == fee_recipient,
            FairLaunchError::InvalidRecipient
        );

        Ok(())
    }
}

/// AMM implementations the launch executor can route through
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum DexKind {
    /// Meteora DAMM v2 (cp-amm)
    DammV2,
}

impl Default for DexKind {
    fn default() -> Self {
        DexKind::DammV2
    }
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SupportedDex {
    /// AMM program id, default key marks an empty slot
    pub program: Pubkey,
    pub kind: DexKind,
}

impl SupportedDex {
    pub const SIZE: usize = 32 + 1;

    pub fn is_empty(&self) -> bool {
        self.program == Pubkey::default()
    }
}

#[account]
#[derive(Default)]
pub struct GlobalConfig {
    /// Admin address (can update configuration)
    pub admin: Pubkey,

    /// Only account allowed to execute launches
    pub executor: Pubkey,

    /// Receives the airdrop allocation of every new launch
    pub airdropper: Pubkey,

    pub fees: FeesConfig,

    pub sign: SignConfig,

    pub suspend: SuspendConfig,

    pub partner_swap: PartnerSwapConfig,

    /// Allowlisted AMM programs
    pub supported_dexes: [SupportedDex; MAX_SUPPORTED_DEXES],

    /// Launch count, used as the launch PDA index
    pub launch_count: u64,

    /// bump seed
    pub bump: u8,

    /// Reserved space
    pub reserved: [u64; 8],
}

impl GlobalConfig {
    pub const SIZE: usize = 8 + // discriminator
        32 + // admin
        32 + // executor
        32 + // airdropper
        FeesConfig::SIZE + // fees
        SignConfig::SIZE + // sign
        SuspendConfig::SIZE + // suspend
        PartnerSwapConfig::SIZE + // partner_swap
        SupportedDex::SIZE * MAX_SUPPORTED_DEXES + // supported_dexes
        8 + // launch_count
        1 + // bump
        8 * 8; // reserved

    /// Initialize default configuration
    pub fn initialize_defaults(
        &mut self,
        admin: Pubkey,
        executor: Pubkey,
        sign: SignConfig,
        bump: u8,
    ) {
        self.admin = admin;
        self.executor = executor;
        self.airdropper = Pubkey::default();
        self.fees = FeesConfig {
            fee_recipient: admin,
            create_fees: 0,
            direct_invite_fees_bps: 0,
            second_tier_invite_fees_bps: 0,
            launch_protocol_fees_bps: 0,
        };
        self.sign = sign;
        self.suspend = SuspendConfig::default();
        self.partner_swap = PartnerSwapConfig::default();
        self.supported_dexes = [SupportedDex::default(); MAX_SUPPORTED_DEXES];
        self.launch_count = 0;
        self.bump = bump;
    }

    /// Adapter kind of an allowlisted AMM program
    pub fn dex_kind_of(&self, program: &Pubkey) -> Result<DexKind> {
        self.supported_dexes
            .iter()
            .find(|dex| !dex.is_empty() && dex.program == *program)
            .map(|dex| dex.kind)
            .ok_or_else(|| error!(FairLaunchError::UnsupportedDex))
    }

    /// Add, re-tag or remove an allowlist entry
    pub fn set_supported_dex(&mut self, program: Pubkey, kind: DexKind, supported: bool) -> Result<()> {
        require_keys_neq!(program, Pubkey::default(), FairLaunchError::ZeroAddress);

        let existing = self
            .supported_dexes
            .iter_mut()
            .find(|dex| dex.program == program);

        match (existing, supported) {
            (Some(slot), true) => slot.kind = kind,
            (Some(slot), false) => *slot = SupportedDex::default(),
            (None, true) => {
                let slot = self
                    .supported_dexes
                    .iter_mut()
                    .find(|dex| dex.is_empty())
                    .ok_or(FairLaunchError::AllowlistFull)?;
                *slot = SupportedDex { program, kind };
            }
            (None, false) => {}
        }

        Ok(())
    }
}
