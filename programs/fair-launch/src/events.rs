use anchor_lang::prelude::*;

use crate::state::{DexKind, FeesConfig, PartnerSwapConfig, SignConfig, SuspendConfig};

// =============================================================================
// CONFIGURATION EVENTS
// =============================================================================

#[event]
pub struct FeesConfigUpdated {
    pub old: FeesConfig,
    pub new: FeesConfig,
}

#[event]
pub struct SignConfigUpdated {
    pub old: SignConfig,
    pub new: SignConfig,
}

#[event]
pub struct SuspendConfigUpdated {
    pub old: SuspendConfig,
    pub new: SuspendConfig,
}

#[event]
pub struct ExecutorUpdated {
    pub old: Pubkey,
    pub new: Pubkey,
}

#[event]
pub struct AirdropperUpdated {
    pub old: Pubkey,
    pub new: Pubkey,
}

#[event]
pub struct PartnerSwapConfigUpdated {
    pub old: PartnerSwapConfig,
    pub new: PartnerSwapConfig,
}

/// Event emitted when an AMM program is added to or removed from the allowlist
#[event]
pub struct SupportedDexUpdated {
    pub program: Pubkey,
    pub kind: DexKind,
    pub supported: bool,
}

// =============================================================================
// LAUNCH LIFECYCLE EVENTS
// =============================================================================

/// Event emitted when a new fair launch is created
#[event]
pub struct LaunchCreated {
    /// Launch account address
    pub token_launch: Pubkey,
    /// Creator of the launch
    pub creator: Pubkey,
    /// Token mint address
    pub token: Pubkey,
    pub name: String,
    pub symbol: String,
    pub total_supply: u64,
    pub start_time: i64,
    pub end_time: i64,
    pub soft_cap: u64,
    pub hard_cap: u64,
    /// Creation fee charged in lamports
    pub create_fees: u64,
    /// Slippage floor of the creation fee swap
    pub min_partner_token_out: u64,
    /// Partner tokens the fee recipient received, 0 when the fee was not swapped
    pub partner_token_out: u64,
}

/// Event emitted when the airdrop allocation is handed to the airdropper
#[event]
pub struct AirdropFunded {
    pub token: Pubkey,
    pub airdropper: Pubkey,
    pub amount: u64,
    /// Release window start (presale end)
    pub start_time: i64,
    /// Release window end
    pub end_time: i64,
}

/// Event emitted when a user contributes to a presale
#[event]
pub struct Participated {
    pub token: Pubkey,
    pub user: Pubkey,
    /// Effective inviter, default key if none
    pub inviter: Pubkey,
    /// Lamports paid
    pub eth_amount: u64,
    /// Allocation basis credited
    pub share_amt: u64,
    pub direct_reward: u64,
    pub second_tier_reward: u64,
    /// Launch total raised after this contribution
    pub total_raised: u64,
}

#[event]
pub struct FreeClaimReserved {
    pub token: Pubkey,
    pub user: Pubkey,
    pub amount: u64,
}

/// Event emitted when liquidity has been seeded
#[event]
pub struct Launched {
    pub token: Pubkey,
    /// AMM pool address
    pub pool: Pubkey,
    pub liquidity: u128,
    /// Tokens taken by the pool
    pub token_amount: u64,
    /// Lamports taken by the pool
    pub eth_amount: u64,
    pub protocol_fee: u64,
    pub min_partner_token_out: u64,
    /// Partner tokens received by the fee recipient
    pub partner_token_out: u64,
}

/// Event emitted when a participant settles after launch
#[event]
pub struct Claimed {
    pub token: Pubkey,
    pub user: Pubkey,
    pub token_allocation: u64,
    pub free_claim: u64,
    pub invite_reward: u64,
    pub overfund_refund: u64,
}

/// Event emitted when a contribution is returned after a failed presale
#[event]
pub struct Refunded {
    pub token: Pubkey,
    pub user: Pubkey,
    pub eth_amount: u64,
}
