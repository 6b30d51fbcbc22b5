use anchor_lang::solana_program::native_token::LAMPORTS_PER_SOL;

// ===== Seeds =====
pub const GLOBAL_CONFIG_SEED: &[u8] = b"global_config";
pub const TOKEN_LAUNCH_SEED: &[u8] = b"token_launch";
pub const PARTICIPATION_SEED: &[u8] = b"participation";
pub const VAULT_AUTHORITY: &[u8] = b"vault_authority";
pub const TOKEN_VAULT: &[u8] = b"token_vault";
pub const QUOTE_VAULT: &[u8] = b"quote_vault";
pub const TOKEN_MINT_SEED: &[u8] = b"token_mint";

// ===== Token Configuration =====
/// Token decimals (standard SPL token)
pub const TOKEN_DECIMALS: u8 = 6;

/// Metaplex metadata field limits
pub const MAX_NAME_LENGTH: usize = 32;
pub const MAX_SYMBOL_LENGTH: usize = 10;
pub const MAX_URI_LENGTH: usize = 200;

// ===== Fee Math =====
pub const BPS_DENOMINATOR: u64 = 10_000;

/// Upper bound for direct + second tier invite fees: 10%
pub const MAX_INVITE_FEES_BPS: u16 = 1_000;

/// Upper bound for the launch protocol fee: 20%
pub const MAX_PROTOCOL_FEES_BPS: u16 = 2_000;

// ===== Presale Bounds =====
/// Smallest accepted per-call contribution floor: 0.001 SOL
pub const MIN_CONTRIBUTION: u64 = LAMPORTS_PER_SOL / 1_000;

/// Smallest accepted soft cap: 0.001 SOL
pub const MIN_SOFT_CAP: u64 = LAMPORTS_PER_SOL / 1_000;

// ===== Sign Configuration =====
/// Default signature validity window: 10 minutes
pub const DEFAULT_SIGN_VALID_DURATION: i64 = 10 * 60;

// ===== DEX =====
/// Number of allowlist slots in the global config
pub const MAX_SUPPORTED_DEXES: usize = 4;

/// Lamports kept on the vault authority to pay AMM account rent at launch
pub const LAUNCH_RENT_BUDGET: u64 = LAMPORTS_PER_SOL / 10;
