use anchor_lang::prelude::*;

#[error_code]
pub enum FairLaunchError {
    // ===== Permission Errors =====
    #[msg("Unauthorized: Only admin can perform this action")]
    Unauthorized,

    #[msg("Only the executor can perform this action")]
    OnlyExecutor,

    // ===== Operational Errors =====
    #[msg("Operation is currently suspended")]
    Suspend,

    // ===== Time Errors =====
    #[msg("Presale has not started yet")]
    NotStarted,

    #[msg("Presale has ended")]
    Ended,

    #[msg("Presale has not ended yet")]
    NotEnded,

    // ===== Signature Errors =====
    #[msg("Invalid signature")]
    InvalidSignature,

    #[msg("Signature expired or timestamp in the future")]
    SignatureExpired,

    #[msg("Invalid instruction index")]
    InvalidInstructionIndex,

    // ===== Bounds Errors =====
    #[msg("Amount below the minimum requirement")]
    NotEnough,

    #[msg("Amount exceeds the maximum")]
    ExceedsMaximum,

    #[msg("Invalid inviter")]
    InvalidInviter,

    #[msg("Invalid parameter")]
    InvalidParam,

    #[msg("Zero amount")]
    ZeroAmount,

    // ===== State Errors =====
    #[msg("Token already launched")]
    AlreadyLaunched,

    #[msg("Token not launched yet")]
    NotLaunched,

    #[msg("Already claimed")]
    AlreadyClaimed,

    #[msg("Already refunded")]
    AlreadyRefund,

    #[msg("Free claim already reserved")]
    AlreadyReserved,

    // ===== Configuration Errors =====
    #[msg("Invalid token config")]
    InvalidTokenConfig,

    #[msg("Invalid presale time config")]
    InvalidTimeConfig,

    #[msg("Invalid presale contribution config")]
    InvalidContributionConfig,

    #[msg("Invalid launch config")]
    InvalidLaunchConfig,

    #[msg("Invalid tokenomics config")]
    InvalidTokenomicsConfig,

    #[msg("Zero address")]
    ZeroAddress,

    #[msg("Unsupported DEX")]
    UnsupportedDex,

    #[msg("DEX allowlist is full")]
    AllowlistFull,

    // ===== Math Errors =====
    #[msg("Math overflow")]
    MathOverflow,

    #[msg("Division by zero")]
    DivisionByZero,

    #[msg("Type conversion failed")]
    TypeCastFailed,

    // ===== Account Errors =====
    #[msg("Invalid token mint")]
    InvalidTokenMint,

    #[msg("Invalid quote mint")]
    InvalidQuoteMint,

    #[msg("Invalid token vault")]
    InvalidTokenVault,

    #[msg("Invalid quote vault")]
    InvalidQuoteVault,

    #[msg("Invalid recipient account")]
    InvalidRecipient,

    #[msg("Insufficient liquidity")]
    InsufficientLiquidity,

    #[msg("Required AMM accounts not provided")]
    MissingDexAccount,
}
