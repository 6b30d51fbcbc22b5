use anchor_lang::prelude::*;
use anchor_lang::solana_program::ed25519_program;
use anchor_lang::solana_program::instruction::Instruction;
use anchor_lang::solana_program::sysvar::instructions::{
    load_current_index_checked, load_instruction_at_checked,
};

use crate::errors::FairLaunchError;
use crate::state::SignConfig;

/// Action tag closing every authorization message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ActionType {
    Participate = 0,
    Refund = 1,
    Reserve = 2,
    Claim = 3,
}

/// mint (32) | user (32) | secondary (32) | timestamp (8) | action (1)
pub const AUTHORIZATION_MESSAGE_LEN: usize = 32 + 32 + 32 + 8 + 1;

// Ed25519 precompile data layout for a single signature
const SIGNATURE_OFFSETS_START: usize = 2;
const SIGNATURE_OFFSETS_LEN: usize = 14;
const DATA_START: usize = SIGNATURE_OFFSETS_START + SIGNATURE_OFFSETS_LEN;
const PUBKEY_LEN: usize = 32;
const SIGNATURE_LEN: usize = 64;
/// Offsets pointing into the verify instruction's own data
const CURRENT_INSTRUCTION: u16 = u16::MAX;

/// Build the message the issuer signs
pub fn format_authorization_message(
    token_mint: &Pubkey,
    user: &Pubkey,
    secondary: &Pubkey,
    timestamp: i64,
    action: ActionType,
) -> [u8; AUTHORIZATION_MESSAGE_LEN] {
    let mut message = [0u8; AUTHORIZATION_MESSAGE_LEN];
    message[0..32].copy_from_slice(token_mint.as_ref());
    message[32..64].copy_from_slice(user.as_ref());
    message[64..96].copy_from_slice(secondary.as_ref());
    message[96..104].copy_from_slice(&timestamp.to_le_bytes());
    message[104] = action as u8;
    message
}

/// Reject signatures from the future or older than `valid_duration`
pub fn check_signature_freshness(timestamp: i64, current_time: i64, valid_duration: i64) -> Result<()> {
    require!(timestamp <= current_time, FairLaunchError::SignatureExpired);

    let age = current_time
        .checked_sub(timestamp)
        .ok_or(FairLaunchError::MathOverflow)?;

    require!(age <= valid_duration, FairLaunchError::SignatureExpired);

    Ok(())
}

fn read_u16(data: &[u8], offset: usize) -> Result<u16> {
    let bytes = data
        .get(offset..offset + 2)
        .ok_or(FairLaunchError::InvalidSignature)?;
    Ok(u16::from_le_bytes([bytes[0], bytes[1]]))
}

fn read_slice(data: &[u8], offset: u16, len: usize) -> Result<&[u8]> {
    let start = offset as usize;
    data.get(start..start + len)
        .ok_or_else(|| error!(FairLaunchError::InvalidSignature))
}

/// Check that `ix` is an Ed25519 precompile call verifying exactly
/// `signature` by `pubkey` over `message`.
pub fn verify_ed25519_ix(
    ix: &Instruction,
    pubkey: &[u8; 32],
    message: &[u8],
    signature: &[u8; 64],
) -> Result<()> {
    require_keys_eq!(ix.program_id, ed25519_program::ID, FairLaunchError::InvalidSignature);
    require!(ix.accounts.is_empty(), FairLaunchError::InvalidSignature);

    let data = &ix.data;
    require!(data.len() >= DATA_START, FairLaunchError::InvalidSignature);
    require!(data[0] == 1, FairLaunchError::InvalidSignature);

    let offsets = SIGNATURE_OFFSETS_START;
    let signature_offset = read_u16(data, offsets)?;
    let signature_ix = read_u16(data, offsets + 2)?;
    let pubkey_offset = read_u16(data, offsets + 4)?;
    let pubkey_ix = read_u16(data, offsets + 6)?;
    let message_offset = read_u16(data, offsets + 8)?;
    let message_size = read_u16(data, offsets + 10)?;
    let message_ix = read_u16(data, offsets + 12)?;

    require!(
        signature_ix == CURRENT_INSTRUCTION
            && pubkey_ix == CURRENT_INSTRUCTION
            && message_ix == CURRENT_INSTRUCTION,
        FairLaunchError::InvalidSignature
    );

    require!(
        read_slice(data, pubkey_offset, PUBKEY_LEN)? == pubkey.as_slice(),
        FairLaunchError::InvalidSignature
    );

    require!(
        read_slice(data, signature_offset, SIGNATURE_LEN)? == signature.as_slice(),
        FairLaunchError::InvalidSignature
    );

    require!(
        message_size as usize == message.len()
            && read_slice(data, message_offset, message.len())? == message,
        FairLaunchError::InvalidSignature
    );

    Ok(())
}

/// Verify an issuer authorization for `action`.
///
/// The Ed25519 verify instruction must sit right before the current
/// instruction in the transaction.
#[allow(clippy::too_many_arguments)]
pub fn authorize<'info>(
    instructions_sysvar: &AccountInfo<'info>,
    sign: &SignConfig,
    token_mint: &Pubkey,
    user: &Pubkey,
    secondary: &Pubkey,
    timestamp: i64,
    signature: &[u8; 64],
    action: ActionType,
    current_time: i64,
) -> Result<()> {
    check_signature_freshness(timestamp, current_time, sign.valid_duration)?;

    let message = format_authorization_message(token_mint, user, secondary, timestamp, action);

    // Get the current instruction index and load the previous instruction
    let current_index = load_current_index_checked(instructions_sysvar)?;
    require!(current_index > 0, FairLaunchError::InvalidInstructionIndex);
    let ix: Instruction = load_instruction_at_checked((current_index - 1) as usize, instructions_sysvar)?;

    verify_ed25519_ix(&ix, &sign.issuer.to_bytes(), &message, signature)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anchor_lang::solana_program::instruction::AccountMeta;

    const NOW: i64 = 1_700_000_000;

    /// Same layout the Ed25519 precompile client helper produces
    fn ed25519_ix(pubkey: &[u8; 32], message: &[u8], signature: &[u8; 64]) -> Instruction {
        let pubkey_offset = DATA_START as u16;
        let signature_offset = pubkey_offset + PUBKEY_LEN as u16;
        let message_offset = signature_offset + SIGNATURE_LEN as u16;

        let mut data = vec![1u8, 0u8];
        for value in [
            signature_offset,
            CURRENT_INSTRUCTION,
            pubkey_offset,
            CURRENT_INSTRUCTION,
            message_offset,
            message.len() as u16,
            CURRENT_INSTRUCTION,
        ] {
            data.extend_from_slice(&value.to_le_bytes());
        }
        data.extend_from_slice(pubkey);
        data.extend_from_slice(signature);
        data.extend_from_slice(message);

        Instruction {
            program_id: ed25519_program::ID,
            accounts: vec![],
            data,
        }
    }

    fn fixture() -> ([u8; 32], [u8; AUTHORIZATION_MESSAGE_LEN], [u8; 64]) {
        let issuer = Pubkey::new_unique().to_bytes();
        let message = format_authorization_message(
            &Pubkey::new_unique(),
            &Pubkey::new_unique(),
            &Pubkey::default(),
            NOW,
            ActionType::Claim,
        );
        (issuer, message, [7u8; 64])
    }

    #[test]
    fn message_layout() {
        let mint = Pubkey::new_unique();
        let user = Pubkey::new_unique();
        let inviter = Pubkey::new_unique();
        let message = format_authorization_message(&mint, &user, &inviter, 42, ActionType::Reserve);

        assert_eq!(message.len(), 105);
        assert_eq!(&message[0..32], mint.as_ref());
        assert_eq!(&message[32..64], user.as_ref());
        assert_eq!(&message[64..96], inviter.as_ref());
        assert_eq!(&message[96..104], &42i64.to_le_bytes());
        assert_eq!(message[104], 2);
    }

    #[test]
    fn messages_differ_per_action() {
        let mint = Pubkey::new_unique();
        let user = Pubkey::new_unique();
        let zero = Pubkey::default();

        let refund = format_authorization_message(&mint, &user, &zero, NOW, ActionType::Refund);
        let claim = format_authorization_message(&mint, &user, &zero, NOW, ActionType::Claim);
        assert_ne!(refund, claim);
    }

    #[test]
    fn freshness_window() {
        assert!(check_signature_freshness(NOW, NOW, 600).is_ok());
        assert!(check_signature_freshness(NOW - 600, NOW, 600).is_ok());
        assert_eq!(
            check_signature_freshness(NOW - 601, NOW, 600).unwrap_err(),
            FairLaunchError::SignatureExpired.into()
        );
        assert_eq!(
            check_signature_freshness(NOW + 1, NOW, 600).unwrap_err(),
            FairLaunchError::SignatureExpired.into()
        );
    }

    #[test]
    fn accepts_matching_verify_instruction() {
        let (issuer, message, signature) = fixture();
        let ix = ed25519_ix(&issuer, &message, &signature);

        assert!(verify_ed25519_ix(&ix, &issuer, &message, &signature).is_ok());
    }

    #[test]
    fn rejects_other_issuer() {
        let (issuer, message, signature) = fixture();
        let ix = ed25519_ix(&Pubkey::new_unique().to_bytes(), &message, &signature);

        assert_eq!(
            verify_ed25519_ix(&ix, &issuer, &message, &signature).unwrap_err(),
            FairLaunchError::InvalidSignature.into()
        );
    }

    #[test]
    fn rejects_other_message_or_signature() {
        let (issuer, message, signature) = fixture();
        let ix = ed25519_ix(&issuer, &message, &signature);

        let mut tampered = message;
        tampered[104] = ActionType::Refund as u8;
        assert_eq!(
            verify_ed25519_ix(&ix, &issuer, &tampered, &signature).unwrap_err(),
            FairLaunchError::InvalidSignature.into()
        );

        assert_eq!(
            verify_ed25519_ix(&ix, &issuer, &message, &[8u8; 64]).unwrap_err(),
            FairLaunchError::InvalidSignature.into()
        );
    }

    #[test]
    fn rejects_wrong_program_or_accounts() {
        let (issuer, message, signature) = fixture();

        let mut ix = ed25519_ix(&issuer, &message, &signature);
        ix.program_id = Pubkey::new_unique();
        assert!(verify_ed25519_ix(&ix, &issuer, &message, &signature).is_err());

        let mut ix = ed25519_ix(&issuer, &message, &signature);
        ix.accounts.push(AccountMeta::new_readonly(Pubkey::new_unique(), false));
        assert!(verify_ed25519_ix(&ix, &issuer, &message, &signature).is_err());
    }

    #[test]
    fn rejects_offsets_into_other_instructions() {
        let (issuer, message, signature) = fixture();
        let mut ix = ed25519_ix(&issuer, &message, &signature);

        // pubkey instruction index
        ix.data[8..10].copy_from_slice(&0u16.to_le_bytes());
        assert_eq!(
            verify_ed25519_ix(&ix, &issuer, &message, &signature).unwrap_err(),
            FairLaunchError::InvalidSignature.into()
        );
    }

    #[test]
    fn rejects_multiple_signatures_and_truncated_data() {
        let (issuer, message, signature) = fixture();

        let mut ix = ed25519_ix(&issuer, &message, &signature);
        ix.data[0] = 2;
        assert!(verify_ed25519_ix(&ix, &issuer, &message, &signature).is_err());

        let mut ix = ed25519_ix(&issuer, &message, &signature);
        ix.data.truncate(DATA_START + 40);
        assert!(verify_ed25519_ix(&ix, &issuer, &message, &signature).is_err());
    }
}
