use anchor_lang::prelude::*;

use crate::constants::BPS_DENOMINATOR;
use crate::errors::FairLaunchError;

/// `amount * bps / 10000`, truncating
pub fn apply_bps(amount: u64, bps: u16) -> Result<u64> {
    let value = (amount as u128)
        .checked_mul(bps as u128)
        .ok_or(FairLaunchError::MathOverflow)?
        .checked_div(BPS_DENOMINATOR as u128)
        .ok_or(FairLaunchError::DivisionByZero)?;

    u64::try_from(value).map_err(|_| error!(FairLaunchError::TypeCastFailed))
}

/// Allocation basis of a contribution.
///
/// The part that still fits under the hard cap counts in full, the part above
/// it counts at `overfunding_discount_bps`. `raised_before` is the launch total
/// prior to this contribution.
pub fn calculate_share_amount(
    raised_before: u64,
    eth_amount: u64,
    hard_cap: u64,
    overfunding_discount_bps: u16,
) -> Result<u64> {
    let room = hard_cap.saturating_sub(raised_before);
    let over_cap = eth_amount.saturating_sub(room);
    let within_cap = eth_amount - over_cap;

    within_cap
        .checked_add(apply_bps(over_cap, overfunding_discount_bps)?)
        .ok_or_else(|| error!(FairLaunchError::MathOverflow))
}

/// Proportional slice of the presale allocation
pub fn calculate_token_allocation(
    share_amt: u64,
    total_share_amt: u64,
    amt_for_presale: u64,
) -> Result<u64> {
    if total_share_amt == 0 {
        return Ok(0);
    }

    // user_tokens = share_amt / total_share_amt * amt_for_presale
    let user_tokens = (share_amt as u128)
        .checked_mul(amt_for_presale as u128)
        .ok_or(FairLaunchError::MathOverflow)?
        .checked_div(total_share_amt as u128)
        .ok_or(FairLaunchError::DivisionByZero)?;

    u64::try_from(user_tokens).map_err(|_| error!(FairLaunchError::TypeCastFailed))
}

/// Direct and second tier referral rewards of a contribution
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InviteRewards {
    pub direct: u64,
    pub second_tier: u64,
}

impl InviteRewards {
    pub fn total(&self) -> Result<u64> {
        self.direct
            .checked_add(self.second_tier)
            .ok_or_else(|| error!(FairLaunchError::MathOverflow))
    }
}

/// Rewards are only due to inviters that exist: no direct inviter pays
/// nothing, and the second tier is paid only when the direct inviter has one.
pub fn calculate_invite_rewards(
    eth_amount: u64,
    has_inviter: bool,
    has_second_tier: bool,
    direct_invite_fees_bps: u16,
    second_tier_invite_fees_bps: u16,
) -> Result<InviteRewards> {
    if !has_inviter {
        return Ok(InviteRewards::default());
    }

    let direct = apply_bps(eth_amount, direct_invite_fees_bps)?;
    let second_tier = if has_second_tier {
        apply_bps(eth_amount, second_tier_invite_fees_bps)?
    } else {
        0
    };

    Ok(InviteRewards { direct, second_tier })
}

#[cfg(test)]
mod tests {
    use super::*;
    use anchor_lang::solana_program::native_token::LAMPORTS_PER_SOL;

    const SOL: u64 = LAMPORTS_PER_SOL;

    #[test]
    fn share_equals_payment_under_hard_cap() {
        assert_eq!(calculate_share_amount(0, SOL, 100 * SOL, 5_000).unwrap(), SOL);
        assert_eq!(calculate_share_amount(50 * SOL, 50 * SOL, 100 * SOL, 5_000).unwrap(), 50 * SOL);
    }

    #[test]
    fn share_discounts_only_the_overfunded_part() {
        // 50 SOL room left, 100 SOL paid: 50 + 50 * 0.5
        assert_eq!(
            calculate_share_amount(50 * SOL, 100 * SOL, 100 * SOL, 5_000).unwrap(),
            75 * SOL
        );
    }

    #[test]
    fn share_fully_discounted_once_cap_was_passed() {
        assert_eq!(
            calculate_share_amount(150 * SOL, 10 * SOL, 100 * SOL, 2_500).unwrap(),
            (10 * SOL) / 4
        );
    }

    #[test]
    fn share_truncates() {
        assert_eq!(calculate_share_amount(10, 3, 10, 5_000).unwrap(), 1);
    }

    #[test]
    fn token_allocation_is_proportional_to_share() {
        let presale = 3_000_000_000u64 * 1_000_000;
        assert_eq!(
            calculate_token_allocation(100 * SOL, 150 * SOL, presale).unwrap(),
            2_000_000_000 * 1_000_000
        );
        assert_eq!(
            calculate_token_allocation(50 * SOL, 150 * SOL, presale).unwrap(),
            1_000_000_000 * 1_000_000
        );
        assert_eq!(calculate_token_allocation(0, 150 * SOL, presale).unwrap(), 0);
        assert_eq!(calculate_token_allocation(0, 0, presale).unwrap(), 0);
    }

    #[test]
    fn invite_rewards_two_tiers() {
        let rewards = calculate_invite_rewards(SOL, true, true, 200, 100).unwrap();
        assert_eq!(rewards.direct, SOL / 50);
        assert_eq!(rewards.second_tier, SOL / 100);
        assert_eq!(rewards.total().unwrap(), 3 * SOL / 100);
    }

    #[test]
    fn invite_rewards_need_an_inviter() {
        assert_eq!(
            calculate_invite_rewards(SOL, false, true, 200, 100).unwrap(),
            InviteRewards::default()
        );

        let rewards = calculate_invite_rewards(SOL, true, false, 200, 100).unwrap();
        assert_eq!(rewards.direct, SOL / 50);
        assert_eq!(rewards.second_tier, 0);
    }
}
