use anchor_lang::prelude::*;

use crate::errors::FairLaunchError;
use crate::state::TokenLaunch;
use crate::utils::allocation::{calculate_token_allocation, InviteRewards};

#[derive(Debug, Clone, Copy, AnchorSerialize, AnchorDeserialize, PartialEq, Eq)]
pub enum RefundStatus {
    NotRefunded,
    Refunded,
}

#[derive(Debug, Clone, Copy, AnchorSerialize, AnchorDeserialize, PartialEq, Eq)]
pub enum ReservationStatus {
    NotReserved,
    Reserved,
}

#[derive(Debug, Clone, Copy, AnchorSerialize, AnchorDeserialize, PartialEq, Eq)]
pub enum ClaimStatus {
    Unclaimed,
    Claimed,
}

impl Default for RefundStatus {
    fn default() -> Self {
        RefundStatus::NotRefunded
    }
}

impl Default for ReservationStatus {
    fn default() -> Self {
        ReservationStatus::NotReserved
    }
}

impl Default for ClaimStatus {
    fn default() -> Self {
        ClaimStatus::Unclaimed
    }
}

/// Everything a participant receives from `claims`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClaimBundle {
    /// Launched tokens from the presale allocation
    pub token_allocation: u64,
    /// Launched tokens from the free-claim pool
    pub free_claim: u64,
    /// Lamports accrued as inviter
    pub invite_reward: u64,
    /// Lamports discounted out of the allocation basis
    pub overfund_refund: u64,
}

impl ClaimBundle {
    pub fn is_empty(&self) -> bool {
        self.token_allocation == 0
            && self.free_claim == 0
            && self.invite_reward == 0
            && self.overfund_refund == 0
    }

    pub fn token_amount(&self) -> Result<u64> {
        self.token_allocation
            .checked_add(self.free_claim)
            .ok_or_else(|| error!(FairLaunchError::MathOverflow))
    }

    pub fn quote_amount(&self) -> Result<u64> {
        self.invite_reward
            .checked_add(self.overfund_refund)
            .ok_or_else(|| error!(FairLaunchError::MathOverflow))
    }
}

/// Referral chain of one contribution, default keys where absent
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InviteChain {
    pub inviter: Pubkey,
    pub second_tier: Pubkey,
}

impl InviteChain {
    pub fn has_second_tier(&self) -> bool {
        self.second_tier != Pubkey::default()
    }
}

#[account]
#[derive(Default)]
pub struct Participation {
    /// Associated token launch
    pub token_launch: Pubkey,

    /// User address
    pub user: Pubkey,

    /// bump seed
    pub bump: u8,

    // ===== Contribution Information =====
    /// Lamports paid, in full
    pub eth_paid: u64,

    /// Discounted allocation basis
    pub share_amt: u64,

    // ===== Referral =====
    /// Inviter recorded at first participation, default key if none
    pub inviter: Pubkey,

    /// Lamports accrued by inviting others
    pub invite_rewards: u64,

    // ===== Latches =====
    pub refund_status: RefundStatus,

    pub reservation_status: ReservationStatus,

    pub claim_status: ClaimStatus,

    // ===== Time Records =====
    /// First participation time
    pub participated_at: i64,

    /// Last updated time
    pub last_updated: i64,

    /// Reserved space
    pub reserved: [u64; 4],
}

impl Participation {
    pub const SIZE: usize = 8 + // discriminator
        32 + // token_launch
        32 + // user
        1 + // bump
        8 + // eth_paid
        8 + // share_amt
        32 + // inviter
        8 + // invite_rewards
        1 + // refund_status
        1 + // reservation_status
        1 + // claim_status
        8 + // participated_at
        8 + // last_updated
        8 * 4; // reserved

    /// Bind a freshly created record to its owner
    pub fn init_if_new(&mut self, token_launch: Pubkey, user: Pubkey, bump: u8) {
        if self.user == Pubkey::default() {
            self.token_launch = token_launch;
            self.user = user;
            self.bump = bump;
        }
    }

    pub fn has_participated(&self) -> bool {
        self.eth_paid > 0
    }

    /// Inviter a contribution is credited to. The first participation adopts
    /// the candidate; afterwards the recorded inviter stands.
    pub fn effective_inviter(&self, candidate: &Pubkey) -> Pubkey {
        if self.has_participated() {
            self.inviter
        } else {
            *candidate
        }
    }

    /// Update participation information
    pub fn record_contribution(
        &mut self,
        inviter: Pubkey,
        eth_amount: u64,
        share_amt: u64,
        current_time: i64,
    ) -> Result<()> {
        if !self.has_participated() {
            self.inviter = inviter;
            self.participated_at = current_time;
        }

        self.eth_paid = self.eth_paid
            .checked_add(eth_amount)
            .ok_or(FairLaunchError::MathOverflow)?;

        self.share_amt = self.share_amt
            .checked_add(share_amt)
            .ok_or(FairLaunchError::MathOverflow)?;

        self.last_updated = current_time;

        Ok(())
    }

    /// Resolve the referral chain of a contribution against the records the
    /// caller supplied. `self` is the contributor's record, already bound to
    /// its owner. An inviter record with a default `user` was created by this
    /// instruction and has no inviter of its own yet.
    pub fn resolve_invite_chain(
        &self,
        candidate: &Pubkey,
        inviter_record: Option<&Participation>,
        second_tier_record: Option<&Participation>,
    ) -> Result<InviteChain> {
        require_keys_neq!(*candidate, self.user, FairLaunchError::InvalidInviter);

        let inviter = self.effective_inviter(candidate);
        let second_tier = match inviter_record {
            None => {
                require_keys_eq!(inviter, Pubkey::default(), FairLaunchError::InvalidInviter);
                Pubkey::default()
            }
            Some(record) => {
                require_keys_neq!(inviter, Pubkey::default(), FairLaunchError::InvalidInviter);

                let is_new = record.user == Pubkey::default();
                require!(
                    is_new || (record.user == inviter && record.token_launch == self.token_launch),
                    FairLaunchError::InvalidInviter
                );
                record.inviter
            }
        };

        let chain = InviteChain { inviter, second_tier };
        // A second tier that is the contributor is paid on the contributor's own record
        let second_tier_is_self = second_tier == self.user;

        match second_tier_record {
            None => require!(
                !chain.has_second_tier() || second_tier_is_self,
                FairLaunchError::InvalidInviter
            ),
            Some(record) => require!(
                chain.has_second_tier()
                    && !second_tier_is_self
                    && record.user == second_tier
                    && record.token_launch == self.token_launch,
                FairLaunchError::InvalidInviter
            ),
        }

        Ok(chain)
    }

    /// Credit referral rewards along a resolved chain
    pub fn credit_invite_rewards(
        &mut self,
        chain: &InviteChain,
        rewards: &InviteRewards,
        inviter_record: Option<&mut Participation>,
        second_tier_record: Option<&mut Participation>,
    ) -> Result<()> {
        if let Some(record) = inviter_record {
            record.accrue_invite_reward(rewards.direct)?;
        }

        if chain.has_second_tier() && chain.second_tier == self.user {
            self.accrue_invite_reward(rewards.second_tier)?;
        } else if let Some(record) = second_tier_record {
            record.accrue_invite_reward(rewards.second_tier)?;
        }

        Ok(())
    }

    pub fn accrue_invite_reward(&mut self, amount: u64) -> Result<()> {
        self.invite_rewards = self.invite_rewards
            .checked_add(amount)
            .ok_or(FairLaunchError::MathOverflow)?;

        Ok(())
    }

    /// Compute the claim bundle against the launch totals
    pub fn entitlement(&self, launch: &TokenLaunch) -> Result<ClaimBundle> {
        let token_allocation = calculate_token_allocation(
            self.share_amt,
            launch.total_share_amt,
            launch.tokenomics.amt_for_presale,
        )?;

        let free_claim = if self.reservation_status == ReservationStatus::Reserved {
            launch.tokenomics.free_claim_per_user
        } else {
            0
        };

        let overfund_refund = self.eth_paid
            .checked_sub(self.share_amt)
            .ok_or(FairLaunchError::MathOverflow)?;

        Ok(ClaimBundle {
            token_allocation,
            free_claim,
            invite_reward: self.invite_rewards,
            overfund_refund,
        })
    }

    pub fn mark_claimed(&mut self, current_time: i64) -> Result<()> {
        require!(
            self.claim_status == ClaimStatus::Unclaimed,
            FairLaunchError::AlreadyClaimed
        );

        self.claim_status = ClaimStatus::Claimed;
        self.invite_rewards = 0;
        self.last_updated = current_time;

        Ok(())
    }

    pub fn mark_refunded(&mut self, current_time: i64) -> Result<()> {
        require!(
            self.refund_status == RefundStatus::NotRefunded,
            FairLaunchError::AlreadyRefund
        );

        self.refund_status = RefundStatus::Refunded;
        self.last_updated = current_time;

        Ok(())
    }

    pub fn mark_reserved(&mut self, current_time: i64) -> Result<()> {
        require!(
            self.reservation_status == ReservationStatus::NotReserved,
            FairLaunchError::AlreadyReserved
        );

        self.reservation_status = ReservationStatus::Reserved;
        self.last_updated = current_time;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::token_launch::tests::{sample_launch, START};
    use crate::utils::allocation::{calculate_invite_rewards, calculate_share_amount};
    use anchor_lang::solana_program::native_token::LAMPORTS_PER_SOL;

    const SOL: u64 = LAMPORTS_PER_SOL;

    fn contribute(launch: &mut TokenLaunch, user: &mut Participation, eth_amount: u64) -> u64 {
        let share = calculate_share_amount(
            launch.total_raised,
            eth_amount,
            launch.presale.hard_cap,
            launch.presale.overfunding_discount_bps,
        )
        .unwrap();
        launch.record_contribution(eth_amount, share, 0).unwrap();
        user.record_contribution(Pubkey::default(), eth_amount, share, START).unwrap();
        share
    }

    #[test]
    fn overfunding_example_from_two_users() {
        let mut launch = sample_launch();
        let mut first = Participation::default();
        let mut second = Participation::default();

        contribute(&mut launch, &mut first, 50 * SOL);
        contribute(&mut launch, &mut second, 100 * SOL);

        assert_eq!(first.share_amt, 50 * SOL);
        assert_eq!(second.share_amt, 75 * SOL);
        assert_eq!(launch.total_share_amt, 125 * SOL);
        assert_eq!(launch.total_raised, 150 * SOL);
        assert_eq!(launch.total_share_amt, first.share_amt + second.share_amt);
    }

    #[test]
    fn share_never_exceeds_payment() {
        let mut launch = sample_launch();
        let mut users: Vec<Participation> = (0..6).map(|_| Participation::default()).collect();
        let mut raised_before = 0;

        for (i, user) in users.iter_mut().enumerate() {
            let paid = (i as u64 + 1) * 20 * SOL;
            let share = contribute(&mut launch, user, paid);
            assert!(share <= paid);
            assert_eq!(share == paid, raised_before + paid <= launch.presale.hard_cap);
            raised_before += paid;
        }

        let sum: u64 = users.iter().map(|u| u.share_amt).sum();
        assert_eq!(sum, launch.total_share_amt);
    }

    #[test]
    fn inviter_is_recorded_once() {
        let inviter = Pubkey::new_unique();
        let other = Pubkey::new_unique();
        let mut user = Participation::default();

        assert_eq!(user.effective_inviter(&inviter), inviter);
        user.record_contribution(inviter, SOL, SOL, START).unwrap();
        assert_eq!(user.inviter, inviter);

        assert_eq!(user.effective_inviter(&other), inviter);
        user.record_contribution(user.effective_inviter(&other), SOL, SOL, START + 1).unwrap();
        assert_eq!(user.inviter, inviter);
        assert_eq!(user.participated_at, START);
        assert_eq!(user.eth_paid, 2 * SOL);
    }

    #[test]
    fn no_inviter_on_first_participation_is_final() {
        let mut user = Participation::default();
        user.record_contribution(Pubkey::default(), SOL, SOL, START).unwrap();

        assert_eq!(user.inviter, Pubkey::default());
        assert_eq!(user.effective_inviter(&Pubkey::new_unique()), Pubkey::default());
    }

    #[test]
    fn claim_bundle_after_overfunded_presale() {
        let mut launch = sample_launch();
        launch.tokenomics.free_claim_per_user = 10_000_000;
        let mut first = Participation::default();
        let mut second = Participation::default();

        contribute(&mut launch, &mut first, 100 * SOL);
        contribute(&mut launch, &mut second, 100 * SOL);
        second.mark_reserved(START).unwrap();
        first.accrue_invite_reward(2 * SOL).unwrap();

        let bundle = first.entitlement(&launch).unwrap();
        assert_eq!(bundle.token_allocation, 2_000_000_000);
        assert_eq!(bundle.free_claim, 0);
        assert_eq!(bundle.invite_reward, 2 * SOL);
        assert_eq!(bundle.overfund_refund, 0);

        let bundle = second.entitlement(&launch).unwrap();
        assert_eq!(bundle.token_allocation, 1_000_000_000);
        assert_eq!(bundle.free_claim, 10_000_000);
        assert_eq!(bundle.invite_reward, 0);
        assert_eq!(bundle.overfund_refund, 50 * SOL);
        assert_eq!(bundle.token_amount().unwrap(), 1_010_000_000);
    }

    #[test]
    fn empty_bundle_for_bystander() {
        let mut launch = sample_launch();
        let mut user = Participation::default();
        contribute(&mut launch, &mut user, 2 * SOL);

        let bystander = Participation::default();
        assert!(bystander.entitlement(&launch).unwrap().is_empty());
    }

    #[test]
    fn claim_latch_zeroes_rewards_and_is_one_shot() {
        let mut user = Participation::default();
        user.accrue_invite_reward(SOL).unwrap();

        user.mark_claimed(START).unwrap();
        assert_eq!(user.claim_status, ClaimStatus::Claimed);
        assert_eq!(user.invite_rewards, 0);

        assert_eq!(
            user.mark_claimed(START + 1).unwrap_err(),
            FairLaunchError::AlreadyClaimed.into()
        );
        assert_eq!(user.claim_status, ClaimStatus::Claimed);
    }

    #[test]
    fn refund_and_reserve_latches_are_one_shot() {
        let mut user = Participation::default();

        user.mark_refunded(START).unwrap();
        assert_eq!(
            user.mark_refunded(START).unwrap_err(),
            FairLaunchError::AlreadyRefund.into()
        );
        assert_eq!(user.refund_status, RefundStatus::Refunded);

        user.mark_reserved(START).unwrap();
        assert_eq!(
            user.mark_reserved(START).unwrap_err(),
            FairLaunchError::AlreadyReserved.into()
        );
        assert_eq!(user.reservation_status, ReservationStatus::Reserved);
    }

    fn newcomer(token_launch: Pubkey) -> Participation {
        let mut record = Participation::default();
        record.init_if_new(token_launch, Pubkey::new_unique(), 255);
        record
    }

    fn member(token_launch: Pubkey, inviter: Pubkey) -> Participation {
        let mut record = newcomer(token_launch);
        record.record_contribution(inviter, SOL, SOL, START).unwrap();
        record
    }

    #[test]
    fn self_invite_is_rejected() {
        let launch_key = Pubkey::new_unique();
        let user = newcomer(launch_key);
        let own = user.clone();

        assert_eq!(
            user.resolve_invite_chain(&user.user, Some(&own), None).unwrap_err(),
            FairLaunchError::InvalidInviter.into()
        );

        let returning = member(launch_key, Pubkey::default());
        assert_eq!(
            returning.resolve_invite_chain(&returning.user, None, None).unwrap_err(),
            FairLaunchError::InvalidInviter.into()
        );
    }

    #[test]
    fn inviter_record_must_match_the_inviter() {
        let launch_key = Pubkey::new_unique();
        let user = newcomer(launch_key);
        let inviter = member(launch_key, Pubkey::default());

        // Missing record
        assert_eq!(
            user.resolve_invite_chain(&inviter.user, None, None).unwrap_err(),
            FairLaunchError::InvalidInviter.into()
        );

        // Record without an inviter
        assert_eq!(
            user.resolve_invite_chain(&Pubkey::default(), Some(&inviter), None).unwrap_err(),
            FairLaunchError::InvalidInviter.into()
        );

        // Someone else's record
        let stranger = member(launch_key, Pubkey::default());
        assert_eq!(
            user.resolve_invite_chain(&inviter.user, Some(&stranger), None).unwrap_err(),
            FairLaunchError::InvalidInviter.into()
        );

        // Same inviter on another launch
        let mut elsewhere = inviter.clone();
        elsewhere.token_launch = Pubkey::new_unique();
        assert_eq!(
            user.resolve_invite_chain(&inviter.user, Some(&elsewhere), None).unwrap_err(),
            FairLaunchError::InvalidInviter.into()
        );

        let chain = user.resolve_invite_chain(&inviter.user, Some(&inviter), None).unwrap();
        assert_eq!(chain, InviteChain { inviter: inviter.user, second_tier: Pubkey::default() });
    }

    #[test]
    fn new_inviter_record_has_no_second_tier() {
        let launch_key = Pubkey::new_unique();
        let user = newcomer(launch_key);
        let candidate = Pubkey::new_unique();
        let created = Participation::default();

        let chain = user.resolve_invite_chain(&candidate, Some(&created), None).unwrap();
        assert_eq!(chain, InviteChain { inviter: candidate, second_tier: Pubkey::default() });

        let extra = member(launch_key, Pubkey::default());
        assert_eq!(
            user.resolve_invite_chain(&candidate, Some(&created), Some(&extra)).unwrap_err(),
            FairLaunchError::InvalidInviter.into()
        );
    }

    #[test]
    fn second_tier_record_must_match_the_chain() {
        let launch_key = Pubkey::new_unique();
        let top = member(launch_key, Pubkey::default());
        let inviter = member(launch_key, top.user);
        let user = newcomer(launch_key);

        assert_eq!(
            user.resolve_invite_chain(&inviter.user, Some(&inviter), None).unwrap_err(),
            FairLaunchError::InvalidInviter.into()
        );

        let stranger = member(launch_key, Pubkey::default());
        assert_eq!(
            user.resolve_invite_chain(&inviter.user, Some(&inviter), Some(&stranger)).unwrap_err(),
            FairLaunchError::InvalidInviter.into()
        );

        let mut elsewhere = top.clone();
        elsewhere.token_launch = Pubkey::new_unique();
        assert_eq!(
            user.resolve_invite_chain(&inviter.user, Some(&inviter), Some(&elsewhere)).unwrap_err(),
            FairLaunchError::InvalidInviter.into()
        );
    }

    #[test]
    fn recorded_inviter_stands_on_later_contributions() {
        let launch_key = Pubkey::new_unique();
        let inviter = member(launch_key, Pubkey::default());
        let user = member(launch_key, inviter.user);

        let chain = user.resolve_invite_chain(&Pubkey::new_unique(), Some(&inviter), None).unwrap();
        assert_eq!(chain.inviter, inviter.user);

        // A user who joined without an inviter cannot add one later
        let loner = member(launch_key, Pubkey::default());
        let chain = loner.resolve_invite_chain(&inviter.user, None, None).unwrap();
        assert_eq!(chain, InviteChain::default());
    }

    #[test]
    fn two_tier_chain_credits_both_inviters() {
        let mut launch = sample_launch();
        let launch_key = Pubkey::new_unique();
        let mut top = member(launch_key, Pubkey::default());
        let mut inviter = member(launch_key, top.user);
        let mut user = newcomer(launch_key);

        let chain = user.resolve_invite_chain(&inviter.user, Some(&inviter), Some(&top)).unwrap();
        assert_eq!(chain, InviteChain { inviter: inviter.user, second_tier: top.user });

        let eth_amount = 5 * SOL;
        let rewards = calculate_invite_rewards(
            eth_amount,
            chain.has_inviter(),
            chain.has_second_tier(),
            200,
            100,
        )
        .unwrap();

        launch.record_contribution(eth_amount, eth_amount, rewards.total().unwrap()).unwrap();
        user.record_contribution(chain.inviter, eth_amount, eth_amount, START).unwrap();
        user.credit_invite_rewards(&chain, &rewards, Some(&mut inviter), Some(&mut top)).unwrap();

        assert_eq!(inviter.invite_rewards, SOL / 10);
        assert_eq!(top.invite_rewards, SOL / 20);
        assert_eq!(user.invite_rewards, 0);
        assert_eq!(user.inviter, inviter.user);
        assert_eq!(launch.total_for_invite, inviter.invite_rewards + top.invite_rewards);
    }

    #[test]
    fn invite_cycle_credits_the_contributor() {
        let launch_key = Pubkey::new_unique();
        let mut user = newcomer(launch_key);
        // The inviter joined earlier, invited by this user
        let mut inviter = member(launch_key, user.user);

        let own = user.clone();
        assert_eq!(
            user.resolve_invite_chain(&inviter.user, Some(&inviter), Some(&own)).unwrap_err(),
            FairLaunchError::InvalidInviter.into()
        );

        let chain = user.resolve_invite_chain(&inviter.user, Some(&inviter), None).unwrap();
        assert_eq!(chain.second_tier, user.user);

        let rewards = calculate_invite_rewards(2 * SOL, true, true, 200, 100).unwrap();
        user.record_contribution(chain.inviter, 2 * SOL, 2 * SOL, START).unwrap();
        user.credit_invite_rewards(&chain, &rewards, Some(&mut inviter), None).unwrap();

        assert_eq!(inviter.invite_rewards, 4 * SOL / 100);
        assert_eq!(user.invite_rewards, 2 * SOL / 100);
    }
}
