//! Host-agnostic savings group state machine.
//!
//! A [`GroupLedger`] owns the roster, the pooled balance and the rotation
//! pointer of one group. It knows nothing about storage, authentication or
//! token transfers: the embedding host resolves the caller, supplies the
//! clock and executes the [`Payout`] a contribution may produce.

use alloc::vec::Vec;

/// Failures of ledger operations. Every failure leaves the ledger untouched.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum LedgerError {
    /// Fewer than two members at creation.
    InvalidMembership,
    /// The same identifier appears twice in the roster.
    DuplicateMember,
    /// Contribution amount is not positive, or the payout threshold overflows.
    InvalidAmount,
    /// Contribution from an identifier outside the roster.
    NotAMember,
    /// Contribution does not equal the configured amount.
    WrongAmount,
    /// Contribution at or before the clock value of the last payout.
    AlreadyCollected,
    /// Crediting the contribution would overflow the balance.
    BalanceOverflow,
    /// Persisted fields violate a ledger invariant: round out of range or
    /// negative balance.
    CorruptParts,
}

/// Funds owed to a recipient after a contribution reached the threshold.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Payout<M> {
    pub recipient: M,
    pub amount: i128,
    /// Round that was paid out.
    pub round: u32,
    /// Round the ledger rotated to.
    pub next_round: u32,
}

/// What an accepted contribution did to the ledger.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ContributionOutcome<M> {
    /// Credited; the balance is still below the threshold.
    Accepted { balance: i128 },
    /// Credited and the threshold fired. The host must transfer the payout
    /// in the same transaction that commits the ledger.
    PaidOut(Payout<M>),
}

impl<M> ContributionOutcome<M> {
    pub fn payout(&self) -> Option<&Payout<M>> {
        match self {
            ContributionOutcome::Accepted { .. } => None,
            ContributionOutcome::PaidOut(payout) => Some(payout),
        }
    }
}

/// Raw ledger fields, used by hosts to persist and reload a ledger.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LedgerParts<M> {
    pub members: Vec<M>,
    pub contribution_amount: i128,
    pub current_round: u32,
    pub last_collection_round: u64,
    pub balance: i128,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GroupLedger<M> {
    members: Vec<M>,
    contribution_amount: i128,
    current_round: u32,
    total_rounds: u32,
    last_collection_round: u64,
    balance: i128,
}

impl<M: PartialEq + Clone> GroupLedger<M> {
    /// Creates a ledger for `members` paying `contribution_amount` per round.
    ///
    /// The roster order is the payout order. Members are compared pairwise
    /// and the first duplicate pair fails the whole call.
    pub fn initialize(members: Vec<M>, contribution_amount: i128) -> Result<Self, LedgerError> {
        if members.len() < 2 {
            return Err(LedgerError::InvalidMembership);
        }
        let total_rounds =
            u32::try_from(members.len()).map_err(|_| LedgerError::InvalidMembership)?;

        for i in 0..members.len() {
            for j in (i + 1)..members.len() {
                if members[i] == members[j] {
                    return Err(LedgerError::DuplicateMember);
                }
            }
        }

        if contribution_amount <= 0 {
            return Err(LedgerError::InvalidAmount);
        }
        contribution_amount
            .checked_mul(i128::from(total_rounds - 1))
            .ok_or(LedgerError::InvalidAmount)?;

        Ok(Self {
            members,
            contribution_amount,
            current_round: 0,
            total_rounds,
            last_collection_round: 0,
            balance: 0,
        })
    }

    /// Rebuilds a ledger from persisted fields, re-checking every invariant.
    pub fn from_parts(parts: LedgerParts<M>) -> Result<Self, LedgerError> {
        let mut ledger = Self::initialize(parts.members, parts.contribution_amount)?;
        if parts.current_round >= ledger.total_rounds || parts.balance < 0 {
            return Err(LedgerError::CorruptParts);
        }
        ledger.current_round = parts.current_round;
        ledger.last_collection_round = parts.last_collection_round;
        ledger.balance = parts.balance;
        Ok(ledger)
    }

    pub fn into_parts(self) -> LedgerParts<M> {
        LedgerParts {
            members: self.members,
            contribution_amount: self.contribution_amount,
            current_round: self.current_round,
            last_collection_round: self.last_collection_round,
            balance: self.balance,
        }
    }

    /// Credits a contribution and pays out the current recipient once the
    /// balance covers the threshold.
    ///
    /// Checks run in a fixed order: membership, amount, clock. Nothing is
    /// mutated until all of them pass.
    pub fn contribute(
        &mut self,
        sender: &M,
        amount: i128,
        current_clock: u64,
    ) -> Result<ContributionOutcome<M>, LedgerError> {
        if !self.is_member(sender) {
            return Err(LedgerError::NotAMember);
        }
        if amount != self.contribution_amount {
            return Err(LedgerError::WrongAmount);
        }
        if current_clock <= self.last_collection_round {
            return Err(LedgerError::AlreadyCollected);
        }
        let credited = self
            .balance
            .checked_add(amount)
            .ok_or(LedgerError::BalanceOverflow)?;

        self.balance = credited;

        let threshold = self.threshold();
        if self.balance < threshold {
            return Ok(ContributionOutcome::Accepted {
                balance: self.balance,
            });
        }

        let round = self.current_round;
        let recipient = self.members[round as usize].clone();
        self.balance -= threshold;
        self.current_round = (round + 1) % self.total_rounds;
        self.last_collection_round = current_clock;

        Ok(ContributionOutcome::PaidOut(Payout {
            recipient,
            amount: threshold,
            round,
            next_round: self.current_round,
        }))
    }

    pub fn is_member(&self, id: &M) -> bool {
        self.members.iter().any(|m| m == id)
    }

    pub fn get_current_recipient(&self) -> &M {
        &self.members[self.current_round as usize]
    }

    pub fn get_contribution_amount(&self) -> i128 {
        self.contribution_amount
    }

    pub fn get_round_info(&self) -> u32 {
        self.current_round
    }
}

impl<M> GroupLedger<M> {
    pub fn members(&self) -> &[M] {
        &self.members
    }

    pub fn total_rounds(&self) -> u32 {
        self.total_rounds
    }

    pub fn last_collection_round(&self) -> u64 {
        self.last_collection_round
    }

    pub fn balance(&self) -> i128 {
        self.balance
    }

    /// Amount paid to each recipient: everyone else's contribution.
    pub fn threshold(&self) -> i128 {
        // Representable: checked at initialize.
        self.contribution_amount * i128::from(self.total_rounds - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    const A: &str = "alice";
    const B: &str = "bob";
    const C: &str = "carol";

    fn three_members() -> GroupLedger<&'static str> {
        GroupLedger::initialize(vec![A, B, C], 10).unwrap()
    }

    #[test]
    fn test_initialize_sets_fresh_state() {
        let ledger = three_members();
        assert_eq!(ledger.members(), &[A, B, C]);
        assert_eq!(ledger.get_contribution_amount(), 10);
        assert_eq!(ledger.get_round_info(), 0);
        assert_eq!(ledger.total_rounds(), 3);
        assert_eq!(ledger.last_collection_round(), 0);
        assert_eq!(ledger.balance(), 0);
        assert_eq!(ledger.threshold(), 20);
        assert_eq!(*ledger.get_current_recipient(), A);
    }

    #[test]
    fn test_initialize_rejects_small_or_duplicate_rosters() {
        assert_eq!(
            GroupLedger::initialize(vec![A], 10),
            Err(LedgerError::InvalidMembership)
        );
        assert_eq!(
            GroupLedger::<&str>::initialize(vec![], 10),
            Err(LedgerError::InvalidMembership)
        );
        assert_eq!(
            GroupLedger::initialize(vec![A, A], 10),
            Err(LedgerError::DuplicateMember)
        );
        assert_eq!(
            GroupLedger::initialize(vec![A, B, C, B], 10),
            Err(LedgerError::DuplicateMember)
        );
        // Roster errors are reported before amount errors.
        assert_eq!(
            GroupLedger::initialize(vec![A], 0),
            Err(LedgerError::InvalidMembership)
        );
    }

    #[test]
    fn test_initialize_rejects_bad_amounts() {
        assert_eq!(
            GroupLedger::initialize(vec![A, B], 0),
            Err(LedgerError::InvalidAmount)
        );
        assert_eq!(
            GroupLedger::initialize(vec![A, B], -5),
            Err(LedgerError::InvalidAmount)
        );
        assert_eq!(
            GroupLedger::initialize(vec![A, B, C], i128::MAX),
            Err(LedgerError::InvalidAmount)
        );
        // Two members: threshold equals the contribution itself.
        assert!(GroupLedger::initialize(vec![A, B], i128::MAX).is_ok());
    }

    #[test]
    fn test_rotation_pays_first_member_at_threshold() {
        let mut ledger = three_members();

        let outcome = ledger.contribute(&A, 10, 5).unwrap();
        assert_eq!(outcome, ContributionOutcome::Accepted { balance: 10 });
        assert_eq!(ledger.get_round_info(), 0);
        assert_eq!(ledger.last_collection_round(), 0);

        let outcome = ledger.contribute(&B, 10, 7).unwrap();
        assert_eq!(
            outcome,
            ContributionOutcome::PaidOut(Payout {
                recipient: A,
                amount: 20,
                round: 0,
                next_round: 1,
            })
        );
        assert_eq!(ledger.balance(), 0);
        assert_eq!(ledger.get_round_info(), 1);
        assert_eq!(*ledger.get_current_recipient(), B);
        assert_eq!(ledger.last_collection_round(), 7);

        assert_eq!(ledger.contribute(&C, 10, 7), Err(LedgerError::AlreadyCollected));
        assert_eq!(ledger.balance(), 0);

        let outcome = ledger.contribute(&C, 10, 8).unwrap();
        assert_eq!(outcome, ContributionOutcome::Accepted { balance: 10 });
    }

    #[test]
    fn test_precondition_order() {
        let mut ledger = three_members();
        ledger.contribute(&A, 10, 1).unwrap();
        ledger.contribute(&B, 10, 2).unwrap();
        assert_eq!(ledger.last_collection_round(), 2);

        // Non-member wins over wrong amount and stale clock.
        assert_eq!(ledger.contribute(&"mallory", 11, 0), Err(LedgerError::NotAMember));
        // Wrong amount wins over stale clock.
        assert_eq!(ledger.contribute(&A, 11, 0), Err(LedgerError::WrongAmount));
        assert_eq!(ledger.contribute(&A, 10, 2), Err(LedgerError::AlreadyCollected));
    }

    #[test]
    fn test_wrong_amount_regardless_of_balance() {
        let mut ledger = three_members();
        for clock in 1..4 {
            assert_eq!(ledger.contribute(&A, 11, clock), Err(LedgerError::WrongAmount));
            assert_eq!(ledger.contribute(&A, 9, clock), Err(LedgerError::WrongAmount));
        }
        ledger.contribute(&A, 10, 1).unwrap();
        assert_eq!(ledger.contribute(&B, 11, 1), Err(LedgerError::WrongAmount));
        assert_eq!(ledger.balance(), 10);
    }

    #[test]
    fn test_failures_leave_state_untouched() {
        let mut ledger = three_members();
        ledger.contribute(&A, 10, 3).unwrap();
        let before = ledger.clone();

        let _ = ledger.contribute(&"mallory", 10, 4);
        let _ = ledger.contribute(&B, 20, 4);
        ledger.contribute(&B, 10, 4).unwrap();
        let after_payout = ledger.clone();
        let _ = ledger.contribute(&C, 10, 4);

        assert_eq!(after_payout, ledger);
        assert_ne!(before, ledger);
    }

    #[test]
    fn test_repeat_contributions_count_toward_threshold() {
        let mut ledger = GroupLedger::initialize(vec![A, B, C, "dave"], 10).unwrap();
        // Threshold is 30; A pays every share alone.
        ledger.contribute(&A, 10, 1).unwrap();
        ledger.contribute(&A, 10, 1).unwrap();
        assert_eq!(ledger.balance(), 20);
        let outcome = ledger.contribute(&A, 10, 1).unwrap();
        let payout = outcome.payout().unwrap();
        assert_eq!(payout.recipient, A);
        assert_eq!(payout.amount, 30);
        assert_eq!(ledger.balance(), 0);
    }

    #[test]
    fn test_surplus_is_kept_and_never_overpaid() {
        // A host restoring a group whose custody holds 5 units beyond the
        // contributions.
        let mut ledger = GroupLedger::from_parts(LedgerParts {
            members: vec![A, B, C],
            contribution_amount: 10,
            current_round: 0,
            last_collection_round: 0,
            balance: 5,
        })
        .unwrap();

        ledger.contribute(&A, 10, 1).unwrap();
        assert_eq!(ledger.balance(), 15);
        let outcome = ledger.contribute(&B, 10, 1).unwrap();
        assert_eq!(outcome.payout().map(|p| p.amount), Some(20));
        assert_eq!(ledger.balance(), 5);

        ledger.contribute(&C, 10, 2).unwrap();
        let outcome = ledger.contribute(&A, 10, 2).unwrap();
        let payout = outcome.payout().unwrap();
        assert_eq!(payout.recipient, B);
        assert_eq!(payout.amount, 20);
        assert_eq!(ledger.balance(), 5);
    }

    #[test]
    fn test_round_wraps_and_stays_in_range() {
        let mut ledger = GroupLedger::initialize(vec![A, B], 7).unwrap();
        let mut recipients = Vec::new();
        for clock in 1..=6u64 {
            let outcome = ledger.contribute(&A, 7, clock).unwrap();
            let payout = outcome.payout().unwrap();
            recipients.push(payout.recipient);
            assert!(ledger.get_round_info() < ledger.total_rounds());
            assert_eq!(ledger.last_collection_round(), clock);
        }
        assert_eq!(recipients, vec![A, B, A, B, A, B]);
    }

    #[test]
    fn test_reads_are_stable() {
        let mut ledger = three_members();
        ledger.contribute(&C, 10, 9).unwrap();
        let snapshot = ledger.clone();
        for _ in 0..3 {
            assert_eq!(*ledger.get_current_recipient(), A);
            assert_eq!(ledger.get_contribution_amount(), 10);
            assert_eq!(ledger.get_round_info(), 0);
        }
        assert_eq!(snapshot, ledger);
    }

    #[test]
    fn test_parts_round_trip_and_validation() {
        let mut ledger = three_members();
        ledger.contribute(&A, 10, 1).unwrap();
        ledger.contribute(&B, 10, 2).unwrap();
        ledger.contribute(&C, 10, 3).unwrap();

        let restored = GroupLedger::from_parts(ledger.clone().into_parts()).unwrap();
        assert_eq!(restored, ledger);

        let mut parts = ledger.clone().into_parts();
        parts.current_round = 3;
        assert_eq!(GroupLedger::from_parts(parts), Err(LedgerError::CorruptParts));

        let mut parts = ledger.into_parts();
        parts.balance = -1;
        assert_eq!(GroupLedger::from_parts(parts), Err(LedgerError::CorruptParts));
    }

    #[test]
    fn test_credit_overflow_is_rejected() {
        let mut ledger = GroupLedger::from_parts(LedgerParts {
            members: vec![A, B, C],
            contribution_amount: 10,
            current_round: 2,
            last_collection_round: 4,
            balance: i128::MAX - 5,
        })
        .unwrap();
        let before = ledger.clone();

        assert_eq!(ledger.contribute(&A, 10, 5), Err(LedgerError::BalanceOverflow));
        assert_eq!(before, ledger);
    }
}
