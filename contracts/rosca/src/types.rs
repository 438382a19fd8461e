use soroban_sdk::{contracttype, Address, Vec};

/// Persisted state of one savings group.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SavingsGroup {
    pub id: u64,
    pub creator: Address,
    pub token: Address,
    /// Roster and payout order.
    pub members: Vec<Address>,
    pub contribution_amount: i128,
    pub current_round: u32,
    pub total_rounds: u32,
    /// Ledger sequence of the last payout, 0 before the first one.
    pub last_collection_round: u64,
    /// Funds held for this group by the contract.
    pub balance: i128,
    pub created_at: u64,
}

/// Storage keys for all contract data.
#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    GroupCounter,
    Group(u64),
    MemberGroups(Address),
}
