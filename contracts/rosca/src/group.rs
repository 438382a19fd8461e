use alloc::vec::Vec as StdVec;
use soroban_sdk::{Address, Env, Vec};

use crate::errors::ContractError;
use crate::ledger::{GroupLedger, LedgerParts};
use crate::storage;
use crate::types::SavingsGroup;

/// Create a new savings group. `members` is both the roster and the payout
/// order; the creator does not have to be one of them, but every member must
/// sign, since the group is added to each member's index.
pub fn create_group(
    env: &Env,
    creator: Address,
    token: Address,
    members: Vec<Address>,
    contribution_amount: i128,
) -> Result<u64, ContractError> {
    creator.require_auth();
    for member in members.iter() {
        if member != creator {
            member.require_auth();
        }
    }

    let roster: StdVec<Address> = members.iter().collect();
    let ledger = GroupLedger::initialize(roster, contribution_amount)?;

    let group_id = storage::next_group_id(env);
    let group = SavingsGroup {
        id: group_id,
        creator: creator.clone(),
        token,
        members: members.clone(),
        contribution_amount: ledger.get_contribution_amount(),
        current_round: ledger.get_round_info(),
        total_rounds: ledger.total_rounds(),
        last_collection_round: ledger.last_collection_round(),
        balance: ledger.balance(),
        created_at: env.ledger().timestamp(),
    };

    storage::set_group(env, &group);
    for member in members.iter() {
        storage::add_member_group(env, &member, group_id);
    }

    env.events().publish(
        (crate::symbol_short!("grp_creat"),),
        (group_id, creator, group.total_rounds),
    );

    Ok(group_id)
}

/// Rebuild the state machine from a stored record.
pub(crate) fn load_ledger(group: &SavingsGroup) -> Result<GroupLedger<Address>, ContractError> {
    let ledger = GroupLedger::from_parts(LedgerParts {
        members: group.members.iter().collect(),
        contribution_amount: group.contribution_amount,
        current_round: group.current_round,
        last_collection_round: group.last_collection_round,
        balance: group.balance,
    })
    // Roster and amount were valid at creation, so any failure here means
    // the record was altered.
    .map_err(|_| ContractError::CorruptState)?;

    if ledger.total_rounds() != group.total_rounds {
        return Err(ContractError::CorruptState);
    }
    Ok(ledger)
}

/// Copy the mutable ledger fields back into the record. Roster and amount
/// never change after creation.
pub(crate) fn apply_ledger(group: &mut SavingsGroup, ledger: GroupLedger<Address>) {
    let parts = ledger.into_parts();
    group.current_round = parts.current_round;
    group.last_collection_round = parts.last_collection_round;
    group.balance = parts.balance;
}

pub fn get_group(env: &Env, group_id: u64) -> Result<SavingsGroup, ContractError> {
    storage::require_group(env, group_id)
}

pub fn get_members(env: &Env, group_id: u64) -> Result<Vec<Address>, ContractError> {
    Ok(storage::require_group(env, group_id)?.members)
}

pub fn get_member_groups(env: &Env, member: Address) -> Vec<u64> {
    storage::get_member_groups(env, &member)
}
