#![no_std]

extern crate alloc;

use soroban_sdk::{contract, contractimpl, symbol_short, Address, Env, Vec};

mod contribution;
mod errors;
mod group;
pub mod ledger;
mod payout;
mod storage;
mod types;

pub use errors::ContractError;
pub use ledger::{ContributionOutcome, GroupLedger, LedgerError, LedgerParts, Payout};
pub use types::*;

#[contract]
pub struct RoscaContract;

#[contractimpl]
impl RoscaContract {
    // ─── Group Lifecycle ────────────────────────────────────────────

    /// Create a savings group paying `contribution_amount` of `token` per
    /// member per round. Returns the new group id.
    pub fn create_group(
        env: Env,
        creator: Address,
        token: Address,
        members: Vec<Address>,
        contribution_amount: i128,
    ) -> Result<u64, ContractError> {
        group::create_group(&env, creator, token, members, contribution_amount)
    }

    /// Get the full group record.
    pub fn get_group(env: Env, group_id: u64) -> Result<SavingsGroup, ContractError> {
        group::get_group(&env, group_id)
    }

    /// Get the roster, in payout order.
    pub fn get_members(env: Env, group_id: u64) -> Result<Vec<Address>, ContractError> {
        group::get_members(&env, group_id)
    }

    /// Get all group IDs a member belongs to.
    pub fn get_member_groups(env: Env, member: Address) -> Vec<u64> {
        group::get_member_groups(&env, member)
    }

    // ─── Contributions ──────────────────────────────────────────────

    /// Contribute exactly the configured amount. Pays out the current
    /// recipient when the group balance reaches the threshold.
    pub fn contribute(
        env: Env,
        member: Address,
        group_id: u64,
        amount: i128,
    ) -> Result<(), ContractError> {
        contribution::contribute(&env, member, group_id, amount)
    }

    /// Funds currently held for the group.
    pub fn get_balance(env: Env, group_id: u64) -> Result<i128, ContractError> {
        contribution::get_balance(&env, group_id)
    }

    // ─── Payouts ────────────────────────────────────────────────────

    /// Get the member who receives the next payout.
    pub fn get_current_recipient(env: Env, group_id: u64) -> Result<Address, ContractError> {
        payout::get_current_recipient(&env, group_id)
    }

    /// Get the required contribution amount.
    pub fn get_contribution_amount(env: Env, group_id: u64) -> Result<i128, ContractError> {
        payout::get_contribution_amount(&env, group_id)
    }

    /// Get the current round index.
    pub fn get_round_info(env: Env, group_id: u64) -> Result<u32, ContractError> {
        payout::get_round_info(&env, group_id)
    }

    /// Ledger sequence of the last payout, 0 if none happened yet.
    pub fn get_last_collection(env: Env, group_id: u64) -> Result<u64, ContractError> {
        payout::get_last_collection(&env, group_id)
    }
}
