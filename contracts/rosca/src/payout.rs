use soroban_sdk::{Address, Env};

use crate::errors::ContractError;
use crate::ledger::Payout;
use crate::storage;
use crate::types::SavingsGroup;

/// Transfer a fired payout out of the contract's custody.
pub(crate) fn send_payout(env: &Env, group: &SavingsGroup, payout: &Payout<Address>) {
    let token_client = soroban_sdk::token::Client::new(env, &group.token);
    token_client.transfer(
        &env.current_contract_address(),
        &payout.recipient,
        &payout.amount,
    );

    env.events().publish(
        (crate::symbol_short!("payout"),),
        (group.id, payout.recipient.clone(), payout.amount, payout.round),
    );
    env.events().publish(
        (crate::symbol_short!("rnd_new"),),
        (group.id, payout.next_round),
    );
}

pub fn get_current_recipient(env: &Env, group_id: u64) -> Result<Address, ContractError> {
    let group = storage::require_group(env, group_id)?;
    group
        .members
        .get(group.current_round)
        .ok_or(ContractError::CorruptState)
}

pub fn get_contribution_amount(env: &Env, group_id: u64) -> Result<i128, ContractError> {
    Ok(storage::require_group(env, group_id)?.contribution_amount)
}

pub fn get_round_info(env: &Env, group_id: u64) -> Result<u32, ContractError> {
    Ok(storage::require_group(env, group_id)?.current_round)
}

pub fn get_last_collection(env: &Env, group_id: u64) -> Result<u64, ContractError> {
    Ok(storage::require_group(env, group_id)?.last_collection_round)
}
