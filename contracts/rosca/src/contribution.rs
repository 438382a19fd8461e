use soroban_sdk::{Address, Env};

use crate::errors::ContractError;
use crate::group;
use crate::payout;
use crate::storage;

/// Accept `amount` from `member` and pay the current recipient if the group
/// balance reaches the threshold.
///
/// The ledger is validated and advanced in memory first. Token movements
/// and the record write then happen in the same host transaction, so a
/// failed transfer reverts the whole call.
pub fn contribute(
    env: &Env,
    member: Address,
    group_id: u64,
    amount: i128,
) -> Result<(), ContractError> {
    member.require_auth();

    let mut group = storage::require_group(env, group_id)?;
    let mut ledger = group::load_ledger(&group)?;

    let clock = u64::from(env.ledger().sequence());
    let outcome = ledger.contribute(&member, amount, clock)?;

    let token_client = soroban_sdk::token::Client::new(env, &group.token);
    token_client.transfer(&member, &env.current_contract_address(), &amount);

    env.events().publish(
        (crate::symbol_short!("contrib"),),
        (group_id, member, amount),
    );

    if let Some(p) = outcome.payout() {
        payout::send_payout(env, &group, p);
    }

    group::apply_ledger(&mut group, ledger);
    storage::set_group(env, &group);

    Ok(())
}

pub fn get_balance(env: &Env, group_id: u64) -> Result<i128, ContractError> {
    Ok(storage::require_group(env, group_id)?.balance)
}
