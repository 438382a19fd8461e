use soroban_sdk::{Address, Env, Vec};

use crate::errors::ContractError;
use crate::types::{DataKey, SavingsGroup};

const INSTANCE_TTL_THRESHOLD: u32 = 100;
const INSTANCE_TTL_EXTEND: u32 = 500;
const PERSISTENT_TTL_THRESHOLD: u32 = 100;
const PERSISTENT_TTL_EXTEND: u32 = 1000;

// --- Group Counter ---

/// Reserves the next group id. Ids start at 1.
pub fn next_group_id(env: &Env) -> u64 {
    let counter: u64 = env
        .storage()
        .instance()
        .get(&DataKey::GroupCounter)
        .unwrap_or(0);
    let group_id = counter + 1;
    env.storage()
        .instance()
        .set(&DataKey::GroupCounter, &group_id);
    extend_instance_ttl(env);
    group_id
}

// --- Group ---

pub fn get_group(env: &Env, group_id: u64) -> Option<SavingsGroup> {
    let key = DataKey::Group(group_id);
    let result = env.storage().persistent().get(&key);
    if result.is_some() {
        extend_persistent_ttl(env, &key);
    }
    result
}

pub fn require_group(env: &Env, group_id: u64) -> Result<SavingsGroup, ContractError> {
    get_group(env, group_id).ok_or(ContractError::GroupNotFound)
}

pub fn set_group(env: &Env, group: &SavingsGroup) {
    let key = DataKey::Group(group.id);
    env.storage().persistent().set(&key, group);
    extend_persistent_ttl(env, &key);
}

// --- Member Groups ---

pub fn get_member_groups(env: &Env, member: &Address) -> Vec<u64> {
    let key = DataKey::MemberGroups(member.clone());
    env.storage()
        .persistent()
        .get(&key)
        .unwrap_or(Vec::new(env))
}

pub fn add_member_group(env: &Env, member: &Address, group_id: u64) {
    let key = DataKey::MemberGroups(member.clone());
    let mut groups = get_member_groups(env, member);
    groups.push_back(group_id);
    env.storage().persistent().set(&key, &groups);
    extend_persistent_ttl(env, &key);
}

// --- TTL Management ---

fn extend_instance_ttl(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_TTL_THRESHOLD, INSTANCE_TTL_EXTEND);
}

fn extend_persistent_ttl(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_EXTEND);
}
