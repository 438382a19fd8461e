use soroban_sdk::contracterror;

use crate::ledger::LedgerError;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ContractError {
    GroupNotFound = 1,
    InvalidMembership = 2,
    DuplicateMember = 3,
    InvalidAmount = 4,
    NotAMember = 5,
    WrongAmount = 6,
    AlreadyCollected = 7,
    BalanceOverflow = 8,
    CorruptState = 9,
}

impl From<LedgerError> for ContractError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::InvalidMembership => ContractError::InvalidMembership,
            LedgerError::DuplicateMember => ContractError::DuplicateMember,
            LedgerError::InvalidAmount => ContractError::InvalidAmount,
            LedgerError::NotAMember => ContractError::NotAMember,
            LedgerError::WrongAmount => ContractError::WrongAmount,
            LedgerError::AlreadyCollected => ContractError::AlreadyCollected,
            LedgerError::BalanceOverflow => ContractError::BalanceOverflow,
            LedgerError::CorruptParts => ContractError::CorruptState,
        }
    }
}
