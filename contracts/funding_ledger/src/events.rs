use soroban_sdk::{contractevent, Address, BytesN};

use crate::storage::ProjectStatus;

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub admin: Address,
    pub native_token: Address,
    pub storage_deposit: u64,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProjectCreatedEvent {
    #[topic]
    pub owner: Address,
    pub project_id: BytesN<32>,
    pub financial_target: u64,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ContributionEvent {
    #[topic]
    pub owner: Address,
    #[topic]
    pub contributor: Address,
    pub amount: u64,
    pub balance: u64,
    pub status: ProjectStatus,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProjectClosedEvent {
    #[topic]
    pub owner: Address,
    pub status: ProjectStatus,
    pub balance: u64,
    pub contributor_count: u32,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WithdrawEvent {
    #[topic]
    pub owner: Address,
    pub amount: u64,
    pub deposit: u64,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RefundClaimedEvent {
    #[topic]
    pub owner: Address,
    #[topic]
    pub contributor: Address,
    pub amount: u64,
    pub remaining_contributors: u32,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FailedProjectClosedEvent {
    #[topic]
    pub owner: Address,
    pub deposit: u64,
}
