//! Ledger layout for the funding contract.
//!
//! | Key                                | Tier       | Type      |
//! |------------------------------------|------------|-----------|
//! | `Config`                           | Instance   | `Config`  |
//! | `NextSequence`                     | Instance   | `u64`     |
//! | `Project(id)`                      | Persistent | `Project` |
//! | `Contribution(sequence, address)`  | Persistent | `u64`     |
//!
//! A project lives under `id = sha256("project" || xdr(owner))`, so every owner
//! has exactly one slot and the slot can be recomputed from the owner alone.
//!
//! Claims are keyed by the project's creation sequence rather than its id. An
//! owner who closes a project and opens another gets a fresh sequence, so claims
//! left behind by the old project are never read again and simply expire.

use soroban_sdk::{contracttype, xdr::ToXdr, Address, Bytes, BytesN, Env, String};

use crate::errors::FundingError;

/// Approximate ledgers per day (~5 seconds per ledger).
const DAY_IN_LEDGERS: u32 = 17_280;

const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
const INSTANCE_LIFETIME_THRESHOLD: u32 = DAY_IN_LEDGERS;

const PERSISTENT_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
const PERSISTENT_LIFETIME_THRESHOLD: u32 = 7 * DAY_IN_LEDGERS;

/// Namespace tag mixed into every project identity.
pub const PROJECT_SEED: &[u8] = b"project";

/// Longest accepted project name, in bytes.
pub const MAX_NAME_LEN: u32 = 64;

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Config,                     // -> Config
    NextSequence,               // -> u64
    Project(BytesN<32>),        // derived id -> Project
    Contribution(u64, Address), // (project sequence, contributor) -> u64
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    pub admin: Address,
    /// Stellar Asset Contract of the native unit of value.
    pub native_token: Address,
    /// Charged to the owner on creation, returned when the record is deleted.
    pub storage_deposit: u64,
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ProjectStatus {
    Active = 0,
    /// Never produced by any entry point.
    Paused = 1,
    TargetReached = 2,
    Success = 3,
    Failed = 4,
}

impl ProjectStatus {
    pub fn accepts_contributions(self) -> bool {
        matches!(self, ProjectStatus::Active | ProjectStatus::TargetReached)
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, ProjectStatus::Success | ProjectStatus::Failed)
    }
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Project {
    pub id: BytesN<32>,
    /// Creation order across the contract; scopes the contribution keys.
    pub sequence: u64,
    pub owner: Address,
    pub name: String,
    pub financial_target: u64,
    pub balance: u64,
    pub status: ProjectStatus,
    /// Number of addresses holding a non-zero claim.
    pub contributor_count: u32,
    pub deposit: u64,
}

/// Derive the storage identity of `owner`'s project.
pub fn project_id(env: &Env, owner: &Address) -> BytesN<32> {
    let mut preimage = Bytes::from_slice(env, PROJECT_SEED);
    preimage.append(&owner.clone().to_xdr(env));
    env.crypto().sha256(&preimage).to_bytes()
}

fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

fn bump_persistent(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

pub fn has_config(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Config)
}

pub fn write_config(env: &Env, config: &Config) {
    env.storage().instance().set(&DataKey::Config, config);
    bump_instance(env);
}

pub fn read_config(env: &Env) -> Result<Config, FundingError> {
    let config = env
        .storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(FundingError::NotInitialized)?;
    bump_instance(env);
    Ok(config)
}

/// Hand out the next project sequence number.
pub fn next_sequence(env: &Env) -> u64 {
    let current: u64 = env
        .storage()
        .instance()
        .get(&DataKey::NextSequence)
        .unwrap_or(0);
    env.storage()
        .instance()
        .set(&DataKey::NextSequence, &(current + 1));
    bump_instance(env);
    current
}

pub fn has_project(env: &Env, id: &BytesN<32>) -> bool {
    env.storage()
        .persistent()
        .has(&DataKey::Project(id.clone()))
}

/// Load the project owned by `owner`.
pub fn load_project(env: &Env, owner: &Address) -> Result<Project, FundingError> {
    let key = DataKey::Project(project_id(env, owner));
    let project: Project = env
        .storage()
        .persistent()
        .get(&key)
        .ok_or(FundingError::ProjectNotFound)?;
    bump_persistent(env, &key);
    Ok(project)
}

pub fn save_project(env: &Env, project: &Project) {
    let key = DataKey::Project(project.id.clone());
    env.storage().persistent().set(&key, project);
    bump_persistent(env, &key);
}

pub fn remove_project(env: &Env, id: &BytesN<32>) {
    env.storage()
        .persistent()
        .remove(&DataKey::Project(id.clone()));
}

/// Outstanding claim of `contributor`, zero when there is none.
pub fn read_contribution(env: &Env, sequence: u64, contributor: &Address) -> u64 {
    let key = DataKey::Contribution(sequence, contributor.clone());
    match env.storage().persistent().get::<_, u64>(&key) {
        Some(amount) => {
            bump_persistent(env, &key);
            amount
        }
        None => 0,
    }
}

pub fn write_contribution(env: &Env, sequence: u64, contributor: &Address, amount: u64) {
    let key = DataKey::Contribution(sequence, contributor.clone());
    env.storage().persistent().set(&key, &amount);
    bump_persistent(env, &key);
}

pub fn remove_contribution(env: &Env, sequence: u64, contributor: &Address) {
    env.storage()
        .persistent()
        .remove(&DataKey::Contribution(sequence, contributor.clone()));
}
