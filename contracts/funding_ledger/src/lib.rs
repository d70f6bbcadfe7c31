#![no_std]

mod errors;
mod events;
mod storage;
mod token;

pub use errors::FundingError;
pub use storage::{Config, Project, ProjectStatus, MAX_NAME_LEN};

use events::{
    ContributionEvent, FailedProjectClosedEvent, InitializedEvent, ProjectClosedEvent,
    ProjectCreatedEvent, RefundClaimedEvent, WithdrawEvent,
};
use soroban_sdk::{contract, contractimpl, log, Address, BytesN, Env, String};
use storage::{
    has_config, has_project, load_project, next_sequence, read_config, read_contribution,
    remove_contribution, remove_project, save_project, write_config, write_contribution,
};

#[contract]
pub struct FundingLedgerContract;

/// Reject anyone but the project owner, then demand the owner's signature.
fn require_owner(project: &Project, caller: &Address) -> Result<(), FundingError> {
    if *caller != project.owner {
        return Err(FundingError::UserNotAuthorized);
    }
    caller.require_auth();
    Ok(())
}

#[contractimpl]
impl FundingLedgerContract {
    /// Configure the native asset and the per-project storage deposit
    pub fn initialize(
        env: Env,
        admin: Address,
        native_token: Address,
        storage_deposit: u64,
    ) -> Result<(), FundingError> {
        // Check if already initialized
        if has_config(&env) {
            return Err(FundingError::AlreadyInitialized);
        }

        admin.require_auth();

        write_config(
            &env,
            &Config {
                admin: admin.clone(),
                native_token: native_token.clone(),
                storage_deposit,
            },
        );

        InitializedEvent {
            admin,
            native_token,
            storage_deposit,
        }
        .publish(&env);

        Ok(())
    }

    /// Open the caller's project. An owner holds at most one live project.
    ///
    /// The configured storage deposit is taken from `owner` and held until the
    /// record is deleted by [`Self::withdraw`] or [`Self::close_failed_project`].
    pub fn create_project(
        env: Env,
        owner: Address,
        name: String,
        financial_target: u64,
    ) -> Result<BytesN<32>, FundingError> {
        let config = read_config(&env)?;

        // Require owner authorization
        owner.require_auth();

        // One live project per owner
        let id = storage::project_id(&env, &owner);
        if has_project(&env, &id) {
            return Err(FundingError::DuplicateProject);
        }

        if name.is_empty() || name.len() > MAX_NAME_LEN {
            return Err(FundingError::InvalidName);
        }

        if financial_target == 0 {
            return Err(FundingError::InvalidTarget);
        }

        // Owner pays the storage deposit up front
        token::transfer(
            &env,
            &config.native_token,
            &owner,
            &env.current_contract_address(),
            config.storage_deposit,
        );

        let project = Project {
            id: id.clone(),
            sequence: next_sequence(&env),
            owner: owner.clone(),
            name,
            financial_target,
            balance: 0,
            status: ProjectStatus::Active,
            contributor_count: 0,
            deposit: config.storage_deposit,
        };
        save_project(&env, &project);

        ProjectCreatedEvent {
            owner,
            project_id: id.clone(),
            financial_target,
        }
        .publish(&env);

        Ok(id)
    }

    /// Add `amount` to `owner`'s project on behalf of `contributor`.
    ///
    /// Repeat contributions accumulate into a single entry. Once the balance
    /// meets the target the project stays `TargetReached`.
    pub fn contribute(
        env: Env,
        contributor: Address,
        owner: Address,
        amount: u64,
    ) -> Result<(), FundingError> {
        let config = read_config(&env)?;

        // Require contributor authorization
        contributor.require_auth();

        // Validate amount
        if amount == 0 {
            return Err(FundingError::InvalidAmount);
        }

        let mut project = load_project(&env, &owner)?;
        if !project.status.accepts_contributions() {
            return Err(FundingError::InvalidProjectStatus);
        }

        let balance = project
            .balance
            .checked_add(amount)
            .ok_or(FundingError::AmountOverflow)?;
        let previous = read_contribution(&env, project.sequence, &contributor);
        let cumulative = previous
            .checked_add(amount)
            .ok_or(FundingError::AmountOverflow)?;
        if previous == 0 {
            project.contributor_count = project
                .contributor_count
                .checked_add(1)
                .ok_or(FundingError::AmountOverflow)?;
        }

        // Transfer native value from contributor to contract
        token::transfer(
            &env,
            &config.native_token,
            &contributor,
            &env.current_contract_address(),
            amount,
        );

        project.balance = balance;
        write_contribution(&env, project.sequence, &contributor, cumulative);
        if project.balance >= project.financial_target {
            project.status = ProjectStatus::TargetReached;
        }
        save_project(&env, &project);

        ContributionEvent {
            owner,
            contributor,
            amount,
            balance: project.balance,
            status: project.status,
        }
        .publish(&env);

        Ok(())
    }

    /// Decide the project's fate: `TargetReached` becomes `Success`,
    /// `Active` becomes `Failed`.
    pub fn owner_close(env: Env, caller: Address, owner: Address) -> Result<ProjectStatus, FundingError> {
        read_config(&env)?;

        let mut project = load_project(&env, &owner)?;

        // Verify owner identity
        require_owner(&project, &caller)?;

        project.status = match project.status {
            ProjectStatus::TargetReached => ProjectStatus::Success,
            ProjectStatus::Active => ProjectStatus::Failed,
            _ => return Err(FundingError::InvalidProjectStatus),
        };
        save_project(&env, &project);

        if project.status == ProjectStatus::Failed {
            log!(
                &env,
                "project failed, refunds open",
                project.contributor_count,
                project.balance
            );
        }

        ProjectClosedEvent {
            owner,
            status: project.status,
            balance: project.balance,
            contributor_count: project.contributor_count,
        }
        .publish(&env);

        Ok(project.status)
    }

    /// Pay the whole balance plus the storage deposit to the owner of a
    /// successful project and delete the record. Returns the amount paid.
    pub fn withdraw(env: Env, caller: Address, owner: Address) -> Result<u64, FundingError> {
        let config = read_config(&env)?;

        let project = load_project(&env, &owner)?;

        // Verify owner identity
        require_owner(&project, &caller)?;

        // Funds are released only after the owner declared success
        if project.status != ProjectStatus::Success {
            return Err(FundingError::ProjectWithdrawNotAvailable);
        }

        let payout = project
            .balance
            .checked_add(project.deposit)
            .ok_or(FundingError::AmountOverflow)?;

        // Claims stay under the retired sequence and are never read again
        remove_project(&env, &project.id);
        token::transfer(
            &env,
            &config.native_token,
            &env.current_contract_address(),
            &project.owner,
            payout,
        );

        WithdrawEvent {
            owner,
            amount: project.balance,
            deposit: project.deposit,
        }
        .publish(&env);

        Ok(payout)
    }

    /// Return a contributor's full cumulative amount from a failed project.
    ///
    /// The entry is removed on payout, so a second claim is rejected exactly
    /// like a claim from an address that never contributed.
    pub fn claim_refund(env: Env, contributor: Address, owner: Address) -> Result<u64, FundingError> {
        let config = read_config(&env)?;

        let mut project = load_project(&env, &owner)?;

        // Refunds open only once the project failed
        if project.status != ProjectStatus::Failed {
            return Err(FundingError::UserNotAuthorized);
        }

        // No claim on record, or already refunded
        let amount = read_contribution(&env, project.sequence, &contributor);
        if amount == 0 {
            return Err(FundingError::UserNotAuthorized);
        }

        // Require contributor authorization
        contributor.require_auth();

        let balance = project
            .balance
            .checked_sub(amount)
            .ok_or(FundingError::InvalidProjectStatus)?;

        let remaining = project
            .contributor_count
            .checked_sub(1)
            .ok_or(FundingError::InvalidProjectStatus)?;

        remove_contribution(&env, project.sequence, &contributor);
        project.contributor_count = remaining;
        project.balance = balance;
        save_project(&env, &project);

        token::transfer(
            &env,
            &config.native_token,
            &env.current_contract_address(),
            &contributor,
            amount,
        );

        RefundClaimedEvent {
            owner,
            contributor,
            amount,
            remaining_contributors: project.contributor_count,
        }
        .publish(&env);

        Ok(amount)
    }

    /// Delete a failed project once every contributor has been refunded and
    /// give the storage deposit back to the owner.
    pub fn close_failed_project(env: Env, caller: Address, owner: Address) -> Result<(), FundingError> {
        let config = read_config(&env)?;

        let project = load_project(&env, &owner)?;

        // Verify owner identity
        require_owner(&project, &caller)?;

        // Every contributor must have been refunded first
        if project.status != ProjectStatus::Failed || project.contributor_count != 0 {
            return Err(FundingError::InvalidProjectStatus);
        }

        remove_project(&env, &project.id);
        token::transfer(
            &env,
            &config.native_token,
            &env.current_contract_address(),
            &project.owner,
            project.deposit,
        );

        FailedProjectClosedEvent {
            owner,
            deposit: project.deposit,
        }
        .publish(&env);

        Ok(())
    }

    /// Storage identity of `owner`'s project, whether or not it exists yet.
    pub fn project_id(env: Env, owner: Address) -> BytesN<32> {
        storage::project_id(&env, &owner)
    }

    pub fn get_project(env: Env, owner: Address) -> Result<Project, FundingError> {
        load_project(&env, &owner)
    }

    /// Outstanding claim of `contributor`, zero when there is none
    pub fn get_contribution(env: Env, owner: Address, contributor: Address) -> Result<u64, FundingError> {
        let project = load_project(&env, &owner)?;
        Ok(read_contribution(&env, project.sequence, &contributor))
    }

    pub fn get_contributor_count(env: Env, owner: Address) -> Result<u32, FundingError> {
        Ok(load_project(&env, &owner)?.contributor_count)
    }

    pub fn get_config(env: Env) -> Result<Config, FundingError> {
        read_config(&env)
    }
}

#[cfg(test)]
mod test_events;
