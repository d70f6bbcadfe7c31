extern crate std;

use soroban_sdk::{
    testutils::{Address as _, Events},
    token::StellarAssetClient,
    vec, Address, Env, Event, IntoVal, Map, String, Symbol, TryIntoVal, Val, Vec,
};

use crate::events::{
    ContributionEvent, FailedProjectClosedEvent, InitializedEvent, ProjectClosedEvent,
    ProjectCreatedEvent, RefundClaimedEvent, WithdrawEvent,
};
use crate::{FundingLedgerContract, FundingLedgerContractClient, ProjectStatus};

const STORAGE_DEPOSIT: u64 = 700;

fn setup<'a>(env: &Env) -> (FundingLedgerContractClient<'a>, Address, Address, StellarAssetClient<'a>) {
    let admin = Address::generate(env);
    let owner = Address::generate(env);

    let sac = env.register_stellar_asset_contract_v2(admin.clone());
    let native = StellarAssetClient::new(env, &sac.address());
    native.mint(&owner, &100_000);

    let contract_id = env.register(FundingLedgerContract, ());
    let client = FundingLedgerContractClient::new(env, &contract_id);
    client.initialize(&admin, &sac.address(), &STORAGE_DEPOSIT);

    (client, admin, owner, native)
}

fn backer(env: &Env, native: &StellarAssetClient, amount: i128) -> Address {
    let address = Address::generate(env);
    native.mint(&address, &amount);
    address
}

fn last_event(env: &Env) -> (Address, Vec<Val>, Val) {
    env.events().all().last().expect("No events found")
}

fn topics(env: &Env, name: &str, rest: &[Val]) -> Vec<Val> {
    let mut topics = vec![env, Symbol::new(env, name).into_val(env)];
    for topic in rest {
        topics.push_back(*topic);
    }
    topics
}

fn assert_data(env: &Env, data: Val, expected: &impl Event) {
    let data: Map<Symbol, Val> = data.try_into_val(env).unwrap();
    let expected: Map<Symbol, Val> = expected.data(env).try_into_val(env).unwrap();
    assert_eq!(data, expected);
}

fn field<T: soroban_sdk::TryFromVal<Env, Val>>(env: &Env, data: Val, name: &str) -> T {
    let data: Map<Symbol, Val> = data.try_into_val(env).unwrap();
    let value = data.get(Symbol::new(env, name)).expect("missing event field");
    T::try_from_val(env, &value).unwrap()
}

#[test]
fn test_initialized_event() {
    let env = Env::default();
    env.mock_all_auths();
    let (client, admin, _, native) = setup(&env);

    let (contract, event_topics, data) = last_event(&env);
    assert_eq!(contract, client.address);
    assert_eq!(event_topics, topics(&env, "initialized_event", &[]));
    assert_data(
        &env,
        data,
        &InitializedEvent {
            admin,
            native_token: native.address.clone(),
            storage_deposit: STORAGE_DEPOSIT,
        },
    );
}

#[test]
fn test_project_created_event() {
    let env = Env::default();
    env.mock_all_auths();
    let (client, _, owner, _) = setup(&env);

    let id = client.create_project(&owner, &String::from_str(&env, "Well"), &4000);

    let (contract, event_topics, data) = last_event(&env);
    assert_eq!(contract, client.address);
    assert_eq!(
        event_topics,
        topics(&env, "project_created_event", &[owner.clone().into_val(&env)])
    );
    assert_eq!(field::<u64>(&env, data, "financial_target"), 4000);
    assert_data(
        &env,
        data,
        &ProjectCreatedEvent {
            owner,
            project_id: id,
            financial_target: 4000,
        },
    );
}

#[test]
fn test_contribution_event() {
    let env = Env::default();
    env.mock_all_auths();
    let (client, _, owner, native) = setup(&env);
    client.create_project(&owner, &String::from_str(&env, "Well"), &4000);

    let contributor = backer(&env, &native, 5000);
    client.contribute(&contributor, &owner, &1500);
    client.contribute(&contributor, &owner, &2500);

    let (contract, event_topics, data) = last_event(&env);
    assert_eq!(contract, client.address);
    assert_eq!(
        event_topics,
        topics(
            &env,
            "contribution_event",
            &[owner.clone().into_val(&env), contributor.clone().into_val(&env)]
        )
    );
    assert_eq!(field::<u64>(&env, data, "balance"), 4000);
    assert_data(
        &env,
        data,
        &ContributionEvent {
            owner,
            contributor,
            amount: 2500,
            balance: 4000,
            status: ProjectStatus::TargetReached,
        },
    );
}

#[test]
fn test_project_closed_event_success() {
    let env = Env::default();
    env.mock_all_auths();
    let (client, _, owner, native) = setup(&env);
    client.create_project(&owner, &String::from_str(&env, "Well"), &1000);

    let contributor = backer(&env, &native, 1000);
    client.contribute(&contributor, &owner, &1000);
    client.owner_close(&owner, &owner);

    let (contract, event_topics, data) = last_event(&env);
    assert_eq!(contract, client.address);
    assert_eq!(
        event_topics,
        topics(&env, "project_closed_event", &[owner.clone().into_val(&env)])
    );
    assert_data(
        &env,
        data,
        &ProjectClosedEvent {
            owner,
            status: ProjectStatus::Success,
            balance: 1000,
            contributor_count: 1,
        },
    );
}

#[test]
fn test_project_closed_event_failed() {
    let env = Env::default();
    env.mock_all_auths();
    let (client, _, owner, native) = setup(&env);
    client.create_project(&owner, &String::from_str(&env, "Well"), &1000);

    let first = backer(&env, &native, 1000);
    let second = backer(&env, &native, 1000);
    client.contribute(&first, &owner, &200);
    client.contribute(&second, &owner, &300);
    client.owner_close(&owner, &owner);

    let (contract, event_topics, data) = last_event(&env);
    assert_eq!(contract, client.address);
    assert_eq!(
        event_topics,
        topics(&env, "project_closed_event", &[owner.clone().into_val(&env)])
    );
    assert_eq!(field::<ProjectStatus>(&env, data, "status"), ProjectStatus::Failed);
    assert_data(
        &env,
        data,
        &ProjectClosedEvent {
            owner,
            status: ProjectStatus::Failed,
            balance: 500,
            contributor_count: 2,
        },
    );
}

#[test]
fn test_withdraw_event() {
    let env = Env::default();
    env.mock_all_auths();
    let (client, _, owner, native) = setup(&env);
    client.create_project(&owner, &String::from_str(&env, "Well"), &1000);

    let contributor = backer(&env, &native, 1200);
    client.contribute(&contributor, &owner, &1200);
    client.owner_close(&owner, &owner);
    client.withdraw(&owner, &owner);

    let (contract, event_topics, data) = last_event(&env);
    assert_eq!(contract, client.address);
    assert_eq!(
        event_topics,
        topics(&env, "withdraw_event", &[owner.clone().into_val(&env)])
    );
    assert_data(
        &env,
        data,
        &WithdrawEvent {
            owner,
            amount: 1200,
            deposit: STORAGE_DEPOSIT,
        },
    );
}

#[test]
fn test_refund_claimed_event() {
    let env = Env::default();
    env.mock_all_auths();
    let (client, _, owner, native) = setup(&env);
    client.create_project(&owner, &String::from_str(&env, "Well"), &1000);

    let first = backer(&env, &native, 1000);
    let second = backer(&env, &native, 1000);
    client.contribute(&first, &owner, &250);
    client.contribute(&second, &owner, &100);
    client.owner_close(&owner, &owner);
    client.claim_refund(&first, &owner);

    let (contract, event_topics, data) = last_event(&env);
    assert_eq!(contract, client.address);
    assert_eq!(
        event_topics,
        topics(
            &env,
            "refund_claimed_event",
            &[owner.clone().into_val(&env), first.clone().into_val(&env)]
        )
    );
    assert_eq!(field::<u64>(&env, data, "amount"), 250);
    assert_data(
        &env,
        data,
        &RefundClaimedEvent {
            owner,
            contributor: first,
            amount: 250,
            remaining_contributors: 1,
        },
    );
}

#[test]
fn test_failed_project_closed_event() {
    let env = Env::default();
    env.mock_all_auths();
    let (client, _, owner, _) = setup(&env);
    client.create_project(&owner, &String::from_str(&env, "Well"), &1000);
    client.owner_close(&owner, &owner);
    client.close_failed_project(&owner, &owner);

    let (contract, event_topics, data) = last_event(&env);
    assert_eq!(contract, client.address);
    assert_eq!(
        event_topics,
        topics(&env, "failed_project_closed_event", &[owner.clone().into_val(&env)])
    );
    assert_data(
        &env,
        data,
        &FailedProjectClosedEvent {
            owner,
            deposit: STORAGE_DEPOSIT,
        },
    );
}

#[test]
fn test_rejected_call_publishes_nothing() {
    let env = Env::default();
    env.mock_all_auths();
    let (client, _, owner, _) = setup(&env);
    client.create_project(&owner, &String::from_str(&env, "Well"), &1000);

    let stranger = Address::generate(&env);
    assert!(client.try_owner_close(&stranger, &owner).is_err());

    let closed = topics(&env, "project_closed_event", &[owner.into_val(&env)]);
    for (_, event_topics, _) in env.events().all().iter() {
        assert_ne!(event_topics, closed);
    }
}
