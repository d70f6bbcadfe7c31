use soroban_sdk::{token, Address, Env};

/// Move `amount` units of the native asset from `from` to `to`.
///
/// The token contract panics on insufficient balance or missing authorization,
/// which aborts the whole invocation and rolls back every write made so far.
pub fn transfer(env: &Env, native_token: &Address, from: &Address, to: &Address, amount: u64) {
    if amount == 0 {
        return;
    }
    let client = token::Client::new(env, native_token);
    client.transfer(from, to, &i128::from(amount));
}
