//! Settlement of a validated instruction
//!
//! Reached only with an empty violation set. An instruction whose execution
//! date is strictly in the future is accepted but left pending; anything else
//! settles immediately by moving exactly the parsed amount from the debit to
//! the credit account. Views are emitted in input-list order and the caller's
//! accounts are never mutated; settled balances appear only in the views.

use chrono::NaiveDate;

use crate::lexical::is_future_relative_to;
use crate::types::{Account, AccountView, ParseResult, Status};

/// Status code for an immediately settled instruction.
pub const SUCCESSFUL_CODE: &str = "AP00";
/// Status code for an instruction accepted for future execution.
pub const PENDING_CODE: &str = "AP02";

/// Reason text for an immediately settled instruction.
pub const SUCCESSFUL_REASON: &str = "transaction processed successfully";
/// Reason text for an instruction accepted for future execution.
pub const PENDING_REASON: &str = "transaction accepted for future execution";

/// Outcome of settling one validated instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settlement {
    pub status: Status,
    pub status_code: &'static str,
    pub status_reason: &'static str,
    /// Views for the two participating accounts, in input order.
    pub accounts: Vec<AccountView>,
}

/// Apply a violation-free instruction against the resolved accounts.
///
/// `today` pins the calendar date used to classify the execution date;
/// production callers pass the current UTC date.
pub fn settle(
    parsed: &ParseResult,
    accounts: &[Account],
    debit_index: usize,
    credit_index: usize,
    today: NaiveDate,
) -> Settlement {
    let pending = parsed
        .execute_by
        .as_deref()
        .map(|date| is_future_relative_to(date, today))
        .unwrap_or(false);
    // A violation-free parse always carries an amount.
    let amount = parsed.amount.unwrap_or(0);

    let mut views = Vec::with_capacity(2);
    for index in participant_indices(debit_index, credit_index) {
        let account = &accounts[index];
        let delta = if pending {
            0
        } else if index == debit_index {
            -amount
        } else {
            amount
        };
        views.push(AccountView {
            id: account.id.clone(),
            balance: account.balance + delta,
            balance_before: account.balance,
            currency: account.currency.to_ascii_uppercase(),
        });
    }

    if pending {
        Settlement {
            status: Status::Pending,
            status_code: PENDING_CODE,
            status_reason: PENDING_REASON,
            accounts: views,
        }
    } else {
        Settlement {
            status: Status::Successful,
            status_code: SUCCESSFUL_CODE,
            status_reason: SUCCESSFUL_REASON,
            accounts: views,
        }
    }
}

/// Untouched views for whichever participants resolved, in input order.
///
/// Used on the parseable-but-invalid path, where the response still echoes
/// the involved accounts with their original balances.
pub fn participant_views(
    accounts: &[Account],
    debit_index: Option<usize>,
    credit_index: Option<usize>,
) -> Vec<AccountView> {
    let mut indices: Vec<usize> = debit_index.into_iter().chain(credit_index).collect();
    indices.sort_unstable();
    indices.dedup();
    indices
        .into_iter()
        .map(|index| {
            let account = &accounts[index];
            AccountView {
                id: account.id.clone(),
                balance: account.balance,
                balance_before: account.balance,
                currency: account.currency.to_ascii_uppercase(),
            }
        })
        .collect()
}

/// Distinct participating indices in input order.
fn participant_indices(debit_index: usize, credit_index: usize) -> Vec<usize> {
    let mut indices = vec![debit_index, credit_index];
    indices.sort_unstable();
    indices.dedup();
    indices
}
