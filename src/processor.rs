//! Pipeline orchestration
//!
//! Sequences parse → validate → prioritize → settle and shapes the public
//! [`Response`]. This is the only entry point external callers invoke. The
//! whole pipeline is a pure computation over the supplied arguments; the
//! caller's account list is never mutated and repeated calls with the same
//! inputs yield identical responses.

use std::panic::{self, AssertUnwindSafe};

use chrono::{NaiveDate, Utc};

use crate::error::{primary_violation, ErrorCode, Violation};
use crate::parser;
use crate::rules;
use crate::settlement;
use crate::trace::{ProcessingTrace, TraceEvent};
use crate::types::{Account, ParseResult, Response, Status};

/// Process one funds-movement instruction against the supplied accounts.
///
/// The execution date, if any, is classified against the current UTC date.
pub fn process_instruction(accounts: &[Account], instruction: &str) -> Response {
    process_instruction_at(accounts, instruction, Utc::now().date_naive())
}

/// Process one instruction with an explicit `today`, for deterministic
/// pending/immediate classification.
pub fn process_instruction_at(
    accounts: &[Account],
    instruction: &str,
    today: NaiveDate,
) -> Response {
    process_instruction_traced_at(accounts, instruction, today).0
}

/// Process one instruction, additionally returning the processing trace.
pub fn process_instruction_traced(
    accounts: &[Account],
    instruction: &str,
) -> (Response, ProcessingTrace) {
    process_instruction_traced_at(accounts, instruction, Utc::now().date_naive())
}

/// Traced variant with an explicit `today`.
///
/// Any internal failure is degraded to the malformed outcome instead of
/// propagating, so the boundary never sees an unstructured failure.
pub fn process_instruction_traced_at(
    accounts: &[Account],
    instruction: &str,
    today: NaiveDate,
) -> (Response, ProcessingTrace) {
    let run = panic::catch_unwind(AssertUnwindSafe(|| run_pipeline(accounts, instruction, today)));
    match run {
        Ok(outcome) => outcome,
        Err(_) => {
            let mut trace = ProcessingTrace::new();
            trace.record(TraceEvent::FailedClosed);
            (fail_closed_response(), trace)
        }
    }
}

fn run_pipeline(
    accounts: &[Account],
    instruction: &str,
    today: NaiveDate,
) -> (Response, ProcessingTrace) {
    let mut trace = ProcessingTrace::new();

    let parsed = parser::parse(instruction);
    trace.record(TraceEvent::ParseFinished {
        syntax_violations: parsed.syntax_violations.len(),
    });

    let outcome = rules::validate(&parsed, accounts);

    // Syntax violations come first so priority ties resolve in scan order.
    let mut violations = parsed.syntax_violations.clone();
    violations.extend(outcome.violations.iter().cloned());
    trace.record(TraceEvent::RulesEvaluated {
        total_violations: violations.len(),
    });

    if let Some(primary) = primary_violation(&violations) {
        trace.record(TraceEvent::PrimarySelected { code: primary.code });
        let response = failure_response(
            &parsed,
            accounts,
            outcome.debit_index,
            outcome.credit_index,
            primary,
        );
        return (response, trace);
    }

    // Zero violations imply both sides resolved; fall back to index 0 to stay
    // total under the fail-closed contract.
    let debit_index = outcome.debit_index.unwrap_or(0);
    let credit_index = outcome.credit_index.unwrap_or(0);
    let settled = settlement::settle(&parsed, accounts, debit_index, credit_index, today);
    match settled.status {
        Status::Pending => trace.record(TraceEvent::SettlementDeferred {
            execute_by: parsed.execute_by.clone().unwrap_or_default(),
        }),
        _ => trace.record(TraceEvent::SettlementApplied {
            amount: parsed.amount.unwrap_or(0),
        }),
    }

    let response = Response {
        instruction_type: parsed.instruction_type,
        amount: parsed.amount,
        currency: parsed.currency,
        debit_account: parsed.debit_account,
        credit_account: parsed.credit_account,
        execute_by: parsed.execute_by,
        status: settled.status,
        status_reason: settled.status_reason.to_string(),
        status_code: settled.status_code.to_string(),
        accounts: settled.accounts,
    };
    (response, trace)
}

/// Shape the response for a failed instruction.
///
/// Unparseable failures trust nothing: every parsed field is nulled and no
/// account views are emitted. Parseable failures echo the parsed fields plus
/// untouched views for the resolved participants.
fn failure_response(
    parsed: &ParseResult,
    accounts: &[Account],
    debit_index: Option<usize>,
    credit_index: Option<usize>,
    primary: &Violation,
) -> Response {
    if primary.code.is_unparseable() {
        return Response {
            instruction_type: None,
            amount: None,
            currency: None,
            debit_account: None,
            credit_account: None,
            execute_by: None,
            status: Status::Failed,
            status_reason: primary.message.clone(),
            status_code: primary.code.status_code().to_string(),
            accounts: Vec::new(),
        };
    }

    Response {
        instruction_type: parsed.instruction_type,
        amount: parsed.amount,
        currency: parsed.currency.clone(),
        debit_account: parsed.debit_account.clone(),
        credit_account: parsed.credit_account.clone(),
        execute_by: parsed.execute_by.clone(),
        status: Status::Failed,
        status_reason: primary.message.clone(),
        status_code: primary.code.status_code().to_string(),
        accounts: settlement::participant_views(accounts, debit_index, credit_index),
    }
}

fn fail_closed_response() -> Response {
    let violation = Violation::new(ErrorCode::Malformed);
    Response {
        instruction_type: None,
        amount: None,
        currency: None,
        debit_account: None,
        credit_account: None,
        execute_by: None,
        status: Status::Failed,
        status_reason: violation.message,
        status_code: violation.code.status_code().to_string(),
        accounts: Vec::new(),
    }
}
