//! Core data types for instruction processing

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::Violation;

/// A caller-supplied account. Identity is the `id`; when the supplied list
/// contains duplicate ids, the first entry wins during lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    pub balance: i64,
    pub currency: String,
}

impl Account {
    /// Create a new account.
    pub fn new(id: impl Into<String>, balance: i64, currency: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            balance,
            currency: currency.into(),
        }
    }
}

/// The direction of a funds-movement instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum InstructionType {
    Debit,
    Credit,
}

impl InstructionType {
    /// The opposite direction, expected after FOR in the grammar.
    pub fn opposite(self) -> Self {
        match self {
            InstructionType::Debit => InstructionType::Credit,
            InstructionType::Credit => InstructionType::Debit,
        }
    }

    /// Canonical uppercase keyword for this type.
    pub fn keyword(self) -> &'static str {
        match self {
            InstructionType::Debit => "DEBIT",
            InstructionType::Credit => "CREDIT",
        }
    }
}

impl fmt::Display for InstructionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Output of the grammar state machine.
///
/// Fields are populated incrementally as tokens are consumed, so a result can
/// carry partial information (for instance a type and amount) alongside
/// syntax violations when a later token broke the grammar.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseResult {
    pub instruction_type: Option<InstructionType>,
    pub amount: Option<i64>,
    /// Instruction currency, normalized to uppercase.
    pub currency: Option<String>,
    /// Account id on the debit side, verbatim from the instruction.
    pub debit_account: Option<String>,
    /// Account id on the credit side, verbatim from the instruction.
    pub credit_account: Option<String>,
    /// Requested execution date (`YYYY-MM-DD`), if one was given and valid.
    pub execute_by: Option<String>,
    /// Grammar violations recorded while parsing.
    pub syntax_violations: Vec<Violation>,
}

/// Read-only view of a participating account as it appears in a response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountView {
    pub id: String,
    /// Balance after the instruction was applied (unchanged when pending or
    /// failed).
    pub balance: i64,
    /// Balance before the call.
    pub balance_before: i64,
    /// Account currency, uppercased.
    pub currency: String,
}

/// Overall disposition of one processed instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Successful,
    Pending,
    Failed,
}

impl Status {
    /// Lowercase wire representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Successful => "successful",
            Status::Pending => "pending",
            Status::Failed => "failed",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The externally visible result of processing one instruction.
///
/// Serializes to the boundary JSON shape: parsed fields are `null` when the
/// instruction was unparseable, and `accounts` holds views for the
/// participating accounts only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    #[serde(rename = "type")]
    pub instruction_type: Option<InstructionType>,
    pub amount: Option<i64>,
    pub currency: Option<String>,
    pub debit_account: Option<String>,
    pub credit_account: Option<String>,
    pub execute_by: Option<String>,
    pub status: Status,
    pub status_reason: String,
    pub status_code: String,
    pub accounts: Vec<AccountView>,
}

impl Response {
    /// Serialize to the boundary JSON representation.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
