//! Violation codes, the message catalog and the error prioritizer
//!
//! Every grammar or business-rule breach is recorded as a [`Violation`]
//! carrying an [`ErrorCode`]. The `#[error]` strings on the code enum are the
//! user-facing message catalog; the rendered text is snapshotted into the
//! violation at creation time. When an instruction accumulates several
//! violations, [`primary_violation`] selects the single one to surface using
//! a fixed total order.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Every way an instruction can fail validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
pub enum ErrorCode {
    /// The grammar broke down badly enough that nothing after the break was
    /// examined, or trailing/missing tokens left the instruction incomplete.
    #[error("instruction is malformed")]
    Malformed,

    /// A structural keyword (DEBIT/CREDIT, ACCOUNT, FOR) is missing or wrong.
    #[error("a required keyword is missing")]
    MissingKeyword,

    /// A direction or counter-type keyword appeared out of order for the
    /// instruction type.
    #[error("instruction keywords are out of order")]
    InvalidOrder,

    /// The amount is not a positive whole number.
    #[error("amount must be a positive whole number")]
    InvalidAmount,

    /// An account id contains characters outside letters, digits, `-`, `.`, `@`.
    #[error("account id contains invalid characters")]
    InvalidAccountId,

    /// The execution date is not a valid YYYY-MM-DD string.
    #[error("execution date must be in YYYY-MM-DD format")]
    InvalidDate,

    /// A referenced account is not present in the supplied account list.
    #[error("account not found")]
    AccountNotFound,

    /// The instruction currency is outside the supported set.
    #[error("currency is not supported")]
    UnsupportedCurrency,

    /// The two accounts, or the instruction and the debit account, disagree
    /// on currency.
    #[error("currency mismatch")]
    CurrencyMismatch,

    /// Debit and credit resolve to the same account.
    #[error("debit and credit account must differ")]
    SameAccount,

    /// The debit account balance cannot cover the amount.
    #[error("insufficient funds in debit account")]
    InsufficientFunds,
}

impl ErrorCode {
    /// Position of this code in the fixed severity order; lower is reported
    /// first.
    pub fn priority(self) -> u8 {
        match self {
            ErrorCode::Malformed => 1,
            ErrorCode::MissingKeyword => 2,
            ErrorCode::InvalidOrder => 3,
            ErrorCode::InvalidAmount => 4,
            ErrorCode::InvalidAccountId => 5,
            ErrorCode::InvalidDate => 6,
            ErrorCode::AccountNotFound => 7,
            ErrorCode::UnsupportedCurrency => 8,
            ErrorCode::CurrencyMismatch => 9,
            ErrorCode::SameAccount => 10,
            ErrorCode::InsufficientFunds => 11,
        }
    }

    /// The wire status code reported for this violation.
    pub fn status_code(self) -> &'static str {
        match self {
            ErrorCode::Malformed => "SY03",
            ErrorCode::MissingKeyword => "SY01",
            ErrorCode::InvalidOrder => "SY02",
            ErrorCode::InvalidAmount => "AM01",
            ErrorCode::InvalidAccountId => "AC04",
            ErrorCode::InvalidDate => "DT01",
            ErrorCode::AccountNotFound => "AC03",
            ErrorCode::UnsupportedCurrency => "CU02",
            ErrorCode::CurrencyMismatch => "CU01",
            ErrorCode::SameAccount => "AC02",
            ErrorCode::InsufficientFunds => "AC01",
        }
    }

    /// Whether this code means the grammar was too broken for any parsed
    /// field to be trusted. Responses for these codes null out every parsed
    /// field and carry no account views.
    pub fn is_unparseable(self) -> bool {
        matches!(
            self,
            ErrorCode::Malformed | ErrorCode::MissingKeyword | ErrorCode::InvalidOrder
        )
    }
}

/// A single recorded rule or grammar breach.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// The violated rule.
    pub code: ErrorCode,
    /// Catalog text rendered at creation time.
    pub message: String,
}

impl Violation {
    /// Create a violation with its catalog message.
    pub fn new(code: ErrorCode) -> Self {
        Self {
            code,
            message: code.to_string(),
        }
    }
}

/// Select the most severe violation, keeping the first-encountered one on
/// priority ties.
pub fn primary_violation(violations: &[Violation]) -> Option<&Violation> {
    violations.iter().min_by_key(|v| v.code.priority())
}
