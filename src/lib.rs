//! Payment Instruction Settlement Engine (PISE)
//!
//! Interprets a constrained funds-movement instruction such as
//! `DEBIT 30 USD FROM ACCOUNT a FOR CREDIT TO ACCOUNT b [ON 2030-01-15]`,
//! validates it against the grammar and the business rules, and settles it
//! against a caller-supplied in-memory account list — immediately, or as
//! pending when the execution date lies strictly in the future.
//!
//! The pipeline is strictly one-way: raw string → tokens → parse result
//! (+ syntax violations) → combined violation list → primary error or
//! settlement. Each invocation is an independent pure computation with no
//! shared state, no I/O and no clock reads beyond the optional UTC "today"
//! used to classify execution dates.

pub mod error;
pub mod lexical;
pub mod parser;
pub mod processor;
pub mod rules;
pub mod settlement;
pub mod tokenizer;
pub mod trace;
pub mod types;

// Re-export the public surface
pub use error::{primary_violation, ErrorCode, Violation};
pub use lexical::{
    is_future_date, is_future_relative_to, is_valid_account_id, is_valid_date_format,
};
pub use parser::{parse, Parser, ParserState, Step};
pub use processor::{
    process_instruction, process_instruction_at, process_instruction_traced,
    process_instruction_traced_at,
};
pub use rules::{is_supported_currency, validate, RuleOutcome, SUPPORTED_CURRENCIES};
pub use settlement::{participant_views, settle, Settlement};
pub use tokenizer::tokenize;
pub use trace::{ProcessingTrace, TraceEvent};
pub use types::{Account, AccountView, InstructionType, ParseResult, Response, Status};
