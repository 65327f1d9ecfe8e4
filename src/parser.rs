//! Grammar state machine for funds-movement instructions
//!
//! Recognizes the two instruction forms:
//!
//! ```text
//! DEBIT  <amount> <currency> FROM ACCOUNT <acct1> FOR CREDIT TO   ACCOUNT <acct2> [ON <date>]
//! CREDIT <amount> <currency> TO   ACCOUNT <acct1> FOR DEBIT  FROM ACCOUNT <acct2> [ON <date>]
//! ```
//!
//! Keywords and the currency code are case-insensitive; account ids are taken
//! verbatim. The keyword preceding each account determines its role, not its
//! position: for DEBIT the first account is the debit side, for CREDIT it is
//! the credit side.
//!
//! The machine walks one explicit state per expected token with no
//! backtracking. Violations are either fatal (the walk halts and later tokens
//! go unexamined) or non-fatal (recorded, the walk continues so account and
//! date information still surfaces).

use serde::{Deserialize, Serialize};

use crate::error::{ErrorCode, Violation};
use crate::lexical::is_valid_date_format;
use crate::tokenizer::tokenize;
use crate::types::{InstructionType, ParseResult};

/// What the machine expects from the next token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParserState {
    /// The DEBIT or CREDIT keyword.
    ExpectType,
    /// The amount literal.
    ExpectAmount,
    /// The currency code.
    ExpectCurrency,
    /// FROM (for DEBIT) or TO (for CREDIT).
    ExpectFirstDirection,
    /// The ACCOUNT keyword before the first account id.
    ExpectFirstAccountKeyword,
    /// The first account id, verbatim.
    ExpectFirstAccountId,
    /// The FOR keyword.
    ExpectFor,
    /// The opposite instruction keyword.
    ExpectCounterType,
    /// TO (for DEBIT) or FROM (for CREDIT).
    ExpectSecondDirection,
    /// The ACCOUNT keyword before the second account id.
    ExpectSecondAccountKeyword,
    /// The second account id, verbatim.
    ExpectSecondAccountId,
    /// Either ON or the end of the instruction.
    ExpectOnOrEnd,
    /// The execution date after ON.
    ExpectDate,
    /// Nothing; any further token is malformed.
    ExpectEnd,
}

/// Whether the machine can consume further tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Keep feeding tokens.
    Continue,
    /// A fatal violation was recorded; later tokens go unexamined.
    Halt,
}

/// Token-driven parser for one instruction.
///
/// [`parse`] drives a full instruction through; the parser itself is public
/// so transitions can be exercised state by state.
#[derive(Debug, Clone)]
pub struct Parser {
    state: ParserState,
    result: ParseResult,
    halted: bool,
}

impl Parser {
    /// Create a parser at the initial state.
    pub fn new() -> Self {
        Self {
            state: ParserState::ExpectType,
            result: ParseResult::default(),
            halted: false,
        }
    }

    /// The state the machine is currently in.
    pub fn state(&self) -> ParserState {
        self.state
    }

    /// The partially populated result accumulated so far.
    pub fn result(&self) -> &ParseResult {
        &self.result
    }

    /// Consume one token and advance the machine.
    pub fn step(&mut self, token: &str) -> Step {
        if self.halted {
            return Step::Halt;
        }
        match self.state {
            ParserState::ExpectType => {
                if token.eq_ignore_ascii_case("DEBIT") {
                    self.result.instruction_type = Some(InstructionType::Debit);
                } else if token.eq_ignore_ascii_case("CREDIT") {
                    self.result.instruction_type = Some(InstructionType::Credit);
                } else {
                    return self.fatal(ErrorCode::MissingKeyword);
                }
                self.advance(ParserState::ExpectAmount)
            }
            ParserState::ExpectAmount => {
                match parse_amount(token) {
                    Some(amount) => self.result.amount = Some(amount),
                    None => self.record(ErrorCode::InvalidAmount),
                }
                self.advance(ParserState::ExpectCurrency)
            }
            ParserState::ExpectCurrency => {
                // No validation here; currency support is a business rule.
                self.result.currency = Some(token.to_ascii_uppercase());
                self.advance(ParserState::ExpectFirstDirection)
            }
            ParserState::ExpectFirstDirection => {
                let expected = match self.instruction_type() {
                    InstructionType::Debit => "FROM",
                    InstructionType::Credit => "TO",
                };
                if !token.eq_ignore_ascii_case(expected) {
                    return self.fatal(ErrorCode::InvalidOrder);
                }
                self.advance(ParserState::ExpectFirstAccountKeyword)
            }
            ParserState::ExpectFirstAccountKeyword => {
                if !token.eq_ignore_ascii_case("ACCOUNT") {
                    return self.fatal(ErrorCode::MissingKeyword);
                }
                self.advance(ParserState::ExpectFirstAccountId)
            }
            ParserState::ExpectFirstAccountId => {
                match self.instruction_type() {
                    InstructionType::Debit => {
                        self.result.debit_account = Some(token.to_string())
                    }
                    InstructionType::Credit => {
                        self.result.credit_account = Some(token.to_string())
                    }
                }
                self.advance(ParserState::ExpectFor)
            }
            ParserState::ExpectFor => {
                if !token.eq_ignore_ascii_case("FOR") {
                    return self.fatal(ErrorCode::MissingKeyword);
                }
                self.advance(ParserState::ExpectCounterType)
            }
            ParserState::ExpectCounterType => {
                let expected = self.instruction_type().opposite().keyword();
                if !token.eq_ignore_ascii_case(expected) {
                    return self.fatal(ErrorCode::InvalidOrder);
                }
                self.advance(ParserState::ExpectSecondDirection)
            }
            ParserState::ExpectSecondDirection => {
                let expected = match self.instruction_type() {
                    InstructionType::Debit => "TO",
                    InstructionType::Credit => "FROM",
                };
                if !token.eq_ignore_ascii_case(expected) {
                    return self.fatal(ErrorCode::InvalidOrder);
                }
                self.advance(ParserState::ExpectSecondAccountKeyword)
            }
            ParserState::ExpectSecondAccountKeyword => {
                if !token.eq_ignore_ascii_case("ACCOUNT") {
                    return self.fatal(ErrorCode::MissingKeyword);
                }
                self.advance(ParserState::ExpectSecondAccountId)
            }
            ParserState::ExpectSecondAccountId => {
                match self.instruction_type() {
                    InstructionType::Debit => {
                        self.result.credit_account = Some(token.to_string())
                    }
                    InstructionType::Credit => {
                        self.result.debit_account = Some(token.to_string())
                    }
                }
                self.advance(ParserState::ExpectOnOrEnd)
            }
            ParserState::ExpectOnOrEnd => {
                if !token.eq_ignore_ascii_case("ON") {
                    return self.fatal(ErrorCode::Malformed);
                }
                self.advance(ParserState::ExpectDate)
            }
            ParserState::ExpectDate => {
                if is_valid_date_format(token) {
                    self.result.execute_by = Some(token.to_string());
                } else {
                    self.record(ErrorCode::InvalidDate);
                }
                self.advance(ParserState::ExpectEnd)
            }
            ParserState::ExpectEnd => self.fatal(ErrorCode::Malformed),
        }
    }

    /// Finish the walk once tokens are exhausted, yielding the result.
    ///
    /// Running out of tokens anywhere before the second account id (or before
    /// the date once ON was seen) is malformed, unless a fatal violation
    /// already halted the machine.
    pub fn finish(mut self) -> ParseResult {
        let complete = matches!(
            self.state,
            ParserState::ExpectOnOrEnd | ParserState::ExpectEnd
        );
        if !self.halted && !complete {
            self.result
                .syntax_violations
                .push(Violation::new(ErrorCode::Malformed));
        }
        self.result
    }

    fn advance(&mut self, next: ParserState) -> Step {
        self.state = next;
        Step::Continue
    }

    fn record(&mut self, code: ErrorCode) {
        self.result.syntax_violations.push(Violation::new(code));
    }

    fn fatal(&mut self, code: ErrorCode) -> Step {
        self.record(code);
        self.halted = true;
        Step::Halt
    }

    // Every state past ExpectType is only reachable after the type was set;
    // the fallback is never observed.
    fn instruction_type(&self) -> InstructionType {
        self.result
            .instruction_type
            .unwrap_or(InstructionType::Debit)
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a raw instruction string into a [`ParseResult`].
pub fn parse(instruction: &str) -> ParseResult {
    let mut parser = Parser::new();
    for token in tokenize(instruction) {
        if parser.step(token) == Step::Halt {
            break;
        }
    }
    parser.finish()
}

/// The amount must be a whole positive integer; a decimal point, a failed
/// integer parse or a non-positive value all disqualify it.
fn parse_amount(token: &str) -> Option<i64> {
    if token.contains('.') {
        return None;
    }
    match token.parse::<i64>() {
        Ok(value) if value > 0 => Some(value),
        _ => None,
    }
}
