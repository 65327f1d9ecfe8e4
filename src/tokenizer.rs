//! Instruction tokenizer
//!
//! Splits a raw instruction string into an ordered sequence of words. The
//! tokenizer is total: any input, including the empty string, produces a
//! (possibly empty) token list. Case handling is deliberately left to the
//! grammar, which treats keywords and account ids differently.

/// Split an instruction into non-empty whitespace-separated tokens.
///
/// Leading/trailing whitespace is ignored and any run of whitespace acts as a
/// single separator.
pub fn tokenize(instruction: &str) -> Vec<&str> {
    instruction.split_whitespace().collect()
}
