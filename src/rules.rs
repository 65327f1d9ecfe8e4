//! Business-rule validation over a parse result and the supplied accounts
//!
//! Every rule runs independently whenever its preconditions hold and all
//! violations are accumulated; nothing short-circuits. The prioritizer later
//! picks the single violation to surface.

use crate::error::{ErrorCode, Violation};
use crate::lexical::is_valid_account_id;
use crate::types::{Account, ParseResult};

/// Currencies the engine settles in, uppercase.
pub const SUPPORTED_CURRENCIES: [&str; 4] = ["NGN", "USD", "GBP", "GHS"];

/// Membership test against [`SUPPORTED_CURRENCIES`]; exact uppercase match.
pub fn is_supported_currency(currency: &str) -> bool {
    SUPPORTED_CURRENCIES.contains(&currency)
}

/// Result of running all business rules for one instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleOutcome {
    /// Every rule violation found, in rule order.
    pub violations: Vec<Violation>,
    /// Index of the debit account in the supplied list, if it resolved.
    pub debit_index: Option<usize>,
    /// Index of the credit account in the supplied list, if it resolved.
    pub credit_index: Option<usize>,
}

/// Run every business rule against the parse result and the account list.
///
/// Rules, in order:
/// 1. account-id character validity for each parsed id;
/// 2. same-account (debit id equals credit id — two missing ids also count
///    as equal, which is pinned behavior);
/// 3. currency support;
/// 4. account existence per side (case-sensitive, first match wins);
/// 5. with both accounts resolved: account-to-account currency consistency
///    and instruction-to-debit-account currency consistency, independently;
/// 6. with both accounts resolved and an amount parsed: sufficient funds on
///    the debit side.
pub fn validate(parsed: &ParseResult, accounts: &[Account]) -> RuleOutcome {
    let mut violations = Vec::new();

    for id in [&parsed.debit_account, &parsed.credit_account]
        .into_iter()
        .flatten()
    {
        if !is_valid_account_id(id) {
            violations.push(Violation::new(ErrorCode::InvalidAccountId));
        }
    }

    if parsed.debit_account == parsed.credit_account {
        violations.push(Violation::new(ErrorCode::SameAccount));
    }

    if let Some(currency) = &parsed.currency {
        if !is_supported_currency(currency) {
            violations.push(Violation::new(ErrorCode::UnsupportedCurrency));
        }
    }

    let debit_index = resolve(accounts, parsed.debit_account.as_deref());
    let credit_index = resolve(accounts, parsed.credit_account.as_deref());
    if parsed.debit_account.is_some() && debit_index.is_none() {
        violations.push(Violation::new(ErrorCode::AccountNotFound));
    }
    if parsed.credit_account.is_some() && credit_index.is_none() {
        violations.push(Violation::new(ErrorCode::AccountNotFound));
    }

    if let (Some(di), Some(ci)) = (debit_index, credit_index) {
        let debit = &accounts[di];
        let credit = &accounts[ci];

        if !debit.currency.eq_ignore_ascii_case(&credit.currency) {
            violations.push(Violation::new(ErrorCode::CurrencyMismatch));
        }
        if let Some(currency) = &parsed.currency {
            if !currency.eq_ignore_ascii_case(&debit.currency) {
                violations.push(Violation::new(ErrorCode::CurrencyMismatch));
            }
        }

        if let Some(amount) = parsed.amount {
            if debit.balance < amount {
                violations.push(Violation::new(ErrorCode::InsufficientFunds));
            }
        }
    }

    RuleOutcome {
        violations,
        debit_index,
        credit_index,
    }
}

/// First account whose id matches exactly, by list order.
fn resolve(accounts: &[Account], id: Option<&str>) -> Option<usize> {
    let id = id?;
    accounts.iter().position(|account| account.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    fn codes(outcome: &RuleOutcome) -> Vec<ErrorCode> {
        outcome.violations.iter().map(|v| v.code).collect()
    }

    fn two_accounts() -> Vec<Account> {
        vec![
            Account::new("a", 230, "USD"),
            Account::new("b", 300, "USD"),
        ]
    }

    #[test]
    fn test_valid_instruction_has_no_violations() {
        let parsed = parse("DEBIT 30 USD FROM ACCOUNT a FOR CREDIT TO ACCOUNT b");
        let outcome = validate(&parsed, &two_accounts());
        assert!(outcome.violations.is_empty());
        assert_eq!(outcome.debit_index, Some(0));
        assert_eq!(outcome.credit_index, Some(1));
    }

    #[test]
    fn test_supported_currency_set() {
        for currency in SUPPORTED_CURRENCIES {
            assert!(is_supported_currency(currency));
        }
        assert!(!is_supported_currency("EUR"));
        // Exact uppercase strings only.
        assert!(!is_supported_currency("usd"));
    }

    #[test]
    fn test_invalid_account_id_characters_fire_per_side() {
        let parsed = parse("DEBIT 30 USD FROM ACCOUNT a_1 FOR CREDIT TO ACCOUNT b#2");
        let outcome = validate(&parsed, &[]);
        let found = codes(&outcome);
        assert_eq!(
            found
                .iter()
                .filter(|c| **c == ErrorCode::InvalidAccountId)
                .count(),
            2
        );
    }

    #[test]
    fn test_same_account_fires_on_equal_ids() {
        let parsed = parse("DEBIT 30 USD FROM ACCOUNT a FOR CREDIT TO ACCOUNT a");
        let outcome = validate(&parsed, &[Account::new("a", 500, "USD")]);
        assert!(codes(&outcome).contains(&ErrorCode::SameAccount));
    }

    #[test]
    fn test_same_account_fires_when_both_ids_missing() {
        // Pinned behavior: a parse that resolved neither account still
        // compares the two missing ids as equal.
        let parsed = parse("NONSENSE");
        let outcome = validate(&parsed, &two_accounts());
        assert!(codes(&outcome).contains(&ErrorCode::SameAccount));
    }

    #[test]
    fn test_unsupported_currency() {
        let parsed = parse("DEBIT 30 EUR FROM ACCOUNT a FOR CREDIT TO ACCOUNT b");
        let outcome = validate(&parsed, &two_accounts());
        assert!(codes(&outcome).contains(&ErrorCode::UnsupportedCurrency));
    }

    #[test]
    fn test_account_not_found_per_missing_side() {
        let parsed = parse("DEBIT 30 USD FROM ACCOUNT x FOR CREDIT TO ACCOUNT y");
        let outcome = validate(&parsed, &two_accounts());
        let found = codes(&outcome);
        assert_eq!(
            found
                .iter()
                .filter(|c| **c == ErrorCode::AccountNotFound)
                .count(),
            2
        );
        assert_eq!(outcome.debit_index, None);
        assert_eq!(outcome.credit_index, None);
    }

    #[test]
    fn test_account_lookup_is_case_sensitive() {
        let parsed = parse("DEBIT 30 USD FROM ACCOUNT A FOR CREDIT TO ACCOUNT b");
        let outcome = validate(&parsed, &two_accounts());
        assert!(codes(&outcome).contains(&ErrorCode::AccountNotFound));
    }

    #[test]
    fn test_duplicate_account_ids_first_match_wins() {
        let accounts = vec![
            Account::new("a", 100, "USD"),
            Account::new("a", 9_999, "USD"),
            Account::new("b", 300, "USD"),
        ];
        let parsed = parse("DEBIT 30 USD FROM ACCOUNT a FOR CREDIT TO ACCOUNT b");
        let outcome = validate(&parsed, &accounts);
        assert_eq!(outcome.debit_index, Some(0));
    }

    #[test]
    fn test_currency_mismatch_between_accounts() {
        let accounts = vec![
            Account::new("a", 230, "USD"),
            Account::new("b", 300, "GBP"),
        ];
        let parsed = parse("DEBIT 30 USD FROM ACCOUNT a FOR CREDIT TO ACCOUNT b");
        let outcome = validate(&parsed, &accounts);
        assert!(codes(&outcome).contains(&ErrorCode::CurrencyMismatch));
    }

    #[test]
    fn test_currency_mismatch_against_instruction() {
        let accounts = vec![
            Account::new("a", 230, "GBP"),
            Account::new("b", 300, "GBP"),
        ];
        let parsed = parse("DEBIT 30 USD FROM ACCOUNT a FOR CREDIT TO ACCOUNT b");
        let outcome = validate(&parsed, &accounts);
        assert_eq!(codes(&outcome), vec![ErrorCode::CurrencyMismatch]);
    }

    #[test]
    fn test_both_currency_mismatches_fire_independently() {
        let accounts = vec![
            Account::new("a", 230, "GBP"),
            Account::new("b", 300, "NGN"),
        ];
        let parsed = parse("DEBIT 30 USD FROM ACCOUNT a FOR CREDIT TO ACCOUNT b");
        let outcome = validate(&parsed, &accounts);
        assert_eq!(
            codes(&outcome),
            vec![ErrorCode::CurrencyMismatch, ErrorCode::CurrencyMismatch]
        );
    }

    #[test]
    fn test_account_currency_case_is_tolerated() {
        let accounts = vec![
            Account::new("a", 230, "usd"),
            Account::new("b", 300, "Usd"),
        ];
        let parsed = parse("DEBIT 30 USD FROM ACCOUNT a FOR CREDIT TO ACCOUNT b");
        let outcome = validate(&parsed, &accounts);
        assert!(outcome.violations.is_empty());
    }

    #[test]
    fn test_insufficient_funds() {
        let accounts = vec![
            Account::new("a", 100, "USD"),
            Account::new("b", 500, "USD"),
        ];
        let parsed = parse("DEBIT 500 USD FROM ACCOUNT a FOR CREDIT TO ACCOUNT b");
        let outcome = validate(&parsed, &accounts);
        assert_eq!(codes(&outcome), vec![ErrorCode::InsufficientFunds]);
    }

    #[test]
    fn test_exact_balance_is_sufficient() {
        let accounts = vec![
            Account::new("a", 500, "USD"),
            Account::new("b", 500, "USD"),
        ];
        let parsed = parse("DEBIT 500 USD FROM ACCOUNT a FOR CREDIT TO ACCOUNT b");
        let outcome = validate(&parsed, &accounts);
        assert!(outcome.violations.is_empty());
    }

    #[test]
    fn test_funds_rule_skipped_without_amount() {
        let accounts = vec![
            Account::new("a", 0, "USD"),
            Account::new("b", 500, "USD"),
        ];
        let parsed = parse("DEBIT nope USD FROM ACCOUNT a FOR CREDIT TO ACCOUNT b");
        let outcome = validate(&parsed, &accounts);
        assert!(!codes(&outcome).contains(&ErrorCode::InsufficientFunds));
    }

    #[test]
    fn test_violations_accumulate() {
        // Unsupported currency, credit account missing and insufficient funds
        // cannot all fire at once, but several independent rules can.
        let accounts = vec![Account::new("a", 100, "USD")];
        let parsed = parse("DEBIT 500 EUR FROM ACCOUNT a FOR CREDIT TO ACCOUNT missing");
        let outcome = validate(&parsed, &accounts);
        assert_eq!(
            codes(&outcome),
            vec![ErrorCode::UnsupportedCurrency, ErrorCode::AccountNotFound]
        );
    }
}
