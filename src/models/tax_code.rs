//! Tax code model.
//!
//! Only two families of code change the personal allowance: the no-allowance
//! codes (`BR`, `0T`) and codes with a leading numeric run (`1257L`), whose
//! number is the allowance divided by ten. Every other code leaves the
//! configured default allowance in place.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Codes that remove the personal allowance entirely.
const NO_ALLOWANCE_CODES: [&str; 2] = ["BR", "0T"];

/// A tax code as printed on a pay statement.
///
/// # Example
///
/// ```
/// use payroll_ledger::models::TaxCode;
/// use rust_decimal::Decimal;
///
/// let code = TaxCode::parse("1257L").unwrap();
/// assert_eq!(code.numeric_allowance(), Some(Decimal::from(12570)));
/// assert!(TaxCode::parse("BR").unwrap().is_no_allowance());
/// assert!(TaxCode::parse("   ").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaxCode(String);

impl TaxCode {
    /// Parses a tax code, returning `None` for blank input.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    /// Returns the code as written.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true for codes that force the personal allowance to zero.
    pub fn is_no_allowance(&self) -> bool {
        NO_ALLOWANCE_CODES
            .iter()
            .any(|code| self.0.eq_ignore_ascii_case(code))
    }

    /// Returns the allowance encoded by the code's leading digits, if any.
    ///
    /// `1257L` encodes 12,570; `K475` has no leading digits and yields `None`.
    pub fn numeric_allowance(&self) -> Option<Decimal> {
        let digits: String = self.0.chars().take_while(|c| c.is_ascii_digit()).collect();
        if digits.is_empty() {
            return None;
        }
        Decimal::from_str(&digits)
            .ok()
            .and_then(|n| n.checked_mul(Decimal::TEN))
    }
}

impl fmt::Display for TaxCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
