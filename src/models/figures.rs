//! Monetary figure groups shared by statements, profiles and the ledger.

use std::ops::AddAssign;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Gross pay and deductions for a single pay period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayFigures {
    /// Gross pay.
    pub gross: Decimal,
    /// Income tax.
    pub tax: Decimal,
    /// Social contribution.
    pub contribution: Decimal,
    /// Employee pension.
    pub pension: Decimal,
    /// Take-home pay.
    pub net: Decimal,
}

impl PayFigures {
    /// Builds figures from gross and deductions, deriving net pay.
    pub fn from_deductions(
        gross: Decimal,
        tax: Decimal,
        contribution: Decimal,
        pension: Decimal,
    ) -> Self {
        Self {
            gross,
            tax,
            contribution,
            pension,
            net: gross - tax - contribution - pension,
        }
    }
}

/// Running totals since the start of the tax year.
///
/// # Example
///
/// ```
/// use payroll_ledger::models::YearToDate;
/// use rust_decimal::Decimal;
///
/// let mut ytd = YearToDate::default();
/// ytd.add(Decimal::from(500), Decimal::from(60), Decimal::from(20), Decimal::from(20));
/// assert_eq!(ytd.net(), Decimal::from(400));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearToDate {
    /// Gross pay to date.
    pub gross: Decimal,
    /// Income tax paid to date.
    pub tax: Decimal,
    /// Contribution paid to date.
    pub contribution: Decimal,
    /// Pension paid to date.
    pub pension: Decimal,
}

impl YearToDate {
    /// Accumulates one period's gross and deductions.
    pub fn add(&mut self, gross: Decimal, tax: Decimal, contribution: Decimal, pension: Decimal) {
        self.gross += gross;
        self.tax += tax;
        self.contribution += contribution;
        self.pension += pension;
    }

    /// Net pay to date, derived from the totals.
    pub fn net(&self) -> Decimal {
        self.gross - self.tax - self.contribution - self.pension
    }
}

impl AddAssign<&PayFigures> for YearToDate {
    fn add_assign(&mut self, figures: &PayFigures) {
        self.add(
            figures.gross,
            figures.tax,
            figures.contribution,
            figures.pension,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_from_deductions_derives_net() {
        let figures = PayFigures::from_deductions(dec("500.00"), dec("56.80"), dec("18.64"), dec("25.00"));
        assert_eq!(figures.net, dec("399.56"));
    }

    #[test]
    fn test_add_assign_accumulates_figures() {
        let mut ytd = YearToDate {
            gross: dec("1000.00"),
            tax: dec("100.00"),
            contribution: dec("40.00"),
            pension: dec("40.00"),
        };
        ytd += &PayFigures::from_deductions(dec("250.00"), dec("20.00"), dec("1.00"), dec("10.00"));

        assert_eq!(ytd.gross, dec("1250.00"));
        assert_eq!(ytd.tax, dec("120.00"));
        assert_eq!(ytd.contribution, dec("41.00"));
        assert_eq!(ytd.pension, dec("50.00"));
        assert_eq!(ytd.net(), dec("1039.00"));
    }
}
