//! Tax and contribution calculator.
//!
//! Every function in this module is pure: it maps a gross amount and an
//! explicit [`TaxConfig`](crate::config::TaxConfig) to tax, contribution,
//! pension and net pay without touching any store. Rounding to the penny
//! (half away from zero) happens on outputs only; annualized intermediate
//! figures keep full precision.

mod annualization;
mod contribution;
mod income_tax;
mod pay_period;
mod tax_year;

pub use annualization::{annualize, deannualize, round_money};
pub use contribution::{ContributionAssessment, contribution_for_period, thresholds_for};
pub use income_tax::{
    AllowanceSource, IncomeTaxBreakdown, PersonalAllowance, income_tax_annual,
    income_tax_breakdown, resolve_personal_allowance, taper_allowance,
};
pub use pay_period::{Offsets, calc_pay_period, calc_with_pension};
pub use tax_year::{MAX_TAX_PERIOD, tax_period_to_date, tax_year_start, tax_year_start_for, week_monday};
