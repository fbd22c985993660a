use super::schedule::AmortizationSchedule;
use super::terms::{LoanTerms, MAX_AMOUNT};
use crate::error::{QuoteError, Result};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

/// The outcome of one affordability calculation.
///
/// All derived figures keep full `f64` precision. Rounding to whole currency
/// units happens only in [`LoanQuote::rounded`], so reconciling the rounded
/// figures against the principal may be off by a unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LoanQuote {
    #[serde(flatten)]
    terms: LoanTerms,
    monthly_payment: f64,
    total_interest: f64,
    total_payment: f64,
}

/// Computes the equated monthly installment for the given loan.
///
/// Uses the reducing-balance formula `P * r * (1 + r)^n / ((1 + r)^n - 1)`
/// with `r` the monthly rate and `n` the number of monthly installments.
/// Fails with [`QuoteError::InvalidInput`] when `principal <= 0`,
/// `annual_rate_percent <= 0` or `tenure_years < 1`.
pub fn compute_loan_quote(
    principal: f64,
    annual_rate_percent: f64,
    tenure_years: u32,
) -> Result<LoanQuote> {
    LoanQuote::from_terms(&LoanTerms::new(
        principal,
        annual_rate_percent,
        tenure_years,
    )?)
}

/// Total interest as a fraction of the principal, `n * EMI / P - 1`.
///
/// Evaluated as `(E - 1) + (B - 1) + (E - 1)(B - 1)` where
/// `E = r / ln(1 + r)` and `B = x / (1 - e^-x)` with `x = n ln(1 + r)`.
/// Both terms are positive for `r > 0` and each is taken from its Taylor
/// series when small, so the result stays positive however small the rate
/// and never overflows for long tenures.
fn interest_factor(rate: f64, n: f64) -> f64 {
    const SERIES_CUTOFF: f64 = 1e-3;

    let log_growth = rate.ln_1p();
    let x = n * log_growth;

    let e = if log_growth < SERIES_CUTOFF {
        let l = log_growth;
        l / 2.0 + l * l / 6.0 + l.powi(3) / 24.0 + l.powi(4) / 120.0
    } else {
        rate / log_growth - 1.0
    };
    let b = if x < SERIES_CUTOFF {
        x / 2.0 + x * x / 12.0 - x.powi(4) / 720.0
    } else {
        x / -(-x).exp_m1() - 1.0
    };

    e + b + e * b
}

impl LoanQuote {
    pub fn from_terms(terms: &LoanTerms) -> Result<Self> {
        let principal = terms.principal();
        let n = terms.installments() as f64;

        let total_interest = principal * interest_factor(terms.monthly_rate(), n);
        let total_payment = principal + total_interest;
        if !total_payment.is_finite() || total_payment > MAX_AMOUNT {
            return Err(QuoteError::InvalidInput(format!(
                "repayment on principal {principal} at {}% over {} years exceeds {MAX_AMOUNT:e}",
                terms.annual_rate_percent(),
                terms.tenure_years()
            )));
        }

        Ok(Self {
            terms: *terms,
            monthly_payment: total_payment / n,
            total_interest,
            total_payment,
        })
    }

    pub fn terms(&self) -> &LoanTerms {
        &self.terms
    }

    pub fn principal(&self) -> f64 {
        self.terms.principal()
    }

    pub fn annual_rate_percent(&self) -> f64 {
        self.terms.annual_rate_percent()
    }

    pub fn tenure_years(&self) -> u32 {
        self.terms.tenure_years()
    }

    pub fn installments(&self) -> u64 {
        self.terms.installments()
    }

    pub fn monthly_rate(&self) -> f64 {
        self.terms.monthly_rate()
    }

    pub fn monthly_payment(&self) -> f64 {
        self.monthly_payment
    }

    pub fn total_interest(&self) -> f64 {
        self.total_interest
    }

    pub fn total_payment(&self) -> f64 {
        self.total_payment
    }

    /// Month-by-month breakdown of the repayment.
    pub fn schedule(&self) -> AmortizationSchedule {
        AmortizationSchedule::new(self)
    }

    /// Rounds each figure independently to the nearest whole unit.
    pub fn rounded(&self) -> Result<QuoteSummary> {
        Ok(QuoteSummary {
            monthly_payment: round_to_unit(self.monthly_payment)?,
            total_interest: round_to_unit(self.total_interest)?,
            total_payment: round_to_unit(self.total_payment)?,
        })
    }
}

/// Whole-unit figures ready for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuoteSummary {
    pub monthly_payment: Decimal,
    pub total_interest: Decimal,
    pub total_payment: Decimal,
}

/// Rounds half away from zero to zero decimal places.
///
/// Amounts a [`LoanQuote`] produces are always within range; only values
/// beyond `Decimal`'s range or non-finite values fail.
pub fn round_to_unit(value: f64) -> Result<Decimal> {
    Decimal::from_f64(value)
        .map(|d| d.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
        .ok_or_else(|| {
            QuoteError::InvalidInput(format!("{value} cannot be represented as a currency amount"))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn reference_emi(principal: f64, annual_rate_percent: f64, tenure_years: u32) -> f64 {
        let r = annual_rate_percent / 100.0 / 12.0;
        let n = f64::from(tenure_years * 12);
        principal * r * (1.0 + r).powf(n) / ((1.0 + r).powf(n) - 1.0)
    }

    #[test]
    fn test_five_year_loan_at_twelve_percent() {
        let quote = compute_loan_quote(1_000_000.0, 12.0, 5).unwrap();
        assert!((quote.monthly_rate() - 0.01).abs() < 1e-15);
        assert_eq!(quote.installments(), 60);

        let summary = quote.rounded().unwrap();
        assert_eq!(summary.monthly_payment, dec!(22244));
        assert_eq!(summary.total_payment, dec!(1334667));
        assert_eq!(summary.total_interest, dec!(334667));
    }

    #[test]
    fn test_ten_year_loan_matches_formula() {
        let quote = compute_loan_quote(500_000.0, 10.0, 10).unwrap();
        let expected = reference_emi(500_000.0, 10.0, 10);

        assert_eq!(quote.installments(), 120);
        assert!((quote.monthly_payment() - expected).abs() < 1e-9);
        assert!((quote.total_payment() - expected * 120.0).abs() < 1e-6);
        assert_eq!(
            quote.rounded().unwrap().monthly_payment,
            round_to_unit(expected).unwrap()
        );
    }

    #[test]
    fn test_derived_totals_are_consistent() {
        let quote = compute_loan_quote(250_000.0, 7.25, 15).unwrap();
        let n = quote.installments() as f64;
        assert!((quote.total_payment() - quote.monthly_payment() * n).abs() < 1e-6);
        assert!((quote.total_interest() - (quote.total_payment() - quote.principal())).abs() < 1e-6);
    }

    #[test]
    fn test_single_year_has_twelve_installments() {
        let quote = compute_loan_quote(100_000.0, 8.5, 1).unwrap();
        assert_eq!(quote.installments(), 12);

        let summary = quote.rounded().unwrap();
        let raw_twelve = Decimal::from_f64(quote.monthly_payment() * 12.0).unwrap();
        assert!((summary.total_payment - raw_twelve).abs() <= dec!(1));
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(matches!(
            compute_loan_quote(0.0, 12.0, 5),
            Err(QuoteError::InvalidInput(_))
        ));
        assert!(matches!(
            compute_loan_quote(1_000_000.0, 0.0, 5),
            Err(QuoteError::InvalidInput(_))
        ));
        assert!(matches!(
            compute_loan_quote(1_000_000.0, 12.0, 0),
            Err(QuoteError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_very_long_tenure_approaches_interest_only() {
        // (1 + r)^n is far beyond f64 range here
        let quote = compute_loan_quote(1_000_000.0, 36.0, 4_000_000).unwrap();
        let interest_only = 1_000_000.0 * 0.03;
        assert!((quote.monthly_payment() - interest_only).abs() / interest_only < 1e-9);
    }

    #[test]
    fn test_tiny_rates_still_accrue_interest() {
        for (principal, rate, tenure) in [
            (1e9, 1e-9, 10),
            (120_000.0, 1e-14, 10),
            (1e12, 1e-12, 1),
            (1e12, 1e-6, 30),
        ] {
            let quote = compute_loan_quote(principal, rate, tenure).unwrap();
            assert!(quote.total_interest() > 0.0);
            assert!(quote.total_payment() > principal);
            assert!(quote.monthly_payment() >= principal / quote.installments() as f64);
        }
    }

    #[test]
    fn test_interest_factor_matches_growth_form_at_ordinary_rates() {
        for (rate, n) in [(0.01, 60.0), (0.1 / 12.0, 120.0), (0.03, 360.0), (5e-4, 1.0)] {
            let growth: f64 = (1.0_f64 + rate).powf(n);
            let expected = n * rate * growth / (growth - 1.0) - 1.0;
            assert!((interest_factor(rate, n) - expected).abs() <= expected * 1e-10);
        }
    }

    #[test]
    fn test_unrepresentable_repayment_is_rejected() {
        assert!(matches!(
            compute_loan_quote(7e28, 36.0, 30),
            Err(QuoteError::InvalidInput(_))
        ));
        let quote = compute_loan_quote(1e20, 36.0, 30).unwrap();
        assert!(quote.rounded().is_ok());
    }

    #[test]
    fn test_rounding_reconciles_within_one_unit() {
        let quote = compute_loan_quote(1_000_000.0, 12.0, 5).unwrap();
        let summary = quote.rounded().unwrap();
        let reconciled = summary.total_payment - summary.total_interest;
        assert!((reconciled - dec!(1000000)).abs() <= dec!(1));
    }

    #[test]
    fn test_round_to_unit_midpoints() {
        assert_eq!(round_to_unit(2.5).unwrap(), dec!(3));
        assert_eq!(round_to_unit(-2.5).unwrap(), dec!(-3));
        assert_eq!(round_to_unit(2.49).unwrap(), dec!(2));
        assert!(round_to_unit(f64::NAN).is_err());
    }

    #[test]
    fn test_quote_serializes_raw_figures() {
        let quote = compute_loan_quote(1_000_000.0, 12.0, 5).unwrap();
        let json = serde_json::to_value(quote).unwrap();
        assert_eq!(json["tenure_years"], 5);
        assert_eq!(json["principal"], 1_000_000.0);
        assert!(json["monthly_payment"].as_f64().unwrap() > 22_244.0);
    }
}
