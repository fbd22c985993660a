use crate::error::{QuoteError, Result};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;

/// Largest principal or repayment total a quote may carry; keeps every
/// figure inside the range whole-unit `Decimal`s can hold.
pub const MAX_AMOUNT: f64 = 1e28;

/// Validated inputs to the amortization formula.
///
/// A `LoanTerms` can only be built through [`LoanTerms::new`] (or
/// [`LoanTerms::from_decimals`]), so holding one means the principal and
/// rate are finite and positive and the tenure covers at least one year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LoanTerms {
    principal: f64,
    annual_rate_percent: f64,
    tenure_years: u32,
}

impl LoanTerms {
    pub fn new(principal: f64, annual_rate_percent: f64, tenure_years: u32) -> Result<Self> {
        if !principal.is_finite() || principal <= 0.0 {
            return Err(QuoteError::InvalidInput(format!(
                "principal must be a positive amount, got {principal}"
            )));
        }
        if principal > MAX_AMOUNT {
            return Err(QuoteError::InvalidInput(format!(
                "principal {principal} exceeds the largest quotable amount {MAX_AMOUNT:e}"
            )));
        }
        if !annual_rate_percent.is_finite() || annual_rate_percent <= 0.0 {
            return Err(QuoteError::InvalidInput(format!(
                "annual rate must be a positive percentage, got {annual_rate_percent}"
            )));
        }
        if tenure_years < 1 {
            return Err(QuoteError::InvalidInput(format!(
                "tenure must be at least one year, got {tenure_years}"
            )));
        }

        Ok(Self {
            principal,
            annual_rate_percent,
            tenure_years,
        })
    }

    /// Builds terms from decimal amounts as they arrive from text input.
    pub fn from_decimals(
        principal: Decimal,
        annual_rate_percent: Decimal,
        tenure_years: u32,
    ) -> Result<Self> {
        let principal = principal.to_f64().ok_or_else(|| {
            QuoteError::InvalidInput(format!("principal {principal} is not representable"))
        })?;
        let annual_rate_percent = annual_rate_percent.to_f64().ok_or_else(|| {
            QuoteError::InvalidInput(format!("rate {annual_rate_percent} is not representable"))
        })?;
        Self::new(principal, annual_rate_percent, tenure_years)
    }

    pub fn principal(&self) -> f64 {
        self.principal
    }

    pub fn annual_rate_percent(&self) -> f64 {
        self.annual_rate_percent
    }

    pub fn tenure_years(&self) -> u32 {
        self.tenure_years
    }

    /// Periodic (monthly) rate as a fraction: `r_annual / 100 / 12`.
    pub fn monthly_rate(&self) -> f64 {
        self.annual_rate_percent / 100.0 / 12.0
    }

    /// Number of monthly installments.
    pub fn installments(&self) -> u64 {
        u64::from(self.tenure_years) * 12
    }
}
