use crate::domain::currency::CurrencyFormatter;
use crate::domain::quote::{LoanQuote, QuoteSummary, round_to_unit};
use crate::domain::terms::LoanTerms;
use crate::error::Result;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single affordability request, as read from CSV or the command line.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct QuoteRequest {
    pub principal: Decimal,
    /// Nominal annual rate in percent.
    pub rate: Decimal,
    /// Whole years.
    pub tenure: u32,
}

/// A computed quote in whole currency units, one CSV row per request.
#[derive(Debug, Serialize, PartialEq, Clone)]
pub struct QuoteRecord {
    pub principal: Decimal,
    pub rate: Decimal,
    pub tenure: u32,
    pub monthly_payment: Decimal,
    pub total_interest: Decimal,
    pub total_payment: Decimal,
}

/// A rendered schedule row in whole currency units.
#[derive(Debug, Serialize, PartialEq, Clone)]
pub struct InstallmentRecord {
    pub installment: u64,
    pub payment: Decimal,
    pub interest: Decimal,
    pub principal: Decimal,
    pub balance: Decimal,
}

/// Formatted strings for the three headline figures.
#[derive(Debug, Serialize, PartialEq, Clone)]
pub struct QuoteDisplay {
    pub monthly_payment: String,
    pub total_interest: String,
    pub total_payment: String,
}

/// Everything a downstream consumer (the lead-capture flow) needs about a
/// single quote.
#[derive(Debug, Serialize, PartialEq, Clone)]
pub struct QuoteReport {
    pub quote: LoanQuote,
    pub summary: QuoteSummary,
    pub display: QuoteDisplay,
}

/// Entry point for turning raw requests into quotes and display figures.
///
/// The calculator holds only display settings. Each call computes a fresh
/// [`LoanQuote`]; nothing is cached between requests.
#[derive(Debug, Clone, Default)]
pub struct LoanCalculator {
    formatter: CurrencyFormatter,
}

impl LoanCalculator {
    pub fn new(formatter: CurrencyFormatter) -> Self {
        Self { formatter }
    }

    pub fn formatter(&self) -> &CurrencyFormatter {
        &self.formatter
    }

    pub fn quote(&self, request: &QuoteRequest) -> Result<LoanQuote> {
        let terms = LoanTerms::from_decimals(request.principal, request.rate, request.tenure)?;
        let quote = LoanQuote::from_terms(&terms)?;
        tracing::debug!(
            principal = %request.principal,
            rate = %request.rate,
            tenure = request.tenure,
            monthly_payment = quote.monthly_payment(),
            "Computed loan quote"
        );
        Ok(quote)
    }

    /// Computes the quote for one request and rounds it for output.
    pub fn process_request(&self, request: QuoteRequest) -> Result<QuoteRecord> {
        let summary = self.quote(&request)?.rounded()?;
        Ok(QuoteRecord {
            principal: request.principal,
            rate: request.rate,
            tenure: request.tenure,
            monthly_payment: summary.monthly_payment,
            total_interest: summary.total_interest,
            total_payment: summary.total_payment,
        })
    }

    pub fn report(&self, request: &QuoteRequest) -> Result<QuoteReport> {
        let quote = self.quote(request)?;
        let summary = quote.rounded()?;
        let display = QuoteDisplay {
            monthly_payment: self.formatter.format(summary.monthly_payment),
            total_interest: self.formatter.format(summary.total_interest),
            total_payment: self.formatter.format(summary.total_payment),
        };
        Ok(QuoteReport {
            quote,
            summary,
            display,
        })
    }

    pub fn schedule(&self, request: &QuoteRequest) -> Result<Vec<InstallmentRecord>> {
        self.quote(request)?
            .schedule()
            .map(|row| {
                Ok(InstallmentRecord {
                    installment: row.number,
                    payment: round_to_unit(row.payment)?,
                    interest: round_to_unit(row.interest)?,
                    principal: round_to_unit(row.principal)?,
                    balance: round_to_unit(row.balance)?,
                })
            })
            .collect()
    }
}
