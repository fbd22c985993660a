use crate::error::{QuoteError, Result};
use clap::ValueEnum;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Digit grouping convention for the integer part of an amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Grouping {
    /// Lakh/crore grouping: the last three digits, then pairs (`12,34,567`).
    #[default]
    Indian,
    /// Thousands grouping (`1,234,567`).
    Western,
}

/// Renders amounts as whole-unit currency strings, e.g. `₹13,34,667`.
///
/// Output depends only on the amount and the formatter's settings, never on
/// the process locale. Negative amounts carry a leading minus before the
/// symbol (`-₹1,000`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyFormatter {
    symbol: String,
    grouping: Grouping,
}

impl Default for CurrencyFormatter {
    fn default() -> Self {
        Self::new("₹", Grouping::Indian)
    }
}

impl CurrencyFormatter {
    pub fn new(symbol: impl Into<String>, grouping: Grouping) -> Self {
        Self {
            symbol: symbol.into(),
            grouping,
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn grouping(&self) -> Grouping {
        self.grouping
    }

    pub fn format(&self, amount: Decimal) -> String {
        let whole = amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        let negative = whole.is_sign_negative() && !whole.is_zero();
        self.render(negative, &whole.abs().to_string())
    }

    /// Formats any finite amount, including ones beyond `Decimal`'s range.
    pub fn format_f64(&self, amount: f64) -> Result<String> {
        if !amount.is_finite() {
            return Err(QuoteError::InvalidInput(format!(
                "{amount} is not a currency amount"
            )));
        }
        if let Some(amount) = Decimal::from_f64(amount) {
            return Ok(self.format(amount));
        }

        // f64::round rounds half away from zero, like the Decimal path
        let whole = amount.round();
        Ok(self.render(whole < 0.0, &format!("{:.0}", whole.abs())))
    }

    fn render(&self, negative: bool, digits: &str) -> String {
        let sign = if negative { "-" } else { "" };
        format!("{sign}{}{}", self.symbol, self.group(digits))
    }

    fn group(&self, digits: &str) -> String {
        if digits.len() <= 3 {
            return digits.to_string();
        }

        let (head, tail) = digits.split_at(digits.len() - 3);
        let width = match self.grouping {
            Grouping::Indian => 2,
            Grouping::Western => 3,
        };

        let mut groups = Vec::new();
        let mut end = head.len();
        while end > 0 {
            let start = end.saturating_sub(width);
            groups.push(&head[start..end]);
            end = start;
        }
        groups.reverse();
        groups.push(tail);
        groups.join(",")
    }
}
