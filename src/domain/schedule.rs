use super::quote::LoanQuote;
use serde::Serialize;

/// One month of a reducing-balance repayment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Installment {
    /// 1-based installment number.
    pub number: u64,
    /// The fixed installment amount.
    pub payment: f64,
    /// Interest charged on the balance outstanding before this payment.
    pub interest: f64,
    /// Part of the payment that reduces the outstanding balance.
    pub principal: f64,
    /// Balance outstanding after this payment.
    pub balance: f64,
}

/// Lazily walks the repayment schedule of a [`LoanQuote`].
///
/// The last installment settles the loan: its balance is exactly zero, with
/// any floating-point residue folded into that installment's principal part.
#[derive(Debug, Clone)]
pub struct AmortizationSchedule {
    payment: f64,
    rate: f64,
    balance: f64,
    next: u64,
    installments: u64,
}

impl AmortizationSchedule {
    pub fn new(quote: &LoanQuote) -> Self {
        Self {
            payment: quote.monthly_payment(),
            rate: quote.monthly_rate(),
            balance: quote.principal(),
            next: 1,
            installments: quote.installments(),
        }
    }
}

impl Iterator for AmortizationSchedule {
    type Item = Installment;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next > self.installments {
            return None;
        }

        let interest = self.balance * self.rate;
        let principal = if self.next == self.installments {
            self.balance
        } else {
            (self.payment - interest).min(self.balance)
        };
        self.balance = (self.balance - principal).max(0.0);

        let installment = Installment {
            number: self.next,
            payment: self.payment,
            interest,
            principal,
            balance: self.balance,
        };
        self.next += 1;
        Some(installment)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.installments + 1).saturating_sub(self.next);
        match usize::try_from(remaining) {
            Ok(remaining) => (remaining, Some(remaining)),
            Err(_) => (usize::MAX, None),
        }
    }
}
