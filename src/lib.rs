pub mod application;
pub mod domain;
pub mod error;
pub mod interfaces;

pub use domain::quote::{LoanQuote, compute_loan_quote};
pub use error::{QuoteError, Result};
