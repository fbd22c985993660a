//! Application layer that turns loan requests into quotes.
//!
//! This module defines the `LoanCalculator`, which validates raw requests,
//! runs the amortization engine and prepares rounded and formatted figures
//! for the CLI and the CSV/JSON outputs.

pub mod calculator;
