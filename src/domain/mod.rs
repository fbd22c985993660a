//! Domain layer: loan terms, the amortization engine and currency display.
//!
//! Everything here is pure. No function in this module performs I/O, logs,
//! or touches shared state, so quotes can be computed from any thread.

pub mod currency;
pub mod quote;
pub mod schedule;
pub mod terms;
