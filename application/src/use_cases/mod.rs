//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod run_evaluate;
pub mod run_solve;

#[cfg(test)]
pub(crate) mod testing;
