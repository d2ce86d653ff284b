//! Solve subdomain
//!
//! - [`context::TaskContext`]: the coding task handed to every model
//! - [`solution::SolutionResult`]: one model's raw answer (or failure)
//! - [`parsing::parse_solution_files`]: structured view of a raw answer

pub mod context;
pub mod parsing;
pub mod solution;
