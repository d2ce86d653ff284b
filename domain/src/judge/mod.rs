//! Judge subdomain
//!
//! The anonymized cross-judging pipeline:
//!
//! ```text
//! successful solutions
//!     │  anonymize::shuffle_and_anonymize     (random order, "Solution N" labels)
//!     ▼
//! judge prompt ──► every judge ──► parsing::parse_judge_response
//!                                      │
//!                                      ▼
//!                 ranking::aggregate   (de-anonymize, drop self-scores,
//!                                       average, weight, sort)
//!                                      │
//!                                      ▼
//!                        evaluation::EvaluationFile
//! ```

pub mod anonymize;
pub mod evaluation;
pub mod parsing;
pub mod ranking;
pub mod scores;
