//! Prompt domain
//!
//! Templates for the solve prompt, the judge prompt, and the corrective
//! retry instruction sent to judges whose first answer was not valid JSON.

mod template;

pub use template::PromptTemplate;
