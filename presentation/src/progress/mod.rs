//! Progress display for the solve and evaluate phases

pub mod reporter;
