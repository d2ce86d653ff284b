//! JSON artifact store
//!
//! Reads and writes `.context.json`, `.solutions.json` and `.evaluation.json`
//! in a working directory.

mod json_store;

pub use json_store::JsonArtifactStore;
