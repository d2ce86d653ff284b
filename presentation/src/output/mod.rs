//! Output formatting: console views, Markdown tech specs, `show` dispatch

pub mod console;
pub mod markdown;
pub mod show;
pub mod spec;
