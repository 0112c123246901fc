//! Process-level services used by the command-line tool

#[cfg(feature = "runtime")]
pub mod tracing_setup;
