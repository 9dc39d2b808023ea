//! Subcommand implementations.

pub mod deploy;
pub mod start;
pub mod stop;
