//! Command implementations for the CLI.

pub mod docker;
pub mod publish;
