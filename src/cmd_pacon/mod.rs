//! Subcommand modules for the `pacon` binary.

pub mod conservation;
pub mod distance;
pub mod tree;
