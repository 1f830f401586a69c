// retag/src/commands/mod.rs
//! Command implementations for the retag CLI.

pub mod check;
pub mod process;
