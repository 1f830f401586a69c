// retag/src/lib.rs
//! # retag CLI
//!
//! This crate provides the command-line driver for the retag rewrite
//! stage: it stands in for a host pipeline by reading JSON-line records,
//! running them through `retag-core` under a given routing tag, and
//! printing the surviving (tag, time, record) triples as JSON lines.

pub mod cli;
pub mod commands;
pub mod logger;
