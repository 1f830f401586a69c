// retag/src/commands/check.rs
//! Check command implementation: validate a rewrite configuration.
//!
//! Loading already compile-checks every pattern; compiling the rule set
//! exercises the exact code path the processor uses, so a configuration
//! that passes here cannot fail at batch time.

use anyhow::Result;
use log::info;

use retag_core::{compile_rules, RewriteConfig};

use crate::cli::CheckCommand;

pub fn run(cmd: CheckCommand) -> Result<()> {
    let config = RewriteConfig::load_from_file(&cmd.config)?;
    let rule_set = compile_rules(&config.rules)?;

    info!("Configuration valid: {} rule(s) compiled.", rule_set.len());
    println!(
        "{}: OK ({} rule(s))",
        cmd.config.display(),
        rule_set.len()
    );
    Ok(())
}
