//! Validate command implementation.

use crate::cli::ValidateArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use alzkb_gatekeeper::{check_integrity, Gatekeeper, ValidationConfig};
use alzkb_store::load_graph;

/// Gate configuration for a run: the loaded settings, with connectivity
/// switched on under `--strict`.
pub fn gate_config(args: &ValidateArgs, config: &Config) -> ValidationConfig {
    let mut validation = config.validation.clone();
    if args.strict {
        validation.check_connectivity = true;
    }
    validation
}

/// Execute the validate command.
///
/// Prints the verdict, then fails with the first failing check so the exit
/// status reflects the gate.
pub fn execute_validate(args: ValidateArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let graph = load_graph(&args.graph)?;

    let verdict = Gatekeeper::new(gate_config(&args, config)).validate(&graph);
    println!("{}", formatter.format_verdict(&verdict)?);
    verdict.into_result()?;

    if args.integrity {
        let report = check_integrity(&graph, &config.integrity)?;
        println!("{}", formatter.format_integrity(&report)?);
    }
    Ok(())
}
