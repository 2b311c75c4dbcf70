//! Prune command implementation.

use crate::cli::PruneArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use alzkb_retrieval::{prune, PruneStrategy};
use alzkb_store::load_graph;

/// Execute the prune command.
pub fn execute_prune(args: PruneArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let graph = load_graph(&args.graph)?;
    if !graph.contains_node(&args.center) {
        return Err(CliError::InvalidInput(format!(
            "Node '{}' not found in {}",
            args.center,
            args.graph.display()
        )));
    }

    let limit = args.limit.unwrap_or(config.retrieval.prune_limit);
    let strategy = args
        .strategy
        .as_deref()
        .map(PruneStrategy::parse)
        .unwrap_or(config.retrieval.prune_strategy);

    let scored = prune(&graph, &args.center, limit, strategy);
    println!("{}", formatter.format_pruned(&scored)?);
    Ok(())
}
