//! Rank command implementation.

use crate::cli::RankArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use alzkb_retrieval::{rank_with, VectorHit};
use std::fs;

/// Execute the rank command.
pub fn execute_rank(args: RankArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let hits: Vec<VectorHit> = serde_json::from_str(&fs::read_to_string(&args.vector_results)?)?;

    let mut ranked = rank_with(
        &args.query,
        &hits,
        &args.keyword_matches,
        config.retrieval.rank_params(),
    );
    if let Some(limit) = args.limit {
        ranked.truncate(limit);
    }

    println!("{}", formatter.format_ranked(&ranked)?);
    Ok(())
}
