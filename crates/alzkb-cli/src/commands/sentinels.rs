//! Sentinels command implementation.

use crate::cli::SentinelsArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use alzkb_ingest::{read_associations, select};

/// Execute the sentinels command.
pub fn execute_sentinels(args: SentinelsArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let records = read_associations(&args.input)?;
    let selection = select(&records, &config.ingest.trait_allowlist);
    println!("{}", formatter.format_sentinels(&selection)?);
    Ok(())
}
