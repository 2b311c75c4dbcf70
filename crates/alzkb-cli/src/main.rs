//! AlzKB CLI - curation pipeline driver for the AlzKB knowledge graph.

use alzkb_cli::commands;
use alzkb_cli::{Cli, Command, Config, Formatter};
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        let formatter = Formatter::new(alzkb_cli::config::OutputFormat::Table, true);
        eprintln!("{}", formatter.error(&e.to_string()));
        std::process::exit(1);
    }
}

/// Logs go to stderr so stdout stays parseable.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> alzkb_cli::Result<()> {
    let config = Config::load(cli.config.as_deref())?;

    let format = cli.format.map(Into::into).unwrap_or(config.output.format);
    let color_enabled = !cli.no_color && config.output.color;
    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Command::Score(args) => commands::execute_score(args, &formatter),
        Command::Genotype(args) => commands::execute_genotype(args, &formatter),
        Command::Sentinels(args) => commands::execute_sentinels(args, &config, &formatter),
        Command::Curate(args) => commands::execute_curate(args, &config, &formatter),
        Command::Validate(args) => commands::execute_validate(args, &config, &formatter),
        Command::CheckRows(args) => commands::execute_check_rows(args, &formatter),
        Command::Csf(args) => commands::execute_csf(args, &config, &formatter),
        Command::Prune(args) => commands::execute_prune(args, &config, &formatter),
        Command::Rank(args) => commands::execute_rank(args, &config, &formatter),
    }
}
