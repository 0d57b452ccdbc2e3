use clap::Parser;
use tracing_subscriber::EnvFilter;

use predef_catalog::cli;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("predef_catalog=debug,info")
    } else {
        EnvFilter::new("predef_catalog=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    match &cli.command {
        cli::Commands::Validate => {
            cli::validate::run(&cli.sources, cli.format, cli.verbose)?;
        }
        cli::Commands::List(args) => {
            cli::catalog::run_list(args, &cli.sources, cli.format, cli.verbose)?;
        }
        cli::Commands::Show(args) => {
            cli::catalog::run_show(args, &cli.sources, cli.format, cli.verbose)?;
        }
        cli::Commands::Export(args) => {
            cli::catalog::run_export(args, &cli.sources, cli.format, cli.verbose)?;
        }
    }

    Ok(())
}
