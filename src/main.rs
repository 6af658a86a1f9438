use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod core;
mod parsing;
mod utils;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("samgate=debug,info")
    } else {
        EnvFilter::new("samgate=warn")
    };

    // Reports go to stdout, so logs must not
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    match cli.command {
        cli::Commands::Validate(args) => {
            cli::validate::run(args, cli.format, cli.verbose)?;
        }
    }

    Ok(())
}
