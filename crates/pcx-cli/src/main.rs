use clap::Parser;

mod bootstrap;
mod cli;
mod commands;
mod context;
mod output;

fn main() {
    if let Err(error) = run() {
        eprintln!("pcx error: {error:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let flags = cli.global_flags();
    output::init(&flags);

    if let cli::Commands::Schema { action } = &cli.command {
        return commands::schema::handle(action, &flags);
    }

    let config = bootstrap::load_config(&flags)?;
    let ctx = context::AppContext::new(config);
    commands::dispatch::dispatch(cli.command, &ctx, &flags)
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("PCX_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
