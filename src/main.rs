mod adapters;
mod cli;
mod config;
mod core;

use clap::Parser;

use cli::commands::resolve::ResolveOptions;
use cli::{Cli, Commands};

fn main() {
    let args = Cli::parse();

    init_tracing(args.verbose, args.quiet);
    cli::output::set_quiet(args.quiet);
    cli::context::init(args.config_dir.as_deref());

    let env = args.env.as_deref();

    let result = match &args.command {
        Commands::Resolve {
            service,
            retries,
            retry_interval,
            policy,
            default_service,
            output,
            compact,
        } => cli::commands::resolve::execute(&ResolveOptions {
            env,
            service: service.as_deref(),
            retries: retries.as_deref(),
            retry_interval: retry_interval.as_deref(),
            policy: *policy,
            default_service: default_service.as_deref(),
            output: output.as_deref(),
            compact: *compact,
        }),
        Commands::Services => cli::commands::services::execute(env),
        Commands::Plan {
            suite,
            service,
            tags,
            threads,
            json,
        } => cli::commands::plan::execute(
            env,
            suite,
            service.as_deref(),
            tags.as_deref(),
            *threads,
            *json,
        ),
        Commands::Report {
            input,
            output,
            json,
        } => cli::commands::report::execute(input.as_deref(), output.as_deref(), *json),
    };

    if let Err(e) = result {
        cli::output::error(&format!("Error: {e}"));
        std::process::exit(1);
    }
}

/// Diagnostics go to stderr so stdout stays clean for the JSON document.
fn init_tracing(verbose: bool, quiet: bool) {
    let default_filter = if verbose {
        "suiteconf=debug"
    } else if quiet {
        "suiteconf=warn"
    } else {
        "suiteconf=info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
