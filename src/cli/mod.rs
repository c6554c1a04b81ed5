pub mod commands;
pub mod context;
pub mod output;

use clap::{Parser, Subcommand};

use crate::core::models::retry::RetryPolicy;

/// Pick an environment, select a service, set the retry policy.
#[derive(Parser, Debug)]
#[command(name = "suiteconf", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Target environment (default from suite.toml, else dev)
    #[arg(long, global = true, env = "SUITE_ENV")]
    pub env: Option<String>,

    /// Directory holding <env>.json files and suite.toml
    #[arg(long, global = true, env = "SUITECONF_DIR")]
    pub config_dir: Option<String>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet mode: only show errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve the suite configuration and print it as JSON
    Resolve {
        /// Service to target, e.g. dummyjson
        #[arg(long, env = "SUITE_SERVICE")]
        service: Option<String>,

        /// Retry attempts for "retry until" steps
        #[arg(long, env = "SUITE_RETRIES")]
        retries: Option<String>,

        /// Milliseconds between retry attempts
        #[arg(long, env = "SUITE_RETRY_INTERVAL")]
        retry_interval: Option<String>,

        /// Retry policy: strict, lenient or none
        #[arg(long)]
        policy: Option<RetryPolicy>,

        /// Service to use when none is given (makes --service optional)
        #[arg(long)]
        default_service: Option<String>,

        /// Write the JSON to this file instead of stdout
        #[arg(short, long)]
        output: Option<String>,

        /// Single-line JSON
        #[arg(long)]
        compact: bool,
    },

    /// List services and environments
    Services,

    /// Compute tags, report directory and threads for a suite run
    Plan {
        /// Suite name or tag, e.g. smoke, @regression
        suite: String,

        /// Service to target, e.g. dummyjson
        #[arg(long, env = "SUITE_SERVICE")]
        service: Option<String>,

        /// Extra tag filter, e.g. "@login ~@wip" or "~@wip and ~@quarantine"
        #[arg(long, env = "SUITE_TAGS")]
        tags: Option<String>,

        /// Worker threads
        #[arg(long, env = "SUITE_THREADS")]
        threads: Option<u32>,

        /// Print the plan as JSON
        #[arg(long)]
        json: bool,
    },

    /// Summarize JUnit XML reports of a suite run
    Report {
        /// Report directory [default: [runner] report_root]
        input: Option<String>,

        /// Also write the summary to a file (.html for a page, otherwise JSON)
        #[arg(short, long)]
        output: Option<String>,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
}
