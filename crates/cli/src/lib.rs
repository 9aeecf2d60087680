//! `xpathkit` command-line front end.

pub mod commands;
pub mod util;

use clap::{Parser, Subcommand, ValueEnum};
use commands::{inspect, render, script};
use tracing_subscriber::EnvFilter;
use util::CliResult;

#[derive(Parser, Debug)]
#[command(name = "xpathkit", version, about = "Render XPath queries from JSON recipes")]
pub struct Cli {
    /// Log verbosity; falls back to `RUST_LOG`, then `warn`.
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevel>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render a recipe into an XPath query.
    Render(render::RenderArgs),
    /// Wrap the rendered query into a `document.evaluate` lookup script.
    Script(script::ScriptArgs),
    /// Show the predicate tokens, path segments and issues of a recipe.
    Inspect(inspect::InspectArgs),
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn as_directive(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

pub fn run() -> CliResult<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_level);
    let output = execute(&cli)?;
    println!("{output}");
    Ok(())
}

pub fn execute(cli: &Cli) -> CliResult<String> {
    match &cli.command {
        Commands::Render(args) => render::run(args),
        Commands::Script(args) => script::run(args),
        Commands::Inspect(args) => inspect::run(args),
    }
}

fn init_tracing(level: Option<LogLevel>) {
    let filter = match level {
        Some(level) => EnvFilter::new(level.as_directive()),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    // A subscriber may already be installed when embedded in tests.
    let _ = tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).try_init();
}
