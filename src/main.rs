mod cli;
mod error;

use aos_config::Config;
use aos_index::models::Category;
use aos_library::{IndexFetcher, ListOptions};
use clap::Parser;
use exn::ResultExt;
use std::io::Write;
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::cli::{CacheCommand, Cli, Command};
use crate::error::{Error, ErrorKind, Result};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.debug);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", error_report(&err));
            ExitCode::FAILURE
        },
    }
}

/// The full error tree, as printed on failure.
fn error_report(err: &Error) -> String {
    format!("Error: {err:?}")
}

fn init_logging(debug: bool) {
    let filter = match debug {
        true => EnvFilter::new("debug"),
        false => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(debug))
        .with(filter)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref())
        .or_raise(|| ErrorKind::Config)?
        .with_bypass(cli.bypass());
    tracing::debug!(?config, "loaded configuration");
    let cache = config.cache_store().or_raise(|| ErrorKind::Config)?;

    match cli.command {
        Command::List(args) => {
            let fetcher = IndexFetcher::new(cache, config.remote().or_raise(|| ErrorKind::Config)?);
            let options = ListOptions { tarballs: args.tarballs, source: args.source };
            let output = aos_library::list(&fetcher, options).or_raise(|| ErrorKind::Command("list"))?;
            write_stdout(&output)
        },
        Command::Versions { project, source } => {
            let fetcher = IndexFetcher::new(cache, config.remote().or_raise(|| ErrorKind::Config)?);
            let category = Category::select(false, source);
            let releases =
                aos_library::versions(&fetcher, category, &project).or_raise(|| ErrorKind::Command("versions"))?;
            write_stdout(&aos_library::render_versions(&releases))
        },
        Command::Fetch { project, version, output } => {
            let fetcher = IndexFetcher::new(cache, config.remote().or_raise(|| ErrorKind::Config)?);
            let path = aos_library::fetch_release(&fetcher, &project, &version, &output)
                .or_raise(|| ErrorKind::Command("fetch"))?;
            write_stdout(&format!("{}\n", path.display()))
        },
        Command::Cache(CacheCommand::List) => {
            let report = aos_library::cache::report(&cache).or_raise(|| ErrorKind::Command("cache list"))?;
            write_stdout(&report)
        },
        Command::Cache(CacheCommand::Path) => write_stdout(&format!("{}\n", cache.root().display())),
        Command::Cache(CacheCommand::Clear) => {
            // The store logs how many documents were removed.
            aos_library::cache::clear(&cache).or_raise(|| ErrorKind::Command("cache clear"))?;
            Ok(())
        },
    }
}

/// Writes command output verbatim; no newline is appended.
fn write_stdout(output: &str) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(output.as_bytes()).or_raise(|| ErrorKind::Output)?;
    stdout.flush().or_raise(|| ErrorKind::Output)?;
    Ok(())
}
