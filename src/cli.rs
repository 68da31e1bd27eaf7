use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// `<version> (<git commit>)`
pub const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GIT_COMMIT"), ")");

#[derive(Parser, Debug)]
#[command(name = "aos", about = "An opensource.apple.com resource management tool", version = VERSION)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Disable the cache for this run (documents are still refreshed)
    #[arg(short = 'n', long)]
    pub no_cache: bool,

    /// Additional configuration file (toml, yaml or json)
    #[arg(short, long, global = true, env = "AOS_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// List the projects of a catalog category
    List(ListArgs),
    /// List the released versions of a project
    Versions {
        /// Project name, as printed by `list`
        project: String,
        /// List the source tree versions instead of the tarballs
        #[arg(short, long)]
        source: bool,
    },
    /// Download a release tarball of a project
    Fetch {
        /// Project name, as printed by `list`
        project: String,
        /// Version, as printed by `versions`
        version: String,
        /// Destination directory
        #[arg(short, long, default_value = ".")]
        output: PathBuf,
    },
    /// Inspect or clear the local index cache
    #[command(subcommand)]
    Cache(CacheCommand),
}

#[derive(Args, Debug, Default, PartialEq, Eq)]
pub struct ListArgs {
    /// List the tarballs resources (default)
    #[arg(short, long)]
    pub tarballs: bool,
    /// List the source resources
    #[arg(short, long)]
    pub source: bool,
    /// Disable the cache
    #[arg(short = 'n', long)]
    pub no_cache: bool,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum CacheCommand {
    /// List cached documents
    List,
    /// Print the cache directory
    Path,
    /// Remove every cached document
    Clear,
}

impl Cli {
    /// Whether the cache is bypassed, by the global flag or the `list` flag.
    pub fn bypass(&self) -> bool {
        self.no_cache || matches!(&self.command, Command::List(args) if args.no_cache)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use rstest::rstest;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("aos").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[rstest]
    #[case(&["list"], ListArgs::default())]
    #[case(&["list", "-t"], ListArgs { tarballs: true, ..Default::default() })]
    #[case(&["list", "--source"], ListArgs { source: true, ..Default::default() })]
    #[case(&["list", "-s", "-n"], ListArgs { source: true, no_cache: true, ..Default::default() })]
    fn list_flags(#[case] args: &[&str], #[case] expected: ListArgs) {
        assert_eq!(parse(args).command, Command::List(expected));
    }

    #[rstest]
    #[case::none(&["list"], false)]
    #[case::global(&["-n", "list"], true)]
    #[case::global_long(&["--no-cache", "versions", "Libc"], true)]
    #[case::list(&["list", "--no-cache"], true)]
    fn bypass(#[case] args: &[&str], #[case] expected: bool) {
        assert_eq!(parse(args).bypass(), expected);
    }

    #[rstest]
    #[case::tarballs(&["versions", "xnu"], false)]
    #[case::source(&["versions", "-s", "xnu"], true)]
    #[case::source_long(&["versions", "xnu", "--source"], true)]
    fn versions_flags(#[case] args: &[&str], #[case] source: bool) {
        assert_eq!(parse(args).command, Command::Versions { project: "xnu".to_string(), source });
    }

    #[test]
    fn fetch_defaults_to_current_directory() {
        let cli = parse(&["fetch", "Libc", "1439.40.11"]);
        assert_eq!(
            cli.command,
            Command::Fetch {
                project: "Libc".to_string(),
                version: "1439.40.11".to_string(),
                output: PathBuf::from("."),
            }
        );
    }

    #[test]
    fn global_options_after_subcommand() {
        let cli = parse(&["cache", "path", "--debug", "--config", "aos.toml"]);
        assert_eq!(cli.command, Command::Cache(CacheCommand::Path));
        assert!(cli.debug);
        assert_eq!(cli.config, Some(PathBuf::from("aos.toml")));
    }

    #[test]
    fn version_banner() {
        assert!(VERSION.starts_with(env!("CARGO_PKG_VERSION")));
        assert!(VERSION.ends_with(')'));
    }
}
