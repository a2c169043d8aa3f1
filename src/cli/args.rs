//! Command-line interface definitions.

use clap::{ColorChoice, Parser};
use std::path::PathBuf;

/// Migrate packages.config projects to SDK-style PackageReference projects
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Directory searched recursively for project files (default: current directory)
    #[arg(value_hint = clap::ValueHint::DirPath)]
    pub root: Option<PathBuf>,

    /// Config file path (default: pkgref.toml in the root, if present)
    #[arg(short = 'C', long, value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Transform and report without writing or deleting anything
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Stop at the first project that fails
    #[arg(long)]
    pub fail_fast: bool,

    /// Print per-stage details
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Control colored output (auto, always, never)
    #[arg(long, default_value = "auto")]
    pub color: ColorChoice,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_arguments() {
        let cli = Cli::try_parse_from(["pkgref"]).unwrap();
        assert!(cli.root.is_none());
        assert!(cli.config.is_none());
        assert!(!cli.dry_run && !cli.fail_fast && !cli.verbose);
        assert_eq!(cli.color, ColorChoice::Auto);
    }

    #[test]
    fn test_all_arguments() {
        let cli = Cli::try_parse_from([
            "pkgref", "src", "-C", "ci.toml", "-n", "--fail-fast", "-v", "--color", "never",
        ])
        .unwrap();
        assert_eq!(cli.root, Some(PathBuf::from("src")));
        assert_eq!(cli.config, Some(PathBuf::from("ci.toml")));
        assert!(cli.dry_run && cli.fail_fast && cli.verbose);
        assert_eq!(cli.color, ColorChoice::Never);
    }
}
