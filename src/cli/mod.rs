//! Command-line parsing for the zero-variance extrapolation tool.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! extraction/fitting code: the rest of the crate only ever sees an explicit
//! [`crate::domain::ExtrapConfig`].
//!
//! Flag names keep underscores (`--result_file`, `--n_points`) and booleans
//! take an explicit value (`--save_figure false`) so existing workflow
//! scripts keep working unchanged.

use std::path::PathBuf;

use clap::{ArgAction, Parser};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "extrap",
    version,
    about = "Extrapolate QMC total energies to the zero-variance limit"
)]
pub struct Cli {
    /// Result store (JSON) to read and rewrite in place.
    #[arg(long = "result_file", default_value = "result.json")]
    pub result_file: PathBuf,

    /// Write the diagnostic figure to extrapolate.svg.
    #[arg(long = "save_figure", default_value_t = true, action = ArgAction::Set, value_name = "BOOL")]
    pub save_figure: bool,

    /// Print the terminal plot after fitting.
    #[arg(long = "show_figure", default_value_t = true, action = ArgAction::Set, value_name = "BOOL")]
    pub show_figure: bool,

    /// Polynomial order for the fit (>= 1).
    #[arg(long, default_value_t = 2)]
    pub order: usize,

    /// Use the smaller preprint figure size.
    #[arg(long, default_value_t = false, action = ArgAction::Set, value_name = "BOOL")]
    pub preprint: bool,

    /// If > 0, restrict the fit to the n samples with smallest total energy.
    #[arg(long = "n_points", default_value_t = 0)]
    pub n_points: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_surface() {
        let cli = Cli::try_parse_from(["extrap"]).unwrap();
        assert_eq!(cli.result_file, PathBuf::from("result.json"));
        assert!(cli.save_figure);
        assert!(cli.show_figure);
        assert_eq!(cli.order, 2);
        assert!(!cli.preprint);
        assert_eq!(cli.n_points, 0);
    }

    #[test]
    fn booleans_take_explicit_values() {
        let cli = Cli::try_parse_from([
            "extrap",
            "--save_figure",
            "false",
            "--show_figure",
            "false",
            "--preprint",
            "true",
        ])
        .unwrap();
        assert!(!cli.save_figure);
        assert!(!cli.show_figure);
        assert!(cli.preprint);
    }

    #[test]
    fn underscore_flags_parse() {
        let cli = Cli::try_parse_from([
            "extrap",
            "--result_file",
            "run7/result.json",
            "--n_points",
            "4",
            "--order",
            "3",
        ])
        .unwrap();
        assert_eq!(cli.result_file, PathBuf::from("run7/result.json"));
        assert_eq!(cli.n_points, 4);
        assert_eq!(cli.order, 3);
    }
}
