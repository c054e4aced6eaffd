//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - loads the result store
//! - runs extraction + fitting + extrapolation
//! - prints the fit summary and confidence report
//! - persists the extrapolated entry
//! - saves/prints the diagnostic plot

use std::path::Path;

use clap::Parser;

use crate::cli::Cli;
use crate::domain::ExtrapConfig;
use crate::error::AppError;
use crate::fit::extrapolate::ALPHA;
use crate::io::store::ResultStore;
use crate::plot::ascii::{PLOT_HEIGHT, PLOT_WIDTH, render_ascii_plot};
use crate::plot::figure::{FIGURE_FILE, save_figure};

pub mod pipeline;

/// Entry point for the `extrap` binary.
pub fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = extrap_config_from_args(&cli);
    if config.order < 1 {
        return Err(AppError::input("--order must be at least 1"));
    }

    let mut store = ResultStore::load(&config.result_file)?;
    let run = pipeline::run_extrapolation(&config, &store)?;

    print!("{}", crate::report::format_fit_summary(&run.fit));
    println!(
        "{}",
        crate::report::format_extrapolation(&run.extrapolation, ALPHA)
    );

    store.insert_extrapolated(&run.extrapolation)?;
    store.save(&config.result_file)?;

    if config.save_figure {
        save_figure(Path::new(FIGURE_FILE), &run.samples, &run.fit, config.preprint)?;
    }
    if config.show_figure {
        println!(
            "{}",
            render_ascii_plot(&run.samples, &run.fit, PLOT_WIDTH, PLOT_HEIGHT)
        );
    }

    Ok(())
}

pub fn extrap_config_from_args(cli: &Cli) -> ExtrapConfig {
    ExtrapConfig {
        result_file: cli.result_file.clone(),
        save_figure: cli.save_figure,
        show_figure: cli.show_figure,
        order: cli.order,
        preprint: cli.preprint,
        n_points: cli.n_points,
    }
}
