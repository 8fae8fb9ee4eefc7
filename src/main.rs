// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
#[cfg(feature = "parallel")]
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use sciqa::cli::{display, Cli, Commands};
#[cfg(feature = "parallel")]
use sciqa::RowOutcome;
use sciqa::{open_index, run_index, BatchRunner, RunConfig};

fn init_logging(verbose: bool) {
    let default = if verbose { "sciqa=debug" } else { "sciqa=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

#[cfg(feature = "parallel")]
fn row_spinner() -> ProgressBar {
    let style = ProgressStyle::with_template("{spinner:.cyan} {pos} rows {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    ProgressBar::new_spinner().with_style(style)
}

fn answer(config: &RunConfig) -> Result<()> {
    let index = open_index(&config.index)
        .with_context(|| format!("cannot open index {}", config.index.display()))?;

    #[cfg(feature = "parallel")]
    let spinner = row_spinner();

    let result = BatchRunner::new(&index, config).and_then(|runner| {
        runner.run_with(|outcome| {
            #[cfg(feature = "parallel")]
            {
                spinner.inc(1);
                if let RowOutcome::Decided(row) = outcome {
                    spinner.set_message(format!("last {}", row.to_csv()));
                }
            }
            #[cfg(not(feature = "parallel"))]
            let _ = outcome;
        })
    });

    #[cfg(feature = "parallel")]
    spinner.finish_and_clear();
    // Released on every path, including a failed run.
    index.close();

    let report = result.with_context(|| format!("run over {} failed", config.input.display()))?;
    display::print_run_summary(config, &report);
    Ok(())
}

fn index(corpus: &Path, output: &Path, keywords: Option<&Path>) -> Result<()> {
    let report = run_index(corpus, output, keywords)
        .with_context(|| format!("cannot build index from {}", corpus.display()))?;
    display::print_build_summary(output, &report);
    Ok(())
}

fn inspect(file: &Path) -> Result<()> {
    let bytes = fs::metadata(file)
        .with_context(|| format!("cannot read {}", file.display()))?
        .len();
    let index = open_index(file).with_context(|| format!("cannot open index {}", file.display()))?;
    display::print_inspect(file, bytes, &index);
    index.close();
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Answer(args) => answer(&args.into()),
        Commands::Index {
            corpus,
            output,
            keywords,
        } => index(&corpus, &output, keywords.as_deref()),
        Commands::Inspect { file } => inspect(&file),
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("❌ {:#}", e);
        std::process::exit(1);
    }
}
