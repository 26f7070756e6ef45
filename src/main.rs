//! Command-line interface for tola-textdiff.
//!
//! Compares two `.txt`/`.docx` files and writes a side-by-side HTML report.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use tola_textdiff::{AlignAlgorithm, AlignConfig, DiffOptions, DiffRequest, RenderConfig, ReportConfig};

/// tola-textdiff - Compare two documents token by token
#[derive(Parser)]
#[command(name = "tola-textdiff")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Original document (.txt or .docx)
    #[arg(value_name = "FILE_A")]
    file_a: PathBuf,

    /// Revised document (.txt or .docx)
    #[arg(value_name = "FILE_B")]
    file_b: PathBuf,

    /// Where to write the report
    #[arg(short, long, value_name = "PATH", default_value = "diff_report.html")]
    output: PathBuf,

    /// Matching algorithm
    #[arg(long, value_enum, default_value_t = Algorithm::Myers)]
    algorithm: Algorithm,

    /// Give up on alignment past this many edits and mark the rest as replaced
    #[arg(long, value_name = "N")]
    max_edit_distance: Option<usize>,

    /// Merge consecutive changed tokens into a single span
    #[arg(long)]
    coalesce: bool,

    /// Report title
    #[arg(long, value_name = "TEXT")]
    title: Option<String>,

    /// Print token counts and similarity in the report
    #[arg(long)]
    summary: bool,

    /// Open the report in the default browser when done
    #[arg(long)]
    open: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, ValueEnum)]
enum Algorithm {
    /// Myers O(ND) shortest edit script
    Myers,
    /// Dynamic-programming longest common subsequence
    Lcs,
}

impl From<Algorithm> for AlignAlgorithm {
    fn from(algorithm: Algorithm) -> Self {
        match algorithm {
            Algorithm::Myers => AlignAlgorithm::Myers,
            Algorithm::Lcs => AlignAlgorithm::Lcs,
        }
    }
}

impl Cli {
    fn options(&self) -> DiffOptions {
        let align = AlignConfig::new(self.algorithm.into()).with_max_edit_distance(self.max_edit_distance);
        let render = RenderConfig::default().with_coalesce(self.coalesce);
        let report = match &self.title {
            Some(title) => ReportConfig::default().with_title(title.clone()),
            None => ReportConfig::default(),
        };

        DiffOptions::default()
            .with_align(align)
            .with_render(render)
            .with_report(report)
            .with_summary(self.summary)
    }
}

fn init_tracing(verbose: u8) {
    let fallback = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = if verbose == 0 {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback))
    } else {
        EnvFilter::new(fallback)
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let request = DiffRequest::from_files(&cli.file_a, &cli.file_b).context("failed to load input documents")?;
    let html = request.render_report(&cli.options());

    std::fs::write(&cli.output, html)
        .with_context(|| format!("failed to write report to {}", cli.output.display()))?;
    println!("Report written to {}", cli.output.display());

    if cli.open {
        if let Err(e) = open::that(&cli.output) {
            tracing::warn!(path = %cli.output.display(), error = %e, "could not open report");
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
