//! Edge-loading analysis driver.
//!
//! # Commands
//!
//! - `edgeload run <SETTINGS>` - Run every case of one settings file
//! - `edgeload manual <DIR>` - Run every `Settings_*`/`Joblist_*` pair in a directory
//!
//! Relative paths inside a settings file are resolved against the
//! directory holding it. `RUST_LOG` overrides the log level.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use edgeload::io::{find_manual_runs, read_geometry, read_job_list, read_settings};
use edgeload::{
    archive_parameter_files, run_cases, save_summary, CaseConfig, EdgeLoadError, RunSettings,
};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Edge-loading contact analysis of hip liners
#[derive(Parser)]
#[command(name = "edgeload")]
#[command(about = "Edge-loading contact analysis of hip liners", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run every case of a settings file
    Run {
        /// Settings file (`CaseName`, `JobFile`, `CupGeomFile`, ...)
        #[arg(name = "SETTINGS")]
        settings: PathBuf,

        #[command(flatten)]
        options: RunOptions,
    },

    /// Run every settings/job list pair found in a directory
    Manual {
        /// Directory holding `Settings_<name>` and `Joblist_<name>` files
        #[arg(name = "DIR")]
        dir: PathBuf,

        #[command(flatten)]
        options: RunOptions,
    },
}

#[derive(Args, Clone)]
struct RunOptions {
    /// Root directory for results
    #[arg(short, long, default_value = "output")]
    output: PathBuf,

    /// Worker threads (defaults to one per core)
    #[arg(short, long)]
    jobs: Option<usize>,

    /// Per-case contact search budget in seconds
    #[arg(long)]
    deadline: Option<f64>,

    /// Also write the run summary as JSON
    #[arg(long)]
    json: bool,

    /// Directory searched for a replacement when an activity file is malformed
    #[arg(long)]
    activity_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    match cli.command {
        Commands::Run { settings, options } => {
            configure_pool(&options)?;
            run_settings(&settings, None, &options)
        }
        Commands::Manual { dir, options } => {
            configure_pool(&options)?;
            let runs = find_manual_runs(&dir)?;
            if runs.is_empty() {
                bail!("no {}* files in {}", edgeload::io::SETTINGS_PREFIX, dir.display());
            }
            let mut failed = 0;
            for run in &runs {
                if let Err(e) = run_settings(&run.settings, Some(&run.job_list), &options) {
                    error!(settings = %run.settings.display(), "{e:#}");
                    failed += 1;
                }
            }
            if failed > 0 {
                bail!("{failed} of {} runs failed", runs.len());
            }
            Ok(())
        }
    }
}

fn configure_pool(options: &RunOptions) -> Result<()> {
    if let Some(jobs) = options.jobs {
        rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build_global()
            .context("failed to configure worker threads")?;
    }
    Ok(())
}

/// Run one settings file. `job_list` overrides the settings' `JobFile`.
fn run_settings(settings_path: &Path, job_list: Option<&Path>, options: &RunOptions) -> Result<()> {
    let base = settings_path.parent().unwrap_or_else(|| Path::new(""));
    let mut settings = read_settings(settings_path)
        .with_context(|| format!("reading {}", settings_path.display()))?;
    settings.geometry_file = base.join(&settings.geometry_file);
    settings.job_file = job_list.map_or_else(|| base.join(&settings.job_file), Path::to_path_buf);

    let deadline = options
        .deadline
        .map(Duration::try_from_secs_f64)
        .transpose()
        .context("invalid deadline")?;
    let run = RunSettings::from_settings(&settings, &options.output).with_deadline(deadline);

    let geometry = read_geometry(&settings.geometry_file)?;
    let jobs = read_job_list(&settings.job_file)?;
    if jobs.is_empty() {
        return Err(EdgeLoadError::NoCases.into());
    }
    let configs = jobs
        .iter()
        .enumerate()
        .map(|(i, job)| CaseConfig::from_job(i + 1, job, &run, geometry.default_head_radius))
        .collect::<Result<Vec<_>, _>>()?;

    archive_parameter_files(&run.case_dir(), &[settings_path, settings.job_file.as_path()])?;

    let activity_dir = options.activity_dir.clone();
    let replacement = move |bad: &Path| {
        let candidate = activity_dir.as_ref()?.join(bad.file_name()?);
        candidate.is_file().then_some(candidate)
    };
    let outcomes = run_cases(&geometry.cloud, &configs, &run, replacement);

    let mut summaries = Vec::new();
    let mut failed = 0;
    for (config, outcome) in configs.iter().zip(&outcomes) {
        match outcome {
            Ok(outcome) => {
                if let Some(summary) = outcome.summary() {
                    summaries.push(summary);
                } else {
                    warn!(case = %config.label, "Case produced no timed contacts");
                }
            }
            Err(e) => {
                error!(case = %config.label, index = config.index, "{e}");
                failed += 1;
            }
        }
    }

    let written = save_summary(&run.case_dir(), &run.case_name, &summaries, options.json)?;
    info!(
        cases = configs.len(),
        failed,
        summary = %written.first().map(|p| p.display().to_string()).unwrap_or_default(),
        "Run complete"
    );
    if failed > 0 {
        bail!("{failed} of {} cases failed", configs.len());
    }
    Ok(())
}
