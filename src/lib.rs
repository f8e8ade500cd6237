//! ProfileDupe - duplicate identity detection for social-media profile data
//!
//! Synthesizes profile datasets with injected duplicate identities, persists
//! them as CSV, and re-derives the duplicated identities from a CSV file for
//! review or export. Identity is the exact `(Name, Username, Email)` triple.

pub mod cli;
pub mod config;
pub mod duplicates;
pub mod error;
pub mod generator;
pub mod logging;
pub mod output;
pub mod profile;
pub mod source;

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::cli::{Cli, Commands, DetectArgs, GenerateArgs, OutputFormat};
use crate::config::Config;
use crate::duplicates::{find_duplicates_with, GroupingStats, IdentityGroup};
use crate::error::ExitCode;
use crate::generator::ProfileGenerator;
use crate::output::{write_dataset, CsvOutput, JsonOutput};
use crate::profile::ProfileDataset;

/// Run the application for parsed CLI arguments.
///
/// # Errors
///
/// Returns an error when the input cannot be read, a record lacks an
/// identity field, or a report/dataset cannot be written. Finding no
/// duplicates is not an error; it yields [`ExitCode::NoDuplicates`].
pub fn run_app(cli: Cli) -> Result<ExitCode> {
    logging::init_logging(cli.verbose, cli.quiet);

    let mut config = Config::load(cli.config.as_deref());
    match &cli.command {
        Commands::Generate(args) => {
            config.merge_generate_args(args);
            run_generate(&config, args)
        }
        Commands::Detect(args) => {
            config.merge_detect_args(args);
            run_detect(&config, args)
        }
    }
}

/// Path a platform's dataset is written to.
#[must_use]
pub fn dataset_path(output_dir: &Path, platform: &str) -> PathBuf {
    output_dir.join(format!("{platform}_profiles.csv"))
}

fn run_generate(config: &Config, args: &GenerateArgs) -> Result<ExitCode> {
    fs::create_dir_all(&config.output_dir).with_context(|| {
        format!(
            "Failed to create output directory: {}",
            config.output_dir.display()
        )
    })?;

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    for platform in &config.platforms {
        let dataset = ProfileGenerator::new(platform.as_str())
            .with_unique(config.unique_profiles)
            .with_duplicates(config.duplicate_profiles)
            .generate(&mut rng);

        let path = dataset_path(&config.output_dir, platform);
        let file = File::create(&path)
            .with_context(|| format!("Failed to create dataset file: {}", path.display()))?;
        write_dataset(&dataset, BufWriter::new(file))
            .with_context(|| format!("Failed to write dataset: {}", path.display()))?;

        log::info!(
            "Exported {} {} profiles to {}",
            dataset.len(),
            platform,
            path.display()
        );
    }

    Ok(ExitCode::Success)
}

fn run_detect(config: &Config, args: &DetectArgs) -> Result<ExitCode> {
    let ProfileDataset { columns, records } = source::load_profiles(&args.input)
        .with_context(|| format!("Failed to load profiles from {}", args.input.display()))?;

    let (groups, stats) = find_duplicates_with(records, config.shard_size)
        .with_context(|| format!("Failed to group profiles from {}", args.input.display()))?;

    let exit_code = if groups.is_empty() {
        log::warn!(
            "No duplicate identities found among {} profile(s)",
            stats.total_records
        );
        ExitCode::NoDuplicates
    } else {
        ExitCode::Success
    };

    let mut report = Vec::new();
    write_report(config, &columns, &groups, &stats, exit_code, &mut report)?;

    match &args.output {
        Some(path) => {
            fs::write(path, &report)
                .with_context(|| format!("Failed to write report: {}", path.display()))?;
            log::info!(
                "Exported {} duplicate group(s) to {}",
                groups.len(),
                path.display()
            );
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(&report)?;
            stdout.flush()?;
        }
    }

    Ok(exit_code)
}

fn write_report<W: Write>(
    config: &Config,
    columns: &[String],
    groups: &[IdentityGroup],
    stats: &GroupingStats,
    exit_code: ExitCode,
    writer: &mut W,
) -> Result<()> {
    match config.format {
        OutputFormat::Csv => CsvOutput::new(columns, groups)
            .with_group_ids(config.group_ids)
            .require_non_empty(config.require_duplicates)
            .write_to(writer)?,
        OutputFormat::Json => JsonOutput::new(groups, stats, exit_code)
            .require_non_empty(config.require_duplicates)
            .write_to(writer, true)?,
    }
    Ok(())
}
