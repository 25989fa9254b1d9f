//! Density command: heading-aware keyword density.

use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, instrument};

use seo_lint_core::checks::density::{density_excluding_headings, heading_density};
use seo_lint_core::config::{DensityProfile, Thresholds};
use seo_lint_core::DensityMeasurement;

/// Arguments for the `density` subcommand.
#[derive(Args, Debug)]
pub struct DensityArgs {
    /// HTML file to measure (`-` for stdin; `.txt` files are read as plain text).
    pub file: Utf8PathBuf,

    /// Keyword to measure.
    #[arg(short, long)]
    pub keyword: String,

    /// Density profile (overrides config).
    #[arg(long, value_enum)]
    pub profile: Option<DensityProfile>,

    /// Include a per-heading breakdown and a sample of the body text.
    #[arg(long)]
    pub details: bool,
}

/// Body and heading measurements for one keyword.
#[derive(Debug, Serialize)]
pub struct DensityReport {
    /// The keyword as given.
    pub keyword: String,
    /// Density over the body with headings removed.
    pub body: DensityMeasurement,
    /// Density and stuffing inside headings.
    pub headings: DensityMeasurement,
}

impl DensityReport {
    /// Measure `keyword` in `html`.
    pub fn measure(html: &str, keyword: &str, thresholds: &Thresholds, details: bool) -> Self {
        Self {
            keyword: keyword.to_string(),
            body: density_excluding_headings(html, keyword, thresholds, details),
            headings: heading_density(html, keyword, thresholds, details),
        }
    }
}

/// Print body and heading density for a keyword.
#[instrument(name = "cmd_density", skip_all, fields(file = %args.file))]
pub fn cmd_density(
    args: DensityArgs,
    global_json: bool,
    config_thresholds: &Thresholds,
    max_input: Option<usize>,
) -> anyhow::Result<()> {
    debug!(file = %args.file, keyword = %args.keyword, details = args.details, "executing density command");

    if args.keyword.trim().is_empty() {
        anyhow::bail!("--keyword must not be empty");
    }
    let content = super::read_input_file(&args.file, max_input)?;
    let thresholds = super::effective_thresholds(config_thresholds, args.profile);
    let html = super::html_source(&args.file, &content);
    let report = DensityReport::measure(&html, &args.keyword, &thresholds, args.details);

    if global_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{}", args.file.bold());
    print_measurement("Body (excluding headings)", &report.body);
    print_measurement("Headings", &report.headings);

    if let Some(coverage) = &report.headings.headings {
        println!(
            "    {} of {} headings contain the keyword ({:.1}%)",
            coverage.headings_with_keyword,
            coverage.heading_count,
            coverage.headings_with_keyword_percent
        );
        for heading in coverage.details.iter().flatten() {
            println!(
                "      {} {}",
                format!("{:>5.1}%", heading.density).dimmed(),
                heading.heading
            );
        }
    }
    Ok(())
}

fn print_measurement(label: &str, measurement: &DensityMeasurement) {
    let verdict = if measurement.stuffing {
        measurement.message.red().to_string()
    } else if measurement.message == "OK" {
        measurement.message.green().to_string()
    } else {
        measurement.message.yellow().to_string()
    };
    println!("\n  {}", label.bold().underline());
    println!(
        "    {:.2}% ({} of {} words)  {}",
        measurement.density, measurement.occurrences, measurement.words, verdict
    );
}
