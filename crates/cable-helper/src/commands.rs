//! Subcommand implementations.

use std::path::Path;
use std::time::{Duration, Instant};

use cable_export::{SvgMetadata, to_svg};
use cable_merge::diagnostics::{Clock, MergeDiagnostics, reconstruct_with_diagnostics};
use cable_merge::{CableDocument, MergeConfig, MergeOutcome, Point, convert};
use tracing::{debug, info, warn};

use crate::cli::Command;
use crate::error::HelperError;
use crate::io::{read_json, write_json, write_text};

/// Wall-clock [`Clock`] backed by `std::time::Instant`.
struct StdClock;

impl Clock for StdClock {
    type Instant = Instant;

    fn now(&self) -> Instant {
        Instant::now()
    }

    fn elapsed(&self, since: &Instant) -> Duration {
        since.elapsed()
    }
}

/// How merge diagnostics are reported on stdout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatsFormat {
    None,
    Report,
    Json,
}

impl StatsFormat {
    const fn from_flags(stats: bool, json: bool) -> Self {
        match (stats, json) {
            (_, true) => Self::Json,
            (true, false) => Self::Report,
            (false, false) => Self::None,
        }
    }
}

/// Dispatch a parsed subcommand.
///
/// # Errors
///
/// Returns the first [`HelperError`] the subcommand hits.
pub fn run(command: &Command) -> Result<(), HelperError> {
    match command {
        Command::Convert {
            input,
            output,
            cable_id,
            cable_name,
            svg,
        } => run_convert(input, output, cable_id, cable_name, svg.as_deref()),
        Command::Merge {
            input,
            output,
            config,
            stats,
            json,
            svg,
        } => {
            let config = config.to_config()?;
            run_merge(
                input,
                output,
                &config,
                StatsFormat::from_flags(*stats, *json),
                svg.as_deref(),
            )
        }
    }
}

/// Read raw coordinate lists from `input` and write a cable document to
/// `output`.
///
/// # Errors
///
/// Returns [`HelperError`] if the input cannot be read or parsed, or an
/// output cannot be written.
pub fn run_convert(
    input: &Path,
    output: &Path,
    cable_id: &str,
    cable_name: &str,
    svg: Option<&Path>,
) -> Result<(), HelperError> {
    let raw: Vec<Vec<Point>> = read_json(input)?;
    debug!(path = %input.display(), lists = raw.len(), "read raw coordinates");

    let empty = raw.iter().filter(|points| points.is_empty()).count();
    if empty > 0 {
        warn!(
            empty,
            "input has empty coordinate lists; merging this cable will fail"
        );
    }

    let cable = convert(raw, cable_id, cable_name);
    write_json(output, &cable)?;

    if let Some(svg_path) = svg {
        let description = format!("Converted from {}", input.display());
        write_preview(svg_path, &cable, &description)?;
    }

    info!(
        segments = cable.segment_count(),
        output = %output.display(),
        "converted {} segments",
        cable.segment_count()
    );
    Ok(())
}

/// Merge the segments of the cable document at `input` and write the
/// result to `output`.
///
/// A document with no segments is logged and skipped: nothing is
/// written and the run still succeeds.
///
/// # Errors
///
/// Returns [`HelperError`] if the input cannot be read or parsed, a
/// segment is malformed, or an output cannot be written.
pub fn run_merge(
    input: &Path,
    output: &Path,
    config: &MergeConfig,
    stats: StatsFormat,
    svg: Option<&Path>,
) -> Result<(), HelperError> {
    let cable: CableDocument = read_json(input)?;
    debug!(
        path = %input.display(),
        cable = %cable.id,
        segments = cable.segment_count(),
        points = cable.point_count(),
        "read cable document"
    );

    let (outcome, diagnostics) =
        reconstruct_with_diagnostics(&cable.segments, &cable.id, config, &StdClock)?;
    print_stats(&diagnostics, stats)?;

    let MergeOutcome::Merged(result) = outcome else {
        info!(path = %input.display(), "no segments found to merge");
        return Ok(());
    };

    let merged = cable.with_segments(result.segments);
    write_json(output, &merged)?;

    if let Some(svg_path) = svg {
        let description = format!(
            "{} segments merged into {}",
            diagnostics.input_segment_count, diagnostics.output_path_count,
        );
        write_preview(svg_path, &merged, &description)?;
    }

    info!(
        joins = result.join_count,
        passes = result.pass_count,
        output = %output.display(),
        "merged into {} segments",
        merged.segment_count()
    );
    Ok(())
}

fn print_stats(diagnostics: &MergeDiagnostics, format: StatsFormat) -> Result<(), HelperError> {
    match format {
        StatsFormat::None => {}
        StatsFormat::Report => println!("{}", diagnostics.report()),
        StatsFormat::Json => println!("{}", serde_json::to_string_pretty(diagnostics)?),
    }
    Ok(())
}

fn write_preview(path: &Path, cable: &CableDocument, description: &str) -> Result<(), HelperError> {
    let metadata = SvgMetadata {
        title: Some(cable.name.as_str()),
        description: Some(description),
    };
    write_text(path, &to_svg(cable, &metadata))?;
    debug!(path = %path.display(), "wrote svg preview");
    Ok(())
}
