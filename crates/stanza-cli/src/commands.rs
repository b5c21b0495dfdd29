//! Pipeline command handlers.
//!
//! Each handler takes the pipeline and an output writer, so the binary can
//! print to stdout and tests can capture into a buffer.

use std::io::Write;

use stanza_client::{DiscoverySource, Pipeline, RunSummary};
use stanza_content::{CollectionStats, ContentRecord, Issue, ValidationReport, validate};

use crate::Result;

// ============================================================================
// load
// ============================================================================

/// Run the pipeline and print the records.
pub async fn cmd_load<W: Write>(
    pipeline: &Pipeline,
    limit: Option<usize>,
    json: bool,
    out: &mut W,
) -> Result<()> {
    let report = pipeline.run_report(limit).await;
    if json {
        serde_json::to_writer_pretty(&mut *out, &report.records)?;
        writeln!(out)?;
        return Ok(());
    }

    for record in &report.records {
        writeln!(out, "{}", record_line(record))?;
    }
    writeln!(out, "{}", summary_line(&report.summary))?;
    Ok(())
}

/// One-line text form of a record.
pub fn record_line(record: &ContentRecord) -> String {
    let image = if record.has_asset() {
        record.asset_path()
    } else {
        "-"
    };
    format!(
        "{:>4}  {} by {} [{}/{}/{}] {}",
        record.identity(),
        record.title(),
        record.author(),
        record.language(),
        record.form(),
        record.length(),
        image
    )
}

/// Text form of a pass summary.
pub fn summary_line(summary: &RunSummary) -> String {
    format!(
        "Loaded {} of {} item(s) from {} discovery ({} discovered, {} skipped)",
        summary.loaded, summary.attempted, summary.source, summary.discovered, summary.skipped
    )
}

// ============================================================================
// discover
// ============================================================================

/// Print the discovered locators.
pub async fn cmd_discover<W: Write>(pipeline: &Pipeline, json: bool, out: &mut W) -> Result<()> {
    let discovery = pipeline.discovery().discover_with_source().await;
    if json {
        serde_json::to_writer_pretty(&mut *out, &discovery)?;
        writeln!(out)?;
        return Ok(());
    }

    for locator in &discovery.locators {
        writeln!(out, "{}\t{}", locator.identity(), locator.document())?;
    }
    let source = match discovery.source {
        DiscoverySource::Remote => "listing API",
        DiscoverySource::Fallback => "fallback list",
    };
    writeln!(
        out,
        "{} locator(s) from the {source}",
        discovery.locators.len()
    )?;
    Ok(())
}

// ============================================================================
// validate
// ============================================================================

/// Validate the collection and print each issue. Returns whether it was
/// clean.
pub async fn cmd_validate<W: Write>(
    pipeline: &Pipeline,
    limit: Option<usize>,
    out: &mut W,
) -> Result<bool> {
    let records = pipeline.run(limit).await;
    let report = validate(&records);
    write_validation(&report, out)?;
    Ok(report.is_clean())
}

/// Print a validation report.
pub fn write_validation<W: Write>(report: &ValidationReport, out: &mut W) -> Result<()> {
    for issue in &report.issues {
        let line = match issue {
            Issue::MissingMetadata { identity, fields } => {
                let names: Vec<&str> = fields.iter().map(|f| f.key()).collect();
                format!("{identity}: missing {}", names.join(", "))
            }
            Issue::EmptyBody { identity } => format!("{identity}: empty body"),
            Issue::MissingImage { identity } => format!("{identity}: no image"),
        };
        writeln!(out, "{line}")?;
    }

    if report.is_clean() {
        writeln!(out, "{} record(s), no issues", report.records)?;
    } else {
        writeln!(
            out,
            "{} record(s), {} issue(s)",
            report.records,
            report.issues.len()
        )?;
    }
    Ok(())
}

// ============================================================================
// stats
// ============================================================================

/// Print collection statistics.
pub async fn cmd_stats<W: Write>(pipeline: &Pipeline, json: bool, out: &mut W) -> Result<()> {
    let records = pipeline.run(None).await;
    let stats = CollectionStats::from_records(&records);
    if json {
        serde_json::to_writer_pretty(&mut *out, &stats)?;
        writeln!(out)?;
        return Ok(());
    }
    write_stats(&stats, out)
}

/// Print statistics as text.
pub fn write_stats<W: Write>(stats: &CollectionStats, out: &mut W) -> Result<()> {
    writeln!(out, "Poems: {}", stats.total)?;
    writeln!(
        out,
        "With images: {} ({:.1}%)",
        stats.with_images,
        stats.image_coverage()
    )?;

    let sections = [
        ("Languages", &stats.by_language),
        ("Forms", &stats.by_form),
        ("Lengths", &stats.by_length),
        ("Authors", &stats.by_author),
    ];
    for (title, counts) in sections {
        if counts.is_empty() {
            continue;
        }
        writeln!(out, "\n{title}:")?;
        for (name, count) in counts {
            writeln!(out, "  {name}: {count}")?;
        }
    }
    Ok(())
}
