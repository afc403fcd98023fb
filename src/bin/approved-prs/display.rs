use std::io::Write;

use anyhow::Result;
use approved_prs::ReportEntry;
use chrono::{DateTime, Local, Utc};

pub const EMPTY_REPORT: &str = "No open PRs found that are approved but not merged.";

const REPORT_TITLE: &str = "Open PRs approved but not merged";

fn format_relative_time(time: DateTime<Utc>) -> String {
    use chrono_humanize::HumanTime;
    HumanTime::from(time).to_string()
}

fn format_timestamp(time: DateTime<Utc>) -> String {
    format!(
        "{} ({})",
        time.with_timezone(&Local).format("%a %b %e %Y %H:%M:%S %Z"),
        format_relative_time(time)
    )
}

fn write_entry<W: Write>(index: usize, entry: &ReportEntry, writer: &mut W) -> Result<()> {
    writeln!(writer, "{}. {}", index + 1, entry.title)?;
    writeln!(writer, "   Repository: {}", entry.repo_full_name)?;
    writeln!(writer, "   PR: {}", entry.reference())?;
    writeln!(writer, "   URL: {}", entry.url)?;
    writeln!(writer, "   Approvals: {}", entry.approvals)?;
    writeln!(writer, "   Created: {}", format_timestamp(entry.created_at))?;
    writeln!(writer, "   Updated: {}", format_timestamp(entry.updated_at))?;
    Ok(())
}

pub fn display_report<W: Write>(entries: &[ReportEntry], writer: &mut W) -> Result<()> {
    if entries.is_empty() {
        writeln!(writer, "{EMPTY_REPORT}")?;
        return Ok(());
    }

    writeln!(writer, "{REPORT_TITLE}")?;
    writeln!(writer, "{}", "=".repeat(REPORT_TITLE.len()))?;
    writeln!(writer, "Found {} PR(s):", entries.len())?;

    for (index, entry) in entries.iter().enumerate() {
        writeln!(writer)?;
        write_entry(index, entry, writer)?;
    }

    Ok(())
}
