//! Human-readable output for stdout. Logs go to stderr separately.

use tinyaudio_core::{format_bytes, preset, BatchSummary, JobResult, JobStatus, Preset};

pub const RULE_WIDTH: usize = 70;

/// The `--list-presets` listing.
pub fn preset_listing(default: &str) -> String {
    let mut out = String::from("Available presets:\n");
    for p in preset::all() {
        let marker = if p.name == default { " (default)" } else { "" };
        out.push_str(&format!("\n  {}{}\n", p.name, marker));
        out.push_str(&format!("    {}\n", p.description));
        out.push_str(&format!(
            "    Codec: {}, Bitrate: {}kbps\n",
            p.codec,
            p.bitrate_bps / 1000
        ));
        out.push_str(&format!(
            "    Sample rate: {}Hz, Channels: {}\n",
            p.sample_rate_hz, p.channels
        ));
    }
    out
}

pub fn header(file_count: usize, preset: &Preset, dry_run: bool) -> String {
    let mode = if dry_run { " (dry run)" } else { "" };
    format!(
        "\nCompressing {} audio file(s){}\nPreset: {} - {}\n{}\n",
        file_count,
        mode,
        preset.name,
        preset.description,
        "-".repeat(RULE_WIDTH)
    )
}

/// Lines describing one finished job.
pub fn job_lines(result: &JobResult) -> Vec<String> {
    let input = result.input_path.display();

    if let JobStatus::Failed { kind, reason } = &result.status {
        return vec![format!("✗ {}", input), format!("  Error ({}): {}", kind, reason)];
    }

    let mut lines = vec![format!("✓ {}", input)];
    if let (Some(original), Some(estimated), Some(bps)) = (
        result.original_size_bytes,
        result.estimated_size_bytes,
        result.bitrate_bps,
    ) {
        lines.push(format!(
            "  {} → ~{} ({:.1}% smaller, {}kbps {})",
            format_bytes(original),
            format_bytes(estimated),
            result.estimated_reduction_percent().unwrap_or(0.0),
            bps / 1000,
            result.codec
        ));
    }

    match &result.status {
        JobStatus::Skipped { reason } => lines.push(format!("  Skipped: {}", reason)),
        _ => {
            if let (Some(actual), Some(percent)) =
                (result.actual_size_bytes, result.actual_reduction_percent())
            {
                let change = if percent < 0.0 {
                    format!("{:.1}% larger", -percent)
                } else {
                    format!("{:.1}% smaller", percent)
                };
                lines.push(format!("  Actual: {} ({})", format_bytes(actual), change));
            }
            lines.push(format!("  → {}", result.output_path.display()));
        }
    }
    lines
}

pub fn footer(summary: &BatchSummary) -> String {
    format!(
        "{}\nCompleted: {} successful, {} failed",
        "-".repeat(RULE_WIDTH),
        summary.succeeded(),
        summary.failed()
    )
}
