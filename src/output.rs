//! CLI output formatting for the end-of-run summary.
//!
//! Progress lines go through the [`Logger`](crate::logger::Logger) while the
//! run is in flight and only appear with `--verbose`. The summary printed
//! here always appears:
//!
//! ```text
//! Processed 3 files in /music/Amon Amarth
//!     Rewritten: 2
//!     Failed: 1
//!     Pictures resized: 4
//!
//! Failed files
//! 001 /music/Amon Amarth/03-intro.mp3
//!     File does not have an ID3v2 tag. No cover available.
//! ```
//!
//! [`format_batch_summary`] is pure and returns lines; [`print_batch_summary`]
//! writes them to stdout.

use crate::batch::BatchReport;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn plural(count: usize, word: &str) -> String {
    if count == 1 {
        format!("{count} {word}")
    } else {
        format!("{count} {word}s")
    }
}

pub fn format_batch_summary(report: &BatchReport) -> Vec<String> {
    let mut lines = vec![format!(
        "Processed {} in {}",
        plural(report.files.len(), "file"),
        report.root.display()
    )];

    if report.files.is_empty() {
        return lines;
    }

    let failed: Vec<_> = report.failed_files().collect();
    lines.push(format!("{}Rewritten: {}", indent(1), report.rewritten_count()));
    lines.push(format!("{}Failed: {}", indent(1), failed.len()));

    let pictures_failed = report.pictures_failed();
    if pictures_failed > 0 {
        lines.push(format!(
            "{}Pictures resized: {} ({} left unchanged)",
            indent(1),
            report.pictures_resized(),
            pictures_failed
        ));
    } else {
        lines.push(format!(
            "{}Pictures resized: {}",
            indent(1),
            report.pictures_resized()
        ));
    }

    if !failed.is_empty() {
        lines.push(String::new());
        lines.push("Failed files".to_string());
        for (i, file) in failed.iter().enumerate() {
            lines.push(format!("{} {}", format_index(i + 1), file.path.display()));
            if let Err(e) = &file.result {
                lines.push(format!("{}{e}", indent(1)));
            }
        }
    }

    lines
}

pub fn print_batch_summary(report: &BatchReport) {
    for line in format_batch_summary(report) {
        println!("{}", line);
    }
}
