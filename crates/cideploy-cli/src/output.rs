//! Formatted output helpers for CLI commands.

use std::fmt::Write;
use std::time::Duration;

use cideploy_common::types::ParameterEntry;

pub const BOLD: &str = "\x1b[1m";
pub const DIM: &str = "\x1b[2m";
pub const GREEN: &str = "\x1b[32m";
pub const RESET: &str = "\x1b[0m";

/// Formats an elapsed duration as seconds with one decimal (e.g., "1.5s").
#[must_use]
pub fn format_elapsed(elapsed: Duration) -> String {
    format!("{:.1}s", elapsed.as_secs_f64())
}

/// Renders resolved parameters as an aligned `key = value` listing.
#[must_use]
pub fn format_parameters(entries: &[ParameterEntry]) -> String {
    let width = entries.iter().map(|e| e.key.len()).max().unwrap_or(0);
    let mut out = String::new();
    for entry in entries {
        let record = entry.to_record();
        let _ = writeln!(out, "    {:<width$} = {}", record.key, record.value);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_elapsed_rounds_to_tenths() {
        assert_eq!(format_elapsed(Duration::from_millis(1540)), "1.5s");
        assert_eq!(format_elapsed(Duration::ZERO), "0.0s");
    }

    #[test]
    fn format_parameters_aligns_keys() {
        let entries = vec![
            ParameterEntry::new("A", "raw").resolved("1".into()),
            ParameterEntry::new("Longer", "raw").resolved("2".into()),
        ];
        assert_eq!(
            format_parameters(&entries),
            "    A      = 1\n    Longer = 2\n"
        );
    }

    #[test]
    fn format_parameters_empty() {
        assert_eq!(format_parameters(&[]), "");
    }
}
