//! Output formatting for vwanctl.
//!
//! Result objects print as pretty JSON in both modes (the shape operators
//! feed back in through `--in-file`); human mode adds colored status lines
//! around them, JSON mode stays machine-clean on stdout.

use colored::Colorize;
use serde::Serialize;

/// Output formatter for the two output modes.
pub struct OutputFormatter {
    /// Use colored output
    use_color: bool,
    /// JSON output mode
    json_mode: bool,
    /// Verbosity level
    verbosity: u8,
}

impl OutputFormatter {
    /// Create a new output formatter.
    pub fn new(use_color: bool, json_mode: bool, verbosity: u8) -> Self {
        // Respect the NO_COLOR convention.
        let use_color = use_color && std::env::var("NO_COLOR").is_err();
        Self {
            use_color,
            json_mode,
            verbosity,
        }
    }

    /// Print an informational line (stderr, suppressed in JSON mode).
    pub fn info(&self, message: &str) {
        if self.json_mode {
            return;
        }
        if self.use_color {
            eprintln!("{}", message.green());
        } else {
            eprintln!("{}", message);
        }
    }

    /// Print a warning line (stderr).
    pub fn warning(&self, message: &str) {
        if self.json_mode {
            return;
        }
        if self.use_color {
            eprintln!("{} {}", "warning:".yellow().bold(), message);
        } else {
            eprintln!("warning: {}", message);
        }
    }

    /// Print an error line (stderr, shown in every mode).
    pub fn error(&self, message: &str) {
        if self.use_color {
            eprintln!("{} {}", "error:".red().bold(), message);
        } else {
            eprintln!("error: {}", message);
        }
    }

    /// Print a debug line when verbose enough.
    #[allow(dead_code)]
    pub fn debug(&self, message: &str) {
        if self.verbosity >= 2 && !self.json_mode {
            eprintln!("{}", message.dimmed());
        }
    }

    /// Write a result object to stdout.
    pub fn result<T: Serialize>(&self, value: &T) -> serde_json::Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }

    /// Write a deletion result (`true`) to stdout.
    pub fn result_bool(&self, value: bool) {
        println!("{}", value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_serializes() {
        let formatter = OutputFormatter::new(false, true, 0);
        assert!(formatter.result(&serde_json::json!({"name": "hub1"})).is_ok());
    }
}
