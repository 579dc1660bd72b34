//! Terminal output formatting.
//!
//! Provides consistent formatting for operator-facing output: colored
//! status lines with Unicode symbols, verbosity gating, and
//! human-readable sizes. Warnings and errors always reach stderr, even
//! in quiet mode, so shell pipelines never swallow them.

use owo_colors::{OwoColorize, Stream};

/// Status line symbols.
pub mod symbols {
    pub const SUCCESS: &str = "✓";
    pub const ERROR: &str = "✗";
    pub const WARNING: &str = "⚠";
    pub const INFO: &str = "•";
    pub const ARROW: &str = "→";
}

/// Manages terminal output according to the verbosity flags.
#[derive(Debug, Clone, Copy)]
pub struct OutputManager {
    verbose: bool,
    quiet: bool,
}

impl OutputManager {
    /// Creates a new output manager.
    ///
    /// # Arguments
    ///
    /// * `verbose` - Also print diagnostic detail
    /// * `quiet` - Suppress everything except warnings and errors
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self { verbose, quiet }
    }

    /// Prints an informational message.
    pub fn info(&self, message: &str) {
        if self.quiet {
            return;
        }
        println!(
            "{} {}",
            symbols::INFO.if_supports_color(Stream::Stdout, |s| s.blue()),
            message
        );
    }

    /// Prints a diagnostic message, only in verbose mode.
    pub fn verbose(&self, message: &str) {
        if !self.verbose || self.quiet {
            return;
        }
        println!(
            "  {}",
            message.if_supports_color(Stream::Stdout, |s| s.dimmed())
        );
    }

    /// Prints a progress message for a step that is starting.
    pub fn progress(&self, message: &str) {
        if self.quiet {
            return;
        }
        println!(
            "{} {}",
            symbols::ARROW.if_supports_color(Stream::Stdout, |s| s.cyan()),
            message
        );
    }

    /// Prints a success message.
    pub fn success(&self, message: &str) {
        if self.quiet {
            return;
        }
        println!(
            "{} {}",
            symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green()),
            message
        );
    }

    /// Prints a warning to stderr. Not gated by quiet mode.
    pub fn warn(&self, message: &str) {
        eprintln!(
            "{} {}",
            symbols::WARNING.if_supports_color(Stream::Stderr, |s| s.yellow()),
            message.if_supports_color(Stream::Stderr, |s| s.yellow())
        );
    }

    /// Prints an error to stderr. Not gated by quiet mode.
    #[allow(dead_code)] // Public API - preserved for external consumers
    pub fn error(&self, message: &str) {
        eprintln!(
            "{} {}",
            symbols::ERROR.if_supports_color(Stream::Stderr, |s| s.red()),
            message.if_supports_color(Stream::Stderr, |s| s.red())
        );
    }

    /// Prints a section header.
    pub fn section(&self, title: &str) {
        if self.quiet {
            return;
        }
        println!();
        println!("{}", title.if_supports_color(Stream::Stdout, |s| s.bold()));
    }

    /// Prints an indented detail line.
    pub fn indent(&self, message: &str) {
        if self.quiet {
            return;
        }
        println!("  {message}");
    }
}

/// Shortens a hex hash for display.
pub fn truncate_hash(hash: &str) -> &str {
    let len = hash.len().min(12);
    &hash[..len]
}

/// Formats a byte count for humans.
pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_hash() {
        assert_eq!(truncate_hash("abcdef123456789"), "abcdef123456");
        assert_eq!(truncate_hash("short"), "short");
        assert_eq!(truncate_hash(""), "");
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(500), "500 B");
        assert_eq!(format_bytes(1024), "1.0 KB");
        assert_eq!(format_bytes(1536), "1.5 KB");
        assert_eq!(format_bytes(1048576), "1.0 MB");
        assert_eq!(format_bytes(1073741824), "1.0 GB");
    }
}
