//! Terminal output for consolidation runs and shelf listings.
//!
//! Informational lines go to stdout and are silenced by `--quiet`; warnings
//! and errors go to stderr so `--json` output stays parseable.
//!
//! # Examples
//!
//! ```
//! use bookshelf::output::formatter::OutputFormatter;
//!
//! let formatter = OutputFormatter::new(false, false);
//! formatter.info("Scanning downloads...");
//! formatter.table(&[
//!     vec!["Rust in Action".to_string(), "4.2 MB".to_string()],
//!     vec!["Go".to_string(), "812.0 KB".to_string()],
//! ]);
//! ```

use std::io::{self, IsTerminal};

use crate::config::{ConsolidateConfig, ListConfig};

const RESET: &str = "\x1b[0m";
const COLUMN_SEPARATOR: &str = " │ ";

/// Kind of message, deciding prefix, colour, stream and visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    /// Progress and summaries.
    Info,
    /// A finished book or run.
    Success,
    /// Skipped files, naming conflicts.
    Warning,
    /// Failures.
    Error,
    /// Decisions shown with `--verbose`.
    Debug,
}

impl MessageLevel {
    fn prefix(self) -> &'static str {
        match self {
            Self::Info => "",
            Self::Success => "✓ ",
            Self::Warning => "⚠ ",
            Self::Error => "✗ ",
            Self::Debug => "→ ",
        }
    }

    fn color(self) -> Option<&'static str> {
        match self {
            Self::Info => None,
            Self::Success => Some("\x1b[32m"),
            Self::Warning => Some("\x1b[33m"),
            Self::Error => Some("\x1b[31m"),
            Self::Debug => Some("\x1b[36m"),
        }
    }

    fn to_stderr(self) -> bool {
        matches!(self, Self::Warning | Self::Error)
    }
}

/// Writes user-facing messages according to the chosen verbosity.
#[derive(Debug, Clone)]
pub struct OutputFormatter {
    quiet: bool,
    verbose: bool,
    colored: bool,
}

impl OutputFormatter {
    /// Create a formatter. Colour is used on a terminal unless `NO_COLOR`
    /// is set.
    pub fn new(quiet: bool, verbose: bool) -> Self {
        Self {
            quiet,
            verbose,
            colored: io::stdout().is_terminal()
                && std::env::var_os("TERM").is_some()
                && std::env::var_os("NO_COLOR").is_none(),
        }
    }

    /// Formatter for a consolidation run.
    pub fn from_config(config: &ConsolidateConfig) -> Self {
        Self::new(config.quiet, config.verbose)
    }

    /// Formatter for a shelf listing.
    pub fn from_list_config(config: &ListConfig) -> Self {
        Self::new(config.quiet, config.verbose)
    }

    /// Only warnings and errors.
    pub fn quiet() -> Self {
        Self::new(true, false)
    }

    /// Everything, including decisions.
    pub fn verbose() -> Self {
        Self::new(false, true)
    }

    /// Whether a message of `level` is shown.
    pub fn shows(&self, level: MessageLevel) -> bool {
        match level {
            MessageLevel::Info | MessageLevel::Success => !self.quiet,
            MessageLevel::Debug => self.verbose,
            MessageLevel::Warning | MessageLevel::Error => true,
        }
    }

    /// The line printed for `message`, with prefix and colour applied.
    pub fn render(&self, level: MessageLevel, message: &str) -> String {
        let prefix = level.prefix();
        match level.color() {
            Some(color) if self.colored => format!("{color}{prefix}{message}{RESET}"),
            _ => format!("{prefix}{message}"),
        }
    }

    fn emit(&self, level: MessageLevel, message: &str) {
        if !self.shows(level) {
            return;
        }
        let line = self.render(level, message);
        if level.to_stderr() {
            eprintln!("{line}");
        } else {
            println!("{line}");
        }
    }

    /// Progress or summary line.
    pub fn info(&self, message: &str) {
        self.emit(MessageLevel::Info, message);
    }

    /// A book was written or a run completed.
    pub fn success(&self, message: &str) {
        self.emit(MessageLevel::Success, message);
    }

    /// Something was left out; shown even in quiet mode.
    pub fn warning(&self, message: &str) {
        self.emit(MessageLevel::Warning, message);
    }

    /// A failure; always shown.
    pub fn error(&self, message: &str) {
        self.emit(MessageLevel::Error, message);
    }

    /// A decision, e.g. which naming pattern was detected.
    pub fn debug(&self, message: &str) {
        self.emit(MessageLevel::Debug, message);
    }

    /// Heading preceded by an empty line.
    pub fn section(&self, title: &str) {
        if !self.quiet {
            println!("\n{title}");
        }
    }

    /// Indented `label: value` line, verbose only.
    pub fn detail(&self, label: &str, value: &str) {
        if self.verbose {
            println!("  {label}: {value}");
        }
    }

    /// Empty line.
    pub fn blank_line(&self) {
        if !self.quiet {
            println!();
        }
    }

    /// Numbered entry, e.g. one file of a reading order.
    pub fn list_item(&self, index: usize, message: &str) {
        if !self.quiet {
            println!("  {index}. {message}");
        }
    }

    /// Print rows with every column but the last padded to a common width.
    pub fn table(&self, rows: &[Vec<String>]) {
        if self.quiet {
            return;
        }
        for line in format_table(rows) {
            println!("  {line}");
        }
    }

    /// True unless in quiet mode.
    pub fn should_print(&self) -> bool {
        !self.quiet
    }

    /// Check if verbose output should be shown.
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Check if quiet mode is enabled.
    pub fn is_quiet(&self) -> bool {
        self.quiet
    }
}

impl Default for OutputFormatter {
    fn default() -> Self {
        Self::new(false, false)
    }
}

/// Align `rows` into lines. Widths count characters, so umlauts in titles
/// do not shift the columns.
pub fn format_table(rows: &[Vec<String>]) -> Vec<String> {
    let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
    let widths: Vec<usize> = (0..columns)
        .map(|col| {
            rows.iter()
                .filter_map(|row| row.get(col))
                .map(|cell| cell.chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();

    rows.iter()
        .map(|row| {
            row.iter()
                .enumerate()
                .map(|(col, cell)| {
                    if col + 1 == row.len() {
                        cell.clone()
                    } else {
                        format!("{cell:<width$}", width = widths[col])
                    }
                })
                .collect::<Vec<_>>()
                .join(COLUMN_SEPARATOR)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn plain(quiet: bool, verbose: bool) -> OutputFormatter {
        OutputFormatter {
            quiet,
            verbose,
            colored: false,
        }
    }

    #[rstest]
    #[case(MessageLevel::Info, false, true, true)]
    #[case(MessageLevel::Success, false, true, true)]
    #[case(MessageLevel::Debug, false, true, false)]
    #[case(MessageLevel::Warning, true, true, true)]
    #[case(MessageLevel::Error, true, true, true)]
    fn test_visibility(
        #[case] level: MessageLevel,
        #[case] in_quiet: bool,
        #[case] in_verbose: bool,
        #[case] in_normal: bool,
    ) {
        assert_eq!(plain(true, false).shows(level), in_quiet);
        assert_eq!(plain(false, true).shows(level), in_verbose);
        assert_eq!(plain(false, false).shows(level), in_normal);
    }

    #[test]
    fn test_render_plain_and_colored() {
        let formatter = plain(false, false);
        assert_eq!(formatter.render(MessageLevel::Info, "Copying"), "Copying");
        assert_eq!(formatter.render(MessageLevel::Warning, "Skipped"), "⚠ Skipped");

        let colored = OutputFormatter {
            colored: true,
            ..plain(false, false)
        };
        assert_eq!(
            colored.render(MessageLevel::Success, "Done"),
            "\x1b[32m✓ Done\x1b[0m"
        );
        assert_eq!(colored.render(MessageLevel::Info, "Done"), "Done");
    }

    #[test]
    fn test_format_table_aligns_columns() {
        let rows = vec![
            vec!["Übersicht".to_string(), "1.0 KB".to_string(), "3".to_string()],
            vec!["Go".to_string(), "812.0 KB".to_string(), "120".to_string()],
        ];
        assert_eq!(
            format_table(&rows),
            vec!["Übersicht │ 1.0 KB   │ 3", "Go        │ 812.0 KB │ 120"]
        );
        assert!(format_table(&[]).is_empty());
    }

    #[test]
    fn test_from_configs() {
        let mut config = ConsolidateConfig::new("a", "b");
        config.quiet = true;
        assert!(OutputFormatter::from_config(&config).is_quiet());

        let mut list = ListConfig::new("shelf");
        list.verbose = true;
        assert!(OutputFormatter::from_list_config(&list).is_verbose());
    }
}
