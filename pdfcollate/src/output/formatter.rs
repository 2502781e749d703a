//! Message formatting and display.
//!
//! [`OutputFormatter`] prints to stdout with quiet and verbose modes, and
//! renders [`ProcessEvent`]s when used as the run's [`Reporter`].
//!
//! # Examples
//!
//! ```
//! use pdfcollate::output::OutputFormatter;
//!
//! let formatter = OutputFormatter::new(false, false);
//! formatter.info("Scanning for documents...");
//! formatter.success("Done");
//! ```

use std::io;

use crate::config::{Config, DATE_FORMAT};
use crate::output::reporter::{ProcessEvent, Reporter};
use crate::processor::RunStatistics;

/// Level of output message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    /// Informational message.
    Info,
    /// Success message.
    Success,
    /// Warning message.
    Warning,
    /// Error message.
    Error,
    /// Debug/verbose message.
    Debug,
}

/// Output formatter with configurable verbosity.
#[derive(Debug, Clone)]
pub struct OutputFormatter {
    /// Whether to suppress non-error output.
    quiet: bool,
    /// Whether to show verbose output.
    verbose: bool,
    /// Whether to use colored output.
    colored: bool,
}

impl OutputFormatter {
    /// Create a new output formatter.
    ///
    /// # Arguments
    ///
    /// * `quiet` - Suppress informational output
    /// * `verbose` - Show per-step details
    pub fn new(quiet: bool, verbose: bool) -> Self {
        Self {
            quiet,
            verbose,
            colored: Self::should_use_color(),
        }
    }

    /// Create a quiet formatter (warnings and errors only).
    pub fn quiet() -> Self {
        Self::new(true, false)
    }

    /// Create a verbose formatter.
    pub fn verbose() -> Self {
        Self::new(false, true)
    }

    /// Returns true if stdout is a TTY and TERM is set.
    fn should_use_color() -> bool {
        use std::io::IsTerminal;
        io::stdout().is_terminal() && std::env::var("TERM").is_ok()
    }

    /// Print an informational message. Suppressed in quiet mode.
    pub fn info(&self, message: &str) {
        if !self.quiet {
            self.print_message(MessageLevel::Info, message);
        }
    }

    /// Print a success message. Suppressed in quiet mode.
    pub fn success(&self, message: &str) {
        if !self.quiet {
            self.print_message(MessageLevel::Success, message);
        }
    }

    /// Print a warning message, even in quiet mode.
    pub fn warning(&self, message: &str) {
        self.print_message(MessageLevel::Warning, message);
    }

    /// Print an error message. Always displayed.
    pub fn error(&self, message: &str) {
        self.print_message(MessageLevel::Error, message);
    }

    /// Print a debug message. Only displayed in verbose mode.
    pub fn debug(&self, message: &str) {
        if self.verbose {
            self.print_message(MessageLevel::Debug, message);
        }
    }

    /// Print a message at the given level, honouring quiet and verbose.
    pub fn message(&self, level: MessageLevel, message: &str) {
        match level {
            MessageLevel::Info => self.info(message),
            MessageLevel::Success => self.success(message),
            MessageLevel::Warning => self.warning(message),
            MessageLevel::Error => self.error(message),
            MessageLevel::Debug => self.debug(message),
        }
    }

    fn print_message(&self, level: MessageLevel, message: &str) {
        let (prefix, color_code) = match level {
            MessageLevel::Info => ("", ""),
            MessageLevel::Success => ("✓ ", "\x1b[32m"), // Green
            MessageLevel::Warning => ("⚠ ", "\x1b[33m"), // Yellow
            MessageLevel::Error => ("✗ ", "\x1b[31m"),   // Red
            MessageLevel::Debug => ("→ ", "\x1b[36m"),   // Cyan
        };

        let reset = "\x1b[0m";

        if self.colored && !color_code.is_empty() {
            println!("{color_code}{prefix}{message}{reset}");
        } else {
            println!("{prefix}{message}");
        }
    }

    /// Print a section header. Suppressed in quiet mode.
    pub fn section(&self, title: &str) {
        if !self.quiet {
            println!("\n{title}");
        }
    }

    /// Print a separator line. Suppressed in quiet mode.
    pub fn separator(&self) {
        if !self.quiet {
            println!("{}", "-".repeat(40));
        }
    }

    /// Print a labelled value. Suppressed in quiet mode.
    pub fn detail(&self, label: &str, value: &str) {
        if !self.quiet {
            println!("{label:<22}{value}");
        }
    }

    /// Print the configuration a run is about to use.
    pub fn config_summary(&self, config: &Config) {
        let or_none = |path: Option<&std::path::Path>| {
            path.map(|p| p.display().to_string())
                .unwrap_or_else(|| "None".to_string())
        };

        self.section("--- Configuration Summary ---");
        self.detail("Source Folder:", &config.source_folder.display().to_string());
        self.detail(
            "Supplementary Folder:",
            &or_none(config.supplementary_folder.as_deref()),
        );
        self.detail("Appendix File:", &or_none(config.appendix_file.as_deref()));
        self.detail("Output Folder:", &config.output_folder.display().to_string());
        self.detail(
            "Process from date:",
            &config.start_date.format(DATE_FORMAT).to_string(),
        );
        if self.verbose {
            self.detail("File pattern:", &config.file_pattern);
            self.detail("Identifier pattern:", config.id_pattern.as_str());
            self.detail("Recursive:", &config.recursive.to_string());
        }
        self.separator();
    }

    /// Print the four-line result summary. Shown in every mode.
    pub fn run_summary(&self, stats: &RunStatistics) {
        for line in summary_lines(stats) {
            println!("{line}");
        }
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

impl Reporter for OutputFormatter {
    fn report(&mut self, event: &ProcessEvent) {
        if matches!(event, ProcessEvent::DocumentStarted { .. }) {
            self.separator();
        }

        let (level, message) = render_event(event);
        self.message(level, &message);
    }
}

/// Render an event as a console message.
pub fn render_event(event: &ProcessEvent) -> (MessageLevel, String) {
    match event {
        ProcessEvent::ConfigInvalid { message } => (
            MessageLevel::Error,
            format!("Invalid configuration: {message}"),
        ),
        ProcessEvent::ScanStarted { folder } => (
            MessageLevel::Info,
            format!("Scanning for documents in {}...", folder.display()),
        ),
        ProcessEvent::NoFilesFound { folder } => (
            MessageLevel::Warning,
            format!("No matching files found in {}", folder.display()),
        ),
        ProcessEvent::FilesFound { count } => (
            MessageLevel::Info,
            format!("Found {count} potential document(s). Processing..."),
        ),
        ProcessEvent::SkippedByDate { name, date } => {
            (MessageLevel::Debug, format!("Skipping {name}: dated {date}, before start date"))
        }
        ProcessEvent::SkippedByFormat { name } => {
            (MessageLevel::Debug, format!("Skipping {name}: no identifier in name"))
        }
        ProcessEvent::DocumentStarted {
            name,
            date_label,
            identifier,
        } => (
            MessageLevel::Info,
            format!("Processing: {name} (Date: {date_label})\n  Extracted ID: {identifier}"),
        ),
        ProcessEvent::SupplementaryFound { name } => {
            (MessageLevel::Info, format!("  Found supplementary file: {name}"))
        }
        ProcessEvent::MultipleMatches {
            identifier,
            chosen,
            count,
        } => (
            MessageLevel::Warning,
            format!("  Note: {count} files match {identifier}. Using '{chosen}'"),
        ),
        ProcessEvent::NoSupplementary { identifier } => {
            (MessageLevel::Debug, format!("  No supplementary file for {identifier}"))
        }
        ProcessEvent::OutputExists { path } => (
            MessageLevel::Warning,
            format!(
                "  Output file {} already exists. It will be overwritten.",
                path.display()
            ),
        ),
        ProcessEvent::EntryAdded { description } => {
            (MessageLevel::Debug, format!("  Adding {description}"))
        }
        ProcessEvent::EntrySkipped { path } => (
            MessageLevel::Warning,
            format!("  {} has no pages to add, left out", path.display()),
        ),
        ProcessEvent::DocumentProcessed {
            output, pages, ..
        } => (
            MessageLevel::Success,
            format!(
                "  Successfully merged {pages} page(s) and saved to {}",
                output.display()
            ),
        ),
        ProcessEvent::DocumentFailed { name, reason } => {
            (MessageLevel::Error, format!("  Failed to process {name}: {reason}"))
        }
    }
}

/// The four result lines printed after a run.
pub fn summary_lines(stats: &RunStatistics) -> [String; 4] {
    [
        format!("Successfully Processed: {}", stats.processed),
        format!("Skipped (Invalid Format): {}", stats.skipped_format),
        format!("Skipped (Before Date): {}", stats.skipped_date),
        format!("Errors: {}", stats.errors),
    ]
}
