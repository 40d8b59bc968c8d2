//! Terminal logging and console output.
//!
//! Provides:
//! - tracing subscriber setup (stderr, plus optional JSON rolling file)
//! - `log` crate bridging (installed by the subscriber)
//! - miette error reporting tuned to the terminal
//! - styled console output helpers for the CLI (console)

use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::OnceLock;

use console::{style, Term};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config::LoggingConfig;

const LOG_FILE: &str = "checklist-locations.log";

static TERMINAL_CAPS: OnceLock<TerminalCapabilities> = OnceLock::new();

fn get_terminal_caps() -> &'static TerminalCapabilities {
    TERMINAL_CAPS.get_or_init(TerminalCapabilities::detect)
}

// ============================================================================
// Terminal Capability Detection
// ============================================================================

/// Detected terminal capabilities
#[derive(Debug, Clone)]
pub struct TerminalCapabilities {
    pub colors: bool,
    pub supports_unicode: bool,
    pub is_interactive: bool,
}

impl TerminalCapabilities {
    /// Detect terminal capabilities from environment
    pub fn detect() -> Self {
        let is_interactive = Term::stdout().is_term();

        let supports_unicode = std::env::var("TERM")
            .map(|t| !t.contains("dumb"))
            .unwrap_or(true)
            && std::env::var("LANG")
                .map(|l| l.contains("UTF-8") || l.contains("utf8"))
                .unwrap_or(true);

        Self {
            colors: console::colors_enabled(),
            supports_unicode,
            is_interactive,
        }
    }

    /// Check if colors should be used
    pub fn should_colorize(&self) -> bool {
        self.is_interactive && self.colors
    }
}

// ============================================================================
// Logging Initialization
// ============================================================================

fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}

/// Initialize the logging system.
///
/// Sets up a stderr layer (stdout is reserved for command output) and, when
/// `json_file` is enabled, a JSON daily-rolling file in the log directory.
/// Standard `log` macros are redirected to tracing.
///
/// Returns the file writer's `WorkerGuard`, which must be kept alive so
/// buffered lines are flushed on shutdown.
pub fn init(config: &LoggingConfig) -> Option<WorkerGuard> {
    let mut guard = None;

    let file_layer = if config.json_file {
        let log_dir = config.log_dir();
        if let Err(e) = fs::create_dir_all(&log_dir) {
            eprintln!("Failed to create logs directory {}: {}", log_dir.display(), e);
        }
        let file_appender = tracing_appender::rolling::daily(&log_dir, LOG_FILE);
        let (non_blocking, file_guard) = tracing_appender::non_blocking(file_appender);
        guard = Some(file_guard);

        Some(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .json()
                .with_file(true)
                .with_line_number(true)
                .with_target(true)
                .with_filter(env_filter(&config.level)),
        )
    } else {
        None
    };

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .compact()
        .with_ansi(get_terminal_caps().colors)
        .with_filter(env_filter(&config.level));

    // `try_init` also installs the `log` bridge.
    if let Err(e) = tracing_subscriber::registry()
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
    {
        eprintln!("Failed to initialize logging: {}", e);
    }

    init_miette();

    if config.json_file {
        log::debug!(
            "Logging initialized. Writing to: {:?} (daily rolling)",
            config.log_dir().join(LOG_FILE)
        );
    }

    guard
}

/// Default log directory under the platform data directory.
pub fn default_log_dir() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join("checklist-locations").join("logs"))
        .unwrap_or_else(|| PathBuf::from("logs"))
}

/// Initialize miette error reporting
pub fn init_miette() {
    let caps = get_terminal_caps();

    miette::set_hook(Box::new(move |_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .unicode(caps.supports_unicode)
                .context_lines(3)
                .tab_width(4)
                .color(caps.should_colorize())
                .build(),
        )
    }))
    .ok(); // Ignore if already set
}

// ============================================================================
// Console Output Utilities
// ============================================================================

fn marker(unicode: &'static str, ascii: &'static str) -> &'static str {
    if get_terminal_caps().supports_unicode {
        unicode
    } else {
        ascii
    }
}

/// Print a bold section heading
pub fn print_heading(title: &str) {
    println!("{}", style(title).cyan().bold());
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("{} {}", style(marker("✓", "[OK]")).green(), style(message).green());
}

/// Print a warning message
pub fn print_warning(message: &str) {
    println!(
        "{} {}",
        style(marker("⚠", "[WARN]")).yellow(),
        style(message).yellow().bold()
    );
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("{} {}", style(marker("ℹ", "[INFO]")).blue(), style(message).blue());
}

/// Print a name/count line with the count right-aligned
pub fn print_count(label: &str, count: usize, highlighted: bool) {
    let check = if highlighted { marker("●", "*") } else { " " };
    let line = format!("{} {:<28} {:>5}", check, label, count);
    if highlighted {
        println!("{}", style(line).bold());
    } else {
        println!("{}", line);
    }
}
