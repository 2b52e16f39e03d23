use colored::*;
use once_cell::sync::Lazy;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogLevel {
    Step,
    Info,
    Success,
    Warning,
    Error,
}

const ALL_LEVELS: [LogLevel; 5] = [
    LogLevel::Step,
    LogLevel::Info,
    LogLevel::Success,
    LogLevel::Warning,
    LogLevel::Error,
];

impl LogLevel {
    fn label(self) -> &'static str {
        match self {
            LogLevel::Step => "STEP",
            LogLevel::Info => "INFO",
            LogLevel::Success => "SUCCESS",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
        }
    }

    fn color(self) -> Color {
        match self {
            LogLevel::Step => Color::Magenta,
            LogLevel::Info => Color::Cyan,
            LogLevel::Success => Color::Green,
            LogLevel::Warning => Color::Yellow,
            LogLevel::Error => Color::Red,
        }
    }
}

static PREFIX_WIDTH: Lazy<usize> = Lazy::new(|| {
    ALL_LEVELS
        .iter()
        .map(|level| level.label().len())
        .max()
        .unwrap_or(7)
        + 5
});

/// `[ WARNING ] ` style prefixes, padded to a common width.
static LOG_PREFIXES: Lazy<HashMap<LogLevel, String>> = Lazy::new(|| {
    ALL_LEVELS
        .iter()
        .map(|&level| {
            let label = level.label();
            let bracketed = format!("[{}]", format!(" {} ", label).color(level.color()).bold());
            let padding = PREFIX_WIDTH.saturating_sub(label.len() + 4);
            (level, format!("{}{}", bracketed, " ".repeat(padding)))
        })
        .collect()
});

pub fn setup_logging() {
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info");
    }

    let format = tracing_subscriber::fmt::format()
        .without_time()
        .with_level(false)
        .with_target(false)
        .compact();

    tracing_subscriber::fmt()
        .event_format(format)
        .with_ansi(true)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
}

pub fn log(level: LogLevel, message: &str) {
    let prefix = LOG_PREFIXES
        .get(&level)
        .map(String::as_str)
        .unwrap_or_default();

    match level {
        LogLevel::Step => tracing::info!(target: "step", "{}{}", prefix, message),
        LogLevel::Info | LogLevel::Success => tracing::info!("{}{}", prefix, message),
        LogLevel::Warning => tracing::warn!("{}{}", prefix, message),
        LogLevel::Error => tracing::error!("{}{}", prefix, message),
    }
}
