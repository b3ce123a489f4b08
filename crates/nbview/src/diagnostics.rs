//! Diagnostics sink.
//!
//! Every pipeline stage takes a `&mut Diagnostics` instead of logging through
//! a global. Records are kept for the caller and also forwarded to `tracing`
//! so a host with a subscriber installed sees them as ordinary log events.

use std::fmt;

/// Severity of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Debug,
    Info,
    Warn,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Debug => write!(f, "debug"),
            Level::Info => write!(f, "info"),
            Level::Warn => write!(f, "warn"),
        }
    }
}

/// A single recorded message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub level: Level,
    pub message: String,
}

/// Collects diagnostics for one `process` call.
#[derive(Debug, Default)]
pub struct Diagnostics {
    records: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn debug(&mut self, message: impl Into<String>) {
        self.record(Level::Debug, message.into());
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.record(Level::Info, message.into());
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        self.record(Level::Warn, message.into());
    }

    fn record(&mut self, level: Level, message: String) {
        match level {
            Level::Debug => tracing::debug!("{}", message),
            Level::Info => tracing::info!("{}", message),
            Level::Warn => tracing::warn!("{}", message),
        }
        self.records.push(Diagnostic { level, message });
    }

    /// All records, in the order they were emitted.
    pub fn records(&self) -> &[Diagnostic] {
        &self.records
    }

    /// Records at warning level.
    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.records.iter().filter(|d| d.level == Level::Warn)
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn into_records(self) -> Vec<Diagnostic> {
        self.records
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_keep_order_and_level() {
        let mut diag = Diagnostics::new();
        diag.info("fetching");
        diag.warn("missing tag");
        diag.debug("found cell");

        let levels: Vec<Level> = diag.records().iter().map(|d| d.level).collect();
        assert_eq!(levels, vec![Level::Info, Level::Warn, Level::Debug]);
        assert_eq!(diag.warnings().count(), 1);
        assert_eq!(diag.warnings().next().unwrap().message, "missing tag");
    }

    #[test]
    fn test_empty_sink() {
        let diag = Diagnostics::new();
        assert!(diag.is_empty());
        assert!(diag.into_records().is_empty());
    }
}
