//! Core logging types: event severity and the [`EventSink`] trait.
use crate::engine::Event;

/// How loudly an event is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Routine detail, shown only with `--verbose`.
    Debug,
    /// A change was made.
    Info,
    /// Suspicious but not fatal.
    Warn,
    /// The run will not be successful.
    Error,
}

/// Receiver for per-path events.
///
/// The engine reports every outcome through this trait so it never decides
/// where messages go. [`Logger`](super::logger::Logger) forwards events to
/// `tracing`; [`MemorySink`](super::memory::MemorySink) keeps them for
/// inspection.
pub trait EventSink: Send + Sync + std::fmt::Debug {
    /// Record one event.
    fn record(&self, event: &Event);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_ordering() {
        assert!(Severity::Debug < Severity::Info);
        assert!(Severity::Info < Severity::Warn);
        assert!(Severity::Warn < Severity::Error);
    }
}
