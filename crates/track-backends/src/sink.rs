use tracing::Level;

/// `tracing` target under which [`TracingRecords`] writes records.
pub const TRACKING_TARGET: &str = "tracking";

/// One line handed to a logging channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogRecord<'a> {
    /// Channel name, e.g. `tracking`.
    pub channel: &'a str,
    /// Severity.
    pub level: Level,
    /// The encoded event.
    pub message: &'a str,
}

/// A logging channel. Writes must be safe to call from several threads.
pub trait RecordSink: Send + Sync {
    /// Writes one record.
    fn emit(&self, record: &LogRecord<'_>);
}

impl<F> RecordSink for F
where
    F: Fn(&LogRecord<'_>) + Send + Sync,
{
    fn emit(&self, record: &LogRecord<'_>) {
        self(record)
    }
}

/// Writes records as `tracing` events, with the channel as a field.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingRecords;

impl RecordSink for TracingRecords {
    fn emit(&self, record: &LogRecord<'_>) {
        let LogRecord {
            channel, message, ..
        } = *record;
        match record.level {
            Level::ERROR => tracing::error!(target: TRACKING_TARGET, channel, "{}", message),
            Level::WARN => tracing::warn!(target: TRACKING_TARGET, channel, "{}", message),
            Level::INFO => tracing::info!(target: TRACKING_TARGET, channel, "{}", message),
            Level::DEBUG => tracing::debug!(target: TRACKING_TARGET, channel, "{}", message),
            _ => tracing::trace!(target: TRACKING_TARGET, channel, "{}", message),
        }
    }
}
