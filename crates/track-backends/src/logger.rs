//! Backend writing encoded events to a logging channel.

use std::fmt;
use std::sync::Arc;

use tracing::Level;
use track_encoding::{
    DiagnosticSink, Encoder, EncoderOptions, EventValue, APPLICATION_LOG_TARGET,
};

use crate::backend::Backend;
use crate::config::LoggerConfig;
use crate::errors::BackendError;
use crate::sink::{LogRecord, RecordSink, TracingRecords};

/// Event fields copied into the error log when an event cannot be encoded.
const CONTEXT_FIELDS: [&str; 4] = ["event_type", "event_source", "page", "referer"];

/// Backend that encodes each event to one JSON line and writes it to a
/// logging channel at INFO.
///
/// Every call to [`send`](Backend::send) writes exactly one record; sending
/// the same event twice writes two identical records.
///
/// # Example
///
/// ```rust
/// use std::sync::{Arc, Mutex};
/// use track_backends::{Backend, LogRecord, LoggerBackend, LoggerConfig};
/// use track_encoding::EventValue;
///
/// let lines = Arc::new(Mutex::new(Vec::new()));
/// let sink = {
///     let lines = Arc::clone(&lines);
///     move |r: &LogRecord<'_>| lines.lock().unwrap().push(r.message.to_string())
/// };
/// let backend = LoggerBackend::new(&LoggerConfig::default()).with_sink(Arc::new(sink));
///
/// backend.send(&EventValue::map([("test", EventValue::from(true))]))?;
/// assert_eq!(lines.lock().unwrap()[0], r#"{"test": true}"#);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct LoggerBackend {
    channel: String,
    max_event_size: Option<usize>,
    encoder: Encoder,
    sink: Arc<dyn RecordSink>,
}

impl LoggerBackend {
    /// Creates a backend writing to `config.name` through `tracing`, with
    /// diagnostics logged as `tracing` warnings.
    pub fn new(config: &LoggerConfig) -> Self {
        let options = EncoderOptions {
            ascii_only: config.ascii_only,
        };
        Self {
            channel: config.name.clone(),
            max_event_size: config.event_size_limit(),
            encoder: Encoder::default().with_options(options),
            sink: Arc::new(TracingRecords),
        }
    }

    /// Routes encoding diagnostics to `diagnostics`, keeping the configured
    /// encoder options.
    pub fn with_diagnostics(mut self, diagnostics: Arc<dyn DiagnosticSink>) -> Self {
        let options = self.encoder.options();
        self.encoder = Encoder::new(diagnostics).with_options(options);
        self
    }

    /// Replaces the encoder along with its options.
    pub fn with_encoder(mut self, encoder: Encoder) -> Self {
        self.encoder = encoder;
        self
    }

    /// Replaces the logging channel implementation.
    pub fn with_sink(mut self, sink: Arc<dyn RecordSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Channel name records are written under.
    pub fn channel(&self) -> &str {
        &self.channel
    }

    fn log_failure(&self, event: &EventValue, err: &BackendError) {
        let [event_type, event_source, page, referer] =
            CONTEXT_FIELDS.map(|field| event.get(field).and_then(EventValue::as_str));
        tracing::error!(
            target: APPLICATION_LOG_TARGET,
            channel = %self.channel,
            event_type = ?event_type,
            event_source = ?event_source,
            page = ?page,
            referer = ?referer,
            error = %err,
            "failed to encode tracking event"
        );
    }
}

impl Default for LoggerBackend {
    fn default() -> Self {
        Self::new(&LoggerConfig::default())
    }
}

impl fmt::Debug for LoggerBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggerBackend")
            .field("channel", &self.channel)
            .field("max_event_size", &self.max_event_size)
            .field("encoder", &self.encoder)
            .finish_non_exhaustive()
    }
}

impl Backend for LoggerBackend {
    fn send(&self, event: &EventValue) -> Result<(), BackendError> {
        let line = match self.encoder.encode(event) {
            Ok(line) => line,
            Err(err) => {
                let err = BackendError::from(err);
                self.log_failure(event, &err);
                return Err(err);
            }
        };

        self.sink.emit(&LogRecord {
            channel: &self.channel,
            level: Level::INFO,
            message: truncate_chars(&line, self.max_event_size),
        });
        Ok(())
    }
}

/// Cuts `line` to at most `limit` characters, never inside a character.
fn truncate_chars(line: &str, limit: Option<usize>) -> &str {
    match limit.and_then(|max| line.char_indices().nth(max)) {
        Some((idx, _)) => &line[..idx],
        None => line,
    }
}
