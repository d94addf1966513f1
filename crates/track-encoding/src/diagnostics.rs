/// `tracing` target under which encoding diagnostics are logged.
pub const APPLICATION_LOG_TARGET: &str = "track.backends.application_log";

/// A byte field that was not valid UTF-8 and was reinterpreted as Latin-1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodingMismatch {
    /// Location of the field inside the event, e.g. `level_1.encoded_latin`.
    pub path: String,
    /// The bytes as they were before substitution.
    pub original: Vec<u8>,
    /// The Latin-1 text that replaced them.
    pub recovered: String,
}

/// Receiver for recoverable encoding problems found while encoding.
///
/// Closures of the form `Fn(&EncodingMismatch)` implement this trait, which
/// makes capturing diagnostics in tests a one-liner.
pub trait DiagnosticSink: Send + Sync {
    /// Called once per recovered field.
    fn encoding_mismatch(&self, mismatch: &EncodingMismatch);
}

impl<F> DiagnosticSink for F
where
    F: Fn(&EncodingMismatch) + Send + Sync,
{
    fn encoding_mismatch(&self, mismatch: &EncodingMismatch) {
        self(mismatch)
    }
}

/// Default sink: logs each mismatch as a `tracing` warning.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

impl DiagnosticSink for TracingDiagnostics {
    fn encoding_mismatch(&self, mismatch: &EncodingMismatch) {
        tracing::warn!(
            target: APPLICATION_LOG_TARGET,
            path = %mismatch.path,
            "UnicodeDecodeError Event-Data: {}",
            mismatch.original.escape_ascii()
        );
    }
}
