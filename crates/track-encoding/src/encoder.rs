use serde::Serialize;

use crate::diagnostics::{DiagnosticSink, EncodingMismatch, TracingDiagnostics};
use crate::event::{EventMap, EventValue};
use crate::formatter::TrackFormatter;
use std::fmt;
use std::sync::Arc;

/// Error returned when an event cannot be encoded.
#[derive(thiserror::Error, Debug)]
pub enum EncodeError {
    /// NaN or an infinity was found; JSON has no rule for them.
    #[error("non-finite number detected at {0}")]
    NonFiniteNumber(String),
    /// The JSON writer rejected a value.
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
    /// The writer produced bytes that are not UTF-8.
    #[error("encoded output is not UTF-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
}

/// Output options for [`Encoder`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EncoderOptions {
    /// Escape every non-ASCII character as `\uXXXX` (default: false).
    pub ascii_only: bool,
}

/// Location of a value inside an event, used in diagnostics and errors.
#[derive(Debug, Clone)]
struct Path {
    segments: Vec<Segment>,
}

#[derive(Debug, Clone)]
enum Segment {
    Field(String),
    Index(usize),
}

impl Path {
    fn root() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    fn push_field(&self, field: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(Segment::Field(field.to_string()));
        Self { segments }
    }

    fn push_index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(Segment::Index(index));
        Self { segments }
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return write!(f, "root");
        }
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::Field(name) if i == 0 => write!(f, "{}", name)?,
                Segment::Field(name) => write!(f, ".{}", name)?,
                Segment::Index(idx) => write!(f, "[{}]", idx)?,
            }
        }
        Ok(())
    }
}

/// Decodes bytes as Latin-1 (ISO-8859-1). Every byte maps to one code point,
/// so this never fails.
pub fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

/// Turns tracking events into single-line JSON text.
///
/// Date-times are normalized to UTC, dates are written as `YYYY-MM-DD`, and
/// byte fields that are not valid UTF-8 are reinterpreted as Latin-1. Each
/// such recovery is reported to the [`DiagnosticSink`] given at construction.
///
/// # Example
///
/// ```rust
/// use std::sync::{Arc, Mutex};
/// use track_encoding::{Encoder, EncodingMismatch, EventValue};
///
/// let seen = Arc::new(Mutex::new(Vec::<EncodingMismatch>::new()));
/// let sink = {
///     let seen = Arc::clone(&seen);
///     move |m: &EncodingMismatch| seen.lock().unwrap().push(m.clone())
/// };
/// let encoder = Encoder::new(Arc::new(sink));
///
/// let event = EventValue::map([("test", EventValue::from(b"\xd3 \xe9 \xf1".as_slice()))]);
/// assert_eq!(encoder.encode(&event)?, r#"{"test": "Ó é ñ"}"#);
/// assert_eq!(seen.lock().unwrap()[0].original, b"\xd3 \xe9 \xf1");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone)]
pub struct Encoder {
    diagnostics: Arc<dyn DiagnosticSink>,
    options: EncoderOptions,
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new(Arc::new(TracingDiagnostics))
    }
}

impl fmt::Debug for Encoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Encoder")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl Encoder {
    /// Creates an encoder reporting recoveries to `diagnostics`.
    pub fn new(diagnostics: Arc<dyn DiagnosticSink>) -> Self {
        Self {
            diagnostics,
            options: EncoderOptions::default(),
        }
    }

    /// Replaces the output options.
    pub fn with_options(mut self, options: EncoderOptions) -> Self {
        self.options = options;
        self
    }

    /// Current output options.
    pub fn options(&self) -> EncoderOptions {
        self.options
    }

    /// Encodes `event` as one line of JSON.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError::NonFiniteNumber`] if the event holds NaN or an
    /// infinity anywhere. Mis-encoded bytes never cause an error.
    pub fn encode(&self, event: &EventValue) -> Result<String, EncodeError> {
        let resolved = self.resolve(event)?;

        let mut buf = Vec::with_capacity(128);
        let mut serializer = serde_json::Serializer::with_formatter(
            &mut buf,
            TrackFormatter::new(self.options.ascii_only),
        );
        resolved.serialize(&mut serializer)?;
        Ok(String::from_utf8(buf)?)
    }

    /// Returns a copy of `event` in which every byte field that is not valid
    /// UTF-8 has been replaced by its Latin-1 text. The input is left as is.
    ///
    /// One diagnostic is emitted per replaced field.
    pub fn resolve(&self, event: &EventValue) -> Result<EventValue, EncodeError> {
        self.resolve_at(event, &Path::root())
    }

    fn resolve_at(&self, value: &EventValue, path: &Path) -> Result<EventValue, EncodeError> {
        match value {
            EventValue::Map(map) => {
                let resolved = map
                    .iter()
                    .map(|(key, child)| {
                        let resolved = self.resolve_at(child, &path.push_field(key))?;
                        Ok((key.clone(), resolved))
                    })
                    .collect::<Result<EventMap, EncodeError>>()?;
                Ok(EventValue::Map(resolved))
            }
            EventValue::Seq(items) => {
                let resolved = items
                    .iter()
                    .enumerate()
                    .map(|(idx, item)| self.resolve_at(item, &path.push_index(idx)))
                    .collect::<Result<Vec<_>, EncodeError>>()?;
                Ok(EventValue::Seq(resolved))
            }
            EventValue::Bytes(bytes) => Ok(self.recover_bytes(bytes, path)),
            EventValue::Number(num) if !num.is_finite() => {
                Err(EncodeError::NonFiniteNumber(path.to_string()))
            }
            other => Ok(other.clone()),
        }
    }

    fn recover_bytes(&self, bytes: &[u8], path: &Path) -> EventValue {
        if std::str::from_utf8(bytes).is_ok() {
            return EventValue::Bytes(bytes.to_vec());
        }

        let recovered = decode_latin1(bytes);
        self.diagnostics.encoding_mismatch(&EncodingMismatch {
            path: path.to_string(),
            original: bytes.to_vec(),
            recovered: recovered.clone(),
        });
        EventValue::Text(recovered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_display() {
        assert_eq!(Path::root().to_string(), "root");
        let path = Path::root().push_field("a").push_index(2).push_field("b");
        assert_eq!(path.to_string(), "a[2].b");
        assert_eq!(Path::root().push_index(0).to_string(), "[0]");
    }

    #[test]
    fn latin1_covers_every_byte() {
        let all: Vec<u8> = (0..=255).collect();
        let text = decode_latin1(&all);
        assert_eq!(text.chars().count(), 256);
        assert!(text.chars().zip(0u32..).all(|(c, b)| c as u32 == b));
    }

    #[test]
    fn resolve_leaves_input_untouched() {
        let event = EventValue::map([("raw", EventValue::from(vec![0xe9u8]))]);
        let before = event.clone();
        let encoder = Encoder::new(Arc::new(|_: &EncodingMismatch| {}));
        let resolved = encoder.resolve(&event).unwrap();
        assert_eq!(event, before);
        assert_eq!(resolved.get("raw"), Some(&EventValue::from("é")));
    }
}
