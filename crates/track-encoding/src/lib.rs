//! Event payload model and JSON encoding for tracking logs.
//!
//! Tracking events arrive from many producers as loosely shaped trees of
//! mappings, sequences and scalars. This crate provides:
//! - [`EventValue`], the recursive event model (including raw bytes and
//!   temporal scalars that plain JSON has no rule for)
//! - [`Encoder`], which turns an event into a single JSON line, normalizing
//!   date-times to UTC and recovering Latin-1 bytes that are not valid UTF-8
//! - [`DiagnosticSink`], the injected channel that receives one
//!   [`EncodingMismatch`] per recovered field
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use track_encoding::{Encoder, EventValue};
//!
//! let event = EventValue::map([
//!     ("test", EventValue::from(true)),
//!     ("date", EventValue::from(NaiveDate::from_ymd_opt(2012, 5, 7).unwrap())),
//! ]);
//!
//! let line = Encoder::default().encode(&event)?;
//! assert_eq!(line, r#"{"date": "2012-05-07", "test": true}"#);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
#![deny(missing_docs)]

/// Diagnostics emitted while recovering mis-encoded text.
pub mod diagnostics;
/// Encoder turning events into JSON text.
pub mod encoder;
/// Recursive event model.
pub mod event;
/// JSON formatter used by the encoder.
pub mod formatter;

pub use diagnostics::{DiagnosticSink, EncodingMismatch, TracingDiagnostics, APPLICATION_LOG_TARGET};
pub use encoder::{decode_latin1, EncodeError, Encoder, EncoderOptions};
pub use event::{EventDateTime, EventMap, EventNumber, EventValue};
pub use formatter::TrackFormatter;
