//! Tracking event backends.
//!
//! A backend receives one event at a time and stores it somewhere. This crate
//! provides:
//! - The [`Backend`] trait
//! - [`LoggerBackend`], which encodes each event to one JSON line and writes
//!   it to a named logging channel at INFO
//! - [`RecordSink`], the logging channel seam (defaults to `tracing`)
//! - [`LoggerConfig`], loaded from defaults, a TOML file and `TRACK_*`
//!   environment variables
//!
//! ## Quick Start
//!
//! ```rust
//! use track_backends::{Backend, LoggerBackend, LoggerConfig};
//! use track_encoding::EventValue;
//!
//! let backend = LoggerBackend::new(&LoggerConfig::default());
//! let event = EventValue::map([("event_type", EventValue::from("page_view"))]);
//! backend.send(&event)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![deny(missing_docs)]

/// The backend trait.
pub mod backend;
/// Logger backend configuration.
pub mod config;
/// Error types for backend operations.
pub mod errors;
/// Backend writing encoded events to a logging channel.
pub mod logger;
/// Logging channel abstraction.
pub mod sink;

pub use backend::Backend;
pub use config::{LoggerConfig, DEFAULT_CHANNEL, DEFAULT_MAX_EVENT_SIZE, ENV_PREFIX};
pub use errors::BackendError;
pub use logger::LoggerBackend;
pub use sink::{LogRecord, RecordSink, TracingRecords, TRACKING_TARGET};
