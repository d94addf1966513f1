//! Send command implementation.

use std::path::PathBuf;

use track_backends::{Backend, LoggerBackend, LoggerConfig};

use crate::errors::CliError;
use crate::input::{parse_events, read_input};

pub struct SendArgs {
    pub input: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub name: Option<String>,
    pub max_event_size: Option<usize>,
    pub ascii_only: bool,
}

pub fn run(args: SendArgs) -> Result<(), CliError> {
    let mut config = LoggerConfig::load(args.config.as_deref())?;
    if let Some(name) = args.name {
        config.name = name;
    }
    if let Some(max) = args.max_event_size {
        config.max_event_size = max;
    }
    config.ascii_only |= args.ascii_only;
    config.validate()?;

    let backend = LoggerBackend::new(&config);
    tracing::debug!(?backend, "sending events");

    let text = read_input(args.input)?;
    let events = parse_events(&text)?;
    for (_, event) in &events {
        backend.send(event)?;
    }

    tracing::debug!(count = events.len(), "events sent");
    Ok(())
}
