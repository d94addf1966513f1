//! Reading JSON-lines event input.

use std::io::{self, Read};
use std::path::PathBuf;

use track_encoding::EventValue;

use crate::errors::CliError;

/// Reads the whole input from `path`, or stdin when absent.
pub fn read_input(path: Option<PathBuf>) -> Result<String, CliError> {
    match path {
        Some(path) => std::fs::read_to_string(&path).map_err(|source| CliError::Read {
            source_name: path.display().to_string(),
            source,
        }),
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .map_err(|source| CliError::Read {
                    source_name: "stdin".to_string(),
                    source,
                })?;
            Ok(buffer)
        }
    }
}

/// Parses one event per non-blank line, keeping 1-based line numbers.
pub fn parse_events(text: &str) -> Result<Vec<(usize, EventValue)>, CliError> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| {
            let value: serde_json::Value = serde_json::from_str(line)
                .map_err(|source| CliError::InvalidJson {
                    line: idx + 1,
                    source,
                })?;
            Ok((idx + 1, EventValue::from(value)))
        })
        .collect()
}
