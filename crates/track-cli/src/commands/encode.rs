//! Encode command implementation.

use std::path::PathBuf;

use track_encoding::{Encoder, EncoderOptions};

use crate::errors::CliError;
use crate::input::{parse_events, read_input};

pub fn run(input: Option<PathBuf>, ascii_only: bool) -> Result<(), CliError> {
    let encoder = Encoder::default().with_options(EncoderOptions { ascii_only });

    let text = read_input(input)?;
    for (line, event) in parse_events(&text)? {
        let encoded = encoder
            .encode(&event)
            .map_err(|source| CliError::Encode { line, source })?;
        println!("{}", encoded);
    }
    Ok(())
}
