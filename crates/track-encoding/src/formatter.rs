use serde_json::ser::Formatter;
use std::io::{self, Write};

/// Single-line JSON formatter for tracking records.
///
/// Separates items with `", "` and keys from values with `": "`, and writes
/// nothing else between tokens. With `ascii_only` set, every character above
/// `~` (DEL and all non-ASCII) is escaped as `\uXXXX`, using UTF-16
/// surrogate pairs above the BMP.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrackFormatter {
    ascii_only: bool,
}

impl TrackFormatter {
    /// Creates a formatter.
    pub fn new(ascii_only: bool) -> Self {
        Self { ascii_only }
    }
}

impl Formatter for TrackFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        writer.write_all(b": ")
    }

    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        if !self.ascii_only {
            return writer.write_all(fragment.as_bytes());
        }

        let mut start = 0;
        for (idx, ch) in fragment.char_indices() {
            // Quotes, backslashes and control characters never reach a fragment.
            if ch <= '~' {
                continue;
            }
            writer.write_all(fragment[start..idx].as_bytes())?;
            let mut units = [0u16; 2];
            for unit in ch.encode_utf16(&mut units) {
                write!(writer, "\\u{:04x}", unit)?;
            }
            start = idx + ch.len_utf8();
        }
        writer.write_all(fragment[start..].as_bytes())
    }
}
