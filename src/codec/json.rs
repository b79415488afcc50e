//! Deterministic JSON serialization of tracking payloads.
//!
//! Output uses `", "` / `": "` separators and escapes every character outside
//! printable ASCII as `\uXXXX` (UTF-16 code units, lowercase hex). Tokens are
//! therefore pure ASCII before base64 and stay byte-compatible with tokens
//! minted by other tracking libraries using the same layout.

use serde::Serialize;
use serde_json::ser::{Formatter, Serializer};
use std::io;

/// Formatter producing spaced separators and ASCII-only strings.
#[derive(Debug, Default, Clone, Copy)]
pub struct AsciiFormatter;

impl Formatter for AsciiFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }

    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let mut start = 0;

        for (i, ch) in fragment.char_indices() {
            if is_printable_ascii(ch) {
                continue;
            }

            if start < i {
                writer.write_all(&fragment.as_bytes()[start..i])?;
            }

            let mut units = [0u16; 2];
            for unit in ch.encode_utf16(&mut units) {
                write!(writer, "\\u{:04x}", unit)?;
            }

            start = i + ch.len_utf8();
        }

        writer.write_all(&fragment.as_bytes()[start..])
    }
}

fn is_printable_ascii(ch: char) -> bool {
    (' '..='~').contains(&ch)
}

/// Serializes `value` with [`AsciiFormatter`].
pub fn to_vec<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, serde_json::Error> {
    let mut out = Vec::with_capacity(128);
    let mut serializer = Serializer::with_formatter(&mut out, AsciiFormatter);
    value.serialize(&mut serializer)?;
    Ok(out)
}
