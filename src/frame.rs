// Hargassner - Boiler telemetry client
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Line framing for the raw telnet byte stream
//!
//! The controller streams newline-terminated text. Socket reads do not
//! respect line boundaries, so the bytes after the last newline of a chunk
//! are carried over and completed by the next chunk. Carry-over is bounded
//! and cleared whenever the connection is torn down.
//!
//! Each complete line is decoded with the first encoding that accepts it.
//! If none does, invalid sequences are replaced rather than failing the line.

use crate::decoder::{telemetry_payload, DEFAULT_MARKER};
use log::debug;
use serde::{Deserialize, Serialize};

/// Default bound on carried-over partial line bytes
pub const DEFAULT_MAX_PARTIAL_LINE: usize = 65536;

/// Character encoding tried on incoming lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TextEncoding {
    /// Strict UTF-8
    Utf8,
    /// ISO-8859-1 (accepts every byte)
    Latin1,
    /// Windows code page 1252
    Windows1252,
}

impl TextEncoding {
    /// Default decoding order
    pub const DEFAULT_CHAIN: [TextEncoding; 3] = [Self::Utf8, Self::Latin1, Self::Windows1252];

    /// Decode `bytes`, or `None` if they are invalid in this encoding
    pub fn decode(&self, bytes: &[u8]) -> Option<String> {
        match self {
            Self::Utf8 => std::str::from_utf8(bytes).ok().map(str::to_string),
            Self::Latin1 => Some(bytes.iter().map(|&b| char::from(b)).collect()),
            Self::Windows1252 => bytes.iter().map(|&b| cp1252_char(b)).collect(),
        }
    }
}

/// Code points of 0x80..=0x9F in code page 1252 (0 = undefined)
const CP1252_HIGH: [u16; 32] = [
    0x20AC, 0, 0x201A, 0x0192, 0x201E, 0x2026, 0x2020, 0x2021, 0x02C6, 0x2030, 0x0160, 0x2039,
    0x0152, 0, 0x017D, 0, 0, 0x2018, 0x2019, 0x201C, 0x201D, 0x2022, 0x2013, 0x2014, 0x02DC,
    0x2122, 0x0161, 0x203A, 0x0153, 0, 0x017E, 0x0178,
];

fn cp1252_char(byte: u8) -> Option<char> {
    match byte {
        0x80..=0x9F => match CP1252_HIGH[(byte - 0x80) as usize] {
            0 => None,
            cp => char::from_u32(u32::from(cp)),
        },
        _ => Some(char::from(byte)),
    }
}

/// Output of one [`FrameAssembler::on_bytes`] call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssembledLines {
    /// Complete, trimmed telemetry lines in arrival order
    pub telemetry: Vec<String>,
    /// Non-empty lines that were not telemetry
    pub dropped: usize,
}

/// Splits a byte stream into qualifying telemetry lines
#[derive(Debug, Clone)]
pub struct FrameAssembler {
    marker: String,
    encodings: Vec<TextEncoding>,
    partial: Vec<u8>,
    max_partial: usize,
}

impl FrameAssembler {
    /// Create an assembler for the default marker and encoding chain
    pub fn new() -> Self {
        Self {
            marker: DEFAULT_MARKER.to_string(),
            encodings: TextEncoding::DEFAULT_CHAIN.to_vec(),
            partial: Vec::new(),
            max_partial: DEFAULT_MAX_PARTIAL_LINE,
        }
    }

    /// Use a custom telemetry marker
    pub fn with_marker(mut self, marker: impl Into<String>) -> Self {
        self.marker = marker.into();
        self
    }

    /// Use a custom encoding chain
    pub fn with_encodings(mut self, encodings: impl Into<Vec<TextEncoding>>) -> Self {
        self.encodings = encodings.into();
        self
    }

    /// Bound the carried-over partial line
    pub fn with_max_partial(mut self, max_partial: usize) -> Self {
        self.max_partial = max_partial;
        self
    }

    /// Feed a chunk of raw bytes
    pub fn on_bytes(&mut self, chunk: &[u8]) -> AssembledLines {
        let mut out = AssembledLines::default();
        self.partial.extend_from_slice(chunk);

        let Some(last_newline) = self.partial.iter().rposition(|&b| b == b'\n') else {
            self.enforce_partial_bound();
            return out;
        };

        let rest = self.partial.split_off(last_newline + 1);
        let complete = std::mem::replace(&mut self.partial, rest);
        self.enforce_partial_bound();

        for raw in complete.split(|&b| b == b'\n') {
            let text = self.decode_text(raw);
            let line = text.trim();
            if line.is_empty() {
                continue;
            }
            if telemetry_payload(line, &self.marker).is_some() {
                out.telemetry.push(line.to_string());
            } else {
                debug!("Ignoring non-telemetry line: {:.50}", line);
                out.dropped += 1;
            }
        }

        out
    }

    /// Discard any carried-over partial line
    pub fn reset(&mut self) {
        self.partial.clear();
    }

    /// Bytes currently waiting for a line terminator
    pub fn pending(&self) -> usize {
        self.partial.len()
    }

    fn enforce_partial_bound(&mut self) {
        if self.partial.len() > self.max_partial {
            debug!(
                "Discarding {} bytes without line terminator",
                self.partial.len()
            );
            self.partial.clear();
        }
    }

    fn decode_text(&self, raw: &[u8]) -> String {
        self.encodings
            .iter()
            .find_map(|encoding| encoding.decode(raw))
            .unwrap_or_else(|| {
                debug!("Used fallback decoding with character replacement");
                String::from_utf8_lossy(raw).into_owned()
            })
    }
}

impl Default for FrameAssembler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splits_and_filters() {
        let mut fa = FrameAssembler::new();
        let out = fa.on_bytes(b"pm 1 2 3\r\nz diag\r\n\r\npm 4 5 6\r\n");
        assert_eq!(out.telemetry, vec!["pm 1 2 3", "pm 4 5 6"]);
        assert_eq!(out.dropped, 1);
        assert_eq!(fa.pending(), 0);
    }

    #[test]
    fn test_marker_requires_space() {
        let mut fa = FrameAssembler::new();
        let out = fa.on_bytes(b"pmx 1 2\npm\n  pm 9\n");
        assert_eq!(out.telemetry, vec!["pm 9"]);
        assert_eq!(out.dropped, 2);
    }

    #[test]
    fn test_fragment_is_buffered_across_reads() {
        let mut fa = FrameAssembler::new();
        let first = fa.on_bytes(b"pm 1 2 3\npm 4 5");
        assert_eq!(first.telemetry, vec!["pm 1 2 3"]);
        assert_eq!(fa.pending(), 6);

        let second = fa.on_bytes(b" 6\n");
        assert_eq!(second.telemetry, vec!["pm 4 5 6"]);
        assert_eq!(fa.pending(), 0);
    }

    #[test]
    fn test_split_multibyte_character() {
        let mut fa = FrameAssembler::new().with_marker("xx");
        let line = "xx Störung 1\n".as_bytes();
        // Split inside the two-byte 'ö'
        let out = fa.on_bytes(&line[..6]);
        assert!(out.telemetry.is_empty());
        let out = fa.on_bytes(&line[6..]);
        assert_eq!(out.telemetry, vec!["xx Störung 1"]);
    }

    #[test]
    fn test_reset_drops_fragment() {
        let mut fa = FrameAssembler::new();
        fa.on_bytes(b"pm 4 5");
        fa.reset();
        let out = fa.on_bytes(b" 6\n");
        assert!(out.telemetry.is_empty());
        assert_eq!(out.dropped, 1);
    }

    #[test]
    fn test_partial_bound() {
        let mut fa = FrameAssembler::new().with_max_partial(8);
        fa.on_bytes(b"pm 1 2 3 4 5 6");
        assert_eq!(fa.pending(), 0);
    }

    #[test]
    fn test_latin1_fallback() {
        let mut fa = FrameAssembler::new();
        // 0xB0 is '°' in Latin-1 and invalid as UTF-8
        let out = fa.on_bytes(b"pm 21 \xB0C\n");
        assert_eq!(out.telemetry, vec!["pm 21 \u{B0}C"]);
    }

    #[test]
    fn test_lossy_fallback_when_chain_fails() {
        let mut fa = FrameAssembler::new().with_encodings(vec![TextEncoding::Utf8]);
        let out = fa.on_bytes(b"pm 1 \xFF 2\n");
        assert_eq!(out.telemetry, vec!["pm 1 \u{FFFD} 2"]);
    }

    #[test]
    fn test_cp1252() {
        assert_eq!(TextEncoding::Windows1252.decode(b"\x80"), Some("€".to_string()));
        assert_eq!(TextEncoding::Windows1252.decode(b"a\x81"), None);
        assert_eq!(TextEncoding::Utf8.decode(b"\xC3"), None);
        assert_eq!(TextEncoding::Latin1.decode(b"\xC3"), Some("Ã".to_string()));
    }
}
