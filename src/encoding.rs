//! Text encoding detection for input files and encoding of output text.
//!
//! Detection only looks at the first bytes of a file. A byte order mark wins,
//! then the BOM-less UTF-16 heuristic, then the caller's hint.

use std::{
    fmt::{Display, Formatter},
    fs::File,
    io::Read,
    path::Path,
};

use encoding_rs::{Encoding, UTF_8, UTF_16BE, UTF_16LE};

use crate::error::Error;

/// Semantic encoding of a file as seen by the line scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    Utf8,
    Utf16Le,
    Utf16Be,
    /// A legacy byte-oriented encoding, usually selected through a hint.
    Other(&'static Encoding),
}

impl TextEncoding {
    /// Resolves a WHATWG encoding label (`"utf-8"`, `"UTF-16LE"`, `"latin1"`, ...).
    pub fn for_label(label: &str) -> Option<Self> {
        Encoding::for_label(label.trim().as_bytes()).map(Self::from_encoding)
    }

    fn from_encoding(encoding: &'static Encoding) -> Self {
        if encoding == UTF_8 {
            TextEncoding::Utf8
        } else if encoding == UTF_16LE {
            TextEncoding::Utf16Le
        } else if encoding == UTF_16BE {
            TextEncoding::Utf16Be
        } else {
            TextEncoding::Other(encoding)
        }
    }

    /// The `encoding_rs` decoder behind this encoding.
    pub fn as_encoding(&self) -> &'static Encoding {
        match self {
            TextEncoding::Utf8 => UTF_8,
            TextEncoding::Utf16Le => UTF_16LE,
            TextEncoding::Utf16Be => UTF_16BE,
            TextEncoding::Other(encoding) => *encoding,
        }
    }

    pub fn is_utf16(&self) -> bool {
        matches!(self, TextEncoding::Utf16Le | TextEncoding::Utf16Be)
    }

    /// The newline as it appears on disk: one byte, or one 16-bit code unit.
    pub fn line_separator(&self) -> &'static [u8] {
        match self {
            TextEncoding::Utf16Le => &[0x0a, 0x00],
            TextEncoding::Utf16Be => &[0x00, 0x0a],
            TextEncoding::Utf8 | TextEncoding::Other(_) => b"\n",
        }
    }
}

impl Display for TextEncoding {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_encoding().name())
    }
}

/// Detects the encoding of the file at `path`.
///
/// `hint` is consulted only when the header carries no marker. An unknown
/// hint falls back to UTF-8. Failing to read the file is an error.
pub fn detect_encoding<P: AsRef<Path>>(path: P, hint: Option<&str>) -> Result<TextEncoding, Error> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| Error::file(path, e))?;

    let mut header = Vec::with_capacity(3);
    file.take(3)
        .read_to_end(&mut header)
        .map_err(|e| Error::file(path, e))?;

    Ok(detect_from_header(&header, hint))
}

/// Detects an encoding from the first bytes of some content.
pub fn detect_from_header(header: &[u8], hint: Option<&str>) -> TextEncoding {
    if header.starts_with(&[0xef, 0xbb, 0xbf]) {
        return TextEncoding::Utf8;
    }

    match header {
        [0xff, 0xfe, ..] => return TextEncoding::Utf16Le,
        [0xfe, 0xff, ..] => return TextEncoding::Utf16Be,
        [0, second, ..] if *second != 0 => return TextEncoding::Utf16Be,
        [first, 0, ..] if *first != 0 => return TextEncoding::Utf16Le,
        _ => {}
    }

    match hint {
        Some(label) => TextEncoding::for_label(label).unwrap_or_else(|| {
            tracing::warn!(label, "Unknown encoding hint, reading as UTF-8");
            TextEncoding::Utf8
        }),
        None => TextEncoding::Utf8,
    }
}

/// Encodes `text` for writing with the encoding named by `label`.
///
/// UTF-16 output starts with a byte order mark so it can be detected again.
/// Characters the target encoding cannot represent are replaced by numeric
/// character references and reported with a warning.
pub fn encode_output(text: &str, label: &str) -> Result<Vec<u8>, Error> {
    let encoding = TextEncoding::for_label(label)
        .ok_or_else(|| Error::UnsupportedEncoding(label.to_string()))?;

    let bytes = match encoding {
        TextEncoding::Utf8 => text.as_bytes().to_vec(),
        TextEncoding::Utf16Le => std::iter::once(0xfeff)
            .chain(text.encode_utf16())
            .flat_map(u16::to_le_bytes)
            .collect(),
        TextEncoding::Utf16Be => std::iter::once(0xfeff)
            .chain(text.encode_utf16())
            .flat_map(u16::to_be_bytes)
            .collect(),
        TextEncoding::Other(encoding) => {
            let (bytes, _, had_errors) = encoding.encode(text);
            if had_errors {
                tracing::warn!(
                    encoding = encoding.name(),
                    "Output contains characters the target encoding cannot represent"
                );
            }
            bytes.into_owned()
        }
    };

    Ok(bytes)
}
