//! Line scanning over encoded byte streams.
//!
//! Byte-oriented encodings are transcoded to UTF-8 and split on `\n`. UTF-16
//! streams are split on the 16-bit newline code unit first and each raw line
//! is decoded afterwards, so a newline byte inside a wider character never
//! splits a line.

use std::io::{self, BufRead, BufReader, Read};

use encoding_rs_io::{DecodeReaderBytes, DecodeReaderBytesBuilder};

use crate::encoding::TextEncoding;

/// A lazy, non-restartable iterator over the decoded lines of a stream.
///
/// Lines are yielded without their terminator (`\n` or `\r\n`).
pub struct LineScanner<R: Read> {
    source: Source<R>,
    first_line: bool,
    done: bool,
}

enum Source<R: Read> {
    Bytes(BufReader<DecodeReaderBytes<R, Vec<u8>>>),
    Wide {
        reader: BufReader<R>,
        encoding: TextEncoding,
    },
}

impl<R: Read> LineScanner<R> {
    pub fn new(reader: R, encoding: TextEncoding) -> Self {
        let source = if encoding.is_utf16() {
            Source::Wide {
                reader: BufReader::new(reader),
                encoding,
            }
        } else {
            let decoder = DecodeReaderBytesBuilder::new()
                .encoding(Some(encoding.as_encoding()))
                .bom_override(true)
                .build(reader);
            Source::Bytes(BufReader::new(decoder))
        };

        LineScanner {
            source,
            first_line: true,
            done: false,
        }
    }

    fn next_line(&mut self) -> io::Result<Option<String>> {
        match &mut self.source {
            Source::Bytes(reader) => {
                let mut line = String::new();
                if reader.read_line(&mut line)? == 0 {
                    return Ok(None);
                }
                Ok(Some(line))
            }
            Source::Wide { reader, encoding } => {
                let raw = read_wide_line(reader, encoding.line_separator())?;
                if raw.is_empty() {
                    return Ok(None);
                }
                let (decoded, _) = encoding.as_encoding().decode_without_bom_handling(&raw);
                Ok(Some(decoded.into_owned()))
            }
        }
    }
}

impl<R: Read> Iterator for LineScanner<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        match self.next_line() {
            Ok(Some(line)) => {
                let mut line = trim_line_ending(line);
                if self.first_line {
                    self.first_line = false;
                    if let Some(stripped) = line.strip_prefix('\u{feff}') {
                        line = stripped.to_string();
                    }
                }
                Some(Ok(line))
            }
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

/// Reads 16-bit code units up to and including `separator`.
///
/// The separator is only recognised on code unit boundaries. An odd trailing
/// byte is kept so the decoder can report it as malformed.
fn read_wide_line<R: BufRead>(reader: &mut R, separator: &[u8]) -> io::Result<Vec<u8>> {
    let mut raw = Vec::new();
    let mut unit = [0u8; 2];

    loop {
        let read = read_unit(reader, &mut unit)?;
        raw.extend_from_slice(&unit[..read]);
        if read < unit.len() || unit[..] == *separator {
            return Ok(raw);
        }
    }
}

fn read_unit<R: Read>(reader: &mut R, unit: &mut [u8; 2]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < unit.len() {
        match reader.read(&mut unit[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

fn trim_line_ending(mut line: String) -> String {
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    line
}
