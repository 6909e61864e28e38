//! Support for Apple `.strings` localization format.
//!
//! Each language lives in a `<lang>.lproj` directory. The file holds one
//! `"key" = "value";` entry per line, optionally preceded by a single-line
//! `/* comment */`.

use std::{
    fs,
    io::{Read, Write},
    path::Path,
};

use indoc::indoc;
use lazy_static::lazy_static;
use regex::Regex;

use crate::{
    encoding::{TextEncoding, encode_output},
    error::Error,
    lines::LineScanner,
    options::Options,
    traits::Formatter,
    types::StringTable,
};

pub const FORMAT_NAME: &str = "strings";
pub const EXTENSION: &str = "strings";
pub const DEFAULT_FILE_NAME: &str = "Localizable.strings";
pub const DIRECTORY_SUFFIX: &str = "lproj";

lazy_static! {
    static ref ENTRY_REGEX: Regex =
        Regex::new(r#""((?:[^"\\]|\\.)+)"\s*=\s*"((?:[^"\\]|\\.)*)"\s*;"#).unwrap();
    static ref COMMENT_REGEX: Regex = Regex::new(r"/\* (.*) \*/").unwrap();
    static ref LANGUAGE_DIRECTORY_REGEX: Regex = Regex::new(r"^(.+)\.lproj$").unwrap();
}

/// The Apple `.strings` formatter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Format;

/// Comment carried from one line to the next while reading.
///
/// A comment line moves to `Pending`; every other line, entries included,
/// moves back to `Empty`. So a comment only reaches the entry directly below
/// it, and of several stacked comment lines only the last one counts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
enum CommentState {
    #[default]
    Empty,
    Pending(String),
}

impl CommentState {
    fn advance(self, line: &str) -> Self {
        match COMMENT_REGEX.captures(line) {
            Some(captures) => CommentState::Pending(captures[1].to_string()),
            None => CommentState::Empty,
        }
    }

    fn pending(&self) -> Option<&str> {
        match self {
            CommentState::Pending(comment) => Some(comment),
            CommentState::Empty => None,
        }
    }
}

impl Formatter for Format {
    fn format_name(&self) -> &'static str {
        FORMAT_NAME
    }

    fn extension(&self) -> &'static str {
        EXTENSION
    }

    fn default_file_name(&self) -> &'static str {
        DEFAULT_FILE_NAME
    }

    fn can_handle_directory(&self, path: &Path) -> Result<bool, Error> {
        for entry in fs::read_dir(path).map_err(|e| Error::file(path, e))? {
            let entry = entry.map_err(|e| Error::file(path, e))?;
            let name = entry.file_name();
            if name
                .to_str()
                .is_some_and(|name| LANGUAGE_DIRECTORY_REGEX.is_match(name))
            {
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn determine_language(&self, path: &Path) -> Option<String> {
        path.components().find_map(|component| {
            let segment = component.as_os_str().to_str()?;
            LANGUAGE_DIRECTORY_REGEX
                .captures(segment)
                .map(|captures| captures[1].to_string())
        })
    }

    fn read<R: Read>(
        &self,
        table: &mut StringTable,
        reader: R,
        encoding: TextEncoding,
        lang: &str,
        options: &Options,
    ) -> Result<(), Error> {
        let mut comment = CommentState::Empty;
        let mut entries = 0usize;

        for line in LineScanner::new(reader, encoding) {
            let line = line?;

            if let Some((key, value)) = parse_entry(&line) {
                table.set_translation(&key, lang, &value);
                if let Some(text) = comment.pending() {
                    table.set_comment(&key, text);
                }
                entries += 1;
            }

            if options.consume_comments {
                comment = comment.advance(&line);
            }
        }

        tracing::debug!(lang, entries, "Read .strings entries");
        Ok(())
    }

    fn write<W: Write>(
        &self,
        table: &StringTable,
        mut writer: W,
        lang: &str,
        options: &Options,
    ) -> Result<(), Error> {
        let content = render(table, lang, options);
        let bytes = encode_output(&content, &options.output_encoding)?;
        writer.write_all(&bytes)?;
        Ok(())
    }
}

/// Renders the text of a `.strings` file for `lang`.
fn render(table: &StringTable, lang: &str, options: &Options) -> String {
    let default_lang = table.default_language();

    let mut content = format!(
        indoc! {"
        /**
         * Apple Strings File
         * Generated by stringtable {}
         * Language: {}
         */
    "},
        env!("CARGO_PKG_VERSION"),
        lang
    );

    let mut written = 0usize;
    for section in table.sections() {
        let mut printed_section = false;

        for row in section
            .rows
            .iter()
            .filter(|row| row.matches_tags(&options.tags, options.untagged))
        {
            if !printed_section {
                if !section.name.is_empty() {
                    content.push_str(&format!("\n/********** {} **********/\n", section.name));
                }
                printed_section = true;
            }

            let Some(value) = row.translated_string_for_lang(lang, default_lang) else {
                continue;
            };

            content.push('\n');
            if let Some(comment) = row.comment.as_deref().filter(|c| !c.is_empty()) {
                content.push_str(&format!("/* {} */\n", escape_comment(comment)));
            }
            content.push_str(&format!("\"{}\" = \"{}\";\n", escape(&row.key), escape(value)));
            written += 1;
        }
    }

    tracing::debug!(lang, written, "Rendered .strings entries");
    content
}

fn parse_entry(line: &str) -> Option<(String, String)> {
    let captures = ENTRY_REGEX.captures(line)?;
    Some((unescape(&captures[1]), unescape(&captures[2])))
}

// Only escaped quotes are translated; other backslash escapes pass through.
fn unescape(text: &str) -> String {
    text.replace("\\\"", "\"")
}

// Backslashes are written as-is, so a value ending in a lone `\` escapes its
// closing quote and the entry no longer reads back.
fn escape(text: &str) -> String {
    text.replace('"', "\\\"")
}

fn escape_comment(text: &str) -> String {
    text.replace("*/", "* /")
}
