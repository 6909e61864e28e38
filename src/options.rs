//! Options controlling how formatters read and write files.

use std::{collections::BTreeSet, fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::error::Error;

pub const DEFAULT_OUTPUT_ENCODING: &str = "UTF-8";

/// Configuration passed by reference into every read and write call.
///
/// Missing fields take their defaults when deserialized, so a JSON file only
/// needs to name what it changes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Options {
    /// Associates a `/* comment */` line with the entry on the next line.
    pub consume_comments: bool,
    /// Allow-list of tags for writing. Empty means every row is written.
    pub tags: BTreeSet<String>,
    /// Also write rows that carry no tags when `tags` is not empty.
    pub untagged: bool,
    /// Encoding label used for written files.
    pub output_encoding: String,
    /// Encoding label assumed for input files without a byte order mark.
    pub encoding_hint: Option<String>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            consume_comments: false,
            tags: BTreeSet::new(),
            untagged: false,
            output_encoding: DEFAULT_OUTPUT_ENCODING.to_string(),
            encoding_hint: None,
        }
    }
}

impl Options {
    /// Creates default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables/disables comment capture while reading.
    pub fn with_consume_comments(mut self, consume_comments: bool) -> Self {
        self.consume_comments = consume_comments;
        self
    }

    /// Sets the tag allow-list.
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Enables/disables writing of untagged rows under a tag filter.
    pub fn with_untagged(mut self, untagged: bool) -> Self {
        self.untagged = untagged;
        self
    }

    /// Sets the output encoding label.
    pub fn with_output_encoding(mut self, output_encoding: impl Into<String>) -> Self {
        self.output_encoding = output_encoding.into();
        self
    }

    /// Sets the input encoding hint.
    pub fn with_encoding_hint(mut self, encoding_hint: Option<String>) -> Self {
        self.encoding_hint = encoding_hint;
        self
    }

    /// Loads options from a JSON file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        tracing::debug!("Loading options from: {:?}", path);

        let content = fs::read_to_string(path).map_err(|e| Error::file(path, e))?;
        let options: Options = serde_json::from_str(&content)?;

        tracing::debug!("Options loaded: {:?}", options);
        Ok(options)
    }
}
