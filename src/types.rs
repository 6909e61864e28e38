//! Core, format-agnostic types for stringtable.
//! Formatters read into these; formatters write these.

use std::{
    collections::{BTreeMap, BTreeSet},
    fmt::Display,
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::Path,
};

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Name of the section that receives keys first seen while reading a file.
pub const UNCATEGORIZED_SECTION: &str = "Uncategorized";

/// The canonical table of translatable strings shared by every formatter.
///
/// Rows are grouped into ordered sections. Keys are unique across the whole
/// table, not only within a section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct StringTable {
    /// Ordered list of all sections.
    #[serde(default)]
    sections: Vec<Section>,

    /// Every language code that received a translation, in first-seen order.
    #[serde(default)]
    language_codes: Vec<String>,
}

impl StringTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn language_codes(&self) -> &[String] {
        &self.language_codes
    }

    /// The first language known to the table. Used as the fallback when writing.
    pub fn default_language(&self) -> Option<&str> {
        self.language_codes.first().map(String::as_str)
    }

    /// Registers a language code. Registering a known code is a no-op.
    pub fn add_language_code(&mut self, code: &str) {
        if !self.language_codes.iter().any(|c| c == code) {
            self.language_codes.push(code.to_string());
        }
    }

    /// Returns the section called `name`, appending an empty one if missing.
    pub fn add_section(&mut self, name: &str) -> &mut Section {
        let index = match self.sections.iter().position(|s| s.name == name) {
            Some(index) => index,
            None => {
                self.sections.push(Section::new(name));
                self.sections.len() - 1
            }
        };
        &mut self.sections[index]
    }

    /// Adds `row` to the section called `name`.
    ///
    /// If the key already exists anywhere in the table the row is merged into
    /// the existing one instead: translations are overwritten per language,
    /// tags are unioned, and the comment is replaced when `row` carries one.
    pub fn add_row(&mut self, section: &str, row: Row) {
        for lang in row.translations.keys() {
            self.add_language_code(lang);
        }

        if let Some(existing) = self.find_row_mut(&row.key) {
            existing.translations.extend(row.translations);
            existing.tags.extend(row.tags);
            if row.comment.is_some() {
                existing.comment = row.comment;
            }
            return;
        }

        self.add_section(section).rows.push(row);
    }

    /// Records `value` as the `lang` translation of `key`.
    ///
    /// Unknown keys get a new row in the [`UNCATEGORIZED_SECTION`].
    pub fn set_translation(&mut self, key: &str, lang: &str, value: &str) {
        self.add_language_code(lang);

        match self.find_row_mut(key) {
            Some(row) => row.set_translation(lang, value),
            None => {
                let mut row = Row::new(key);
                row.set_translation(lang, value);
                self.add_section(UNCATEGORIZED_SECTION).rows.push(row);
            }
        }
    }

    /// Overwrites the comment of an existing row. Returns `false` if the key is unknown.
    pub fn set_comment(&mut self, key: &str, comment: &str) -> bool {
        match self.find_row_mut(key) {
            Some(row) => {
                row.comment = Some(comment.to_string());
                true
            }
            None => false,
        }
    }

    pub fn find_row(&self, key: &str) -> Option<&Row> {
        self.rows().find(|row| row.key == key)
    }

    pub fn find_row_mut(&mut self, key: &str) -> Option<&mut Row> {
        self.sections
            .iter_mut()
            .flat_map(|section| section.rows.iter_mut())
            .find(|row| row.key == key)
    }

    /// Iterates every row of every section, in table order.
    pub fn rows(&self) -> impl Iterator<Item = &Row> {
        self.sections.iter().flat_map(|section| section.rows.iter())
    }

    pub fn is_empty(&self) -> bool {
        self.rows().next().is_none()
    }

    /// Caches the table to a JSON file.
    pub fn cache_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| Error::file(parent, e))?;
        }
        let json = serde_json::to_vec_pretty(self)?;
        let file = File::create(path).map_err(|e| Error::file(path, e))?;
        let mut writer = BufWriter::new(file);
        writer
            .write_all(&json)
            .and_then(|()| writer.flush())
            .map_err(|e| Error::file(path, e))
    }

    /// Loads a table previously written by [`StringTable::cache_to_file`].
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| Error::file(path, e))?;
        let table = serde_json::from_reader(BufReader::new(file))?;
        Ok(table)
    }
}

/// A named (possibly anonymous) group of rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Section {
    /// Section name, empty for the anonymous section.
    #[serde(default)]
    pub name: String,

    /// Ordered rows of this section.
    #[serde(default)]
    pub rows: Vec<Row>,
}

impl Section {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            rows: Vec::new(),
        }
    }
}

/// A single translatable entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Row {
    /// Unique key across the whole table.
    pub key: String,

    /// Optional comment for translators. Not language specific.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub comment: Option<String>,

    /// Labels used to filter rows when writing.
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    #[serde(default)]
    pub tags: BTreeSet<String>,

    /// Language code → translated text. Only languages that were read or set appear here.
    #[serde(default)]
    pub translations: BTreeMap<String, String>,
}

impl Row {
    pub fn new(key: &str) -> Self {
        Self {
            key: key.to_string(),
            comment: None,
            tags: BTreeSet::new(),
            translations: BTreeMap::new(),
        }
    }

    pub fn with_comment(mut self, comment: &str) -> Self {
        self.comment = Some(comment.to_string());
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    pub fn with_translation(mut self, lang: &str, value: &str) -> Self {
        self.set_translation(lang, value);
        self
    }

    pub fn set_translation(&mut self, lang: &str, value: &str) {
        self.translations
            .insert(lang.to_string(), value.to_string());
    }

    pub fn translation(&self, lang: &str) -> Option<&str> {
        self.translations.get(lang).map(String::as_str)
    }

    /// The `lang` translation, falling back to `default_lang` when missing.
    pub fn translated_string_for_lang(&self, lang: &str, default_lang: Option<&str>) -> Option<&str> {
        self.translation(lang)
            .or_else(|| default_lang.and_then(|default| self.translation(default)))
    }

    /// Whether this row passes a tag filter.
    ///
    /// An empty allow-list lets every row through. Otherwise the row must carry
    /// at least one allowed tag, or carry no tags at all while `include_untagged`
    /// is set.
    pub fn matches_tags(&self, tags: &BTreeSet<String>, include_untagged: bool) -> bool {
        if tags.is_empty() {
            return true;
        }
        if include_untagged && self.tags.is_empty() {
            return true;
        }
        self.tags.iter().any(|tag| tags.contains(tag))
    }
}

impl Display for Row {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Row {{ key: {}, translations: {}, tags: {:?} }}",
            self.key,
            self.translations.len(),
            self.tags
        )
    }
}
