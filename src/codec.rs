//! This module provides the `Codec` struct, which owns one conversion run: the
//! shared [`StringTable`] and the [`Options`] every read and write uses.
//!
//! Files are read in one after another, each under its own language, and the
//! table is then written back out once per target language. When no language
//! is given it is inferred from the path (`fr.lproj/...` → `fr`).

use std::path::Path;

use crate::{
    error::Error,
    formats::{FormatType, infer_format_from_path},
    options::Options,
    types::StringTable,
};

/// A conversion run over one [`StringTable`].
#[derive(Debug, Clone, Default)]
pub struct Codec {
    table: StringTable,
    options: Options,
}

impl Codec {
    /// Creates a new `Codec` with an empty table and default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new `Codec` with an empty table and the given options.
    pub fn with_options(options: Options) -> Self {
        Codec {
            table: StringTable::new(),
            options,
        }
    }

    /// Creates a `Codec` around an existing table, e.g. one loaded from a cache.
    pub fn from_table(table: StringTable, options: Options) -> Self {
        Codec { table, options }
    }

    pub fn table(&self) -> &StringTable {
        &self.table
    }

    pub fn table_mut(&mut self) -> &mut StringTable {
        &mut self.table
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn into_table(self) -> StringTable {
        self.table
    }

    /// Reads a file of the given format into the table.
    ///
    /// # Parameters
    /// - `path`: Path to the localization file.
    /// - `format_type`: The format of the file.
    /// - `lang`: Language of the file; inferred from `path` when `None`.
    ///
    /// # Returns
    ///
    /// The language the file was read under, or an `Error` if the language
    /// cannot be determined or reading fails.
    pub fn read_file<P: AsRef<Path>>(
        &mut self,
        path: P,
        format_type: FormatType,
        lang: Option<String>,
    ) -> Result<String, Error> {
        let path = path.as_ref();
        let lang = resolve_language(path, format_type, lang)?;

        format_type.read_file(&mut self.table, path, &lang, &self.options)?;
        Ok(lang)
    }

    /// Reads a file by inferring its format from the file extension.
    pub fn read_file_by_extension<P: AsRef<Path>>(
        &mut self,
        path: P,
        lang: Option<String>,
    ) -> Result<String, Error> {
        let path = path.as_ref();
        let format_type = infer_format_from_path(path).ok_or_else(|| {
            Error::UnsupportedFormat(format!(
                "Unsupported file extension: {:?}.",
                path.extension()
            ))
        })?;

        self.read_file(path, format_type, lang)
    }

    /// Writes the table for one language.
    ///
    /// # Parameters
    /// - `path`: Destination file path.
    /// - `format_type`: The format to write.
    /// - `lang`: Target language; inferred from `path` when `None`.
    pub fn write_file<P: AsRef<Path>>(
        &self,
        path: P,
        format_type: FormatType,
        lang: Option<String>,
    ) -> Result<String, Error> {
        let path = path.as_ref();
        let lang = resolve_language(path, format_type, lang)?;

        format_type.write_file(&self.table, path, &lang, &self.options)?;
        Ok(lang)
    }

    /// Writes the table for one language, inferring the format from the extension.
    pub fn write_file_by_extension<P: AsRef<Path>>(
        &self,
        path: P,
        lang: Option<String>,
    ) -> Result<String, Error> {
        let path = path.as_ref();
        let format_type = infer_format_from_path(path).ok_or_else(|| {
            Error::UnsupportedFormat(format!(
                "Unsupported file extension: {:?}.",
                path.extension()
            ))
        })?;

        self.write_file(path, format_type, lang)
    }
}

fn resolve_language(
    path: &Path,
    format_type: FormatType,
    lang: Option<String>,
) -> Result<String, Error> {
    match lang {
        Some(lang) => Ok(lang),
        None => format_type.determine_language(path).ok_or_else(|| {
            Error::UnknownLanguage(format!(
                "Failed to infer language from {}, please provide a language code manually.",
                path.display()
            ))
        }),
    }
}
