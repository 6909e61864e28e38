//! Traits for format-specific reading and writing of the string table.

use std::{
    fs::File,
    io::{BufWriter, Read, Write},
    path::Path,
};

use crate::{
    encoding::{TextEncoding, detect_encoding},
    error::Error,
    options::Options,
    types::StringTable,
};

/// A localization file format that can be converted to and from a [`StringTable`].
///
/// Implementors provide the stream-level `read`/`write`; file handling, encoding
/// detection and error paths come from the provided methods.
///
/// # Example
///
/// ```rust,no_run
/// use stringtable::{Options, StringTable, formats::AppleFormat, traits::Formatter};
///
/// let options = Options::new().with_consume_comments(true);
/// let mut table = StringTable::new();
/// AppleFormat.read_file(&mut table, "en.lproj/Localizable.strings", "en", &options)?;
/// AppleFormat.write_file(&table, "fr.lproj/Localizable.strings", "fr", &options)?;
/// # Ok::<(), stringtable::Error>(())
/// ```
pub trait Formatter {
    /// Identifier used by the format registry.
    fn format_name(&self) -> &'static str;

    /// Typical file extension, without the dot.
    fn extension(&self) -> &'static str;

    /// File name used when writing into a language directory.
    fn default_file_name(&self) -> &'static str;

    /// Whether `path` looks like a directory laid out for this format.
    fn can_handle_directory(&self, path: &Path) -> Result<bool, Error>;

    /// Extracts the language code encoded in `path`, if any.
    fn determine_language(&self, path: &Path) -> Option<String>;

    /// Merges the entries of `reader` into `table` under `lang`.
    fn read<R: Read>(
        &self,
        table: &mut StringTable,
        reader: R,
        encoding: TextEncoding,
        lang: &str,
        options: &Options,
    ) -> Result<(), Error>;

    /// Serializes `table` for `lang` into `writer`.
    fn write<W: Write>(
        &self,
        table: &StringTable,
        writer: W,
        lang: &str,
        options: &Options,
    ) -> Result<(), Error>;

    /// Reads the file at `path` into `table` under `lang`.
    fn read_file<P: AsRef<Path>>(
        &self,
        table: &mut StringTable,
        path: P,
        lang: &str,
        options: &Options,
    ) -> Result<(), Error> {
        let path = path.as_ref();
        let encoding = detect_encoding(path, options.encoding_hint.as_deref())?;
        let file = File::open(path).map_err(|e| Error::file(path, e))?;

        tracing::debug!(path = %path.display(), lang, %encoding, "Reading file");
        self.read(table, file, encoding, lang, options)
            .map_err(|e| e.with_path(path))
    }

    /// Writes `table` for `lang` to the file at `path`, replacing it.
    ///
    /// The output is rendered in memory first, so a failed conversion leaves an
    /// existing file at `path` untouched.
    fn write_file<P: AsRef<Path>>(
        &self,
        table: &StringTable,
        path: P,
        lang: &str,
        options: &Options,
    ) -> Result<(), Error> {
        let path = path.as_ref();
        let mut rendered = Vec::new();
        self.write(table, &mut rendered, lang, options)
            .map_err(|e| e.with_path(path))?;

        tracing::debug!(path = %path.display(), lang, bytes = rendered.len(), "Writing file");
        let file = File::create(path).map_err(|e| Error::file(path, e))?;
        let mut writer = BufWriter::new(file);
        writer
            .write_all(&rendered)
            .and_then(|()| writer.flush())
            .map_err(|e| Error::file(path, e))
    }
}
