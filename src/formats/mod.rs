//! All supported localization file formats for stringtable.
//!
//! This module re-exports the formatter of each format and provides the
//! [`FormatType`] enum, the registry used to pick a formatter by name, by file
//! extension or by directory layout.

pub mod strings;

use std::{
    fmt::{Display, Formatter as FmtFormatter},
    path::Path,
    str::FromStr,
};

// Reexporting the formats for easier access
pub use strings::Format as AppleFormat;

use crate::{Error, options::Options, traits::Formatter, types::StringTable};

/// Represents all supported localization file formats for generic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatType {
    /// Apple `.strings` format in `<lang>.lproj` directories.
    Strings,
}

/// Implements [`std::fmt::Display`] for [`FormatType`].
///
/// # Example
/// ```rust
/// use stringtable::formats::FormatType;
/// assert_eq!(FormatType::Strings.to_string(), "strings");
/// ```
impl Display for FormatType {
    fn fmt(&self, f: &mut FmtFormatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.format_name())
    }
}

/// Implements [`std::str::FromStr`] for [`FormatType`].
///
/// Accepts `"strings"` and `"apple"`, case-insensitively.
/// Returns [`crate::error::Error::UnknownFormat`] for unknown strings.
///
/// # Example
/// ```rust
/// use stringtable::formats::FormatType;
/// use std::str::FromStr;
/// assert_eq!(FormatType::from_str("apple").unwrap(), FormatType::Strings);
/// assert!(FormatType::from_str("foobar").is_err());
/// ```
impl FromStr for FormatType {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        match s.as_str() {
            "strings" | "apple" => Ok(FormatType::Strings),
            other => Err(Error::UnknownFormat(other.to_string())),
        }
    }
}

impl FormatType {
    /// Every registered format, in detection order.
    pub const ALL: [FormatType; 1] = [FormatType::Strings];

    pub fn format_name(&self) -> &'static str {
        match self {
            FormatType::Strings => AppleFormat.format_name(),
        }
    }

    /// Returns the typical file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            FormatType::Strings => AppleFormat.extension(),
        }
    }

    pub fn default_file_name(&self) -> &'static str {
        match self {
            FormatType::Strings => AppleFormat.default_file_name(),
        }
    }

    pub fn can_handle_directory(&self, path: &Path) -> Result<bool, Error> {
        match self {
            FormatType::Strings => AppleFormat.can_handle_directory(path),
        }
    }

    pub fn determine_language(&self, path: &Path) -> Option<String> {
        match self {
            FormatType::Strings => AppleFormat.determine_language(path),
        }
    }

    pub fn read_file<P: AsRef<Path>>(
        &self,
        table: &mut StringTable,
        path: P,
        lang: &str,
        options: &Options,
    ) -> Result<(), Error> {
        match self {
            FormatType::Strings => AppleFormat.read_file(table, path, lang, options),
        }
    }

    pub fn write_file<P: AsRef<Path>>(
        &self,
        table: &StringTable,
        path: P,
        lang: &str,
        options: &Options,
    ) -> Result<(), Error> {
        match self {
            FormatType::Strings => AppleFormat.write_file(table, path, lang, options),
        }
    }

    /// Returns the first registered format whose directory layout matches `path`.
    pub fn detect_for_directory(path: &Path) -> Result<Option<FormatType>, Error> {
        for format in FormatType::ALL {
            if format.can_handle_directory(path)? {
                return Ok(Some(format));
            }
        }
        Ok(None)
    }
}

/// Infers a [`FormatType`] from a file path's extension.
pub fn infer_format_from_path<P: AsRef<Path>>(path: P) -> Option<FormatType> {
    let extension = path.as_ref().extension()?.to_str()?;
    FormatType::ALL
        .into_iter()
        .find(|format| format.extension().eq_ignore_ascii_case(extension))
}
