#![forbid(unsafe_code)]
//! Canonical string table toolkit for Rust.
//!
//! Reads Apple `.strings` files into a language-agnostic [`StringTable`] and
//! writes the table back out, one file per language, with tag filtering and
//! fallback to the table's default language.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use stringtable::{Codec, Options};
//!
//! let mut codec = Codec::with_options(Options::new().with_consume_comments(true));
//! codec.read_file_by_extension("en.lproj/Localizable.strings", None)?;
//! codec.read_file_by_extension("fr.lproj/Localizable.strings", None)?;
//! codec.write_file_by_extension("de.lproj/Localizable.strings", None)?;
//! # Ok::<(), stringtable::Error>(())
//! ```
//!
//! # Encodings
//!
//! Input files may be UTF-8, UTF-16 (either byte order, with or without a
//! byte order mark) or a legacy encoding named by [`Options::encoding_hint`].
//! Output uses [`Options::output_encoding`].

pub mod codec;
pub mod encoding;
pub mod error;
pub mod formats;
pub mod lines;
pub mod options;
pub mod traits;
pub mod types;

// Re-export most used types for easy consumption
pub use crate::{
    codec::Codec,
    encoding::{TextEncoding, detect_encoding},
    error::Error,
    formats::{AppleFormat, FormatType, infer_format_from_path},
    options::Options,
    traits::Formatter,
    types::{Row, Section, StringTable},
};
