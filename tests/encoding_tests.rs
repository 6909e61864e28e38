use std::fs;
use std::path::{Path, PathBuf};

use stringtable::{
    Codec, Error, FormatType, Options, StringTable, TextEncoding, detect_encoding,
};

const CONTENT: &str = "/**\n * Apple Strings File\n */\n\n/* Greeting shown on launch */\n\"welcome\" = \"Grüße, 世界!\";\r\n\"quote\" = \"Say \\\"hi\\\"\";\n\"gurmukhi\" = \"ਊਊ\";\n";

fn utf16le(text: &str, bom: bool) -> Vec<u8> {
    let mut bytes = if bom { vec![0xff, 0xfe] } else { Vec::new() };
    bytes.extend(text.encode_utf16().flat_map(u16::to_le_bytes));
    bytes
}

fn utf16be(text: &str, bom: bool) -> Vec<u8> {
    let mut bytes = if bom { vec![0xfe, 0xff] } else { Vec::new() };
    bytes.extend(text.encode_utf16().flat_map(u16::to_be_bytes));
    bytes
}

fn write_fixture(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
    let lproj = dir.join(format!("{}.lproj", name));
    fs::create_dir_all(&lproj).unwrap();
    let path = lproj.join("Localizable.strings");
    fs::write(&path, bytes).unwrap();
    path
}

fn read_table(path: &Path, options: &Options) -> StringTable {
    let mut table = StringTable::new();
    FormatType::Strings
        .read_file(&mut table, path, "xx", options)
        .unwrap();
    table
}

#[test]
fn utf16_files_read_like_utf8() {
    let dir = tempfile::tempdir().unwrap();
    let options = Options::new().with_consume_comments(true);

    let expected = read_table(&write_fixture(dir.path(), "utf8", CONTENT.as_bytes()), &options);
    assert_eq!(expected.rows().count(), 3);
    assert_eq!(
        expected.find_row("welcome").unwrap().comment.as_deref(),
        Some("Greeting shown on launch")
    );
    assert_eq!(
        expected.find_row("quote").unwrap().translation("xx"),
        Some("Say \"hi\"")
    );

    let variants = [
        ("le_bom", utf16le(CONTENT, true)),
        ("le", utf16le(CONTENT, false)),
        ("be_bom", utf16be(CONTENT, true)),
        ("be", utf16be(CONTENT, false)),
    ];
    for (name, bytes) in variants {
        let table = read_table(&write_fixture(dir.path(), name, &bytes), &options);
        assert_eq!(table, expected, "variant {}", name);
    }
}

#[test]
fn detects_encoding_of_fixtures() {
    let dir = tempfile::tempdir().unwrap();

    let le = write_fixture(dir.path(), "le", &utf16le(CONTENT, false));
    let be = write_fixture(dir.path(), "be", &utf16be(CONTENT, true));
    let utf8 = write_fixture(dir.path(), "utf8", CONTENT.as_bytes());

    assert_eq!(detect_encoding(&le, None).unwrap(), TextEncoding::Utf16Le);
    assert_eq!(detect_encoding(&be, None).unwrap(), TextEncoding::Utf16Be);
    assert_eq!(detect_encoding(&utf8, None).unwrap(), TextEncoding::Utf8);
}

#[test]
fn legacy_encoding_uses_hint() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_fixture(dir.path(), "fr", b"\"drink\" = \"caf\xe9 cr\xe8me\";\n");

    let options = Options::new().with_encoding_hint(Some("windows-1252".to_string()));
    let table = read_table(&path, &options);
    assert_eq!(
        table.find_row("drink").unwrap().translation("xx"),
        Some("café crème")
    );
}

#[test]
fn unknown_hint_falls_back_to_text_read() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_fixture(dir.path(), "en", "\"k\" = \"naïve\";\n".as_bytes());

    let options = Options::new().with_encoding_hint(Some("not-a-charset".to_string()));
    let table = read_table(&path, &options);
    assert_eq!(table.find_row("k").unwrap().translation("xx"), Some("naïve"));
}

#[test]
fn write_in_each_encoding_reads_back() {
    let dir = tempfile::tempdir().unwrap();

    for label in ["UTF-8", "UTF-16LE", "UTF-16BE", "windows-1252"] {
        let mut codec = Codec::with_options(Options::new().with_output_encoding(label));
        codec.table_mut().set_translation("drink", "fr", "café");

        let path = dir.path().join("fr.lproj").join(format!("{}.strings", label));
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        codec.write_file_by_extension(&path, None).unwrap();

        let hint = Options::new().with_encoding_hint(Some(label.to_string()));
        let mut reader = Codec::with_options(hint);
        reader.read_file_by_extension(&path, None).unwrap();
        assert_eq!(
            reader.table().find_row("drink").unwrap().translation("fr"),
            Some("café"),
            "encoding {}",
            label
        );
    }
}

#[test]
fn unknown_output_encoding_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Localizable.strings");
    fs::write(&path, "\"keep\" = \"me\";\n").unwrap();

    let mut codec = Codec::with_options(Options::new().with_output_encoding("klingon-8"));
    codec.table_mut().set_translation("k", "en", "v");
    let err = codec
        .write_file(&path, FormatType::Strings, Some("en".to_string()))
        .unwrap_err();
    assert!(matches!(err, Error::UnsupportedEncoding(_)));
    assert_eq!(fs::read_to_string(&path).unwrap(), "\"keep\" = \"me\";\n");
}

#[test]
fn unreadable_file_names_the_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.lproj").join("Localizable.strings");

    let mut table = StringTable::new();
    let err = FormatType::Strings
        .read_file(&mut table, &path, "en", &Options::new())
        .unwrap_err();
    assert!(matches!(err, Error::File { .. }));
    assert_eq!(err.path(), Some(path.as_path()));
}
