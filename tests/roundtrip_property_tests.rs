use proptest::prelude::*;
use std::collections::BTreeMap;
use stringtable::{FormatType, Options, Row, StringTable};

fn key_strategy() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z][a-z0-9_\\.\"]{0,15}").expect("valid key regex")
}

// No backslashes: a value ending in `\` is written unescaped and cannot be read back.
fn value_strategy() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z0-9 _\\-\\.,!\\?\"%@éüß日本]{0,30}")
        .expect("valid value regex")
}

fn dataset_strategy() -> impl Strategy<Value = BTreeMap<String, (String, Option<String>)>> {
    prop::collection::btree_map(
        key_strategy(),
        (value_strategy(), prop::option::of(value_strategy())),
        1..12,
    )
}

fn encoding_strategy() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("UTF-8"), Just("UTF-16LE"), Just("UTF-16BE")]
}

fn build_table(values: &BTreeMap<String, (String, Option<String>)>) -> StringTable {
    let mut table = StringTable::new();
    for (index, (key, (en, fr))) in values.iter().enumerate() {
        let section = if index % 2 == 0 { "Even" } else { "" };
        let mut row = Row::new(key).with_translation("en", en);
        if let Some(fr) = fr {
            row = row.with_translation("fr", fr);
        }
        table.add_row(section, row);
    }
    table
}

fn read_back(path: &std::path::Path, lang: &str) -> Result<BTreeMap<String, String>, TestCaseError> {
    let mut table = StringTable::new();
    FormatType::Strings
        .read_file(&mut table, path, lang, &Options::new())
        .map_err(|e| TestCaseError::fail(e.to_string()))?;

    Ok(table
        .rows()
        .filter_map(|row| Some((row.key.clone(), row.translation(lang)?.to_string())))
        .collect())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn write_then_read_preserves_default_language(
        values in dataset_strategy(),
        encoding in encoding_strategy()
    ) {
        let tmp = tempfile::tempdir().map_err(|e| TestCaseError::fail(e.to_string()))?;
        let path = tmp.path().join("Localizable.strings");
        let table = build_table(&values);
        let options = Options::new().with_output_encoding(encoding);

        FormatType::Strings
            .write_file(&table, &path, "en", &options)
            .map_err(|e| TestCaseError::fail(e.to_string()))?;

        let expected: BTreeMap<String, String> = values
            .iter()
            .map(|(key, (en, _))| (key.clone(), en.clone()))
            .collect();
        prop_assert_eq!(read_back(&path, "en")?, expected);
    }

    #[test]
    fn write_then_read_applies_fallback(values in dataset_strategy()) {
        let tmp = tempfile::tempdir().map_err(|e| TestCaseError::fail(e.to_string()))?;
        let path = tmp.path().join("Localizable.strings");
        let table = build_table(&values);

        FormatType::Strings
            .write_file(&table, &path, "fr", &Options::new())
            .map_err(|e| TestCaseError::fail(e.to_string()))?;

        let expected: BTreeMap<String, String> = values
            .iter()
            .map(|(key, (en, fr))| (key.clone(), fr.clone().unwrap_or_else(|| en.clone())))
            .collect();
        prop_assert_eq!(read_back(&path, "fr")?, expected);
    }

    #[test]
    fn rewriting_a_read_file_is_stable(values in dataset_strategy()) {
        let tmp = tempfile::tempdir().map_err(|e| TestCaseError::fail(e.to_string()))?;
        let first = tmp.path().join("first.strings");
        let second = tmp.path().join("second.strings");
        let options = Options::new().with_consume_comments(true);

        FormatType::Strings
            .write_file(&build_table(&values), &first, "en", &options)
            .map_err(|e| TestCaseError::fail(e.to_string()))?;

        let mut reread = StringTable::new();
        FormatType::Strings
            .read_file(&mut reread, &first, "en", &options)
            .map_err(|e| TestCaseError::fail(e.to_string()))?;
        FormatType::Strings
            .write_file(&reread, &second, "en", &options)
            .map_err(|e| TestCaseError::fail(e.to_string()))?;

        let mut twice = StringTable::new();
        FormatType::Strings
            .read_file(&mut twice, &second, "en", &options)
            .map_err(|e| TestCaseError::fail(e.to_string()))?;

        prop_assert_eq!(reread, twice);
    }
}
