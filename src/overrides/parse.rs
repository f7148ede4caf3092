// ABOUTME: Parsers for raw override strings.
// ABOUTME: Handles "key=value,key=value" maps with escaped commas and executable paths.

use std::collections::BTreeMap;
use std::ffi::OsStr;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationParseError {
    #[error("'{0}' is not a valid key-value pair")]
    MalformedEntry(String),

    #[error("'{0}' has an empty key")]
    EmptyKey(String),

    #[error("executable path cannot be empty")]
    EmptyExecutable,

    #[error("value is not valid UTF-8")]
    NotUnicode,
}

/// Parse a `key1=value1,key2=value2` string into a map.
///
/// A comma preceded by a backslash is kept literally. The first `=` splits key
/// from value, so values may contain `=`. Later duplicates replace earlier ones.
/// A trailing comma is allowed; any other empty entry is malformed.
pub fn parse_map_property(raw: &str) -> Result<BTreeMap<String, String>, ConfigurationParseError> {
    let mut map = BTreeMap::new();

    for entry in split_unescaped(raw) {
        let Some((key, value)) = entry.split_once('=') else {
            return Err(ConfigurationParseError::MalformedEntry(entry));
        };

        if key.is_empty() {
            return Err(ConfigurationParseError::EmptyKey(entry.clone()));
        }

        map.insert(key.to_string(), value.to_string());
    }

    Ok(map)
}

/// Parse a raw environment override, which must be UTF-8.
pub fn parse_map_override(raw: &OsStr) -> Result<BTreeMap<String, String>, ConfigurationParseError> {
    raw.to_str()
        .ok_or(ConfigurationParseError::NotUnicode)
        .and_then(parse_map_property)
}

/// Parse an executable override. The path is kept verbatim, including bytes
/// that are not UTF-8.
pub fn parse_executable_property(raw: &OsStr) -> Result<PathBuf, ConfigurationParseError> {
    if raw.is_empty() || raw.to_str().is_some_and(|s| s.trim().is_empty()) {
        return Err(ConfigurationParseError::EmptyExecutable);
    }
    Ok(PathBuf::from(raw))
}

fn split_unescaped(raw: &str) -> Vec<String> {
    let mut entries = Vec::new();
    let mut current = String::new();
    let mut chars = raw.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\\' if chars.peek() == Some(&',') => {
                chars.next();
                current.push(',');
            }
            ',' => entries.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    entries.push(current);

    while entries.last().is_some_and(|e| e.is_empty()) {
        entries.pop();
    }

    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_string_is_empty_map() {
        assert!(parse_map_property("").unwrap().is_empty());
    }

    #[test]
    fn parses_pairs() {
        let map = parse_map_property("A=1,B=2").unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map["A"], "1");
        assert_eq!(map["B"], "2");
    }

    #[test]
    fn last_duplicate_wins() {
        let map = parse_map_property("A=1,A=2").unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(map["A"], "2");
    }

    #[test]
    fn entry_without_equals_is_malformed() {
        assert_eq!(
            parse_map_property("A=1,B"),
            Err(ConfigurationParseError::MalformedEntry("B".to_string()))
        );
    }

    #[test]
    fn empty_key_is_rejected() {
        assert_eq!(
            parse_map_property("=1"),
            Err(ConfigurationParseError::EmptyKey("=1".to_string()))
        );
    }

    #[test]
    fn value_may_contain_equals_and_be_empty() {
        let map = parse_map_property("OPTS=-Dx=y,EMPTY=").unwrap();
        assert_eq!(map["OPTS"], "-Dx=y");
        assert_eq!(map["EMPTY"], "");
    }

    #[test]
    fn escaped_comma_stays_in_value() {
        let map = parse_map_property(r"NO_PROXY=localhost\,127.0.0.1,A=1").unwrap();
        assert_eq!(map["NO_PROXY"], "localhost,127.0.0.1");
        assert_eq!(map["A"], "1");
    }

    #[test]
    fn trailing_comma_is_ignored() {
        let map = parse_map_property("A=1,").unwrap();
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn interior_empty_entry_is_malformed() {
        assert_eq!(
            parse_map_property("A=1,,B=2"),
            Err(ConfigurationParseError::MalformedEntry(String::new()))
        );
    }

    #[test]
    fn executable_is_kept_verbatim() {
        assert_eq!(
            parse_executable_property(OsStr::new("/usr/local/bin/podman")).unwrap(),
            PathBuf::from("/usr/local/bin/podman")
        );
    }

    #[test]
    fn blank_executable_is_rejected() {
        assert_eq!(
            parse_executable_property(OsStr::new("  ")),
            Err(ConfigurationParseError::EmptyExecutable)
        );
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_executable_is_kept_verbatim() {
        use std::os::unix::ffi::OsStrExt;

        let raw = OsStr::from_bytes(b"/opt/\xffbin/podman");
        assert_eq!(parse_executable_property(raw).unwrap(), PathBuf::from(raw));
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_map_is_rejected() {
        use std::os::unix::ffi::OsStrExt;

        assert_eq!(
            parse_map_override(OsStr::from_bytes(b"A=\xff")),
            Err(ConfigurationParseError::NotUnicode)
        );
    }
}
