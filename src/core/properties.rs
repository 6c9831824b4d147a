use crate::core::error::InitializationError;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::info;

/// Key/value pairs read from a property resource.
///
/// Entries are kept ordered by key, so iteration (and the startup log built
/// from it) is always lexicographic regardless of file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertySet {
    entries: BTreeMap<String, String>,
}

impl PropertySet {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, InitializationError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| InitializationError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&raw)
    }

    /// Parses `key=value` property text.
    ///
    /// `=`, `:` or whitespace separate key from value. `#` and `!` start
    /// comment lines. A line ending in an odd number of backslashes continues
    /// on the next one. Later duplicates win.
    pub fn parse(raw: &str) -> Result<Self, InitializationError> {
        let mut entries = BTreeMap::new();
        let mut logical = String::new();
        let mut start_line = 0;
        let mut continuing = false;

        for (idx, natural) in natural_lines(raw).enumerate() {
            let line = natural.trim_start_matches(is_blank);
            if !continuing {
                if line.is_empty() || line.starts_with(|c: char| c == '#' || c == '!') {
                    continue;
                }
                start_line = idx + 1;
            }

            if ends_with_continuation(line) {
                logical.push_str(&line[..line.len() - 1]);
                continuing = true;
                continue;
            }

            logical.push_str(line);
            continuing = false;
            let (key, value) = split_entry(&logical, start_line)?;
            entries.insert(key, value);
            logical.clear();
        }

        // continuation ran into end of input
        if continuing && !logical.is_empty() {
            let (key, value) = split_entry(&logical, start_line)?;
            entries.insert(key, value);
        }

        Ok(Self { entries })
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in ascending key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// One info line per entry, `<key>: <value>`, sorted by key.
    pub fn log_entries(&self) {
        for (key, value) in self.iter() {
            info!("{key}: {value}");
        }
    }
}

impl<K, V> FromIterator<(K, V)> for PropertySet
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\u{000C}')
}

// \n, \r\n and a lone \r all terminate a line
fn natural_lines(raw: &str) -> impl Iterator<Item = &str> {
    raw.split('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
        .flat_map(|l| l.split('\r'))
}

fn ends_with_continuation(line: &str) -> bool {
    line.chars().rev().take_while(|&c| c == '\\').count() % 2 == 1
}

fn skip_blank(chars: &[char], mut i: usize) -> usize {
    while i < chars.len() && is_blank(chars[i]) {
        i += 1;
    }
    i
}

fn split_entry(logical: &str, line: usize) -> Result<(String, String), InitializationError> {
    let chars: Vec<char> = logical.chars().collect();
    let mut key_end = chars.len();
    let mut value_start = chars.len();
    let mut escaped = false;

    for (i, &c) in chars.iter().enumerate() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '=' | ':' => {
                key_end = i;
                value_start = i + 1;
                break;
            }
            c if is_blank(c) => {
                key_end = i;
                let mut j = skip_blank(&chars, i);
                if j < chars.len() && matches!(chars[j], '=' | ':') {
                    j += 1;
                }
                value_start = j;
                break;
            }
            _ => {}
        }
    }

    let value_start = skip_blank(&chars, value_start);
    let key = unescape(&chars[..key_end], line)?;
    let value = unescape(&chars[value_start..], line)?;
    Ok((key, value))
}

fn push_char(units: &mut Vec<u16>, c: char) {
    let mut buf = [0u16; 2];
    units.extend_from_slice(c.encode_utf16(&mut buf));
}

// \uXXXX escapes are UTF-16 code units, so surrogate pairs are decoded together
fn unescape(chars: &[char], line: usize) -> Result<String, InitializationError> {
    let mut units: Vec<u16> = Vec::with_capacity(chars.len());
    let mut iter = chars.iter().copied();

    while let Some(c) = iter.next() {
        if c != '\\' {
            push_char(&mut units, c);
            continue;
        }
        match iter.next() {
            Some('t') => push_char(&mut units, '\t'),
            Some('n') => push_char(&mut units, '\n'),
            Some('r') => push_char(&mut units, '\r'),
            Some('f') => push_char(&mut units, '\u{000C}'),
            Some('u') => {
                let hex: String = iter.by_ref().take(4).collect();
                if hex.len() != 4 || !hex.chars().all(|h| h.is_ascii_hexdigit()) {
                    return Err(InitializationError::Malformed {
                        line,
                        reason: format!("invalid \\uXXXX escape '\\u{hex}'"),
                    });
                }
                let unit = u16::from_str_radix(&hex, 16).map_err(|e| {
                    InitializationError::Malformed {
                        line,
                        reason: e.to_string(),
                    }
                })?;
                units.push(unit);
            }
            Some(other) => push_char(&mut units, other),
            None => {}
        }
    }

    String::from_utf16(&units).map_err(|_| InitializationError::Malformed {
        line,
        reason: "unpaired surrogate in \\u escape".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_separators_and_whitespace() {
        let props = PropertySet::parse(
            "a=1\n  b : 2\nc 3\nd\t=\t 4\ne\nf=\ng = h = i\n",
        )
        .expect("parse failed");

        assert_eq!(props.get("a"), Some("1"));
        assert_eq!(props.get("b"), Some("2"));
        assert_eq!(props.get("c"), Some("3"));
        assert_eq!(props.get("d"), Some("4"));
        assert_eq!(props.get("e"), Some(""));
        assert_eq!(props.get("f"), Some(""));
        assert_eq!(props.get("g"), Some("h = i"));
        assert_eq!(props.len(), 7);
    }

    #[test]
    fn test_comments_and_blank_lines_are_skipped() {
        let props = PropertySet::parse("# comment\n\n   ! bang comment\n\t\nkey=value\n#x=y\n")
            .expect("parse failed");

        assert_eq!(props.len(), 1);
        assert_eq!(props.get("key"), Some("value"));
        assert!(!props.contains_key("#x"));
    }

    #[test]
    fn test_line_continuation() {
        let raw = "list = one, \\\n       two, \\\n       three\nnext=ok\n";
        let props = PropertySet::parse(raw).expect("parse failed");

        assert_eq!(props.get("list"), Some("one, two, three"));
        assert_eq!(props.get("next"), Some("ok"));
    }

    #[test]
    fn test_even_backslashes_do_not_continue() {
        let props = PropertySet::parse("path=c:\\\\\nother=1\n").expect("parse failed");

        assert_eq!(props.get("path"), Some("c:\\"));
        assert_eq!(props.get("other"), Some("1"));
    }

    #[test]
    fn test_comment_line_ending_in_backslash_does_not_continue() {
        let props = PropertySet::parse("# note \\\nkey=value\n").expect("parse failed");
        assert_eq!(props.get("key"), Some("value"));
    }

    #[test]
    fn test_escapes() {
        let raw = "tab=a\\tb\nnl=a\\nb\nsnow=\\u2603\nemoji=\\uD83D\\uDE00\nkey\\ with\\=eq=v\\:w\n";
        let props = PropertySet::parse(raw).expect("parse failed");

        assert_eq!(props.get("tab"), Some("a\tb"));
        assert_eq!(props.get("nl"), Some("a\nb"));
        assert_eq!(props.get("snow"), Some("\u{2603}"));
        assert_eq!(props.get("emoji"), Some("\u{1F600}"));
        assert_eq!(props.get("key with=eq"), Some("v:w"));
    }

    #[test]
    fn test_crlf_and_cr_line_endings() {
        let props = PropertySet::parse("a=1\r\nb=2\rc=3").expect("parse failed");

        assert_eq!(props.get("a"), Some("1"));
        assert_eq!(props.get("b"), Some("2"));
        assert_eq!(props.get("c"), Some("3"));
    }

    #[test]
    fn test_later_duplicate_wins() {
        let props = PropertySet::parse("rate.limit=1\nrate.limit=2\n").expect("parse failed");
        assert_eq!(props.get("rate.limit"), Some("2"));
    }

    #[test]
    fn test_malformed_unicode_escape_reports_line() {
        let err = PropertySet::parse("a=1\n\nb=\\u12G4\n").unwrap_err();
        match err {
            InitializationError::Malformed { line, .. } => assert_eq!(line, 3),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_iteration_is_sorted() {
        let props = PropertySet::parse("zeta=1\nalpha=2\nmid=3\n").expect("parse failed");
        let keys: Vec<&str> = props.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["alpha", "mid", "zeta"]);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let err = PropertySet::load(dir.path().join("absent.properties")).unwrap_err();
        assert!(matches!(err, InitializationError::Unreadable { .. }));
    }
}
