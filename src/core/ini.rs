//! Minimal INI reader/writer for the credentials file.
//!
//! Follows the usual INI conventions: `[section]` headers, `key = value` or
//! `key: value` entries, keys folded to lower case, `#`/`;` full-line
//! comments, indented continuation lines, and a `[DEFAULT]` section whose
//! entries are inherited by every other section. Values are kept as raw
//! strings; there is no quoting or interpolation.

use std::collections::BTreeMap;
use thiserror::Error;

/// Section whose entries are inherited by all other sections.
pub const DEFAULT_SECTION: &str = "DEFAULT";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IniError {
    #[error("line {line}: entry found before any [section] header")]
    MissingSectionHeader { line: usize },
}

/// A parsed INI document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IniDocument {
    defaults: BTreeMap<String, String>,
    sections: BTreeMap<String, BTreeMap<String, String>>,
}

impl IniDocument {
    /// Entries of `name` merged over the `[DEFAULT]` entries.
    /// Returns `None` if the section was never declared.
    pub fn section(&self, name: &str) -> Option<BTreeMap<String, String>> {
        if name == DEFAULT_SECTION {
            return Some(self.defaults.clone());
        }
        let own = self.sections.get(name)?;
        let mut merged = self.defaults.clone();
        merged.extend(own.iter().map(|(k, v)| (k.clone(), v.clone())));
        Some(merged)
    }

    fn entries_mut(&mut self, section: &str) -> &mut BTreeMap<String, String> {
        if section == DEFAULT_SECTION {
            &mut self.defaults
        } else {
            self.sections.entry(section.to_string()).or_default()
        }
    }
}

/// Parse INI text into a document.
pub fn parse_document(text: &str) -> Result<IniDocument, IniError> {
    let mut doc = IniDocument::default();
    let mut current: Option<String> = None;
    let mut last_key: Option<String> = None;
    let mut key_indent = 0usize;

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();

        if line.is_empty() {
            last_key = None;
            continue;
        }
        if line.starts_with('#') || line.starts_with(';') {
            continue;
        }

        let indent = raw.len() - raw.trim_start().len();
        if indent > key_indent {
            if let (Some(section), Some(key)) = (&current, &last_key) {
                if let Some(value) = doc.entries_mut(section).get_mut(key) {
                    value.push('\n');
                    value.push_str(line);
                    continue;
                }
            }
        }

        if let Some(name) = section_header(line) {
            doc.entries_mut(&name);
            current = Some(name);
            last_key = None;
            continue;
        }

        let section = match &current {
            Some(s) => s.clone(),
            None => return Err(IniError::MissingSectionHeader { line: line_no }),
        };

        match split_entry(line) {
            Some((key, value)) if !key.is_empty() => {
                doc.entries_mut(&section).insert(key.clone(), value);
                last_key = Some(key);
                key_indent = indent;
            }
            _ => {
                tracing::warn!(line = line_no, section = %section, "skipping line without key/value delimiter");
                last_key = None;
            }
        }
    }

    Ok(doc)
}

/// `[name]` up to the last `]`; anything after it is ignored.
fn section_header(line: &str) -> Option<String> {
    let rest = line.strip_prefix('[')?;
    let end = rest.rfind(']')?;
    let name = rest[..end].trim();
    (!name.is_empty()).then(|| name.to_string())
}

/// Split `key = value` / `key: value` at the first delimiter.
fn split_entry(line: &str) -> Option<(String, String)> {
    let pos = line.find(['=', ':'])?;
    let key = line[..pos].trim().to_lowercase();
    let value = line[pos + 1..].trim().to_string();
    Some((key, value))
}

/// Render one section as INI text, followed by a blank line.
pub fn write_section<'a, I>(name: &str, entries: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut out = format!("[{}]\n", name);
    for (key, value) in entries {
        out.push_str(key);
        out.push_str(" = ");
        out.push_str(&value.replace('\n', "\n\t"));
        out.push('\n');
    }
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_section() {
        let doc = parse_document("[credentials]\nemail_user = alice\nftp_server=ftp.example.org\n").unwrap();
        let creds = doc.section("credentials").unwrap();
        assert_eq!(creds.len(), 2);
        assert_eq!(creds["email_user"], "alice");
        assert_eq!(creds["ftp_server"], "ftp.example.org");
    }

    #[test]
    fn test_keys_lowercased_values_raw() {
        let doc = parse_document("[credentials]\nEmail_User = Alice # not a comment\n").unwrap();
        let creds = doc.section("credentials").unwrap();
        assert_eq!(creds["email_user"], "Alice # not a comment");
    }

    #[test]
    fn test_first_delimiter_wins() {
        let doc = parse_document("[s]\nurl = ftp://host:21\npass: a=b\n").unwrap();
        let s = doc.section("s").unwrap();
        assert_eq!(s["url"], "ftp://host:21");
        assert_eq!(s["pass"], "a=b");
    }

    #[test]
    fn test_later_entries_overwrite() {
        let doc = parse_document("[s]\nk = 1\n[other]\nx = y\n[s]\nk = 2\n").unwrap();
        assert_eq!(doc.section("s").unwrap()["k"], "2");
        assert_eq!(doc.section("other").unwrap()["x"], "y");
    }

    #[test]
    fn test_comments_and_blank_lines_ignored() {
        let text = "# header comment\n\n[s]\n; note\nk = v\n\n";
        let doc = parse_document(text).unwrap();
        assert_eq!(doc.section("s").unwrap().len(), 1);
    }

    #[test]
    fn test_missing_section_header() {
        let err = parse_document("# comment\nemail_user = alice\n").unwrap_err();
        assert_eq!(err, IniError::MissingSectionHeader { line: 2 });
    }

    #[test]
    fn test_missing_section_returns_none() {
        let doc = parse_document("[other]\nk = v\n").unwrap();
        assert!(doc.section("credentials").is_none());
    }

    #[test]
    fn test_empty_value() {
        let doc = parse_document("[s]\nk =\nj = \n").unwrap();
        let s = doc.section("s").unwrap();
        assert_eq!(s["k"], "");
        assert_eq!(s["j"], "");
    }

    #[test]
    fn test_continuation_lines() {
        let doc = parse_document("[s]\nk = first\n  second\nj = x\n").unwrap();
        let s = doc.section("s").unwrap();
        assert_eq!(s["k"], "first\nsecond");
        assert_eq!(s["j"], "x");
    }

    #[test]
    fn test_uniformly_indented_entries_stay_separate() {
        let doc = parse_document("[s]\n  k = first\n  j = second\n    more\n").unwrap();
        let s = doc.section("s").unwrap();
        assert_eq!(s.len(), 2);
        assert_eq!(s["k"], "first");
        assert_eq!(s["j"], "second\nmore");
    }

    #[test]
    fn test_header_with_trailing_text() {
        let doc = parse_document("[credentials]  # station 3\nemail_user = alice\n").unwrap();
        assert_eq!(doc.section("credentials").unwrap()["email_user"], "alice");
        assert_eq!(section_header("[a]b]"), Some("a]b".to_string()));
        assert_eq!(section_header("[]"), None);
    }

    #[test]
    fn test_default_section_inherited() {
        let doc = parse_document("[DEFAULT]\nftp_server = ftp.vliz.be\n[s]\nftp_user = bob\n").unwrap();
        let s = doc.section("s").unwrap();
        assert_eq!(s["ftp_server"], "ftp.vliz.be");
        assert_eq!(s["ftp_user"], "bob");
        assert_eq!(doc.section(DEFAULT_SECTION).unwrap().len(), 1);
    }

    #[test]
    fn test_line_without_delimiter_skipped() {
        let doc = parse_document("[s]\ngarbage\nk = v\n").unwrap();
        let s = doc.section("s").unwrap();
        assert_eq!(s.len(), 1);
        assert_eq!(s["k"], "v");
    }

    #[test]
    fn test_write_section_layout() {
        let text = write_section("credentials", [("email_user", ""), ("ftp_user", "bob")]);
        assert_eq!(text, "[credentials]\nemail_user = \nftp_user = bob\n\n");
    }

    #[test]
    fn test_write_multiline_value_reparses() {
        let text = write_section("s", [("k", "a\nb")]);
        let doc = parse_document(&text).unwrap();
        assert_eq!(doc.section("s").unwrap()["k"], "a\nb");
    }
}
