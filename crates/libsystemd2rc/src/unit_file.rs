//! Tolerant parser for systemd unit files.
//!
//! The grammar is a small INI dialect, read line by line:
//!
//! - **Comments**: lines starting with `;` or `#`
//! - **Directives**: `Key = Value`, trimmed on both sides of the first `=`
//! - **Section headers**: `[Name]`
//! - **Blank lines**: end the active section
//!
//! A blank line inside a section closes it. Directives that follow it, up to
//! the next header, are stored at the top level of the document rather than
//! in the section that was just closed. The closed section keeps everything
//! it collected so far.
//!
//! Lines that match nothing above are skipped; parsing never fails.

use std::collections::HashMap;

use log::trace;

/// A named group of directives, e.g. `[Service]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    name: String,
    directives: HashMap<String, String>,
}

impl Section {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            directives: HashMap::new(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Value of a directive, if set.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.directives.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.directives.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.directives.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.directives.is_empty()
    }

    /// Returns a copy of this section with `key` set to `value`.
    #[must_use]
    pub fn with_directive(&self, key: &str, value: &str) -> Self {
        let mut section = self.clone();
        section.insert(key.to_owned(), value.to_owned());
        section
    }

    /// Later values for the same key replace earlier ones.
    fn insert(&mut self, key: String, value: String) {
        self.directives.insert(key, value);
    }
}

/// A parsed unit file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnitFile {
    /// Sections in the order their headers first appeared.
    sections: Vec<Section>,
    /// Directives not attached to any section.
    top_level: HashMap<String, String>,
}

/// Classification of a single input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Line<'a> {
    Comment,
    Directive { key: &'a str, value: &'a str },
    Header(&'a str),
    Blank,
    Other,
}

impl UnitFile {
    /// Parse unit text.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let mut unit = Self::default();
        let mut active: Option<usize> = None;

        for (index, raw) in text.split('\n').enumerate() {
            match classify(raw) {
                Line::Comment | Line::Other => {}
                Line::Directive { key, value } => {
                    let (key, value) = (key.to_owned(), value.to_owned());
                    match active {
                        Some(i) => unit.sections[i].insert(key, value),
                        None => {
                            trace!("line {}: {key} stored at top level", index + 1);
                            unit.top_level.insert(key, value);
                        }
                    }
                }
                Line::Header(name) => active = Some(unit.open_section(name)),
                Line::Blank => active = None,
            }
        }

        unit
    }

    /// Start a fresh section, replacing any earlier one with the same name.
    fn open_section(&mut self, name: &str) -> usize {
        let section = Section::new(name);
        if let Some(i) = self.sections.iter().position(|s| s.name == name) {
            self.sections[i] = section;
            i
        } else {
            self.sections.push(section);
            self.sections.len() - 1
        }
    }

    #[must_use]
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.name == name)
    }

    #[must_use]
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// A directive that was parsed outside of any section.
    #[must_use]
    pub fn top_level(&self, key: &str) -> Option<&str> {
        self.top_level.get(key).map(String::as_str)
    }

    /// Look up `key` in section `section`.
    #[must_use]
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.section(section).and_then(|s| s.get(key))
    }
}

fn classify(raw: &str) -> Line<'_> {
    let line = raw.trim();

    if line.is_empty() {
        return Line::Blank;
    }
    if line.starts_with(';') || line.starts_with('#') {
        return Line::Comment;
    }
    // Directives take precedence over headers: `[a=b]` is a directive.
    if let Some((key, value)) = line.split_once('=') {
        let key = key.trim();
        if !key.is_empty() {
            return Line::Directive {
                key,
                value: value.trim(),
            };
        }
    }
    if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
        if !name.contains(']') {
            return Line::Header(name.trim());
        }
    }

    Line::Other
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_sections_and_directives() {
        let unit = UnitFile::parse(
            "\
[Unit]
Description = A test daemon
After=network.target
[Service]
ExecStart=/usr/bin/testd --flag
Type=simple
",
        );

        assert_eq!(unit.get("Unit", "Description"), Some("A test daemon"));
        assert_eq!(unit.get("Unit", "After"), Some("network.target"));
        assert_eq!(unit.get("Service", "ExecStart"), Some("/usr/bin/testd --flag"));
        assert_eq!(unit.get("Service", "Type"), Some("simple"));
        assert_eq!(unit.sections().len(), 2);
    }

    #[test]
    fn blank_line_moves_following_directives_to_top_level() {
        let unit = UnitFile::parse(
            "\
[Service]
ExecStart=/bin/true

User=nobody
Group=nogroup
[Install]
WantedBy=multi-user.target
",
        );

        let service = unit.section("Service").unwrap();
        assert_eq!(service.get("ExecStart"), Some("/bin/true"));
        assert_eq!(service.len(), 1);
        assert!(!service.contains("User"));

        assert_eq!(unit.top_level("User"), Some("nobody"));
        assert_eq!(unit.top_level("Group"), Some("nogroup"));
        assert_eq!(unit.get("Install", "WantedBy"), Some("multi-user.target"));
    }

    #[test]
    fn directives_before_any_section_are_top_level() {
        let unit = UnitFile::parse("Foo=bar\n[Unit]\nDescription=x\n");
        assert_eq!(unit.top_level("Foo"), Some("bar"));
        assert_eq!(unit.get("Unit", "Foo"), None);
    }

    #[test]
    fn comments_are_skipped() {
        let unit = UnitFile::parse(
            "\
; leading comment
[Service]
; ExecStop=/bin/false
# ExecReload=/bin/false
ExecStart=/bin/true
",
        );

        let service = unit.section("Service").unwrap();
        assert_eq!(service.len(), 1);
        assert_eq!(service.get("ExecStart"), Some("/bin/true"));
    }

    #[test]
    fn comment_does_not_close_section() {
        let unit = UnitFile::parse("[Service]\n; note\nUser=nobody\n");
        assert_eq!(unit.get("Service", "User"), Some("nobody"));
    }

    #[test]
    fn last_value_wins() {
        let unit = UnitFile::parse("[Service]\nNice=1\nNice=5\n");
        assert_eq!(unit.get("Service", "Nice"), Some("5"));
    }

    #[test]
    fn value_keeps_later_equals_signs() {
        let unit = UnitFile::parse("[Service]\nEnvironment=A=1 B=2\n");
        assert_eq!(unit.get("Service", "Environment"), Some("A=1 B=2"));
    }

    #[test]
    fn empty_value_is_kept() {
        let unit = UnitFile::parse("[Service]\nExecStart=\n");
        assert_eq!(unit.get("Service", "ExecStart"), Some(""));
    }

    #[test]
    fn malformed_lines_are_ignored() {
        let unit = UnitFile::parse("[Service]\njust some words\n= orphan value\nNice=3\n");
        let service = unit.section("Service").unwrap();
        assert_eq!(service.len(), 1);
        assert_eq!(service.get("Nice"), Some("3"));
    }

    #[test]
    fn header_name_is_trimmed() {
        let unit = UnitFile::parse("  [ Service ]  \nUser=root\n");
        assert_eq!(unit.get("Service", "User"), Some("root"));
    }

    #[test]
    fn empty_section_is_present() {
        let unit = UnitFile::parse("[Service]\n");
        assert!(unit.section("Service").is_some_and(Section::is_empty));
    }

    #[test]
    fn redeclared_section_starts_fresh() {
        let unit = UnitFile::parse("[Service]\nUser=a\n[Unit]\n[Service]\nGroup=b\n");
        let service = unit.section("Service").unwrap();
        assert_eq!(service.get("User"), None);
        assert_eq!(service.get("Group"), Some("b"));
        assert_eq!(unit.sections()[0].name(), "Service");
    }

    #[test]
    fn crlf_line_endings() {
        let unit = UnitFile::parse("[Service]\r\nExecStart=/bin/true\r\n\r\nUser=x\r\n");
        assert_eq!(unit.get("Service", "ExecStart"), Some("/bin/true"));
        assert_eq!(unit.top_level("User"), Some("x"));
    }

    #[test]
    fn with_directive_leaves_original_untouched() {
        let unit = UnitFile::parse("[Service]\nStandardOutput=file:/x\n");
        let service = unit.section("Service").unwrap();
        let patched = service.with_directive("StandardError", "file:/x");

        assert_eq!(patched.get("StandardError"), Some("file:/x"));
        assert!(!service.contains("StandardError"));
    }
}
