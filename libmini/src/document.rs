//! MINI document representation.

use std::collections::HashMap;

/// A named group of key/value pairs. The empty name is used for globals.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Section {
    name: String,
    values: HashMap<String, String>,
}

impl Section {
    /// Create an empty section.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: HashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn values(&self) -> &HashMap<String, String> {
        &self.values
    }

    /// Look up a value. Keys are stored lowercased, so the query is too.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(&key.to_lowercase()).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Store a value, replacing any earlier one under the same key.
    pub(crate) fn insert(&mut self, key: String, value: String) {
        self.values.insert(key, value);
    }

    /// Entries sorted by key.
    fn sorted(&self) -> Vec<(&str, &str)> {
        let mut entries: Vec<(&str, &str)> = self
            .values
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        entries.sort_unstable();
        entries
    }
}

/// The complete result of a parse: global entries plus named sections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    globals: Section,
    sections: HashMap<String, Section>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self {
            globals: Section::new(""),
            sections: HashMap::new(),
        }
    }

    /// Entries that appear before the first section header.
    pub fn globals(&self) -> &Section {
        &self.globals
    }

    pub fn sections(&self) -> &HashMap<String, Section> {
        &self.sections
    }

    /// Look up a named section. Names are case-sensitive.
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.get(name)
    }

    /// Returns `true` if there are no globals and no sections.
    pub fn is_empty(&self) -> bool {
        self.globals.is_empty() && self.sections.is_empty()
    }

    /// All entries in a stable order: globals first, then sections by name,
    /// each sorted by key. Global entries have no section name.
    pub fn entries(&self) -> impl Iterator<Item = (Option<&str>, &str, &str)> + '_ {
        let mut names: Vec<&String> = self.sections.keys().collect();
        names.sort_unstable();

        let globals = self.globals.sorted().into_iter().map(|(k, v)| (None, k, v));
        let named = names.into_iter().flat_map(move |name| {
            let section = &self.sections[name];
            section
                .sorted()
                .into_iter()
                .map(move |(k, v)| (Some(section.name()), k, v))
        });
        globals.chain(named)
    }

    /// Make sure a section called `name` exists. Returns whether it already did.
    pub(crate) fn open_section(&mut self, name: &str) -> bool {
        if self.sections.contains_key(name) {
            return true;
        }
        self.sections.insert(name.to_string(), Section::new(name));
        false
    }

    /// Mutable access for routing an assignment. `None` means globals.
    pub(crate) fn target_mut(&mut self, name: Option<&str>) -> &mut Section {
        match name {
            Some(name) => self
                .sections
                .entry(name.to_string())
                .or_insert_with(|| Section::new(name)),
            None => &mut self.globals,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Document {
        let mut doc = Document::new();
        doc.target_mut(None).insert("zeta".into(), "1".into());
        doc.target_mut(None).insert("alpha".into(), "2".into());
        doc.open_section("web");
        doc.target_mut(Some("web")).insert("port".into(), "80".into());
        doc.open_section("db");
        doc.target_mut(Some("db")).insert("user".into(), "root".into());
        doc.target_mut(Some("db")).insert("host".into(), "local".into());
        doc
    }

    #[test]
    fn test_new_document_is_empty() {
        let doc = Document::new();
        assert!(doc.is_empty());
        assert_eq!(doc.globals().name(), "");
        assert!(doc.section("anything").is_none());
    }

    #[test]
    fn test_get_is_case_insensitive() {
        let doc = sample();
        let web = doc.section("web").unwrap();
        assert_eq!(web.get("port"), Some("80"));
        assert_eq!(web.get("PORT"), Some("80"));
        assert_eq!(web.get("missing"), None);
        assert!(doc.section("WEB").is_none());
    }

    #[test]
    fn test_open_section_reports_existing() {
        let mut doc = sample();
        assert!(doc.open_section("web"));
        assert!(!doc.open_section("cache"));
        assert_eq!(doc.section("web").unwrap().len(), 1);
        assert!(doc.section("cache").unwrap().is_empty());
    }

    #[test]
    fn test_entries_are_ordered() {
        let doc = sample();
        let entries: Vec<_> = doc.entries().collect();
        assert_eq!(
            entries,
            vec![
                (None, "alpha", "2"),
                (None, "zeta", "1"),
                (Some("db"), "host", "local"),
                (Some("db"), "user", "root"),
                (Some("web"), "port", "80"),
            ]
        );
    }

    #[test]
    fn test_structural_equality() {
        assert_eq!(sample(), sample());
        let mut other = sample();
        other.target_mut(Some("web")).insert("port".into(), "81".into());
        assert_ne!(sample(), other);
    }
}
