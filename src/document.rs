//! The root of an INI document.
//!
//! A [`Document`] owns the top-level body and the ordered list of sections.
//! Sections are keyed by their full dotted name and keep the order in which
//! they were first created; rendering follows that order.
//!
//! ## Examples
//!
//! ```rust
//! use serde_ini_doc::{Container, Document};
//!
//! let mut doc = Document::new();
//! doc.set("top", "lorem ipsum");
//! doc.section("MySection").set_float("number", 4.2069);
//!
//! assert_eq!(doc.to_string(), "top=lorem ipsum\n\n[MySection]\nnumber=4.2069\n");
//! ```

use crate::container::Container;
use crate::entry::Entry;
use crate::section::{Section, SectionMut};
use crate::{parser, IniOptions};
use indexmap::IndexMap;
use std::fmt;

/// An ordered, mutable INI document.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Document {
    pub(crate) entries: Vec<Entry>,
    pub(crate) sections: IndexMap<String, Section>,
}

/// Where the parser currently writes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Target {
    Root,
    Section(usize),
}

impl Document {
    /// Creates an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses INI text. Malformed lines are skipped, so this never fails.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_ini_doc::{Container, Document};
    ///
    /// let doc = Document::parse("k=v ;this is comment");
    /// assert_eq!(doc.get("k"), "v");
    /// assert_eq!(doc.get_comment("k"), "this is comment");
    /// ```
    #[must_use]
    pub fn parse(text: &str) -> Self {
        parser::parse(text)
    }

    /// Returns the section `name`, creating it on first access.
    ///
    /// Missing ancestors of a dotted name are created first, so requesting
    /// `"A.B.C"` on an empty document yields `"A"`, `"A.B"` and `"A.B.C"`.
    pub fn section(&mut self, name: &str) -> SectionMut<'_> {
        let index = self.ensure_section(name);
        SectionMut { doc: self, index }
    }

    /// Returns the section `name` without creating it.
    #[must_use]
    pub fn get_section(&self, name: &str) -> Option<&Section> {
        self.sections.get(name)
    }

    /// Returns a handle to the section `name` without creating it.
    pub fn get_section_mut(&mut self, name: &str) -> Option<SectionMut<'_>> {
        let index = self.sections.get_index_of(name)?;
        Some(SectionMut { doc: self, index })
    }

    #[must_use]
    pub fn has_section(&self, name: &str) -> bool {
        self.sections.contains_key(name)
    }

    /// Removes the section `name` together with every section nested below it.
    ///
    /// Returns the removed section itself, if it existed.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_ini_doc::{Container, Document};
    ///
    /// let mut doc = Document::new();
    /// doc.section("a.b").set("k", "v");
    /// doc.section("ab").set("k", "v");
    ///
    /// assert!(doc.remove_section("a").is_some());
    /// assert_eq!(doc.section_names(true), vec!["ab"]);
    /// ```
    pub fn remove_section(&mut self, name: &str) -> Option<Section> {
        let prefix = format!("{name}.");
        self.sections
            .retain(|existing, _| !existing.starts_with(&prefix));
        self.sections.shift_remove(name)
    }

    /// All sections, in creation order.
    pub fn sections(&self) -> impl Iterator<Item = &Section> {
        self.sections.values()
    }

    /// Section names in creation order.
    ///
    /// Only top-level names (without a `.`) are listed unless
    /// `include_nested` is `true`.
    #[must_use]
    pub fn section_names(&self, include_nested: bool) -> Vec<&str> {
        self.sections
            .keys()
            .map(String::as_str)
            .filter(|name| include_nested || !name.contains('.'))
            .collect()
    }

    /// Names of the sections below `parent`, with the `parent.` prefix removed.
    ///
    /// Only direct children are listed unless `include_nested` is `true`.
    /// An empty `parent` behaves like [`section_names`](Self::section_names).
    #[must_use]
    pub fn subsection_names(&self, parent: &str, include_nested: bool) -> Vec<&str> {
        if parent.is_empty() {
            return self.section_names(include_nested);
        }
        let prefix = format!("{parent}.");
        self.sections
            .keys()
            .filter_map(|name| name.strip_prefix(&prefix))
            .filter(|rest| include_nested || !rest.contains('.'))
            .collect()
    }

    /// Renders the document with the given options.
    ///
    /// Top-level entries come first, then every non-empty section in
    /// creation order. Sections without entries are left out.
    #[must_use]
    pub fn render(&self, options: &IniOptions) -> String {
        let mut out = String::new();
        for entry in &self.entries {
            entry.write(&mut out, options);
        }
        for section in self.sections.values() {
            if section.entries.is_empty() {
                continue;
            }
            if options.section_spacing && out.len() >= 2 && !out.ends_with("\n\n") {
                out.push('\n');
            }
            section.write(&mut out, options);
        }
        out
    }

    fn ensure_section(&mut self, name: &str) -> usize {
        if let Some(index) = self.sections.get_index_of(name) {
            return index;
        }
        for (pos, _) in name.match_indices('.') {
            let ancestor = &name[..pos];
            if ancestor.is_empty() || ancestor.ends_with('.') {
                continue;
            }
            self.sections
                .entry(ancestor.to_string())
                .or_insert_with(|| Section::new(ancestor));
        }
        self.sections
            .insert_full(name.to_string(), Section::new(name))
            .0
    }

    pub(crate) fn container_mut(&mut self, target: Target) -> &mut dyn Container {
        match target {
            Target::Root => self,
            Target::Section(index) => &mut self.sections[index],
        }
    }

    /// Opens the section named by a parsed header.
    ///
    /// A comment block that directly precedes the header in `from` becomes
    /// the section's leading comment.
    pub(crate) fn open_parsed_section(&mut self, from: Target, name: &str) -> usize {
        let body = self.container_mut(from).entries_mut();
        let promoted = if matches!(body.last(), Some(Entry::Comment { .. })) {
            body.pop()
        } else {
            None
        };
        let index = self.ensure_section(name);
        if let Some(Entry::Comment { text, marker }) = promoted {
            tracing::debug!(section = name, "attaching leading comment to section");
            let section = &mut self.sections[index];
            section.comment = text;
            section.comment_marker = marker;
        }
        index
    }
}

impl Container for Document {
    fn entries(&self) -> &[Entry] {
        &self.entries
    }

    fn entries_mut(&mut self) -> &mut Vec<Entry> {
        &mut self.entries
    }

    /// Removes blank lines from the top level and from every section.
    fn strip_white_lines(&mut self) {
        self.entries.retain(|entry| !entry.is_blank_line());
        for section in self.sections.values_mut() {
            section.strip_white_lines();
        }
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(&IniOptions::default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Marker;

    #[test]
    fn test_doc_output() {
        let mut doc = Document::new();
        doc.add_comment("this is a comment");
        doc.set("str", "hello world");
        doc.set_bool("bl", true);
        doc.set_bool("bl2", false);
        doc.add_comment("numbers:");
        doc.set_float("flt", 1.2345);
        doc.set_int("int", 420);
        doc.set_field_comment("bl", "this is a boolean");

        let expected = "; this is a comment\n\
                        str=hello world\n\
                        bl=true ; this is a boolean\n\
                        bl2=false\n\
                        ; numbers:\n\
                        flt=1.2345\n\
                        int=420\n";
        assert_eq!(doc.to_string(), expected);
    }

    #[test]
    fn test_doc_sections_output() {
        let mut doc = Document::new();
        doc.set("top", "lorem ipsum");

        let mut first = doc.section("MySection");
        first.set_float("number", 4.2069);
        first.set("foobar", "bazquux");
        first.set_bool("is", true);

        let mut second = doc.section("AnotherSection");
        second.set_bool("is", false);
        second.set("bazquux", "foobar");
        second.set_int("number", -999);

        let expected = "top=lorem ipsum\n\
                        \n\
                        [MySection]\n\
                        number=4.2069\n\
                        foobar=bazquux\n\
                        is=true\n\
                        \n\
                        [AnotherSection]\n\
                        is=false\n\
                        bazquux=foobar\n\
                        number=-999\n";
        assert_eq!(doc.to_string(), expected);
    }

    #[test]
    fn test_ancestors_created_first() {
        let mut doc = Document::new();
        doc.section("A.B.C");
        assert_eq!(doc.section_names(true), vec!["A", "A.B", "A.B.C"]);
        assert_eq!(doc.section_names(false), vec!["A"]);
    }

    #[test]
    fn test_empty_segments_are_not_materialized() {
        let mut doc = Document::new();
        doc.section(".a..b");
        assert_eq!(doc.section_names(true), vec![".a", ".a..b"]);
    }

    #[test]
    fn test_section_reuse_keeps_position() {
        let mut doc = Document::new();
        doc.section("first").set("a", "1");
        doc.section("second").set("b", "2");
        doc.section("first").set("c", "3");
        assert_eq!(doc.section_names(false), vec!["first", "second"]);
        assert_eq!(doc.get_section("first").map(|s| s.keys()), Some(vec!["a", "c"]));
    }

    #[test]
    fn test_subsection_names_filter_by_prefix() {
        let mut doc = Document::new();
        doc.section("sect.sub1.nestedSub");
        doc.section("sect.sub2");
        doc.section("sectx.other");
        assert_eq!(doc.subsection_names("sect", false), vec!["sub1", "sub2"]);
        assert_eq!(
            doc.subsection_names("sect", true),
            vec!["sub1", "sub1.nestedSub", "sub2"]
        );
        assert!(doc.subsection_names("missing", true).is_empty());
    }

    #[test]
    fn test_empty_sections_are_skipped_when_rendering() {
        let mut doc = Document::new();
        doc.set("k", "v");
        doc.section("empty");
        doc.section("full").set("a", "b");
        assert_eq!(doc.to_string(), "k=v\n\n[full]\na=b\n");
    }

    #[test]
    fn test_no_spacing_after_existing_blank_line() {
        let mut doc = Document::new();
        doc.set("k", "v");
        doc.add_white_line();
        doc.section("s").set("a", "b");
        assert_eq!(doc.to_string(), "k=v\n\n[s]\na=b\n");
        assert_eq!(
            doc.render(&IniOptions::new().with_section_spacing(false)),
            "k=v\n\n[s]\na=b\n"
        );
    }

    #[test]
    fn test_compact_render() {
        let mut doc = Document::new();
        doc.set("k", "v");
        doc.section("s").set("a", "b");
        assert_eq!(doc.render(&IniOptions::compact()), "k=v\n[s]\na=b\n");
    }

    #[test]
    fn test_leading_comment_is_rendered_before_header() {
        let mut doc = Document::new();
        doc.set("k", "v");
        let mut section = doc.section("s");
        section.set_comment("about s");
        section.set("a", "b");
        assert_eq!(doc.to_string(), "k=v\n\n; about s\n[s]\na=b\n");
    }

    #[test]
    fn test_strip_white_lines_recurses() {
        let mut doc = Document::parse("a=1\n\n[s]\n\nb=2\n\n");
        doc.strip_white_lines();
        let once = doc.clone();
        doc.strip_white_lines();
        assert_eq!(doc, once);
        assert!(doc.entries().iter().all(|e| !e.is_blank_line()));
        assert!(doc.sections().all(|s| s.entries().iter().all(|e| !e.is_blank_line())));
    }

    #[test]
    fn test_open_parsed_section_promotes_comment() {
        let mut doc = Document::new();
        doc.add_hash_comment("about");
        let index = doc.open_parsed_section(Target::Root, "s");
        assert!(doc.entries().is_empty());
        let section = &doc.sections[index];
        assert_eq!(section.comment(), "about");
        assert_eq!(section.comment_marker(), Marker::Hash);
    }

    #[test]
    fn test_remove_section_keeps_similar_prefix() {
        let mut doc = Document::new();
        doc.section("a.b.c");
        doc.section("abc");
        let removed = doc.remove_section("a.b");
        assert_eq!(removed.map(|s| s.name().to_string()), Some("a.b".to_string()));
        assert_eq!(doc.section_names(true), vec!["a", "abc"]);
        assert!(doc.remove_section("nope").is_none());
    }
}
