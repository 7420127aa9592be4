//! Named sections and the handle used to edit them.
//!
//! Sections live in a flat, ordered list owned by the [`Document`]. Nesting is
//! encoded in the dotted name only: `"db.replica"` is a sibling of `"db"` in
//! storage, and a child of it for [`SectionMut::section`] and
//! [`SectionMut::subsection_names`].
//!
//! ## Examples
//!
//! ```rust
//! use serde_ini_doc::{Container, Document};
//!
//! let mut doc = Document::new();
//! let mut db = doc.section("db");
//! db.set("host", "localhost");
//! db.section("replica").set("host", "10.0.0.2");
//!
//! assert_eq!(doc.section_names(true), vec!["db", "db.replica"]);
//! assert_eq!(doc.section("db").subsection_names(false), vec!["replica"]);
//! ```

use crate::container::Container;
use crate::entry::{write_comment_lines, Entry, Marker};
use crate::escape::escape_section_name;
use crate::{Document, IniOptions};
use std::fmt;
use std::ops::{Deref, DerefMut};

/// A named body of entries with an optional leading comment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Section {
    pub(crate) name: String,
    pub(crate) entries: Vec<Entry>,
    pub(crate) comment: String,
    pub(crate) comment_marker: Marker,
}

impl Section {
    pub(crate) fn new(name: &str) -> Self {
        Section {
            name: name.to_string(),
            entries: Vec::new(),
            comment: String::new(),
            comment_marker: Marker::default(),
        }
    }

    /// The full dotted name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The comment block written above the header, or `""`.
    #[must_use]
    pub fn comment(&self) -> &str {
        &self.comment
    }

    /// The marker used when writing the leading comment.
    #[must_use]
    pub fn comment_marker(&self) -> Marker {
        self.comment_marker
    }

    /// Replaces the leading comment. Lines are separated by `\n`.
    pub fn set_comment(&mut self, text: &str) {
        self.comment = text.to_string();
    }

    /// Replaces the leading comment and the marker it is written with.
    pub fn set_comment_with_marker(&mut self, text: &str, marker: Marker) {
        self.comment = text.to_string();
        self.comment_marker = marker;
    }

    /// Appends the leading comment, the header and the body.
    pub(crate) fn write(&self, out: &mut String, options: &IniOptions) {
        if !self.comment.is_empty() {
            write_comment_lines(out, &self.comment, self.comment_marker);
        }
        out.push('[');
        out.push_str(&escape_section_name(&self.name));
        out.push_str("]\n");
        for entry in &self.entries {
            entry.write(out, options);
        }
    }
}

impl Container for Section {
    fn entries(&self) -> &[Entry] {
        &self.entries
    }

    fn entries_mut(&mut self) -> &mut Vec<Entry> {
        &mut self.entries
    }
}

/// Sections without entries have no text form.
impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.entries.is_empty() {
            return Ok(());
        }
        let mut out = String::new();
        self.write(&mut out, &IniOptions::default());
        f.write_str(&out)
    }
}

/// Mutable handle to a section of a [`Document`].
///
/// Returned by [`Document::section`]. The handle borrows the whole document,
/// which lets it create nested sections relative to its own name.
#[derive(Debug)]
pub struct SectionMut<'a> {
    pub(crate) doc: &'a mut Document,
    pub(crate) index: usize,
}

impl<'a> SectionMut<'a> {
    /// Returns the child section `name`, creating it and any missing ancestors.
    ///
    /// The child's full name is `"{self.name}.{name}"`, or just `name` when
    /// this section's name is empty.
    pub fn section(&mut self, name: &str) -> SectionMut<'_> {
        let full = self.child_name(name);
        self.doc.section(&full)
    }

    /// Like [`section`](Self::section), but consumes the handle so the child
    /// keeps the document borrow.
    pub fn into_section(self, name: &str) -> SectionMut<'a> {
        let full = self.child_name(name);
        let doc = self.doc;
        doc.section(&full)
    }

    /// Names of sections below this one, relative to this section's name.
    ///
    /// Only direct children are listed unless `include_nested` is `true`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_ini_doc::Document;
    ///
    /// let mut doc = Document::parse("[a]\nx=1\n[a.b]\ny=2\n[a.b.c]\nz=3\n");
    /// assert_eq!(doc.section("a").subsection_names(false), vec!["b"]);
    /// assert_eq!(doc.section("a").subsection_names(true), vec!["b", "b.c"]);
    /// ```
    #[must_use]
    pub fn subsection_names(&self, include_nested: bool) -> Vec<String> {
        self.doc
            .subsection_names(self.name(), include_nested)
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    fn child_name(&self, name: &str) -> String {
        if self.name().is_empty() {
            name.to_string()
        } else {
            format!("{}.{}", self.name(), name)
        }
    }
}

impl Deref for SectionMut<'_> {
    type Target = Section;

    fn deref(&self) -> &Section {
        &self.doc.sections[self.index]
    }
}

impl DerefMut for SectionMut<'_> {
    fn deref_mut(&mut self) -> &mut Section {
        &mut self.doc.sections[self.index]
    }
}

impl Container for SectionMut<'_> {
    fn entries(&self) -> &[Entry] {
        &self.doc.sections[self.index].entries
    }

    fn entries_mut(&mut self) -> &mut Vec<Entry> {
        &mut self.doc.sections[self.index].entries
    }
}
