//! Configuration options for reading and writing INI text.
//!
//! This module provides [`IniOptions`], the single knob set shared by the
//! parser, the document renderer and the typed-record helpers.
//!
//! ## Examples
//!
//! ```rust
//! use serde_ini_doc::{Document, IniOptions, Marker};
//!
//! let doc = Document::parse("a=1 ; one\n\n[s]\nb=2\n");
//!
//! // Default output reproduces the input
//! assert_eq!(doc.to_string(), "a=1 ; one\n\n[s]\nb=2\n");
//!
//! // Hash inline comments
//! let options = IniOptions::new().with_field_comment_marker(Marker::Hash);
//! assert_eq!(doc.render(&options), "a=1 # one\n\n[s]\nb=2\n");
//! ```

use crate::Marker;

/// Configuration options for INI parsing and rendering.
///
/// # Examples
///
/// ```rust
/// use serde_ini_doc::IniOptions;
///
/// // Defaults: keep blank lines, separate sections, `;` inline comments
/// let options = IniOptions::new();
/// assert!(options.keep_white_lines);
///
/// // Compact output without blank lines
/// let options = IniOptions::compact();
/// assert!(!options.section_spacing);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct IniOptions {
    /// Marker written before inline comments.
    pub field_comment_marker: Marker,
    /// Insert a blank line before a section header unless the output already ends with one.
    pub section_spacing: bool,
    /// Keep blank lines found while parsing.
    pub keep_white_lines: bool,
}

impl Default for IniOptions {
    fn default() -> Self {
        IniOptions {
            field_comment_marker: Marker::Semicolon,
            section_spacing: true,
            keep_white_lines: true,
        }
    }
}

impl IniOptions {
    /// Creates default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options for dense output: no blank lines are kept or inserted.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_ini_doc::{parse_with_options, IniOptions};
    ///
    /// let options = IniOptions::compact();
    /// let doc = parse_with_options("a=1\n\n\n[s]\nb=2\n", &options);
    /// assert_eq!(doc.render(&options), "a=1\n[s]\nb=2\n");
    /// ```
    #[must_use]
    pub fn compact() -> Self {
        IniOptions {
            section_spacing: false,
            keep_white_lines: false,
            ..Default::default()
        }
    }

    /// Sets the marker written before inline comments.
    #[must_use]
    pub fn with_field_comment_marker(mut self, marker: Marker) -> Self {
        self.field_comment_marker = marker;
        self
    }

    /// Enables or disables the blank line inserted before section headers.
    #[must_use]
    pub fn with_section_spacing(mut self, spacing: bool) -> Self {
        self.section_spacing = spacing;
        self
    }

    /// Enables or disables keeping blank lines while parsing.
    #[must_use]
    pub fn with_white_lines(mut self, keep: bool) -> Self {
        self.keep_white_lines = keep;
        self
    }
}
