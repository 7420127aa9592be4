//! Single-pass INI parser.
//!
//! The parser is a character-at-a-time state machine that writes straight
//! into a [`Document`]; there is no token or syntax tree stage. A backslash
//! makes the next character literal in every state, and inside a value
//! `\N`/`\n` additionally decode to a newline. Escaped characters at the edge
//! of a value survive trimming, so `k=a\<CR>` keeps its carriage return.
//!
//! Malformed lines (a key without `=`, a header without `]`) are dropped and
//! scanning resumes on the next line, so parsing always yields a document.
//!
//! Blank lines: a newline read at the start of a line, with only spaces,
//! tabs or carriage returns before it, records a blank-line entry in the
//! current body. The start of the input counts as the start of a line.

use crate::container::Container;
use crate::document::{Document, Target};
use crate::entry::{Entry, Marker};
use crate::IniOptions;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Step {
    Lookup,
    Key,
    Value,
    FieldComment,
    Section,
    Comment,
}

struct Parser {
    doc: Document,
    target: Target,
    step: Step,
    escaped: bool,
    marker: Marker,
    key: String,
    buffer: String,
    /// Byte range of the value buffer spanning its escaped characters.
    pinned: Option<(usize, usize)>,
    at_line_start: bool,
}

/// Parses `text` into a document with default options.
pub(crate) fn parse(text: &str) -> Document {
    let mut parser = Parser::new();
    for ch in text.chars() {
        parser.feed(ch);
    }
    parser.finish()
}

/// Parses `text`, dropping blank lines unless `options.keep_white_lines` is set.
///
/// # Examples
///
/// ```rust
/// use serde_ini_doc::{parse_with_options, Container, IniOptions};
///
/// let doc = parse_with_options("a=1\n\nb=2\n", &IniOptions::new().with_white_lines(false));
/// assert_eq!(doc.entries().len(), 2);
/// ```
#[must_use]
pub fn parse_with_options(text: &str, options: &IniOptions) -> Document {
    let mut doc = parse(text);
    if !options.keep_white_lines {
        doc.strip_white_lines();
    }
    doc
}

impl Parser {
    fn new() -> Self {
        Parser {
            doc: Document::new(),
            target: Target::Root,
            step: Step::Lookup,
            escaped: false,
            marker: Marker::Semicolon,
            key: String::new(),
            buffer: String::with_capacity(16),
            pinned: None,
            at_line_start: true,
        }
    }

    fn feed(&mut self, ch: char) {
        if ch == '\\' && !self.escaped {
            self.escaped = true;
            return;
        }
        let escaped = std::mem::take(&mut self.escaped);

        match self.step {
            Step::Lookup => self.lookup(ch, escaped),
            Step::Key => self.key_char(ch, escaped),
            Step::Value => self.value_char(ch, escaped),
            Step::FieldComment => {
                if ch == '\n' && !escaped {
                    self.commit_field_comment();
                    self.end_line();
                } else {
                    self.buffer.push(ch);
                }
            }
            Step::Section => self.section_char(ch, escaped),
            Step::Comment => {
                if ch == '\n' && !escaped {
                    self.commit_comment();
                    self.end_line();
                } else {
                    self.buffer.push(ch);
                }
            }
        }
    }

    fn lookup(&mut self, ch: char, escaped: bool) {
        if escaped {
            self.begin_key(ch, escaped);
            return;
        }
        match ch {
            '[' => self.begin(Step::Section),
            ';' | '#' => {
                self.marker = Marker::from_char(ch).unwrap_or_default();
                self.begin(Step::Comment);
            }
            '\n' => {
                if self.at_line_start {
                    self.body().push(Entry::BlankLine);
                }
                self.at_line_start = true;
            }
            ' ' | '\t' | '\r' => {}
            _ => self.begin_key(ch, escaped),
        }
    }

    fn begin(&mut self, step: Step) {
        self.step = step;
        self.at_line_start = false;
    }

    fn begin_key(&mut self, ch: char, escaped: bool) {
        self.begin(Step::Key);
        self.key_char(ch, escaped);
    }

    fn key_char(&mut self, ch: char, escaped: bool) {
        match ch {
            '=' if !escaped => {
                self.key = trim_line(&self.buffer).to_string();
                self.buffer.clear();
                self.step = Step::Value;
            }
            '\n' if !escaped => {
                tracing::trace!(line = %self.buffer, "dropping line without `=`");
                self.buffer.clear();
                self.end_line();
            }
            _ => self.buffer.push(ch),
        }
    }

    fn value_char(&mut self, ch: char, escaped: bool) {
        if escaped {
            let start = self.buffer.len();
            self.buffer.push(if matches!(ch, 'N' | 'n') { '\n' } else { ch });
            let end = self.buffer.len();
            self.pinned = Some(self.pinned.map_or((start, end), |(first, _)| (first, end)));
            return;
        }
        match ch {
            ';' | '#' => {
                self.commit_value();
                self.marker = Marker::from_char(ch).unwrap_or_default();
                self.step = Step::FieldComment;
            }
            '\n' => {
                self.commit_value();
                self.key.clear();
                self.end_line();
            }
            _ => self.buffer.push(ch),
        }
    }

    fn section_char(&mut self, ch: char, escaped: bool) {
        match ch {
            ']' if !escaped => {
                let name = trim_line(&self.buffer).to_string();
                self.buffer.clear();
                let index = self.doc.open_parsed_section(self.target, &name);
                self.target = Target::Section(index);
                self.step = Step::Lookup;
            }
            '\n' if !escaped => {
                tracing::trace!(header = %self.buffer, "dropping unterminated section header");
                self.buffer.clear();
                self.end_line();
            }
            _ => self.buffer.push(ch),
        }
    }

    fn end_line(&mut self) {
        self.step = Step::Lookup;
        self.at_line_start = true;
    }

    fn body(&mut self) -> &mut Vec<Entry> {
        self.doc.container_mut(self.target).entries_mut()
    }

    fn commit_value(&mut self) {
        let value = trim_value(&self.buffer, self.pinned.take());
        self.doc.container_mut(self.target).set(&self.key, value);
        self.buffer.clear();
    }

    fn commit_field_comment(&mut self) {
        let text = trim_value(&self.buffer, None);
        self.doc
            .container_mut(self.target)
            .set_field_comment(&self.key, text);
        self.buffer.clear();
        self.key.clear();
    }

    fn commit_comment(&mut self) {
        let text = trim_line(&self.buffer);
        let target = self.doc.container_mut(self.target);
        match self.marker {
            Marker::Semicolon => target.add_comment(text),
            Marker::Hash => target.add_hash_comment(text),
        }
        self.buffer.clear();
    }

    /// Flushes a line left open by the end of input.
    fn finish(mut self) -> Document {
        match self.step {
            Step::Value => self.commit_value(),
            Step::FieldComment => self.commit_field_comment(),
            Step::Comment => self.commit_comment(),
            Step::Key | Step::Section => {
                tracing::trace!(line = %self.buffer, "dropping unterminated last line");
            }
            Step::Lookup => {}
        }
        self.doc
    }
}

fn trim_line(text: &str) -> &str {
    text.trim_matches(|c| matches!(c, ' ' | '\t' | '\r'))
}

fn is_value_padding(c: char) -> bool {
    matches!(c, ' ' | '\r')
}

/// Values keep tabs so that any stored value reads back unchanged. Padding is
/// only trimmed outside the `pinned` range.
fn trim_value(text: &str, pinned: Option<(usize, usize)>) -> &str {
    match pinned {
        None => text.trim_matches(is_value_padding),
        Some((start, end)) => {
            let left = text[..start].trim_start_matches(is_value_padding).len();
            let right = text[end..].trim_end_matches(is_value_padding).len();
            &text[start - left..end + right]
        }
    }
}
