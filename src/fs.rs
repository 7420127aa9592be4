//! Reading and writing documents on disk.

use crate::{Document, Error, IniOptions, Result};
use std::fs;
use std::path::Path;

/// Reads and parses the file at `path`.
///
/// I/O errors are returned unchanged; the contents themselves always parse.
///
/// # Examples
///
/// ```no_run
/// use serde_ini_doc::{load, Container};
///
/// let doc = load("settings.ini")?;
/// println!("user = {}", doc.get("user"));
/// # Ok::<(), serde_ini_doc::Error>(())
/// ```
pub fn load<P: AsRef<Path>>(path: P) -> Result<Document> {
    load_with_options(path, &IniOptions::default())
}

/// Reads and parses the file at `path` with the given options.
pub fn load_with_options<P: AsRef<Path>>(path: P, options: &IniOptions) -> Result<Document> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    tracing::debug!(path = %path.display(), bytes = text.len(), "loaded document");
    Ok(crate::parse_with_options(&text, options))
}

impl Document {
    /// Writes the rendered document to `path`, replacing any existing file.
    ///
    /// An empty path is rejected with [`Error::InvalidPath`].
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.save_with_options(path, &IniOptions::default())
    }

    /// Writes the document rendered with `options` to `path`.
    pub fn save_with_options<P: AsRef<Path>>(&self, path: P, options: &IniOptions) -> Result<()> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Err(Error::InvalidPath(path.to_path_buf()));
        }
        let text = self.render(options);
        fs::write(path, &text)?;
        tracing::debug!(path = %path.display(), bytes = text.len(), "saved document");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_path_is_rejected() {
        let doc = Document::new();
        assert!(matches!(doc.save(""), Err(Error::InvalidPath(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load("/definitely/not/here.ini").unwrap_err();
        assert!(matches!(err, Error::Io(ref e) if e.kind() == std::io::ErrorKind::NotFound));
    }
}
