//! Matching keys derived from folder names.

use std::ffi::OsStr;
use std::fmt;
use std::path::Path;

use crate::merge::ReconcileError;

/// Upper-cased first whitespace-delimited token of a folder name.
///
/// For example, both `abc-1 Widgets` and `ABC-1 widgets` produce `ABC-1`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Identifier(String);

impl Identifier {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Extract the identifier from a folder base name.
///
/// Returns `None` when the name is empty or only contains whitespace.
/// Punctuation is kept as is, so `ABC-1, Widgets` gives `ABC-1,`.
#[must_use]
pub fn extract_identifier(name: &str) -> Option<Identifier> {
    extract_identifier_from_os_str(OsStr::new(name))
}

/// Extract the identifier from a raw file name that may not be valid Unicode.
///
/// Bytes that are not valid UTF-8 are kept as lowercase `\xNN` escapes and are not upper-cased,
/// so they can never collide with a name that spells out the same escape in text.
#[must_use]
pub fn extract_identifier_from_os_str(name: &OsStr) -> Option<Identifier> {
    let mut token = String::new();
    for chunk in name.as_encoded_bytes().utf8_chunks() {
        let valid = if token.is_empty() {
            chunk.valid().trim_start()
        } else {
            chunk.valid()
        };
        if let Some(end) = valid.find(char::is_whitespace) {
            token.push_str(&valid[..end].to_uppercase());
            break;
        }
        token.push_str(&valid.to_uppercase());
        token.push_str(&chunk.invalid().escape_ascii().to_string());
    }
    (!token.is_empty()).then_some(Identifier(token))
}

/// Extract the identifier from the base name of a folder path.
///
/// # Errors
/// Returns [`ReconcileError::InvalidName`] if the path has no usable base name.
pub fn identifier_for_folder(path: &Path) -> Result<Identifier, ReconcileError> {
    path.file_name()
        .and_then(extract_identifier_from_os_str)
        .ok_or_else(|| ReconcileError::InvalidName(path.to_path_buf()))
}
