//! forge-dialogs: file picker and message dialogs for the launcher UI.
//!
//! Callers depend on the [`Dialogs`] contract only; the zenity backend
//! is the single implementation in scope. Other dialog tools (kdialog,
//! yad) slot in as further implementations of the trait. A backend is
//! constructed once at startup and passed by reference to whatever
//! needs it.

mod zenity;

pub use zenity::ZenityDialogs;

use std::path::{Path, PathBuf};

/// Message severity for [`Dialogs::notify`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Notice {
    Info,
    Warning,
    Error,
}

/// One file-picker filter group, e.g. label "Images" with patterns
/// `*.png` and `*.svg`.
#[derive(Clone, Debug)]
pub struct FileFilter {
    pub label: String,
    pub patterns: Vec<String>,
}

impl FileFilter {
    pub fn new(label: &str, patterns: &[&str]) -> Self {
        Self {
            label: label.to_string(),
            patterns: patterns.iter().map(|p| p.to_string()).collect(),
        }
    }
}

/// Contract every dialog backend implements.
pub trait Dialogs {
    /// Prompt the user for a file, starting in `start_dir`. Returns
    /// None when the picker is cancelled.
    fn request_file(&self, filters: &[FileFilter], start_dir: &Path) -> Option<PathBuf>;

    /// Display a message of the given severity.
    fn notify(&self, kind: Notice, title: &str, message: &str);
}
