//! Zenity-backed dialog implementation.

use crate::{Dialogs, FileFilter, Notice};
use log::warn;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Dialogs shelling out to the `zenity` command-line tool.
#[derive(Default)]
pub struct ZenityDialogs;

impl ZenityDialogs {
    pub fn new() -> Self {
        Self
    }
}

impl Dialogs for ZenityDialogs {
    fn request_file(&self, filters: &[FileFilter], start_dir: &Path) -> Option<PathBuf> {
        let mut cmd = Command::new("zenity");
        cmd.arg("--file-selection");
        // Trailing slash makes zenity open inside the directory.
        cmd.arg(format!("--filename={}/", start_dir.display()));
        for filter in filters {
            cmd.arg(format!("--file-filter={}", filter_arg(filter)));
        }

        let output = match cmd.output() {
            Ok(output) => output,
            Err(e) => {
                warn!("failed to spawn zenity: {e}");
                return None;
            }
        };

        if !output.status.success() {
            return None;
        }

        let raw = String::from_utf8_lossy(&output.stdout);
        let path = raw.trim_end_matches('\n');
        if path.is_empty() {
            None
        } else {
            Some(PathBuf::from(path))
        }
    }

    fn notify(&self, kind: Notice, title: &str, message: &str) {
        let flag = match kind {
            Notice::Info => "--info",
            Notice::Warning => "--warning",
            Notice::Error => "--error",
        };

        let status = Command::new("zenity")
            .arg(flag)
            .arg(format!("--title={title}"))
            .arg(format!("--text={message}"))
            .status();
        if let Err(e) = status {
            warn!("failed to spawn zenity: {e}");
        }
    }
}

/// `--file-filter` argument value: `Label | *.png *.svg`.
fn filter_arg(filter: &FileFilter) -> String {
    format!("{} | {}", filter.label, filter.patterns.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_arg_joins_patterns() {
        let f = FileFilter::new("Images", &["*.png", "*.svg"]);
        assert_eq!(filter_arg(&f), "Images | *.png *.svg");
    }

    #[test]
    fn filter_arg_single_pattern() {
        let f = FileFilter::new("All files", &["*"]);
        assert_eq!(filter_arg(&f), "All files | *");
    }
}
