//! Launcher metadata accumulation and field-level validation.

use crate::icons::IconIndex;
use log::warn;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;

/// Closed category vocabulary, in canonical display order.
pub const CATEGORIES: [&str; 11] = [
    "Accessories",
    "Education",
    "Games",
    "Graphics",
    "Internet",
    "Office",
    "Other",
    "Programming",
    "SoundVideo",
    "Administration",
    "Preferences",
];

/// The launcher being configured: display name, executable invocation,
/// icon key and category set. One spec lives per configuration
/// session; a fresh session starts with [`LauncherSpec::reset`].
#[derive(Clone, Debug, Default)]
pub struct LauncherSpec {
    name: String,
    executable: String,
    icon: String,
    categories: Vec<String>,
}

impl LauncherSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn executable(&self) -> &str {
        &self.executable
    }

    pub fn icon(&self) -> &str {
        &self.icon
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Unconditional assignment; always succeeds.
    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    /// Derive the executable invocation from `file`.
    ///
    /// Returns false when `file` is not a regular file. For a regular
    /// file the return value is true even when no invocation could be
    /// derived: an existing file without execute permission and with an
    /// unrecognized extension leaves the field unset. Callers that need
    /// to know whether the field was actually set must check
    /// [`LauncherSpec::executable`] afterwards.
    pub fn set_executable(&mut self, file: &Path) -> bool {
        if !file.is_file() {
            warn!("'{}' is not a file", file.display());
            return false;
        }

        if has_exec_bit(file) {
            self.executable = file.to_string_lossy().into_owned();
        } else {
            match file.extension().and_then(|e| e.to_str()) {
                Some("jar") => self.executable = format!("java -jar {}", file.display()),
                Some("py") => self.executable = format!("python {}", file.display()),
                _ => warn!("'{}' is not a valid executable", file.display()),
            }
        }
        true
    }

    /// Append `value` to the category set, keeping insertion order.
    /// Fails for values outside [`CATEGORIES`] and for duplicates.
    pub fn add_category(&mut self, value: &str) -> bool {
        if !CATEGORIES.contains(&value) || self.categories.iter().any(|c| c == value) {
            return false;
        }
        self.categories.push(value.to_string());
        true
    }

    /// Select an icon by index key. Fails when the key is unknown.
    pub fn set_icon(&mut self, key: &str, index: &IconIndex) -> bool {
        if !index.contains(key) {
            return false;
        }
        self.icon = key.to_string();
        true
    }

    /// Semicolon-terminated category list as handed to the installer,
    /// e.g. `"Internet;Office;"`. Empty when no category was added.
    pub fn category_string(&self) -> String {
        self.categories.iter().map(|c| format!("{c};")).collect()
    }

    /// Clear every field for a fresh configuration session.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

fn has_exec_bit(file: &Path) -> bool {
    file.metadata()
        .map(|m| m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}
