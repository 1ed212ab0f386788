//! Path helpers for icon search roots and the preview scratch directory.
//!
//! The engine itself takes resolved directories; this module is the
//! reference deployment's resolution of them.

use crate::icons::IconRoot;
use std::path::PathBuf;
use std::process::Command;

/// Resolve the active icon theme name.
/// `GTK_THEME` wins, then the desktop's gsettings key, then hicolor.
pub fn active_icon_theme() -> String {
    if let Ok(theme) = std::env::var("GTK_THEME") {
        if !theme.is_empty() {
            return theme;
        }
    }

    if let Ok(output) = Command::new("gsettings")
        .args(["get", "org.cinnamon.desktop.interface", "icon-theme"])
        .output()
    {
        if output.status.success() {
            let raw = String::from_utf8_lossy(&output.stdout);
            let theme = raw.trim().trim_matches('\'');
            if !theme.is_empty() {
                return theme.to_string();
            }
        }
    }

    "hicolor".to_string()
}

/// Icon search roots for the reference deployment, scanned in order:
/// the theme's apps subtree, user icons, system pixmaps. A later
/// root's entry for an already-seen name wins.
pub fn default_search_roots(theme: &str) -> Vec<IconRoot> {
    vec![
        IconRoot::recursive(PathBuf::from("/usr/share/icons").join(theme).join("apps")),
        IconRoot::flat(user_icon_dir()),
        IconRoot::recursive(PathBuf::from("/usr/share/pixmaps")),
    ]
}

/// User-level icon directory (`~/.icons`), also the destination for
/// imported icons.
pub fn user_icon_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("/"))
        .join(".icons")
}

/// Well-known scratch directory for cached raster previews. Shared
/// across sessions; created on first use.
pub fn scratch_dir() -> PathBuf {
    std::env::temp_dir().join("launchforge-previews")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Tests that touch GTK_THEME must not race each other
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn gtk_theme_env_overrides() {
        let _guard = ENV_LOCK.lock().unwrap();

        unsafe {
            env::set_var("GTK_THEME", "Mint-Y");
        }
        assert_eq!(active_icon_theme(), "Mint-Y");
        unsafe {
            env::remove_var("GTK_THEME");
        }
    }

    #[test]
    fn default_roots_precedence_order() {
        let roots = default_search_roots("hicolor");
        assert_eq!(roots.len(), 3);

        assert_eq!(roots[0].dir, PathBuf::from("/usr/share/icons/hicolor/apps"));
        assert!(roots[0].recursive);

        assert!(roots[1].dir.ends_with(".icons"));
        assert!(!roots[1].recursive);

        assert_eq!(roots[2].dir, PathBuf::from("/usr/share/pixmaps"));
        assert!(roots[2].recursive);
    }
}
