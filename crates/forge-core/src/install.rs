//! Install action: drives the external launcher installer.

use crate::error::InstallError;
use crate::spec::LauncherSpec;
use log::info;
use std::path::PathBuf;
use std::process::Command;

/// Terminal outcome of an install attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InstallOutcome {
    /// The installer ran and exited zero.
    Success,
    /// A required field is missing; the installer was never invoked.
    /// Carries the first missing field, name checked before executable.
    ValidationFailed(&'static str),
    /// The installer exited non-zero. Surfaced verbatim, never retried.
    ExternalFailure { code: i32, diagnostics: String },
}

/// Handle on the external installer command.
pub struct Installer {
    program: PathBuf,
}

impl Installer {
    pub fn new(program: PathBuf) -> Self {
        Self { program }
    }

    /// Validate `spec` and run the installer with four positional
    /// arguments: name, executable invocation, icon path (possibly
    /// empty) and semicolon-terminated category list (possibly empty).
    ///
    /// Expected installer failure is an outcome, not an error; only a
    /// failure to spawn the installer at all is reported as an error.
    pub fn install(
        &self,
        spec: &LauncherSpec,
        icon_path: &str,
    ) -> Result<InstallOutcome, InstallError> {
        if spec.name().is_empty() {
            return Ok(InstallOutcome::ValidationFailed("name"));
        }
        if spec.executable().is_empty() {
            return Ok(InstallOutcome::ValidationFailed("executable"));
        }

        info!("installing '{}' ({})", spec.name(), spec.executable());

        let output = Command::new(&self.program)
            .arg(spec.name())
            .arg(spec.executable())
            .arg(icon_path)
            .arg(spec.category_string())
            .output()?;

        if output.status.success() {
            return Ok(InstallOutcome::Success);
        }

        Ok(InstallOutcome::ExternalFailure {
            // -1 stands in for signal-terminated children.
            code: output.status.code().unwrap_or(-1),
            diagnostics: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        })
    }
}

impl Default for Installer {
    /// Reference deployment installer at `~/bin/makelauncher`.
    fn default() -> Self {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("/"));
        Self::new(home.join("bin").join("makelauncher"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use std::path::Path;
    use tempfile::tempdir;

    fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    fn configured_spec(dir: &Path) -> LauncherSpec {
        let target = write_script(dir, "Discord", "exit 0");
        let mut spec = LauncherSpec::new();
        spec.set_name("Discord");
        spec.set_executable(&target);
        spec.add_category("Internet");
        spec
    }

    #[test]
    fn zero_exit_is_success() {
        let dir = tempdir().unwrap();
        let spec = configured_spec(dir.path());
        let installer = Installer::new(write_script(dir.path(), "makelauncher", "exit 0"));

        let outcome = installer.install(&spec, "/usr/share/pixmaps/discord.png").unwrap();
        assert_eq!(outcome, InstallOutcome::Success);
    }

    #[test]
    fn nonzero_exit_carries_code_and_stderr() {
        let dir = tempdir().unwrap();
        let spec = configured_spec(dir.path());
        let installer = Installer::new(write_script(
            dir.path(),
            "makelauncher",
            "echo 'permission denied' >&2; exit 1",
        ));

        let outcome = installer.install(&spec, "").unwrap();
        assert_eq!(
            outcome,
            InstallOutcome::ExternalFailure {
                code: 1,
                diagnostics: "permission denied".to_string(),
            }
        );
    }

    #[test]
    fn empty_name_fails_without_spawning() {
        let dir = tempdir().unwrap();
        let marker = dir.path().join("ran");
        let installer = Installer::new(write_script(
            dir.path(),
            "makelauncher",
            &format!("touch {}", marker.display()),
        ));

        let outcome = installer.install(&LauncherSpec::new(), "").unwrap();
        assert_eq!(outcome, InstallOutcome::ValidationFailed("name"));
        assert!(!marker.exists());
    }

    #[test]
    fn empty_executable_fails_after_name() {
        let dir = tempdir().unwrap();
        let installer = Installer::new(write_script(dir.path(), "makelauncher", "exit 0"));

        let mut spec = LauncherSpec::new();
        spec.set_name("Discord");

        let outcome = installer.install(&spec, "").unwrap();
        assert_eq!(outcome, InstallOutcome::ValidationFailed("executable"));
    }

    #[test]
    fn arguments_arrive_positionally() {
        let dir = tempdir().unwrap();
        let spec = configured_spec(dir.path());
        let log = dir.path().join("args");
        let installer = Installer::new(write_script(
            dir.path(),
            "makelauncher",
            &format!("printf '%s|%s|%s|%s' \"$1\" \"$2\" \"$3\" \"$4\" > {}", log.display()),
        ));

        installer.install(&spec, "/icons/discord.png").unwrap();

        let recorded = fs::read_to_string(&log).unwrap();
        let exec = spec.executable();
        assert_eq!(recorded, format!("Discord|{exec}|/icons/discord.png|Internet;"));
    }

    #[test]
    fn missing_installer_is_an_io_error() {
        let dir = tempdir().unwrap();
        let spec = configured_spec(dir.path());
        let installer = Installer::new(dir.path().join("no-such-tool"));

        assert!(matches!(installer.install(&spec, ""), Err(InstallError::Io(_))));
    }
}
