//! LaunchForge - configure and install desktop launchers.
//!
//! Thin command-line driver over the forge-core engine. Field
//! validation, icon lookup, preview caching and installer handling all
//! live in the engine; this binary only collects input and reports
//! outcomes.

use forge_core::{
    CATEGORIES, IconIndex, InstallOutcome, Installer, LauncherSpec, PreviewCache,
    active_icon_theme, default_search_roots, user_icon_dir,
};
use forge_dialogs::{Dialogs, FileFilter, Notice, ZenityDialogs};
use log::debug;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

const USAGE: &str = "\
Usage: LaunchForge [OPTIONS]

Options:
  --name NAME          launcher display name
  --exec PATH          executable file (zenity picker when omitted)
  --icon KEY           icon key from the index
  --category NAME      add a category (repeatable)
  --add-icon PATH      import an icon file before resolving --icon
  --search PREFIX      print matching icon keys and exit
  --preview KEY        print the raster preview path for KEY and exit
  --installer PATH     installer command (default ~/bin/makelauncher)
  --list-categories    print the category vocabulary and exit
  -h, --help           show this help
";

#[derive(Default)]
struct Args {
    name: Option<String>,
    exec: Option<PathBuf>,
    icon: Option<String>,
    categories: Vec<String>,
    add_icon: Option<PathBuf>,
    search: Option<String>,
    preview: Option<String>,
    installer: Option<PathBuf>,
    list_categories: bool,
    help: bool,
}

fn parse_args(argv: impl Iterator<Item = String>) -> Result<Args, String> {
    let mut args = Args::default();
    let mut it = argv;
    while let Some(flag) = it.next() {
        match flag.as_str() {
            "--name" => args.name = Some(value(&mut it, "--name")?),
            "--exec" => args.exec = Some(PathBuf::from(value(&mut it, "--exec")?)),
            "--icon" => args.icon = Some(value(&mut it, "--icon")?),
            "--category" => args.categories.push(value(&mut it, "--category")?),
            "--add-icon" => args.add_icon = Some(PathBuf::from(value(&mut it, "--add-icon")?)),
            "--search" => args.search = Some(value(&mut it, "--search")?),
            "--preview" => args.preview = Some(value(&mut it, "--preview")?),
            "--installer" => args.installer = Some(PathBuf::from(value(&mut it, "--installer")?)),
            "--list-categories" => args.list_categories = true,
            "-h" | "--help" => args.help = true,
            other => return Err(format!("unknown option '{other}'")),
        }
    }
    Ok(args)
}

fn value(it: &mut impl Iterator<Item = String>, flag: &str) -> Result<String, String> {
    it.next().ok_or_else(|| format!("{flag} needs a value"))
}

fn main() -> ExitCode {
    env_logger::init();

    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(msg) => {
            eprintln!("{msg}");
            eprint!("{USAGE}");
            return ExitCode::from(2);
        }
    };

    if args.help {
        print!("{USAGE}");
        return ExitCode::SUCCESS;
    }

    if args.list_categories {
        for category in CATEGORIES {
            println!("{category}");
        }
        return ExitCode::SUCCESS;
    }

    let dialogs = ZenityDialogs::new();
    run(args, &dialogs)
}

fn run(args: Args, dialogs: &dyn Dialogs) -> ExitCode {
    let theme = active_icon_theme();
    debug!("active icon theme: {theme}");
    let mut index = IconIndex::build(&default_search_roots(&theme), user_icon_dir());

    if let Some(file) = &args.add_icon {
        if let Err(e) = index.add_icon(file) {
            dialogs.notify(Notice::Error, "Add icon", &e.to_string());
            return ExitCode::FAILURE;
        }
    }

    if let Some(prefix) = &args.search {
        for (name, path) in index.search(prefix) {
            println!("{name}\t{}", path.display());
        }
        return ExitCode::SUCCESS;
    }

    if let Some(key) = &args.preview {
        let Some(path) = index.get(key) else {
            dialogs.notify(Notice::Error, "Preview", &format!("no icon named '{key}'"));
            return ExitCode::FAILURE;
        };
        return match PreviewCache::default().raster_preview(path) {
            Ok(raster) => {
                println!("{}", raster.display());
                ExitCode::SUCCESS
            }
            Err(e) => {
                dialogs.notify(Notice::Error, "Preview", &e.to_string());
                ExitCode::FAILURE
            }
        };
    }

    let mut spec = LauncherSpec::new();
    if let Some(name) = &args.name {
        spec.set_name(name);
    }

    let exec = args.exec.clone().or_else(|| {
        let home = std::env::var("HOME").unwrap_or_else(|_| "/".to_string());
        dialogs.request_file(&[FileFilter::new("All files", &["*"])], Path::new(&home))
    });
    if let Some(exec) = &exec {
        if !spec.set_executable(exec) {
            dialogs.notify(
                Notice::Error,
                "Executable",
                &format!("'{}' is not a file", exec.display()),
            );
            return ExitCode::FAILURE;
        }
        if spec.executable().is_empty() {
            dialogs.notify(
                Notice::Warning,
                "Executable",
                &format!("'{}' is not a valid executable", exec.display()),
            );
        }
    }

    for category in &args.categories {
        if !spec.add_category(category) {
            dialogs.notify(
                Notice::Warning,
                "Category",
                &format!("'{category}' is not a known category"),
            );
        }
    }

    if let Some(key) = &args.icon {
        if !spec.set_icon(key, &index) {
            dialogs.notify(Notice::Warning, "Icon", &format!("no icon named '{key}'"));
        }
    }

    let icon_path = index
        .get(spec.icon())
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_default();

    let installer = args.installer.map(Installer::new).unwrap_or_default();
    match installer.install(&spec, &icon_path) {
        Ok(InstallOutcome::Success) => {
            dialogs.notify(
                Notice::Info,
                "Install",
                &format!("'{}' was installed", spec.name()),
            );
            ExitCode::SUCCESS
        }
        Ok(InstallOutcome::ValidationFailed(field)) => {
            dialogs.notify(Notice::Error, "Install", &format!("the {field} is invalid"));
            ExitCode::FAILURE
        }
        Ok(InstallOutcome::ExternalFailure { code, diagnostics }) => {
            dialogs.notify(
                Notice::Error,
                "Install",
                &format!("installer exited with {code}: {diagnostics}"),
            );
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        }
        Err(e) => {
            dialogs.notify(Notice::Error, "Install", &e.to_string());
            ExitCode::FAILURE
        }
    }
}
