//! forge-core: Launcher configuration and icon resolution engine for Linux desktops.
//!
//! Provides the non-visual half of the launcher installer:
//! - Icon index scanning ordered search roots with defined precedence
//! - Memoized prefix search for type-ahead icon lookup
//! - Cached rasterization of vector icons for preview display
//! - Launcher metadata accumulation with field-level validation
//! - Install action driving the external `makelauncher` tool
//!
//! The presentation layer owns all widgets and dialogs; it feeds user
//! input into these types and renders whatever they return. Everything
//! here is constructed explicitly and passed by value or reference,
//! never held in process-wide state.

mod error;
mod icons;
mod install;
mod paths;
mod preview;
mod spec;

pub use error::{IconError, InstallError, PreviewError};
pub use icons::{IconIndex, IconRoot};
pub use install::{InstallOutcome, Installer};
pub use paths::{active_icon_theme, default_search_roots, scratch_dir, user_icon_dir};
pub use preview::PreviewCache;
pub use spec::{CATEGORIES, LauncherSpec};
