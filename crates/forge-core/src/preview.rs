//! Cached rasterization of vector icons for preview display.

use crate::error::PreviewError;
use log::debug;
use resvg::{tiny_skia, usvg};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// On-disk cache of raster previews for vector icons.
///
/// Cache keys are escaped source paths; a hit is simply "the
/// destination file already exists". No content hashing, no staleness
/// check against the source: entries survive across sessions inside
/// the scratch directory.
pub struct PreviewCache {
    scratch_dir: PathBuf,
}

impl PreviewCache {
    pub fn new(scratch_dir: PathBuf) -> Self {
        Self { scratch_dir }
    }

    /// Return a raster file usable for previewing `path`.
    ///
    /// Non-vector inputs pass through unchanged without touching the
    /// filesystem. Vector inputs are rendered once at intrinsic size
    /// into the scratch directory and the cached file is reused on
    /// every later call.
    pub fn raster_preview(&self, path: &Path) -> Result<PathBuf, PreviewError> {
        if path.extension().and_then(|e| e.to_str()) != Some("svg") {
            return Ok(path.to_path_buf());
        }

        fs::create_dir_all(&self.scratch_dir)?;

        let dest = self.scratch_dir.join(escaped_name(path));
        if dest.exists() {
            return Ok(dest);
        }

        self.render_png(path, &dest)?;
        debug!("rendered {} -> {}", path.display(), dest.display());
        Ok(dest)
    }

    fn render_png(&self, source: &Path, dest: &Path) -> Result<(), PreviewError> {
        let data = fs::read(source)?;
        let tree = usvg::Tree::from_data(&data, &usvg::Options::default()).map_err(|e| {
            PreviewError::Malformed {
                path: source.to_path_buf(),
                reason: e.to_string(),
            }
        })?;

        let size = tree.size().to_int_size();
        let mut pixmap = tiny_skia::Pixmap::new(size.width(), size.height()).ok_or_else(|| {
            PreviewError::Malformed {
                path: source.to_path_buf(),
                reason: "zero-sized image".to_string(),
            }
        })?;
        resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

        // Write to a sibling temp file and rename into place so another
        // process sharing the scratch directory never reads a partial PNG.
        let tmp = dest.with_extension("part");
        pixmap
            .save_png(&tmp)
            .map_err(|e| PreviewError::Io(io::Error::other(e)))?;
        fs::rename(&tmp, dest)?;
        Ok(())
    }
}

impl Default for PreviewCache {
    fn default() -> Self {
        Self::new(crate::paths::scratch_dir())
    }
}

/// Destination filename for a vector source: path separators become
/// backslashes so the flat scratch directory stays collision-free, and
/// the `svg` suffix becomes `png`.
fn escaped_name(path: &Path) -> String {
    let flat = path.to_string_lossy().replace('/', "\\");
    match flat.strip_suffix("svg") {
        Some(stem) => format!("{stem}png"),
        None => format!("{flat}.png"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const TINY_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="4" height="4"><rect width="4" height="4" fill="#ff0000"/></svg>"##;

    #[test]
    fn non_vector_passes_through() {
        let cache = PreviewCache::new(PathBuf::from("/tmp/unused-scratch"));
        let input = Path::new("/usr/share/pixmaps/app.png");

        let out = cache.raster_preview(input).unwrap();
        assert_eq!(out, input);
        assert!(!PathBuf::from("/tmp/unused-scratch").exists());
    }

    #[test]
    fn renders_vector_into_scratch() {
        let scratch = tempdir().unwrap();
        let icons = tempdir().unwrap();
        let source = icons.path().join("logo.svg");
        fs::write(&source, TINY_SVG).unwrap();

        let cache = PreviewCache::new(scratch.path().to_path_buf());
        let out = cache.raster_preview(&source).unwrap();

        assert!(out.starts_with(scratch.path()));
        assert!(out.to_string_lossy().ends_with("png"));
        assert!(out.exists());
        // Flat namespace: the whole source path is in the file name.
        assert!(out.file_name().unwrap().to_string_lossy().contains('\\'));
    }

    #[test]
    fn second_call_is_a_cache_hit() {
        let scratch = tempdir().unwrap();
        let icons = tempdir().unwrap();
        let source = icons.path().join("logo.svg");
        fs::write(&source, TINY_SVG).unwrap();

        let cache = PreviewCache::new(scratch.path().to_path_buf());
        let first = cache.raster_preview(&source).unwrap();

        fs::write(&first, b"sentinel").unwrap();
        let second = cache.raster_preview(&source).unwrap();

        assert_eq!(first, second);
        assert_eq!(fs::read(&second).unwrap(), b"sentinel");
    }

    #[test]
    fn malformed_vector_is_an_error() {
        let scratch = tempdir().unwrap();
        let icons = tempdir().unwrap();
        let source = icons.path().join("bad.svg");
        fs::write(&source, "this is not svg").unwrap();

        let cache = PreviewCache::new(scratch.path().to_path_buf());
        let err = cache.raster_preview(&source).unwrap_err();
        assert!(matches!(err, PreviewError::Malformed { .. }));

        // A failed render must not leave a cache entry behind.
        assert!(!scratch.path().join(escaped_name(&source)).exists());
    }

    #[test]
    fn uppercase_extension_passes_through() {
        let cache = PreviewCache::new(PathBuf::from("/tmp/unused-scratch"));
        let input = Path::new("/icons/logo.SVG");
        assert_eq!(cache.raster_preview(input).unwrap(), input);
    }
}
