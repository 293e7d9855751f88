//! Geometry file copying.
//!
//! Geometry files are opaque: they are matched by extension and copied byte
//! for byte, never parsed. Copying is best-effort: a missing or unreadable
//! source directory degrades to zero files with a warning.

use std::path::Path;

use walkdir::WalkDir;

use crate::{Error, Result};

/// Subdirectory of the output directory that receives geometry files.
pub const GEOMETRY_DIR: &str = "geometry";

/// Only files with this extension are copied.
pub const GEOMETRY_EXT: &str = "geojson";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GeometryReport {
    pub copied: usize,
    /// Files that matched but could not be copied.
    pub skipped: usize,
    /// The source directory could not be read at all.
    pub source_missing: bool,
}

/// Copy every `*.geojson` file directly inside `src` into `dest`.
///
/// `dest` must already exist. Only a failure to write into `dest` is an
/// error; problems on the source side are logged and skipped.
pub fn copy_geometry(src: &Path, dest: &Path) -> Result<GeometryReport> {
    let mut report = GeometryReport::default();

    if !src.is_dir() {
        tracing::warn!(dir = %src.display(), "geometry source not found, copying no geometry files");
        report.source_missing = true;
        return Ok(report);
    }

    let walker = WalkDir::new(src)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name();

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) if err.depth() == 0 => {
                tracing::warn!(dir = %src.display(), error = %err, "cannot read geometry source, copying no geometry files");
                report.source_missing = true;
                return Ok(report);
            }
            Err(err) => {
                tracing::warn!(error = %err, "skipping unreadable geometry entry");
                report.skipped += 1;
                continue;
            }
        };

        if !entry.file_type().is_file() || !is_geometry_file(entry.path()) {
            continue;
        }

        let target = dest.join(entry.file_name());
        match std::fs::copy(entry.path(), &target) {
            Ok(_) => report.copied += 1,
            Err(source) if target.parent().is_some_and(|d| !d.is_dir()) => {
                return Err(Error::WriteArtifact { path: target, source });
            }
            Err(err) => {
                tracing::warn!(file = %entry.path().display(), error = %err, "skipping geometry file");
                report.skipped += 1;
            }
        }
    }

    tracing::debug!(copied = report.copied, skipped = report.skipped, "copied geometry files");
    Ok(report)
}

fn is_geometry_file(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == GEOMETRY_EXT)
}
