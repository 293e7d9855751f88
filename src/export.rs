//! Artifact export — serialize a joined atlas as the display layer's JSON.
//!
//! ```text
//! markers + places + Indices → write_artifacts() → out_dir/*.json
//! ```
//!
//! Files are written one after another as compact JSON. Each file is
//! complete on its own, so a failed build leaves nothing that needs cleanup
//! beyond rerunning it.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::index::Indices;
use crate::model::{Marker, Place};
use crate::{Error, Result};

pub const MARKERS: &str = "markers.json";
pub const PLACES: &str = "places.json";
pub const VERSE_INDEX: &str = "verse-index.json";
pub const MARKERS_LIGHT: &str = "markers-light.json";
pub const PLACE_LOOKUP: &str = "place-lookup.json";
pub const MODERN_TO_ANCIENT: &str = "modern-to-ancient.json";

/// Every JSON artifact, in write order.
pub const ARTIFACTS: [&str; 6] = [
    MARKERS,
    PLACES,
    VERSE_INDEX,
    MARKERS_LIGHT,
    PLACE_LOOKUP,
    MODERN_TO_ANCIENT,
];

/// Write all six JSON artifacts into `out_dir`, creating it if needed.
pub fn write_artifacts(
    out_dir: &Path,
    markers: &[Marker],
    places: &[Place],
    indices: &Indices<'_>,
) -> Result<()> {
    std::fs::create_dir_all(out_dir).map_err(|source| Error::WriteArtifact {
        path: out_dir.to_path_buf(),
        source,
    })?;

    write_json_file(&out_dir.join(MARKERS), &markers)?;
    write_json_file(&out_dir.join(PLACES), &places)?;
    write_json_file(&out_dir.join(VERSE_INDEX), &indices.verse_index)?;
    write_json_file(&out_dir.join(MARKERS_LIGHT), &indices.light_markers)?;
    write_json_file(&out_dir.join(PLACE_LOOKUP), &indices.place_lookup)?;
    write_json_file(&out_dir.join(MODERN_TO_ANCIENT), &indices.modern_to_ancient)?;

    tracing::debug!(dir = %out_dir.display(), "wrote artifacts");
    Ok(())
}

/// Serialize `value` as compact JSON into a fresh file at `path`.
pub fn write_json_file<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let io_err = |source| Error::WriteArtifact { path: path.to_path_buf(), source };

    let file = File::create(path).map_err(io_err)?;
    let mut writer = BufWriter::new(file);
    write_json(&mut writer, value)?;
    writer.flush().map_err(io_err)
}

/// Serialize `value` as compact JSON into any writer.
pub fn write_json<T: Serialize + ?Sized>(writer: &mut dyn Write, value: &T) -> Result<()> {
    serde_json::to_writer(writer, value).map_err(|err| match err.io_error_kind() {
        Some(_) => Error::Io(err.into()),
        None => Error::Encode(err),
    })
}
