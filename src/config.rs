//! Build configuration.
//!
//! The defaults mirror the dataset checkout layout:
//!
//! ```text
//! data/modern.jsonl     modern locations, one JSON object per line
//! data/ancient.jsonl    ancient places, one JSON object per line
//! geometry/*.geojson    loose geometry files
//! public/data/          generated artifacts
//! ```

use std::path::{Path, PathBuf};

pub const MODERN_FILE: &str = "modern.jsonl";
pub const ANCIENT_FILE: &str = "ancient.jsonl";

/// Where a build reads its inputs and writes its artifacts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfig {
    pub modern_path: PathBuf,
    pub ancient_path: PathBuf,
    /// Source of `*.geojson` files. A missing directory is not an error.
    pub geometry_dir: PathBuf,
    pub out_dir: PathBuf,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self::from_root(".", "public/data")
    }
}

impl BuildConfig {
    /// Inputs under `root/data` and `root/geometry`, artifacts into `out_dir`.
    pub fn from_root(root: impl AsRef<Path>, out_dir: impl Into<PathBuf>) -> Self {
        let root = root.as_ref();
        Self::from_data_dir(root.join("data"), root.join("geometry"), out_dir)
    }

    pub fn from_data_dir(
        data_dir: impl AsRef<Path>,
        geometry_dir: impl Into<PathBuf>,
        out_dir: impl Into<PathBuf>,
    ) -> Self {
        let data_dir = data_dir.as_ref();
        Self {
            modern_path: data_dir.join(MODERN_FILE),
            ancient_path: data_dir.join(ANCIENT_FILE),
            geometry_dir: geometry_dir.into(),
            out_dir: out_dir.into(),
        }
    }

    pub fn with_modern_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.modern_path = path.into();
        self
    }

    pub fn with_ancient_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.ancient_path = path.into();
        self
    }
}
