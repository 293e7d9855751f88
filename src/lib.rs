//! # bible-atlas — Dataset Join & Index Builder
//!
//! Joins ancient place records to modern-day locations and emits the compact
//! JSON artifacts the Bible Atlas map loads in the browser.
//!
//! ## Design Principles
//!
//! 1. **Two stages**: the modern lookup table is complete and read-only before
//!    any ancient place is resolved against it
//! 2. **Clean DTOs**: input records and output artifacts live in [`model`] and
//!    carry no I/O
//! 3. **Normalize at the edge**: coordinate strings and list-or-map linked data
//!    are converted once, during deserialization
//! 4. **Deterministic output**: every mapping keeps input order
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use bible_atlas::{BuildConfig, build};
//!
//! # fn example() -> bible_atlas::Result<()> {
//! let config = BuildConfig::from_root("bible-geo", "app/public/data");
//! let summary = build(&config)?;
//! println!("{} places resolved", summary.resolved);
//! # Ok(())
//! # }
//! ```
//!
//! ## Artifacts
//!
//! | File | Shape |
//! |------|-------|
//! | `markers.json` | array of [`Marker`] |
//! | `places.json` | array of [`Place`] |
//! | `verse-index.json` | book code → place ids |
//! | `markers-light.json` | array of [`LightMarker`] |
//! | `place-lookup.json` | place id → [`Place`] |
//! | `modern-to-ancient.json` | modern id → place ids |
//! | `geometry/*.geojson` | verbatim copies |

use std::path::{Path, PathBuf};

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod ingest;
pub mod join;
pub mod index;
pub mod geometry;
pub mod export;
pub mod query;
pub mod config;

// ============================================================================
// Re-exports
// ============================================================================

pub use model::{
    AncientPlace, ModernLocation, LonLat, Links, GeometryKind,
    Marker, Place, PlaceVerse, LightMarker,
};
pub use join::{ModernTable, ResolvedPlace};
pub use index::{Indices, VerseIndex};
pub use geometry::GeometryReport;
pub use query::{Catalog, MarkerFilter, Selection};
pub use config::BuildConfig;

// ============================================================================
// Top-level Atlas handle
// ============================================================================

/// The joined dataset: markers for every modern location and one resolved
/// [`Place`] per ancient record, in input order.
pub struct Atlas {
    markers: Vec<Marker>,
    places: Vec<Place>,
    dangling: usize,
}

impl Atlas {
    /// Run both join stages over already-parsed records.
    pub fn from_records(modern: Vec<ModernLocation>, ancient: Vec<AncientPlace>) -> Self {
        // Stage 1: the table owns every modern record until resolution ends
        let (markers, table) = join::normalize_modern(modern);

        // Stage 2: resolution only borrows the finished table
        let resolved = join::resolve_places(&ancient, &table);
        let dangling = resolved.iter().map(|r| r.dangling).sum();
        let places = resolved.into_iter().map(|r| r.place).collect();

        Self { markers, places, dangling }
    }

    /// Read both record files named by `config` and join them.
    pub fn load(config: &BuildConfig) -> Result<Self> {
        let modern = ingest::read_records(&config.modern_path)?;
        let ancient = ingest::read_records(&config.ancient_path)?;
        Ok(Self::from_records(modern, ancient))
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn places(&self) -> &[Place] {
        &self.places
    }

    /// Association candidates skipped because their modern id is unknown.
    pub fn dangling_candidates(&self) -> usize {
        self.dangling
    }

    /// Build the lookup indices over this atlas.
    pub fn indices(&self) -> Indices<'_> {
        Indices::build(&self.markers, &self.places)
    }

    /// Write the six JSON artifacts into `out_dir`.
    pub fn write(&self, out_dir: &Path) -> Result<()> {
        export::write_artifacts(out_dir, &self.markers, &self.places, &self.indices())
    }
}

// ============================================================================
// Build entry point
// ============================================================================

/// Counts reported at the end of a build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildSummary {
    pub markers: usize,
    pub places: usize,
    pub resolved: usize,
    pub dangling_candidates: usize,
    pub books: usize,
    pub geometry_files: usize,
}

/// Run a full build: read, join, copy geometry, write artifacts.
///
/// Every artifact is regenerated from scratch; nothing from a previous run
/// is read or merged.
pub fn build(config: &BuildConfig) -> Result<BuildSummary> {
    let atlas = Atlas::load(config)?;

    let geometry_out = config.out_dir.join(geometry::GEOMETRY_DIR);
    create_dir(&geometry_out)?;
    let report = geometry::copy_geometry(&config.geometry_dir, &geometry_out)?;

    atlas.write(&config.out_dir)?;

    let summary = BuildSummary {
        markers: atlas.markers().len(),
        places: atlas.places().len(),
        resolved: atlas.places().iter().filter(|p| p.is_resolved()).count(),
        dangling_candidates: atlas.dangling_candidates(),
        books: atlas.indices().verse_index.len(),
        geometry_files: report.copied,
    };

    tracing::info!(
        markers = summary.markers,
        places = summary.places,
        resolved = summary.resolved,
        dangling = summary.dangling_candidates,
        books = summary.books,
        geometry = summary.geometry_files,
        out_dir = %config.out_dir.display(),
        "atlas build complete"
    );

    Ok(summary)
}

fn create_dir(path: &Path) -> Result<()> {
    std::fs::create_dir_all(path).map_err(|source| Error::WriteArtifact {
        path: path.to_path_buf(),
        source,
    })
}

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{}:{line}: malformed record: {source}", .path.display())]
    MalformedInput {
        path: PathBuf,
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("cannot read {}: {source}", .path.display())]
    ReadInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot write {}: {source}", .path.display())]
    WriteArtifact {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Encoding error: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
