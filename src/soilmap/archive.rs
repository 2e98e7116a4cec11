//! One-time fetch and extraction of the soil-map archive.
//!
//! The map is distributed as a zip containing a nested 7z archive
//! that in turn holds the shapefile. The fetch is idempotent: when
//! the shapefile is already present nothing is downloaded. An
//! exclusive file lock serializes concurrent invocations sharing one
//! cache directory, since a bare existence check is not atomic
//! against another process extracting at the same time.

use std::fs::{self, File};
use std::io::Cursor;
use std::path::PathBuf;

use fs2::FileExt;
use thiserror::Error;
use tracing::info;

use crate::http::{HttpClient, HttpError};

/// Error type for archive fetch and extraction.
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Transport-level failure
    #[error(transparent)]
    Http(#[from] HttpError),

    /// Archive host answered with a non-2xx status.
    #[error("archive host returned HTTP {0}")]
    Status(u16),

    /// Outer zip could not be read.
    #[error("zip error: {0}")]
    Zip(String),

    /// Nested 7z could not be read.
    #[error("7z error: {0}")]
    SevenZ(String),

    /// Extraction finished but the expected file is absent.
    #[error("archive did not contain {0:?}")]
    MissingAfterExtract(PathBuf),
}

/// Where the soil-map archive lives and where to cache it.
#[derive(Clone, Debug)]
pub struct SoilMapSource {
    /// Download URL of the outer zip
    pub archive_url: String,
    /// Local cache directory the archives extract into
    pub cache_dir: PathBuf,
    /// Nested 7z path, relative to `cache_dir`, present after the
    /// outer zip is extracted
    pub inner_archive: PathBuf,
    /// Shapefile path, relative to `cache_dir`, present after the
    /// nested archive is extracted
    pub shapefile: PathBuf,
}

impl SoilMapSource {
    /// Source for the BOFEK 2020 distribution.
    pub fn bofek2020<P: Into<PathBuf>>(cache_dir: P) -> Self {
        Self {
            archive_url: "https://www.wur.nl/nl/show/bofek-2020-gis-1.htm".to_string(),
            cache_dir: cache_dir.into(),
            inner_archive: PathBuf::from("BOFEK2020_GIS.7z"),
            shapefile: ["GIS", "shp_files", "bod_clusters.shp"].iter().collect(),
        }
    }

    /// Absolute path of the extracted shapefile.
    pub fn shapefile_path(&self) -> PathBuf {
        self.cache_dir.join(&self.shapefile)
    }
}

/// Make the soil-map shapefile available locally, fetching and
/// extracting the archive on first use.
///
/// Returns the shapefile path. Holds an exclusive lock on a lockfile
/// in the cache directory for the duration of the fetch-and-extract
/// step; the existence check is repeated after the lock is acquired
/// so a concurrent extractor's work is picked up instead of redone.
pub fn ensure_soil_map<C: HttpClient>(
    http: &C,
    source: &SoilMapSource,
) -> Result<PathBuf, ArchiveError> {
    let shape_path = source.shapefile_path();
    if shape_path.exists() {
        return Ok(shape_path);
    }

    fs::create_dir_all(&source.cache_dir)?;
    let lock_file = File::create(source.cache_dir.join(".soilmap.lock"))?;
    lock_file.lock_exclusive()?;
    // The lock releases when lock_file drops at return.

    if shape_path.exists() {
        return Ok(shape_path);
    }

    info!(url = %source.archive_url, "downloading soil-map archive");
    let response = http.get(&source.archive_url)?;
    if !response.is_success() {
        return Err(ArchiveError::Status(response.status));
    }

    info!(bytes = response.body.len(), "extracting soil-map archive");
    let mut outer = zip::ZipArchive::new(Cursor::new(response.body))
        .map_err(|e| ArchiveError::Zip(e.to_string()))?;
    outer
        .extract(&source.cache_dir)
        .map_err(|e| ArchiveError::Zip(e.to_string()))?;

    let inner = source.cache_dir.join(&source.inner_archive);
    sevenz_rust::decompress_file(&inner, &source.cache_dir)
        .map_err(|e| ArchiveError::SevenZ(e.to_string()))?;

    if !shape_path.exists() {
        return Err(ArchiveError::MissingAfterExtract(shape_path));
    }
    Ok(shape_path)
}
