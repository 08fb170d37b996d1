//! Film catalog: the JSON file listing the films of the universe.
//!
//! ```json
//! { "movies": [ { "ID": "coco", "title": "Coco", "trailer_seconds": 150 } ] }
//! ```
//!
//! Asset directories are looked up next to the catalog file.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    pub movies: Vec<FilmRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilmRecord {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trailer_seconds: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub soundtrack_seconds: Option<f64>,
}

impl FilmRecord {
    pub fn trailer_length(&self) -> Option<Duration> {
        self.trailer_seconds.and_then(seconds)
    }

    pub fn soundtrack_length(&self) -> Option<Duration> {
        self.soundtrack_seconds.and_then(seconds)
    }
}

fn seconds(s: f64) -> Option<Duration> {
    Duration::try_from_secs_f64(s).ok()
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse {}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("{} lists no films", .path.display())]
    Empty { path: PathBuf },
}

impl Catalog {
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let json = fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog: Catalog = serde_json::from_str(&json).map_err(|source| CatalogError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        if catalog.movies.is_empty() {
            return Err(CatalogError::Empty {
                path: path.to_path_buf(),
            });
        }
        Ok(catalog)
    }

    /// Directory the film asset folders live in.
    pub fn asset_root(path: &Path) -> PathBuf {
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_and_full_records() {
        let catalog: Catalog = serde_json::from_str(
            r#"{"movies": [
                {"ID": "coco"},
                {"ID": "dunkirk", "title": "Dunkirk", "trailer_seconds": 138.5, "soundtrack_seconds": -3}
            ]}"#,
        )
        .unwrap();
        assert_eq!(catalog.movies.len(), 2);
        assert_eq!(catalog.movies[0].id, "coco");
        assert!(catalog.movies[0].title.is_none());
        assert_eq!(
            catalog.movies[1].trailer_length(),
            Some(Duration::from_millis(138_500))
        );
        assert_eq!(catalog.movies[1].soundtrack_length(), None);
    }

    #[test]
    fn empty_catalog_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("movies.json");
        fs::write(&path, r#"{"movies": []}"#).unwrap();
        assert!(matches!(Catalog::load(&path), Err(CatalogError::Empty { .. })));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = Catalog::load(Path::new("/nonexistent/movies.json")).unwrap_err();
        assert!(matches!(err, CatalogError::Read { .. }));
        assert!(err.to_string().contains("movies.json"));
    }

    #[test]
    fn asset_root_is_the_catalog_directory() {
        assert_eq!(Catalog::asset_root(Path::new("data/movies.json")), PathBuf::from("data"));
        assert_eq!(Catalog::asset_root(Path::new("movies.json")), PathBuf::from("."));
    }
}
