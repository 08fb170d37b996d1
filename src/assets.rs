//! Asset resolution for a film directory, and the texture handles built
//! from the resolved files.
//!
//! Every film keeps its files in a directory named after its id:
//!
//! ```text
//! {id}/{id}.jpg    poster
//! {id}/{id}1.png   metadata panel (title, director, genres, plot)
//! {id}/{id}2.png   awards panel
//! {id}/{id}b.jpg   inner background
//! {id}/{id}.mp4    trailer
//! {id}/{id}.mp3    soundtrack
//! ```
//!
//! A missing file is reported per asset instead of being swallowed; the
//! caller decides what to show in its place.

use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::types::{Color, NamedColor, Style, GOLD};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
    Poster,
    Info,
    Awards,
    Background,
    Trailer,
    Soundtrack,
}

impl AssetKind {
    pub const ALL: [AssetKind; 6] = [
        AssetKind::Poster,
        AssetKind::Info,
        AssetKind::Awards,
        AssetKind::Background,
        AssetKind::Trailer,
        AssetKind::Soundtrack,
    ];

    pub fn file_name(self, id: &str) -> String {
        match self {
            AssetKind::Poster => format!("{id}.jpg"),
            AssetKind::Info => format!("{id}1.png"),
            AssetKind::Awards => format!("{id}2.png"),
            AssetKind::Background => format!("{id}b.jpg"),
            AssetKind::Trailer => format!("{id}.mp4"),
            AssetKind::Soundtrack => format!("{id}.mp3"),
        }
    }

    /// Path of this asset for film `id` under `root`.
    pub fn path(self, root: &Path, id: &str) -> PathBuf {
        root.join(id).join(self.file_name(id))
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AssetKind::Poster => "poster",
            AssetKind::Info => "info panel",
            AssetKind::Awards => "awards panel",
            AssetKind::Background => "background",
            AssetKind::Trailer => "trailer",
            AssetKind::Soundtrack => "soundtrack",
        };
        f.pad(name)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AssetError {
    #[error("film id is empty")]
    EmptyId,
    #[error("{kind} for `{id}` not found at {}", .path.display())]
    Missing {
        id: String,
        kind: AssetKind,
        path: PathBuf,
    },
}

/// Look up one asset on disk.
pub fn resolve(root: &Path, id: &str, kind: AssetKind) -> Result<PathBuf, AssetError> {
    if id.trim().is_empty() {
        return Err(AssetError::EmptyId);
    }
    let path = kind.path(root, id);
    if path.is_file() {
        Ok(path)
    } else {
        Err(AssetError::Missing {
            id: id.to_string(),
            kind,
            path,
        })
    }
}

/// Outcome of resolving every asset of one film.
#[derive(Debug, Clone, Default)]
pub struct AssetReport {
    pub id: String,
    pub resolved: Vec<(AssetKind, PathBuf)>,
    pub errors: Vec<AssetError>,
}

impl AssetReport {
    pub fn is_complete(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn missing(&self) -> impl Iterator<Item = AssetKind> + '_ {
        self.errors.iter().filter_map(|e| match e {
            AssetError::Missing { kind, .. } => Some(*kind),
            AssetError::EmptyId => None,
        })
    }
}

// ---------------------------------------------------------------------------
// Textures
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureKind {
    Poster,
    Info,
    Awards,
    Background,
    PlayIcon,
}

/// A still image bound to box faces. Only the source path is kept; on the
/// terminal a texture is drawn as a fill pattern with an optional caption.
#[derive(Debug, Clone, PartialEq)]
pub struct Texture {
    kind: TextureKind,
    source: Option<PathBuf>,
    mirrored: bool,
    caption: Option<String>,
}

impl Texture {
    pub fn missing(kind: TextureKind) -> Self {
        Texture {
            kind,
            source: None,
            mirrored: false,
            caption: None,
        }
    }

    pub fn from_file(kind: TextureKind, source: PathBuf) -> Self {
        Texture {
            kind,
            source: Some(source),
            mirrored: false,
            caption: None,
        }
    }

    /// The shared play icon, looked up as `play-button.png` under `root`.
    pub fn play_icon(root: &Path) -> Self {
        let path = root.join("play-button.png");
        if path.is_file() {
            Texture::from_file(TextureKind::PlayIcon, path)
        } else {
            Texture::missing(TextureKind::PlayIcon)
        }
    }

    /// Flip vertically.
    pub fn mirror(&mut self) {
        self.mirrored = !self.mirrored;
    }

    pub fn set_caption(&mut self, caption: impl Into<String>) {
        self.caption = Some(caption.into());
    }

    pub fn kind(&self) -> TextureKind {
        self.kind
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn is_loaded(&self) -> bool {
        self.source.is_some()
    }

    pub fn is_mirrored(&self) -> bool {
        self.mirrored
    }

    pub fn caption(&self) -> Option<&str> {
        self.caption.as_deref()
    }

    /// How this texture looks on the terminal. Unresolved textures get a
    /// placeholder pattern.
    pub fn fill(&self) -> (char, Style) {
        if !self.is_loaded() && self.kind != TextureKind::PlayIcon {
            return (
                '?',
                Style {
                    fg: Some(Color::Named(NamedColor::Red)),
                    dim: true,
                    ..Default::default()
                },
            );
        }
        match self.kind {
            TextureKind::Poster => ('▓', Style::fg(Color::Named(NamedColor::Yellow))),
            TextureKind::Info => ('▒', Style::fg(Color::Named(NamedColor::Cyan))),
            TextureKind::Awards => ('▒', Style::fg(GOLD)),
            TextureKind::Background => {
                let ch = if self.mirrored { '▖' } else { '▘' };
                (
                    ch,
                    Style {
                        fg: Some(Color::Named(NamedColor::Blue)),
                        dim: true,
                        ..Default::default()
                    },
                )
            }
            TextureKind::PlayIcon => (
                '▶',
                Style {
                    fg: Some(Color::Named(NamedColor::White)),
                    bold: true,
                    ..Default::default()
                },
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn file_names_follow_the_id_convention() {
        assert_eq!(AssetKind::Poster.file_name("coco"), "coco.jpg");
        assert_eq!(AssetKind::Info.file_name("coco"), "coco1.png");
        assert_eq!(AssetKind::Awards.file_name("coco"), "coco2.png");
        assert_eq!(AssetKind::Background.file_name("coco"), "cocob.jpg");
        assert_eq!(AssetKind::Trailer.file_name("coco"), "coco.mp4");
        assert_eq!(AssetKind::Soundtrack.file_name("coco"), "coco.mp3");
        assert_eq!(
            AssetKind::Trailer.path(Path::new("/data"), "coco"),
            PathBuf::from("/data/coco/coco.mp4")
        );
    }

    #[test]
    fn resolve_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("dunkirk")).unwrap();
        fs::write(dir.path().join("dunkirk/dunkirk.jpg"), b"jpg").unwrap();

        assert!(resolve(dir.path(), "dunkirk", AssetKind::Poster).is_ok());
        let err = resolve(dir.path(), "dunkirk", AssetKind::Trailer).unwrap_err();
        assert!(matches!(
            err,
            AssetError::Missing { kind: AssetKind::Trailer, .. }
        ));
        assert!(err.to_string().contains("trailer for `dunkirk`"));
    }

    #[test]
    fn empty_id_is_rejected() {
        let err = resolve(Path::new("."), "  ", AssetKind::Poster).unwrap_err();
        assert_eq!(err, AssetError::EmptyId);
    }

    #[test]
    fn missing_texture_draws_placeholder() {
        let (ch, _) = Texture::missing(TextureKind::Poster).fill();
        assert_eq!(ch, '?');
        let (ch, _) = Texture::from_file(TextureKind::Poster, "p.jpg".into()).fill();
        assert_eq!(ch, '▓');
    }
}
