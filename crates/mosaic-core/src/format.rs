//! Frame format catalog.
//!
//! The compositor never invents frame dimensions: it only accepts presets from
//! a [`FormatCatalog`] supplied by the host (or the built-in one). Presets are
//! grouped by [`FrameOrientation`], and each group has its own key space, so
//! `("portrait", "a4")` and `("landscape", "a4")` are distinct frames.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Format catalog is empty")]
    Empty,

    #[error("Format {orientation}/{key} has zero width or height")]
    EmptyDimensions {
        orientation: FrameOrientation,
        key: String,
    },

    #[error("Duplicate format key {orientation}/{key}")]
    DuplicateKey {
        orientation: FrameOrientation,
        key: String,
    },

    #[error("Failed to parse format catalog: {0}")]
    Parse(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrameOrientation {
    Landscape,
    Portrait,
    Square,
}

impl FrameOrientation {
    pub const ALL: [FrameOrientation; 3] = [
        FrameOrientation::Landscape,
        FrameOrientation::Portrait,
        FrameOrientation::Square,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FrameOrientation::Landscape => "landscape",
            FrameOrientation::Portrait => "portrait",
            FrameOrientation::Square => "square",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|o| o.as_str().eq_ignore_ascii_case(value.trim()))
    }
}

impl fmt::Display for FrameOrientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One named output size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatPreset {
    pub orientation: FrameOrientation,
    pub key: String,
    pub label: String,
    pub width: u32,
    pub height: u32,
}

impl FormatPreset {
    pub fn new(
        orientation: FrameOrientation,
        key: impl Into<String>,
        label: impl Into<String>,
        width: u32,
        height: u32,
    ) -> Self {
        Self {
            orientation,
            key: key.into(),
            label: label.into(),
            width,
            height,
        }
    }

    /// Tag used in export file names, e.g. `portrait-a4`.
    pub fn tag(&self) -> String {
        format!("{}-{}", self.orientation, self.key)
    }
}

/// A validated, ordered set of presets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatCatalog {
    presets: Vec<FormatPreset>,
}

impl FormatCatalog {
    /// Build a catalog, rejecting empty catalogs, zero-sized presets and
    /// duplicate `(orientation, key)` pairs.
    pub fn new(presets: Vec<FormatPreset>) -> Result<Self, CatalogError> {
        if presets.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = HashSet::with_capacity(presets.len());
        for preset in &presets {
            if preset.width == 0 || preset.height == 0 {
                return Err(CatalogError::EmptyDimensions {
                    orientation: preset.orientation,
                    key: preset.key.clone(),
                });
            }
            if !seen.insert((preset.orientation, preset.key.as_str())) {
                return Err(CatalogError::DuplicateKey {
                    orientation: preset.orientation,
                    key: preset.key.clone(),
                });
            }
        }

        Ok(Self { presets })
    }

    /// Parse a JSON array of presets.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let presets: Vec<FormatPreset> =
            serde_json::from_str(json).map_err(|e| CatalogError::Parse(e.to_string()))?;
        Self::new(presets)
    }

    /// Paper sizes at 96 DPI plus common aspect ratios.
    pub fn builtin() -> Self {
        use FrameOrientation::*;
        let presets = vec![
            FormatPreset::new(Portrait, "a4", "A4 (210 × 297 mm)", 794, 1123),
            FormatPreset::new(Portrait, "a5", "A5 (148 × 210 mm)", 559, 794),
            FormatPreset::new(Portrait, "letter", "US Letter (8.5 × 11 in)", 816, 1056),
            FormatPreset::new(Portrait, "3x4", "3:4", 768, 1024),
            FormatPreset::new(Portrait, "9x16", "9:16", 720, 1280),
            FormatPreset::new(Landscape, "a4", "A4 (297 × 210 mm)", 1123, 794),
            FormatPreset::new(Landscape, "a5", "A5 (210 × 148 mm)", 794, 559),
            FormatPreset::new(Landscape, "letter", "US Letter (11 × 8.5 in)", 1056, 816),
            FormatPreset::new(Landscape, "4x3", "4:3", 1024, 768),
            FormatPreset::new(Landscape, "16x9", "16:9", 1280, 720),
            FormatPreset::new(Square, "1x1", "1:1", 1000, 1000),
            FormatPreset::new(Square, "small", "1:1 small", 600, 600),
        ];
        Self { presets }
    }

    pub fn lookup(&self, orientation: FrameOrientation, key: &str) -> Option<&FormatPreset> {
        self.presets
            .iter()
            .find(|p| p.orientation == orientation && p.key == key)
    }

    pub fn presets(&self) -> &[FormatPreset] {
        &self.presets
    }

    pub fn by_orientation(
        &self,
        orientation: FrameOrientation,
    ) -> impl Iterator<Item = &FormatPreset> + '_ {
        self.presets
            .iter()
            .filter(move |p| p.orientation == orientation)
    }

    /// The first preset; catalogs are never empty.
    pub fn default_preset(&self) -> &FormatPreset {
        &self.presets[0]
    }
}

impl Default for FormatCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
