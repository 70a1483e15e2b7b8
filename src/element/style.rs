//! Visual property bundles that elements capture as defaults and override per
//! language.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Default font size of a freshly created text primitive.
pub const DEFAULT_FONT_SIZE: u32 = 14;

/// Reference to a font asset owned by the host.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FontHandle(String);

impl FontHandle {
    /// Create a handle from an asset name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the asset name.
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FontHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Reference to a sprite asset owned by the host.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpriteHandle(String);

impl SpriteHandle {
    /// Create a handle from an asset name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the asset name.
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SpriteHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Font and size of a text-bearing primitive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextStyle {
    #[serde(default)]
    pub font: Option<FontHandle>,
    #[serde(default = "default_font_size")]
    pub font_size: u32,
}

fn default_font_size() -> u32 {
    DEFAULT_FONT_SIZE
}

impl TextStyle {
    /// Create a style with an explicit font and size.
    pub fn new(font: Option<FontHandle>, font_size: u32) -> Self {
        Self { font, font_size }
    }

    /// Host default font at the given size.
    pub fn sized(font_size: u32) -> Self {
        Self {
            font: None,
            font_size,
        }
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font: None,
            font_size: DEFAULT_FONT_SIZE,
        }
    }
}

/// Sprite of an image primitive. `None` shows no sprite.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageStyle {
    #[serde(default)]
    pub sprite: Option<SpriteHandle>,
}

impl ImageStyle {
    /// Create a style showing `sprite`, or nothing when `None`.
    pub fn new(sprite: Option<SpriteHandle>) -> Self {
        Self { sprite }
    }

    /// Style showing the named sprite.
    pub fn sprite(name: impl Into<String>) -> Self {
        Self {
            sprite: Some(SpriteHandle::new(name)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_style_default_size() {
        assert_eq!(TextStyle::default().font_size, DEFAULT_FONT_SIZE);
        assert!(TextStyle::default().font.is_none());
    }

    #[test]
    fn test_text_style_serde_defaults() {
        let style: TextStyle = serde_json::from_str(r#"{ "font": "NotoSansJP" }"#).unwrap();
        assert_eq!(style.font, Some(FontHandle::new("NotoSansJP")));
        assert_eq!(style.font_size, DEFAULT_FONT_SIZE);
    }

    #[test]
    fn test_handles_serialize_transparently() {
        let json = serde_json::to_string(&ImageStyle::sprite("flag_en")).unwrap();
        assert_eq!(json, r#"{"sprite":"flag_en"}"#);
    }
}
