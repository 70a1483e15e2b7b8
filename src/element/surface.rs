//! Visual surfaces: the host primitives elements drive.
//!
//! Rendering is the host's business. An element only needs to read the
//! primitive's current state once (to capture its default) and to push text
//! and style into it afterwards. The in-memory primitives below are what the
//! preview binary and the tests drive; a game client implements the traits
//! on its own widgets.

use crate::element::{ImageStyle, TextStyle};

/// A primitive that shows a string with a font and size.
pub trait TextSurface {
    fn text(&self) -> &str;

    fn set_text(&mut self, text: String);

    /// Current font configuration.
    fn style(&self) -> TextStyle;

    fn apply_style(&mut self, style: &TextStyle);
}

/// A primitive that shows a sprite.
pub trait ImageSurface {
    fn style(&self) -> ImageStyle;

    fn apply_style(&mut self, style: &ImageStyle);
}

/// Single-line UI text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Label {
    pub text: String,
    pub style: TextStyle,
}

impl Label {
    /// Create a label showing `text` with `style`.
    pub fn new(text: impl Into<String>, style: TextStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

impl TextSurface for Label {
    fn text(&self) -> &str {
        &self.text
    }

    fn set_text(&mut self, text: String) {
        self.text = text;
    }

    fn style(&self) -> TextStyle {
        self.style.clone()
    }

    fn apply_style(&mut self, style: &TextStyle) {
        self.style = style.clone();
    }
}

/// Text rendered as a mesh in the 3D scene.
///
/// `character_size` is a property of the mesh itself and is not part of the
/// per-language style.
#[derive(Debug, Clone, PartialEq)]
pub struct TextMesh {
    pub text: String,
    pub style: TextStyle,
    pub character_size: f32,
}

impl TextMesh {
    /// Create a mesh with a character size of 1.0.
    pub fn new(text: impl Into<String>, style: TextStyle) -> Self {
        Self {
            text: text.into(),
            style,
            character_size: 1.0,
        }
    }
}

impl Default for TextMesh {
    fn default() -> Self {
        Self::new("", TextStyle::default())
    }
}

impl TextSurface for TextMesh {
    fn text(&self) -> &str {
        &self.text
    }

    fn set_text(&mut self, text: String) {
        self.text = text;
    }

    fn style(&self) -> TextStyle {
        self.style.clone()
    }

    fn apply_style(&mut self, style: &TextStyle) {
        self.style = style.clone();
    }
}

/// UI image.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Image {
    pub style: ImageStyle,
}

impl Image {
    /// Create an image with `style`.
    pub fn new(style: ImageStyle) -> Self {
        Self { style }
    }
}

impl ImageSurface for Image {
    fn style(&self) -> ImageStyle {
        self.style.clone()
    }

    fn apply_style(&mut self, style: &ImageStyle) {
        self.style = style.clone();
    }
}
