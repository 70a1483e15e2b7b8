//! Declarative scene files for previewing localized elements.
//!
//! A scene lists elements with the state their primitive has at creation
//! time: the text that becomes the key, the default style, and the persisted
//! per-language overrides.
//!
//! ```json
//! {
//!   "elements": [
//!     { "kind": "text", "name": "title", "key": "开始游戏",
//!       "style": { "font_size": 14 },
//!       "overrides": { "languages": ["en"], "values": [{ "font_size": 20 }] } },
//!     { "kind": "image", "name": "logo", "style": { "sprite": "logo_zh" } }
//!   ]
//! }
//! ```

use crate::element::{
    ElementHandle, Image, ImageElement, ImageStyle, Label, MeshTextElement, TextElement, TextMesh,
    TextStyle,
};
use crate::error::{LocalizationError, Result};
use crate::i18n::{LocalizationRegistry, OverrideLists, TranslationValidator, ValidationReport};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneSpec {
    #[serde(default)]
    pub elements: Vec<ElementSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ElementSpec {
    Text {
        name: String,
        key: String,
        #[serde(default)]
        style: TextStyle,
        #[serde(default)]
        overrides: OverrideLists<TextStyle>,
    },
    MeshText {
        name: String,
        /// Absent when the scene object has no mesh attached
        #[serde(default)]
        mesh: Option<TextMeshSpec>,
        #[serde(default)]
        overrides: OverrideLists<TextStyle>,
    },
    Image {
        name: String,
        #[serde(default)]
        style: ImageStyle,
        #[serde(default)]
        overrides: OverrideLists<ImageStyle>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextMeshSpec {
    pub key: String,
    #[serde(default)]
    pub style: TextStyle,
    #[serde(default = "default_character_size")]
    pub character_size: f32,
}

fn default_character_size() -> f32 {
    1.0
}

impl ElementSpec {
    /// Name of the element in the scene file.
    pub fn name(&self) -> &str {
        match self {
            ElementSpec::Text { name, .. }
            | ElementSpec::MeshText { name, .. }
            | ElementSpec::Image { name, .. } => name,
        }
    }
}

impl SceneSpec {
    /// Check every element's persisted override lists.
    pub fn validate(&self) -> ValidationReport {
        let mut report = ValidationReport::new();
        for element in &self.elements {
            let mut element_report = match element {
                ElementSpec::Text { overrides, .. } | ElementSpec::MeshText { overrides, .. } => {
                    TranslationValidator::validate_override_lists(overrides)
                }
                ElementSpec::Image { overrides, .. } => {
                    TranslationValidator::validate_override_lists(overrides)
                }
            };
            for warning in element_report.warnings.iter_mut() {
                *warning = format!("{}: {}", element.name(), warning);
            }
            report.merge(element_report);
        }
        report
    }
}

/// Read a scene file.
pub fn load_scene(path: &Path) -> Result<SceneSpec> {
    let name = path.display().to_string();
    let content = std::fs::read_to_string(path).map_err(|source| LocalizationError::Io {
        name: name.clone(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| LocalizationError::Parse { name, source })
}

/// A live element built from a scene, backed by in-memory primitives.
#[derive(Debug)]
pub enum SceneElement {
    Text(ElementHandle<TextElement<Label>>),
    MeshText(ElementHandle<MeshTextElement<TextMesh>>),
    Image(ElementHandle<ImageElement<Image>>),
}

impl SceneElement {
    /// One-line summary of what the primitive currently shows.
    pub fn describe(&self) -> String {
        match self {
            SceneElement::Text(handle) => {
                let element = handle.borrow();
                format!(
                    "text '{}' -> '{}' ({})",
                    element.key(),
                    element.displayed_text(),
                    describe_style(&element.surface().style)
                )
            }
            SceneElement::MeshText(handle) => {
                let element = handle.borrow();
                format!(
                    "mesh-text '{}' -> '{}' ({}, character size {})",
                    element.key(),
                    element.displayed_text(),
                    describe_style(&element.mesh().style),
                    element.mesh().character_size
                )
            }
            SceneElement::Image(handle) => {
                let element = handle.borrow();
                match &element.surface().style.sprite {
                    Some(sprite) => format!("image sprite {}", sprite),
                    None => "image without sprite".to_string(),
                }
            }
        }
    }

    fn detach(&mut self, registry: &mut LocalizationRegistry) -> bool {
        match self {
            SceneElement::Text(handle) => handle.detach(registry),
            SceneElement::MeshText(handle) => handle.detach(registry),
            SceneElement::Image(handle) => handle.detach(registry),
        }
    }
}

fn describe_style(style: &TextStyle) -> String {
    match &style.font {
        Some(font) => format!("{} {}pt", font, style.font_size),
        None => format!("default font {}pt", style.font_size),
    }
}

/// The elements of a scene, attached to a registry.
#[derive(Debug, Default)]
pub struct Scene {
    elements: Vec<(String, SceneElement)>,
}

impl Scene {
    /// Create and attach every element of `spec`.
    ///
    /// A mesh-text element without a mesh is skipped with a warning, the same
    /// way the element refuses to exist at runtime.
    pub fn build(spec: &SceneSpec, registry: &mut LocalizationRegistry) -> Self {
        let mut elements = Vec::with_capacity(spec.elements.len());

        for element in &spec.elements {
            let built = match element {
                ElementSpec::Text {
                    key,
                    style,
                    overrides,
                    ..
                } => {
                    let label = Label::new(key.clone(), style.clone());
                    let element = TextElement::from_lists(label, overrides.clone());
                    SceneElement::Text(ElementHandle::attached(element, registry))
                }
                ElementSpec::MeshText {
                    mesh, overrides, ..
                } => {
                    let mesh = mesh.as_ref().map(|spec| TextMesh {
                        text: spec.key.clone(),
                        style: spec.style.clone(),
                        character_size: spec.character_size,
                    });
                    match MeshTextElement::from_lists(mesh, overrides.clone()) {
                        Ok(element) => {
                            SceneElement::MeshText(ElementHandle::attached(element, registry))
                        }
                        Err(e) => {
                            warn!("Skipping scene element '{}': {}", element.name(), e);
                            continue;
                        }
                    }
                }
                ElementSpec::Image {
                    style, overrides, ..
                } => {
                    let element =
                        ImageElement::from_lists(Image::new(style.clone()), overrides.clone());
                    SceneElement::Image(ElementHandle::attached(element, registry))
                }
            };
            elements.push((element.name().to_string(), built));
        }

        info!(
            "Built scene with {} of {} elements",
            elements.len(),
            spec.elements.len()
        );
        Self { elements }
    }

    /// Get the number of built elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Check if no element was built.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Find a built element by name.
    pub fn get(&self, name: &str) -> Option<&SceneElement> {
        self.elements
            .iter()
            .find(|(element_name, _)| element_name == name)
            .map(|(_, element)| element)
    }

    /// `name: summary` for every element, in scene order.
    pub fn describe(&self) -> Vec<String> {
        self.elements
            .iter()
            .map(|(name, element)| format!("{}: {}", name, element.describe()))
            .collect()
    }

    /// Detach every element. Returns how many were attached.
    pub fn detach_all(&mut self, registry: &mut LocalizationRegistry) -> usize {
        self.elements
            .iter_mut()
            .filter_map(|(_, element)| element.detach(registry).then_some(()))
            .count()
    }
}
