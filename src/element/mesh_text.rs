use crate::element::text::TextBinding;
use crate::element::{ElementHandle, ElementKind, Localizable, TextStyle, TextSurface};
use crate::error::{LocalizationError, Result};
use crate::i18n::{LocalizationRegistry, OverrideLists, OverrideRegistry, TextResolver};
use tracing::warn;

/// Text mesh in the 3D scene that follows the active language.
///
/// Unlike a label, the element drives a companion text-mesh primitive that
/// may be missing. Construction without one fails and nothing is registered.
#[derive(Debug, Clone)]
pub struct MeshTextElement<S: TextSurface> {
    binding: TextBinding<S>,
}

impl<S: TextSurface> MeshTextElement<S> {
    /// # Returns
    /// * `Err(MissingSurface)` if `mesh` is `None`
    pub fn new(mesh: Option<S>, overrides: OverrideRegistry<TextStyle>) -> Result<Self> {
        let Some(mesh) = mesh else {
            warn!("Mesh-text element created without a text mesh; discarding it");
            return Err(LocalizationError::MissingSurface {
                kind: ElementKind::MeshText,
                surface: "text mesh",
            });
        };
        Ok(Self {
            binding: TextBinding::capture(mesh, overrides),
        })
    }

    /// Create with overrides from their persisted parallel lists.
    pub fn from_lists(mesh: Option<S>, lists: OverrideLists<TextStyle>) -> Result<Self> {
        Self::new(mesh, OverrideRegistry::from(lists))
    }

    /// Assign a new key and re-resolve the displayed text.
    ///
    /// # Returns
    /// `false` if `key` equals the current key
    pub fn set_key(&mut self, key: &str, resolver: &TextResolver<'_>) -> bool {
        self.binding.set_key(key, resolver)
    }

    /// The key last assigned, not the displayed string.
    pub fn key(&self) -> &str {
        self.binding.key()
    }

    /// Get the string currently shown by the mesh.
    pub fn displayed_text(&self) -> &str {
        self.binding.surface().text()
    }

    /// Get the driven text mesh.
    pub fn mesh(&self) -> &S {
        self.binding.surface()
    }

    /// Get the style captured at construction.
    pub fn default_style(&self) -> &TextStyle {
        self.binding.default_style()
    }

    /// Get the per-language overrides.
    pub fn overrides(&self) -> &OverrideRegistry<TextStyle> {
        self.binding.overrides()
    }

    /// Mutable access to the overrides; takes effect on the next language change.
    pub fn overrides_mut(&mut self) -> &mut OverrideRegistry<TextStyle> {
        self.binding.overrides_mut()
    }

    /// Export the overrides to their persisted form.
    pub fn to_lists(&self) -> OverrideLists<TextStyle> {
        self.binding.overrides().to_lists()
    }
}

impl<S: TextSurface + 'static> MeshTextElement<S> {
    /// Build and attach in one step; on a missing mesh nothing is registered.
    pub fn attach(
        mesh: Option<S>,
        overrides: OverrideRegistry<TextStyle>,
        registry: &mut LocalizationRegistry,
    ) -> Result<ElementHandle<Self>> {
        let element = Self::new(mesh, overrides)?;
        Ok(ElementHandle::attached(element, registry))
    }
}

impl<S: TextSurface> Localizable for MeshTextElement<S> {
    fn kind(&self) -> ElementKind {
        ElementKind::MeshText
    }

    fn on_language_change(&mut self, resolver: &TextResolver<'_>) -> Result<()> {
        self.binding.apply(resolver);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::TextMesh;
    use crate::i18n::{Language, MemorySource, RegistrySettings, TranslationEntry};

    fn registry() -> LocalizationRegistry {
        let mut registry = LocalizationRegistry::new(RegistrySettings::default());
        registry.initialize([MemorySource::new(
            "test",
            vec![TranslationEntry::new("门")
                .unwrap()
                .with(Language::En, "Door")],
        )]);
        registry
    }

    #[test]
    fn test_missing_mesh_self_destructs() {
        let mut registry = registry();
        let result =
            MeshTextElement::<TextMesh>::attach(None, OverrideRegistry::new(), &mut registry);

        assert!(matches!(
            result,
            Err(LocalizationError::MissingSurface {
                kind: ElementKind::MeshText,
                ..
            })
        ));
        assert_eq!(registry.subscriber_count(), 0);
    }

    #[test]
    fn test_mesh_follows_language_and_keeps_character_size() {
        let mut registry = registry();
        let mut mesh = TextMesh::new("门", TextStyle::sized(30));
        mesh.character_size = 0.25;
        let overrides = OverrideRegistry::from_pairs(vec![(Language::En, TextStyle::sized(24))]);

        let handle = MeshTextElement::attach(Some(mesh), overrides, &mut registry).unwrap();
        assert_eq!(handle.borrow().displayed_text(), "门");

        registry.set_language(Language::En);
        let element = handle.borrow();
        assert_eq!(element.displayed_text(), "Door");
        assert_eq!(element.mesh().style.font_size, 24);
        assert_eq!(element.mesh().character_size, 0.25);
    }

    #[test]
    fn test_unconfigured_language_reverts_to_default() {
        let mut registry = registry();
        let overrides = OverrideRegistry::from_pairs(vec![(Language::En, TextStyle::sized(24))]);
        let handle = MeshTextElement::attach(
            Some(TextMesh::new("门", TextStyle::sized(30))),
            overrides,
            &mut registry,
        )
        .unwrap();

        registry.set_language(Language::En);
        registry.set_language(Language::Fr);

        let element = handle.borrow();
        assert_eq!(element.displayed_text(), "门");
        assert_eq!(element.mesh().style.font_size, 30);
    }
}
