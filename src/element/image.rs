use crate::element::{ElementHandle, ElementKind, ImageStyle, ImageSurface, Localizable};
use crate::error::Result;
use crate::i18n::{LocalizationRegistry, OverrideLists, OverrideRegistry, TextResolver};

/// UI image whose sprite may differ per language. Has no text key.
#[derive(Debug, Clone)]
pub struct ImageElement<S: ImageSurface> {
    surface: S,
    default_style: ImageStyle,
    overrides: OverrideRegistry<ImageStyle>,
}

impl<S: ImageSurface> ImageElement<S> {
    /// Create from a surface, capturing its current sprite as the default.
    pub fn new(surface: S, overrides: OverrideRegistry<ImageStyle>) -> Self {
        Self {
            default_style: surface.style(),
            surface,
            overrides,
        }
    }

    /// Create with overrides from their persisted parallel lists.
    pub fn from_lists(surface: S, lists: OverrideLists<ImageStyle>) -> Self {
        Self::new(surface, OverrideRegistry::from(lists))
    }

    /// Get the driven image primitive.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Get the style captured at construction.
    pub fn default_style(&self) -> &ImageStyle {
        &self.default_style
    }

    /// Get the per-language overrides.
    pub fn overrides(&self) -> &OverrideRegistry<ImageStyle> {
        &self.overrides
    }

    /// Mutable access to the overrides; takes effect on the next language change.
    pub fn overrides_mut(&mut self) -> &mut OverrideRegistry<ImageStyle> {
        &mut self.overrides
    }

    /// Export the overrides to their persisted form.
    pub fn to_lists(&self) -> OverrideLists<ImageStyle> {
        self.overrides.to_lists()
    }
}

impl<S: ImageSurface + 'static> ImageElement<S> {
    /// Build and attach in one step.
    pub fn attach(
        surface: S,
        overrides: OverrideRegistry<ImageStyle>,
        registry: &mut LocalizationRegistry,
    ) -> ElementHandle<Self> {
        ElementHandle::attached(Self::new(surface, overrides), registry)
    }
}

impl<S: ImageSurface> Localizable for ImageElement<S> {
    fn kind(&self) -> ElementKind {
        ElementKind::Image
    }

    fn on_language_change(&mut self, resolver: &TextResolver<'_>) -> Result<()> {
        let style = self
            .overrides
            .resolve(resolver.language(), &self.default_style);
        self.surface.apply_style(style);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{Image, SpriteHandle};
    use crate::i18n::{Language, RegistrySettings};

    #[test]
    fn test_sprite_follows_language() {
        let mut registry = LocalizationRegistry::new(RegistrySettings::default());
        let overrides = OverrideRegistry::from_pairs(vec![
            (Language::En, ImageStyle::sprite("logo_en")),
            (Language::Ja, ImageStyle::sprite("logo_ja")),
        ]);
        let handle = ImageElement::attach(
            Image::new(ImageStyle::sprite("logo_zh")),
            overrides,
            &mut registry,
        );

        registry.set_language(Language::Ja);
        assert_eq!(
            handle.borrow().surface().style.sprite,
            Some(SpriteHandle::new("logo_ja"))
        );

        registry.set_language(Language::Fr);
        assert_eq!(
            handle.borrow().surface().style.sprite,
            Some(SpriteHandle::new("logo_zh"))
        );
    }

    #[test]
    fn test_empty_default_sprite_is_restored() {
        let mut registry = LocalizationRegistry::new(RegistrySettings::default());
        let overrides =
            OverrideRegistry::from_pairs(vec![(Language::En, ImageStyle::sprite("badge_en"))]);
        let handle = ImageElement::attach(Image::default(), overrides, &mut registry);

        registry.set_language(Language::En);
        assert!(handle.borrow().surface().style.sprite.is_some());

        registry.set_language(Language::Zh);
        assert!(handle.borrow().surface().style.sprite.is_none());
    }

    #[test]
    fn test_lists_round_trip() {
        let lists = OverrideLists {
            languages: vec![Language::Ja],
            values: vec![ImageStyle::sprite("title_ja")],
        };
        let element = ImageElement::from_lists(Image::default(), lists.clone());
        assert_eq!(element.to_lists(), lists);
    }
}
