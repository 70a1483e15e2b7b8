use crate::element::{ElementHandle, ElementKind, Localizable, TextStyle, TextSurface};
use crate::error::Result;
use crate::i18n::{LocalizationRegistry, OverrideLists, OverrideRegistry, TextResolver};

/// Key, captured default style and overrides of a text-bearing element.
///
/// Shared by the label and text-mesh variants; the displayed string is always
/// `resolver.get_text(real_key)` for the latest language seen.
#[derive(Debug, Clone)]
pub(crate) struct TextBinding<S> {
    surface: S,
    real_key: String,
    default_style: TextStyle,
    overrides: OverrideRegistry<TextStyle>,
}

impl<S: TextSurface> TextBinding<S> {
    /// The surface's current text becomes the key and its current style the
    /// default.
    pub(crate) fn capture(surface: S, overrides: OverrideRegistry<TextStyle>) -> Self {
        Self {
            real_key: surface.text().to_string(),
            default_style: surface.style(),
            surface,
            overrides,
        }
    }

    /// Replace the key and re-resolve the text; style is left alone.
    pub(crate) fn set_key(&mut self, key: &str, resolver: &TextResolver<'_>) -> bool {
        if self.real_key == key {
            return false;
        }
        self.real_key = key.to_string();
        self.surface.set_text(resolver.get_text(key));
        true
    }

    /// Push the resolved text and style into the surface.
    pub(crate) fn apply(&mut self, resolver: &TextResolver<'_>) {
        self.surface.set_text(resolver.get_text(&self.real_key));
        let style = self
            .overrides
            .resolve(resolver.language(), &self.default_style);
        self.surface.apply_style(style);
    }

    pub(crate) fn key(&self) -> &str {
        &self.real_key
    }

    pub(crate) fn surface(&self) -> &S {
        &self.surface
    }

    pub(crate) fn default_style(&self) -> &TextStyle {
        &self.default_style
    }

    pub(crate) fn overrides(&self) -> &OverrideRegistry<TextStyle> {
        &self.overrides
    }

    pub(crate) fn overrides_mut(&mut self) -> &mut OverrideRegistry<TextStyle> {
        &mut self.overrides
    }
}

/// Single-line UI text that follows the active language.
#[derive(Debug, Clone)]
pub struct TextElement<S: TextSurface> {
    binding: TextBinding<S>,
}

impl<S: TextSurface> TextElement<S> {
    /// Create from a surface, capturing its text as the key and its style as
    /// the default. No overrides.
    pub fn new(surface: S) -> Self {
        Self::with_overrides(surface, OverrideRegistry::new())
    }

    /// Create from a surface with the given overrides.
    pub fn with_overrides(surface: S, overrides: OverrideRegistry<TextStyle>) -> Self {
        Self {
            binding: TextBinding::capture(surface, overrides),
        }
    }

    /// Create with overrides from their persisted parallel lists.
    pub fn from_lists(surface: S, lists: OverrideLists<TextStyle>) -> Self {
        Self::with_overrides(surface, OverrideRegistry::from(lists))
    }

    /// Assign a new key and re-resolve the displayed text.
    ///
    /// # Returns
    /// `false` if `key` equals the current key (nothing is recomputed)
    pub fn set_key(&mut self, key: &str, resolver: &TextResolver<'_>) -> bool {
        self.binding.set_key(key, resolver)
    }

    /// The key last assigned, not the displayed string.
    pub fn key(&self) -> &str {
        self.binding.key()
    }

    /// Get the string currently shown by the surface.
    pub fn displayed_text(&self) -> &str {
        self.binding.surface().text()
    }

    /// Get the driven label primitive.
    pub fn surface(&self) -> &S {
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

    /// Persisted form of the overrides.
    pub fn to_lists(&self) -> OverrideLists<TextStyle> {
        self.binding.overrides().to_lists()
    }
}

impl<S: TextSurface + 'static> TextElement<S> {
    /// Build and attach in one step.
    pub fn attach(
        surface: S,
        overrides: OverrideRegistry<TextStyle>,
        registry: &mut LocalizationRegistry,
    ) -> ElementHandle<Self> {
        ElementHandle::attached(Self::with_overrides(surface, overrides), registry)
    }
}

impl<S: TextSurface> Localizable for TextElement<S> {
    fn kind(&self) -> ElementKind {
        ElementKind::Text
    }

    fn on_language_change(&mut self, resolver: &TextResolver<'_>) -> Result<()> {
        self.binding.apply(resolver);
        Ok(())
    }
}
