//! Localizable UI elements.
//!
//! An element wraps a host primitive (a label, a text mesh, an image), keeps
//! the visual configuration the primitive had when the element was created,
//! and re-resolves its content whenever the registry announces a language.
//!
//! # Lifecycle
//!
//! `Unattached → Attached → Detached`. Attaching registers the element and
//! pulls the current language once. Detaching unregisters it for good: a
//! detached handle can never be attached again. Dropping a handle without
//! detaching also stops notifications, since the registry only keeps weak
//! references.
//!
//! `LocalizationRegistry::teardown` forgets every subscriber without telling
//! the handles. Such a handle stays `Attached` but is orphaned
//! (`ElementHandle::is_orphaned`); calling `attach` again joins the next
//! lifecycle cycle.

mod image;
mod mesh_text;
mod style;
mod surface;
mod text;

pub use image::ImageElement;
pub use mesh_text::MeshTextElement;
pub use style::{FontHandle, ImageStyle, SpriteHandle, TextStyle, DEFAULT_FONT_SIZE};
pub use surface::{Image, ImageSurface, Label, TextMesh, TextSurface};
pub use text::TextElement;

use crate::error::Result;
use crate::i18n::{LocalizationRegistry, TextResolver};
use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;
use tracing::{debug, warn};

/// Anything that reacts to language changes.
pub trait Localizable {
    /// Which variant this is, for logs and reports.
    fn kind(&self) -> ElementKind;

    /// Re-resolve displayed content for `resolver.language()` and apply it.
    ///
    /// Must be idempotent: applying the same language twice leaves the same
    /// visible state.
    fn on_language_change(&mut self, resolver: &TextResolver<'_>) -> Result<()>;
}

/// How the registry holds on to elements.
pub type SharedElement = Rc<RefCell<dyn Localizable>>;

/// The three element variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Image,
    Text,
    MeshText,
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ElementKind::Image => "image",
            ElementKind::Text => "text",
            ElementKind::MeshText => "mesh-text",
        };
        f.write_str(name)
    }
}

/// Registration state of an `ElementHandle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementState {
    Unattached,
    Attached,
    Detached,
}

/// Owner of a live element and of its registration state.
pub struct ElementHandle<E: Localizable + 'static> {
    element: Rc<RefCell<E>>,
    state: ElementState,
}

impl<E: Localizable + 'static> ElementHandle<E> {
    /// Wrap an element without registering it.
    pub fn new(element: E) -> Self {
        Self {
            element: Rc::new(RefCell::new(element)),
            state: ElementState::Unattached,
        }
    }

    /// Wrap and attach in one step.
    pub fn attached(element: E, registry: &mut LocalizationRegistry) -> Self {
        let mut handle = Self::new(element);
        handle.attach(registry);
        handle
    }

    /// Register with `registry` and apply its current language.
    ///
    /// An orphaned handle (attached, but dropped by a registry teardown) is
    /// registered again.
    ///
    /// # Returns
    /// `false` without doing anything if the handle is detached, or attached
    /// and still registered
    pub fn attach(&mut self, registry: &mut LocalizationRegistry) -> bool {
        match self.state {
            ElementState::Unattached => {}
            ElementState::Attached if self.is_orphaned(registry) => {
                debug!("Re-attaching orphaned {} element", self.kind());
            }
            state => {
                debug!(
                    "Ignoring attach of {} element in state {:?}",
                    self.kind(),
                    state
                );
                return false;
            }
        }

        registry.register(&self.shared());
        self.state = ElementState::Attached;

        let resolver = registry.resolver();
        let result = self.element.borrow_mut().on_language_change(&resolver);
        if let Err(e) = result {
            warn!("Initial localization of {} element failed: {}", self.kind(), e);
        }
        true
    }

    /// Unregister from `registry`. Irreversible.
    ///
    /// # Returns
    /// `false` if the handle was not attached
    pub fn detach(&mut self, registry: &mut LocalizationRegistry) -> bool {
        if self.state != ElementState::Attached {
            return false;
        }
        registry.unregister(&self.shared());
        self.state = ElementState::Detached;
        true
    }

    /// Current registration state.
    pub fn state(&self) -> ElementState {
        self.state
    }

    /// True when the handle is `Attached` but `registry` no longer knows it,
    /// which happens after `LocalizationRegistry::teardown`.
    pub fn is_orphaned(&self, registry: &LocalizationRegistry) -> bool {
        self.state == ElementState::Attached && !registry.is_registered(&self.shared())
    }

    /// Kind of the wrapped element.
    pub fn kind(&self) -> ElementKind {
        self.element.borrow().kind()
    }

    /// The element as the registry sees it.
    pub fn shared(&self) -> SharedElement {
        self.element.clone()
    }

    /// Shared access to the element.
    ///
    /// # Panics
    /// If the element is currently borrowed mutably.
    pub fn borrow(&self) -> Ref<'_, E> {
        self.element.borrow()
    }

    /// Mutable access to the element, e.g. to call `set_key`.
    ///
    /// # Panics
    /// If the element is currently borrowed.
    pub fn borrow_mut(&self) -> RefMut<'_, E> {
        self.element.borrow_mut()
    }
}

impl<E: Localizable + 'static> fmt::Debug for ElementHandle<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElementHandle")
            .field("kind", &self.kind())
            .field("state", &self.state)
            .finish()
    }
}
