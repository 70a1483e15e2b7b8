//! Runtime localization for game UI.
//!
//! A [`i18n::LocalizationRegistry`] owns the translation table and the current
//! language. UI elements from [`element`] register with it and are told to
//! re-resolve their text and visual style whenever the language changes.
//! [`scene`] builds such elements from a declarative file for previewing.

pub mod config;
pub mod element;
pub mod error;
pub mod i18n;
pub mod scene;
