//! User preference persistence trait

use crate::Result;

/// Simple key-value store for durable user-preference flags
///
/// Only a small subset of widget state survives reloads (`muted`,
/// `persona`, `open`). Values are read once at startup and written on
/// each change; an absent key falls back to a fixed default chosen by
/// the caller.
pub trait PreferenceStore: Send + Sync + 'static {
    /// Read a stored value, `None` when never written.
    fn get(&self, key: &str) -> Option<String>;

    /// Write a value, overwriting any previous one.
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// Well-known preference keys
pub mod keys {
    /// "true"/"false" - speech output muted
    pub const MUTED: &str = "muted";
    /// Persona id selected by the user
    pub const PERSONA: &str = "persona";
    /// "true"/"false" - widget panel open
    pub const OPEN: &str = "open";
}
