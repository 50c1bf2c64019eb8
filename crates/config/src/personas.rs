//! Persona catalog
//!
//! The built-in mascot set. Deployments can replace or extend it; the
//! widget controller only ever resolves personas through the catalog.

use shopvoice_core::{Persona, VoiceProfile};

/// The set of personas a widget instance offers
#[derive(Debug, Clone)]
pub struct PersonaCatalog {
    personas: Vec<Persona>,
    default_id: String,
}

impl PersonaCatalog {
    /// Catalog with the built-in mascots
    pub fn builtin() -> Self {
        Self {
            personas: vec![
                Persona::new("aria", "Aria", "Hi there! Ask me anything about the store.")
                    .with_voice(VoiceProfile::new("en-US-aria").with_rate(1.05)),
                Persona::new("sage", "Sage", "Welcome back. What are you looking for today?")
                    .with_voice(VoiceProfile::new("en-US-sage").with_rate(0.95).with_pitch(-0.2)),
                Persona::new("pip", "Pip", "Hey! Want some recommendations?")
                    .with_voice(VoiceProfile::new("en-US-pip").with_rate(1.2).with_pitch(0.3)),
            ],
            default_id: "aria".to_string(),
        }
    }

    /// Catalog with a custom persona set; the first entry is the default.
    pub fn new(personas: Vec<Persona>) -> Option<Self> {
        let default_id = personas.first()?.id.clone();
        Some(Self {
            personas,
            default_id,
        })
    }

    /// Look up a persona by id
    pub fn get(&self, id: &str) -> Option<&Persona> {
        self.personas.iter().find(|p| p.id == id)
    }

    /// The persona used when nothing is persisted or the stored id is
    /// no longer in the catalog
    pub fn default_persona(&self) -> &Persona {
        self.get(&self.default_id)
            .unwrap_or_else(|| &self.personas[0])
    }

    /// Resolve a stored or requested id, falling back to the default
    pub fn resolve(&self, id: &str) -> &Persona {
        match self.get(id) {
            Some(persona) => persona,
            None => {
                tracing::debug!(id, "unknown persona id, using default");
                self.default_persona()
            }
        }
    }

    /// All personas, for the selection UI
    pub fn all(&self) -> &[Persona] {
        &self.personas
    }
}

impl Default for PersonaCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog() {
        let catalog = PersonaCatalog::builtin();
        assert_eq!(catalog.all().len(), 3);
        assert_eq!(catalog.default_persona().id, "aria");
        assert!(catalog.get("sage").is_some());
        assert!(catalog.get("ghost").is_none());
    }

    #[test]
    fn test_resolve_falls_back_to_default() {
        let catalog = PersonaCatalog::builtin();
        assert_eq!(catalog.resolve("pip").id, "pip");
        assert_eq!(catalog.resolve("ghost").id, "aria");
    }

    #[test]
    fn test_custom_catalog_first_is_default() {
        let catalog = PersonaCatalog::new(vec![
            Persona::new("koda", "Koda", "Woof! Need help?"),
            Persona::new("aria", "Aria", "Hi!"),
        ])
        .unwrap();
        assert_eq!(catalog.default_persona().id, "koda");

        assert!(PersonaCatalog::new(vec![]).is_none());
    }
}
